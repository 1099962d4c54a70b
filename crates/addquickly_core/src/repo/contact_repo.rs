//! Contact repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over committed `contacts` storage.
//! - Own tag-link replacement logic with atomic semantics.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Contact::validate()` before SQL mutations.
//! - All read queries are constrained to `is_deleted = 0`.
//! - Tag names are normalized to lowercase before persistence; the parse
//!   layer stays case-sensitive, normalization happens only here.
//! - `set_contact_tags` replaces the whole tag set in a single transaction.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::db::DbError;
use crate::model::contact::{Contact, ContactId, ContactValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, Transaction, TransactionBehavior};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const CONTACTS_DEFAULT_LIMIT: u32 = 20;
const CONTACTS_LIMIT_MAX: u32 = 100;

const CONTACT_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    summary,
    met_long_ago,
    group_name,
    created_at,
    updated_at
FROM contacts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    NotFound(ContactId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read model for contact list/detail use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    /// Stable contact id.
    pub contact_id: ContactId,
    /// Display name captured from the quick-add screen.
    pub name: String,
    /// Free-form one-line summary.
    pub summary: String,
    /// Marks contacts imported from long-ago acquaintances.
    pub met_long_ago: bool,
    /// Grouping label; empty string means ungrouped.
    pub group: String,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Update timestamp in epoch milliseconds.
    pub updated_at: i64,
    /// Contact tags, normalized to lowercase, sorted by name.
    pub tags: Vec<String>,
}

/// One free-form note attached to a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactNote {
    /// Row id, stable within one database.
    pub id: i64,
    /// Note body.
    pub content: String,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

/// Query options for contact list use-cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactListQuery {
    /// Optional exact group filter.
    pub group: Option<String>,
    /// Optional single-tag exact match filter (case-insensitive).
    pub tag: Option<String>,
    /// Includes soft-deleted rows when set.
    pub include_deleted: bool,
    /// Maximum rows to return. Defaults to 20 and clamps to 100.
    pub limit: Option<u32>,
    /// Number of rows to skip.
    pub offset: u32,
}

/// Repository interface for contact operations.
pub trait ContactRepository {
    /// Creates one contact row and returns its stable id.
    fn create_contact(&self, contact: &Contact) -> RepoResult<ContactId>;
    /// Creates one contact and its tag links in a single transaction.
    fn create_contact_with_tags(
        &mut self,
        contact: &Contact,
        tags: &[String],
    ) -> RepoResult<ContactId>;
    /// Replaces all scalar fields of an existing contact.
    fn update_contact(&self, contact: &Contact) -> RepoResult<()>;
    /// Gets one active contact by id.
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<ContactRecord>>;
    /// Lists contacts in insertion (commit) order using filters + pagination.
    fn list_contacts(&self, query: &ContactListQuery) -> RepoResult<Vec<ContactRecord>>;
    /// Replaces all tags for the given contact in one transaction.
    fn set_contact_tags(&mut self, id: ContactId, tags: &[String]) -> RepoResult<()>;
    /// Returns all known tags sorted by name.
    fn list_tags(&self) -> RepoResult<Vec<String>>;
    /// Appends one note to a contact and returns the note row id.
    fn add_note(&self, id: ContactId, content: &str) -> RepoResult<i64>;
    /// Lists a contact's notes in creation order.
    fn list_notes(&self, id: ContactId) -> RepoResult<Vec<ContactNote>>;
    /// Soft-deletes a contact by id.
    fn soft_delete_contact(&self, id: ContactId) -> RepoResult<()>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_contact(&self, contact: &Contact) -> RepoResult<ContactId> {
        contact.validate()?;

        self.conn.execute(
            "INSERT INTO contacts (uuid, name, summary, met_long_ago, group_name, is_deleted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                contact.uuid.to_string(),
                contact.name.as_str(),
                contact.summary.as_str(),
                bool_to_int(contact.met_long_ago),
                contact.group.as_str(),
                bool_to_int(contact.is_deleted),
            ],
        )?;

        Ok(contact.uuid)
    }

    fn create_contact_with_tags(
        &mut self,
        contact: &Contact,
        tags: &[String],
    ) -> RepoResult<ContactId> {
        contact.validate()?;

        let uuid_text = contact.uuid.to_string();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO contacts (uuid, name, summary, met_long_ago, group_name, is_deleted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                uuid_text.as_str(),
                contact.name.as_str(),
                contact.summary.as_str(),
                bool_to_int(contact.met_long_ago),
                contact.group.as_str(),
                bool_to_int(contact.is_deleted),
            ],
        )?;
        link_tags_in_tx(&tx, uuid_text.as_str(), tags)?;
        tx.commit()?;

        Ok(contact.uuid)
    }

    fn update_contact(&self, contact: &Contact) -> RepoResult<()> {
        contact.validate()?;

        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                name = ?1,
                summary = ?2,
                met_long_ago = ?3,
                group_name = ?4,
                is_deleted = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?6;",
            params![
                contact.name.as_str(),
                contact.summary.as_str(),
                bool_to_int(contact.met_long_ago),
                contact.group.as_str(),
                bool_to_int(contact.is_deleted),
                contact.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(contact.uuid));
        }

        Ok(())
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<ContactRecord>> {
        let uuid_text = id.to_string();
        let mut stmt = self.conn.prepare(&format!(
            "{CONTACT_SELECT_SQL}
             WHERE uuid = ?1
               AND is_deleted = 0;"
        ))?;

        let mut rows = stmt.query([uuid_text.as_str()])?;
        if let Some(row) = rows.next()? {
            let record = parse_contact_row(self.conn, row)?;
            return Ok(Some(record));
        }

        Ok(None)
    }

    fn list_contacts(&self, query: &ContactListQuery) -> RepoResult<Vec<ContactRecord>> {
        let mut sql = format!("{CONTACT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND is_deleted = 0");
        }

        if let Some(group) = query.group.as_ref() {
            sql.push_str(" AND group_name = ?");
            bind_values.push(Value::Text(group.clone()));
        }

        if let Some(tag) = query.tag.as_ref() {
            sql.push_str(
                " AND EXISTS (
                    SELECT 1
                    FROM contact_tags ct
                    INNER JOIN tags t ON t.id = ct.tag_id
                    WHERE ct.contact_uuid = contacts.uuid
                      AND t.name = ? COLLATE NOCASE
                )",
            );
            bind_values.push(Value::Text(tag.clone()));
        }

        // Committed contacts render in capture order. A whole batch can land
        // within one clock tick, so insertion order (rowid), not created_at,
        // is the order key.
        sql.push_str(" ORDER BY rowid ASC");
        let limit = normalize_contact_limit(query.limit);
        sql.push_str(" LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit)));
        if query.offset > 0 {
            sql.push_str(" OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(self.conn, row)?);
        }

        Ok(contacts)
    }

    fn set_contact_tags(&mut self, id: ContactId, tags: &[String]) -> RepoResult<()> {
        let uuid_text = id.to_string();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !contact_exists(&tx, uuid_text.as_str())? {
            return Err(RepoError::NotFound(id));
        }

        tx.execute(
            "DELETE FROM contact_tags WHERE contact_uuid = ?1;",
            [uuid_text.as_str()],
        )?;
        link_tags_in_tx(&tx, uuid_text.as_str(), tags)?;
        tx.execute(
            "UPDATE contacts
             SET updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1
               AND is_deleted = 0;",
            [uuid_text.as_str()],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn list_tags(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM tags ORDER BY name COLLATE NOCASE ASC;")?;
        let mut rows = stmt.query([])?;
        let mut tags = Vec::new();
        while let Some(row) = rows.next()? {
            let value: String = row.get("name")?;
            tags.push(value.to_lowercase());
        }
        Ok(tags)
    }

    fn add_note(&self, id: ContactId, content: &str) -> RepoResult<i64> {
        let uuid_text = id.to_string();
        if !contact_exists(self.conn, uuid_text.as_str())? {
            return Err(RepoError::NotFound(id));
        }

        self.conn.execute(
            "INSERT INTO contact_notes (contact_uuid, content) VALUES (?1, ?2);",
            params![uuid_text.as_str(), content],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn list_notes(&self, id: ContactId) -> RepoResult<Vec<ContactNote>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, content, created_at
             FROM contact_notes
             WHERE contact_uuid = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(ContactNote {
                id: row.get("id")?,
                content: row.get("content")?,
                created_at: row.get("created_at")?,
            });
        }
        Ok(notes)
    }

    fn soft_delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                is_deleted = 1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

/// Normalizes list limit according to the contacts contract.
pub fn normalize_contact_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) => CONTACTS_DEFAULT_LIMIT,
        Some(value) if value > CONTACTS_LIMIT_MAX => CONTACTS_LIMIT_MAX,
        Some(value) => value,
        None => CONTACTS_DEFAULT_LIMIT,
    }
}

/// Normalizes one tag value according to the storage contract.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes and deduplicates tag values for persistence.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut unique = BTreeSet::new();
    for tag in tags {
        if let Some(value) = normalize_tag(tag) {
            unique.insert(value);
        }
    }
    unique.into_iter().collect()
}

fn parse_contact_row(conn: &Connection, row: &Row<'_>) -> RepoResult<ContactRecord> {
    let uuid_text: String = row.get("uuid")?;
    let contact_id = parse_uuid(&uuid_text)?;
    let tags = load_tags_for_contact(conn, &uuid_text)?;

    Ok(ContactRecord {
        contact_id,
        name: row.get("name")?,
        summary: row.get("summary")?,
        met_long_ago: int_to_bool(row.get("met_long_ago")?, "contacts.met_long_ago")?,
        group: row.get("group_name")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        tags,
    })
}

fn load_tags_for_contact(conn: &Connection, contact_uuid: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT t.name
         FROM contact_tags ct
         INNER JOIN tags t ON t.id = ct.tag_id
         WHERE ct.contact_uuid = ?1
         ORDER BY t.name COLLATE NOCASE ASC;",
    )?;
    let mut rows = stmt.query([contact_uuid])?;
    let mut tags = Vec::new();
    while let Some(row) = rows.next()? {
        let value: String = row.get(0)?;
        tags.push(value.to_lowercase());
    }
    Ok(tags)
}

fn link_tags_in_tx(tx: &Transaction<'_>, contact_uuid: &str, tags: &[String]) -> RepoResult<()> {
    for tag in tags {
        tx.execute(
            "INSERT OR IGNORE INTO tags (name) VALUES (?1);",
            [tag.as_str()],
        )?;
        tx.execute(
            "INSERT OR IGNORE INTO contact_tags (contact_uuid, tag_id)
             SELECT ?1, id
             FROM tags
             WHERE name = ?2 COLLATE NOCASE;",
            params![contact_uuid, tag.as_str()],
        )?;
    }
    Ok(())
}

fn contact_exists(conn: &Connection, contact_uuid: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM contacts
            WHERE uuid = ?1
              AND is_deleted = 0
        );",
        [contact_uuid],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn parse_uuid(value: &str) -> RepoResult<ContactId> {
    Uuid::parse_str(value).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{value}` in contacts.uuid"))
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    for table in ["contacts", "tags", "contact_tags", "contact_notes"] {
        if !table_exists(conn, table)? {
            return Err(RepoError::InvalidData(format!(
                "required table `{table}` is missing; run migrations first"
            )));
        }
    }

    for column in ["uuid", "name", "group_name", "created_at", "is_deleted"] {
        if !table_has_column(conn, "contacts", column)? {
            return Err(RepoError::InvalidData(format!(
                "required column `contacts.{column}` is missing; run migrations first"
            )));
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn int_to_bool(value: i64, source: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {source}"
        ))),
    }
}
