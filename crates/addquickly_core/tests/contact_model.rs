use addquickly_core::{Contact, ContactValidationError};
use uuid::Uuid;

#[test]
fn contact_new_sets_defaults() {
    let contact = Contact::new("Alice");

    assert!(!contact.uuid.is_nil());
    assert_eq!(contact.name, "Alice");
    assert_eq!(contact.summary, "");
    assert!(!contact.met_long_ago);
    assert_eq!(contact.group, "");
    assert!(contact.is_active());
    assert!(contact.validate().is_ok());
}

#[test]
fn soft_delete_and_restore_work() {
    let mut contact = Contact::new("Bob");

    contact.soft_delete();
    assert!(contact.is_deleted);
    assert!(!contact.is_active());

    contact.restore();
    assert!(!contact.is_deleted);
    assert!(contact.is_active());
}

#[test]
fn validate_rejects_blank_names() {
    let empty = Contact::new("");
    assert_eq!(empty.validate(), Err(ContactValidationError::EmptyName));

    let blank = Contact::new("   ");
    assert_eq!(blank.validate(), Err(ContactValidationError::EmptyName));
}

#[test]
fn validate_rejects_nil_uuid() {
    let contact = Contact::with_id(Uuid::nil(), "Alice");
    assert_eq!(contact.validate(), Err(ContactValidationError::NilUuid));
}

#[test]
fn contact_serialization_uses_expected_wire_fields() {
    let contact_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut contact = Contact::with_id(contact_id, "Alice Smith");
    contact.summary = "met at the conference".to_string();
    contact.met_long_ago = true;
    contact.group = "work".to_string();

    let json = serde_json::to_value(&contact).unwrap();
    assert_eq!(json["uuid"], contact_id.to_string());
    assert_eq!(json["name"], "Alice Smith");
    assert_eq!(json["summary"], "met at the conference");
    assert_eq!(json["met_long_ago"], true);
    assert_eq!(json["group"], "work");
    assert_eq!(json["is_deleted"], false);

    let decoded: Contact = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, contact);
}
