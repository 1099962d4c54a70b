use addquickly_core::db::open_db_in_memory;
use addquickly_core::{ContactService, ContactServiceError, SqliteContactRepository};

#[test]
fn set_contact_tags_replaces_full_set_with_lowercase_normalization() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&mut conn).unwrap();
    let mut service = ContactService::new(repo);
    let created = service.create_contact("Alice").unwrap();

    let after_first = service
        .set_contact_tags(
            created.contact_id,
            vec![
                "Work".to_string(),
                "IMPORTANT".to_string(),
                "work".to_string(),
            ],
        )
        .unwrap();
    assert_eq!(
        after_first.tags,
        vec!["important".to_string(), "work".to_string()]
    );

    let after_replace = service
        .set_contact_tags(created.contact_id, vec!["Personal".to_string()])
        .unwrap();
    assert_eq!(after_replace.tags, vec!["personal".to_string()]);
}

#[test]
fn set_contact_tags_rejects_blank_tag_values() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&mut conn).unwrap();
    let mut service = ContactService::new(repo);
    let created = service.create_contact("Bob").unwrap();

    let err = service
        .set_contact_tags(created.contact_id, vec!["   ".to_string()])
        .unwrap_err();
    assert!(matches!(err, ContactServiceError::InvalidTag(_)));
}

#[test]
fn list_supports_single_tag_filter_case_insensitively() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&mut conn).unwrap();
    let mut service = ContactService::new(repo);

    let tagged = service.create_contact("work friend").unwrap();
    let other = service.create_contact("gym friend").unwrap();
    service
        .set_contact_tags(tagged.contact_id, vec!["Work".to_string()])
        .unwrap();
    service
        .set_contact_tags(other.contact_id, vec!["Sports".to_string()])
        .unwrap();

    let filtered = service
        .list_contacts(None, Some("WORK".to_string()), Some(10), 0)
        .unwrap();
    assert_eq!(filtered.items.len(), 1);
    assert_eq!(filtered.items[0].contact_id, tagged.contact_id);
}

#[test]
fn list_supports_group_filter() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&mut conn).unwrap();
    let mut service = ContactService::new(repo);

    let created = service.create_contact("Dana").unwrap();
    let mut dana = addquickly_core::Contact::with_id(created.contact_id, "Dana");
    dana.group = "running club".to_string();
    service.update_contact(&dana).unwrap();
    service.create_contact("Eve").unwrap();

    let filtered = service
        .list_contacts(Some("running club".to_string()), None, Some(10), 0)
        .unwrap();
    assert_eq!(filtered.items.len(), 1);
    assert_eq!(filtered.items[0].name, "Dana");
}

#[test]
fn list_limit_defaults_to_20_and_caps_at_100() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&mut conn).unwrap();
    let mut service = ContactService::new(repo);
    for idx in 0..120 {
        service.create_contact(format!("contact {idx}")).unwrap();
    }

    let defaulted = service.list_contacts(None, None, None, 0).unwrap();
    assert_eq!(defaulted.applied_limit, 20);
    assert_eq!(defaulted.items.len(), 20);

    let capped = service.list_contacts(None, None, Some(500), 0).unwrap();
    assert_eq!(capped.applied_limit, 100);
    assert_eq!(capped.items.len(), 100);
}

#[test]
fn list_tags_returns_sorted_vocabulary() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&mut conn).unwrap();
    let mut service = ContactService::new(repo);

    let first = service.create_contact("Alice").unwrap();
    let second = service.create_contact("Bob").unwrap();
    service
        .set_contact_tags(first.contact_id, vec!["zeta".to_string()])
        .unwrap();
    service
        .set_contact_tags(
            second.contact_id,
            vec!["Alpha".to_string(), "ZETA".to_string()],
        )
        .unwrap();

    let tags = service.list_tags().unwrap();
    assert_eq!(tags, vec!["alpha".to_string(), "zeta".to_string()]);
}

#[test]
fn blank_notes_are_rejected() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&mut conn).unwrap();
    let mut service = ContactService::new(repo);
    let created = service.create_contact("Frank").unwrap();

    let err = service.add_note(created.contact_id, "  \n ").unwrap_err();
    assert!(matches!(err, ContactServiceError::InvalidNote(_)));

    let id = service
        .add_note(created.contact_id, "met at the library")
        .unwrap();
    assert!(id > 0);
    let notes = service.list_notes(created.contact_id).unwrap();
    assert_eq!(notes.len(), 1);
}
