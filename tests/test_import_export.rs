mod helpers;

use anyhow::Result;
use helpers::backup_ids::{BOOK_LINK, COOKING, NONEXISTENT, RUST};
use helpers::{read_fixture, TestStore};
use linkcards::application::ImportSummary;
use linkcards::constants::EMPTY_STORE_JSON;
use linkcards::domain::{DomainError, Store};

#[test]
fn given_empty_store_when_importing_backup_then_everything_is_added() -> Result<()> {
    // Arrange
    let test_store = TestStore::new()?;
    let mut repository = test_store.open_repository()?;

    // Act
    let summary = repository.import_json(&read_fixture("backup_v3.json")?)?;

    // Assert
    assert_eq!(
        summary,
        ImportSummary {
            groups_created: 2,
            links_added: 3,
            tags_added: 2
        }
    );
    let rust = repository.group(RUST).expect("card imported under its id");
    assert_eq!(rust.title, "Rust");
    assert_eq!(rust.created_at, 1_700_000_000_000);
    assert_eq!(rust.links[0].id, BOOK_LINK);
    assert!(repository.group(COOKING).is_some());
    assert!(repository.group(NONEXISTENT).is_none());
    Ok(())
}

#[test]
fn given_same_backup_twice_when_importing_then_second_is_noop() -> Result<()> {
    // Arrange
    let test_store = TestStore::new()?;
    let mut repository = test_store.open_repository()?;
    let backup = read_fixture("backup_v3.json")?;
    repository.import_json(&backup)?;
    let before = repository.store().clone();

    // Act
    let summary = repository.import_json(&backup)?;

    // Assert
    assert_eq!(summary, ImportSummary::default());
    assert_eq!(repository.store(), &before);
    Ok(())
}

#[test]
fn given_existing_card_when_importing_then_local_fields_win() -> Result<()> {
    // Arrange
    let test_store = TestStore::new()?;
    let mut repository = test_store.open_repository()?;
    repository.import_json(&read_fixture("backup_v3.json")?)?;
    let backup = r#"{"groups":{"g-rust":{
        "title":"Renamed","desc":"other",
        "tags":["rust","new"],
        "links":[
            {"id":"l-book","url":"https://doc.rust-lang.org/book/","title":"dup url"},
            {"id":"l-book","url":"https://doc.rust-lang.org/nomicon/","title":"Nomicon","host":"bogus"}
        ]
    }}}"#;

    // Act
    let summary = repository.import_json(backup)?;

    // Assert
    assert_eq!(summary.groups_created, 0);
    assert_eq!(summary.links_added, 1);
    assert_eq!(summary.tags_added, 1);
    let rust = repository.group(RUST).unwrap();
    assert_eq!(rust.title, "Rust");
    assert_eq!(rust.desc, "Language links");
    assert_eq!(rust.links.len(), 3);
    let nomicon = rust.links.last().unwrap();
    assert_eq!(nomicon.title, "Nomicon");
    assert_eq!(nomicon.host, "doc.rust-lang.org");
    assert_ne!(nomicon.id, BOOK_LINK, "colliding link id is replaced");
    Ok(())
}

#[test]
fn given_invalid_documents_when_importing_then_format_error_and_state_kept() -> Result<()> {
    // Arrange
    let test_store = TestStore::new()?;
    let mut repository = test_store.open_repository()?;
    repository.create_group("Local", "")?;
    let before = repository.store().clone();

    // Act & Assert
    for raw in ["not json", "{}", r#"{"groups":[]}"#] {
        let result = repository.import_json(raw);
        assert!(
            matches!(result, Err(DomainError::FormatError(_))),
            "{raw} should be rejected"
        );
    }
    assert_eq!(repository.store(), &before);
    Ok(())
}

#[test]
fn given_nothing_persisted_when_exporting_then_empty_document() -> Result<()> {
    let test_store = TestStore::new()?;
    let repository = test_store.open_repository()?;

    assert_eq!(repository.export_json()?, EMPTY_STORE_JSON);
    Ok(())
}

#[test]
fn given_export_when_importing_into_fresh_store_then_round_trips() -> Result<()> {
    // Arrange
    let source = TestStore::new()?;
    let mut repository = source.open_repository()?;
    let group = repository.create_group("Reading", "long reads")?;
    repository.add_link(&group.id, "https://example.com/a", "A", "rust")?;
    let exported = repository.export_json()?;

    let target = TestStore::new()?;
    let mut restored = target.open_repository()?;

    // Act
    restored.import_json(&exported)?;

    // Assert
    let expected = Store::parse(&exported)?.expect("export has groups");
    assert_eq!(restored.store(), &expected);
    assert_eq!(restored.store(), repository.store());
    Ok(())
}

#[test]
fn given_backup_with_null_fields_when_importing_then_defaults_apply() -> Result<()> {
    // Arrange
    let test_store = TestStore::new()?;
    let mut repository = test_store.open_repository()?;
    let backup = r#"{"groups":{
        "g1":{"id":"g1","title":"X","links":null,"tags":null},
        "g2":{"id":"g2","title":"Y","links":[{"url":"https://a.com","note":null,"title":null}]}
    }}"#;

    // Act
    let summary = repository.import_json(backup)?;

    // Assert
    assert_eq!(summary.groups_created, 2);
    assert_eq!(summary.links_added, 1);
    assert!(repository.group("g1").unwrap().links.is_empty());
    let link = &repository.group("g2").unwrap().links[0];
    assert_eq!(link.note, "");
    assert_eq!(link.host, "a.com");
    Ok(())
}

#[test]
fn given_card_under_empty_key_when_importing_then_gets_fresh_id() -> Result<()> {
    // Arrange
    let test_store = TestStore::new()?;
    let mut repository = test_store.open_repository()?;

    // Act
    repository.import_json(r#"{"groups":{"":{"title":"X","links":[{"url":"https://a.com"}]}}}"#)?;

    // Assert
    let groups = repository.groups();
    assert_eq!(groups.len(), 1);
    assert!(!groups[0].id.is_empty());
    assert!(repository.group("").is_none());
    assert_eq!(groups[0].links.len(), 1);
    Ok(())
}
