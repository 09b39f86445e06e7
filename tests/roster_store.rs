//! Integration tests for the roster template store: capacity, overwrite, persistence.

use cronos_sideline::{
    JsonFileBackend, MatchError, RosterEntry, RosterStore, RosterTemplate, SaveOutcome,
    TeamColors, TemplateBackend, TEMPLATE_CAPACITY,
};

fn template(name: &str, players: u32) -> RosterTemplate {
    RosterTemplate {
        name: name.to_string(),
        colors: TeamColors::home_default(),
        players: (1..=players)
            .map(|n| RosterEntry {
                number: n,
                name: format!("{} {}", name, n),
            })
            .collect(),
    }
}

/// Backend that refuses every write.
struct FailingBackend;

impl TemplateBackend for FailingBackend {
    fn load(&self) -> Result<Vec<RosterTemplate>, String> {
        Ok(vec![template("Existing", 3)])
    }

    fn persist(&self, _templates: &[RosterTemplate]) -> Result<(), String> {
        Err("disk full".to_string())
    }
}

#[test]
fn rejects_new_name_past_capacity() {
    let mut store = RosterStore::in_memory();
    for i in 0..TEMPLATE_CAPACITY {
        assert_eq!(store.save(template(&format!("Team {i}"), 7), false), Ok(SaveOutcome::Saved));
    }
    assert_eq!(store.len(), 20);

    let err = store.save(template("Team 20", 7), false).unwrap_err();
    assert_eq!(err, MatchError::CapacityExceeded { capacity: 20 });
    assert_eq!(store.len(), 20);
    assert!(store.load("Team 20").is_err());
}

#[test]
fn overwrite_at_capacity_keeps_count() {
    let mut store = RosterStore::in_memory();
    for i in 0..TEMPLATE_CAPACITY {
        store.save(template(&format!("Team {i}"), 7), false).unwrap();
    }
    assert_eq!(store.save(template("Team 3", 11), true), Ok(SaveOutcome::Overwritten));
    assert_eq!(store.len(), 20);
    assert_eq!(store.load("Team 3").unwrap().players.len(), 11);
}

#[test]
fn existing_name_asks_for_confirmation() {
    let mut store = RosterStore::in_memory();
    store.save(template("Lions", 7), false).unwrap();
    assert_eq!(store.save(template("Lions", 14), false), Ok(SaveOutcome::ConfirmOverwrite));
    assert_eq!(store.load("Lions").unwrap().players.len(), 7);
}

#[test]
fn names_are_trimmed_and_must_not_be_blank() {
    let mut store = RosterStore::in_memory();
    store.save(template("  Lions ", 7), false).unwrap();
    assert!(store.load("Lions").is_ok());
    assert_eq!(store.save(template("   ", 7), false), Err(MatchError::EmptyName));
    assert!(matches!(store.load("Tigers"), Err(MatchError::TemplateNotFound(_))));
}

#[test]
fn failed_write_leaves_memory_unchanged() {
    let mut store = RosterStore::open(Box::new(FailingBackend)).unwrap();
    assert_eq!(store.len(), 1);

    let err = store.save(template("Lions", 7), false).unwrap_err();
    assert!(matches!(err, MatchError::Storage(_)));
    assert_eq!(store.len(), 1);

    assert!(store.save(template("Existing", 9), true).is_err());
    assert_eq!(store.load("Existing").unwrap().players.len(), 3);
}

#[test]
fn json_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rosters.json");

    let mut store = RosterStore::open(Box::new(JsonFileBackend::new(&path))).unwrap();
    assert!(store.is_empty());
    store.save(template("Lions", 9), false).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"shortsColor\""));
    assert!(raw.contains("\"textColor\""));

    let reopened = RosterStore::open(Box::new(JsonFileBackend::new(&path))).unwrap();
    assert_eq!(reopened.list(), store.list());
}

#[test]
fn corrupt_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rosters.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        RosterStore::open(Box::new(JsonFileBackend::new(&path))),
        Err(MatchError::Storage(_))
    ));
}

#[test]
fn oversized_file_is_kept_whole() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rosters.json");
    let stored: Vec<RosterTemplate> = (0..TEMPLATE_CAPACITY + 2)
        .map(|i| template(&format!("Team {i}"), 7))
        .collect();
    std::fs::write(&path, serde_json::to_string(&stored).unwrap()).unwrap();

    let mut store = RosterStore::open(Box::new(JsonFileBackend::new(&path))).unwrap();
    assert_eq!(store.len(), 22);
    assert!(store.load("Team 21").is_ok());

    assert_eq!(
        store.save(template("Team 22", 7), false),
        Err(MatchError::CapacityExceeded { capacity: 20 })
    );
    assert_eq!(store.save(template("Team 0", 11), true), Ok(SaveOutcome::Overwritten));

    let reopened = RosterStore::open(Box::new(JsonFileBackend::new(&path))).unwrap();
    assert_eq!(reopened.len(), 22);
    assert_eq!(reopened.load("Team 0").unwrap().players.len(), 11);
    assert!(reopened.load("Team 21").is_ok());
}
