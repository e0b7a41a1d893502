use std::fs;

use phonebook::error::PhonebookError;
use phonebook::model::*;
use phonebook::store::*;
use tempfile::TempDir;

fn contact(first: &str, last: &str, mobile: &str) -> Contact {
    Contact::new(ContactDraft {
        first_name: first.into(),
        last_name: last.into(),
        mobile_phone: mobile.into(),
        ..Default::default()
    })
    .unwrap()
}

fn edited(original: &Contact, first: &str) -> Contact {
    let mut d = original.draft();
    d.first_name = first.into();
    Contact::with_id(d, original.id()).unwrap()
}

fn file_store() -> (TempDir, FileStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("phones.csv")).unwrap();
    (dir, store)
}

fn ids(contacts: &[Contact]) -> Vec<ContactId> {
    contacts.iter().map(|c| c.id()).collect()
}

// ==========================================================================
// CONTRACT TESTS (shared by every backend)
// ==========================================================================

fn check_add_then_get<S: ContactStore>(mut store: S) {
    let anna = contact("Anna", "Lee", "+100");
    let boris = contact("Boris", "Kim", "+200");
    store.add(&anna).unwrap();
    store.add(&boris).unwrap();

    let all = store.get(None).unwrap();
    assert_eq!(ids(&all), vec![anna.id(), boris.id()]);
    assert_eq!(all[0].draft(), anna.draft());
    assert_eq!(ids(&store.get(Some("")).unwrap()), ids(&all));
}

fn check_duplicate_add<S: ContactStore>(mut store: S) {
    let anna = contact("Anna", "", "+100");
    store.add(&anna).unwrap();
    let renamed = edited(&anna, "Other");
    assert!(matches!(
        store.add(&renamed),
        Err(PhonebookError::Duplicate { .. })
    ));
    assert_eq!(store.get(None).unwrap().len(), 1);
}

fn check_search<S: ContactStore>(mut store: S) {
    let anna = contact("Anna", "Lee", "+100");
    let boris = contact("Boris", "Annenkov", "+200");
    let carl = contact("Carl", "Moss", "+300");
    for c in [&anna, &boris, &carl] {
        store.add(c).unwrap();
    }

    assert_eq!(ids(&store.get(Some("ANN")).unwrap()), vec![anna.id(), boris.id()]);
    assert_eq!(ids(&store.get(Some("+300")).unwrap()), vec![carl.id()]);
    assert!(store.get(Some("nobody")).unwrap().is_empty());

    let id_text = carl.id().to_string().to_uppercase();
    let found = store.get(Some(id_text.as_str())).unwrap();
    assert_eq!(ids(&found), vec![carl.id()]);
}

fn check_update<S: ContactStore>(mut store: S) {
    let anna = contact("Anna", "Lee", "+100");
    let boris = contact("Boris", "Kim", "+200");
    store.add(&anna).unwrap();
    store.add(&boris).unwrap();

    store.update(&edited(&anna, "Annie")).unwrap();

    let all = store.get(None).unwrap();
    assert_eq!(all.len(), 2);
    // update re-appends the record
    assert_eq!(ids(&all), vec![boris.id(), anna.id()]);
    assert_eq!(all[1].first_name(), "Annie");
    assert_eq!(all[1].last_name(), "Lee");
}

fn check_remove<S: ContactStore>(mut store: S) {
    let anna = contact("Anna", "", "+100");
    let boris = contact("Boris", "", "+200");
    store.add(&anna).unwrap();
    store.add(&boris).unwrap();

    // a stale copy with other field values still identifies the record
    store.remove(&edited(&anna, "Stale")).unwrap();

    let all = store.get(None).unwrap();
    assert_eq!(ids(&all), vec![boris.id()]);
    assert!(!all.contains(&anna));
}

fn check_missing_targets<S: ContactStore>(mut store: S) {
    let anna = contact("Anna", "", "+100");
    let ghost = contact("Ghost", "", "+999");
    store.add(&anna).unwrap();

    assert!(matches!(store.update(&ghost), Err(PhonebookError::NotFound { .. })));
    assert!(matches!(store.remove(&ghost), Err(PhonebookError::NotFound { .. })));
    assert_eq!(ids(&store.get(None).unwrap()), vec![anna.id()]);
}

fn check_worked_example<S: ContactStore>(mut store: S) {
    let a = contact("A", "", "+7");
    store.add(&a).unwrap();
    let all = store.get(None).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].first_name(), "A");
    assert_eq!(all[0].mobile_phone(), "+7");

    store.update(&edited(&a, "B")).unwrap();
    let by_id = store.get(Some(a.id().to_string().as_str())).unwrap();
    assert_eq!(by_id.len(), 1);
    assert_eq!(by_id[0].first_name(), "B");
    assert_eq!(by_id[0].id(), a.id());
    assert_eq!(store.get(None).unwrap().len(), 1);

    store.remove(&a).unwrap();
    assert!(store.get(None).unwrap().is_empty());
}

macro_rules! contract_tests {
    ($($name:ident => $check:ident),* $(,)?) => {
        mod memory_backend {
            use super::*;
            $(#[test] fn $name() { $check(MemoryStore::new()); })*
        }
        mod file_backend {
            use super::*;
            $(#[test] fn $name() { let (_dir, store) = file_store(); $check(store); })*
        }
    };
}

contract_tests! {
    add_then_get_in_insertion_order => check_add_then_get,
    duplicate_add_is_rejected => check_duplicate_add,
    search_is_case_insensitive_over_all_fields => check_search,
    update_replaces_fields_keeps_count => check_update,
    remove_drops_by_identity => check_remove,
    missing_targets_are_not_found => check_missing_targets,
    worked_example => check_worked_example,
}

// ==========================================================================
// FILE BACKEND TESTS
// ==========================================================================

#[test]
fn open_creates_missing_directory_and_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database").join("phones.csv");
    let store = FileStore::open(&path).unwrap();

    assert!(path.exists());
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
    assert!(store.get(None).unwrap().is_empty());
}

#[test]
fn open_keeps_existing_content() {
    let (_dir, mut store) = file_store();
    store.add(&contact("Anna", "", "+100")).unwrap();

    let reopened = FileStore::open(store.path()).unwrap();
    assert_eq!(reopened.get(None).unwrap().len(), 1);
}

#[test]
fn rows_are_plain_comma_separated_in_field_order() {
    let (_dir, mut store) = file_store();
    let c = Contact::new(ContactDraft {
        first_name: "Anna".into(),
        last_name: "Lee".into(),
        parent_name: "".into(),
        organization: "Acme".into(),
        work_phone: "123".into(),
        mobile_phone: "+7999".into(),
    })
    .unwrap();
    store.add(&c).unwrap();

    let text = fs::read_to_string(store.path()).unwrap();
    assert_eq!(text, format!("Anna,Lee,,Acme,123,+7999,{}\n", c.id()));
}

#[test]
fn reads_rows_written_by_hand() {
    let (_dir, store) = file_store();
    let id = ContactId::generate();
    fs::write(
        store.path(),
        format!("Ivan,Petrov,Ivanovich,Roga,12345,+79990001122,{}\n\n", id),
    )
    .unwrap();

    let all = store.get(None).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id(), id);
    assert_eq!(all[0].parent_name(), "Ivanovich");
    assert_eq!(all[0].mobile_phone(), "+79990001122");
}

#[test]
fn values_with_delimiter_survive_a_rewrite() {
    let (_dir, mut store) = file_store();
    let acme = Contact::new(ContactDraft {
        first_name: "Anna".into(),
        organization: "Acme, \"Ltd\"".into(),
        work_phone: "1".into(),
        ..Default::default()
    })
    .unwrap();
    let other = contact("Boris", "", "+2");
    store.add(&acme).unwrap();
    store.add(&other).unwrap();
    store.remove(&other).unwrap();

    let all = store.get(None).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].organization(), "Acme, \"Ltd\"");
    assert_eq!(fs::read_to_string(store.path()).unwrap().lines().count(), 1);
}

#[test]
fn malformed_row_fails_the_whole_read() {
    let (_dir, mut store) = file_store();
    store.add(&contact("Anna", "", "+100")).unwrap();
    fs::write(
        store.path(),
        format!(
            "{}only,two\n",
            fs::read_to_string(store.path()).unwrap()
        ),
    )
    .unwrap();

    let err = store.get(None).unwrap_err();
    let fields: Vec<&str> = err.violations().iter().map(|v| v.field).collect();
    assert_eq!(fields, vec!["line", "record"]);
    assert!(err.to_string().contains("line 2 is malformed"));
}

#[test]
fn malformed_row_blocks_unrelated_search_and_add() {
    let (_dir, mut store) = file_store();
    fs::write(store.path(), "junk,row\n").unwrap();

    assert!(matches!(
        store.get(Some("nothing-matches-this")),
        Err(PhonebookError::Validation(_))
    ));
    let err = store.add(&contact("Anna", "", "+100")).unwrap_err();
    assert!(err.to_string().contains("line 1 is malformed"));
    assert_eq!(fs::read_to_string(store.path()).unwrap(), "junk,row\n");
}

#[test]
fn whitespace_first_name_in_legacy_file_reads_back() {
    let (_dir, store) = file_store();
    let id = ContactId::generate();
    fs::write(store.path(), format!(" ,,,,,+7,{}\r\n", id)).unwrap();

    let all = store.get(None).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].first_name(), " ");
    assert_eq!(all[0].mobile_phone(), "+7");
    assert_eq!(all[0].id(), id);
}

#[test]
fn invalid_stored_values_are_validation_errors() {
    let (_dir, store) = file_store();
    fs::write(store.path(), "Anna,,,,,,not-a-uuid\n").unwrap();

    let err = store.get(None).unwrap_err();
    let fields: Vec<&str> = err.violations().iter().map(|v| v.field).collect();
    assert_eq!(fields, vec!["line", "phone", "identifier"]);
}

#[test]
fn not_found_leaves_file_untouched() {
    let (_dir, mut store) = file_store();
    store.add(&contact("Anna", "", "+100")).unwrap();
    store.add(&contact("Boris", "", "+200")).unwrap();
    let before = fs::read(store.path()).unwrap();

    let ghost = contact("Ghost", "", "+999");
    assert!(store.update(&ghost).is_err());
    assert!(store.remove(&ghost).is_err());

    assert_eq!(fs::read(store.path()).unwrap(), before);
}

#[test]
fn rewrite_leaves_no_temporary_file() {
    let (dir, mut store) = file_store();
    let anna = contact("Anna", "", "+100");
    store.add(&anna).unwrap();
    store.update(&edited(&anna, "Annie")).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["phones.csv".to_string()]);
}

#[test]
fn remove_reduces_line_count_by_one() {
    let (_dir, mut store) = file_store();
    let contacts: Vec<Contact> = (0..4)
        .map(|i| contact(&format!("C{}", i), "", &format!("+{}", i)))
        .collect();
    for c in &contacts {
        store.add(c).unwrap();
    }

    store.remove(&contacts[2]).unwrap();

    let text = fs::read_to_string(store.path()).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(!text.contains(&contacts[2].id().to_string()));
}

#[test]
fn stores_work_behind_a_trait_object() {
    let (_dir, file) = file_store();
    let backends: Vec<Box<dyn ContactStore>> = vec![Box::new(file), Box::new(MemoryStore::new())];
    for mut store in backends {
        let anna = contact("Anna", "", "+100");
        store.add(&anna).unwrap();
        assert_eq!(store.get(Some("anna")).unwrap(), vec![anna]);
    }
}
