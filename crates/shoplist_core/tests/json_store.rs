use shoplist_core::{Item, ItemStore, JsonFileStore, StoreError, UpdateOutcome};
use std::fs;
use std::thread;

#[test]
fn open_bootstraps_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("list.json");

    let store = JsonFileStore::open(&path).unwrap();

    assert_eq!(store.path(), path.as_path());
    assert!(path.is_file());
    assert_eq!(store.load_all().unwrap(), Vec::<Item>::new());
}

#[test]
fn open_leaves_existing_document_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.json");
    fs::write(&path, r#"[{"name":"Cidre","checked":true}]"#).unwrap();

    let store = JsonFileStore::open(&path).unwrap();

    assert_eq!(store.load_all().unwrap(), vec![Item::with_state("Cidre", true)]);
}

#[test]
fn append_preserves_insertion_order_and_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path().join("list.json")).unwrap();

    store.append_one(&Item::with_state("Milk", false)).unwrap();
    store.append_one(&Item::with_state("Bread", true)).unwrap();
    store.append_one(&Item::with_state("Milk", false)).unwrap();

    assert_eq!(
        store.load_all().unwrap(),
        vec![
            Item::with_state("Milk", false),
            Item::with_state("Bread", true),
            Item::with_state("Milk", false),
        ]
    );
}

#[test]
fn document_stores_native_booleans() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.json");
    let store = JsonFileStore::open(&path).unwrap();
    store
        .replace_all(&[Item::with_state("Apple", true), Item::with_state("Pear", false)])
        .unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        raw,
        serde_json::json!([
            { "name": "Apple", "checked": true },
            { "name": "Pear", "checked": false }
        ])
    );
}

#[test]
fn update_checked_hits_first_match_and_reports_no_match() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path().join("list.json")).unwrap();
    store
        .replace_all(&[Item::with_state("Milk", false), Item::with_state("Milk", false)])
        .unwrap();

    assert_eq!(store.update_checked("Milk", true).unwrap(), UpdateOutcome::Applied);
    assert_eq!(store.update_checked("Honey", true).unwrap(), UpdateOutcome::NoMatch);

    assert_eq!(
        store.load_all().unwrap(),
        vec![Item::with_state("Milk", true), Item::with_state("Milk", false)]
    );
}

#[test]
fn clear_empties_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path().join("list.json")).unwrap();
    store.append_one(&Item::with_state("Milk", false)).unwrap();

    store.clear().unwrap();

    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn writes_leave_no_temp_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path().join("list.json")).unwrap();
    store.append_one(&Item::with_state("Milk", false)).unwrap();
    store.replace_all(&[Item::with_state("Eggs", true)]).unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["list.json".to_string()]);
}

#[test]
fn missing_or_corrupt_document_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.json");

    let missing = JsonFileStore::at(&path);
    assert!(matches!(missing.load_all(), Err(StoreError::Unavailable { .. })));

    fs::write(&path, "{ not json").unwrap();
    let corrupt = JsonFileStore::open(&path).unwrap();
    assert!(matches!(corrupt.load_all(), Err(StoreError::Unavailable { .. })));
}

#[test]
fn writes_needing_a_read_fail_when_document_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("list.json");
    fs::write(&path, "garbage").unwrap();
    let store = JsonFileStore::open(&path).unwrap();

    assert!(matches!(
        store.append_one(&Item::with_state("Milk", false)),
        Err(StoreError::WriteFailed { .. })
    ));
    assert!(matches!(
        store.update_checked("Milk", true),
        Err(StoreError::WriteFailed { .. })
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), "garbage");

    store.replace_all(&[Item::with_state("Milk", false)]).unwrap();
    assert_eq!(store.load_all().unwrap(), vec![Item::with_state("Milk", false)]);
}

#[test]
fn write_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::at(dir.path().join("absent").join("list.json"));

    assert!(matches!(
        store.replace_all(&[Item::with_state("Milk", false)]),
        Err(StoreError::WriteFailed { .. })
    ));
}

#[test]
fn overlapping_writers_in_one_process_never_publish_partial_documents() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path().join("list.json")).unwrap();
    let writers = 4;
    let rounds = 100;
    let batch_len = 50;

    thread::scope(|scope| {
        let handles: Vec<_> = (0..writers)
            .map(|writer| {
                let store = &store;
                scope.spawn(move || {
                    let batch: Vec<Item> = (0..batch_len)
                        .map(|index| Item::with_state(format!("Writer{writer} item{index}"), false))
                        .collect();
                    (0..rounds)
                        .filter(|_| store.replace_all(&batch).is_err())
                        .count()
                })
            })
            .collect();

        for _ in 0..500 {
            let items = store.load_all().expect("readers must never see a torn document");
            assert!(
                items.is_empty() || items.len() == batch_len,
                "unexpected document length {}",
                items.len()
            );
        }

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 0, "no writer may fail");
        }
    });

    assert_eq!(store.load_all().unwrap().len(), batch_len);
    let leftovers: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name != "list.json")
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}
