use cashflow_core::{
    core::DatasetManager,
    dataset::Dataset,
    domain::{Category, Concept, CostType, MovementKind, Payment, Period, Settlement, Transaction},
    engine,
    storage::{JsonStorage, StorageBackend},
};
use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use uuid::Uuid;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Dataset with one recalculated, fully-paid expense.
fn recalculated_dataset() -> Dataset {
    let mut dataset = Dataset::new("Persisted");
    let cost_type = dataset.add_cost_type(CostType::new("Fixed", MovementKind::Expense));
    let category = dataset.add_category(Category::new("Housing", MovementKind::Expense, cost_type));
    let concept = dataset.add_concept(Concept::new(
        "Rent",
        MovementKind::Expense,
        cost_type,
        category,
    ));
    let txn = Transaction::expense(
        date(2024, 3, 1),
        cost_type,
        concept,
        900.0,
        Period::new(2024, 3),
        20,
        10,
    );
    dataset.add_transaction(txn);
    dataset.add_payment(Payment::new(concept, 900.0, date(2024, 3, 2)));
    engine::recalculate(&mut dataset, date(2024, 3, 1));
    dataset
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn roundtrip_preserves_derived_fields() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(2)).unwrap();

    let dataset = recalculated_dataset();
    storage.save(&dataset, "persisted").expect("save dataset");
    let loaded = storage.load("persisted").expect("load dataset");

    let original = serde_json::to_string(&dataset.transactions).unwrap();
    let restored = serde_json::to_string(&loaded.transactions).unwrap();
    assert_eq!(original, restored);
    assert_eq!(loaded.transactions[0].status, Settlement::Paid);
    assert_eq!(
        loaded.transactions[0].due_date,
        Some(date(2024, 4, 10))
    );
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(2)).unwrap();

    let mut dataset = recalculated_dataset();
    storage.save(&dataset, "reliable").expect("initial save");
    let path = storage.dataset_path("reliable");
    let original = fs::read_to_string(&path).expect("read original file");

    // Create a directory that collides with the temp file name to force
    // File::create to fail.
    let tmp_path = tmp_path_for(&path);
    fs::create_dir_all(&tmp_path).unwrap();

    // Mutate so the new JSON would differ if the save went through.
    dataset.name = "Changed".into();
    let result = storage.save_to_path(&dataset, &path);
    assert!(
        result.is_err(),
        "expected save_to_path to fail when temp path is a directory"
    );

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(original, current, "failed save must not clobber the file");
}

#[test]
fn backup_and_restore_recovers_previous_state() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(3)).unwrap();

    let dataset = recalculated_dataset();
    storage.save(&dataset, "family").expect("save dataset");
    storage
        .backup(&dataset, "family", Some("before cleanup"))
        .expect("create backup");

    let mut emptied = dataset.clone();
    emptied.transactions.clear();
    emptied.payments.clear();
    storage.save(&emptied, "family").expect("save emptied");
    assert!(storage.load("family").unwrap().transactions.is_empty());

    let backups = storage.list_backups("family").expect("list backups");
    let note_backup = backups
        .iter()
        .find(|name| name.contains("before-cleanup"))
        .expect("noted backup present");
    let restored = storage
        .restore("family", note_backup)
        .expect("restore backup");
    assert_eq!(restored.transactions.len(), 1);
}

#[test]
fn manager_open_recalculates_stale_derived_fields() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(2)).unwrap();

    // Persist a dataset whose derived fields were tampered with after the
    // last pass; opening must not trust them.
    let mut dataset = recalculated_dataset();
    dataset.transactions[0].installments = Some(99);
    dataset.transactions[0].status = Settlement::Pending;
    storage.save(&dataset, "stale").expect("save dataset");

    let mut manager = DatasetManager::new(Box::new(storage));
    let metadata = manager
        .open("stale", date(2024, 3, 1))
        .expect("open dataset");
    assert!(metadata.warnings.is_empty(), "{:?}", metadata.warnings);

    let current = manager.current.as_ref().expect("current dataset");
    assert_eq!(current.transactions[0].installments, Some(2));
    assert_eq!(current.transactions[0].status, Settlement::Paid);
}

#[test]
fn manager_open_surfaces_dangling_reference_warnings() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(2)).unwrap();

    let mut dataset = recalculated_dataset();
    dataset.add_payment(Payment::new(Uuid::new_v4(), 5.0, date(2024, 3, 3)));
    storage.save(&dataset, "dangling").expect("save dataset");

    let mut manager = DatasetManager::new(Box::new(storage));
    let metadata = manager
        .open("dangling", date(2024, 3, 1))
        .expect("open dataset");
    assert_eq!(metadata.warnings.len(), 1);
    assert!(metadata.warnings[0].contains("unknown concept"));
}
