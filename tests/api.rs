use candidate_store::{Error, Field, Record, RecordStore, PENDING_PREDICTION};
use serde_json::json;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("candidate_store_test_{}.json", name))
}

fn record(value: serde_json::Value) -> Record {
    serde_json::from_value(value).unwrap()
}

// ---- create -----------------------------------------------------------------

#[test]
fn create_assigns_unique_ids() {
    let path = temp_path("create_unique");
    let _ = std::fs::remove_file(&path);
    let store = RecordStore::open(&path).unwrap();

    for _ in 0..20 {
        store.create(Record::default()).unwrap();
        let mut ids: Vec<i64> = store.list().unwrap().iter().filter_map(Record::id).collect();
        let n = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), n);
    }
    let _ = std::fs::remove_file(&path);
}

#[test]
fn create_defaults_missing_fields() {
    let path = temp_path("create_defaults");
    let _ = std::fs::remove_file(&path);
    let store = RecordStore::open(&path).unwrap();

    let created = store
        .create(record(json!({ "Nombre": "Ana", "Prediccion_IA": "Senior" })))
        .unwrap();
    assert_eq!(created.id(), Some(1));
    assert_eq!(created.nivel, Some(Field::from("")));
    assert_eq!(created.experiencia, Some(Field::Integer(0)));
    assert_eq!(created.prediccion_ia, Some(Field::from(PENDING_PREDICTION)));

    let listed = store.list().unwrap();
    assert_eq!(listed, vec![created]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn create_ignores_caller_id() {
    let path = temp_path("create_caller_id");
    let _ = std::fs::remove_file(&path);
    let store = RecordStore::open(&path).unwrap();
    store.create(Record::default()).unwrap();

    let created = store.create(record(json!({ "ID": 1 }))).unwrap();
    assert_eq!(created.id(), Some(2));
    let _ = std::fs::remove_file(&path);
}

// ---- update -----------------------------------------------------------------

#[test]
fn update_changes_only_patched_fields() {
    let path = temp_path("update_partial");
    let _ = std::fs::remove_file(&path);
    std::fs::write(
        &path,
        json!([
            { "ID": 1, "Nombre": "Ana", "Edad": 30, "Nota": "vip" },
            { "ID": 2, "Nombre": "Luis", "Edad": 41 }
        ])
        .to_string(),
    )
    .unwrap();
    let store = RecordStore::open(&path).unwrap();
    let before = store.list().unwrap();

    store
        .update_by_id(1, record(json!({ "Edad": 31, "Jornada": "Completa" })))
        .unwrap();

    let after = store.list().unwrap();
    assert_eq!(after[1], before[1]);
    assert_eq!(
        serde_json::to_value(&after[0]).unwrap(),
        json!({ "ID": 1, "Nombre": "Ana", "Edad": 31, "Jornada": "Completa", "Nota": "vip" })
    );
    let _ = std::fs::remove_file(&path);
}

#[test]
fn update_leaves_other_records_unchanged() {
    let path = temp_path("update_untouched");
    let _ = std::fs::remove_file(&path);
    let other = json!({
        "ID": 2,
        "Nombre": "Luis",
        "Apellidos": null,
        "Edad": u64::MAX,
        "Experiencia (años)": 3.25,
        "Contacto": { "tel": null }
    });
    std::fs::write(
        &path,
        json!([{ "ID": 1, "Nombre": "Ana" }, other.clone()]).to_string(),
    )
    .unwrap();
    let store = RecordStore::open(&path).unwrap();

    store
        .update_by_id(1, record(json!({ "Nombre": "Ana M." })))
        .unwrap();

    let on_disk: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(on_disk[0], json!({ "ID": 1, "Nombre": "Ana M." }));
    assert_eq!(on_disk[1].to_string(), other.to_string());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn update_missing_id_is_not_found() {
    let path = temp_path("update_missing");
    let _ = std::fs::remove_file(&path);
    let store = RecordStore::open(&path).unwrap();
    store.create(Record::default()).unwrap();
    let raw_before = std::fs::read(&path).unwrap();

    assert_eq!(
        store.update_by_id(5, record(json!({ "Nombre": "x" }))),
        Err(Error::NotFound(5))
    );
    assert_eq!(std::fs::read(&path).unwrap(), raw_before);
    let _ = std::fs::remove_file(&path);
}

// ---- delete -----------------------------------------------------------------

#[test]
fn delete_keeps_others_in_order() {
    let path = temp_path("delete_order");
    let _ = std::fs::remove_file(&path);
    let store = RecordStore::open(&path).unwrap();
    for name in ["a", "b", "c", "d"] {
        store.create(record(json!({ "Nombre": name }))).unwrap();
    }

    assert_eq!(store.delete_by_id(2).unwrap(), 1);
    let names: Vec<_> = store
        .list()
        .unwrap()
        .into_iter()
        .filter_map(|r| r.nombre)
        .collect();
    assert_eq!(names, vec![Field::from("a"), Field::from("c"), Field::from("d")]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn delete_missing_id_leaves_file_untouched() {
    let path = temp_path("delete_missing");
    let _ = std::fs::remove_file(&path);
    let store = RecordStore::open(&path).unwrap();
    store.create(Record::default()).unwrap();
    let raw_before = std::fs::read(&path).unwrap();

    let err = store.delete_by_id(42).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(std::fs::read(&path).unwrap(), raw_before);
    let _ = std::fs::remove_file(&path);
}

// ---- classification ---------------------------------------------------------

#[test]
fn recompute_is_idempotent() {
    let path = temp_path("recompute_idem");
    let _ = std::fs::remove_file(&path);
    let store = RecordStore::open(&path).unwrap();
    for years in [json!(0), json!(3), json!(7.5), json!(12), json!("n/a")] {
        store
            .create(record(json!({ "Experiencia (años)": years })))
            .unwrap();
    }

    let once = store.recompute_classification().unwrap();
    let twice = store.recompute_classification().unwrap();
    assert_eq!(once, twice);

    let labels: Vec<_> = twice.iter().filter_map(|r| r.prediccion_ia.clone()).collect();
    assert_eq!(
        labels,
        ["Trainee", "Junior", "Mid-Level", "Senior", "Trainee"].map(Field::from)
    );
    let _ = std::fs::remove_file(&path);
}

#[test]
fn recompute_persists_labels() {
    let path = temp_path("recompute_persist");
    let _ = std::fs::remove_file(&path);
    {
        let store = RecordStore::open(&path).unwrap();
        store
            .create(record(json!({ "Experiencia (años)": 11 })))
            .unwrap();
        store.recompute_classification().unwrap();
    }
    let store = RecordStore::open(&path).unwrap();
    assert_eq!(
        store.list().unwrap()[0].prediccion_ia,
        Some(Field::from("Senior"))
    );
    let _ = std::fs::remove_file(&path);
}

// ---- builder ----------------------------------------------------------------

#[test]
fn builder_compact_json() {
    let path = temp_path("builder_compact");
    let _ = std::fs::remove_file(&path);

    let store = RecordStore::builder(&path).pretty(false).build().unwrap();
    store.create(Record::default()).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains('\n'));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn builder_pretty_json() {
    let path = temp_path("builder_pretty");
    let _ = std::fs::remove_file(&path);

    let store = RecordStore::builder(&path).build().unwrap();
    store.create(record(json!({ "Zona Geográfica": "Península" }))).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\n  {\n    \"ID\": 1,"));
    assert!(raw.contains("\"Zona Geográfica\": \"Península\""));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn debug_impls_dont_panic() {
    let path = temp_path("debug");
    let store = RecordStore::open(&path).unwrap();
    let dbg = format!("{:?}", store);
    assert!(dbg.contains("RecordStore"));
    assert!(dbg.contains("path"));
    assert!(format!("{:?}", RecordStore::builder(&path)).contains("RecordStoreBuilder"));
}
