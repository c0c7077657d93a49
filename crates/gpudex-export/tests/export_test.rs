//! Exporting lists built through the registry.

use gpudex_catalog::{CatalogStore, GpuRecord, SearchEngine};
use gpudex_export::{ExportEngine, ExportError, ExportFormat};
use gpudex_lists::{JsonDirStorage, ListDocument, ListRegistry};
use tempfile::TempDir;

fn engine() -> SearchEngine {
    let mut rtx = GpuRecord::named("GeForce RTX 4070");
    rtx.shading_units = Some(5888);
    rtx.memory_size = Some(12.0);
    rtx.memory_type = Some("GDDR6X".to_string());
    rtx.memory_bus = Some(192);
    rtx.bandwidth = Some(504.2);
    rtx.fp32 = Some(29_150.0);
    rtx.base_clock = Some(1920);
    rtx.boost_clock = Some(2475);
    rtx.tdp = Some("200".to_string());

    SearchEngine::with_limits(
        CatalogStore::new(vec![rtx, GpuRecord::named("Radeon RX 6700 XT")]),
        30,
        8,
    )
}

fn registry(dir: &TempDir) -> ListRegistry {
    let storage = JsonDirStorage::open(dir.path().join("lists")).expect("open lists directory");
    let mut registry = ListRegistry::new(Box::new(storage));
    registry.create("Upgrade Path").expect("create list");
    registry
        .add_to_active("GeForce RTX 4070", &engine())
        .expect("add GPU");
    registry
        .add_to_active("Radeon RX 6700 XT", &engine())
        .expect("add GPU");
    registry
}

#[test]
fn test_json_export_round_trips() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let registry = registry(&temp_dir);
    let list = registry.active_entries().expect("active list");

    let exporter = ExportEngine::new(temp_dir.path());
    let path = exporter
        .export(list, ExportFormat::Json, None)
        .expect("export JSON");
    assert_eq!(path, temp_dir.path().join("Upgrade_Path.json"));

    let contents = std::fs::read_to_string(&path).expect("read export");
    let document: ListDocument = serde_json::from_str(&contents).expect("parse export");
    assert_eq!(document.list_name.as_str(), "Upgrade Path");
    assert_eq!(document.gpus, list.entries());
}

#[test]
fn test_csv_export_rows() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let registry = registry(&temp_dir);
    let list = registry.active_entries().expect("active list");

    let path = ExportEngine::new(temp_dir.path())
        .export(list, ExportFormat::Csv, Some("table"))
        .expect("export CSV");

    let contents = std::fs::read_to_string(path).expect("read export");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("GPU Name,Shading Units,TDP(W),VRAM(GB)"));
    assert_eq!(
        lines[1],
        "GeForce RTX 4070,5888,200,12,GDDR6X,192,504.2,29150,1920,2475"
    );
    assert_eq!(lines[2], "Radeon RX 6700 XT,0,N/A,0,N/A,0,0,0,0,0");
}

#[test]
fn test_xlsx_export_writes_workbook() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let registry = registry(&temp_dir);
    let list = registry.active_entries().expect("active list");

    let path = ExportEngine::new(temp_dir.path())
        .export(list, ExportFormat::Xlsx, Some("sheet"))
        .expect("export XLSX");
    assert_eq!(path, temp_dir.path().join("sheet.xlsx"));

    let bytes = std::fs::read(path).expect("read export");
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_empty_list_is_rejected() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let storage = JsonDirStorage::open(temp_dir.path()).expect("open lists directory");
    let mut registry = ListRegistry::new(Box::new(storage));
    registry.create("Nothing Yet").expect("create list");
    let list = registry.active().expect("active list");

    let result = ExportEngine::new(temp_dir.path()).export(list, ExportFormat::Json, None);
    assert!(matches!(result, Err(ExportError::EmptyList { .. })));
    assert!(!temp_dir.path().join("Nothing_Yet.json").exists());
}
