use std::sync::Arc;

use modelkit::model::SlimElement;
use modelkit::source::ElementHandle;
use modelkit::{
    CacheService, ExcelWriter, ExportSetup, GenericExportConfiguration, GenericExporterService,
    ModelKitError, WriterError,
};
use tempfile::TempDir;

use crate::helpers::fixtures::*;
use crate::helpers::workbook::read_workbook;

fn slim(cache: &CacheService, handle: &ElementHandle) -> SlimElement {
    SlimElement::new(
        handle,
        cache.tagged_values(handle.id).unwrap(),
        cache.associated_connectors(handle.id).unwrap(),
    )
    .unwrap()
}

fn exporter() -> GenericExporterService {
    GenericExporterService::new(Arc::new(ExcelWriter::default()), "\n")
}

fn bound_cache() -> CacheService {
    let cache = CacheService::new();
    cache.initialize(vehicle_repository());
    cache
}

#[test]
fn test_blocks_exported_with_tagged_values_and_connectors() {
    let cache = bound_cache();
    let blocks = vec![
        slim(&cache, &block(VEHICLE, "Vehicle").with_notes("<b>Top</b> level system")),
        slim(&cache, &block(ENGINE, "Engine")),
        slim(&cache, &block(WHEEL, "Wheel")),
    ];
    let setup = ExportSetup::new(blocks).unwrap();
    assert_eq!(setup.available_tagged_values(), ["Color", "Mass"]);
    assert_eq!(
        setup.available_connectors(),
        [
            "Association With Source block",
            "Association With Target block",
            "Realisation satisfy With Target Requirement",
        ]
    );

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blocks.xlsx");
    exporter()
        .export_elements(&path, &[setup.to_configuration()])
        .unwrap();

    let workbook = read_workbook(&path);
    let sheet = workbook.sheet("block");
    assert_eq!(
        sheet.headers(),
        vec![
            "Name",
            "Alias",
            "Notes",
            "Color",
            "Mass",
            "Association With Source block",
            "Association With Target block",
            "Realisation satisfy With Target Requirement",
        ]
    );
    assert_eq!(sheet.value(0, "Name"), "Vehicle");
    assert_eq!(sheet.value(0, "Mass"), "1500");
    assert_eq!(sheet.value(0, "Association With Target block"), "Engine\nWheel");
    assert_eq!(sheet.value(0, "Realisation satisfy With Target Requirement"), "Max Speed");
    assert_eq!(sheet.value(1, "Association With Source block"), "Vehicle");
    assert_eq!(sheet.value(2, "Mass"), "");
}

#[test]
fn test_notes_entities_are_decoded() {
    let cache = bound_cache();
    let range = requirement(RANGE, "Range").with_notes("Range &gt; 500 km &amp; refuel &lt; 5 min");
    let configuration = GenericExportConfiguration::new(vec![slim(&cache, &range)], Vec::new());

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.xlsx");
    exporter().export_elements(&path, &[configuration]).unwrap();

    let workbook = read_workbook(&path);
    assert_eq!(
        workbook.sheet("Requirement").value(0, "Notes"),
        "Range > 500 km & refuel < 5 min"
    );
}

#[test]
fn test_deselected_columns_are_left_out() {
    let cache = bound_cache();
    let mut setup = ExportSetup::new(vec![slim(&cache, &block(VEHICLE, "Vehicle"))]).unwrap();
    setup.select_tagged_values(["Mass"]).unwrap();
    setup.select_connectors(Vec::<String>::new()).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("subset.xlsx");
    exporter()
        .export_elements(&path, &[setup.to_configuration()])
        .unwrap();

    let workbook = read_workbook(&path);
    assert_eq!(workbook.sheet("block").headers(), vec!["Name", "Alias", "Notes", "Mass"]);
}

#[test]
fn test_kinds_become_separate_sheets() {
    let cache = bound_cache();
    let configurations = [
        GenericExportConfiguration::new(
            vec![slim(&cache, &requirement(MAX_SPEED, "Max Speed").with_alias("REQ-1"))],
            vec!["Priority".to_string()],
        ),
        GenericExportConfiguration::new(vec![slim(&cache, &block(ENGINE, "Engine"))], Vec::new()),
    ];

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kinds.xlsx");
    exporter().export_elements(&path, &configurations).unwrap();

    let workbook = read_workbook(&path);
    assert_eq!(workbook.sheet_names(), vec!["Requirement", "block"]);
    let requirements = workbook.sheet("Requirement");
    assert_eq!(requirements.values(), vec![vec!["Max Speed", "REQ-1", "", "High"]]);
}

#[test]
fn test_write_failure_is_returned() {
    let cache = bound_cache();
    let configuration =
        GenericExportConfiguration::new(vec![slim(&cache, &block(ENGINE, "Engine"))], Vec::new());

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no-such-dir").join("out.xlsx");
    let result = exporter().export_elements(&path, &[configuration]);

    assert!(matches!(result, Err(ModelKitError::Writer(WriterError::Io(_)))));
}
