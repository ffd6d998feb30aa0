//! A small vehicle model.
//!
//! ```text
//! 1 Vehicle Model
//! ├── 10 Max Speed (Requirement)      Priority=High
//! ├── 30 Structure (Package object)
//! ├── 2 Structure
//! │   ├── 20 Vehicle (block)          Mass=1500, Color=Red
//! │   └── 3 Parts
//! │       ├── 26 Engine (block)       Mass=300
//! │       └── 27 Wheel (block)
//! └── 5 Requirements
//!     └── 40 Range (Requirement)      notes with entities
//! 4 Empty
//!
//! 100 Association  Vehicle -> Engine
//! 101 Association  Vehicle -> Wheel
//! 102 Realisation «satisfy»  Vehicle -> Max Speed
//! ```

use std::sync::Arc;

use modelkit::source::{ConnectorHandle, ElementHandle};
use modelkit::{ConnectorId, ElementId};

use super::repository::{FixtureModel, ScriptedRepository};

pub const MAX_SPEED: i32 = 10;
pub const VEHICLE: i32 = 20;
pub const ENGINE: i32 = 26;
pub const WHEEL: i32 = 27;
pub const STRUCTURE_OBJECT: i32 = 30;
pub const RANGE: i32 = 40;

pub const ROOT_PACKAGE: i32 = 1;
pub const STRUCTURE_PACKAGE: i32 = 2;
pub const PARTS_PACKAGE: i32 = 3;
pub const EMPTY_PACKAGE: i32 = 4;
pub const REQUIREMENTS_PACKAGE: i32 = 5;

pub fn block(id: i32, name: &str) -> ElementHandle {
    ElementHandle::new(ElementId(id), "Class", name).with_stereotype("block")
}

pub fn requirement(id: i32, name: &str) -> ElementHandle {
    ElementHandle::new(ElementId(id), "Requirement", name)
}

pub fn connector(id: i32, connector_type: &str, client: i32, supplier: i32) -> ConnectorHandle {
    ConnectorHandle::new(ConnectorId(id), connector_type, ElementId(client), ElementId(supplier))
}

pub fn vehicle_model() -> FixtureModel {
    FixtureModel::default()
        .package(ROOT_PACKAGE, 0)
        .package(STRUCTURE_PACKAGE, ROOT_PACKAGE)
        .package(PARTS_PACKAGE, STRUCTURE_PACKAGE)
        .package(EMPTY_PACKAGE, 0)
        .package(REQUIREMENTS_PACKAGE, ROOT_PACKAGE)
        .element(
            ROOT_PACKAGE,
            requirement(MAX_SPEED, "Max Speed").with_alias("REQ-1"),
        )
        .element(
            ROOT_PACKAGE,
            ElementHandle::new(ElementId(STRUCTURE_OBJECT), "Package", "Structure"),
        )
        .element(
            STRUCTURE_PACKAGE,
            block(VEHICLE, "Vehicle").with_notes("<b>Top</b> level system"),
        )
        .element(PARTS_PACKAGE, block(ENGINE, "Engine"))
        .element(PARTS_PACKAGE, block(WHEEL, "Wheel"))
        .element(
            REQUIREMENTS_PACKAGE,
            requirement(RANGE, "Range").with_notes("Range &gt; 500 km &amp; refuel &lt; 5 min"),
        )
        .connector(connector(100, "Association", VEHICLE, ENGINE))
        .connector(connector(101, "Association", VEHICLE, WHEEL))
        .connector(connector(102, "Realisation", VEHICLE, MAX_SPEED).with_stereotype("satisfy"))
        .tagged_value(MAX_SPEED, "Priority", "High")
        .tagged_value(VEHICLE, "Mass", "1500")
        .tagged_value(VEHICLE, "Color", "Red")
        .tagged_value(ENGINE, "Mass", "300")
}

pub fn vehicle_repository() -> Arc<ScriptedRepository> {
    Arc::new(ScriptedRepository::new(vehicle_model()))
}

/// Ids of a result, sorted, for order-insensitive comparison.
pub fn sorted_ids<'a>(elements: impl IntoIterator<Item = &'a ElementHandle>) -> Vec<i32> {
    let mut ids: Vec<i32> = elements.into_iter().map(|e| e.id.get()).collect();
    ids.sort_unstable();
    ids
}
