//! SQL statements issued against the host repository and the columns read
//! back from them.

use crate::base::{ElementId, PackageId, constants::PACKAGE_OBJECT_TYPE};

/// Every tagged value in the model.
pub const ALL_TAGGED_VALUES: &str = "SELECT Object_ID, Property, Value FROM t_objectproperties";

/// Every package with its parent.
pub const ALL_PACKAGES: &str = "SELECT package.Package_Id as PACKAGE_ID, package.Parent_Id as PARENT_ID from t_package package";

pub mod columns {
    pub const OBJECT_ID: &str = "Object_ID";
    pub const PROPERTY: &str = "Property";
    pub const VALUE: &str = "Value";
    pub const PACKAGE_ID: &str = "PACKAGE_ID";
    pub const PARENT_ID: &str = "PARENT_ID";
    pub const CONNECTOR_ID: &str = "Connector_ID";
}

/// Non-package objects owned by any of `packages`.
pub fn objects_in_packages(packages: &[PackageId]) -> String {
    format!(
        "SELECT Object_ID from t_object WHERE Package_ID in ({}) AND Object_Type != '{}'",
        join_ids(packages.iter().map(|id| id.get())),
        PACKAGE_OBJECT_TYPE
    )
}

/// Connectors with `element` at either end.
pub fn connectors_of(element: ElementId) -> String {
    format!(
        "SELECT Connector_ID from t_connector WHERE Start_Object_ID = {element} OR End_Object_ID = {element}"
    )
}

fn join_ids(ids: impl Iterator<Item = i32>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}
