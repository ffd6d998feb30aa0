//! Package projection and the containment tree built from flat parent ids.

use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

use crate::base::{ElementId, PackageId};
use crate::source::queries::columns;
use crate::source::{DataSourceError, Row};

/// A package and the id of the package that owns it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlimPackage {
    pub package_id: PackageId,
    /// Id of the parent package; roots point at an id not present in the model
    pub container_id: PackageId,
    pub package_guid: String,
    pub package_name: String,
    /// Element standing for the package in its parent, absent for roots
    pub related_element_id: Option<ElementId>,
}

impl SlimPackage {
    pub fn new(package_id: PackageId, container_id: PackageId) -> Self {
        Self {
            package_id,
            container_id,
            ..Self::default()
        }
    }

    /// Read a `(PACKAGE_ID, PARENT_ID)` row.
    pub fn from_row(row: &Row) -> Result<Self, DataSourceError> {
        Ok(Self::new(
            row.parse(columns::PACKAGE_ID)?,
            row.parse(columns::PARENT_ID)?,
        ))
    }
}

/// Parent-to-children index over every package in the model.
#[derive(Debug, Default)]
pub struct PackageTree {
    children: FxHashMap<PackageId, Vec<PackageId>>,
}

impl PackageTree {
    pub fn new(packages: &[SlimPackage]) -> Self {
        let mut children: FxHashMap<PackageId, Vec<PackageId>> = FxHashMap::default();
        for package in packages {
            children
                .entry(package.container_id)
                .or_default()
                .push(package.package_id);
        }
        Self { children }
    }

    /// Every package nested under `root` at any depth, depth-first, not
    /// including `root` itself.
    ///
    /// Circular parentage is cut at the first package seen twice.
    pub fn contained_packages(&self, root: PackageId) -> Vec<PackageId> {
        let mut nested = Vec::new();
        let mut visited = FxHashSet::default();
        visited.insert(root);

        let mut stack: Vec<PackageId> = self.children_of(root).iter().rev().copied().collect();

        while let Some(package) = stack.pop() {
            if !visited.insert(package) {
                warn!(
                    "Package {} reached twice below package {}, containment cycle skipped",
                    package, root
                );
                continue;
            }

            nested.push(package);
            stack.extend(self.children_of(package).iter().rev().copied());
        }

        nested
    }

    /// `selected` plus everything nested under each of them, without
    /// duplicates.
    pub fn expand(&self, selected: impl IntoIterator<Item = PackageId>) -> IndexSet<PackageId> {
        let mut all = IndexSet::new();
        for root in selected {
            all.insert(root);
            all.extend(self.contained_packages(root));
        }
        all
    }

    fn children_of(&self, package: PackageId) -> &[PackageId] {
        self.children.get(&package).map(Vec::as_slice).unwrap_or(&[])
    }
}
