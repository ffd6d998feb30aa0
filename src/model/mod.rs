//! Slim projections of host entities.
//!
//! Projections are immutable, denormalized snapshots that are cheap to hold
//! in the cache and to group for export. They never keep a live host handle.
//!
//! ```text
//! SlimTaggedValue   one key/value annotation, keyed by owning element
//! SlimConnector     a directed relationship plus both endpoint kinds/names
//! SlimElement       an element with its tagged values and connectors grouped
//! SlimPackage       one node of the package containment tree
//! ```

mod connector;
mod element;
mod package;
mod tagged_value;

pub use connector::SlimConnector;
pub use element::SlimElement;
pub use package::{PackageTree, SlimPackage};
pub use tagged_value::SlimTaggedValue;
