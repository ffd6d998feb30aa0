use indexmap::IndexMap;

use super::notes::decode_html_entities;
use crate::base::constants::BASE_HEADERS;
use crate::error::{ModelKitError, Result};
use crate::model::SlimElement;

/// One export row: the values of an element for a fixed list of headers.
///
/// Headers are `Name, Alias, Notes`, then the selected tagged value names,
/// then the selected connector kinds. A tagged value or connector kind whose
/// name repeats an earlier header is not given a second column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportableElement {
    kind_name: String,
    headers: Vec<String>,
    values: IndexMap<String, String>,
}

impl ExportableElement {
    /// Shape `element` for export. Multiple values landing in one cell are
    /// joined with `separator`, in source order.
    pub fn new(
        element: &SlimElement,
        tagged_values: &[String],
        connectors: &[String],
        separator: &str,
    ) -> Result<Self> {
        let mut values: IndexMap<String, String> = IndexMap::new();
        values.insert(BASE_HEADERS[0].to_string(), element.name.clone());
        values.insert(BASE_HEADERS[1].to_string(), element.alias.clone());
        values.insert(
            BASE_HEADERS[2].to_string(),
            decode_html_entities(&element.notes).into_owned(),
        );

        for name in tagged_values {
            if values.contains_key(name) {
                continue;
            }
            let joined = element
                .tagged_value_values(name)
                .collect::<Vec<_>>()
                .join(separator);
            values.insert(name.clone(), joined);
        }

        for kind in connectors {
            if values.contains_key(kind) {
                continue;
            }
            let joined = element.connected_element_names(kind)?.join(separator);
            values.insert(kind.clone(), joined);
        }

        Ok(Self {
            kind_name: element.element_kind.clone(),
            headers: values.keys().cloned().collect(),
            values,
        })
    }

    /// Kind of the exported element (stereotype or type).
    pub fn kind_name(&self) -> &str {
        &self.kind_name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Value for `header`. Fails if `header` is not one of [`Self::headers`].
    pub fn value(&self, header: &str) -> Result<&str> {
        self.values.get(header).map(String::as_str).ok_or_else(|| {
            ModelKitError::invalid_argument(format!(
                "The provided header value [{header}] is not a valid header"
            ))
        })
    }

    /// Values in header order.
    pub fn row(&self) -> Vec<String> {
        self.values.values().cloned().collect()
    }
}
