//! Tagged-row XML documents returned by host queries.

use std::str::FromStr;

use quick_xml::Reader;
use quick_xml::events::Event;

use super::DataSourceError;

/// Name of the element wrapping one result row.
const ROW_TAG: &[u8] = b"Row";

/// One result row: column name and text value, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    columns: Vec<(String, String)>,
}

impl Row {
    /// Build a row from column/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            columns: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of the first column matching `column`, ignoring ASCII case.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value.as_str())
    }

    /// Value of a column that must be present.
    pub fn require(&self, column: &str) -> Result<&str, DataSourceError> {
        self.get(column)
            .ok_or_else(|| DataSourceError::missing_column(column))
    }

    /// Parse a required column into `T`.
    pub fn parse<T: FromStr>(&self, column: &str) -> Result<T, DataSourceError> {
        let raw = self.require(column)?;
        raw.trim()
            .parse()
            .map_err(|_| DataSourceError::invalid_value(column, raw))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn push(&mut self, column: String, value: String) {
        self.columns.push((column, value));
    }
}

/// All rows of one query result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowSet {
    rows: Vec<Row>,
}

impl RowSet {
    /// Parse a row document. Every `Row` element anywhere in the document
    /// becomes one row; its direct children become columns.
    pub fn parse(document: &str) -> Result<Self, DataSourceError> {
        let mut reader = Reader::from_str(document);
        let mut rows = Vec::new();
        let mut current: Option<Row> = None;
        let mut column: Option<(String, String)> = None;
        // Elements nested below a column are flattened into its text.
        let mut nested = 0usize;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    if current.is_none() {
                        if e.local_name().as_ref() == ROW_TAG {
                            current = Some(Row::default());
                        }
                    } else if column.is_none() {
                        column = Some((local_name(e.local_name().as_ref())?, String::new()));
                    } else {
                        nested += 1;
                    }
                }
                Ok(Event::Empty(e)) => match current.as_mut() {
                    None if e.local_name().as_ref() == ROW_TAG => rows.push(Row::default()),
                    Some(row) if column.is_none() => {
                        row.push(local_name(e.local_name().as_ref())?, String::new());
                    }
                    _ => {}
                },
                Ok(Event::Text(text)) => {
                    if let Some((_, value)) = column.as_mut() {
                        let unescaped = text.unescape().map_err(|e| {
                            DataSourceError::xml(format!(
                                "invalid text at position {}: {e}",
                                reader.buffer_position()
                            ))
                        })?;
                        value.push_str(&unescaped);
                    }
                }
                Ok(Event::CData(data)) => {
                    if let Some((_, value)) = column.as_mut() {
                        value.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Ok(Event::End(e)) => {
                    if nested > 0 {
                        nested -= 1;
                    } else if let Some((name, value)) = column.take() {
                        if let Some(row) = current.as_mut() {
                            row.push(name, value);
                        }
                    } else if current.is_some() && e.local_name().as_ref() == ROW_TAG {
                        rows.extend(current.take());
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(DataSourceError::xml(format!(
                        "XML parse error at position {}: {e}",
                        reader.error_position()
                    )));
                }
                _ => {}
            }
        }

        if current.is_some() {
            return Err(DataSourceError::xml("unterminated Row element"));
        }

        Ok(Self { rows })
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parse one required column of every row.
    pub fn column<T: FromStr>(&self, column: &str) -> Result<Vec<T>, DataSourceError> {
        self.rows.iter().map(|row| row.parse(column)).collect()
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

fn local_name(bytes: &[u8]) -> Result<String, DataSourceError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| DataSourceError::xml(format!("Invalid tag name: {e}")))
}
