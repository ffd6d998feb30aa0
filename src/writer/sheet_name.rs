//! Worksheet naming rules.

use rustc_hash::FxHashSet;

use crate::base::constants::{INVALID_SHEET_NAME_CHARS, MAX_SHEET_NAME_LEN};

/// Hands out valid, unique worksheet names for one workbook.
#[derive(Debug, Default)]
pub struct SheetNames {
    /// Lowercased names already used; sheet names compare case-insensitively.
    used: FxHashSet<String>,
}

impl SheetNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitize `requested` and make it unique among the names handed out so
    /// far.
    pub fn assign(&mut self, requested: &str) -> String {
        let base = sanitize(requested, self.used.len() + 1);

        let mut candidate = base.clone();
        let mut counter = 2;
        while self.used.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({counter})");
            let keep = MAX_SHEET_NAME_LEN - suffix.chars().count();
            candidate = format!("{}{suffix}", truncate(&base, keep));
            counter += 1;
        }

        self.used.insert(candidate.to_lowercase());
        candidate
    }
}

fn sanitize(requested: &str, position: usize) -> String {
    let cleaned: String = requested
        .chars()
        .filter(|c| !INVALID_SHEET_NAME_CHARS.contains(c) && !c.is_control())
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'');

    if cleaned.is_empty() {
        return format!("Sheet{position}");
    }

    truncate(cleaned, MAX_SHEET_NAME_LEN).to_string()
}

fn truncate(name: &str, max_chars: usize) -> &str {
    match name.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &name[..byte_index],
        None => name,
    }
}
