//! Export and workbook constants.

/// Columns every exported element carries, in order.
pub const BASE_HEADERS: [&str; 3] = ["Name", "Alias", "Notes"];

/// Selection list discriminator for packages.
pub const PACKAGE_BASE_TYPE: &str = "Package";

/// Object type the host uses for package rows in `t_object`.
pub const PACKAGE_OBJECT_TYPE: &str = "Package";

/// Maximum length of a worksheet name.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Characters a worksheet name may not contain.
pub const INVALID_SHEET_NAME_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Default lower bound for auto-sized column widths.
pub const DEFAULT_MIN_COLUMN_WIDTH: f64 = 20.0;

/// Default upper bound for auto-sized column widths.
pub const DEFAULT_MAX_COLUMN_WIDTH: f64 = 70.0;
