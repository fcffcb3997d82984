mod column;
mod workbook;

pub use column::{DEFAULT_WIDTH_FACTOR, Spreadsheet, set_column_width_for};
pub use workbook::{check_workbook_exists, create_empty_workbook, sheet_names, workbook_filters};
