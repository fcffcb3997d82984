use anyhow::{Context, Result, bail};
use rust_xlsxwriter::Worksheet;

use crate::utils::col_name_to_index;

pub const DEFAULT_WIDTH_FACTOR: u32 = 10;

// Excel's last column, XFD
const MAX_COLUMNS: i64 = 16_384;

/// A host spreadsheet whose columns can be resized by name ("A", "B", ...).
pub trait Spreadsheet {
    /// Width in pixels.
    fn set_column_width(&mut self, column: &str, width: u32) -> Result<()>;
    fn recompute(&mut self) -> Result<()>;
}

impl Spreadsheet for Worksheet {
    fn set_column_width(&mut self, column: &str, width: u32) -> Result<()> {
        let index = col_name_to_index(column)?;
        if index > MAX_COLUMNS {
            bail!("Column {} is beyond the last column XFD", column);
        }

        let width = u16::try_from(width)
            .with_context(|| format!("Column width {} is too large", width))?;

        Worksheet::set_column_width_pixels(self, (index - 1) as u16, width)?;
        Ok(())
    }

    // Formulas are recalculated by whoever opens the file
    fn recompute(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Size `column` to fit `cell_value`: width = character count * `factor`.
///
/// Returns false, after logging the cause, when the sheet rejects the change.
pub fn set_column_width_for(
    sheet: &mut dyn Spreadsheet,
    column: &str,
    cell_value: &str,
    factor: u32,
) -> bool {
    match resize(sheet, column, cell_value, factor) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Could not set width of column {}: {:#}", column, e);
            false
        }
    }
}

fn resize(sheet: &mut dyn Spreadsheet, column: &str, cell_value: &str, factor: u32) -> Result<()> {
    let length = u32::try_from(cell_value.chars().count())
        .ok()
        .and_then(|len| len.checked_mul(factor))
        .context("Column width overflows")?;

    log::debug!("Setting column {} to width {}", column, length);
    sheet.set_column_width(column, length)?;
    sheet.recompute()
}
