use anyhow::{Context, Result};
use calamine::{Reader, open_workbook_auto};
use rust_xlsxwriter::Workbook as XlsxWorkbook;
use std::path::Path;

use crate::dialog::{Dialogs, FileFilter};

pub fn workbook_filters() -> Vec<FileFilter> {
    vec![
        FileFilter::new("Excel", "*.xlsx"),
        FileFilter::new("Excel Macro-enabled Workbook", "*.xlsm"),
    ]
}

/// Returns true when `path` exists.
///
/// Otherwise, with `create_if_none`, asks for a location through a save
/// dialog and writes an empty workbook there; true once it is written.
pub fn check_workbook_exists(
    path: &Path,
    create_if_none: bool,
    dialogs: &mut dyn Dialogs,
) -> Result<bool> {
    match path.try_exists() {
        Ok(true) => return Ok(true),
        Ok(false) => {}
        Err(e) => log::debug!("Cannot check {}: {}", path.display(), e),
    }

    if !create_if_none {
        return Ok(false);
    }

    let Some(target) = dialogs.save_file(&workbook_filters())? else {
        return Ok(false);
    };

    create_empty_workbook(&target)?;
    log::info!("Created workbook {}", target.display());

    Ok(true)
}

pub fn create_empty_workbook(path: &Path) -> Result<()> {
    let mut workbook = XlsxWorkbook::new();
    workbook.add_worksheet();
    workbook
        .save(path)
        .with_context(|| format!("Unable to create workbook: {}", path.display()))?;

    Ok(())
}

pub fn sheet_names(path: &Path) -> Result<Vec<String>> {
    let workbook = open_workbook_auto(path)
        .with_context(|| format!("Unable to parse Excel file: {}", path.display()))?;

    Ok(workbook.sheet_names().to_vec())
}
