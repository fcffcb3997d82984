use std::fmt;

use crate::error::ReferenceError;
use crate::utils::index_to_col_name;

/// A cell position parsed from R1C1 notation. Both parts are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    row: i64,
    col: i64,
}

impl CellRef {
    pub fn new(row: i64, col: i64) -> Option<Self> {
        (row >= 1 && col >= 1).then_some(Self { row, col })
    }

    pub fn row(&self) -> i64 {
        self.row
    }

    pub fn col(&self) -> i64 {
        self.col
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // col >= 1 is guaranteed by the constructors
        let col_name = index_to_col_name(self.col, true).map_err(|_| fmt::Error)?;
        write!(f, "{}{}", col_name, self.row)
    }
}

pub fn parse_r1c1(input: &str) -> Result<CellRef, ReferenceError> {
    let trimmed = input.strip_prefix('\'').unwrap_or(input);
    let upper = trimmed.to_uppercase();

    let Some(rest) = upper.strip_prefix('R') else {
        return Err(ReferenceError::MissingRowPrefix(input.to_string()));
    };

    let Some(separator) = rest.find('C') else {
        return Err(ReferenceError::MissingSeparator(input.to_string()));
    };

    let row_text = &rest[..separator];
    let col_text = &rest[separator + 1..];

    let row = parse_positive(row_text)
        .ok_or_else(|| ReferenceError::InvalidRow(row_text.to_string()))?;
    let col = parse_positive(col_text)
        .ok_or_else(|| ReferenceError::InvalidColumn(col_text.to_string()))?;

    Ok(CellRef { row, col })
}

fn parse_positive(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok().filter(|n| *n >= 1)
}

/// Convert an R1C1 reference such as `R3C2` to A1 form (`B3`).
///
/// Returns an empty string when the input cannot be parsed; callers must check for it.
#[must_use]
pub fn r1c1_to_a1(input: &str) -> String {
    match parse_r1c1(input) {
        Ok(cell) => cell.to_string(),
        Err(e) => {
            log::debug!("R1C1 conversion failed: {}", e);
            String::new()
        }
    }
}
