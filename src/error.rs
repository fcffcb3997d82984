use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid column index {0}: columns start at 1")]
    InvalidIndex(i64),
    #[error("invalid column letter {0:?}")]
    InvalidLetter(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("reference {0:?} does not start with 'R'")]
    MissingRowPrefix(String),
    #[error("reference {0:?} has no 'C' separator")]
    MissingSeparator(String),
    #[error("invalid row number {0:?}")]
    InvalidRow(String),
    #[error("invalid column number {0:?}")]
    InvalidColumn(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("alpha {0} is outside 0-255")]
    AlphaOutOfRange(f64),
}
