pub mod color;
pub mod commands;
pub mod console;
pub mod dialog;
pub mod error;
pub mod excel;
pub mod launcher;
pub mod toolbar;
pub mod utils;

pub use error::{CodecError, ColorError, ReferenceError};
