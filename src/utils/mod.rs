mod helpers;
mod reference;

pub use helpers::{col_name_to_index, index_to_col_name};
pub use reference::{CellRef, parse_r1c1, r1c1_to_a1};
