mod executor;

pub use executor::{Command, DialogCommand, Host, execute, parse_filter};
