//! Modal dialogs: message boxes, questions, text and choice input, file pickers.
//!
//! Each dialog kind is its own method on [`Dialogs`]. [`TerminalDialogs`]
//! draws them as popups in the terminal.

mod render;
mod state;
mod terminal;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use render::render_dialog;
pub use state::{DialogKind, DialogRequest, DialogResult, DialogState};
pub use terminal::TerminalDialogs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Icon {
    NoIcon,
    #[default]
    Information,
    Question,
    Warning,
    Critical,
}

impl FromStr for Icon {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "NoIcon" => Icon::NoIcon,
            "Question" => Icon::Question,
            "Warning" => Icon::Warning,
            "Critical" => Icon::Critical,
            _ => Icon::Information,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Yes => "yes",
            Answer::No => "no",
        }
    }
}

/// A named file pattern such as `("Excel", "*.xlsx")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub description: String,
    pub pattern: String,
}

impl FileFilter {
    pub fn new(description: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            pattern: pattern.into(),
        }
    }

    /// The concrete extension of a `*.ext` pattern, if it has one.
    pub fn extension(&self) -> Option<&str> {
        self.pattern
            .strip_prefix("*.")
            .filter(|ext| !ext.is_empty() && *ext != "*")
    }

    pub fn matches(&self, path: &Path) -> bool {
        match self.extension() {
            Some(ext) => path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(ext)),
            None => self.pattern == "*" || self.pattern == "*.*",
        }
    }
}

impl std::fmt::Display for FileFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description, self.pattern)
    }
}

/// Host dialog toolkit.
///
/// Cancelling never fails: text dialogs return an empty string, question
/// dialogs answer `No`, file dialogs return `None`.
pub trait Dialogs {
    fn message(&mut self, title: &str, text: &str, icon: Icon) -> Result<()>;

    /// Yes/No question with `No` as the default button.
    fn confirm(&mut self, title: &str, text: &str, icon: Icon) -> Result<Answer>;

    fn input(&mut self, title: &str, label: &str, default: &str) -> Result<String>;

    /// Pick one of `items`, starting at `current`; `editable` also allows free text.
    fn choose(
        &mut self,
        title: &str,
        label: &str,
        items: &[String],
        current: usize,
        editable: bool,
    ) -> Result<String>;

    fn save_file(&mut self, filters: &[FileFilter]) -> Result<Option<PathBuf>>;

    fn open_file(&mut self, filters: &[FileFilter]) -> Result<Option<PathBuf>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_names() {
        assert_eq!("Critical".parse::<Icon>().unwrap(), Icon::Critical);
        assert_eq!("NoIcon".parse::<Icon>().unwrap(), Icon::NoIcon);
        assert_eq!("whatever".parse::<Icon>().unwrap(), Icon::Information);
    }

    #[test]
    fn test_filter_matching() {
        let xlsx = FileFilter::new("Excel", "*.xlsx");
        assert_eq!(xlsx.extension(), Some("xlsx"));
        assert!(xlsx.matches(Path::new("book.xlsx")));
        assert!(xlsx.matches(Path::new("BOOK.XLSX")));
        assert!(!xlsx.matches(Path::new("book.xlsm")));
        assert!(!xlsx.matches(Path::new("book")));

        let all = FileFilter::new("All Files", "*.*");
        assert_eq!(all.extension(), None);
        assert!(all.matches(Path::new("anything")));
    }

    #[test]
    fn test_filter_display() {
        let filter = FileFilter::new("Python Files", "*.py");
        assert_eq!(filter.to_string(), "Python Files (*.py)");
    }
}
