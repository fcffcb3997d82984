use crossterm::event::KeyCode;
use std::path::PathBuf;
use tui_textarea::{CursorMove, Input, Key, TextArea};

use crate::dialog::{Answer, FileFilter, Icon};

#[derive(Debug, Clone, PartialEq)]
pub enum DialogKind {
    Message,
    Confirm,
    Input {
        default: String,
    },
    Choice {
        items: Vec<String>,
        current: usize,
        editable: bool,
    },
    SaveFile {
        filters: Vec<FileFilter>,
    },
    OpenFile {
        filters: Vec<FileFilter>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DialogRequest {
    pub title: String,
    pub text: String,
    pub icon: Icon,
    pub kind: DialogKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    Closed,
    Answer(Answer),
    Text(String),
    Path(Option<PathBuf>),
}

pub struct DialogState<'a> {
    pub request: DialogRequest,
    pub text_area: TextArea<'a>,
    pub selected: usize,
    pub focus: Answer,
    pub error: Option<String>,
    /// Save target that already exists, waiting for a Yes/No to replace it.
    pub overwrite: Option<PathBuf>,
    result: Option<DialogResult>,
}

impl DialogState<'_> {
    pub fn new(request: DialogRequest) -> Self {
        let (text_area, selected) = match &request.kind {
            DialogKind::Input { default } => (text_area_with(default), 0),
            DialogKind::Choice {
                items,
                current,
                editable,
            } => {
                let selected = (*current).min(items.len().saturating_sub(1));
                let text_area = match items.get(selected) {
                    Some(item) if *editable => text_area_with(item),
                    _ => TextArea::default(),
                };
                (text_area, selected)
            }
            _ => (TextArea::default(), 0),
        };

        Self {
            request,
            text_area,
            selected,
            focus: Answer::No,
            error: None,
            overwrite: None,
            result: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&DialogResult> {
        self.result.as_ref()
    }

    pub fn into_result(self) -> Option<DialogResult> {
        self.result
    }

    /// Current contents of the single-line input.
    pub fn text(&self) -> String {
        self.text_area.lines().join("")
    }

    pub fn handle_key(&mut self, key_code: KeyCode) {
        if self.is_finished() {
            return;
        }

        if self.overwrite.is_some() {
            self.handle_overwrite(key_code);
            return;
        }

        match &self.request.kind {
            DialogKind::Message => {
                if matches!(key_code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.result = Some(DialogResult::Closed);
                }
            }
            DialogKind::Confirm => self.handle_confirm(key_code),
            DialogKind::Input { .. } => match key_code {
                KeyCode::Enter => self.result = Some(DialogResult::Text(self.text())),
                KeyCode::Esc => self.result = Some(DialogResult::Text(String::new())),
                _ => self.edit(key_code),
            },
            DialogKind::Choice {
                items, editable, ..
            } => {
                let (count, editable) = (items.len(), *editable);
                self.handle_choice(key_code, count, editable);
            }
            DialogKind::SaveFile { .. } => match key_code {
                KeyCode::Enter => self.submit_save(),
                KeyCode::Esc => self.result = Some(DialogResult::Path(None)),
                _ => self.edit(key_code),
            },
            DialogKind::OpenFile { .. } => match key_code {
                KeyCode::Enter => self.submit_open(),
                KeyCode::Esc => self.result = Some(DialogResult::Path(None)),
                _ => self.edit(key_code),
            },
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Answer::Yes => Answer::No,
            Answer::No => Answer::Yes,
        };
    }

    fn handle_confirm(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_focus();
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.result = Some(DialogResult::Answer(Answer::Yes));
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.result = Some(DialogResult::Answer(Answer::No));
            }
            KeyCode::Enter => self.result = Some(DialogResult::Answer(self.focus)),
            _ => {}
        }
    }

    // Yes accepts the pending path, No goes back to editing it
    fn handle_overwrite(&mut self, key_code: KeyCode) {
        let answer = match key_code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_focus();
                return;
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => Answer::Yes,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Answer::No,
            KeyCode::Enter => self.focus,
            _ => return,
        };

        let path = self.overwrite.take();
        self.focus = Answer::No;
        if answer == Answer::Yes {
            self.result = Some(DialogResult::Path(path));
        }
    }

    fn handle_choice(&mut self, key_code: KeyCode, count: usize, editable: bool) {
        match key_code {
            KeyCode::Up if count > 0 => {
                self.select(self.selected.saturating_sub(1), editable);
            }
            KeyCode::Down if count > 0 => {
                self.select((self.selected + 1).min(count - 1), editable);
            }
            KeyCode::Enter => {
                let text = if editable {
                    self.text()
                } else {
                    self.item(self.selected).unwrap_or_default()
                };
                self.result = Some(DialogResult::Text(text));
            }
            KeyCode::Esc => self.result = Some(DialogResult::Text(String::new())),
            _ if editable => self.edit(key_code),
            _ => {}
        }
    }

    fn item(&self, index: usize) -> Option<String> {
        match &self.request.kind {
            DialogKind::Choice { items, .. } => items.get(index).cloned(),
            _ => None,
        }
    }

    fn filters(&self) -> &[FileFilter] {
        match &self.request.kind {
            DialogKind::SaveFile { filters } | DialogKind::OpenFile { filters } => filters,
            _ => &[],
        }
    }

    fn select(&mut self, index: usize, editable: bool) {
        self.selected = index;
        if editable {
            if let Some(item) = self.item(index) {
                self.text_area = text_area_with(&item);
            }
        }
    }

    fn edit(&mut self, key_code: KeyCode) {
        self.error = None;
        self.text_area.input(Input {
            key: key_code_to_tui_key(key_code),
            ..Input::default()
        });
    }

    fn entered_path(&self) -> Result<PathBuf, String> {
        let raw = self.text().trim().to_string();
        if raw.is_empty() {
            return Err("Enter a file name".to_string());
        }
        Ok(PathBuf::from(raw))
    }

    fn resolve_save_path(&self) -> Result<PathBuf, String> {
        let mut path = self.entered_path()?;
        let filters = self.filters();

        if path.extension().is_none() {
            if let Some(ext) = filters.iter().find_map(|f| f.extension()) {
                path.set_extension(ext);
            }
        }

        if !matches_any(filters, &path) {
            return Err(format!("{} does not match the file types", path.display()));
        }

        Ok(path)
    }

    fn resolve_open_path(&self) -> Result<PathBuf, String> {
        let path = self.entered_path()?;

        if !path.is_file() {
            return Err(format!("{} does not exist", path.display()));
        }

        if !matches_any(self.filters(), &path) {
            return Err(format!("{} does not match the file types", path.display()));
        }

        Ok(path)
    }

    fn submit_save(&mut self) {
        match self.resolve_save_path() {
            Ok(path) if path.exists() => {
                self.focus = Answer::No;
                self.overwrite = Some(path);
            }
            Ok(path) => self.result = Some(DialogResult::Path(Some(path))),
            Err(e) => self.error = Some(e),
        }
    }

    fn submit_open(&mut self) {
        match self.resolve_open_path() {
            Ok(path) => self.result = Some(DialogResult::Path(Some(path))),
            Err(e) => self.error = Some(e),
        }
    }
}

fn matches_any(filters: &[FileFilter], path: &std::path::Path) -> bool {
    filters.is_empty() || filters.iter().any(|f| f.matches(path))
}

fn text_area_with<'a>(text: &str) -> TextArea<'a> {
    let mut text_area = TextArea::new(vec![text.to_string()]);
    text_area.move_cursor(CursorMove::End);
    text_area
}

// Convert crossterm::event::KeyCode to tui_textarea::Key
fn key_code_to_tui_key(key_code: KeyCode) -> Key {
    match key_code {
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Delete => Key::Delete,
        KeyCode::Char(c) => Key::Char(c),
        // Single-line input: Enter, Tab and vertical movement are ignored
        _ => Key::Null,
    }
}
