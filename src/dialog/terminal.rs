use anyhow::{Result, bail};
use crossterm::{
    ExecutableCommand, cursor,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::path::PathBuf;

use crate::dialog::{
    Answer, DialogKind, DialogRequest, DialogResult, DialogState, Dialogs, FileFilter, Icon,
    render_dialog,
};

/// Shows each dialog as a modal popup on the alternate screen.
#[derive(Debug, Default)]
pub struct TerminalDialogs;

impl TerminalDialogs {
    pub fn new() -> Self {
        Self
    }

    fn run(&mut self, request: DialogRequest) -> Result<DialogResult> {
        log::debug!("Showing {:?} dialog", request.kind);

        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        event_loop(&mut terminal, DialogState::new(request))
    }
}

/// Raw mode and the alternate screen, undone on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let guard = Self;
        io::stdout().execute(EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Every step runs even if an earlier one fails
        if let Err(e) = disable_raw_mode() {
            log::debug!("Failed to disable raw mode: {}", e);
        }
        if let Err(e) = io::stdout().execute(LeaveAlternateScreen) {
            log::debug!("Failed to leave the alternate screen: {}", e);
        }
        if let Err(e) = io::stdout().execute(cursor::Show) {
            log::debug!("Failed to show the cursor: {}", e);
        }
    }
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut state: DialogState,
) -> Result<DialogResult> {
    while !state.is_finished() {
        terminal.draw(|f| render_dialog(f, &state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                state.handle_key(key.code);
            }
        }
    }

    match state.into_result() {
        Some(result) => Ok(result),
        None => bail!("Dialog closed without a result"),
    }
}

fn request(title: &str, text: &str, icon: Icon, kind: DialogKind) -> DialogRequest {
    DialogRequest {
        title: title.to_string(),
        text: text.to_string(),
        icon,
        kind,
    }
}

fn unexpected(result: DialogResult) -> anyhow::Error {
    anyhow::anyhow!("Unexpected dialog result: {:?}", result)
}

impl Dialogs for TerminalDialogs {
    fn message(&mut self, title: &str, text: &str, icon: Icon) -> Result<()> {
        match self.run(request(title, text, icon, DialogKind::Message))? {
            DialogResult::Closed => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    fn confirm(&mut self, title: &str, text: &str, icon: Icon) -> Result<Answer> {
        match self.run(request(title, text, icon, DialogKind::Confirm))? {
            DialogResult::Answer(answer) => Ok(answer),
            other => Err(unexpected(other)),
        }
    }

    fn input(&mut self, title: &str, label: &str, default: &str) -> Result<String> {
        let kind = DialogKind::Input {
            default: default.to_string(),
        };
        match self.run(request(title, label, Icon::NoIcon, kind))? {
            DialogResult::Text(text) => Ok(text),
            other => Err(unexpected(other)),
        }
    }

    fn choose(
        &mut self,
        title: &str,
        label: &str,
        items: &[String],
        current: usize,
        editable: bool,
    ) -> Result<String> {
        let kind = DialogKind::Choice {
            items: items.to_vec(),
            current,
            editable,
        };
        match self.run(request(title, label, Icon::NoIcon, kind))? {
            DialogResult::Text(text) => Ok(text),
            other => Err(unexpected(other)),
        }
    }

    fn save_file(&mut self, filters: &[FileFilter]) -> Result<Option<PathBuf>> {
        let kind = DialogKind::SaveFile {
            filters: filters.to_vec(),
        };
        match self.run(request("Save As", "File name:", Icon::NoIcon, kind))? {
            DialogResult::Path(path) => Ok(path),
            other => Err(unexpected(other)),
        }
    }

    fn open_file(&mut self, filters: &[FileFilter]) -> Result<Option<PathBuf>> {
        let kind = DialogKind::OpenFile {
            filters: filters.to_vec(),
        };
        match self.run(request("Open", "File name:", Icon::NoIcon, kind))? {
            DialogResult::Path(path) => Ok(path),
            other => Err(unexpected(other)),
        }
    }
}
