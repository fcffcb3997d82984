use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// The parts of a host main window that toolbar toggling needs.
pub trait UiContext {
    fn active_workbench(&self) -> Option<String>;
    fn list_toolbars(&self, workbench: &str) -> Vec<String>;
    /// `None` when the main window has no toolbar with this name.
    fn is_toolbar_hidden(&self, toolbar: &str) -> Option<bool>;
    fn set_toolbar_hidden(&mut self, toolbar: &str, hidden: bool);
}

/// Flip the visibility of `toolbar` if `workbench` (or the active one) lists it.
///
/// Returns the new visibility, or `None` when nothing was toggled.
pub fn toggle_toolbar(
    ui: &mut dyn UiContext,
    toolbar: &str,
    workbench: Option<&str>,
) -> Option<Visibility> {
    let workbench = match workbench {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => ui.active_workbench()?,
    };

    if !ui.list_toolbars(&workbench).iter().any(|t| t == toolbar) {
        log::debug!("Toolbar {} not found in workbench {}", toolbar, workbench);
        return None;
    }

    let hidden = ui.is_toolbar_hidden(toolbar)?;
    ui.set_toolbar_hidden(toolbar, !hidden);

    Some(if hidden {
        Visibility::Visible
    } else {
        Visibility::Hidden
    })
}

/// A serializable stand-in for a host main window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkbenchLayout {
    pub active: Option<String>,
    #[serde(default)]
    pub workbenches: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub hidden: BTreeSet<String>,
}

impl WorkbenchLayout {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid layout file: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self).context("Failed to serialize layout")?;
        fs::write(path, text).with_context(|| format!("Failed to write layout: {}", path.display()))
    }

    fn has_toolbar(&self, toolbar: &str) -> bool {
        self.workbenches
            .values()
            .any(|toolbars| toolbars.iter().any(|t| t == toolbar))
    }
}

impl UiContext for WorkbenchLayout {
    fn active_workbench(&self) -> Option<String> {
        self.active.clone()
    }

    fn list_toolbars(&self, workbench: &str) -> Vec<String> {
        self.workbenches.get(workbench).cloned().unwrap_or_default()
    }

    fn is_toolbar_hidden(&self, toolbar: &str) -> Option<bool> {
        self.has_toolbar(toolbar)
            .then(|| self.hidden.contains(toolbar))
    }

    fn set_toolbar_hidden(&mut self, toolbar: &str, hidden: bool) {
        if hidden {
            self.hidden.insert(toolbar.to_string());
        } else {
            self.hidden.remove(toolbar);
        }
    }
}
