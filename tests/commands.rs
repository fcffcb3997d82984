use anyhow::Result;
use cad_macro_utils::commands::{Command, DialogCommand, Host, execute};
use cad_macro_utils::console::{MemoryConsole, Severity};
use cad_macro_utils::dialog::{Answer, Dialogs, FileFilter, Icon};
use cad_macro_utils::excel::{check_workbook_exists, sheet_names};
use cad_macro_utils::toolbar::WorkbenchLayout;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Answers every dialog from canned values and remembers what was asked.
#[derive(Default)]
struct ScriptedDialogs {
    answer: Option<Answer>,
    text: String,
    path: Option<PathBuf>,
    asked: Vec<String>,
    filters: Vec<FileFilter>,
}

impl Dialogs for ScriptedDialogs {
    fn message(&mut self, title: &str, _text: &str, _icon: Icon) -> Result<()> {
        self.asked.push(format!("message:{}", title));
        Ok(())
    }

    fn confirm(&mut self, title: &str, _text: &str, _icon: Icon) -> Result<Answer> {
        self.asked.push(format!("confirm:{}", title));
        Ok(self.answer.unwrap_or(Answer::No))
    }

    fn input(&mut self, title: &str, _label: &str, default: &str) -> Result<String> {
        self.asked.push(format!("input:{}", title));
        if self.text.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(self.text.clone())
        }
    }

    fn choose(
        &mut self,
        title: &str,
        _label: &str,
        items: &[String],
        current: usize,
        _editable: bool,
    ) -> Result<String> {
        self.asked.push(format!("choose:{}", title));
        Ok(items.get(current).cloned().unwrap_or_default())
    }

    fn save_file(&mut self, filters: &[FileFilter]) -> Result<Option<PathBuf>> {
        self.asked.push("save".to_string());
        self.filters = filters.to_vec();
        Ok(self.path.clone())
    }

    fn open_file(&mut self, filters: &[FileFilter]) -> Result<Option<PathBuf>> {
        self.asked.push("open".to_string());
        self.filters = filters.to_vec();
        Ok(self.path.clone())
    }
}

fn run(command: Command, dialogs: &mut ScriptedDialogs, console: &MemoryConsole) -> Result<serde_json::Value> {
    let mut host = Host { console, dialogs };
    execute(command, &mut host)
}

#[test]
fn test_conversion_commands() {
    let console = MemoryConsole::new();
    let mut dialogs = ScriptedDialogs::default();

    let a1 = run(
        Command::A1 {
            reference: "'r12c28".to_string(),
        },
        &mut dialogs,
        &console,
    )
    .unwrap();
    assert_eq!(a1, json!("AB12"));

    let letter = run(
        Command::Letter {
            index: 703,
            lowercase: true,
        },
        &mut dialogs,
        &console,
    )
    .unwrap();
    assert_eq!(letter, json!("aaa"));

    let number = run(
        Command::Number {
            letter: "xfd".to_string(),
        },
        &mut dialogs,
        &console,
    )
    .unwrap();
    assert_eq!(number, json!(16384));
}

#[test]
fn test_conversion_errors() {
    let console = MemoryConsole::new();
    let mut dialogs = ScriptedDialogs::default();

    let bad_ref = Command::A1 {
        reference: "garbage".to_string(),
    };
    assert!(run(bad_ref, &mut dialogs, &console).is_err());

    let bad_index = Command::Letter {
        index: 0,
        lowercase: false,
    };
    let err = run(bad_index, &mut dialogs, &console).unwrap_err();
    assert!(err.to_string().contains("invalid column index 0"));
}

#[test]
fn test_color_command() {
    let console = MemoryConsole::new();
    let mut dialogs = ScriptedDialogs::default();

    let color = run(
        Command::Color {
            red: 255,
            green: 0,
            blue: 0,
            alpha: 255.0,
        },
        &mut dialogs,
        &console,
    )
    .unwrap();
    assert_eq!(
        color,
        json!({ "red": 1.0, "green": 0.0, "blue": 0.0, "alpha": 1.0 })
    );

    let out_of_range = Command::Color {
        red: 1,
        green: 2,
        blue: 3,
        alpha: 256.0,
    };
    assert!(run(out_of_range, &mut dialogs, &console).is_err());
}

#[test]
fn test_print_routes_to_channel() {
    let console = MemoryConsole::new();
    let mut dialogs = ScriptedDialogs::default();

    for (text, severity) in [("a", "Warning"), ("b", "Error"), ("c", "Log"), ("d", "")] {
        run(
            Command::Print {
                text: text.to_string(),
                severity: severity.to_string(),
            },
            &mut dialogs,
            &console,
        )
        .unwrap();
    }

    assert_eq!(
        console.entries(),
        vec![
            (Severity::Warning, "a".to_string()),
            (Severity::Error, "b".to_string()),
            (Severity::Log, "c".to_string()),
            (Severity::Message, "d".to_string()),
        ]
    );
}

#[test]
fn test_open_missing_file_reports_error() {
    let console = MemoryConsole::new();
    let mut dialogs = ScriptedDialogs::default();
    let dir = tempfile::tempdir().unwrap();

    let result = run(
        Command::Open {
            path: dir.path().join("missing.FCStd"),
        },
        &mut dialogs,
        &console,
    )
    .unwrap();

    assert_eq!(result, serde_json::Value::Null);
    assert!(console.contains(Severity::Error, "missing.FCStd does not exist"));
}

#[test]
fn test_existing_workbook_needs_no_dialog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("parts.xlsx");
    std::fs::write(&path, b"placeholder").unwrap();

    let mut dialogs = ScriptedDialogs::default();
    assert!(check_workbook_exists(&path, true, &mut dialogs).unwrap());
    assert!(dialogs.asked.is_empty());
}

#[test]
fn test_missing_workbook_without_create() {
    let dir = tempfile::tempdir().unwrap();
    let mut dialogs = ScriptedDialogs::default();

    let exists = check_workbook_exists(&dir.path().join("none.xlsx"), false, &mut dialogs).unwrap();
    assert!(!exists);
    assert!(dialogs.asked.is_empty());
}

#[test]
fn test_missing_workbook_cancelled_dialog() {
    let dir = tempfile::tempdir().unwrap();
    let mut dialogs = ScriptedDialogs::default();

    let exists = check_workbook_exists(&dir.path().join("none.xlsx"), true, &mut dialogs).unwrap();
    assert!(!exists);
    assert_eq!(dialogs.asked, vec!["save".to_string()]);
    assert_eq!(
        dialogs.filters,
        vec![
            FileFilter::new("Excel", "*.xlsx"),
            FileFilter::new("Excel Macro-enabled Workbook", "*.xlsm"),
        ]
    );
}

#[test]
fn test_missing_workbook_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("created.xlsx");
    let mut dialogs = ScriptedDialogs {
        path: Some(target.clone()),
        ..Default::default()
    };

    let exists = check_workbook_exists(&dir.path().join("none.xlsx"), true, &mut dialogs).unwrap();
    assert!(exists);
    assert_eq!(sheet_names(&target).unwrap(), vec!["Sheet1".to_string()]);
}

#[test]
fn test_workbook_command_lists_sheets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("book.xlsx");
    cad_macro_utils::excel::create_empty_workbook(&path).unwrap();

    let console = MemoryConsole::new();
    let mut dialogs = ScriptedDialogs::default();
    let result = run(
        Command::Workbook {
            path,
            create: false,
        },
        &mut dialogs,
        &console,
    )
    .unwrap();

    assert_eq!(result, json!({ "exists": true, "sheets": ["Sheet1"] }));
}

#[test]
fn test_fit_column_writes_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("fit.xlsx");
    let console = MemoryConsole::new();
    let mut dialogs = ScriptedDialogs::default();

    let result = run(
        Command::FitColumn {
            output: output.clone(),
            column: "c".to_string(),
            values: vec!["Bolt".to_string(), "Washer M8".to_string()],
            factor: 10,
        },
        &mut dialogs,
        &console,
    )
    .unwrap();

    assert_eq!(result["column"], json!("C"));
    assert_eq!(result["width"], json!(90));
    assert!(output.exists());
    assert_eq!(sheet_names(&output).unwrap(), vec!["Sheet1".to_string()]);
}

#[test]
fn test_toolbar_command_updates_layout_file() {
    let dir = tempfile::tempdir().unwrap();
    let layout_path = dir.path().join("layout.json");

    let mut workbenches = BTreeMap::new();
    workbenches.insert("Sketcher".to_string(), vec!["Constraints".to_string()]);
    let layout = WorkbenchLayout {
        active: Some("Sketcher".to_string()),
        workbenches,
        hidden: Default::default(),
    };
    layout.save(&layout_path).unwrap();

    let console = MemoryConsole::new();
    let mut dialogs = ScriptedDialogs::default();
    let toggle = || Command::Toolbar {
        layout: layout_path.clone(),
        name: "Constraints".to_string(),
        workbench: None,
    };

    let first = run(toggle(), &mut dialogs, &console).unwrap();
    assert_eq!(first["visibility"], json!("Hidden"));
    assert!(WorkbenchLayout::load(&layout_path).unwrap().hidden.contains("Constraints"));

    let second = run(toggle(), &mut dialogs, &console).unwrap();
    assert_eq!(second["visibility"], json!("Visible"));
    assert_eq!(WorkbenchLayout::load(&layout_path).unwrap(), layout);

    let missing = Command::Toolbar {
        layout: layout_path.clone(),
        name: "Nope".to_string(),
        workbench: None,
    };
    assert!(run(missing, &mut dialogs, &console).is_err());
}

#[test]
fn test_dialog_commands() {
    let console = MemoryConsole::new();
    let mut dialogs = ScriptedDialogs {
        answer: Some(Answer::Yes),
        text: "Pad001".to_string(),
        ..Default::default()
    };

    let message = DialogCommand::Message {
        title: "Info".to_string(),
        text: "Done".to_string(),
        icon: "Information".to_string(),
    };
    assert_eq!(
        run(Command::Dialog(message), &mut dialogs, &console).unwrap(),
        serde_json::Value::Null
    );

    let confirm = DialogCommand::Confirm {
        title: "Sure?".to_string(),
        text: "Overwrite".to_string(),
        icon: "Question".to_string(),
    };
    assert_eq!(
        run(Command::Dialog(confirm), &mut dialogs, &console).unwrap(),
        json!("yes")
    );

    let input = DialogCommand::Input {
        title: "Name".to_string(),
        label: "Feature".to_string(),
        default: String::new(),
    };
    assert_eq!(
        run(Command::Dialog(input), &mut dialogs, &console).unwrap(),
        json!("Pad001")
    );

    let choose = DialogCommand::Choose {
        title: "Size".to_string(),
        label: "Thread".to_string(),
        items: vec!["M6".to_string(), "M8".to_string()],
        current: 1,
        editable: false,
    };
    assert_eq!(
        run(Command::Dialog(choose), &mut dialogs, &console).unwrap(),
        json!("M8")
    );

    let save = DialogCommand::Save {
        filters: Vec::new(),
    };
    assert_eq!(
        run(Command::Dialog(save), &mut dialogs, &console).unwrap(),
        json!("")
    );
    assert_eq!(dialogs.filters, vec![FileFilter::new("All Files", "*.*")]);

    assert_eq!(
        dialogs.asked,
        vec!["message:Info", "confirm:Sure?", "input:Name", "choose:Size", "save"]
    );
}
