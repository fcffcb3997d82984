use anyhow::{Result, bail};
use clap::Subcommand;
use rust_xlsxwriter::{Workbook as XlsxWorkbook, Worksheet};
use serde_json::{Value, json};
use std::path::PathBuf;

use crate::color::{OPAQUE, convert_color};
use crate::console::{Console, Severity};
use crate::dialog::{Dialogs, FileFilter, Icon};
use crate::excel::{DEFAULT_WIDTH_FACTOR, check_workbook_exists, set_column_width_for, sheet_names};
use crate::launcher::open_file;
use crate::toolbar::{WorkbenchLayout, toggle_toolbar};
use crate::utils::{col_name_to_index, index_to_col_name, r1c1_to_a1};

/// The collaborators a command may talk to.
pub struct Host<'a> {
    pub console: &'a dyn Console,
    pub dialogs: &'a mut dyn Dialogs,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Convert an R1C1 reference (R3C2) to A1 form (B3)
    A1 { reference: String },

    /// Column letter for a 1-based column number
    Letter {
        #[arg(allow_negative_numbers = true)]
        index: i64,
        #[arg(long)]
        lowercase: bool,
    },

    /// Column number for a column letter
    Number { letter: String },

    /// Convert 0-255 RGB and alpha to normalized RGBA
    Color {
        red: u8,
        green: u8,
        blue: u8,
        #[arg(long, short = 'a', default_value_t = OPAQUE)]
        alpha: f64,
    },

    /// Open a file with its default application
    Open { path: PathBuf },

    /// Check that a workbook exists, optionally creating one through a save dialog
    Workbook {
        path: PathBuf,
        #[arg(long)]
        create: bool,
    },

    /// Write VALUES into COLUMN of a new workbook, sized to the longest value
    FitColumn {
        output: PathBuf,
        column: String,
        #[arg(required = true)]
        values: Vec<String>,
        #[arg(long, short = 'f', default_value_t = DEFAULT_WIDTH_FACTOR)]
        factor: u32,
    },

    /// Toggle a toolbar in a JSON workbench layout file
    Toolbar {
        layout: PathBuf,
        name: String,
        #[arg(long, short = 'w')]
        workbench: Option<String>,
    },

    /// Print text on a console channel (Message, Warning, Error or Log)
    Print {
        text: String,
        #[arg(long, short = 's', default_value = "")]
        severity: String,
    },

    /// Show a dialog and print the answer
    #[command(subcommand)]
    Dialog(DialogCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum DialogCommand {
    Message {
        title: String,
        text: String,
        #[arg(long, default_value = "Information")]
        icon: String,
    },
    Confirm {
        title: String,
        text: String,
        #[arg(long, default_value = "Question")]
        icon: String,
    },
    Input {
        title: String,
        label: String,
        #[arg(long, short = 'd', default_value = "")]
        default: String,
    },
    Choose {
        title: String,
        label: String,
        #[arg(required = true)]
        items: Vec<String>,
        #[arg(long, default_value_t = 0)]
        current: usize,
        #[arg(long)]
        editable: bool,
    },
    /// Filters are given as DESCRIPTION=PATTERN, e.g. "Excel=*.xlsx"
    Save {
        #[arg(value_parser = parse_filter)]
        filters: Vec<FileFilter>,
    },
    OpenFile {
        #[arg(value_parser = parse_filter)]
        filters: Vec<FileFilter>,
    },
}

pub fn parse_filter(s: &str) -> Result<FileFilter, String> {
    let (description, pattern) = s.split_once('=').unwrap_or((s, s));
    let pattern = pattern.trim();

    if !pattern.starts_with('*') {
        return Err(format!("Invalid file pattern: {}", pattern));
    }

    Ok(FileFilter::new(description.trim(), pattern))
}

fn filters_or_all(filters: Vec<FileFilter>) -> Vec<FileFilter> {
    if filters.is_empty() {
        vec![FileFilter::new("All Files", "*.*")]
    } else {
        filters
    }
}

fn path_value(path: Option<PathBuf>) -> Value {
    match path {
        Some(path) => json!(path.to_string_lossy()),
        None => json!(""),
    }
}

pub fn execute(command: Command, host: &mut Host) -> Result<Value> {
    match command {
        Command::A1 { reference } => {
            let a1 = r1c1_to_a1(&reference);
            if a1.is_empty() {
                bail!("Not an R1C1 reference: {}", reference);
            }
            Ok(json!(a1))
        }
        Command::Letter { index, lowercase } => Ok(json!(index_to_col_name(index, !lowercase)?)),
        Command::Number { letter } => Ok(json!(col_name_to_index(&letter)?)),
        Command::Color {
            red,
            green,
            blue,
            alpha,
        } => Ok(serde_json::to_value(convert_color([red, green, blue], alpha)?)?),
        Command::Open { path } => {
            open_file(&path, host.console)?;
            Ok(Value::Null)
        }
        Command::Workbook { path, create } => {
            let exists = check_workbook_exists(&path, create, &mut *host.dialogs)?;
            let sheets = if exists && path.exists() {
                sheet_names(&path)?
            } else {
                Vec::new()
            };
            Ok(json!({ "exists": exists, "sheets": sheets }))
        }
        Command::FitColumn {
            output,
            column,
            values,
            factor,
        } => fit_column(output, &column, &values, factor),
        Command::Toolbar {
            layout,
            name,
            workbench,
        } => {
            let mut ui = WorkbenchLayout::load(&layout)?;
            match toggle_toolbar(&mut ui, &name, workbench.as_deref()) {
                Some(visibility) => {
                    ui.save(&layout)?;
                    Ok(json!({ "toolbar": name, "visibility": visibility }))
                }
                None => bail!("Toolbar {} not found", name),
            }
        }
        Command::Print { text, severity } => {
            let severity: Severity = severity.parse()?;
            host.console.print(&text, severity);
            Ok(Value::Null)
        }
        Command::Dialog(dialog) => execute_dialog(dialog, &mut *host.dialogs),
    }
}

fn execute_dialog(command: DialogCommand, dialogs: &mut dyn Dialogs) -> Result<Value> {
    match command {
        DialogCommand::Message { title, text, icon } => {
            let icon: Icon = icon.parse()?;
            dialogs.message(&title, &text, icon)?;
            Ok(Value::Null)
        }
        DialogCommand::Confirm { title, text, icon } => {
            let icon: Icon = icon.parse()?;
            Ok(json!(dialogs.confirm(&title, &text, icon)?.as_str()))
        }
        DialogCommand::Input {
            title,
            label,
            default,
        } => Ok(json!(dialogs.input(&title, &label, &default)?)),
        DialogCommand::Choose {
            title,
            label,
            items,
            current,
            editable,
        } => Ok(json!(dialogs.choose(
            &title, &label, &items, current, editable
        )?)),
        DialogCommand::Save { filters } => {
            Ok(path_value(dialogs.save_file(&filters_or_all(filters))?))
        }
        DialogCommand::OpenFile { filters } => {
            Ok(path_value(dialogs.open_file(&filters_or_all(filters))?))
        }
    }
}

fn fit_column(output: PathBuf, column: &str, values: &[String], factor: u32) -> Result<Value> {
    let col = col_name_to_index(column)? - 1;
    let Ok(col) = u16::try_from(col) else {
        bail!("Column {} is out of range", column);
    };

    let mut worksheet = Worksheet::new();
    for (row, value) in values.iter().enumerate() {
        worksheet.write_string(row as u32, col, value)?;
    }

    let longest = values
        .iter()
        .max_by_key(|value| value.chars().count())
        .map(String::as_str)
        .unwrap_or_default();

    if !set_column_width_for(&mut worksheet, column, longest, factor) {
        bail!("Could not size column {}", column);
    }

    let mut workbook = XlsxWorkbook::new();
    workbook.push_worksheet(worksheet);
    workbook.save(&output)?;

    Ok(json!({
        "path": output.to_string_lossy(),
        "column": column.to_uppercase(),
        "width": longest.chars().count() as u64 * u64::from(factor),
    }))
}
