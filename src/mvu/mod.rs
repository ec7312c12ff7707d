// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alen Pepa

//! Root Model-View-Update kernel wiring component state, messages, and commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use crate::logic::convert::{OutputFormat, convert_to};
use crate::ui::components::file_convert::{
    self, FileConvertCommand, FileConvertModel, FileConvertMsg, FileReport,
};
use crate::ui::components::text_convert::{
    self, TextConvertCommand, TextConvertModel, TextConvertMsg,
};

/// Cap on the output preview embedded in a file-conversion report.
const REPORT_PREVIEW_LIMIT: usize = 500;

/// Views reachable from the top bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Text,
    File,
    About,
}

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Currently shown view.
    pub active_tab: Tab,
    /// Text converter state.
    pub text: TextConvertModel,
    /// File converter state.
    pub file: FileConvertModel,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

/// Application messages routed through the update function.
pub enum Msg {
    SelectTab(Tab),
    TextConvert(TextConvertMsg),
    FileConvert(FileConvertMsg),
    SaveOutputRequested(PathBuf),
    SaveCancelled,
    SaveCompleted(Result<PathBuf, String>),
    OpenCompleted(Result<PathBuf, String>),
    DismissError,
}

/// Commands represent side-effects executed between frames.
pub enum Command {
    Convert {
        text: String,
        format: OutputFormat,
    },
    ConvertFile {
        input: PathBuf,
        output: PathBuf,
        format: OutputFormat,
    },
    SaveOutput {
        path: PathBuf,
        content: String,
    },
    OpenPath(PathBuf),
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::SelectTab(tab) => model.active_tab = tab,
        Msg::DismissError => model.error = None,
        Msg::TextConvert(m) => {
            let mut text_cmds = Vec::new();
            if let Some(event) = text_convert::update(&mut model.text, m, &mut text_cmds) {
                surface_event(model, event.message, event.is_error);
            }
            for c in text_cmds {
                match c {
                    TextConvertCommand::Convert { text, format } => {
                        cmds.push(Command::Convert { text, format })
                    }
                }
            }
        }
        Msg::FileConvert(m) => {
            let mut file_cmds = Vec::new();
            if let Some(event) = file_convert::update(&mut model.file, m, &mut file_cmds) {
                surface_event(model, event.message, event.is_error);
            }
            for c in file_cmds {
                match c {
                    FileConvertCommand::ConvertFile {
                        input,
                        output,
                        format,
                    } => cmds.push(Command::ConvertFile {
                        input,
                        output,
                        format,
                    }),
                    FileConvertCommand::OpenPath(path) => cmds.push(Command::OpenPath(path)),
                }
            }
        }
        Msg::SaveOutputRequested(path) => {
            if model.text.output.trim().is_empty() {
                surface_event(model, "No output to save!".to_string(), true);
            } else {
                cmds.push(Command::SaveOutput {
                    path,
                    content: model.text.output.clone(),
                });
            }
        }
        Msg::SaveCancelled => surface_event(model, "Save cancelled.".to_string(), false),
        Msg::SaveCompleted(result) => match result {
            Ok(path) => surface_event(model, format!("File saved: {}", path.display()), false),
            Err(err) => surface_event(model, format!("Save error:\n\n{err}"), true),
        },
        Msg::OpenCompleted(result) => match result {
            Ok(path) => surface_event(model, format!("Opened {}", path.display()), false),
            Err(err) => surface_event(model, format!("Could not open file:\n\n{err}"), true),
        },
    }
}

/// Execute a command on a worker thread and return the resulting message.
pub fn run_command(cmd: Command) -> Msg {
    match cmd {
        Command::Convert { text, format } => {
            let output = convert_to(&text, format);
            Msg::TextConvert(TextConvertMsg::ConvertFinished {
                output,
                format,
                submitted_lines: submitted_line_count(&text),
            })
        }
        Command::ConvertFile {
            input,
            output,
            format,
        } => Msg::FileConvert(FileConvertMsg::ConvertFinished(
            convert_file(&input, &output, format).map_err(|e| format!("{e:#}")),
        )),
        Command::SaveOutput { path, content } => {
            let res = fs::write(&path, content)
                .with_context(|| format!("Failed to write {:?}", path))
                .map(|_| path);
            Msg::SaveCompleted(res.map_err(|e| format!("{e:#}")))
        }
        Command::OpenPath(path) => {
            let res = open::that(&path)
                .with_context(|| format!("Failed to open {:?}", path))
                .map(|_| path);
            Msg::OpenCompleted(res.map_err(|e| format!("{e:#}")))
        }
    }
}

/// Read, convert, and write in one pass, returning a report for the UI.
fn convert_file(input: &Path, output: &Path, format: OutputFormat) -> Result<FileReport> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file {:?}", input))?;

    let records = crate::logic::convert::parse_all(&content).len();
    let converted = convert_to(&content, format);

    fs::write(output, &converted)
        .with_context(|| format!("Failed to write output file {:?}", output))?;

    let preview = if converted.len() > REPORT_PREVIEW_LIMIT {
        let mut cut = REPORT_PREVIEW_LIMIT;
        while !converted.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…", &converted[..cut])
    } else {
        converted.clone()
    };

    Ok(FileReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        records,
        format,
        finished_at: Local::now().format("%H:%M:%S").to_string(),
        preview,
    })
}

/// Lines the user actually submitted: neither blank nor a `#` comment.
fn submitted_line_count(text: &str) -> usize {
    text.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .count()
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(format!("{} - {}", Local::now().format("%H:%M:%S"), message));
}

#[cfg(test)]
mod tests {
    #![allow(clippy::field_reassign_with_default)]

    use super::*;
    use tempfile::TempDir;

    #[test]
    fn convert_request_enqueues_and_completes() {
        let mut model = AppModel::default();
        model.text.input = "C: host.example.com 12000 user pass".into();
        model.text.format = OutputFormat::Oscam;

        let mut cmds = Vec::new();
        update(
            &mut model,
            Msg::TextConvert(TextConvertMsg::ConvertClicked),
            &mut cmds,
        );
        assert_eq!(cmds.len(), 1, "convert should enqueue command");

        let msg = run_command(cmds.pop().unwrap());
        let mut cmds2 = Vec::new();
        update(&mut model, msg, &mut cmds2);

        assert!(model.error.is_none());
        assert!(model.text.output.contains("label = cccam_user_1"));
        assert!(
            model
                .status
                .as_deref()
                .map(|s| s.contains("1 lines converted to OSCam"))
                .unwrap_or(false)
        );
    }

    #[test]
    fn convert_request_with_empty_input_sets_error() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();

        update(
            &mut model,
            Msg::TextConvert(TextConvertMsg::ConvertClicked),
            &mut cmds,
        );

        assert!(cmds.is_empty());
        assert!(model.error.is_some());
    }

    #[test]
    fn save_flow_writes_output_to_disk() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("CCcam.cfg");

        let mut model = AppModel::default();
        model.text.output = "C: host 12000 user pass\n".into();

        let mut cmds = Vec::new();
        update(&mut model, Msg::SaveOutputRequested(path.clone()), &mut cmds);
        assert_eq!(cmds.len(), 1);

        let msg = run_command(cmds.pop().unwrap());
        let mut cmds2 = Vec::new();
        update(&mut model, msg, &mut cmds2);

        assert!(model.error.is_none());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "C: host 12000 user pass\n"
        );
    }

    #[test]
    fn save_with_no_output_sets_error() {
        let mut model = AppModel::default();
        let mut cmds = Vec::new();

        update(
            &mut model,
            Msg::SaveOutputRequested(PathBuf::from("/tmp/ignored.cfg")),
            &mut cmds,
        );

        assert!(cmds.is_empty());
        assert!(model.error.is_some());
    }

    #[test]
    fn file_conversion_round_trips_through_disk() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("lines.txt");
        let output = tmp.path().join("CCcam.cfg");
        std::fs::write(
            &input,
            "C: server1.example.com 12000 user1 pass123\n\
             M: mgcamd.server.com 15500 mguser mgpass\n",
        )
        .unwrap();

        let mut model = AppModel::default();
        model.file.input_path = Some(input);
        model.file.output_path = Some(output.clone());
        model.file.format = OutputFormat::Cccam;

        let mut cmds = Vec::new();
        update(
            &mut model,
            Msg::FileConvert(FileConvertMsg::ConvertClicked),
            &mut cmds,
        );
        assert_eq!(cmds.len(), 1);

        let msg = run_command(cmds.pop().unwrap());
        let mut cmds2 = Vec::new();
        update(&mut model, msg, &mut cmds2);

        assert!(model.error.is_none());
        let report = model.file.report.as_ref().expect("report present");
        assert_eq!(report.records, 2);

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.contains("C: server1.example.com 12000 user1 pass123"));
        // MGcamd lines cannot be represented in CCcam output.
        assert!(!written.contains("mgcamd"));
    }

    #[test]
    fn file_conversion_with_missing_input_surfaces_error() {
        let tmp = TempDir::new().unwrap();

        let mut model = AppModel::default();
        model.file.input_path = Some(tmp.path().join("does-not-exist.cfg"));
        model.file.output_path = Some(tmp.path().join("out.cfg"));

        let mut cmds = Vec::new();
        update(
            &mut model,
            Msg::FileConvert(FileConvertMsg::ConvertClicked),
            &mut cmds,
        );

        let msg = run_command(cmds.pop().unwrap());
        let mut cmds2 = Vec::new();
        update(&mut model, msg, &mut cmds2);

        assert!(model.error.is_some());
        assert!(model.file.report.is_none());
    }

    #[test]
    fn submitted_line_count_skips_blank_and_comment_lines() {
        let text = "# header\nC: host 12000 user pass\n\n  \nM: host 15500 a b\n";

        assert_eq!(submitted_line_count(text), 2);
    }
}
