// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alen Pepa

//! Whole-file conversion view structured for MVU-style updates.

use std::path::PathBuf;

use eframe::egui;
use egui_phosphor::regular;

use crate::logic::convert::OutputFormat;
use crate::ui::components::format_picker::format_picker;

/// Summary of a completed file conversion, shown in the results pane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Records written, after skipping comments and malformed lines.
    pub records: usize,
    pub format: OutputFormat,
    /// Local `HH:MM:SS` completion time.
    pub finished_at: String,
    /// Truncated head of the generated output.
    pub preview: String,
}

/// UI model for the file converter tab, kept free of side effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileConvertModel {
    pub input_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub format: OutputFormat,
    pub report: Option<FileReport>,
}

/// Messages emitted by the file converter view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileConvertMsg {
    /// Handled by the app shell, which owns the native dialogs.
    BrowseInputClicked,
    BrowseOutputClicked,
    InputPicked(PathBuf),
    OutputPicked(PathBuf),
    SetFormat(OutputFormat),
    ConvertClicked,
    ConvertFinished(Result<FileReport, String>),
    OpenOutputClicked,
}

/// Side effects requested by the component, routed by the MVU kernel.
pub enum FileConvertCommand {
    ConvertFile {
        input: PathBuf,
        output: PathBuf,
        format: OutputFormat,
    },
    OpenPath(PathBuf),
}

/// User-facing feedback surfaced to the status bar or error modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileConvertEvent {
    pub message: String,
    pub is_error: bool,
}

/// Apply a message to the model. Returns a feedback event when relevant.
pub fn update(
    model: &mut FileConvertModel,
    msg: FileConvertMsg,
    cmds: &mut Vec<FileConvertCommand>,
) -> Option<FileConvertEvent> {
    match msg {
        FileConvertMsg::BrowseInputClicked | FileConvertMsg::BrowseOutputClicked => None,
        FileConvertMsg::InputPicked(path) => {
            let name = file_name(&path);
            model.input_path = Some(path);
            Some(FileConvertEvent {
                message: format!("Input file: {name}"),
                is_error: false,
            })
        }
        FileConvertMsg::OutputPicked(path) => {
            let name = file_name(&path);
            model.output_path = Some(path);
            Some(FileConvertEvent {
                message: format!("Output file: {name}"),
                is_error: false,
            })
        }
        FileConvertMsg::SetFormat(format) => {
            model.format = format;
            None
        }
        FileConvertMsg::ConvertClicked => {
            let Some(input) = model.input_path.clone() else {
                return Some(FileConvertEvent {
                    message: "Please select input file!".to_string(),
                    is_error: true,
                });
            };
            let Some(output) = model.output_path.clone() else {
                return Some(FileConvertEvent {
                    message: "Please select output file!".to_string(),
                    is_error: true,
                });
            };
            cmds.push(FileConvertCommand::ConvertFile {
                input,
                output,
                format: model.format,
            });
            Some(FileConvertEvent {
                message: "Conversion in progress...".to_string(),
                is_error: false,
            })
        }
        FileConvertMsg::ConvertFinished(result) => match result {
            Ok(report) => {
                let message = format!(
                    "Conversion completed! {} records written to {}",
                    report.records,
                    file_name(&report.output)
                );
                model.report = Some(report);
                Some(FileConvertEvent {
                    message,
                    is_error: false,
                })
            }
            Err(err) => {
                model.report = None;
                Some(FileConvertEvent {
                    message: format!("Conversion error: {err}"),
                    is_error: true,
                })
            }
        },
        FileConvertMsg::OpenOutputClicked => {
            if let Some(report) = &model.report {
                cmds.push(FileConvertCommand::OpenPath(report.output.clone()));
            }
            None
        }
    }
}

/// Render file pickers, conversion settings, and the results pane.
pub fn view(ui: &mut egui::Ui, model: &FileConvertModel) -> Vec<FileConvertMsg> {
    let mut msgs = Vec::new();

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("File selection").strong());
        ui.add_space(4.0);

        egui::Grid::new("file_select_grid")
            .num_columns(3)
            .spacing(egui::vec2(8.0, 8.0))
            .min_col_width(80.0)
            .show(ui, |ui| {
                ui.label("Input file");
                ui.label(display_path(&model.input_path));
                if ui
                    .button(format!("{} Browse…", regular::FOLDER_OPEN))
                    .clicked()
                {
                    msgs.push(FileConvertMsg::BrowseInputClicked);
                }
                ui.end_row();

                ui.label("Output file");
                ui.label(display_path(&model.output_path));
                if ui
                    .button(format!("{} Save as…", regular::FLOPPY_DISK))
                    .clicked()
                {
                    msgs.push(FileConvertMsg::BrowseOutputClicked);
                }
                ui.end_row();
            });
    });

    ui.add_space(8.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("Conversion settings").strong());
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label("Output format:");
            if let Some(format) = format_picker(ui, model.format, "file_format_picker") {
                msgs.push(FileConvertMsg::SetFormat(format));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button(format!("{} Convert file", regular::ROCKET_LAUNCH))
                    .clicked()
                {
                    msgs.push(FileConvertMsg::ConvertClicked);
                }
            });
        });
    });

    ui.add_space(8.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Results").strong());
            if model.report.is_some()
                && ui
                    .button(format!("{} Open output file", regular::ARROW_SQUARE_OUT))
                    .clicked()
            {
                msgs.push(FileConvertMsg::OpenOutputClicked);
            }
        });
        ui.add_space(4.0);
        match &model.report {
            Some(report) => render_report(ui, report),
            None => {
                ui.label(
                    egui::RichText::new("No conversion run yet.")
                        .italics()
                        .color(egui::Color32::from_gray(110)),
                );
            }
        }
    });

    msgs
}

fn render_report(ui: &mut egui::Ui, report: &FileReport) {
    egui::Grid::new("file_report_grid")
        .num_columns(2)
        .spacing(egui::vec2(8.0, 4.0))
        .show(ui, |ui| {
            ui.label("Input file:");
            ui.label(file_name(&report.input));
            ui.end_row();
            ui.label("Output file:");
            ui.label(file_name(&report.output));
            ui.end_row();
            ui.label("Records written:");
            ui.label(report.records.to_string());
            ui.end_row();
            ui.label("Format:");
            ui.label(report.format.display_name());
            ui.end_row();
            ui.label("Finished at:");
            ui.label(&report.finished_at);
            ui.end_row();
        });

    ui.add_space(6.0);
    egui::ScrollArea::vertical()
        .max_height(160.0)
        .show(ui, |ui| {
            ui.label(egui::RichText::new(&report.preview).monospace());
        });
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "(none selected)".to_string(),
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("?")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_click_requires_both_paths() {
        let mut model = FileConvertModel::default();
        let mut cmds = Vec::new();

        let event = update(&mut model, FileConvertMsg::ConvertClicked, &mut cmds).unwrap();
        assert!(event.is_error);
        assert!(event.message.contains("input file"));

        model.input_path = Some(PathBuf::from("/tmp/in.cfg"));
        let event = update(&mut model, FileConvertMsg::ConvertClicked, &mut cmds).unwrap();
        assert!(event.is_error);
        assert!(event.message.contains("output file"));
        assert!(cmds.is_empty());
    }

    #[test]
    fn convert_click_with_paths_enqueues_command() {
        let mut model = FileConvertModel {
            input_path: Some(PathBuf::from("/tmp/in.cfg")),
            output_path: Some(PathBuf::from("/tmp/out.server")),
            format: OutputFormat::Oscam,
            report: None,
        };
        let mut cmds = Vec::new();

        let event = update(&mut model, FileConvertMsg::ConvertClicked, &mut cmds).unwrap();

        assert!(!event.is_error);
        assert_eq!(cmds.len(), 1);
        match &cmds[0] {
            FileConvertCommand::ConvertFile { input, output, format } => {
                assert_eq!(input, &PathBuf::from("/tmp/in.cfg"));
                assert_eq!(output, &PathBuf::from("/tmp/out.server"));
                assert_eq!(*format, OutputFormat::Oscam);
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn failed_conversion_clears_report_and_errors() {
        let mut model = FileConvertModel {
            report: Some(FileReport {
                input: PathBuf::from("a"),
                output: PathBuf::from("b"),
                records: 1,
                format: OutputFormat::Cccam,
                finished_at: "12:00:00".into(),
                preview: String::new(),
            }),
            ..Default::default()
        };
        let mut cmds = Vec::new();

        let event = update(
            &mut model,
            FileConvertMsg::ConvertFinished(Err("no such file".into())),
            &mut cmds,
        )
        .unwrap();

        assert!(event.is_error);
        assert!(model.report.is_none());
    }

    #[test]
    fn open_output_only_works_with_a_report() {
        let mut model = FileConvertModel::default();
        let mut cmds = Vec::new();

        update(&mut model, FileConvertMsg::OpenOutputClicked, &mut cmds);
        assert!(cmds.is_empty());

        model.report = Some(FileReport {
            input: PathBuf::from("in.cfg"),
            output: PathBuf::from("out.server"),
            records: 3,
            format: OutputFormat::Oscam,
            finished_at: "12:00:00".into(),
            preview: String::new(),
        });
        update(&mut model, FileConvertMsg::OpenOutputClicked, &mut cmds);
        assert_eq!(cmds.len(), 1);
    }
}
