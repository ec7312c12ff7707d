// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alen Pepa

//! Paste-and-convert view structured for MVU-style updates.

use eframe::egui;
use egui_phosphor::regular;

use crate::logic::convert::OutputFormat;
use crate::ui::components::format_picker::format_picker;

/// Five representative input lines for first-time users.
pub const SAMPLE_DATA: &str = "C: server1.example.com 12000 user1 pass123\n\
                               C: server2.example.com 12001 user2 pass456\n\
                               N: newcamd.server.com 15000 newuser newpass 0102030405060708091011121314\n\
                               N: newcamd2.server.com 15001 user3 pass789 1234567890123456789012345678\n\
                               M: mgcamd.server.com 15500 mguser mgpass";

/// UI model for the text converter tab, kept free of side effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextConvertModel {
    /// Raw configuration lines pasted by the user.
    pub input: String,
    /// Latest conversion result (read-only in the view).
    pub output: String,
    /// Selected output dialect.
    pub format: OutputFormat,
}

/// Messages emitted by the text converter view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextConvertMsg {
    InputChanged(String),
    SetFormat(OutputFormat),
    ConvertClicked,
    ClearClicked,
    LoadSampleClicked,
    /// Handled by the app shell, which owns the save dialog.
    SaveClicked,
    ConvertFinished {
        output: String,
        format: OutputFormat,
        submitted_lines: usize,
    },
}

/// Side effects requested by the component, routed by the MVU kernel.
pub enum TextConvertCommand {
    Convert { text: String, format: OutputFormat },
}

/// User-facing feedback surfaced to the status bar or error modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextConvertEvent {
    pub message: String,
    pub is_error: bool,
}

/// Apply a message to the model. Returns a feedback event when relevant.
pub fn update(
    model: &mut TextConvertModel,
    msg: TextConvertMsg,
    cmds: &mut Vec<TextConvertCommand>,
) -> Option<TextConvertEvent> {
    match msg {
        TextConvertMsg::InputChanged(text) => {
            model.input = text;
            None
        }
        TextConvertMsg::SetFormat(format) => {
            model.format = format;
            None
        }
        TextConvertMsg::ConvertClicked => {
            if model.input.trim().is_empty() {
                return Some(TextConvertEvent {
                    message: "Please add input text!".to_string(),
                    is_error: true,
                });
            }
            cmds.push(TextConvertCommand::Convert {
                text: model.input.clone(),
                format: model.format,
            });
            None
        }
        TextConvertMsg::ClearClicked => {
            model.input.clear();
            model.output.clear();
            Some(TextConvertEvent {
                message: "Text cleared".to_string(),
                is_error: false,
            })
        }
        TextConvertMsg::LoadSampleClicked => {
            model.input = SAMPLE_DATA.to_string();
            Some(TextConvertEvent {
                message: "Sample data loaded".to_string(),
                is_error: false,
            })
        }
        TextConvertMsg::SaveClicked => None,
        TextConvertMsg::ConvertFinished {
            output,
            format,
            submitted_lines,
        } => {
            model.output = output;
            Some(TextConvertEvent {
                message: format!(
                    "Conversion completed! {} lines converted to {}",
                    submitted_lines,
                    format.display_name()
                ),
                is_error: false,
            })
        }
    }
}

/// Render the input/output panes and controls, emitting messages instead of
/// mutating state directly.
pub fn view(ui: &mut egui::Ui, model: &TextConvertModel) -> Vec<TextConvertMsg> {
    let mut msgs = Vec::new();

    let pane_height = (ui.available_height() - 80.0).max(160.0);
    ui.columns(2, |cols| {
        cols[0].label("Input (paste lines here):");
        cols[0].add_space(4.0);
        let mut input = model.input.clone();
        let pane_width = cols[0].available_width();
        let response = cols[0].add_sized(
            egui::vec2(pane_width, pane_height),
            egui::TextEdit::multiline(&mut input)
                .code_editor()
                .hint_text("C: hostname port username password"),
        );
        if response.changed() {
            msgs.push(TextConvertMsg::InputChanged(input));
        }

        cols[1].label("Output:");
        cols[1].add_space(4.0);
        let mut output = model.output.clone();
        let pane_width = cols[1].available_width();
        cols[1].add_sized(
            egui::vec2(pane_width, pane_height),
            egui::TextEdit::multiline(&mut output)
                .code_editor()
                .interactive(false),
        );
    });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label("Output format:");
        if let Some(format) = format_picker(ui, model.format, "text_format_picker") {
            msgs.push(TextConvertMsg::SetFormat(format));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let save = egui::Button::new(format!("{} Save", regular::FLOPPY_DISK));
            if ui
                .add_enabled(!model.output.trim().is_empty(), save)
                .on_disabled_hover_text("Nothing to save yet")
                .clicked()
            {
                msgs.push(TextConvertMsg::SaveClicked);
            }
            if ui
                .button(format!("{} Clear", regular::TRASH))
                .clicked()
            {
                msgs.push(TextConvertMsg::ClearClicked);
            }
            if ui
                .button(format!("{} Convert", regular::ARROWS_CLOCKWISE))
                .clicked()
            {
                msgs.push(TextConvertMsg::ConvertClicked);
            }
            if ui
                .button(format!("{} Load sample data", regular::CLIPBOARD_TEXT))
                .clicked()
            {
                msgs.push(TextConvertMsg::LoadSampleClicked);
            }
        });
    });

    msgs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_click_with_input_enqueues_command() {
        let mut model = TextConvertModel {
            input: "C: host 12000 user pass".into(),
            format: OutputFormat::Cccam,
            ..Default::default()
        };
        let mut cmds = Vec::new();

        let event = update(&mut model, TextConvertMsg::ConvertClicked, &mut cmds);

        assert!(event.is_none());
        assert_eq!(cmds.len(), 1);
        match &cmds[0] {
            TextConvertCommand::Convert { text, format } => {
                assert_eq!(text, "C: host 12000 user pass");
                assert_eq!(*format, OutputFormat::Cccam);
            }
        }
    }

    #[test]
    fn convert_click_without_input_is_an_error() {
        let mut model = TextConvertModel::default();
        let mut cmds = Vec::new();

        let event = update(&mut model, TextConvertMsg::ConvertClicked, &mut cmds).unwrap();

        assert!(event.is_error);
        assert!(cmds.is_empty());
    }

    #[test]
    fn clear_wipes_both_panes() {
        let mut model = TextConvertModel {
            input: "some".into(),
            output: "thing".into(),
            ..Default::default()
        };
        let mut cmds = Vec::new();

        update(&mut model, TextConvertMsg::ClearClicked, &mut cmds);

        assert!(model.input.is_empty());
        assert!(model.output.is_empty());
    }

    #[test]
    fn finished_conversion_updates_output_and_reports_count() {
        let mut model = TextConvertModel::default();
        let mut cmds = Vec::new();

        let event = update(
            &mut model,
            TextConvertMsg::ConvertFinished {
                output: "# CCcam Configuration\n".into(),
                format: OutputFormat::Cccam,
                submitted_lines: 5,
            },
            &mut cmds,
        )
        .unwrap();

        assert_eq!(model.output, "# CCcam Configuration\n");
        assert!(event.message.contains("5 lines converted to CCcam"));
        assert!(!event.is_error);
    }

    #[test]
    fn sample_data_parses_into_five_records() {
        assert_eq!(crate::logic::convert::parse_all(SAMPLE_DATA).len(), 5);
    }
}
