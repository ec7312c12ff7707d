// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alen Pepa

//! Top-level egui application shell for the card-sharing converter.
//! Handles layout, tab switching, native dialogs, and worker wiring.

pub mod components;

use eframe::egui;
use egui_phosphor::regular;

use crate::logic::convert::{ensure_extension, suggested_output_name};
use crate::models::server::Protocol;
use crate::mvu::{self, AppModel, Command, Msg, Tab};
use crate::ui::components::file_convert::FileConvertMsg;
use crate::ui::components::text_convert::TextConvertMsg;
use crate::ui::components::{file_convert, text_convert};

/// Stateful egui application hosting the converter views.
pub struct CamConvertApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl Default for CamConvertApp {
    fn default() -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd);
                    let _ = msg_tx.send(msg);
                }
            });
        }

        Self {
            model: AppModel::default(),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for CamConvertApp {
    // All rendering happens in `update`, which eframe still calls each frame
    // alongside this required method.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        // Process pending messages until exhausted. Dialog-triggering clicks
        // are intercepted here because rfd must run on the UI thread.
        let mut msgs = std::mem::take(&mut self.inbox);
        while let Some(msg) = msgs.pop() {
            match msg {
                Msg::TextConvert(TextConvertMsg::SaveClicked) => {
                    msgs.push(self.run_save_dialog());
                }
                Msg::FileConvert(FileConvertMsg::BrowseInputClicked) => {
                    if let Some(msg) = self.run_open_dialog() {
                        msgs.push(msg);
                    }
                }
                Msg::FileConvert(FileConvertMsg::BrowseOutputClicked) => {
                    if let Some(msg) = self.run_output_dialog() {
                        msgs.push(msg);
                    }
                }
                other => {
                    let mut commands = Vec::new();
                    mvu::update(&mut self.model, other, &mut commands);
                    for cmd in commands {
                        if self.cmd_tx.send(cmd).is_ok() {
                            self.model.pending_commands += 1;
                        }
                    }
                }
            }
        }
        self.inbox = msgs;

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(format!("{} Card Sharing Converter", regular::SATELLITE_DISH));
                ui.separator();
                self.render_tab_bar(ui);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_theme_controls(ui);
                });
            });
            ui.add_space(4.0);
        });

        self.render_error_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            match self.model.active_tab {
                Tab::Text => {
                    let msgs = text_convert::view(ui, &self.model.text);
                    self.inbox.extend(msgs.into_iter().map(Msg::TextConvert));
                }
                Tab::File => {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        let msgs = file_convert::view(ui, &self.model.file);
                        self.inbox.extend(msgs.into_iter().map(Msg::FileConvert));
                    });
                }
                Tab::About => {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        self.render_about(ui);
                    });
                }
            }
        });
    }
}

impl CamConvertApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    fn render_theme_controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(2.0);
        egui::widgets::global_theme_preference_switch(ui);
    }

    fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        let tabs = [
            (Tab::Text, format!("{} Text converter", regular::NOTE_PENCIL)),
            (Tab::File, format!("{} File converter", regular::FOLDER)),
            (Tab::About, format!("{} About", regular::INFO)),
        ];
        for (tab, label) in tabs {
            if ui
                .selectable_label(self.model.active_tab == tab, label)
                .clicked()
            {
                self.inbox.push(Msg::SelectTab(tab));
            }
        }
    }

    /// Open the save dialog for the text converter output. Suggests a name
    /// and enforces the extension matching the selected output format.
    fn run_save_dialog(&self) -> Msg {
        let format = self.model.text.format;
        let dialog = rfd::FileDialog::new()
            .set_title("Save converted output")
            .add_filter(
                format!("{} files", format.display_name()),
                &[format.default_extension()],
            )
            .set_file_name(suggested_output_name(format));

        match dialog.save_file() {
            Some(path) => {
                Msg::SaveOutputRequested(ensure_extension(path, format.default_extension()))
            }
            None => Msg::SaveCancelled,
        }
    }

    fn run_open_dialog(&self) -> Option<Msg> {
        rfd::FileDialog::new()
            .set_title("Select input file")
            .add_filter("Config files", &["cfg", "server", "txt"])
            .pick_file()
            .map(|path| Msg::FileConvert(FileConvertMsg::InputPicked(path)))
    }

    fn run_output_dialog(&self) -> Option<Msg> {
        let format = self.model.file.format;
        rfd::FileDialog::new()
            .set_title("Select output file")
            .add_filter(
                format!("{} files", format.display_name()),
                &[format.default_extension()],
            )
            .set_file_name(suggested_output_name(format))
            .save_file()
            .map(|path| {
                Msg::FileConvert(FileConvertMsg::OutputPicked(ensure_extension(
                    path,
                    format.default_extension(),
                )))
            })
    }

    /// Static protocol reference plus app info.
    fn render_about(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("Supported protocols").strong());
            ui.add_space(4.0);
            egui::Grid::new("protocol_grid")
                .num_columns(3)
                .spacing(egui::vec2(16.0, 4.0))
                .striped(true)
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("Protocol").strong());
                    ui.label(egui::RichText::new("Line prefix").strong());
                    ui.label(egui::RichText::new("Default port").strong());
                    ui.end_row();
                    for protocol in Protocol::ALL {
                        ui.label(protocol.as_str());
                        ui.label(egui::RichText::new(protocol.prefix()).monospace());
                        ui.label(protocol.default_port().to_string());
                        ui.end_row();
                    }
                });
            ui.add_space(6.0);
            ui.label(
                egui::RichText::new(
                    "Default ports are shown for reference only; the converter \
                     copies port tokens through unchanged.",
                )
                .small()
                .color(egui::Color32::from_gray(110)),
            );
        });

        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("About").strong());
            ui.add_space(4.0);
            ui.label(
                "Converts CCcam, NewCamd, and MGcamd server lines into OSCam reader \
                 blocks or CCcam/NewCamd config files. Lines that cannot be parsed \
                 are skipped; nothing is ever sent over the network.",
            );
            ui.add_space(4.0);
            ui.label("Use only for legal purposes.");
        });
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status message when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        let text = self.model.status.as_deref().unwrap_or("Ready for conversion...");
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(text).color(egui::Color32::from_gray(110)));
            if self.model.pending_commands > 0 {
                ui.add(egui::Spinner::new().size(14.0)).on_hover_text(format!(
                    "{} task(s) running in background",
                    self.model.pending_commands
                ));
            }
        });
    }
}
