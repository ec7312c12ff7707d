// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alen Pepa

//! Reusable output-format selector widget.

use eframe::egui;

use crate::logic::convert::OutputFormat;

/// Draw the three output formats as selectable labels. Returns the newly
/// chosen format when the selection changed.
pub fn format_picker(
    ui: &mut egui::Ui,
    selected: OutputFormat,
    id_salt: &str,
) -> Option<OutputFormat> {
    let mut picked = None;

    ui.push_id(id_salt, |ui| {
        ui.horizontal(|ui| {
            for format in OutputFormat::ALL {
                if ui
                    .selectable_label(format == selected, format.display_name())
                    .clicked()
                    && format != selected
                {
                    picked = Some(format);
                }
            }
        });
    });

    picked
}
