// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alen Pepa

//! Reusable egui components structured for MVU-style updates.

pub mod file_convert;
pub mod format_picker;
pub mod text_convert;

pub use format_picker::format_picker;
