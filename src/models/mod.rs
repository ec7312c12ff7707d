// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alen Pepa

//! Domain layer: pure data types shared between UI and conversion logic.

pub mod server;
