// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alen Pepa

//! Business logic: the dialect parser and emitters.

pub mod convert;
