// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alen Pepa

//! Business logic for rewriting card-sharing server definitions.
//!
//! Responsibilities:
//! - Parse pasted or loaded configuration text into server records.
//! - Serialize the records into OSCam, CCcam, or NewCamd output.
//! - Provide small helpers for output file naming.

use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::models::server::{Protocol, ServerRecord};

/// DES key substituted when a record carries none (always the case for
/// CCcam lines rewritten as NewCamd).
const FALLBACK_DES_KEY: &str = "0102030405060708091011121314";

/// Supported output dialects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Oscam,
    Cccam,
    Newcamd,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] =
        [OutputFormat::Oscam, OutputFormat::Cccam, OutputFormat::Newcamd];

    /// Resolve a case-insensitive selector string. `None` for anything else.
    pub fn from_selector(selector: &str) -> Option<OutputFormat> {
        match selector.to_ascii_lowercase().as_str() {
            "oscam" => Some(OutputFormat::Oscam),
            "cccam" => Some(OutputFormat::Cccam),
            "newcamd" => Some(OutputFormat::Newcamd),
            _ => None,
        }
    }

    /// Human-facing name for buttons and status messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            OutputFormat::Oscam => "OSCam",
            OutputFormat::Cccam => "CCcam",
            OutputFormat::Newcamd => "NewCamd",
        }
    }

    /// Conventional file extension for saved output.
    pub fn default_extension(&self) -> &'static str {
        match self {
            OutputFormat::Oscam => "server",
            OutputFormat::Cccam | OutputFormat::Newcamd => "cfg",
        }
    }
}

/// Parse every line of `text`, keeping records in source-line order.
///
/// Blank lines, comments, and malformed lines are skipped, never an error.
pub fn parse_all(text: &str) -> Vec<ServerRecord> {
    text.lines().filter_map(ServerRecord::parse).collect()
}

/// Convert configuration text to the dialect named by `selector`.
///
/// The selector is matched case-insensitively against `oscam`, `cccam`, and
/// `newcamd`; any other value yields an empty string rather than an error, so
/// callers that care must check for emptiness themselves.
pub fn convert(text: &str, selector: &str) -> String {
    match OutputFormat::from_selector(selector) {
        Some(format) => convert_to(text, format),
        None => String::new(),
    }
}

/// Convert configuration text to an already-resolved output format.
pub fn convert_to(text: &str, format: OutputFormat) -> String {
    let records = parse_all(text);
    match format {
        OutputFormat::Oscam => to_oscam(&records),
        OutputFormat::Cccam => to_cccam(&records),
        OutputFormat::Newcamd => to_newcamd(&records),
    }
}

/// Emit one OSCam `[reader]` block per record, all protocols included.
pub fn to_oscam(records: &[ServerRecord]) -> String {
    render_oscam(records, Local::now())
}

/// Emit `C:` lines for CCcam and NewCamd records. MGcamd records and NewCamd
/// DES keys are dropped; this output format cannot carry them.
pub fn to_cccam(records: &[ServerRecord]) -> String {
    render_cccam(records, Local::now())
}

/// Emit `N:` lines for CCcam and NewCamd records, upgrading CCcam lines with
/// the fixed fallback DES key. MGcamd records are dropped.
pub fn to_newcamd(records: &[ServerRecord]) -> String {
    render_newcamd(records, Local::now())
}

fn render_oscam(records: &[ServerRecord], generated: DateTime<Local>) -> String {
    let mut output = header("OSCam Server Configuration", records.len(), generated);

    for (i, record) in records.iter().enumerate() {
        // Index is the 1-based position in the full parsed sequence, not a
        // per-protocol counter.
        let label = format!("{}_{}_{}", record.protocol.as_str(), record.username, i + 1);

        output.push_str(&format!(
            "[reader]\n\
             label = {label}\n\
             enable = 1\n\
             protocol = {}\n\
             device = {},{}\n\
             user = {}\n\
             password = {}\n\
             inactivitytimeout = 30\n\
             reconnecttimeout = 30\n\
             group = 1\n",
            record.protocol.as_str(),
            record.hostname,
            record.port,
            record.username,
            record.password,
        ));

        match record.protocol {
            Protocol::Newcamd => {
                if let Some(key) = &record.des_key {
                    output.push_str(&format!("key = {key}\n"));
                }
            }
            Protocol::Cccam => output.push_str("cccversion = 2.3.0\n"),
            Protocol::Mgcamd => {}
        }
        output.push('\n');
    }

    output
}

fn render_cccam(records: &[ServerRecord], generated: DateTime<Local>) -> String {
    let mut output = header("CCcam Configuration", records.len(), generated);

    for record in records {
        if matches!(record.protocol, Protocol::Cccam | Protocol::Newcamd) {
            output.push_str(&format!(
                "C: {} {} {} {}\n",
                record.hostname, record.port, record.username, record.password
            ));
        }
    }

    output
}

fn render_newcamd(records: &[ServerRecord], generated: DateTime<Local>) -> String {
    let mut output = header("NewCamd Configuration", records.len(), generated);

    for record in records {
        if matches!(record.protocol, Protocol::Cccam | Protocol::Newcamd) {
            let des_key = record.des_key.as_deref().unwrap_or(FALLBACK_DES_KEY);
            output.push_str(&format!(
                "N: {} {} {} {} {}\n",
                record.hostname, record.port, record.username, record.password, des_key
            ));
        }
    }

    output
}

/// Three-line comment header shared by all emitters.
fn header(title: &str, count: usize, generated: DateTime<Local>) -> String {
    format!(
        "# {title}\n# Generated: {}\n# Total servers: {count}\n\n",
        generated.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Suggest an output filename for the given format.
pub fn suggested_output_name(format: OutputFormat) -> String {
    let base = match format {
        OutputFormat::Oscam => "oscam",
        OutputFormat::Cccam => "CCcam",
        OutputFormat::Newcamd => "newcamd",
    };
    format!("{}.{}", base, format.default_extension())
}

/// Force a specific extension onto a path when it is missing or different.
///
/// Keeps existing matching extension (case-insensitive); otherwise replaces it.
pub fn ensure_extension(mut path: PathBuf, extension: &str) -> PathBuf {
    let replace = !matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case(extension)
    );

    if replace {
        path.set_extension(extension);
    }
    path
}
