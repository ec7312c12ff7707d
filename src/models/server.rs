// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alen Pepa

//! Server-line domain model and the positional line parser (UI-agnostic).

/// Input dialects recognized on a configuration line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    Cccam,
    Newcamd,
    Mgcamd,
}

impl Protocol {
    /// All known protocols, in prefix-matching order.
    pub const ALL: [Protocol; 3] = [Protocol::Cccam, Protocol::Newcamd, Protocol::Mgcamd];

    /// Line prefix token identifying this protocol.
    pub fn prefix(&self) -> &'static str {
        match self {
            Protocol::Cccam => "C:",
            Protocol::Newcamd => "N:",
            Protocol::Mgcamd => "M:",
        }
    }

    /// Customary default port, shown for reference only. Never enforced.
    pub fn default_port(&self) -> u16 {
        match self {
            Protocol::Cccam => 12000,
            Protocol::Newcamd => 15000,
            Protocol::Mgcamd => 15000,
        }
    }

    /// Number of expected tokens after the prefix.
    pub fn field_count(&self) -> usize {
        match self {
            // hostname, port, username, password
            Protocol::Cccam | Protocol::Mgcamd => 4,
            // plus the DES key
            Protocol::Newcamd => 5,
        }
    }

    /// Lowercase name used in OSCam reader labels and the `protocol =` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Cccam => "cccam",
            Protocol::Newcamd => "newcamd",
            Protocol::Mgcamd => "mgcamd",
        }
    }
}

/// One parsed server definition. Held only for the duration of a conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerRecord {
    pub protocol: Protocol,
    pub hostname: String,
    /// Kept as the raw token; the output dialects copy it through verbatim.
    pub port: String,
    pub username: String,
    pub password: String,
    /// Fifth field of NewCamd lines. Always `None` for the other protocols.
    pub des_key: Option<String>,
}

impl ServerRecord {
    /// Parse a single configuration line.
    ///
    /// Returns `None` for blank lines, `#` comments, unrecognized prefixes,
    /// and lines with fewer tokens than the matched protocol expects. Extra
    /// trailing tokens are ignored. No field is validated beyond presence.
    pub fn parse(line: &str) -> Option<ServerRecord> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let protocol = Protocol::ALL
            .into_iter()
            .find(|p| tokens.first() == Some(&p.prefix()))?;
        if tokens.len() < protocol.field_count() + 1 {
            return None;
        }

        Some(ServerRecord {
            protocol,
            hostname: tokens[1].to_string(),
            port: tokens[2].to_string(),
            username: tokens[3].to_string(),
            password: tokens[4].to_string(),
            des_key: match protocol {
                Protocol::Newcamd => Some(tokens[5].to_string()),
                Protocol::Cccam | Protocol::Mgcamd => None,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_cccam_line() {
        let record = ServerRecord::parse("C: server1.example.com 12000 user1 pass123").unwrap();

        assert_eq!(record.protocol, Protocol::Cccam);
        assert_eq!(record.hostname, "server1.example.com");
        assert_eq!(record.port, "12000");
        assert_eq!(record.username, "user1");
        assert_eq!(record.password, "pass123");
        assert_eq!(record.des_key, None);
    }

    #[test]
    fn parses_newcamd_line_including_des_key() {
        let record = ServerRecord::parse(
            "N: newcamd.server.com 15000 newuser newpass 0102030405060708091011121314",
        )
        .unwrap();

        assert_eq!(record.protocol, Protocol::Newcamd);
        assert_eq!(
            record.des_key.as_deref(),
            Some("0102030405060708091011121314")
        );
    }

    // A NewCamd line needs five tokens after the prefix; four is not enough.
    #[test]
    fn newcamd_line_without_key_yields_none() {
        assert_eq!(
            ServerRecord::parse("N: newcamd.server.com 15000 newuser newpass"),
            None
        );
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(ServerRecord::parse(""), None);
        assert_eq!(ServerRecord::parse("   "), None);
        assert_eq!(ServerRecord::parse("# C: host 12000 user pass"), None);
        assert_eq!(ServerRecord::parse("  # indented comment"), None);
    }

    #[test]
    fn skips_unrecognized_prefix() {
        assert_eq!(ServerRecord::parse("F: host 12000 user pass"), None);
        // Prefix must be its own token.
        assert_eq!(ServerRecord::parse("C:host 12000 user pass extra"), None);
    }

    #[test]
    fn ignores_extra_trailing_tokens() {
        let record =
            ServerRecord::parse("M: mgcamd.server.com 15500 mguser mgpass trailing junk").unwrap();

        assert_eq!(record.protocol, Protocol::Mgcamd);
        assert_eq!(record.password, "mgpass");
        assert_eq!(record.des_key, None);
    }

    #[test]
    fn accepts_arbitrary_port_tokens() {
        // Ports are opaque tokens; nothing validates them.
        let record = ServerRecord::parse("C: host not-a-port user pass").unwrap();

        assert_eq!(record.port, "not-a-port");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let record = ServerRecord::parse("\t C: host 12000 user pass \t").unwrap();

        assert_eq!(record.hostname, "host");
    }
}
