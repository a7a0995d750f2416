//! Rendering of the `/.well-known/mta-sts.txt` document (RFC 8461 §3.2).

use std::fmt;

use crate::config::Config;

pub const POLICY_VERSION: &str = "STSv1";

/// Render the policy body for a validated `config`.
///
/// Four `key: value` lines separated by a single `\n`, no trailing newline.
/// An empty MX list is written as the literal `none`.
pub fn render(config: &Config) -> String {
    let mx = if config.mx_hosts().is_empty() {
        "none".to_string()
    } else {
        config.mx_hosts().join(",")
    };
    format!(
        "version: {POLICY_VERSION}\nmode: {}\nmx: {mx}\nmax_age: {}",
        config.mode(),
        config.max_age()
    )
}

/// The rendered policy, computed once at startup and shared read-only by
/// every request handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRecord {
    body: String,
}

impl PolicyRecord {
    pub fn new(config: &Config) -> Self {
        Self {
            body: render(config),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.body.as_bytes()
    }

    /// Length in bytes, as sent in `Content-Length`.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

impl fmt::Display for PolicyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use proptest::prelude::*;

    fn config(mode: &str, mx: &[&str], max_age: &str) -> Config {
        Config::from_settings(Settings {
            domain: "example.com".into(),
            mode: mode.into(),
            mx: mx.iter().map(|s| s.to_string()).collect(),
            max_age: max_age.into(),
            ..Settings::default()
        })
        .expect("valid config")
    }

    #[test]
    fn renders_canonical_document() {
        let body = render(&config("testing", &["mail.example.com"], "86400"));
        assert_eq!(
            body,
            "version: STSv1\nmode: testing\nmx: mail.example.com\nmax_age: 86400"
        );
    }

    #[test]
    fn multiple_mx_are_comma_joined() {
        let body = render(&config(
            "enforce",
            &["mx1.example.com", "mx2.example.com"],
            "604800",
        ));
        insta::assert_snapshot!(body, @r"
        version: STSv1
        mode: enforce
        mx: mx1.example.com,mx2.example.com
        max_age: 604800
        ");
    }

    #[test]
    fn empty_mx_renders_none() {
        let body = render(&config("none", &[], "1"));
        assert!(body.contains("\nmx: none\n"), "{body}");
    }

    #[test]
    fn only_newline_separators() {
        let body = render(&config("testing", &["mail.example.com"], "86400"));
        assert!(!body.contains('\r'));
        assert_eq!(body.lines().count(), 4);
        assert!(!body.ends_with('\n'));
    }

    #[test]
    fn record_length_is_byte_length() {
        let record = PolicyRecord::new(&config("testing", &["mail.example.com"], "86400"));
        assert_eq!(record.len(), record.as_bytes().len());
        assert_eq!(record.to_string(), record.as_str());
    }

    proptest! {
        #[test]
        fn render_is_idempotent(
            mode in prop_oneof![Just("testing"), Just("enforce"), Just("none")],
            hosts in proptest::collection::vec("[a-z]{1,10}\\.example\\.com", 0..4),
            max_age in 1u64..31_536_000,
        ) {
            let hosts: Vec<&str> = hosts.iter().map(String::as_str).collect();
            let cfg = config(mode, &hosts, &max_age.to_string());
            prop_assert_eq!(render(&cfg), render(&cfg));
            prop_assert_eq!(PolicyRecord::new(&cfg).to_string(), render(&cfg));
        }
    }
}
