//! Field predicates and the aggregate check run on resolved [`Settings`].
//!
//! Every violation is collected; nothing short-circuits, so an operator can
//! fix a broken configuration in one pass.

mod domain;
mod fields;

pub use domain::{is_valid_domain, is_valid_mx};
pub use fields::{MAX_AGE_LIMIT, is_valid_max_age, is_valid_mode};

pub(crate) use fields::parse_max_age;

use crate::config::Settings;
use domain::{check_domain, check_mx_hosts};
use fields::{check_max_age, check_mode};

/// Check `settings` against every policy invariant. Empty means valid.
///
/// Violations are ordered by field: domain, mx, mode, max_age.
pub fn validate(settings: &Settings) -> Vec<String> {
    let mut reasons = Vec::new();
    check_domain(&settings.domain, settings.verbose, &mut reasons);
    check_mx_hosts(&settings.mx, settings.verbose, &mut reasons);
    check_mode(&settings.mode, settings.verbose, &mut reasons);
    check_max_age(&settings.max_age, settings.verbose, &mut reasons);
    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            domain: "example.com".into(),
            mode: "testing".into(),
            mx: vec!["mail.example.com".into()],
            max_age: "86400".into(),
            port: "8080".into(),
            verbose: false,
        }
    }

    #[test]
    fn accepts_basic() {
        let reasons = validate(&settings());
        assert!(reasons.is_empty(), "{reasons:?}");
    }

    #[test]
    fn empty_mx_list_is_valid() {
        let mut s = settings();
        s.mx.clear();
        assert!(validate(&s).is_empty());
    }

    #[test]
    fn reports_all_violations_not_just_the_first() {
        let mut s = settings();
        s.mode = String::new();
        s.max_age = "0".into();
        let reasons = validate(&s);
        assert_eq!(reasons.len(), 2, "{reasons:?}");
        assert_eq!(reasons[0], "mode is empty");
        assert!(reasons[1].starts_with("invalid max_age '0'"));
    }

    #[test]
    fn everything_wrong_at_once() {
        let s = Settings {
            domain: "localhost".into(),
            mode: "strict".into(),
            mx: vec![".mx.example.com".into()],
            max_age: "31536000".into(),
            port: "8080".into(),
            verbose: true,
        };
        let reasons = validate(&s);
        assert_eq!(reasons.len(), 4, "{reasons:?}");
        assert!(reasons[0].contains("localhost"));
        assert!(reasons[1].contains(".mx.example.com"));
        assert!(reasons[2].contains("strict"));
        assert!(reasons[3].contains("31536000"));
    }

    #[test]
    fn validation_is_deterministic() {
        let mut s = settings();
        s.domain = ".example.com".into();
        assert_eq!(validate(&s), validate(&s));
    }
}
