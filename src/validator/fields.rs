use crate::config::Mode;

/// Exclusive upper bound for `max_age`: one year, in seconds.
pub const MAX_AGE_LIMIT: u64 = 31_536_000;

pub fn is_valid_mode(mode: &str) -> bool {
    mode.parse::<Mode>().is_ok()
}

/// `max_age` must be an integer strictly between 0 and [`MAX_AGE_LIMIT`].
pub fn is_valid_max_age(max_age: &str) -> bool {
    parse_max_age(max_age).is_some()
}

pub(crate) fn parse_max_age(max_age: &str) -> Option<u64> {
    max_age
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0 && *secs < MAX_AGE_LIMIT)
}

pub(crate) fn check_mode(mode: &str, verbose: bool, reasons: &mut Vec<String>) {
    if mode.is_empty() {
        reasons.push("mode is empty".to_string());
    } else if !is_valid_mode(mode) {
        if verbose {
            tracing::debug!(mode, "invalid provided mode");
        }
        reasons.push(format!(
            "invalid mode '{mode}' - mode can be testing, enforce or none"
        ));
    }
}

pub(crate) fn check_max_age(max_age: &str, verbose: bool, reasons: &mut Vec<String>) {
    if max_age.is_empty() {
        reasons.push("max_age is empty".to_string());
    } else if !is_valid_max_age(max_age) {
        if verbose {
            tracing::debug!(max_age, "invalid provided max age");
        }
        reasons.push(format!(
            "invalid max_age '{max_age}' - max_age should be a number greater than 0 and less than {MAX_AGE_LIMIT} (1 year)"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn modes() {
        assert!(is_valid_mode("testing"));
        assert!(is_valid_mode("enforce"));
        assert!(is_valid_mode("none"));
        assert!(!is_valid_mode(""));
        assert!(!is_valid_mode("Enforce"));
        assert!(!is_valid_mode("report"));
    }

    #[test]
    fn max_age_boundaries() {
        assert!(!is_valid_max_age("0"));
        assert!(!is_valid_max_age("31536000"));
        assert!(is_valid_max_age("1"));
        assert!(is_valid_max_age("31535999"));
        assert!(!is_valid_max_age("-1"));
        assert!(!is_valid_max_age("1d"));
        assert!(!is_valid_max_age(""));
    }

    proptest! {
        #[test]
        fn max_age_in_open_range_is_valid(secs in 1u64..MAX_AGE_LIMIT) {
            prop_assert!(is_valid_max_age(&secs.to_string()));
        }

        #[test]
        fn max_age_at_or_above_limit_is_invalid(secs in MAX_AGE_LIMIT..u64::MAX) {
            prop_assert!(!is_valid_max_age(&secs.to_string()));
        }
    }
}
