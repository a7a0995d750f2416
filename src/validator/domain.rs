/// The policy domain: non-empty, not `localhost`, no leading or trailing dot.
/// Label syntax is left to DNS.
pub fn is_valid_domain(domain: &str) -> bool {
    is_valid_mx(domain) && !domain.eq_ignore_ascii_case("localhost")
}

/// An MX entry must be non-empty and must not start or end with a dot.
pub fn is_valid_mx(mx: &str) -> bool {
    !mx.is_empty() && !mx.starts_with('.') && !mx.ends_with('.')
}

/// Push the domain violation (if any) into `reasons`.
pub(crate) fn check_domain(domain: &str, verbose: bool, reasons: &mut Vec<String>) {
    if domain.is_empty() {
        reasons.push("domain is empty".to_string());
        return;
    }
    if !is_valid_domain(domain) {
        if verbose {
            tracing::debug!(domain, "invalid provided domain");
        }
        reasons.push(format!(
            "invalid domain '{domain}' - domain can not be localhost or start or end with a dot"
        ));
    }
}

/// One violation per bad entry, so the operator sees each of them.
pub(crate) fn check_mx_hosts(hosts: &[String], verbose: bool, reasons: &mut Vec<String>) {
    for (index, host) in hosts.iter().enumerate() {
        if is_valid_mx(host) {
            continue;
        }
        if verbose {
            tracing::debug!(mx = %host, index, "invalid provided mx record");
        }
        if host.is_empty() {
            reasons.push(format!("mx record #{} is empty", index + 1));
        } else {
            reasons.push(format!(
                "invalid mx record '{host}' - mx record can not start or end with a dot"
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_edge_cases() {
        assert!(!is_valid_domain("localhost"));
        assert!(!is_valid_domain("LocalHost"));
        assert!(!is_valid_domain(".example.com"));
        assert!(!is_valid_domain("example.com."));
        assert!(!is_valid_domain(""));
        assert!(is_valid_domain("example.com"));
    }

    #[test]
    fn mx_edge_cases() {
        assert!(is_valid_mx("mail.example.com"));
        assert!(is_valid_mx("localhost"));
        assert!(!is_valid_mx(""));
        assert!(!is_valid_mx(".mail.example.com"));
        assert!(!is_valid_mx("mail.example.com."));
    }

    #[test]
    fn every_bad_mx_is_reported() {
        let hosts = vec![
            "mail.example.com".to_string(),
            String::new(),
            "mx2.example.com.".to_string(),
        ];
        let mut reasons = vec![];
        check_mx_hosts(&hosts, false, &mut reasons);
        assert_eq!(reasons.len(), 2, "{reasons:?}");
        assert!(reasons[0].contains("#2"));
        assert!(reasons[1].contains("mx2.example.com."));
    }
}
