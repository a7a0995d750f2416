//! End-to-end checks of the startup pipeline: sources -> config -> document.

use mta_sts_server::{
    DiscoveryError, Layer, LookupMx, MxRecord, PolicyRecord, Sources, StartupError, render,
    resolve_with,
};

struct FixedMx(Vec<MxRecord>);

impl LookupMx for FixedMx {
    fn lookup_mx(&self, _domain: &str) -> Result<Vec<MxRecord>, DiscoveryError> {
        Ok(self.0.clone())
    }
}

fn flags(domain: &str) -> Layer {
    Layer {
        domain: Some(domain.into()),
        ..Layer::default()
    }
}

#[test]
fn explicit_parameters_render_exact_document() {
    let sources = Sources {
        flags: Layer {
            mode: Some("testing".into()),
            mx: Some("mail.example.com".into()),
            max_age: Some("86400".into()),
            ..flags("example.com")
        },
        ..Sources::default()
    };
    let config = resolve_with(&sources, &FixedMx(Vec::new())).unwrap();
    assert_eq!(
        render(&config),
        "version: STSv1\nmode: testing\nmx: mail.example.com\nmax_age: 86400"
    );
}

#[test]
fn discovered_mx_loses_its_root_dot() {
    let sources = Sources {
        flags: flags("example.com"),
        ..Sources::default()
    };
    let dns = FixedMx(vec![MxRecord::new(10, "mail.example.com.")]);
    let config = resolve_with(&sources, &dns).unwrap();
    assert!(render(&config).contains("\nmx: mail.example.com\n"));
}

#[test]
fn domain_without_mx_publishes_none() {
    let sources = Sources {
        flags: flags("example.com"),
        ..Sources::default()
    };
    let config = resolve_with(&sources, &FixedMx(Vec::new())).unwrap();
    assert!(config.mx_hosts().is_empty());
    assert!(render(&config).contains("\nmx: none\n"));
}

#[test]
fn env_mode_overrides_file_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "domain: example.com\nmx: mail.example.com\nmode: testing\n").unwrap();

    let sources = Sources {
        flags: Layer::default(),
        env: Layer::from_env_with(|key| (key == "STS_MODE").then(|| "enforce".to_string())),
        file: Layer::from_file(&path).unwrap(),
    };
    let config = resolve_with(&sources, &FixedMx(Vec::new())).unwrap();
    assert_eq!(config.mode().as_str(), "enforce");
}

#[test]
fn every_violation_is_reported_together() {
    let sources = Sources {
        flags: Layer {
            domain: Some(".example.com".into()),
            mode: Some("strict".into()),
            mx: Some("mail.example.com.".into()),
            max_age: Some("0".into()),
            ..Layer::default()
        },
        ..Sources::default()
    };
    match resolve_with(&sources, &FixedMx(Vec::new())) {
        Err(StartupError::Config(err)) => assert_eq!(err.violations().len(), 4),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn rendering_is_stable_across_calls() {
    let sources = Sources {
        flags: Layer {
            mx: Some("mx1.example.com, mx2.example.com".into()),
            ..flags("example.com")
        },
        ..Sources::default()
    };
    let config = resolve_with(&sources, &FixedMx(Vec::new())).unwrap();
    let first = PolicyRecord::new(&config);
    let second = PolicyRecord::new(&config);
    assert_eq!(first, second);
    assert_eq!(first.as_str(), render(&config));
    assert!(first.as_str().contains("mx: mx1.example.com,mx2.example.com"));
}
