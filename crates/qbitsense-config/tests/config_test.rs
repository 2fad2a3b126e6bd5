#![allow(clippy::unwrap_used)]
// Loading and saving config files on disk.

use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::ExposeSecret;

use qbitsense_config::{
    Config, ConfigError, Profile, load_config_from, profile_to_client_config, save_config_to,
};
use qbitsense_core::TlsVerification;

const SAMPLE: &str = r#"
default_profile = "nas"

[defaults]
output = "json"
timeout = 10

[profiles.nas]
url = "http://192.168.1.10:8080"
username = "admin"
password = "adminadmin"
name = "NAS"
poll_interval = 15

[profiles.seedbox]
url = "https://seedbox.example.com/qbittorrent/"
username = "me"
password = "secret"
insecure = true
timeout = 60
"#;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();

    assert_eq!(cfg.default_profile.as_deref(), Some("default"));
    assert_eq!(cfg.defaults.output, "table");
    assert_eq!(cfg.defaults.timeout, 30);
    assert_eq!(cfg.defaults.poll_interval, 30);
    assert!(cfg.profiles.is_empty());
}

#[test]
fn loads_profiles_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, SAMPLE).unwrap();

    let cfg = load_config_from(&path).unwrap();
    assert_eq!(cfg.default_profile.as_deref(), Some("nas"));
    assert_eq!(cfg.defaults.output, "json");
    assert_eq!(cfg.defaults.timeout, 10);
    assert_eq!(cfg.profile_names(), vec!["nas", "seedbox"]);

    let nas = cfg.profile("nas").unwrap();
    assert_eq!(nas.url, "http://192.168.1.10:8080");
    assert_eq!(nas.poll_interval, Some(15));
}

#[test]
fn profile_translates_to_client_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, SAMPLE).unwrap();
    let cfg = load_config_from(&path).unwrap();

    let seedbox = cfg.profile("seedbox").unwrap();
    let client = profile_to_client_config(seedbox, "seedbox", &cfg.defaults).unwrap();

    assert_eq!(client.url.as_str(), "https://seedbox.example.com/qbittorrent/");
    assert_eq!(client.credentials.username, "me");
    assert_eq!(client.tls, TlsVerification::DangerAcceptInvalid);
    assert_eq!(client.timeout, Duration::from_secs(60));
    assert_eq!(client.poll_interval, Duration::from_secs(30));
    assert_eq!(client.identity.id, "seedbox");
    assert_eq!(client.identity.name, "qBittorrent");
}

#[test]
fn profile_without_password_env_uses_a_resolved_secret() {
    let profile = Profile {
        url: "http://localhost:8080".into(),
        username: Some("admin".into()),
        password: Some("adminadmin".into()),
        ..Profile::default()
    };
    let client = profile_to_client_config(&profile, "local", &Config::default().defaults).unwrap();
    // Env or keyring may take precedence on a developer machine; never empty.
    assert!(!client.credentials.password.expose_secret().is_empty());
}

#[test]
fn invalid_url_is_rejected() {
    let profile = Profile {
        url: "localhost:8080".into(),
        username: Some("admin".into()),
        password: Some("x".into()),
        ..Profile::default()
    };
    let err = profile_to_client_config(&profile, "bad", &Config::default().defaults).unwrap_err();
    assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "url"));
}

#[test]
fn invalid_toml_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "profiles = 3\n").unwrap();

    assert!(matches!(
        load_config_from(&path),
        Err(ConfigError::Figment(_))
    ));
}

#[test]
fn save_then_load_keeps_profiles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut cfg = Config::default();
    cfg.profiles.insert(
        "default".into(),
        Profile {
            url: "http://127.0.0.1:8080".into(),
            username: Some("admin".into()),
            name: Some("Home".into()),
            ..Profile::default()
        },
    );
    save_config_to(&cfg, &path).unwrap();

    let loaded = load_config_from(&path).unwrap();
    let profile = loaded.profile("default").unwrap();
    assert_eq!(profile.name.as_deref(), Some("Home"));
    assert_eq!(profile.password, None);
}
