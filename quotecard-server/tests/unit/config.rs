use super::*;

#[test]
fn defaults_follow_free_tier_and_housekeeping_limits() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.addr.port(), DEFAULT_PORT);
    assert_eq!(settings.quota.limit.get(), 5);
    assert_eq!(settings.quota.reset_after, Duration::from_secs(24 * 3600));
    assert_eq!(settings.output.max_files, 100);
    assert_eq!(settings.output.max_age, Duration::from_secs(24 * 3600));
    assert!(settings.quotes.fetch);
    assert_eq!(settings.quotes.zenquotes_url, DEFAULT_ZENQUOTES_URL);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());
    raw.quotes.fetch = Some(true);

    let overrides = ServeOverrides {
        port: Some(4321),
        log_level: Some("debug".to_string()),
        log_json: Some(true),
        offline: true,
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert!(matches!(settings.logging.format, LogFormat::Json));
    assert!(!settings.quotes.fetch);
}

#[test]
fn zero_limits_are_rejected() {
    let mut raw = RawSettings::default();
    raw.quota.limit = Some(0);
    let err = Settings::from_raw(raw).unwrap_err();
    assert!(err.to_string().contains("quota.limit"), "{err}");

    let mut raw = RawSettings::default();
    raw.output.max_files = Some(0);
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn invalid_log_level_is_reported() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("chatty".to_string());
    let err = Settings::from_raw(raw).unwrap_err();
    assert!(err.to_string().contains("logging.level"), "{err}");
}

#[test]
fn blank_watermark_text_is_ignored() {
    let mut raw = RawSettings::default();
    raw.assets.watermark_text = Some("   ".to_string());
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(settings.assets.watermark_text.is_none());
}

#[test]
fn file_source_is_layered_under_cli() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server.toml");
    std::fs::write(
        &path,
        "[server]\nport = 6100\n\n[quota]\nlimit = 9\n\n[output]\ndirectory = \"cards\"\n",
    )
    .unwrap();

    let cli = CliArgs {
        config_file: Some(path),
        overrides: ServeOverrides {
            port: Some(6200),
            ..Default::default()
        },
    };
    let settings = load(&cli).expect("valid settings");
    assert_eq!(settings.server.addr.port(), 6200);
    assert_eq!(settings.quota.limit.get(), 9);
    assert_eq!(settings.output.directory, PathBuf::from("cards"));
}
