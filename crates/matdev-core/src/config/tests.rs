use super::*;

#[test]
fn test_defaults_when_file_missing() {
    let cfg = load("/nonexistent/__matdev_config__.toml").unwrap();
    assert_eq!(cfg.matdev.name, "MATDEV");
    assert!(!cfg.autoreact.message_reactions);
    assert!(!cfg.autoreact.status_reactions);
    assert_eq!(cfg.autoreact.message_delay, DelayMode::Randomized);
    assert_eq!(cfg.autoreact.ledger_sweep_hours, 6);
    assert_eq!(cfg.commands.prefix, ".");
}

#[test]
fn test_autoreact_from_toml() {
    let toml_str = r#"
        message_reactions = true
        status_reactions = true
        message_delay = "immediate"
    "#;
    let cfg: AutoReactConfig = toml::from_str(toml_str).unwrap();
    assert!(cfg.message_reactions);
    assert!(cfg.status_reactions);
    assert_eq!(cfg.message_delay, DelayMode::Immediate);
    assert_eq!(cfg.status_delay, DelayMode::Randomized);
    assert_eq!(cfg.ledger_sweep_hours, 6);
}

#[test]
fn test_unknown_delay_mode_rejected() {
    let err = toml::from_str::<AutoReactConfig>(r#"message_delay = "slow""#);
    assert!(err.is_err());
}

#[test]
fn test_enabled_and_delay_per_kind() {
    let cfg = AutoReactConfig {
        message_reactions: true,
        status_reactions: false,
        message_delay: DelayMode::Immediate,
        status_delay: DelayMode::Randomized,
        ledger_sweep_hours: 6,
    };
    assert!(cfg.enabled_for(MessageKind::Chat));
    assert!(!cfg.enabled_for(MessageKind::Status));
    assert_eq!(cfg.delay_for(MessageKind::Chat), DelayMode::Immediate);
    assert_eq!(cfg.delay_for(MessageKind::Status), DelayMode::Randomized);
}

#[test]
fn test_load_full_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[matdev]
data_dir = "/tmp/matdev"

[autoreact]
message_reactions = true

[commands]
prefix = "!"
owners = ["5511999887766@s.whatsapp.net"]

[channel.bridge]
enabled = true
base_url = "http://localhost:4000"

[api]
enabled = true
port = 8080
"#,
    )
    .unwrap();

    let cfg = load(path.to_str().unwrap()).unwrap();
    assert_eq!(cfg.matdev.data_dir, "/tmp/matdev");
    assert!(cfg.autoreact.message_reactions);
    assert_eq!(cfg.commands.prefix, "!");
    assert_eq!(cfg.commands.owners.len(), 1);
    let bridge = cfg.channel.bridge.unwrap();
    assert!(bridge.enabled);
    assert_eq!(bridge.base_url, "http://localhost:4000");
    assert!(cfg.channel.console.is_none());
    assert_eq!(cfg.api.port, 8080);
    assert_eq!(cfg.api.host, "127.0.0.1");
}

#[test]
fn test_load_invalid_toml_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[autoreact\nmessage_reactions = ").unwrap();
    let err = load(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, MatdevError::Config(_)));
}

#[test]
fn test_patch_replaces_existing_key() {
    let content = "[autoreact]\nmessage_reactions = false # toggled by .autoreact\n";
    let patched = patch_toml_key(content, "autoreact", "message_reactions", "true");
    assert_eq!(patched, "[autoreact]\nmessage_reactions = true\n");
}

#[test]
fn test_patch_inserts_missing_key_after_header() {
    let content = "[matdev]\nname = \"bot\"\n\n[autoreact]\nstatus_reactions = true\n";
    let patched = patch_toml_key(content, "autoreact", "message_delay", "\"immediate\"");
    assert_eq!(
        patched,
        "[matdev]\nname = \"bot\"\n\n[autoreact]\nmessage_delay = \"immediate\"\nstatus_reactions = true\n"
    );
}

#[test]
fn test_patch_appends_missing_section() {
    let content = "[matdev]\nname = \"bot\"\n";
    let patched = patch_toml_key(content, "autoreact", "status_reactions", "true");
    assert_eq!(
        patched,
        "[matdev]\nname = \"bot\"\n\n[autoreact]\nstatus_reactions = true\n"
    );
}

#[test]
fn test_patch_does_not_touch_other_sections_or_prefixed_keys() {
    let content = "[autoreact]\nmessage_delay_note = 1\n\n[api]\nmessage_delay = 5\n";
    let patched = patch_toml_key(content, "autoreact", "message_delay", "\"randomized\"");
    assert!(patched.contains("message_delay_note = 1"));
    assert!(patched.contains("[api]\nmessage_delay = 5"));
    assert!(patched.contains("[autoreact]\nmessage_delay = \"randomized\""));
}

#[test]
fn test_patch_finds_header_with_comment_or_inner_spaces() {
    let commented = "[autoreact] # runtime toggles\nmessage_reactions = false\n";
    assert_eq!(
        patch_toml_key(commented, "autoreact", "message_reactions", "true"),
        "[autoreact] # runtime toggles\nmessage_reactions = true\n"
    );

    let spaced = "[ autoreact ]\nstatus_reactions = false\n";
    assert_eq!(
        patch_toml_key(spaced, "autoreact", "status_reactions", "true"),
        "[ autoreact ]\nstatus_reactions = true\n"
    );
}

#[test]
fn test_patch_autoreact_commented_header_still_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[autoreact] # runtime toggles\nmessage_reactions = false\n").unwrap();

    let cfg = AutoReactConfig {
        message_reactions: true,
        ..Default::default()
    };
    patch_autoreact(path.to_str().unwrap(), &cfg).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert_eq!(raw.matches("autoreact]").count(), 1);
    let loaded = load(path.to_str().unwrap()).unwrap();
    assert!(loaded.autoreact.message_reactions);
}

#[test]
fn test_patch_autoreact_round_trips_through_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "# my bot\n[matdev]\nname = \"bot\"\n\n[autoreact]\n# keep this comment\nledger_sweep_hours = 12\n",
    )
    .unwrap();

    let cfg = AutoReactConfig {
        message_reactions: true,
        status_reactions: true,
        message_delay: DelayMode::Immediate,
        status_delay: DelayMode::Randomized,
        ledger_sweep_hours: 12,
    };
    patch_autoreact(path.to_str().unwrap(), &cfg).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("# my bot"));
    assert!(raw.contains("# keep this comment"));

    let loaded = load(path.to_str().unwrap()).unwrap();
    assert_eq!(loaded.autoreact, cfg);
    assert_eq!(loaded.matdev.name, "bot");
}

#[test]
fn test_patch_autoreact_creates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.toml");
    let cfg = AutoReactConfig {
        status_reactions: true,
        ..Default::default()
    };
    patch_autoreact(path.to_str().unwrap(), &cfg).unwrap();
    let loaded = load(path.to_str().unwrap()).unwrap();
    assert!(loaded.autoreact.status_reactions);
    assert!(!loaded.autoreact.message_reactions);
}

#[test]
fn test_shellexpand_home() {
    if let Some(home) = std::env::var_os("HOME") {
        let expanded = shellexpand("~/.matdev");
        assert_eq!(expanded, format!("{}/.matdev", home.to_string_lossy()));
    }
    assert_eq!(shellexpand("/abs/path"), "/abs/path");
}
