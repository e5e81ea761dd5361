use std::io::Write;

#[test]
fn options_load_from_toml_file() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("xd.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        "block_marker = \"#\"\nsplit_character = \"/\"\nstrict_linting = true\n"
    )
    .unwrap();

    let options = xd_cli::load_options(&path).expect("load failed");
    assert_eq!(options.block_marker, '#');
    assert_eq!(options.split_character, '/');
    assert!(options.strict_linting);
    // Untouched keys keep their defaults
    assert_eq!(options.open_marker, '_');
    assert!(options.lint_enabled);
    assert_eq!(options.required_meta_keys, vec!["Title", "Author"]);
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let result = xd_cli::load_options(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(xd_cli::ConfigError::Io(_))));
}

#[test]
fn malformed_config_is_an_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("xd.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "block_marker = 17\n").unwrap();

    let result = xd_cli::load_options(&path);
    assert!(matches!(result, Err(xd_cli::ConfigError::Toml(_))));
}
