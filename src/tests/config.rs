use super::{Config, Options, CONFIG_FILE};
use crate::error::Error;
use crate::scanner::ScanRules;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_defaults_without_file() {
    let dir = TempDir::new().unwrap();
    let cfg = Config::load(dir.path());

    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.scan_rules(), ScanRules::default());
    assert!(!cfg.folder_in_title);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE),
        "root_file = \"INDEX.md\"\nfolder_in_title = true\n",
    )
    .unwrap();

    let cfg = Config::load(dir.path());
    assert_eq!(cfg.root_file, "INDEX.md");
    assert!(cfg.folder_in_title);
    assert_eq!(cfg.file_extensions, vec!["md".to_string()]);
    assert_eq!(cfg.exclude_folders, Config::default().exclude_folders);
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE), "root_file = [").unwrap();

    assert_eq!(Config::load(dir.path()), Config::default());
}

#[test]
fn test_options_from_defaults() {
    let options = Options::new(
        "./",
        "./",
        Some("Summary".to_string()),
        None,
        &Config::default(),
    )
    .unwrap();

    assert_eq!(options.base_folder, PathBuf::from("./"));
    assert_eq!(options.docs_folder, PathBuf::from("./"));
    assert_eq!(options.section, "Summary");
    assert_eq!(options.heading_level, None);
    assert!(!options.dry_run);
}

#[test]
fn test_options_custom_values() {
    let cfg = Config {
        folder_in_title: true,
        ..Config::default()
    };
    let options = Options::new("folder", "subfolder", Some(" Docs ".to_string()), Some("3".to_string()), &cfg)
        .unwrap();

    assert_eq!(options.base_folder, PathBuf::from("folder"));
    assert_eq!(options.docs_folder, PathBuf::from("subfolder"));
    assert_eq!(options.section, "Docs");
    assert_eq!(options.heading_level, Some(3));
    assert!(options.style.folder_in_title);
}

#[test]
fn test_section_is_required() {
    let cfg = Config::default();
    for section in [None, Some(String::new()), Some("   ".to_string())] {
        let err = Options::new("./", "./", section, None, &cfg).unwrap_err();
        assert!(matches!(err, Error::MissingSection));
        assert_eq!(err.to_string(), "-s, --docsSection required");
    }
}

#[test]
fn test_heading_level_range() {
    let cfg = Config::default();
    for level in 1..=6u8 {
        let options =
            Options::new("./", "./", Some("S".to_string()), Some(level.to_string()), &cfg).unwrap();
        assert_eq!(options.heading_level, Some(level));
    }
    for level in ["0", "7", "9", "-1", "300"] {
        let err = Options::new("./", "./", Some("S".to_string()), Some(level.to_string()), &cfg)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidHeadingLevel(ref l) if l == level));
        assert_eq!(
            err.to_string(),
            "-l, --headingLevel is not set correctly, it must be an integer between 1 and 6"
        );
    }
}

#[test]
fn test_heading_level_must_be_an_integer() {
    let cfg = Config::default();
    for level in ["abc", "", "2.5", "99999999999999999999"] {
        let err = Options::new("./", "./", Some("S".to_string()), Some(level.to_string()), &cfg)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidHeadingLevel(ref l) if l == level));
    }

    let padded = Options::new("./", "./", Some("S".to_string()), Some(" 2 ".to_string()), &cfg)
        .unwrap();
    assert_eq!(padded.heading_level, Some(2));
}
