//! Tests for config functionality.

use crate::config::Config;
use crate::error::CrewError;
use crate::sections::ParsedSections;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.cache_dir, PathBuf::from(".cache"));
    assert_eq!(config.output_root, PathBuf::from("."));
    assert_eq!(config.agents_file, PathBuf::from("agents.yaml"));
    assert_eq!(config.runs_dir, PathBuf::from(".cache/runs"));
    assert_eq!(config.events_file, PathBuf::from(".cache/events.ndjson"));
    assert_eq!(config.template, None);
    assert!(config.use_template);
    assert_eq!(config.title_format, "{topic} Homepage");
    assert_eq!(config.stylesheet_name, "styles.css");
    assert_eq!(config.script_name, "script.js");
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
cache_dir: state
title_format: "Welcome to {topic}"
use_template: false
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.cache_dir, PathBuf::from("state"));
    assert_eq!(config.title_format, "Welcome to {topic}");
    assert!(!config.use_template);
    assert_eq!(config.stylesheet_name, "styles.css");
}

#[test]
fn test_unknown_fields_ignored() {
    let yaml = "future_option: 42\nscript_name: app.js\n";
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.script_name, "app.js");
}

#[test]
fn test_invalid_yaml_is_user_error() {
    let result = Config::from_yaml("cache_dir: [unclosed");
    assert!(matches!(result, Err(CrewError::UserError(_))));
}

#[test]
fn test_validate_title_format_unknown_variable() {
    let err = Config::from_yaml("title_format: \"{name} page\"").unwrap_err();
    assert!(err.to_string().contains("title_format"));
}

#[test]
fn test_validate_rejects_path_like_names() {
    for yaml in [
        "stylesheet_name: css/site.css",
        "script_name: \"\"",
        "script_name: \"{x}.js\"",
        "stylesheet_name: ..",
        "script_name: index.html",
    ] {
        assert!(
            matches!(Config::from_yaml(yaml), Err(CrewError::UserError(_))),
            "accepted: {yaml}"
        );
    }
}

#[test]
fn test_validate_rejects_identical_names() {
    let yaml = "stylesheet_name: site.txt\nscript_name: site.txt\n";
    let err = Config::from_yaml(yaml).unwrap_err();
    assert!(err.to_string().contains("must differ"));
}

#[test]
fn test_yaml_round_trip() {
    let mut config = Config::default();
    config.template = Some(PathBuf::from("page.html"));
    config.title_format = "{topic}".to_string();

    let parsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_load_or_default_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_or_default(temp_dir.path().join("crew.yaml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_reads_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("crew.yaml");
    std::fs::write(&path, "output_root: site\n").unwrap();

    let config = Config::load_or_default(&path).unwrap();
    assert_eq!(config.output_root, PathBuf::from("site"));
}

#[test]
fn test_load_missing_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::load(temp_dir.path().join("nope.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn test_page_title() {
    let config = Config::default();
    assert_eq!(config.page_title("Travel"), "Travel Homepage");
}

#[test]
fn test_derived_directories() {
    let config = Config::from_yaml("output_root: out\nruns_dir: runs\n").unwrap();

    assert_eq!(
        config.landing_dir("Food & Drink"),
        Path::new("out/food___drink_landing_page")
    );
    assert_eq!(config.run_dir("Developer Tools"), Path::new("runs/developer_tools"));
}

#[test]
fn test_html_template_selection() {
    let sections = ParsedSections::default();
    let mut config = Config::default();
    assert!(config.html_template(&sections).unwrap().is_some());

    config.use_template = false;
    assert!(config.html_template(&sections).unwrap().is_none());

    config.use_template = true;
    config.template = Some(PathBuf::from("/definitely/missing/template.html"));
    assert!(config.html_template(&sections).is_err());
}

#[test]
fn test_builtin_template_links_only_written_files() {
    let config = Config::from_yaml("stylesheet_name: site.css\nscript_name: app.js\n").unwrap();
    let css_only = ParsedSections {
        css: vec!["p {}".to_string()],
        ..Default::default()
    };

    let page = config
        .html_template(&css_only)
        .unwrap()
        .unwrap()
        .process("<p>x</p>", "T")
        .unwrap();

    assert!(page.contains(r#"href="site.css""#));
    assert!(!page.contains("app.js"));
}

#[test]
fn test_writer_uses_configured_names() {
    let config = Config::from_yaml("stylesheet_name: site.css\nscript_name: app.js\n").unwrap();
    let writer = config.writer();

    assert_eq!(writer.file_name(crate::sections::Section::Css), "site.css");
    assert_eq!(writer.file_name(crate::sections::Section::Js), "app.js");
}
