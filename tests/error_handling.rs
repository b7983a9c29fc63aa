// tests/error_handling.rs

use std::io::Write;
use std::path::Path;

use clap::Parser;
use mdxwatch::cli::CliArgs;
use mdxwatch::config::{load_and_validate, load_or_default, WatchConfiguration};
use mdxwatch::errors::MdxwatchError;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn test_full_config_file_is_applied() {
    let file = config_file(
        r#"
[watch]
root = "content"
pattern = "\\.md$"
output_extension = ".js"
precompile = false
post_process = false

[compile]
cmd = "cat"

[post_process]
format_cmd = "true {path}"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.watch.root.as_deref(), Some("content"));
    assert_eq!(cfg.compile.cmd.as_deref(), Some("cat"));

    let config = WatchConfiguration::builder("/ignored")
        .apply_config_file(Path::new("/site"), &cfg)
        .build()
        .unwrap();

    assert_eq!(config.root(), Path::new("/site/content"));
    assert_eq!(config.filter().as_str(), r"\.md$");
    assert!(!config.enable_precompile());
    assert!(!config.enable_post_process());
    assert_eq!(
        config.output_path_for(Path::new("/site/content/a.md")),
        Path::new("/site/content/a.js")
    );
}

#[test]
fn test_unknown_key_is_rejected() {
    let file = config_file(
        r#"
[watch]
patern = "\\.mdx$"
"#,
    );

    match load_and_validate(file.path()) {
        Err(MdxwatchError::TomlError(err)) => {
            assert!(err.to_string().contains("patern"), "got {err}");
        }
        other => panic!("expected TomlError, got {other:?}"),
    }
}

#[test]
fn test_invalid_pattern_returns_structured_error() {
    let file = config_file(
        r#"
[watch]
pattern = "(unclosed"
"#,
    );

    let result = load_and_validate(file.path());
    assert!(
        matches!(result, Err(MdxwatchError::InvalidPattern(_))),
        "got {result:?}"
    );
}

#[test]
fn test_bad_output_extension_is_rejected() {
    for ext in ["jsx", ".", "./x", ".a\\b"] {
        let file = config_file(&format!("[watch]\noutput_extension = {ext:?}\n"));
        let result = load_and_validate(file.path());
        assert!(
            matches!(result, Err(MdxwatchError::ConfigError(_))),
            "extension {ext:?}: got {result:?}"
        );
    }
}

#[test]
fn test_blank_commands_are_rejected() {
    let compile = config_file("[compile]\ncmd = \"   \"\n");
    match load_and_validate(compile.path()) {
        Err(MdxwatchError::ConfigError(msg)) => assert!(msg.contains("[compile].cmd")),
        other => panic!("expected ConfigError, got {other:?}"),
    }

    let format = config_file("[post_process]\nformat_cmd = \"\"\n");
    match load_and_validate(format.path()) {
        Err(MdxwatchError::ConfigError(msg)) => assert!(msg.contains("format_cmd")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_blank_root_is_rejected() {
    let file = config_file("[watch]\nroot = \" \"\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(MdxwatchError::ConfigError(_))
    ));
}

#[test]
fn test_missing_explicit_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_and_validate(dir.path().join("nope.toml"));
    assert!(matches!(result, Err(MdxwatchError::IoError(_))), "got {result:?}");
}

#[test]
fn test_missing_default_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = load_or_default(dir.path().join("Mdxwatch.toml")).unwrap();
    assert!(cfg.watch.root.is_none());
    assert!(cfg.compile.cmd.is_none());
    assert!(cfg.post_process.format_cmd.is_none());
}

#[test]
fn test_empty_file_is_valid() {
    let file = config_file("");
    let cfg = load_and_validate(file.path()).unwrap();
    assert!(cfg.watch.pattern.is_none());
}

#[test]
fn test_builder_defaults() {
    let config = WatchConfiguration::builder("/site").build().unwrap();

    assert_eq!(config.root(), Path::new("/site"));
    assert_eq!(config.filter().as_str(), r"\.mdx$");
    assert!(config.enable_precompile());
    assert!(config.enable_post_process());
    assert!(config.on_batch_compiled().is_none());
    assert_eq!(
        config.output_path_for(Path::new("/site/posts/hello.mdx")),
        Path::new("/site/posts/hello.jsx")
    );
}

#[test]
fn test_builder_rejects_empty_root_and_bad_pattern() {
    assert!(matches!(
        WatchConfiguration::builder("").build(),
        Err(MdxwatchError::ConfigError(_))
    ));
    assert!(matches!(
        WatchConfiguration::builder("/site").pattern("[").build(),
        Err(MdxwatchError::InvalidPattern(_))
    ));
    assert!(matches!(
        WatchConfiguration::builder("/site").output_extension("js").build(),
        Err(MdxwatchError::ConfigError(_))
    ));
}

#[test]
fn test_later_overrides_win_over_config_file() {
    let file = config_file("[watch]\npattern = \"\\\\.md$\"\nprecompile = false\n");
    let cfg = load_and_validate(file.path()).unwrap();

    let config = WatchConfiguration::builder("/site")
        .apply_config_file(Path::new("/site"), &cfg)
        .pattern(r"\.markdown$")
        .enable_precompile(true)
        .build()
        .unwrap();

    assert_eq!(config.filter().as_str(), r"\.markdown$");
    assert!(config.enable_precompile());
}

#[test]
fn test_compile_error_names_the_source() {
    let err = MdxwatchError::Compile {
        path: "posts/a.mdx".into(),
        source: anyhow::anyhow!("unexpected token"),
    };
    let msg = err.to_string();
    assert!(msg.contains("posts/a.mdx"), "got {msg}");
    assert!(msg.contains("unexpected token"), "got {msg}");
}

fn once_args(config: &Path) -> CliArgs {
    CliArgs::try_parse_from(["mdxwatch", "--config", config.to_str().unwrap(), "--once"]).unwrap()
}

#[tokio::test]
async fn test_once_rejects_config_with_precompile_disabled() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.mdx"), "a").unwrap();
    let config = dir.path().join("Mdxwatch.toml");
    std::fs::write(&config, "[watch]\nprecompile = false\n").unwrap();

    let err = mdxwatch::run(once_args(&config)).await.unwrap_err();

    assert!(format!("{err:#}").contains("--once"), "got {err:#}");
    assert!(!dir.path().join("a.jsx").exists());
}

#[tokio::test]
async fn test_once_precompiles_and_returns() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.mdx"), "a").unwrap();
    let config = dir.path().join("Mdxwatch.toml");
    std::fs::write(&config, "[watch]\nprecompile = true\n").unwrap();

    mdxwatch::run(once_args(&config)).await.unwrap();

    assert_eq!(std::fs::read_to_string(dir.path().join("a.jsx")).unwrap(), "a");
}
