// End-to-end tests for the injection run against a deterministic provider.

use std::fs;
use tempfile::TempDir;

use seedvec::embedding::MockProvider;
use seedvec::{run_inject_with_provider, SeedvecConfig};

const SEED: &str = "\
-- products seed data
INSERT INTO categories (name) VALUES ('Tools');
INSERT INTO products (a, b) VALUES
((SELECT id FROM categories WHERE name = 'X'), 'C1', 'Widget', 'A widget.'),
('C2', 'Gadget', 'A gadget.', 9.99);
-- trailing comment
";

fn config_for(file: &std::path::Path) -> SeedvecConfig {
    let mut config = SeedvecConfig::default();
    config.input.file = file.to_string_lossy().to_string();
    config
}

fn write_seed(content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("seed.sql");
    fs::write(&path, content).expect("write seed");
    (dir, path)
}

#[test]
fn test_injection_rewrites_file_and_keeps_backup() {
    let (dir, path) = write_seed(SEED);
    let provider = MockProvider::new(vec![0.1, 0.2]);

    let summary = run_inject_with_provider(&config_for(&path), &provider).unwrap();

    assert_eq!(summary.changed, 2);
    assert!(summary.warnings.is_empty());

    let backup = summary.backup.expect("backup should exist");
    assert_eq!(backup, dir.path().join("seed.sql.bak"));
    assert_eq!(fs::read_to_string(&backup).unwrap(), SEED);

    let rewritten = fs::read_to_string(&path).unwrap();
    assert!(rewritten.contains("INSERT INTO products (a, b, embedding) VALUES"));
    assert!(rewritten.contains("'A widget.', '[0.1, 0.2]'),"));
    assert!(rewritten.contains("9.99, '[0.1, 0.2]');"));
    // The categories insert and the comments are untouched.
    assert!(rewritten.contains("INSERT INTO categories (name) VALUES ('Tools');"));
    assert!(rewritten.contains("-- trailing comment"));

    // Line counts match.
    assert_eq!(rewritten.lines().count(), SEED.lines().count());
}

#[test]
fn test_second_run_is_a_no_op() {
    let (_dir, path) = write_seed(SEED);
    let provider = MockProvider::new(vec![0.1, 0.2]);

    run_inject_with_provider(&config_for(&path), &provider).unwrap();
    let after_first = fs::read_to_string(&path).unwrap();
    let calls_after_first = provider.call_count();

    let summary = run_inject_with_provider(&config_for(&path), &provider).unwrap();

    assert_eq!(summary.changed, 0);
    assert!(summary.backup.is_none());
    assert_eq!(provider.call_count(), calls_after_first);
    assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
}

#[test]
fn test_dry_run_writes_nothing() {
    let (dir, path) = write_seed(SEED);
    let provider = MockProvider::new(vec![0.5]);

    let mut config = config_for(&path);
    config.output.dry_run = true;

    let summary = run_inject_with_provider(&config, &provider).unwrap();

    assert_eq!(summary.changed, 2);
    assert!(summary.backup.is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), SEED);
    assert!(!dir.path().join("seed.sql.bak").exists());
}

#[test]
fn test_failing_provider_leaves_file_untouched() {
    let (dir, path) = write_seed(SEED);
    let provider = MockProvider::failing();

    let summary = run_inject_with_provider(&config_for(&path), &provider).unwrap();

    assert_eq!(summary.changed, 0);
    assert_eq!(summary.warnings.len(), 2);
    assert!(summary.backup.is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), SEED);
    assert!(!dir.path().join("seed.sql.bak").exists());
}

#[test]
fn test_missing_file_is_a_fatal_error() {
    let dir = TempDir::new().unwrap();
    let provider = MockProvider::new(vec![0.1]);
    let config = config_for(&dir.path().join("absent.sql"));

    let result = run_inject_with_provider(&config, &provider);
    assert!(result.is_err());
    assert_eq!(provider.call_count(), 0);
}

#[test]
fn test_custom_table_and_column() {
    let seed = "\
INSERT INTO items (a) VALUES
('I1', 'Thing', 'A thing.', 1);
";
    let (_dir, path) = write_seed(seed);
    let provider = MockProvider::new(vec![1.5]);

    let mut config = config_for(&path);
    config.input.table = "items".to_string();
    config.input.column = "vec".to_string();

    let summary = run_inject_with_provider(&config, &provider).unwrap();
    assert_eq!(summary.changed, 1);

    let rewritten = fs::read_to_string(&path).unwrap();
    assert!(rewritten.contains("INSERT INTO items (a, vec) VALUES"));
    assert!(rewritten.contains("'A thing.', 1, '[1.5]');"));
}
