use std::path::Path;

use jad::{canonicalize_or_current, init_logging, verbosity_level};
use log::LevelFilter;
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let cwd = std::env::current_dir().expect("cwd");
    assert_eq!(canonicalize_or_current(".").expect("canonicalize"), cwd);
}

#[test]
fn canonicalize_or_current_resolves_existing_path() {
    let tmp = tempdir().expect("tempdir");
    let nested = tmp.path().join("nested");
    std::fs::create_dir_all(&nested).expect("create nested");

    let result = canonicalize_or_current(nested.to_str().unwrap()).expect("canonicalize");
    assert_eq!(result, nested.canonicalize().expect("canonicalize nested"));
}

#[test]
fn canonicalize_or_current_joins_missing_relative_path() {
    let result = canonicalize_or_current("does/not/exist").expect("canonicalize");
    assert!(result.is_absolute());
    assert!(result.ends_with(Path::new("does/not/exist")));
}

#[test]
fn verbosity_flags_map_to_levels() {
    assert_eq!(verbosity_level(0), LevelFilter::Warn);
    assert_eq!(verbosity_level(1), LevelFilter::Info);
    assert_eq!(verbosity_level(2), LevelFilter::Debug);
    assert_eq!(verbosity_level(5), LevelFilter::Trace);
}

#[test]
fn logging_can_be_initialized_more_than_once() {
    init_logging(0);
    init_logging(2);
    log::debug!("still logging");
}
