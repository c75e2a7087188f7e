use std::fs;

use jad_core::services::collect::{
    collect_functions, discover_entries, load_function, CollectError, EntryError, EntryPolicy,
};
use tempfile::tempdir;

#[test]
fn discovery_order_is_sorted_by_file_name() {
    let dir = tempdir().unwrap();
    for name in ["prog__zeta.c", "prog__alpha.c", "prog__mid__0010.c"] {
        fs::write(dir.path().join(name), "{}").unwrap();
    }
    fs::create_dir(dir.path().join("prog__subdir")).unwrap();

    let names: Vec<String> = discover_entries(dir.path())
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["prog__alpha.c", "prog__mid__0010.c", "prog__zeta.c"]);
}

#[test]
fn load_function_reads_text_and_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prog__main__00101000.c");
    fs::write(&path, "int main(void) {\n  return 0;\n}\n").unwrap();

    let function = load_function(&path).unwrap();
    assert_eq!(function.binary_name, "prog");
    assert_eq!(function.function_name, "main");
    assert_eq!(function.version_tag, vec!["00101000".to_string()]);
    assert_eq!(function.canonical_body(), "return 0;");
}

#[test]
fn malformed_name_is_a_per_entry_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("onlyonesegment");
    fs::write(&path, "{ x(); }").unwrap();

    let err = load_function(&path).unwrap_err();
    assert!(matches!(err, EntryError::MalformedFunctionName { .. }));
    assert_eq!(err.path(), path.as_path());
}

#[test]
fn invalid_utf8_is_unreadable_input() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prog__bad.c");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x7b]).unwrap();

    let err = load_function(&path).unwrap_err();
    assert!(matches!(err, EntryError::UnreadableInput { .. }));
}

fn mixed_dir() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("prog__b.c"), "{ b(); }").unwrap();
    fs::write(dir.path().join("prog__a__0010.c"), "{ a(); }").unwrap();
    fs::write(dir.path().join("prog__bad.c"), [0xffu8, 0xfe]).unwrap();
    fs::write(dir.path().join("onlyonesegment"), "{ z(); }").unwrap();
    dir
}

#[test]
fn skip_policy_keeps_good_entries_and_records_rejects() {
    let dir = mixed_dir();
    let collection = collect_functions(dir.path(), EntryPolicy::Skip).unwrap();

    let names: Vec<&str> =
        collection.functions.iter().map(|f| f.function_name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(collection.rejected.len(), 2);
    assert!(collection.rejected.iter().any(|r| r.path.ends_with("onlyonesegment")));
    assert!(collection.rejected.iter().any(|r| r.reason.contains("Unreadable")));
}

#[test]
fn abort_policy_fails_on_first_bad_entry() {
    let dir = mixed_dir();
    let err = collect_functions(dir.path(), EntryPolicy::Abort).unwrap_err();
    // "onlyonesegment" sorts before the "prog__" files.
    assert!(matches!(err, CollectError::Entry(EntryError::MalformedFunctionName { .. })));
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let err = collect_functions(&dir.path().join("nope"), EntryPolicy::Skip).unwrap_err();
    assert!(matches!(err, CollectError::ReadDir { .. }));
}

#[test]
fn empty_directory_yields_empty_collection() {
    let dir = tempdir().unwrap();
    let collection = collect_functions(dir.path(), EntryPolicy::Abort).unwrap();
    assert!(collection.functions.is_empty());
    assert!(collection.rejected.is_empty());
}
