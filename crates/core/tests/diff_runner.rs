use std::fs;
use std::path::Path;

use jad_core::analysis::{DuplicatePolicy, MatchError};
use jad_core::services::backends::DirectoryBackend;
use jad_core::services::collect::{CollectError, EntryPolicy};
use jad_core::services::decompile::{default_decompiler_registry, DecompileError};
use jad_core::services::diff::{DiffError, DiffOptions, DiffProgress, DiffRequest, DiffRunner};
use std::sync::Mutex;
use tempfile::tempdir;

fn write_functions(dir: &Path, files: &[(&str, &str)]) {
    fs::create_dir_all(dir).unwrap();
    for (name, body) in files {
        fs::write(dir.join(name), body).unwrap();
    }
}

fn request(one: &Path, two: &Path, options: DiffOptions) -> DiffRequest {
    DiffRequest { binary_one: one.to_path_buf(), binary_two: two.to_path_buf(), options }
}

#[test]
fn directory_backend_diff_produces_mapping_and_summaries() {
    let temp = tempdir().unwrap();
    let one = temp.path().join("v1");
    let two = temp.path().join("v2");
    write_functions(
        &one,
        &[
            ("prog__add__00101000.c", "int add(int a, int b) {\n  return a + b;\n}\n"),
            ("prog__sub__00101020.c", "int sub(int a, int b) {\n  int r = a - b;\n  return r;\n}\n"),
            ("broken", "{ nope(); }"),
        ],
    );
    write_functions(
        &two,
        &[
            (
                "prog__FUN_00201000__00201000.c",
                "int FUN_00201000(int a, int b) {\n  return a + b;\n}\n",
            ),
            (
                "prog__FUN_00201040__00201040.c",
                "int FUN_00201040(int a, int b) {\n  int r = a - b;\n  return r + 1;\n}\n",
            ),
        ],
    );

    let outcome = DiffRunner::new(&DirectoryBackend)
        .run(&request(&one, &two, DiffOptions::default()))
        .expect("diff");
    let report = &outcome.report;

    assert_eq!(report.backend, "directory");
    assert_eq!(report.matches.len(), 2);
    assert_eq!(report.matches["add"].matched_function_name, "FUN_00201000");
    assert_eq!(report.matches["add"].confidence, 100);
    assert_eq!(report.matches["sub"].matched_function_name, "FUN_00201040");
    assert!(report.matches["sub"].confidence < 100);

    assert_eq!(report.binary_one.name, "v1");
    assert_eq!(report.binary_one.function_count, 2);
    assert_eq!(report.binary_one.rejected.len(), 1);
    assert!(report.binary_one.sha256.is_none());
    assert_eq!(report.binary_two.function_count, 2);
    assert_eq!(outcome.functions_one.len(), 2);
    assert_eq!(outcome.functions_two.len(), 2);
}

#[test]
fn empty_inputs_complete_successfully() {
    let temp = tempdir().unwrap();
    let one = temp.path().join("one");
    let two = temp.path().join("two");
    write_functions(&one, &[("prog__main.c", "int main() { return 0; }")]);
    write_functions(&two, &[]);

    let outcome = DiffRunner::new(&DirectoryBackend)
        .run(&request(&one, &two, DiffOptions::default()))
        .expect("diff");
    assert_eq!(outcome.report.matches.len(), 1);
    assert!(outcome.report.matches["main"].is_unmatched());
    assert_eq!(outcome.report.matches["main"].confidence, 0);

    let outcome = DiffRunner::new(&DirectoryBackend)
        .run(&request(&two, &one, DiffOptions::default()))
        .expect("diff");
    assert!(outcome.report.matches.is_empty());
}

#[test]
fn progress_reports_total_and_each_function() {
    let temp = tempdir().unwrap();
    let one = temp.path().join("one");
    let two = temp.path().join("two");
    write_functions(&one, &[("p__a.c", "{ a(); }"), ("p__b.c", "{ b(); }"), ("p__c.c", "{ c(); }")]);
    write_functions(&two, &[("q__x.c", "{ a(); }")]);

    let events = Mutex::new(Vec::new());
    DiffRunner::new(&DirectoryBackend)
        .run_with_progress(&request(&one, &two, DiffOptions::default()), |event| {
            events.lock().unwrap().push(event);
        })
        .expect("diff");

    let events = events.into_inner().unwrap();
    assert_eq!(events[0], DiffProgress::MatchingStarted { total: 3 });
    assert_eq!(events.iter().filter(|e| **e == DiffProgress::FunctionMatched).count(), 3);
}

#[test]
fn reject_duplicates_fails_the_run() {
    let temp = tempdir().unwrap();
    let one = temp.path().join("one");
    let two = temp.path().join("two");
    write_functions(&one, &[("p__f__1.c", "{ alpha(); }"), ("p__f__2.c", "{ omega(); }")]);
    write_functions(&two, &[("q__g_alpha.c", "{ alpha(); }"), ("q__g_omega.c", "{ omega(); }")]);

    let options = DiffOptions { duplicates: DuplicatePolicy::Reject, ..DiffOptions::default() };
    let err = DiffRunner::new(&DirectoryBackend).run(&request(&one, &two, options)).unwrap_err();
    assert!(matches!(err, DiffError::Match(MatchError::DuplicateFunctionName(_))));

    // Default policy keeps the function discovered last.
    let outcome = DiffRunner::new(&DirectoryBackend)
        .run(&request(&one, &two, DiffOptions::default()))
        .expect("diff");
    assert_eq!(outcome.report.matches["f"].matched_function_name, "g_omega");
}

#[test]
fn abort_policy_propagates_bad_entries() {
    let temp = tempdir().unwrap();
    let one = temp.path().join("one");
    let two = temp.path().join("two");
    write_functions(&one, &[("onlyonesegment", "{ x(); }")]);
    write_functions(&two, &[]);

    let options = DiffOptions { on_bad_entry: EntryPolicy::Abort, ..DiffOptions::default() };
    let err = DiffRunner::new(&DirectoryBackend).run(&request(&one, &two, options)).unwrap_err();
    assert!(matches!(err, DiffError::Collect(CollectError::Entry(_))));
}

#[test]
fn missing_input_is_reported_as_missing_binary() {
    let temp = tempdir().unwrap();
    let err = DiffRunner::new(&DirectoryBackend)
        .run(&request(&temp.path().join("nope"), temp.path(), DiffOptions::default()))
        .unwrap_err();
    assert!(matches!(err, DiffError::Decompile(DecompileError::MissingBinary(_))));
}

#[test]
fn registry_lists_backends_and_rejects_unknown_names() {
    let registry = default_decompiler_registry();
    assert!(registry.names().contains(&"directory".to_string()));
    assert!(registry.get("directory").is_some());

    let err = registry.require("ida").err().expect("unknown backend");
    assert!(matches!(err, DecompileError::MissingBackend(_)));
    assert!(err.to_string().contains("directory"));
}
