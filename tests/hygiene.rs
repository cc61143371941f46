//! Hygiene: scans production sources for panics and silently dropped errors.
//!
//! Each pattern has a budget, currently zero everywhere. Fix an existing hit
//! before adding a new one; budgets only go down.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

struct Rule {
    pattern: &'static str,
    budget: usize,
    /// Files (path suffixes) the rule does not apply to.
    exempt: &'static [&'static str],
}

// Panics.
const UNWRAP: Rule = Rule { pattern: ".unwrap()", budget: 0, exempt: &[] };
const EXPECT: Rule = Rule { pattern: ".expect(", budget: 0, exempt: &[] };
const PANIC: Rule = Rule { pattern: "panic!(", budget: 0, exempt: &[] };
const UNREACHABLE: Rule = Rule { pattern: "unreachable!(", budget: 0, exempt: &[] };
const TODO: Rule = Rule { pattern: "todo!(", budget: 0, exempt: &[] };
const UNIMPLEMENTED: Rule = Rule { pattern: "unimplemented!(", budget: 0, exempt: &[] };

// Silent loss.
const SILENT_DISCARD: Rule = Rule { pattern: "let _ =", budget: 0, exempt: &[] };
const DOT_OK: Rule = Rule { pattern: ".ok()", budget: 0, exempt: &[] };

// Style / structure.
const ALLOW_DEAD_CODE: Rule = Rule { pattern: "#[allow(dead_code)]", budget: 0, exempt: &[] };
// The library logs through tracing; only the binary talks to the terminal.
const PRINTLN: Rule = Rule { pattern: "println!(", budget: 0, exempt: &["main.rs"] };
const EPRINTLN: Rule = Rule { pattern: "eprintln!(", budget: 0, exempt: &["main.rs"] };

/// Production `.rs` files under `src/`. `*_test.rs` files are skipped.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") || path_str.ends_with("test_support.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

/// Per-file hit counts for `rule`, skipping exempt files.
fn hits(files: &[SourceFile], rule: &Rule) -> Vec<(String, usize)> {
    files
        .iter()
        .filter(|file| !rule.exempt.iter().any(|suffix| file.path.ends_with(suffix)))
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(rule.pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn check(rule: &Rule) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found; run from the crate root");
    let hits = hits(&files, rule);
    let count: usize = hits.iter().map(|(_, c)| c).sum();
    let listing = hits.iter().map(|(path, c)| format!("  {path}: {c}")).collect::<Vec<_>>().join("\n");
    assert!(
        count <= rule.budget,
        "`{}` budget exceeded: found {count}, max {}.\n{listing}",
        rule.pattern,
        rule.budget
    );
}

#[test]
fn unwrap_budget() {
    check(&UNWRAP);
}

#[test]
fn expect_budget() {
    check(&EXPECT);
}

#[test]
fn panic_budget() {
    check(&PANIC);
}

#[test]
fn unreachable_budget() {
    check(&UNREACHABLE);
}

#[test]
fn todo_budget() {
    check(&TODO);
}

#[test]
fn unimplemented_budget() {
    check(&UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    check(&SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    check(&DOT_OK);
}

#[test]
fn allow_dead_code_budget() {
    check(&ALLOW_DEAD_CODE);
}

#[test]
fn println_outside_binary_budget() {
    check(&PRINTLN);
}

#[test]
fn eprintln_outside_binary_budget() {
    check(&EPRINTLN);
}
