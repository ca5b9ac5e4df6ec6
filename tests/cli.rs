use std::process::{Command, Output};

fn pseudotrace(args: &[&str]) -> Output {
    let dir = tempfile::tempdir().expect("temp dir");
    Command::new(env!("CARGO_BIN_EXE_pseudotrace"))
        .current_dir(dir.path())
        .args(args)
        .env_remove("PSEUDOTRACE_MAX_STEPS")
        .env_remove("PSEUDOTRACE_CATALOG")
        .env_remove("PSEUDOTRACE_LOG")
        .output()
        .expect("failed to run pseudotrace")
}

#[test]
fn list_names_every_builtin_problem() {
    let output = pseudotrace(&["list"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for id in ["swap-three", "factorial-recursive", "tree-inorder", "priority-queue"] {
        assert!(stdout.contains(id), "missing {id} in:\n{stdout}");
    }
}

#[test]
fn trace_prints_output_and_call_depth() {
    let output = pseudotrace(&["trace", "factorial-recursive"]);
    assert!(
        output.status.success(),
        "trace failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  24\n"), "{stdout}");
    assert!(stdout.contains("peak call depth 4"), "{stdout}");
}

#[test]
fn diverging_traces_stop_at_the_budget() {
    let output = pseudotrace(&[
        "trace",
        "binary-search-bug",
        "--preset",
        "data=[10,20] target=20",
        "--max-steps",
        "50",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("stopped after 50 steps without finishing"), "{stdout}");
}

#[test]
fn check_passes_for_the_builtin_catalog() {
    let output = pseudotrace(&["check", "--max-steps", "2000"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{stdout}");
    assert!(stdout.contains("check result: ok."), "{stdout}");
}

#[test]
fn unknown_problems_and_presets_fail() {
    assert!(!pseudotrace(&["show", "nope"]).status.success());
    assert!(!pseudotrace(&["trace", "gcd-euclid", "--preset", "nope"]).status.success());
    assert!(!pseudotrace(&["frobnicate"]).status.success());
}
