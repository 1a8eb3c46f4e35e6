/*
 * Copyright © 2026 Volodymyr Kadzhaia
 * Copyright © 2026 Pieter Bonte
 * KU Leuven — Stream Intelligence Lab, Belgium
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::path::PathBuf;
use std::process::Command;

fn kb_cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_kb-cli"))
}

fn blocks_file() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/blocks.kb")
}

#[test]
fn test_ask_prints_bindings() {
    let output = kb_cli()
        .arg("--file")
        .arg(blocks_file())
        .args(["--ask", "(movable ?x)"])
        .output()
        .expect("run kb-cli");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Asking (movable ?x)"));
    assert!(stdout.contains("{?x: cube} <- (movable cube)"));
    assert!(!stdout.contains("pyramid"));
}

#[test]
fn test_retract_runs_before_ask_and_json_output() {
    let output = kb_cli()
        .arg("--file")
        .arg(blocks_file())
        .args(["--retract", "(size cube small)"])
        .args(["--ask", "(movable ?x)", "--ask", "(above-red ?x)", "--json"])
        .output()
        .expect("run kb-cli");
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(reports[0]["query"], "(movable ?x)");
    assert_eq!(reports[0]["answers"].as_array().map(Vec::len), Some(0));
    assert_eq!(reports[1]["answers"][0]["bindings"]["?x"], "cube");
}

#[test]
fn test_missing_file_fails() {
    let output = kb_cli()
        .args(["--file", "no/such/file.kb"])
        .output()
        .expect("run kb-cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read"));
}
