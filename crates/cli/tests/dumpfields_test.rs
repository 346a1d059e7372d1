//! Tests for the dumpfields CLI tool: text listing, JSON output with
//! metadata and xref anchors, and failure on unreadable input.

use std::path::PathBuf;
use std::process::Command;

// ============================================================================
// Helper functions
// ============================================================================

/// Write a small two-field form to a unique temporary file.
fn write_fixture() -> PathBuf {
    let objects = [
        "<< /Type /Catalog /AcroForm << /Fields [2 0 R 3 0 R] >> >>",
        "<<\n/FT /Tx\n/T (Name1)\n/V (Alice)\n/MaxLen 20\n>>",
        "<<\n/FT /Ch\n/T (Color)\n/Opt [ [(r)(Red)] [(g)(Green)] ]\n>>",
    ];
    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }
    let xref_pos = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
    for offset in &offsets {
        pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    pdf.extend_from_slice(
        format!("trailer\n<< /Size 4 /Root 1 0 R >>\nstartxref\n{xref_pos}\n%%EOF\n").as_bytes(),
    );

    let path = std::env::temp_dir().join(format!(
        "dumpfields_test_{:?}_{}.pdf",
        std::thread::current().id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::write(&path, pdf).unwrap();
    path
}

/// Run dumpfields with given arguments and return (exit_code, stdout, stderr).
fn run_dumpfields(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_dumpfields"))
        .args(args)
        .output()
        .expect("Failed to execute dumpfields");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

/// Run dumpfields on a fresh fixture with the given options.
fn run(options: &[&str]) -> (i32, String, String) {
    let path = write_fixture();
    let path_str = path.to_string_lossy().to_string();
    let mut args = options.to_vec();
    args.push(&path_str);
    let result = run_dumpfields(&args);
    let _ = std::fs::remove_file(&path);
    result
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_text_output() {
    let (code, stdout, stderr) = run(&[]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.starts_with("# "));
    assert!(stdout.contains("Name1 [Tx] obj 2"));
    assert!(stdout.contains("  max length: 20"));
    assert!(stdout.contains("Color [Ch] obj 3"));
    assert!(stdout.contains("  option: r => Red"));
    assert!(stdout.contains("  option: g => Green"));
    assert!(!stdout.contains("metadata:"));
}

#[test]
fn test_text_output_with_meta_and_xref() {
    let (code, stdout, stderr) = run(&["-m", "-x"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("metadata:"));
    assert!(stdout.contains("  size: 4"));
    assert!(stdout.contains("  root: 1 0 R"));
    assert!(stdout.contains("xref:"));
    assert!(stdout.contains("  startxref: "));
}

#[test]
fn test_json_output() {
    let (code, stdout, stderr) = run(&["--json"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    let fields = report["fields"].as_object().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(report["fields"]["Name1"]["field_type"], "Text");
    assert_eq!(report["fields"]["Name1"]["max_len"], 20);
    assert_eq!(report["fields"]["Color"]["options"]["g"], "Green");
    assert!(report.get("meta").is_none());
    assert!(report.get("xref").is_none());
}

#[test]
fn test_json_output_with_meta_and_xref() {
    let (code, stdout, stderr) = run(&["--json", "--meta", "--xref"]);
    assert_eq!(code, 0, "stderr: {stderr}");
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["meta"]["size"], 4);
    assert!(report["xref"].is_object());
}

#[test]
fn test_missing_file_fails() {
    let missing = std::env::temp_dir().join("dumpfields_test_no_such_file.pdf");
    let missing_str = missing.to_string_lossy().to_string();
    let (code, _, stderr) = run_dumpfields(&[missing_str.as_str()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("parsing"));
}
