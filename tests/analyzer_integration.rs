//! End-to-end tests for the analysis driver.

use std::path::PathBuf;

use tempfile::TempDir;

use pystyle::check::{Analyzer, RuleCode};
use pystyle::cli::collect_files;
use pystyle::report::render_text;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn analyze(files: &[PathBuf]) -> Vec<pystyle::Issue> {
    let mut analyzer = Analyzer::new();
    analyzer.analyze_files(files).expect("analysis should succeed");
    analyzer.into_issues()
}

#[test]
fn test_fixture_full_report() {
    let fixture = testdata_path().join("style_issues.py");
    let issues = analyze(&[fixture.clone()]);
    let file = fixture.to_string_lossy();

    let expected = format!(
        "{f}: Line 4: S007 Too many spaces after 'def'\n\
         {f}: Line 4: S010 Argument name 'Title' should use snake_case\n\
         {f}: Line 4: S012 Default argument value is mutable\n\
         {f}: Line 5: S003 Unnecessary semicolon\n\
         {f}: Line 7: S005 TODO found\n\
         {f}: Line 8: S011 Variable name 'Result' in function should use snake_case\n\
         {f}: Line 12: S008 Class name 'report_builder' should use CamelCase\n\
         {f}: Line 13: S009 Function name 'BuildAll' should use snake_case",
        f = file
    );
    assert_eq!(render_text(&issues), expected);
}

#[test]
fn test_clean_fixture_has_empty_report() {
    let issues = analyze(&[testdata_path().join("clean.py")]);
    assert_eq!(render_text(&issues), "");
}

#[test]
fn test_file_is_primary_sort_key_across_files() {
    let temp = TempDir::new().unwrap();

    // a.py: the only issue sits on line 100
    let mut source = String::new();
    for _ in 0..99 {
        source.push_str("x = 1\n");
    }
    source.push_str(&format!("y = '{}'\n", "a".repeat(90)));
    let a = temp.path().join("a.py");
    std::fs::write(&a, source).unwrap();

    // b.py: the only issue sits on line 1
    let b = temp.path().join("b.py");
    std::fs::write(&b, "z = 1;\n").unwrap();

    let issues = analyze(&[a.clone(), b.clone()]);
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].line_num, 100);
    assert_eq!(issues[0].code, RuleCode::LineTooLong);
    assert!(issues[0].file.ends_with("a.py"));
    assert_eq!(issues[1].line_num, 1);
    assert!(issues[1].file.ends_with("b.py"));
}

#[test]
fn test_directory_discovery_feeds_analysis() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("sub")).unwrap();
    std::fs::write(temp.path().join("one.py"), "a = 1;\n").unwrap();
    std::fs::write(temp.path().join("sub").join("two.py"), "b = 2;\n").unwrap();
    std::fs::write(temp.path().join("ignored.txt"), "c = 3;\n").unwrap();

    let files = collect_files(temp.path()).unwrap();
    assert_eq!(files.len(), 2);

    let issues = analyze(&files);
    assert_eq!(issues.len(), 2);
    assert!(issues
        .iter()
        .all(|i| i.code == RuleCode::UnnecessarySemicolon));
}

#[test]
fn test_parse_failure_aborts_whole_run() {
    let temp = TempDir::new().unwrap();
    let good = temp.path().join("a.py");
    let bad = temp.path().join("b.py");
    std::fs::write(&good, "x = 1;\n").unwrap();
    std::fs::write(&bad, "class Broken(\n").unwrap();

    let mut analyzer = Analyzer::new();
    let result = analyzer.analyze_files(&[good, bad]);
    assert!(result.is_err(), "malformed source must fail the run");
}

#[test]
fn test_four_blank_lines_before_print() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("blanks.py");
    std::fs::write(&file, "x = 1\n\n\n\n\nprint(1)\n").unwrap();

    let issues = analyze(&[file]);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, RuleCode::ExcessiveBlankLines);
    assert_eq!(issues[0].line_num, 6);
}
