//! BDD-style scenario tests for repometer-content.

use std::fs;

use repometer_content::{DEFAULT_MAX_FILE_BYTES, line_stats, pseudo_complexity, read_source};
use repometer_lang::CommentSyntax;
use repometer_types::DegradeReason;
use tempfile::TempDir;

#[test]
fn ten_line_python_function_with_branch() {
    // Given a small function with an if/else followed by five blank lines
    let text = "def foo():\n    if x:\n        return 1\n    else:\n        return 2\n\n\n\n\n\n";

    // When we count lines and keywords
    let lines = line_stats(text, CommentSyntax::Hash);
    let pc = pseudo_complexity(text);

    // Then all ten lines are counted and the branch registers
    assert_eq!(lines.loc, 10);
    assert_eq!(lines.num_blank, 5);
    assert_eq!(lines.num_comments, 0);
    assert!(pc.decision_points >= 1);
}

#[test]
fn file_read_from_disk_matches_in_memory_counts() {
    // Given a MATLAB script on disk with CRLF endings
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("script.m");
    fs::write(&path, "% load data\r\nx = 1;\r\n\r\nif x > 0\r\n  y = 2;\r\nend\r\n").unwrap();

    // When we read and count it
    let text = read_source(&path, DEFAULT_MAX_FILE_BYTES).unwrap();
    let lines = line_stats(&text, CommentSyntax::Percent);

    // Then the counts reflect six lines, one comment and one blank
    assert_eq!((lines.loc, lines.num_comments, lines.num_blank), (6, 1, 1));
}

#[test]
fn oversized_file_is_not_read() {
    // Given a file one byte over the limit
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("big.py");
    fs::write(&path, vec![b'#'; 33]).unwrap();

    // When we read it with a 32-byte limit
    let result = read_source(&path, 32);

    // Then the reason is reported instead of text
    assert_eq!(result, Err(DegradeReason::TooLarge));
}

#[test]
fn directory_is_unreadable() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(
        read_source(tmp.path(), DEFAULT_MAX_FILE_BYTES),
        Err(DegradeReason::Unreadable)
    );
}

#[test]
fn html_document_with_comment_block() {
    let text = "<!DOCTYPE html>\n<!--\n  banner\n-->\n<html>\n\n</html>\n";
    let lines = line_stats(text, CommentSyntax::Markup);
    assert_eq!((lines.loc, lines.num_comments, lines.num_blank), (7, 3, 1));
}
