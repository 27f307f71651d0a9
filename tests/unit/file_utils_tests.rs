/*!
 * Tests for file and directory utilities
 */

use bidocx::file_utils::FileManager;
use std::fs;
use std::path::{Path, PathBuf};

use crate::common;

#[test]
fn test_generate_output_path_should_insert_target_language() {
    let output = FileManager::generate_output_path("/docs/report.docx", "/out", "hi", "docx");
    assert_eq!(output, PathBuf::from("/out/report.hi.docx"));

    let output = FileManager::generate_output_path("notes.final.docx", "", "de", ".docx");
    assert_eq!(output, PathBuf::from("notes.final.de.docx"));
}

#[test]
fn test_is_lock_file_should_match_word_owner_files() {
    assert!(FileManager::is_lock_file("/docs/~$report.docx"));
    assert!(!FileManager::is_lock_file("/docs/report.docx"));
}

#[test]
fn test_is_translated_output_should_match_target_suffix_only() {
    assert!(FileManager::is_translated_output("report.hi.docx", "hi"));
    assert!(FileManager::is_translated_output("report.HI.docx", "hi"));
    assert!(!FileManager::is_translated_output("report.docx", "hi"));
    assert!(!FileManager::is_translated_output("report.de.docx", "hi"));
}

#[test]
fn test_find_files_should_skip_lock_files_and_sort() {
    let temp_dir = common::create_temp_dir().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join("nested")).unwrap();

    common::create_test_file(root, "b.docx", "").unwrap();
    common::create_test_file(root, "a.DOCX", "").unwrap();
    common::create_test_file(root, "~$a.docx", "").unwrap();
    common::create_test_file(root, "notes.txt", "").unwrap();
    common::create_test_file(&root.join("nested"), "c.docx", "").unwrap();

    let found = FileManager::find_files(root, "docx").unwrap();
    let names: Vec<&Path> = found.iter().map(|p| p.strip_prefix(root).unwrap()).collect();

    assert_eq!(
        names,
        vec![Path::new("a.DOCX"), Path::new("b.docx"), Path::new("nested/c.docx")]
    );
}

#[test]
fn test_ensure_dir_should_create_parents() {
    let temp_dir = common::create_temp_dir().unwrap();
    let nested = temp_dir.path().join("one").join("two");

    FileManager::ensure_dir(&nested).unwrap();

    assert!(FileManager::dir_exists(&nested));
    assert!(!FileManager::file_exists(&nested));
}

#[test]
fn test_append_to_log_file_should_keep_previous_lines() {
    let temp_dir = common::create_temp_dir().unwrap();
    let log_path = temp_dir.path().join("logs").join("run.log");

    FileManager::append_to_log_file(&log_path, "first").unwrap();
    FileManager::append_to_log_file(&log_path, "second").unwrap();

    let content = fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("] first"));
    assert!(lines[1].ends_with("] second"));
}
