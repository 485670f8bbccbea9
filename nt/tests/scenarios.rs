//! End-to-end behavior of the file tools against a real temp workspace

use std::fs;

use nanotools::ToolError;
use nanotools::workspace::{EditRequest, ListRequest, Listing, ReadRequest, Workspace, WriteRequest};
use tempfile::tempdir;

fn read(path: &str) -> ReadRequest {
    ReadRequest { path: path.to_string() }
}

#[tokio::test]
async fn test_parent_escape_is_denied() {
    let temp = tempdir().unwrap();
    let ws = Workspace::restricted(temp.path().to_path_buf());

    let err = ws.read(&read("../etc/passwd")).await.unwrap_err();
    assert_eq!(err.kind(), "permission_denied");
    assert!(err.to_string().contains("outside allowed directory"));
}

#[tokio::test]
async fn test_ambiguous_edit_leaves_file_unchanged() {
    let temp = tempdir().unwrap();
    let original = "foo\nbar\nfoo\nbar\n";
    fs::write(temp.path().join("dup.txt"), original).unwrap();
    let ws = Workspace::restricted(temp.path().to_path_buf());

    let req = EditRequest {
        path: "dup.txt".to_string(),
        old_text: "bar".to_string(),
        new_text: "baz".to_string(),
    };
    let err = ws.edit(&req).await.unwrap_err();

    assert!(matches!(err, ToolError::AmbiguousMatch { count: 2, .. }));
    assert_eq!(fs::read_to_string(temp.path().join("dup.txt")).unwrap(), original);
}

#[tokio::test]
async fn test_near_miss_edit_reports_best_match() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("greeting.txt"), "Hello, world!\n").unwrap();
    let ws = Workspace::restricted(temp.path().to_path_buf());

    let req = EditRequest {
        path: "greeting.txt".to_string(),
        old_text: "Hello world!".to_string(),
        new_text: "Hi!".to_string(),
    };
    let err = ws.edit(&req).await.unwrap_err();

    assert_eq!(err.kind(), "no_match");
    let text = err.to_string();
    assert!(text.contains("at line 1"), "{}", text);
    assert!(text.contains("-Hello world!"), "{}", text);
    assert!(text.contains("+Hello, world!"), "{}", text);
    assert_eq!(fs::read_to_string(temp.path().join("greeting.txt")).unwrap(), "Hello, world!\n");
}

#[tokio::test]
async fn test_write_creates_parents_then_reads_back() {
    let temp = tempdir().unwrap();
    let ws = Workspace::restricted(temp.path().to_path_buf());

    let outcome = ws
        .write(&WriteRequest {
            path: "a/b/c.txt".to_string(),
            content: "data".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(outcome.bytes, 4);
    assert!(temp.path().join("a/b").is_dir());
    assert_eq!(ws.read(&read("a/b/c.txt")).await.unwrap(), "data");
}

#[tokio::test]
async fn test_empty_directory_is_explicit() {
    let temp = tempdir().unwrap();
    fs::create_dir(temp.path().join("empty")).unwrap();
    let ws = Workspace::restricted(temp.path().to_path_buf());

    let listing = ws
        .list(&ListRequest {
            path: "empty".to_string(),
        })
        .await
        .unwrap();

    assert!(matches!(listing, Listing::Empty));
}

#[tokio::test]
async fn test_unrestricted_workspace_reaches_outside() {
    let inside = tempdir().unwrap();
    let outside = tempdir().unwrap();
    fs::write(outside.path().join("x.txt"), "outside").unwrap();
    let ws = Workspace::unrestricted(inside.path().to_path_buf());

    let path = outside.path().join("x.txt");
    let content = ws.read(&read(path.to_str().unwrap())).await.unwrap();
    assert_eq!(content, "outside");
}
