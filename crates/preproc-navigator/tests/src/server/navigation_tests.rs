use super::*;

#[test]
fn clamp_into_target_range() {
    assert_eq!(clamp_line(500, 10), 10);
    assert_eq!(clamp_line(0, 10), 1);
    assert_eq!(clamp_line(5, 10), 5);
    assert_eq!(clamp_line(10, 10), 10);
    assert_eq!(clamp_line(3, 0), 1);
}

#[test]
fn line_count_follows_editor_convention() {
    assert_eq!(count_lines(""), 1);
    assert_eq!(count_lines("one"), 1);
    assert_eq!(count_lines("one\ntwo"), 2);
    assert_eq!(count_lines("one\ntwo\n"), 3);
}

#[test]
fn absolute_paths_are_used_as_is() {
    let resolved = resolve_target_path("/abs/src/a.c", &[PathBuf::from("/workspace")], None);
    assert_eq!(resolved, PathBuf::from("/abs/src/a.c"));
}

#[test]
fn relative_paths_join_the_first_workspace_root() {
    let roots = vec![PathBuf::from("/workspace"), PathBuf::from("/other")];
    let resolved = resolve_target_path("src/a.c", &roots, None);
    assert_eq!(resolved, PathBuf::from("/workspace/src/a.c"));
}

#[test]
fn no_workspace_falls_back_to_document_directory() {
    let resolved = resolve_target_path("a.c", &[], Some(Path::new("/build/out/main.i")));
    assert_eq!(resolved, PathBuf::from("/build/out/a.c"));
}

#[test]
fn bare_relative_path_without_context() {
    let resolved = resolve_target_path("a.c", &[], None);
    assert_eq!(resolved, PathBuf::from("a.c"));
}

#[tokio::test]
async fn loading_a_missing_file_reports_target_file_missing() {
    let path = std::env::temp_dir().join("preproc-navigator-does-not-exist.c");
    let error = load_target(&path, 1).await.expect_err("missing file must fail");
    assert!(matches!(error, NavigationError::TargetFileMissing(_)));
}

#[tokio::test]
async fn loading_clamps_the_requested_line() {
    let dir = std::env::temp_dir().join(format!("preproc-navigator-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("clamp.c");
    // 3 newlines -> 4 lines.
    std::fs::write(&path, "int a;\nint b;\nint c;\n").unwrap();

    let location = load_target(&path, 500).await.expect("existing file must load");
    assert_eq!(location.range.start.line, 3);
    assert_eq!(location.range.start.character, 0);
    assert_eq!(location.uri, Url::from_file_path(&path).unwrap());

    let location = load_target(&path, 2).await.expect("existing file must load");
    assert_eq!(location.range.start.line, 1);

    std::fs::remove_dir_all(&dir).ok();
}
