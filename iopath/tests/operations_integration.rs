//! Integration tests for the mutating operations working together.

mod common;

use std::fs;

use common::{assert_same_tree, TreeFixture};
use iopath::{CopyOptions, Error, PathHandle, SymlinkPolicy};

#[test]
fn test_copy_report_counts() {
    let tree = TreeFixture::new()
        .with_file("a", 3)
        .with_file("sub/b", 4)
        .with_dir("sub/empty")
        .build();

    let report = tree.handle().copy(tree.sibling("dst")).unwrap();
    assert_eq!(report.files, 2);
    assert_eq!(report.directories, 3);
    assert_eq!(report.symlinks, 0);
    assert_eq!(report.bytes, 7);
}

#[test]
fn test_copy_twice_needs_overwrite() {
    let tree = TreeFixture::new().with_file("a", 3).build();
    let dst = PathHandle::new(tree.sibling("dst"));

    tree.handle().copy(&dst).unwrap();
    assert!(tree.handle().copy(&dst).unwrap_err().is_already_exists());

    fs::write(tree.root().join("a"), b"changed").unwrap();
    tree.handle()
        .copy_with(&dst, &CopyOptions::new().with_overwrite(true))
        .unwrap();
    assert_eq!(fs::read(dst.as_path().join("a")).unwrap(), b"changed");
}

#[test]
fn test_move_tree_then_move_back() {
    let tree = TreeFixture::new()
        .with_file("x/y/z.txt", 64)
        .with_file("top.txt", 8)
        .build();
    let snapshot = tree.sibling("snapshot");
    tree.handle().copy(&snapshot).unwrap();

    let away = tree.handle().move_to(tree.sibling("away")).unwrap();
    assert!(!tree.handle().exists());
    assert_same_tree(&snapshot, away.as_path());

    let back = away.move_to(tree.root()).unwrap();
    assert_eq!(back, tree.handle());
    assert_same_tree(&snapshot, tree.root());
}

#[test]
fn test_rename_then_hide() {
    let dir = tempfile::tempdir().unwrap();
    let draft = PathHandle::new(dir.path().join("draft.txt"));
    draft.create_file().unwrap();

    let renamed = draft.rename("notes.txt").unwrap();
    assert_eq!(renamed.name(), "notes.txt");

    #[cfg(unix)]
    {
        let hidden = renamed.set_hidden(true).unwrap();
        assert_eq!(hidden.name(), ".notes.txt");
        assert!(hidden.is_hidden());
        assert!(!renamed.exists());
    }
}

#[test]
fn test_create_file_overwrite_then_delete_if_exists() {
    let dir = tempfile::tempdir().unwrap();
    let file = PathHandle::new(dir.path().join("log"));
    fs::write(file.as_path(), b"old entries").unwrap();

    assert!(file.create_file().unwrap_err().is_already_exists());
    file.create_file_with(true).unwrap();
    assert_eq!(file.size().unwrap(), 0);

    assert!(file.delete_if_exists(false).unwrap());
    assert!(!file.delete_if_exists(false).unwrap());
}

#[test]
fn test_readonly_file_blocks_overwrite_copy() {
    let dir = tempfile::tempdir().unwrap();
    let src = PathHandle::new(dir.path().join("src"));
    let dst = PathHandle::new(dir.path().join("dst"));
    fs::write(src.as_path(), b"fresh").unwrap();
    fs::write(dst.as_path(), b"locked").unwrap();
    dst.set_readonly(true).unwrap();

    // A privileged user writes through permission bits.
    if fs::OpenOptions::new().write(true).open(dst.as_path()).is_ok() {
        return;
    }

    let err = src
        .copy_with(&dst, &CopyOptions::new().with_overwrite(true))
        .unwrap_err();
    assert!(err.is_permission_denied());
    dst.set_readonly(false).unwrap();
    assert_eq!(fs::read(dst.as_path()).unwrap(), b"locked");
}

#[cfg(unix)]
#[test]
fn test_copy_tree_partial_failure_keeps_going() {
    use std::os::unix::fs::PermissionsExt;

    let tree = TreeFixture::new()
        .with_file("a.txt", 10)
        .with_file("secret/key", 10)
        .with_file("z.txt", 10)
        .build();
    let secret = tree.root().join("secret");
    fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();

    if fs::read_dir(&secret).is_ok() {
        fs::set_permissions(&secret, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let dst = tree.sibling("dst");
    let result = tree.handle().copy(&dst);
    fs::set_permissions(&secret, fs::Permissions::from_mode(0o755)).unwrap();

    match result.unwrap_err() {
        Error::PartialFailure {
            operation,
            completed,
            failures,
            ..
        } => {
            assert_eq!(operation, "copy");
            assert!(failures.iter().any(|f| f.path == secret));
            assert!(completed.contains(&tree.root().join("a.txt")));
            assert!(completed.contains(&tree.root().join("z.txt")));
        }
        other => panic!("expected partial failure, got {other}"),
    }
    assert!(dst.join("a.txt").exists());
    assert!(dst.join("z.txt").exists());
    assert!(!dst.join("secret/key").exists());
}

#[cfg(unix)]
#[test]
fn test_links_preserved_and_followed() {
    let outside = TreeFixture::new().with_file("payload", 500).build();
    let tree = TreeFixture::new()
        .with_file("real", 5)
        .with_link("relative", "real")
        .with_link("external", outside.root())
        .build();

    let preserved = PathHandle::new(tree.sibling("preserved"));
    let report = tree.handle().copy(&preserved).unwrap();
    assert_eq!(report.symlinks, 2);
    assert_same_tree(tree.root(), preserved.as_path());

    let followed = PathHandle::new(tree.sibling("followed"));
    let options = CopyOptions::new().with_symlinks(SymlinkPolicy::Follow);
    let report = tree.handle().copy_with(&followed, &options).unwrap();
    assert_eq!(report.symlinks, 0);
    assert_eq!(report.bytes, 5 + 5 + 500);
    assert!(!followed.join("external").unwrap().is_symlink());
    assert_eq!(
        fs::read(followed.as_path().join("external/payload")).unwrap(),
        common::content(500)
    );
}

#[cfg(unix)]
#[test]
fn test_disk_usage_ignores_link_targets() {
    let big = TreeFixture::new().with_file("blob", 1 << 16).build();
    let tree = TreeFixture::new()
        .with_file("small", 7)
        .with_link("big", big.root())
        .build();

    let link_len = fs::symlink_metadata(tree.root().join("big")).unwrap().len();
    assert_eq!(tree.handle().disk_usage().unwrap(), 7 + link_len);
}

#[test]
fn test_set_modified_time_survives_copy() {
    use chrono::{TimeZone, Utc};

    let dir = tempfile::tempdir().unwrap();
    let src = PathHandle::new(dir.path().join("dated"));
    src.create_file().unwrap();
    let when = Utc.with_ymd_and_hms(2015, 6, 30, 23, 59, 59).unwrap();
    src.set_modified_time(when).unwrap();

    let dst = PathHandle::new(dir.path().join("copy"));
    src.copy(&dst).unwrap();
    assert_eq!(dst.modified_time().unwrap(), when);
}
