//! Stress tests for iopath.
//!
//! These build trees far deeper or wider than everyday use to check that the
//! recursive operations keep a bounded call stack and stay correct at
//! volume. They are marked with `#[ignore]` to keep regular runs fast.
//!
//! Run these tests explicitly with: `cargo test --ignored`

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use iopath::PathHandle;

/// Depth is capped so the deepest path stays well below `PATH_MAX`.
const DEPTH: usize = 1_500;

fn deep_chain(root: &std::path::Path) -> PathBuf {
    let mut path = root.to_path_buf();
    for _ in 0..DEPTH {
        path.push("d");
    }
    path
}

/// A single chain of directories 1,500 levels deep is copied, measured and
/// removed on a thread with a deliberately small stack.
#[test]
#[ignore]
fn stress_deep_tree_small_stack() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("deep");
    let leaf = deep_chain(&root);
    fs::create_dir_all(&leaf).unwrap();
    fs::write(leaf.join("bottom.txt"), b"reached").unwrap();

    let copy = dir.path().join("deep-copy");
    let worker = std::thread::Builder::new()
        .stack_size(256 * 1024)
        .spawn(move || {
            let source = PathHandle::new(&root);
            let report = source.copy(&copy).unwrap();
            assert_eq!(report.directories as usize, DEPTH + 1);
            assert_eq!(source.disk_usage().unwrap(), 7);
            assert_eq!(PathHandle::new(&copy).disk_usage().unwrap(), 7);

            source.delete(true).unwrap();
            PathHandle::new(&copy).delete(true).unwrap();
            assert!(!source.exists());
            assert!(!copy.exists());
        })
        .unwrap();
    worker.join().unwrap();
}

/// A wide tree with many small files.
#[test]
#[ignore]
fn stress_wide_tree() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("wide");
    let mut expected = 0u64;
    for bucket in 0..50 {
        let bucket_dir = root.join(format!("bucket-{bucket:02}"));
        fs::create_dir_all(&bucket_dir).unwrap();
        for file in 0..100 {
            let len = (bucket * 100 + file) % 97;
            fs::write(bucket_dir.join(format!("f{file:03}")), vec![b'x'; len]).unwrap();
            expected += len as u64;
        }
    }

    let start = Instant::now();
    let handle = PathHandle::new(&root);
    assert_eq!(handle.disk_usage().unwrap(), expected);

    let copy = PathHandle::new(dir.path().join("wide-copy"));
    let report = handle.copy(&copy).unwrap();
    assert_eq!(report.files, 5_000);
    assert_eq!(report.bytes, expected);

    copy.delete(true).unwrap();
    handle.delete(true).unwrap();
    println!("wide tree round trip took {:?}", start.elapsed());
}
