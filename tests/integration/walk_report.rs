//! End-to-end tests: listing in, report out.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use walksum::error::RunError;
use walksum::walk::run::WalkRun;
use walksum::walk::walker::WalkerConfig;

/// Write a listing file naming the given roots, one per line.
fn write_listing(dir: &Path, roots: &[&str]) -> std::path::PathBuf {
    let listing = dir.join("roots.txt");
    let mut contents = String::new();
    for root in roots {
        contents.push_str(root);
        contents.push('\n');
    }
    fs::write(&listing, contents).unwrap();
    listing
}

fn assert_report_line_shape(line: &str) {
    assert!(line.len() >= 9, "line too short: {:?}", line);
    let (checksum, rest) = line.split_at(8);
    assert!(
        checksum
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
        "checksum not lowercase hex: {:?}",
        line
    );
    assert!(rest.starts_with(' '), "no separator: {:?}", line);
}

/// A directory with one readable file plus a missing path: the readable
/// file gets its checksum, the missing path gets the sentinel, in listing
/// order.
#[test]
fn test_directory_and_missing_root() {
    let temp_dir = TempDir::new().unwrap();
    let testdir = temp_dir.path().join("testdir");
    fs::create_dir(&testdir).unwrap();
    fs::write(testdir.join("a.txt"), "abc").unwrap();
    let missing = temp_dir.path().join("missingfile");

    let listing = write_listing(
        temp_dir.path(),
        &[
            &testdir.display().to_string(),
            &missing.display().to_string(),
        ],
    );
    let report = temp_dir.path().join("report.txt");

    let summary = WalkRun::new(listing, report.clone()).execute().unwrap();

    assert_eq!(summary.roots, 2);
    assert_eq!(summary.lines, 2);
    assert_eq!(
        fs::read_to_string(&report).unwrap(),
        format!(
            "439c2f4b {}\n00000000 {}\n",
            testdir.join("a.txt").display(),
            missing.display()
        )
    );
}

#[test]
fn test_line_count_is_files_plus_failures() {
    let temp_dir = TempDir::new().unwrap();
    let tree = temp_dir.path().join("tree");
    fs::create_dir(&tree).unwrap();
    fs::write(tree.join("one.txt"), "foo").unwrap();
    fs::write(tree.join("two.txt"), "foobar").unwrap();
    fs::write(tree.join("three.txt"), "").unwrap();

    let gone_a = temp_dir.path().join("gone-a");
    let gone_b = temp_dir.path().join("gone-b");

    let listing = write_listing(
        temp_dir.path(),
        &[
            &tree.display().to_string(),
            &gone_a.display().to_string(),
            &gone_b.display().to_string(),
        ],
    );
    let report = temp_dir.path().join("report.txt");

    let summary = WalkRun::new(listing, report.clone()).execute().unwrap();

    let contents = fs::read_to_string(&report).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 5, "3 files + 2 missing roots");
    assert_eq!(summary.lines, 5);
    for line in &lines {
        assert_report_line_shape(line);
    }

    // Failed visits carry the sentinel, readable files never do.
    assert!(contents.contains(&format!("00000000 {}\n", gone_a.display())));
    assert!(contents.contains(&format!("00000000 {}\n", gone_b.display())));
    assert!(contents.contains(&format!("408f5e13 {}\n", tree.join("one.txt").display())));
    assert!(contents.contains(&format!("31f0b262 {}\n", tree.join("two.txt").display())));
    assert!(contents.contains(&format!("811c9dc5 {}\n", tree.join("three.txt").display())));
}

#[test]
fn test_children_reported_in_sorted_pre_order() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    fs::create_dir_all(root.join("b_dir")).unwrap();
    fs::write(root.join("b_dir").join("y.txt"), "abc").unwrap();
    fs::write(root.join("b_dir").join("z.txt"), "").unwrap();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::write(root.join("c.txt"), "abc").unwrap();

    let listing = write_listing(temp_dir.path(), &[&root.display().to_string()]);
    let report = temp_dir.path().join("report.txt");

    WalkRun::new(listing, report.clone()).execute().unwrap();

    assert_eq!(
        fs::read_to_string(&report).unwrap(),
        format!(
            "050c5d7e {}\n439c2f4b {}\n811c9dc5 {}\n439c2f4b {}\n",
            root.join("a.txt").display(),
            root.join("b_dir").join("y.txt").display(),
            root.join("b_dir").join("z.txt").display(),
            root.join("c.txt").display()
        )
    );
}

#[test]
fn test_rerun_is_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    fs::create_dir_all(root.join("nested")).unwrap();
    fs::write(root.join("nested").join("deep.txt"), "foobar").unwrap();
    fs::write(root.join("top.txt"), "fo").unwrap();

    let listing = write_listing(temp_dir.path(), &[&root.display().to_string()]);
    let first = temp_dir.path().join("first.txt");
    let second = temp_dir.path().join("second.txt");

    WalkRun::new(listing.clone(), first.clone()).execute().unwrap();
    WalkRun::new(listing, second.clone()).execute().unwrap();

    let first_bytes = fs::read(&first).unwrap();
    let second_bytes = fs::read(&second).unwrap();
    assert!(!first_bytes.is_empty());
    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn test_root_listed_twice_reported_twice() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("file.txt"), "abc").unwrap();

    let root_line = root.display().to_string();
    let listing = write_listing(temp_dir.path(), &[&root_line, &root_line]);
    let report = temp_dir.path().join("report.txt");

    let summary = WalkRun::new(listing, report.clone()).execute().unwrap();

    assert_eq!(summary.roots, 2);
    let expected_block = format!("439c2f4b {}\n", root.join("file.txt").display());
    assert_eq!(
        fs::read_to_string(&report).unwrap(),
        format!("{}{}", expected_block, expected_block)
    );
}

#[test]
fn test_empty_listing_line_reports_empty_path() {
    let temp_dir = TempDir::new().unwrap();
    let listing = temp_dir.path().join("roots.txt");
    fs::write(&listing, "\n").unwrap();
    let report = temp_dir.path().join("report.txt");

    let summary = WalkRun::new(listing, report.clone()).execute().unwrap();

    // The empty line names the empty path; visiting it fails, so the line
    // is sentinel plus empty path text.
    assert_eq!(fs::read_to_string(&report).unwrap(), "00000000 \n");
    assert_eq!(summary.roots, 1);
}

#[test]
fn test_malformed_listing_line_written_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    let listing = temp_dir.path().join("roots.txt");
    let good = temp_dir.path().join("present.txt");
    fs::write(&good, "a").unwrap();
    fs::write(
        &listing,
        format!("bad\u{0}line\n{}\n", good.display()),
    )
    .unwrap();
    let report = temp_dir.path().join("report.txt");

    let summary = WalkRun::new(listing, report.clone()).execute().unwrap();

    assert_eq!(summary.invalid_roots, 1);
    assert_eq!(summary.roots, 1);
    assert_eq!(
        fs::read_to_string(&report).unwrap(),
        format!("00000000 bad\u{0}line\n050c5d7e {}\n", good.display())
    );
}

#[test]
fn test_report_parent_directories_created() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("data.txt");
    fs::write(&target, "abc").unwrap();

    let listing = write_listing(temp_dir.path(), &[&target.display().to_string()]);
    let report = temp_dir
        .path()
        .join("out")
        .join("deep")
        .join("report.txt");

    WalkRun::new(listing, report.clone()).execute().unwrap();

    assert!(report.exists());
    assert_eq!(
        fs::read_to_string(&report).unwrap(),
        format!("439c2f4b {}\n", target.display())
    );
}

#[test]
fn test_existing_report_is_replaced() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("data.txt");
    fs::write(&target, "abc").unwrap();

    let listing = write_listing(temp_dir.path(), &[&target.display().to_string()]);
    let report = temp_dir.path().join("report.txt");
    fs::write(&report, "stale line that must vanish\n").unwrap();

    WalkRun::new(listing, report.clone()).execute().unwrap();

    assert_eq!(
        fs::read_to_string(&report).unwrap(),
        format!("439c2f4b {}\n", target.display())
    );
}

#[test]
fn test_missing_listing_is_fatal_and_creates_no_report() {
    let temp_dir = TempDir::new().unwrap();
    let report = temp_dir.path().join("report.txt");

    let result = WalkRun::new(temp_dir.path().join("absent.txt"), report.clone()).execute();

    assert!(matches!(result, Err(RunError::OpenListing { .. })));
    assert!(!report.exists());
}

#[test]
fn test_undecodable_listing_is_fatal_but_keeps_earlier_lines() {
    let temp_dir = TempDir::new().unwrap();
    let good = temp_dir.path().join("good.txt");
    fs::write(&good, "abc").unwrap();

    let listing = temp_dir.path().join("roots.txt");
    let mut bytes = Vec::new();
    bytes.extend_from_slice(good.display().to_string().as_bytes());
    bytes.extend_from_slice(b"\n\xff\xfe\n");
    fs::write(&listing, bytes).unwrap();
    let report = temp_dir.path().join("report.txt");

    let result = WalkRun::new(listing, report.clone()).execute();

    assert!(matches!(result, Err(RunError::ReadListing { .. })));
    // The line written before the failure survives the abort.
    assert_eq!(
        fs::read_to_string(&report).unwrap(),
        format!("439c2f4b {}\n", good.display())
    );
}

#[cfg(unix)]
#[test]
fn test_broken_symlink_gets_sentinel_line() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("real.txt"), "abc").unwrap();
    std::os::unix::fs::symlink(root.join("void"), root.join("dangling")).unwrap();

    let listing = write_listing(temp_dir.path(), &[&root.display().to_string()]);
    let report = temp_dir.path().join("report.txt");

    WalkRun::new(listing, report.clone()).execute().unwrap();

    assert_eq!(
        fs::read_to_string(&report).unwrap(),
        format!(
            "00000000 {}\n439c2f4b {}\n",
            root.join("dangling").display(),
            root.join("real.txt").display()
        )
    );
}

#[cfg(unix)]
#[test]
fn test_followed_symlink_directory_contributes_lines() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("root");
    fs::create_dir_all(root.join("real")).unwrap();
    fs::write(root.join("real").join("inner.txt"), "abc").unwrap();
    std::os::unix::fs::symlink(root.join("real"), root.join("alias")).unwrap();

    let listing = write_listing(temp_dir.path(), &[&root.display().to_string()]);
    let report = temp_dir.path().join("report.txt");

    let config = WalkerConfig {
        follow_symlinks: true,
        ..WalkerConfig::default()
    };
    WalkRun::new(listing, report.clone())
        .with_config(config)
        .execute()
        .unwrap();

    assert_eq!(
        fs::read_to_string(&report).unwrap(),
        format!(
            "439c2f4b {}\n439c2f4b {}\n",
            root.join("alias").join("inner.txt").display(),
            root.join("real").join("inner.txt").display()
        )
    );
}
