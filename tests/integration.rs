use dir2md::{GenerateBuilder, generate};
use std::fs;
use tempfile::tempdir;

fn tree_block(md: &str) -> &str {
    let start = md.find("```text\n").expect("tree fence missing") + "```text\n".len();
    let end = md[start..].find("\n```").expect("tree fence unterminated") + start;
    &md[start..end]
}

#[test]
fn test_full_flow() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/lib.rs"), "pub fn test() {}").unwrap();

    let options = GenerateBuilder::new(dir.path()).include_contents(true).build();
    let md = generate(&options).unwrap();

    assert!(md.starts_with("# Repository Snapshot"));
    assert!(md.contains("## Directory Tree"));
    assert!(md.contains("## File Contents"));
    assert!(md.contains("### `main.rs`"));
    assert!(md.contains("### `src/lib.rs`"));
    assert!(md.contains("```rust\nfn main() {}\n```"));
    assert!(md.contains("_Generated by dir2md in "));
}

#[test]
fn test_tree_orders_directories_before_files_case_insensitively() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("zeta")).unwrap();
    fs::create_dir(dir.path().join("Alpha")).unwrap();
    fs::write(dir.path().join("B.txt"), "b").unwrap();
    fs::write(dir.path().join("a.txt"), "a").unwrap();

    let options = GenerateBuilder::new(dir.path()).build();
    let md = generate(&options).unwrap();
    let tree = tree_block(&md);

    let lines: Vec<&str> = tree.lines().skip(1).collect();
    assert_eq!(
        lines,
        ["├── Alpha", "├── zeta", "├── a.txt", "└── B.txt"]
    );
}

#[test]
fn test_nested_tree_prefixes() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/inner.txt"), "x").unwrap();
    fs::write(dir.path().join("top.txt"), "x").unwrap();

    let options = GenerateBuilder::new(dir.path()).build();
    let md = generate(&options).unwrap();
    let tree = tree_block(&md);

    let lines: Vec<&str> = tree.lines().skip(1).collect();
    assert_eq!(lines, ["├── sub", "│   └── inner.txt", "└── top.txt"]);
}

#[test]
fn test_ignored_subtree_never_appears() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.py"), "x0 = 0\n").unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("b/c.js"), "if (a) { f() }\nfor (;;) {}\n").unwrap();

    let options = GenerateBuilder::new(dir.path())
        .include_contents(true)
        .analyze(true)
        .exclude_globs(vec!["b/**".into()])
        .build();
    let md = generate(&options).unwrap();

    let tree = tree_block(&md);
    let lines: Vec<&str> = tree.lines().skip(1).collect();
    assert_eq!(lines, ["└── a.py"]);
    assert!(!md.contains("c.js"));

    // Worked example: a.py has no branch keywords.
    assert!(md.contains("- Functions: 0 · Branch points: 0 · Complexity≈ 1"));
}

#[test]
fn test_mdgenignore_is_loaded() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".mdgenignore"), "# ignore logs\n\n*.log\n").unwrap();
    fs::write(dir.path().join("debug.log"), "x").unwrap();
    fs::write(dir.path().join("keep.txt"), "x").unwrap();

    let options = GenerateBuilder::new(dir.path()).build();
    let md = generate(&options).unwrap();
    let tree = tree_block(&md);

    assert!(tree.contains("keep.txt"));
    assert!(!tree.contains("debug.log"));
    // The header reports the merged pattern list.
    assert!(md.contains("*.log"));
}

#[test]
fn test_contents_disabled_emits_no_content_section() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();

    let options = GenerateBuilder::new(dir.path()).build();
    let md = generate(&options).unwrap();

    assert!(!md.contains("## File Contents"));
    assert!(!md.contains("### `"));
    // Only the tree fence remains.
    assert_eq!(md.matches("```").count(), 2);
    assert!(md.ends_with("_Generated by dir2md._\n"));
}

#[test]
fn test_max_depth_limits_tree_and_contents() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("d")).unwrap();
    fs::write(dir.path().join("d/deep.txt"), "x").unwrap();
    fs::write(dir.path().join("shallow.txt"), "x").unwrap();

    let options = GenerateBuilder::new(dir.path())
        .include_contents(true)
        .max_depth(1)
        .build();
    let md = generate(&options).unwrap();

    let tree = tree_block(&md);
    assert!(tree.contains("└── shallow.txt") || tree.contains("├── shallow.txt"));
    assert!(tree.contains("d"));
    // Beyond the depth limit: omitted everywhere, no placeholder.
    assert!(!md.contains("deep.txt"));
}

#[test]
fn test_line_truncation_marker() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("five.txt"), "l1\nl2\nl3\nl4\nl5").unwrap();

    let options = GenerateBuilder::new(dir.path())
        .include_contents(true)
        .max_lines_per_file(3)
        .build();
    let md = generate(&options).unwrap();

    assert!(md.contains("```text\nl1\nl2\nl3\n…[truncated to 3 lines]\n```"));
}

#[test]
fn test_no_truncation_marker_at_exact_line_count() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("three.txt"), "l1\nl2\nl3").unwrap();

    let options = GenerateBuilder::new(dir.path())
        .include_contents(true)
        .max_lines_per_file(3)
        .build();
    let md = generate(&options).unwrap();

    assert!(md.contains("```text\nl1\nl2\nl3\n```"));
    assert!(!md.contains("truncated"));
}

#[test]
fn test_byte_cap_truncates_within_limit() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("long.txt"), "A".repeat(10_000)).unwrap();

    let options = GenerateBuilder::new(dir.path())
        .include_contents(true)
        .max_bytes_per_file(1000)
        .build();
    let md = generate(&options).unwrap();

    let start = md.find("```text\nA").expect("content fence missing") + "```text\n".len();
    let end = md[start..].find("\n```").unwrap() + start;
    let body = &md[start..end];
    assert!(body.len() <= 1000);
    assert!(body.chars().all(|c| c == 'A'));
}

#[test]
fn test_oversized_file_placeholder_regardless_of_extension() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("big.bin"), vec![b'x'; 5000]).unwrap();

    let options = GenerateBuilder::new(dir.path())
        .include_contents(true)
        .max_file_size_bytes(100)
        .build();
    let md = generate(&options).unwrap();

    assert!(md.contains("### `big.bin`"));
    assert!(md.contains("> Skipped (file size 5000 bytes exceeds limit of 100)."));
    assert!(!md.contains("xxxx"));
}

#[test]
fn test_unsupported_extension_placeholder() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("data.bin"), "payload").unwrap();

    let options = GenerateBuilder::new(dir.path()).include_contents(true).build();
    let md = generate(&options).unwrap();

    assert!(md.contains("### `data.bin`"));
    assert!(md.contains("> Skipped (non-text or unsupported extension)."));
    assert!(!md.contains("payload"));
}

#[test]
fn test_dockerfile_is_inlined_by_name() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("Dockerfile"), "FROM alpine").unwrap();

    let options = GenerateBuilder::new(dir.path()).include_contents(true).build();
    let md = generate(&options).unwrap();

    assert!(md.contains("```dockerfile\nFROM alpine\n```"));
}

#[test]
fn test_invalid_utf8_placeholder() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, 0x00, 0x41]).unwrap();

    let options = GenerateBuilder::new(dir.path()).include_contents(true).build();
    let md = generate(&options).unwrap();

    assert!(md.contains("### `bad.txt`"));
    assert!(md.contains("> Skipped (failed to read as UTF-8)."));
}

#[test]
fn test_budget_already_exhausted_stops_before_first_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();

    // The header alone exceeds this cap.
    let options = GenerateBuilder::new(dir.path())
        .include_contents(true)
        .max_total_bytes(100)
        .build();
    let md = generate(&options).unwrap();

    assert_eq!(
        md.matches("> Stopped inlining more files (reached max total bytes = 100).")
            .count(),
        1
    );
    assert!(!md.contains("### `"));
}

#[test]
fn test_budget_stop_notice_before_oversized_section() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("small.txt"), "tiny").unwrap();
    fs::write(dir.path().join("big.py"), "y".repeat(10_000)).unwrap();

    let options = GenerateBuilder::new(dir.path())
        .include_contents(true)
        .max_bytes_per_file(0)
        .max_total_bytes(4000)
        .build();
    let md = generate(&options).unwrap();

    // Exactly one stop notice, and the oversized file's body never appears.
    assert_eq!(md.matches("> Stopped").count(), 1);
    assert!(!md.contains("yyyy"));
    // Emitted output stays within the cap plus one notice and the trailer.
    assert!(md.len() < 4000 + 250);
}

#[test]
fn test_round_trip_without_truncation() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("hello.txt"), "hello world").unwrap();

    let options = GenerateBuilder::new(dir.path()).include_contents(true).build();
    let md = generate(&options).unwrap();

    assert!(md.contains("```text\nhello world\n```"));
    assert!(!md.contains("Stopped"));
}

#[test]
fn test_analysis_runs_on_untruncated_text() {
    let dir = tempdir().unwrap();
    // 30 lines, truncated to 5 for display; LOC must still be 30.
    let content = (0..30).map(|i| format!("x{i} = {i}\n")).collect::<String>();
    fs::write(dir.path().join("long.py"), &content).unwrap();

    let options = GenerateBuilder::new(dir.path())
        .include_contents(true)
        .analyze(true)
        .max_lines_per_file(5)
        .build();
    let md = generate(&options).unwrap();

    assert!(md.contains("- LOC: 31"));
    assert!(md.contains("…[truncated to 5 lines]"));
    assert!(md.contains("- Suggested header:"));
}

#[test]
fn test_header_reflects_options() {
    let dir = tempdir().unwrap();
    let options = GenerateBuilder::new(dir.path())
        .include_contents(true)
        .analyze(true)
        .build();
    let md = generate(&options).unwrap();

    assert!(md.contains("- **Root:** `"));
    assert!(md.contains("- **Generated:** "));
    assert!(md.contains("\"includeContents\": true"));
    assert!(md.contains("> This file contains a directory tree and inlined file contents. Analysis is enabled."));

    let options = GenerateBuilder::new(dir.path()).build();
    let md = generate(&options).unwrap();
    assert!(md.contains("> This file contains a directory tree and no inlined file contents."));
}
