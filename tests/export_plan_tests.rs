use gitporter::errors::ExportError;
use gitporter::plan::ExportPlan;
use gitporter::IgnoreRuleSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn planned_relatives(root: &Path, output_dir: &Path) -> Vec<PathBuf> {
    let rules = IgnoreRuleSet::load(root).unwrap();
    let plan = ExportPlan::build(root, output_dir, &rules).unwrap();
    plan.entries()
        .iter()
        .map(|entry| entry.relative.clone())
        .collect()
}

#[test]
fn test_plan_skips_the_pattern_file_itself() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write_file(&root.join(".gitignore"), "*.log\n");
    write_file(&root.join("a.txt"), "alpha");

    let relatives = planned_relatives(root, &root.join("out"));
    assert_eq!(relatives, vec![PathBuf::from("a.txt")]);
}

#[test]
fn test_plan_prunes_the_output_directory() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write_file(&root.join(".gitignore"), "");
    write_file(&root.join("a.txt"), "alpha");
    write_file(&root.join("out").join("previous.txt"), "old");

    let relatives = planned_relatives(root, &root.join("out"));
    assert_eq!(relatives, vec![PathBuf::from("a.txt")]);
}

#[test]
fn test_plan_is_sorted_and_stable() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write_file(&root.join(".gitignore"), "");
    write_file(&root.join("zeta.txt"), "z");
    write_file(&root.join("alpha.txt"), "a");
    write_file(&root.join("mid").join("beta.txt"), "b");

    let first = planned_relatives(root, &root.join("out"));
    let second = planned_relatives(root, &root.join("out"));
    assert_eq!(first, second);
    assert_eq!(
        first,
        vec![
            PathBuf::from("alpha.txt"),
            PathBuf::from("mid").join("beta.txt"),
            PathBuf::from("zeta.txt"),
        ]
    );
}

#[test]
fn test_directory_only_pattern_spares_similarly_named_files() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write_file(&root.join(".gitignore"), "build/\n");
    write_file(&root.join("build").join("out.bin"), "bin");
    write_file(&root.join("buildinfo.txt"), "info");

    let relatives = planned_relatives(root, &root.join("out"));
    assert_eq!(relatives, vec![PathBuf::from("buildinfo.txt")]);
}

#[test]
fn test_anchored_pattern_only_matches_at_root() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write_file(&root.join(".gitignore"), "/top.txt\n");
    write_file(&root.join("top.txt"), "root copy");
    write_file(&root.join("sub").join("top.txt"), "nested copy");

    let relatives = planned_relatives(root, &root.join("out"));
    assert_eq!(relatives, vec![PathBuf::from("sub").join("top.txt")]);
}

#[test]
fn test_comments_and_blank_lines_are_ignored() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write_file(&root.join(".gitignore"), "# build artifacts\n\n*.tmp\n");
    write_file(&root.join("scratch.tmp"), "tmp");
    write_file(&root.join("a.txt"), "alpha");

    let relatives = planned_relatives(root, &root.join("out"));
    assert_eq!(relatives, vec![PathBuf::from("a.txt")]);
}

#[test]
fn test_double_star_pattern_matches_nested_paths() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write_file(&root.join(".gitignore"), "**/generated/*.rs\n");
    write_file(&root.join("a").join("generated").join("x.rs"), "x");
    write_file(&root.join("a").join("generated").join("x.txt"), "x");

    let relatives = planned_relatives(root, &root.join("out"));
    assert_eq!(
        relatives,
        vec![PathBuf::from("a").join("generated").join("x.txt")]
    );
}

#[test]
fn test_files_under_excluded_directory_are_excluded() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    write_file(&root.join(".gitignore"), "target\n");
    write_file(&root.join("target").join("debug").join("app"), "bin");
    write_file(&root.join("src").join("main.rs"), "fn main() {}");

    let relatives = planned_relatives(root, &root.join("out"));
    assert_eq!(relatives, vec![PathBuf::from("src").join("main.rs")]);
}

#[cfg(unix)]
#[test]
fn test_unreadable_pattern_file_is_a_parse_error() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempdir().unwrap();
    let root = temp.path();
    write_file(&root.join(".gitignore"), "*.log\n");
    fs::set_permissions(root.join(".gitignore"), fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits are not enforced for root; nothing to verify then.
    if fs::read(root.join(".gitignore")).is_ok() {
        return;
    }

    let result = IgnoreRuleSet::load(root);
    assert!(matches!(result, Err(ExportError::PatternParseError(_))));
}

#[test]
fn test_missing_pattern_file_is_reported() {
    let temp = tempdir().unwrap();
    let result = IgnoreRuleSet::load(temp.path());
    match result {
        Err(ExportError::MissingPatternFile(path)) => {
            assert_eq!(path, temp.path().join(".gitignore"));
        }
        other => panic!("Expected MissingPatternFile, got {:?}", other.err()),
    }
}
