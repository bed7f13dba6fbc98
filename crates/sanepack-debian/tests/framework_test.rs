use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use sanepack_core::{Copyright, Frameworker, Package, Person};
use sanepack_debian::{DebianError, DebianFrameworker, GitHistory, HistorySource, VersionHistory};
use tempfile::TempDir;

fn templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
}

fn run_git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

fn commit(repo_dir: &Path, message: &str) {
    run_git(repo_dir, &["commit", "--allow-empty", "-m", message]);
}

fn make_git_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    run_git(dir.path(), &["init"]);
    run_git(dir.path(), &["config", "user.name", "test-user"]);
    run_git(dir.path(), &["config", "user.email", "test@example.com"]);
    run_git(dir.path(), &["config", "commit.gpgsign", "false"]);
    run_git(dir.path(), &["config", "tag.gpgsign", "false"]);
    dir
}

fn package() -> Package {
    Package {
        project_name: "foo".to_string(),
        project_owners: vec![Person::new("Jane", "jane@x.org")],
        maintainer: Person::new("Jane", "jane@x.org"),
        description: "bar".to_string(),
        long_description: None,
        homepage: None,
        section: "devel".to_string(),
        priority: "optional".to_string(),
        architecture: "any".to_string(),
        build_depends: vec!["gcc".to_string()],
        depends: vec!["libc6".to_string()],
        recommends: Some(Vec::new()),
        suggests: Some(Vec::new()),
        conflicts: Some(Vec::new()),
        provides: Some(Vec::new()),
        replaces: Some(Vec::new()),
        copyright: Copyright {
            name: "foo".to_string(),
            license: "MIT".to_string(),
            homepage: None,
            files: Vec::new(),
        },
        man_pages: Vec::new(),
        docs: Vec::new(),
        init_script: None,
    }
}

fn changelog_entries(changelog: &str) -> Vec<&str> {
    changelog
        .lines()
        .filter_map(|line| line.strip_prefix("  * "))
        .collect()
}

#[test]
fn test_end_to_end_debian_scaffold() {
    let repo = make_git_repo();
    commit(repo.path(), "Initial commit");
    run_git(repo.path(), &["tag", "v1.0.0"]);
    commit(repo.path(), "Fix packaging");

    let backend = DebianFrameworker::new(repo.path(), templates());
    backend.framework(&package()).unwrap();

    let debian = repo.path().join("debian");
    let control = fs::read_to_string(debian.join("control")).unwrap();
    assert!(control.contains("Depends: libc6, debhelper\n"));
    assert!(!control.contains("Recommends:"));
    assert!(!control.contains("Suggests:"));

    let changelog = fs::read_to_string(debian.join("changelog")).unwrap();
    assert!(changelog.starts_with("foo (1.0.0) unstable; urgency=low\n"));
    assert_eq!(changelog_entries(&changelog), vec!["Fix packaging", "Initial commit"]);

    for file in ["copyright", "compat", "rules", "docs", "foo.manpages"] {
        assert!(debian.join(file).is_file(), "missing debian/{file}");
    }
    assert!(backend.info().contains("dpkg-buildpackage"));
}

#[test]
fn test_rerun_fails_without_further_writes() {
    let repo = make_git_repo();
    commit(repo.path(), "Initial commit");
    run_git(repo.path(), &["tag", "v0.1"]);

    let backend = DebianFrameworker::new(repo.path(), templates());
    backend.generate(&package()).unwrap();

    let control = repo.path().join("debian/control");
    fs::write(&control, "edited by hand\n").unwrap();

    let result = backend.generate(&package());
    assert!(matches!(result, Err(DebianError::DirectoryExists { .. })));
    assert_eq!(fs::read_to_string(&control).unwrap(), "edited by hand\n");
}

#[test]
fn test_merge_collapses_side_branch() {
    let repo = make_git_repo();
    commit(repo.path(), "Initial commit");
    run_git(repo.path(), &["checkout", "-b", "feature"]);
    commit(repo.path(), "Side work one");
    commit(repo.path(), "Side work two");
    run_git(repo.path(), &["checkout", "-"]);
    commit(repo.path(), "Mainline work");
    run_git(repo.path(), &["merge", "--no-ff", "--no-edit", "-m", "Merge feature", "feature"]);
    run_git(repo.path(), &["tag", "V2.0"]);

    let history = VersionHistory::extract(&GitHistory::new(repo.path())).unwrap();

    assert_eq!(history.version, "2.0");
    assert_eq!(history.changes, vec!["Merge feature", "Mainline work", "Initial commit"]);

    let again = VersionHistory::extract(&GitHistory::new(repo.path())).unwrap();
    assert_eq!(again, history);
}

#[test]
fn test_latest_tag_wins() {
    let repo = make_git_repo();
    commit(repo.path(), "Initial commit");
    run_git(repo.path(), &["tag", "v1.0"]);
    commit(repo.path(), "Next");
    run_git(repo.path(), &["tag", "v1.1"]);
    run_git(repo.path(), &["tag", "release-candidate"]);

    let tag = GitHistory::new(repo.path()).latest_tag().unwrap();
    assert_eq!(tag, "v1.1\n");
}

#[test]
fn test_untagged_repository_has_no_history() {
    let repo = make_git_repo();
    commit(repo.path(), "Initial commit");

    let backend = DebianFrameworker::new(repo.path(), templates());
    let result = backend.generate(&package());

    assert!(matches!(result, Err(DebianError::HistoryUnavailable { .. })));
    assert!(!repo.path().join("debian/changelog").exists());
}
