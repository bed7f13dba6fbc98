//! Version and changelog derivation from source-control history

use std::path::PathBuf;
use std::process::Command;

use chrono::{DateTime, TimeZone};
use sanepack_core::Person;
use serde::Serialize;
use tracing::debug;

use crate::error::{DebianError, Result};

/// Tags considered when looking for the current version
pub const TAG_PATTERN: &str = "[vV]*";

/// Read-only queries against a project's history.
///
/// Both methods return the raw query output.
pub trait HistorySource {
    /// Most recent reachable tag matching [`TAG_PATTERN`]
    fn latest_tag(&self) -> Result<String>;

    /// One summary line per commit, newest first, with merged side
    /// branches folded into their merge commit
    fn change_log(&self) -> Result<String>;
}

/// [`HistorySource`] backed by the `git` executable
#[derive(Debug, Clone)]
pub struct GitHistory {
    repo_dir: PathBuf,
}

impl GitHistory {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self { repo_dir: repo_dir.into() }
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        debug!("Running git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|e| DebianError::history_unavailable(format!("failed to run git: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DebianError::history_unavailable(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl HistorySource for GitHistory {
    fn latest_tag(&self) -> Result<String> {
        let pattern = format!("--match={TAG_PATTERN}");
        self.run(&["describe", "--abbrev=0", "--tags", &pattern])
    }

    fn change_log(&self) -> Result<String> {
        self.run(&["--no-pager", "log", "--first-parent", "--pretty=format:%s"])
    }
}

/// Turn a tag into a Debian upstream version.
///
/// Drops the trailing line terminator and exactly one leading `v` or `V`.
/// The result must start with a decimal digit.
pub fn normalize_version(tag: &str) -> Result<String> {
    let trimmed = tag.trim_end_matches(|c: char| c == '\n' || c == '\r');
    let version = trimmed
        .strip_prefix(|c: char| c == 'v' || c == 'V')
        .unwrap_or(trimmed);

    match version.chars().next() {
        Some(first) if first.is_ascii_digit() => Ok(version.to_string()),
        Some(_) => Err(DebianError::invalid_version(version, "must start with a decimal digit")),
        None => Err(DebianError::invalid_version(version, "version cannot be empty")),
    }
}

/// Split log output into change entries, preserving order
pub fn parse_changes(log: &str) -> Vec<String> {
    log.lines().map(str::to_string).collect()
}

/// Version and change entries derived from history
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VersionHistory {
    pub version: String,
    pub changes: Vec<String>,
}

impl VersionHistory {
    /// Query the source for the latest tag and the change log
    pub fn extract(source: &dyn HistorySource) -> Result<Self> {
        let tag = source.latest_tag()?;
        let version = normalize_version(&tag)?;
        debug!("Derived version {version} from tag {:?}", tag.trim_end());

        let changes = parse_changes(&source.change_log()?);
        debug!("Found {} change entries", changes.len());

        Ok(Self { version, changes })
    }
}

/// Render-ready contents of debian/changelog
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChangelogFile {
    pub name: String,
    pub version: String,
    pub date: String,
    pub maintainer: Person,
    pub changes: Vec<String>,
}

impl ChangelogFile {
    /// `date` is the generation time, formatted per RFC 2822
    pub fn new<Tz>(
        name: &str,
        history: VersionHistory,
        maintainer: &Person,
        date: DateTime<Tz>,
    ) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            name: name.to_string(),
            version: history.version,
            date: date.to_rfc2822(),
            maintainer: maintainer.clone(),
            changes: history.changes,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::FixedOffset;

    use super::*;

    /// History source answering from fixed strings
    pub(crate) struct FixedHistory {
        pub tag: Option<&'static str>,
        pub log: &'static str,
    }

    impl HistorySource for FixedHistory {
        fn latest_tag(&self) -> Result<String> {
            self.tag
                .map(str::to_string)
                .ok_or_else(|| DebianError::history_unavailable("no names found"))
        }

        fn change_log(&self) -> Result<String> {
            Ok(self.log.to_string())
        }
    }

    #[test]
    fn test_normalize_version() {
        assert_eq!(normalize_version("v1.2.3\n").unwrap(), "1.2.3");
        assert_eq!(normalize_version("V0.9\n").unwrap(), "0.9");
        assert_eq!(normalize_version("2.0\n").unwrap(), "2.0");
        assert_eq!(normalize_version("v3.1\r\n").unwrap(), "3.1");
    }

    #[test]
    fn test_normalize_version_strips_one_prefix() {
        assert!(matches!(
            normalize_version("vv1.0\n"),
            Err(DebianError::InvalidVersion { version, .. }) if version == "v1.0"
        ));
        assert!(normalize_version("v\n").is_err());
        assert!(normalize_version("").is_err());
    }

    #[test]
    fn test_parse_changes_keeps_order() {
        let changes = parse_changes("third\nsecond\nsecond\nfirst");
        assert_eq!(changes, vec!["third", "second", "second", "first"]);
        assert!(parse_changes("").is_empty());
    }

    #[test]
    fn test_extract() {
        let source = FixedHistory { tag: Some("v1.0.0\n"), log: "Fix bug\nInitial commit" };
        let history = VersionHistory::extract(&source).unwrap();

        assert_eq!(history.version, "1.0.0");
        assert_eq!(history.changes, vec!["Fix bug", "Initial commit"]);
    }

    #[test]
    fn test_extract_without_tag() {
        let source = FixedHistory { tag: None, log: "Initial commit" };
        assert!(matches!(
            VersionHistory::extract(&source),
            Err(DebianError::HistoryUnavailable { .. })
        ));
    }

    #[test]
    fn test_git_history_outside_repository() {
        let dir = tempfile::tempdir().unwrap();
        let history = GitHistory::new(dir.path());
        assert!(matches!(history.latest_tag(), Err(DebianError::HistoryUnavailable { .. })));
    }

    #[test]
    fn test_changelog_date_format() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let date = offset.with_ymd_and_hms(2010, 3, 22, 0, 37, 31).unwrap();
        let history = VersionHistory { version: "1.0".to_string(), changes: Vec::new() };

        let changelog =
            ChangelogFile::new("foo", history, &Person::new("Jane", "jane@x.org"), date);
        assert_eq!(changelog.date, "Mon, 22 Mar 2010 00:37:31 +0100");
    }
}
