use std::{
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, error};

use crate::error::{Error, Result};

// Unit and record separators keep `|` and newlines in messages harmless
const FIELD_SEP: char = '\x1f';
const RECORD_SEP: char = '\x1e';
const LOG_FORMAT: &str = "--pretty=format:%H%x1f%an%x1f%ad%x1f%s%x1f%b%x1e";

/// Length of the abbreviated hashes shown in the changelog
pub const SHORT_HASH_LEN: usize = 8;

/// One commit exactly as `git log` reported it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCommit {
    /// The 40 char hash
    pub hash: String,
    pub author: String,
    /// Commit date as `YYYY-MM-DD`
    pub date: String,
    /// The subject line
    pub message: String,
    /// Everything after the subject line, may be empty
    pub body: String,
}

/// The struct representation of a classified `Commit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// The abbreviated hash
    pub hash: String,
    pub author: String,
    pub date: String,
    /// The commit type, lower-cased (`feat`, `fix`, ...)
    pub commit_type: String,
    /// The scope (if any)
    pub scope: Option<String>,
    /// The commit subject
    pub subject: String,
    /// Whether this commit introduces an incompatible change
    pub breaking: bool,
    /// The subject line as it was written
    pub raw_message: String,
}

/// A convienience type for multiple commits
pub type Commits = Vec<Commit>;

/// Abbreviates a full hash the way the changelog shows it.
pub fn short_hash(hash: &str) -> &str {
    hash.get(..SHORT_HASH_LEN).unwrap_or(hash)
}

/// Runs `git` against a working tree (or the current directory).
#[derive(Debug, Clone, Default)]
pub struct GitLog {
    work_tree: Option<PathBuf>,
}

impl GitLog {
    pub fn new() -> Self {
        GitLog::default()
    }

    /// Runs every command as if `git -C <dir>` had been used
    pub fn with_work_tree<P: AsRef<Path>>(dir: P) -> Self {
        GitLog {
            work_tree: Some(dir.as_ref().to_path_buf()),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        if let Some(ref dir) = self.work_tree {
            cmd.arg("-C").arg(dir);
        }
        cmd
    }

    /// Retrieves commits newer than `since` (or the whole history), newest
    /// first.
    ///
    /// A failing `git` is logged and yields an empty list, so a missing
    /// repository or an unknown `since` reference is never fatal.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use convlog::git::GitLog;
    /// let commits = GitLog::new().raw_commits(Some("6d8183f2"));
    /// ```
    pub fn raw_commits(&self, since: Option<&str>) -> Vec<RawCommit> {
        match self.try_raw_commits(since) {
            Ok(commits) => commits,
            Err(e) => {
                error!("Failed to get git commits: {e}");
                vec![]
            }
        }
    }

    /// Same as `raw_commits` but surfaces the failure. A `since` that git
    /// would read as an option is refused before anything runs.
    pub fn try_raw_commits(&self, since: Option<&str>) -> Result<Vec<RawCommit>> {
        let mut cmd = self.command();
        cmd.arg("log").arg("--date=short").arg(LOG_FORMAT);
        if let Some(since) = since {
            if since.is_empty() || since.starts_with('-') {
                return Err(Error::BadRevision(since.to_owned()));
            }
            cmd.arg(format!("{since}..HEAD"));
        }
        debug!("Running {cmd:?}");

        let output = cmd.output()?;
        if !output.status.success() {
            return Err(Error::Git {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(parse_log_output(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Retrieves the abbreviated hash of `HEAD`
    pub fn latest_hash(&self) -> Option<String> {
        let output = self.command().arg("rev-parse").arg("HEAD").output().ok()?;
        if !output.status.success() {
            return None;
        }
        let buf = String::from_utf8_lossy(&output.stdout);
        let hash = short_hash(buf.trim());

        (!hash.is_empty()).then(|| hash.to_owned())
    }
}

/// Splits the output of `git log` with the crate's format into records.
/// Malformed records are skipped.
pub fn parse_log_output(output: &str) -> Vec<RawCommit> {
    output
        .split(RECORD_SEP)
        .map(|record| record.trim_start_matches(['\r', '\n']))
        .filter(|record| !record.is_empty())
        .filter_map(|record| {
            let mut fields = record.splitn(5, FIELD_SEP);
            let hash = fields.next()?;
            let author = fields.next()?;
            let date = fields.next()?;
            let message = fields.next()?;
            let body = fields.next().unwrap_or("");
            if hash.is_empty() {
                return None;
            }

            Some(RawCommit {
                hash: hash.to_owned(),
                author: author.to_owned(),
                date: date.to_owned(),
                message: message.to_owned(),
                body: body.trim().to_owned(),
            })
        })
        .collect()
}
