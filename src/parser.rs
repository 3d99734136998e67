//! Classification of raw commits into conventional commits.
//!
//! A subject of the form `type(scope)!: subject` is split into its parts,
//! anything else lands in the fallback type with the whole line as subject.

use crate::{
    git::{short_hash, Commit, RawCommit},
    FALLBACK_TYPE,
};

/// Parses a raw commit using [`FALLBACK_TYPE`] for non-conforming subjects.
///
/// # Example
///
/// ```
/// # use convlog::{git::RawCommit, parser::parse_commit};
/// let raw = RawCommit {
///     hash: "0123456789abcdef".into(),
///     message: "feat(cli)!: drop the --legacy flag".into(),
///     ..Default::default()
/// };
/// let commit = parse_commit(&raw);
/// assert_eq!(commit.commit_type, "feat");
/// assert_eq!(commit.scope.as_deref(), Some("cli"));
/// assert!(commit.breaking);
/// ```
pub fn parse_commit(raw: &RawCommit) -> Commit {
    parse_commit_with(raw, FALLBACK_TYPE)
}

/// Parses a raw commit, classifying non-conforming subjects as `fallback`.
/// Never fails.
pub fn parse_commit_with(raw: &RawCommit, fallback: &str) -> Commit {
    let header = regex!(
        r"^(?P<type>\w+)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?: (?P<subject>.+)$"
    );

    let (commit_type, scope, subject, breaking) = match header.captures(&raw.message) {
        Some(caps) => (
            caps["type"].to_lowercase(),
            caps.name("scope").map(|m| m.as_str().to_owned()),
            caps["subject"].to_owned(),
            caps.name("breaking").is_some() || has_breaking_footer(&raw.body),
        ),
        None => (fallback.to_owned(), None, raw.message.clone(), false),
    };

    Commit {
        hash: short_hash(&raw.hash).to_owned(),
        author: raw.author.clone(),
        date: raw.date.clone(),
        commit_type,
        scope,
        subject,
        breaking,
        raw_message: raw.message.clone(),
    }
}

fn has_breaking_footer(body: &str) -> bool {
    body.lines()
        .any(|l| l.starts_with("BREAKING CHANGE:") || l.starts_with("BREAKING-CHANGE:"))
}
