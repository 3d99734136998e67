use indexmap::IndexMap;

use crate::{
    config::DEFAULT_SECTIONS,
    git::{Commit, Commits},
    BREAKING_TYPE,
};

/// Commits bucketed by type, in the order they are written out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    /// Every commit flagged breaking, whatever its type
    pub breaking: Commits,
    /// The natural groups, type -> commits. Known types come first in
    /// priority order, unknown types follow in the order they were seen.
    pub sections: IndexMap<String, Commits>,
    /// Number of commits grouped
    pub total: usize,
    /// Hash of the first (newest) commit
    pub latest: Option<String>,
}

impl SectionMap {
    /// Creates a section map from a vector of commits (newest first) using
    /// the default type priority
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use std::fs::File;
    /// # use convlog::{Changelog, SectionMap};
    /// # use convlog::fmt::{FormatWriter, MarkdownWriter};
    /// let changelog = Changelog::new();
    ///
    /// // Get the commits we're interested in...
    /// let sm = SectionMap::from_commits(changelog.get_commits());
    ///
    /// let mut file = File::create("my_changelog.md").unwrap();
    /// let mut writer = MarkdownWriter::new(&mut file);
    /// writer.write_changelog(&changelog, &sm).unwrap();
    /// ```
    pub fn from_commits(commits: Commits) -> SectionMap {
        SectionMap::with_priority(commits, DEFAULT_SECTIONS.iter().map(|(t, _)| *t))
    }

    /// Creates a section map, ordering the known types as `priority` lists
    /// them
    pub fn with_priority<'a, I>(commits: Commits, priority: I) -> SectionMap
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut sm = SectionMap {
            total: commits.len(),
            latest: commits.first().map(|c| c.hash.clone()),
            ..SectionMap::default()
        };

        for entry in commits {
            if entry.breaking {
                sm.breaking.push(entry.clone());
            }
            sm.sections
                .entry(entry.commit_type.clone())
                .or_insert_with(Vec::new)
                .push(entry);
        }

        let priority: Vec<&str> = priority.into_iter().collect();
        let rank = |ty: &str| priority.iter().position(|p| *p == ty).unwrap_or(priority.len());
        // stable, so unknown types keep first-seen order
        sm.sections.sort_by(|a, _, b, _| rank(a.as_str()).cmp(&rank(b.as_str())));

        sm
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterates the non-empty groups in emission order, the breaking group
    /// (keyed [`BREAKING_TYPE`]) first
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Commits)> {
        let breaking = (!self.breaking.is_empty()).then_some((BREAKING_TYPE, &self.breaking));
        breaking.into_iter().chain(
            self.sections
                .iter()
                .filter(|(_, v)| !v.is_empty())
                .map(|(k, v)| (k.as_str(), v)),
        )
    }

    /// The commits of the natural groups in emission order. Grouping this
    /// list again yields the same map, except for `latest` which follows the
    /// new first commit.
    pub fn commits(&self) -> Commits {
        self.sections.values().flatten().cloned().collect()
    }

    pub fn get(&self, commit_type: &str) -> Option<&[Commit]> {
        self.sections.get(commit_type).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(ty: &str, subject: &str, breaking: bool) -> Commit {
        Commit {
            hash: format!("{:0<8}", subject.len()),
            author: "dev".into(),
            date: "2024-01-01".into(),
            commit_type: ty.into(),
            scope: None,
            subject: subject.into(),
            breaking,
            raw_message: format!("{ty}: {subject}"),
        }
    }

    #[test]
    fn breaking_commit_lands_in_both_groups() {
        let sm = SectionMap::from_commits(vec![
            commit("feat", "add x", false),
            commit("fix", "y", true),
        ]);

        assert_eq!(sm.breaking.len(), 1);
        assert_eq!(sm.breaking[0].subject, "y");
        assert_eq!(sm.get("fix").map(|c| c.len()), Some(1));
        assert_eq!(sm.get("feat").map(|c| c.len()), Some(1));
        assert_eq!(sm.total, 2);
    }

    #[test]
    fn emission_order() {
        let sm = SectionMap::from_commits(vec![
            commit("wip", "a", false),
            commit("chore", "b", false),
            commit("fix", "c", true),
            commit("zzz", "d", false),
            commit("feat", "e", false),
            commit("fix", "f", false),
        ]);

        let order: Vec<&str> = sm.iter().map(|(t, _)| t).collect();
        assert_eq!(order, ["breaking", "feat", "fix", "chore", "wip", "zzz"]);

        let fixes: Vec<&str> = sm.get("fix").unwrap().iter().map(|c| &*c.subject).collect();
        assert_eq!(fixes, ["c", "f"]);
    }

    #[test]
    fn no_breaking_group_when_nothing_breaks() {
        let sm = SectionMap::from_commits(vec![commit("docs", "a", false)]);
        assert_eq!(sm.iter().next().map(|(t, _)| t), Some("docs"));
    }

    #[test]
    fn custom_priority() {
        let sm = SectionMap::with_priority(
            vec![commit("feat", "a", false), commit("security", "b", false)],
            ["security", "feat"],
        );
        let order: Vec<&str> = sm.iter().map(|(t, _)| t).collect();
        assert_eq!(order, ["security", "feat"]);
    }

    #[test]
    fn regrouping_is_idempotent() {
        let sm = SectionMap::from_commits(vec![
            commit("misc", "a", false),
            commit("feat", "b", true),
            commit("fix", "c", false),
            commit("feat", "d", false),
        ]);
        let again = SectionMap::from_commits(sm.commits());

        assert_eq!(again.sections, sm.sections);
        assert_eq!(again.breaking, sm.breaking);
        assert_eq!(again.total, sm.total);
        assert_eq!(SectionMap::from_commits(again.commits()), again);
    }

    #[test]
    fn empty() {
        let sm = SectionMap::from_commits(vec![]);
        assert!(sm.is_empty());
        assert_eq!(sm.latest, None);
        assert_eq!(sm.iter().count(), 0);
    }

    #[test]
    fn latest_is_first_commit() {
        let sm = SectionMap::from_commits(vec![
            commit("fix", "abc", false),
            commit("feat", "x", false),
        ]);
        assert_eq!(sm.latest.as_deref(), Some("30000000"));
    }
}
