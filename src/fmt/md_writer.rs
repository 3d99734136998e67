use std::io;

use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

use crate::{
    changelog::Changelog, error::Result, fmt::FormatWriter, git::Commit, marker,
    sectionmap::SectionMap,
};

const DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
const DATE_TIME: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Wraps a `std::io::Write` object to write `convlog` output in a Markdown
/// format
///
/// # Example
///
/// ```no_run
/// # use std::fs::File;
/// # use convlog::{Changelog, fmt::{FormatWriter, MarkdownWriter}};
/// let changelog = Changelog::new();
///
/// // Get the commits we're interested in...
/// let sm = changelog.section_map(changelog.get_commits());
///
/// // Create a file to hold our results, which the MarkdownWriter will wrap
/// let mut file = File::create("my_changelog.md").unwrap();
///
/// // Create the MarkdownWriter
/// let mut writer = MarkdownWriter::new(&mut file);
///
/// // Use the MarkdownWriter to write the changelog
/// writer.write_changelog(&changelog, &sm).unwrap();
/// ```
pub struct MarkdownWriter<'a>(&'a mut dyn io::Write);

impl<'a> MarkdownWriter<'a> {
    /// Creates a new instance of the `MarkdownWriter` struct using a
    /// `std::io::Write` object.
    pub fn new<T: io::Write + 'a>(writer: &'a mut T) -> MarkdownWriter<'a> {
        MarkdownWriter(writer)
    }

    fn write_header(&mut self, options: &Changelog, now: OffsetDateTime) -> Result<()> {
        let version = options.version.as_deref().unwrap_or("Unreleased");
        let date = now.format(DATE)?;

        write!(self.0, "# Changelog\n\n## [{version}] - {date}\n\n").map_err(Into::into)
    }

    /// Writes a particular section of a changelog
    fn write_section(
        &mut self,
        options: &Changelog,
        title: &str,
        entries: &[Commit],
    ) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        write!(self.0, "### {title}\n\n")?;

        for entry in entries {
            write!(self.0, "- ")?;
            if let Some(ref scope) = entry.scope {
                write!(self.0, "**{scope}**: ")?;
            }
            write!(self.0, "{}", entry.subject)?;
            if entry.breaking {
                write!(self.0, " ⚠️")?;
            }

            match options.repo.as_deref() {
                Some(repo) if !repo.is_empty() => write!(
                    self.0,
                    " ([{}]({}))",
                    entry.hash,
                    options.link_style.commit_link(&entry.hash, repo)
                )?,
                _ => write!(self.0, " ([{}])", entry.hash)?,
            }

            writeln!(self.0, " by {}", entry.author)?;
        }

        writeln!(self.0).map_err(Into::into)
    }

    fn write_footer(&mut self, sm: &SectionMap, now: OffsetDateTime) -> Result<()> {
        write!(
            self.0,
            "\n---\n\n**Summary**\n- Commits in this update: {}\n- Generated on: {}\n\n",
            sm.total,
            now.format(DATE_TIME)?
        )?;

        if let Some(ref latest) = sm.latest {
            write!(
                self.0,
                "**Next generation usage**:\n```bash\n{} --since {latest}\n```\n\n",
                env!("CARGO_PKG_NAME")
            )?;
            writeln!(self.0, "{}", marker::marker_for(latest))?;
        }

        Ok(())
    }

    fn write_empty(&mut self, now: OffsetDateTime) -> Result<()> {
        write!(
            self.0,
            "# Changelog\n\nThis document records important changes to the project.\n\n\
             ## [Unreleased] - {}\n\nNo changes recorded yet.\n",
            now.format(DATE)?
        )
        .map_err(Into::into)
    }
}

impl<'a> FormatWriter for MarkdownWriter<'a> {
    fn write_changelog(&mut self, options: &Changelog, sm: &SectionMap) -> Result<()> {
        let now = options.timestamp();

        if sm.is_empty() {
            self.write_empty(now)?;
        } else {
            self.write_header(options, now)?;
            for (commit_type, entries) in sm.iter() {
                self.write_section(options, &options.section_title(commit_type), entries)?;
            }
            self.write_footer(sm, now)?;
        }

        self.0.flush().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::LinkStyle;

    fn commit(ty: &str, scope: Option<&str>, subject: &str, breaking: bool, hash: &str) -> Commit {
        Commit {
            hash: hash.into(),
            author: "Jane Doe".into(),
            date: "2024-06-01".into(),
            commit_type: ty.into(),
            scope: scope.map(Into::into),
            subject: subject.into(),
            breaking,
            raw_message: String::new(),
        }
    }

    fn render(options: &Changelog, sm: &SectionMap) -> String {
        let mut out = Vec::new();
        MarkdownWriter::new(&mut out)
            .write_changelog(options, sm)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn options() -> Changelog {
        Changelog::new().generated_at(datetime!(2024-06-02 13:04:05 UTC))
    }

    #[test]
    fn empty_changelog_template() {
        let out = render(&options(), &SectionMap::default());
        assert_eq!(
            out,
            "# Changelog\n\n\
             This document records important changes to the project.\n\n\
             ## [Unreleased] - 2024-06-02\n\n\
             No changes recorded yet.\n"
        );
    }

    #[test]
    fn full_layout() {
        let options = options().version("1.2.0");
        let sm = options.section_map(vec![
            commit("feat", Some("api"), "add x", false, "aaaaaaaa"),
            commit("fix", None, "y", true, "bbbbbbbb"),
            commit("wip", None, "half done", false, "cccccccc"),
        ]);

        let expected = "# Changelog\n\n\
            ## [1.2.0] - 2024-06-02\n\n\
            ### 💥 Breaking Changes\n\n\
            - y ⚠️ ([bbbbbbbb]) by Jane Doe\n\n\
            ### ✨ Features\n\n\
            - **api**: add x ([aaaaaaaa]) by Jane Doe\n\n\
            ### 🐛 Bug Fixes\n\n\
            - y ⚠️ ([bbbbbbbb]) by Jane Doe\n\n\
            ### 🔄 WIP\n\n\
            - half done ([cccccccc]) by Jane Doe\n\n\
            \n---\n\n\
            **Summary**\n\
            - Commits in this update: 3\n\
            - Generated on: 2024-06-02 13:04:05\n\n\
            **Next generation usage**:\n\
            ```bash\n\
            convlog --since aaaaaaaa\n\
            ```\n\n\
            <!-- LATEST_COMMIT_HASH: aaaaaaaa -->\n";

        assert_eq!(render(&options, &sm), expected);
    }

    #[test]
    fn unreleased_by_default() {
        let options = options();
        let sm = options.section_map(vec![commit("docs", None, "readme", false, "dddddddd")]);
        let out = render(&options, &sm);
        assert!(out.starts_with(
            "# Changelog\n\n## [Unreleased] - 2024-06-02\n\n### 📚 Documentation\n"
        ));
    }

    #[test]
    fn hashes_become_links_with_a_repository() {
        let options = options()
            .repository("https://gitlab.com/acme/widgets")
            .link_style(LinkStyle::Gitlab);
        let sm = options.section_map(vec![commit("perf", None, "faster", false, "eeeeeeee")]);
        let out = render(&options, &sm);
        assert!(out.contains(
            "- faster ([eeeeeeee](https://gitlab.com/acme/widgets/commit/eeeeeeee)) by Jane Doe\n"
        ));
    }

    #[test]
    fn marker_is_readable() {
        let options = options();
        let sm = options.section_map(vec![commit("ci", None, "cache", false, "0f0f0f0f")]);
        let out = render(&options, &sm);
        assert_eq!(marker::latest_hash_in(&out).as_deref(), Some("0f0f0f0f"));
        assert!(out.ends_with("<!-- LATEST_COMMIT_HASH: 0f0f0f0f -->\n"));
    }
}
