use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::{debug, error};
use time::OffsetDateTime;

use crate::{
    config::{default_sections, RawCfg},
    error::Result,
    fmt::{FormatWriter, MarkdownWriter},
    git::{Commits, GitLog},
    link_style::LinkStyle,
    marker,
    parser::parse_commit_with,
    sectionmap::SectionMap,
    BREAKING_TYPE, DEFAULT_CONFIG_FILE, DEFAULT_OUTPUT, FALLBACK_TYPE,
};

/// The base struct used to set options and interact with the library.
#[derive(Debug, Clone)]
pub struct Changelog {
    /// Where to start looking for commits using a hash (or short hash). The
    /// commit itself is excluded.
    pub since: Option<String>,
    /// The version shown in the release heading (Defaults to `Unreleased`)
    pub version: Option<String>,
    /// The file the changelog is written to (Defaults to `CHANGELOG.md`)
    pub outfile: PathBuf,
    /// The repository used for the base of commit hyper-links
    pub repo: Option<String>,
    /// The link style used for commit hyper-links
    pub link_style: LinkStyle,
    /// Maps commit types to section titles. The order of the keys is the
    /// order sections are written in.
    pub section_map: IndexMap<String, String>,
    /// The type given to commits that aren't conventional commits
    pub fallback_type: String,
    /// The working directory of the git project (Defaults to the current
    /// directory)
    pub git_work_tree: Option<PathBuf>,
    /// Pins the date and time printed in the changelog
    pub generated_at: Option<OffsetDateTime>,
}

impl Default for Changelog {
    fn default() -> Self {
        Changelog {
            since: None,
            version: None,
            outfile: PathBuf::from(DEFAULT_OUTPUT),
            repo: None,
            link_style: LinkStyle::Github,
            section_map: default_sections(),
            fallback_type: FALLBACK_TYPE.to_owned(),
            git_work_tree: None,
            generated_at: None,
        }
    }
}

impl Changelog {
    /// Creates a default `Changelog` working on the current directory.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use convlog::Changelog;
    /// let changelog = Changelog::new();
    /// ```
    pub fn new() -> Self {
        Changelog::default()
    }

    /// Creates a `Changelog` from the default `.convlog.toml` if the file
    /// exists, plain defaults otherwise.
    pub fn from_default_file() -> Result<Self> {
        let cfg = Path::new(DEFAULT_CONFIG_FILE);
        if cfg.is_file() {
            Changelog::from_file(cfg)
        } else {
            debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
            Ok(Changelog::default())
        }
    }

    /// Creates a `Changelog` struct from a TOML configuration file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use convlog::Changelog;
    /// let changelog = Changelog::from_file("/myproject/convlog.toml").unwrap();
    /// ```
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        debug!("Creating changelog with \n\tfile: {:?}", file.as_ref());
        Ok(Changelog::default().with_config(RawCfg::from_file(file)?))
    }

    /// Applies a parsed configuration file on top of the current options.
    /// Sections already known get the configured title, new ones are
    /// appended to the section order.
    pub fn with_config(mut self, cfg: RawCfg) -> Self {
        let RawCfg { convlog, sections } = cfg;

        if let Some(output) = convlog.output {
            self.outfile = output;
        }
        if let Some(repo) = convlog.repository {
            self.repo = Some(repo);
        }
        if let Some(style) = convlog.link_style {
            self.link_style = style;
        }
        if let Some(fallback) = convlog.fallback_type {
            self.fallback_type = fallback.to_lowercase();
        }
        for (commit_type, title) in sections {
            self.section_map.insert(commit_type.to_lowercase(), title);
        }

        debug!("Returning changelog:\n{:?}", self);
        self
    }

    /// Sets how far back to search for commits using a short or full hash
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use convlog::Changelog;
    /// let changelog = Changelog::new().since("6d8183f2");
    /// ```
    pub fn since<S: Into<String>>(mut self, s: S) -> Changelog {
        self.since = Some(s.into());
        self
    }

    /// Sets the version for the release heading
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use convlog::Changelog;
    /// let changelog = Changelog::new().version("v0.2.1-beta3");
    /// ```
    pub fn version<S: Into<String>>(mut self, v: S) -> Changelog {
        self.version = Some(v.into());
        self
    }

    /// Sets the changelog file to write (and to read the resume marker from)
    pub fn outfile<P: AsRef<Path>>(mut self, p: P) -> Changelog {
        self.outfile = p.as_ref().to_path_buf();
        self
    }

    /// Sets the repository used for the base of commit hyper-links
    ///
    /// **NOTE:** Leave off the trailing `.git`
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use convlog::Changelog;
    /// let changelog = Changelog::new().repository("https://github.com/acme/widgets");
    /// ```
    pub fn repository<S: Into<String>>(mut self, r: S) -> Changelog {
        self.repo = Some(r.into());
        self
    }

    /// Sets the link style to use for hyper-links
    pub fn link_style(mut self, l: LinkStyle) -> Changelog {
        self.link_style = l;
        self
    }

    /// Sets the `git` working tree directory (typically your project
    /// directory)
    pub fn git_work_tree<P: AsRef<Path>>(mut self, d: P) -> Changelog {
        self.git_work_tree = Some(d.as_ref().to_path_buf());
        self
    }

    /// Pins the timestamp written in the header and footer
    pub fn generated_at(mut self, at: OffsetDateTime) -> Changelog {
        self.generated_at = Some(at);
        self
    }

    /// Reads the resume marker of the current output file and, when one is
    /// found and no `since` is set yet, starts from it. Returns the hash
    /// that was picked up.
    pub fn resume(&mut self) -> Option<String> {
        if self.since.is_some() {
            return None;
        }
        let found = marker::latest_hash_from(&self.outfile)?;
        debug!("Resuming from {found} found in {:?}", self.outfile);
        self.since = Some(found.clone());
        Some(found)
    }

    fn git(&self) -> GitLog {
        match self.git_work_tree {
            Some(ref dir) => GitLog::with_work_tree(dir),
            None => GitLog::new(),
        }
    }

    /// Retrieves and classifies the commits after `since`, newest first. A
    /// failing `git` yields no commits.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use convlog::Changelog;
    /// let changelog = Changelog::new();
    /// let commits = changelog.get_commits();
    /// ```
    pub fn get_commits(&self) -> Commits {
        match self.try_get_commits() {
            Ok(commits) => commits,
            Err(e) => {
                error!("Failed to get git commits: {e}");
                vec![]
            }
        }
    }

    /// Same as `get_commits` but hands the `git` failure back to the caller
    pub fn try_get_commits(&self) -> Result<Commits> {
        Ok(self
            .git()
            .try_raw_commits(self.since.as_deref())?
            .iter()
            .map(|raw| parse_commit_with(raw, &self.fallback_type))
            .collect())
    }

    /// Retrieves the abbreviated hash of `HEAD`
    pub fn latest_hash(&self) -> Option<String> {
        self.git().latest_hash()
    }

    /// Groups commits using the configured section order
    pub fn section_map(&self, commits: Commits) -> SectionMap {
        SectionMap::with_priority(commits, self.section_map.keys().map(String::as_str))
    }

    /// Retrieves the section title for a given commit type
    ///
    /// # Example
    ///
    /// ```
    /// # use convlog::Changelog;
    /// let changelog = Changelog::new();
    /// assert_eq!("✨ Features", changelog.section_title("feat"));
    /// assert_eq!("🔄 WIP", changelog.section_title("wip"));
    /// ```
    pub fn section_title(&self, commit_type: &str) -> String {
        if commit_type == BREAKING_TYPE {
            return "💥 Breaking Changes".to_owned();
        }
        match self.section_map.get(commit_type) {
            Some(title) => title.clone(),
            None => format!("🔄 {}", commit_type.to_uppercase()),
        }
    }

    /// The time printed in the changelog, local when the offset is known
    pub fn timestamp(&self) -> OffsetDateTime {
        self.generated_at.unwrap_or_else(|| {
            OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
        })
    }

    /// Fetches, groups and writes the changelog to `outfile`, replacing its
    /// contents. Returns the number of commits written.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use convlog::Changelog;
    /// let changelog = Changelog::new().version("1.0.0");
    /// changelog.write_changelog().unwrap();
    /// ```
    pub fn write_changelog(&self) -> Result<usize> {
        let sm = self.section_map(self.get_commits());
        self.write_section_map(&sm)?;
        Ok(sm.total)
    }

    /// Writes already grouped commits to `outfile`, replacing its contents
    pub fn write_section_map(&self, sm: &SectionMap) -> Result<()> {
        debug!("Writing changelog to file: {:?}", self.outfile);
        let file = File::create(&self.outfile)?;
        let mut out_buf = BufWriter::new(file);
        let mut writer = MarkdownWriter::new(&mut out_buf);
        self.write_changelog_with(&mut writer, sm)
    }

    /// Writes grouped commits with a specified `FormatWriter` format
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use convlog::{Changelog, fmt::MarkdownWriter};
    /// # use std::io;
    /// let changelog = Changelog::new();
    /// let sm = changelog.section_map(changelog.get_commits());
    ///
    /// // Write changelog to stdout in Markdown format
    /// let out = io::stdout();
    /// let mut out_buf = io::BufWriter::new(out.lock());
    /// let mut writer = MarkdownWriter::new(&mut out_buf);
    ///
    /// changelog.write_changelog_with(&mut writer, &sm).unwrap();
    /// ```
    pub fn write_changelog_with<W>(&self, writer: &mut W, sm: &SectionMap) -> Result<()>
    where
        W: FormatWriter,
    {
        writer.write_changelog(self, sm)
    }
}
