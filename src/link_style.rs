use std::{result::Result as StdResult, str::FromStr};

use strum::{Display, EnumString};

/// Determines the hyperlink style used for commit links. Defaults to
/// `LinkStyle::Github`
///
/// # Example
///
/// ```no_run
/// # use convlog::{LinkStyle, Changelog};
/// let changelog = Changelog::new()
///     .repository("https://example.com/stash/projects/x/repos/y")
///     .link_style(LinkStyle::Stash);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, EnumString, Display)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum LinkStyle {
    #[default]
    Github,
    Gitlab,
    Stash,
    Cgit,
    Gitweb,
}

impl<'de> serde::de::Deserialize<'de> for LinkStyle {
    fn deserialize<D>(deserializer: D) -> StdResult<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl LinkStyle {
    /// Gets a hyperlink url to a commit in the specified format.
    ///
    /// # Example
    /// ```
    /// # use convlog::LinkStyle;
    /// let link = LinkStyle::Github;
    /// let commit = link.commit_link("123abc89", "https://github.com/acme/widgets");
    ///
    /// assert_eq!("https://github.com/acme/widgets/commit/123abc89", commit);
    /// ```
    ///
    /// # Example
    /// Note that for `LinkStyle::Gitweb` the actual repository name has to be
    /// given as part of the parameter string of the URL:
    ///
    /// ```
    /// # use convlog::LinkStyle;
    /// let link = LinkStyle::Gitweb;
    /// let commit = link.commit_link("deadbeef", "http://example.com/gitweb/?p=foo.git");
    ///
    /// assert_eq!("http://example.com/gitweb/?p=foo.git;a=commit;h=deadbeef", commit);
    /// ```
    pub fn commit_link(&self, hash: &str, repo: &str) -> String {
        let repo = repo.trim_end_matches('/');
        match *self {
            LinkStyle::Github | LinkStyle::Gitlab => format!("{repo}/commit/{hash}"),
            LinkStyle::Stash => format!("{repo}/commits/{hash}"),
            LinkStyle::Cgit => format!("{repo}/commit/?id={hash}"),
            LinkStyle::Gitweb => format!("{repo};a=commit;h={hash}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("GitHub".parse::<LinkStyle>().ok(), Some(LinkStyle::Github));
        assert_eq!("cgit".parse::<LinkStyle>().ok(), Some(LinkStyle::Cgit));
        assert!("bitbucket".parse::<LinkStyle>().is_err());
        assert_eq!(LinkStyle::Stash.to_string(), "stash");
    }

    #[test]
    fn test_gitweb_commit_link() {
        let link = LinkStyle::Gitweb;
        let hash = "deadbeef";
        let commit = link.commit_link(hash, "http://example.com/gitweb/?p=foo.git");
        assert_eq!(format!("http://example.com/gitweb/?p=foo.git;a=commit;h={}", &hash), commit);
    }

    #[test]
    fn trailing_slash_is_dropped() {
        assert_eq!(
            LinkStyle::Stash.commit_link("cafebabe", "https://stash.local/repos/x/"),
            "https://stash.local/repos/x/commits/cafebabe"
        );
        assert_eq!(
            LinkStyle::Cgit.commit_link("cafebabe", "https://git.local/x"),
            "https://git.local/x/commit/?id=cafebabe"
        );
    }
}
