mod md_writer;

pub use self::md_writer::MarkdownWriter;
use crate::{changelog::Changelog, error::Result, sectionmap::SectionMap};

/// A trait that allows writing the results of a `convlog` run in an
/// arbitrary format. The single required function `write_changelog()`
/// accepts a `convlog::SectionMap`, the grouped commits in the order they
/// should appear.
///
/// `convlog` provides `convlog::fmt::MarkdownWriter`, which also embeds the
/// resume marker read back by `convlog::marker`.
pub trait FormatWriter {
    /// Writes a changelog from a given `convlog::SectionMap`. An empty map
    /// produces the empty-changelog template.
    fn write_changelog(&mut self, options: &Changelog, section_map: &SectionMap) -> Result<()>;
}
