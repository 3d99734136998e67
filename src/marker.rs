//! The hidden marker that lets a later run resume where this one stopped.
//!
//! The markdown writer ends every non-empty changelog with
//! `<!-- LATEST_COMMIT_HASH: <hash> -->`.

use std::{fs, path::Path};

use log::debug;

/// Formats the marker line for `hash`
pub fn marker_for(hash: &str) -> String {
    format!("<!-- LATEST_COMMIT_HASH: {hash} -->")
}

/// Finds the hash recorded in a previously generated changelog. The writer
/// puts the marker last, so the last match wins.
///
/// # Example
///
/// ```
/// # use convlog::marker::latest_hash_in;
/// let text = "...\n<!-- LATEST_COMMIT_HASH: abcd1234 -->\n";
/// assert_eq!(latest_hash_in(text).as_deref(), Some("abcd1234"));
/// ```
pub fn latest_hash_in(contents: &str) -> Option<String> {
    regex!(r"<!-- LATEST_COMMIT_HASH: ([0-9a-f]{7,40}) -->")
        .captures_iter(contents)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}

/// Reads `path` and returns the hash recorded in it. Missing or unreadable
/// files yield `None`.
pub fn latest_hash_from<P: AsRef<Path>>(path: P) -> Option<String> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(contents) => latest_hash_in(&contents),
        Err(e) => {
            debug!("No marker read from {path:?}: {e}");
            None
        }
    }
}
