//! Image reference parsing.
//!
//! Splits a raw image string such as `registry:5000/team/app:1.2` into a
//! repository and a tag. The tag separator is the last `:` after the last
//! `/`, so a registry port is never mistaken for a tag. Parsing is lenient:
//! malformed input never fails, it only produces a possibly odd split.

use std::fmt;

use serde::Serialize;

/// Tag used when an image reference carries none.
pub const DEFAULT_TAG: &str = "latest";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImageRef {
    pub repository: String,
    /// Never empty.
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl ImageRef {
    pub fn parse(raw: &str) -> Self {
        let (name, digest) = match raw.split_once('@') {
            Some((name, digest)) => (name, Some(digest)),
            None => (raw, None),
        };

        let last_slash = name.rfind('/');
        let tag_separator = name
            .rfind(':')
            .filter(|&colon| last_slash.is_none_or(|slash| colon > slash));

        let (repository, tag) = match tag_separator {
            Some(colon) => (&name[..colon], &name[colon + 1..]),
            None => (name, ""),
        };

        Self {
            repository: repository.to_string(),
            tag: if tag.is_empty() {
                DEFAULT_TAG.to_string()
            } else {
                tag.to_string()
            },
            digest: digest.filter(|d| !d.is_empty()).map(str::to_string),
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)?;
        if let Some(digest) = &self.digest {
            write!(f, "@{}", digest)?;
        }
        Ok(())
    }
}
