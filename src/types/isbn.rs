use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsbnType {
    #[serde(rename = "ISBN10")]
    Isbn10,
    #[serde(rename = "ISBN13")]
    Isbn13,
}

/// A validated ISBN along with the compact form it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isbn {
    inner:   isbn2::Isbn,
    compact: String,
}

impl Isbn {
    /// Validate a raw catalog value. Spaces and hyphens are ignored, a
    /// lowercase check digit `x` is accepted and nine-digit SBNs are read as
    /// ISBN-10 with a leading zero. ISBN-13 must carry the 978 or 979 prefix.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut compact = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | ' '))
            .map(|c| c.to_ascii_uppercase())
            .collect::<String>();
        match compact.len() {
            9 => compact.insert(0, '0'),
            10 => (),
            13 if compact.starts_with("978") || compact.starts_with("979") => (),
            _ => return None,
        }
        let inner = compact.parse::<isbn2::Isbn>().ok()?;
        Some(Self { inner, compact })
    }

    pub fn kind(&self) -> IsbnType {
        match self.inner {
            isbn2::Isbn::_10(_) => IsbnType::Isbn10,
            isbn2::Isbn::_13(_) => IsbnType::Isbn13,
        }
    }

    /// Hyphenated form, or the compact digits when the registration group
    /// has no known ranges.
    pub fn hyphenated(&self) -> String {
        match self.inner.hyphenate() {
            Ok(s) => s.to_string(),
            Err(_) => self.compact.clone(),
        }
    }
}

impl Display for Isbn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hyphenated())
    }
}
