use serde::{Deserialize, Serialize};

use super::{
    isbn::{Isbn, IsbnType},
    one_or_many::OneOrMany,
};

/// The flat record served by `/api/:libris_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub libris_id:    String,
    pub libris_uri:   String,
    pub language:     Option<String>,
    pub title:        Title,
    pub publication:  Option<Publication>,
    pub contributors: Vec<Contributor>,
    pub isbn:         Option<Vec<IsbnEntry>>,
    pub pages:        Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    #[serde(rename = "mainTitle")]
    pub main_title: Option<OneOrMany<String>>,
    pub subtitle:   Option<OneOrMany<String>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place:     Option<OneOrMany<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<OneOrMany<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year:      Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Author,
    Illustrator,
    Translator,
    Editor,
}

impl Role {
    /// Match the final path segment of a role URI such as
    /// `https://id.kb.se/relator/illustrator`.
    pub fn from_uri(uri: &str) -> Option<Self> {
        match uri.rsplit('/').next()? {
            "author" => Some(Self::Author),
            "illustrator" => Some(Self::Illustrator),
            "translator" => Some(Self::Translator),
            "editor" => Some(Self::Editor),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub role:   Role,
    pub person: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsbnEntry {
    #[serde(rename = "type")]
    pub kind:  IsbnType,
    pub value: String,
}

impl From<&Isbn> for IsbnEntry {
    fn from(isbn: &Isbn) -> Self {
        Self {
            kind:  isbn.kind(),
            value: isbn.hyphenated(),
        }
    }
}
