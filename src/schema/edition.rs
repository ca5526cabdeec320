use serde::{Deserialize, Serialize};

/// Response of the edition lookup, `https://libris.kb.se/resource/bib/<id>`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditionRecord {
    #[serde(rename = "@id")]
    pub id: String,
}

impl EditionRecord {
    /// Final path segment of `@id`, the key of the Libris XL document.
    pub fn uri_segment(&self) -> &str {
        self.id.rsplit('/').next().unwrap_or(&self.id)
    }
}
