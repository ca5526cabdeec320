use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::types::one_or_many::OneOrMany;

/// Libris XL `data.jsonld` document. Index 0 of `@graph` describes the
/// record, index 1 the instance (edition) we extract from.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkGraph {
    #[serde(rename = "@graph")]
    pub graph: Vec<serde_json::Value>,
}

impl WorkGraph {
    pub fn instance(&self) -> Result<Instance> {
        let node = self
            .graph
            .get(1)
            .ok_or(anyhow!("@graph has no instance at index 1"))?;
        let instance = serde_path_to_error::deserialize(node)
            .map_err(|e| anyhow!("Malformed instance in @graph[1]: {e}"))?;
        Ok(instance)
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    #[serde(rename = "@id")]
    pub id:            Option<String>,
    pub instance_of:   Option<Work>,
    pub has_title:     Option<OneOrMany<TitleNode>>,
    pub publication:   Option<OneOrMany<PublicationNode>>,
    pub identified_by: Option<OneOrMany<Identifier>>,
    pub extent:        Option<OneOrMany<Extent>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub language:     Option<OneOrMany<Link>>,
    pub contribution: Option<OneOrMany<Contribution>>,
}

/// A bare `{"@id": ...}` reference.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "@id")]
    pub id: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleNode {
    #[serde(rename = "@type")]
    pub kind:       Option<String>,
    pub main_title: Option<OneOrMany<String>>,
    pub subtitle:   Option<OneOrMany<String>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicationNode {
    #[serde(rename = "@type")]
    pub kind:  Option<String>,
    pub year:  Option<serde_json::Value>,
    pub place: Option<OneOrMany<Place>>,
    pub agent: Option<Agent>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub label: Option<OneOrMany<String>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    #[serde(rename = "@type")]
    pub kind:  Option<String>,
    pub role:  Option<OneOrMany<Link>>,
    pub agent: Option<Agent>,
}

/// Either a linked authority (`@id`) or an inline person/organization.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    #[serde(rename = "@id")]
    pub id:          Option<String>,
    #[serde(rename = "@type")]
    pub kind:        Option<String>,
    pub given_name:  Option<String>,
    pub family_name: Option<String>,
    pub name:        Option<String>,
    pub label:       Option<OneOrMany<String>>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    #[serde(rename = "@type")]
    pub kind:  Option<String>,
    pub value: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub label: Option<OneOrMany<String>>,
}
