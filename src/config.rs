use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub host:         String,
    pub port:         u16,
    /// Edition lookup, `{}` is replaced by the Libris ID.
    pub edition_url:  String,
    /// Linked-data document, `{}` is replaced by the resolved URI segment.
    pub graph_url:    String,
    pub user_agent:   String,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn default_as_string() -> Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    pub fn read_config() -> Result<Self> {
        Self::from_figment(
            Figment::new()
                .merge(Serialized::defaults(Config::default()))
                .merge(Toml::file("config.toml"))
                .merge(Env::prefixed("LIBRIS_")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }

    pub fn edition_url(&self, libris_id: &str) -> String {
        self.edition_url.replace("{}", libris_id)
    }

    pub fn graph_url(&self, uri_segment: &str) -> String {
        self.graph_url.replace("{}", uri_segment)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host:         "127.0.0.1".into(),
            port:         5000,
            edition_url:  "https://libris.kb.se/resource/bib/{}".into(),
            graph_url:    "https://libris.kb.se/{}/data.jsonld".into(),
            user_agent:   concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
            timeout_secs: None,
        }
    }
}
