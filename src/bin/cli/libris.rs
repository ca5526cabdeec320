use std::time::Duration;

use anyhow::{Context, Result};
use libris_clean::{
    config::Config,
    normalize::normalize,
    schema::{edition::EditionRecord, graph::WorkGraph},
    types::record::CanonicalRecord,
};
use serde::de::DeserializeOwned;
use tracing::debug;

pub fn client(config: &Config) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

async fn get_json<T: DeserializeOwned>(client: &reqwest::Client, url: &str) -> Result<T> {
    debug!("Fetching {url}.");
    let resp = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .with_context(|| format!("Request to {url} failed"))?
        .text()
        .await
        .with_context(|| format!("Reading response from {url} failed"))?;
    parse_json(&resp).with_context(|| format!("Unexpected JSON from {url}"))
}

fn parse_json<T: DeserializeOwned>(s: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(s);
    let value = serde_path_to_error::deserialize(&mut *de)?;
    de.end()?;
    Ok(value)
}

pub async fn fetch_edition(
    libris_id: &str,
    client: &reqwest::Client,
    config: &Config,
) -> Result<EditionRecord> {
    get_json(client, &config.edition_url(libris_id)).await
}

pub async fn fetch_graph(
    uri_segment: &str,
    client: &reqwest::Client,
    config: &Config,
) -> Result<WorkGraph> {
    get_json(client, &config.graph_url(uri_segment)).await
}

/// Resolve the edition, fetch its linked-data graph and normalize both.
pub async fn create_by_libris_id(
    libris_id: &str,
    client: &reqwest::Client,
    config: &Config,
) -> Result<CanonicalRecord> {
    let edition = fetch_edition(libris_id, client, config).await?;
    let graph = fetch_graph(edition.uri_segment(), client, config).await?;
    normalize(libris_id, &edition, &graph)
        .with_context(|| format!("Normalizing {libris_id} failed"))
}
