//! Mapping of a Libris XL instance onto a [CanonicalRecord].
//!
//! All functions here are pure. Fields that Libris routinely leaves out are
//! guarded and turn into `null`, anything the record cannot be built without
//! (the work, contribution agents, role identifiers) is an error.

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::{
    schema::{
        edition::EditionRecord,
        graph::{Agent, Contribution, Instance, WorkGraph},
    },
    types::{
        isbn::Isbn,
        one_or_many::{delistify, OneOrMany},
        record::{CanonicalRecord, Contributor, IsbnEntry, Publication, Role, Title},
    },
};

/// Substrings that mark an extent label as a page count.
const PAGE_UNITS: [&str; 5] = ["s.", "s", "sidor", "sid", "sid."];

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("Invalid regex"));

pub fn normalize(
    libris_id: &str,
    edition: &EditionRecord,
    graph: &WorkGraph,
) -> Result<CanonicalRecord> {
    let instance = graph.instance()?;
    normalize_instance(libris_id, edition.uri_segment(), &instance)
}

pub fn normalize_instance(
    libris_id: &str,
    libris_uri: &str,
    instance: &Instance,
) -> Result<CanonicalRecord> {
    Ok(CanonicalRecord {
        libris_id:    libris_id.to_string(),
        libris_uri:   libris_uri.to_string(),
        language:     extract_language(instance)?,
        title:        extract_title(instance),
        publication:  extract_publication(instance),
        contributors: extract_contributors(instance)?,
        isbn:         extract_isbn(instance),
        pages:        extract_pages(instance),
    })
}

pub fn extract_title(instance: &Instance) -> Title {
    let titles = instance
        .has_title
        .iter()
        .flat_map(OneOrMany::iter)
        .filter(|x| x.kind.as_deref() == Some("Title"))
        .collect::<Vec<_>>();
    let main_title = titles
        .iter()
        .filter_map(|x| x.main_title.clone())
        .collect::<OneOrMany<_>>()
        .flatten();
    let subtitle = titles
        .iter()
        .filter_map(|x| x.subtitle.clone())
        .collect::<OneOrMany<_>>()
        .flatten();
    Title {
        main_title: delistify(main_title),
        subtitle:   delistify(subtitle),
    }
}

pub fn extract_language(instance: &Instance) -> Result<Option<String>> {
    let work = instance
        .instance_of
        .as_ref()
        .context("Instance is missing instanceOf")?;
    Ok(work
        .language
        .as_ref()
        .and_then(|x| x.first())
        .and_then(|x| x.id.clone()))
}

pub fn extract_publication(instance: &Instance) -> Option<Publication> {
    let primary = instance
        .publication
        .iter()
        .flat_map(OneOrMany::iter)
        .find(|x| x.kind.as_deref() == Some("PrimaryPublication"))?;

    let mut publication = Publication::default();
    if let Some(place) = &primary.place {
        let labels = place
            .iter()
            .filter_map(|x| x.label.clone())
            .collect::<OneOrMany<_>>()
            .flatten();
        publication.place = delistify(labels);
    }
    if let Some(label) = primary.agent.as_ref().and_then(|x| x.label.clone()) {
        publication.publisher = delistify(label.into_vec());
    }
    publication.year = primary.year.clone().filter(|year| match year {
        serde_json::Value::Null => false,
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(xs) => !xs.is_empty(),
        _ => true,
    });
    Some(publication)
}

pub fn extract_contributors(instance: &Instance) -> Result<Vec<Contributor>> {
    let work = instance
        .instance_of
        .as_ref()
        .context("Instance is missing instanceOf")?;
    let mut contributors = Vec::new();
    for (i, contribution) in work.contribution.iter().flat_map(OneOrMany::iter).enumerate() {
        let roles = match &contribution.role {
            Some(roles) if !roles.is_empty() => roles,
            _ => {
                if contribution.kind.as_deref() == Some("PrimaryContribution") {
                    contributors.push(Contributor {
                        role:   Role::Author,
                        person: contributor_person(contribution)
                            .with_context(|| format!("In contribution {i}"))?,
                    });
                }
                continue;
            }
        };
        for role in roles.iter() {
            let uri = role
                .id
                .as_deref()
                .ok_or(anyhow!("Role without @id in contribution {i}"))?;
            if let Some(role) = Role::from_uri(uri) {
                contributors.push(Contributor {
                    role,
                    person: contributor_person(contribution)
                        .with_context(|| format!("In contribution {i}"))?,
                });
            }
        }
    }
    Ok(contributors)
}

fn contributor_person(contribution: &Contribution) -> Result<String> {
    let agent = contribution
        .agent
        .as_ref()
        .context("Contribution has no agent")?;
    person_identity(agent)
}

/// The agent's authority URI, or a display name for inline persons.
pub fn person_identity(agent: &Agent) -> Result<String> {
    if let Some(id) = &agent.id {
        return Ok(id.clone());
    }
    if agent.kind.as_deref() != Some("Person") {
        anyhow::bail!("Agent has no @id and is not a Person");
    }
    match (&agent.given_name, &agent.family_name, &agent.name) {
        (Some(given), Some(family), _) if !given.is_empty() && !family.is_empty() => {
            Ok(format!("{given} {family}"))
        }
        (_, _, Some(name)) if !name.is_empty() => Ok(name.clone()),
        _ => Err(anyhow!("Person has neither givenName and familyName nor name")),
    }
}

pub fn extract_isbn(instance: &Instance) -> Option<Vec<IsbnEntry>> {
    let identifiers = instance
        .identified_by
        .as_ref()
        .filter(|x| !x.is_empty())?;
    let isbns = identifiers
        .iter()
        .filter(|x| {
            x.kind
                .as_deref()
                .map_or(false, |kind| kind.eq_ignore_ascii_case("isbn"))
        })
        .filter_map(|x| x.value.as_deref())
        .filter_map(|raw| match Isbn::parse(raw) {
            Some(isbn) => Some(IsbnEntry::from(&isbn)),
            None => {
                debug!("Skipping invalid isbn {raw:?}.");
                None
            }
        })
        .collect();
    Some(isbns)
}

pub fn extract_pages(instance: &Instance) -> Option<String> {
    let label = match instance.extent.as_ref()?.first()?.label.as_ref()? {
        OneOrMany::One(label) => label,
        OneOrMany::Many(labels) if labels.len() == 1 => &labels[0],
        OneOrMany::Many(_) => return None,
    };
    page_count(label)
}

/// Accept an extent label only when it names exactly one number and a page
/// unit, e.g. `"123 s."`. Ranges and multi-volume statements are rejected.
pub fn page_count(label: &str) -> Option<String> {
    let mut runs = DIGIT_RUN.find_iter(label);
    let pages = runs.next()?;
    if runs.next().is_some() {
        return None;
    }
    if !PAGE_UNITS.iter().any(|unit| label.contains(unit)) {
        return None;
    }
    Some(pages.as_str().to_string())
}
