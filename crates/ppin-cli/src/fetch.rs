//! Blocking retrieval of raw provider responses.
//!
//! Each provider is one GET request with query parameters; the body is
//! returned untouched so it can be saved for offline analysis or handed to
//! [`ppin_core::parse_records`].

use anyhow::{Context as _, Result, bail};
use ppin_core::Provider;
use tracing::{debug, instrument};

use crate::config::{BIOGRID_KEY_ENV, ProvidersConfig};

const USER_AGENT: &str = concat!("ppin/", env!("CARGO_PKG_VERSION"));

/// A fully specified provider request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    pub url: String,
    pub params: Vec<(&'static str, String)>,
}

/// Build the request for `protein` against `provider`.
///
/// # Errors
///
/// Fails if `protein` is blank, or if BioGRID is selected without an
/// access key.
pub fn build_request(
    provider: Provider,
    protein: &str,
    config: &ProvidersConfig,
) -> Result<ProviderRequest> {
    let protein = protein.trim();
    if protein.is_empty() {
        bail!("protein identifier must not be empty");
    }

    let request = match provider {
        Provider::BioGrid => {
            let biogrid = &config.biogrid;
            let Some(key) = biogrid.access_key.as_deref().filter(|k| !k.trim().is_empty())
            else {
                bail!(
                    "BioGRID requires an access key: set {BIOGRID_KEY_ENV} or \
                     providers.biogrid.access_key in ppin.toml"
                );
            };
            ProviderRequest {
                url: biogrid.url.clone(),
                params: vec![
                    ("accessKey", key.to_string()),
                    ("format", "json".to_string()),
                    ("searchNames", "true".to_string()),
                    ("geneList", protein.to_string()),
                    ("organism", biogrid.organism.to_string()),
                    ("searchbiogridids", "true".to_string()),
                    ("includeInteractors", "true".to_string()),
                ],
            }
        }
        Provider::StringDb => ProviderRequest {
            url: config.string.url.clone(),
            params: vec![
                ("identifiers", protein.to_string()),
                ("species", config.string.species.to_string()),
            ],
        },
    };

    Ok(request)
}

/// Download the raw response body for `protein`.
///
/// # Errors
///
/// Fails on request construction errors, transport errors, non-2xx
/// statuses and unreadable bodies.
#[instrument(skip(config))]
pub fn fetch_body(provider: Provider, protein: &str, config: &ProvidersConfig) -> Result<String> {
    let request = build_request(provider, protein, config)?;

    let mut call = ureq::get(&request.url).set("User-Agent", USER_AGENT);
    for (name, value) in &request.params {
        call = call.query(name, value);
    }

    let response = call
        .call()
        .map_err(|err| anyhow::anyhow!("{provider} request failed for {}: {err}", request.url))?;

    let body = response
        .into_string()
        .with_context(|| format!("failed to read {provider} response body"))?;

    debug!(bytes = body.len(), "fetched provider response");
    Ok(body)
}
