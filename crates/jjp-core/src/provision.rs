//! Create-or-update of the leaf job, and whole-run orchestration.

use crate::crumb::{fetch_crumb, Crumb};
use crate::error::ProvisionError;
use crate::folders::ensure_folders;
use crate::http::{write_headers, HttpClient};
use crate::jobspec::JobSpec;
use crate::probe::probe_decided;
use crate::target::{resolve_locations, ItemLocation};
use crate::Result;
use std::fmt;

/// What a successful run did to the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    Updated,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created => write!(f, "created"),
            Outcome::Updated => write!(f, "updated"),
        }
    }
}

/// Creates the job if absent, otherwise replaces its configuration.
///
/// The rendered body is opaque to this function. Creation accepts 200 or
/// 201 (the server returns either depending on version); update accepts
/// only 200. Anything else aborts the run without retry.
pub fn provision_job(
    client: &impl HttpClient,
    leaf: &ItemLocation,
    body: &[u8],
    crumb: Option<&Crumb>,
) -> Result<Outcome> {
    let headers = write_headers(crumb);
    if probe_decided(client, leaf)? {
        let url = leaf.config_url();
        let response = client.post(&url, &headers, body)?;
        if response.status != 200 {
            return Err(ProvisionError::from_response(
                &url,
                response.status,
                response.body,
            ));
        }
        tracing::info!("updated job {}", leaf.display_name);
        Ok(Outcome::Updated)
    } else {
        let url = leaf.create_url();
        let response = client.post(&url, &headers, body)?;
        if !matches!(response.status, 200 | 201) {
            return Err(ProvisionError::from_response(
                &url,
                response.status,
                response.body,
            ));
        }
        tracing::info!("created job {}", leaf.display_name);
        Ok(Outcome::Created)
    }
}

/// Runs one full provisioning pass: resolve locations, fetch the crumb,
/// ensure ancestor folders exist, then create or update the job.
///
/// All input validation happens before the first network call; the crumb is
/// fetched once and threaded through every mutation.
pub fn provision(
    client: &impl HttpClient,
    base_url: &str,
    spec: &JobSpec,
    body: &[u8],
) -> Result<Outcome> {
    let target = spec.target()?;
    let locations = resolve_locations(base_url, &target)?;
    let Some((leaf, ancestors)) = locations.split_last() else {
        return Err(ProvisionError::Config(
            "target resolved to no locations".to_string(),
        ));
    };

    let crumb = fetch_crumb(client, base_url)?;
    ensure_folders(client, ancestors, crumb.as_ref())?;
    provision_job(client, leaf, body, crumb.as_ref())
}
