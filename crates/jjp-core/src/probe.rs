//! Existence probes against item metadata endpoints.
//!
//! A probe drives the create-vs-update decision: 200 means the item exists,
//! 404 means it is absent. Anything else leaves the item's state unknown,
//! which callers must treat as fatal, never as absent.

use crate::error::ProvisionError;
use crate::http::HttpClient;
use crate::target::ItemLocation;
use crate::Result;

/// Outcome of probing one item's metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Existence {
    Exists,
    Absent,
    /// The server answered with something other than 200/404 (auth failure,
    /// server error). Status and body are kept for diagnostics.
    Unknown { status: u32, body: String },
}

/// Probes whether an item is already provisioned.
pub fn probe(client: &impl HttpClient, location: &ItemLocation) -> Result<Existence> {
    let url = location.api_url();
    let response = client.get(&url, &[])?;
    Ok(match response.status {
        200 => Existence::Exists,
        404 => Existence::Absent,
        status => Existence::Unknown {
            status,
            body: response.body,
        },
    })
}

/// Probes and refuses to proceed on an ambiguous answer.
///
/// Returns `true` if the item exists, `false` if it is absent, and
/// `AmbiguousState` if the probe could not decide.
pub fn probe_decided(client: &impl HttpClient, location: &ItemLocation) -> Result<bool> {
    match probe(client, location)? {
        Existence::Exists => Ok(true),
        Existence::Absent => Ok(false),
        Existence::Unknown { status, body } => Err(ProvisionError::AmbiguousState {
            item: location.display_name.clone(),
            status,
            body,
        }),
    }
}
