//! Ancestor folder provisioning.
//!
//! Folders are created strictly root to leaf: a child is never touched until
//! its parent is confirmed present. Folders that already exist are skipped,
//! so re-running against a provisioned tree issues no writes.

use crate::crumb::Crumb;
use crate::error::ProvisionError;
use crate::http::{write_headers, HttpClient};
use crate::probe::probe_decided;
use crate::render;
use crate::target::ItemLocation;
use crate::Result;

/// Ensures every ancestor folder exists, creating missing ones in order.
///
/// `ancestors` must be in root-to-leaf order (the resolver's output minus
/// the leaf). Stops at the first failure so no call is made below a folder
/// whose state is unknown or whose creation failed.
pub fn ensure_folders(
    client: &impl HttpClient,
    ancestors: &[ItemLocation],
    crumb: Option<&Crumb>,
) -> Result<()> {
    for folder in ancestors {
        if probe_decided(client, folder)? {
            tracing::debug!("folder {} already exists", folder.display_name);
            continue;
        }
        let body = render::render_folder(&format!(
            "Auto-created folder {}",
            folder.display_name
        ));
        let url = folder.create_url();
        let response = client.post(&url, &write_headers(crumb), body.as_bytes())?;
        if !matches!(response.status, 200 | 201) {
            return Err(ProvisionError::from_response(
                &url,
                response.status,
                response.body,
            ));
        }
        tracing::info!("created folder {}", folder.display_name);
    }
    Ok(())
}
