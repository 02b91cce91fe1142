//! Logical provisioning target and its resolution into server item URLs.
//!
//! Jenkins addresses nested items by inserting `/job/` before every
//! percent-encoded path segment. The resolver precomputes one `ItemLocation`
//! per ancestor folder plus the leaf, so the provisioners never rebuild URLs
//! by string slicing. Pure functions, no network.

use crate::error::ProvisionError;
use crate::Result;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters percent-encoded inside a single item name. `/` must be encoded
/// so a name can never span nesting levels; the rest keeps the name safe in
/// both a path segment and the `createItem?name=` query value.
const ITEM_NAME: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Kind of addressable item on the Jenkins server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Folder,
    PipelineJob,
}

/// Logical identity of the resource to provision.
#[derive(Debug, Clone)]
pub struct ProvisionTarget {
    /// Ancestor folders, root to leaf. May be empty (item at the root).
    pub folder_path: Vec<String>,
    /// Name of the leaf item.
    pub item_name: String,
    pub kind: ItemKind,
}

impl ProvisionTarget {
    /// Builds a pipeline-job target from a slash-separated folder string
    /// (`None` or empty = root) and a job name. Every segment is validated;
    /// consecutive slashes in the folder string are tolerated.
    pub fn pipeline_job(folder: Option<&str>, job_name: &str) -> Result<Self> {
        let folder_path: Vec<String> = folder
            .unwrap_or("")
            .split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        for segment in &folder_path {
            validate_segment(segment)?;
        }
        validate_segment(job_name)?;
        Ok(Self {
            folder_path,
            item_name: job_name.to_string(),
            kind: ItemKind::PipelineJob,
        })
    }
}

/// One addressable item, with every URL the provisioners need precomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLocation {
    /// Logical path from the root, for diagnostics ("teams/payments").
    pub display_name: String,
    /// Raw (decoded) item name.
    pub name: String,
    /// Absolute URL of the item, e.g. `<base>/job/teams/job/payments`.
    pub item_url: String,
    /// Absolute URL of the container the item is created in
    /// (the base URL for root-level items).
    pub parent_url: String,
}

impl ItemLocation {
    /// Metadata endpoint used by existence probes.
    pub fn api_url(&self) -> String {
        format!("{}/api/json", self.item_url)
    }

    /// Item-creation endpoint on the parent container.
    pub fn create_url(&self) -> String {
        format!(
            "{}/createItem?name={}",
            self.parent_url,
            encode_item_name(&self.name)
        )
    }

    /// Configuration endpoint used to update an existing item.
    pub fn config_url(&self) -> String {
        format!("{}/config.xml", self.item_url)
    }
}

/// Percent-encodes one item name for use as a path segment or query value.
pub fn encode_item_name(name: &str) -> String {
    utf8_percent_encode(name, ITEM_NAME).to_string()
}

/// Decodes an encoded item name; inverse of [`encode_item_name`].
pub fn decode_item_name(encoded: &str) -> String {
    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}

fn validate_segment(segment: &str) -> Result<()> {
    if segment.trim().is_empty() {
        return Err(ProvisionError::Config(
            "path segment must not be empty".to_string(),
        ));
    }
    if segment.chars().all(|c| c == '/' || c == '\\') {
        return Err(ProvisionError::Config(format!(
            "path segment {segment:?} contains only separators"
        )));
    }
    if segment.chars().any(char::is_control) {
        return Err(ProvisionError::Config(format!(
            "path segment {segment:?} contains control characters"
        )));
    }
    Ok(())
}

/// Resolves a target into its ordered item locations, root to leaf.
///
/// The last element is always the leaf; everything before it is an ancestor
/// folder in creation order. An empty folder path yields a single-element
/// list (the leaf at the root).
pub fn resolve_locations(base_url: &str, target: &ProvisionTarget) -> Result<Vec<ItemLocation>> {
    let base = base_url.trim_end_matches('/');
    url::Url::parse(base)
        .map_err(|e| ProvisionError::Config(format!("invalid base URL {base:?}: {e}")))?;

    let mut locations = Vec::with_capacity(target.folder_path.len() + 1);
    let mut parent = base.to_string();
    let mut display = String::new();
    for name in target.folder_path.iter().chain([&target.item_name]) {
        validate_segment(name)?;
        if !display.is_empty() {
            display.push('/');
        }
        display.push_str(name);
        let item_url = format!("{}/job/{}", parent, encode_item_name(name));
        locations.push(ItemLocation {
            display_name: display.clone(),
            name: name.clone(),
            item_url: item_url.clone(),
            parent_url: parent,
        });
        parent = item_url;
    }
    Ok(locations)
}
