//! Job specification: what to provision, loaded from a TOML file.
//!
//! `job_name` and `git_url` are required; everything else defaults to a
//! stock pipeline-from-SCM job. Validation happens at load time, before any
//! network interaction.

use crate::error::ProvisionError;
use crate::target::ProvisionTarget;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_branch() -> String {
    "*/main".to_string()
}

fn default_jenkinsfile() -> String {
    "Jenkinsfile".to_string()
}

fn default_description() -> String {
    "Provisioned via jjp".to_string()
}

/// Validated description of one pipeline job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    /// Name of the job item on the server.
    pub job_name: String,
    /// Slash-separated folder path the job lives under (absent = root).
    #[serde(default)]
    pub folder: Option<String>,
    /// Git repository the pipeline checks out.
    pub git_url: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Path of the pipeline script inside the repository.
    #[serde(default = "default_jenkinsfile")]
    pub jenkinsfile: String,
    /// Credentials reference known to the server; empty = anonymous checkout.
    #[serde(default)]
    pub credentials_id: String,
    #[serde(default = "default_description")]
    pub description: String,
}

impl JobSpec {
    /// Loads and validates a spec from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|e| {
            ProvisionError::Config(format!("cannot read spec file {}: {e}", path.display()))
        })?;
        Self::parse(&data)
            .map_err(|e| match e {
                ProvisionError::Config(msg) => {
                    ProvisionError::Config(format!("{}: {msg}", path.display()))
                }
                other => other,
            })
    }

    /// Parses and validates a spec from TOML text.
    pub fn parse(data: &str) -> Result<Self> {
        let spec: JobSpec =
            toml::from_str(data).map_err(|e| ProvisionError::Config(e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    /// Rejects malformed fields before any network call.
    pub fn validate(&self) -> Result<()> {
        if self.git_url.trim().is_empty() {
            return Err(ProvisionError::Config(
                "git_url must not be empty".to_string(),
            ));
        }
        // job_name and every folder segment are checked by the target builder
        self.target().map(|_| ())
    }

    /// Builds the provisioning target for this spec.
    pub fn target(&self) -> Result<ProvisionTarget> {
        ProvisionTarget::pipeline_job(self.folder.as_deref(), &self.job_name)
    }
}
