//! `jjp apply` – provision the job on the server (create or update).

use anyhow::{bail, Context, Result};
use jjp_core::config::JjpConfig;
use jjp_core::http::{Credentials, CurlClient};
use jjp_core::jobspec::JobSpec;
use jjp_core::provision::provision;
use jjp_core::render;
use std::path::Path;
use std::time::Duration;

/// Resolves a connection setting from a flag, falling back to an env var.
fn flag_or_env(flag: Option<String>, var: &str) -> Option<String> {
    flag.or_else(|| std::env::var(var).ok())
        .filter(|v| !v.trim().is_empty())
}

pub fn run_apply(
    cfg: &JjpConfig,
    spec_path: &Path,
    url: Option<String>,
    user: Option<String>,
    token: Option<String>,
) -> Result<()> {
    let Some(base_url) = flag_or_env(url, "JENKINS_URL") else {
        bail!("provide the Jenkins URL via --url or JENKINS_URL");
    };
    let Some(user) = flag_or_env(user, "JENKINS_USER") else {
        bail!("provide the Jenkins username via --user or JENKINS_USER");
    };
    let Some(token) = flag_or_env(token, "JENKINS_TOKEN") else {
        bail!("provide the Jenkins API token via --token or JENKINS_TOKEN");
    };

    let spec = JobSpec::load(spec_path)?;
    let body = render::render_pipeline_job(&spec);

    let client = CurlClient::new(Credentials {
        user,
        secret: token,
    })
    .with_timeouts(
        Duration::from_secs(cfg.connect_timeout_secs),
        Duration::from_secs(cfg.request_timeout_secs),
    );

    let outcome = provision(&client, &base_url, &spec, body.as_bytes())
        .with_context(|| format!("provisioning job {} failed", spec.job_name))?;
    println!("Job {outcome}: {}", spec.job_name);
    Ok(())
}
