//! `jjp render` – print the job XML without contacting the server.

use anyhow::Result;
use jjp_core::jobspec::JobSpec;
use jjp_core::render;
use std::path::Path;

pub fn run_render(spec_path: &Path) -> Result<()> {
    let spec = JobSpec::load(spec_path)?;
    print!("{}", render::render_pipeline_job(&spec));
    Ok(())
}
