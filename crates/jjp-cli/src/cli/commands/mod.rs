//! CLI command handlers, one per file.

mod apply;
mod render;

pub use apply::run_apply;
pub use render::run_render;
