/// Template layer: dialect setup, environment snapshot, loading, rendering.
pub mod dialect;
pub mod engine;
pub mod env;
pub mod errors;
pub mod loader;

pub use engine::render;
pub use env::load_env;
pub use errors::{LoadError, RenderError};
pub use loader::load_templates;
