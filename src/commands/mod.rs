mod examples;
mod process;
mod render;

pub use examples::run_examples;
pub use process::{run_example, run_upload};
pub use render::run_render;
