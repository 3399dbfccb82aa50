pub mod generate;
pub mod list;

pub use generate::{GenerateConfig, generate_document};
pub use list::list_resources;
