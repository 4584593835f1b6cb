mod builder;
mod record;
mod render;
mod scanner;
mod slug;

pub use builder::{base_path_from_config, Builder};
pub use scanner::scan_document;
pub use slug::{slugify, unique_slug};
