pub mod collections;
pub mod help;
pub mod results;

pub use collections::render_collections;
pub use help::render_help;
pub use results::render_results;
