/// Core layer: the completion engine and its pure helpers.
pub mod complete;
pub mod context;
pub mod paths;
pub mod prompt;
pub mod reconcile;

pub use complete::complete;
pub use context::ShellContext;
pub use paths::{classify, extract_paths};
pub use reconcile::{reconcile, split_buffer};
