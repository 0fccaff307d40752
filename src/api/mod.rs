/// API layer: types and errors consumed by the binaries.
pub mod error;
pub mod types;

pub use error::{PilotError, PilotResult};
pub use types::{CompletionRequest, CompletionResponse, Role, Segment};
