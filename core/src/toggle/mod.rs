pub mod client;
pub mod handler;

pub use client::{ToggleClient, ToggleHttpError, ToggleHttpErrorKind, ToggleResponse};
pub use handler::CompletionToggler;
