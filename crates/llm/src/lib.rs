pub mod provider;
pub mod providers;

pub use provider::{LengthParams, LlmError, SummaryModel};
pub use providers::create_model;
