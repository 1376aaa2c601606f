mod client;
mod error;
mod operation;
mod workflow;

pub use client::{with_trailing_slash, MlClient};
pub use error::DispatchError;
pub use operation::Operation;
pub use workflow::{DispatchWorkflow, PreviewImage, WorkflowStatus};
