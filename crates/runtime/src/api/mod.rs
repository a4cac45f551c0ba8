//! Public runtime API: handle, errors and the values it returns.
mod errors;
mod handle;
mod types;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use types::{ActivationReport, RuntimeSnapshot};
