mod capability;
#[allow(clippy::module_inception)]
pub mod error;

pub use capability::{CapabilityError, CapabilityErrorKind};
pub use error::{CliError, TaskError};
