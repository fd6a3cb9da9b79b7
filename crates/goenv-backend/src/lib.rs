mod error;
mod traits;
mod types;

pub use error::{GoenvError, NetworkStage};
pub use traits::{Provision, VersionInstaller};
pub use types::{DistFile, FileKind, GoRelease, SYSTEM_VERSION, validate_version};
