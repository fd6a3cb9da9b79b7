mod host;
mod paths;

pub use host::{HostPlatform, UnsupportedHost};
pub use paths::{
    GLOBAL_VERSION_FILE, GoenvPaths, GoenvPathsError, LEGACY_GLOBAL_VERSION_FILES,
    LOCAL_VERSION_FILE, LayoutReport, ROOT_DIR_NAME, VERSIONS_DIR, root_directory,
};
