use std::ffi::OsString;
use std::path::PathBuf;

use vlc_core::VlcError;

use crate::sys::LIBVLC_LIB_PATHS;

/// Environment variable naming an explicit libvlc to load.
pub const LIBVLC_PATH_ENV: &str = "VLC_LIB_PATH";

/// Where to look for libvlc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Load exactly this file. Takes precedence over `search_paths`.
    pub library_path: Option<PathBuf>,

    /// Names or paths tried in order when `library_path` is unset.
    pub search_paths: Vec<PathBuf>,
}

impl LibraryConfig {
    /// Default search list, overridden by `VLC_LIB_PATH` when set.
    pub fn from_env() -> Self {
        Self::with_override(std::env::var_os(LIBVLC_PATH_ENV))
    }

    fn with_override(value: Option<OsString>) -> Self {
        Self {
            library_path: value.filter(|v| !v.is_empty()).map(PathBuf::from),
            ..Self::default()
        }
    }

    pub fn with_library_path(path: impl Into<PathBuf>) -> Self {
        Self {
            library_path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), VlcError> {
        if self.library_path.is_none() && self.search_paths.is_empty() {
            return Err(VlcError::ConfigurationFailed(
                "no library path and no search paths".into(),
            ));
        }
        Ok(())
    }

    /// Paths to try, in order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        match self.library_path {
            Some(ref path) => vec![path.clone()],
            None => self.search_paths.clone(),
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            library_path: None,
            search_paths: LIBVLC_LIB_PATHS.iter().map(PathBuf::from).collect(),
        }
    }
}
