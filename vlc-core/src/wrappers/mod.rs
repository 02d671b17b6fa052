pub mod audio;
pub mod instance;
pub mod media;
pub mod media_discoverer;
pub mod media_player;

use std::ffi::CString;
use std::path::Path;

use crate::models::error::VlcError;

pub(crate) fn to_cstring(value: &str) -> Result<CString, VlcError> {
    CString::new(value).map_err(|_| VlcError::InvalidString(value.to_string()))
}

/// Native form of a filesystem path. On Unix the bytes pass through
/// untouched; elsewhere the path must be valid Unicode.
#[cfg(unix)]
pub(crate) fn path_to_cstring(path: &Path) -> Result<CString, VlcError> {
    use std::os::unix::ffi::OsStrExt;

    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| VlcError::InvalidString(path.display().to_string()))
}

#[cfg(not(unix))]
pub(crate) fn path_to_cstring(path: &Path) -> Result<CString, VlcError> {
    let value = path
        .to_str()
        .ok_or_else(|| VlcError::InvalidString(path.display().to_string()))?;
    to_cstring(value)
}
