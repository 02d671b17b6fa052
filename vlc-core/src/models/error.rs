use thiserror::Error;

/// Errors surfaced by the libVLC wrappers.
///
/// The engine reports most failures through a `-1` return code that also
/// means "unavailable" or "undefined" for some queries (mute status, active
/// track). Those cases cannot be told apart at this layer, so both land in
/// [`VlcError::ErrorOrUnavailable`] with the engine's code kept verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VlcError {
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("engine reported an error or unavailable state (status {0})")]
    ErrorOrUnavailable(i32),

    #[error("handle was transferred to another owner")]
    Released,

    #[error("string argument contains an interior NUL byte: {0:?}")]
    InvalidString(String),

    #[error("failed to load libvlc: {0}")]
    LibraryLoad(String),

    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),
}

impl VlcError {
    /// Whether this error came from an engine sentinel return code.
    pub fn is_engine_status(&self) -> bool {
        matches!(self, Self::ErrorOrUnavailable(_))
    }
}

/// Map a `0 / -1` style engine status to a `Result`.
pub(crate) fn check_status(code: i32) -> Result<(), VlcError> {
    if code == 0 {
        Ok(())
    } else {
        Err(VlcError::ErrorOrUnavailable(code))
    }
}

/// Map a non-negative engine value (count, percentage) to a `Result`.
pub(crate) fn check_value(code: i32) -> Result<u32, VlcError> {
    u32::try_from(code).map_err(|_| VlcError::ErrorOrUnavailable(code))
}
