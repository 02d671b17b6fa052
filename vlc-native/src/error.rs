use thiserror::Error;
use vlc_core::VlcError;

/// Failures while locating libvlc or resolving its entry points.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: libloading::Error,
    },

    #[error("missing symbol {name}: {source}")]
    Symbol {
        name: &'static str,
        #[source]
        source: libloading::Error,
    },

    #[error("libvlc not found (tried: {})", .0.join(", "))]
    NotFound(Vec<String>),
}

impl From<LoadError> for VlcError {
    fn from(e: LoadError) -> Self {
        VlcError::LibraryLoad(e.to_string())
    }
}
