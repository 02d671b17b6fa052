use std::path::Path;
use std::sync::Arc;

use crate::handle::{ObjectKind, RawHandle, SharedHandle};
use crate::models::error::VlcError;
use crate::traits::engine::Engine;

use super::instance::Instance;
use super::{path_to_cstring, to_cstring};

/// A media item (`libvlc_media_t`), shared by reference count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    handle: SharedHandle,
}

impl Media {
    /// Media from a location (MRL), e.g. `"file:///tmp/a.ogg"` or `"http://…"`.
    pub fn from_location(instance: &Instance, mrl: &str) -> Result<Self, VlcError> {
        let mrl_c = to_cstring(mrl)?;
        let raw = instance
            .engine()
            .media_new_location(instance.raw(), &mrl_c)
            .ok_or_else(|| unavailable(instance.engine(), mrl))?;
        Ok(Self::adopt(instance, raw))
    }

    /// Media from a local filesystem path.
    pub fn from_path(instance: &Instance, path: &Path) -> Result<Self, VlcError> {
        let path_c = path_to_cstring(path)?;
        let raw = instance
            .engine()
            .media_new_path(instance.raw(), &path_c)
            .ok_or_else(|| unavailable(instance.engine(), &path.display().to_string()))?;
        Ok(Self::adopt(instance, raw))
    }

    fn adopt(instance: &Instance, raw: RawHandle) -> Self {
        Self {
            handle: SharedHandle::adopt(Arc::clone(instance.engine()), raw, ObjectKind::Media),
        }
    }

    pub fn raw(&self) -> RawHandle {
        self.handle.raw()
    }
}

fn unavailable(engine: &Arc<dyn Engine>, what: &str) -> VlcError {
    let reason = engine.last_error().unwrap_or_else(|| "no details".into());
    log::warn!("engine refused media {:?}: {}", what, reason);
    VlcError::ResourceUnavailable(format!("media {}: {}", what, reason))
}
