use std::fmt;
use std::marker::PhantomData;
use std::mem;

use crate::handle::RawHandle;
use crate::models::error::VlcError;

use super::instance::Instance;
use super::to_cstring;

/// A media discovery service session (`libvlc_media_discoverer_t`).
///
/// The engine does not share discovery sessions, so this wrapper is never
/// copied. Ownership moves with the value; [`MediaDiscoverer::transfer`]
/// moves it out explicitly and leaves the source released.
pub struct MediaDiscoverer {
    instance: Instance,
    raw: Option<RawHandle>,
}

impl MediaDiscoverer {
    /// Start the discovery service called `name` (e.g. "upnp", "sap").
    ///
    /// Fails with [`VlcError::ResourceUnavailable`] if the engine does not
    /// know the service or cannot start it.
    pub fn new(instance: &Instance, name: &str) -> Result<Self, VlcError> {
        let name_c = to_cstring(name)?;
        let engine = instance.engine();
        let raw = engine
            .media_discoverer_new(instance.raw(), &name_c)
            .ok_or_else(|| {
                let reason = engine.last_error().unwrap_or_else(|| "no details".into());
                log::warn!("discovery service {:?} unavailable: {}", name, reason);
                VlcError::ResourceUnavailable(format!("discovery service {}: {}", name, reason))
            })?;

        log::debug!("started discovery service {:?} as {:?}", name, raw);
        Ok(Self {
            instance: instance.clone(),
            raw: Some(raw),
        })
    }

    /// Whether this value still owns its session.
    pub fn is_owner(&self) -> bool {
        self.raw.is_some()
    }

    /// The owned handle, or `None` after a transfer.
    pub fn raw(&self) -> Option<RawHandle> {
        self.raw
    }

    /// Move the session into a new value. `self` is left released: it no
    /// longer touches the engine, not even on drop.
    pub fn transfer(&mut self) -> MediaDiscoverer {
        MediaDiscoverer {
            instance: self.instance.clone(),
            raw: mem::take(&mut self.raw),
        }
    }

    fn owned(&self) -> Result<RawHandle, VlcError> {
        self.raw.ok_or(VlcError::Released)
    }

    /// Localized name of the service, if the engine provides one.
    pub fn localized_name(&self) -> Result<Option<String>, VlcError> {
        let raw = self.owned()?;
        Ok(self.instance.engine().media_discoverer_localized_name(raw))
    }

    /// Event manager of the session. Borrowed: valid only while `self` is.
    ///
    /// Fails with [`VlcError::ResourceUnavailable`] when the engine has none,
    /// e.g. a libvlc build without the entry point.
    pub fn event_manager(&self) -> Result<EventManager<'_>, VlcError> {
        let raw = self.owned()?;
        let manager = self
            .instance
            .engine()
            .media_discoverer_event_manager(raw)
            .ok_or_else(|| {
                VlcError::ResourceUnavailable("event manager of discovery session not provided by engine".into())
            })?;
        Ok(EventManager {
            raw: manager,
            _owner: PhantomData,
        })
    }

    pub fn is_running(&self) -> Result<bool, VlcError> {
        let raw = self.owned()?;
        Ok(self.instance.engine().media_discoverer_is_running(raw))
    }
}

impl Drop for MediaDiscoverer {
    fn drop(&mut self) {
        if let Some(raw) = self.raw.take() {
            log::debug!("releasing discovery service {:?}", raw);
            self.instance.engine().media_discoverer_release(raw);
        }
    }
}

impl fmt::Debug for MediaDiscoverer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaDiscoverer").field("raw", &self.raw).finish()
    }
}

/// Event manager handle borrowed from its owner. Not released by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventManager<'a> {
    raw: RawHandle,
    _owner: PhantomData<&'a MediaDiscoverer>,
}

impl EventManager<'_> {
    pub fn raw(&self) -> RawHandle {
        self.raw
    }
}
