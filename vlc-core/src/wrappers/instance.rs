use std::ffi::CStr;
use std::sync::Arc;

use crate::handle::{ObjectKind, RawHandle, SharedHandle};
use crate::models::audio_models::{AudioOutputDescription, AudioOutputDevice};
use crate::models::config::InstanceConfig;
use crate::models::error::VlcError;
use crate::traits::engine::Engine;

use super::to_cstring;

/// An engine instance (`libvlc_instance_t`), shared by reference count.
///
/// Every other wrapper is created from an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    handle: SharedHandle,
}

impl Instance {
    /// Create a new engine instance from `config`.
    ///
    /// Fails with [`VlcError::ResourceUnavailable`] if the engine factory
    /// returns nothing (typically bad arguments or missing plugins).
    pub fn new(engine: Arc<dyn Engine>, config: &InstanceConfig) -> Result<Self, VlcError> {
        config.validate()?;

        let args = config
            .args
            .iter()
            .map(|a| to_cstring(a))
            .collect::<Result<Vec<_>, _>>()?;
        let arg_refs: Vec<&CStr> = args.iter().map(|a| a.as_c_str()).collect();

        let raw = engine.instance_new(&arg_refs).ok_or_else(|| {
            let reason = engine.last_error().unwrap_or_else(|| "no details".into());
            log::warn!("engine refused to create an instance: {}", reason);
            VlcError::ResourceUnavailable(format!("instance: {}", reason))
        })?;
        let instance = Self {
            handle: SharedHandle::adopt(engine, raw, ObjectKind::Instance),
        };

        if let Some(ref ua) = config.user_agent {
            let name = to_cstring(&ua.name)?;
            let http = to_cstring(&ua.http)?;
            instance.engine().set_user_agent(raw, &name, &http);
        }
        if let Some(ref app) = config.app_id {
            let id = to_cstring(&app.id)?;
            let version = to_cstring(&app.version)?;
            let icon = to_cstring(&app.icon)?;
            instance.engine().set_app_id(raw, &id, &version, &icon);
        }

        Ok(instance)
    }

    /// Wrap an instance handle obtained elsewhere, adding a reference.
    ///
    /// # Safety
    /// `raw` must be a live instance handle of `engine`.
    pub unsafe fn from_raw_retained(engine: Arc<dyn Engine>, raw: RawHandle) -> Self {
        Self {
            handle: SharedHandle::retain(engine, raw, ObjectKind::Instance),
        }
    }

    pub fn engine(&self) -> &Arc<dyn Engine> {
        self.handle.engine()
    }

    pub fn raw(&self) -> RawHandle {
        self.handle.raw()
    }

    /// Audio output modules the engine can use.
    pub fn audio_outputs(&self) -> Vec<AudioOutputDescription> {
        self.engine().audio_output_list(self.raw())
    }

    /// Devices of the audio output module `aout`. Empty if the module cannot
    /// enumerate devices, which does not mean it is unusable.
    pub fn audio_output_devices(&self, aout: &str) -> Result<Vec<AudioOutputDevice>, VlcError> {
        let aout = to_cstring(aout)?;
        Ok(self.engine().audio_output_device_list(self.raw(), &aout))
    }
}
