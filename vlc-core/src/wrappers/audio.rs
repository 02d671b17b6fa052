//! Audio controls of a media player.
//!
//! Every method forwards to the matching `libvlc_audio_*` entry point with
//! the stored player handle. Engine sentinels come back as
//! [`VlcError::ErrorOrUnavailable`] carrying the engine's code unchanged.

use std::sync::Arc;

use crate::handle::{RawHandle, SharedHandle};
use crate::models::audio_models::{AudioChannel, AudioOutputDevice, TrackDescription};
use crate::models::error::{check_status, check_value, VlcError};
use crate::traits::callbacks::{AudioCallbacks, FormatCallbacks, VolumeCallback};
use crate::traits::engine::Engine;

use super::to_cstring;

/// Audio API of a `libvlc_media_player_t`.
///
/// Cloning adds a reference to the player; dropping removes one. Two values
/// are equal when they refer to the same player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audio {
    handle: SharedHandle,
}

impl Audio {
    pub(crate) fn from_player_handle(handle: SharedHandle) -> Self {
        Self { handle }
    }

    pub fn raw(&self) -> RawHandle {
        self.handle.raw()
    }

    fn engine(&self) -> &Arc<dyn Engine> {
        self.handle.engine()
    }

    /// Route decoded audio to `callbacks` instead of an output module.
    ///
    /// Use [`Audio::set_format`] or [`Audio::set_format_callbacks`] to pick
    /// the decoded format.
    pub fn set_callbacks(&self, callbacks: Arc<dyn AudioCallbacks>) {
        self.engine().audio_set_callbacks(self.raw(), callbacks);
    }

    /// Apply volume through `callback`, or in software with `None`.
    /// Only meaningful together with [`Audio::set_callbacks`].
    pub fn set_volume_callback(&self, callback: Option<Arc<dyn VolumeCallback>>) {
        self.engine().audio_set_volume_callback(self.raw(), callback);
    }

    /// Negotiate the decoded format through `callbacks`. Only meaningful
    /// together with [`Audio::set_callbacks`].
    pub fn set_format_callbacks(&self, callbacks: Arc<dyn FormatCallbacks>) {
        self.engine().audio_set_format_callbacks(self.raw(), callbacks);
    }

    /// Fix the decoded format. `format` is a four-character sample format
    /// such as "S16N" or "FL32", `rate` is in Hz. Mutually exclusive with
    /// [`Audio::set_format_callbacks`].
    pub fn set_format(&self, format: &str, rate: u32, channels: u32) -> Result<(), VlcError> {
        let format = to_cstring(format)?;
        self.engine().audio_set_format(self.raw(), &format, rate, channels);
        Ok(())
    }

    /// Select an audio output module. Takes effect after playback restarts.
    pub fn output_set(&self, name: &str) -> Result<(), VlcError> {
        let name = to_cstring(name)?;
        check_status(self.engine().audio_output_set(self.raw(), &name))
    }

    /// Potential devices of the current output. An empty list does not mean
    /// the output is unusable.
    pub fn output_device_enum(&self) -> Vec<AudioOutputDevice> {
        self.engine().audio_output_device_enum(self.raw())
    }

    /// Move output to `device_id`, on `module` or on the current module with
    /// `None`.
    ///
    /// The engine gives no feedback here: a bad module or device is silently
    /// ignored. The returned error only covers string conversion.
    pub fn output_device_set(&self, module: Option<&str>, device_id: &str) -> Result<(), VlcError> {
        let module = module.map(to_cstring).transpose()?;
        let device_id = to_cstring(device_id)?;
        self.engine()
            .audio_output_device_set(self.raw(), module.as_deref(), &device_id);
        Ok(())
    }

    /// Toggle mute. Not atomic: another process may change the stream's mute
    /// state at the same time.
    pub fn toggle_mute(&self) {
        self.engine().audio_toggle_mute(self.raw());
    }

    /// Current mute status. `ErrorOrUnavailable(-1)` means the status is
    /// undefined, e.g. with no active audio stream.
    pub fn mute(&self) -> Result<bool, VlcError> {
        match self.engine().audio_get_mute(self.raw()) {
            code if code < 0 => Err(VlcError::ErrorOrUnavailable(code)),
            0 => Ok(false),
            _ => Ok(true),
        }
    }

    /// Set mute status. May silently have no effect (no active stream,
    /// pass-through output, output without mute support).
    pub fn set_mute(&self, mute: bool) {
        self.engine().audio_set_mute(self.raw(), i32::from(mute));
    }

    /// Software volume in percent (0 = mute, 100 = nominal / 0 dB).
    pub fn volume(&self) -> Result<u32, VlcError> {
        check_value(self.engine().audio_get_volume(self.raw()))
    }

    /// Set software volume in percent. Out-of-range values are rejected by
    /// the engine.
    pub fn set_volume(&self, volume: i32) -> Result<(), VlcError> {
        check_status(self.engine().audio_set_volume(self.raw(), volume))
    }

    pub fn track_count(&self) -> Result<u32, VlcError> {
        check_value(self.engine().audio_get_track_count(self.raw()))
    }

    pub fn track_description(&self) -> Vec<TrackDescription> {
        self.engine().audio_get_track_description(self.raw())
    }

    /// Current audio track id. Fails with `ErrorOrUnavailable(-1)` when there
    /// is no active input. Valid ids are never negative.
    pub fn track(&self) -> Result<i32, VlcError> {
        match self.engine().audio_get_track(self.raw()) {
            code if code < 0 => Err(VlcError::ErrorOrUnavailable(code)),
            id => Ok(id),
        }
    }

    /// Select a track by the `id` of its [`TrackDescription`].
    pub fn set_track(&self, track: i32) -> Result<(), VlcError> {
        check_status(self.engine().audio_set_track(self.raw(), track))
    }

    pub fn channel(&self) -> Result<AudioChannel, VlcError> {
        match self.engine().audio_get_channel(self.raw()) {
            code if code < 0 => Err(VlcError::ErrorOrUnavailable(code)),
            raw => Ok(AudioChannel::from_raw(raw)),
        }
    }

    pub fn set_channel(&self, channel: AudioChannel) -> Result<(), VlcError> {
        check_status(self.engine().audio_set_channel(self.raw(), channel.to_raw()))
    }

    /// Audio delay in microseconds.
    pub fn delay(&self) -> i64 {
        self.engine().audio_get_delay(self.raw())
    }

    /// Set audio delay in microseconds. Reset to zero whenever the media
    /// changes.
    pub fn set_delay(&self, delay: i64) -> Result<(), VlcError> {
        check_status(self.engine().audio_set_delay(self.raw(), delay))
    }
}
