use std::ffi::CStr;
use std::sync::Arc;

use crate::handle::{ObjectKind, RawHandle};
use crate::models::audio_models::{AudioOutputDescription, AudioOutputDevice, TrackDescription};
use crate::traits::callbacks::{AudioCallbacks, FormatCallbacks, VolumeCallback};

/// The native multimedia engine behind the wrappers.
///
/// Each method corresponds to one libvlc entry point, with the same argument
/// order, units and sentinel return values. Implementations forward; they do
/// not validate or retry. Implemented by:
/// - `LibVlc` (vlc-native), which calls into a runtime-loaded libvlc
/// - a stub engine used by this crate's tests
///
/// Factory methods return `None` where libvlc returns NULL. List methods copy
/// the native list and free it before returning.
pub trait Engine: Send + Sync {
    /// Version string of the engine, e.g. "3.0.20 Vetinari".
    fn version(&self) -> String;

    /// Last error message recorded for the calling thread, if any.
    fn last_error(&self) -> Option<String>;

    fn retain(&self, kind: ObjectKind, handle: RawHandle);

    fn release(&self, kind: ObjectKind, handle: RawHandle);

    // --- Instance ---

    fn instance_new(&self, args: &[&CStr]) -> Option<RawHandle>;

    fn set_user_agent(&self, instance: RawHandle, name: &CStr, http: &CStr);

    fn set_app_id(&self, instance: RawHandle, id: &CStr, version: &CStr, icon: &CStr);

    fn audio_output_list(&self, instance: RawHandle) -> Vec<AudioOutputDescription>;

    fn audio_output_device_list(&self, instance: RawHandle, aout: &CStr) -> Vec<AudioOutputDevice>;

    // --- Media ---

    fn media_new_location(&self, instance: RawHandle, mrl: &CStr) -> Option<RawHandle>;

    fn media_new_path(&self, instance: RawHandle, path: &CStr) -> Option<RawHandle>;

    // --- Media player ---

    fn media_player_new(&self, instance: RawHandle) -> Option<RawHandle>;

    fn media_player_new_from_media(&self, media: RawHandle) -> Option<RawHandle>;

    fn media_player_set_media(&self, player: RawHandle, media: Option<RawHandle>);

    // --- Audio ---

    fn audio_set_callbacks(&self, player: RawHandle, callbacks: Arc<dyn AudioCallbacks>);

    fn audio_set_volume_callback(&self, player: RawHandle, callback: Option<Arc<dyn VolumeCallback>>);

    fn audio_set_format_callbacks(&self, player: RawHandle, callbacks: Arc<dyn FormatCallbacks>);

    fn audio_set_format(&self, player: RawHandle, format: &CStr, rate: u32, channels: u32);

    /// 0 on success, -1 on error.
    fn audio_output_set(&self, player: RawHandle, name: &CStr) -> i32;

    fn audio_output_device_enum(&self, player: RawHandle) -> Vec<AudioOutputDevice>;

    /// No return value: the engine ignores errors here.
    fn audio_output_device_set(&self, player: RawHandle, module: Option<&CStr>, device_id: &CStr);

    fn audio_toggle_mute(&self, player: RawHandle);

    /// Mute status as 0/1, or -1 if undefined.
    fn audio_get_mute(&self, player: RawHandle) -> i32;

    fn audio_set_mute(&self, player: RawHandle, status: i32);

    fn audio_get_volume(&self, player: RawHandle) -> i32;

    /// 0 if set, -1 if out of range.
    fn audio_set_volume(&self, player: RawHandle, volume: i32) -> i32;

    fn audio_get_track_count(&self, player: RawHandle) -> i32;

    fn audio_get_track_description(&self, player: RawHandle) -> Vec<TrackDescription>;

    fn audio_get_track(&self, player: RawHandle) -> i32;

    fn audio_set_track(&self, player: RawHandle, track: i32) -> i32;

    fn audio_get_channel(&self, player: RawHandle) -> i32;

    fn audio_set_channel(&self, player: RawHandle, channel: i32) -> i32;

    /// Audio delay in microseconds.
    fn audio_get_delay(&self, player: RawHandle) -> i64;

    fn audio_set_delay(&self, player: RawHandle, delay: i64) -> i32;

    // --- Media discoverer ---

    fn media_discoverer_new(&self, instance: RawHandle, name: &CStr) -> Option<RawHandle>;

    fn media_discoverer_release(&self, discoverer: RawHandle);

    fn media_discoverer_localized_name(&self, discoverer: RawHandle) -> Option<String>;

    fn media_discoverer_event_manager(&self, discoverer: RawHandle) -> Option<RawHandle>;

    fn media_discoverer_is_running(&self, discoverer: RawHandle) -> bool;
}
