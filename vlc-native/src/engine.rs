//! [`Engine`] implementation over a runtime-loaded libvlc.

use std::ffi::{c_char, c_void, CStr};
use std::sync::Arc;

use vlc_core::{
    AudioCallbacks, AudioFormat, AudioOutputDescription, AudioOutputDevice, Engine, FormatCallbacks, ObjectKind,
    RawHandle, TrackDescription, VlcError, VolumeCallback,
};

use crate::callbacks::{self, PlayerRegistry};
use crate::config::LibraryConfig;
use crate::error::LoadError;
use crate::sys::{self, LibVlcApi};

/// libvlc, loaded at runtime.
///
/// Every method is a direct call into the matching libvlc entry point. Native
/// lists are copied into owned values and freed before returning.
pub struct LibVlc {
    api: LibVlcApi,
    players: PlayerRegistry,
}

impl LibVlc {
    /// Load libvlc using `config`, trying each candidate path in order.
    pub fn load(config: &LibraryConfig) -> Result<Self, VlcError> {
        config.validate()?;

        let mut tried = Vec::new();
        for path in config.candidates() {
            // SAFETY: libvlc is a trusted system library and the declared
            // signatures follow its public headers.
            match unsafe { LibVlcApi::load_from_path(&path) } {
                Ok(api) => {
                    let engine = Self {
                        api,
                        players: PlayerRegistry::default(),
                    };
                    log::info!("loaded libvlc {} from {}", engine.version(), path.display());
                    return Ok(engine);
                }
                Err(e @ LoadError::Symbol { .. }) => {
                    log::warn!("{} is not a usable libvlc: {}", path.display(), e);
                    tried.push(path.display().to_string());
                }
                Err(e) => {
                    log::debug!("{}", e);
                    tried.push(path.display().to_string());
                }
            }
        }
        Err(LoadError::NotFound(tried).into())
    }

    /// [`LibVlc::load`] with [`LibraryConfig::from_env`], as a shareable engine.
    pub fn load_default() -> Result<Arc<Self>, VlcError> {
        Self::load(&LibraryConfig::from_env()).map(Arc::new)
    }

    /// Copy a libvlc-allocated string and free it.
    unsafe fn take_string(&self, ptr: *mut c_char) -> Option<String> {
        let value = borrowed_string(ptr);
        if !ptr.is_null() {
            (self.api.free)(ptr as *mut c_void);
        }
        value
    }

    unsafe fn take_devices(&self, head: *mut sys::libvlc_audio_output_device_t) -> Vec<AudioOutputDevice> {
        let devices = collect_devices(head);
        if !head.is_null() {
            (self.api.audio_output_device_list_release)(head);
        }
        devices
    }
}

unsafe fn borrowed_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}

/// Walk a device list without freeing it.
pub(crate) unsafe fn collect_devices(head: *const sys::libvlc_audio_output_device_t) -> Vec<AudioOutputDevice> {
    let mut devices = Vec::new();
    let mut node = head;
    while let Some(item) = node.as_ref() {
        devices.push(AudioOutputDevice {
            device: borrowed_string(item.psz_device).unwrap_or_default(),
            description: borrowed_string(item.psz_description).unwrap_or_default(),
        });
        node = item.p_next;
    }
    devices
}

pub(crate) unsafe fn collect_outputs(head: *const sys::libvlc_audio_output_t) -> Vec<AudioOutputDescription> {
    let mut outputs = Vec::new();
    let mut node = head;
    while let Some(item) = node.as_ref() {
        outputs.push(AudioOutputDescription {
            name: borrowed_string(item.psz_name).unwrap_or_default(),
            description: borrowed_string(item.psz_description).unwrap_or_default(),
        });
        node = item.p_next;
    }
    outputs
}

pub(crate) unsafe fn collect_tracks(head: *const sys::libvlc_track_description_t) -> Vec<TrackDescription> {
    let mut tracks = Vec::new();
    let mut node = head;
    while let Some(item) = node.as_ref() {
        tracks.push(TrackDescription {
            id: item.i_id,
            name: borrowed_string(item.psz_name).unwrap_or_default(),
        });
        node = item.p_next;
    }
    tracks
}

fn fourcc_of(format: &CStr) -> [u8; 4] {
    let mut fourcc = [0u8; 4];
    for (dst, src) in fourcc.iter_mut().zip(format.to_bytes()) {
        *dst = *src;
    }
    fourcc
}

// All `unsafe` blocks below call libvlc with handles that the wrappers keep
// alive and with NUL-terminated strings that outlive the call.
impl Engine for LibVlc {
    fn version(&self) -> String {
        unsafe { borrowed_string((self.api.get_version)()) }.unwrap_or_default()
    }

    fn last_error(&self) -> Option<String> {
        unsafe { borrowed_string((self.api.errmsg)()) }
    }

    fn retain(&self, kind: ObjectKind, handle: RawHandle) {
        unsafe {
            match kind {
                ObjectKind::Instance => (self.api.retain)(handle.as_ptr()),
                ObjectKind::Media => (self.api.media_retain)(handle.as_ptr()),
                ObjectKind::MediaPlayer => {
                    (self.api.media_player_retain)(handle.as_ptr());
                    self.players.retained(handle);
                }
            }
        }
    }

    fn release(&self, kind: ObjectKind, handle: RawHandle) {
        unsafe {
            match kind {
                ObjectKind::Instance => (self.api.release)(handle.as_ptr()),
                ObjectKind::Media => (self.api.media_release)(handle.as_ptr()),
                ObjectKind::MediaPlayer => {
                    let context = self.players.released(handle);
                    (self.api.media_player_release)(handle.as_ptr());
                    log::debug!(
                        "released player {:?}, {} references left",
                        handle,
                        self.players.refs(handle)
                    );
                    // libvlc has stopped calling back once the last reference is gone.
                    drop(context);
                }
            }
        }
    }

    fn instance_new(&self, args: &[&CStr]) -> Option<RawHandle> {
        let argv: Vec<*const c_char> = args.iter().map(|a| a.as_ptr()).collect();
        let argc = i32::try_from(argv.len()).ok()?;
        let ptr = unsafe { (self.api.new)(argc, argv.as_ptr()) };
        RawHandle::from_ptr(ptr)
    }

    fn set_user_agent(&self, instance: RawHandle, name: &CStr, http: &CStr) {
        unsafe { (self.api.set_user_agent)(instance.as_ptr(), name.as_ptr(), http.as_ptr()) }
    }

    fn set_app_id(&self, instance: RawHandle, id: &CStr, version: &CStr, icon: &CStr) {
        match self.api.set_app_id {
            Some(set_app_id) => unsafe { set_app_id(instance.as_ptr(), id.as_ptr(), version.as_ptr(), icon.as_ptr()) },
            None => log::debug!("libvlc_set_app_id not available, ignoring app id"),
        }
    }

    fn audio_output_list(&self, instance: RawHandle) -> Vec<AudioOutputDescription> {
        unsafe {
            let head = (self.api.audio_output_list_get)(instance.as_ptr());
            let outputs = collect_outputs(head);
            if !head.is_null() {
                (self.api.audio_output_list_release)(head);
            }
            outputs
        }
    }

    fn audio_output_device_list(&self, instance: RawHandle, aout: &CStr) -> Vec<AudioOutputDevice> {
        unsafe {
            let head = (self.api.audio_output_device_list_get)(instance.as_ptr(), aout.as_ptr());
            self.take_devices(head)
        }
    }

    fn media_new_location(&self, instance: RawHandle, mrl: &CStr) -> Option<RawHandle> {
        RawHandle::from_ptr(unsafe { (self.api.media_new_location)(instance.as_ptr(), mrl.as_ptr()) })
    }

    fn media_new_path(&self, instance: RawHandle, path: &CStr) -> Option<RawHandle> {
        RawHandle::from_ptr(unsafe { (self.api.media_new_path)(instance.as_ptr(), path.as_ptr()) })
    }

    fn media_player_new(&self, instance: RawHandle) -> Option<RawHandle> {
        let player = RawHandle::from_ptr(unsafe { (self.api.media_player_new)(instance.as_ptr()) })?;
        self.players.created(player);
        Some(player)
    }

    fn media_player_new_from_media(&self, media: RawHandle) -> Option<RawHandle> {
        let player = RawHandle::from_ptr(unsafe { (self.api.media_player_new_from_media)(media.as_ptr()) })?;
        self.players.created(player);
        Some(player)
    }

    fn media_player_set_media(&self, player: RawHandle, media: Option<RawHandle>) {
        let media_ptr: *mut sys::libvlc_media_t = media.map_or(std::ptr::null_mut(), RawHandle::as_ptr);
        unsafe { (self.api.media_player_set_media)(player.as_ptr(), media_ptr) }
    }

    fn audio_set_callbacks(&self, player: RawHandle, handlers: Arc<dyn AudioCallbacks>) {
        let context = self.players.context(player);
        context.set_audio(handlers);
        unsafe {
            (self.api.audio_set_callbacks)(
                player.as_ptr(),
                Some(callbacks::play),
                Some(callbacks::pause),
                Some(callbacks::resume),
                Some(callbacks::flush),
                Some(callbacks::drain),
                context.as_opaque(),
            )
        }
    }

    fn audio_set_volume_callback(&self, player: RawHandle, callback: Option<Arc<dyn VolumeCallback>>) {
        let trampoline = callback.is_some().then_some(callbacks::set_volume as sys::libvlc_audio_set_volume_cb);
        self.players.context(player).set_volume(callback);
        unsafe { (self.api.audio_set_volume_callback)(player.as_ptr(), trampoline) }
    }

    fn audio_set_format_callbacks(&self, player: RawHandle, handlers: Arc<dyn FormatCallbacks>) {
        self.players.context(player).set_format_callbacks(handlers);
        unsafe {
            (self.api.audio_set_format_callbacks)(
                player.as_ptr(),
                Some(callbacks::setup),
                Some(callbacks::cleanup),
            )
        }
    }

    fn audio_set_format(&self, player: RawHandle, format: &CStr, rate: u32, channels: u32) {
        self.players.context(player).set_negotiated(AudioFormat {
            fourcc: fourcc_of(format),
            rate,
            channels,
        });
        unsafe { (self.api.audio_set_format)(player.as_ptr(), format.as_ptr(), rate, channels) }
    }

    fn audio_output_set(&self, player: RawHandle, name: &CStr) -> i32 {
        unsafe { (self.api.audio_output_set)(player.as_ptr(), name.as_ptr()) }
    }

    fn audio_output_device_enum(&self, player: RawHandle) -> Vec<AudioOutputDevice> {
        match self.api.audio_output_device_enum {
            Some(device_enum) => unsafe { self.take_devices(device_enum(player.as_ptr())) },
            None => Vec::new(),
        }
    }

    fn audio_output_device_set(&self, player: RawHandle, module: Option<&CStr>, device_id: &CStr) {
        let module_ptr = module.map_or(std::ptr::null(), CStr::as_ptr);
        unsafe { (self.api.audio_output_device_set)(player.as_ptr(), module_ptr, device_id.as_ptr()) }
    }

    fn audio_toggle_mute(&self, player: RawHandle) {
        unsafe { (self.api.audio_toggle_mute)(player.as_ptr()) }
    }

    fn audio_get_mute(&self, player: RawHandle) -> i32 {
        unsafe { (self.api.audio_get_mute)(player.as_ptr()) }
    }

    fn audio_set_mute(&self, player: RawHandle, status: i32) {
        unsafe { (self.api.audio_set_mute)(player.as_ptr(), status) }
    }

    fn audio_get_volume(&self, player: RawHandle) -> i32 {
        unsafe { (self.api.audio_get_volume)(player.as_ptr()) }
    }

    fn audio_set_volume(&self, player: RawHandle, volume: i32) -> i32 {
        unsafe { (self.api.audio_set_volume)(player.as_ptr(), volume) }
    }

    fn audio_get_track_count(&self, player: RawHandle) -> i32 {
        unsafe { (self.api.audio_get_track_count)(player.as_ptr()) }
    }

    fn audio_get_track_description(&self, player: RawHandle) -> Vec<TrackDescription> {
        unsafe {
            let head = (self.api.audio_get_track_description)(player.as_ptr());
            let tracks = collect_tracks(head);
            if !head.is_null() {
                (self.api.track_description_list_release)(head);
            }
            tracks
        }
    }

    fn audio_get_track(&self, player: RawHandle) -> i32 {
        unsafe { (self.api.audio_get_track)(player.as_ptr()) }
    }

    fn audio_set_track(&self, player: RawHandle, track: i32) -> i32 {
        unsafe { (self.api.audio_set_track)(player.as_ptr(), track) }
    }

    fn audio_get_channel(&self, player: RawHandle) -> i32 {
        unsafe { (self.api.audio_get_channel)(player.as_ptr()) }
    }

    fn audio_set_channel(&self, player: RawHandle, channel: i32) -> i32 {
        unsafe { (self.api.audio_set_channel)(player.as_ptr(), channel) }
    }

    fn audio_get_delay(&self, player: RawHandle) -> i64 {
        unsafe { (self.api.audio_get_delay)(player.as_ptr()) }
    }

    fn audio_set_delay(&self, player: RawHandle, delay: i64) -> i32 {
        unsafe { (self.api.audio_set_delay)(player.as_ptr(), delay) }
    }

    fn media_discoverer_new(&self, instance: RawHandle, name: &CStr) -> Option<RawHandle> {
        unsafe {
            if let Some(new_from_name) = self.api.media_discoverer_new_from_name {
                return RawHandle::from_ptr(new_from_name(instance.as_ptr(), name.as_ptr()));
            }
            let (Some(new), Some(start)) = (self.api.media_discoverer_new, self.api.media_discoverer_start) else {
                log::error!("libvlc exports no media discoverer constructor");
                return None;
            };
            let discoverer = RawHandle::from_ptr(new(instance.as_ptr(), name.as_ptr()))?;
            if start(discoverer.as_ptr()) != 0 {
                log::warn!("discovery service {:?} failed to start", name);
                (self.api.media_discoverer_release)(discoverer.as_ptr());
                return None;
            }
            Some(discoverer)
        }
    }

    fn media_discoverer_release(&self, discoverer: RawHandle) {
        unsafe { (self.api.media_discoverer_release)(discoverer.as_ptr()) }
    }

    fn media_discoverer_localized_name(&self, discoverer: RawHandle) -> Option<String> {
        let localized_name = self.api.media_discoverer_localized_name?;
        unsafe { self.take_string(localized_name(discoverer.as_ptr())) }
    }

    fn media_discoverer_event_manager(&self, discoverer: RawHandle) -> Option<RawHandle> {
        let event_manager = self.api.media_discoverer_event_manager?;
        RawHandle::from_ptr(unsafe { event_manager(discoverer.as_ptr()) })
    }

    fn media_discoverer_is_running(&self, discoverer: RawHandle) -> bool {
        unsafe { (self.api.media_discoverer_is_running)(discoverer.as_ptr()) != 0 }
    }
}
