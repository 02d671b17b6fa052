//! Raw libvlc declarations and the runtime-loaded function table.
//!
//! Symbols are resolved with `libloading` when [`LibVlcApi`] is loaded, so
//! nothing links against libvlc at build time. Entry points that only exist
//! in some libvlc releases are `Option`s.

#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_float, c_int, c_uint, c_void};
use std::path::Path;

use crate::error::LoadError;

pub enum libvlc_instance_t {}
pub enum libvlc_media_t {}
pub enum libvlc_media_player_t {}
pub enum libvlc_media_discoverer_t {}
pub enum libvlc_event_manager_t {}

#[repr(C)]
pub struct libvlc_audio_output_t {
    pub psz_name: *mut c_char,
    pub psz_description: *mut c_char,
    pub p_next: *mut libvlc_audio_output_t,
}

#[repr(C)]
pub struct libvlc_audio_output_device_t {
    pub p_next: *mut libvlc_audio_output_device_t,
    pub psz_device: *mut c_char,
    pub psz_description: *mut c_char,
}

#[repr(C)]
pub struct libvlc_track_description_t {
    pub i_id: c_int,
    pub psz_name: *mut c_char,
    pub p_next: *mut libvlc_track_description_t,
}

// Audio callbacks
pub type libvlc_audio_play_cb = unsafe extern "C" fn(data: *mut c_void, samples: *const c_void, count: c_uint, pts: i64);
pub type libvlc_audio_pause_cb = unsafe extern "C" fn(data: *mut c_void, pts: i64);
pub type libvlc_audio_resume_cb = unsafe extern "C" fn(data: *mut c_void, pts: i64);
pub type libvlc_audio_flush_cb = unsafe extern "C" fn(data: *mut c_void, pts: i64);
pub type libvlc_audio_drain_cb = unsafe extern "C" fn(data: *mut c_void);
pub type libvlc_audio_set_volume_cb = unsafe extern "C" fn(data: *mut c_void, volume: c_float, mute: bool);
pub type libvlc_audio_setup_cb =
    unsafe extern "C" fn(data: *mut *mut c_void, format: *mut c_char, rate: *mut c_uint, channels: *mut c_uint) -> c_int;
pub type libvlc_audio_cleanup_cb = unsafe extern "C" fn(data: *mut c_void);

/// Library names and paths tried when no explicit path is configured.
#[cfg(target_os = "windows")]
pub const LIBVLC_LIB_PATHS: &[&str] = &[
    "libvlc.dll",
    "C:\\Program Files\\VideoLAN\\VLC\\libvlc.dll",
    "C:\\Program Files (x86)\\VideoLAN\\VLC\\libvlc.dll",
];

#[cfg(target_os = "macos")]
pub const LIBVLC_LIB_PATHS: &[&str] = &[
    "libvlc.dylib",
    "/Applications/VLC.app/Contents/MacOS/lib/libvlc.dylib",
    "/opt/homebrew/lib/libvlc.dylib",
];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const LIBVLC_LIB_PATHS: &[&str] = &[
    "libvlc.so.5",
    "libvlc.so",
    "/usr/lib/x86_64-linux-gnu/libvlc.so.5",
    "/usr/lib/aarch64-linux-gnu/libvlc.so.5",
    "/usr/lib64/libvlc.so.5",
    "/usr/lib/libvlc.so.5",
];

/// Declares the function table and its loader in one place.
macro_rules! libvlc_api {
    (
        required { $( $field:ident : $sym:literal => fn( $($arg:ty),* ) $(-> $ret:ty)? ; )* }
        optional { $( $ofield:ident : $osym:literal => fn( $($oarg:ty),* ) $(-> $oret:ty)? ; )* }
    ) => {
        /// Dynamically loaded libvlc.
        pub struct LibVlcApi {
            _lib: libloading::Library,
            $( pub $field: unsafe extern "C" fn($($arg),*) $(-> $ret)?, )*
            $( pub $ofield: Option<unsafe extern "C" fn($($oarg),*) $(-> $oret)?>, )*
        }

        impl LibVlcApi {
            /// Load libvlc from `path` and resolve every entry point.
            ///
            /// # Safety
            /// Loading runs the library's initialisers, and the declared
            /// signatures must match the loaded libvlc's headers.
            pub unsafe fn load_from_path(path: &Path) -> Result<Self, LoadError> {
                let lib = libloading::Library::new(path).map_err(|source| LoadError::Open {
                    path: path.display().to_string(),
                    source,
                })?;

                $(
                    let $field = *lib
                        .get::<unsafe extern "C" fn($($arg),*) $(-> $ret)?>(concat!($sym, "\0").as_bytes())
                        .map_err(|source| LoadError::Symbol { name: $sym, source })?;
                )*
                $(
                    let $ofield = lib
                        .get::<unsafe extern "C" fn($($oarg),*) $(-> $oret)?>(concat!($osym, "\0").as_bytes())
                        .ok()
                        .map(|symbol| *symbol);
                )*

                Ok(Self {
                    _lib: lib,
                    $( $field, )*
                    $( $ofield, )*
                })
            }
        }
    };
}

libvlc_api! {
    required {
        get_version: "libvlc_get_version" => fn() -> *const c_char;
        errmsg: "libvlc_errmsg" => fn() -> *const c_char;
        free: "libvlc_free" => fn(*mut c_void);

        new: "libvlc_new" => fn(c_int, *const *const c_char) -> *mut libvlc_instance_t;
        retain: "libvlc_retain" => fn(*mut libvlc_instance_t);
        release: "libvlc_release" => fn(*mut libvlc_instance_t);
        set_user_agent: "libvlc_set_user_agent" => fn(*mut libvlc_instance_t, *const c_char, *const c_char);
        audio_output_list_get: "libvlc_audio_output_list_get" => fn(*mut libvlc_instance_t) -> *mut libvlc_audio_output_t;
        audio_output_list_release: "libvlc_audio_output_list_release" => fn(*mut libvlc_audio_output_t);
        audio_output_device_list_get: "libvlc_audio_output_device_list_get"
            => fn(*mut libvlc_instance_t, *const c_char) -> *mut libvlc_audio_output_device_t;
        audio_output_device_list_release: "libvlc_audio_output_device_list_release"
            => fn(*mut libvlc_audio_output_device_t);

        media_new_location: "libvlc_media_new_location" => fn(*mut libvlc_instance_t, *const c_char) -> *mut libvlc_media_t;
        media_new_path: "libvlc_media_new_path" => fn(*mut libvlc_instance_t, *const c_char) -> *mut libvlc_media_t;
        media_retain: "libvlc_media_retain" => fn(*mut libvlc_media_t);
        media_release: "libvlc_media_release" => fn(*mut libvlc_media_t);

        media_player_new: "libvlc_media_player_new" => fn(*mut libvlc_instance_t) -> *mut libvlc_media_player_t;
        media_player_new_from_media: "libvlc_media_player_new_from_media"
            => fn(*mut libvlc_media_t) -> *mut libvlc_media_player_t;
        media_player_retain: "libvlc_media_player_retain" => fn(*mut libvlc_media_player_t);
        media_player_release: "libvlc_media_player_release" => fn(*mut libvlc_media_player_t);
        media_player_set_media: "libvlc_media_player_set_media" => fn(*mut libvlc_media_player_t, *mut libvlc_media_t);

        audio_set_callbacks: "libvlc_audio_set_callbacks" => fn(
            *mut libvlc_media_player_t,
            Option<libvlc_audio_play_cb>,
            Option<libvlc_audio_pause_cb>,
            Option<libvlc_audio_resume_cb>,
            Option<libvlc_audio_flush_cb>,
            Option<libvlc_audio_drain_cb>,
            *mut c_void
        );
        audio_set_volume_callback: "libvlc_audio_set_volume_callback"
            => fn(*mut libvlc_media_player_t, Option<libvlc_audio_set_volume_cb>);
        audio_set_format_callbacks: "libvlc_audio_set_format_callbacks"
            => fn(*mut libvlc_media_player_t, Option<libvlc_audio_setup_cb>, Option<libvlc_audio_cleanup_cb>);
        audio_set_format: "libvlc_audio_set_format" => fn(*mut libvlc_media_player_t, *const c_char, c_uint, c_uint);
        audio_output_set: "libvlc_audio_output_set" => fn(*mut libvlc_media_player_t, *const c_char) -> c_int;
        audio_output_device_set: "libvlc_audio_output_device_set"
            => fn(*mut libvlc_media_player_t, *const c_char, *const c_char);
        audio_toggle_mute: "libvlc_audio_toggle_mute" => fn(*mut libvlc_media_player_t);
        audio_get_mute: "libvlc_audio_get_mute" => fn(*mut libvlc_media_player_t) -> c_int;
        audio_set_mute: "libvlc_audio_set_mute" => fn(*mut libvlc_media_player_t, c_int);
        audio_get_volume: "libvlc_audio_get_volume" => fn(*mut libvlc_media_player_t) -> c_int;
        audio_set_volume: "libvlc_audio_set_volume" => fn(*mut libvlc_media_player_t, c_int) -> c_int;
        audio_get_track_count: "libvlc_audio_get_track_count" => fn(*mut libvlc_media_player_t) -> c_int;
        audio_get_track_description: "libvlc_audio_get_track_description"
            => fn(*mut libvlc_media_player_t) -> *mut libvlc_track_description_t;
        track_description_list_release: "libvlc_track_description_list_release"
            => fn(*mut libvlc_track_description_t);
        audio_get_track: "libvlc_audio_get_track" => fn(*mut libvlc_media_player_t) -> c_int;
        audio_set_track: "libvlc_audio_set_track" => fn(*mut libvlc_media_player_t, c_int) -> c_int;
        audio_get_channel: "libvlc_audio_get_channel" => fn(*mut libvlc_media_player_t) -> c_int;
        audio_set_channel: "libvlc_audio_set_channel" => fn(*mut libvlc_media_player_t, c_int) -> c_int;
        audio_get_delay: "libvlc_audio_get_delay" => fn(*mut libvlc_media_player_t) -> i64;
        audio_set_delay: "libvlc_audio_set_delay" => fn(*mut libvlc_media_player_t, i64) -> c_int;

        media_discoverer_release: "libvlc_media_discoverer_release" => fn(*mut libvlc_media_discoverer_t);
        media_discoverer_is_running: "libvlc_media_discoverer_is_running" => fn(*mut libvlc_media_discoverer_t) -> c_int;
    }
    optional {
        // 2.1.0+
        set_app_id: "libvlc_set_app_id" => fn(*mut libvlc_instance_t, *const c_char, *const c_char, *const c_char);
        // 2.2.0+
        audio_output_device_enum: "libvlc_audio_output_device_enum"
            => fn(*mut libvlc_media_player_t) -> *mut libvlc_audio_output_device_t;
        // up to 2.2
        media_discoverer_new_from_name: "libvlc_media_discoverer_new_from_name"
            => fn(*mut libvlc_instance_t, *const c_char) -> *mut libvlc_media_discoverer_t;
        media_discoverer_localized_name: "libvlc_media_discoverer_localized_name"
            => fn(*mut libvlc_media_discoverer_t) -> *mut c_char;
        media_discoverer_event_manager: "libvlc_media_discoverer_event_manager"
            => fn(*mut libvlc_media_discoverer_t) -> *mut libvlc_event_manager_t;
        // 3.0+
        media_discoverer_new: "libvlc_media_discoverer_new"
            => fn(*mut libvlc_instance_t, *const c_char) -> *mut libvlc_media_discoverer_t;
        media_discoverer_start: "libvlc_media_discoverer_start" => fn(*mut libvlc_media_discoverer_t) -> c_int;
    }
}

// SAFETY: LibVlcApi only holds function pointers into libvlc, whose public
// API is thread-safe, plus the library handle that keeps them valid.
unsafe impl Send for LibVlcApi {}
unsafe impl Sync for LibVlcApi {}
