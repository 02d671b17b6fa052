//! Bridges libvlc's C audio callbacks to the `vlc-core` callback traits.
//!
//! libvlc passes one opaque pointer back to every audio callback of a player.
//! That pointer is a [`CallbackContext`] owned by the [`PlayerRegistry`],
//! which keeps it alive until the last reference to the player is released.

use std::collections::HashMap;
use std::ffi::{c_char, c_float, c_int, c_uint, c_void};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use vlc_core::{AudioCallbacks, AudioFormat, FormatCallbacks, RawHandle, VolumeCallback};

/// Format libvlc decodes to when neither a fixed format nor format
/// callbacks were set.
pub const DEFAULT_FORMAT: AudioFormat = AudioFormat {
    fourcc: *b"S16N",
    rate: 44100,
    channels: 2,
};

/// Callback state of one media player.
#[derive(Default)]
pub struct CallbackContext {
    audio: Mutex<Option<Arc<dyn AudioCallbacks>>>,
    volume: Mutex<Option<Arc<dyn VolumeCallback>>>,
    format: Mutex<Option<Arc<dyn FormatCallbacks>>>,
    negotiated: Mutex<Option<AudioFormat>>,
    unknown_frame_reported: AtomicBool,
}

impl CallbackContext {
    /// Install the audio sink. Until a format is fixed or negotiated, buffers
    /// are sized for [`DEFAULT_FORMAT`].
    pub fn set_audio(&self, callbacks: Arc<dyn AudioCallbacks>) {
        *self.audio.lock() = Some(callbacks);
        self.negotiated.lock().get_or_insert(DEFAULT_FORMAT);
    }

    pub fn set_volume(&self, callback: Option<Arc<dyn VolumeCallback>>) {
        *self.volume.lock() = callback;
    }

    pub fn set_format_callbacks(&self, callbacks: Arc<dyn FormatCallbacks>) {
        *self.format.lock() = Some(callbacks);
    }

    /// Record a fixed format so `play` can size its sample buffer.
    pub fn set_negotiated(&self, format: AudioFormat) {
        *self.negotiated.lock() = Some(format);
    }

    pub fn negotiated(&self) -> Option<AudioFormat> {
        *self.negotiated.lock()
    }

    /// Pointer handed to libvlc as the callbacks' opaque data.
    pub fn as_opaque(self: &Arc<Self>) -> *mut c_void {
        Arc::as_ptr(self) as *mut c_void
    }

    fn audio(&self) -> Option<Arc<dyn AudioCallbacks>> {
        self.audio.lock().clone()
    }
}

struct PlayerEntry {
    refs: usize,
    context: Option<Arc<CallbackContext>>,
}

/// Mirrors the reference count of every player created through this engine
/// so callback contexts are dropped only once libvlc can no longer call them.
#[derive(Default)]
pub struct PlayerRegistry {
    players: Mutex<HashMap<RawHandle, PlayerEntry>>,
}

impl PlayerRegistry {
    pub fn created(&self, player: RawHandle) {
        self.players
            .lock()
            .insert(player, PlayerEntry { refs: 1, context: None });
    }

    pub fn retained(&self, player: RawHandle) {
        self.players
            .lock()
            .entry(player)
            .or_insert(PlayerEntry { refs: 0, context: None })
            .refs += 1;
    }

    /// Note one release. Returns the context to drop once the count reaches
    /// zero; the caller drops it after libvlc has released the player.
    pub fn released(&self, player: RawHandle) -> Option<Arc<CallbackContext>> {
        let mut players = self.players.lock();
        let entry = players.get_mut(&player)?;
        entry.refs = entry.refs.saturating_sub(1);
        if entry.refs > 0 {
            return None;
        }
        players.remove(&player).and_then(|e| e.context)
    }

    /// Context of `player`, created on first use.
    pub fn context(&self, player: RawHandle) -> Arc<CallbackContext> {
        let mut players = self.players.lock();
        let entry = players
            .entry(player)
            .or_insert(PlayerEntry { refs: 1, context: None });
        Arc::clone(entry.context.get_or_insert_with(Default::default))
    }

    pub fn refs(&self, player: RawHandle) -> usize {
        self.players.lock().get(&player).map_or(0, |e| e.refs)
    }
}

/// Run user code without letting a panic unwind into libvlc.
fn guard<R>(what: &str, f: impl FnOnce() -> R) -> Option<R> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(_) => {
            log::error!("audio {} callback panicked", what);
            None
        }
    }
}

/// # Safety
/// `data` must be null or come from [`CallbackContext::as_opaque`] on a
/// context that is still alive.
unsafe fn context<'a>(data: *mut c_void) -> Option<&'a CallbackContext> {
    (data as *const CallbackContext).as_ref()
}

pub unsafe extern "C" fn play(data: *mut c_void, samples: *const c_void, count: c_uint, pts: i64) {
    let Some(ctx) = context(data) else { return };
    let Some(cb) = ctx.audio() else { return };

    let format = ctx.negotiated().unwrap_or(DEFAULT_FORMAT);
    let len = match format.frame_size() {
        Some(frame) => frame * count as usize,
        None => {
            if !ctx.unknown_frame_reported.swap(true, Ordering::Relaxed) {
                log::warn!(
                    "unknown frame size for sample format {}, play callbacks get no sample data",
                    format.fourcc_str()
                );
            }
            0
        }
    };
    let bytes = if samples.is_null() || len == 0 {
        &[][..]
    } else {
        std::slice::from_raw_parts(samples as *const u8, len)
    };

    guard("play", || cb.play(bytes, count, pts));
}

pub unsafe extern "C" fn pause(data: *mut c_void, pts: i64) {
    if let Some(cb) = context(data).and_then(CallbackContext::audio) {
        guard("pause", || cb.pause(pts));
    }
}

pub unsafe extern "C" fn resume(data: *mut c_void, pts: i64) {
    if let Some(cb) = context(data).and_then(CallbackContext::audio) {
        guard("resume", || cb.resume(pts));
    }
}

pub unsafe extern "C" fn flush(data: *mut c_void, pts: i64) {
    if let Some(cb) = context(data).and_then(CallbackContext::audio) {
        guard("flush", || cb.flush(pts));
    }
}

pub unsafe extern "C" fn drain(data: *mut c_void) {
    if let Some(cb) = context(data).and_then(CallbackContext::audio) {
        guard("drain", || cb.drain());
    }
}

pub unsafe extern "C" fn set_volume(data: *mut c_void, volume: c_float, mute: bool) {
    let Some(ctx) = context(data) else { return };
    let cb = ctx.volume.lock().clone();
    if let Some(cb) = cb {
        guard("volume", || cb.set_volume(volume, mute));
    }
}

/// `format` points to 4 writable chars (not NUL-terminated).
pub unsafe extern "C" fn setup(
    data: *mut *mut c_void,
    format: *mut c_char,
    rate: *mut c_uint,
    channels: *mut c_uint,
) -> c_int {
    if data.is_null() || format.is_null() || rate.is_null() || channels.is_null() {
        return -1;
    }
    let Some(ctx) = context(*data) else { return -1 };
    let cb = ctx.format.lock().clone();
    let Some(cb) = cb else { return -1 };

    let fourcc_ptr = format as *mut u8;
    let mut proposed = AudioFormat {
        fourcc: [0; 4],
        rate: *rate,
        channels: *channels,
    };
    std::ptr::copy_nonoverlapping(fourcc_ptr, proposed.fourcc.as_mut_ptr(), 4);

    if !guard("setup", || cb.setup(&mut proposed)).unwrap_or(false) {
        return -1;
    }

    std::ptr::copy_nonoverlapping(proposed.fourcc.as_ptr(), fourcc_ptr, 4);
    *rate = proposed.rate;
    *channels = proposed.channels;
    ctx.set_negotiated(proposed);
    0
}

pub unsafe extern "C" fn cleanup(data: *mut c_void) {
    let Some(ctx) = context(data) else { return };
    let cb = ctx.format.lock().clone();
    if let Some(cb) = cb {
        guard("cleanup", || cb.cleanup());
    }
}
