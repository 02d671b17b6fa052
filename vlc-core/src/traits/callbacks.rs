use crate::models::audio_models::AudioFormat;

/// Receiver for decoded audio, registered with `Audio::set_callbacks`.
///
/// The implementing object is the user context: the engine hands it back
/// unchanged on every call. Calls arrive on engine threads.
pub trait AudioCallbacks: Send + Sync {
    /// Play `count` samples starting at `pts` (microseconds). `samples` holds
    /// the raw interleaved bytes in the negotiated format.
    fn play(&self, samples: &[u8], count: u32, pts: i64);

    fn pause(&self, _pts: i64) {}

    fn resume(&self, _pts: i64) {}

    fn flush(&self, _pts: i64) {}

    fn drain(&self) {}
}

/// Applies volume in the callback sink instead of in software.
pub trait VolumeCallback: Send + Sync {
    /// `volume` is linear (1.0 = nominal), `mute` is the mute flag.
    fn set_volume(&self, volume: f32, mute: bool);
}

/// Negotiates the decoded audio format.
pub trait FormatCallbacks: Send + Sync {
    /// Inspect and optionally rewrite the proposed format. Returning `false`
    /// refuses the format and stops audio output.
    fn setup(&self, format: &mut AudioFormat) -> bool;

    /// Release whatever `setup` allocated.
    fn cleanup(&self) {}
}
