use serde::{Deserialize, Serialize};

/// An audio output module known to the engine (e.g. "pulse", "alsa").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioOutputDescription {
    pub name: String,
    pub description: String,
}

/// A potential device of an audio output module.
///
/// The list may not be exhaustive and some entries may not work in every
/// circumstance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioOutputDevice {
    /// Device identifier, as accepted by `Audio::output_device_set`.
    pub device: String,
    /// Human readable description.
    pub description: String,
}

/// An audio track of the current media.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDescription {
    pub id: i32,
    pub name: String,
}

/// Audio channel mode of the output.
///
/// Mirrors `libvlc_audio_output_channel_t`. Values the engine reports but
/// this enum does not name are kept in [`AudioChannel::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioChannel {
    Stereo,
    RStereo,
    Left,
    Right,
    Dolbys,
    Headphones,
    Mono,
    Other(i32),
}

impl AudioChannel {
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            1 => Self::Stereo,
            2 => Self::RStereo,
            3 => Self::Left,
            4 => Self::Right,
            5 => Self::Dolbys,
            6 => Self::Headphones,
            7 => Self::Mono,
            other => Self::Other(other),
        }
    }

    pub fn to_raw(self) -> i32 {
        match self {
            Self::Stereo => 1,
            Self::RStereo => 2,
            Self::Left => 3,
            Self::Right => 4,
            Self::Dolbys => 5,
            Self::Headphones => 6,
            Self::Mono => 7,
            Self::Other(raw) => raw,
        }
    }
}

/// Decoded audio format negotiated through `FormatCallbacks::setup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    /// Four-character sample format code, e.g. `*b"S16N"` or `*b"FL32"`.
    pub fourcc: [u8; 4],
    /// Sample rate in Hz.
    pub rate: u32,
    pub channels: u32,
}

impl AudioFormat {
    /// The fourcc as text, lossy for non-ASCII codes.
    pub fn fourcc_str(&self) -> String {
        String::from_utf8_lossy(&self.fourcc).into_owned()
    }

    /// Bytes per sample of one channel, for the PCM codes the engine
    /// produces. `None` for anything else.
    pub fn bytes_per_sample(&self) -> Option<usize> {
        match &self.fourcc {
            b"u8  " | b"s8  " => Some(1),
            b"S16N" | b"s16l" | b"s16b" | b"S16L" | b"S16B" | b"u16l" | b"u16b" => Some(2),
            b"S24N" | b"s24l" | b"s24b" => Some(3),
            b"S32N" | b"s32l" | b"s32b" | b"FL32" | b"f32l" | b"f32b" => Some(4),
            b"FL64" | b"f64l" | b"f64b" => Some(8),
            _ => None,
        }
    }

    /// Size in bytes of one interleaved frame (one sample per channel).
    pub fn frame_size(&self) -> Option<usize> {
        self.bytes_per_sample()
            .map(|bytes| bytes * self.channels as usize)
    }
}
