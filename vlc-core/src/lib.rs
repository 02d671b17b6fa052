//! # vlc-core
//!
//! Handle-owning wrappers over the libVLC audio and media discovery API.
//!
//! Each wrapper holds one engine handle and forwards every call to the
//! [`Engine`] it was created from. The engine does the real work; backends
//! (e.g. `vlc-native`, which loads libvlc at runtime) implement the trait.
//!
//! ## Architecture
//!
//! ```text
//! vlc-core (this crate)
//! ├── handle        ← RawHandle, ObjectKind, shared-ownership token
//! ├── traits/       ← Engine, AudioCallbacks, VolumeCallback, FormatCallbacks
//! ├── models/       ← VlcError, InstanceConfig, AudioChannel, device/track descriptions
//! └── wrappers/     ← Instance, Media, MediaPlayer, Audio (shared), MediaDiscoverer (move-only)
//! ```
//!
//! ## Ownership
//!
//! `Instance`, `Media`, `MediaPlayer` and `Audio` are shared: `Clone` retains
//! the engine object, `Drop` releases it, `==` compares handles.
//! `MediaDiscoverer` is move-only and releases its session exactly once.

pub mod handle;
pub mod models;
pub mod traits;
pub mod wrappers;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types at crate root for convenience.
pub use handle::{ObjectKind, RawHandle};
pub use models::audio_models::{AudioChannel, AudioFormat, AudioOutputDescription, AudioOutputDevice, TrackDescription};
pub use models::config::{AppId, InstanceConfig, UserAgent};
pub use models::error::VlcError;
pub use traits::callbacks::{AudioCallbacks, FormatCallbacks, VolumeCallback};
pub use traits::engine::Engine;
pub use wrappers::audio::Audio;
pub use wrappers::instance::Instance;
pub use wrappers::media::Media;
pub use wrappers::media_discoverer::{EventManager, MediaDiscoverer};
pub use wrappers::media_player::MediaPlayer;
