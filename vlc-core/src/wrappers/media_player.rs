use std::sync::Arc;

use crate::handle::{ObjectKind, RawHandle, SharedHandle};
use crate::models::error::VlcError;
use crate::traits::engine::Engine;

use super::audio::Audio;
use super::instance::Instance;
use super::media::Media;

/// A media player (`libvlc_media_player_t`), shared by reference count.
///
/// Audio control lives in [`Audio`], which shares the same player handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPlayer {
    handle: SharedHandle,
}

impl MediaPlayer {
    /// Create an empty player.
    pub fn new(instance: &Instance) -> Result<Self, VlcError> {
        let raw = instance.engine().media_player_new(instance.raw());
        Self::adopt(instance.engine(), raw)
    }

    /// Create a player with `media` already set.
    pub fn with_media(instance: &Instance, media: &Media) -> Result<Self, VlcError> {
        let raw = instance.engine().media_player_new_from_media(media.raw());
        Self::adopt(instance.engine(), raw)
    }

    fn adopt(engine: &Arc<dyn Engine>, raw: Option<RawHandle>) -> Result<Self, VlcError> {
        let raw = raw.ok_or_else(|| {
            let reason = engine.last_error().unwrap_or_else(|| "no details".into());
            log::warn!("engine refused to create a media player: {}", reason);
            VlcError::ResourceUnavailable(format!("media player: {}", reason))
        })?;
        Ok(Self {
            handle: SharedHandle::adopt(Arc::clone(engine), raw, ObjectKind::MediaPlayer),
        })
    }

    pub fn raw(&self) -> RawHandle {
        self.handle.raw()
    }

    /// Replace the current media, or clear it with `None`.
    ///
    /// The engine resets the audio delay whenever the media changes.
    pub fn set_media(&self, media: Option<&Media>) {
        self.handle
            .engine()
            .media_player_set_media(self.raw(), media.map(Media::raw));
    }

    /// Audio controls of this player. The returned value holds its own
    /// reference to the player.
    pub fn audio(&self) -> Audio {
        Audio::from_player_handle(self.handle.clone())
    }
}
