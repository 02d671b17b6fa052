//! In-memory engine for unit tests.
//!
//! Keeps reference counts and a small amount of per-player state so tests can
//! check what reached the engine. Follows libvlc's observable contract where
//! tests depend on it: volume range 0..=100, mute undefined without media,
//! delay reset on media change, unknown discovery names refused.

use std::collections::HashMap;
use std::ffi::CStr;
use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::handle::{ObjectKind, RawHandle};
use crate::models::audio_models::{AudioFormat, AudioOutputDescription, AudioOutputDevice, TrackDescription};
use crate::traits::callbacks::{AudioCallbacks, FormatCallbacks, VolumeCallback};
use crate::traits::engine::Engine;

#[derive(Debug, Clone, Default)]
pub(crate) struct InstanceState {
    pub args: Vec<String>,
    pub user_agent: Option<(String, String)>,
    pub app_id: Option<String>,
}

#[derive(Clone, Default)]
pub(crate) struct PlayerState {
    pub media: Option<RawHandle>,
    pub volume: i32,
    pub mute: bool,
    pub delay: i64,
    pub track: i32,
    pub channel: i32,
    pub output: Option<String>,
    pub device: Option<String>,
    pub format: Option<AudioFormat>,
    callbacks: Option<Arc<dyn AudioCallbacks>>,
    volume_callback: Option<Arc<dyn VolumeCallback>>,
    format_callbacks: Option<Arc<dyn FormatCallbacks>>,
}

enum Payload {
    Instance(InstanceState),
    Media(Vec<u8>),
    Player(PlayerState),
}

struct Object {
    kind: ObjectKind,
    refs: usize,
    payload: Payload,
}

struct Discoverer {
    name: String,
    instance: RawHandle,
    alive: bool,
    releases: usize,
}

#[derive(Default)]
struct Inner {
    next_id: usize,
    objects: HashMap<RawHandle, Object>,
    discoverers: HashMap<RawHandle, Discoverer>,
    fail_factories: bool,
    no_event_managers: bool,
    last_error: Option<String>,
}

impl Inner {
    fn next_handle(&mut self) -> RawHandle {
        // Offset keeps ids clear of small integers.
        self.next_id += 1;
        RawHandle::from_id(NonZeroUsize::new(0x1000 + self.next_id * 0x10).unwrap())
    }

    fn insert(&mut self, kind: ObjectKind, payload: Payload) -> Option<RawHandle> {
        if self.fail_factories {
            self.last_error = Some("stub factory disabled".into());
            return None;
        }
        let raw = self.next_handle();
        self.objects.insert(raw, Object { kind, refs: 1, payload });
        Some(raw)
    }

    fn retain(&mut self, raw: RawHandle) {
        let object = self.objects.get_mut(&raw).expect("retain of a dead object");
        object.refs += 1;
    }

    fn release(&mut self, raw: RawHandle) {
        let object = self.objects.get_mut(&raw).expect("release of a dead object");
        object.refs -= 1;
        if object.refs > 0 {
            return;
        }
        let object = self.objects.remove(&raw).unwrap();
        if let Payload::Player(player) = object.payload {
            if let Some(media) = player.media {
                self.release(media);
            }
        }
    }

    fn player(&mut self, raw: RawHandle) -> &mut PlayerState {
        match self.objects.get_mut(&raw).map(|o| &mut o.payload) {
            Some(Payload::Player(p)) => p,
            _ => panic!("{:?} is not a live media player", raw),
        }
    }

    fn set_media(&mut self, player: RawHandle, media: Option<RawHandle>) {
        if let Some(m) = media {
            self.retain(m);
        }
        let state = self.player(player);
        let old = std::mem::replace(&mut state.media, media);
        state.delay = 0;
        state.track = if media.is_some() { 1 } else { -1 };
        state.mute = false;
        if let Some(m) = old {
            self.release(m);
        }
    }
}

fn text(value: &CStr) -> String {
    value.to_string_lossy().into_owned()
}

fn devices_of(aout: &str) -> Vec<AudioOutputDevice> {
    match aout {
        "pulse" => vec![
            AudioOutputDevice {
                device: "sink-0".into(),
                description: "Built-in Audio".into(),
            },
            AudioOutputDevice {
                device: "sink-1".into(),
                description: "USB Headset".into(),
            },
        ],
        "alsa" => vec![AudioOutputDevice {
            device: "default".into(),
            description: "Default ALSA device".into(),
        }],
        _ => Vec::new(),
    }
}

pub(crate) struct StubEngine {
    inner: Mutex<Inner>,
}

impl StubEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner::default()),
        })
    }

    /// Create a bare object with one reference.
    pub fn spawn(&self, kind: ObjectKind) -> RawHandle {
        let payload = match kind {
            ObjectKind::Instance => Payload::Instance(InstanceState::default()),
            ObjectKind::Media => Payload::Media(Vec::new()),
            ObjectKind::MediaPlayer => Payload::Player(PlayerState::new()),
        };
        self.inner.lock().insert(kind, payload).unwrap()
    }

    pub fn fail_factories(&self, fail: bool) {
        self.inner.lock().fail_factories = fail;
    }

    /// Behave like a libvlc without `libvlc_media_discoverer_event_manager`.
    pub fn omit_event_managers(&self, omit: bool) {
        self.inner.lock().no_event_managers = omit;
    }

    /// Put a raw track id in place, bypassing `audio_set_track` validation.
    pub fn force_track(&self, player: RawHandle, track: i32) {
        self.inner.lock().player(player).track = track;
    }

    pub fn is_alive(&self, raw: RawHandle) -> bool {
        self.inner.lock().objects.contains_key(&raw)
    }

    pub fn refcount(&self, raw: RawHandle) -> usize {
        self.inner.lock().objects.get(&raw).map_or(0, |o| o.refs)
    }

    pub fn instance_state(&self, raw: RawHandle) -> InstanceState {
        match self.inner.lock().objects.get(&raw).map(|o| &o.payload) {
            Some(Payload::Instance(state)) => state.clone(),
            _ => panic!("{:?} is not a live instance", raw),
        }
    }

    pub fn media_source(&self, raw: RawHandle) -> String {
        String::from_utf8_lossy(&self.media_source_bytes(raw)).into_owned()
    }

    /// Location or path exactly as it reached the engine.
    pub fn media_source_bytes(&self, raw: RawHandle) -> Vec<u8> {
        match self.inner.lock().objects.get(&raw).map(|o| &o.payload) {
            Some(Payload::Media(source)) => source.clone(),
            _ => panic!("{:?} is not live media", raw),
        }
    }

    pub fn player_state(&self, raw: RawHandle) -> PlayerState {
        self.inner.lock().player(raw).clone()
    }

    pub fn discoverer_alive(&self, raw: RawHandle) -> bool {
        self.inner.lock().discoverers.get(&raw).is_some_and(|d| d.alive)
    }

    pub fn discoverer_releases(&self, raw: RawHandle) -> usize {
        self.inner.lock().discoverers.get(&raw).map_or(0, |d| d.releases)
    }

    fn callbacks(&self, raw: RawHandle) -> Option<Arc<dyn AudioCallbacks>> {
        self.inner.lock().player(raw).callbacks.clone()
    }

    pub fn emit_play(&self, raw: RawHandle, samples: &[u8], count: u32, pts: i64) {
        if let Some(cb) = self.callbacks(raw) {
            cb.play(samples, count, pts);
        }
    }

    pub fn emit_pause(&self, raw: RawHandle, pts: i64) {
        if let Some(cb) = self.callbacks(raw) {
            cb.pause(pts);
        }
    }

    pub fn emit_resume(&self, raw: RawHandle, pts: i64) {
        if let Some(cb) = self.callbacks(raw) {
            cb.resume(pts);
        }
    }

    pub fn emit_drain(&self, raw: RawHandle) {
        if let Some(cb) = self.callbacks(raw) {
            cb.drain();
        }
    }

    pub fn emit_volume(&self, raw: RawHandle, volume: f32, mute: bool) {
        let cb = self.inner.lock().player(raw).volume_callback.clone();
        if let Some(cb) = cb {
            cb.set_volume(volume, mute);
        }
    }

    /// Run format negotiation; `None` if refused or no callbacks are set.
    pub fn emit_setup(&self, raw: RawHandle, mut format: AudioFormat) -> Option<AudioFormat> {
        let cb = self.inner.lock().player(raw).format_callbacks.clone()?;
        cb.setup(&mut format).then_some(format)
    }
}

impl PlayerState {
    fn new() -> Self {
        Self {
            volume: 100,
            track: -1,
            channel: 1,
            ..Self::default()
        }
    }
}

impl Engine for StubEngine {
    fn version(&self) -> String {
        "stub".into()
    }

    fn last_error(&self) -> Option<String> {
        self.inner.lock().last_error.clone()
    }

    fn retain(&self, kind: ObjectKind, handle: RawHandle) {
        let mut inner = self.inner.lock();
        assert_eq!(inner.objects.get(&handle).map(|o| o.kind), Some(kind));
        inner.retain(handle);
    }

    fn release(&self, kind: ObjectKind, handle: RawHandle) {
        let mut inner = self.inner.lock();
        assert_eq!(inner.objects.get(&handle).map(|o| o.kind), Some(kind));
        inner.release(handle);
    }

    fn instance_new(&self, args: &[&CStr]) -> Option<RawHandle> {
        let state = InstanceState {
            args: args.iter().map(|a| text(a)).collect(),
            ..InstanceState::default()
        };
        self.inner.lock().insert(ObjectKind::Instance, Payload::Instance(state))
    }

    fn set_user_agent(&self, instance: RawHandle, name: &CStr, http: &CStr) {
        if let Some(Payload::Instance(state)) = self.inner.lock().objects.get_mut(&instance).map(|o| &mut o.payload) {
            state.user_agent = Some((text(name), text(http)));
        }
    }

    fn set_app_id(&self, instance: RawHandle, id: &CStr, _version: &CStr, _icon: &CStr) {
        if let Some(Payload::Instance(state)) = self.inner.lock().objects.get_mut(&instance).map(|o| &mut o.payload) {
            state.app_id = Some(text(id));
        }
    }

    fn audio_output_list(&self, _instance: RawHandle) -> Vec<AudioOutputDescription> {
        vec![
            AudioOutputDescription {
                name: "pulse".into(),
                description: "PulseAudio audio output".into(),
            },
            AudioOutputDescription {
                name: "alsa".into(),
                description: "ALSA audio output".into(),
            },
        ]
    }

    fn audio_output_device_list(&self, _instance: RawHandle, aout: &CStr) -> Vec<AudioOutputDevice> {
        devices_of(&text(aout))
    }

    fn media_new_location(&self, _instance: RawHandle, mrl: &CStr) -> Option<RawHandle> {
        self.inner.lock().insert(ObjectKind::Media, Payload::Media(mrl.to_bytes().to_vec()))
    }

    fn media_new_path(&self, _instance: RawHandle, path: &CStr) -> Option<RawHandle> {
        self.inner.lock().insert(ObjectKind::Media, Payload::Media(path.to_bytes().to_vec()))
    }

    fn media_player_new(&self, _instance: RawHandle) -> Option<RawHandle> {
        self.inner
            .lock()
            .insert(ObjectKind::MediaPlayer, Payload::Player(PlayerState::new()))
    }

    fn media_player_new_from_media(&self, media: RawHandle) -> Option<RawHandle> {
        let mut inner = self.inner.lock();
        let player = inner.insert(ObjectKind::MediaPlayer, Payload::Player(PlayerState::new()))?;
        inner.set_media(player, Some(media));
        Some(player)
    }

    fn media_player_set_media(&self, player: RawHandle, media: Option<RawHandle>) {
        self.inner.lock().set_media(player, media);
    }

    fn audio_set_callbacks(&self, player: RawHandle, callbacks: Arc<dyn AudioCallbacks>) {
        self.inner.lock().player(player).callbacks = Some(callbacks);
    }

    fn audio_set_volume_callback(&self, player: RawHandle, callback: Option<Arc<dyn VolumeCallback>>) {
        self.inner.lock().player(player).volume_callback = callback;
    }

    fn audio_set_format_callbacks(&self, player: RawHandle, callbacks: Arc<dyn FormatCallbacks>) {
        self.inner.lock().player(player).format_callbacks = Some(callbacks);
    }

    fn audio_set_format(&self, player: RawHandle, format: &CStr, rate: u32, channels: u32) {
        let mut fourcc = [0u8; 4];
        for (dst, src) in fourcc.iter_mut().zip(format.to_bytes()) {
            *dst = *src;
        }
        self.inner.lock().player(player).format = Some(AudioFormat { fourcc, rate, channels });
    }

    fn audio_output_set(&self, player: RawHandle, name: &CStr) -> i32 {
        let name = text(name);
        if !matches!(name.as_str(), "pulse" | "alsa") {
            return -1;
        }
        let mut inner = self.inner.lock();
        let state = inner.player(player);
        state.output = Some(name);
        state.device = None;
        0
    }

    fn audio_output_device_enum(&self, player: RawHandle) -> Vec<AudioOutputDevice> {
        let output = self.inner.lock().player(player).output.clone();
        output.as_deref().map(devices_of).unwrap_or_default()
    }

    fn audio_output_device_set(&self, player: RawHandle, module: Option<&CStr>, device_id: &CStr) {
        let mut inner = self.inner.lock();
        let state = inner.player(player);
        let module = module.map(text).or_else(|| state.output.clone());
        let device_id = text(device_id);
        let known = module
            .as_deref()
            .is_some_and(|m| devices_of(m).iter().any(|d| d.device == device_id));
        if known {
            state.device = Some(device_id);
        }
    }

    fn audio_toggle_mute(&self, player: RawHandle) {
        let mut inner = self.inner.lock();
        let state = inner.player(player);
        if state.media.is_some() {
            state.mute = !state.mute;
        }
    }

    fn audio_get_mute(&self, player: RawHandle) -> i32 {
        let mut inner = self.inner.lock();
        let state = inner.player(player);
        match state.media {
            Some(_) => i32::from(state.mute),
            None => -1,
        }
    }

    fn audio_set_mute(&self, player: RawHandle, status: i32) {
        let mut inner = self.inner.lock();
        let state = inner.player(player);
        if state.media.is_some() {
            state.mute = status != 0;
        }
    }

    fn audio_get_volume(&self, player: RawHandle) -> i32 {
        self.inner.lock().player(player).volume
    }

    fn audio_set_volume(&self, player: RawHandle, volume: i32) -> i32 {
        if !(0..=100).contains(&volume) {
            return -1;
        }
        self.inner.lock().player(player).volume = volume;
        0
    }

    fn audio_get_track_count(&self, player: RawHandle) -> i32 {
        match self.inner.lock().player(player).media {
            Some(_) => 3,
            None => -1,
        }
    }

    fn audio_get_track_description(&self, player: RawHandle) -> Vec<TrackDescription> {
        if self.inner.lock().player(player).media.is_none() {
            return Vec::new();
        }
        [(-1, "Disable"), (1, "Track 1 - [English]"), (2, "Track 2 - [French]")]
            .into_iter()
            .map(|(id, name)| TrackDescription { id, name: name.into() })
            .collect()
    }

    fn audio_get_track(&self, player: RawHandle) -> i32 {
        self.inner.lock().player(player).track
    }

    fn audio_set_track(&self, player: RawHandle, track: i32) -> i32 {
        let mut inner = self.inner.lock();
        let state = inner.player(player);
        if state.media.is_none() || ![-1, 1, 2].contains(&track) {
            return -1;
        }
        state.track = track;
        0
    }

    fn audio_get_channel(&self, player: RawHandle) -> i32 {
        let mut inner = self.inner.lock();
        let state = inner.player(player);
        match state.media {
            Some(_) => state.channel,
            None => -1,
        }
    }

    fn audio_set_channel(&self, player: RawHandle, channel: i32) -> i32 {
        let mut inner = self.inner.lock();
        let state = inner.player(player);
        if state.media.is_none() || !(1..=7).contains(&channel) {
            return -1;
        }
        state.channel = channel;
        0
    }

    fn audio_get_delay(&self, player: RawHandle) -> i64 {
        self.inner.lock().player(player).delay
    }

    fn audio_set_delay(&self, player: RawHandle, delay: i64) -> i32 {
        self.inner.lock().player(player).delay = delay;
        0
    }

    fn media_discoverer_new(&self, instance: RawHandle, name: &CStr) -> Option<RawHandle> {
        let name = text(name);
        let mut inner = self.inner.lock();
        if inner.fail_factories || !matches!(name.as_str(), "upnp" | "sap") {
            inner.last_error = Some(format!("no discovery module named {}", name));
            return None;
        }
        inner.retain(instance);
        let raw = inner.next_handle();
        inner.discoverers.insert(
            raw,
            Discoverer {
                name,
                instance,
                alive: true,
                releases: 0,
            },
        );
        Some(raw)
    }

    fn media_discoverer_release(&self, discoverer: RawHandle) {
        let mut inner = self.inner.lock();
        let entry = inner.discoverers.get_mut(&discoverer).expect("unknown discoverer");
        assert!(entry.alive, "double release of {:?}", discoverer);
        entry.alive = false;
        entry.releases += 1;
        let instance = entry.instance;
        inner.release(instance);
    }

    fn media_discoverer_localized_name(&self, discoverer: RawHandle) -> Option<String> {
        let inner = self.inner.lock();
        match inner.discoverers.get(&discoverer)?.name.as_str() {
            "upnp" => Some("Universal Plug'n'Play".into()),
            _ => None,
        }
    }

    fn media_discoverer_event_manager(&self, discoverer: RawHandle) -> Option<RawHandle> {
        let inner = self.inner.lock();
        if inner.no_event_managers {
            return None;
        }
        inner
            .discoverers
            .get(&discoverer)
            .filter(|d| d.alive)
            .and_then(|_| NonZeroUsize::new(discoverer.id() + 1))
            .map(RawHandle::from_id)
    }

    fn media_discoverer_is_running(&self, discoverer: RawHandle) -> bool {
        self.inner
            .lock()
            .discoverers
            .get(&discoverer)
            .is_some_and(|d| d.alive)
    }
}
