//! # vlc-native
//!
//! libvlc backend for vlc-core.
//!
//! Provides:
//! - `LibVlc`: `Engine` implementation calling into libvlc
//! - `LibraryConfig`: where to find libvlc (`VLC_LIB_PATH` or a per-OS search list)
//! - `sys`: raw declarations and the runtime-loaded function table
//!
//! libvlc is opened with `libloading` when `LibVlc::load` runs, so building
//! this crate does not require libvlc headers or import libraries.
//!
//! ## Usage
//! ```ignore
//! use vlc_core::{Instance, InstanceConfig, MediaPlayer};
//! use vlc_native::LibVlc;
//!
//! let engine = LibVlc::load_default().unwrap();
//! let instance = Instance::new(engine, &InstanceConfig::default()).unwrap();
//! let audio = MediaPlayer::new(&instance).unwrap().audio();
//! audio.set_volume(80).unwrap();
//! ```

mod callbacks;
pub mod config;
pub mod engine;
pub mod error;
pub mod sys;

pub use config::{LibraryConfig, LIBVLC_PATH_ENV};
pub use engine::LibVlc;
pub use error::LoadError;
