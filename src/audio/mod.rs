//! # Audio Module
//!
//! Per-guild playback for the bot.
//!
//! ## Architecture
//!
//! ### [`queue`] - Guild Queue Store
//! - Ordered tracks per guild; position 0 is the active track
//! - Plain owned data, no locking
//!
//! ### [`player`] - Playback Driver
//! - Single task that owns the queue store
//! - Commands and stream completions arrive as messages on one channel
//! - Starts the head track, advances on completion, releases voice when empty
//!
//! ### [`transport`] - Voice Transport
//! - Songbird voice connections
//! - One ffmpeg process per stream, with reconnect options
//! - Reports stream completion back to the driver
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use guild_jukebox::audio::{player::{DriverHandle, PlaybackDriver}, transport::StreamPolicy};
//!
//! # async fn example(transport: std::sync::Arc<dyn guild_jukebox::audio::transport::VoiceTransport>) {
//! let (handle, receiver) = DriverHandle::channel();
//! let driver = PlaybackDriver::new(transport, StreamPolicy::default());
//! tokio::spawn(driver.run(receiver));
//!
//! let listing = handle.listing(serenity::all::GuildId::new(1)).await;
//! # }
//! ```

pub mod player;
pub mod queue;
pub mod transport;
