//! Error taxonomy shared by the resolver, the voice transport and the
//! command surface.
//!
//! Resolution, voice and queue-state errors end up as user-visible replies
//! (their `Display` text is what the requester reads). Transport errors raised
//! while a track is playing never leave the playback driver; they are logged
//! and the queue advances anyway.

use std::time::Duration;

use thiserror::Error;

/// Fallos al convertir una consulta en una URL de stream.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to run the media extractor: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("the media extractor exited with {status}: {stderr}")]
    Extractor { status: String, stderr: String },

    #[error("could not read the media extractor output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no results found")]
    NoResults,

    #[error("no playable audio stream found")]
    NoAudio,

    #[error("the lookup timed out after {}", format_timeout(.0))]
    Timeout(Duration),
}

fn format_timeout(timeout: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*timeout)
}

/// Fallos de la conexión de voz o del proceso de audio.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("not connected to a voice channel")]
    NotConnected,

    #[error("no track is playing")]
    NoActiveTrack,

    #[error("failed to join the voice channel: {0}")]
    Join(#[from] songbird::error::JoinError),

    #[error("failed to start the transcoder: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("track control failed: {0}")]
    Control(#[from] songbird::error::ControlError),
}

/// Errores que terminan como respuesta al usuario que ejecutó el comando.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("This command can only be used inside a server.")]
    OutsideGuild,

    #[error("You need to be in a voice channel first!")]
    NotInVoice,

    #[error("The queue is empty.")]
    QueueEmpty,

    #[error("I'm not connected to a voice channel!")]
    NotConnected,

    #[error("No song is currently playing!")]
    NothingPlaying,

    #[error("Error: {0}")]
    Resolution(#[from] ResolveError),

    #[error("Error: could not join your voice channel ({0})")]
    VoiceConnection(#[source] TransportError),

    #[error("Error: could not start playing {0}")]
    PlaybackFailed(String),

    #[error("Error: the player is not running")]
    DriverUnavailable,
}

impl CommandError {
    /// Los errores de estado se responden solo al usuario (ephemeral).
    pub fn is_ephemeral(&self) -> bool {
        matches!(
            self,
            Self::OutsideGuild | Self::NotInVoice | Self::QueueEmpty | Self::NotConnected | Self::NothingPlaying
        )
    }
}
