use async_trait::async_trait;
use dashmap::DashMap;
use serenity::model::id::{ChannelId, GuildId};
use songbird::{
    input::{ChildContainer, Input},
    tracks::TrackHandle,
    Event, Songbird, TrackEvent,
};
use std::{
    io::{BufRead, BufReader},
    process::{ChildStderr, Command, Stdio},
    sync::Arc,
    time::Duration,
};
use tracing::{debug, error, info};

use crate::{
    audio::player::{DriverHandle, PlayId},
    bot::events::TrackEndNotifier,
    error::TransportError,
};

/// Política de reconexión del stream ante cortes de red transitorios.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamPolicy {
    pub reconnect: bool,
    pub reconnect_streamed: bool,
    pub reconnect_delay_max: Duration,
}

impl Default for StreamPolicy {
    fn default() -> Self {
        Self {
            reconnect: true,
            reconnect_streamed: true,
            reconnect_delay_max: Duration::from_secs(5),
        }
    }
}

/// Pedido de reproducción para el head de una cola.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    pub play_id: PlayId,
    pub title: String,
    pub stream_url: String,
    pub policy: StreamPolicy,
}

/// Voice transport boundary.
///
/// Implementations report stream completion asynchronously by sending
/// `TrackEnded` for the `play_id` they were given; `play` itself only says
/// whether the stream could be started.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoiceTransport: Send + Sync {
    /// Canal de voz actual del bot en el guild.
    async fn current_channel(&self, guild_id: GuildId) -> Option<ChannelId>;

    /// Conecta al canal, o se mueve si ya está en otro.
    async fn connect(&self, guild_id: GuildId, channel_id: ChannelId) -> Result<(), TransportError>;

    async fn play(&self, guild_id: GuildId, request: PlayRequest) -> Result<(), TransportError>;

    async fn stop(&self, guild_id: GuildId) -> Result<(), TransportError>;

    async fn disconnect(&self, guild_id: GuildId) -> Result<(), TransportError>;
}

/// Pista en curso que el transporte puede detener.
pub trait ActiveTrack: Send + Sync {
    fn stop(&self) -> Result<(), TransportError>;
}

impl ActiveTrack for TrackHandle {
    /// Detener el handle (no la llamada) hace que songbird emita
    /// `TrackEvent::End`, que es lo que avanza la cola.
    fn stop(&self) -> Result<(), TransportError> {
        TrackHandle::stop(self)?;
        Ok(())
    }
}

/// Pista actual por guild.
pub struct ActiveTracks<T: ActiveTrack> {
    tracks: DashMap<GuildId, T>,
}

impl<T: ActiveTrack> ActiveTracks<T> {
    pub fn new() -> Self {
        Self {
            tracks: DashMap::new(),
        }
    }

    pub fn replace(&self, guild_id: GuildId, track: T) -> Option<T> {
        self.tracks.insert(guild_id, track)
    }

    /// Detiene y olvida la pista del guild.
    pub fn stop(&self, guild_id: GuildId) -> Result<(), TransportError> {
        let (_, track) = self
            .tracks
            .remove(&guild_id)
            .ok_or(TransportError::NoActiveTrack)?;
        track.stop()
    }

    pub fn forget(&self, guild_id: GuildId) {
        self.tracks.remove(&guild_id);
    }
}

impl<T: ActiveTrack> Default for ActiveTracks<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Transporte real: songbird + un proceso ffmpeg por stream.
pub struct SongbirdTransport {
    manager: Arc<Songbird>,
    ffmpeg_path: String,
    driver: DriverHandle,
    current_tracks: ActiveTracks<TrackHandle>,
}

impl SongbirdTransport {
    pub fn new(manager: Arc<Songbird>, ffmpeg_path: impl Into<String>, driver: DriverHandle) -> Self {
        Self {
            manager,
            ffmpeg_path: ffmpeg_path.into(),
            driver,
            current_tracks: ActiveTracks::new(),
        }
    }

    fn spawn_transcoder(&self, guild_id: GuildId, request: &PlayRequest) -> Result<std::process::Child, TransportError> {
        let mut child = Command::new(&self.ffmpeg_path)
            .args(transcoder_args(&request.stream_url, &request.policy))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(TransportError::Spawn)?;

        if let Some(stderr) = child.stderr.take() {
            forward_transcoder_log(stderr, guild_id, request.play_id);
        }

        Ok(child)
    }
}

#[async_trait]
impl VoiceTransport for SongbirdTransport {
    async fn current_channel(&self, guild_id: GuildId) -> Option<ChannelId> {
        let call = self.manager.get(guild_id)?;
        let channel = call.lock().await.current_channel()?;
        Some(ChannelId::new(channel.0.get()))
    }

    async fn connect(&self, guild_id: GuildId, channel_id: ChannelId) -> Result<(), TransportError> {
        self.manager.join(guild_id, channel_id).await?;
        info!("🔊 Conectado al canal {} en guild {}", channel_id, guild_id);
        Ok(())
    }

    async fn play(&self, guild_id: GuildId, request: PlayRequest) -> Result<(), TransportError> {
        let call = self.manager.get(guild_id).ok_or(TransportError::NotConnected)?;

        let handle = {
            let mut call = call.lock().await;
            if call.current_channel().is_none() {
                return Err(TransportError::NotConnected);
            }

            let child = self.spawn_transcoder(guild_id, &request)?;
            let input: Input = ChildContainer::from(child).into();

            // Nunca más de un stream por guild
            call.stop();
            call.play_input(input)
        };

        let notifier = TrackEndNotifier::new(guild_id, request.play_id, self.driver.clone());
        handle.add_event(Event::Track(TrackEvent::End), notifier.clone())?;
        handle.add_event(Event::Track(TrackEvent::Error), notifier)?;
        self.current_tracks.replace(guild_id, handle);

        debug!("▶️ Stream {} iniciado en guild {}: {}", request.play_id, guild_id, request.title);
        Ok(())
    }

    async fn stop(&self, guild_id: GuildId) -> Result<(), TransportError> {
        self.current_tracks.stop(guild_id)
    }

    async fn disconnect(&self, guild_id: GuildId) -> Result<(), TransportError> {
        self.current_tracks.forget(guild_id);
        self.manager.remove(guild_id).await?;
        info!("👋 Desconectado del canal de voz en guild {}", guild_id);
        Ok(())
    }
}

/// Reenvía el stderr de ffmpeg al log desde un hilo bloqueante.
fn forward_transcoder_log(stderr: ChildStderr, guild_id: GuildId, play_id: PlayId) {
    tokio::task::spawn_blocking(move || {
        let lines = log_transcoder_output(BufReader::new(stderr), guild_id, play_id);
        debug!("ffmpeg {} terminó con {} líneas de error", play_id, lines);
    });
}

/// Registra cada línea no vacía del stderr de ffmpeg; devuelve cuántas hubo.
fn log_transcoder_output(reader: impl BufRead, guild_id: GuildId, play_id: PlayId) -> usize {
    reader
        .lines()
        .map_while(Result::ok)
        .filter(|line| !line.trim().is_empty())
        .inspect(|line| error!("❌ ffmpeg [guild {} stream {}]: {}", guild_id, play_id, line.trim()))
        .count()
}

/// Argumentos de ffmpeg: las opciones de reconexión van antes de `-i`,
/// la salida es WAV PCM 48 kHz estéreo por stdout.
pub fn transcoder_args(stream_url: &str, policy: &StreamPolicy) -> Vec<String> {
    let mut args: Vec<&str> = vec!["-hide_banner", "-loglevel", "error"];
    let delay = policy.reconnect_delay_max.as_secs().max(1).to_string();

    if policy.reconnect {
        args.extend(["-reconnect", "1"]);
        if policy.reconnect_streamed {
            args.extend(["-reconnect_streamed", "1"]);
        }
        args.extend(["-reconnect_delay_max", delay.as_str()]);
    }

    args.extend([
        "-i", stream_url, "-vn", "-c:a", "pcm_s16le", "-ar", "48000", "-ac", "2", "-f", "wav", "-",
    ]);

    args.into_iter().map(String::from).collect()
}
