use serenity::model::id::{ChannelId, GuildId};
use std::{collections::HashMap, fmt, sync::Arc};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::{
    audio::{
        queue::GuildQueueStore,
        transport::{PlayRequest, StreamPolicy, VoiceTransport},
    },
    error::CommandError,
    sources::Track,
};

/// Identificador de cada stream iniciado; las señales de fin lo repiten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayId(u64);

impl PlayId {
    pub(crate) const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Estado de reproducción por guild.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    Idle,
    Playing { play_id: PlayId },
    Advancing,
}

/// Resultado de encolar un track.
#[derive(Debug, Clone, PartialEq)]
pub struct Enqueued {
    pub title: String,
    pub position: usize,
    pub started: bool,
}

/// Títulos de la cola; el índice 0 es el que está sonando.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueListing {
    pub tracks: Vec<Track>,
}

impl QueueListing {
    pub fn lines(&self) -> Vec<String> {
        self.tracks
            .iter()
            .enumerate()
            .map(|(i, track)| {
                if i == 0 {
                    format!("Currently playing: {}", track.title())
                } else {
                    format!("{}. {}", i, track.title())
                }
            })
            .collect()
    }
}

type Reply<T> = oneshot::Sender<Result<T, CommandError>>;

/// Mensajes hacia el driver. Toda mutación de colas pasa por aquí.
#[derive(Debug)]
pub enum DriverMessage {
    Enqueue {
        guild_id: GuildId,
        channel_id: ChannelId,
        track: Track,
        reply: Reply<Enqueued>,
    },
    Listing {
        guild_id: GuildId,
        reply: Reply<QueueListing>,
    },
    Skip {
        guild_id: GuildId,
        reply: Reply<String>,
    },
    TrackEnded {
        guild_id: GuildId,
        play_id: PlayId,
        error: Option<String>,
    },
    VoiceLost {
        guild_id: GuildId,
    },
}

/// Extremo clonable para hablar con el driver desde handlers y eventos de voz.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    sender: mpsc::UnboundedSender<DriverMessage>,
}

impl DriverHandle {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<DriverMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub async fn enqueue(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        track: Track,
    ) -> Result<Enqueued, CommandError> {
        self.request(|reply| DriverMessage::Enqueue {
            guild_id,
            channel_id,
            track,
            reply,
        })
        .await
    }

    pub async fn listing(&self, guild_id: GuildId) -> Result<QueueListing, CommandError> {
        self.request(|reply| DriverMessage::Listing { guild_id, reply }).await
    }

    pub async fn skip(&self, guild_id: GuildId) -> Result<String, CommandError> {
        self.request(|reply| DriverMessage::Skip { guild_id, reply }).await
    }

    /// Señal de fin de stream. Se llama desde el contexto de eventos de
    /// songbird; no bloquea.
    pub fn track_ended(&self, guild_id: GuildId, play_id: PlayId, error: Option<String>) {
        self.send(DriverMessage::TrackEnded {
            guild_id,
            play_id,
            error,
        });
    }

    pub fn voice_lost(&self, guild_id: GuildId) {
        self.send(DriverMessage::VoiceLost { guild_id });
    }

    fn send(&self, message: DriverMessage) {
        if self.sender.send(message).is_err() {
            error!("❌ El driver de reproducción no está activo, mensaje descartado");
        }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> DriverMessage,
    ) -> Result<T, CommandError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(build(reply))
            .map_err(|_| CommandError::DriverUnavailable)?;
        response.await.map_err(|_| CommandError::DriverUnavailable)?
    }
}

/// Playback driver.
///
/// Owns every guild queue and runs the per-guild state machine
/// (`Idle` → `Playing` → `Advancing` → `Playing`/`Idle`). Messages are handled
/// strictly one at a time, so commands and stream completions never touch a
/// queue concurrently.
pub struct PlaybackDriver {
    transport: Arc<dyn VoiceTransport>,
    policy: StreamPolicy,
    store: GuildQueueStore,
    states: HashMap<GuildId, PlaybackState>,
    next_play_id: u64,
}

impl PlaybackDriver {
    pub fn new(transport: Arc<dyn VoiceTransport>, policy: StreamPolicy) -> Self {
        Self {
            transport,
            policy,
            store: GuildQueueStore::new(),
            states: HashMap::new(),
            next_play_id: 0,
        }
    }

    /// Bucle del driver; termina cuando se sueltan todos los `DriverHandle`.
    pub async fn run(mut self, mut receiver: mpsc::UnboundedReceiver<DriverMessage>) {
        info!("🎛️ Driver de reproducción iniciado");

        while let Some(message) = receiver.recv().await {
            self.handle(message).await;
        }

        info!("🎛️ Driver de reproducción detenido");
    }

    pub async fn handle(&mut self, message: DriverMessage) {
        match message {
            DriverMessage::Enqueue {
                guild_id,
                channel_id,
                track,
                reply,
            } => {
                let result = self.enqueue(guild_id, channel_id, track).await;
                let _ = reply.send(result);
            }
            DriverMessage::Listing { guild_id, reply } => {
                let _ = reply.send(self.listing(guild_id));
            }
            DriverMessage::Skip { guild_id, reply } => {
                let result = self.skip(guild_id).await;
                let _ = reply.send(result);
            }
            DriverMessage::TrackEnded {
                guild_id,
                play_id,
                error,
            } => self.track_ended(guild_id, play_id, error).await,
            DriverMessage::VoiceLost { guild_id } => self.voice_lost(guild_id).await,
        }
    }

    pub fn state(&self, guild_id: GuildId) -> PlaybackState {
        self.states.get(&guild_id).cloned().unwrap_or(PlaybackState::Idle)
    }

    async fn enqueue(
        &mut self,
        guild_id: GuildId,
        channel_id: ChannelId,
        track: Track,
    ) -> Result<Enqueued, CommandError> {
        // Conectar si no hay conexión, mover si está en otro canal.
        // El join bloquea el driver para todos los guilds hasta el timeout de
        // voz configurado (VOICE_JOIN_TIMEOUT).
        if self.transport.current_channel(guild_id).await != Some(channel_id) {
            self.transport
                .connect(guild_id, channel_id)
                .await
                .map_err(CommandError::VoiceConnection)?;
        }

        let title = track.title().to_string();
        let position = self.store.enqueue(guild_id, track);

        if position == 1 {
            self.start_head(guild_id).await;
        }

        // start_head descarta el track si el transporte no pudo iniciarlo
        let started = matches!(self.state(guild_id), PlaybackState::Playing { .. });
        if position == 1 && !started {
            return Err(CommandError::PlaybackFailed(title));
        }

        Ok(Enqueued {
            title,
            position,
            started,
        })
    }

    fn listing(&self, guild_id: GuildId) -> Result<QueueListing, CommandError> {
        if self.store.is_empty(guild_id) {
            return Err(CommandError::QueueEmpty);
        }

        Ok(QueueListing {
            tracks: self.store.tracks(guild_id).cloned().collect(),
        })
    }

    async fn skip(&mut self, guild_id: GuildId) -> Result<String, CommandError> {
        if self.transport.current_channel(guild_id).await.is_none() {
            return Err(CommandError::NotConnected);
        }

        let PlaybackState::Playing { play_id } = self.state(guild_id) else {
            return Err(CommandError::NothingPlaying);
        };

        let title = self
            .store
            .peek_head(guild_id)
            .map(|t| t.title().to_string())
            .unwrap_or_default();

        info!("⏭️ Saltando {} ({}) en guild {}", title, play_id, guild_id);

        // Solo detener: la señal de fin del stream quita el track y avanza.
        // Sin stream que detener esa señal no llegará, así que se avanza aquí.
        if let Err(e) = self.transport.stop(guild_id).await {
            warn!("⚠️ No se pudo detener el stream {} en guild {}: {}", play_id, guild_id, e);
            self.track_ended(guild_id, play_id, None).await;
        }

        Ok(title)
    }

    async fn track_ended(&mut self, guild_id: GuildId, play_id: PlayId, error: Option<String>) {
        if self.state(guild_id) != (PlaybackState::Playing { play_id }) {
            debug!("Ignorando fin de stream obsoleto {} en guild {}", play_id, guild_id);
            return;
        }

        if let Some(error) = error {
            error!("❌ Error en stream {} de guild {}: {}", play_id, guild_id, error);
        }

        self.states.insert(guild_id, PlaybackState::Advancing);
        if let Some(finished) = self.store.pop_head(guild_id) {
            debug!("✅ Terminó: {}", finished.title());
        }

        self.start_head(guild_id).await;
    }

    /// Inicia el head de la cola. Si el transporte lo rechaza, lo descarta y
    /// prueba con el siguiente; con la cola vacía libera la conexión.
    async fn start_head(&mut self, guild_id: GuildId) {
        while let Some(track) = self.store.peek_head(guild_id) {
            let play_id = PlayId::new(self.next_play_id);
            self.next_play_id += 1;

            let request = PlayRequest {
                play_id,
                title: track.title().to_string(),
                stream_url: track.stream_url().to_string(),
                policy: self.policy,
            };

            info!("🎵 Reproduciendo: {} ({}) en guild {}", request.title, play_id, guild_id);

            match self.transport.play(guild_id, request).await {
                Ok(()) => {
                    self.states.insert(guild_id, PlaybackState::Playing { play_id });
                    return;
                }
                Err(e) => {
                    error!("❌ No se pudo iniciar el stream en guild {}: {}", guild_id, e);
                    self.store.pop_head(guild_id);
                }
            }
        }

        self.release(guild_id).await;
    }

    async fn release(&mut self, guild_id: GuildId) {
        self.states.remove(&guild_id);

        if self.transport.current_channel(guild_id).await.is_some() {
            if let Err(e) = self.transport.disconnect(guild_id).await {
                warn!("⚠️ Error al desconectar en guild {}: {}", guild_id, e);
            }
        }

        debug!("💤 Guild {} en reposo", guild_id);
    }

    async fn voice_lost(&mut self, guild_id: GuildId) {
        // Un reingreso posterior ya pudo reconectar; en ese caso no hay nada que limpiar
        if self.transport.current_channel(guild_id).await.is_some() {
            debug!("Conexión de voz vigente en guild {}, se ignora la desconexión", guild_id);
            return;
        }

        let removed = self.store.clear(guild_id);
        self.states.remove(&guild_id);

        if removed > 0 {
            warn!("🔌 Bot desconectado en guild {}, {} canciones descartadas", guild_id, removed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{audio::transport::MockVoiceTransport, error::TransportError};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    const GUILD: GuildId = GuildId::new(10);
    const CHANNEL: ChannelId = ChannelId::new(20);
    const OTHER_CHANNEL: ChannelId = ChannelId::new(21);

    /// Transporte de prueba que registra cada llamada.
    #[derive(Default)]
    struct RecordingTransport {
        inner: Mutex<Recorded>,
    }

    #[derive(Default)]
    struct Recorded {
        channel: Option<ChannelId>,
        connects: Vec<ChannelId>,
        plays: Vec<PlayRequest>,
        stops: usize,
        disconnects: usize,
        failing_urls: Vec<String>,
        stream_gone: bool,
    }

    impl RecordingTransport {
        fn with<R>(&self, f: impl FnOnce(&mut Recorded) -> R) -> R {
            f(&mut self.inner.lock().unwrap())
        }

        fn played_titles(&self) -> Vec<String> {
            self.with(|r| r.plays.iter().map(|p| p.title.clone()).collect())
        }

        fn last_play_id(&self) -> PlayId {
            self.with(|r| r.plays.last().unwrap().play_id)
        }
    }

    #[async_trait::async_trait]
    impl VoiceTransport for RecordingTransport {
        async fn current_channel(&self, _guild_id: GuildId) -> Option<ChannelId> {
            self.with(|r| r.channel)
        }

        async fn connect(&self, _guild_id: GuildId, channel_id: ChannelId) -> Result<(), TransportError> {
            self.with(|r| {
                r.channel = Some(channel_id);
                r.connects.push(channel_id);
            });
            Ok(())
        }

        async fn play(&self, _guild_id: GuildId, request: PlayRequest) -> Result<(), TransportError> {
            self.with(|r| {
                let failing = r.failing_urls.contains(&request.stream_url);
                r.plays.push(request);
                if failing {
                    Err(TransportError::Spawn(std::io::Error::other("ffmpeg missing")))
                } else {
                    Ok(())
                }
            })
        }

        async fn stop(&self, _guild_id: GuildId) -> Result<(), TransportError> {
            self.with(|r| {
                r.stops += 1;
                if r.stream_gone {
                    Err(TransportError::NoActiveTrack)
                } else {
                    Ok(())
                }
            })
        }

        async fn disconnect(&self, _guild_id: GuildId) -> Result<(), TransportError> {
            self.with(|r| {
                r.channel = None;
                r.disconnects += 1;
            });
            Ok(())
        }
    }

    fn track(title: &str) -> Track {
        Track::new(title.to_string(), format!("https://cdn/{}", title))
    }

    fn driver() -> (PlaybackDriver, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let driver = PlaybackDriver::new(transport.clone(), StreamPolicy::default());
        (driver, transport)
    }

    async fn enqueue(driver: &mut PlaybackDriver, title: &str) -> Result<Enqueued, CommandError> {
        driver.enqueue(GUILD, CHANNEL, track(title)).await
    }

    fn titles(driver: &PlaybackDriver) -> Vec<String> {
        driver
            .listing(GUILD)
            .map(|l| l.tracks.iter().map(|t| t.title().to_string()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_enqueue_into_empty_queue_starts_playback() {
        let (mut driver, transport) = driver();

        let enqueued = enqueue(&mut driver, "A").await.unwrap();

        assert_eq!(
            enqueued,
            Enqueued {
                title: "A".to_string(),
                position: 1,
                started: true
            }
        );
        assert_eq!(titles(&driver), vec!["A"]);
        assert_eq!(transport.played_titles(), vec!["A"]);
        assert_eq!(transport.with(|r| r.connects.clone()), vec![CHANNEL]);
        assert_eq!(
            driver.state(GUILD),
            PlaybackState::Playing {
                play_id: transport.last_play_id()
            }
        );
        let request = transport.with(|r| r.plays[0].clone());
        assert_eq!(request.stream_url, "https://cdn/A");
        assert_eq!(request.policy, StreamPolicy::default());
    }

    #[tokio::test]
    async fn test_enqueue_while_playing_does_not_restart() {
        let (mut driver, transport) = driver();
        enqueue(&mut driver, "A").await.unwrap();

        let enqueued = enqueue(&mut driver, "B").await.unwrap();

        assert_eq!(enqueued.position, 2);
        assert!(!enqueued.started);
        assert_eq!(titles(&driver), vec!["A", "B"]);
        assert_eq!(transport.played_titles(), vec!["A"]);
        // Ya estaba en el canal: no hay reconexión
        assert_eq!(transport.with(|r| r.connects.len()), 1);
    }

    #[tokio::test]
    async fn test_enqueue_moves_to_requester_channel() {
        let (mut driver, transport) = driver();
        enqueue(&mut driver, "A").await.unwrap();

        driver.enqueue(GUILD, OTHER_CHANNEL, track("B")).await.unwrap();

        assert_eq!(transport.with(|r| r.connects.clone()), vec![CHANNEL, OTHER_CHANNEL]);
    }

    #[tokio::test]
    async fn test_completion_advances_to_next_track() {
        let (mut driver, transport) = driver();
        enqueue(&mut driver, "A").await.unwrap();
        enqueue(&mut driver, "B").await.unwrap();
        let first = transport.last_play_id();

        driver.track_ended(GUILD, first, None).await;

        assert_eq!(titles(&driver), vec!["B"]);
        assert_eq!(transport.played_titles(), vec!["A", "B"]);
        let second = transport.last_play_id();
        assert_ne!(first, second);
        assert_eq!(driver.state(GUILD), PlaybackState::Playing { play_id: second });
    }

    #[tokio::test]
    async fn test_skip_then_completion_releases_voice() {
        let (mut driver, transport) = driver();
        enqueue(&mut driver, "B").await.unwrap();

        let skipped = driver.skip(GUILD).await.unwrap();
        assert_eq!(skipped, "B");
        assert_eq!(transport.with(|r| r.stops), 1);
        // La cola no cambia hasta que llega la señal de fin
        assert_eq!(titles(&driver), vec!["B"]);

        let play_id = transport.last_play_id();
        driver.track_ended(GUILD, play_id, None).await;

        assert!(driver.store.is_empty(GUILD));
        assert_eq!(transport.with(|r| r.disconnects), 1);
        assert_eq!(driver.state(GUILD), PlaybackState::Idle);
        assert!(matches!(driver.listing(GUILD), Err(CommandError::QueueEmpty)));
    }

    #[tokio::test]
    async fn test_skip_advances_when_there_is_no_stream_to_stop() {
        let (mut driver, transport) = driver();
        enqueue(&mut driver, "A").await.unwrap();
        enqueue(&mut driver, "B").await.unwrap();
        let first = transport.last_play_id();
        transport.with(|r| r.stream_gone = true);

        let skipped = driver.skip(GUILD).await.unwrap();

        assert_eq!(skipped, "A");
        assert_eq!(titles(&driver), vec!["B"]);
        assert_eq!(transport.played_titles(), vec!["A", "B"]);

        // La señal tardía del stream ya reemplazado no vuelve a avanzar
        driver.track_ended(GUILD, first, None).await;
        assert_eq!(titles(&driver), vec!["B"]);
    }

    #[tokio::test]
    async fn test_errored_stream_still_advances() {
        let (mut driver, transport) = driver();
        enqueue(&mut driver, "A").await.unwrap();
        enqueue(&mut driver, "B").await.unwrap();

        let play_id = transport.last_play_id();
        driver
            .track_ended(GUILD, play_id, Some("connection reset".to_string()))
            .await;

        assert_eq!(titles(&driver), vec!["B"]);
        assert_eq!(transport.played_titles(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_stale_completion_is_ignored() {
        let (mut driver, transport) = driver();
        enqueue(&mut driver, "A").await.unwrap();
        enqueue(&mut driver, "B").await.unwrap();
        let first = transport.last_play_id();

        // End y Error del mismo stream: solo el primero avanza
        driver.track_ended(GUILD, first, None).await;
        driver.track_ended(GUILD, first, Some("late error".to_string())).await;

        assert_eq!(titles(&driver), vec!["B"]);
        assert_eq!(transport.played_titles(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_failed_start_skips_to_next_and_releases_when_exhausted() {
        let (mut driver, transport) = driver();
        transport.with(|r| r.failing_urls = vec!["https://cdn/A".to_string()]);

        let result = enqueue(&mut driver, "A").await;

        assert!(matches!(result, Err(CommandError::PlaybackFailed(title)) if title == "A"));
        assert!(driver.store.is_empty(GUILD));
        assert_eq!(transport.with(|r| r.disconnects), 1);
        assert_eq!(driver.state(GUILD), PlaybackState::Idle);

        // El siguiente play arranca de nuevo desde cero
        let enqueued = enqueue(&mut driver, "B").await.unwrap();
        assert!(enqueued.started);
        assert_eq!(transport.played_titles(), vec!["A", "B"]);
        assert_eq!(transport.with(|r| r.connects.len()), 2);
    }

    #[tokio::test]
    async fn test_failed_start_moves_on_to_queued_track() {
        let (mut driver, transport) = driver();
        enqueue(&mut driver, "A").await.unwrap();
        enqueue(&mut driver, "B").await.unwrap();
        enqueue(&mut driver, "C").await.unwrap();
        transport.with(|r| r.failing_urls = vec!["https://cdn/B".to_string()]);

        let play_id = transport.last_play_id();
        driver.track_ended(GUILD, play_id, None).await;

        assert_eq!(titles(&driver), vec!["C"]);
        assert_eq!(transport.played_titles(), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_skip_when_connected_but_idle() {
        let (mut driver, transport) = driver();
        transport.with(|r| r.channel = Some(CHANNEL));

        assert!(matches!(driver.skip(GUILD).await, Err(CommandError::NothingPlaying)));
        assert_eq!(transport.with(|r| r.stops), 0);
    }

    #[tokio::test]
    async fn test_skip_without_voice_connection() {
        let mut transport = MockVoiceTransport::new();
        transport.expect_current_channel().return_const(None::<ChannelId>);
        transport.expect_stop().never();

        let mut driver = PlaybackDriver::new(Arc::new(transport), StreamPolicy::default());

        assert!(matches!(driver.skip(GUILD).await, Err(CommandError::NotConnected)));
        assert!(driver.store.is_empty(GUILD));
    }

    #[tokio::test]
    async fn test_failed_connect_leaves_queue_untouched() {
        let mut transport = MockVoiceTransport::new();
        transport.expect_current_channel().return_const(None::<ChannelId>);
        transport
            .expect_connect()
            .times(1)
            .returning(|_, _| Err(TransportError::NotConnected));
        transport.expect_play().never();

        let mut driver = PlaybackDriver::new(Arc::new(transport), StreamPolicy::default());

        let result = enqueue(&mut driver, "A").await;
        assert!(matches!(result, Err(CommandError::VoiceConnection(_))));
        assert!(driver.store.is_empty(GUILD));
        assert_eq!(driver.state(GUILD), PlaybackState::Idle);
    }

    #[tokio::test]
    async fn test_listing_is_stable_and_ordered() {
        let (mut driver, _transport) = driver();
        for title in ["A", "B", "C"] {
            enqueue(&mut driver, title).await.unwrap();
        }

        let first = driver.listing(GUILD).unwrap();
        let second = driver.listing(GUILD).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first.lines(),
            vec!["Currently playing: A", "1. B", "2. C"]
        );
    }

    #[tokio::test]
    async fn test_voice_lost_clears_queue() {
        let (mut driver, transport) = driver();
        enqueue(&mut driver, "A").await.unwrap();
        enqueue(&mut driver, "B").await.unwrap();
        let play_id = transport.last_play_id();

        transport.with(|r| r.channel = None);
        driver.voice_lost(GUILD).await;

        assert!(driver.store.is_empty(GUILD));
        assert_eq!(driver.state(GUILD), PlaybackState::Idle);

        // El fin del stream cortado llega tarde y no hace nada
        driver.track_ended(GUILD, play_id, None).await;
        assert_eq!(transport.played_titles(), vec!["A"]);
    }

    #[tokio::test]
    async fn test_voice_lost_ignored_after_reconnect() {
        let (mut driver, _transport) = driver();
        enqueue(&mut driver, "A").await.unwrap();

        driver.voice_lost(GUILD).await;

        assert_eq!(titles(&driver), vec!["A"]);
    }

    #[tokio::test]
    async fn test_handle_round_trip_through_running_driver() {
        let transport = Arc::new(RecordingTransport::default());
        let (handle, receiver) = DriverHandle::channel();
        let driver = PlaybackDriver::new(transport.clone(), StreamPolicy::default());
        let task = tokio::spawn(driver.run(receiver));

        handle.enqueue(GUILD, CHANNEL, track("A")).await.unwrap();
        handle.enqueue(GUILD, CHANNEL, track("B")).await.unwrap();
        handle.track_ended(GUILD, transport.last_play_id(), None);

        let listing = handle.listing(GUILD).await.unwrap();
        assert_eq!(listing.lines(), vec!["Currently playing: B"]);

        drop(handle);
        task.await.unwrap();
    }
}
