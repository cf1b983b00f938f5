use serenity::{async_trait, model::id::GuildId};
use songbird::{tracks::PlayMode, Event as VoiceEvent, EventContext, EventHandler as VoiceEventHandler};
use tracing::debug;

use crate::audio::player::{DriverHandle, PlayId};

/// Handler para el fin (o error) de un stream.
///
/// Runs on songbird's event task, so it never touches a queue itself: it only
/// forwards the completion to the playback driver.
#[derive(Clone)]
pub struct TrackEndNotifier {
    guild_id: GuildId,
    play_id: PlayId,
    driver: DriverHandle,
}

impl TrackEndNotifier {
    pub fn new(guild_id: GuildId, play_id: PlayId, driver: DriverHandle) -> Self {
        Self {
            guild_id,
            play_id,
            driver,
        }
    }
}

#[async_trait]
impl VoiceEventHandler for TrackEndNotifier {
    async fn act(&self, ctx: &EventContext<'_>) -> Option<VoiceEvent> {
        let error = match ctx {
            EventContext::Track(track_list) => track_list.iter().find_map(|(state, _handle)| match &state.playing {
                PlayMode::Errored(e) => Some(format!("{:?}", e)),
                _ => None,
            }),
            _ => None,
        };

        debug!("🎵 Stream {} terminó en guild {}", self.play_id, self.guild_id);
        self.driver.track_ended(self.guild_id, self.play_id, error);

        // Una sola notificación por evento registrado
        Some(VoiceEvent::Cancel)
    }
}
