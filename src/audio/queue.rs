use serenity::model::id::GuildId;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, info};

use crate::sources::Track;

/// Colas de reproducción por guild.
///
/// Position 0 of a guild's queue is the track that is playing (or about to
/// play); nothing else is ever active. A guild entry exists only while its
/// queue is non-empty. The store has no internal locking: it is owned by the
/// playback driver task and every access goes through that single task.
#[derive(Debug, Default)]
pub struct GuildQueueStore {
    queues: HashMap<GuildId, VecDeque<Track>>,
}

impl GuildQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agrega un track al final de la cola y devuelve el nuevo largo.
    pub fn enqueue(&mut self, guild_id: GuildId, track: Track) -> usize {
        let queue = self.queues.entry(guild_id).or_default();
        info!("➕ Agregado a la cola: {}", track.title());
        queue.push_back(track);
        queue.len()
    }

    /// Track en la posición 0, si existe.
    pub fn peek_head(&self, guild_id: GuildId) -> Option<&Track> {
        self.queues.get(&guild_id).and_then(|q| q.front())
    }

    /// Quita la posición 0; la entrada del guild desaparece si queda vacía.
    pub fn pop_head(&mut self, guild_id: GuildId) -> Option<Track> {
        let queue = self.queues.get_mut(&guild_id)?;
        let head = queue.pop_front();

        if queue.is_empty() {
            self.queues.remove(&guild_id);
            debug!("📭 Cola vacía en guild {}", guild_id);
        }

        head
    }

    pub fn is_empty(&self, guild_id: GuildId) -> bool {
        self.len(guild_id) == 0
    }

    pub fn len(&self, guild_id: GuildId) -> usize {
        self.queues.get(&guild_id).map_or(0, VecDeque::len)
    }

    /// Tracks en orden de reproducción.
    pub fn tracks(&self, guild_id: GuildId) -> impl Iterator<Item = &Track> {
        self.queues.get(&guild_id).into_iter().flatten()
    }

    /// Vacía la cola del guild y devuelve cuántos tracks se descartaron.
    pub fn clear(&mut self, guild_id: GuildId) -> usize {
        let removed = self.queues.remove(&guild_id).map_or(0, |q| q.len());
        if removed > 0 {
            info!("🗑️ Cola limpiada en guild {} ({} canciones)", guild_id, removed);
        }
        removed
    }
}
