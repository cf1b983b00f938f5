//! # Bot Module
//!
//! Discord side of the jukebox: slash command registration, interaction
//! dispatch and voice-state tracking.
//!
//! The [`JukeboxBot`] handler holds no queue state of its own. Every command
//! that reads or changes a queue is forwarded to the playback driver through
//! its [`DriverHandle`], so the driver task stays the only owner of the queues.

use anyhow::Result;
use serenity::{
    all::{Context, EventHandler, GuildId, Interaction, Ready, VoiceState},
    async_trait,
};
use std::sync::Arc;
use tracing::{error, info, warn};

pub mod commands;
pub mod events;
pub mod handlers;

use crate::{audio::player::DriverHandle, config::Config, sources::MediaResolver};

/// Main Discord event handler.
///
/// ## Fields
///
/// - `config`: bot configuration (token, command scope, limits)
/// - `driver`: handle to the playback driver task
/// - `resolver`: query → stream URL lookup
pub struct JukeboxBot {
    config: Arc<Config>,
    pub driver: DriverHandle,
    pub resolver: Arc<dyn MediaResolver>,
}

impl JukeboxBot {
    pub fn new(config: Config, driver: DriverHandle, resolver: Arc<dyn MediaResolver>) -> Self {
        Self {
            config: Arc::new(config),
            driver,
            resolver,
        }
    }

    /// Registers slash commands with Discord.
    ///
    /// With `GUILD_ID` set the commands are registered for that guild only
    /// (instant propagation, handy during development); otherwise globally.
    async fn register_commands(&self, ctx: &Context) -> Result<()> {
        info!("📝 Registrando comandos slash...");

        match self.config.guild_id {
            Some(guild_id) => {
                let guild_id = GuildId::new(guild_id);

                // Verificar que el bot esté en la guild
                if !ctx.cache.guilds().contains(&guild_id) {
                    warn!("⚠️ El bot no está en la guild especificada: {}", guild_id);
                    return Ok(());
                }

                commands::register_guild_commands(ctx, guild_id).await.map_err(|e| {
                    anyhow::anyhow!("No se pudieron registrar comandos de guild {}: {:?}", guild_id, e)
                })?;
                info!("✅ Comandos de guild registrados para: {}", guild_id);
            }
            None => {
                commands::register_global_commands(ctx)
                    .await
                    .map_err(|e| anyhow::anyhow!("No se pudieron registrar comandos globales: {:?}", e))?;
                info!("✅ Comandos globales registrados");
            }
        }

        Ok(())
    }
}

#[async_trait]
impl EventHandler for JukeboxBot {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🤖 {} está en línea!", ready.user.name);
        info!("📊 Conectado a {} servidores", ready.guilds.len());

        if let Err(e) = self.register_commands(&ctx).await {
            error!("Error al registrar comandos: {:?}", e);
        }
    }

    /// Errors are logged; Discord shows "interaction failed" to the user.
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command_interaction) = interaction {
            if let Err(e) = handlers::handle_command(&ctx, command_interaction, self).await {
                error!("Error manejando comando: {:?}", e);
            }
        }
    }

    /// Detecta cuando el bot sale de voz (expulsado, canal borrado, etc.).
    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        let current_user_id = ctx.cache.current_user().id;
        if new.user_id != current_user_id || old.is_none() || new.channel_id.is_some() {
            return;
        }

        if let Some(guild_id) = new.guild_id {
            info!("🔌 Bot desconectado en guild {}", guild_id);
            self.driver.voice_lost(guild_id);
        }
    }
}
