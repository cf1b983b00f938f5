use anyhow::Result;
use serenity::{
    builder::{CreateInteractionResponse, CreateInteractionResponseMessage, EditInteractionResponse},
    model::{
        application::CommandInteraction,
        id::{ChannelId, GuildId, UserId},
    },
    prelude::Context,
};
use tracing::{info, warn};

use crate::{
    audio::player::{DriverHandle, Enqueued},
    bot::{commands, JukeboxBot},
    error::CommandError,
    sources::{MediaResolver, Track},
    ui::embeds,
};

/// Maneja comandos slash
pub async fn handle_command(ctx: &Context, command: CommandInteraction, bot: &JukeboxBot) -> Result<()> {
    let Some(guild_id) = command.guild_id else {
        return respond_error(ctx, &command, &CommandError::OutsideGuild).await;
    };

    info!(
        "📝 Comando /{} usado por {} en guild {}",
        command.data.name, command.user.name, guild_id
    );

    match command.data.name.as_str() {
        commands::PLAY => handle_play(ctx, &command, bot, guild_id).await?,
        commands::QUEUE => handle_queue(ctx, &command, bot, guild_id).await?,
        commands::SKIP => handle_skip(ctx, &command, bot, guild_id).await?,
        other => {
            warn!("Comando desconocido: {}", other);
            command
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Message(
                        CreateInteractionResponseMessage::new()
                            .content("Unknown command")
                            .ephemeral(true),
                    ),
                )
                .await?;
        }
    }

    Ok(())
}

async fn handle_play(
    ctx: &Context,
    command: &CommandInteraction,
    bot: &JukeboxBot,
    guild_id: GuildId,
) -> Result<()> {
    let query = command
        .data
        .options
        .iter()
        .find(|opt| opt.name == commands::SEARCH_OPTION)
        .and_then(|opt| opt.value.as_str())
        .ok_or_else(|| anyhow::anyhow!("Query no proporcionado"))?;

    // Verificar que el usuario esté en un canal de voz antes de todo lo demás
    let channel_id = user_voice_channel(ctx, guild_id, command.user.id);
    if channel_id.is_none() {
        return respond_error(ctx, command, &CommandError::NotInVoice).await;
    }

    // Defer la respuesta ya que la búsqueda puede tardar
    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(CreateInteractionResponseMessage::new()),
        )
        .await?;

    let result = enqueue_query(
        bot.resolver.as_ref(),
        &bot.driver,
        guild_id,
        channel_id,
        query,
        command.user.id,
    )
    .await;

    let response = match result {
        Ok((track, enqueued)) => {
            EditInteractionResponse::new().embed(embeds::create_track_added_embed(&track, &enqueued))
        }
        Err(e) => {
            warn!("❌ /play '{}' falló en guild {}: {}", query, guild_id, e);
            EditInteractionResponse::new().embed(embeds::create_error_embed(&e.to_string()))
        }
    };

    command.edit_response(&ctx.http, response).await?;
    Ok(())
}

async fn handle_queue(
    ctx: &Context,
    command: &CommandInteraction,
    bot: &JukeboxBot,
    guild_id: GuildId,
) -> Result<()> {
    match bot.driver.listing(guild_id).await {
        Ok(listing) => {
            command
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Message(
                        CreateInteractionResponseMessage::new().embed(embeds::create_queue_embed(&listing)),
                    ),
                )
                .await?;
            Ok(())
        }
        Err(e) => respond_error(ctx, command, &e).await,
    }
}

async fn handle_skip(
    ctx: &Context,
    command: &CommandInteraction,
    bot: &JukeboxBot,
    guild_id: GuildId,
) -> Result<()> {
    match bot.driver.skip(guild_id).await {
        Ok(_title) => {
            command
                .create_response(
                    &ctx.http,
                    CreateInteractionResponse::Message(
                        CreateInteractionResponseMessage::new().content("Skipped the current song!"),
                    ),
                )
                .await?;
            Ok(())
        }
        Err(e) => respond_error(ctx, command, &e).await,
    }
}

/// Resuelve la consulta y la entrega al driver. Sin canal de voz no se
/// resuelve nada; un fallo de resolución no toca la cola.
pub async fn enqueue_query(
    resolver: &dyn MediaResolver,
    driver: &DriverHandle,
    guild_id: GuildId,
    channel_id: Option<ChannelId>,
    query: &str,
    requested_by: UserId,
) -> Result<(Track, Enqueued), CommandError> {
    let channel_id = channel_id.ok_or(CommandError::NotInVoice)?;
    let track = resolver.resolve(query).await?.with_requested_by(requested_by);
    let enqueued = driver.enqueue(guild_id, channel_id, track.clone()).await?;
    Ok((track, enqueued))
}

async fn respond_error(ctx: &Context, command: &CommandInteraction, error: &CommandError) -> Result<()> {
    command
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(error.to_string())
                    .ephemeral(error.is_ephemeral()),
            ),
        )
        .await?;
    Ok(())
}

// Funciones auxiliares

fn user_voice_channel(ctx: &Context, guild_id: GuildId, user_id: UserId) -> Option<ChannelId> {
    let guild = guild_id.to_guild_cached(&ctx.cache)?;
    guild
        .voice_states
        .get(&user_id)
        .and_then(|voice_state| voice_state.channel_id)
}
