use anyhow::Result;
use serenity::{
    all::Command,
    builder::{CreateCommand, CreateCommandOption},
    model::{application::CommandOptionType, id::GuildId},
    prelude::Context,
};

pub const PLAY: &str = "play";
pub const QUEUE: &str = "queue";
pub const SKIP: &str = "skip";

/// Nombre de la opción de búsqueda de `/play`.
pub const SEARCH_OPTION: &str = "search";

fn all_commands() -> Vec<CreateCommand> {
    vec![play_command(), queue_command(), skip_command()]
}

/// Registra comandos globales
pub async fn register_global_commands(ctx: &Context) -> Result<()> {
    Command::set_global_commands(&ctx.http, all_commands()).await?;
    Ok(())
}

/// Registra comandos para una guild específica (desarrollo)
pub async fn register_guild_commands(ctx: &Context, guild_id: GuildId) -> Result<()> {
    guild_id.set_commands(&ctx.http, all_commands()).await?;
    Ok(())
}

fn play_command() -> CreateCommand {
    CreateCommand::new(PLAY)
        .description("Play a song from YouTube")
        .dm_permission(false)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                SEARCH_OPTION,
                "Song name or keywords to search",
            )
            .required(true),
        )
}

fn queue_command() -> CreateCommand {
    CreateCommand::new(QUEUE)
        .description("Show the current music queue")
        .dm_permission(false)
}

fn skip_command() -> CreateCommand {
    CreateCommand::new(SKIP)
        .description("Skip the currently playing song")
        .dm_permission(false)
}
