use anyhow::Result;
use serenity::{model::gateway::GatewayIntents, Client};
use songbird::{SerenityInit, Songbird};
use std::sync::Arc;
use tracing::{error, info};

mod audio;
mod bot;
mod config;
mod error;
mod sources;
mod ui;

use crate::audio::player::{DriverHandle, PlaybackDriver};
use crate::audio::transport::SongbirdTransport;
use crate::bot::JukeboxBot;
use crate::config::Config;
use crate::sources::YtDlpResolver;

#[tokio::main]
async fn main() -> Result<()> {
    // Inicializar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("guild_jukebox=debug".parse()?)
                .add_directive("serenity=info".parse()?)
                .add_directive("songbird=info".parse()?),
        )
        .init();

    info!("🎵 Iniciando Guild Jukebox v{}", env!("CARGO_PKG_VERSION"));

    // Manejar health check si es necesario
    if std::env::args().any(|arg| arg == "--health-check") {
        return health_check().await;
    }

    // Cargar configuración
    let config = Config::load()?;
    info!("{}", config.summary());

    // Driver de reproducción: único dueño de las colas
    let songbird = Songbird::serenity_from_config(config.voice_config());
    let (driver_handle, driver_rx) = DriverHandle::channel();
    let transport = Arc::new(SongbirdTransport::new(
        songbird.clone(),
        config.ffmpeg_path.clone(),
        driver_handle.clone(),
    ));
    let driver = PlaybackDriver::new(transport, config.stream_policy());
    tokio::spawn(driver.run(driver_rx));

    let resolver = Arc::new(YtDlpResolver::new(
        config.ytdlp_path.clone(),
        config.resolve_timeout,
    ));

    // Intents mínimos: comandos slash y estados de voz
    let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_VOICE_STATES;

    let token = config.discord_token.clone();
    let handler = JukeboxBot::new(config, driver_handle, resolver);

    let mut client = Client::builder(&token, intents)
        .event_handler(handler)
        .register_songbird_with(songbird)
        .await?;

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Error al registrar Ctrl+C: {:?}", e);
            return;
        }
        info!("⚠️ Señal de shutdown recibida, cerrando...");
        std::process::exit(0);
    });

    info!("🚀 Bot iniciado");
    if let Err(why) = client.start().await {
        error!("Error al ejecutar cliente: {:?}", why);
    }

    Ok(())
}

async fn health_check() -> Result<()> {
    let config = Config::default();
    let ytdlp_path = std::env::var("YTDLP_PATH").unwrap_or(config.ytdlp_path);
    let ffmpeg_path = std::env::var("FFMPEG_PATH").unwrap_or(config.ffmpeg_path);

    // Verificar dependencias críticas
    let yt_dlp = async_process::Command::new(&ytdlp_path)
        .arg("--version")
        .output()
        .await?;

    let ffmpeg = async_process::Command::new(&ffmpeg_path)
        .arg("-version")
        .output()
        .await?;

    if yt_dlp.status.success() && ffmpeg.status.success() {
        println!("OK");
        Ok(())
    } else {
        anyhow::bail!("Dependencias faltantes: yt-dlp={} ffmpeg={}", yt_dlp.status, ffmpeg.status);
    }
}
