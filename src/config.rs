use anyhow::{Context, Result};
use std::time::Duration;

use crate::audio::transport::StreamPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    // Discord
    pub discord_token: String,
    pub guild_id: Option<u64>, // Para comandos de desarrollo

    // Procesos externos
    pub ytdlp_path: String,
    pub ffmpeg_path: String,

    // Límites
    pub resolve_timeout: Duration,
    pub reconnect_delay_max: Duration,
    pub voice_join_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            // Discord
            discord_token: std::env::var("DISCORD_TOKEN")
                .context("DISCORD_TOKEN must be set in the environment")?,
            guild_id: std::env::var("GUILD_ID").ok().and_then(|s| s.parse().ok()),

            // Procesos externos
            ytdlp_path: std::env::var("YTDLP_PATH").unwrap_or_else(|_| "yt-dlp".to_string()),
            ffmpeg_path: std::env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),

            // Límites
            resolve_timeout: duration_var("RESOLVE_TIMEOUT", "60s")?,
            reconnect_delay_max: duration_var("RECONNECT_DELAY_MAX", "5s")?,
            voice_join_timeout: duration_var("VOICE_JOIN_TIMEOUT", "10s")?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validates configuration values for correctness.
    ///
    /// - The token must not be blank
    /// - The resolver and voice join timeouts must be positive
    /// - The reconnect delay must be at least one second (the transcoder
    ///   only accepts whole seconds)
    pub fn validate(&self) -> Result<()> {
        if self.discord_token.trim().is_empty() {
            anyhow::bail!("DISCORD_TOKEN is empty");
        }

        if self.resolve_timeout.is_zero() {
            anyhow::bail!("Resolve timeout must be greater than 0");
        }

        if self.voice_join_timeout.is_zero() {
            anyhow::bail!("Voice join timeout must be greater than 0");
        }

        if self.reconnect_delay_max < Duration::from_secs(1) {
            anyhow::bail!(
                "Reconnect delay must be at least 1s, got: {}",
                humantime::format_duration(self.reconnect_delay_max)
            );
        }

        Ok(())
    }

    /// Configuración de songbird. El join corre dentro del driver de
    /// reproducción, así que su timeout acota cuánto espera cada guild.
    pub fn voice_config(&self) -> songbird::Config {
        songbird::Config::default().gateway_timeout(Some(self.voice_join_timeout))
    }

    /// Política de reconexión aplicada a cada stream.
    pub fn stream_policy(&self) -> StreamPolicy {
        StreamPolicy {
            reconnect_delay_max: self.reconnect_delay_max,
            ..StreamPolicy::default()
        }
    }

    /// Returns a summary of the current configuration for logging.
    ///
    /// The token is never included.
    pub fn summary(&self) -> String {
        format!(
            "Config Summary:\n  \
            Commands: {}\n  \
            Tools: yt-dlp={} ffmpeg={}\n  \
            Limits: resolve timeout {}, reconnect delay max {}, voice join timeout {}",
            self.guild_id.map_or("global".to_string(), |id| format!("guild {}", id)),
            self.ytdlp_path,
            self.ffmpeg_path,
            humantime::format_duration(self.resolve_timeout),
            humantime::format_duration(self.reconnect_delay_max),
            humantime::format_duration(self.voice_join_timeout),
        )
    }
}

fn duration_var(name: &str, default: &str) -> Result<Duration> {
    let raw = std::env::var(name).unwrap_or_else(|_| default.to_string());
    humantime::parse_duration(raw.trim())
        .with_context(|| format!("{} is not a valid duration: {:?}", name, raw))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Discord (sin defaults - debe proveerse)
            discord_token: String::new(),
            guild_id: None,

            ytdlp_path: "yt-dlp".to_string(),
            ffmpeg_path: "ffmpeg".to_string(),

            resolve_timeout: Duration::from_secs(60),
            reconnect_delay_max: Duration::from_secs(5),
            voice_join_timeout: Duration::from_secs(10),
        }
    }
}
