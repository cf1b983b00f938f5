use async_process::Command;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{MediaResolver, Track};
use crate::error::ResolveError;

const UNKNOWN_TITLE: &str = "Unknown Title";

/// Resolver basado en el ejecutable `yt-dlp`.
pub struct YtDlpResolver {
    program: String,
    timeout: Duration,
}

/// Volcado JSON de yt-dlp (solo los campos que usamos).
#[derive(Debug, Deserialize)]
struct ExtractedInfo {
    title: Option<String>,
    url: Option<String>,
    webpage_url: Option<String>,
    duration: Option<f64>,
    acodec: Option<String>,
    formats: Option<Vec<Format>>,
    entries: Option<Vec<ExtractedInfo>>,
}

#[derive(Debug, Deserialize)]
struct Format {
    url: Option<String>,
    acodec: Option<String>,
}

impl Format {
    /// yt-dlp marca explícitamente con "none" los formatos sin audio;
    /// un codec ausente se trata como presente.
    fn has_audio(&self) -> bool {
        self.acodec.as_deref() != Some("none")
    }
}

impl YtDlpResolver {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    async fn extract(&self, query: &str) -> Result<ExtractedInfo, ResolveError> {
        let output = Command::new(&self.program)
            .args(extractor_args(query))
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("yt-dlp falló para '{}': {}", query, stderr);
            return Err(ResolveError::Extractor {
                status: output.status.to_string(),
                stderr,
            });
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

#[async_trait]
impl MediaResolver for YtDlpResolver {
    async fn resolve(&self, query: &str) -> Result<Track, ResolveError> {
        if is_direct_reference(query) {
            info!("🔗 Resolviendo URL: {}", query);
        } else {
            info!("🔍 Buscando: {}", query);
        }

        let info = tokio::time::timeout(self.timeout, self.extract(query))
            .await
            .map_err(|_| ResolveError::Timeout(self.timeout))??;

        let track = select_stream(info)?;
        debug!("🎯 Stream seleccionado para '{}'", track.title());
        Ok(track)
    }
}

/// Argumentos de yt-dlp. La consulta va tal cual: yt-dlp reconoce URLs
/// (también sin esquema) y `--default-search` convierte el resto en búsqueda.
fn extractor_args(query: &str) -> Vec<String> {
    let mut args: Vec<String> = [
        "--dump-single-json",
        "--no-playlist",
        "--skip-download",
        "--format",
        "bestaudio/best",
        "--default-search",
        "ytsearch1",
        "--quiet",
        "--no-warnings",
        "--",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    args.push(query.to_string());
    args
}

fn is_direct_reference(query: &str) -> bool {
    url::Url::parse(query)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Elige la URL de audio del volcado de yt-dlp.
fn select_stream(info: ExtractedInfo) -> Result<Track, ResolveError> {
    let info = match info.entries {
        Some(entries) => entries.into_iter().next().ok_or(ResolveError::NoResults)?,
        None => info,
    };

    let from_formats = match &info.formats {
        Some(formats) => formats
            .iter()
            .find(|f| f.has_audio() && f.url.is_some())
            .and_then(|f| f.url.clone()),
        // Sin lista de formatos el propio volcado es el único candidato
        None => info.url.clone().filter(|_| info.acodec.as_deref() != Some("none")),
    };

    let stream_url = from_formats
        .or_else(|| info.url.clone())
        .ok_or(ResolveError::NoAudio)?;

    let mut track = Track::new(
        info.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        stream_url,
    );

    if let Some(page_url) = info.webpage_url {
        track = track.with_page_url(page_url);
    }

    if let Some(duration) = info.duration.filter(|d| d.is_finite() && *d >= 0.0) {
        track = track.with_duration(Duration::from_secs_f64(duration));
    }

    Ok(track)
}
