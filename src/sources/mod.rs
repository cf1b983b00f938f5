pub mod ytdlp;

use async_trait::async_trait;
use serenity::model::id::UserId;
use std::time::Duration;

use crate::error::ResolveError;

pub use ytdlp::YtDlpResolver;

/// Resuelve una consulta (URL directa o texto libre) a un stream reproducible.
///
/// Each call contacts the extractor again: stream URLs expire quickly, so
/// nothing is cached.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaResolver: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<Track, ResolveError>;
}

/// Una pista en la cola: título y URL de stream con vencimiento.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    title: String,
    stream_url: String,
    page_url: Option<String>,
    duration: Option<Duration>,
    requested_by: Option<UserId>,
}

impl Track {
    pub fn new(title: String, stream_url: String) -> Self {
        Self {
            title,
            stream_url,
            page_url: None,
            duration: None,
            requested_by: None,
        }
    }

    // Getters
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn stream_url(&self) -> &str {
        &self.stream_url
    }
    pub fn page_url(&self) -> Option<&str> {
        self.page_url.as_deref()
    }
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }
    pub fn requested_by(&self) -> Option<UserId> {
        self.requested_by
    }

    // Setters
    pub fn with_page_url(mut self, page_url: String) -> Self {
        self.page_url = Some(page_url);
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_requested_by(mut self, user_id: UserId) -> Self {
        self.requested_by = Some(user_id);
        self
    }
}
