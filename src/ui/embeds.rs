use serenity::{
    all::Timestamp,
    builder::{CreateEmbed, CreateEmbedFooter},
};
use std::time::Duration;

use crate::{
    audio::player::{Enqueued, QueueListing},
    sources::Track,
};

/// Paleta de colores del bot
pub mod colors {
    use serenity::all::Colour;

    pub const SUCCESS_GREEN: Colour = Colour::from_rgb(67, 181, 129);
    pub const ERROR_RED: Colour = Colour::from_rgb(220, 53, 69);
    pub const QUEUE_BLURPLE: Colour = Colour::BLURPLE;
}

/// Discord admite como máximo 25 campos por embed.
const MAX_FIELDS: usize = 25;

/// Separador invisible para campos sin valor.
const EMPTY_VALUE: &str = "\u{200b}";

/// Embed de la cola; el primer campo es la canción en curso.
pub fn create_queue_embed(listing: &QueueListing) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .title("Music Queue")
        .color(colors::QUEUE_BLURPLE);

    let (shown, hidden) = queue_fields(listing);
    for name in shown {
        embed = embed.field(name, EMPTY_VALUE, false);
    }

    if hidden > 0 {
        embed = embed.footer(CreateEmbedFooter::new(format!("… and {} more", hidden)));
    }

    embed
}

/// Nombres de campo visibles y cuántas entradas quedaron fuera.
fn queue_fields(listing: &QueueListing) -> (Vec<String>, usize) {
    let lines = listing.lines();
    let hidden = lines.len().saturating_sub(MAX_FIELDS);
    let shown = lines
        .into_iter()
        .zip(listing.tracks.iter())
        .take(MAX_FIELDS)
        .map(|(line, track)| match track.duration() {
            Some(duration) => format!("{} [{}]", line, format_duration(duration)),
            None => line,
        })
        .collect();

    (shown, hidden)
}

/// Embed de confirmación tras `/play`.
pub fn create_track_added_embed(track: &Track, enqueued: &Enqueued) -> CreateEmbed {
    let mut embed = CreateEmbed::default()
        .description(format!("Added to queue: **{}**", enqueued.title))
        .color(colors::SUCCESS_GREEN);

    if let Some(page_url) = track.page_url() {
        embed = embed.url(page_url);
    }

    if let Some(duration) = track.duration() {
        embed = embed.field("Duration", format_duration(duration), true);
    }

    let status = if enqueued.started {
        "Now playing".to_string()
    } else {
        format!("Position {}", enqueued.position - 1)
    };

    embed = embed.field("Status", status, true);

    if let Some(user_id) = track.requested_by() {
        embed = embed.field("Requested by", format!("<@{}>", user_id), true);
    }

    embed.timestamp(Timestamp::now())
}

/// Embed de error genérico
pub fn create_error_embed(description: &str) -> CreateEmbed {
    CreateEmbed::default()
        .description(description)
        .color(colors::ERROR_RED)
}

fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
