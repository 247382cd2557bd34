//! Now-playing snapshot types.
//!
//! `MetadataModel` is the normalized view of one poll of an MPRIS player.
//! It is rebuilt from scratch on every cycle and never mutated afterwards.

mod decode;

pub use decode::*;

/// Placeholder shown when a playing track reports no artist.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// The `PlaybackStatus` property of an MPRIS player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    #[default]
    Stopped,
}

impl PlaybackStatus {
    /// Parse the exact MPRIS spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Playing" => Some(Self::Playing),
            "Paused" => Some(Self::Paused),
            "Stopped" => Some(Self::Stopped),
            _ => None,
        }
    }
}

/// The `LoopStatus` property of an MPRIS player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopStatus {
    /// Playback stops at the end of the playlist.
    None,
    /// The current track repeats.
    Track,
    /// The playlist wraps around.
    Playlist,
}

impl LoopStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "None" => Some(Self::None),
            "Track" => Some(Self::Track),
            "Playlist" => Some(Self::Playlist),
            _ => None,
        }
    }
}

/// One polled snapshot of player state.
///
/// When `playback_status` is `Stopped` every other field is left at its zero
/// value and must not be read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetadataModel {
    pub track_id: String,
    /// Track length in microseconds (`mpris:length`).
    pub length: i64,
    pub art_url: String,
    pub album: String,
    pub album_artist: Vec<String>,
    pub artist: Vec<String>,
    pub auto_rating: f64,
    pub disc_number: i32,
    pub title: String,
    pub track_number: u32,
    pub url: String,
    pub playback_status: PlaybackStatus,
    /// Raw `Position` property as reported by the player.
    pub position: i64,
    pub shuffle: bool,
    /// `None` when the player reported a loop status we do not recognize.
    pub loop_status: Option<LoopStatus>,
}

impl MetadataModel {
    /// The sparse snapshot of a stopped player.
    pub fn stopped() -> Self {
        Self {
            playback_status: PlaybackStatus::Stopped,
            ..Self::default()
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.playback_status == PlaybackStatus::Stopped
    }

    /// First artist, or [`UNKNOWN_ARTIST`] if the player sent an empty list.
    pub fn display_artist(&self) -> &str {
        self.artist
            .first()
            .map(String::as_str)
            .unwrap_or(UNKNOWN_ARTIST)
    }
}
