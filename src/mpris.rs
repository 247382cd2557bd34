//! MPRIS client side: reading a player's state over D-Bus.
//!
//! The transport is hidden behind [`PlayerProperties`] so the fetch logic can
//! be exercised without a bus. [`DbusPlayer`] is the real implementation.

use std::collections::HashMap;

use async_io::block_on;
use log::{debug, warn};
use thiserror::Error;
use zbus::{Connection, proxy, proxy::CacheProperties};
use zvariant::OwnedValue;

use crate::config::BusKind;
use crate::metadata::{DecodeError, MetadataModel, PlaybackStatus, decode_playback_status};

pub const MPRIS_PREFIX: &str = "org.mpris.MediaPlayer2.";
pub const MPRIS_PATH: &str = "/org/mpris/MediaPlayer2";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("D-Bus query failed: {0}")]
    Bus(#[from] zbus::Error),
    #[error("malformed player metadata: {0}")]
    Decode(#[from] DecodeError),
}

/// The four player properties the display needs.
///
/// Every call is a fresh, blocking remote query.
pub trait PlayerProperties {
    fn playback_status(&self) -> Result<String, FetchError>;
    fn metadata(&self) -> Result<HashMap<String, OwnedValue>, FetchError>;
    fn position(&self) -> Result<i64, FetchError>;
    fn loop_status(&self) -> Result<String, FetchError>;
}

/// Read one snapshot from `player`.
///
/// `PlaybackStatus` is queried first; a stopped player is not asked for
/// anything else.
pub fn fetch<P: PlayerProperties + ?Sized>(player: &P) -> Result<MetadataModel, FetchError> {
    let status = decode_playback_status(&player.playback_status()?)?;
    if status == PlaybackStatus::Stopped {
        debug!("player is stopped");
        return Ok(MetadataModel::stopped());
    }

    let metadata = player.metadata()?;
    let position = player.position()?;
    let loop_status = player.loop_status()?;

    let model = MetadataModel::from_properties(status, &metadata, position, &loop_status)?;
    if model.artist.is_empty() {
        warn!("player sent an empty artist list for {:?}", model.title);
    }
    debug!(
        "{:?}: {:?} / {:?} / {:?} at {} of {}",
        model.playback_status,
        model.title,
        model.album,
        model.artist,
        model.position,
        model.length
    );
    Ok(model)
}

/// Bus name of the player `identity`, e.g. `spotify` ->
/// `org.mpris.MediaPlayer2.spotify`. Fully-qualified names pass through.
pub fn bus_name_for(identity: &str) -> String {
    if identity.starts_with(MPRIS_PREFIX) {
        identity.to_string()
    } else {
        format!("{MPRIS_PREFIX}{identity}")
    }
}

#[proxy(
    interface = "org.mpris.MediaPlayer2.Player",
    default_path = "/org/mpris/MediaPlayer2"
)]
trait Player {
    #[zbus(property)]
    fn playback_status(&self) -> zbus::Result<String>;

    #[zbus(property)]
    fn metadata(&self) -> zbus::Result<HashMap<String, OwnedValue>>;

    #[zbus(property)]
    fn position(&self) -> zbus::Result<i64>;

    #[zbus(property)]
    fn loop_status(&self) -> zbus::Result<String>;
}

/// A remote MPRIS player reached over the session or system bus.
pub struct DbusPlayer {
    proxy: PlayerProxy<'static>,
    bus_name: String,
}

impl DbusPlayer {
    pub fn connect(identity: &str, bus: BusKind) -> Result<Self, FetchError> {
        let bus_name = bus_name_for(identity);

        block_on(async {
            let connection = match bus {
                BusKind::Session => Connection::session().await?,
                BusKind::System => Connection::system().await?,
            };

            // No property cache: a cache would subscribe to change signals,
            // and every poll must hit the player.
            let proxy = PlayerProxy::builder(&connection)
                .destination(bus_name.clone())?
                .path(MPRIS_PATH)?
                .cache_properties(CacheProperties::No)
                .build()
                .await?;

            Ok(Self { proxy, bus_name })
        })
    }

    pub fn bus_name(&self) -> &str {
        &self.bus_name
    }
}

impl PlayerProperties for DbusPlayer {
    fn playback_status(&self) -> Result<String, FetchError> {
        Ok(block_on(self.proxy.playback_status())?)
    }

    fn metadata(&self) -> Result<HashMap<String, OwnedValue>, FetchError> {
        Ok(block_on(self.proxy.metadata())?)
    }

    fn position(&self) -> Result<i64, FetchError> {
        Ok(block_on(self.proxy.position())?)
    }

    fn loop_status(&self) -> Result<String, FetchError> {
        Ok(block_on(self.proxy.loop_status())?)
    }
}

#[cfg(test)]
pub(crate) mod fake;
