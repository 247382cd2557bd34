//! In-memory player used by the fetch and runtime tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use zvariant::{OwnedValue, Value};

use super::{FetchError, PlayerProperties};
use crate::metadata::*;

pub fn ov<'a>(v: impl Into<Value<'a>>) -> OwnedValue {
    OwnedValue::try_from(v.into()).unwrap()
}

pub struct FakePlayer {
    pub status: String,
    pub metadata: HashMap<String, OwnedValue>,
    pub position: i64,
    pub loop_status: String,
    /// Fail every query after this many successful ones.
    pub fail_after: Option<usize>,
    pub queried: RefCell<Vec<&'static str>>,
    calls: Cell<usize>,
}

impl FakePlayer {
    pub fn playing(title: &str, album: &str, artists: &[&str], loop_status: &str) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert(KEY_TRACK_ID.to_string(), ov("/org/mpris/MediaPlayer2/track/1"));
        metadata.insert(KEY_LENGTH.to_string(), ov(183_000_000i64));
        metadata.insert(KEY_ALBUM.to_string(), ov(album));
        metadata.insert(
            KEY_ARTIST.to_string(),
            ov(artists.iter().map(|a| a.to_string()).collect::<Vec<_>>()),
        );
        metadata.insert(KEY_TITLE.to_string(), ov(title));
        metadata.insert(KEY_TRACK_NUMBER.to_string(), ov(4i32));

        Self {
            status: "Playing".to_string(),
            metadata,
            position: 3000,
            loop_status: loop_status.to_string(),
            fail_after: None,
            queried: RefCell::new(Vec::new()),
            calls: Cell::new(0),
        }
    }

    pub fn stopped() -> Self {
        Self {
            status: "Stopped".to_string(),
            metadata: HashMap::new(),
            position: 0,
            loop_status: String::new(),
            fail_after: None,
            queried: RefCell::new(Vec::new()),
            calls: Cell::new(0),
        }
    }

    fn record(&self, name: &'static str) -> Result<(), FetchError> {
        self.queried.borrow_mut().push(name);
        let n = self.calls.get();
        self.calls.set(n + 1);
        match self.fail_after {
            Some(limit) if n >= limit => {
                Err(zbus::Error::Failure(format!("{name}: player went away")).into())
            }
            _ => Ok(()),
        }
    }
}

impl PlayerProperties for FakePlayer {
    fn playback_status(&self) -> Result<String, FetchError> {
        self.record("PlaybackStatus")?;
        Ok(self.status.clone())
    }

    fn metadata(&self) -> Result<HashMap<String, OwnedValue>, FetchError> {
        self.record("Metadata")?;
        Ok(self
            .metadata
            .iter()
            .map(|(k, v)| (k.clone(), v.try_clone().unwrap()))
            .collect())
    }

    fn position(&self) -> Result<i64, FetchError> {
        self.record("Position")?;
        Ok(self.position)
    }

    fn loop_status(&self) -> Result<String, FetchError> {
        self.record("LoopStatus")?;
        Ok(self.loop_status.clone())
    }
}
