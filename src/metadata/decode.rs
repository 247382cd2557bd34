//! Typed decoding of the loosely-typed MPRIS property bag.
//!
//! Every field gets an explicit decoder that either produces the target type
//! or a `DecodeError` naming the offending key.

use std::collections::HashMap;

use thiserror::Error;
use zvariant::{OwnedValue, Value};

use super::{LoopStatus, MetadataModel, PlaybackStatus};

pub const KEY_TRACK_ID: &str = "mpris:trackid";
pub const KEY_LENGTH: &str = "mpris:length";
pub const KEY_ART_URL: &str = "mpris:artUrl";
pub const KEY_ALBUM: &str = "xesam:album";
pub const KEY_ALBUM_ARTIST: &str = "xesam:albumArtist";
pub const KEY_ARTIST: &str = "xesam:artist";
pub const KEY_AUTO_RATING: &str = "xesam:autoRating";
pub const KEY_DISC_NUMBER: &str = "xesam:discNumber";
pub const KEY_TITLE: &str = "xesam:title";
pub const KEY_TRACK_NUMBER: &str = "xesam:trackNumber";
pub const KEY_URL: &str = "xesam:url";

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("required key `{key}` is missing")]
    Missing { key: String },
    #[error("key `{key}` has type `{found}`, expected {expected}")]
    WrongType {
        key: String,
        expected: &'static str,
        found: String,
    },
    #[error("key `{key}` value {value} is out of range")]
    OutOfRange { key: String, value: i64 },
    #[error("key `{key}` has unknown value `{value}`")]
    UnknownVariant { key: String, value: String },
}

fn wrong_type(key: &str, expected: &'static str, value: &Value<'_>) -> DecodeError {
    DecodeError::WrongType {
        key: key.to_string(),
        expected,
        found: value.value_signature().to_string(),
    }
}

/// Strip any `v` wrappers a player may have nested around the payload.
fn unwrap_variant<'v, 'a>(mut value: &'v Value<'a>) -> &'v Value<'a> {
    while let Value::Value(inner) = value {
        value = inner;
    }
    value
}

/// Decode a string; object paths are accepted as their textual form.
pub fn decode_string(key: &str, value: &Value<'_>) -> Result<String, DecodeError> {
    match unwrap_variant(value) {
        Value::Str(s) => Ok(s.as_str().to_string()),
        Value::ObjectPath(p) => Ok(p.as_str().to_string()),
        other => Err(wrong_type(key, "a string", other)),
    }
}

/// Decode any integer variant that fits in an `i64`.
pub fn decode_i64(key: &str, value: &Value<'_>) -> Result<i64, DecodeError> {
    match unwrap_variant(value) {
        Value::U8(n) => Ok(i64::from(*n)),
        Value::I16(n) => Ok(i64::from(*n)),
        Value::U16(n) => Ok(i64::from(*n)),
        Value::I32(n) => Ok(i64::from(*n)),
        Value::U32(n) => Ok(i64::from(*n)),
        Value::I64(n) => Ok(*n),
        Value::U64(n) => i64::try_from(*n).map_err(|_| DecodeError::OutOfRange {
            key: key.to_string(),
            value: i64::MAX,
        }),
        other => Err(wrong_type(key, "an integer", other)),
    }
}

pub fn decode_i32(key: &str, value: &Value<'_>) -> Result<i32, DecodeError> {
    let n = decode_i64(key, value)?;
    i32::try_from(n).map_err(|_| DecodeError::OutOfRange {
        key: key.to_string(),
        value: n,
    })
}

pub fn decode_u32(key: &str, value: &Value<'_>) -> Result<u32, DecodeError> {
    let n = decode_i64(key, value)?;
    u32::try_from(n).map_err(|_| DecodeError::OutOfRange {
        key: key.to_string(),
        value: n,
    })
}

pub fn decode_f64(key: &str, value: &Value<'_>) -> Result<f64, DecodeError> {
    match unwrap_variant(value) {
        Value::F64(x) => Ok(*x),
        other => Err(wrong_type(key, "a double", other)),
    }
}

/// Decode an array of strings. Some players send a bare string where the
/// MPRIS interface asks for a list; that is read as a one-element list.
pub fn decode_string_list(key: &str, value: &Value<'_>) -> Result<Vec<String>, DecodeError> {
    match unwrap_variant(value) {
        Value::Array(items) => items
            .iter()
            .map(|item| decode_string(key, item))
            .collect(),
        Value::Str(s) => Ok(vec![s.as_str().to_string()]),
        other => Err(wrong_type(key, "a list of strings", other)),
    }
}

pub fn decode_playback_status(value: &str) -> Result<PlaybackStatus, DecodeError> {
    PlaybackStatus::parse(value).ok_or_else(|| DecodeError::UnknownVariant {
        key: "PlaybackStatus".to_string(),
        value: value.to_string(),
    })
}

/// Unrecognized loop modes are not an error; they simply draw no icon.
pub fn decode_loop_status(value: &str) -> Option<LoopStatus> {
    LoopStatus::parse(value)
}

/// Typed view over the `Metadata` property map.
pub struct MetadataBag<'m> {
    map: &'m HashMap<String, OwnedValue>,
}

impl<'m> MetadataBag<'m> {
    pub fn new(map: &'m HashMap<String, OwnedValue>) -> Self {
        Self { map }
    }

    fn get(&self, key: &str) -> Option<&'m Value<'static>> {
        self.map.get(key).map(|v| &**v)
    }

    pub fn required<T>(
        &self,
        key: &str,
        decode: fn(&str, &Value<'_>) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        let value = self.get(key).ok_or_else(|| DecodeError::Missing {
            key: key.to_string(),
        })?;
        decode(key, value)
    }

    /// Absent keys yield `T::default()`; present keys must still decode.
    pub fn optional<T: Default>(
        &self,
        key: &str,
        decode: fn(&str, &Value<'_>) -> Result<T, DecodeError>,
    ) -> Result<T, DecodeError> {
        match self.get(key) {
            Some(value) => decode(key, value),
            None => Ok(T::default()),
        }
    }
}

impl MetadataModel {
    /// Build a playing/paused snapshot from the raw property values.
    pub fn from_properties(
        status: PlaybackStatus,
        metadata: &HashMap<String, OwnedValue>,
        position: i64,
        loop_status: &str,
    ) -> Result<Self, DecodeError> {
        let bag = MetadataBag::new(metadata);

        Ok(Self {
            track_id: bag.required(KEY_TRACK_ID, decode_string)?,
            length: bag.required(KEY_LENGTH, decode_i64)?,
            art_url: bag.optional(KEY_ART_URL, decode_string)?,
            album: bag.required(KEY_ALBUM, decode_string)?,
            album_artist: bag.optional(KEY_ALBUM_ARTIST, decode_string_list)?,
            artist: bag.required(KEY_ARTIST, decode_string_list)?,
            auto_rating: bag.optional(KEY_AUTO_RATING, decode_f64)?,
            disc_number: bag.optional(KEY_DISC_NUMBER, decode_i32)?,
            title: bag.required(KEY_TITLE, decode_string)?,
            track_number: bag.optional(KEY_TRACK_NUMBER, decode_u32)?,
            url: bag.optional(KEY_URL, decode_string)?,
            playback_status: status,
            position,
            shuffle: false,
            loop_status: decode_loop_status(loop_status),
        })
    }
}
