//! 8x8 loop-mode icons, one byte per row, most significant bit leftmost.

use crate::metadata::LoopStatus;

#[derive(Debug, PartialEq, Eq)]
pub struct Icon {
    pub width: u32,
    pub height: u32,
    pub data: &'static [u8],
}

/// Straight arrow: playback ends after the last track.
pub static ICON_LOOP_NONE: Icon = Icon {
    width: 8,
    height: 8,
    data: &[
        0b0000_0000,
        0b0000_1000,
        0b0000_1100,
        0b1111_1110,
        0b0000_1100,
        0b0000_1000,
        0b0000_0000,
        0b0000_0000,
    ],
};

/// Loop with a `1`: the current track repeats.
pub static ICON_LOOP_TRACK: Icon = Icon {
    width: 8,
    height: 8,
    data: &[
        0b0111_1100,
        0b1000_0110,
        0b1001_0010,
        0b1011_0010,
        0b1001_0010,
        0b1001_0010,
        0b1100_0010,
        0b0111_1100,
    ],
};

/// Closed loop: the playlist wraps around.
pub static ICON_LOOP_PLAYLIST: Icon = Icon {
    width: 8,
    height: 8,
    data: &[
        0b0111_1100,
        0b1000_0110,
        0b1000_0010,
        0b1000_0010,
        0b1000_0010,
        0b1000_0010,
        0b1100_0010,
        0b0111_1100,
    ],
};

pub fn icon_for(loop_status: LoopStatus) -> &'static Icon {
    match loop_status {
        LoopStatus::None => &ICON_LOOP_NONE,
        LoopStatus::Track => &ICON_LOOP_TRACK,
        LoopStatus::Playlist => &ICON_LOOP_PLAYLIST,
    }
}
