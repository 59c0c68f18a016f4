//! Colour-mask table resolution for 32-bit BMPs.

use log::warn;

use crate::pixel::Channel;

/// Byte-aligned masks in channel order: red, green, blue, alpha.
const BYTE_MASKS: [u64; 4] = [0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0xFF00_0000];

/// For each channel, which byte of a 4-byte pixel it is read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ChannelMap {
    positions: [Option<usize>; 4],
}

impl ChannelMap {
    /// Conventional BI_RGB layout: B, G, R, A.
    pub(crate) const BGRA: ChannelMap = ChannelMap {
        positions: [Some(2), Some(1), Some(0), Some(3)],
    };

    /// Resolve a mask table. Slot `i` describes byte `i` of every pixel; its
    /// mask names the channel that byte belongs to (0xFF red, 0xFF00 green,
    /// 0xFF0000 blue, 0xFF000000 alpha).
    ///
    /// Only the four single-byte masks are understood. A slot holding any other
    /// value leaves its byte unread, and a channel no slot names keeps its
    /// initial value.
    pub(crate) fn resolve(masks: [u64; 4]) -> ChannelMap {
        let mut positions = [None; 4];
        for (pos, &mask) in masks.iter().enumerate() {
            match BYTE_MASKS.iter().position(|&m| m == mask) {
                Some(slot) => positions[slot] = Some(pos),
                None => warn!("unresolved mask {mask:#010x} for pixel byte {pos}; byte ignored"),
            }
        }
        for channel in Channel::ALL {
            if positions[channel.slot()].is_none() {
                warn!("no mask selects {channel}; channel left unset");
            }
        }
        ChannelMap { positions }
    }

    /// Byte position of `channel` within a pixel, if resolved.
    #[inline]
    pub(crate) fn position(&self, channel: Channel) -> Option<usize> {
        self.positions[channel.slot()]
    }
}
