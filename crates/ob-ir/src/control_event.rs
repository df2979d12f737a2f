//! The unit entry of every timed control queue.

/// Number of MIDI note slots.
pub const NUM_NOTES: usize = 128;

/// Number of continuous controller lanes.
pub const NUM_CCS: usize = 128;

/// Sample rate assumed until the host configures one.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Block size assumed until the host configures one.
pub const DEFAULT_BLOCK_SIZE: u32 = 256;

/// A timed control value within the block currently being processed.
///
/// `delay` counts samples from the block start. `value` is already
/// normalized by the decoding layer: [0, 1] for CC and velocity,
/// [-1, 1] for pitch bend and channel aftertouch.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlEvent {
    /// Sample offset within the current block
    pub delay: u32,
    /// Normalized controller value
    pub value: f32,
}

impl ControlEvent {
    /// Create a new control event.
    pub const fn new(delay: u32, value: f32) -> Self {
        Self { delay, value }
    }
}
