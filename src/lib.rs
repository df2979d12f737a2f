//! Sample-accurate MIDI control-state tracking for realtime synthesis.
//!
//! A synthesis engine feeds decoded MIDI events in with intra-block
//! sample delays, queries controller values at arbitrary sample offsets
//! while rendering, and advances the state once per processed block.
//! See [`MidiState`] for the full contract.

// Re-export the public surface so callers don't need ob-ir/ob-state directly.
pub use ob_ir::{
    normalize_7bit, normalize_bend, ControlEvent, BEND_CENTER, DEFAULT_BLOCK_SIZE,
    DEFAULT_SAMPLE_RATE, NUM_CCS, NUM_NOTES,
};
pub use ob_state::{BlockClock, ControlEventQueue, MidiState, NoteTracker};
