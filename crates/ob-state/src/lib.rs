//! Sample-accurate MIDI control-state tracker.
//!
//! Tracks note events and continuous controllers (velocity and timing,
//! 7-bit CCs, pitch bend, channel aftertouch) with sub-block precision,
//! so a voice/DSP layer can ask "what was controller X at sample offset
//! N of the block being rendered". After setup, the per-block mutation
//! and query path is allocation-free.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod clock;
mod event_queue;
mod notes;
mod state;

pub use clock::BlockClock;
pub use event_queue::ControlEventQueue;
pub use notes::NoteTracker;
pub use state::MidiState;
