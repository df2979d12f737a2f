//! Core MIDI control types for the offbeat state tracker.
//!
//! This crate defines the value types and bounds shared by the MIDI
//! decoding layer and the state tracker engine. The decoding layer
//! normalizes raw wire values with the helpers here; the engine only
//! ever sees normalized floats.
//!
//! Designed to be `no_std` compatible.

#![cfg_attr(not(feature = "std"), no_std)]

mod control_event;
mod normalize;

pub use control_event::{
    ControlEvent, DEFAULT_BLOCK_SIZE, DEFAULT_SAMPLE_RATE, NUM_CCS, NUM_NOTES,
};
pub use normalize::{normalize_7bit, normalize_bend, BEND_CENTER};
