//! Aggregate MIDI state: notes, CC lanes, pitch bend, aftertouch.

use core::array;

use ob_ir::{ControlEvent, NUM_CCS};

use crate::clock::BlockClock;
use crate::event_queue::ControlEventQueue;
use crate::notes::NoteTracker;

/// Sample-accurate MIDI control state for one channel of a synthesis
/// engine.
///
/// The MIDI decoding layer feeds timed mutations in while a block is
/// being processed; the voice/DSP layer queries values (or the full
/// per-block event sequences) at arbitrary sample offsets; the owning
/// engine calls [`advance_time`](Self::advance_time) exactly once at
/// each block boundary.
///
/// One thread owns the state for the duration of a block. Between
/// [`set_samples_per_block`](Self::set_samples_per_block) calls, none of
/// the mutation or query operations allocate.
pub struct MidiState {
    notes: NoteTracker,
    cc: [ControlEventQueue; NUM_CCS],
    pitch: ControlEventQueue,
    aftertouch: ControlEventQueue,
    /// Returned for out-of-range lane queries; never written by events.
    fallback: ControlEventQueue,
    clock: BlockClock,
}

impl MidiState {
    /// Create a fully reset state with default stream parameters and
    /// queue capacity reserved for the default block size.
    pub fn new() -> Self {
        let mut state = Self {
            notes: NoteTracker::new(),
            cc: array::from_fn(|_| ControlEventQueue::new()),
            pitch: ControlEventQueue::new(),
            aftertouch: ControlEventQueue::new(),
            fallback: ControlEventQueue::new(),
            clock: BlockClock::new(),
        };
        state.reserve_queues(state.clock.samples_per_block());
        state.reset();
        state
    }

    // --- Timed mutations (realtime path) ---

    /// Record a note-on at `delay` samples into the current block.
    pub fn note_on_event(&mut self, delay: u32, note: u8, velocity: f32) {
        debug_assert!(delay < self.clock.samples_per_block());
        self.notes.note_on(self.clock.at(delay), note, velocity);
    }

    /// Record a note-off at `delay` samples into the current block.
    ///
    /// The velocity is accepted for protocol symmetry; release velocity
    /// is not modeled.
    pub fn note_off_event(&mut self, delay: u32, note: u8, velocity: f32) {
        debug_assert!(delay < self.clock.samples_per_block());
        debug_assert!((0.0..=1.0).contains(&velocity));
        self.notes.note_off(self.clock.at(delay), note);
    }

    /// Record a note-off for every note at `delay`.
    pub fn all_notes_off(&mut self, delay: u32) {
        debug_assert!(delay < self.clock.samples_per_block());
        self.notes.all_off(self.clock.at(delay));
    }

    /// Record a controller value on lane `cc` at `delay`.
    ///
    /// Out-of-range lanes, and events whose delay falls outside the
    /// configured block, are dropped.
    pub fn cc_event(&mut self, delay: u32, cc: u8, value: f32) {
        debug_assert!(delay < self.clock.samples_per_block());
        debug_assert!((0.0..=1.0).contains(&value));
        if delay >= self.clock.samples_per_block() {
            return;
        }
        if let Some(queue) = self.cc.get_mut(cc as usize) {
            queue.insert(delay, value);
        }
    }

    /// Record a pitch bend value in [-1, 1] at `delay`.
    pub fn pitch_bend_event(&mut self, delay: u32, value: f32) {
        debug_assert!(delay < self.clock.samples_per_block());
        debug_assert!((-1.0..=1.0).contains(&value));
        if delay < self.clock.samples_per_block() {
            self.pitch.insert(delay, value);
        }
    }

    /// Record a channel aftertouch value in [-1, 1] at `delay`.
    pub fn channel_aftertouch_event(&mut self, delay: u32, value: f32) {
        debug_assert!(delay < self.clock.samples_per_block());
        debug_assert!((-1.0..=1.0).contains(&value));
        if delay < self.clock.samples_per_block() {
            self.aftertouch.insert(delay, value);
        }
    }

    /// Emit a zero-value event at `delay` on every CC lane and on pitch
    /// bend. Channel aftertouch and note state are left as they are,
    /// matching the standard Reset All Controllers message.
    pub fn reset_all_controllers(&mut self, delay: u32) {
        debug_assert!(delay < self.clock.samples_per_block());
        if delay >= self.clock.samples_per_block() {
            return;
        }
        for queue in self.cc.iter_mut() {
            queue.insert(delay, 0.0);
        }
        self.pitch.insert(delay, 0.0);
    }

    // --- Block lifecycle & setup (non-realtime unless noted) ---

    /// Move the clock past a completed block and collapse every queue
    /// to its carried-forward value. Realtime-safe; called exactly once
    /// per block, after all events and queries for that block.
    pub fn advance_time(&mut self, num_samples: u32) {
        self.clock.advance(num_samples);
        for queue in self.cc.iter_mut() {
            queue.advance();
        }
        self.pitch.advance();
        self.aftertouch.advance();
    }

    /// Store a new sample rate. Rewinds the sample clock and clears all
    /// note timestamps; durations measured against the old rate are
    /// discarded, not rescaled.
    pub fn set_sample_rate(&mut self, rate: u32) {
        self.clock.set_sample_rate(rate);
        self.notes.clear_timestamps();
        log::debug!("sample rate set to {} Hz, sample clock rewound", rate);
    }

    /// Store a new block length and re-reserve every queue so
    /// steady-state insertion never reallocates. Allocates; call during
    /// stream (re)configuration only.
    pub fn set_samples_per_block(&mut self, num_samples: u32) {
        self.clock.set_samples_per_block(num_samples);
        self.reserve_queues(num_samples);
        log::debug!("block size set to {} samples, queues re-reserved", num_samples);
    }

    /// Reinitialize everything: note state, all queues, the clock.
    pub fn reset(&mut self) {
        self.notes.reset();
        for queue in self.cc.iter_mut() {
            queue.reset_to(0.0);
        }
        self.pitch.reset_to(0.0);
        self.aftertouch.reset_to(0.0);
        self.fallback.reset_to(0.0);
        self.clock.reset();
        log::debug!("midi state reset");
    }

    fn reserve_queues(&mut self, num_samples: u32) {
        let capacity = num_samples as usize;
        for queue in self.cc.iter_mut() {
            queue.reserve(capacity);
        }
        self.pitch.reserve(capacity);
        self.aftertouch.reserve(capacity);
    }

    // --- Queries (realtime path) ---

    /// Current value of CC lane `cc`, 0.0 for an out-of-range lane.
    pub fn cc_value(&self, cc: u8) -> f32 {
        self.cc.get(cc as usize).map_or(0.0, |q| q.current_value())
    }

    /// Current pitch bend value.
    pub fn pitch_bend(&self) -> f32 {
        self.pitch.current_value()
    }

    /// Current channel aftertouch value.
    pub fn channel_aftertouch(&self) -> f32 {
        self.aftertouch.current_value()
    }

    /// Last velocity recorded for `note`.
    pub fn note_velocity(&self, note: u8) -> f32 {
        self.notes.velocity(note)
    }

    /// Velocity of the most recently played note.
    pub fn last_velocity(&self) -> f32 {
        self.notes.last_velocity()
    }

    /// How long `note` has been sounding at `delay` samples into the
    /// current block, in seconds. 0.0 when the note is off or out of
    /// range.
    pub fn note_duration(&self, note: u8, delay: u32) -> f32 {
        let held = self.notes.held_samples(note, self.clock.at(delay));
        self.clock.seconds(held)
    }

    /// Ordered event sequence for CC lane `cc` in the current block.
    /// An out-of-range lane returns the shared fallback sequence, so
    /// callers never observe an empty slice.
    pub fn cc_events(&self, cc: u8) -> &[ControlEvent] {
        match self.cc.get(cc as usize) {
            Some(queue) => queue.events(),
            None => self.fallback.events(),
        }
    }

    /// Ordered pitch bend events for the current block.
    pub fn pitch_events(&self) -> &[ControlEvent] {
        self.pitch.events()
    }

    /// Ordered channel aftertouch events for the current block.
    pub fn channel_aftertouch_events(&self) -> &[ControlEvent] {
        self.aftertouch.events()
    }

    /// Count of notes currently considered sounding.
    pub fn active_notes(&self) -> u32 {
        self.notes.active()
    }

    /// Number of the most recently played note.
    pub fn last_note_played(&self) -> u8 {
        self.notes.last_note()
    }

    /// Absolute sample time of the start of the current block.
    pub fn clock(&self) -> u64 {
        self.clock.now()
    }

    /// Configured sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.clock.sample_rate()
    }

    /// Configured block length in samples.
    pub fn samples_per_block(&self) -> u32 {
        self.clock.samples_per_block()
    }
}

impl Default for MidiState {
    fn default() -> Self {
        Self::new()
    }
}
