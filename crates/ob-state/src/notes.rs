//! Fixed per-note state: velocity, on/off timestamps, active count.

use ob_ir::NUM_NOTES;

/// Per-note-number state for all 128 MIDI notes.
///
/// Whether a note is sounding is determined by the ordering of its two
/// timestamps, not a boolean flag. Timestamps are absolute sample-clock
/// values with 0 meaning "never set". All storage is fixed-size and
/// every access is bounds-checked, so the mutation path never touches
/// the allocator.
#[derive(Clone, Debug)]
pub struct NoteTracker {
    velocity: [f32; NUM_NOTES],
    on_time: [u64; NUM_NOTES],
    off_time: [u64; NUM_NOTES],
    active: u32,
    last_note: u8,
}

impl NoteTracker {
    /// Create a tracker with no note history.
    pub fn new() -> Self {
        Self {
            velocity: [0.0; NUM_NOTES],
            on_time: [0; NUM_NOTES],
            off_time: [0; NUM_NOTES],
            active: 0,
            last_note: 0,
        }
    }

    fn index(note: u8) -> Option<usize> {
        let idx = note as usize;
        (idx < NUM_NOTES).then_some(idx)
    }

    /// Record a note-on at absolute sample time `at`.
    ///
    /// Out-of-range notes are dropped without touching state.
    pub fn note_on(&mut self, at: u64, note: u8, velocity: f32) {
        debug_assert!((0.0..=1.0).contains(&velocity));

        if let Some(idx) = Self::index(note) {
            self.velocity[idx] = velocity;
            self.on_time[idx] = at;
            self.last_note = note;
            self.active += 1;
        }
    }

    /// Record a note-off at absolute sample time `at`.
    ///
    /// Release velocity is not modeled; the active count never drops
    /// below zero.
    pub fn note_off(&mut self, at: u64, note: u8) {
        if let Some(idx) = Self::index(note) {
            self.off_time[idx] = at;
            self.active = self.active.saturating_sub(1);
        }
    }

    /// Record a note-off for every note at absolute sample time `at`.
    pub fn all_off(&mut self, at: u64) {
        for note in 0..NUM_NOTES as u8 {
            self.note_off(at, note);
        }
    }

    /// How long the note has been sounding at absolute time `at`, in
    /// samples. Returns 0 when the note is off or out of range.
    ///
    /// A note whose timestamps are both 0 has never been touched and
    /// reads as sounding since clock 0.
    pub fn held_samples(&self, note: u8, at: u64) -> u64 {
        let Some(idx) = Self::index(note) else {
            return 0;
        };
        let on = self.on_time[idx];
        let off = self.off_time[idx];
        if on != 0 && off != 0 && on > off {
            return 0;
        }
        at.saturating_sub(on)
    }

    /// Last velocity recorded for `note`, or 0.0 when out of range.
    pub fn velocity(&self, note: u8) -> f32 {
        Self::index(note).map_or(0.0, |idx| self.velocity[idx])
    }

    /// Velocity of the most recently played note.
    pub fn last_velocity(&self) -> f32 {
        self.velocity(self.last_note)
    }

    /// Number of the most recently played note.
    pub fn last_note(&self) -> u8 {
        self.last_note
    }

    /// Count of notes currently considered sounding.
    pub fn active(&self) -> u32 {
        self.active
    }

    /// Zero all on/off timestamps, keeping velocities and the active
    /// count. Used when the sample rate changes and elapsed-time state
    /// becomes meaningless.
    pub fn clear_timestamps(&mut self) {
        self.on_time = [0; NUM_NOTES];
        self.off_time = [0; NUM_NOTES];
    }

    /// Clear all note state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for NoteTracker {
    fn default() -> Self {
        Self::new()
    }
}
