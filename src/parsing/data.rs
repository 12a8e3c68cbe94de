use crate::theory::Pitch;

/// Fixed timing resolution: every beat spans this many ticks.
pub const TICKS_PER_BEAT: u32 = 960;

/// Mid-scale velocity used when an event carries no `velocity` modifier.
pub const DEFAULT_VELOCITY: u8 = 64;

/// A time signature. The subdivision unit must be a power of two.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Signature {
    pub beats_per_bar: u8,
    pub subdivision: u8,
}

impl Signature {
    pub fn new(beats_per_bar: u8, subdivision: u8) -> Option<Signature> {
        let power_of_two = subdivision != 0 && subdivision & (subdivision - 1) == 0;
        if !power_of_two {
            return None;
        }

        Some(Signature {
            beats_per_bar,
            subdivision,
        })
    }

    pub fn ticks_per_bar(&self) -> u32 {
        u32::from(self.beats_per_bar) * TICKS_PER_BEAT
    }

    pub fn ticks_per_subdivision(&self) -> u32 {
        TICKS_PER_BEAT / u32::from(self.subdivision)
    }

    /// Absolute tick of an event at a 1-based beat plus a fractional
    /// delta in [0, 1), inside the bar at `bar_offset`.
    pub fn tick_at(&self, bar_offset: u32, beat: u8, delta: f64) -> u32 {
        let delta_ticks = (f64::from(self.ticks_per_subdivision()) * delta) as u32;

        bar_offset * self.ticks_per_bar() + u32::from(beat - 1) * TICKS_PER_BEAT + delta_ticks
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Project {
    pub name: String,
    pub bpm: Option<f64>,
    pub signature: Option<Signature>,
    pub tracks: Vec<Track>,
    pub copyrights: Vec<String>,
    pub texts: Vec<String>,
}

/// A track. Its bpm and signature are copied from the project when the
/// track is created, not referenced.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Track {
    pub name: String,
    pub bpm: Option<f64>,
    pub signature: Option<Signature>,
    pub instrument: Option<String>,
    pub bars: Vec<Bar>,
    pub copyrights: Vec<String>,
    pub texts: Vec<String>,
}

/// A bar. `offset` is the bar's zero-based position in its track at the
/// time it was appended.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Bar {
    pub offset: u32,
    pub bpm: Option<f64>,
    pub signature: Option<Signature>,
    pub playables: Vec<Playable>,
    pub texts: Vec<String>,
}

/// A pitched event placed on the timeline: a single note or a chord
/// whose pitches share one tick, duration and velocity.
#[derive(Debug, Clone, PartialEq)]
pub enum Playable {
    Note(Note),
    Chord(Chord),
}

impl Playable {
    pub fn tick(&self) -> u32 {
        match self {
            Playable::Note(note) => note.tick,
            Playable::Chord(chord) => chord.tick,
        }
    }

    /// The duration code: 1, 2, 4, 8, 16, 32, 64, 128 or 256, meaning a
    /// whole note down to a 1/256th note.
    pub fn duration(&self) -> u16 {
        match self {
            Playable::Note(note) => note.duration,
            Playable::Chord(chord) => chord.duration,
        }
    }

    pub fn velocity(&self) -> u8 {
        match self {
            Playable::Note(note) => note.velocity,
            Playable::Chord(chord) => chord.velocity,
        }
    }

    pub fn set_velocity(&mut self, velocity: u8) {
        match self {
            Playable::Note(note) => note.velocity = velocity,
            Playable::Chord(chord) => chord.velocity = velocity,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Note {
    pub pitch: Pitch,
    pub tick: u32,
    pub duration: u16,
    pub velocity: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    pub pitches: Vec<Pitch>,
    pub tick: u32,
    pub duration: u16,
    pub velocity: u8,
}
