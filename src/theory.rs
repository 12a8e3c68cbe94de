use std::fmt::{self, Display, Formatter};

use thiserror::Error;

/// The register a chord sounds in when its name does not say.
pub const DEFAULT_CHORD_REGISTER: u8 = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TheoryError {
    #[error("Note `{name}` is not a valid note name.")]
    InvalidNote { name: String },

    #[error("Chord `{name}` is not a valid chord name.")]
    InvalidChord { name: String },

    #[error("Chord `{name}` has an unrecognized quality `{quality}`.")]
    UnknownQuality { name: String, quality: String },

    #[error("Note `{name}` is outside the playable range.")]
    OutOfRange { name: String },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Step {
    pub fn from_char(c: char) -> Option<Step> {
        match c.to_ascii_uppercase() {
            'C' => Some(Step::C),
            'D' => Some(Step::D),
            'E' => Some(Step::E),
            'F' => Some(Step::F),
            'G' => Some(Step::G),
            'A' => Some(Step::A),
            'B' => Some(Step::B),
            _ => None,
        }
    }

    pub fn semitone(self) -> u8 {
        match self {
            Step::C => 0,
            Step::D => 2,
            Step::E => 4,
            Step::F => 5,
            Step::G => 7,
            Step::A => 9,
            Step::B => 11,
        }
    }

    fn letter(self) -> char {
        match self {
            Step::C => 'C',
            Step::D => 'D',
            Step::E => 'E',
            Step::F => 'F',
            Step::G => 'G',
            Step::A => 'A',
            Step::B => 'B',
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    pub fn offset(self) -> i16 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

/// A resolved pitch: step letter, accidental, and register, where
/// `register * 12 + semitone` is the MIDI note number (`D#4` = 51).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Pitch {
    pub step: Step,
    pub accidental: Accidental,
    pub register: u8,
}

impl Pitch {
    pub fn midi(&self) -> u8 {
        let midi = i16::from(self.register) * 12
            + i16::from(self.step.semitone())
            + self.accidental.offset();
        midi as u8
    }

    // Spells with sharps, like the conventional sharp pitch table.
    pub fn from_midi(midi: u8) -> Pitch {
        const SPELLINGS: [(Step, Accidental); 12] = [
            (Step::C, Accidental::Natural),
            (Step::C, Accidental::Sharp),
            (Step::D, Accidental::Natural),
            (Step::D, Accidental::Sharp),
            (Step::E, Accidental::Natural),
            (Step::F, Accidental::Natural),
            (Step::F, Accidental::Sharp),
            (Step::G, Accidental::Natural),
            (Step::G, Accidental::Sharp),
            (Step::A, Accidental::Natural),
            (Step::A, Accidental::Sharp),
            (Step::B, Accidental::Natural),
        ];

        let (step, accidental) = SPELLINGS[(midi % 12) as usize];
        Pitch {
            step,
            accidental,
            register: midi / 12,
        }
    }
}

impl Display for Pitch {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let accidental = match self.accidental {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        };
        write!(f, "{}{}{}", self.step.letter(), accidental, self.register)
    }
}

fn split_name(name: &str) -> Option<(Step, Accidental, &str)> {
    let mut chars = name.chars();
    let step = Step::from_char(chars.next()?)?;
    let rest = chars.as_str();
    let (accidental, rest) = match rest.chars().next() {
        Some('#') => (Accidental::Sharp, &rest[1..]),
        Some('b') => (Accidental::Flat, &rest[1..]),
        _ => (Accidental::Natural, rest),
    };
    Some((step, accidental, rest))
}

pub fn resolve_note(name: &str) -> Result<Pitch, TheoryError> {
    let invalid = || TheoryError::InvalidNote {
        name: name.to_owned(),
    };

    let (step, accidental, register) = split_name(name).ok_or_else(invalid)?;

    if register.is_empty() || !register.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let register = register.parse::<u8>().map_err(|_| invalid())?;

    let midi = i16::from(register) * 12 + i16::from(step.semitone()) + accidental.offset();
    if !(0..=127).contains(&midi) {
        return Err(TheoryError::OutOfRange {
            name: name.to_owned(),
        });
    }

    Ok(Pitch {
        step,
        accidental,
        register,
    })
}

pub fn resolve_chord(name: &str) -> Result<Vec<Pitch>, TheoryError> {
    let invalid = || TheoryError::InvalidChord {
        name: name.to_owned(),
    };

    let (step, accidental, quality) = split_name(name).ok_or_else(invalid)?;

    let intervals = quality_intervals(quality).ok_or_else(|| TheoryError::UnknownQuality {
        name: name.to_owned(),
        quality: quality.to_owned(),
    })?;

    let root = Pitch {
        step,
        accidental,
        register: DEFAULT_CHORD_REGISTER,
    };

    let mut pitches = vec![root];
    for &interval in &intervals[1..] {
        let midi = i16::from(root.midi()) + i16::from(interval);
        if midi > 127 {
            return Err(TheoryError::OutOfRange {
                name: name.to_owned(),
            });
        }
        pitches.push(Pitch::from_midi(midi as u8));
    }

    Ok(pitches)
}

fn quality_intervals(quality: &str) -> Option<&'static [u8]> {
    let intervals: &'static [u8] = match quality {
        "" | "maj" | "M" => &[0, 4, 7],
        "m" | "min" => &[0, 3, 7],
        "dim" => &[0, 3, 6],
        "aug" => &[0, 4, 8],
        "5" => &[0, 7],
        "6" => &[0, 4, 7, 9],
        "m6" | "min6" => &[0, 3, 7, 9],
        "7" | "dom7" => &[0, 4, 7, 10],
        "maj7" | "M7" => &[0, 4, 7, 11],
        "m7" | "min7" => &[0, 3, 7, 10],
        "dim7" => &[0, 3, 6, 9],
        "m7b5" => &[0, 3, 6, 10],
        "9" => &[0, 4, 7, 10, 14],
        "maj9" => &[0, 4, 7, 11, 14],
        "m9" | "min9" => &[0, 3, 7, 10, 14],
        "add9" => &[0, 4, 7, 14],
        "sus2" => &[0, 2, 7],
        "sus4" => &[0, 5, 7],
        _ => return None,
    };
    Some(intervals)
}
