use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CantusError, Result};

/// Lowest representable sounded pitch (C3) in absolute semitones.
pub const PITCH_FLOOR: i32 = 36;
/// Highest representable sounded pitch (B5) in absolute semitones.
pub const PITCH_CEILING: i32 = 71;

pub const OCTAVE_MIN: i8 = 3;
pub const OCTAVE_MAX: i8 = 5;

/// Durations a generated or mutated note may take, in quarter-note units.
/// Length normalization may produce off-grid durations when trimming.
pub const DURATION_GRID: [f64; 4] = [0.5, 1.0, 2.0, 4.0];

/// Tolerance for total-duration comparisons.
pub const DURATION_EPSILON: f64 = 1e-6;

const PITCH_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// One musical event: an octave, a pitch class and a duration.
///
/// `pitch_class` 0 denotes a rest; 1..=12 map to the chromatic steps C..B.
/// A rest still consumes its duration. Notes are immutable once built;
/// every transform produces fresh values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    octave: i8,
    pitch_class: u8,
    duration: f64,
}

impl Note {
    pub fn new(octave: i8, pitch_class: u8, duration: f64) -> Result<Self> {
        if pitch_class > 12 {
            return Err(CantusError::Structure(format!(
                "pitch_class {} outside [0, 12]",
                pitch_class
            )));
        }
        if !(OCTAVE_MIN..=OCTAVE_MAX).contains(&octave) {
            return Err(CantusError::Structure(format!(
                "octave {} outside [{}, {}]",
                octave, OCTAVE_MIN, OCTAVE_MAX
            )));
        }
        if !duration.is_finite() || duration <= 0.0 {
            return Err(CantusError::Structure(format!(
                "duration {} must be a positive finite number",
                duration
            )));
        }
        Ok(Self {
            octave,
            pitch_class,
            duration,
        })
    }

    pub fn rest(duration: f64) -> Result<Self> {
        Self::new(OCTAVE_MIN, 0, duration)
    }

    /// Build a sounded note from an absolute pitch, clamping into the
    /// representable C3..B5 window. Clamping (rather than wrapping) keeps
    /// out-of-range transpositions from turning into large jumps.
    pub(crate) fn from_absolute_pitch(pitch: i32, duration: f64) -> Self {
        let clamped = pitch.clamp(PITCH_FLOOR, PITCH_CEILING);
        Self {
            octave: (clamped / 12) as i8,
            pitch_class: (clamped % 12) as u8 + 1,
            duration,
        }
    }

    pub(crate) fn with_duration(&self, duration: f64) -> Self {
        Self { duration, ..*self }
    }

    pub(crate) fn rest_with_duration(duration: f64) -> Self {
        Self {
            octave: OCTAVE_MIN,
            pitch_class: 0,
            duration,
        }
    }

    pub(crate) fn to_rest(&self) -> Self {
        Self {
            octave: OCTAVE_MIN,
            pitch_class: 0,
            duration: self.duration,
        }
    }

    pub fn octave(&self) -> i8 {
        self.octave
    }

    pub fn pitch_class(&self) -> u8 {
        self.pitch_class
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_rest(&self) -> bool {
        self.pitch_class == 0
    }

    /// Absolute pitch in semitones (C3 = 36), `None` for rests.
    pub fn absolute_pitch(&self) -> Option<i32> {
        if self.is_rest() {
            None
        } else {
            Some(self.octave as i32 * 12 + self.pitch_class as i32 - 1)
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        Self::new(self.octave, self.pitch_class, self.duration).map(|_| ())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_rest() {
            write!(f, "R({})", self.duration)
        } else {
            let name = PITCH_NAMES[(self.pitch_class - 1) as usize];
            write!(f, "{}{}({})", name, self.octave, self.duration)
        }
    }
}

/// One candidate phrase: an ordered sequence of notes in performance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Melody {
    notes: Vec<Note>,
}

impl Melody {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Boundary constructor for externally supplied `(octave, pitch_class,
    /// duration)` triples; rejects invalid values before they reach any
    /// operator.
    pub fn from_triples(triples: &[(i8, u8, f64)]) -> Result<Self> {
        let notes = triples
            .iter()
            .map(|&(octave, pitch_class, duration)| Note::new(octave, pitch_class, duration))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { notes })
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn total_duration(&self) -> f64 {
        self.notes.iter().map(|n| n.duration()).sum()
    }

    /// Absolute pitches of the sounded notes, in performance order.
    pub fn sounded_pitches(&self) -> Vec<i32> {
        self.notes.iter().filter_map(|n| n.absolute_pitch()).collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.notes.is_empty() {
            return Err(CantusError::Degenerate("melody has no notes".to_string()));
        }
        for note in &self.notes {
            note.validate()?;
        }
        Ok(())
    }
}

impl fmt::Display for Melody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for note in &self.notes {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", note)?;
            first = false;
        }
        Ok(())
    }
}

/// A melody paired with its fitness, as ranked within one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMelody {
    pub melody: Melody,
    pub fitness: f64,
}

/// Per-generation statistic, appended once and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessRecord {
    pub generation: usize,
    pub best: f64,
    pub mean: f64,
}

/// Final result of a run: the last scored population, sorted descending by
/// fitness, plus the gap-free record sequence for generations
/// `0..generations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionOutcome {
    population: Vec<ScoredMelody>,
    records: Vec<FitnessRecord>,
}

impl EvolutionOutcome {
    pub(crate) fn new(population: Vec<ScoredMelody>, records: Vec<FitnessRecord>) -> Self {
        Self {
            population,
            records,
        }
    }

    pub fn population(&self) -> &[ScoredMelody] {
        &self.population
    }

    pub fn records(&self) -> &[FitnessRecord] {
        &self.records
    }

    pub fn best(&self) -> &ScoredMelody {
        &self.population[0]
    }

    pub fn top(&self, n: usize) -> &[ScoredMelody] {
        &self.population[..n.min(self.population.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_rejects_invalid_fields() {
        assert!(Note::new(4, 13, 1.0).is_err());
        assert!(Note::new(6, 1, 1.0).is_err());
        assert!(Note::new(2, 1, 1.0).is_err());
        assert!(Note::new(4, 1, 0.0).is_err());
        assert!(Note::new(4, 1, -1.0).is_err());
        assert!(Note::new(4, 1, f64::NAN).is_err());
        assert!(Note::new(4, 1, 1.0).is_ok());
        assert!(Note::rest(0.5).is_ok());
    }

    #[test]
    fn absolute_pitch_round_trips() {
        let note = Note::new(4, 1, 1.0).unwrap();
        assert_eq!(note.absolute_pitch(), Some(48));
        let back = Note::from_absolute_pitch(48, 1.0);
        assert_eq!(back, note);
        assert_eq!(Note::rest(1.0).unwrap().absolute_pitch(), None);
    }

    #[test]
    fn from_absolute_pitch_clamps_to_window() {
        assert_eq!(
            Note::from_absolute_pitch(30, 1.0).absolute_pitch(),
            Some(PITCH_FLOOR)
        );
        assert_eq!(
            Note::from_absolute_pitch(90, 1.0).absolute_pitch(),
            Some(PITCH_CEILING)
        );
    }

    #[test]
    fn melody_from_triples_validates_at_boundary() {
        assert!(Melody::from_triples(&[(4, 1, 1.0), (4, 13, 1.0)]).is_err());
        let melody = Melody::from_triples(&[(4, 1, 1.0), (4, 0, 0.5)]).unwrap();
        assert_eq!(melody.len(), 2);
        assert!((melody.total_duration() - 1.5).abs() < DURATION_EPSILON);
        assert_eq!(melody.sounded_pitches(), vec![48]);
    }
}
