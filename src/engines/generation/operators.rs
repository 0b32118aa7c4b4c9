use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Melody, Note, ScoredMelody, DURATION_EPSILON, DURATION_GRID};

/// Sounded window used when generating fresh material: F3..G5, comfortably
/// inside the representable C3..B5 range.
const GENERATED_PITCH_LOW: i32 = 41;
const GENERATED_PITCH_HIGH: i32 = 67;

const REST_PROBABILITY: f64 = 0.1;

/// Tournament selection: best of K random candidates. The population is
/// already sorted, but selection only looks at fitness, never position.
pub fn tournament_selection<'a, R: Rng>(
    population: &'a [ScoredMelody],
    tournament_size: usize,
    rng: &mut R,
) -> &'a Melody {
    let mut best_idx = rng.gen_range(0..population.len());
    let mut best_fitness = population[best_idx].fitness;

    for _ in 1..tournament_size {
        let idx = rng.gen_range(0..population.len());
        if population[idx].fitness > best_fitness {
            best_idx = idx;
            best_fitness = population[idx].fitness;
        }
    }

    &population[best_idx].melody
}

/// Single-point crossover: a prefix of the first parent spliced onto a
/// suffix of the second. Cut points keep both halves non-empty; a parent
/// too short to cut yields a clone of the first parent instead. The child
/// is not length-normalized here.
pub fn crossover<R: Rng>(parent1: &Melody, parent2: &Melody, rng: &mut R) -> Melody {
    if parent1.len() < 2 || parent2.len() < 2 {
        return parent1.clone();
    }

    let cut1 = rng.gen_range(1..parent1.len());
    let cut2 = rng.gen_range(1..parent2.len());

    let mut notes = parent1.notes()[..cut1].to_vec();
    notes.extend_from_slice(&parent2.notes()[cut2..]);
    Melody::new(notes)
}

/// Per-note mutation: with probability `mutation_rate` each note is either
/// nudged in pitch, moved an octave, snapped to a neighboring duration, or
/// toggled to/from a rest. Note count never changes.
pub fn mutate<R: Rng>(melody: &Melody, mutation_rate: f64, rng: &mut R) -> Melody {
    let notes = melody
        .notes()
        .iter()
        .map(|note| {
            if rng.gen::<f64>() < mutation_rate {
                mutate_note(*note, rng)
            } else {
                *note
            }
        })
        .collect();
    Melody::new(notes)
}

fn mutate_note<R: Rng>(note: Note, rng: &mut R) -> Note {
    match rng.gen_range(0..4u8) {
        0 => match note.absolute_pitch() {
            Some(pitch) => {
                let mut delta = 0;
                while delta == 0 {
                    delta = rng.gen_range(-2..=2);
                }
                Note::from_absolute_pitch(pitch + delta, note.duration())
            }
            None => note,
        },
        1 => match note.absolute_pitch() {
            Some(pitch) => {
                let delta = if rng.gen::<bool>() { 12 } else { -12 };
                Note::from_absolute_pitch(pitch + delta, note.duration())
            }
            None => note,
        },
        2 => {
            let nearest = DURATION_GRID
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    (*a - note.duration())
                        .abs()
                        .partial_cmp(&(*b - note.duration()).abs())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .map(|(i, _)| i)
                .unwrap_or(0);
            let neighbor = if nearest == 0 {
                1
            } else if nearest == DURATION_GRID.len() - 1 {
                nearest - 1
            } else if rng.gen::<bool>() {
                nearest + 1
            } else {
                nearest - 1
            };
            note.with_duration(DURATION_GRID[neighbor])
        }
        _ => {
            if note.is_rest() {
                let pitch = rng.gen_range(GENERATED_PITCH_LOW..=GENERATED_PITCH_HIGH);
                Note::from_absolute_pitch(pitch, note.duration())
            } else {
                note.to_rest()
            }
        }
    }
}

/// Shifts every sounded pitch by `semitones`, clamping into the
/// representable window. Rests and durations are untouched.
pub fn transpose(melody: &Melody, semitones: i32) -> Melody {
    let notes = melody
        .notes()
        .iter()
        .map(|note| match note.absolute_pitch() {
            Some(pitch) => Note::from_absolute_pitch(pitch + semitones, note.duration()),
            None => *note,
        })
        .collect();
    Melody::new(notes)
}

/// Reflects every sounded pitch around the first sounded pitch. Rests pass
/// through in place; durations are untouched. A melody with no sounded
/// notes comes back unchanged.
pub fn inversion(melody: &Melody) -> Melody {
    let pivot = match melody.notes().iter().find_map(|n| n.absolute_pitch()) {
        Some(pitch) => pitch,
        None => return melody.clone(),
    };
    let notes = melody
        .notes()
        .iter()
        .map(|note| match note.absolute_pitch() {
            Some(pitch) => Note::from_absolute_pitch(2 * pivot - pitch, note.duration()),
            None => *note,
        })
        .collect();
    Melody::new(notes)
}

/// Reverses note order; each note travels whole, pitch with duration.
pub fn retrograde(melody: &Melody) -> Melody {
    let mut notes = melody.notes().to_vec();
    notes.reverse();
    Melody::new(notes)
}

/// Brings `total_duration` to `target` exactly. Overshoot drops trailing
/// notes and shortens the last retained one, never going below a single
/// note; undershoot extends the final pitch with one note covering the
/// deficit. A melody already at the target is returned as-is, so the
/// operation is idempotent.
pub fn normalize_length(melody: &Melody, target: f64) -> Melody {
    let total = melody.total_duration();
    if (total - target).abs() <= DURATION_EPSILON {
        return melody.clone();
    }

    let mut notes = melody.notes().to_vec();

    if total > target {
        let mut excess = total - target;
        while excess > DURATION_EPSILON {
            let last = notes[notes.len() - 1];
            if notes.len() > 1 && last.duration() <= excess + DURATION_EPSILON {
                notes.pop();
                excess -= last.duration();
            } else {
                let idx = notes.len() - 1;
                notes[idx] = last.with_duration(last.duration() - excess);
                break;
            }
        }
    } else {
        let deficit = target - total;
        match notes.last().copied() {
            Some(last) => notes.push(last.with_duration(deficit)),
            None => notes.push(Note::rest_with_duration(target)),
        }
    }

    Melody::new(notes)
}

/// Random phrase on the duration grid, filling `target` quarter-note units
/// exactly. Used to seed initial populations.
pub fn random_melody<R: Rng>(target: f64, rng: &mut R) -> Melody {
    let mut notes = Vec::new();
    let mut remaining = target;
    while remaining > DURATION_EPSILON {
        let fitting: Vec<f64> = DURATION_GRID
            .iter()
            .copied()
            .filter(|d| *d <= remaining + DURATION_EPSILON)
            .collect();
        let duration = match fitting.choose(rng) {
            Some(d) => *d,
            None => remaining,
        };
        let note = if rng.gen::<f64>() < REST_PROBABILITY {
            Note::rest_with_duration(duration)
        } else {
            let pitch = rng.gen_range(GENERATED_PITCH_LOW..=GENERATED_PITCH_HIGH);
            Note::from_absolute_pitch(pitch, duration)
        };
        remaining -= note.duration();
        notes.push(note);
    }
    Melody::new(notes)
}

pub fn random_population<R: Rng>(size: usize, target: f64, rng: &mut R) -> Vec<Melody> {
    (0..size).map(|_| random_melody(target, rng)).collect()
}
