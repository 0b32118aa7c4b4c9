use std::collections::HashMap;

use crate::types::Melody;

/// Interval-based sub-metrics: contour, leap discipline and motif
/// structure. All values are in [0, 1].
pub struct MelodicMetrics;

impl MelodicMetrics {
    pub fn calculate(melody: &Melody) -> HashMap<String, f64> {
        let mut metrics = HashMap::new();
        metrics.insert("pitch_range".to_string(), Self::pitch_range(melody));
        metrics.insert("smoothness".to_string(), Self::smoothness(melody));
        metrics.insert("leap_penalty".to_string(), Self::leap_penalty(melody));
        metrics.insert(
            "octave_leap_penalty".to_string(),
            Self::octave_leap_penalty(melody),
        );
        metrics.insert(
            "repeated_note_penalty".to_string(),
            Self::repeated_note_penalty(melody),
        );
        metrics.insert(
            "motif_repetition".to_string(),
            Self::motif_repetition(melody),
        );
        metrics
    }

    /// Signed intervals between successive sounded pitches, rests skipped.
    fn intervals(melody: &Melody) -> Vec<i32> {
        melody
            .sounded_pitches()
            .windows(2)
            .map(|w| w[1] - w[0])
            .collect()
    }

    /// Distinct sounded pitches; the comfortable window is 8 to 15.
    pub fn pitch_range(melody: &Melody) -> f64 {
        let mut pitches = melody.sounded_pitches();
        pitches.sort_unstable();
        pitches.dedup();
        let count = pitches.len();
        if count == 0 {
            return 0.0;
        }
        if (8..=15).contains(&count) {
            1.0
        } else if count < 8 {
            count as f64 / 8.0
        } else {
            (1.0 - (count - 15) as f64 * 0.05).max(0.0)
        }
    }

    /// Ratio of stepwise motion (1-2 semitones) to all motion. A drone
    /// (no motion at all) and leap-only writing both land near zero.
    pub fn smoothness(melody: &Melody) -> f64 {
        let intervals = Self::intervals(melody);
        if intervals.is_empty() {
            return 0.0;
        }
        let steps = intervals
            .iter()
            .filter(|iv| (1..=2).contains(&iv.abs()))
            .count();
        let ratio = steps as f64 / intervals.len() as f64;
        if (0.6..=0.8).contains(&ratio) {
            1.0
        } else if (0.4..0.6).contains(&ratio) || (0.8..=0.9).contains(&ratio) {
            0.8
        } else if ratio > 0.9 {
            0.6
        } else {
            ratio
        }
    }

    /// Penalizes intervals wider than a perfect fifth, in proportion to the
    /// overshoot.
    pub fn leap_penalty(melody: &Melody) -> f64 {
        let intervals = Self::intervals(melody);
        if intervals.is_empty() {
            return 1.0;
        }
        let penalty: f64 = intervals
            .iter()
            .map(|iv| iv.abs())
            .filter(|&iv| iv > 7)
            .map(|iv| (iv - 7) as f64 * 0.05)
            .sum();
        (1.0 - penalty).max(0.0)
    }

    /// Penalizes each interval wider than an octave.
    pub fn octave_leap_penalty(melody: &Melody) -> f64 {
        let intervals = Self::intervals(melody);
        if intervals.is_empty() {
            return 1.0;
        }
        let count = intervals.iter().filter(|iv| iv.abs() > 12).count();
        (1.0 - count as f64 * 0.3).max(0.0)
    }

    /// Penalizes immediately repeated sounded pitches.
    pub fn repeated_note_penalty(melody: &Melody) -> f64 {
        let notes = melody.notes();
        if notes.len() < 2 {
            return 1.0;
        }
        let repeats = notes
            .windows(2)
            .filter(|w| {
                matches!(
                    (w[0].absolute_pitch(), w[1].absolute_pitch()),
                    (Some(a), Some(b)) if a == b
                )
            })
            .count();
        (1.0 - repeats as f64 * 0.15).max(0.0)
    }

    /// Looks for a repeated interval sub-sequence (a motif of 2 to 4 notes).
    /// Exactly two occurrences read as deliberate structure and score
    /// highest; heavy repetition reads as mechanical and scores lower.
    pub fn motif_repetition(melody: &Melody) -> f64 {
        let pitches = melody.sounded_pitches();
        if pitches.len() < 3 {
            return 0.5;
        }
        let intervals: Vec<i32> = pitches.windows(2).map(|w| w[1] - w[0]).collect();
        let mut max_repeats = 0usize;
        for motif_len in 1..=3usize {
            if intervals.len() < motif_len {
                continue;
            }
            let mut counts: HashMap<&[i32], usize> = HashMap::new();
            for motif in intervals.windows(motif_len) {
                *counts.entry(motif).or_insert(0) += 1;
            }
            if let Some(&max) = counts.values().max() {
                max_repeats = max_repeats.max(max);
            }
        }
        match max_repeats {
            2 => 1.0,
            3 => 0.9,
            n if n >= 4 => 0.7,
            _ => 0.5,
        }
    }
}
