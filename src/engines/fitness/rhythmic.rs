use std::collections::{HashMap, HashSet};

use crate::types::{Melody, DURATION_EPSILON};

/// Duration- and beat-grid-based sub-metrics. All values are in [0, 1].
pub struct RhythmMetrics;

impl RhythmMetrics {
    pub fn calculate(melody: &Melody) -> HashMap<String, f64> {
        let mut metrics = HashMap::new();
        metrics.insert("rhythm_variety".to_string(), Self::rhythm_variety(melody));
        metrics.insert("note_density".to_string(), Self::note_density(melody));
        metrics.insert("metric_accent".to_string(), Self::metric_accent(melody));
        metrics
    }

    /// Duration keyed on a sixteenth-note grid so that near-equal floats
    /// bucket together.
    fn duration_key(duration: f64) -> i64 {
        (duration * 4.0).round() as i64
    }

    /// Distinct duration values; three or four read as varied without being
    /// fragmented.
    pub fn rhythm_variety(melody: &Melody) -> f64 {
        let distinct: HashSet<i64> = melody
            .notes()
            .iter()
            .map(|n| Self::duration_key(n.duration()))
            .collect();
        match distinct.len() {
            0 => 0.0,
            1 => 0.3,
            2 => 0.7,
            3 | 4 => 1.0,
            _ => 0.8,
        }
    }

    /// Notes per quarter-note unit; the target band is 0.5 to 1.5.
    pub fn note_density(melody: &Melody) -> f64 {
        let total = melody.total_duration();
        if melody.is_empty() || total <= 0.0 {
            return 0.0;
        }
        let density = melody.len() as f64 / total;
        if (0.5..=1.5).contains(&density) {
            1.0
        } else if density < 0.5 {
            density / 0.5
        } else {
            (1.0 - (density - 1.5) * 0.5).max(0.0)
        }
    }

    /// Fraction of long notes (half note or longer) whose onset lands on
    /// beat 1 or beat 3 of the 4/4 grid. Neutral when there are no long
    /// notes to judge.
    pub fn metric_accent(melody: &Melody) -> f64 {
        let mut onset = 0.0f64;
        let mut long_notes = 0usize;
        let mut aligned = 0usize;
        for note in melody.notes() {
            if note.duration() >= 2.0 - DURATION_EPSILON {
                long_notes += 1;
                let beat = onset.rem_euclid(4.0);
                if beat.min((beat - 2.0).abs()) < DURATION_EPSILON {
                    aligned += 1;
                }
            }
            onset += note.duration();
        }
        if long_notes == 0 {
            0.5
        } else {
            aligned as f64 / long_notes as f64
        }
    }
}
