use std::collections::HashMap;

use crate::types::{Melody, DURATION_EPSILON};

const MAJOR_SCALE: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
const PENTATONIC_SCALE: [u8; 5] = [0, 2, 4, 7, 9];

/// Pitch-content sub-metrics: implied scale, implied harmony, cadence and
/// pitch-class spread. All values are in [0, 1].
pub struct TonalMetrics;

impl TonalMetrics {
    pub fn calculate(melody: &Melody) -> HashMap<String, f64> {
        let mut metrics = HashMap::new();
        metrics.insert(
            "scale_membership".to_string(),
            Self::scale_membership(melody),
        );
        metrics.insert("chord_outline".to_string(), Self::chord_outline(melody));
        metrics.insert("cadence".to_string(), Self::cadence(melody));
        metrics.insert(
            "pitch_class_entropy".to_string(),
            Self::pitch_class_entropy(melody),
        );
        metrics
    }

    /// Sounded pitch classes folded to 0..12, in performance order.
    fn pitch_classes(melody: &Melody) -> Vec<u8> {
        melody
            .sounded_pitches()
            .iter()
            .map(|p| (p.rem_euclid(12)) as u8)
            .collect()
    }

    fn scale_fit(pitch_classes: &[u8], root: u8, scale: &[u8]) -> f64 {
        let members = pitch_classes
            .iter()
            .filter(|pc| scale.contains(&((**pc + 12 - root) % 12)))
            .count();
        members as f64 / pitch_classes.len() as f64
    }

    /// Root whose major scale covers the most sounded pitches; ties go to
    /// the lowest root so the choice is deterministic.
    pub fn best_root(melody: &Melody) -> Option<u8> {
        let pcs = Self::pitch_classes(melody);
        if pcs.is_empty() {
            return None;
        }
        (0..12u8).max_by(|a, b| {
            Self::scale_fit(&pcs, *a, &MAJOR_SCALE)
                .partial_cmp(&Self::scale_fit(&pcs, *b, &MAJOR_SCALE))
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(b.cmp(a))
        })
    }

    /// Best diatonic or pentatonic fit over all twelve roots. Pentatonic
    /// content gets a 1.2x preference, capped at 1.
    pub fn scale_membership(melody: &Melody) -> f64 {
        let pcs = Self::pitch_classes(melody);
        if pcs.is_empty() {
            return 0.0;
        }
        let mut best = 0.0f64;
        for root in 0..12u8 {
            let major = Self::scale_fit(&pcs, root, &MAJOR_SCALE);
            let pentatonic = Self::scale_fit(&pcs, root, &PENTATONIC_SCALE);
            best = best.max(major.max(pentatonic * 1.2));
        }
        best.min(1.0)
    }

    /// Best major or minor triad coverage over all twelve roots: a fully
    /// outlined triad scores 1, two of three tones 0.7.
    pub fn chord_outline(melody: &Melody) -> f64 {
        let pcs = Self::pitch_classes(melody);
        if pcs.len() < 3 {
            return 0.5;
        }
        let present: Vec<bool> = (0..12u8).map(|pc| pcs.contains(&pc)).collect();
        let mut best = 0.5f64;
        for root in 0..12u8 {
            for third in [3u8, 4u8] {
                let tones = [root, (root + third) % 12, (root + 7) % 12];
                let matched = tones.iter().filter(|t| present[**t as usize]).count();
                if matched == 3 {
                    best = best.max(1.0);
                } else if matched == 2 {
                    best = best.max(0.7);
                }
            }
        }
        best
    }

    /// Resolution of the final sounded note toward the implied tonic, with
    /// a bonus for a long closing duration.
    pub fn cadence(melody: &Melody) -> f64 {
        let last = match melody.notes().iter().rev().find(|n| !n.is_rest()) {
            Some(note) => note,
            None => return 0.0,
        };
        let root = match Self::best_root(melody) {
            Some(root) => root,
            None => return 0.0,
        };
        let pc = match last.absolute_pitch() {
            Some(pitch) => pitch.rem_euclid(12) as u8,
            None => return 0.0,
        };
        let base: f64 = if pc == root {
            0.8
        } else if pc == (root + 7) % 12 {
            0.6
        } else {
            0.3
        };
        let bonus = if last.duration() >= 2.0 - DURATION_EPSILON {
            0.2
        } else {
            0.0
        };
        (base + bonus).min(1.0)
    }

    /// Shannon entropy of the sounded pitch-class distribution. Zero
    /// entropy (one repeated pitch) scores zero; a moderate spread scores
    /// full; an almost uniform chromatic spread is capped.
    pub fn pitch_class_entropy(melody: &Melody) -> f64 {
        let pcs = Self::pitch_classes(melody);
        if pcs.is_empty() {
            return 0.0;
        }
        let mut counts = [0usize; 12];
        for pc in &pcs {
            counts[*pc as usize] += 1;
        }
        let total = pcs.len() as f64;
        let entropy: f64 = counts
            .iter()
            .filter(|&&c| c > 0)
            .map(|&c| {
                let p = c as f64 / total;
                -p * p.log2()
            })
            .sum();
        if (1.5..=2.5).contains(&entropy) {
            1.0
        } else if entropy < 1.5 {
            entropy / 1.5
        } else {
            (1.0 - (entropy - 2.5) * 0.4).max(0.5)
        }
    }
}
