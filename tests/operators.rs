use cantus::engines::generation::operators::{
    crossover, inversion, mutate, normalize_length, random_melody, retrograde, transpose,
};
use cantus::{Melody, Note};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn note(octave: i8, pitch_class: u8, duration: f64) -> Note {
    Note::new(octave, pitch_class, duration).unwrap()
}

fn rest(duration: f64) -> Note {
    Note::rest(duration).unwrap()
}

#[test]
fn retrograde_is_an_involution() {
    let melody = Melody::new(vec![
        note(4, 1, 1.0),
        rest(0.5),
        note(4, 5, 2.0),
        note(5, 3, 0.5),
    ]);
    assert_eq!(retrograde(&retrograde(&melody)), melody);
}

#[test]
fn retrograde_reverses_notes_whole() {
    let melody = Melody::new(vec![note(4, 1, 1.0), note(4, 8, 2.0)]);
    let reversed = retrograde(&melody);
    assert_eq!(reversed.notes()[0], note(4, 8, 2.0));
    assert_eq!(reversed.notes()[1], note(4, 1, 1.0));
}

#[test]
fn inversion_negates_distances_around_first_sounded_pitch() {
    // C4, E4, rest, G3: pivot is C4 (48)
    let melody = Melody::new(vec![
        note(4, 1, 1.0),
        note(4, 5, 1.0),
        rest(0.5),
        note(3, 8, 2.0),
    ]);
    let inverted = inversion(&melody);

    assert_eq!(inverted.sounded_pitches(), vec![48, 44, 53]);
    assert!(inverted.notes()[2].is_rest());
    assert_eq!(inverted.notes()[2].duration(), 0.5);
    for (a, b) in melody.notes().iter().zip(inverted.notes()) {
        assert_eq!(a.duration(), b.duration());
    }
}

#[test]
fn inversion_of_all_rests_is_identity() {
    let melody = Melody::new(vec![rest(1.0), rest(2.0)]);
    assert_eq!(inversion(&melody), melody);
}

#[test]
fn transpose_shifts_sounded_pitches_and_skips_rests() {
    let melody = Melody::new(vec![note(4, 1, 1.0), rest(1.0), note(4, 8, 1.0)]);
    let shifted = transpose(&melody, 2);
    assert_eq!(shifted.sounded_pitches(), vec![50, 57]);
    assert!(shifted.notes()[1].is_rest());
}

#[test]
fn transpose_clamps_at_the_representable_window() {
    // B5 is the ceiling; C3 is the floor.
    let melody = Melody::new(vec![note(5, 12, 1.0), note(3, 1, 1.0)]);
    let up = transpose(&melody, 5);
    assert_eq!(up.sounded_pitches(), vec![71, 41]);
    let down = transpose(&melody, -5);
    assert_eq!(down.sounded_pitches(), vec![66, 36]);
}

#[test]
fn crossover_produces_valid_normalized_offspring() {
    let mut rng = StdRng::seed_from_u64(47);
    let parent1 = random_melody(16.0, &mut rng);
    let parent2 = random_melody(16.0, &mut rng);

    for _ in 0..50 {
        let child = normalize_length(&crossover(&parent1, &parent2, &mut rng), 16.0);
        child.validate().unwrap();
        assert!((child.total_duration() - 16.0).abs() < 1e-6);
    }
}

#[test]
fn crossover_with_single_note_parent_clones_first_parent() {
    let mut rng = StdRng::seed_from_u64(1);
    let short = Melody::new(vec![note(4, 1, 16.0)]);
    let long = Melody::new(vec![note(4, 3, 8.0), note(4, 5, 8.0)]);
    assert_eq!(crossover(&short, &long, &mut rng), short);
    assert_eq!(crossover(&long, &short, &mut rng), long);
}

#[test]
fn mutation_never_changes_note_count() {
    let mut rng = StdRng::seed_from_u64(47);
    let melody = random_melody(16.0, &mut rng);
    for _ in 0..20 {
        let mutated = mutate(&melody, 1.0, &mut rng);
        assert_eq!(mutated.len(), melody.len());
        mutated.validate().unwrap();
    }
}

#[test]
fn normalization_shrinks_by_dropping_and_shortening_the_tail() {
    let melody = Melody::new(vec![
        note(4, 1, 4.0),
        note(4, 3, 4.0),
        note(4, 5, 4.0),
        note(4, 6, 2.0),
        note(4, 8, 4.0),
        note(4, 10, 2.0),
    ]);
    assert_eq!(melody.total_duration(), 20.0);

    let adjusted = normalize_length(&melody, 16.0);
    assert!((adjusted.total_duration() - 16.0).abs() < 1e-6);
    // First four notes untouched, fifth shortened, sixth dropped.
    assert_eq!(adjusted.len(), 5);
    assert_eq!(&adjusted.notes()[..4], &melody.notes()[..4]);
    assert_eq!(adjusted.notes()[4], note(4, 8, 2.0));
}

#[test]
fn normalization_grows_by_extending_the_final_pitch() {
    let melody = Melody::new(vec![note(4, 1, 4.0), note(4, 5, 4.0), note(4, 8, 4.0)]);
    assert_eq!(melody.total_duration(), 12.0);

    let adjusted = normalize_length(&melody, 16.0);
    assert!((adjusted.total_duration() - 16.0).abs() < 1e-6);
    assert_eq!(adjusted.len(), 4);
    assert_eq!(&adjusted.notes()[..3], melody.notes());
    assert_eq!(adjusted.notes()[3], note(4, 8, 4.0));
}

#[test]
fn normalization_is_idempotent() {
    let melody = Melody::new(vec![note(4, 1, 10.0), note(4, 5, 6.0)]);
    let once = normalize_length(&melody, 16.0);
    assert_eq!(once, melody);

    let long = Melody::new(vec![note(4, 1, 12.0), note(4, 5, 6.0)]);
    let adjusted = normalize_length(&long, 16.0);
    assert_eq!(normalize_length(&adjusted, 16.0), adjusted);
}

#[test]
fn normalization_never_drops_below_one_note() {
    let melody = Melody::new(vec![note(4, 1, 20.0)]);
    let adjusted = normalize_length(&melody, 16.0);
    assert_eq!(adjusted.len(), 1);
    assert_eq!(adjusted.notes()[0], note(4, 1, 16.0));
}

#[test]
fn random_melody_fills_the_target_exactly() {
    let mut rng = StdRng::seed_from_u64(47);
    for _ in 0..20 {
        let melody = random_melody(16.0, &mut rng);
        melody.validate().unwrap();
        assert!((melody.total_duration() - 16.0).abs() < 1e-6);
    }
}
