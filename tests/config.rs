use cantus::ConfigManager;
use std::fs;
use std::path::PathBuf;

fn temp_config_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("cantus_{}_{}.toml", name, std::process::id()))
}

#[test]
fn config_survives_a_save_load_round_trip() {
    let manager = ConfigManager::new();
    manager
        .update(|config| {
            config.evolution.population_size = 30;
            config.evolution.generations = 40;
            config.evolution.seed = 99;
            config.fitness.cadence = 2.5;
            config.fitness.motif_repetition = 0.0;
        })
        .unwrap();

    let path = temp_config_path("round_trip");
    manager.save_to_file(&path).unwrap();

    let loaded = ConfigManager::new();
    loaded.load_from_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(loaded.get(), manager.get());
}

#[test]
fn loading_rejects_an_invalid_elite_size() {
    let manager = ConfigManager::new();
    let path = temp_config_path("invalid_elite");
    manager.save_to_file(&path).unwrap();

    // Push elite_size past population_size in the serialized file; the
    // defaults are 2 and 20.
    let contents = fs::read_to_string(&path).unwrap();
    let tampered = contents.replace("elite_size = 2", "elite_size = 20");
    assert_ne!(tampered, contents);
    fs::write(&path, tampered).unwrap();

    let result = manager.load_from_file(&path);
    fs::remove_file(&path).ok();
    assert!(matches!(result, Err(cantus::CantusError::Configuration(_))));
}

#[test]
fn loading_rejects_unparseable_toml() {
    let path = temp_config_path("garbage");
    fs::write(&path, "not valid toml [[[").unwrap();

    let result = ConfigManager::new().load_from_file(&path);
    fs::remove_file(&path).ok();
    assert!(matches!(result, Err(cantus::CantusError::Configuration(_))));
}

#[test]
fn update_rejects_an_invalid_mutation_rate() {
    let manager = ConfigManager::new();
    let result = manager.update(|config| config.evolution.mutation_rate = 1.5);
    assert!(matches!(result, Err(cantus::CantusError::Configuration(_))));
}
