use super::*;
use tempfile::TempDir;

#[test]
fn test_load_missing_file_returns_default() {
    let temp = TempDir::new().unwrap();
    let config = RepositoryConfig::load(&temp.path().join("config.toml")).unwrap();

    assert_eq!(config, RepositoryConfig::default());
    assert!(config.repository.can_query);
    assert!(config.matcher.normalize);
}

#[test]
fn test_save_then_load() {
    let temp = TempDir::new().unwrap();
    let paths = Config {
        base_path: temp.path().to_path_buf(),
    };

    let mut config = RepositoryConfig::default();
    config.repository.can_query = false;
    config.matcher.max_distance = 3;
    config.save(&paths.config_path()).unwrap();

    let loaded = RepositoryConfig::load(&paths.config_path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_fills_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[matcher]\nmax_distance = 4\n").unwrap();

    let config = RepositoryConfig::load(&path).unwrap();

    assert_eq!(config.matcher.max_distance, 4);
    assert!(config.matcher.normalize);
    assert!(config.repository.can_query);
}

#[test]
fn test_malformed_file_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "[matcher\n").unwrap();

    assert!(matches!(
        RepositoryConfig::load(&path),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_validate_zero_ceiling() {
    let mut config = RepositoryConfig::default();
    assert!(config.validate().is_empty());

    config.matcher.max_distance = 0;
    assert_eq!(config.validate().len(), 1);

    let fixed = config.with_defaults_for_invalid();
    assert!(fixed.validate().is_empty());
    assert_eq!(
        fixed.matcher.max_distance,
        lexicon_search::DEFAULT_MAX_DISTANCE
    );
}
