use std::path::PathBuf;

/// Locations of the files backing a persisted repository.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_path: PathBuf,
}

impl Config {
    pub fn db_path(&self) -> PathBuf {
        self.base_path.join("lexicon.redb")
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_path.join("config.toml")
    }
}
