//! Startup configuration read from the environment.
use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "animal-scramble";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub store_path: PathBuf,
    pub log_dir: PathBuf,
    pub seed: Option<u64>,
    pub script: Option<PathBuf>,
}

impl GameConfig {
    /// Environment variables:
    /// - `SCRAMBLE_STORE_PATH` - JSON file holding the high score
    /// - `SCRAMBLE_LOG_DIR` - Directory for `scramble.log`
    /// - `SCRAMBLE_SEED` - Fixed seed for round generation (default: entropy)
    /// - `SCRAMBLE_SCRIPT` - Scripted input file replayed instead of the keyboard
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let home = lookup("HOME").map(PathBuf::from);
        let data_dir = lookup("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| home.as_ref().map(|home| home.join(".local").join("share")))
            .unwrap_or_else(|| PathBuf::from("."));
        let cache_dir = lookup("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .or_else(|| home.as_ref().map(|home| home.join(".cache")))
            .unwrap_or_else(|| PathBuf::from("."));

        let seed = lookup("SCRAMBLE_SEED").and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(err) => {
                tracing::warn!(value = %raw, "ignoring SCRAMBLE_SEED: {err}");
                None
            }
        });

        Self {
            store_path: lookup("SCRAMBLE_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| data_dir.join(APP_DIR).join("store.json")),
            log_dir: lookup("SCRAMBLE_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| cache_dir.join(APP_DIR).join("logs")),
            seed,
            script: lookup("SCRAMBLE_SCRIPT").map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> GameConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GameConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_follow_home_directory() {
        let config = config(&[("HOME", "/home/ada")]);
        assert_eq!(
            config.store_path,
            PathBuf::from("/home/ada/.local/share/animal-scramble/store.json")
        );
        assert_eq!(
            config.log_dir,
            PathBuf::from("/home/ada/.cache/animal-scramble/logs")
        );
        assert_eq!(config.seed, None);
        assert_eq!(config.script, None);
    }

    #[test]
    fn xdg_directories_take_precedence() {
        let config = config(&[
            ("HOME", "/home/ada"),
            ("XDG_DATA_HOME", "/data"),
            ("XDG_CACHE_HOME", "/cache"),
        ]);
        assert_eq!(
            config.store_path,
            PathBuf::from("/data/animal-scramble/store.json")
        );
        assert_eq!(config.log_dir, PathBuf::from("/cache/animal-scramble/logs"));
    }

    #[test]
    fn explicit_overrides() {
        let config = config(&[
            ("SCRAMBLE_STORE_PATH", "/tmp/scores.json"),
            ("SCRAMBLE_LOG_DIR", "/tmp/logs"),
            ("SCRAMBLE_SEED", " 42 "),
            ("SCRAMBLE_SCRIPT", "demo.txt"),
        ]);
        assert_eq!(config.store_path, PathBuf::from("/tmp/scores.json"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.script, Some(PathBuf::from("demo.txt")));
    }

    #[test]
    fn bad_seed_is_ignored() {
        assert_eq!(config(&[("SCRAMBLE_SEED", "forty")]).seed, None);
    }

    #[test]
    fn no_home_falls_back_to_working_directory() {
        let config = config(&[]);
        assert_eq!(
            config.store_path,
            PathBuf::from("./animal-scramble/store.json")
        );
    }
}
