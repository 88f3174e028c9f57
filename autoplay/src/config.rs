use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use match3::GameConfig;

/// Reads a [`GameConfig`] from a JSON file and validates it.
pub fn load_config(path: &Path) -> anyhow::Result<GameConfig> {
    let file = File::open(path)
        .with_context(|| format!("Could not open config file '{}'", path.display()))?;
    let config: GameConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Could not parse config file '{}'", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Command line values that take precedence over the config file.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigOverrides {
    pub size: Option<usize>,
    pub kind_count: Option<u8>,
    pub cascade_limit: Option<usize>,
}

impl ConfigOverrides {
    pub fn apply(self, mut config: GameConfig) -> anyhow::Result<GameConfig> {
        if let Some(size) = self.size {
            config.size = size;
        }
        if let Some(kind_count) = self.kind_count {
            config.kind_count = kind_count;
        }
        if self.cascade_limit.is_some() {
            config.cascade_limit = self.cascade_limit;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}_{}.json", name, std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn partial_config_gets_defaults() {
        let path = write_temp("match3_partial_config", r#"{ "size": 6 }"#);
        let config = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.size, 6);
        assert_eq!(config.kind_count, 6);
        assert_eq!(config.cascade_limit, None);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let path = write_temp("match3_invalid_config", r#"{ "kind_count": 0 }"#);
        let result = load_config(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_config(Path::new("/does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("/does/not/exist.json"));
    }

    #[test]
    fn overrides_win() {
        let overrides = ConfigOverrides {
            size: Some(5),
            kind_count: None,
            cascade_limit: Some(3),
        };
        let config = overrides.apply(GameConfig::default()).unwrap();
        assert_eq!(
            config,
            GameConfig {
                size: 5,
                kind_count: 6,
                cascade_limit: Some(3)
            }
        );
        let too_big = ConfigOverrides {
            size: Some(100),
            ..ConfigOverrides::default()
        };
        assert!(too_big.apply(GameConfig::default()).is_err());
    }
}
