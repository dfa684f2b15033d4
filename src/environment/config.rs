//! Environment configuration.

use serde::{Deserialize, Serialize};

use crate::errors::{EnvError, EnvResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Color the environment acts for: 0 = first player, 1 = second player.
    pub self_color: i32,
    /// End the episode (reward 0) after this many plies; `None` never truncates.
    pub max_episode_plies: Option<u32>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            self_color: 0,
            max_episode_plies: None,
        }
    }
}

impl EnvConfig {
    pub fn for_color(self_color: i32) -> Self {
        Self {
            self_color,
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> EnvResult<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| EnvError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EnvResult<()> {
        if !(0..=1).contains(&self.self_color) {
            return Err(EnvError::Config(format!(
                "self_color must be 0 or 1, got {}",
                self.self_color
            )));
        }
        if self.max_episode_plies == Some(0) {
            return Err(EnvError::Config("max_episode_plies must be positive".to_owned()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::EnvConfig;

    #[test]
    fn loads_partial_json_with_defaults() {
        let config = EnvConfig::from_json(r#"{"self_color": 1}"#).expect("config should load");
        assert_eq!(config.self_color, 1);
        assert_eq!(config.max_episode_plies, None);

        let full = EnvConfig::from_json(r#"{"self_color": 0, "max_episode_plies": 200}"#)
            .expect("config should load");
        assert_eq!(full.max_episode_plies, Some(200));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(EnvConfig::from_json(r#"{"self_color": 2}"#).is_err());
        assert!(EnvConfig::from_json(r#"{"max_episode_plies": 0}"#).is_err());
        assert!(EnvConfig::from_json("not json").is_err());
    }
}
