//! Configuration types.

use std::path::PathBuf;

use uuid::Uuid;

use crate::error::ConfigError;

/// Runtime configuration for the onboarding driver.
#[derive(Debug, Clone)]
pub struct OnboardingConfig {
    /// libSQL database file.
    pub db_path: PathBuf,
    /// Signed-in user id. A fresh id is generated when unset.
    pub profile_id: Option<Uuid>,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/aura.db"),
            profile_id: None,
        }
    }
}

impl OnboardingConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// - `AURA_DB_PATH`: database file path
    /// - `AURA_PROFILE_ID`: UUID of the signed-in user
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let db_path = lookup("AURA_DB_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let profile_id = match lookup("AURA_PROFILE_ID").filter(|s| !s.trim().is_empty()) {
            Some(raw) => Some(Uuid::parse_str(raw.trim()).map_err(|e| {
                ConfigError::InvalidValue {
                    key: "AURA_PROFILE_ID".into(),
                    message: e.to_string(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            db_path,
            profile_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = OnboardingConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("./data/aura.db"));
        assert!(config.profile_id.is_none());
    }

    #[test]
    fn reads_overrides() {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let config = OnboardingConfig::from_lookup(lookup(&[
            ("AURA_DB_PATH", "/tmp/aura-test.db"),
            ("AURA_PROFILE_ID", id_str.as_str()),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/aura-test.db"));
        assert_eq!(config.profile_id, Some(id));
    }

    #[test]
    fn rejects_malformed_profile_id() {
        let err = OnboardingConfig::from_lookup(lookup(&[("AURA_PROFILE_ID", "not-a-uuid")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "AURA_PROFILE_ID"));
    }
}
