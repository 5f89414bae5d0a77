//! Scheduler configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Scheduler configuration
///
/// Controls the scheduled generation run: how far ahead it materializes,
/// the hard cap on any requested window, and the secret the platform
/// scheduler must present to trigger it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchedulerConfig {
    /// Look-ahead horizon of the scheduled run, in weeks
    #[serde(default = "default_weeks_ahead")]
    pub weeks_ahead: u32,

    /// Upper bound on any materialization window, in days
    #[serde(default = "default_max_window_days")]
    pub max_window_days: i64,

    /// Shared secret presented by the platform scheduler
    pub trigger_secret: String,
}

impl SchedulerConfig {
    /// Validate scheduler configuration
    ///
    /// The secret length floor only applies in production so local setups
    /// can use short throwaway values.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.weeks_ahead == 0 || self.weeks_ahead > 26 {
            return Err(ValidationError::InvalidWeeksAhead);
        }
        if self.max_window_days < 1 || self.max_window_days > 366 {
            return Err(ValidationError::InvalidMaxWindowDays);
        }
        // The scheduled run spans weeks_ahead * 7 + 1 days inclusive. A horizon
        // wider than the cap would make every run fail, so reject it up front.
        if i64::from(self.weeks_ahead) * 7 + 1 > self.max_window_days {
            return Err(ValidationError::HorizonExceedsWindowCap);
        }
        if self.trigger_secret.is_empty() {
            return Err(ValidationError::MissingRequired("TRIGGER_SECRET"));
        }
        if *environment == Environment::Production && self.trigger_secret.len() < 32 {
            return Err(ValidationError::TriggerSecretTooShort);
        }
        Ok(())
    }
}

fn default_weeks_ahead() -> u32 {
    4
}

fn default_max_window_days() -> i64 {
    180
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> SchedulerConfig {
        SchedulerConfig {
            weeks_ahead: default_weeks_ahead(),
            max_window_days: default_max_window_days(),
            trigger_secret: "local-dev-secret".to_string(),
        }
    }

    #[test]
    fn test_default_horizon_and_cap() {
        assert_eq!(default_weeks_ahead(), 4);
        assert_eq!(default_max_window_days(), 180);
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_validation_zero_weeks() {
        let config = SchedulerConfig {
            weeks_ahead: 0,
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_too_many_weeks() {
        let config = SchedulerConfig {
            weeks_ahead: 27,
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_horizon_wider_than_cap() {
        let config = SchedulerConfig {
            weeks_ahead: 26,
            ..valid_config()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::HorizonExceedsWindowCap)
        ));
    }

    #[test]
    fn test_validation_window_cap_out_of_range() {
        let config = SchedulerConfig {
            max_window_days: 0,
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());

        let config = SchedulerConfig {
            max_window_days: 400,
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = SchedulerConfig {
            trigger_secret: String::new(),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_short_secret_rejected_in_production_only() {
        let config = valid_config();
        assert!(config.trigger_secret.len() < 32);

        assert!(config.validate(&Environment::Development).is_ok());
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::TriggerSecretTooShort)
        ));
    }

    #[test]
    fn test_long_secret_accepted_in_production() {
        let config = SchedulerConfig {
            trigger_secret: "a".repeat(48),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }
}
