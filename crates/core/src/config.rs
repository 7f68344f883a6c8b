//! Session configuration
//!
//! Defaults match the classic game: seed 1, three pieces of preview and one
//! hold per spawned piece. [`SessionConfig::from_env`] lets a driver override
//! them without recompiling:
//!
//! - `BITRIS_SEED`: RNG seed (default: 1)
//! - `BITRIS_QUEUE_LEN`: number of upcoming pieces (default: 3)
//! - `BITRIS_HOLD_POLICY`: `once-per-piece` or `swap-back-only`

use thiserror::Error;

use crate::types::DEFAULT_QUEUE_LEN;

/// When the hold eligibility flag drops after a successful hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldPolicy {
    /// Any successful hold uses up the hold until the next spawn.
    #[default]
    OncePerPiece,
    /// Only swapping a held piece back into play uses up the hold. Stashing
    /// into an empty slot leaves it available.
    SwapBackOnly,
}

impl HoldPolicy {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "once-per-piece" | "once_per_piece" | "once" => Some(HoldPolicy::OncePerPiece),
            "swap-back-only" | "swap_back_only" | "swap-back" => Some(HoldPolicy::SwapBackOnly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HoldPolicy::OncePerPiece => "once-per-piece",
            HoldPolicy::SwapBackOnly => "swap-back-only",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("queue length must be at least 1")]
    EmptyQueue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub seed: u64,
    pub queue_len: usize,
    pub hold_policy: HoldPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            queue_len: DEFAULT_QUEUE_LEN,
            hold_policy: HoldPolicy::default(),
        }
    }
}

impl SessionConfig {
    /// Create from environment variables, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SessionConfig::from_env`] with `lookup` standing in for the
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let seed = lookup("BITRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let queue_len = lookup("BITRIS_QUEUE_LEN")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.queue_len);

        let hold_policy = lookup("BITRIS_HOLD_POLICY")
            .and_then(|s| HoldPolicy::from_str(&s))
            .unwrap_or(defaults.hold_policy);

        Self {
            seed,
            queue_len,
            hold_policy,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_len == 0 {
            return Err(ConfigError::EmptyQueue);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SessionConfig::default();
        assert_eq!(config.queue_len, 3);
        assert_eq!(config.hold_policy, HoldPolicy::OncePerPiece);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_queue_is_rejected() {
        let config = SessionConfig {
            queue_len: 0,
            ..SessionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyQueue));
    }

    #[test]
    fn hold_policy_names_roundtrip() {
        for policy in [HoldPolicy::OncePerPiece, HoldPolicy::SwapBackOnly] {
            assert_eq!(HoldPolicy::from_str(policy.as_str()), Some(policy));
        }
        assert_eq!(HoldPolicy::from_str("sometimes"), None);
    }

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn lookup_reads_every_variable() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            ("BITRIS_SEED", " 42 "),
            ("BITRIS_QUEUE_LEN", "5"),
            ("BITRIS_HOLD_POLICY", "Swap-Back-Only"),
        ]));
        assert_eq!(
            config,
            SessionConfig {
                seed: 42,
                queue_len: 5,
                hold_policy: HoldPolicy::SwapBackOnly,
            }
        );
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let config = SessionConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn unparsable_variables_fall_back_per_field() {
        let config = SessionConfig::from_lookup(lookup_from(&[
            ("BITRIS_SEED", "not-a-number"),
            ("BITRIS_QUEUE_LEN", "-3"),
            ("BITRIS_HOLD_POLICY", "sometimes"),
        ]));
        assert_eq!(config, SessionConfig::default());

        let config = SessionConfig::from_lookup(lookup_from(&[
            ("BITRIS_SEED", "7"),
            ("BITRIS_QUEUE_LEN", "lots"),
        ]));
        assert_eq!(config.seed, 7);
        assert_eq!(config.queue_len, 3);
    }

    #[test]
    fn zero_queue_parses_but_fails_validation() {
        let config = SessionConfig::from_lookup(lookup_from(&[("BITRIS_QUEUE_LEN", "0")]));
        assert_eq!(config.queue_len, 0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyQueue));
    }
}
