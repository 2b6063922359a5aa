use serde::{Deserialize, Serialize};

use crate::error_handling::types::ConfigError;

/// Bounds accepted by the upstream engine for the attacker count slider.
pub const MIN_ATTACKERS: u32 = 1;
pub const MAX_ATTACKERS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackMode {
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "distributed")]
    Distributed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetEndpoint {
    #[serde(rename = "/limited")]
    Limited,
    #[serde(rename = "/open")]
    Open,
}

/// Operator-supplied parameters for one attack run.
///
/// Immutable once submitted until the next configure. Field names serialize
/// to the exact wire keys the upstream `/configure` endpoint expects, so the
/// same struct is used for the operator API and the upstream call.
///
/// # Fields Overview
///
/// - `num_threads`: attacker count, 1-100
/// - `rate_limit`: requests/minute granted by the victim; only meaningful
///   when targeting the rate-limited endpoint
/// - `attack_mode`: single or distributed flood
/// - `target_endpoint`: which victim endpoint the run hammers
/// - `use_blacklist`: whether the victim's blacklist defense is exercised
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackConfig {
    #[serde(rename = "NUM_THREADS")]
    pub num_threads: u32,
    #[serde(rename = "RATE_LIMIT")]
    pub rate_limit: u32,
    #[serde(rename = "ATTACK_MODE")]
    pub attack_mode: AttackMode,
    #[serde(rename = "TARGET_ENDPOINT")]
    pub target_endpoint: TargetEndpoint,
    #[serde(rename = "IS_BLACKLISTING")]
    pub use_blacklist: bool,
}

impl AttackConfig {
    /// Range-checks the operator input before anything touches the network.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_threads < MIN_ATTACKERS || self.num_threads > MAX_ATTACKERS {
            return Err(ConfigError::NotInRange(format!(
                "attacker count must be between {} and {}, got {}",
                MIN_ATTACKERS, MAX_ATTACKERS, self.num_threads
            )));
        }
        if self.rate_limit == 0 {
            return Err(ConfigError::NotInRange(
                "rate limit must be a positive number of requests per minute".to_string(),
            ));
        }
        Ok(())
    }
}
