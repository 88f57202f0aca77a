//! Runtime configuration

use serde::{Deserialize, Serialize};

/// Default limit on nested function calls
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Limits applied while executing a program
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Maximum number of nested user function calls
    pub max_call_depth: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl RuntimeConfig {
    /// Override the call depth limit
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        assert_eq!(RuntimeConfig::default().max_call_depth, 1000);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, RuntimeConfig::default());

        let config: RuntimeConfig = serde_json::from_str(r#"{"max_call_depth": 20}"#).unwrap();
        assert_eq!(config.max_call_depth, 20);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(serde_json::from_str::<RuntimeConfig>(r#"{"depth": 1}"#).is_err());
    }
}
