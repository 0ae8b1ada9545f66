use serde::{Deserialize, Serialize};

use lcs_gate::GateConfig;
use lcs_types::INITIAL_POINTS;

use crate::error::{ContractError, ContractResult};

/// Deployment configuration for the contract.
///
/// Every field has a default, so an empty TOML document is a valid
/// configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Access rule overrides.
    pub gate: GateConfig,
    /// Point balance of newly issued licenses.
    pub initial_points: i64,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            gate: GateConfig::default(),
            initial_points: INITIAL_POINTS,
            log_filter: "info".into(),
        }
    }
}

impl ContractConfig {
    pub fn from_toml(raw: &str) -> ContractResult<Self> {
        toml::from_str(raw).map_err(|e| ContractError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lcs_gate::AccessRule;
    use lcs_types::Operation;

    #[test]
    fn default_config() {
        let c = ContractConfig::default();
        assert_eq!(c.initial_points, 15);
        assert_eq!(c.log_filter, "info");
        assert!(c.gate.rules.is_empty());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(ContractConfig::from_toml("").unwrap(), ContractConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let raw = r#"
            initial_points = 20

            [gate.rules]
            queryWaitingList = "open"
        "#;
        let c = ContractConfig::from_toml(raw).unwrap();
        assert_eq!(c.initial_points, 20);
        assert_eq!(c.log_filter, "info");
        assert_eq!(c.gate.rule(Operation::QueryWaitingList), AccessRule::Open);
    }

    #[test]
    fn malformed_document_is_a_config_error() {
        let err = ContractConfig::from_toml("initial_points = \"many\"").unwrap_err();
        assert!(matches!(err, ContractError::Config(_)));
    }
}
