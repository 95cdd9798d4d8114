use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::filter::EmptySelectionPolicy;
use crate::error::{DashboardError, Result};

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "CLAIMS_DASHBOARD_CONFIG";
/// Environment variable overriding the dataset path.
pub const DATA_PATH_ENV: &str = "CLAIMS_DATA_PATH";

// ---------------------------------------------------------------------------
// Column mapping – header names used by the data provider
// ---------------------------------------------------------------------------

/// Maps each claim attribute to the header name it has in the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub loss_date: String,
    pub insurer_name: String,
    pub insured_state: String,
    pub incident_type: String,
    pub injury_involved: String,
    pub lawsuit_filed: String,
    pub total_claimed_losses: String,
    pub total_insurance_payment: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            loss_date: "dateOfloss".into(),
            insurer_name: "insurer_name".into(),
            insured_state: "insuredstate".into(),
            incident_type: "natureOfincident".into(),
            injury_involved: "injuryinvolved".into(),
            lawsuit_filed: "lawsuit_filed".into(),
            total_claimed_losses: "total_claimed_losses".into(),
            total_insurance_payment: "total_insurance_payment".into(),
        }
    }
}

impl ColumnMapping {
    /// All mapped header names, in record-field order.
    pub fn required(&self) -> [&str; 8] {
        [
            self.loss_date.as_str(),
            self.insurer_name.as_str(),
            self.insured_state.as_str(),
            self.incident_type.as_str(),
            self.injury_involved.as_str(),
            self.lawsuit_filed.as_str(),
            self.total_claimed_losses.as_str(),
            self.total_insurance_payment.as_str(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Top-level configuration. Every field has a default, so an empty JSON
/// object (or no file at all) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset location (`.csv` or `.json`).
    pub data_path: PathBuf,
    pub columns: ColumnMapping,
    /// How the sidebar treats a multi-select with nothing ticked.
    pub empty_selection: EmptySelectionPolicy,
    /// Number of bars in the state chart.
    pub top_states: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data").join("auto_insurance_data.csv"),
            columns: ColumnMapping::default(),
            empty_selection: EmptySelectionPolicy::default(),
            top_states: 10,
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON configuration document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| DashboardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Resolve the configuration from the environment:
    /// defaults, then the file named by [`CONFIG_ENV`], then [`DATA_PATH_ENV`].
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                log::info!("Reading configuration from {:?}", path);
                Self::from_file(Path::new(&path))?
            }
            None => Self::default(),
        };
        if let Some(path) = std::env::var_os(DATA_PATH_ENV) {
            config.data_path = PathBuf::from(path);
        }
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = std::collections::BTreeSet::new();
        for name in self.columns.required() {
            if name.trim().is_empty() {
                return Err(DashboardError::Config("column names must not be empty".into()));
            }
            if !seen.insert(name) {
                return Err(DashboardError::Config(format!(
                    "column '{name}' is mapped to more than one field"
                )));
            }
        }
        if self.top_states == 0 {
            return Err(DashboardError::Config("top_states must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = DashboardConfig::from_json_str("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.columns.loss_date, "dateOfloss");
        assert_eq!(config.empty_selection, EmptySelectionPolicy::ExcludeAll);
    }

    #[test]
    fn partial_column_mapping_keeps_other_defaults() {
        let config = DashboardConfig::from_json_str(
            r#"{ "columns": { "insured_state": "state" }, "empty_selection": "unconstrained" }"#,
        )
        .unwrap();
        assert_eq!(config.columns.insured_state, "state");
        assert_eq!(config.columns.insurer_name, "insurer_name");
        assert_eq!(config.empty_selection, EmptySelectionPolicy::Unconstrained);
    }

    #[test]
    fn duplicate_column_names_are_rejected() {
        let err = DashboardConfig::from_json_str(
            r#"{ "columns": { "insured_state": "insurer_name" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }

    #[test]
    fn zero_top_states_is_rejected() {
        assert!(DashboardConfig::from_json_str(r#"{ "top_states": 0 }"#).is_err());
    }
}
