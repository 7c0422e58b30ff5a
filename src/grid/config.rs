use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Static description of a grid surface.
///
/// `rows` is only the starting row count; the live value is tracked by
/// [`GridState`](super::GridState) and grows as items need more room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Edge length of one cell in pixels.
    pub cell_size: u32,
    /// Gutter between neighbouring cells in pixels.
    pub gap: u32,
    /// Fixed column count.
    pub columns: u32,
    /// Initial row count.
    pub rows: u32,
    /// Rows added each time a first-free scan finds no room.
    pub growth_step: u32,
    /// Ceiling for scan-driven growth.
    pub max_rows: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 250,
            gap: 10,
            columns: 4,
            rows: 4,
            growth_step: 2,
            max_rows: 4096,
        }
    }
}

impl GridConfig {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    /// Parse a JSON document and validate it. Missing fields take defaults.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: GridConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_growth_step(mut self, growth_step: u32) -> Self {
        self.growth_step = growth_step;
        self
    }

    pub fn with_max_rows(mut self, max_rows: u32) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Distance in pixels between the origins of adjacent cells.
    pub fn pitch(&self) -> i64 {
        i64::from(self.cell_size) + i64::from(self.gap)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.rows == 0 {
            return Err(ConfigError::ZeroRows);
        }
        if self.pitch() == 0 {
            return Err(ConfigError::ZeroPitch);
        }
        if self.growth_step == 0 {
            return Err(ConfigError::ZeroGrowthStep);
        }
        if self.max_rows < self.rows {
            return Err(ConfigError::RowLimitBelowInitial {
                rows: self.rows,
                max_rows: self.max_rows,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_editor_constants() {
        let config = GridConfig::default();
        assert_eq!(config.cell_size, 250);
        assert_eq!(config.gap, 10);
        assert_eq!(config.columns, 4);
        assert_eq!(config.rows, 4);
        assert_eq!(config.pitch(), 260);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = GridConfig::from_json(r#"{ "columns": 6, "gap": 0 }"#).unwrap();
        assert_eq!(config.columns, 6);
        assert_eq!(config.gap, 0);
        assert_eq!(config.cell_size, 250);
        assert_eq!(config.growth_step, 2);
    }

    #[test]
    fn json_rejects_unknown_fields() {
        let err = GridConfig::from_json(r#"{ "colums": 6 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn json_is_validated() {
        let err = GridConfig::from_json(r#"{ "columns": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroColumns));
    }

    #[test]
    fn validate_reports_each_constraint() {
        assert!(matches!(
            GridConfig::new(4, 0).validate(),
            Err(ConfigError::ZeroRows)
        ));
        assert!(matches!(
            GridConfig::default().with_cell_size(0).with_gap(0).validate(),
            Err(ConfigError::ZeroPitch)
        ));
        assert!(matches!(
            GridConfig::default().with_growth_step(0).validate(),
            Err(ConfigError::ZeroGrowthStep)
        ));
        assert!(matches!(
            GridConfig::new(4, 8).with_max_rows(6).validate(),
            Err(ConfigError::RowLimitBelowInitial { rows: 8, max_rows: 6 })
        ));
    }
}
