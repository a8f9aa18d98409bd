//! Load combinations

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::DEFAULT_CASE;

/// Name of the combination analysed when a model defines none
pub const DEFAULT_COMBO: &str = "Combo 1";

/// A load combination defines how load cases are combined for analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Name of the load combination
    pub name: String,
    /// Factors for each load case (case_name -> factor)
    pub factors: BTreeMap<String, f64>,
}

impl LoadCombination {
    /// Create a new load combination
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            factors: BTreeMap::new(),
        }
    }

    /// Create a load combination with a single load case at factor 1.0
    pub fn single(name: &str, case: &str) -> Self {
        Self::new(name).with_case(case, 1.0)
    }

    /// Add a load case with a factor
    pub fn with_case(mut self, case: &str, factor: f64) -> Self {
        self.factors.insert(case.to_string(), factor);
        self
    }

    /// Get the factor for a load case
    pub fn factor(&self, case: &str) -> f64 {
        self.factors.get(case).copied().unwrap_or(0.0)
    }

    /// Check if this combination includes a specific load case
    pub fn includes(&self, case: &str) -> bool {
        self.factor(case).abs() > 1e-10
    }

    /// Create common LRFD combinations
    pub fn lrfd_dead_only() -> Self {
        Self::new("1.4D").with_case("Dead", 1.4)
    }

    pub fn lrfd_dead_live() -> Self {
        Self::new("1.2D + 1.6L")
            .with_case("Dead", 1.2)
            .with_case("Live", 1.6)
    }

    pub fn lrfd_dead_roof_live() -> Self {
        Self::new("1.2D + 1.6Lr")
            .with_case("Dead", 1.2)
            .with_case("Roof Live", 1.6)
    }

    /// Create common ASD combinations
    pub fn asd_dead_live() -> Self {
        Self::new("D + L")
            .with_case("Dead", 1.0)
            .with_case("Live", 1.0)
    }
}

impl Default for LoadCombination {
    fn default() -> Self {
        Self::single(DEFAULT_COMBO, DEFAULT_CASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_lookup() {
        let combo = LoadCombination::lrfd_dead_live();
        assert_eq!(combo.factor("Dead"), 1.2);
        assert_eq!(combo.factor("Live"), 1.6);
        assert_eq!(combo.factor("Wind"), 0.0);
        assert!(!combo.includes("Wind"));
    }

    #[test]
    fn test_presets_match_builder() {
        let combo = LoadCombination::new("1.2D + 1.6Lr")
            .with_case("Dead", 1.2)
            .with_case("Roof Live", 1.6);
        assert_eq!(combo, LoadCombination::lrfd_dead_roof_live());
    }

    #[test]
    fn test_default_combo() {
        let combo = LoadCombination::default();
        assert_eq!(combo.name, DEFAULT_COMBO);
        assert_eq!(combo.factor(DEFAULT_CASE), 1.0);
    }
}
