//! Run parameters and YAML configuration loading.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Lattice and sweep parameters, immutable for the lifetime of a run.
///
/// The defaults reproduce the standard exercise setup: 20 sites, 20 sweeps
/// per decorrelation block, spacing 0.5 and proposal half-width 1.4.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LatticeParams {
    /// Number of lattice sites L, periodic in imaginary time.
    #[serde(default = "default_length")]
    pub length: usize,
    /// Sweeps per decorrelation block.
    #[serde(default = "default_n_cor")]
    pub n_cor: usize,
    /// Lattice spacing a.
    #[serde(default = "default_spacing")]
    pub spacing: f64,
    /// Half-width of the uniform proposal step.
    #[serde(default = "default_eps")]
    pub eps: f64,
}

fn default_length() -> usize {
    20
}

fn default_n_cor() -> usize {
    20
}

fn default_spacing() -> f64 {
    0.5
}

fn default_eps() -> f64 {
    1.4
}

impl Default for LatticeParams {
    fn default() -> Self {
        Self {
            length: default_length(),
            n_cor: default_n_cor(),
            spacing: default_spacing(),
            eps: default_eps(),
        }
    }
}

impl LatticeParams {
    /// Reject degenerate parameter sets before any state is allocated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.length == 0 {
            return Err(ConfigError::EmptyLattice);
        }
        if self.n_cor == 0 {
            return Err(ConfigError::EmptyBlock);
        }
        if self.spacing <= 0.0 {
            return Err(ConfigError::BadSpacing(self.spacing));
        }
        if self.eps <= 0.0 {
            return Err(ConfigError::BadStepWidth(self.eps));
        }
        Ok(())
    }
}

/// Read parameters from a YAML file; missing fields fall back to the
/// defaults, so partial files work.
pub fn read_params(filename: &str) -> Result<LatticeParams, ConfigError> {
    let file = std::fs::File::open(filename)?;
    let reader = std::io::BufReader::new(file);
    let params: LatticeParams = serde_yaml::from_reader(reader)?;
    params.validate()?;
    Ok(params)
}

// example of yaml file
// length: 20
// n_cor: 20
// spacing: 0.5
// eps: 1.4

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_params() {
        let params = LatticeParams::default();
        assert_eq!(params.length, 20);
        assert_eq!(params.n_cor, 20);
        assert_relative_eq!(params.spacing, 0.5);
        assert_relative_eq!(params.eps, 1.4);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_degenerate_params() {
        let mut params = LatticeParams::default();
        params.length = 0;
        assert!(matches!(params.validate(), Err(ConfigError::EmptyLattice)));

        let mut params = LatticeParams::default();
        params.n_cor = 0;
        assert!(matches!(params.validate(), Err(ConfigError::EmptyBlock)));

        let mut params = LatticeParams::default();
        params.spacing = 0.0;
        assert!(matches!(params.validate(), Err(ConfigError::BadSpacing(_))));

        let mut params = LatticeParams::default();
        params.eps = -1.4;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::BadStepWidth(_))
        ));
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let params: LatticeParams = serde_yaml::from_str("length: 10\n").unwrap();
        assert_eq!(params.length, 10);
        assert_eq!(params.n_cor, 20);
        assert_relative_eq!(params.eps, 1.4);
    }
}
