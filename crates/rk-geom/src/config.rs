//! Tolerance configuration
//!
//! The numeric thresholds used by the geometry routines, serializable so a
//! host application can keep them next to its other settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default threshold for collinearity and coincidence checks
pub const LINEAR_TOLERANCE: f64 = 1e-6;

/// Default threshold on `|â × b̂|²` below which two directions count as parallel
pub const PARALLEL_TOLERANCE: f64 = 1e-12;

/// Default angular threshold (radians) for direction comparisons
pub const ANGULAR_TOLERANCE: f64 = 1e-6;

/// Default contact distance for intersection tests
pub const INTERSECTION_TOLERANCE: f64 = 1e-6;

/// Numeric tolerances shared by the geometry routines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Length below which points coincide or lie on a line
    pub linear: f64,
    /// Squared sine of the angle below which two segments are parallel
    pub parallel: f64,
    /// Angle (radians) below which two directions are parallel
    pub angular: f64,
    /// Distance below which two segments touch
    pub intersection: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            linear: LINEAR_TOLERANCE,
            parallel: PARALLEL_TOLERANCE,
            angular: ANGULAR_TOLERANCE,
            intersection: INTERSECTION_TOLERANCE,
        }
    }
}

impl Tolerances {
    /// Set the linear tolerance
    pub fn with_linear(mut self, linear: f64) -> Self {
        self.linear = linear;
        self
    }

    /// Set the parallel tolerance
    pub fn with_parallel(mut self, parallel: f64) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the angular tolerance
    pub fn with_angular(mut self, angular: f64) -> Self {
        self.angular = angular;
        self
    }

    /// Set the intersection tolerance
    pub fn with_intersection(mut self, intersection: f64) -> Self {
        self.intersection = intersection;
        self
    }

    /// Serialize to a pretty RON string
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Parse from a RON string; missing fields fall back to defaults
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let tolerances: Tolerances =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        tolerances.validate()?;
        Ok(tolerances)
    }

    /// Save to a RON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let tolerances = Self::from_ron_str(&content)?;
        tracing::debug!("loaded tolerances from {}: {:?}", path.display(), tolerances);
        Ok(tolerances)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("linear", self.linear),
            ("parallel", self.parallel),
            ("angular", self.angular),
            ("intersection", self.intersection),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} tolerance must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Tolerance configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the file failed
    #[error("IO error: {0}")]
    Io(String),
    /// Encoding to RON failed
    #[error("Serialization error: {0}")]
    Serialize(String),
    /// Decoding RON failed
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    /// A tolerance value is negative or not finite
    #[error("Invalid tolerance: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tol = Tolerances::default();
        assert_eq!(tol.linear, 1e-6);
        assert_eq!(tol.parallel, 1e-12);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let tol = Tolerances::from_ron_str("(linear: 0.001)").unwrap();
        assert_eq!(tol.linear, 0.001);
        assert_eq!(tol.parallel, PARALLEL_TOLERANCE);
        assert_eq!(tol.intersection, INTERSECTION_TOLERANCE);
    }

    #[test]
    fn test_negative_tolerance_rejected() {
        let result = Tolerances::from_ron_str("(angular: -1.0)");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tolerances.ron");

        let tol = Tolerances::default()
            .with_linear(1e-4)
            .with_intersection(0.01);
        tol.save(&path).unwrap();

        let loaded = Tolerances::load(&path).unwrap();
        assert_eq!(loaded, tol);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Tolerances::load(dir.path().join("missing.ron"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
