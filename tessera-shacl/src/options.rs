//! Validation run options

use serde::{Deserialize, Serialize};

/// Knobs for a validation run
///
/// Deserializable with defaults for every field, so a host can embed it in
/// its own configuration:
///
/// ```
/// use tessera_shacl::ValidationOptions;
///
/// let opts: ValidationOptions = serde_json::from_str(r#"{"max_recursion_depth": 8}"#).unwrap();
/// assert_eq!(opts.max_recursion_depth, 8);
/// assert_eq!(opts.failure_detail_limit, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Deepest chain of nested shape evaluations before the run aborts
    pub max_recursion_depth: usize,
    /// Number of result messages carried by `ShaclError::ValidationFailed`
    pub failure_detail_limit: usize,
    /// Validate shapes marked `sh:deactivated` as well
    pub include_deactivated: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_recursion_depth: 64,
            failure_detail_limit: 10,
            include_deactivated: false,
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    pub fn with_failure_detail_limit(mut self, limit: usize) -> Self {
        self.failure_detail_limit = limit;
        self
    }

    pub fn with_include_deactivated(mut self, include: bool) -> Self {
        self.include_deactivated = include;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let opts: ValidationOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, ValidationOptions::default());
        assert_eq!(opts.max_recursion_depth, 64);
        assert!(!opts.include_deactivated);
    }

    #[test]
    fn test_builders() {
        let opts = ValidationOptions::new()
            .with_max_recursion_depth(4)
            .with_failure_detail_limit(2)
            .with_include_deactivated(true);
        assert_eq!(opts.max_recursion_depth, 4);
        assert_eq!(opts.failure_detail_limit, 2);
        assert!(opts.include_deactivated);
    }
}
