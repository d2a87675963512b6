use serde::{Deserialize, Serialize};

use crate::error::AugmentError;

/// Parameters of the random augmentation.
///
/// Missing fields take their default value when deserializing.
///
/// ```
/// use scrawl_augment::AugmentConfig;
///
/// let config = AugmentConfig::from_json(r#"{"slant_std": 0.5}"#).unwrap();
/// assert_eq!(config.slant_std, 0.5);
/// assert_eq!(config.max_kernel_radius, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AugmentConfig {
    /// Exclusive upper bound of the kernel radius draw. A radius of zero skips the
    /// morphological step, a radius `r` uses a kernel of size `2r + 1`.
    pub max_kernel_radius: usize,
    /// Standard deviation of the rotation, in degrees.
    pub rotation_std_deg: f32,
    /// Standard deviation of the slant factor.
    pub slant_std: f32,
    /// Horizontal shift in pixels applied per unit of slant across the image height.
    pub slant_strength: f32,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            max_kernel_radius: 2,
            rotation_std_deg: 2.0,
            slant_std: 1.0,
            slant_strength: 40.0,
        }
    }
}

impl AugmentConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, AugmentError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<(), AugmentError> {
        if self.max_kernel_radius == 0 {
            return Err(AugmentError::InvalidConfig(
                "max_kernel_radius must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("rotation_std_deg", self.rotation_std_deg),
            ("slant_std", self.slant_std),
            ("slant_strength", self.slant_strength),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AugmentError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}
