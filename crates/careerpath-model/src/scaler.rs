//! Robust scaler: subtract the fitted median, divide by the fitted IQR.

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, ScalingError};

fn bool_true() -> bool { true }

/// Fitted robust-scaler parameters as stored in the scaler artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobustScaler {
    /// Column names seen at fit time, in fit order. Optional: older
    /// artifacts were fitted on bare arrays.
    #[serde(default)]
    pub feature_names_in: Option<Vec<String>>,
    /// Per-feature median
    pub center: Vec<f64>,
    /// Per-feature interquartile range
    pub scale: Vec<f64>,
    #[serde(default = "bool_true")]
    pub with_centering: bool,
    #[serde(default = "bool_true")]
    pub with_scaling: bool,
}

impl RobustScaler {
    pub fn new(center: Vec<f64>, scale: Vec<f64>) -> Self {
        Self {
            feature_names_in: None,
            center,
            scale,
            with_centering: true,
            with_scaling: true,
        }
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names_in = Some(names);
        self
    }

    pub fn n_features(&self) -> usize {
        self.center.len()
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names_in.as_deref()
    }

    /// Shape checks run once at load time.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.center.len() != self.scale.len() {
            return Err(ArtifactError::Invalid(format!(
                "scaler center has {} entries but scale has {}",
                self.center.len(),
                self.scale.len()
            )));
        }
        if self.center.is_empty() {
            return Err(ArtifactError::Invalid("scaler has no features".to_string()));
        }
        if let Some(names) = &self.feature_names_in {
            if names.len() != self.center.len() {
                return Err(ArtifactError::Invalid(format!(
                    "scaler lists {} feature names for {} features",
                    names.len(),
                    self.center.len()
                )));
            }
        }
        if self.center.iter().any(|c| !c.is_finite()) {
            return Err(ArtifactError::Invalid("scaler center is not finite".to_string()));
        }
        Ok(())
    }

    /// `(x - center) / scale`, per feature. A zero or non-finite scale
    /// entry is treated as 1 so constant training columns pass through.
    /// Infinite or NaN values, in or out, are rejected.
    pub fn transform(&self, values: &[f64]) -> Result<Vec<f64>, ScalingError> {
        if values.len() != self.n_features() {
            return Err(ScalingError::DimensionMismatch {
                expected: self.n_features(),
                actual: values.len(),
            });
        }
        if let Some(i) = values.iter().position(|x| !x.is_finite()) {
            return Err(self.non_finite(i));
        }
        let scaled: Vec<f64> = values
            .iter()
            .zip(self.center.iter().zip(self.scale.iter()))
            .map(|(&x, (&c, &s))| {
                let x = if self.with_centering { x - c } else { x };
                if self.with_scaling { x / effective_scale(s) } else { x }
            })
            .collect();
        if let Some(i) = scaled.iter().position(|x| !x.is_finite()) {
            return Err(self.non_finite(i));
        }
        Ok(scaled)
    }

    fn non_finite(&self, index: usize) -> ScalingError {
        let feature = self
            .feature_names()
            .and_then(|names| names.get(index))
            .cloned()
            .unwrap_or_else(|| format!("x{}", index));
        ScalingError::NonFinite { feature }
    }
}

fn effective_scale(s: f64) -> f64 {
    if s == 0.0 || !s.is_finite() { 1.0 } else { s }
}
