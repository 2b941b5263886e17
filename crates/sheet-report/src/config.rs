//! Configuration types for report generation.
//!
//! The defaults reproduce the dashboard's fixed behavior: a 10% row sample,
//! pie charts for columns with at most 10 distinct values, Tukey fences at
//! 1.5 x IQR and positional correlation pairing.

use serde::{Deserialize, Serialize};

/// How two numeric columns are paired before computing Pearson correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CorrelationAlignment {
    /// Filter each column's numeric values independently, then pair them by
    /// position. Rows drift apart when the columns are missing values in
    /// different places.
    #[default]
    Positional,
    /// Pair only rows where both columns hold a number.
    RowAligned,
}

/// Configuration for the report generator.
///
/// Use [`ReportConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use sheet_report::config::{CorrelationAlignment, ReportConfig};
///
/// let config = ReportConfig::builder()
///     .sample_fraction(0.25)
///     .correlation_alignment(CorrelationAlignment::RowAligned)
///     .sample_seed(7)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Share of rows shown in the sampled data table (0.0 exclusive - 1.0).
    /// At least one row is always sampled.
    /// Default: 0.1 (10%)
    pub sample_fraction: f64,

    /// Largest distinct-value count for which a non-numeric column gets a
    /// distribution section.
    /// Default: 10
    pub categorical_max_unique: usize,

    /// Multiplier applied to the IQR to build the outlier fences.
    /// Default: 1.5
    pub iqr_multiplier: f64,

    /// Pairing strategy for the correlation matrix.
    /// Default: Positional
    pub correlation_alignment: CorrelationAlignment,

    /// Seed for the row sampler. `None` seeds from OS entropy, so every
    /// run samples different rows.
    /// Default: None
    pub sample_seed: Option<u64>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sample_fraction: 0.1,
            categorical_max_unique: 10,
            iqr_multiplier: 1.5,
            correlation_alignment: CorrelationAlignment::default(),
            sample_seed: None,
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(self.sample_fraction > 0.0 && self.sample_fraction <= 1.0) {
            return Err(ConfigValidationError::InvalidSampleFraction(
                self.sample_fraction,
            ));
        }

        if self.categorical_max_unique < 2 {
            return Err(ConfigValidationError::InvalidCategoricalLimit(
                self.categorical_max_unique,
            ));
        }

        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(ConfigValidationError::InvalidIqrMultiplier(
                self.iqr_multiplier,
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid sample fraction: {0} (must be greater than 0.0 and at most 1.0)")]
    InvalidSampleFraction(f64),

    #[error("Invalid categorical limit: {0} (must be at least 2)")]
    InvalidCategoricalLimit(usize),

    #[error("Invalid IQR multiplier: {0} (must be a finite, non-negative number)")]
    InvalidIqrMultiplier(f64),
}

/// Builder for [`ReportConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    sample_fraction: Option<f64>,
    categorical_max_unique: Option<usize>,
    iqr_multiplier: Option<f64>,
    correlation_alignment: Option<CorrelationAlignment>,
    sample_seed: Option<u64>,
}

impl ReportConfigBuilder {
    /// Set the share of rows to show in the sampled data table.
    ///
    /// # Arguments
    /// * `fraction` - Value in (0.0, 1.0] (e.g., 0.1 = 10%)
    pub fn sample_fraction(mut self, fraction: f64) -> Self {
        self.sample_fraction = Some(fraction);
        self
    }

    /// Set the largest distinct-value count that still gets a pie chart.
    pub fn categorical_max_unique(mut self, limit: usize) -> Self {
        self.categorical_max_unique = Some(limit);
        self
    }

    /// Set the IQR multiplier used for the outlier fences.
    pub fn iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = Some(multiplier);
        self
    }

    /// Set how column pairs are aligned for correlation.
    pub fn correlation_alignment(mut self, alignment: CorrelationAlignment) -> Self {
        self.correlation_alignment = Some(alignment);
        self
    }

    /// Pin the row sampler to a seed for reproducible reports.
    pub fn sample_seed(mut self, seed: u64) -> Self {
        self.sample_seed = Some(seed);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ReportConfig` or an error if validation fails.
    pub fn build(self) -> Result<ReportConfig, ConfigValidationError> {
        let config = ReportConfig {
            sample_fraction: self.sample_fraction.unwrap_or(0.1),
            categorical_max_unique: self.categorical_max_unique.unwrap_or(10),
            iqr_multiplier: self.iqr_multiplier.unwrap_or(1.5),
            correlation_alignment: self.correlation_alignment.unwrap_or_default(),
            sample_seed: self.sample_seed,
        };

        config.validate()?;
        Ok(config)
    }
}
