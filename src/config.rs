//! Filter configuration.
//!
//! Selects which filters run and with which parameters. Defaults match the
//! classic effects: a 15 pixel water color window and a blur radius of 25.

use crate::error::FilterError;
use crate::filters::blur::{BlurFilter, MAX_BLUR_RADIUS};
use crate::filters::kernel::ExecutionStrategy;
use crate::filters::watercolor::{WaterColorFilter, DEFAULT_WINDOW_SIZE};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    pub water_color: bool,
    pub grayscale: bool,
    pub blur: bool,
    pub window_size: usize,
    pub blur_radius: f32,
    pub strategy: ExecutionStrategy,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            water_color: false,
            grayscale: false,
            blur: false,
            window_size: DEFAULT_WINDOW_SIZE,
            blur_radius: MAX_BLUR_RADIUS,
            strategy: ExecutionStrategy::default(),
        }
    }
}

impl FilterConfig {
    pub fn with_water_color(mut self, enabled: bool) -> Self {
        self.water_color = enabled;
        self
    }

    pub fn with_grayscale(mut self, enabled: bool) -> Self {
        self.grayscale = enabled;
        self
    }

    pub fn with_blur(mut self, enabled: bool) -> Self {
        self.blur = enabled;
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_blur_radius(mut self, radius: f32) -> Self {
        self.blur_radius = radius;
        self
    }

    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check every parameter, enabled or not, and return the first error.
    pub fn validate(&self) -> Result<(), FilterError> {
        WaterColorFilter::new(self.window_size)?;
        BlurFilter::new(self.blur_radius)?;
        if let ExecutionStrategy::Fixed(0) = self.strategy {
            return Err(FilterError::InvalidThreadCount(0));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FilterConfig::default();
        assert!(!config.water_color && !config.grayscale && !config.blur);
        assert_eq!(config.window_size, 15);
        assert_eq!(config.blur_radius, 25.0);
        assert_eq!(config.strategy, ExecutionStrategy::ParallelRows);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = FilterConfig::default()
            .with_grayscale(true)
            .with_window_size(5)
            .with_strategy(ExecutionStrategy::Serial);
        assert!(config.grayscale);
        assert_eq!(config.window_size, 5);
        assert_eq!(config.strategy, ExecutionStrategy::Serial);
    }

    #[test]
    fn test_validate_reports_bad_values() {
        let config = FilterConfig::default().with_window_size(0);
        assert!(matches!(
            config.validate(),
            Err(FilterError::InvalidWindowSize(0))
        ));

        let config = FilterConfig::default().with_blur_radius(40.0);
        assert!(matches!(
            config.validate(),
            Err(FilterError::InvalidBlurRadius(_))
        ));

        let config = FilterConfig::default().with_strategy(ExecutionStrategy::Fixed(0));
        assert!(matches!(
            config.validate(),
            Err(FilterError::InvalidThreadCount(0))
        ));
    }
}
