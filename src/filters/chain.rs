//! Filter chaining.
//!
//! Filters run in a fixed order, water color, then grayscale, then blur,
//! each stage reading the previous stage's output. Disabled stages are left
//! out of the chain.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array3, ArrayView3};

use super::blur::BlurFilter;
use super::grayscale::GrayscaleFilter;
use super::kernel::{apply_filter, ensure_rgba, ExecutionStrategy};
use super::watercolor::WaterColorFilter;
use crate::config::FilterConfig;
use crate::error::FilterError;

/// The available filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    WaterColor,
    Grayscale,
    Blur,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::WaterColor => "water_color",
            FilterKind::Grayscale => "grayscale",
            FilterKind::Blur => "blur",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "water_color" | "watercolor" => Ok(FilterKind::WaterColor),
            "grayscale" => Ok(FilterKind::Grayscale),
            "blur" => Ok(FilterKind::Blur),
            _ => Err(FilterError::UnknownFilter(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    WaterColor(WaterColorFilter),
    Grayscale(GrayscaleFilter),
    Blur(BlurFilter),
}

impl Stage {
    fn kind(&self) -> FilterKind {
        match self {
            Stage::WaterColor(_) => FilterKind::WaterColor,
            Stage::Grayscale(_) => FilterKind::Grayscale,
            Stage::Blur(_) => FilterKind::Blur,
        }
    }

    fn apply(
        &self,
        input: ArrayView3<u8>,
        strategy: ExecutionStrategy,
    ) -> Result<Array3<u8>, FilterError> {
        match self {
            Stage::WaterColor(filter) => apply_filter(filter, input, strategy),
            Stage::Grayscale(filter) => apply_filter(filter, input, strategy),
            Stage::Blur(filter) => filter.apply(input, strategy),
        }
    }
}

/// An ordered sequence of filters.
#[derive(Debug, Clone)]
pub struct FilterChain {
    stages: Vec<Stage>,
    strategy: ExecutionStrategy,
}

impl FilterChain {
    /// Build the chain described by `config`.
    pub fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;

        let mut stages = Vec::with_capacity(3);
        if config.water_color {
            stages.push(Stage::WaterColor(WaterColorFilter::new(config.window_size)?));
        }
        if config.grayscale {
            stages.push(Stage::Grayscale(GrayscaleFilter));
        }
        if config.blur {
            stages.push(Stage::Blur(BlurFilter::new(config.blur_radius)?));
        }

        Ok(Self {
            stages,
            strategy: config.strategy,
        })
    }

    /// Filters in the order they run.
    pub fn kinds(&self) -> Vec<FilterKind> {
        self.stages.iter().map(Stage::kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage, feeding each output into the next.
    ///
    /// An empty chain returns a copy of the input.
    pub fn run(&self, input: ArrayView3<u8>) -> Result<Array3<u8>, FilterError> {
        ensure_rgba(input.dim())?;
        let (height, width, _) = input.dim();

        let mut current = input.to_owned();
        for (i, stage) in self.stages.iter().enumerate() {
            log::info!(
                "Applying {} ({}/{}) to {width}x{height} image",
                stage.kind(),
                i + 1,
                self.stages.len()
            );
            current = stage.apply(current.view(), self.strategy)?;
        }

        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::blur::blur_rgba_u8;
    use crate::filters::grayscale::grayscale_rgba_u8;
    use crate::filters::watercolor::water_color_rgba_u8;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn random_image(seed: u64) -> Array3<u8> {
        let mut rng = StdRng::seed_from_u64(seed);
        Array3::from_shape_fn((12, 14, 4), |_| rng.random::<u8>())
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!("grayscale".parse::<FilterKind>().unwrap(), FilterKind::Grayscale);
        assert_eq!("WaterColor".parse::<FilterKind>().unwrap(), FilterKind::WaterColor);
        assert_eq!("water_color".parse::<FilterKind>().unwrap(), FilterKind::WaterColor);
        assert_eq!("Blur".parse::<FilterKind>().unwrap(), FilterKind::Blur);
        assert!(matches!(
            "sepia".parse::<FilterKind>(),
            Err(FilterError::UnknownFilter(name)) if name == "sepia"
        ));
    }

    #[test]
    fn test_display_roundtrips_name() {
        for kind in [FilterKind::WaterColor, FilterKind::Grayscale, FilterKind::Blur] {
            assert_eq!(kind.to_string().parse::<FilterKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_fixed_order() {
        let config = FilterConfig::default()
            .with_blur(true)
            .with_grayscale(true)
            .with_water_color(true);
        let chain = FilterChain::from_config(&config).unwrap();
        assert_eq!(
            chain.kinds(),
            vec![FilterKind::WaterColor, FilterKind::Grayscale, FilterKind::Blur]
        );
    }

    #[test]
    fn test_empty_chain_copies() {
        init_logger();
        let img = random_image(1);
        let chain = FilterChain::from_config(&FilterConfig::default()).unwrap();
        assert!(chain.is_empty());
        assert_eq!(chain.run(img.view()).unwrap(), img);
    }

    #[test]
    fn test_chain_matches_sequential_calls() {
        init_logger();
        let img = random_image(2);
        let config = FilterConfig::default()
            .with_water_color(true)
            .with_grayscale(true)
            .with_blur(true)
            .with_window_size(5)
            .with_blur_radius(3.0);

        let chained = FilterChain::from_config(&config)
            .unwrap()
            .run(img.view())
            .unwrap();

        let step = water_color_rgba_u8(img.view(), 5).unwrap();
        let step = grayscale_rgba_u8(step.view()).unwrap();
        let step = blur_rgba_u8(step.view(), 3.0).unwrap();
        assert_eq!(chained, step);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FilterConfig::default().with_water_color(true).with_window_size(0);
        assert!(FilterChain::from_config(&config).is_err());
    }
}
