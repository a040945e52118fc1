//! # Scale configuration
//!
//! Drift lays elements out in *logical* units. A [`ScaleConfig`] maps them to
//! physical pixels using the ratio between the device DPI and the DPI the UI
//! was designed for.
//!
//! The configuration is an immutable value. Drawing contexts carry one, and
//! anything that needs pixel sizes (offscreen caches, decals) reads it from
//! the context it was handed. The host builds it once through a
//! [`ScaleRegistry`], which rejects a second device DPI and refuses to hand
//! out a config before the DPI is known:
//!
//! ```rust
//! use drift_core::scaling::ScaleRegistry;
//!
//! let mut registry = ScaleRegistry::default();
//! assert!(registry.config().is_err());
//!
//! registry.set_design_dpi(96).unwrap();
//! registry.set_device_dpi(192.0).unwrap();
//! let scale = registry.config().unwrap();
//! assert_eq!(scale.scale_from_logic(10.0), 20.0);
//!
//! assert!(registry.set_device_dpi(96.0).is_err());
//! ```

use crate::error::ConfigError;
use crate::geometry::Size;

/// Points are converted at 50 dpi rather than 72; it matches device text
/// metrics better on the screens this targets.
const POINTS_DPI: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleConfig {
    device_dpi: f64,
    design_dpi: f64,
    factor: f64,
    /// Mirror output horizontally (right-to-left screens, rotated panels).
    pub mirror_horizontal: bool,
    pub mirror_vertical: bool,
}

impl ScaleConfig {
    pub fn new(device_dpi: f64, design_dpi: f64) -> Result<Self, ConfigError> {
        if device_dpi <= 0.0 {
            return Err(ConfigError::NonPositiveDpi(device_dpi));
        }
        if design_dpi <= 0.0 {
            return Err(ConfigError::NonPositiveDpi(design_dpi));
        }
        Ok(Self {
            device_dpi,
            design_dpi,
            factor: device_dpi / design_dpi,
            mirror_horizontal: false,
            mirror_vertical: false,
        })
    }

    /// One logical unit per pixel.
    pub fn identity() -> Self {
        Self {
            device_dpi: 96.0,
            design_dpi: 96.0,
            factor: 1.0,
            mirror_horizontal: false,
            mirror_vertical: false,
        }
    }

    pub fn with_mirroring(mut self, horizontal: bool, vertical: bool) -> Self {
        self.mirror_horizontal = horizontal;
        self.mirror_vertical = vertical;
        self
    }

    pub fn device_dpi(&self) -> f64 {
        self.device_dpi
    }

    pub fn design_dpi(&self) -> f64 {
        self.design_dpi
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn scale_from_logic(&self, logical: f32) -> f32 {
        (logical as f64 * self.factor) as f32
    }

    pub fn scale_to_logic(&self, px: f32) -> f32 {
        (px as f64 / self.factor) as f32
    }

    pub fn points_to_pixels(&self, points: f32) -> f32 {
        (points as f64 * self.device_dpi / POINTS_DPI) as f32
    }

    /// Whole-pixel extent of a logical size, never below zero.
    pub fn size_to_pixels(&self, size: Size) -> (u32, u32) {
        let w = self.scale_from_logic(size.width).max(0.0).ceil() as u32;
        let h = self.scale_from_logic(size.height).max(0.0).ceil() as u32;
        (w, h)
    }
}

/// Application-owned, one-time initialization of the scale configuration.
#[derive(Clone, Debug, Default)]
pub struct ScaleRegistry {
    device_dpi: Option<f64>,
    design_dpi: Option<u32>,
    mirror_horizontal: bool,
    mirror_vertical: bool,
}

impl ScaleRegistry {
    /// Device DPI can only be established once.
    pub fn set_device_dpi(&mut self, dpi: f64) -> Result<(), ConfigError> {
        if let Some(prev) = self.device_dpi {
            return Err(ConfigError::AlreadySet(prev));
        }
        if dpi <= 0.0 {
            return Err(ConfigError::NonPositiveDpi(dpi));
        }
        self.device_dpi = Some(dpi);
        log::debug!("device dpi set to {dpi}");
        Ok(())
    }

    /// Design DPI may be changed until the config is read. Defaults to the
    /// device DPI (factor 1).
    pub fn set_design_dpi(&mut self, dpi: u32) -> Result<(), ConfigError> {
        if dpi == 0 {
            return Err(ConfigError::NonPositiveDpi(0.0));
        }
        self.design_dpi = Some(dpi);
        Ok(())
    }

    pub fn set_mirroring(&mut self, horizontal: bool, vertical: bool) {
        self.mirror_horizontal = horizontal;
        self.mirror_vertical = vertical;
    }

    pub fn is_initialized(&self) -> bool {
        self.device_dpi.is_some()
    }

    pub fn config(&self) -> Result<ScaleConfig, ConfigError> {
        let device = self.device_dpi.ok_or(ConfigError::NotInitialized)?;
        let design = self.design_dpi.map(f64::from).unwrap_or(device);
        Ok(ScaleConfig::new(device, design)?
            .with_mirroring(self.mirror_horizontal, self.mirror_vertical))
    }
}
