//! Viewer configuration.
//!
//! Scale bounds, zoom step factors and surface sizing policy shared by the
//! gesture controller, the fit calculation and the UI host.

use crate::{PixelSize, ViewerError};
use serde::{Deserialize, Serialize};

/// What to do with the current transform when the drawing surface resizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizePolicy {
    /// Recompute the fit transform for the new surface size.
    #[default]
    Refit,
    /// Keep the current transform unchanged.
    Ignore,
}

/// Which way a zoom step goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Wheel convention: scrolling up (negative delta) zooms in.
    pub fn from_wheel_delta(delta_y: f64) -> Self {
        if delta_y < 0.0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        }
    }
}

/// Configuration for a viewer session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Smallest scale any zoom step may produce.
    pub scale_min: f64,
    /// Largest scale any zoom step may produce.
    pub scale_max: f64,
    /// Multiplier applied per wheel notch.
    pub wheel_zoom_factor: f64,
    /// Multiplier applied per zoom button press.
    pub button_zoom_factor: f64,
    /// Minimum surface width the host should allocate.
    pub min_surface_width: u32,
    /// Minimum surface height the host should allocate.
    pub min_surface_height: u32,
    pub resize_policy: ResizePolicy,
}

pub const SCALE_MIN: f64 = 0.1;
pub const SCALE_MAX: f64 = 5.0;
pub const ZOOM_FACTOR: f64 = 1.1;

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scale_min: SCALE_MIN,
            scale_max: SCALE_MAX,
            wheel_zoom_factor: ZOOM_FACTOR,
            button_zoom_factor: ZOOM_FACTOR,
            min_surface_width: 600,
            min_surface_height: 400,
            resize_policy: ResizePolicy::Refit,
        }
    }
}

impl ViewerConfig {
    /// Check the bounds and factors before any zoom relies on them.
    pub fn validate(&self) -> Result<(), ViewerError> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ViewerError::InvalidConfig(format!(
                    "{name} must be finite and positive, got {value}"
                )))
            }
        };
        positive("scale_min", self.scale_min)?;
        positive("scale_max", self.scale_max)?;
        positive("wheel_zoom_factor", self.wheel_zoom_factor)?;
        positive("button_zoom_factor", self.button_zoom_factor)?;

        if self.scale_min > self.scale_max {
            return Err(ViewerError::InvalidConfig(format!(
                "scale_min {} exceeds scale_max {}",
                self.scale_min, self.scale_max
            )));
        }
        if self.min_surface().is_empty() {
            return Err(ViewerError::InvalidConfig(format!(
                "minimum surface must be positive, got {}x{}",
                self.min_surface_width, self.min_surface_height
            )));
        }
        Ok(())
    }

    /// Only meaningful on a config that passed [`validate`](Self::validate).
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.scale_min, self.scale_max)
    }

    /// Multiplier for one step of `factor` in the given direction.
    pub fn step(factor: f64, direction: ZoomDirection) -> f64 {
        match direction {
            ZoomDirection::In => factor,
            ZoomDirection::Out => 1.0 / factor,
        }
    }

    pub fn min_surface(&self) -> PixelSize {
        PixelSize::new(self.min_surface_width, self.min_surface_height)
    }
}
