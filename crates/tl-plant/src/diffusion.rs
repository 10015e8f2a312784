//! Layered heat diffusion body.
//!
//! A chain of `N` lumped layers. Layer 0 is the driven (input) end and is
//! overwritten by the boundary value on every tick; layer `N - 1` is the
//! observed (output) end.
//!
//! One tick visits adjacent pairs left to right. For pair `(i, i + 1)` the
//! flux is `E = gamma * (T[i] - T[i + 1])`, moved from layer `i` to layer
//! `i + 1`. Each pair sees values already updated by the pairs before it
//! in the same tick, so the scheme is sequential rather than simultaneous.
//! Diffusion conserves the layer sum; only the boundary write changes it.

use serde::Serialize;
use tl_core::{Real, check_finite, sum};
use tracing::trace;

use crate::error::{PlantError, PlantResult};

/// Default number of layers.
pub const DEFAULT_LAYER_COUNT: usize = 10;
/// Default fraction of the temperature difference exchanged per tick.
pub const DEFAULT_DIFFUSION_RATE: Real = 0.1;

/// Layered diffusion body.
///
/// # Example
///
/// ```
/// use tl_plant::DiffusionBody;
///
/// let mut body = DiffusionBody::default();
/// for _ in 0..500 {
///     body.update(1.0);
/// }
/// assert!(body.right_value() > 0.5);
/// assert_eq!(body.left_value(), body.layers()[0]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiffusionBody {
    layers: Vec<Real>,
    diffusion_rate: Real,
}

impl DiffusionBody {
    /// Create a body with all layers at zero.
    ///
    /// # Errors
    ///
    /// Returns error if `layer_count < 2` or `diffusion_rate` is outside `(0, 1)`.
    pub fn new(layer_count: usize, diffusion_rate: Real) -> PlantResult<Self> {
        Self::with_temperatures(vec![0.0; layer_count], diffusion_rate)
    }

    /// Create a body with explicit initial layer temperatures.
    pub fn with_temperatures(layers: Vec<Real>, diffusion_rate: Real) -> PlantResult<Self> {
        if layers.len() < 2 {
            return Err(PlantError::InvalidArg {
                what: "layer_count must be at least 2",
            });
        }
        if !(diffusion_rate > 0.0 && diffusion_rate < 1.0) {
            return Err(PlantError::InvalidArg {
                what: "diffusion_rate must be in (0, 1)",
            });
        }
        check_finite(&layers, "layer temperature")?;
        Ok(Self {
            layers,
            diffusion_rate,
        })
    }

    /// Advance one tick with `input_value` forced onto layer 0.
    pub fn update(&mut self, input_value: Real) {
        self.layers[0] = input_value;
        for i in 0..self.layers.len() - 1 {
            let flux = self.diffusion_rate * (self.layers[i] - self.layers[i + 1]);
            self.layers[i + 1] += flux;
            self.layers[i] -= flux;
        }
        trace!(
            input = input_value,
            output = self.right_value(),
            "diffusion tick"
        );
    }

    /// Temperature of the driven layer.
    pub fn left_value(&self) -> Real {
        self.layers[0]
    }

    /// Temperature of the observed layer.
    pub fn right_value(&self) -> Real {
        self.layers[self.layers.len() - 1]
    }

    pub fn layers(&self) -> &[Real] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn diffusion_rate(&self) -> Real {
        self.diffusion_rate
    }

    /// Sum of all layer temperatures.
    pub fn total_heat(&self) -> Real {
        sum(&self.layers)
    }
}

impl Default for DiffusionBody {
    fn default() -> Self {
        Self {
            layers: vec![0.0; DEFAULT_LAYER_COUNT],
            diffusion_rate: DEFAULT_DIFFUSION_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let body = DiffusionBody::default();
        assert_eq!(body.layer_count(), 10);
        assert_eq!(body.diffusion_rate(), 0.1);
        assert_eq!(body.total_heat(), 0.0);
        assert_eq!(body, DiffusionBody::new(10, 0.1).unwrap());
    }

    #[test]
    fn invalid_params() {
        assert!(DiffusionBody::new(1, 0.1).is_err());
        assert_eq!(
            DiffusionBody::new(0, 0.1),
            Err(PlantError::InvalidArg {
                what: "layer_count must be at least 2"
            })
        );
        assert!(DiffusionBody::new(3, 0.0).is_err());
        assert!(DiffusionBody::new(3, 1.0).is_err());
        assert!(DiffusionBody::new(3, Real::NAN).is_err());
        assert!(matches!(
            DiffusionBody::with_temperatures(vec![0.0, Real::INFINITY], 0.5),
            Err(PlantError::Backend { .. })
        ));
    }

    #[test]
    fn single_tick_is_sequential() {
        let mut body = DiffusionBody::new(3, 0.5).unwrap();
        body.update(4.0);
        // pair (0,1): E = 2 -> [2, 2, 0]; pair (1,2): E = 1 -> [2, 1, 1]
        assert_eq!(body.layers(), &[2.0, 1.0, 1.0]);
        assert_eq!(body.left_value(), 2.0);
        assert_eq!(body.right_value(), 1.0);
    }

    #[test]
    fn boundary_write_replaces_layer_zero() {
        let mut body = DiffusionBody::with_temperatures(vec![5.0, 0.0], 0.25).unwrap();
        body.update(-1.0);
        // layer 0 overwritten to -1 before diffusion: E = -0.25
        assert_eq!(body.layers(), &[-0.75, -0.25]);
    }
}
