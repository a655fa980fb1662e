//! Initial conditions, sampled at cell centres by [`Simulation`](crate::Simulation).

use std::f32::consts::PI;

use crate::{config::ConfigError, Float};

/// Initial state of a simulation as functions of the position `(x, y)`.
///
/// One-dimensional setups ignore `y`.
pub trait Setup {
    fn name(&self) -> &str;

    fn height(&self, x: Float, y: Float) -> Float;

    fn momentum_x(&self, x: Float, y: Float) -> Float;

    fn momentum_y(&self, _x: Float, _y: Float) -> Float {
        0.0
    }

    fn bathymetry(&self, _x: Float, _y: Float) -> Float {
        0.0
    }
}

impl<S: Setup + ?Sized> Setup for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn height(&self, x: Float, y: Float) -> Float {
        (**self).height(x, y)
    }

    fn momentum_x(&self, x: Float, y: Float) -> Float {
        (**self).momentum_x(x, y)
    }

    fn momentum_y(&self, x: Float, y: Float) -> Float {
        (**self).momentum_y(x, y)
    }

    fn bathymetry(&self, x: Float, y: Float) -> Float {
        (**self).bathymetry(x, y)
    }
}

impl<S: Setup + ?Sized> Setup for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn height(&self, x: Float, y: Float) -> Float {
        (**self).height(x, y)
    }

    fn momentum_x(&self, x: Float, y: Float) -> Float {
        (**self).momentum_x(x, y)
    }

    fn momentum_y(&self, x: Float, y: Float) -> Float {
        (**self).momentum_y(x, y)
    }

    fn bathymetry(&self, x: Float, y: Float) -> Float {
        (**self).bathymetry(x, y)
    }
}

/// Still water of two heights separated at `location`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamBreak1d {
    pub height_left: Float,
    pub height_right: Float,
    pub location: Float,
}

impl DamBreak1d {
    pub fn new(height_left: Float, height_right: Float, location: Float) -> Self {
        Self {
            height_left,
            height_right,
            location,
        }
    }
}

impl Default for DamBreak1d {
    fn default() -> Self {
        Self::new(10.0, 5.0, 5.0)
    }
}

impl Setup for DamBreak1d {
    fn name(&self) -> &str {
        "dam break 1d"
    }

    fn height(&self, x: Float, _y: Float) -> Float {
        if x < self.location {
            self.height_left
        } else {
            self.height_right
        }
    }

    fn momentum_x(&self, _x: Float, _y: Float) -> Float {
        0.0
    }
}

/// Two streams of equal height running into each other at `location`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShockShock1d {
    pub height: Float,
    pub momentum: Float,
    pub location: Float,
}

impl ShockShock1d {
    pub fn new(height: Float, momentum: Float, location: Float) -> Self {
        Self {
            height,
            momentum,
            location,
        }
    }
}

impl Setup for ShockShock1d {
    fn name(&self) -> &str {
        "shock-shock 1d"
    }

    fn height(&self, _x: Float, _y: Float) -> Float {
        self.height
    }

    fn momentum_x(&self, x: Float, _y: Float) -> Float {
        if x < self.location {
            self.momentum
        } else {
            -self.momentum
        }
    }
}

/// Two streams of equal height running apart at `location`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RareRare1d {
    pub height: Float,
    pub momentum: Float,
    pub location: Float,
}

impl RareRare1d {
    pub fn new(height: Float, momentum: Float, location: Float) -> Self {
        Self {
            height,
            momentum,
            location,
        }
    }
}

impl Setup for RareRare1d {
    fn name(&self) -> &str {
        "rare-rare 1d"
    }

    fn height(&self, _x: Float, _y: Float) -> Float {
        self.height
    }

    fn momentum_x(&self, x: Float, _y: Float) -> Float {
        if x < self.location {
            -self.momentum
        } else {
            self.momentum
        }
    }
}

/// Length of the channel of the hump setups.
pub const HUMP_CHANNEL: Float = 25.0;

fn in_channel(x: Float) -> bool {
    (0.0..=HUMP_CHANNEL).contains(&x)
}

fn hump(x: Float) -> Float {
    0.05 * (x - 10.0) * (x - 10.0)
}

/// Subcritical flow over a parabolic hump centred at `x = 10` in a channel
/// of length 25; Froude number below one everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Subcritical1d;

impl Setup for Subcritical1d {
    fn name(&self) -> &str {
        "subcritical flow 1d"
    }

    fn height(&self, x: Float, y: Float) -> Float {
        if in_channel(x) {
            -self.bathymetry(x, y)
        } else {
            0.0
        }
    }

    fn momentum_x(&self, x: Float, _y: Float) -> Float {
        if in_channel(x) {
            4.42
        } else {
            0.0
        }
    }

    fn bathymetry(&self, x: Float, _y: Float) -> Float {
        if 8.0 < x && x < 12.0 {
            -1.8 - hump(x)
        } else {
            -2.0
        }
    }
}

/// Supercritical flow over a parabolic hump centred at `x = 10`; the flow
/// crosses the critical Froude number on the hump.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Supercritical1d;

impl Setup for Supercritical1d {
    fn name(&self) -> &str {
        "supercritical flow 1d"
    }

    fn height(&self, x: Float, y: Float) -> Float {
        if in_channel(x) {
            -self.bathymetry(x, y)
        } else {
            0.0
        }
    }

    fn momentum_x(&self, x: Float, _y: Float) -> Float {
        if in_channel(x) {
            0.18
        } else {
            0.0
        }
    }

    fn bathymetry(&self, x: Float, _y: Float) -> Float {
        if (8.0..=12.0).contains(&x) {
            -0.13 - hump(x)
        } else {
            -0.33
        }
    }
}

/// Circular dam collapsing around a dry square obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamBreak2d {
    pub center: (Float, Float),
    pub radius: Float,
    pub height_inside: Float,
    pub height_outside: Float,
    /// Lower-left and upper-right corners of the obstacle.
    pub obstacle: ((Float, Float), (Float, Float)),
    pub obstacle_elevation: Float,
    pub depth: Float,
}

impl Default for DamBreak2d {
    fn default() -> Self {
        Self {
            center: (50.0, 50.0),
            radius: 10.0,
            height_inside: 10.0,
            height_outside: 5.0,
            obstacle: ((5.0, 5.0), (15.0, 15.0)),
            obstacle_elevation: 10.0,
            depth: 10.0,
        }
    }
}

impl DamBreak2d {
    fn on_obstacle(&self, x: Float, y: Float) -> bool {
        let ((x0, y0), (x1, y1)) = self.obstacle;
        (x0..=x1).contains(&x) && (y0..=y1).contains(&y)
    }
}

impl Setup for DamBreak2d {
    fn name(&self) -> &str {
        "dam break 2d"
    }

    fn height(&self, x: Float, y: Float) -> Float {
        if self.on_obstacle(x, y) {
            return 0.0;
        }

        let (cx, cy) = self.center;
        if (x - cx).hypot(y - cy) < self.radius {
            self.height_inside
        } else {
            self.height_outside
        }
    }

    fn momentum_x(&self, _x: Float, _y: Float) -> Float {
        0.0
    }

    fn bathymetry(&self, x: Float, y: Float) -> Float {
        if self.on_obstacle(x, y) {
            self.obstacle_elevation
        } else {
            -self.depth
        }
    }
}

/// Water depth forced onto every wet or dry cell of the tsunami setups, so
/// that shallow coasts neither dry out nor flood.
pub const MIN_DEPTH: Float = 20.0;

/// `max(-bin, MIN_DEPTH)` below sea level, dry above.
fn clamped_height(bin: Float, min_depth: Float) -> Float {
    if bin < 0.0 {
        (-bin).max(min_depth)
    } else {
        0.0
    }
}

/// Keeps the bathymetry at least `min_depth` away from the sea level.
fn clamped_bathymetry(bin: Float, min_depth: Float) -> Float {
    if bin < 0.0 {
        bin.min(-min_depth)
    } else {
        bin.max(min_depth)
    }
}

/// Tsunami along a measured bathymetry profile, triggered by a sinusoidal
/// sea-floor displacement between 175 km and 250 km.
///
/// Bin `i` of the profile covers `[i * bin_width, (i + 1) * bin_width)`;
/// positions past either end use the closest bin.
#[derive(Debug, Clone, PartialEq)]
pub struct TsunamiEvent1d {
    profile: Vec<Float>,
    pub bin_width: Float,
    pub min_depth: Float,
}

impl TsunamiEvent1d {
    pub const DISPLACEMENT: (Float, Float) = (175_000.0, 250_000.0);

    pub fn new(profile: Vec<Float>) -> Result<Self, ConfigError> {
        if profile.is_empty() {
            return Err(ConfigError::EmptyProfile);
        }
        Ok(Self {
            profile,
            bin_width: 250.0,
            min_depth: MIN_DEPTH,
        })
    }

    pub fn profile(&self) -> &[Float] {
        &self.profile
    }

    /// Length covered by the profile.
    pub fn length(&self) -> Float {
        self.profile.len() as Float * self.bin_width
    }

    fn bin(&self, x: Float) -> Float {
        // negative positions saturate to bin 0
        let index = ((x / self.bin_width) as usize).min(self.profile.len() - 1);
        self.profile[index]
    }

    fn displacement(&self, x: Float) -> Float {
        let (start, end) = Self::DISPLACEMENT;
        if start < x && x < end {
            10.0 * (PI * (x - start) / 37_500.0 + PI).sin()
        } else {
            0.0
        }
    }
}

impl Setup for TsunamiEvent1d {
    fn name(&self) -> &str {
        "tsunami event 1d"
    }

    fn height(&self, x: Float, _y: Float) -> Float {
        clamped_height(self.bin(x), self.min_depth)
    }

    fn momentum_x(&self, _x: Float, _y: Float) -> Float {
        0.0
    }

    fn bathymetry(&self, x: Float, _y: Float) -> Float {
        clamped_bathymetry(self.bin(x), self.min_depth) + self.displacement(x)
    }
}

/// Flat 100 m deep basin whose floor is displaced in the square
/// `[-radius, radius]²` around the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArtificialTsunami2d {
    pub depth: Float,
    pub radius: Float,
    pub amplitude: Float,
}

impl Default for ArtificialTsunami2d {
    fn default() -> Self {
        Self {
            depth: 100.0,
            radius: 500.0,
            amplitude: 5.0,
        }
    }
}

impl ArtificialTsunami2d {
    fn displacement(&self, x: Float, y: Float) -> Float {
        let r = self.radius;
        if !((-r..=r).contains(&x) && (-r..=r).contains(&y)) {
            return 0.0;
        }
        let f = ((x / r + 1.0) * PI).sin();
        let g = 1.0 - (y / r) * (y / r);
        self.amplitude * f * g
    }
}

impl Setup for ArtificialTsunami2d {
    fn name(&self) -> &str {
        "artificial tsunami 2d"
    }

    fn height(&self, _x: Float, _y: Float) -> Float {
        clamped_height(-self.depth, MIN_DEPTH)
    }

    fn momentum_x(&self, _x: Float, _y: Float) -> Float {
        0.0
    }

    fn bathymetry(&self, x: Float, y: Float) -> Float {
        clamped_bathymetry(-self.depth, MIN_DEPTH) + self.displacement(x, y)
    }
}

type Field = Box<dyn Fn(Float, Float) -> Float>;

/// Setup assembled from closures; unset fields are zero.
pub struct Custom {
    name: String,
    height: Field,
    momentum_x: Field,
    momentum_y: Field,
    bathymetry: Field,
}

impl Custom {
    pub fn new(name: impl Into<String>, height: impl Fn(Float, Float) -> Float + 'static) -> Self {
        Self {
            name: name.into(),
            height: Box::new(height),
            momentum_x: Box::new(|_, _| 0.0),
            momentum_y: Box::new(|_, _| 0.0),
            bathymetry: Box::new(|_, _| 0.0),
        }
    }

    pub fn with_momentum_x(mut self, f: impl Fn(Float, Float) -> Float + 'static) -> Self {
        self.momentum_x = Box::new(f);
        self
    }

    pub fn with_momentum_y(mut self, f: impl Fn(Float, Float) -> Float + 'static) -> Self {
        self.momentum_y = Box::new(f);
        self
    }

    pub fn with_bathymetry(mut self, f: impl Fn(Float, Float) -> Float + 'static) -> Self {
        self.bathymetry = Box::new(f);
        self
    }
}

impl std::fmt::Debug for Custom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Custom").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Setup for Custom {
    fn name(&self) -> &str {
        &self.name
    }

    fn height(&self, x: Float, y: Float) -> Float {
        (self.height)(x, y)
    }

    fn momentum_x(&self, x: Float, y: Float) -> Float {
        (self.momentum_x)(x, y)
    }

    fn momentum_y(&self, x: Float, y: Float) -> Float {
        (self.momentum_y)(x, y)
    }

    fn bathymetry(&self, x: Float, y: Float) -> Float {
        (self.bathymetry)(x, y)
    }
}
