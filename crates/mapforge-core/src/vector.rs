//! The three-component vector used for light colors.

use std::fmt;

use serde::Deserialize;

/// A three-component `f32` vector.
///
/// Used for the `-minlight r g b` color triple carried into the lighting
/// stage. Components are kept as plain floats; the external compiler decides
/// how to interpret them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(from = "[f32; 3]")]
pub struct Vec3 {
    x: f32,
    y: f32,
    z: f32,
}

impl Vec3 {
    /// Creates a new vector with the specified components.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns the x component.
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y component.
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns the z component.
    pub fn z(self) -> f32 {
        self.z
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for Vec3 {
    /// Formats the vector the way the settings tables print it: three
    /// whole-number components separated by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} {:.0} {:.0}", self.x, self.y, self.z)
    }
}
