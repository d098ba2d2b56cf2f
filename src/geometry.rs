//! Cartesian geometry in the detector frame
//!
//! The beam runs along z. Transverse quantities are measured in the x-y
//! plane:
//!
//! ρ = √(x² + y²)
//! θ = atan2(ρ, z)
//! η = -ln(tan(θ/2)) = asinh(z/ρ)
//! φ = atan2(y, x)

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::{Add, Mul, Sub};

/// Pseudorapidity reported for vectors lying on the beam axis
const BEAM_AXIS_ETA: f64 = 22756.0;

/// A 3-vector in the detector frame (positions in cm, momenta in GeV)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreeVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Positions share the vector representation
pub type Point3 = ThreeVector;

impl ThreeVector {
    /// Create a new vector
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The null vector
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Build a vector from (ρ, η, φ) cylindrical-collider coordinates
    pub fn from_rho_eta_phi(rho: f64, eta: f64, phi: f64) -> Self {
        Self::new(rho * phi.cos(), rho * phi.sin(), rho * eta.sinh())
    }

    /// Squared magnitude
    #[inline]
    pub fn mag2(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude |v|
    #[inline]
    pub fn mag(&self) -> f64 {
        self.mag2().sqrt()
    }

    /// Squared transverse component
    #[inline]
    pub fn perp2(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Transverse component ρ (p_T for momenta)
    #[inline]
    pub fn perp(&self) -> f64 {
        self.perp2().sqrt()
    }

    /// Polar angle θ in [0, π]
    pub fn theta(&self) -> f64 {
        if self.x == 0.0 && self.y == 0.0 && self.z == 0.0 {
            0.0
        } else {
            self.perp().atan2(self.z)
        }
    }

    /// Pseudorapidity
    ///
    /// Zero for the null vector; ±(|z| + 22756) on the beam axis.
    pub fn eta(&self) -> f64 {
        let rho = self.perp();
        if rho > 0.0 {
            (self.z / rho).asinh()
        } else if self.z == 0.0 {
            0.0
        } else if self.z > 0.0 {
            self.z + BEAM_AXIS_ETA
        } else {
            self.z - BEAM_AXIS_ETA
        }
    }

    /// Azimuthal angle φ in [-π, π]
    pub fn phi(&self) -> f64 {
        if self.x == 0.0 && self.y == 0.0 {
            0.0
        } else {
            self.y.atan2(self.x)
        }
    }

    /// Unit vector along this direction; the null vector is returned as is
    pub fn unit(&self) -> Self {
        let m = self.mag();
        if m > 0.0 {
            *self * (1.0 / m)
        } else {
            *self
        }
    }
}

impl Add for ThreeVector {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for ThreeVector {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for ThreeVector {
    type Output = Self;
    fn mul(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }
}

/// Map an azimuthal difference into (-π, π] with a single ±2π shift
#[inline]
pub fn wrap_phi(dphi: f64) -> f64 {
    if dphi > PI {
        dphi - 2.0 * PI
    } else if dphi <= -PI {
        dphi + 2.0 * PI
    } else {
        dphi
    }
}
