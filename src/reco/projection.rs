//! Track extrapolation to the electromagnetic calorimeter front face
//!
//! ```text
//!            endcap plane (|z| = 328 cm)
//!                 │
//!   barrel (ρ = 136.5 cm) ─────────────┐
//!                 │                    │
//!      track ●────┼──── ─ ─ ─ ─ ─ ─ ─ ─┼─►  straight line in (ρ, z) for η
//!   inner hit     │                    │    helix in (x, y) for φ
//!                 │                    │
//!   ──────────────┴─── beam axis ──────┴──── z
//! ```
//!
//! η is extrapolated along a straight line from the innermost hit. Tracks
//! that would land beyond the barrel/endcap boundary (|η| > 1.479) are
//! re-extrapolated onto the endcap plane instead.
//!
//! φ gets a first-order bending correction in the solenoid field:
//!
//! Δφ = -q · asin(0.3 · B · R_bend / (2 p_T))
//!
//! where R_bend is the lever arm between the innermost hit and the
//! effective magnet radius. Tracks whose bend ratio exceeds 1 curl up
//! before reaching the calorimeter and are left uncorrected.

use crate::error::CandidateError;
use crate::geometry::wrap_phi;
use crate::CandidateResult;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Radius of the barrel calorimeter front face (cm)
pub const BARREL_RADIUS_CM: f64 = 136.5;
/// |z| of the endcap calorimeter front face (cm)
pub const ENDCAP_Z_CM: f64 = 328.0;
/// |η| separating barrel from endcap
pub const BARREL_ENDCAP_ETA: f64 = 1.479;
/// Effective radius of the field volume in the barrel (m)
pub const MAGNET_BARREL_RADIUS_M: f64 = 1.357;
/// Effective half-length of the field volume in the endcap (m)
pub const MAGNET_ENDCAP_Z_M: f64 = 3.186;
/// Solenoid field (T)
pub const FIELD_TESLA: f64 = 4.0;

/// GeV / (T · m) conversion of the Lorentz-force radius
const PT_PER_TESLA_METRE: f64 = 0.3;

// ═══════════════════════════════════════════════════════════════════════════════
// GEOMETRY CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Calorimeter and magnet geometry used by the projector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaloGeometry {
    /// Barrel front-face radius (cm)
    pub barrel_radius_cm: f64,
    /// Endcap front-face |z| (cm)
    pub endcap_z_cm: f64,
    /// Barrel/endcap |η| boundary
    pub barrel_endcap_eta: f64,
    /// Effective magnet radius in the barrel (m)
    pub magnet_barrel_radius_m: f64,
    /// Effective magnet half-length in the endcap (m)
    pub magnet_endcap_z_m: f64,
    /// Field strength (T)
    pub field_tesla: f64,
}

impl Default for CaloGeometry {
    fn default() -> Self {
        Self {
            barrel_radius_cm: BARREL_RADIUS_CM,
            endcap_z_cm: ENDCAP_Z_CM,
            barrel_endcap_eta: BARREL_ENDCAP_ETA,
            magnet_barrel_radius_m: MAGNET_BARREL_RADIUS_M,
            magnet_endcap_z_m: MAGNET_ENDCAP_Z_M,
            field_tesla: FIELD_TESLA,
        }
    }
}

impl CaloGeometry {
    /// Parse a geometry from JSON and validate it
    pub fn from_json(json: &str) -> CandidateResult<Self> {
        let geometry: Self = serde_json::from_str(json)?;
        geometry.validate()?;
        Ok(geometry)
    }

    /// Check that every length and the field are positive and finite
    pub fn validate(&self) -> CandidateResult<()> {
        let fields = [
            ("barrel_radius_cm", self.barrel_radius_cm),
            ("endcap_z_cm", self.endcap_z_cm),
            ("barrel_endcap_eta", self.barrel_endcap_eta),
            ("magnet_barrel_radius_m", self.magnet_barrel_radius_m),
            ("magnet_endcap_z_m", self.magnet_endcap_z_m),
            ("field_tesla", self.field_tesla),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(CandidateError::InvalidGeometry(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Bending term 0.3 · B · R_bend / 2 for a track starting at `r_start_m`
    fn bend(&self, r_start_m: f64) -> (f64, f64) {
        let r_bend = self.magnet_barrel_radius_m - r_start_m;
        (r_bend, PT_PER_TESLA_METRE * self.field_tesla * r_bend / 2.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROJECTOR
// ═══════════════════════════════════════════════════════════════════════════════

/// Stateless extrapolator from a track's inner state to the calorimeter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaloSurfaceProjector {
    geometry: CaloGeometry,
}

impl CaloSurfaceProjector {
    pub fn new(geometry: CaloGeometry) -> Self {
        Self { geometry }
    }

    /// Pseudorapidity at the calorimeter front face
    ///
    /// `z_vertex` and `surface_radius` are the z and ρ of the track's
    /// innermost hit, in cm. η = 0 cannot be extrapolated and is returned
    /// unchanged.
    pub fn project_eta(&self, eta: f64, z_vertex: f64, surface_radius: f64) -> f64 {
        if eta == 0.0 {
            log::warn!("eta equals zero, not extrapolating to the calorimeter surface");
            return eta;
        }

        let g = &self.geometry;
        let z_ecal = (g.barrel_radius_cm - surface_radius) * eta.sinh() + z_vertex;
        let theta = if z_ecal != 0.0 {
            (g.barrel_radius_cm / z_ecal).atan()
        } else {
            0.0
        };
        let projected = eta_from_theta(theta);

        if projected.abs() <= g.barrel_endcap_eta {
            return projected;
        }

        let z_end = if eta < 0.0 { -g.endcap_z_cm } else { g.endcap_z_cm };
        let rho_at_endcap = (z_end - z_vertex) / eta.sinh();
        eta_from_theta(((rho_at_endcap + surface_radius) / z_end).atan())
    }

    /// Azimuth at the calorimeter front face, corrected for bending
    ///
    /// `surface_radius` is ρ of the innermost hit in cm. Tracks too soft
    /// to reach the calorimeter keep their input φ.
    pub fn project_phi(&self, pt: f64, eta: f64, phi: f64, charge: i32, surface_radius: f64) -> f64 {
        let g = &self.geometry;
        let r_start = surface_radius / 100.0;
        let (r_bend, bend) = g.bend(r_start);

        // Threshold itself uses the barrel formula
        let ratio = if eta.abs() <= g.barrel_endcap_eta {
            bend / pt
        } else {
            let r_hit = g.magnet_endcap_z_m / eta.abs().sinh();
            ((r_hit - r_start) / r_bend) * bend / pt
        };

        if ratio.abs() <= 1.0 {
            wrap_phi(phi - ratio.asin() * f64::from(charge))
        } else {
            log::warn!(
                "pt {:.3} too low to reach the calorimeter (bend ratio {:.3}), not correcting phi",
                pt,
                ratio
            );
            phi
        }
    }
}

/// η = -ln(tan(θ/2)) with θ folded into [0, π)
fn eta_from_theta(theta: f64) -> f64 {
    let theta = if theta < 0.0 { theta + PI } else { theta };
    -(0.5 * theta).tan().ln()
}

/// [`CaloSurfaceProjector::project_eta`] with the default geometry
pub fn project_eta(eta: f64, z_vertex: f64, surface_radius: f64) -> f64 {
    CaloSurfaceProjector::default().project_eta(eta, z_vertex, surface_radius)
}

/// [`CaloSurfaceProjector::project_phi`] with the default geometry
pub fn project_phi(pt: f64, eta: f64, phi: f64, charge: i32, surface_radius: f64) -> f64 {
    CaloSurfaceProjector::default().project_phi(pt, eta, phi, charge, surface_radius)
}
