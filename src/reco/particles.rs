//! Four-momenta and the candidate interface shared by reconstructed objects
//!
//! Every reconstructed object exposes the same base quantities:
//!
//! | Quantity     | Meaning                                   |
//! |--------------|-------------------------------------------|
//! | charge       | Electric charge in units of e             |
//! | p4           | Four-momentum (E, p⃗) in GeV               |
//! | vertex       | Reference point in cm                     |
//! | pdg id       | Particle-data-group code of the hypothesis|
//!
//! Calorimeter-seeded candidates additionally expose their supercluster,
//! which is what overlap checks compare.

use crate::geometry::{Point3, ThreeVector};
use crate::reco::detector::SuperCluster;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ═══════════════════════════════════════════════════════════════════════════════
// FOUR-MOMENTUM
// ═══════════════════════════════════════════════════════════════════════════════

/// Four-momentum vector in natural units (c = 1)
///
/// p^μ = (E, p_x, p_y, p_z)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FourMomentum {
    /// Energy component (timelike)
    pub e: f64,
    pub px: f64,
    pub py: f64,
    pub pz: f64,
}

impl FourMomentum {
    /// Create a new four-momentum
    pub fn new(e: f64, px: f64, py: f64, pz: f64) -> Self {
        Self { e, px, py, pz }
    }

    /// Combine a 3-momentum with an energy
    ///
    /// Nothing forces E² - |p|² to be physical here; callers building
    /// calorimeter-scaled momenta rely on that.
    pub fn from_momentum(momentum: ThreeVector, energy: f64) -> Self {
        Self::new(energy, momentum.x, momentum.y, momentum.z)
    }

    /// Spatial part
    pub fn momentum(&self) -> ThreeVector {
        ThreeVector::new(self.px, self.py, self.pz)
    }

    /// Invariant mass squared: m² = E² - |p|²
    pub fn mass_squared(&self) -> f64 {
        self.e.powi(2) - self.px.powi(2) - self.py.powi(2) - self.pz.powi(2)
    }

    /// 3-momentum magnitude |p|
    pub fn three_momentum_magnitude(&self) -> f64 {
        self.momentum().mag()
    }

    /// Transverse momentum p_T
    pub fn transverse_momentum(&self) -> f64 {
        self.momentum().perp()
    }

    /// Transverse energy E_T = E sin θ
    pub fn transverse_energy(&self) -> f64 {
        let p = self.three_momentum_magnitude();
        if p > 0.0 {
            self.e * self.transverse_momentum() / p
        } else {
            0.0
        }
    }

    /// Pseudorapidity of the spatial part
    pub fn pseudorapidity(&self) -> f64 {
        self.momentum().eta()
    }
}

impl std::ops::Add for FourMomentum {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(
            self.e + other.e,
            self.px + other.px,
            self.py + other.py,
            self.pz + other.pz,
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CANDIDATE INTERFACE
// ═══════════════════════════════════════════════════════════════════════════════

/// Base interface of a reconstructed candidate
pub trait RecoCandidate {
    /// Electric charge
    fn charge(&self) -> i32;

    /// Four-momentum
    fn p4(&self) -> FourMomentum;

    /// Reference point
    fn vertex(&self) -> Point3;

    /// Particle-data-group code
    fn pdg_id(&self) -> i32;

    /// Supercluster backing this candidate, if it is calorimeter-seeded
    fn super_cluster(&self) -> Option<&Arc<SuperCluster>> {
        None
    }
}

/// Two superclusters overlap when they are the same reconstructed object
pub fn check_overlap(a: &Arc<SuperCluster>, b: &Arc<SuperCluster>) -> bool {
    Arc::ptr_eq(a, b)
}

/// A candidate with kinematics only, no detector references
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeafCandidate {
    pub charge: i32,
    pub p4: FourMomentum,
    pub vertex: Point3,
    pub pdg_id: i32,
}

impl LeafCandidate {
    /// Create a new leaf candidate at the origin
    pub fn new(charge: i32, p4: FourMomentum) -> Self {
        Self {
            charge,
            p4,
            vertex: Point3::zero(),
            pdg_id: 0,
        }
    }

    /// Set the particle-data-group code
    pub fn with_pdg_id(mut self, pdg_id: i32) -> Self {
        self.pdg_id = pdg_id;
        self
    }
}

impl RecoCandidate for LeafCandidate {
    fn charge(&self) -> i32 {
        self.charge
    }

    fn p4(&self) -> FourMomentum {
        self.p4
    }

    fn vertex(&self) -> Point3 {
        self.vertex
    }

    fn pdg_id(&self) -> i32 {
        self.pdg_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reco::detector::BasicCluster;

    #[test]
    fn test_four_momentum_mass() {
        let massless = FourMomentum::new(5.0, 3.0, 4.0, 0.0);
        assert!(massless.mass_squared().abs() < 1e-10);

        let at_rest = FourMomentum::new(2.0, 0.0, 0.0, 0.0);
        assert!((at_rest.mass_squared() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_four_momentum_addition() {
        let p1 = FourMomentum::new(10.0, 1.0, 0.0, 0.0);
        let p2 = FourMomentum::new(10.0, -1.0, 0.0, 0.0);
        let sum = p1 + p2;

        assert!((sum.e - 20.0).abs() < 1e-10);
        assert!(sum.px.abs() < 1e-10);
    }

    #[test]
    fn test_transverse_energy() {
        let p = FourMomentum::from_momentum(ThreeVector::new(3.0, 0.0, 4.0), 10.0);
        assert!((p.transverse_energy() - 6.0).abs() < 1e-10);
        assert_eq!(FourMomentum::default().transverse_energy(), 0.0);
    }

    #[test]
    fn test_leaf_candidate_has_no_super_cluster() {
        let leaf = LeafCandidate::new(-1, FourMomentum::new(1.0, 0.0, 0.0, 1.0)).with_pdg_id(11);
        assert!(leaf.super_cluster().is_none());
        assert_eq!(leaf.pdg_id(), 11);
        assert_eq!(leaf.vertex(), Point3::zero());
    }

    #[test]
    fn test_overlap_is_identity() {
        let seed = Arc::new(BasicCluster::new(10.0, Point3::new(100.0, 0.0, 0.0)));
        let a = Arc::new(SuperCluster::new(10.0, Point3::new(100.0, 0.0, 0.0), seed.clone()));
        let b = Arc::new(SuperCluster::new(10.0, Point3::new(100.0, 0.0, 0.0), seed));

        assert!(check_overlap(&a, &a.clone()));
        assert!(!check_overlap(&a, &b));
    }
}
