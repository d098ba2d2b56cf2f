//! Detector-level inputs consumed by candidate builders
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ECAL  ── SuperCluster ── seed BasicCluster                 │
//! │             │   └── member BasicClusters                    │
//! │             └── ClusterShape (e3x3 around the seed crystal) │
//! │                                                             │
//! │  TRACKER ── Track (inner state, reference-point state)      │
//! │                                                             │
//! │  BEAM ───── Vertex                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! These are produced upstream (tracking, clustering, vertexing) and are
//! treated as read-only here.

use crate::geometry::{Point3, ThreeVector};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ═══════════════════════════════════════════════════════════════════════════════
// TRACK
// ═══════════════════════════════════════════════════════════════════════════════

/// A reconstructed charged-particle track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Momentum at the reference point (closest approach to the beam)
    pub momentum: ThreeVector,
    /// Reference point
    pub vertex: Point3,
    /// Momentum at the innermost measured hit
    pub inner_momentum: ThreeVector,
    /// Position of the innermost measured hit
    pub inner_position: Point3,
    /// Charge, ±1
    pub charge: i32,
}

impl Track {
    /// Create a track whose inner state coincides with its reference point
    pub fn new(momentum: ThreeVector, vertex: Point3, charge: i32) -> Self {
        Self {
            momentum,
            vertex,
            inner_momentum: momentum,
            inner_position: vertex,
            charge,
        }
    }

    /// Set the state at the innermost hit
    pub fn with_inner_state(mut self, inner_position: Point3, inner_momentum: ThreeVector) -> Self {
        self.inner_position = inner_position;
        self.inner_momentum = inner_momentum;
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CALORIMETER CLUSTERS
// ═══════════════════════════════════════════════════════════════════════════════

/// A single calorimeter cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicCluster {
    /// Total energy (GeV)
    pub energy: f64,
    /// Energy-weighted position (cm)
    pub position: Point3,
}

impl BasicCluster {
    pub fn new(energy: f64, position: Point3) -> Self {
        Self { energy, position }
    }

    pub fn eta(&self) -> f64 {
        self.position.eta()
    }

    pub fn phi(&self) -> f64 {
        self.position.phi()
    }
}

/// An aggregate of adjacent clusters treated as one calorimetric measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperCluster {
    /// Corrected total energy
    pub energy: f64,
    /// Uncorrected sum of member cluster energies
    pub raw_energy: f64,
    /// Energy deposited in the preshower in front of the cluster
    pub preshower_energy: f64,
    /// Energy-weighted position
    pub position: Point3,
    /// Highest-energy member cluster
    pub seed: Arc<BasicCluster>,
    /// All member clusters, seed included
    pub clusters: Vec<Arc<BasicCluster>>,
}

impl SuperCluster {
    /// Create a supercluster from its seed; raw energy defaults to the total
    pub fn new(energy: f64, position: Point3, seed: Arc<BasicCluster>) -> Self {
        Self {
            energy,
            raw_energy: energy,
            preshower_energy: 0.0,
            position,
            clusters: vec![seed.clone()],
            seed,
        }
    }

    pub fn with_raw_energy(mut self, raw_energy: f64) -> Self {
        self.raw_energy = raw_energy;
        self
    }

    pub fn with_preshower_energy(mut self, preshower_energy: f64) -> Self {
        self.preshower_energy = preshower_energy;
        self
    }

    /// Replace the member list
    pub fn with_clusters(mut self, clusters: Vec<Arc<BasicCluster>>) -> Self {
        self.clusters = clusters;
        self
    }

    pub fn seed(&self) -> &Arc<BasicCluster> {
        &self.seed
    }

    pub fn clusters(&self) -> &[Arc<BasicCluster>] {
        &self.clusters
    }

    pub fn eta(&self) -> f64 {
        self.position.eta()
    }

    pub fn phi(&self) -> f64 {
        self.position.phi()
    }

    /// Transverse energy E / cosh(η)
    pub fn transverse_energy(&self) -> f64 {
        self.energy / self.eta().cosh()
    }
}

/// Shower-shape sums around the seed crystal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterShape {
    /// Energy in the 3x3 crystal window around the seed
    pub e3x3: f64,
}

impl ClusterShape {
    pub fn new(e3x3: f64) -> Self {
        Self { e3x3 }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// VERTEX
// ═══════════════════════════════════════════════════════════════════════════════

/// A reconstructed vertex
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3,
}

impl Vertex {
    pub fn new(position: Point3) -> Self {
        Self { position }
    }

    /// Squared distance from the beam axis
    pub fn perp2(&self) -> f64 {
        self.position.perp2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_super_cluster_defaults() {
        let seed = Arc::new(BasicCluster::new(8.0, Point3::new(129.0, 0.0, 10.0)));
        let sc = SuperCluster::new(10.0, Point3::new(129.0, 0.0, 10.0), seed.clone());

        assert_eq!(sc.raw_energy, 10.0);
        assert_eq!(sc.preshower_energy, 0.0);
        assert_eq!(sc.clusters().len(), 1);
        assert!(Arc::ptr_eq(sc.seed(), &seed));
    }

    #[test]
    fn test_super_cluster_transverse_energy() {
        let seed = Arc::new(BasicCluster::new(5.0, Point3::new(0.0, 129.0, 0.0)));
        let sc = SuperCluster::new(20.0, Point3::new(0.0, 129.0, 0.0), seed);
        assert!((sc.transverse_energy() - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_track_inner_state_defaults_to_reference() {
        let p = ThreeVector::new(1.0, 2.0, 3.0);
        let track = Track::new(p, Point3::zero(), -1);
        assert_eq!(track.inner_momentum, p);
        assert_eq!(track.inner_position, Point3::zero());

        let track = track.with_inner_state(Point3::new(4.0, 0.0, 1.0), ThreeVector::new(1.0, 1.0, 1.0));
        assert_eq!(track.momentum, p);
        assert!((track.inner_position.perp() - 4.0).abs() < 1e-10);
    }
}
