//! Track-matched electron kinematics
//!
//! An electron candidate pairs one track with one supercluster. Two sets
//! of match observables are derived at construction:
//!
//! - supercluster vs. the track extrapolated from its innermost hit to the
//!   calorimeter front face (E/p at vertex, Δη, Δφ)
//! - seed cluster vs. the track state propagated to the seed cluster
//!   (E/p_out, Δη, Δφ)
//!
//! The four-momentum takes its direction from the track and its energy
//! from the supercluster. The spatial part is the track momentum scaled by
//! E(SC)/|p|, so E² - |p|² is not constrained to the electron mass.

use crate::geometry::{wrap_phi, Point3, ThreeVector};
use crate::reco::detector::{SuperCluster, Track};
use crate::reco::particles::{FourMomentum, RecoCandidate};
use crate::reco::projection::CaloSurfaceProjector;
use std::sync::Arc;

/// E/p when the momentum it would divide by is not positive
pub const UNDEFINED_E_OVER_P: f64 = -1.0;

/// Electron candidate with supercluster/track match observables
#[derive(Debug, Clone)]
pub struct ElectronKinematics {
    charge: i32,
    p4: FourMomentum,

    super_cluster: Arc<SuperCluster>,
    track: Arc<Track>,

    track_position_at_vtx: Point3,
    track_momentum_at_vtx: ThreeVector,
    track_position_at_calo: Point3,
    track_momentum_at_calo: ThreeVector,
    track_position_at_seed: Point3,
    track_momentum_out: ThreeVector,

    e_super_cluster_over_p: f64,
    delta_eta_super_cluster_at_vtx: f64,
    delta_phi_super_cluster_at_vtx: f64,
    e_seed_cluster_over_pout: f64,
    delta_eta_seed_cluster_at_calo: f64,
    delta_phi_seed_cluster_at_calo: f64,
}

impl ElectronKinematics {
    /// Build with the default calorimeter geometry
    ///
    /// `super_position`/`super_momentum` is the track state nearest the
    /// supercluster, `seed_position`/`seed_momentum` the outgoing state at
    /// the seed cluster.
    pub fn new(
        super_cluster: Arc<SuperCluster>,
        track: Arc<Track>,
        super_position: Point3,
        super_momentum: ThreeVector,
        seed_position: Point3,
        seed_momentum: ThreeVector,
    ) -> Self {
        Self::with_projector(
            &CaloSurfaceProjector::default(),
            super_cluster,
            track,
            super_position,
            super_momentum,
            seed_position,
            seed_momentum,
        )
    }

    /// Build with an explicit calorimeter projector
    ///
    /// The four-momentum and E/p at vertex use the track momentum at its
    /// reference point (`Track::momentum`); only the η/φ extrapolation
    /// starts from the innermost hit.
    pub fn with_projector(
        projector: &CaloSurfaceProjector,
        super_cluster: Arc<SuperCluster>,
        track: Arc<Track>,
        super_position: Point3,
        super_momentum: ThreeVector,
        seed_position: Point3,
        seed_momentum: ThreeVector,
    ) -> Self {
        let sc_energy = super_cluster.energy;
        let track_momentum = track.momentum;
        let p = track_momentum.mag();

        // Unguarded: a null track momentum gives a non-finite p4
        let p4 = FourMomentum::from_momentum(track_momentum * (sc_energy / p), sc_energy);

        let e_super_cluster_over_p = if p != 0.0 {
            sc_energy / p
        } else {
            UNDEFINED_E_OVER_P
        };

        let inner_momentum = track.inner_momentum;
        let inner_position = track.inner_position;
        let track_eta = projector.project_eta(
            inner_momentum.eta(),
            inner_position.z,
            inner_position.perp(),
        );
        let track_phi = projector.project_phi(
            inner_momentum.perp(),
            inner_momentum.eta(),
            inner_momentum.phi(),
            track.charge,
            inner_position.perp(),
        );

        let sc_position = super_cluster.position;
        let delta_eta_super_cluster_at_vtx = sc_position.eta() - track_eta;
        let delta_phi_super_cluster_at_vtx = wrap_phi(sc_position.phi() - track_phi);

        let seed = super_cluster.seed();
        let p_out = seed_momentum.mag();
        let e_seed_cluster_over_pout = if p_out > 0.0 {
            seed.energy / p_out
        } else {
            UNDEFINED_E_OVER_P
        };
        let delta_eta_seed_cluster_at_calo = seed.eta() - seed_position.eta();
        let delta_phi_seed_cluster_at_calo = wrap_phi(seed.phi() - seed_position.phi());

        log::debug!(
            "electron: E/p {:.3}, dEta {:.4}, dPhi {:.4}, E/p_out {:.3}",
            e_super_cluster_over_p,
            delta_eta_super_cluster_at_vtx,
            delta_phi_super_cluster_at_vtx,
            e_seed_cluster_over_pout
        );

        Self {
            charge: track.charge,
            p4,
            track_position_at_vtx: track.vertex,
            track_momentum_at_vtx: track_momentum,
            track_position_at_calo: super_position,
            track_momentum_at_calo: super_momentum,
            track_position_at_seed: seed_position,
            track_momentum_out: seed_momentum,
            super_cluster,
            track,
            e_super_cluster_over_p,
            delta_eta_super_cluster_at_vtx,
            delta_phi_super_cluster_at_vtx,
            e_seed_cluster_over_pout,
            delta_eta_seed_cluster_at_calo,
            delta_phi_seed_cluster_at_calo,
        }
    }

    pub fn super_cluster(&self) -> &Arc<SuperCluster> {
        &self.super_cluster
    }

    pub fn track(&self) -> &Arc<Track> {
        &self.track
    }

    pub fn track_position_at_vtx(&self) -> Point3 {
        self.track_position_at_vtx
    }

    pub fn track_momentum_at_vtx(&self) -> ThreeVector {
        self.track_momentum_at_vtx
    }

    pub fn track_position_at_calo(&self) -> Point3 {
        self.track_position_at_calo
    }

    pub fn track_momentum_at_calo(&self) -> ThreeVector {
        self.track_momentum_at_calo
    }

    /// Track position propagated to the seed cluster
    pub fn track_position_at_seed(&self) -> Point3 {
        self.track_position_at_seed
    }

    /// Track momentum at the seed cluster
    pub fn track_momentum_out(&self) -> ThreeVector {
        self.track_momentum_out
    }

    /// E(SC) / |p| at the reference point, or -1
    pub fn e_super_cluster_over_p(&self) -> f64 {
        self.e_super_cluster_over_p
    }

    pub fn delta_eta_super_cluster_at_vtx(&self) -> f64 {
        self.delta_eta_super_cluster_at_vtx
    }

    pub fn delta_phi_super_cluster_at_vtx(&self) -> f64 {
        self.delta_phi_super_cluster_at_vtx
    }

    /// E(seed) / |p_out|, or -1
    pub fn e_seed_cluster_over_pout(&self) -> f64 {
        self.e_seed_cluster_over_pout
    }

    pub fn delta_eta_seed_cluster_at_calo(&self) -> f64 {
        self.delta_eta_seed_cluster_at_calo
    }

    pub fn delta_phi_seed_cluster_at_calo(&self) -> f64 {
        self.delta_phi_seed_cluster_at_calo
    }
}

impl RecoCandidate for ElectronKinematics {
    fn charge(&self) -> i32 {
        self.charge
    }

    fn p4(&self) -> FourMomentum {
        self.p4
    }

    fn vertex(&self) -> Point3 {
        self.track_position_at_vtx
    }

    fn pdg_id(&self) -> i32 {
        -11 * self.charge
    }

    fn super_cluster(&self) -> Option<&Arc<SuperCluster>> {
        Some(&self.super_cluster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reco::detector::BasicCluster;
    use crate::reco::projection::{project_eta, project_phi};
    use std::f64::consts::PI;

    fn barrel_cluster(energy: f64, eta: f64, phi: f64) -> Arc<SuperCluster> {
        let position = Point3::from_rho_eta_phi(129.0, eta, phi);
        let seed = Arc::new(BasicCluster::new(0.75 * energy, position));
        Arc::new(SuperCluster::new(energy, position, seed))
    }

    fn electron(sc: Arc<SuperCluster>, track: Track, seed_momentum: ThreeVector) -> ElectronKinematics {
        let at_calo = Point3::from_rho_eta_phi(129.0, 0.4, 1.0);
        ElectronKinematics::new(
            sc,
            Arc::new(track),
            at_calo,
            ThreeVector::from_rho_eta_phi(24.0, 0.4, 1.0),
            at_calo,
            seed_momentum,
        )
    }

    #[test]
    fn test_four_momentum_takes_cluster_energy() {
        let sc = barrel_cluster(30.0, 0.4, 1.0);
        let track = Track::new(ThreeVector::new(10.0, 0.0, 5.0), Point3::zero(), -1);
        let ele = electron(sc, track, ThreeVector::new(8.0, 0.0, 4.0));

        let p4 = ele.p4();
        assert_eq!(p4.e, 30.0);
        assert!((p4.three_momentum_magnitude() - 30.0).abs() < 1e-9);
        assert!((p4.pz / p4.px - 0.5).abs() < 1e-12);
        assert_eq!(ele.charge(), -1);
        assert_eq!(ele.pdg_id(), 11);
    }

    #[test]
    fn test_e_over_p_at_vertex() {
        let sc = barrel_cluster(30.0, 0.4, 1.0);
        let track = Track::new(ThreeVector::new(3.0, 4.0, 0.0), Point3::zero(), 1);
        let ele = electron(sc, track, ThreeVector::new(3.0, 4.0, 0.0));
        assert!((ele.e_super_cluster_over_p() - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_kinematics_use_reference_point_momentum() {
        let sc = barrel_cluster(30.0, 0.4, 1.0);
        let track = Track::new(ThreeVector::new(3.0, 4.0, 0.0), Point3::zero(), 1)
            .with_inner_state(Point3::new(4.0, 0.0, 0.0), ThreeVector::new(0.0, 0.0, 10.0));
        let ele = electron(sc, track, ThreeVector::new(3.0, 4.0, 0.0));

        assert!((ele.e_super_cluster_over_p() - 6.0).abs() < 1e-12);
        let p4 = ele.p4();
        assert!((p4.px - 18.0).abs() < 1e-9);
        assert!((p4.py - 24.0).abs() < 1e-9);
        assert_eq!(p4.pz, 0.0);
    }

    #[test]
    fn test_null_track_momentum_gives_sentinel() {
        let sc = barrel_cluster(30.0, 0.4, 1.0);
        let track = Track::new(ThreeVector::zero(), Point3::zero(), 1);
        let ele = electron(sc, track, ThreeVector::zero());

        assert_eq!(ele.e_super_cluster_over_p(), UNDEFINED_E_OVER_P);
        assert_eq!(ele.e_seed_cluster_over_pout(), UNDEFINED_E_OVER_P);
        assert!(!ele.p4().px.is_finite());
    }

    #[test]
    fn test_seed_match() {
        let sc = barrel_cluster(40.0, 0.5, 0.9);
        let seed_position = Point3::from_rho_eta_phi(129.0, 0.45, 0.95);
        let seed_momentum = ThreeVector::new(0.0, 15.0, 0.0);
        let ele = ElectronKinematics::new(
            sc,
            Arc::new(Track::new(ThreeVector::new(10.0, 10.0, 5.0), Point3::zero(), 1)),
            seed_position,
            seed_momentum,
            seed_position,
            seed_momentum,
        );

        assert!((ele.e_seed_cluster_over_pout() - 30.0 / 15.0).abs() < 1e-12);
        assert!((ele.delta_eta_seed_cluster_at_calo() - 0.05).abs() < 1e-9);
        assert!((ele.delta_phi_seed_cluster_at_calo() + 0.05).abs() < 1e-9);
        assert_eq!(ele.track_position_at_seed(), seed_position);
        assert_eq!(ele.track_momentum_out(), seed_momentum);
    }

    #[test]
    fn test_vertex_match_uses_projection() {
        let sc = barrel_cluster(25.0, 0.3, -0.2);
        let inner_position = Point3::new(4.0, 0.0, 2.0);
        let inner_momentum = ThreeVector::from_rho_eta_phi(20.0, 0.28, -0.15);
        let track = Track::new(ThreeVector::from_rho_eta_phi(21.0, 0.28, -0.16), Point3::zero(), -1)
            .with_inner_state(inner_position, inner_momentum);
        let ele = electron(sc.clone(), track, ThreeVector::new(1.0, 0.0, 0.0));

        let eta = project_eta(inner_momentum.eta(), 2.0, 4.0);
        let phi = project_phi(20.0, inner_momentum.eta(), inner_momentum.phi(), -1, 4.0);
        assert!((ele.delta_eta_super_cluster_at_vtx() - (sc.eta() - eta)).abs() < 1e-9);
        assert!((ele.delta_phi_super_cluster_at_vtx() - (sc.phi() - phi)).abs() < 1e-9);
    }

    #[test]
    fn test_delta_phi_wraps_across_pi() {
        let sc = barrel_cluster(25.0, 0.1, PI - 0.05);
        let seed_position = Point3::from_rho_eta_phi(129.0, 0.1, -PI + 0.05);
        let ele = ElectronKinematics::new(
            sc,
            Arc::new(Track::new(ThreeVector::new(-20.0, 0.0, 1.0), Point3::zero(), 1)),
            seed_position,
            ThreeVector::new(-20.0, 0.0, 1.0),
            seed_position,
            ThreeVector::new(-20.0, 0.0, 1.0),
        );

        let dphi = ele.delta_phi_seed_cluster_at_calo();
        assert!((dphi + 0.1).abs() < 1e-9);
        assert!(ele.delta_phi_super_cluster_at_vtx() > -PI);
        assert!(ele.delta_phi_super_cluster_at_vtx() <= PI);
    }

    #[test]
    fn test_stored_states_are_copied() {
        let sc = barrel_cluster(25.0, 0.4, 1.0);
        let track = Track::new(ThreeVector::new(1.0, 2.0, 3.0), Point3::new(0.1, 0.0, -2.0), 1);
        let ele = electron(sc.clone(), track, ThreeVector::new(1.0, 0.0, 0.0));

        assert_eq!(ele.track_position_at_vtx(), Point3::new(0.1, 0.0, -2.0));
        assert_eq!(ele.vertex(), Point3::new(0.1, 0.0, -2.0));
        assert_eq!(ele.track_momentum_at_vtx(), ThreeVector::new(1.0, 2.0, 3.0));
        assert_eq!(ele.track_position_at_calo(), Point3::from_rho_eta_phi(129.0, 0.4, 1.0));
        assert_eq!(ele.track_momentum_at_calo(), ThreeVector::from_rho_eta_phi(24.0, 0.4, 1.0));
        assert!(Arc::ptr_eq(ele.super_cluster(), &sc));
    }
}
