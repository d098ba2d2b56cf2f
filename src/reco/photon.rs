//! Converted photon candidates
//!
//! A photon that converts in the tracker material leaves an e⁺e⁻ pair
//! pointing at a single calorimeter supercluster. Up to two tracks are
//! attached; the track count decides which pair observables are defined:
//!
//! | Observable            | 0 tracks | 1 track | 2 tracks |
//! |-----------------------|----------|---------|----------|
//! | pair mass²            | -99      | -99     | ✓        |
//! | Δcot θ                | -99      | -99     | ✓        |
//! | pair momentum         | 0⃗        | track   | sum      |
//! | η, φ of pair momentum | -99      | ✓       | ✓        |
//! | p_T / E_T(SC)         | -99      | -99     | ✓        |
//! | E(SC) / p             | -99      | ✓       | ✓        |
//!
//! Everything is derived once at construction. Only tracks 0 and 1 are
//! ever read.

use crate::error::CandidateError;
use crate::geometry::{Point3, ThreeVector};
use crate::reco::detector::{BasicCluster, ClusterShape, SuperCluster, Track, Vertex};
use crate::reco::particles::{check_overlap, FourMomentum, RecoCandidate};
use crate::CandidateResult;
use std::sync::Arc;

/// Electron mass used for the pair hypothesis (GeV)
pub const ELECTRON_MASS: f64 = 0.000511;

/// Value of a pair observable that is undefined for the track count
pub const UNDEFINED_PAIR_OBSERVABLE: f64 = -99.0;

/// Primary-vertex z when the tracks cannot be projected to the beam line
pub const UNDEFINED_PRIMARY_VERTEX_Z: f64 = -9999.0;

/// A photon candidate built from a supercluster and its conversion tracks
#[derive(Debug, Clone)]
pub struct ConvertedPhoton {
    charge: i32,
    p4: FourMomentum,
    vertex: Point3,

    super_cluster: Arc<SuperCluster>,
    tracks: Vec<Arc<Track>>,
    seed_cluster_shape: Arc<ClusterShape>,
    positions_at_ecal: Vec<Point3>,
    conversion_vertex: Vertex,
    matching_basic_clusters: Vec<BasicCluster>,

    pair_invariant_mass_squared: f64,
    pair_cot_theta_separation: f64,
    pair_momentum: ThreeVector,
    pair_momentum_eta: f64,
    pair_momentum_phi: f64,
    pair_pt_over_et_sc: f64,
    e_over_p: f64,
    primary_vertex_z: f64,
    r9: f64,
}

impl ConvertedPhoton {
    /// Build the candidate and derive every pair observable
    ///
    /// `positions_at_ecal` runs parallel to `tracks`. The reference
    /// vertex is the origin; see [`ConvertedPhoton::with_vertex`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        super_cluster: Arc<SuperCluster>,
        tracks: Vec<Arc<Track>>,
        charge: i32,
        p4: FourMomentum,
        seed_cluster_shape: Arc<ClusterShape>,
        positions_at_ecal: Vec<Point3>,
        conversion_vertex: Vertex,
        matching_basic_clusters: Vec<BasicCluster>,
    ) -> Self {
        let mut photon = Self {
            charge,
            p4,
            vertex: Point3::zero(),
            super_cluster,
            tracks,
            seed_cluster_shape,
            positions_at_ecal,
            conversion_vertex,
            matching_basic_clusters,
            pair_invariant_mass_squared: UNDEFINED_PAIR_OBSERVABLE,
            pair_cot_theta_separation: UNDEFINED_PAIR_OBSERVABLE,
            pair_momentum: ThreeVector::zero(),
            pair_momentum_eta: UNDEFINED_PAIR_OBSERVABLE,
            pair_momentum_phi: UNDEFINED_PAIR_OBSERVABLE,
            pair_pt_over_et_sc: UNDEFINED_PAIR_OBSERVABLE,
            e_over_p: UNDEFINED_PAIR_OBSERVABLE,
            primary_vertex_z: UNDEFINED_PRIMARY_VERTEX_Z,
            r9: 0.0,
        };

        photon.make_pair_invariant_mass();
        photon.make_pair_cot_theta_separation();
        photon.make_pair_momentum();
        photon.make_pair_momentum_eta();
        photon.make_pair_momentum_phi();
        photon.make_pair_pt_over_et_sc();
        photon.make_e_over_p();
        photon.make_primary_vertex_z();

        // Unguarded: a zero raw + preshower energy gives a non-finite r9
        photon.r9 = photon.seed_cluster_shape.e3x3
            / (photon.super_cluster.raw_energy + photon.super_cluster.preshower_energy);

        log::debug!(
            "converted photon: {} tracks, mass² {:.4}, E/p {:.3}, r9 {:.3}, z_pv {:.2}",
            photon.n_tracks(),
            photon.pair_invariant_mass_squared,
            photon.e_over_p,
            photon.r9,
            photon.primary_vertex_z
        );

        photon
    }

    /// Set the reference vertex without touching the four-momentum
    pub fn with_vertex(mut self, vertex: Point3) -> Self {
        self.vertex = vertex;
        self
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // DERIVATIONS
    // ═══════════════════════════════════════════════════════════════════════════

    fn pair(&self) -> Option<(&Track, &Track)> {
        match self.tracks.as_slice() {
            [first, second, ..] => Some((first.as_ref(), second.as_ref())),
            _ => None,
        }
    }

    /// Stores m² under the e⁺e⁻ hypothesis; no square root is taken
    fn make_pair_invariant_mass(&mut self) {
        if let Some((t1, t2)) = self.pair() {
            let p = t1.inner_momentum + t2.inner_momentum;
            let m2 = ELECTRON_MASS * ELECTRON_MASS;
            let e = (t1.inner_momentum.mag2() + m2).sqrt() + (t2.inner_momentum.mag2() + m2).sqrt();
            self.pair_invariant_mass_squared = e * e - p.mag2();
        }
    }

    fn make_pair_cot_theta_separation(&mut self) {
        if let Some((t1, t2)) = self.pair() {
            let theta1 = t1.inner_momentum.theta();
            let theta2 = t2.inner_momentum.theta();
            self.pair_cot_theta_separation = 1.0 / theta1.tan() - 1.0 / theta2.tan();
        }
    }

    fn make_pair_momentum(&mut self) {
        self.pair_momentum = match self.tracks.as_slice() {
            [] => ThreeVector::zero(),
            [only] => only.inner_momentum,
            [first, second, ..] => first.inner_momentum + second.inner_momentum,
        };
    }

    fn make_pair_momentum_eta(&mut self) {
        if self.n_tracks() > 0 {
            self.pair_momentum_eta = self.pair_momentum.eta();
        }
    }

    fn make_pair_momentum_phi(&mut self) {
        if self.n_tracks() > 0 {
            self.pair_momentum_phi = self.pair_momentum.phi();
        }
    }

    fn make_pair_pt_over_et_sc(&mut self) {
        if self.pair().is_some() {
            self.pair_pt_over_et_sc = self.pair_momentum.perp() / self.super_cluster.transverse_energy();
        }
    }

    /// Unguarded once a track exists: a null pair momentum gives a non-finite ratio
    fn make_e_over_p(&mut self) {
        if self.n_tracks() > 0 {
            self.e_over_p = self.super_cluster.energy / self.pair_momentum.mag();
        }
    }

    /// Walk back from the conversion point along the pair direction to ρ = 0
    fn make_primary_vertex_z(&mut self) {
        let p = self.pair_momentum.mag();
        let rho = self.conversion_vertex.perp2().sqrt();
        if p > 0.0 && rho != 0.0 {
            let theta = (self.pair_momentum.z / p).acos();
            self.primary_vertex_z = self.conversion_vertex.position.z - rho / theta.tan();
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn super_cluster(&self) -> &Arc<SuperCluster> {
        &self.super_cluster
    }

    pub fn seed_cluster_shape(&self) -> &Arc<ClusterShape> {
        &self.seed_cluster_shape
    }

    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    /// Track at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_tracks()`. Use [`ConvertedPhoton::try_track`]
    /// when the count has not been checked.
    pub fn track(&self, index: usize) -> &Arc<Track> {
        &self.tracks[index]
    }

    pub fn try_track(&self, index: usize) -> CandidateResult<&Arc<Track>> {
        self.tracks
            .get(index)
            .ok_or(CandidateError::TrackIndexOutOfRange {
                index,
                n_tracks: self.tracks.len(),
            })
    }

    pub fn n_tracks(&self) -> usize {
        self.tracks.len()
    }

    /// Whether at least one conversion track is attached
    pub fn is_converted(&self) -> bool {
        self.n_tracks() > 0
    }

    pub fn positions_at_ecal(&self) -> &[Point3] {
        &self.positions_at_ecal
    }

    pub fn conversion_vertex(&self) -> &Vertex {
        &self.conversion_vertex
    }

    pub fn matching_basic_clusters(&self) -> &[BasicCluster] {
        &self.matching_basic_clusters
    }

    /// Invariant mass **squared** of the track pair, or -99
    pub fn pair_invariant_mass_squared(&self) -> f64 {
        self.pair_invariant_mass_squared
    }

    pub fn pair_cot_theta_separation(&self) -> f64 {
        self.pair_cot_theta_separation
    }

    pub fn pair_momentum(&self) -> ThreeVector {
        self.pair_momentum
    }

    pub fn pair_momentum_eta(&self) -> f64 {
        self.pair_momentum_eta
    }

    pub fn pair_momentum_phi(&self) -> f64 {
        self.pair_momentum_phi
    }

    pub fn pair_pt_over_et_sc(&self) -> f64 {
        self.pair_pt_over_et_sc
    }

    pub fn e_over_p(&self) -> f64 {
        self.e_over_p
    }

    /// z of the primary vertex estimated from the tracks, or -9999
    pub fn primary_vertex_z(&self) -> f64 {
        self.primary_vertex_z
    }

    pub fn r9(&self) -> f64 {
        self.r9
    }

    pub fn energy(&self) -> f64 {
        self.p4.e
    }

    /// True when `other` is calorimeter-seeded from the same supercluster
    pub fn overlap(&self, other: &dyn RecoCandidate) -> bool {
        other
            .super_cluster()
            .map_or(false, |sc| check_overlap(&self.super_cluster, sc))
    }

    /// Re-point the four-momentum from `vertex` to the supercluster
    ///
    /// The energy is kept. Track-derived observables are not recomputed.
    pub fn set_vertex(&mut self, vertex: Point3) {
        let direction = (self.super_cluster.position - vertex).unit();
        let energy = self.energy();
        self.p4 = FourMomentum::from_momentum(direction * energy, energy);
        self.vertex = vertex;
    }
}

impl RecoCandidate for ConvertedPhoton {
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
        22 * self.charge
    }

    fn super_cluster(&self) -> Option<&Arc<SuperCluster>> {
        Some(&self.super_cluster)
    }
}
