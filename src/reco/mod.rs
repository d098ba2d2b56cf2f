//! # Egamma Candidate Reconstruction
//!
//! Derived kinematics for calorimeter-seeded candidates: converted photons
//! (supercluster + up to two conversion tracks) and track-matched electrons
//! (supercluster + one track).
//!
//! ## Data Flow
//!
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  Tracks      │   │ SuperCluster │   │  Vertex      │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │                  │                  │
//!            ├──────────────────┼──────────────────┤
//!            ▼                  ▼                  ▼
//!     ┌─────────────────────────────────────────────────────┐
//!     │  ConvertedPhoton                                    │
//!     │  • pair mass²  • Δcot θ  • pair p⃗, η, φ            │
//!     │  • p_T/E_T     • E/p     • z_PV    • r9            │
//!     └─────────────────────────────────────────────────────┘
//!
//!     ┌──────────────┐   ┌──────────────────────┐
//!     │  Track       │──►│ CaloSurfaceProjector │──► η, φ at ECAL
//!     └──────┬───────┘   └──────────┬───────────┘
//!            ▼                      ▼
//!     ┌─────────────────────────────────────────────────────┐
//!     │  ElectronKinematics                                 │
//!     │  • E/p (vertex)  • Δη, Δφ (SC vs. projected track)  │
//!     │  • E/p_out       • Δη, Δφ (seed vs. outgoing track) │
//!     └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use egamma_candidates::reco::project_eta;
//!
//! // A straight track from the origin keeps its pseudorapidity
//! let eta = project_eta(0.8, 0.0, 0.0);
//! assert!((eta - 0.8).abs() < 1e-9);
//! ```
//!
//! Undefined observables are reported through sentinel values rather than
//! errors: -99 for photon pair quantities, -9999 for the primary-vertex z,
//! -1 for electron E/p.

pub mod detector;
pub mod electron;
pub mod particles;
pub mod photon;
pub mod projection;

pub use detector::{BasicCluster, ClusterShape, SuperCluster, Track, Vertex};
pub use electron::{ElectronKinematics, UNDEFINED_E_OVER_P};
pub use particles::{check_overlap, FourMomentum, LeafCandidate, RecoCandidate};
pub use photon::{
    ConvertedPhoton, ELECTRON_MASS, UNDEFINED_PAIR_OBSERVABLE, UNDEFINED_PRIMARY_VERTEX_Z,
};
pub use projection::{
    project_eta, project_phi, CaloGeometry, CaloSurfaceProjector, BARREL_ENDCAP_ETA,
    BARREL_RADIUS_CM, ENDCAP_Z_CM, FIELD_TESLA, MAGNET_BARREL_RADIUS_M, MAGNET_ENDCAP_Z_M,
};
