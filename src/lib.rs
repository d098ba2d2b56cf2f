//! # Egamma Candidates
//!
//! Derived kinematic and identification quantities for electron and
//! photon candidates in a collider detector.
//!
//! ## Features
//! - Converted-photon pair observables (mass², Δcot θ, E/p, r9, z_PV)
//! - Electron/supercluster match observables (E/p, Δη, Δφ)
//! - Track extrapolation to the calorimeter front face with
//!   barrel/endcap geometry and solenoid bending
//! - Configurable calorimeter geometry (serde)
//!
//! ## Architecture
//!
//! ```text
//! Track ──► CaloSurfaceProjector ──► ElectronKinematics
//!   │                                      ▲
//!   └──────────► ConvertedPhoton ◄── SuperCluster
//! ```
//!
//! All candidates are immutable value objects derived once at construction.
//! Detector inputs are shared through `Arc`, so built candidates can be
//! moved across threads freely.

pub mod error;
pub mod geometry;
pub mod reco;


pub use error::CandidateError;
pub use geometry::{wrap_phi, Point3, ThreeVector};
pub use reco::{
    BasicCluster, CaloGeometry, CaloSurfaceProjector, ClusterShape, ConvertedPhoton,
    ElectronKinematics, FourMomentum, LeafCandidate, RecoCandidate, SuperCluster, Track, Vertex,
};

/// Result type for candidate operations
pub type CandidateResult<T> = Result<T, CandidateError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        // Geometry
        Point3,
        ThreeVector,

        // Detector inputs
        BasicCluster,
        ClusterShape,
        SuperCluster,
        Track,
        Vertex,

        // Candidates
        ConvertedPhoton,
        ElectronKinematics,
        FourMomentum,
        LeafCandidate,
        RecoCandidate,

        // Projection
        CaloGeometry,
        CaloSurfaceProjector,

        // Result type
        CandidateResult,
        CandidateError,
    };
}
