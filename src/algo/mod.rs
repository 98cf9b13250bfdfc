//! Unwrapping pipeline stages.
//!
//! The stages, in the order the orchestrator runs them:
//!
//! - **Seams** ([`seams`]): spanning-tree cut over the dual graph
//! - **Islands** ([`islands`]): connected components after the cuts
//! - **LSCM** ([`lscm`]): conformal parameterization of one island
//! - **Packing** ([`pack`]): shelf packing of island boxes into [0,1]²
//! - **Metrics** ([`metrics`]): stretch and coverage of the result
//! - **Orchestration** ([`unwrap`]): the full pipeline
//!
//! [`sparse`] holds the CSC matrix and LU solver backing the LSCM stage.

pub mod islands;
pub mod lscm;
pub mod metrics;
pub mod pack;
pub mod seams;
pub mod sparse;
pub mod unwrap;
