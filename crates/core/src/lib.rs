//! Core traits and types for the voice CI control surface
//!
//! This crate provides foundational types used across all other crates:
//! - NLU result types (intent, entities) and the closed slot model
//! - CI server data model (jobs, builds, parameters)
//! - Collaborator traits for the NLU engine and the CI server
//! - Locale definitions
//! - Error types

pub mod ci;
pub mod error;
pub mod locale;
pub mod nlu;
pub mod response;
pub mod slots;
pub mod traits;

pub use ci::{
    BuildInfo, BuildRef, JobInfo, JobProperty, JobSummary, ParameterDefinition, ParameterValue,
    ServerInfo,
};
pub use error::{CiError, Error, NluError, Result};
pub use locale::Locale;
pub use nlu::{NluEntity, NluIntent, NluResult};
pub use response::CommandResponse;
pub use slots::{Slot, SlotKind, SlotMap};
pub use traits::{CiServer, NluEngine};
