//! Collaborator traits
//!
//! The dispatcher receives both collaborators at construction, so tests can
//! swap in in-memory implementations.

mod ci;
mod nlu;

pub use ci::CiServer;
pub use nlu::NluEngine;
