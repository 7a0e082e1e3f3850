//! Collaborator clients
//!
//! Implementations of the core collaborator traits:
//! - `JenkinsClient` - CI server over the Jenkins JSON API
//! - `RasaNluClient` - NLU over the Rasa HTTP API
//! - `StubCiServer`, `ScriptedNlu` - in-memory stand-ins for tests and offline runs

pub mod jenkins;
pub mod rasa;
pub mod stub;

pub use jenkins::{JenkinsClient, JenkinsClientConfig};
pub use rasa::{RasaConfig, RasaNluClient};
pub use stub::{ScriptedNlu, StubCiServer};
