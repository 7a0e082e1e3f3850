//! Command layer for the voice CI control surface
//!
//! - **Intents**: the closed registry of commands
//! - **Slots**: NLU entities turned into typed slots
//! - **Dispatcher**: confidence gate and routing
//! - **Handlers**: one per intent, answering from live CI state
//! - **Messages**: localized response catalog

pub mod dispatcher;
pub mod handlers;
pub mod intent;
pub mod messages;
pub mod slots;

pub use dispatcher::{DispatchOutcome, DispatchState, DispatcherConfig, IntentDispatcher};
pub use handlers::CommandHandlers;
pub use intent::{CommandIntent, UNKNOWN_ACTION};
pub use messages::Messages;
pub use slots::extract_slots;

use thiserror::Error;

/// Dispatch errors surfaced to the caller
///
/// CI failures are not here: handlers turn them into messages.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Text not provided")]
    MissingText,

    #[error("Intent not supported: {0}")]
    UnregisteredIntent(String),

    #[error(transparent)]
    Nlu(#[from] voice_ci_core::NluError),
}
