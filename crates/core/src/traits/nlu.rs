//! NLU collaborator

use crate::error::NluError;
use crate::nlu::NluResult;
use async_trait::async_trait;

/// Natural-language understanding interface
///
/// Turns raw command text into an intent plus entities.
#[async_trait]
pub trait NluEngine: Send + Sync {
    async fn parse(&self, text: &str) -> Result<NluResult, NluError>;

    /// Model or backend name for logging
    fn name(&self) -> &str;
}
