use serde::Serialize;
use std::fmt;

use crate::document::Document;
use crate::error::Error;
use crate::gateway::{Gateway, GenerationCapability, GenerationOutcome};
use crate::request::GenerationRequest;

/// Where the session stands. Only `Succeeded` carries a document.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Pending,
    Succeeded(Document),
    Failed(Error),
}

/// Payload-free view of [`SessionState`], for display and JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Pending => "pending",
            SessionStatus::Succeeded => "succeeded",
            SessionStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// The single live generation state machine for a user.
///
/// Holds at most one document. Starting a generation discards the current
/// document; a failed generation leaves none behind.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        match self.state {
            SessionState::Idle => SessionStatus::Idle,
            SessionState::Pending => SessionStatus::Pending,
            SessionState::Succeeded(_) => SessionStatus::Succeeded,
            SessionState::Failed(_) => SessionStatus::Failed,
        }
    }

    pub fn document(&self) -> Option<&Document> {
        match &self.state {
            SessionState::Succeeded(document) => Some(document),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<&Error> {
        match &self.state {
            SessionState::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Validate `request` and enter `Pending`, dropping any current document.
    ///
    /// On error the state is left untouched.
    pub fn begin(&mut self, request: &GenerationRequest) -> Result<(), Error> {
        if matches!(self.state, SessionState::Pending) {
            return Err(Error::Busy);
        }
        request.validate()?;

        log::debug!("session: {} -> pending", self.status());
        self.state = SessionState::Pending;
        Ok(())
    }

    /// Apply the outcome of the generation started for `request`.
    ///
    /// Applied whatever the current state is; the latest outcome wins.
    pub fn complete(
        &mut self,
        request: &GenerationRequest,
        outcome: GenerationOutcome,
    ) -> Result<&Document, Error> {
        match outcome {
            Ok(text) => {
                let document = Document::from_generation(request, text);
                log::info!("generated {} ({} chars)", document.file_name(), document.char_count());
                self.state = SessionState::Succeeded(document);
            }
            Err(error) => {
                log::info!("generation failed: {error}");
                self.state = SessionState::Failed(error);
            }
        }

        match &self.state {
            SessionState::Succeeded(document) => Ok(document),
            SessionState::Failed(error) => Err(error.clone()),
            SessionState::Idle | SessionState::Pending => Err(Error::NoDocument),
        }
    }

    /// Run one full generation through `gateway`.
    ///
    /// Invalid submissions are rejected before the gateway is called and
    /// without a state change.
    pub async fn submit<C: GenerationCapability>(
        &mut self,
        gateway: &Gateway<C>,
        request: &GenerationRequest,
    ) -> Result<&Document, Error> {
        self.begin(request)?;
        let outcome = gateway.generate(request).await;
        self.complete(request, outcome)
    }

    /// Replace the current document's content. Identity, filename and
    /// extension are unchanged and the gateway is not involved.
    pub fn edit_content(&mut self, content: impl Into<String>) -> Result<&Document, Error> {
        match &mut self.state {
            SessionState::Succeeded(document) => {
                document.replace_content(content.into());
                Ok(&*document)
            }
            _ => Err(Error::NoDocument),
        }
    }
}
