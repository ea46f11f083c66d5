use serde::{Deserialize, Serialize};

use crate::directive::build_directive;
use crate::error::{CapabilityError, Error};
use crate::request::GenerationRequest;
use crate::sanitize::sanitize;

/// Result of one generation attempt: sanitized text, or the classified failure.
pub type GenerationOutcome = Result<String, Error>;

/// Knobs passed through to the generation capability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvokeOptions {
    pub temperature: f64,
}

impl Default for InvokeOptions {
    fn default() -> Self {
        Self { temperature: 0.7 }
    }
}

/// The external text-generation service.
///
/// Implementations send one directive and return the raw text reply. They
/// must not retry on their own.
#[allow(async_fn_in_trait)]
pub trait GenerationCapability {
    async fn invoke(
        &self,
        directive: &str,
        options: &InvokeOptions,
    ) -> Result<String, CapabilityError>;
}

/// Sole caller of the generation capability.
#[derive(Debug, Clone)]
pub struct Gateway<C> {
    capability: C,
    options: InvokeOptions,
}

impl<C: GenerationCapability> Gateway<C> {
    pub fn new(capability: C) -> Self {
        Self::with_options(capability, InvokeOptions::default())
    }

    pub fn with_options(capability: C, options: InvokeOptions) -> Self {
        Self {
            capability,
            options,
        }
    }

    pub fn options(&self) -> &InvokeOptions {
        &self.options
    }

    pub fn capability(&self) -> &C {
        &self.capability
    }

    /// Build the directive, invoke the capability exactly once and sanitize
    /// its reply.
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationOutcome {
        let directive = build_directive(request);
        log::debug!(
            "invoking generation capability: type={}, directive={} chars, temperature={}",
            request.category,
            directive.len(),
            self.options.temperature
        );

        let raw = match self.capability.invoke(&directive, &self.options).await {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("generation capability failed: {e}");
                return Err(Error::GenerationFailed {
                    cause: e.to_string(),
                });
            }
        };

        let text = sanitize(&raw);
        if text.is_empty() {
            log::warn!("generation capability returned no usable text ({} raw bytes)", raw.len());
            return Err(Error::EmptyResponse);
        }

        log::debug!("generated {} chars of {}", text.len(), request.category);
        Ok(text)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    /// Capability that replays scripted replies and records what it was sent.
    #[derive(Debug, Default)]
    pub struct ScriptedCapability {
        replies: RefCell<VecDeque<Result<String, CapabilityError>>>,
        pub calls: Cell<usize>,
        pub last_directive: RefCell<Option<String>>,
        pub last_options: Cell<Option<InvokeOptions>>,
    }

    impl ScriptedCapability {
        pub fn new(replies: Vec<Result<String, CapabilityError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                ..Default::default()
            }
        }

        pub fn replying(text: &str) -> Self {
            Self::new(vec![Ok(text.to_string())])
        }

        pub fn failing(message: &str) -> Self {
            Self::new(vec![Err(CapabilityError::new(message))])
        }
    }

    impl GenerationCapability for ScriptedCapability {
        async fn invoke(
            &self,
            directive: &str,
            options: &InvokeOptions,
        ) -> Result<String, CapabilityError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_directive.borrow_mut() = Some(directive.to_string());
            self.last_options.set(Some(*options));
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(CapabilityError::new("no scripted reply left")))
        }
    }
}
