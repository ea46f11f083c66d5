//! Core library for filegen
//!
//! This crate is the **Functional Core** of filegen: everything that decides
//! *what* happens when a user asks for a generated file, with no I/O of its
//! own. The `filegen` binary is the Imperative Shell that parses arguments,
//! talks to the model provider and writes files.
//!
//! # Module Organization
//!
//! - [`catalog`]: the closed set of file types and their extensions
//! - [`sanitize`]: strips markdown fences and whitespace from model output
//! - [`directive`]: builds the instruction sent to the model
//! - [`request`]: a user submission and its validation
//! - [`gateway`]: the only caller of the generation capability
//! - [`session`]: the idle / pending / succeeded / failed state machine
//! - [`document`]: the editable result of a successful generation
//! - [`presets`]: built-in example submissions
//!
//! The generation capability itself is injected through the
//! [`gateway::GenerationCapability`] trait, so every path here is testable
//! with a scripted fake.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use filegen_core::{FileCategory, Gateway, GenerationRequest, Session};
//!
//! let gateway = Gateway::new(capability);
//! let mut session = Session::new();
//!
//! let request = GenerationRequest::new("factorial function", "fact", FileCategory::Python);
//! let document = session.submit(&gateway, &request).await?;
//! assert_eq!(document.file_name(), "fact.py");
//! ```

pub mod catalog;
pub mod directive;
pub mod document;
pub mod error;
pub mod gateway;
pub mod presets;
pub mod request;
pub mod sanitize;
pub mod session;

pub use catalog::{extension_for, FileCategory};
pub use directive::build_directive;
pub use document::Document;
pub use error::{CapabilityError, Error};
pub use gateway::{Gateway, GenerationCapability, GenerationOutcome, InvokeOptions};
pub use presets::{find_preset, Preset, PRESETS};
pub use request::GenerationRequest;
pub use sanitize::sanitize;
pub use session::{Session, SessionState, SessionStatus};
