//! # provenance-config
//!
//! Typed configuration resolution with strict source precedence and provenance tracking.
//!
//! ## Overview
//!
//! Each configuration field is resolved once, at construction time, from the first
//! of these sources that has a value:
//!
//! 1. a process property (the in-process analog of a `-Dkey=value` flag)
//! 2. an environment variable
//! 3. a local external properties file
//! 4. an explicit value pinned by the caller
//! 5. a caller-supplied value supplier
//! 6. the field's compiled-in fallback
//!
//! Every result records which source won, so providers can report where each of
//! their values came from.
//!
//! ## Quick Start
//!
//! ```rust
//! use provenance_config::prelude::*;
//!
//! struct BrokerConfig {
//!     host: Option<String>,
//!     port: u16,
//!     resolved_by: ResolvedBy,
//! }
//!
//! impl ConfigFacade for BrokerConfig {
//!     fn can_provide(&self) -> bool {
//!         self.host.is_some() && self.port > 0
//!     }
//!
//!     fn resolved_by(&self) -> &ResolvedBy {
//!         &self.resolved_by
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let ns = Namespace::new("broker");
//! let host = ns.field("host", Converter::string()).build()?;
//! let port = ns.field("port", Converter::<u16>::parse()).fallback(5672).build()?;
//!
//! // ProcessEnvironment and PropertySource::load(&ProcessEnvironment) in a real service
//! let env = MapEnvironment::new().with_env("BROKER_HOST", "mq.internal");
//! let source = PropertySource::empty();
//!
//! let mut fields = FieldResolver::new(&source, &env);
//! let config = BrokerConfig {
//!     host: fields.value(&host, None)?,
//!     port: fields.value(&port, None)?.unwrap_or_default(),
//!     resolved_by: fields.finish(),
//! };
//!
//! assert!(config.can_provide());
//! assert_eq!(config.resolved_by().get("host"), Some(Provenance::SystemEnv));
//! assert_eq!(config.resolved_by().get("port"), Some(Provenance::ProviderDefault));
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `json` (default): [`Converter::json_map`](core::Converter::json_map) for
//!   JSON-object valued properties.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        ConfigFacade, Converter, FieldResolver, FieldSpec, Namespace, Provenance,
        ResolutionRequest, ResolutionResult, ResolutionStrategy, ResolvedBy, resolve,
    };
    pub use crate::error::{ConfigError, Result};
    pub use crate::sources::{
        Environment, MapEnvironment, ProcessEnvironment, PropertySource,
    };
}
