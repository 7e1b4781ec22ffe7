//! Core resolution types and the precedence engine.

mod builder;
mod convert;
mod facade;
mod field;
mod provenance;
mod request;
mod resolver;
mod result;
mod strategy;

pub use builder::FieldResolver;
pub use convert::Converter;
pub use facade::{ConfigFacade, ResolvedBy};
pub use field::{FieldSpec, FieldSpecBuilder, Namespace};
pub use provenance::Provenance;
pub use request::ResolutionRequest;
pub use resolver::resolve;
pub use result::ResolutionResult;
pub use strategy::{ResolutionStrategy, ValueSupplier};
