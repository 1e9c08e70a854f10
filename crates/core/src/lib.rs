//! `tapline-core` — domain foundation building blocks.
//!
//! This crate contains **pure** primitives (no IO, no logging setup): the error
//! model, typed identifiers, entity/value-object markers, and the chain
//! combinators used to inject side effects into call pipelines.

pub mod entity;
pub mod error;
pub mod id;
pub mod pipeline;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AccountId, InvoiceId};
pub use pipeline::{Pipe, Tap, pipe, tap_effect};
pub use value_object::ValueObject;
