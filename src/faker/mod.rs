//! The value synthesis engine.
//!
//! Walks a schema's field types and produces constraint-respecting,
//! semantically-appropriate random values, reproducible under a fixed seed.
//! One [`FakeProvider`] carries the whole deterministic stream; it is passed
//! explicitly through every recursive call.

pub mod classify;
pub mod constraints;
pub mod provider;
pub mod synth;

pub use classify::{classify, ScalarKind, TypeClass};
pub use constraints::Constraints;
pub use provider::{FakeProvider, Locale, SemanticCategory};
pub use synth::{generate_instance, generate_instances};
