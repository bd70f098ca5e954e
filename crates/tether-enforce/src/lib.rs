//! Consistency checking between a contract and client code.
//!
//! Compares contract endpoints against extracted call sites and the type
//! registry, producing lint errors:
//! - E001: no request type definition for a matched endpoint
//! - E002: no response type definition for a matched endpoint
//! - E003: properties declared by the type but missing from the example
//! - E004: properties in the example the type does not declare
//! - E005: example value outside an enum's value set
//! - E006: type mismatch (scalar, array, or object)
//! - E007: array element type not found in the registry
//! - E008: endpoint called in code but absent from the contract
//! - E009: endpoint in the contract but never called in code

mod body_diff;
pub mod engine;
pub mod types;
mod unmatched;

pub use engine::{check, ConsistencyEngine};
pub use types::{
    messages, BodySide, CheckResult, CheckSummary, LintError, LintErrorKind, MismatchShape,
};
