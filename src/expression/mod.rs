//! Check hook expression parsing
//!
//! An expression is two path operands joined by one comparison operator:
//! - `$.status.phase == $.spec.expectedPhase`
//! - `$.replicas.ready >= $.replicas.desired`

mod ast;
pub mod parser;

#[cfg(test)]
mod property_tests;

pub use ast::{BooleanExpression, Operator};
pub use parser::{parse, parse_with};
