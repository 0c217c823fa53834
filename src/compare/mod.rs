//! Comparison engine module
//!
//! Turns two resolved operands and an operator into a boolean, applying
//! integer/float widening and opaque-to-text coercion first.

mod engine;
mod operand;


pub use engine::compare;
pub use operand::{Kind, Numeric, OperandValue};
