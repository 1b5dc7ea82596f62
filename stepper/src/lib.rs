//! Step-by-step β-reduction of untyped λ-expressions.
//!
//! [`evaluate`] formats the input, splits it into a head and its arguments, and reduces the head
//! against each argument in turn. Every distinct intermediate form ends up in the returned trace.

pub mod alpha;
pub mod evaluator;
pub mod expr;
pub mod format;
pub mod parser;
pub mod prelude;
pub mod reduce;
pub mod split;
pub mod trace;

pub use alpha::{resolve_conflicts, NameSupply, Resolution};
pub use evaluator::{apply_reductions, evaluate, evaluate_with, Config, EvalError};
pub use expr::Expr;
pub use format::format_expression;
pub use parser::parse_expression;
pub use reduce::{reduce_expression, substitute};
pub use split::split_expression;
pub use trace::{church_boolean, Trace, Transformation, TransformationStep};
