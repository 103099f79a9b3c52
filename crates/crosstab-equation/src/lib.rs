//! # crosstab-equation
//!
//! Banner equation parser and evaluator for crosstab.
//!
//! This crate provides:
//! - Equation parsing (text → [`Expression`])
//! - Evaluation of an expression against one [`Record`](crosstab_core::Record)
//! - Dataset filtering and reusable [`RowSelection`]s
//! - Checkbox-column translation (`S7=2` → `S7r2=1`)
//!
//! ## Grammar
//!
//! ```text
//! expression := andTerm ( ("OR" | "|") andTerm )*
//! andTerm    := condition ( ("AND" | "&") condition )*
//! condition  := VARNAME (">=" | "<=" | "!=" | ">" | "<" | "=") VALUE
//! VALUE      := NUMBER "-" NUMBER | item ("," item)+ | TOKEN
//! ```
//!
//! `OR` always binds looser than `AND` and there is no parenthetical grouping.
//! `VAR BETWEEN a AND b` is accepted as shorthand for `VAR>=a AND VAR<=b`.
//!
//! ## Example
//!
//! ```rust
//! use crosstab_core::Record;
//! use crosstab_equation::evaluate;
//!
//! let row = Record::from_pairs([("S7", "2"), ("Q1", "7")]);
//! assert!(evaluate("S7=2 AND Q1>5", &row));
//! assert!(evaluate("S7=1,2,3", &row));
//! assert!(!evaluate("Q9=1", &row));
//! assert!(evaluate("TOTAL", &row));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod filter;
pub mod parser;
pub mod translate;

pub use ast::{Condition, Expression, Operand, Operator};
pub use error::{EquationError, EquationResult};
pub use evaluator::evaluate;
pub use filter::{filter_dataset, is_match_all, select_rows, RowSelection};
pub use parser::{parse_equation, try_parse_condition};
