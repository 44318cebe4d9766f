//! Tree-walking interpreter for the Laurel teaching language.
//!
//! A program goes through [`lexer`], [`parser`] and [`eval`]; [`runner`] ties
//! the stages together and turns their failures into a single
//! [`utils::error::Error`] that renders as a human readable diagnostic.
//!
//! Evaluation recurses on the host stack, so deep recursion in a Laurel
//! program can overflow it. That aborts the process and is not reported as a
//! diagnostic.

pub mod lexer;
pub mod parser;
pub mod environment;
pub mod eval;
pub mod runner;
pub mod utils;
