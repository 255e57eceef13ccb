//! Core types shared by the llgo lowering crates.
//!
//! This crate provides the primitives that both the source SSA model and the
//! target IR depend on:
//!
//! - [`Pos`]: source positions used for deterministic member ordering
//! - [`BinaryOp`] and [`UnaryOp`]: operator tokens shared by both IRs
//! - [`CompileError`] and [`LlgoError`]: the error hierarchy

mod error;
mod op;
mod pos;

pub use error::{CompileError, LlgoError, SymbolKind};
pub use op::{BinaryOp, UnaryOp};
pub use pos::Pos;
