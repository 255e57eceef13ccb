//! llgo target IR crate.
//!
//! An LLVM-style, typed, block-structured IR that the lowering emits into:
//!
//! - [`Program`]: target data layout, type mapping and constants
//! - [`Package`]: functions, globals and named types, addressed by name
//! - [`Builder`]: appends instructions to the blocks of one function body
//! - [`Expr`]: typed operand handles
//!
//! A package renders as LLVM-like assembly through its `Display` impl.

mod builder;
mod expr;
mod format;
mod instr;
mod package;
mod program;
mod symbol;
mod types;

pub use builder::Builder;
pub use expr::{BlockId, Expr, ExprKind, FuncId, GlobalId, Literal, TypeId, ValueId};
pub use instr::{Block, Body, Instr, InstrKind};
pub use package::{Function, Global, Package, TypeDecl};
pub use program::Program;
pub use symbol::{SymbolHash, hash_constants};
pub use types::{FuncType, Type};

/// Name of the trailing parameter that marks a C-variadic function.
pub const NAME_VALIST: &str = "__llgo_va_list";
