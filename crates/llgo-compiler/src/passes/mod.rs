//! Compiler passes.
//!
//! - [`declaration`]: Pass 1 - declare functions, globals and types; queue bodies
//! - [`compilation`]: Pass 2 - build the queued function bodies

pub mod compilation;
pub mod declaration;

pub use compilation::{CompilationOutput, CompilationPass};
pub use declaration::{DeclarationOutput, DeclarationPass};
