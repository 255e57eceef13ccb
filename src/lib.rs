//! # llgo
//!
//! Lowering of type-checked Go SSA packages into an LLVM-style SSA IR.
//!
//! The workspace is split into:
//!
//! - [`ssa`]: the source SSA model handed over by the front-end
//! - [`ir`]: the target IR, its builder and printer
//! - [`llgo_compiler`]: the lowering itself, re-exported here
//!
//! ## Example
//!
//! ```
//! use llgo::ssa::{Function, Instruction, Package, Return, Signature};
//! use llgo::{CompileOptions, Pos, compile_package};
//!
//! let mut pkg = Package::new("main", "main");
//! pkg.add_function(Function::new("main", "init", Signature::default(), Pos::new(1)));
//!
//! let mut main = Function::new("main", "main", Signature::default(), Pos::new(2));
//! let entry = main.add_block("entry");
//! main.emit(entry, Instruction::Return(Return { results: vec![] }));
//! pkg.add_function(main);
//!
//! let out = compile_package(&pkg, &[], CompileOptions::default()).unwrap();
//! assert!(out.to_string().contains("call void @main.init()"));
//! ```

pub use llgo_compiler::{
    CompilationContext, CompileOptions, DebugFlags, ErrorPolicy, FuncKind, func_kind, translate,
};
pub use llgo_core::{BinaryOp, CompileError, LlgoError, Pos, SymbolKind, UnaryOp};
pub use llgo_ir as ir;
pub use llgo_ssa as ssa;

/// Reports whether `err` means a requested package or module does not exist.
pub fn not_found(err: &LlgoError) -> bool {
    err.is_not_found()
}

/// Translate `pkg` for a 64-bit target.
///
/// Same as [`translate`] with a fresh [`ir::Program`], returning the
/// top-level error type.
pub fn compile_package(
    pkg: &ssa::Package,
    files: &[ssa::ast::File],
    options: CompileOptions,
) -> Result<ir::Package, LlgoError> {
    let prog = ir::Program::new();
    Ok(translate(&prog, pkg, files, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_only_for_missing_packages() {
        let missing = LlgoError::NotFound {
            path: "example.com/nope".into(),
        };
        assert!(not_found(&missing));

        let compile: LlgoError = CompileError::internal("boom").into();
        assert!(!not_found(&compile));
    }
}
