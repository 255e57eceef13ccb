//! Error types for llgo.
//!
//! ## Error Hierarchy
//!
//! ```text
//! LlgoError (top-level wrapper)
//! ├── NotFound      - Module resolution could not find a package (forwarded)
//! └── CompileError  - Lowering errors
//!     ├── Unsupported*  - Input the lowering does not handle yet (user-facing)
//!     ├── InvalidLinkname - Malformed link-name directive (user-facing)
//!     ├── Undeclared / Internal - Broken internal contract (a bug, not bad input)
//!     └── Multiple      - Diagnostics collected across function bodies
//! ```

use std::fmt;

use thiserror::Error;

// ============================================================================
// Compile Errors
// ============================================================================

/// The kind of top-level symbol a lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A function.
    Function,
    /// A global variable.
    Global,
    /// A named type.
    Type,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SymbolKind::Function => "function",
            SymbolKind::Global => "global",
            SymbolKind::Type => "type",
        })
    }
}

/// Errors that occur while lowering a package.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// An instruction kind with no lowering rule.
    #[error("unsupported instruction {kind} in {function} (block {block}): {text}")]
    UnsupportedInstruction {
        /// Instruction kind, e.g. `Phi`.
        kind: &'static str,
        /// Function being built.
        function: String,
        /// Index of the block containing the instruction.
        block: usize,
        /// Textual form of the instruction.
        text: String,
    },

    /// A value kind the resolver cannot translate.
    #[error("unsupported value {kind} in {function}")]
    UnsupportedValue {
        /// Value kind, e.g. `Builtin`.
        kind: &'static str,
        /// Function being built.
        function: String,
    },

    /// A variadic call whose trailing argument cannot be packed yet.
    #[error("unsupported variadic arguments in call to {callee}: {arg}")]
    UnsupportedVarArgs {
        /// Callee of the call.
        callee: String,
        /// Textual form of the trailing argument.
        arg: String,
    },

    /// A `//go:linkname` directive without a calling convention.
    #[error("{line}: no specified call convention. eg. //go:linkname Printf C.printf")]
    InvalidLinkname {
        /// The offending comment line.
        line: String,
    },

    /// A symbol was referenced before it was declared.
    #[error("internal error: {kind} '{name}' referenced before declaration")]
    Undeclared {
        /// What was being looked up.
        kind: SymbolKind,
        /// The target name that was not found.
        name: String,
    },

    /// Any other broken invariant of the lowering.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the broken invariant.
        message: String,
    },

    /// Several errors collected across function bodies.
    #[error("{} errors; first: {}", .0.len(), first_message(.0))]
    Multiple(Vec<CompileError>),
}

impl CompileError {
    /// Shorthand for [`CompileError::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        CompileError::Internal {
            message: message.into(),
        }
    }

    /// Whether the error reports input the lowering does not handle yet.
    pub fn is_unsupported(&self) -> bool {
        match self {
            CompileError::UnsupportedInstruction { .. }
            | CompileError::UnsupportedValue { .. }
            | CompileError::UnsupportedVarArgs { .. } => true,
            CompileError::Multiple(errors) => errors.iter().all(CompileError::is_unsupported),
            _ => false,
        }
    }

    /// Whether the error indicates a bug in the lowering or its caller.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            CompileError::Undeclared { .. } | CompileError::Internal { .. }
        )
    }

    /// The individual errors, flattening [`CompileError::Multiple`].
    pub fn errors(&self) -> Vec<&CompileError> {
        match self {
            CompileError::Multiple(errors) => errors.iter().flat_map(|e| e.errors()).collect(),
            other => vec![other],
        }
    }
}

fn first_message(errors: &[CompileError]) -> String {
    errors.first().map(ToString::to_string).unwrap_or_default()
}

// ============================================================================
// Top-level Error
// ============================================================================

/// The unified error type for llgo operations.
///
/// Wraps [`CompileError`] and the conditions forwarded from collaborators, so
/// callers can use `?` across the pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LlgoError {
    /// A requested package or module does not exist.
    #[error("package not found: {path}")]
    NotFound {
        /// The import path that was requested.
        path: String,
    },

    /// A lowering error.
    #[error(transparent)]
    Compilation(#[from] CompileError),
}

impl LlgoError {
    /// Check if this reports a missing package or module.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LlgoError::NotFound { .. })
    }

    /// Check if this is a lowering error.
    pub fn is_compilation(&self) -> bool {
        matches!(self, LlgoError::Compilation(_))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_instruction_display() {
        let err = CompileError::UnsupportedInstruction {
            kind: "Phi",
            function: "main.loop".to_string(),
            block: 2,
            text: "t3 = phi [0: 0:int, 1: t2]".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unsupported instruction Phi in main.loop (block 2): t3 = phi [0: 0:int, 1: t2]"
        );
        assert!(err.is_unsupported());
        assert!(!err.is_internal());
    }

    #[test]
    fn undeclared_is_internal() {
        let err = CompileError::Undeclared {
            kind: SymbolKind::Global,
            name: "main.counter".to_string(),
        };
        assert!(err.is_internal());
        assert_eq!(
            err.to_string(),
            "internal error: global 'main.counter' referenced before declaration"
        );
    }

    #[test]
    fn invalid_linkname_display() {
        let err = CompileError::InvalidLinkname {
            line: "//go:linkname Printf printf".to_string(),
        };
        assert!(err.to_string().starts_with("//go:linkname Printf printf: "));
    }

    #[test]
    fn multiple_flattens() {
        let a = CompileError::UnsupportedValue {
            kind: "Builtin",
            function: "main.f".to_string(),
        };
        let b = CompileError::UnsupportedVarArgs {
            callee: "printf".to_string(),
            arg: "t1".to_string(),
        };
        let err = CompileError::Multiple(vec![a.clone(), b.clone()]);
        assert_eq!(err.errors(), vec![&a, &b]);
        assert!(err.is_unsupported());
        assert!(err.to_string().starts_with("2 errors; first: unsupported value"));
    }

    #[test]
    fn llgo_error_from_compile_error() {
        let err: LlgoError = CompileError::internal("boom").into();
        assert!(err.is_compilation());
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_classification() {
        let err = LlgoError::NotFound {
            path: "example.com/missing".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "package not found: example.com/missing");
    }
}
