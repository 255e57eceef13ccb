//! Call-site classification of callees.

use llgo_ir::NAME_VALIST;
use llgo_ssa::Value;

/// Import path of the compiler intrinsics package.
pub const UNSAFE_PKG: &str = "unsafe";

/// How a call to a callee is lowered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuncKind {
    /// Lowered as an ordinary call.
    Normal,
    /// C-style variadic; the trailing argument carries the packed extras.
    HasVarArgs,
    /// The intrinsics package initializer; calls to it are dropped.
    UnsafeInit,
}

impl FuncKind {
    /// How many trailing call arguments are handed to variadic packing.
    pub fn trailing_args(self) -> usize {
        match self {
            FuncKind::HasVarArgs => 1,
            FuncKind::Normal | FuncKind::UnsafeInit => 0,
        }
    }
}

/// Classify a callee.
///
/// Only free functions are special: methods and every other value are
/// [`FuncKind::Normal`].
pub fn func_kind(callee: &Value) -> FuncKind {
    let Value::Function(f) = callee else {
        return FuncKind::Normal;
    };
    if f.signature.recv.is_some() {
        return FuncKind::Normal;
    }
    match f.signature.params.last() {
        None if f.name == "init" && f.pkg == UNSAFE_PKG => FuncKind::UnsafeInit,
        Some(last) if last.name == NAME_VALIST => FuncKind::HasVarArgs,
        _ => FuncKind::Normal,
    }
}
