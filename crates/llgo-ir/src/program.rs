//! Whole-program state: target data layout, type mapping and constants.

use llgo_ssa::{self as ssa, BasicKind, ConstValue};

use crate::NAME_VALIST;
use crate::expr::{Expr, ExprKind, Literal};
use crate::package::Package;
use crate::types::{FuncType, Type};

/// The whole-program target IR builder.
///
/// A `Program` is shared by every package translation; all its operations
/// take `&self`.
#[derive(Debug, Clone)]
pub struct Program {
    /// Width of pointers and of `int`, `uint` and `uintptr`.
    ptr_bits: u32,
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl Program {
    /// A program for a 64-bit target.
    pub fn new() -> Self {
        Self { ptr_bits: 64 }
    }

    /// A program for a target with the given pointer width.
    pub fn with_ptr_bits(ptr_bits: u32) -> Self {
        Self { ptr_bits }
    }

    pub fn ptr_bits(&self) -> u32 {
        self.ptr_bits
    }

    /// Create an empty package.
    pub fn new_package(&self, name: &str, path: &str) -> Package {
        Package::new(name, path)
    }

    // ==========================================================================
    // Types
    // ==========================================================================

    /// Map a source type to its target representation.
    pub fn type_of(&self, ty: &ssa::Type) -> Type {
        match ty {
            ssa::Type::Basic(kind) => self.basic(*kind),
            ssa::Type::Pointer(elem) => Type::ptr(self.type_of(elem)),
            ssa::Type::Slice(elem) => Type::Struct(vec![
                Type::ptr(self.type_of(elem)),
                self.int(),
                self.int(),
            ]),
            ssa::Type::Array(elem, len) => Type::Array(Box::new(self.type_of(elem)), *len),
            ssa::Type::Struct(fields) => {
                Type::Struct(fields.iter().map(|f| self.type_of(&f.ty)).collect())
            }
            ssa::Type::Named(named) => self.type_of(&named.underlying),
            ssa::Type::Signature(sig) => Type::func(self.func_type(sig)),
            ssa::Type::Tuple(types) => Type::Struct(types.iter().map(|t| self.type_of(t)).collect()),
        }
    }

    fn int(&self) -> Type {
        Type::Int(self.ptr_bits)
    }

    fn basic(&self, kind: BasicKind) -> Type {
        match kind {
            BasicKind::Bool => Type::bool(),
            BasicKind::Int8 | BasicKind::Uint8 => Type::Int(8),
            BasicKind::Int16 | BasicKind::Uint16 => Type::Int(16),
            BasicKind::Int32 | BasicKind::Uint32 => Type::Int(32),
            BasicKind::Int64 | BasicKind::Uint64 => Type::Int(64),
            BasicKind::Int | BasicKind::Uint | BasicKind::Uintptr => self.int(),
            BasicKind::Float32 => Type::Float(32),
            BasicKind::Float64 => Type::Float(64),
            BasicKind::String => Type::Struct(vec![Type::byte_ptr(), self.int()]),
            BasicKind::UnsafePointer | BasicKind::UntypedNil => Type::byte_ptr(),
        }
    }

    /// Map a source signature to a function type.
    ///
    /// The receiver of a method becomes the first parameter. A trailing
    /// parameter named [`NAME_VALIST`] is dropped and makes the function
    /// C-variadic.
    pub fn func_type(&self, sig: &ssa::Signature) -> FuncType {
        let mut params: Vec<&ssa::Var> = sig.recv.iter().chain(&sig.params).collect();
        let variadic = params.last().is_some_and(|p| p.name == NAME_VALIST);
        if variadic {
            params.pop();
        }
        FuncType {
            params: params.iter().map(|p| self.type_of(&p.ty)).collect(),
            results: sig.results.iter().map(|t| self.type_of(t)).collect(),
            variadic,
        }
    }

    // ==========================================================================
    // Constants
    // ==========================================================================

    /// The zero value of `ty`.
    pub fn null(&self, ty: Type) -> Expr {
        Expr::new(ExprKind::Const(Literal::Zero), ty)
    }

    /// A literal of type `ty`; no value means the zero value.
    pub fn constant(&self, value: Option<&ConstValue>, ty: Type) -> Expr {
        let literal = match value {
            None => return self.null(ty),
            Some(ConstValue::Bool(v)) => Literal::Bool(*v),
            Some(ConstValue::Int(v)) => Literal::Int(*v),
            Some(ConstValue::Uint(v)) => Literal::Uint(*v),
            Some(ConstValue::Float(v)) => Literal::Float(*v),
            Some(ConstValue::String(v)) => Literal::String(v.clone()),
        };
        Expr::new(ExprKind::Const(literal), ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use llgo_ssa::{Signature, Var};

    #[test]
    fn basic_types_follow_pointer_width() {
        let p64 = Program::new();
        let p32 = Program::with_ptr_bits(32);
        assert_eq!(p64.type_of(&ssa::Type::int()), Type::Int(64));
        assert_eq!(p32.type_of(&ssa::Type::int()), Type::Int(32));
        assert_eq!(p32.type_of(&ssa::Type::Basic(BasicKind::Int64)), Type::Int(64));
        assert_eq!(p64.type_of(&ssa::Type::bool()), Type::bool());
    }

    #[test]
    fn composite_types() {
        let prog = Program::new();
        assert_eq!(
            prog.type_of(&ssa::Type::slice(ssa::Type::int32())),
            Type::Struct(vec![Type::ptr(Type::Int(32)), Type::i64(), Type::i64()])
        );
        assert_eq!(
            prog.type_of(&ssa::Type::string()),
            Type::Struct(vec![Type::byte_ptr(), Type::i64()])
        );
        let named = ssa::Type::named("main", "Celsius", ssa::Type::float64());
        assert_eq!(prog.type_of(&named), Type::Float(64));
    }

    #[test]
    fn method_receiver_is_first_param() {
        let prog = Program::new();
        let sig = Signature::new(vec![Var::new("n", ssa::Type::int())], vec![])
            .with_recv(Var::new("p", ssa::Type::pointer(ssa::Type::int())));
        let ft = prog.func_type(&sig);
        assert_eq!(ft.params, vec![Type::ptr(Type::i64()), Type::i64()]);
        assert!(!ft.variadic);
    }

    #[test]
    fn valist_marker_makes_function_variadic() {
        let prog = Program::new();
        let sig = Signature::new(
            vec![
                Var::new("format", ssa::Type::pointer(ssa::Type::Basic(BasicKind::Int8))),
                Var::new(NAME_VALIST, ssa::Type::slice(ssa::Type::int())),
            ],
            vec![ssa::Type::int32()],
        );
        let ft = prog.func_type(&sig);
        assert!(ft.variadic);
        assert_eq!(ft.params.len(), 1);
    }

    #[test]
    fn constants() {
        let prog = Program::new();
        let c = prog.constant(Some(&ConstValue::Int(7)), Type::i64());
        assert_eq!(c.kind(), &ExprKind::Const(Literal::Int(7)));
        let z = prog.constant(None, Type::byte_ptr());
        assert_eq!(z.kind(), &ExprKind::Const(Literal::Zero));
        assert_eq!(z.ty(), &Type::byte_ptr());
    }
}
