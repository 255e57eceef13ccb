//! Expression handles.
//!
//! An [`Expr`] is an immutable, cloneable reference to something an
//! instruction can use as an operand: the result of an earlier instruction,
//! a parameter, a function or global, or a literal.

use ordered_float::OrderedFloat;

use crate::types::Type;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

id_type!(
    /// Result of an instruction, numbered per function.
    ValueId
);
id_type!(
    /// A function of a [`Package`](crate::Package).
    FuncId
);
id_type!(
    /// A global of a [`Package`](crate::Package).
    GlobalId
);
id_type!(
    /// A named type of a [`Package`](crate::Package).
    TypeId
);
id_type!(
    /// A basic block of a function body.
    BlockId
);

/// A literal constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(OrderedFloat<f64>),
    String(String),
    /// The zero value of the expression's type (`null`, `zeroinitializer`).
    Zero,
}

/// What an expression refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Value(ValueId),
    /// Parameter by position.
    Param(usize),
    Func(FuncId),
    /// The address of a global.
    Global(GlobalId),
    Const(Literal),
    /// The non-value of a call without results.
    Void,
}

/// A typed expression handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expr {
    kind: ExprKind,
    ty: Type,
}

impl Expr {
    pub(crate) fn new(kind: ExprKind, ty: Type) -> Self {
        Self { kind, ty }
    }

    pub(crate) fn void() -> Self {
        Self::new(ExprKind::Void, Type::Void)
    }

    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// The instruction result this expression names, if any.
    pub fn value_id(&self) -> Option<ValueId> {
        match self.kind {
            ExprKind::Value(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self.kind, ExprKind::Void)
    }
}
