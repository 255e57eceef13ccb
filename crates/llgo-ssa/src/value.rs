//! SSA values: operands of instructions.

use std::fmt;

use llgo_core::Pos;
use ordered_float::OrderedFloat;

use crate::types::{Signature, Type};

/// Identity of an instruction within its function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstrId(u32);

impl InstrId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of a parameter within its function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(u32);

impl ParamId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }
}

/// The value carried by a constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConstValue {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(OrderedFloat<f64>),
    String(String),
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Bool(v) => write!(f, "{v}"),
            ConstValue::Int(v) => write!(f, "{v}"),
            ConstValue::Uint(v) => write!(f, "{v}"),
            ConstValue::Float(v) => write!(f, "{v}"),
            ConstValue::String(v) => write!(f, "{v:?}"),
        }
    }
}

/// A typed constant.
///
/// `value` is `None` for the zero value of reference-like types (`nil`),
/// which is also how the front-end encodes an absent variadic tail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Const {
    pub value: Option<ConstValue>,
    pub ty: Type,
}

impl Const {
    pub fn new(value: ConstValue, ty: Type) -> Self {
        Self {
            value: Some(value),
            ty,
        }
    }

    pub fn int(value: i64) -> Self {
        Self::new(ConstValue::Int(value), Type::int())
    }

    pub fn bool(value: bool) -> Self {
        Self::new(ConstValue::Bool(value), Type::bool())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ConstValue::String(value.into()), Type::string())
    }

    /// The value-less constant `nil` of the given type.
    pub fn nil(ty: Type) -> Self {
        Self { value: None, ty }
    }

    pub fn is_nil(&self) -> bool {
        self.value.is_none()
    }
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{value}:{}", self.ty),
            None => write!(f, "nil:{}", self.ty),
        }
    }
}

/// A reference to a function, as seen from a call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FuncRef {
    /// Import path of the defining package.
    pub pkg: String,
    pub name: String,
    pub signature: Signature,
}

impl fmt::Display for FuncRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.signature.recv {
            Some(recv) => write!(f, "({}).{}", recv.ty, self.name),
            None => write!(f, "{}.{}", self.pkg, self.name),
        }
    }
}

/// A package-level variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Global {
    /// Import path of the defining package.
    pub pkg: String,
    pub name: String,
    /// Declared type of the variable.
    pub ty: Type,
    pub pos: Pos,
}

impl Global {
    pub fn new(pkg: impl Into<String>, name: impl Into<String>, ty: Type, pos: Pos) -> Self {
        Self {
            pkg: pkg.into(),
            name: name.into(),
            ty,
            pos,
        }
    }
}

/// An operand of an instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The result of a value-producing instruction of the same function.
    Instr(InstrId),
    /// A parameter (or receiver) of the enclosing function.
    Param(ParamId),
    /// A function of this or another package.
    Function(FuncRef),
    /// The address of a package-level variable.
    Global(Global),
    Const(Const),
    /// A built-in function such as `len` or `append`.
    Builtin(String),
    /// A variable captured by a closure.
    FreeVar(String),
}

impl Value {
    /// Short name of the value kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Instr(_) => "Instruction",
            Value::Param(_) => "Parameter",
            Value::Function(_) => "Function",
            Value::Global(_) => "Global",
            Value::Const(_) => "Const",
            Value::Builtin(_) => "Builtin",
            Value::FreeVar(_) => "FreeVar",
        }
    }
}

impl From<Const> for Value {
    fn from(c: Const) -> Self {
        Value::Const(c)
    }
}

impl From<Global> for Value {
    fn from(g: Global) -> Self {
        Value::Global(g)
    }
}

impl From<FuncRef> for Value {
    fn from(f: FuncRef) -> Self {
        Value::Function(f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Instr(id) => write!(f, "t{}", id.0),
            Value::Param(id) => write!(f, "p{}", id.0),
            Value::Function(func) => write!(f, "{func}"),
            Value::Global(g) => write!(f, "{}.{}", g.pkg, g.name),
            Value::Const(c) => write!(f, "{c}"),
            Value::Builtin(name) => write!(f, "builtin {name}"),
            Value::FreeVar(name) => write!(f, "freevar {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn const_display() {
        assert_eq!(Const::int(42).to_string(), "42:int");
        assert_eq!(Const::string("hi").to_string(), "\"hi\":string");
        assert_eq!(Const::nil(Type::slice(Type::int())).to_string(), "nil:[]int");
    }

    #[test]
    fn nil_detection() {
        assert!(Const::nil(Type::pointer(Type::int())).is_nil());
        assert!(!Const::bool(false).is_nil());
    }

    #[test]
    fn value_kinds() {
        assert_eq!(Value::Builtin("len".into()).kind_name(), "Builtin");
        assert_eq!(Value::from(Const::int(1)).kind_name(), "Const");
    }
}
