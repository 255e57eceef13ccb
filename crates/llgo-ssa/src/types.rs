//! Source type descriptors.
//!
//! A reduced rendition of the front-end's type system: enough shape for the
//! lowering to map types onto the target IR and to classify signatures.

use std::fmt;

/// Predeclared basic types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    String,
    UnsafePointer,
    UntypedNil,
}

impl BasicKind {
    /// Source spelling of the type.
    pub fn name(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::String => "string",
            BasicKind::UnsafePointer => "unsafe.Pointer",
            BasicKind::UntypedNil => "untyped nil",
        }
    }
}

/// A struct field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub ty: Type,
}

/// A named (defined) type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Named {
    /// Import path of the defining package.
    pub pkg: String,
    pub name: String,
    pub underlying: Type,
}

/// A named, typed variable: a parameter, receiver or result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Var {
    pub name: String,
    pub ty: Type,
}

impl Var {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A function signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Signature {
    /// Receiver of a method; `None` for free functions.
    pub recv: Option<Var>,
    pub params: Vec<Var>,
    pub results: Vec<Type>,
    /// Whether the last parameter is a Go `...T` parameter.
    pub variadic: bool,
}

impl Signature {
    /// A free-function signature.
    pub fn new(params: Vec<Var>, results: Vec<Type>) -> Self {
        Self {
            recv: None,
            params,
            results,
            variadic: false,
        }
    }

    /// Attach a receiver, turning the signature into a method signature.
    pub fn with_recv(mut self, recv: Var) -> Self {
        self.recv = Some(recv);
        self
    }

    /// Whether this is a method signature.
    pub fn is_method(&self) -> bool {
        self.recv.is_some()
    }
}

/// A source type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Basic(BasicKind),
    Pointer(Box<Type>),
    Slice(Box<Type>),
    Array(Box<Type>, u64),
    Struct(Vec<Field>),
    Named(Box<Named>),
    Signature(Box<Signature>),
    Tuple(Vec<Type>),
}

impl Type {
    pub fn bool() -> Self {
        Type::Basic(BasicKind::Bool)
    }

    pub fn int() -> Self {
        Type::Basic(BasicKind::Int)
    }

    pub fn int32() -> Self {
        Type::Basic(BasicKind::Int32)
    }

    pub fn float64() -> Self {
        Type::Basic(BasicKind::Float64)
    }

    pub fn string() -> Self {
        Type::Basic(BasicKind::String)
    }

    pub fn pointer(elem: Type) -> Self {
        Type::Pointer(Box::new(elem))
    }

    pub fn slice(elem: Type) -> Self {
        Type::Slice(Box::new(elem))
    }

    pub fn array(elem: Type, len: u64) -> Self {
        Type::Array(Box::new(elem), len)
    }

    pub fn named(pkg: impl Into<String>, name: impl Into<String>, underlying: Type) -> Self {
        Type::Named(Box::new(Named {
            pkg: pkg.into(),
            name: name.into(),
            underlying,
        }))
    }

    pub fn signature(sig: Signature) -> Self {
        Type::Signature(Box::new(sig))
    }

    /// The type with all names stripped.
    pub fn underlying(&self) -> &Type {
        match self {
            Type::Named(named) => named.underlying.underlying(),
            other => other,
        }
    }

    /// Element type of a pointer.
    pub fn pointee(&self) -> Option<&Type> {
        match self.underlying() {
            Type::Pointer(elem) => Some(elem),
            _ => None,
        }
    }

    /// Name of the defined type behind an optional pointer, as used for method receivers.
    pub fn receiver_name(&self) -> Option<(&str, bool)> {
        match self {
            Type::Named(named) => Some((named.name.as_str(), false)),
            Type::Pointer(elem) => match elem.as_ref() {
                Type::Named(named) => Some((named.name.as_str(), true)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Basic(kind) => f.write_str(kind.name()),
            Type::Pointer(elem) => write!(f, "*{elem}"),
            Type::Slice(elem) => write!(f, "[]{elem}"),
            Type::Array(elem, len) => write!(f, "[{len}]{elem}"),
            Type::Struct(fields) => {
                f.write_str("struct{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{} {}", field.name, field.ty)?;
                }
                f.write_str("}")
            }
            Type::Named(named) => write!(f, "{}.{}", named.pkg, named.name),
            Type::Signature(sig) => write!(f, "{sig}"),
            Type::Tuple(types) => {
                f.write_str("(")?;
                for (i, ty) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{ty}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("func(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if self.variadic && i + 1 == self.params.len() {
                match &param.ty {
                    Type::Slice(elem) => write!(f, "{} ...{}", param.name, elem)?,
                    ty => write!(f, "{} ...{}", param.name, ty)?,
                }
            } else {
                write!(f, "{} {}", param.name, param.ty)?;
            }
        }
        f.write_str(")")?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] => write!(f, " {single}"),
            many => {
                f.write_str(" (")?;
                for (i, ty) in many.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{ty}")?;
                }
                f.write_str(")")
            }
        }
    }
}
