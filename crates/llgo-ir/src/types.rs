//! Target IR types.

use std::fmt;

/// A target IR type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    /// Integer of the given bit width; `i1` is the boolean type.
    Int(u32),
    /// Floating point of the given bit width.
    Float(u32),
    Ptr(Box<Type>),
    Array(Box<Type>, u64),
    Struct(Vec<Type>),
    Func(Box<FuncType>),
}

impl Type {
    pub fn bool() -> Self {
        Type::Int(1)
    }

    pub fn i8() -> Self {
        Type::Int(8)
    }

    pub fn i64() -> Self {
        Type::Int(64)
    }

    /// Untyped byte pointer.
    pub fn byte_ptr() -> Self {
        Type::ptr(Type::i8())
    }

    pub fn ptr(elem: Type) -> Self {
        Type::Ptr(Box::new(elem))
    }

    pub fn func(ft: FuncType) -> Self {
        Type::Func(Box::new(ft))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    /// Element type of a pointer.
    pub fn pointee(&self) -> Option<&Type> {
        match self {
            Type::Ptr(elem) => Some(elem),
            _ => None,
        }
    }

    /// Type of the address of an element of an indexable value.
    ///
    /// Handles pointers to arrays and slice headers (`{ T*, len, cap }`).
    pub fn elem_ptr(&self) -> Type {
        match self {
            Type::Ptr(elem) => match elem.as_ref() {
                Type::Array(inner, _) => Type::ptr(inner.as_ref().clone()),
                other => Type::ptr(other.clone()),
            },
            Type::Struct(fields) => match fields.first() {
                Some(data @ Type::Ptr(_)) => data.clone(),
                _ => Type::byte_ptr(),
            },
            _ => Type::byte_ptr(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("void"),
            Type::Int(bits) => write!(f, "i{bits}"),
            Type::Float(32) => f.write_str("float"),
            Type::Float(_) => f.write_str("double"),
            Type::Ptr(elem) => write!(f, "{elem}*"),
            Type::Array(elem, len) => write!(f, "[{len} x {elem}]"),
            Type::Struct(fields) => {
                f.write_str("{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str(" }")
            }
            Type::Func(ft) => write!(f, "{ft}"),
        }
    }
}

/// A function type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FuncType {
    pub params: Vec<Type>,
    pub results: Vec<Type>,
    /// C-style variadic: calls may pass extra arguments after `params`.
    pub variadic: bool,
}

impl FuncType {
    pub fn new(params: Vec<Type>, results: Vec<Type>) -> Self {
        Self {
            params,
            results,
            variadic: false,
        }
    }

    /// The single return type: `void`, the only result, or a struct of all results.
    pub fn ret_type(&self) -> Type {
        match self.results.as_slice() {
            [] => Type::Void,
            [single] => single.clone(),
            many => Type::Struct(many.to_vec()),
        }
    }
}

impl fmt::Display for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.ret_type())?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        if self.variadic {
            if !self.params.is_empty() {
                f.write_str(", ")?;
            }
            f.write_str("...")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ret_type_of_multiple_results() {
        let ft = FuncType::new(vec![], vec![Type::i64(), Type::bool()]);
        assert_eq!(ft.ret_type(), Type::Struct(vec![Type::i64(), Type::bool()]));
        assert_eq!(FuncType::default().ret_type(), Type::Void);
    }

    #[test]
    fn elem_ptr_of_array_pointer_and_slice() {
        let arr = Type::ptr(Type::Array(Box::new(Type::i64()), 4));
        assert_eq!(arr.elem_ptr(), Type::ptr(Type::i64()));

        let slice = Type::Struct(vec![Type::ptr(Type::bool()), Type::i64(), Type::i64()]);
        assert_eq!(slice.elem_ptr(), Type::ptr(Type::bool()));
    }

    #[test]
    fn display() {
        let mut ft = FuncType::new(vec![Type::byte_ptr()], vec![Type::Int(32)]);
        ft.variadic = true;
        assert_eq!(Type::func(ft).to_string(), "i32 (i8*, ...)");
        assert_eq!(Type::Float(64).to_string(), "double");
        assert_eq!(
            Type::Struct(vec![Type::byte_ptr(), Type::i64()]).to_string(),
            "{ i8*, i64 }"
        );
    }
}
