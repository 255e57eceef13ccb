//! SSA instructions.
//!
//! [`Instruction`] is a closed enum. Value-producing instructions (calls,
//! arithmetic, address computations, allocations, phis, conversions) can be
//! referenced by later instructions through [`Value::Instr`]; the remaining
//! ones (stores and terminators) exist only for their effect.

use llgo_core::{BinaryOp, UnaryOp};

use crate::types::Type;
use crate::value::Value;

/// A function call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Value,
    pub args: Vec<Value>,
    /// Result type; an empty tuple for calls without results.
    pub ty: Type,
}

/// A binary operation `x op y`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    pub op: BinaryOp,
    pub x: Value,
    pub y: Value,
    pub ty: Type,
}

/// A unary operation `op x`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnOp {
    pub op: UnaryOp,
    pub x: Value,
    pub ty: Type,
}

/// The address of element `index` of the array or slice `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexAddr {
    pub x: Value,
    pub index: Value,
    /// Pointer-to-element type of the result.
    pub ty: Type,
}

/// Allocation of a variable of type `ty`; the result is a `*ty`.
#[derive(Debug, Clone, PartialEq)]
pub struct Alloc {
    pub ty: Type,
    /// Whether escape analysis moved the variable to the heap.
    pub heap: bool,
    /// Name of the source variable, if any.
    pub comment: String,
}

/// `*addr = val`.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    pub addr: Value,
    pub val: Value,
}

/// Two-way branch on `cond` to the block's first or second successor.
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub cond: Value,
}

/// Return from the function with the given results.
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub results: Vec<Value>,
}

/// SSA phi node; `edges[i]` flows in from the block's `i`th predecessor.
#[derive(Debug, Clone, PartialEq)]
pub struct Phi {
    pub edges: Vec<Value>,
    pub ty: Type,
}

/// The address of field `field` of the struct pointed to by `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAddr {
    pub x: Value,
    pub field: usize,
    pub ty: Type,
}

/// A type conversion `ty(x)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Convert {
    pub x: Value,
    pub ty: Type,
}

/// `panic(x)`; terminates the block.
#[derive(Debug, Clone, PartialEq)]
pub struct Panic {
    pub x: Value,
}

/// An SSA instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    Call(Call),
    BinOp(BinOp),
    UnOp(UnOp),
    IndexAddr(IndexAddr),
    Alloc(Alloc),
    Phi(Phi),
    FieldAddr(FieldAddr),
    Convert(Convert),
    Store(Store),
    /// Unconditional jump to the block's only successor.
    Jump,
    If(If),
    Return(Return),
    Panic(Panic),
}

impl Instruction {
    /// Short name of the instruction kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Instruction::Call(_) => "Call",
            Instruction::BinOp(_) => "BinOp",
            Instruction::UnOp(_) => "UnOp",
            Instruction::IndexAddr(_) => "IndexAddr",
            Instruction::Alloc(_) => "Alloc",
            Instruction::Phi(_) => "Phi",
            Instruction::FieldAddr(_) => "FieldAddr",
            Instruction::Convert(_) => "Convert",
            Instruction::Store(_) => "Store",
            Instruction::Jump => "Jump",
            Instruction::If(_) => "If",
            Instruction::Return(_) => "Return",
            Instruction::Panic(_) => "Panic",
        }
    }

    /// Whether the instruction produces a value other instructions can use.
    pub fn is_value(&self) -> bool {
        match self {
            Instruction::Call(_)
            | Instruction::BinOp(_)
            | Instruction::UnOp(_)
            | Instruction::IndexAddr(_)
            | Instruction::Alloc(_)
            | Instruction::Phi(_)
            | Instruction::FieldAddr(_)
            | Instruction::Convert(_) => true,
            Instruction::Store(_)
            | Instruction::Jump
            | Instruction::If(_)
            | Instruction::Return(_)
            | Instruction::Panic(_) => false,
        }
    }

    /// Whether the instruction ends its block.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Instruction::Jump | Instruction::If(_) | Instruction::Return(_) | Instruction::Panic(_)
        )
    }

    /// Type of the produced value, for value-producing instructions.
    pub fn ty(&self) -> Option<Type> {
        match self {
            Instruction::Call(call) => Some(call.ty.clone()),
            Instruction::BinOp(bin) => Some(bin.ty.clone()),
            Instruction::UnOp(un) => Some(un.ty.clone()),
            Instruction::IndexAddr(ia) => Some(ia.ty.clone()),
            Instruction::Alloc(alloc) => Some(Type::pointer(alloc.ty.clone())),
            Instruction::Phi(phi) => Some(phi.ty.clone()),
            Instruction::FieldAddr(fa) => Some(fa.ty.clone()),
            Instruction::Convert(conv) => Some(conv.ty.clone()),
            _ => None,
        }
    }

    /// The operands of the instruction, in order.
    pub fn operands(&self) -> Vec<&Value> {
        match self {
            Instruction::Call(call) => std::iter::once(&call.callee).chain(&call.args).collect(),
            Instruction::BinOp(bin) => vec![&bin.x, &bin.y],
            Instruction::UnOp(un) => vec![&un.x],
            Instruction::IndexAddr(ia) => vec![&ia.x, &ia.index],
            Instruction::Alloc(_) | Instruction::Jump => Vec::new(),
            Instruction::Phi(phi) => phi.edges.iter().collect(),
            Instruction::FieldAddr(fa) => vec![&fa.x],
            Instruction::Convert(conv) => vec![&conv.x],
            Instruction::Store(store) => vec![&store.addr, &store.val],
            Instruction::If(branch) => vec![&branch.cond],
            Instruction::Return(ret) => ret.results.iter().collect(),
            Instruction::Panic(panic) => vec![&panic.x],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Const;

    #[test]
    fn value_classification() {
        let alloc = Instruction::Alloc(Alloc {
            ty: Type::int(),
            heap: false,
            comment: "x".into(),
        });
        assert!(alloc.is_value());
        assert_eq!(alloc.ty(), Some(Type::pointer(Type::int())));

        let store = Instruction::Store(Store {
            addr: Value::Const(Const::nil(Type::pointer(Type::int()))),
            val: Value::Const(Const::int(1)),
        });
        assert!(!store.is_value());
        assert!(!store.is_terminator());
        assert_eq!(store.ty(), None);
    }

    #[test]
    fn terminators() {
        assert!(Instruction::Jump.is_terminator());
        assert!(
            Instruction::Return(Return { results: vec![] }).is_terminator()
        );
        assert!(!Instruction::Jump.is_value());
    }

    #[test]
    fn call_operands_include_callee() {
        let call = Instruction::Call(Call {
            callee: Value::Builtin("println".into()),
            args: vec![Value::Const(Const::int(1)), Value::Const(Const::int(2))],
            ty: Type::Tuple(vec![]),
        });
        let operands = call.operands();
        assert_eq!(operands.len(), 3);
        assert_eq!(operands[0], &Value::Builtin("println".into()));
    }
}
