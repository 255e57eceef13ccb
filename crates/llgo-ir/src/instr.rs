//! Target IR instructions and function bodies.

use llgo_core::{BinaryOp, UnaryOp};

use crate::expr::{BlockId, Expr, ValueId};
use crate::types::Type;

/// The operation an instruction performs.
#[derive(Debug, Clone, PartialEq)]
pub enum InstrKind {
    Call { callee: Expr, args: Vec<Expr> },
    BinOp { op: BinaryOp, x: Expr, y: Expr },
    UnOp { op: UnaryOp, x: Expr },
    IndexAddr { x: Expr, index: Expr },
    /// Allocation of a `ty`, on the heap or in the stack frame.
    Alloc { ty: Type, heap: bool },
    Store { ptr: Expr, val: Expr },
    Jump(BlockId),
    CondBr { cond: Expr, then: BlockId, els: BlockId },
    Ret(Vec<Expr>),
}

/// An instruction and the value it defines.
#[derive(Debug, Clone, PartialEq)]
pub struct Instr {
    /// `None` for stores, terminators and calls without results.
    pub result: Option<ValueId>,
    /// Type of the result; `void` when there is none.
    pub ty: Type,
    pub kind: InstrKind,
}

impl Instr {
    pub fn is_terminator(&self) -> bool {
        matches!(
            self.kind,
            InstrKind::Jump(_) | InstrKind::CondBr { .. } | InstrKind::Ret(_)
        )
    }
}

/// A basic block of a function body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub(crate) instrs: Vec<Instr>,
}

impl Block {
    pub fn instrs(&self) -> &[Instr] {
        &self.instrs
    }

    /// The last instruction, if it ends the block.
    pub fn terminator(&self) -> Option<&Instr> {
        self.instrs.last().filter(|i| i.is_terminator())
    }
}

/// The blocks of a defined function.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    pub(crate) blocks: Vec<Block>,
}

impl Body {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(id.index())
    }

    /// All instructions in block order.
    pub fn instrs(&self) -> impl Iterator<Item = &Instr> {
        self.blocks.iter().flat_map(|b| b.instrs.iter())
    }

    pub fn instr_count(&self) -> usize {
        self.blocks.iter().map(|b| b.instrs.len()).sum()
    }
}
