//! Instruction builder for function bodies.
//!
//! The [`Builder`] owns the blocks of one function while its body is being
//! constructed and appends instructions at an insertion cursor. When done,
//! [`Builder::finish`] yields the [`Body`] to install with
//! [`Package::set_body`](crate::Package::set_body).
//!
//! # Example
//!
//! ```
//! use llgo_core::BinaryOp;
//! use llgo_ir::{Builder, FuncType, Program, Type};
//!
//! let prog = Program::new();
//! let mut pkg = prog.new_package("main", "main");
//! let f = pkg.new_func("main.double", FuncType::new(vec![Type::i64()], vec![Type::i64()]));
//!
//! let mut b = Builder::new(f, 1);
//! let x = pkg.func(f).param(0).unwrap();
//! let y = b.bin_op(BinaryOp::Add, x.clone(), x);
//! b.ret(vec![y]);
//! pkg.set_body(f, b.finish());
//!
//! assert_eq!(pkg.func(f).body().unwrap().instr_count(), 2);
//! ```

use llgo_core::{BinaryOp, UnaryOp};

use crate::expr::{BlockId, Expr, ExprKind, FuncId, ValueId};
use crate::instr::{Block, Body, Instr, InstrKind};
use crate::types::Type;

/// Appends instructions to the blocks of one function.
#[derive(Debug)]
pub struct Builder {
    /// The function whose body is being built.
    func: FuncId,
    blocks: Vec<Block>,
    /// Insertion cursor.
    current: BlockId,
    next_value: u32,
}

impl Builder {
    /// Create a builder for `func` with `nblocks` empty blocks.
    ///
    /// The cursor starts at block 0.
    pub fn new(func: FuncId, nblocks: usize) -> Self {
        debug_assert!(nblocks > 0, "a function body has at least one block");
        Self {
            func,
            blocks: vec![Block::default(); nblocks],
            current: BlockId::new(0),
            next_value: 0,
        }
    }

    pub fn func(&self) -> FuncId {
        self.func
    }

    /// The block at `index`, if it exists.
    pub fn block(&self, index: usize) -> Option<BlockId> {
        (index < self.blocks.len()).then(|| BlockId::new(index as u32))
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Move the insertion cursor to the end of `block`.
    pub fn set_block(&mut self, block: BlockId) {
        debug_assert!(block.index() < self.blocks.len());
        self.current = block;
    }

    pub fn current_block(&self) -> BlockId {
        self.current
    }

    // ==========================================================================
    // Emission
    // ==========================================================================

    fn push(&mut self, kind: InstrKind) {
        self.push_instr(Instr {
            result: None,
            ty: Type::Void,
            kind,
        });
    }

    fn push_value(&mut self, ty: Type, kind: InstrKind) -> Expr {
        let id = ValueId::new(self.next_value);
        self.next_value += 1;
        self.push_instr(Instr {
            result: Some(id),
            ty: ty.clone(),
            kind,
        });
        Expr::new(ExprKind::Value(id), ty)
    }

    fn push_instr(&mut self, instr: Instr) {
        self.blocks[self.current.index()].instrs.push(instr);
    }

    /// Emit a call. Calls without results yield a void expression.
    pub fn call(&mut self, callee: Expr, args: Vec<Expr>) -> Expr {
        let ret = match callee.ty() {
            Type::Func(ft) => ft.ret_type(),
            Type::Ptr(elem) => match elem.as_ref() {
                Type::Func(ft) => ft.ret_type(),
                _ => Type::Void,
            },
            _ => Type::Void,
        };
        let kind = InstrKind::Call { callee, args };
        if ret.is_void() {
            self.push_instr(Instr {
                result: None,
                ty: Type::Void,
                kind,
            });
            Expr::void()
        } else {
            self.push_value(ret, kind)
        }
    }

    /// Emit `x op y`. Comparisons yield `i1`, everything else the type of `x`.
    pub fn bin_op(&mut self, op: BinaryOp, x: Expr, y: Expr) -> Expr {
        let ty = if op.is_comparison() {
            Type::bool()
        } else {
            x.ty().clone()
        };
        self.push_value(ty, InstrKind::BinOp { op, x, y })
    }

    /// Emit `op x`. A dereference yields the pointee type.
    pub fn un_op(&mut self, op: UnaryOp, x: Expr) -> Expr {
        let ty = match op {
            UnaryOp::Deref | UnaryOp::Recv => x.ty().pointee().cloned().unwrap_or(Type::Void),
            UnaryOp::Not => Type::bool(),
            UnaryOp::Neg | UnaryOp::Xor => x.ty().clone(),
        };
        self.push_value(ty, InstrKind::UnOp { op, x })
    }

    /// Emit the address of element `index` of `x`.
    pub fn index_addr(&mut self, x: Expr, index: Expr) -> Expr {
        let ty = x.ty().elem_ptr();
        self.push_value(ty, InstrKind::IndexAddr { x, index })
    }

    /// Emit an allocation of `ty`; the result is a pointer to it.
    pub fn alloc(&mut self, ty: Type, heap: bool) -> Expr {
        self.push_value(Type::ptr(ty.clone()), InstrKind::Alloc { ty, heap })
    }

    /// Emit `*ptr = val`.
    pub fn store(&mut self, ptr: Expr, val: Expr) {
        self.push(InstrKind::Store { ptr, val });
    }

    // ==========================================================================
    // Terminators
    // ==========================================================================

    pub fn jump(&mut self, target: BlockId) {
        self.push(InstrKind::Jump(target));
    }

    pub fn cond_br(&mut self, cond: Expr, then: BlockId, els: BlockId) {
        self.push(InstrKind::CondBr { cond, then, els });
    }

    pub fn ret(&mut self, results: Vec<Expr>) {
        self.push(InstrKind::Ret(results));
    }

    /// Finish the body.
    pub fn finish(self) -> Body {
        Body {
            blocks: self.blocks,
        }
    }
}
