//! SSA functions and basic blocks.
//!
//! A [`Function`] owns an arena of instructions; blocks list the ids of
//! their instructions in execution order. Instructions are appended with
//! [`Function::emit`], which returns the [`Value`] later instructions use to
//! refer to the result.
//!
//! # Example
//!
//! ```
//! use llgo_core::{BinaryOp, Pos};
//! use llgo_ssa::{BinOp, Function, Instruction, Return, Signature, Type, Var};
//!
//! let sig = Signature::new(
//!     vec![Var::new("a", Type::int()), Var::new("b", Type::int())],
//!     vec![Type::int()],
//! );
//! let mut f = Function::new("main", "add", sig, Pos::new(10));
//! let entry = f.add_block("entry");
//! let sum = f.emit(entry, Instruction::BinOp(BinOp {
//!     op: BinaryOp::Add,
//!     x: f.param(0),
//!     y: f.param(1),
//!     ty: Type::int(),
//! }));
//! f.emit(entry, Instruction::Return(Return { results: vec![sum] }));
//!
//! assert_eq!(f.blocks().len(), 1);
//! assert!(f.to_string().contains("t0 = a + b"));
//! ```

use std::fmt;

use llgo_core::{Pos, UnaryOp};

use crate::instr::{If, Instruction};
use crate::types::{Signature, Type};
use crate::value::{FuncRef, InstrId, ParamId, Value};

/// A function parameter; the receiver of a method is parameter 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub id: ParamId,
    pub name: String,
    pub ty: Type,
}

/// A basic block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BasicBlock {
    /// Position of the block in [`Function::blocks`].
    pub index: usize,
    pub comment: String,
    pub instrs: Vec<InstrId>,
    pub succs: Vec<usize>,
    pub preds: Vec<usize>,
}

/// An SSA function.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Import path of the defining package.
    pub pkg: String,
    pub name: String,
    pub signature: Signature,
    pub pos: Pos,
    /// Unbound type parameters; non-empty for generic function definitions.
    pub type_params: Vec<String>,
    params: Vec<Parameter>,
    blocks: Vec<BasicBlock>,
    instrs: Vec<Instruction>,
    /// Block index of each instruction, parallel to `instrs`.
    owners: Vec<usize>,
}

impl Function {
    /// Create a function without blocks; parameters follow the signature.
    pub fn new(pkg: impl Into<String>, name: impl Into<String>, signature: Signature, pos: Pos) -> Self {
        let params = signature
            .recv
            .iter()
            .chain(&signature.params)
            .enumerate()
            .map(|(i, var)| Parameter {
                id: ParamId::new(i as u32),
                name: var.name.clone(),
                ty: var.ty.clone(),
            })
            .collect();

        Self {
            pkg: pkg.into(),
            name: name.into(),
            signature,
            pos,
            type_params: Vec::new(),
            params,
            blocks: Vec::new(),
            instrs: Vec::new(),
            owners: Vec::new(),
        }
    }

    /// Mark the function as a generic definition.
    pub fn with_type_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_params = names.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this is a generic definition with unbound type parameters.
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    /// Whether the function has a body (external functions have no blocks).
    pub fn is_external(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// The value of parameter `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn param(&self, index: usize) -> Value {
        Value::Param(self.params[index].id)
    }

    /// Position of a parameter in the parameter list.
    pub fn param_index(&self, id: ParamId) -> Option<usize> {
        self.params.iter().position(|p| p.id == id)
    }

    pub fn blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> Option<&BasicBlock> {
        self.blocks.get(index)
    }

    pub fn instr(&self, id: InstrId) -> Option<&Instruction> {
        self.instrs.get(id.index())
    }

    /// Index of the block that contains an instruction.
    pub fn block_of(&self, id: InstrId) -> Option<usize> {
        self.owners.get(id.index()).copied()
    }

    /// A call-site reference to this function.
    pub fn func_ref(&self) -> FuncRef {
        FuncRef {
            pkg: self.pkg.clone(),
            name: self.name.clone(),
            signature: self.signature.clone(),
        }
    }

    /// Same as [`Function::func_ref`], wrapped as a [`Value`].
    pub fn value(&self) -> Value {
        Value::Function(self.func_ref())
    }

    // ==========================================================================
    // Construction
    // ==========================================================================

    /// Append a new empty block and return its index.
    pub fn add_block(&mut self, comment: impl Into<String>) -> usize {
        let index = self.blocks.len();
        self.blocks.push(BasicBlock {
            index,
            comment: comment.into(),
            ..BasicBlock::default()
        });
        index
    }

    /// Append an instruction to `block` and return the value referring to it.
    ///
    /// The returned value is only meaningful for value-producing instructions.
    ///
    /// # Panics
    ///
    /// Panics if `block` does not exist.
    pub fn emit(&mut self, block: usize, instr: Instruction) -> Value {
        let id = InstrId::new(self.instrs.len() as u32);
        self.instrs.push(instr);
        self.owners.push(block);
        self.blocks[block].instrs.push(id);
        Value::Instr(id)
    }

    /// Record a control-flow edge.
    ///
    /// # Panics
    ///
    /// Panics if either block does not exist.
    pub fn add_edge(&mut self, from: usize, to: usize) {
        self.blocks[from].succs.push(to);
        self.blocks[to].preds.push(from);
    }

    /// Terminate `from` with a jump to `to`.
    pub fn jump(&mut self, from: usize, to: usize) {
        self.emit(from, Instruction::Jump);
        self.add_edge(from, to);
    }

    /// Terminate `from` with a branch on `cond`.
    pub fn branch(&mut self, from: usize, cond: Value, then: usize, els: usize) {
        self.emit(from, Instruction::If(If { cond }));
        self.add_edge(from, then);
        self.add_edge(from, els);
    }

    // ==========================================================================
    // Text
    // ==========================================================================

    /// Qualified name, e.g. `main.add` or `(*main.Point).Move`.
    pub fn full_name(&self) -> String {
        self.func_ref().to_string()
    }

    /// Render an operand, using parameter names.
    pub fn value_text(&self, value: &Value) -> String {
        match value {
            Value::Param(id) => match self.param_index(*id) {
                Some(index) => self.params[index].name.clone(),
                None => value.to_string(),
            },
            other => other.to_string(),
        }
    }

    /// Render an instruction the way the function dump shows it.
    pub fn instr_text(&self, id: InstrId) -> String {
        let Some(instr) = self.instr(id) else {
            return format!("<invalid t{}>", id.index());
        };
        let v = |value: &Value| self.value_text(value);
        let succ = |n: usize| {
            self.block_of(id)
                .and_then(|b| self.blocks[b].succs.get(n).copied())
                .map(|s| s.to_string())
                .unwrap_or_else(|| "?".to_string())
        };

        let body = match instr {
            Instruction::Call(call) => {
                let args: Vec<_> = call.args.iter().map(v).collect();
                format!("{}({})", v(&call.callee), args.join(", "))
            }
            Instruction::BinOp(bin) => format!("{} {} {}", v(&bin.x), bin.op, v(&bin.y)),
            Instruction::UnOp(un) => match un.op {
                UnaryOp::Recv => format!("<-{}", v(&un.x)),
                op => format!("{}{}", op, v(&un.x)),
            },
            Instruction::IndexAddr(ia) => format!("&{}[{}]", v(&ia.x), v(&ia.index)),
            Instruction::Alloc(alloc) => format!(
                "{} {} ({})",
                if alloc.heap { "new" } else { "local" },
                alloc.ty,
                alloc.comment
            ),
            Instruction::Phi(phi) => {
                let edges: Vec<_> = phi
                    .edges
                    .iter()
                    .enumerate()
                    .map(|(i, e)| format!("{i}: {}", v(e)))
                    .collect();
                format!("phi [{}]", edges.join(", "))
            }
            Instruction::FieldAddr(fa) => format!("&{}.#{}", v(&fa.x), fa.field),
            Instruction::Convert(conv) => format!("convert {} ({})", conv.ty, v(&conv.x)),
            Instruction::Store(store) => format!("*{} = {}", v(&store.addr), v(&store.val)),
            Instruction::Jump => format!("jump {}", succ(0)),
            Instruction::If(branch) => {
                format!("if {} goto {} else {}", v(&branch.cond), succ(0), succ(1))
            }
            Instruction::Return(ret) => {
                let results: Vec<_> = ret.results.iter().map(v).collect();
                if results.is_empty() {
                    "return".to_string()
                } else {
                    format!("return {}", results.join(", "))
                }
            }
            Instruction::Panic(panic) => format!("panic {}", v(&panic.x)),
        };

        if instr.is_value() {
            format!("t{} = {}", id.index(), body)
        } else {
            body
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Name: {}", self.full_name())?;
        writeln!(f, "# Package: {}", self.pkg)?;
        if self.is_generic() {
            writeln!(f, "# Type parameters: {}", self.type_params.join(", "))?;
        }
        let params: Vec<_> = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.name, p.ty))
            .collect();
        writeln!(f, "func {}({}):", self.name, params.join(", "))?;
        if self.is_external() {
            return writeln!(f, "\t(external)");
        }
        for block in &self.blocks {
            writeln!(
                f,
                "{}: {} P:{} S:{}",
                block.index,
                block.comment,
                block.preds.len(),
                block.succs.len()
            )?;
            for &id in &block.instrs {
                writeln!(f, "\t{}", self.instr_text(id))?;
            }
        }
        Ok(())
    }
}
