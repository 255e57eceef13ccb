//! llgo SSA crate.
//!
//! The input of the lowering: a fully type-checked, optimized SSA form of a
//! Go program, as handed over by the front-end. It includes:
//!
//! - [`types`]: source type descriptors and signatures
//! - [`value`]: operands (instructions, parameters, functions, globals, constants)
//! - [`instr`]: the instruction set
//! - [`function`]: functions, basic blocks and the textual dump
//! - [`package`]: packages and their members
//! - [`ast`]: the slice of source syntax the lowering reads (doc-comment directives)

pub mod ast;
pub mod function;
pub mod instr;
pub mod package;
pub mod types;
pub mod value;

pub use function::{BasicBlock, Function, Parameter};
pub use instr::{
    Alloc, BinOp, Call, Convert, FieldAddr, If, IndexAddr, Instruction, Panic, Phi, Return, Store,
    UnOp,
};
pub use package::{Member, NamedConst, Package, TypeName};
pub use types::{BasicKind, Field, Named, Signature, Type, Var};
pub use value::{Const, ConstValue, FuncRef, Global, InstrId, ParamId, Value};
