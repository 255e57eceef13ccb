//! Textual rendering of target IR packages.
//!
//! The output follows LLVM assembly closely enough to be read by people
//! familiar with it; it is not meant to be fed to an assembler.

use std::fmt::{self, Write};

use llgo_core::{BinaryOp, UnaryOp};

use crate::expr::{Expr, ExprKind, Literal};
use crate::instr::{Instr, InstrKind};
use crate::package::{Function, Package};
use crate::types::Type;

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; ModuleID = '{}'", self.path())?;
        writeln!(f, "source_filename = \"{}\"", self.path())?;

        if !self.types().is_empty() {
            writeln!(f)?;
        }
        for decl in self.types() {
            writeln!(f, "%{} = type {}", decl.name(), decl.ty())?;
        }

        if !self.globals().is_empty() {
            writeln!(f)?;
        }
        for global in self.globals() {
            match global.init() {
                Some(init) => writeln!(
                    f,
                    "@{} = global {} {}",
                    global.name(),
                    global.ty(),
                    Operand(self, init)
                )?,
                None => writeln!(f, "@{} = external global {}", global.name(), global.ty())?,
            }
        }

        for func in self.functions() {
            writeln!(f)?;
            write_function(f, self, func)?;
        }
        Ok(())
    }
}

fn write_function(f: &mut fmt::Formatter<'_>, pkg: &Package, func: &Function) -> fmt::Result {
    let sig = func.sig();
    let keyword = if func.is_declaration() { "declare" } else { "define" };
    write!(f, "{keyword} {} @{}(", sig.ret_type(), func.name())?;
    for (i, param) in sig.params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        if func.is_declaration() {
            write!(f, "{param}")?;
        } else {
            write!(f, "{param} %p{i}")?;
        }
    }
    if sig.variadic {
        if !sig.params.is_empty() {
            f.write_str(", ")?;
        }
        f.write_str("...")?;
    }
    f.write_str(")")?;

    let Some(body) = func.body() else {
        return writeln!(f);
    };
    writeln!(f, " {{")?;
    for (index, block) in body.blocks().iter().enumerate() {
        writeln!(f, "_llgo_{index}:")?;
        for instr in block.instrs() {
            f.write_str("  ")?;
            write_instr(f, pkg, instr)?;
            writeln!(f)?;
        }
    }
    writeln!(f, "}}")
}

fn write_instr(f: &mut fmt::Formatter<'_>, pkg: &Package, instr: &Instr) -> fmt::Result {
    if let Some(result) = instr.result {
        write!(f, "%{} = ", result.index())?;
    }
    match &instr.kind {
        InstrKind::Call { callee, args } => {
            write!(f, "call {} {}(", instr.ty, Operand(pkg, callee))?;
            write_typed_list(f, pkg, args)?;
            f.write_str(")")
        }
        InstrKind::BinOp { op, x, y } => {
            let float = matches!(x.ty(), Type::Float(_));
            write!(
                f,
                "{} {} {}, {}",
                bin_mnemonic(*op, float),
                x.ty(),
                Operand(pkg, x),
                Operand(pkg, y)
            )
        }
        InstrKind::UnOp { op, x } => match op {
            UnaryOp::Deref => write!(f, "load {}, {} {}", instr.ty, x.ty(), Operand(pkg, x)),
            _ => write!(f, "{} {} {}", un_mnemonic(*op), x.ty(), Operand(pkg, x)),
        },
        InstrKind::IndexAddr { x, index } => write!(
            f,
            "getelementptr {} {}, {} {}",
            x.ty(),
            Operand(pkg, x),
            index.ty(),
            Operand(pkg, index)
        ),
        InstrKind::Alloc { ty, heap: false } => write!(f, "alloca {ty}"),
        InstrKind::Alloc { ty, heap: true } => write!(f, "heapalloc {ty}"),
        InstrKind::Store { ptr, val } => write!(
            f,
            "store {} {}, {} {}",
            val.ty(),
            Operand(pkg, val),
            ptr.ty(),
            Operand(pkg, ptr)
        ),
        InstrKind::Jump(target) => write!(f, "br label %_llgo_{}", target.index()),
        InstrKind::CondBr { cond, then, els } => write!(
            f,
            "br i1 {}, label %_llgo_{}, label %_llgo_{}",
            Operand(pkg, cond),
            then.index(),
            els.index()
        ),
        InstrKind::Ret(results) => match results.as_slice() {
            [] => f.write_str("ret void"),
            [single] => write!(f, "ret {} {}", single.ty(), Operand(pkg, single)),
            many => {
                let ty = Type::Struct(many.iter().map(|e| e.ty().clone()).collect());
                write!(f, "ret {ty} {{ ")?;
                write_typed_list(f, pkg, many)?;
                f.write_str(" }")
            }
        },
    }
}

fn write_typed_list(f: &mut fmt::Formatter<'_>, pkg: &Package, exprs: &[Expr]) -> fmt::Result {
    for (i, expr) in exprs.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{} {}", expr.ty(), Operand(pkg, expr))?;
    }
    Ok(())
}

fn bin_mnemonic(op: BinaryOp, float: bool) -> &'static str {
    match (op, float) {
        (BinaryOp::Add, false) => "add",
        (BinaryOp::Add, true) => "fadd",
        (BinaryOp::Sub, false) => "sub",
        (BinaryOp::Sub, true) => "fsub",
        (BinaryOp::Mul, false) => "mul",
        (BinaryOp::Mul, true) => "fmul",
        (BinaryOp::Quo, false) => "sdiv",
        (BinaryOp::Quo, true) => "fdiv",
        (BinaryOp::Rem, false) => "srem",
        (BinaryOp::Rem, true) => "frem",
        (BinaryOp::And, _) => "and",
        (BinaryOp::Or, _) => "or",
        (BinaryOp::Xor, _) => "xor",
        (BinaryOp::Shl, _) => "shl",
        (BinaryOp::Shr, _) => "ashr",
        (BinaryOp::AndNot, _) => "andnot",
        (BinaryOp::Eql, false) => "icmp eq",
        (BinaryOp::Eql, true) => "fcmp oeq",
        (BinaryOp::Neq, false) => "icmp ne",
        (BinaryOp::Neq, true) => "fcmp one",
        (BinaryOp::Lss, false) => "icmp slt",
        (BinaryOp::Lss, true) => "fcmp olt",
        (BinaryOp::Leq, false) => "icmp sle",
        (BinaryOp::Leq, true) => "fcmp ole",
        (BinaryOp::Gtr, false) => "icmp sgt",
        (BinaryOp::Gtr, true) => "fcmp ogt",
        (BinaryOp::Geq, false) => "icmp sge",
        (BinaryOp::Geq, true) => "fcmp oge",
    }
}

fn un_mnemonic(op: UnaryOp) -> &'static str {
    match op {
        UnaryOp::Neg => "neg",
        UnaryOp::Not => "not",
        UnaryOp::Xor => "compl",
        UnaryOp::Deref => "load",
        UnaryOp::Recv => "recv",
    }
}

/// An expression rendered as an instruction operand.
struct Operand<'a>(&'a Package, &'a Expr);

impl fmt::Display for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Operand(pkg, expr) = *self;
        match expr.kind() {
            ExprKind::Value(id) => write!(f, "%{}", id.index()),
            ExprKind::Param(index) => write!(f, "%p{index}"),
            ExprKind::Func(id) => write!(f, "@{}", pkg.func(*id).name()),
            ExprKind::Global(id) => write!(f, "@{}", pkg.global(*id).name()),
            ExprKind::Const(literal) => write_literal(f, literal, expr.ty()),
            ExprKind::Void => f.write_str("void"),
        }
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, literal: &Literal, ty: &Type) -> fmt::Result {
    match literal {
        Literal::Bool(v) => write!(f, "{v}"),
        Literal::Int(v) => write!(f, "{v}"),
        Literal::Uint(v) => write!(f, "{v}"),
        Literal::Float(v) => write!(f, "{:e}", v.into_inner()),
        Literal::String(s) => {
            f.write_str("c\"")?;
            for byte in s.bytes() {
                if byte == b' ' || (byte.is_ascii_graphic() && byte != b'"' && byte != b'\\') {
                    f.write_char(byte as char)?;
                } else {
                    write!(f, "\\{byte:02X}")?;
                }
            }
            f.write_char('"')
        }
        Literal::Zero => match ty {
            Type::Int(1) => f.write_str("false"),
            Type::Int(_) => f.write_str("0"),
            Type::Float(_) => f.write_str("0.0"),
            Type::Ptr(_) | Type::Func(_) => f.write_str("null"),
            _ => f.write_str("zeroinitializer"),
        },
    }
}
