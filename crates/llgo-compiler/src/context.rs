//! CompilationContext - per-translation state.
//!
//! One context exists for each call to [`translate`](crate::translate). It
//! owns the target package under construction and everything the passes
//! share: link names, imported packages, the per-block value cache, the
//! queue of pending body builds and collected diagnostics.

use std::rc::Rc;

use llgo_core::{CompileError, SymbolKind};
use llgo_ir::{self as ir, Expr, FuncId, GlobalId, Program};
use llgo_ssa::{self as ssa, FuncRef, InstrId, Member};
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::options::CompileOptions;

type Result<T> = std::result::Result<T, CompileError>;

/// Target name of the program entry function.
pub const ENTRY_FUNC: &str = "main";

/// Target name of the aggregated package initializer called on entry.
pub const INIT_FUNC: &str = "main.init";

/// Link-name prefix of symbols that live in C.
const C_PREFIX: &str = "C.";

/// `"<pkg>.<name>"`.
pub fn full_name(pkg: &str, name: &str) -> String {
    format!("{pkg}.{name}")
}

/// Members of a package ordered by source position, ties broken by name.
pub fn sorted_members(pkg: &ssa::Package) -> Vec<&Member> {
    let mut members: Vec<(&str, &Member)> = pkg.members().collect();
    members.sort_by(|(a_name, a), (b_name, b)| (a.pos(), a_name).cmp(&(b.pos(), b_name)));
    members.into_iter().map(|(_, m)| m).collect()
}

/// A function body waiting for the compilation pass.
#[derive(Debug, Clone)]
pub struct PendingBody {
    pub id: FuncId,
    /// Target name of the function.
    pub name: String,
    pub func: Rc<ssa::Function>,
}

/// Shared state of one translation.
pub struct CompilationContext<'a> {
    prog: &'a Program,
    source: &'a ssa::Package,
    pkg: ir::Package,
    options: CompileOptions,
    /// Function whose body is being built.
    current: Option<FuncId>,
    /// `"<pkgpath>.<name>"` to link name.
    link: FxHashMap<String, String>,
    /// Import paths whose declarations were imported.
    loaded: FxHashSet<String>,
    /// Lowered instructions of the current block.
    block_values: FxHashMap<InstrId, Expr>,
    pending: Vec<PendingBody>,
    errors: Vec<CompileError>,
}

impl<'a> CompilationContext<'a> {
    pub fn new(prog: &'a Program, source: &'a ssa::Package, options: CompileOptions) -> Self {
        Self {
            prog,
            source,
            pkg: prog.new_package(&source.name, &source.path),
            options,
            current: None,
            link: FxHashMap::default(),
            loaded: FxHashSet::default(),
            block_values: FxHashMap::default(),
            pending: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn prog(&self) -> &'a Program {
        self.prog
    }

    pub fn source(&self) -> &'a ssa::Package {
        self.source
    }

    pub fn pkg(&self) -> &ir::Package {
        &self.pkg
    }

    pub fn pkg_mut(&mut self) -> &mut ir::Package {
        &mut self.pkg
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Consume the context, yielding the translated package.
    pub fn into_package(self) -> ir::Package {
        self.pkg
    }

    // ==========================================================================
    // Current function
    // ==========================================================================

    pub fn current(&self) -> Option<FuncId> {
        self.current
    }

    pub fn begin_function(&mut self, id: FuncId) {
        debug_assert!(self.current.is_none(), "nested function body build");
        self.current = Some(id);
    }

    pub fn end_function(&mut self) {
        self.current = None;
        self.block_values.clear();
    }

    // ==========================================================================
    // Block value cache
    // ==========================================================================

    /// Forget every value lowered in the previous block.
    pub fn begin_block(&mut self) {
        self.block_values.clear();
    }

    pub fn cached_value(&self, id: InstrId) -> Option<&Expr> {
        self.block_values.get(&id)
    }

    pub fn cache_value(&mut self, id: InstrId, value: Expr) {
        self.block_values.insert(id, value);
    }

    // ==========================================================================
    // Pending bodies and diagnostics
    // ==========================================================================

    pub fn push_pending(&mut self, body: PendingBody) {
        self.pending.push(body);
    }

    pub fn take_pending(&mut self) -> Vec<PendingBody> {
        std::mem::take(&mut self.pending)
    }

    pub fn push_error(&mut self, error: CompileError) {
        self.errors.push(error);
    }

    pub fn take_errors(&mut self) -> Vec<CompileError> {
        std::mem::take(&mut self.errors)
    }

    // ==========================================================================
    // Naming
    // ==========================================================================

    /// Register a link name for `"<pkgpath>.<name>"`.
    pub fn set_link_name(&mut self, full: String, link: String) {
        self.link.insert(full, link);
    }

    pub fn link_name(&self, full: &str) -> Option<&str> {
        self.link.get(full).map(String::as_str)
    }

    /// Target name of a function.
    pub fn func_name(&self, f: &FuncRef) -> String {
        if let Some(recv) = &f.signature.recv {
            return match recv.ty.receiver_name() {
                Some((recv_name, false)) => format!("{}.{}.{}", f.pkg, recv_name, f.name),
                Some((recv_name, true)) => format!("{}.(*{}).{}", f.pkg, recv_name, f.name),
                None => full_name(&f.pkg, &f.name),
            };
        }
        let full = full_name(&f.pkg, &f.name);
        if let Some(link) = self.link_name(&full) {
            return link.strip_prefix(C_PREFIX).unwrap_or(link).to_string();
        }
        if full == "main.main" {
            return ENTRY_FUNC.to_string();
        }
        full
    }

    /// Target name of a global; link names lose their `C.` prefix.
    pub fn var_name(&self, g: &ssa::Global) -> String {
        let full = full_name(&g.pkg, &g.name);
        match self.link_name(&full) {
            Some(link) => link.strip_prefix(C_PREFIX).unwrap_or(link).to_string(),
            None => full,
        }
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// The declared target function for `f`.
    ///
    /// Functions of other packages are imported on first use.
    pub fn func_of(&mut self, f: &FuncRef) -> Result<FuncId> {
        let name = self.func_name(f);
        if let Some(id) = self.pkg.func_of(&name) {
            return Ok(id);
        }
        if f.pkg != self.source.path {
            self.import(&f.pkg)?;
            if let Some(id) = self.pkg.func_of(&name) {
                return Ok(id);
            }
        }
        Err(CompileError::Undeclared {
            kind: SymbolKind::Function,
            name,
        })
    }

    /// The declared target global for `g`.
    pub fn var_of(&mut self, g: &ssa::Global) -> Result<GlobalId> {
        let name = self.var_name(g);
        if let Some(id) = self.pkg.var_of(&name) {
            return Ok(id);
        }
        if g.pkg != self.source.path {
            self.import(&g.pkg)?;
            if let Some(id) = self.pkg.var_of(&name) {
                return Ok(id);
            }
        }
        Err(CompileError::Undeclared {
            kind: SymbolKind::Global,
            name,
        })
    }

    /// Declare the members of an imported package, once.
    ///
    /// Functions become declarations, globals external globals. Unknown
    /// paths are recorded as loaded and declare nothing.
    pub fn import(&mut self, path: &str) -> Result<()> {
        if !self.loaded.insert(path.to_string()) {
            return Ok(());
        }
        let source = self.source;
        let trace = self.options.trace_instructions();
        let Some(imported) = source.find_import(path) else {
            if trace {
                debug!("import {path}: not in the import graph");
            }
            return Ok(());
        };
        if trace {
            debug!("==> Import {path}");
        }

        let prog = self.prog;
        for member in sorted_members(imported) {
            match member {
                Member::Function(f) if !f.is_generic() => {
                    let name = self.func_name(&f.func_ref());
                    self.pkg.new_func(&name, prog.func_type(&f.signature));
                }
                Member::Function(_) | Member::Const(_) => {}
                Member::Global(g) => {
                    let name = self.var_name(g);
                    self.pkg.new_var(&name, prog.type_of(&g.ty));
                }
                Member::Type(t) => {
                    self.pkg
                        .new_type(&full_name(&t.pkg, &t.name), prog.type_of(&t.ty));
                }
            }
        }
        Ok(())
    }

    /// Target name of the function currently being built, for diagnostics.
    pub fn current_name(&self) -> String {
        match self.current {
            Some(id) => self.pkg.func(id).name().to_string(),
            None => String::from("<package>"),
        }
    }
}
