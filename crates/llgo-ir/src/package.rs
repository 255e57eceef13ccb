//! Target IR packages: functions, globals and named types.
//!
//! Declarations are kept in insertion order, which is the order the printer
//! emits them in. Lookup by name goes through a [`SymbolHash`] index.

use rustc_hash::FxHashMap;

use crate::expr::{Expr, ExprKind, FuncId, GlobalId, TypeId};
use crate::instr::Body;
use crate::symbol::SymbolHash;
use crate::types::{FuncType, Type};

/// A declared function; it has a body once defined.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    name: String,
    sig: FuncType,
    body: Option<Body>,
}

impl Function {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sig(&self) -> &FuncType {
        &self.sig
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Whether only the declaration exists.
    pub fn is_declaration(&self) -> bool {
        self.body.is_none()
    }

    /// Expression for parameter `index`.
    pub fn param(&self, index: usize) -> Option<Expr> {
        self.sig
            .params
            .get(index)
            .map(|ty| Expr::new(ExprKind::Param(index), ty.clone()))
    }
}

/// A global variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Global {
    name: String,
    ty: Type,
    init: Option<Expr>,
}

impl Global {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type of the variable (the global expression is a pointer to it).
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Initializer; `None` for external globals.
    pub fn init(&self) -> Option<&Expr> {
        self.init.as_ref()
    }
}

/// A named type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    name: String,
    ty: Type,
}

impl TypeDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

/// A target IR package.
#[derive(Debug, Clone, Default)]
pub struct Package {
    name: String,
    path: String,
    functions: Vec<Function>,
    globals: Vec<Global>,
    types: Vec<TypeDecl>,
    symbols: FxHashMap<SymbolHash, u32>,
}

impl Package {
    pub(crate) fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    // ==========================================================================
    // Functions
    // ==========================================================================

    /// Declare a function, or return the existing declaration of that name.
    pub fn new_func(&mut self, name: &str, sig: FuncType) -> FuncId {
        if let Some(id) = self.func_of(name) {
            return id;
        }
        let index = self.functions.len() as u32;
        self.functions.push(Function {
            name: name.to_string(),
            sig,
            body: None,
        });
        self.symbols.insert(SymbolHash::function(name), index);
        FuncId::new(index)
    }

    pub fn func_of(&self, name: &str) -> Option<FuncId> {
        self.symbols
            .get(&SymbolHash::function(name))
            .map(|&i| FuncId::new(i))
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this package.
    pub fn func(&self, id: FuncId) -> &Function {
        &self.functions[id.index()]
    }

    /// Expression referring to a function.
    pub fn func_expr(&self, id: FuncId) -> Expr {
        Expr::new(ExprKind::Func(id), Type::func(self.func(id).sig.clone()))
    }

    /// Install the body of a function, replacing any previous one.
    pub fn set_body(&mut self, id: FuncId, body: Body) {
        self.functions[id.index()].body = Some(body);
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    // ==========================================================================
    // Globals
    // ==========================================================================

    /// Declare a global, or return the existing declaration of that name.
    pub fn new_var(&mut self, name: &str, ty: Type) -> GlobalId {
        if let Some(id) = self.var_of(name) {
            return id;
        }
        let index = self.globals.len() as u32;
        self.globals.push(Global {
            name: name.to_string(),
            ty,
            init: None,
        });
        self.symbols.insert(SymbolHash::global(name), index);
        GlobalId::new(index)
    }

    pub fn var_of(&self, name: &str) -> Option<GlobalId> {
        self.symbols
            .get(&SymbolHash::global(name))
            .map(|&i| GlobalId::new(i))
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this package.
    pub fn global(&self, id: GlobalId) -> &Global {
        &self.globals[id.index()]
    }

    /// Expression for the address of a global.
    pub fn global_expr(&self, id: GlobalId) -> Expr {
        Expr::new(ExprKind::Global(id), Type::ptr(self.global(id).ty.clone()))
    }

    /// Set the initializer of a global.
    pub fn init_var(&mut self, id: GlobalId, init: Expr) {
        self.globals[id.index()].init = Some(init);
    }

    pub fn globals(&self) -> &[Global] {
        &self.globals
    }

    // ==========================================================================
    // Types
    // ==========================================================================

    /// Declare a named type, or return the existing declaration of that name.
    pub fn new_type(&mut self, name: &str, ty: Type) -> TypeId {
        if let Some(id) = self.type_named(name) {
            return id;
        }
        let index = self.types.len() as u32;
        self.types.push(TypeDecl {
            name: name.to_string(),
            ty,
        });
        self.symbols.insert(SymbolHash::type_name(name), index);
        TypeId::new(index)
    }

    pub fn type_named(&self, name: &str) -> Option<TypeId> {
        self.symbols
            .get(&SymbolHash::type_name(name))
            .map(|&i| TypeId::new(i))
    }

    pub fn types(&self) -> &[TypeDecl] {
        &self.types
    }
}
