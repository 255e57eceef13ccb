//! SSA packages and their members.

use std::rc::Rc;

use llgo_core::Pos;
use rustc_hash::FxHashMap;

use crate::function::Function;
use crate::types::Type;
use crate::value::{Const, Global};

/// A package-level type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeName {
    pub pkg: String,
    pub name: String,
    /// The declared type (usually a [`Type::Named`]).
    pub ty: Type,
    pub pos: Pos,
}

/// A package-level named constant.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedConst {
    pub pkg: String,
    pub name: String,
    pub value: Const,
    pub pos: Pos,
}

/// A package member.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Function(Rc<Function>),
    Global(Global),
    Type(TypeName),
    Const(NamedConst),
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Function(f) => &f.name,
            Member::Global(g) => &g.name,
            Member::Type(t) => &t.name,
            Member::Const(c) => &c.name,
        }
    }

    /// Source position, used to order members deterministically.
    pub fn pos(&self) -> Pos {
        match self {
            Member::Function(f) => f.pos,
            Member::Global(g) => g.pos,
            Member::Type(t) => t.pos,
            Member::Const(c) => c.pos,
        }
    }
}

/// An SSA package.
///
/// Members are kept in a hash map keyed by name; their iteration order is
/// unrelated to source order.
#[derive(Debug, Clone, Default)]
pub struct Package {
    /// Import path.
    pub path: String,
    /// Package name as written in the `package` clause.
    pub name: String,
    members: FxHashMap<String, Member>,
    imports: Vec<Rc<Package>>,
}

impl Package {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            members: FxHashMap::default(),
            imports: Vec::new(),
        }
    }

    /// Add a member, replacing any previous member of the same name.
    pub fn add_member(&mut self, member: Member) {
        self.members.insert(member.name().to_string(), member);
    }

    /// Add a function and return the shared handle to it.
    pub fn add_function(&mut self, function: Function) -> Rc<Function> {
        let function = Rc::new(function);
        self.add_member(Member::Function(Rc::clone(&function)));
        function
    }

    /// Add a package-level variable and return it.
    pub fn add_global(&mut self, name: impl Into<String>, ty: Type, pos: Pos) -> Global {
        let global = Global::new(self.path.clone(), name, ty, pos);
        self.add_member(Member::Global(global.clone()));
        global
    }

    /// Add a type declaration.
    pub fn add_type(&mut self, name: impl Into<String>, ty: Type, pos: Pos) {
        self.add_member(Member::Type(TypeName {
            pkg: self.path.clone(),
            name: name.into(),
            ty,
            pos,
        }));
    }

    /// Add a named constant.
    pub fn add_const(&mut self, name: impl Into<String>, value: Const, pos: Pos) {
        self.add_member(Member::Const(NamedConst {
            pkg: self.path.clone(),
            name: name.into(),
            value,
            pos,
        }));
    }

    pub fn add_import(&mut self, package: Rc<Package>) {
        self.imports.push(package);
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// The function member called `name`.
    pub fn func(&self, name: &str) -> Option<&Rc<Function>> {
        match self.members.get(name) {
            Some(Member::Function(f)) => Some(f),
            _ => None,
        }
    }

    /// Members in unspecified order.
    pub fn members(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.members.iter().map(|(name, m)| (name.as_str(), m))
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn imports(&self) -> &[Rc<Package>] {
        &self.imports
    }

    /// Find a package by import path in the transitive imports.
    pub fn find_import(&self, path: &str) -> Option<&Rc<Package>> {
        for import in &self.imports {
            if import.path == path {
                return Some(import);
            }
        }
        self.imports.iter().find_map(|import| import.find_import(path))
    }
}
