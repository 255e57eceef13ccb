//! Source-file syntax retained for the lowering.
//!
//! The lowering only needs the top-level declarations of each file and their
//! doc comments, which carry compiler directives such as `//go:linkname`.

/// A sequence of comment lines directly preceding a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommentGroup {
    /// Comment lines, each including its `//` marker.
    pub list: Vec<String>,
}

impl CommentGroup {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            list: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// The last line of the group.
    pub fn last(&self) -> Option<&str> {
        self.list.last().map(String::as_str)
    }
}

/// Token of a general declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenToken {
    Import,
    Const,
    Type,
    Var,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// `func name(...)` or `func (recv) name(...)`.
    Func {
        name: String,
        has_recv: bool,
        doc: Option<CommentGroup>,
    },
    /// `import`, `const`, `type` or `var` declaration.
    Gen {
        tok: GenToken,
        /// Number of specs (names or parenthesized entries) declared.
        specs: usize,
        doc: Option<CommentGroup>,
    },
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct File {
    pub name: String,
    pub decls: Vec<Decl>,
}

impl File {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decls: Vec::new(),
        }
    }

    /// Append a free-function declaration with the given doc lines.
    pub fn with_func<I, S>(mut self, name: impl Into<String>, doc: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.decls.push(Decl::Func {
            name: name.into(),
            has_recv: false,
            doc: Some(CommentGroup::new(doc)),
        });
        self
    }

    /// Append a single-spec `var` declaration with the given doc lines.
    pub fn with_var<I, S>(mut self, doc: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.decls.push(Decl::Gen {
            tok: GenToken::Var,
            specs: 1,
            doc: Some(CommentGroup::new(doc)),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_appends_decls() {
        let file = File::new("main.go")
            .with_func("Printf", ["// Printf prints.", "//go:linkname Printf C.printf"])
            .with_var(["//go:linkname Stdout C.stdout"]);

        assert_eq!(file.decls.len(), 2);
        let Decl::Func { doc: Some(doc), .. } = &file.decls[0] else {
            panic!("expected func decl");
        };
        assert_eq!(doc.last(), Some("//go:linkname Printf C.printf"));
    }
}
