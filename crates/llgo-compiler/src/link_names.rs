//! `//go:linkname` directives.
//!
//! A directive in the last doc-comment line of a free function or a
//! single-spec `var` declaration binds a package-level name to a foreign
//! symbol:
//!
//! ```text
//! //go:linkname printf C.printf
//! func printf(format *int8, __llgo_va_list ...any) int32
//! ```

use llgo_core::CompileError;
use llgo_ssa::ast::{CommentGroup, Decl, File, GenToken};

use crate::context::{CompilationContext, full_name};

type Result<T> = std::result::Result<T, CompileError>;

const DIRECTIVE: &str = "//go:linkname ";

/// Register the link names declared in `files` for package `pkg_path`.
pub fn init_files(ctx: &mut CompilationContext<'_>, pkg_path: &str, files: &[File]) -> Result<()> {
    for file in files {
        for decl in &file.decls {
            let doc = match decl {
                Decl::Func {
                    has_recv: false,
                    doc,
                    ..
                } => doc,
                Decl::Gen {
                    tok: GenToken::Var,
                    specs: 1,
                    doc,
                } => doc,
                _ => continue,
            };
            if let Some(line) = doc.as_ref().and_then(CommentGroup::last)
                && let Some((local, link)) = parse_directive(line)?
            {
                ctx.set_link_name(full_name(pkg_path, local), link.to_string());
            }
        }
    }
    Ok(())
}

/// Split a directive line into its local name and link name.
///
/// Lines that are not directives, or name no link target, yield `None`.
pub fn parse_directive(line: &str) -> Result<Option<(&str, &str)>> {
    let Some(text) = line.strip_prefix(DIRECTIVE) else {
        return Ok(None);
    };
    let text = text.trim();
    let Some((local, link)) = text.split_once(' ') else {
        return Ok(None);
    };
    let link = link.trim_start();
    if local.is_empty() || link.is_empty() {
        return Ok(None);
    }
    // eg. C.printf, C.strlen, llgo.cstr
    if !link.contains('.') {
        return Err(CompileError::InvalidLinkname {
            line: line.to_string(),
        });
    }
    Ok(Some((local, link)))
}
