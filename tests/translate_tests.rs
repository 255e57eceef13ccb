//! Integration tests for package translation.
//!
//! Each test builds a small SSA package by hand, translates it through the
//! public API and inspects the resulting target package.

use std::rc::Rc;

use llgo::ir::{self, ExprKind, InstrKind};
use llgo::ssa::{
    Alloc, BinOp, Call, Const, FuncRef, Function, Instruction, Package, Phi, Return, Signature,
    Store, Type, Value, Var, ast::File,
};
use llgo::{BinaryOp, CompileError, CompileOptions, ErrorPolicy, Pos, SymbolKind, compile_package};

const VALIST: &str = ir::NAME_VALIST;

fn compile(pkg: &Package) -> ir::Package {
    compile_package(pkg, &[], CompileOptions::default())
        .unwrap_or_else(|e| panic!("translation failed: {e}"))
}

fn compile_err(pkg: &Package) -> CompileError {
    match llgo::translate(&ir::Program::new(), pkg, &[], CompileOptions::default()) {
        Ok(_) => panic!("translation unexpectedly succeeded"),
        Err(e) => e,
    }
}

fn body<'p>(pkg: &'p ir::Package, name: &str) -> &'p ir::Body {
    let id = pkg
        .func_of(name)
        .unwrap_or_else(|| panic!("{name} not declared"));
    pkg.func(id)
        .body()
        .unwrap_or_else(|| panic!("{name} has no body"))
}

fn kinds(block: &ir::Block) -> Vec<&'static str> {
    block
        .instrs()
        .iter()
        .map(|i| match &i.kind {
            InstrKind::Call { .. } => "call",
            InstrKind::BinOp { .. } => "binop",
            InstrKind::UnOp { .. } => "unop",
            InstrKind::IndexAddr { .. } => "indexaddr",
            InstrKind::Alloc { .. } => "alloc",
            InstrKind::Store { .. } => "store",
            InstrKind::Jump(_) => "jump",
            InstrKind::CondBr { .. } => "condbr",
            InstrKind::Ret(_) => "ret",
        })
        .collect()
}

fn int_sig(params: &[&str]) -> Signature {
    Signature::new(
        params.iter().map(|p| Var::new(*p, Type::int())).collect(),
        vec![Type::int()],
    )
}

fn void_call(callee: Value, args: Vec<Value>) -> Instruction {
    Instruction::Call(Call {
        callee,
        args,
        ty: Type::Tuple(vec![]),
    })
}

fn add(x: Value, y: Value) -> Instruction {
    Instruction::BinOp(BinOp {
        op: BinaryOp::Add,
        x,
        y,
        ty: Type::int(),
    })
}

fn ret(results: Vec<Value>) -> Instruction {
    Instruction::Return(Return { results })
}

/// `func <name>() {}` with a single empty block.
fn empty_func(pkg: &str, name: &str, pos: u32) -> Function {
    let mut f = Function::new(pkg, name, Signature::default(), Pos::new(pos));
    let entry = f.add_block("entry");
    f.emit(entry, ret(vec![]));
    f
}

fn printf_sig() -> Signature {
    Signature::new(
        vec![
            Var::new("format", Type::pointer(Type::Basic(llgo::ssa::BasicKind::Int8))),
            Var::new(VALIST, Type::slice(Type::int())),
        ],
        vec![Type::int32()],
    )
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn output_is_deterministic_and_in_position_order() {
    // Source positions run against name order.
    let build = |reverse: bool| {
        let mut pkg = Package::new("demo", "demo");
        let mut funcs = vec![
            empty_func("demo", "alpha", 30),
            empty_func("demo", "beta", 10),
            empty_func("demo", "gamma", 20),
        ];
        if reverse {
            funcs.reverse();
        }
        for f in funcs {
            pkg.add_function(f);
        }
        pkg.add_global("zeta", Type::int(), Pos::new(5));
        pkg.add_global("eta", Type::int(), Pos::new(15));
        compile(&pkg)
    };

    let a = build(false);
    let b = build(true);
    assert_eq!(a.to_string(), b.to_string());

    let names: Vec<&str> = a.functions().iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["demo.beta", "demo.gamma", "demo.alpha"]);
    let globals: Vec<&str> = a.globals().iter().map(|g| g.name()).collect();
    assert_eq!(globals, vec!["demo.zeta", "demo.eta"]);
}

#[test]
fn forward_reference_to_later_member() {
    let later = Function::new("demo", "later", int_sig(&["x"]), Pos::new(20));
    let later_ref = later.value();

    let mut early = Function::new("demo", "early", int_sig(&["x"]), Pos::new(10));
    let entry = early.add_block("entry");
    let x = early.param(0);
    let r = early.emit(
        entry,
        Instruction::Call(Call {
            callee: later_ref,
            args: vec![x],
            ty: Type::int(),
        }),
    );
    early.emit(entry, ret(vec![r]));

    let mut pkg = Package::new("demo", "demo");
    pkg.add_function(early);
    pkg.add_function(later);

    let out = compile(&pkg);
    let body = body(&out, "demo.early");
    let InstrKind::Call { callee, args } = &body.blocks()[0].instrs()[0].kind else {
        panic!("expected a call");
    };
    assert_eq!(callee.kind(), &ExprKind::Func(out.func_of("demo.later").unwrap()));
    assert_eq!(args.len(), 1);
}

#[test]
fn generic_functions_are_skipped() {
    let mut pkg = Package::new("demo", "demo");
    pkg.add_function(empty_func("demo", "Map", 1).with_type_params(["T", "U"]));
    pkg.add_function(empty_func("demo", "plain", 2));

    let out = compile(&pkg);
    assert!(out.func_of("demo.Map").is_none());
    assert!(out.func_of("demo.plain").is_some());
}

#[test]
fn globals_types_and_consts() {
    let mut pkg = Package::new("demo", "demo");
    pkg.add_global("counter", Type::int(), Pos::new(1));
    pkg.add_type("Celsius", Type::named("demo", "Celsius", Type::float64()), Pos::new(2));
    pkg.add_const("Answer", Const::int(42), Pos::new(3));

    let out = compile(&pkg);
    let text = out.to_string();
    assert!(text.contains("@demo.counter = global i64 0"));
    assert!(text.contains("%demo.Celsius = type double"));
    assert!(!text.contains("Answer"));
}

#[test]
fn method_names_follow_receiver_kind() {
    let point = Type::named("geo", "Point", Type::Struct(vec![]));
    let mut pkg = Package::new("geo", "geo");
    pkg.add_function(Function::new(
        "geo",
        "Len",
        Signature::new(vec![], vec![Type::int()]).with_recv(Var::new("p", point.clone())),
        Pos::new(1),
    ));
    pkg.add_function(Function::new(
        "geo",
        "Move",
        Signature::default().with_recv(Var::new("p", Type::pointer(point))),
        Pos::new(2),
    ));

    let out = compile(&pkg);
    assert!(out.func_of("geo.Point.Len").is_some());
    let mv = out.func_of("geo.(*Point).Move").unwrap();
    assert_eq!(out.func(mv).sig().params.len(), 1);
}

// =============================================================================
// Bodies
// =============================================================================

#[test]
fn values_are_memoized_within_a_block() {
    let mut f = Function::new("demo", "square", int_sig(&["a", "b"]), Pos::new(1));
    let entry = f.add_block("entry");
    let (a, b) = (f.param(0), f.param(1));
    let sum = f.emit(entry, add(a, b));
    let sq = f.emit(
        entry,
        Instruction::BinOp(BinOp {
            op: BinaryOp::Mul,
            x: sum.clone(),
            y: sum,
            ty: Type::int(),
        }),
    );
    f.emit(entry, ret(vec![sq]));

    let mut pkg = Package::new("demo", "demo");
    pkg.add_function(f);

    let out = compile(&pkg);
    assert_eq!(kinds(&body(&out, "demo.square").blocks()[0]), vec!["binop", "binop", "ret"]);
}

#[test]
fn cache_is_reset_at_block_boundaries() {
    let mut f = Function::new("demo", "later", int_sig(&["a"]), Pos::new(1));
    let entry = f.add_block("entry");
    let exit = f.add_block("exit");
    let a = f.param(0);
    let sum = f.emit(entry, add(a.clone(), a));
    f.jump(entry, exit);
    f.emit(exit, ret(vec![sum]));

    let mut pkg = Package::new("demo", "demo");
    pkg.add_function(f);

    let out = compile(&pkg);
    let body = body(&out, "demo.later");
    assert_eq!(kinds(&body.blocks()[0]), vec!["binop", "jump"]);
    assert_eq!(kinds(&body.blocks()[1]), vec!["binop", "ret"]);
}

#[test]
fn branches_follow_successors() {
    let sig = Signature::new(vec![Var::new("c", Type::bool())], vec![Type::int()]);
    let mut f = Function::new("demo", "pick", sig, Pos::new(1));
    let entry = f.add_block("entry");
    let then = f.add_block("if.then");
    let els = f.add_block("if.else");
    let c = f.param(0);
    f.branch(entry, c, then, els);
    f.emit(then, ret(vec![Const::int(1).into()]));
    f.emit(els, ret(vec![Const::int(2).into()]));

    let mut pkg = Package::new("demo", "demo");
    pkg.add_function(f);

    let out = compile(&pkg);
    let body = body(&out, "demo.pick");
    let InstrKind::CondBr { cond, then, els } = &body.blocks()[0].instrs()[0].kind else {
        panic!("expected a conditional branch");
    };
    assert_eq!(cond.kind(), &ExprKind::Param(0));
    assert_eq!((then.index(), els.index()), (1, 2));
}

#[test]
fn alloc_and_store() {
    let mut pkg = Package::new("demo", "demo");
    let counter = pkg.add_global("counter", Type::int(), Pos::new(1));

    let mut f = Function::new("demo", "set", Signature::default(), Pos::new(2));
    let entry = f.add_block("entry");
    let slot = f.emit(
        entry,
        Instruction::Alloc(Alloc {
            ty: Type::int(),
            heap: true,
            comment: "x".into(),
        }),
    );
    f.emit(
        entry,
        Instruction::Store(Store {
            addr: slot,
            val: Const::int(7).into(),
        }),
    );
    f.emit(
        entry,
        Instruction::Store(Store {
            addr: counter.into(),
            val: Const::int(1).into(),
        }),
    );
    f.emit(entry, ret(vec![]));
    pkg.add_function(f);

    let out = compile(&pkg);
    let block = &body(&out, "demo.set").blocks()[0];
    assert_eq!(kinds(block), vec!["alloc", "store", "store", "ret"]);
    assert_eq!(
        block.instrs()[0].kind,
        InstrKind::Alloc {
            ty: ir::Type::i64(),
            heap: true
        }
    );
    let InstrKind::Store { ptr, .. } = &block.instrs()[2].kind else {
        panic!("expected a store");
    };
    assert_eq!(ptr.kind(), &ExprKind::Global(out.var_of("demo.counter").unwrap()));
}

#[test]
fn external_functions_have_no_body() {
    let mut pkg = Package::new("demo", "demo");
    pkg.add_function(Function::new("demo", "ext", Signature::default(), Pos::new(1)));
    let out = compile(&pkg);
    let id = out.func_of("demo.ext").unwrap();
    assert!(out.func(id).is_declaration());
    assert!(out.to_string().contains("declare void @demo.ext()"));
}

// =============================================================================
// Entry function
// =============================================================================

#[test]
fn entry_calls_init_first() {
    let mut pkg = Package::new("main", "main");
    pkg.add_function(empty_func("main", "init", 1));

    let mut main = Function::new("main", "main", Signature::default(), Pos::new(2));
    let entry = main.add_block("entry");
    let done = main.add_block("done");
    main.jump(entry, done);
    main.emit(done, ret(vec![]));
    pkg.add_function(main);

    let out = compile(&pkg);
    let body = body(&out, "main");
    assert_eq!(kinds(&body.blocks()[0]), vec!["call", "jump"]);
    assert_eq!(kinds(&body.blocks()[1]), vec!["ret"]);
    let InstrKind::Call { callee, .. } = &body.blocks()[0].instrs()[0].kind else {
        unreachable!();
    };
    assert_eq!(callee.kind(), &ExprKind::Func(out.func_of("main.init").unwrap()));
}

#[test]
fn entry_without_init_fails() {
    let mut pkg = Package::new("main", "main");
    pkg.add_function(empty_func("main", "main", 1));
    assert_eq!(
        compile_err(&pkg),
        CompileError::Undeclared {
            kind: SymbolKind::Function,
            name: "main.init".into()
        }
    );
}

// =============================================================================
// Calls
// =============================================================================

#[test]
fn unsafe_init_calls_are_elided() {
    let unsafe_init = Value::Function(FuncRef {
        pkg: "unsafe".into(),
        name: "init".into(),
        signature: Signature::default(),
    });
    let mut f = Function::new("demo", "init", Signature::default(), Pos::new(1));
    let entry = f.add_block("entry");
    f.emit(entry, void_call(unsafe_init, vec![]));
    f.emit(entry, ret(vec![]));

    let mut pkg = Package::new("demo", "demo");
    pkg.add_function(f);

    let out = compile(&pkg);
    assert_eq!(kinds(&body(&out, "demo.init").blocks()[0]), vec!["ret"]);
    assert_eq!(out.functions().len(), 1);
}

#[test]
fn using_an_elided_call_as_a_value_is_internal() {
    let unsafe_init = Value::Function(FuncRef {
        pkg: "unsafe".into(),
        name: "init".into(),
        signature: Signature::default(),
    });
    let mut f = Function::new("demo", "f", Signature::default(), Pos::new(1));
    let entry = f.add_block("entry");
    let r = f.emit(entry, void_call(unsafe_init, vec![]));
    f.emit(entry, ret(vec![r]));

    let mut pkg = Package::new("demo", "demo");
    pkg.add_function(f);
    assert!(compile_err(&pkg).is_internal());
}

#[test]
fn linknamed_variadic_call_with_absent_extras() {
    let mut pkg = Package::new("demo", "demo");
    let printf = pkg.add_function(Function::new("demo", "printf", printf_sig(), Pos::new(1)));

    let mut f = Function::new("demo", "hello", Signature::default(), Pos::new(2));
    let entry = f.add_block("entry");
    f.emit(
        entry,
        Instruction::Call(Call {
            callee: printf.value(),
            args: vec![
                Const::nil(Type::pointer(Type::Basic(llgo::ssa::BasicKind::Int8))).into(),
                Const::nil(Type::slice(Type::int())).into(),
            ],
            ty: Type::int32(),
        }),
    );
    f.emit(entry, ret(vec![]));
    pkg.add_function(f);

    let files = [File::new("hello.go").with_func("printf", ["//go:linkname printf C.printf"])];
    let out = compile_package(&pkg, &files, CompileOptions::default()).unwrap();

    let printf_id = out.func_of("printf").unwrap();
    assert!(out.func(printf_id).sig().variadic);
    assert!(out.func_of("demo.printf").is_none());

    let InstrKind::Call { args, .. } = &body(&out, "demo.hello").blocks()[0].instrs()[0].kind
    else {
        panic!("expected a call");
    };
    assert_eq!(args.len(), 1);
    assert!(out.to_string().contains("declare i32 @printf(i8*, ...)"));
}

#[test]
fn non_empty_variadic_extras_are_unsupported() {
    let mut pkg = Package::new("demo", "demo");
    let printf = pkg.add_function(Function::new("demo", "printf", printf_sig(), Pos::new(1)));

    let mut f = Function::new("demo", "hello", int_sig(&["n"]), Pos::new(2));
    let entry = f.add_block("entry");
    let n = f.param(0);
    let r = f.emit(
        entry,
        Instruction::Call(Call {
            callee: printf.value(),
            args: vec![Const::nil(Type::pointer(Type::int())).into(), n.clone()],
            ty: Type::int32(),
        }),
    );
    f.emit(entry, ret(vec![r]));
    pkg.add_function(f);

    let err = compile_err(&pkg);
    assert_eq!(
        err,
        CompileError::UnsupportedVarArgs {
            callee: "demo.printf".into(),
            arg: "n".into()
        }
    );
}

#[test]
fn linknamed_globals_keep_their_initializer() {
    let mut os = Package::new("os", "os");
    let args = os.add_global("Args", Type::int(), Pos::new(1));

    let mut pkg = Package::new("demo", "demo");
    pkg.add_import(Rc::new(os));
    pkg.add_global("errno", Type::int32(), Pos::new(1));

    let mut f = Function::new("demo", "reset", Signature::default(), Pos::new(2));
    let entry = f.add_block("entry");
    f.emit(
        entry,
        Instruction::Store(Store {
            addr: args.into(),
            val: Const::int(0).into(),
        }),
    );
    f.emit(entry, ret(vec![]));
    pkg.add_function(f);

    let files = [File::new("errno.go").with_var(["//go:linkname errno C.errno"])];
    let out = compile_package(&pkg, &files, CompileOptions::default()).unwrap();

    let errno = out.var_of("errno").unwrap();
    assert!(out.global(errno).init().is_some());
    assert!(out.var_of("demo.errno").is_none());

    let imported = out.var_of("os.Args").unwrap();
    assert!(out.global(imported).init().is_none());

    let text = out.to_string();
    assert!(text.contains("@errno = global i32 0"));
    assert!(text.contains("@os.Args = external global i64"));
}

#[test]
fn invalid_linkname_fails() {
    let pkg = Package::new("demo", "demo");
    let files = [File::new("bad.go").with_func("Printf", ["//go:linkname Printf printf"])];
    let err = compile_package(&pkg, &files, CompileOptions::default()).unwrap_err();
    assert!(err.is_compilation());
    assert!(err.to_string().contains("no specified call convention"));
}

#[test]
fn imported_packages_are_declared_once() {
    let mut fmt = Package::new("fmt", "fmt");
    let println = fmt.add_function(Function::new(
        "fmt",
        "Println",
        Signature::new(vec![Var::new("s", Type::string())], vec![]),
        Pos::new(1),
    ));
    fmt.add_global("Verbose", Type::bool(), Pos::new(2));
    fmt.add_function(empty_func("fmt", "helper", 3));

    let mut pkg = Package::new("demo", "demo");
    pkg.add_import(Rc::new(fmt));
    for (i, name) in ["a", "b"].into_iter().enumerate() {
        let mut f = Function::new("demo", name, Signature::default(), Pos::new(10 + i as u32));
        let entry = f.add_block("entry");
        f.emit(entry, void_call(println.value(), vec![Const::string("hi").into()]));
        f.emit(entry, ret(vec![]));
        pkg.add_function(f);
    }

    let out = compile(&pkg);
    let names: Vec<&str> = out.functions().iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["demo.a", "demo.b", "fmt.Println", "fmt.helper"]);
    assert!(out.func(out.func_of("fmt.helper").unwrap()).is_declaration());
    let verbose = out.var_of("fmt.Verbose").unwrap();
    assert!(out.global(verbose).init().is_none());
}

#[test]
fn builtin_values_are_unsupported() {
    let mut f = Function::new("demo", "f", Signature::default(), Pos::new(1));
    let entry = f.add_block("entry");
    f.emit(
        entry,
        void_call(Value::Builtin("println".into()), vec![Const::int(1).into()]),
    );
    f.emit(entry, ret(vec![]));
    let mut pkg = Package::new("demo", "demo");
    pkg.add_function(f);

    let err = compile_err(&pkg);
    assert!(matches!(err, CompileError::UnsupportedValue { kind: "Builtin", .. }));
}

// =============================================================================
// Failures
// =============================================================================

fn loop_func(name: &str, pos: u32) -> Function {
    let mut f = Function::new("demo", name, int_sig(&[]), Pos::new(pos));
    let entry = f.add_block("entry");
    let body = f.add_block("loop");
    f.jump(entry, body);
    let phi = f.emit(
        body,
        Instruction::Phi(Phi {
            edges: vec![Const::int(0).into()],
            ty: Type::int(),
        }),
    );
    f.emit(body, ret(vec![phi]));
    f
}

#[test]
fn unsupported_instruction_is_fatal() {
    let mut pkg = Package::new("demo", "demo");
    pkg.add_function(loop_func("spin", 1));

    let err = compile_err(&pkg);
    let CompileError::UnsupportedInstruction {
        kind,
        function,
        block,
        text,
    } = &err
    else {
        panic!("unexpected error {err}");
    };
    assert_eq!(*kind, "Phi");
    assert_eq!(function, "demo.spin");
    assert_eq!(*block, 1);
    assert!(text.starts_with("t1 = phi"));
}

#[test]
fn collect_policy_reports_every_unsupported_body() {
    let mut pkg = Package::new("demo", "demo");
    pkg.add_function(loop_func("spin", 1));
    pkg.add_function(empty_func("demo", "fine", 2));
    pkg.add_function(loop_func("spin2", 3));

    let options = CompileOptions::new().with_error_policy(ErrorPolicy::Collect);
    let err = llgo::translate(&ir::Program::new(), &pkg, &[], options).unwrap_err();
    let functions: Vec<String> = err
        .errors()
        .into_iter()
        .map(|e| match e {
            CompileError::UnsupportedInstruction { function, .. } => function.clone(),
            other => panic!("unexpected {other}"),
        })
        .collect();
    assert_eq!(functions, vec!["demo.spin", "demo.spin2"]);
}
