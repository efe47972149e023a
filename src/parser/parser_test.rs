use crate::{
    config::Config,
    error::{ErrorCategory, ErrorKind},
    parser::{parse, parse_with_config},
    types::{FunctionType, ScalarKind, StructType, TypeContext, TypeKind},
    util::{assert_error, assert_pass, parse_string, parse_to_string, shape},
};

#[test]
fn test_scalars() {
    let cases = [
        ("b", ScalarKind::I8),
        ("B", ScalarKind::I8),
        ("h", ScalarKind::I16),
        ("H", ScalarKind::I16),
        ("i", ScalarKind::I32),
        ("I", ScalarKind::I32),
        ("l", ScalarKind::I64),
        ("L", ScalarKind::I64),
        ("f", ScalarKind::F32),
        ("d", ScalarKind::F64),
        ("D", ScalarKind::F80),
        ("M", ScalarKind::Mmx),
        ("v", ScalarKind::Void),
    ];

    for (spec, kind) in cases {
        let (ctx, ty) = assert_pass(spec);
        assert_eq!(ctx.kind(ty), &TypeKind::Scalar(kind), "spec '{}'", spec);
        assert_eq!(ty, ctx.scalar(kind));
    }
}

#[test]
fn test_signedness_maps_to_same_type() {
    let mut ctx = TypeContext::new();
    let a = parse(&mut ctx, "i").unwrap();
    let b = parse(&mut ctx, "I").unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_pointers() {
    assert_eq!(parse_to_string("*i"), "*i32");
    assert_eq!(parse_to_string("**b"), "**i8");
    assert_eq!(parse_to_string("*v"), "*void");
    assert_eq!(parse_to_string("*(vv)"), "*fn() -> void");
}

#[test]
fn test_arrays_and_vectors() {
    assert_eq!(parse_to_string("[ix4]"), "[4 x i32]");
    assert_eq!(parse_to_string("[[bx2]x3]"), "[3 x [2 x i8]]");
    assert_eq!(parse_to_string("[{if}x10]"), "[10 x {i32, f32}]");
    assert_eq!(parse_to_string("<fx4>"), "<4 x f32>");
    assert_eq!(parse_to_string("<*lx2>"), "<2 x *i64>");
    assert_eq!(parse_to_string("[ix007]"), "[7 x i32]");

    let (ctx, ty) = assert_pass("[dx18446744073709551615]");
    assert_eq!(ctx.kind(ty), &TypeKind::Array(ctx.scalar(ScalarKind::F64), u64::MAX));
}

#[test]
fn test_anonymous_structs() {
    let (ctx, ty) = assert_pass("{ii}");
    let i32_ty = ctx.scalar(ScalarKind::I32);
    assert_eq!(ctx.struct_fields(ty), Some(&[i32_ty, i32_ty][..]));
    assert_eq!(ctx.struct_name(ty), None);

    assert_eq!(parse_to_string("{{ii}{ii}}"), "{{i32, i32}, {i32, i32}}");
    assert_eq!(parse_to_string("{*b[hx2]<fx4>}"), "{*i8, [2 x i16], <4 x f32>}");
}

#[test]
fn test_functions() {
    assert_eq!(parse_to_string("(vv)"), "fn() -> void");
    assert_eq!(parse_to_string("(vi)"), "fn() -> i32");
    assert_eq!(parse_to_string("(iv)"), "fn(i32) -> void");
    assert_eq!(parse_to_string("(i&i)"), "fn(i32, ...) -> i32");
    assert_eq!(parse_to_string("(i&v)"), "fn(i32, ...) -> void");
    assert_eq!(parse_to_string("(&v)"), "fn(...) -> void");
    assert_eq!(parse_to_string("(v&v)"), "fn(...) -> void");
    assert_eq!(parse_to_string("(*b{ii}d)"), "fn(*i8, {i32, i32}) -> f64");
    assert_eq!(parse_to_string("(*(ii)v)"), "fn(*fn(i32) -> i32) -> void");
}

#[test]
fn test_function_shape() {
    let (ctx, ty) = assert_pass("(hl&D)");
    let TypeKind::Function(FunctionType {
        params,
        ret,
        variadic,
    }) = ctx.kind(ty)
    else {
        panic!("expected function, got {}", ctx.to_string(ty));
    };

    assert_eq!(
        params,
        &vec![ctx.scalar(ScalarKind::I16), ctx.scalar(ScalarKind::I64)]
    );
    assert_eq!(*ret, ctx.scalar(ScalarKind::F80));
    assert!(*variadic);
}

#[test]
fn test_pair_of_params_is_not_a_wide_int() {
    assert_eq!(parse_to_string("(iiv)"), "fn(i32, i32) -> void");
    assert_eq!(parse_to_string("(lv)"), "fn(i64) -> void");
    assert_ne!(shape("(iiv)"), shape("(lv)"));
}

#[test]
fn test_recursive_struct() {
    let (ctx, ty) = assert_pass("=0{*%0i}");
    assert_eq!(ctx.struct_name(ty), Some("typespec.struct.0"));
    assert!(!ctx.is_opaque(ty));

    let fields = ctx.struct_fields(ty).unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(ctx.kind(fields[0]), &TypeKind::Pointer(ty));
    assert_eq!(fields[1], ctx.scalar(ScalarKind::I32));
}

#[test]
fn test_mutually_recursive_structs() {
    // struct A { struct B *b; }; struct B { struct A *a; long x; };
    let (ctx, ty) = assert_pass("=0{*=1{*%0l}}");
    let a_fields = ctx.struct_fields(ty).unwrap();
    let TypeKind::Pointer(b) = ctx.kind(a_fields[0]) else {
        panic!("expected pointer");
    };

    assert_eq!(ctx.struct_name(*b), Some("typespec.struct.1"));
    let b_fields = ctx.struct_fields(*b).unwrap();
    assert_eq!(ctx.kind(b_fields[0]), &TypeKind::Pointer(ty));
    assert_eq!(b_fields[1], ctx.scalar(ScalarKind::I64));
}

#[test]
fn test_struct_id_reuse() {
    // struct PP { struct P x, y; } with P defined once
    let (ctx, ty) = assert_pass("{=0{ii}%0}");
    let fields = ctx.struct_fields(ty).unwrap();
    assert_eq!(fields[0], fields[1]);
    assert_eq!(ctx.struct_name(fields[0]), Some("typespec.struct.0"));
}

#[test]
fn test_named_structs_are_nominal() {
    let mut ctx = TypeContext::new();
    let a = parse(&mut ctx, "=0{ii}").unwrap();
    let b = parse(&mut ctx, "=0{ii}").unwrap();
    assert_ne!(a, b);

    let c = parse(&mut ctx, "{ii}").unwrap();
    let d = parse(&mut ctx, "{ii}").unwrap();
    assert_eq!(c, d);
}

#[test]
fn test_struct_prefix_from_config() {
    let config = Config {
        struct_prefix: "anvill.struct.".into(),
        ..Config::default()
    };

    let mut ctx = TypeContext::new();
    let ty = parse_with_config(&mut ctx, "=0{b}", &config).unwrap();
    assert_eq!(ctx.struct_name(ty), Some("anvill.struct.0"));
}

#[test]
fn test_determinism() {
    let specs = [
        "=0{*%0i}",
        "{=0{ii}%0[%0x3]}",
        "(*=0{*%0*(%0v)}&l)",
        "<Ix8>",
        "[[[fx1]x2]x3]",
    ];

    for spec in specs {
        assert_eq!(shape(spec), shape(spec), "spec '{}'", spec);
    }
}

#[test]
fn test_same_context_interns_structural_types() {
    let mut ctx = TypeContext::new();
    let a = parse(&mut ctx, "(*[ix4]&v)").unwrap();
    let len = ctx.len();
    let b = parse(&mut ctx, "(*[Ix4]&v)").unwrap();
    assert_eq!(a, b);
    assert_eq!(len, ctx.len());
}

#[test]
fn test_type_id_sequence() {
    let err = assert_error(
        "=1{ii}",
        ErrorKind::UnexpectedTypeId {
            got: 1,
            expected: 0,
        },
    );
    assert_eq!(err.category(), ErrorCategory::IdViolation);
    assert_eq!(err.pos, 1);

    assert_error(
        "{=0{i}=0{i}}",
        ErrorKind::UnexpectedTypeId {
            got: 0,
            expected: 1,
        },
    );
    assert_error(
        "{=0{i}=2{i}}",
        ErrorKind::UnexpectedTypeId {
            got: 2,
            expected: 1,
        },
    );
    assert_pass("{=0{i}=1{i}}");
}

#[test]
fn test_type_id_reference() {
    let err = assert_error("%0", ErrorKind::UndefinedTypeId(0));
    assert_eq!(err.category(), ErrorCategory::IdViolation);

    assert_error("{=0{i}%1}", ErrorKind::UndefinedTypeId(1));
    assert_error("{%0=0{i}}", ErrorKind::UndefinedTypeId(0));
    assert_pass("{=0{i}%0}");
}

#[test]
fn test_malformed_ids_and_sizes() {
    let err = assert_error("=", ErrorKind::InvalidTypeId);
    assert_eq!(err.category(), ErrorCategory::MalformedToken);
    assert_error("=x{i}", ErrorKind::InvalidTypeId);
    assert_error("%", ErrorKind::InvalidTypeId);
    assert_error("=99999999999{i}", ErrorKind::InvalidTypeId);

    assert_error("[ix]", ErrorKind::InvalidArraySize);
    assert_error("[ix99999999999999999999]", ErrorKind::InvalidArraySize);
    assert_error("<ix>", ErrorKind::InvalidVectorSize);
    assert_error("<ix4294967296>", ErrorKind::InvalidVectorSize);
}

#[test]
fn test_non_struct_assigned_to_id() {
    assert_error("=0i", ErrorKind::NonStructAssigned(0));
    assert_error("=0", ErrorKind::NonStructAssigned(0));
    assert_error("{=0{i}=1[ix2]}", ErrorKind::NonStructAssigned(1));
}

#[test]
fn test_empty_aggregates() {
    let err = assert_error("{}", ErrorKind::EmptyStruct);
    assert_eq!(err.category(), ErrorCategory::StructuralViolation);
    assert_error("=0{}", ErrorKind::EmptyStruct);
    assert_error("{", ErrorKind::EmptyStruct);

    assert_error("[ix0]", ErrorKind::ZeroSizedArray);
    assert_error("<fx0>", ErrorKind::ZeroSizedVector);
    assert_error("<fx00>", ErrorKind::ZeroSizedVector);
}

#[test]
fn test_missing_delimiters() {
    for (spec, close) in [
        ("{ii", '}'),
        ("=0{*%0", '}'),
        ("[ix4", ']'),
        ("[ix4>", ']'),
        ("<ix4", '>'),
        ("<ix4]", '>'),
        ("(ii", ')'),
    ] {
        let err = assert_error(spec, ErrorKind::MissingClose(close));
        assert_eq!(err.category(), ErrorCategory::UnterminatedSequence);
    }

    assert_error("[i4]", ErrorKind::MissingCross("array"));
    assert_error("[", ErrorKind::MissingCross("array"));
    assert_error("<i4>", ErrorKind::MissingCross("vector"));
    assert_error("<", ErrorKind::MissingCross("vector"));
}

#[test]
fn test_pointer_needs_element() {
    let err = assert_error("*", ErrorKind::MissingPointee);
    assert_eq!(err.pos, 1);
    assert_error("{i*", ErrorKind::MissingPointee);
}

#[test]
fn test_function_arity() {
    assert_error("(i)", ErrorKind::FunctionTooShort);
    assert_error("()", ErrorKind::FunctionTooShort);
    assert_error("(", ErrorKind::FunctionTooShort);
    assert_error("(i&)", ErrorKind::VariadicReturn);
    assert_error("(&&)", ErrorKind::VariadicReturn);
}

#[test]
fn test_function_params() {
    let err = assert_error("(ivi)", ErrorKind::MisplacedVoidParam);
    assert_eq!(err.pos, 2);
    assert_error("(iv&v)", ErrorKind::MisplacedVoidParam);

    let err = assert_error("(vii)", ErrorKind::InvalidParam);
    assert_eq!(err.pos, 1);
    assert_error("(&&i)", ErrorKind::InvalidParam);
    assert_error("(i&ii)", ErrorKind::InvalidParam);
    assert_error("((vv)v)", ErrorKind::InvalidParam);
    assert_error("(v(vv))", ErrorKind::InvalidElement("return"));
}

#[test]
fn test_misplaced_vararg() {
    assert_error("&", ErrorKind::MisplacedVararg);
    assert_error("*&", ErrorKind::MisplacedVararg);
    assert_error("[&x2]", ErrorKind::MisplacedVararg);
    assert_error("{i&}", ErrorKind::MisplacedVararg);
}

#[test]
fn test_invalid_elements() {
    assert_error("{v}", ErrorKind::InvalidElement("struct field"));
    assert_error("{i(vv)}", ErrorKind::InvalidElement("struct field"));
    assert_error("[vx2]", ErrorKind::InvalidElement("array element"));
    assert_error("<{i}x2>", ErrorKind::InvalidElement("vector element"));
    assert_error("<vx2>", ErrorKind::InvalidElement("vector element"));
    assert_error("<Mx2>", ErrorKind::InvalidElement("vector element"));
}

#[test]
fn test_trailing_input() {
    let err = assert_error("ii", ErrorKind::TrailingInput);
    assert_eq!(err.category(), ErrorCategory::TrailingInput);
    assert_eq!(err.pos, 1);

    assert_error("{i}}", ErrorKind::TrailingInput);
    assert_error("*i)", ErrorKind::TrailingInput);
    assert_pass("i");
}

#[test]
fn test_unknown_symbol() {
    let err = assert_error("{iqi}", ErrorKind::UnexpectedChar('q'));
    assert_eq!(err.category(), ErrorCategory::Lexical);
    assert_eq!(err.pos, 2);

    assert_error("x", ErrorKind::UnexpectedChar('x'));
    assert_error("}", ErrorKind::UnexpectedChar('}'));
    assert_error("[ix2)", ErrorKind::MissingClose(']'));
    assert_error("{i ", ErrorKind::UnexpectedChar(' '));
    assert_error("*é", ErrorKind::UnexpectedChar('é'));
    assert_error("1", ErrorKind::UnexpectedChar('1'));
}

#[test]
fn test_empty_spec() {
    assert_error("", ErrorKind::EmptySpec);
}

#[test]
fn test_nesting_limit() {
    // Test config allows 32 levels
    let ok = format!("{}i", "*".repeat(31));
    assert_pass(&ok);

    let too_deep = format!("{}i", "*".repeat(32));
    let err = assert_error(&too_deep, ErrorKind::NestingTooDeep(32));
    assert_eq!(err.category(), ErrorCategory::Limit);
    assert_eq!(err.pos, 32);

    let nested_structs = format!("{}i{}", "{".repeat(40), "}".repeat(40));
    assert_error(&nested_structs, ErrorKind::NestingTooDeep(32));
}

#[test]
fn test_deep_nesting_with_default_config() {
    let mut ctx = TypeContext::new();
    let spec = format!("{}i{}", "[".repeat(100), "x1]".repeat(100));
    assert!(parse(&mut ctx, &spec).is_ok());

    let spec = format!("{}i", "*".repeat(100_000));
    let err = parse(&mut ctx, &spec).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NestingTooDeep(256));
}

#[test]
fn test_failed_parse_leaves_no_named_struct_body() {
    // The placeholder exists in the context but never got a body
    let mut ctx = TypeContext::new();
    let before = ctx.len();
    assert!(parse(&mut ctx, "=0{i").is_err());
    assert_eq!(ctx.len(), before + 1);
    assert!(ctx.is_opaque(before));
}

#[test]
fn test_ids_do_not_leak_between_parses() {
    let mut ctx = TypeContext::new();
    parse(&mut ctx, "=0{i}").unwrap();
    let err = parse(&mut ctx, "%0").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UndefinedTypeId(0));
    parse(&mut ctx, "=0{l}").unwrap();
}

#[test]
fn test_struct_kinds() {
    let (ctx, ty) = parse_string("=0{i}").unwrap();
    assert!(matches!(
        ctx.kind(ty),
        TypeKind::Struct(StructType { name: Some(_), fields: Some(_) })
    ));
}
