use std::{fmt::Display, sync::Once};

use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    error::{Error, ErrorKind},
    parser::parse_with_config,
    types::{TypeContext, TypeId},
};

static INIT: Once = Once::new();

/// Install a compact logger for tests. Silent unless RUST_LOG is set.
pub fn init_logger() {
    INIT.call_once(|| {
        let env_filter = EnvFilter::builder()
            .with_default_directive(tracing_subscriber::filter::LevelFilter::OFF.into())
            .from_env_lossy();

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .without_time()
            .compact()
            .with_test_writer()
            .init();
    });
}

pub fn must<T, V: Display>(res: Result<T, V>) -> T {
    res.unwrap_or_else(|err| panic!("unexpected error: {}", err))
}

/// Parse a specification into a fresh context with the test config.
pub fn parse_string(spec: &str) -> Result<(TypeContext, TypeId), Error> {
    init_logger();
    let mut ctx = TypeContext::new();
    let ty = parse_with_config(&mut ctx, spec, &Config::test())?;
    Ok((ctx, ty))
}

pub fn assert_pass(spec: &str) -> (TypeContext, TypeId) {
    must(parse_string(spec))
}

pub fn assert_error(spec: &str, kind: ErrorKind) -> Error {
    match parse_string(spec) {
        Ok((ctx, ty)) => panic!(
            "expected error '{}' for '{}', got {}",
            kind,
            spec,
            ctx.to_string(ty)
        ),
        Err(err) => {
            assert_eq!(err.kind, kind, "spec '{}'", spec);
            err
        }
    }
}

/// Human readable form of a parsed specification.
pub fn parse_to_string(spec: &str) -> String {
    let (ctx, ty) = assert_pass(spec);
    ctx.to_string(ty)
}

/// Canonical encoding of a parsed specification, used to compare shapes
/// across contexts.
pub fn shape(spec: &str) -> String {
    let (ctx, ty) = assert_pass(spec);
    must(ctx.to_spec(ty))
}
