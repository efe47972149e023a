mod context;
mod factory;
mod print;
mod types;

pub use context::TypeContext;
pub use factory::{FactoryError, TypeFactory};
pub use types::*;
