use std::fmt;

use crate::types::{ScalarKind, TypeClass};

/// Builds the concrete types a specification describes. Named structs are
/// created opaque first so that their own body can refer to them, and get
/// their fields once the definition closes.
pub trait TypeFactory {
    type Handle: Copy + fmt::Debug;

    fn make_scalar(&mut self, kind: ScalarKind) -> Self::Handle;
    fn make_pointer(&mut self, elem: Self::Handle) -> Self::Handle;
    fn make_array(&mut self, elem: Self::Handle, count: u64) -> Self::Handle;
    fn make_vector(&mut self, elem: Self::Handle, count: u32) -> Self::Handle;
    fn make_opaque_struct(&mut self, name: &str) -> Self::Handle;
    fn set_struct_body(
        &mut self,
        handle: Self::Handle,
        fields: Vec<Self::Handle>,
    ) -> Result<(), FactoryError>;
    fn make_anonymous_struct(&mut self, fields: Vec<Self::Handle>) -> Self::Handle;
    fn make_function(
        &mut self,
        params: Vec<Self::Handle>,
        ret: Self::Handle,
        variadic: bool,
    ) -> Self::Handle;

    fn class(&self, handle: Self::Handle) -> TypeClass;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    NotAStruct(String),
    BodyAlreadySet(String),
    /// Struct has no body and cannot be written out.
    Opaque(String),
}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryError::NotAStruct(t) => write!(f, "type '{}' is not a struct", t),
            FactoryError::BodyAlreadySet(t) => write!(f, "body of struct '{}' is already set", t),
            FactoryError::Opaque(t) => write!(f, "struct '{}' has no body", t),
        }
    }
}

impl std::error::Error for FactoryError {}
