use std::fmt;
use strum_macros::EnumIter;

pub type TypeId = usize; // Index into a TypeContext

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ScalarKind {
    Void,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    F80, // x87 extended precision
    Mmx, // Legacy 64-bit SIMD register type
}

impl ScalarKind {
    /// Width in bits, zero for void.
    pub fn bits(&self) -> u32 {
        match self {
            ScalarKind::Void => 0,
            ScalarKind::I8 => 8,
            ScalarKind::I16 => 16,
            ScalarKind::I32 | ScalarKind::F32 => 32,
            ScalarKind::I64 | ScalarKind::F64 | ScalarKind::Mmx => 64,
            ScalarKind::F80 => 80,
        }
    }

    pub fn class(&self) -> TypeClass {
        match self {
            ScalarKind::Void => TypeClass::Void,
            ScalarKind::I8 | ScalarKind::I16 | ScalarKind::I32 | ScalarKind::I64 => {
                TypeClass::Integer
            }
            ScalarKind::F32 | ScalarKind::F64 | ScalarKind::F80 => TypeClass::Float,
            ScalarKind::Mmx => TypeClass::Mmx,
        }
    }
}

/// Coarse classification of a type. The parser validates element and
/// parameter positions against this without knowing the concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeClass {
    Void,
    Integer,
    Float,
    Mmx,
    Pointer,
    Array,
    Vector,
    Struct,
    Function,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar(ScalarKind),
    Pointer(TypeId),
    Array(TypeId, u64),
    Vector(TypeId, u32),
    Struct(StructType),
    Function(FunctionType),
}

impl TypeKind {
    pub fn class(&self) -> TypeClass {
        match self {
            TypeKind::Scalar(s) => s.class(),
            TypeKind::Pointer(_) => TypeClass::Pointer,
            TypeKind::Array(..) => TypeClass::Array,
            TypeKind::Vector(..) => TypeClass::Vector,
            TypeKind::Struct(_) => TypeClass::Struct,
            TypeKind::Function(_) => TypeClass::Function,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructType {
    /// Set for named structs, which are never interned.
    pub name: Option<String>,
    /// None until the body is set. Anonymous structs always have a body.
    pub fields: Option<Vec<TypeId>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    pub params: Vec<TypeId>,
    pub ret: TypeId,
    pub variadic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    pub kind: TypeKind,
    pub id: TypeId,
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}
