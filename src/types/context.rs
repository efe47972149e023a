use std::collections::HashMap;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::types::{
    FactoryError, FunctionType, ScalarKind, StructType, Type, TypeClass, TypeFactory, TypeId,
    TypeKind,
};

/// Owns every type built from specifications. Structural types are
/// interned, so building the same shape twice gives the same id. Named
/// structs are nominal and get a fresh id on every creation.
pub struct TypeContext {
    /// List of type information. Each `TypeId` maps
    /// to a `Type` by indexing into this vector.
    types: Vec<Type>,
    /// Map type kinds to their unique type id.
    cache: HashMap<TypeKind, TypeId>,
}

impl TypeContext {
    pub fn new() -> Self {
        let mut s = Self {
            types: Vec::new(),
            cache: HashMap::new(),
        };

        for t in ScalarKind::iter() {
            s.intern(TypeKind::Scalar(t));
        }

        s
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns the unique type id for the given kind.
    /// Stores the type in context if not seen before.
    pub fn get_or_intern(&mut self, kind: TypeKind) -> TypeId {
        if let Some(&id) = self.cache.get(&kind) {
            return id;
        }
        self.intern(kind)
    }

    fn intern(&mut self, kind: TypeKind) -> TypeId {
        let id = self.push(kind.clone());
        self.cache.insert(kind, id);
        id
    }

    fn push(&mut self, kind: TypeKind) -> TypeId {
        let id = self.types.len();
        self.types.push(Type { kind, id });
        id
    }

    /// Shorthand for getting a scalar type id.
    pub fn scalar(&self, kind: ScalarKind) -> TypeId {
        *self
            .cache
            .get(&TypeKind::Scalar(kind))
            .expect("all scalar types must be assigned at init")
    }

    /// Get the full type information for a given type id.
    pub fn lookup(&self, id: TypeId) -> &Type {
        // Ids only come from this context, an unknown id is a bug
        assert!(id < self.types.len(), "unknown type id {}", id);
        &self.types[id]
    }

    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.lookup(id).kind
    }

    /// Fields of a struct type, None if the type is not a struct or has no body yet.
    pub fn struct_fields(&self, id: TypeId) -> Option<&[TypeId]> {
        match self.kind(id) {
            TypeKind::Struct(s) => s.fields.as_deref(),
            _ => None,
        }
    }

    /// True for named structs whose body has not been set.
    pub fn is_opaque(&self, id: TypeId) -> bool {
        matches!(self.kind(id), TypeKind::Struct(StructType { fields: None, .. }))
    }

    pub fn struct_name(&self, id: TypeId) -> Option<&str> {
        match self.kind(id) {
            TypeKind::Struct(s) => s.name.as_deref(),
            _ => None,
        }
    }
}

impl Default for TypeContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeFactory for TypeContext {
    type Handle = TypeId;

    fn make_scalar(&mut self, kind: ScalarKind) -> TypeId {
        self.scalar(kind)
    }

    fn make_pointer(&mut self, elem: TypeId) -> TypeId {
        self.get_or_intern(TypeKind::Pointer(elem))
    }

    fn make_array(&mut self, elem: TypeId, count: u64) -> TypeId {
        self.get_or_intern(TypeKind::Array(elem, count))
    }

    fn make_vector(&mut self, elem: TypeId, count: u32) -> TypeId {
        self.get_or_intern(TypeKind::Vector(elem, count))
    }

    fn make_opaque_struct(&mut self, name: &str) -> TypeId {
        let id = self.push(TypeKind::Struct(StructType {
            name: Some(name.to_string()),
            fields: None,
        }));
        debug!("created opaque struct '{}' as #{}", name, id);
        id
    }

    fn set_struct_body(&mut self, handle: TypeId, fields: Vec<TypeId>) -> Result<(), FactoryError> {
        let name = self.to_string(handle);
        match &mut self.types[handle].kind {
            TypeKind::Struct(StructType {
                name: Some(_),
                fields: body @ None,
            }) => {
                *body = Some(fields);
                Ok(())
            }
            TypeKind::Struct(StructType { name: Some(_), .. }) => {
                Err(FactoryError::BodyAlreadySet(name))
            }
            _ => Err(FactoryError::NotAStruct(name)),
        }
    }

    fn make_anonymous_struct(&mut self, fields: Vec<TypeId>) -> TypeId {
        self.get_or_intern(TypeKind::Struct(StructType {
            name: None,
            fields: Some(fields),
        }))
    }

    fn make_function(&mut self, params: Vec<TypeId>, ret: TypeId, variadic: bool) -> TypeId {
        self.get_or_intern(TypeKind::Function(FunctionType {
            params,
            ret,
            variadic,
        }))
    }

    fn class(&self, handle: TypeId) -> TypeClass {
        self.kind(handle).class()
    }
}
