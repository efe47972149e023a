use std::collections::HashMap;

use crate::{
    token::Symbol,
    types::{FactoryError, FunctionType, StructType, TypeContext, TypeId, TypeKind},
};

impl TypeContext {
    /// Get the string representation of a type for errors or logging.
    pub fn to_string(&self, id: TypeId) -> String {
        match self.kind(id) {
            TypeKind::Scalar(s) => format!("{s}"),
            TypeKind::Pointer(inner) => format!("*{}", self.to_string(*inner)),
            TypeKind::Array(inner, n) => format!("[{} x {}]", n, self.to_string(*inner)),
            TypeKind::Vector(inner, n) => format!("<{} x {}>", n, self.to_string(*inner)),
            // Named structs print by name only, which also breaks cycles
            TypeKind::Struct(StructType {
                name: Some(name), ..
            }) => format!("%{}", name),
            TypeKind::Struct(StructType { fields, .. }) => {
                let fields_str = fields
                    .iter()
                    .flatten()
                    .map(|f| self.to_string(*f))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{}}}", fields_str)
            }
            TypeKind::Function(FunctionType {
                params,
                ret,
                variadic,
            }) => {
                let mut params_str = params
                    .iter()
                    .map(|p| self.to_string(*p))
                    .collect::<Vec<_>>();
                if *variadic {
                    params_str.push("...".into());
                }

                format!("fn({}) -> {}", params_str.join(", "), self.to_string(*ret))
            }
        }
    }

    /// Encode a type as a specification string. Named structs are given
    /// ids in order of first appearance, so parsing the result rebuilds the
    /// same shape.
    pub fn to_spec(&self, id: TypeId) -> Result<String, FactoryError> {
        let mut out = String::new();
        let mut ids = HashMap::new();
        self.write_spec(id, &mut ids, &mut out)?;
        Ok(out)
    }

    fn write_spec(
        &self,
        id: TypeId,
        ids: &mut HashMap<TypeId, usize>,
        out: &mut String,
    ) -> Result<(), FactoryError> {
        match self.kind(id) {
            TypeKind::Scalar(s) => out.push(Symbol::for_scalar(*s).as_byte() as char),
            TypeKind::Pointer(inner) => {
                out.push('*');
                self.write_spec(*inner, ids, out)?;
            }
            TypeKind::Array(inner, n) => {
                out.push('[');
                self.write_spec(*inner, ids, out)?;
                out.push_str(&format!("x{}]", n));
            }
            TypeKind::Vector(inner, n) => {
                out.push('<');
                self.write_spec(*inner, ids, out)?;
                out.push_str(&format!("x{}>", n));
            }
            TypeKind::Struct(StructType { name, fields }) => {
                if let Some(n) = ids.get(&id) {
                    out.push_str(&format!("%{}", n));
                    return Ok(());
                }

                let Some(fields) = fields else {
                    return Err(FactoryError::Opaque(self.to_string(id)));
                };

                if name.is_some() {
                    let n = ids.len();
                    ids.insert(id, n);
                    out.push_str(&format!("={}", n));
                }

                out.push('{');
                for field in fields {
                    self.write_spec(*field, ids, out)?;
                }
                out.push('}');
            }
            TypeKind::Function(FunctionType {
                params,
                ret,
                variadic,
            }) => {
                out.push('(');
                if params.is_empty() && !variadic {
                    out.push('v');
                }
                for param in params {
                    self.write_spec(*param, ids, out)?;
                }
                if *variadic {
                    out.push('&');
                }
                self.write_spec(*ret, ids, out)?;
                out.push(')');
            }
        }

        Ok(())
    }
}
