use core::fmt;

use crate::types::FactoryError;

pub type Res<T> = Result<T, Error>;

/// Failure to parse a type specification. Holds the whole specification
/// and the byte offset the parser stopped at; formatting only happens
/// when displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    /// Byte offset in spec
    pub pos: usize,
    pub spec: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    // Malformed tokens
    InvalidArraySize,
    InvalidVectorSize,
    InvalidTypeId,

    // Unterminated sequences
    MissingClose(char),

    // Structural violations
    EmptySpec,
    EmptyStruct,
    MissingCross(&'static str), // Form name, 'array' or 'vector'
    ZeroSizedArray,
    ZeroSizedVector,
    MissingPointee,
    FunctionTooShort,
    VariadicReturn,
    MisplacedVoidParam,
    InvalidParam,
    InvalidElement(&'static str), // Position name, eg. 'struct field'
    MisplacedVararg,
    NonStructAssigned(u32),

    // Type id violations
    UnexpectedTypeId { got: u32, expected: usize },
    UndefinedTypeId(u32),

    UnexpectedChar(char),
    TrailingInput,
    NestingTooDeep(usize),
    Factory(FactoryError),
}

/// Broad grouping of error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    MalformedToken,
    UnterminatedSequence,
    StructuralViolation,
    IdViolation,
    Lexical,
    TrailingInput,
    Limit,
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::InvalidArraySize | ErrorKind::InvalidVectorSize | ErrorKind::InvalidTypeId => {
                ErrorCategory::MalformedToken
            }
            ErrorKind::MissingClose(_) => ErrorCategory::UnterminatedSequence,
            ErrorKind::UnexpectedTypeId { .. } | ErrorKind::UndefinedTypeId(_) => {
                ErrorCategory::IdViolation
            }
            ErrorKind::UnexpectedChar(_) => ErrorCategory::Lexical,
            ErrorKind::TrailingInput => ErrorCategory::TrailingInput,
            ErrorKind::NestingTooDeep(_) => ErrorCategory::Limit,
            _ => ErrorCategory::StructuralViolation,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidArraySize => write!(f, "unable to parse array size"),
            ErrorKind::InvalidVectorSize => write!(f, "unable to parse vector size"),
            ErrorKind::InvalidTypeId => write!(f, "unable to parse type id"),
            ErrorKind::MissingClose(c) => write!(f, "missing closing '{}'", c),
            ErrorKind::EmptySpec => write!(f, "missing type"),
            ErrorKind::EmptyStruct => write!(f, "structure must have at least one field"),
            ErrorKind::MissingCross(form) => write!(f, "missing 'x' in {} type", form),
            ErrorKind::ZeroSizedArray => write!(f, "invalid zero-sized array"),
            ErrorKind::ZeroSizedVector => write!(f, "invalid zero-sized vector"),
            ErrorKind::MissingPointee => write!(f, "missing subtype for pointer type"),
            ErrorKind::FunctionTooShort => write!(
                f,
                "function types must have at least two internal types, eg. '(vv)' for a \
                 function taking nothing and returning nothing"
            ),
            ErrorKind::VariadicReturn => write!(f, "cannot have a variadic return type"),
            ErrorKind::MisplacedVoidParam => write!(f, "invalid placement of void parameter type"),
            ErrorKind::InvalidParam => write!(f, "invalid parameter type"),
            ErrorKind::InvalidElement(position) => write!(f, "invalid {} type", position),
            ErrorKind::MisplacedVararg => {
                write!(f, "variadic marker '&' outside of function parameter list")
            }
            ErrorKind::NonStructAssigned(id) => {
                write!(f, "non-structure type assigned to type id '{}'", id)
            }
            ErrorKind::UnexpectedTypeId { got, expected } => write!(
                f,
                "invalid type id assignment '{}', next expected type id was '{}'",
                got, expected
            ),
            ErrorKind::UndefinedTypeId(id) => write!(f, "invalid type id use '{}'", id),
            ErrorKind::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c.escape_default()),
            ErrorKind::TrailingInput => write!(f, "trailing unparsed characters"),
            ErrorKind::NestingTooDeep(max) => write!(f, "nesting deeper than {} levels", max),
            ErrorKind::Factory(err) => write!(f, "{}", err),
        }
    }
}

impl Error {
    pub fn new(kind: ErrorKind, pos: usize, spec: &str) -> Error {
        Error {
            kind,
            pos,
            spec: spec.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Plain message without the specification.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Offset is char based for the caret, the spec may hold non-ascii garbage
        let col = self
            .spec
            .char_indices()
            .take_while(|(i, _)| *i < self.pos)
            .count();

        write!(
            f,
            "error: {} in type specification '{}'\n    | {}\n    | {}^",
            self.kind,
            self.spec,
            self.spec,
            " ".repeat(col)
        )
    }
}

impl std::error::Error for Error {}
