use std::fmt;
use strum_macros::EnumIter;

use crate::types::ScalarKind;

/// Every character with a meaning in a type specification, apart from
/// decimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Symbol {
    // Compound forms
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Less,
    Greater,
    Star,
    LParen,
    RParen,
    Amp,
    Eq,
    Percent,
    Cross, // Separates element type and count in arrays and vectors

    // Scalars. Upper case integer letters are the unsigned spelling.
    Char,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    LongDouble,
    Mmx,
    Void,
}

impl Symbol {
    pub fn from_byte(b: u8) -> Option<Symbol> {
        let sym = match b {
            b'{' => Symbol::LBrace,
            b'}' => Symbol::RBrace,
            b'[' => Symbol::LBracket,
            b']' => Symbol::RBracket,
            b'<' => Symbol::Less,
            b'>' => Symbol::Greater,
            b'*' => Symbol::Star,
            b'(' => Symbol::LParen,
            b')' => Symbol::RParen,
            b'&' => Symbol::Amp,
            b'=' => Symbol::Eq,
            b'%' => Symbol::Percent,
            b'x' => Symbol::Cross,
            b'b' => Symbol::Char,
            b'B' => Symbol::UChar,
            b'h' => Symbol::Short,
            b'H' => Symbol::UShort,
            b'i' => Symbol::Int,
            b'I' => Symbol::UInt,
            b'l' => Symbol::Long,
            b'L' => Symbol::ULong,
            b'f' => Symbol::Float,
            b'd' => Symbol::Double,
            b'D' => Symbol::LongDouble,
            b'M' => Symbol::Mmx,
            b'v' => Symbol::Void,
            _ => return None,
        };
        Some(sym)
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            Symbol::LBrace => b'{',
            Symbol::RBrace => b'}',
            Symbol::LBracket => b'[',
            Symbol::RBracket => b']',
            Symbol::Less => b'<',
            Symbol::Greater => b'>',
            Symbol::Star => b'*',
            Symbol::LParen => b'(',
            Symbol::RParen => b')',
            Symbol::Amp => b'&',
            Symbol::Eq => b'=',
            Symbol::Percent => b'%',
            Symbol::Cross => b'x',
            Symbol::Char => b'b',
            Symbol::UChar => b'B',
            Symbol::Short => b'h',
            Symbol::UShort => b'H',
            Symbol::Int => b'i',
            Symbol::UInt => b'I',
            Symbol::Long => b'l',
            Symbol::ULong => b'L',
            Symbol::Float => b'f',
            Symbol::Double => b'd',
            Symbol::LongDouble => b'D',
            Symbol::Mmx => b'M',
            Symbol::Void => b'v',
        }
    }

    /// The scalar a symbol stands for. Signedness is dropped, `i` and `I`
    /// both produce a 32-bit integer.
    pub fn scalar(&self) -> Option<ScalarKind> {
        let kind = match self {
            Symbol::Char | Symbol::UChar => ScalarKind::I8,
            Symbol::Short | Symbol::UShort => ScalarKind::I16,
            Symbol::Int | Symbol::UInt => ScalarKind::I32,
            Symbol::Long | Symbol::ULong => ScalarKind::I64,
            Symbol::Float => ScalarKind::F32,
            Symbol::Double => ScalarKind::F64,
            Symbol::LongDouble => ScalarKind::F80,
            Symbol::Mmx => ScalarKind::Mmx,
            Symbol::Void => ScalarKind::Void,
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical symbol used when encoding a scalar.
    pub fn for_scalar(kind: ScalarKind) -> Symbol {
        match kind {
            ScalarKind::I8 => Symbol::Char,
            ScalarKind::I16 => Symbol::Short,
            ScalarKind::I32 => Symbol::Int,
            ScalarKind::I64 => Symbol::Long,
            ScalarKind::F32 => Symbol::Float,
            ScalarKind::F64 => Symbol::Double,
            ScalarKind::F80 => Symbol::LongDouble,
            ScalarKind::Mmx => Symbol::Mmx,
            ScalarKind::Void => Symbol::Void,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_byte() as char)
    }
}
