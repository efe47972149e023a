mod cursor;
mod symbol;

pub use cursor::Cursor;
pub use symbol::Symbol;
