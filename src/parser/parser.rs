use tracing::{debug, info, trace};

use crate::{
    config::Config,
    error::{Error, ErrorKind, Res},
    parser::ids::IdTable,
    token::{Cursor, Symbol},
    types::{TypeClass, TypeFactory},
};

/// Parse a type specification into a type built by `factory`, using the
/// default config.
pub fn parse<F: TypeFactory>(factory: &mut F, spec: &str) -> Res<F::Handle> {
    parse_with_config(factory, spec, &Config::default())
}

/// Parse a type specification into a type built by `factory`. The whole
/// specification must be a single type.
pub fn parse_with_config<F: TypeFactory>(
    factory: &mut F,
    spec: &str,
    config: &Config,
) -> Res<F::Handle> {
    let parser = Parser::new(factory, spec, config);
    parser.parse()
}

/// Result of parsing one position in the specification.
enum Parsed<H> {
    Element(Element<H>),
    /// Input ran out before a type started.
    End,
}

enum Element<H> {
    Type(H),
    /// The '&' marker, only meaningful right before a function return type.
    Vararg,
}

struct Parser<'a, F: TypeFactory> {
    factory: &'a mut F,
    spec: &'a str,
    cursor: Cursor<'a>,
    ids: IdTable<F::Handle>,
    config: &'a Config,
    depth: usize,
}

impl<'a, F: TypeFactory> Parser<'a, F> {
    fn new(factory: &'a mut F, spec: &'a str, config: &'a Config) -> Self {
        Self {
            factory,
            spec,
            cursor: Cursor::new(spec),
            ids: IdTable::new(),
            config,
            depth: 0,
        }
    }

    fn parse(mut self) -> Res<F::Handle> {
        info!("parsing type specification '{}'", self.spec);

        let ty = self.parse_elem_type(ErrorKind::EmptySpec).inspect_err(|err| {
            info!("fail: {}", err.message());
        })?;

        if !self.cursor.eof() {
            info!("fail: trailing input at {}", self.cursor.pos());
            return Err(self.error(ErrorKind::TrailingInput, self.cursor.pos()));
        }

        info!("success, {} named structs", self.ids.len());
        Ok(ty)
    }

    fn error(&self, kind: ErrorKind, pos: usize) -> Error {
        Error::new(kind, pos, self.spec)
    }

    /// Error at the current position.
    fn error_here(&self, kind: ErrorKind) -> Error {
        self.error(kind, self.cursor.pos())
    }

    /// Parse the type starting at the cursor, guarding nesting depth.
    fn parse_type(&mut self) -> Res<Parsed<F::Handle>> {
        if self.depth >= self.config.max_depth {
            return Err(self.error_here(ErrorKind::NestingTooDeep(self.config.max_depth)));
        }

        self.depth += 1;
        let parsed = self.parse_symbol();
        self.depth -= 1;
        parsed
    }

    /// Parse a type where the vararg marker is not allowed. Running out of
    /// input raises `missing`.
    fn parse_elem_type(&mut self, missing: ErrorKind) -> Res<F::Handle> {
        let start = self.cursor.pos();
        match self.parse_type()? {
            Parsed::Element(Element::Type(ty)) => Ok(ty),
            Parsed::Element(Element::Vararg) => Err(self.error(ErrorKind::MisplacedVararg, start)),
            Parsed::End => Err(self.error(missing, start)),
        }
    }

    fn parse_symbol(&mut self) -> Res<Parsed<F::Handle>> {
        let Some(b) = self.cursor.cur() else {
            return Ok(Parsed::End);
        };

        let start = self.cursor.pos();
        let Some(sym) = Symbol::from_byte(b) else {
            return Err(self.unexpected_char(start));
        };

        trace!("symbol '{}' at {}", sym, start);
        self.cursor.consume();

        let ty = match sym {
            Symbol::LBrace => self.parse_struct(None)?,
            Symbol::LBracket => self.parse_array()?,
            Symbol::Less => self.parse_vector()?,
            Symbol::Star => self.parse_pointer()?,
            Symbol::LParen => self.parse_function()?,
            Symbol::Eq => self.parse_named_struct()?,
            Symbol::Percent => self.parse_struct_ref()?,
            Symbol::Amp => return Ok(Parsed::Element(Element::Vararg)),
            other => match other.scalar() {
                Some(kind) => self.factory.make_scalar(kind),
                // Closing delimiters and 'x' are only valid where a form expects them
                None => return Err(self.unexpected_char(start)),
            },
        };

        Ok(Parsed::Element(Element::Type(ty)))
    }

    fn unexpected_char(&self, pos: usize) -> Error {
        // Everything before pos is ascii, so pos is on a char boundary
        let c = self.spec[pos..].chars().next().unwrap_or('\0');
        self.error(ErrorKind::UnexpectedChar(c), pos)
    }

    /// Parse elements until `close` or end of input, whichever comes
    /// first. Does not consume `close`. Each element is paired with the
    /// offset it started at.
    fn parse_sequence(&mut self, close: u8) -> Res<Vec<(Element<F::Handle>, usize)>> {
        let mut elems = Vec::new();
        while !self.cursor.matches(close) {
            let start = self.cursor.pos();
            match self.parse_type()? {
                Parsed::Element(elem) => elems.push((elem, start)),
                Parsed::End => break,
            }
        }

        Ok(elems)
    }

    /// Parse the digit run of an array size, vector size or type id.
    fn parse_number<N: std::str::FromStr>(&mut self, err: ErrorKind) -> Res<N> {
        let start = self.cursor.pos();
        self.cursor
            .extract_digits()
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(|| self.error(err, start))
    }

    /// Parse struct fields after the opening brace. If `named` is set the
    /// fields become the body of that struct, otherwise an anonymous
    /// struct is created.
    fn parse_struct(&mut self, named: Option<F::Handle>) -> Res<F::Handle> {
        let elems = self.parse_sequence(b'}')?;
        if elems.is_empty() {
            return Err(self.error_here(ErrorKind::EmptyStruct));
        }

        let mut fields = Vec::with_capacity(elems.len());
        for (elem, pos) in elems {
            match elem {
                Element::Vararg => return Err(self.error(ErrorKind::MisplacedVararg, pos)),
                Element::Type(ty) => match self.factory.class(ty) {
                    TypeClass::Void | TypeClass::Function => {
                        return Err(self.error(ErrorKind::InvalidElement("struct field"), pos));
                    }
                    _ => fields.push(ty),
                },
            }
        }

        if !self.cursor.eat(b'}') {
            return Err(self.error_here(ErrorKind::MissingClose('}')));
        }

        let Some(handle) = named else {
            return Ok(self.factory.make_anonymous_struct(fields));
        };

        debug!("setting body of {:?}, {} fields", handle, fields.len());
        self.factory
            .set_struct_body(handle, fields)
            .map_err(|err| self.error_here(ErrorKind::Factory(err)))?;
        Ok(handle)
    }

    /// Parse '=N{...}' after the '='. The struct is registered before its
    /// body is parsed so the body can refer to it.
    fn parse_named_struct(&mut self) -> Res<F::Handle> {
        let start = self.cursor.pos();
        let id: u32 = self.parse_number(ErrorKind::InvalidTypeId)?;

        if let Err(expected) = self.ids.check_next(id) {
            return Err(self.error(ErrorKind::UnexpectedTypeId { got: id, expected }, start));
        }

        if !self.cursor.eat(b'{') {
            return Err(self.error_here(ErrorKind::NonStructAssigned(id)));
        }

        let name = format!("{}{}", self.config.struct_prefix, id);
        let handle = self.factory.make_opaque_struct(&name);
        self.ids.push(handle);
        debug!("assigned type id {} to struct '{}'", id, name);

        self.parse_struct(Some(handle))
    }

    /// Parse '%N' after the '%'. The struct may still be incomplete when
    /// referenced from inside its own body.
    fn parse_struct_ref(&mut self) -> Res<F::Handle> {
        let start = self.cursor.pos();
        let id: u32 = self.parse_number(ErrorKind::InvalidTypeId)?;
        self.ids
            .get(id)
            .ok_or_else(|| self.error(ErrorKind::UndefinedTypeId(id), start))
    }

    fn parse_array(&mut self) -> Res<F::Handle> {
        let start = self.cursor.pos();
        let elem = self.parse_elem_type(ErrorKind::MissingCross("array"))?;
        if matches!(self.factory.class(elem), TypeClass::Void | TypeClass::Function) {
            return Err(self.error(ErrorKind::InvalidElement("array element"), start));
        }

        if !self.cursor.eat(b'x') {
            return Err(self.error_here(ErrorKind::MissingCross("array")));
        }

        let size_pos = self.cursor.pos();
        let count: u64 = self.parse_number(ErrorKind::InvalidArraySize)?;

        if !self.cursor.eat(b']') {
            return Err(self.error_here(ErrorKind::MissingClose(']')));
        }

        if count == 0 {
            return Err(self.error(ErrorKind::ZeroSizedArray, size_pos));
        }

        Ok(self.factory.make_array(elem, count))
    }

    fn parse_vector(&mut self) -> Res<F::Handle> {
        let start = self.cursor.pos();
        let elem = self.parse_elem_type(ErrorKind::MissingCross("vector"))?;
        if !matches!(
            self.factory.class(elem),
            TypeClass::Integer | TypeClass::Float | TypeClass::Pointer
        ) {
            return Err(self.error(ErrorKind::InvalidElement("vector element"), start));
        }

        if !self.cursor.eat(b'x') {
            return Err(self.error_here(ErrorKind::MissingCross("vector")));
        }

        let size_pos = self.cursor.pos();
        let count: u32 = self.parse_number(ErrorKind::InvalidVectorSize)?;
        if count == 0 {
            return Err(self.error(ErrorKind::ZeroSizedVector, size_pos));
        }

        if !self.cursor.eat(b'>') {
            return Err(self.error_here(ErrorKind::MissingClose('>')));
        }

        Ok(self.factory.make_vector(elem, count))
    }

    fn parse_pointer(&mut self) -> Res<F::Handle> {
        // Any type can be pointed to, '*v' is a void pointer
        let elem = self.parse_elem_type(ErrorKind::MissingPointee)?;
        Ok(self.factory.make_pointer(elem))
    }

    // There always needs to be at least one parameter type and one return
    // type. In C and here:
    //
    //    void foo(void)      (vv)
    //    int foo(void)       (vi)
    //    void foo(int)       (iv)
    //    void foo(...)       (&v) or (v&v)
    //    int foo(int, ...)   (i&i)
    fn parse_function(&mut self) -> Res<F::Handle> {
        let mut elems = self.parse_sequence(b')')?;
        if elems.len() < 2 {
            return Err(self.error_here(ErrorKind::FunctionTooShort));
        }

        let ret = match elems.pop() {
            Some((Element::Type(ty), pos)) => {
                if self.factory.class(ty) == TypeClass::Function {
                    return Err(self.error(ErrorKind::InvalidElement("return"), pos));
                }
                ty
            }
            Some((Element::Vararg, pos)) => {
                return Err(self.error(ErrorKind::VariadicReturn, pos));
            }
            None => return Err(self.error_here(ErrorKind::FunctionTooShort)),
        };

        let variadic = matches!(elems.last(), Some((Element::Vararg, _)));
        if variadic {
            elems.pop();
        }

        // A void parameter means no parameters, and must then be the only one
        let void_pos = match elems.last() {
            Some((Element::Type(ty), pos)) if self.factory.class(*ty) == TypeClass::Void => {
                Some(*pos)
            }
            _ => None,
        };

        if let Some(pos) = void_pos {
            if elems.len() > 1 {
                return Err(self.error(ErrorKind::MisplacedVoidParam, pos));
            }
            elems.pop();
        }

        let mut params = Vec::with_capacity(elems.len());
        for (elem, pos) in elems {
            match elem {
                Element::Type(ty)
                    if !matches!(
                        self.factory.class(ty),
                        TypeClass::Void | TypeClass::Function
                    ) =>
                {
                    params.push(ty)
                }
                _ => return Err(self.error(ErrorKind::InvalidParam, pos)),
            }
        }

        if !self.cursor.eat(b')') {
            return Err(self.error_here(ErrorKind::MissingClose(')')));
        }

        Ok(self.factory.make_function(params, ret, variadic))
    }
}
