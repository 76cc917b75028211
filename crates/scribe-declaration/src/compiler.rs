//! Text to schema compilation for object-type literals.
//!
//! [`TypeLiteralCompiler`] reads the TypeScript-like type syntax found in
//! declaration files: object literals, keywords, literal types, arrays,
//! tuples, unions, intersections and a handful of generic helpers. Named
//! types become references. Anything outside that subset is a syntax error.

use std::iter::Peekable;
use std::str::CharIndices;

use scribe_core::{Schema, SchemaKind};
use serde_json::{Number, Value};

use crate::error::{DeclarationError, DeclarationResult};

/// Converts a prepared type literal into a canonical schema.
pub trait TypeCompiler {
    /// Compile `source`, which has quoted keys and no `readonly` modifiers.
    fn compile(&self, source: &str) -> DeclarationResult<Schema>;
}

/// The built-in recursive-descent [`TypeCompiler`].
///
/// ```rust
/// use scribe_declaration::{TypeCompiler, TypeLiteralCompiler};
///
/// let schema = TypeLiteralCompiler.compile(r#"{ "id": number; "tags"?: string[] }"#).unwrap();
/// let object = schema.as_object().unwrap();
/// assert!(object.is_required("id"));
/// assert!(!object.is_required("tags"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeLiteralCompiler;

impl TypeCompiler for TypeLiteralCompiler {
    fn compile(&self, source: &str) -> DeclarationResult<Schema> {
        let tokens = tokenize(source)?;
        let mut parser = TypeParser::new(&tokens);
        let schema = parser.parse_type()?;
        match parser.peek() {
            None => Ok(schema),
            Some(token) => Err(DeclarationError::syntax(
                token.position,
                format!("unexpected {} after type", token.kind.describe()),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    LAngle,
    RAngle,
    Colon,
    Semi,
    Comma,
    Question,
    Pipe,
    Amp,
    Arrow,
    Str(String),
    Template,
    Num(String),
    Ident(String),
}

impl TokenKind {
    fn describe(&self) -> String {
        match self {
            Self::Str(value) => format!("string \"{value}\""),
            Self::Template => "template literal".to_string(),
            Self::Num(raw) => format!("number {raw}"),
            Self::Ident(name) => format!("identifier '{name}'"),
            Self::Arrow => "'=>'".to_string(),
            other => format!("'{}'", other.symbol()),
        }
    }

    fn symbol(&self) -> char {
        match self {
            Self::LBrace => '{',
            Self::RBrace => '}',
            Self::LBracket => '[',
            Self::RBracket => ']',
            Self::LParen => '(',
            Self::RParen => ')',
            Self::LAngle => '<',
            Self::RAngle => '>',
            Self::Colon => ':',
            Self::Semi => ';',
            Self::Comma => ',',
            Self::Question => '?',
            Self::Pipe => '|',
            Self::Amp => '&',
            _ => ' ',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    position: usize,
}

fn tokenize(source: &str) -> DeclarationResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        let kind = match c {
            c if c.is_whitespace() => continue,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '<' => TokenKind::LAngle,
            '>' => TokenKind::RAngle,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semi,
            ',' => TokenKind::Comma,
            '?' => TokenKind::Question,
            '|' => TokenKind::Pipe,
            '&' => TokenKind::Amp,
            '=' if chars.next_if(|(_, next)| *next == '>').is_some() => TokenKind::Arrow,
            '"' | '\'' => TokenKind::Str(read_string(&mut chars, c)?),
            '`' => {
                read_string(&mut chars, c)?;
                TokenKind::Template
            }
            '-' | '0'..='9' => TokenKind::Num(read_number(&mut chars, c, position)?),
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let mut name = String::from(c);
                while let Some((_, next)) =
                    chars.next_if(|(_, next)| next.is_alphanumeric() || matches!(next, '_' | '$' | '.'))
                {
                    name.push(next);
                }
                TokenKind::Ident(name)
            }
            other => {
                return Err(DeclarationError::syntax(
                    position,
                    format!("unexpected character '{other}'"),
                ))
            }
        };
        tokens.push(Token { kind, position });
    }

    Ok(tokens)
}

fn read_string(chars: &mut Peekable<CharIndices<'_>>, quote: char) -> DeclarationResult<String> {
    let mut value = String::new();
    loop {
        let (_, c) = chars.next().ok_or(DeclarationError::UnexpectedEnd)?;
        match c {
            '\\' => {
                let (_, escaped) = chars.next().ok_or(DeclarationError::UnexpectedEnd)?;
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => other,
                });
            }
            c if c == quote => return Ok(value),
            c => value.push(c),
        }
    }
}

fn read_number(chars: &mut Peekable<CharIndices<'_>>, first: char, position: usize) -> DeclarationResult<String> {
    let mut raw = String::from(first);
    while let Some((_, next)) = chars.next_if(|(_, next)| next.is_ascii_alphanumeric() || matches!(next, '.' | '_')) {
        raw.push(next);
    }
    if raw == "-" {
        return Err(DeclarationError::syntax(position, "expected a number after '-'"));
    }
    Ok(raw)
}

fn number_value(raw: &str, position: usize) -> DeclarationResult<Value> {
    let cleaned: String = raw.chars().filter(|c| *c != '_').collect();
    let cleaned = cleaned.strip_suffix('n').unwrap_or(&cleaned);

    if let Ok(integer) = cleaned.parse::<i64>() {
        return Ok(Value::from(integer));
    }
    cleaned
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| DeclarationError::syntax(position, format!("invalid number literal '{raw}'")))
}

struct TypeParser<'a> {
    tokens: &'a [Token],
    index: usize,
}

impl<'a> TypeParser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, index: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.index)
    }

    fn peek_kind(&self, offset: usize) -> Option<&'a TokenKind> {
        self.tokens.get(self.index + offset).map(|token| &token.kind)
    }

    fn advance(&mut self) -> DeclarationResult<&'a Token> {
        let token = self.tokens.get(self.index).ok_or(DeclarationError::UnexpectedEnd)?;
        self.index += 1;
        Ok(token)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind(0) == Some(kind) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> DeclarationResult<()> {
        let token = self.advance()?;
        if &token.kind == kind {
            Ok(())
        } else {
            Err(DeclarationError::syntax(
                token.position,
                format!("expected '{}', found {}", kind.symbol(), token.kind.describe()),
            ))
        }
    }

    fn parse_type(&mut self) -> DeclarationResult<Schema> {
        self.eat(&TokenKind::Pipe);
        let mut members = vec![self.parse_intersection()?];
        while self.eat(&TokenKind::Pipe) {
            members.push(self.parse_intersection()?);
        }
        Ok(collapse(members, Schema::union))
    }

    fn parse_intersection(&mut self) -> DeclarationResult<Schema> {
        self.eat(&TokenKind::Amp);
        let mut members = vec![self.parse_postfix()?];
        while self.eat(&TokenKind::Amp) {
            members.push(self.parse_postfix()?);
        }
        Ok(collapse(members, Schema::intersection))
    }

    fn parse_postfix(&mut self) -> DeclarationResult<Schema> {
        let mut schema = self.parse_primary()?;
        while self.peek_kind(0) == Some(&TokenKind::LBracket) {
            self.index += 1;
            if self.eat(&TokenKind::RBracket) {
                schema = Schema::array(schema);
            } else {
                // Indexed access type; the result is not tracked.
                self.parse_type()?;
                self.expect(&TokenKind::RBracket)?;
                schema = Schema::unknown();
            }
        }
        Ok(schema)
    }

    fn parse_primary(&mut self) -> DeclarationResult<Schema> {
        let token = self.advance()?;
        match &token.kind {
            TokenKind::LBrace => self.parse_object(),
            TokenKind::LParen => self.parse_group(),
            TokenKind::LBracket => self.parse_tuple(),
            TokenKind::Str(value) => Ok(Schema::constant(value.clone())),
            TokenKind::Template => Ok(Schema::string()),
            TokenKind::Num(raw) => Ok(Schema::constant(number_value(raw, token.position)?)),
            TokenKind::Ident(name) => self.parse_named(name),
            other => Err(DeclarationError::syntax(
                token.position,
                format!("expected a type, found {}", other.describe()),
            )),
        }
    }

    fn parse_object(&mut self) -> DeclarationResult<Schema> {
        let mut object = Schema::object();

        loop {
            while self.eat(&TokenKind::Semi) || self.eat(&TokenKind::Comma) {}
            if self.eat(&TokenKind::RBrace) {
                return Ok(object);
            }

            if self.eat(&TokenKind::LBracket) {
                self.advance()?;
                self.expect(&TokenKind::Colon)?;
                self.parse_type()?;
                self.expect(&TokenKind::RBracket)?;
                self.eat(&TokenKind::Question);
                self.expect(&TokenKind::Colon)?;
                self.parse_type()?;
                object = object.additional_properties(true);
                continue;
            }

            let token = self.advance()?;
            let key = match &token.kind {
                TokenKind::Str(key) | TokenKind::Ident(key) | TokenKind::Num(key) => key.clone(),
                other => {
                    return Err(DeclarationError::syntax(
                        token.position,
                        format!("expected a property name, found {}", other.describe()),
                    ))
                }
            };
            let optional = self.eat(&TokenKind::Question);
            self.expect(&TokenKind::Colon)?;
            let value = self.parse_type()?;

            object = object.property(key.clone(), value);
            if !optional {
                object = object.required_property(key);
            }
        }
    }

    fn parse_group(&mut self) -> DeclarationResult<Schema> {
        if let Some(close) = self.matching_paren() {
            if self.tokens.get(close + 1).map(|token| &token.kind) == Some(&TokenKind::Arrow) {
                self.index = close + 2;
                self.parse_type()?;
                return Ok(Schema::unknown());
            }
        }

        let inner = self.parse_type()?;
        self.expect(&TokenKind::RParen)?;
        Ok(inner)
    }

    fn matching_paren(&self) -> Option<usize> {
        let mut depth = 1usize;
        for (offset, token) in self.tokens[self.index..].iter().enumerate() {
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(self.index + offset);
                    }
                }
                _ => {}
            }
        }
        None
    }

    fn parse_tuple(&mut self) -> DeclarationResult<Schema> {
        let mut members = Vec::new();
        loop {
            if self.eat(&TokenKind::RBracket) {
                break;
            }
            let named = matches!(self.peek_kind(0), Some(TokenKind::Ident(_) | TokenKind::Str(_)))
                && matches!(self.peek_kind(1), Some(TokenKind::Colon | TokenKind::Question));
            if named {
                self.index += 1;
                self.eat(&TokenKind::Question);
                self.expect(&TokenKind::Colon)?;
            }
            members.push(self.parse_type()?);
            self.eat(&TokenKind::Question);
            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::RBracket)?;
                break;
            }
        }

        let items = if members.is_empty() {
            Schema::unknown()
        } else {
            collapse(members, Schema::union)
        };
        Ok(Schema::array(items))
    }

    fn parse_named(&mut self, name: &str) -> DeclarationResult<Schema> {
        let schema = match name {
            "string" => Schema::string(),
            "number" => Schema::number(),
            "bigint" => Schema::integer().with_format("int64"),
            "boolean" => Schema::boolean(),
            "true" => Schema::constant(true),
            "false" => Schema::constant(false),
            "null" => Schema::null(),
            "undefined" => Schema::undefined(),
            "void" => Schema::void(),
            "any" | "unknown" | "never" => Schema::unknown(),
            "object" => Schema::object(),
            "Date" => Schema::string().with_format("date-time"),
            "keyof" => {
                self.parse_postfix()?;
                Schema::string()
            }
            "typeof" => {
                self.parse_postfix()?;
                Schema::unknown()
            }
            "unique" => self.parse_postfix()?,
            _ => {
                let arguments = if self.eat(&TokenKind::LAngle) {
                    self.parse_type_arguments()?
                } else {
                    Vec::new()
                };
                generic(name, arguments)
            }
        };
        Ok(schema)
    }

    fn parse_type_arguments(&mut self) -> DeclarationResult<Vec<Schema>> {
        let mut arguments = vec![self.parse_type()?];
        while self.eat(&TokenKind::Comma) {
            arguments.push(self.parse_type()?);
        }
        self.expect(&TokenKind::RAngle)?;
        Ok(arguments)
    }
}

fn generic(name: &str, mut arguments: Vec<Schema>) -> Schema {
    match (name, arguments.len()) {
        ("Array" | "ReadonlyArray" | "Set", 1) => Schema::array(arguments.remove(0)),
        ("Promise" | "Readonly" | "NonNullable", 1) => arguments.remove(0),
        ("Partial", 1) => {
            let mut inner = arguments.remove(0);
            if let SchemaKind::Object(object) = &mut inner.kind {
                object.required.clear();
            }
            inner
        }
        ("Record" | "Map", 2) => Schema::object().additional_properties(true),
        _ => Schema::reference(name),
    }
}

fn collapse(mut members: Vec<Schema>, combine: fn(Vec<Schema>) -> Schema) -> Schema {
    if members.len() == 1 {
        members.remove(0)
    } else {
        combine(members)
    }
}
