//! Tokenizer for formulas.
//!
//! Identifiers are resolved while lexing, so the parser only ever sees numbers,
//! bound variables, bound functions, infix operators, the end of input, or an
//! error token.

use crate::binding::{self, BindingKind, Function, Resolver};
use crate::parser::ParseErrorKind;
use crate::syntax::{InfixOp, Span, number_literal};
use core::cell::Cell;
use core::fmt;
use tracing::trace;

#[derive(Debug, Clone)]
pub enum Token<'a> {
    Number(f64),
    Variable { name: &'a str, cell: &'a Cell<f64> },
    Function(Function<'a>),
    Infix(InfixOp),
    End,
    Error(ParseErrorKind),
}

impl Token<'_> {
    pub fn is_infix(&self, ops: &[InfixOp]) -> Option<InfixOp> {
        match self {
            Token::Infix(op) if ops.contains(op) => Some(*op),
            _ => None,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "number {}", value),
            Token::Variable { name, .. } => write!(f, "variable '{}'", name),
            Token::Function(function) => write!(f, "function '{}'", function.name),
            Token::Infix(op) => write!(f, "operator '{}'", op),
            Token::End => write!(f, "end of input"),
            Token::Error(kind) => write!(f, "{}", kind),
        }
    }
}

pub struct Lexer<'s, 'r, 'a> {
    source: &'s str,
    cursor: usize,
    token_start: usize,
    resolver: Resolver<'r, 'a>,
}

impl<'s, 'r, 'a> Lexer<'s, 'r, 'a> {
    pub fn new(source: &'s str, resolver: Resolver<'r, 'a>) -> Self {
        Self {
            source,
            cursor: 0,
            token_start: 0,
            resolver,
        }
    }

    /// Byte offset just past the most recently produced token.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Byte range of the most recently produced token.
    pub fn token_span(&self) -> Span {
        Span::new(self.token_start, self.cursor.max(self.token_start))
    }

    pub fn next_token(&mut self) -> Token<'a> {
        let token = self.scan();
        trace!(token = %token, start = self.token_start, end = self.cursor, "lexed");
        token
    }

    fn scan(&mut self) -> Token<'a> {
        loop {
            let rest = &self.source[self.cursor..];
            self.token_start = self.cursor;

            let Some(c) = rest.chars().next() else {
                return Token::End;
            };

            if c.is_ascii_digit() || c == '.' {
                return self.number(rest);
            }

            if c.is_ascii() && binding::is_identifier_start(c as u8) {
                return self.identifier(rest);
            }

            self.cursor += c.len_utf8();
            if let Some(op) = InfixOp::from_char(c) {
                return Token::Infix(op);
            }
            match c {
                ' ' | '\t' | '\n' | '\r' => continue,
                _ => return Token::Error(ParseErrorKind::UnexpectedCharacter { ch: c }),
            }
        }
    }

    fn number(&mut self, rest: &str) -> Token<'a> {
        let len = number_literal::scan(rest);
        let literal = &rest[..len];
        match number_literal::parse(literal) {
            Some(value) => {
                self.cursor += len;
                Token::Number(value)
            }
            None => Token::Error(ParseErrorKind::InvalidNumber {
                text: literal.to_string(),
            }),
        }
    }

    fn identifier(&mut self, rest: &str) -> Token<'a> {
        let len = rest
            .bytes()
            .take_while(|c| binding::is_identifier_continue(*c))
            .count();
        let name = &rest[..len];
        self.cursor += len;

        match self.resolver.resolve(name) {
            Some(binding) => match binding.kind {
                BindingKind::Variable(cell) => Token::Variable {
                    name: binding.name,
                    cell,
                },
                BindingKind::Function(function) => Token::Function(function),
            },
            None => Token::Error(ParseErrorKind::UnknownIdentifier {
                name: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Binding;

    fn tokens(source: &str) -> Vec<String> {
        let mut lexer = Lexer::new(source, Resolver::builtins_only());
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token();
            let stop = matches!(token, Token::End | Token::Error(_));
            out.push(token.to_string());
            if stop {
                return out;
            }
        }
    }

    #[test]
    fn test_numbers_and_operators() {
        assert_eq!(
            tokens("1+2.5*.5"),
            [
                "number 1",
                "operator '+'",
                "number 2.5",
                "operator '*'",
                "number 0.5",
                "end of input"
            ]
        );
    }

    #[test]
    fn test_whitespace_is_skipped() {
        assert_eq!(
            tokens(" \t1 \r\n ^  2 "),
            ["number 1", "operator '^'", "number 2", "end of input"]
        );
    }

    #[test]
    fn test_all_operators() {
        assert_eq!(
            tokens("+-*/^%"),
            [
                "operator '+'",
                "operator '-'",
                "operator '*'",
                "operator '/'",
                "operator '^'",
                "operator '%'",
                "end of input"
            ]
        );
    }

    #[test]
    fn test_builtin_identifiers() {
        assert_eq!(
            tokens("sqrt pow pi"),
            [
                "function 'sqrt'",
                "function 'pow'",
                "function 'pi'",
                "end of input"
            ]
        );
    }

    #[test]
    fn test_unknown_identifier_is_an_error() {
        assert_eq!(
            tokens("1+foo"),
            [
                "number 1",
                "operator '+'",
                "unknown identifier 'foo'"
            ]
        );
    }

    #[test]
    fn test_unknown_character_is_an_error() {
        assert_eq!(tokens("2(3)"), ["number 2", "unexpected character '('"]);
        assert_eq!(tokens("X"), ["unexpected character 'X'"]);
        assert_eq!(tokens("1,2"), ["number 1", "unexpected character ','"]);
    }

    #[test]
    fn test_lone_dot_is_an_error_without_advancing() {
        let mut lexer = Lexer::new("1+.", Resolver::builtins_only());
        lexer.next_token();
        lexer.next_token();
        assert_eq!(lexer.cursor(), 2);
        assert!(matches!(
            lexer.next_token(),
            Token::Error(ParseErrorKind::InvalidNumber { .. })
        ));
        assert_eq!(lexer.cursor(), 2);
    }

    #[test]
    fn test_identifiers_take_digits_and_underscores() {
        let a = Cell::new(1.0);
        let bindings = [Binding::variable("rate_2", &a)];
        let mut lexer = Lexer::new("rate_2*2", Resolver::new(&bindings, &[]));
        assert!(matches!(lexer.next_token(), Token::Variable { name: "rate_2", .. }));
        assert_eq!(lexer.cursor(), 6);
        assert_eq!(lexer.token_span(), Span::new(0, 6));
    }

    #[test]
    fn test_identifier_stops_at_uppercase() {
        let a = Cell::new(1.0);
        let bindings = [Binding::variable("a", &a)];
        let mut lexer = Lexer::new("aB", Resolver::new(&bindings, &[]));
        assert!(matches!(lexer.next_token(), Token::Variable { .. }));
        assert!(matches!(
            lexer.next_token(),
            Token::Error(ParseErrorKind::UnexpectedCharacter { ch: 'B' })
        ));
    }

    #[test]
    fn test_cursor_tracks_token_end() {
        let mut lexer = Lexer::new("12 + 3", Resolver::builtins_only());
        lexer.next_token();
        assert_eq!(lexer.cursor(), 2);
        lexer.next_token();
        assert_eq!(lexer.cursor(), 4);
        assert_eq!(lexer.token_span(), Span::new(3, 4));
        lexer.next_token();
        assert_eq!(lexer.cursor(), 6);
        assert!(matches!(lexer.next_token(), Token::End));
        assert_eq!(lexer.cursor(), 6);
    }

    #[test]
    fn test_non_ascii_is_an_error() {
        assert_eq!(tokens("1×2"), ["number 1", "unexpected character '×'"]);
    }

    #[test]
    fn test_non_ascii_error_spans_the_whole_character() {
        let mut lexer = Lexer::new("1×2", Resolver::builtins_only());
        lexer.next_token();
        assert!(matches!(lexer.next_token(), Token::Error(_)));
        assert_eq!(lexer.cursor(), 3);
        assert_eq!(lexer.token_span(), Span::new(1, 3));
    }
}
