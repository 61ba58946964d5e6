//! Recursive-descent parser.
//!
//! ```text
//! list   = expr { "," expr }
//! expr   = term { ("+" | "-") term }
//! term   = factor { ("*" | "/" | "%") factor }
//! factor = power { "^" power }
//! power  = { ("+" | "-") } base
//! base   = number | variable | function0 | function1 power
//! ```
//!
//! Every tier is left-associative, `^` included, so `2^3^2` is `(2^3)^2`.
//!
//! Productions never return early on failure. An unexpected token turns the
//! current token into an error token and yields a NaN placeholder; since no
//! loop continues past an error token, the descent unwinds on its own and
//! failure is detected once, at the top, by checking that the whole input was
//! consumed.

use super::{ParseError, ParseErrorKind};
use crate::ast::Node;
use crate::binding::{Function, Resolver};
use crate::lexer::{Lexer, Token};
use crate::syntax::{InfixOp, Span, negate};
use tracing::debug;

/// Default limit on the height of the parsed tree. Nested function
/// applications (`sin sin sin ... x`) and operator chains (`1+1+...+1`) both
/// count.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Parse a formula, resolving identifiers with `resolver`.
pub fn parse<'a>(source: &str, resolver: Resolver<'_, 'a>) -> Result<Node<'a>, ParseError> {
    parse_with_max_depth(source, resolver, DEFAULT_MAX_DEPTH)
}

/// Parse a formula with a custom limit on the height of the parsed tree.
pub fn parse_with_max_depth<'a>(
    source: &str,
    resolver: Resolver<'_, 'a>,
    max_depth: usize,
) -> Result<Node<'a>, ParseError> {
    let mut parser = Parser::new(source, resolver, max_depth);
    let root = parser.list();
    parser.finish(root)
}

/// A parsed node and its height in call levels.
struct Subtree<'a> {
    node: Node<'a>,
    height: usize,
}

impl<'a> Subtree<'a> {
    fn leaf(node: Node<'a>) -> Self {
        Self { node, height: 0 }
    }

    fn invalid() -> Self {
        Self::leaf(Node::invalid())
    }
}

struct Parser<'s, 'r, 'a> {
    source: &'s str,
    lexer: Lexer<'s, 'r, 'a>,
    token: Token<'a>,
    error_span: Option<Span>,
    depth: usize,
    max_depth: usize,
}

impl<'s, 'r, 'a> Parser<'s, 'r, 'a> {
    fn new(source: &'s str, resolver: Resolver<'r, 'a>, max_depth: usize) -> Self {
        let mut lexer = Lexer::new(source, resolver);
        let token = lexer.next_token();
        Self {
            source,
            lexer,
            token,
            error_span: None,
            depth: 0,
            max_depth,
        }
    }

    fn advance(&mut self) {
        self.token = self.lexer.next_token();
    }

    /// Turn the current token into an error token. The first failure wins.
    fn fail(&mut self, kind: ParseErrorKind, span: Span) {
        if matches!(self.token, Token::Error(_)) {
            return;
        }
        self.token = Token::Error(kind);
        self.error_span = Some(span);
    }

    fn finish(self, root: Node<'a>) -> Result<Node<'a>, ParseError> {
        let cursor = self.lexer.cursor();
        let span = self
            .error_span
            .unwrap_or_else(|| self.lexer.token_span());

        let kind = match self.token {
            Token::End => {
                debug!(nodes = root.node_count(), "parsed");
                return Ok(root);
            }
            Token::Error(kind) => kind,
            other => ParseErrorKind::TrailingInput {
                found: other.to_string(),
            },
        };

        debug!(%kind, offset = cursor, "parse failed");
        drop(root);
        Err(ParseError::new(kind, cursor, span, self.source))
    }

    fn list(&mut self) -> Node<'a> {
        // The lexer never produces ',' so a list is a single expression.
        self.expr().node
    }

    /// Build a call node, failing once the tree would grow taller than
    /// `max_depth` so that later tree walks stay within the stack.
    fn apply(
        &mut self,
        function: Function<'a>,
        args: Vec<Subtree<'a>>,
        span: Span,
    ) -> Subtree<'a> {
        let height = args.iter().map(|arg| arg.height).max().unwrap_or(0) + 1;
        if height > self.max_depth {
            self.fail(
                ParseErrorKind::MaxDepthExceeded {
                    max_depth: self.max_depth,
                },
                span,
            );
            return Subtree::invalid();
        }
        let args = args.into_iter().map(|arg| arg.node).collect();
        Subtree {
            node: Node::call(function, args),
            height,
        }
    }

    fn expr(&mut self) -> Subtree<'a> {
        let mut ret = self.term();
        while let Some(op) = self.token.is_infix(&[InfixOp::Add, InfixOp::Sub]) {
            let span = self.lexer.token_span();
            self.advance();
            let right = self.term();
            ret = self.apply(op.function(), vec![ret, right], span);
        }
        ret
    }

    fn term(&mut self) -> Subtree<'a> {
        let mut ret = self.factor();
        while let Some(op) = self
            .token
            .is_infix(&[InfixOp::Mul, InfixOp::Div, InfixOp::Mod])
        {
            let span = self.lexer.token_span();
            self.advance();
            let right = self.factor();
            ret = self.apply(op.function(), vec![ret, right], span);
        }
        ret
    }

    fn factor(&mut self) -> Subtree<'a> {
        let mut ret = self.power();
        while let Some(op) = self.token.is_infix(&[InfixOp::Pow]) {
            let span = self.lexer.token_span();
            self.advance();
            let right = self.power();
            ret = self.apply(op.function(), vec![ret, right], span);
        }
        ret
    }

    fn power(&mut self) -> Subtree<'a> {
        let mut negative = false;
        let mut sign_span = None;
        while let Some(op) = self.token.is_infix(&[InfixOp::Add, InfixOp::Sub]) {
            if op == InfixOp::Sub {
                negative = !negative;
            }
            sign_span.get_or_insert_with(|| self.lexer.token_span());
            self.advance();
        }

        let base = self.base();
        match sign_span {
            Some(span) if negative => self.apply(negate(), vec![base], span),
            _ => base,
        }
    }

    fn base(&mut self) -> Subtree<'a> {
        match self.token.clone() {
            Token::Number(value) => {
                self.advance();
                Subtree::leaf(Node::constant(value))
            }

            Token::Variable { name, cell } => {
                self.advance();
                Subtree::leaf(Node::variable(name, cell))
            }

            Token::Function(function) if function.arity == 0 => {
                let span = self.lexer.token_span();
                self.advance();
                self.apply(function, vec![], span)
            }

            Token::Function(function) if function.arity == 1 => {
                let span = self.lexer.token_span();
                self.advance();
                if self.depth >= self.max_depth {
                    self.fail(
                        ParseErrorKind::MaxDepthExceeded {
                            max_depth: self.max_depth,
                        },
                        span,
                    );
                    return Subtree::invalid();
                }
                self.depth += 1;
                let arg = self.power();
                self.depth -= 1;
                self.apply(function, vec![arg], span)
            }

            Token::Function(function) => {
                let span = self.lexer.token_span();
                self.advance();
                self.fail(
                    ParseErrorKind::UnsupportedArity {
                        name: function.name.to_string(),
                        arity: function.arity,
                    },
                    span,
                );
                Subtree::invalid()
            }

            other => {
                let span = self.lexer.token_span();
                self.fail(
                    ParseErrorKind::UnexpectedToken {
                        found: other.to_string(),
                    },
                    span,
                );
                Subtree::invalid()
            }
        }
    }
}
