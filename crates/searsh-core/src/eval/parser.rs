// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent parser for shell statements.
//!
//! The grammar is deliberately small — exactly the surface the shell
//! needs to drive request builders:
//!
//! ```text
//! program   := stmt (';' stmt)* ';'?
//! stmt      := IDENT '=' expr | expr
//! expr      := 'new' IDENT args chain | postfix
//! postfix   := primary chain
//! primary   := IDENT [args] | STRING | NUMBER | JSON | '(' expr ')'
//! chain     := ('.' IDENT [args] | '[' STRING ']')*
//! args      := '(' (expr (',' expr)*)? ')'
//! ```
//!
//! `true`, `false`, `null`, and `new` are contextual keywords recognized
//! at parse time; the lexer treats them as plain identifiers.

use ecow::EcoString;

use super::error::{ParseError, ParseErrorKind};
use super::lexer::{Token, TokenKind, lex};
use super::Span;

/// A parsed expression with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// The expression kind.
    pub kind: ExprKind,
    /// The covering source span.
    pub span: Span,
}

/// The kind of a parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A bare identifier.
    Ident(EcoString),
    /// A string literal.
    Str(EcoString),
    /// An integer literal.
    Int(i64),
    /// A floating-point literal.
    Float(f64),
    /// A boolean literal.
    Bool(bool),
    /// The `null` literal.
    Null,
    /// A parsed JSON object literal.
    Json(serde_json::Value),
    /// Property access: `target.name`.
    Property {
        /// The receiver expression.
        target: Box<Expr>,
        /// The accessed property.
        name: EcoString,
    },
    /// Bracket string indexing: `target["name"]`.
    Index {
        /// The receiver expression.
        target: Box<Expr>,
        /// The index string.
        key: EcoString,
    },
    /// A call: `target(args)` where target is an identifier or property.
    Call {
        /// The callee expression.
        target: Box<Expr>,
        /// Evaluated call arguments, in order.
        args: Vec<Expr>,
    },
    /// Construction: `new Class(args)`.
    New {
        /// The class name.
        class: EcoString,
        /// Constructor arguments.
        args: Vec<Expr>,
    },
    /// Assignment to a scope binding: `name = value`.
    Assign {
        /// The binding name.
        name: EcoString,
        /// The assigned expression.
        value: Box<Expr>,
    },
}

/// Parses a source into a sequence of statements.
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered; the shell evaluates
/// nothing from a statement that does not parse.
pub fn parse(source: &str) -> Result<Vec<Expr>, ParseError> {
    let tokens: Vec<Token> = lex(source)
        .into_iter()
        .filter(|t| !matches!(t.kind(), TokenKind::Comment(_)))
        .collect();
    Parser { tokens, pos: 0 }.parse_program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn parse_program(mut self) -> Result<Vec<Expr>, ParseError> {
        let mut statements = Vec::new();
        loop {
            while self.eat(&TokenKind::Semicolon) {}
            if self.peek().is_none() {
                break;
            }
            statements.push(self.parse_statement()?);
            if self.peek().is_some() && !self.eat(&TokenKind::Semicolon) {
                return Err(self.unexpected("expected ';' between statements"));
            }
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Expr, ParseError> {
        // Assignment needs two tokens of lookahead: IDENT '='.
        if let (Some(TokenKind::Ident(name)), Some(TokenKind::Assign)) = (
            self.tokens.get(self.pos).map(Token::kind),
            self.tokens.get(self.pos + 1).map(Token::kind),
        ) {
            let name = name.clone();
            let start = self.tokens[self.pos].span();
            self.pos += 2;
            let value = self.parse_expr()?;
            let span = Span::new(start.start(), value.span.end());
            return Ok(Expr {
                kind: ExprKind::Assign {
                    name,
                    value: Box::new(value),
                },
                span,
            });
        }
        self.parse_expr()
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        if let Some(TokenKind::Ident(name)) = self.peek() {
            if name.as_str() == "new" {
                return self.parse_new();
            }
        }
        let primary = self.parse_primary()?;
        self.parse_chain(primary)
    }

    fn parse_new(&mut self) -> Result<Expr, ParseError> {
        let new_span = self.next_span();
        self.pos += 1;
        let Some(TokenKind::Ident(class)) = self.peek().cloned() else {
            return Err(self.expected("a class name after 'new'"));
        };
        self.pos += 1;
        if !matches!(self.peek(), Some(TokenKind::LParen)) {
            return Err(self.expected("'(' after the class name"));
        }
        let (args, end) = self.parse_args()?;
        let expr = Expr {
            kind: ExprKind::New { class, args },
            span: Span::new(new_span.start(), end.end()),
        };
        self.parse_chain(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let Some(token) = self.tokens.get(self.pos).cloned() else {
            return Err(self.end_of_input());
        };
        let span = token.span();
        self.pos += 1;
        let expr = match token.kind() {
            TokenKind::Ident(name) => match name.as_str() {
                "true" => Expr {
                    kind: ExprKind::Bool(true),
                    span,
                },
                "false" => Expr {
                    kind: ExprKind::Bool(false),
                    span,
                },
                "null" => Expr {
                    kind: ExprKind::Null,
                    span,
                },
                _ => {
                    let ident = Expr {
                        kind: ExprKind::Ident(name.clone()),
                        span,
                    };
                    if matches!(self.peek(), Some(TokenKind::LParen)) {
                        let (args, end) = self.parse_args()?;
                        Expr {
                            kind: ExprKind::Call {
                                target: Box::new(ident),
                                args,
                            },
                            span: Span::new(span.start(), end.end()),
                        }
                    } else {
                        ident
                    }
                }
            },
            TokenKind::Str(text) => Expr {
                kind: ExprKind::Str(text.clone()),
                span,
            },
            TokenKind::Int(value) => Expr {
                kind: ExprKind::Int(*value),
                span,
            },
            TokenKind::Float(value) => Expr {
                kind: ExprKind::Float(*value),
                span,
            },
            TokenKind::Json(raw) => {
                let value = serde_json::from_str(raw.as_str()).map_err(|e| {
                    ParseError::new(ParseErrorKind::InvalidJson(e.to_string()), span)
                })?;
                Expr {
                    kind: ExprKind::Json(value),
                    span,
                }
            }
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                if !self.eat(&TokenKind::RParen) {
                    return Err(self.expected("')'"));
                }
                inner
            }
            TokenKind::Error(message) => {
                return Err(ParseError::new(ParseErrorKind::Lex(message.clone()), span));
            }
            other => {
                return Err(ParseError::new(
                    ParseErrorKind::UnexpectedToken(EcoString::from(describe(other))),
                    span,
                ));
            }
        };
        Ok(expr)
    }

    fn parse_chain(&mut self, mut expr: Expr) -> Result<Expr, ParseError> {
        loop {
            if self.eat(&TokenKind::Dot) {
                let Some(TokenKind::Ident(name)) = self.peek().cloned() else {
                    return Err(self.expected("a property name after '.'"));
                };
                let name_span = self.next_span();
                self.pos += 1;
                let property = Expr {
                    kind: ExprKind::Property {
                        target: Box::new(expr),
                        name,
                    },
                    span: name_span,
                };
                expr = if matches!(self.peek(), Some(TokenKind::LParen)) {
                    let (args, end) = self.parse_args()?;
                    Expr {
                        span: Span::new(property.span.start(), end.end()),
                        kind: ExprKind::Call {
                            target: Box::new(property),
                            args,
                        },
                    }
                } else {
                    property
                };
            } else if self.eat(&TokenKind::LBracket) {
                let Some(TokenKind::Str(key)) = self.peek().cloned() else {
                    return Err(self.expected("a string index inside '[...]'"));
                };
                let key_span = self.next_span();
                self.pos += 1;
                if !self.eat(&TokenKind::RBracket) {
                    return Err(self.expected("']'"));
                }
                expr = Expr {
                    span: Span::new(expr.span.start(), key_span.end()),
                    kind: ExprKind::Index {
                        target: Box::new(expr),
                        key,
                    },
                };
            } else {
                return Ok(expr);
            }
        }
    }

    /// Parses a parenthesized argument list; the opening paren must be the
    /// current token. Returns the arguments and the closing paren's span.
    fn parse_args(&mut self) -> Result<(Vec<Expr>, Span), ParseError> {
        self.pos += 1; // consume '('
        let mut args = Vec::new();
        if matches!(self.peek(), Some(TokenKind::RParen)) {
            let span = self.next_span();
            self.pos += 1;
            return Ok((args, span));
        }
        loop {
            args.push(self.parse_expr()?);
            if self.eat(&TokenKind::Comma) {
                continue;
            }
            if matches!(self.peek(), Some(TokenKind::RParen)) {
                let span = self.next_span();
                self.pos += 1;
                return Ok((args, span));
            }
            return Err(self.expected("',' or ')' in argument list"));
        }
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(Token::kind)
    }

    fn next_span(&self) -> Span {
        self.tokens.get(self.pos).map_or_else(
            || {
                let end = self.tokens.last().map_or(0, |t| t.span().end());
                Span::new(end, end)
            },
            Token::span,
        )
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expected(&self, what: &'static str) -> ParseError {
        ParseError::new(ParseErrorKind::Expected(what), self.next_span())
    }

    fn unexpected(&self, _context: &str) -> ParseError {
        let described = self.peek().map_or_else(
            || EcoString::from("end of input"),
            |kind| EcoString::from(describe(kind)),
        );
        ParseError::new(ParseErrorKind::UnexpectedToken(described), self.next_span())
    }

    fn end_of_input(&self) -> ParseError {
        ParseError::new(ParseErrorKind::UnexpectedEnd, self.next_span())
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Ident(name) => format!("identifier '{name}'"),
        TokenKind::Str(_) => "string literal".to_string(),
        TokenKind::Int(_) | TokenKind::Float(_) => "number literal".to_string(),
        TokenKind::Json(_) => "JSON literal".to_string(),
        TokenKind::Comment(_) => "comment".to_string(),
        TokenKind::Dot => "'.'".to_string(),
        TokenKind::Comma => "','".to_string(),
        TokenKind::Semicolon => "';'".to_string(),
        TokenKind::Assign => "'='".to_string(),
        TokenKind::LParen => "'('".to_string(),
        TokenKind::RParen => "')'".to_string(),
        TokenKind::LBracket => "'['".to_string(),
        TokenKind::RBracket => "']'".to_string(),
        TokenKind::Error(message) => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_one(source: &str) -> Expr {
        let mut statements = parse(source).expect("should parse");
        assert_eq!(statements.len(), 1);
        statements.remove(0)
    }

    #[test]
    fn parse_bare_identifier() {
        let expr = parse_one("es");
        assert!(matches!(expr.kind, ExprKind::Ident(name) if name == "es"));
    }

    #[test]
    fn parse_literals() {
        assert!(matches!(parse_one("42").kind, ExprKind::Int(42)));
        assert!(matches!(parse_one("true").kind, ExprKind::Bool(true)));
        assert!(matches!(parse_one("null").kind, ExprKind::Null));
        assert!(matches!(parse_one("'x'").kind, ExprKind::Str(s) if s == "x"));
    }

    #[test]
    fn parse_method_chain() {
        let expr = parse_one("es.admin().cluster().health()");
        // Outermost node is the final call.
        let ExprKind::Call { target, args } = expr.kind else {
            panic!("expected a call");
        };
        assert!(args.is_empty());
        assert!(matches!(target.kind, ExprKind::Property { name, .. } if name == "health"));
    }

    #[test]
    fn parse_call_arguments() {
        let expr = parse_one("es.index().index('tweets')");
        let ExprKind::Call { args, .. } = expr.kind else {
            panic!("expected a call");
        };
        assert_eq!(args.len(), 1);
        assert!(matches!(&args[0].kind, ExprKind::Str(s) if s == "tweets"));
    }

    #[test]
    fn parse_json_argument() {
        let expr = parse_one(r#"es.search().source({"query": {"match_all": {}}})"#);
        let ExprKind::Call { args, .. } = expr.kind else {
            panic!("expected a call");
        };
        assert!(matches!(&args[0].kind, ExprKind::Json(v) if v.get("query").is_some()));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse("es.search().source({query: 1})").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidJson(_)));
    }

    #[test]
    fn parse_new_expression() {
        let expr = parse_one("new SearchRequest('tweets')");
        let ExprKind::New { class, args } = expr.kind else {
            panic!("expected new");
        };
        assert_eq!(class, "SearchRequest");
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn parse_new_with_chain() {
        let expr = parse_one("new SearchRequest().execute()");
        assert!(matches!(expr.kind, ExprKind::Call { .. }));
    }

    #[test]
    fn parse_assignment() {
        let expr = parse_one("x = 42");
        let ExprKind::Assign { name, value } = expr.kind else {
            panic!("expected assignment");
        };
        assert_eq!(name, "x");
        assert!(matches!(value.kind, ExprKind::Int(42)));
    }

    #[test]
    fn parse_bracket_index() {
        let expr = parse_one("response['took']");
        let ExprKind::Index { key, .. } = expr.kind else {
            panic!("expected index");
        };
        assert_eq!(key, "took");
    }

    #[test]
    fn parse_multiple_statements() {
        let statements = parse("x = 1; y = 2;").expect("should parse");
        assert_eq!(statements.len(), 2);
    }

    #[test]
    fn comments_are_ignored() {
        let statements = parse("// leading\nes // trailing").expect("should parse");
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn missing_semicolon_between_statements_errors() {
        let err = parse("x = 1 y = 2").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken(_)));
    }

    #[test]
    fn lex_errors_become_parse_errors() {
        let err = parse("'unterminated").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::Lex(_)));
    }

    #[test]
    fn empty_input_parses_to_no_statements() {
        assert!(parse("").expect("should parse").is_empty());
        assert!(parse("  // comment only").expect("should parse").is_empty());
    }
}
