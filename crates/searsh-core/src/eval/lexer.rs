// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for shell script input.
//!
//! The lexer is hand-written and never fails: unknown characters,
//! unterminated strings, and unterminated JSON literals produce
//! [`TokenKind::Error`] tokens so the parser can report a positioned
//! diagnostic instead of panicking mid-keystroke.
//!
//! JSON object literals (`{...}`) are captured as a single raw token and
//! parsed by the parser with `serde_json` — the shell does not reinvent a
//! JSON grammar.

use std::iter::Peekable;
use std::str::CharIndices;

use ecow::EcoString;

use super::Span;

/// The kind of a script token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// An identifier: `es`, `indices`, `SearchRequest`.
    Ident(EcoString),
    /// A string literal with quotes and escapes resolved.
    Str(EcoString),
    /// An integer literal.
    Int(i64),
    /// A floating-point literal.
    Float(f64),
    /// A raw JSON object literal, body included braces.
    Json(EcoString),
    /// A comment (line or block); skipped by the parser, colored by the
    /// REPL highlighter.
    Comment(EcoString),
    /// `.`
    Dot,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `=`
    Assign,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// A lexical error with a human-readable message.
    Error(EcoString),
}

/// A token with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    span: Span,
}

impl Token {
    /// The token kind.
    #[must_use]
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// The source span.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }
}

/// Tokenizes a full script source.
#[must_use]
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// A lexer over shell script source.
pub struct Lexer<'src> {
    source: &'src str,
    chars: Peekable<CharIndices<'src>>,
    position: usize,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source text.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            position: 0,
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.position = pos + c.len_utf8();
        Some(c)
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&predicate) {
            self.advance();
        }
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            span: (start..self.position).into(),
        }
    }

    fn error(&self, message: &str, start: usize) -> Token {
        self.token(TokenKind::Error(EcoString::from(message)), start)
    }

    fn lex_ident(&mut self, start: usize) -> Token {
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let text = &self.source[start..self.position];
        self.token(TokenKind::Ident(EcoString::from(text)), start)
    }

    fn lex_number(&mut self, start: usize) -> Token {
        self.advance_while(|c| c.is_ascii_digit());
        let mut is_float = false;
        if self.peek_char() == Some('.') {
            // Only consume the dot when a digit follows; `1.index` is a
            // property access on an integer, not a malformed float.
            let mut ahead = self.chars.clone();
            ahead.next();
            if ahead.peek().is_some_and(|&(_, c)| c.is_ascii_digit()) {
                is_float = true;
                self.advance();
                self.advance_while(|c| c.is_ascii_digit());
            }
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_float = true;
            self.advance();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.advance();
            }
            self.advance_while(|c| c.is_ascii_digit());
        }
        let text = &self.source[start..self.position];
        if is_float {
            match text.parse::<f64>() {
                Ok(value) => self.token(TokenKind::Float(value), start),
                Err(_) => self.error("invalid number literal", start),
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => self.token(TokenKind::Int(value), start),
                Err(_) => self.error("integer literal out of range", start),
            }
        }
    }

    fn lex_string(&mut self, quote: char, start: usize) -> Token {
        let mut text = EcoString::new();
        loop {
            match self.advance() {
                None => return self.error("unterminated string literal", start),
                Some(c) if c == quote => break,
                Some('\\') => match self.advance() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('r') => text.push('\r'),
                    Some(c @ ('\\' | '\'' | '"' | '/')) => text.push(c),
                    Some(_) => return self.error("invalid escape sequence", start),
                    None => return self.error("unterminated string literal", start),
                },
                Some(c) => text.push(c),
            }
        }
        self.token(TokenKind::Str(text), start)
    }

    /// Captures a balanced `{...}` region as one raw JSON token, keeping
    /// track of strings so braces inside them do not count.
    fn lex_json(&mut self, start: usize) -> Token {
        let mut depth = 1usize;
        let mut in_string: Option<char> = None;
        loop {
            match self.advance() {
                None => return self.error("unterminated JSON literal", start),
                Some('\\') if in_string.is_some() => {
                    self.advance();
                }
                Some(c) if in_string == Some(c) => in_string = None,
                Some(_) if in_string.is_some() => {}
                Some(c @ ('"' | '\'')) => in_string = Some(c),
                Some('{') => depth += 1,
                Some('}') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Some(_) => {}
            }
        }
        let text = &self.source[start..self.position];
        self.token(TokenKind::Json(EcoString::from(text)), start)
    }

    fn lex_line_comment(&mut self, start: usize) -> Token {
        self.advance_while(|c| c != '\n');
        let text = &self.source[start..self.position];
        self.token(TokenKind::Comment(EcoString::from(text)), start)
    }

    fn lex_block_comment(&mut self, start: usize) -> Token {
        loop {
            match self.advance() {
                None => return self.error("unterminated block comment", start),
                Some('*') if self.peek_char() == Some('/') => {
                    self.advance();
                    break;
                }
                Some(_) => {}
            }
        }
        let text = &self.source[start..self.position];
        self.token(TokenKind::Comment(EcoString::from(text)), start)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.advance_while(|c| c.is_whitespace());
        let start = self.chars.peek()?.0;
        let c = self.advance()?;
        let token = match c {
            c if c.is_ascii_alphabetic() || c == '_' => self.lex_ident(start),
            c if c.is_ascii_digit() => self.lex_number(start),
            '-' if self.peek_char().is_some_and(|c| c.is_ascii_digit()) => self.lex_number(start),
            '\'' | '"' => self.lex_string(c, start),
            '{' => self.lex_json(start),
            '/' if self.peek_char() == Some('/') => self.lex_line_comment(start),
            '/' if self.peek_char() == Some('*') => {
                self.advance();
                self.lex_block_comment(start)
            }
            '.' => self.token(TokenKind::Dot, start),
            ',' => self.token(TokenKind::Comma, start),
            ';' => self.token(TokenKind::Semicolon, start),
            '=' => self.token(TokenKind::Assign, start),
            '(' => self.token(TokenKind::LParen, start),
            ')' => self.token(TokenKind::RParen, start),
            '[' => self.token(TokenKind::LBracket, start),
            ']' => self.token(TokenKind::RBracket, start),
            other => {
                let message = format!("unexpected character '{other}'");
                self.error(&message, start)
            }
        };
        Some(token)
    }
}

/// Returns whether a buffered input forms a complete statement.
///
/// Used by the REPL to decide between evaluating and showing the `..>`
/// continuation prompt. Input is incomplete while parens, brackets,
/// braces, or strings are open, or when the last meaningful character is
/// a `.`, `=`, or `,`.
#[must_use]
pub fn is_input_complete(source: &str) -> bool {
    let mut depth = 0i64;
    let mut in_string: Option<char> = None;
    let mut last_meaningful: Option<char> = None;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(quote) = in_string {
            match c {
                '\\' => {
                    chars.next();
                }
                c if c == quote => in_string = None,
                _ => {}
            }
            continue;
        }
        match c {
            '\'' | '"' => {
                in_string = Some(c);
                last_meaningful = Some(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                // Line comment: skip to end of line.
                for next in chars.by_ref() {
                    if next == '\n' {
                        break;
                    }
                }
            }
            '(' | '[' | '{' => {
                depth += 1;
                last_meaningful = Some(c);
            }
            ')' | ']' | '}' => {
                depth -= 1;
                last_meaningful = Some(c);
            }
            c if c.is_whitespace() => {}
            c => last_meaningful = Some(c),
        }
    }

    depth <= 0 && in_string.is_none() && !matches!(last_meaningful, Some('.' | '=' | ','))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).into_iter().map(|t| t.kind().clone()).collect()
    }

    #[test]
    fn lex_simple_chain() {
        let tokens = kinds("es.admin()");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Ident(EcoString::from("es")),
                TokenKind::Dot,
                TokenKind::Ident(EcoString::from("admin")),
                TokenKind::LParen,
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn lex_string_literals() {
        assert_eq!(kinds("'abc'"), vec![TokenKind::Str(EcoString::from("abc"))]);
        assert_eq!(kinds("\"abc\""), vec![TokenKind::Str(EcoString::from("abc"))]);
    }

    #[test]
    fn lex_string_escapes() {
        assert_eq!(
            kinds(r#"'a\n\t\'b'"#),
            vec![TokenKind::Str(EcoString::from("a\n\t'b"))]
        );
    }

    #[test]
    fn unterminated_string_is_an_error_token() {
        let tokens = kinds("'abc");
        assert!(matches!(tokens[0], TokenKind::Error(_)));
    }

    #[test]
    fn lex_numbers() {
        assert_eq!(kinds("42"), vec![TokenKind::Int(42)]);
        assert_eq!(kinds("-17"), vec![TokenKind::Int(-17)]);
        assert_eq!(kinds("3.25"), vec![TokenKind::Float(3.25)]);
        assert_eq!(kinds("1e3"), vec![TokenKind::Float(1000.0)]);
    }

    #[test]
    fn dot_after_integer_is_property_access() {
        let tokens = kinds("1.toString");
        assert_eq!(tokens[0], TokenKind::Int(1));
        assert_eq!(tokens[1], TokenKind::Dot);
    }

    #[test]
    fn json_literal_is_one_token() {
        let tokens = kinds(r#"{"query": {"match_all": {}}}"#);
        assert_eq!(tokens.len(), 1);
        let TokenKind::Json(raw) = &tokens[0] else {
            panic!("expected a JSON token");
        };
        assert!(raw.starts_with('{') && raw.ends_with('}'));
    }

    #[test]
    fn json_literal_ignores_braces_in_strings() {
        let tokens = kinds(r#"{"a": "}"}"#);
        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0], TokenKind::Json(_)));
    }

    #[test]
    fn unterminated_json_is_an_error_token() {
        let tokens = kinds(r#"{"a": 1"#);
        assert!(matches!(tokens[0], TokenKind::Error(_)));
    }

    #[test]
    fn comments_are_tokens() {
        let tokens = kinds("es // trailing note");
        assert_eq!(tokens.len(), 2);
        assert!(matches!(tokens[1], TokenKind::Comment(_)));
        let tokens = kinds("/* block */ es");
        assert!(matches!(tokens[0], TokenKind::Comment(_)));
    }

    #[test]
    fn tokens_carry_spans() {
        let tokens = lex("es.index");
        assert_eq!(tokens[0].span().as_range(), 0..2);
        assert_eq!(tokens[1].span().as_range(), 2..3);
        assert_eq!(tokens[2].span().as_range(), 3..8);
    }

    #[test]
    fn input_complete_for_plain_statement() {
        assert!(is_input_complete("es.admin().cluster().health().execute()"));
    }

    #[test]
    fn input_incomplete_with_open_paren() {
        assert!(!is_input_complete("es.search("));
    }

    #[test]
    fn input_incomplete_with_open_json() {
        assert!(!is_input_complete(r#"es.search().source({"query""#));
    }

    #[test]
    fn input_incomplete_with_open_string() {
        assert!(!is_input_complete("es.index().index('tw"));
    }

    #[test]
    fn input_incomplete_with_trailing_dot_or_assign() {
        assert!(!is_input_complete("es."));
        assert!(!is_input_complete("x ="));
        assert!(!is_input_complete("f(a,"));
    }

    #[test]
    fn input_complete_ignores_comment_text() {
        assert!(is_input_complete("es.count() // not ( open"));
    }
}
