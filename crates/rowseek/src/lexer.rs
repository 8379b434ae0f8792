//! Tokenizer for translated expressions.

use crate::error::{Result, SeekError};
use crate::op::BinaryOp;

/// Token produced by the [`Lexer`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token<'a> {
    /// Numeric literal.
    Number(f64),
    /// Identifier: `vals`, `abs`, `true`, `false` (others are rejected by the parser).
    Ident(&'a str),
    /// Binary operator, or `-`/`+` which may also be prefix operators.
    Op(BinaryOp),
    /// `!`
    Bang,
    LParen,
    RParen,
    LBracket,
    RBracket,
}

/// A token plus its byte offset in the source.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Spanned<'a> {
    pub token: Token<'a>,
    pub offset: usize,
}

/// Splits a translated expression into tokens.
pub(crate) struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the whole input.
    pub(crate) fn tokenize(mut self) -> Result<Vec<Spanned<'a>>> {
        let mut tokens = Vec::new();
        while let Some(spanned) = self.next_token()? {
            tokens.push(spanned);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Spanned<'a>>> {
        let rest = &self.input[self.pos..];
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();

        let offset = self.pos;
        let Some(c) = trimmed.chars().next() else {
            return Ok(None);
        };

        let (token, len) = if c.is_ascii_digit() || (c == '.' && starts_with_digit(&trimmed[1..])) {
            let len = number_len(trimmed);
            let text = &trimmed[..len];
            let n = text
                .parse::<f64>()
                .map_err(|_| SeekError::parse(offset, format!("invalid number `{}`", text)))?;
            (Token::Number(n), len)
        } else if c.is_ascii_alphabetic() || c == '_' {
            let len = trimmed
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(trimmed.len());
            (Token::Ident(&trimmed[..len]), len)
        } else {
            self.symbol(trimmed, offset)?
        };

        self.pos += len;
        Ok(Some(Spanned { token, offset }))
    }

    fn symbol(&self, s: &str, offset: usize) -> Result<(Token<'a>, usize)> {
        const THREE: [(&str, BinaryOp); 2] = [("===", BinaryOp::StrictEq), ("!==", BinaryOp::StrictNe)];
        const TWO: [(&str, BinaryOp); 6] = [
            ("==", BinaryOp::Eq),
            ("!=", BinaryOp::Ne),
            ("<=", BinaryOp::Lte),
            (">=", BinaryOp::Gte),
            ("&&", BinaryOp::And),
            ("||", BinaryOp::Or),
        ];

        for (text, op) in THREE.iter().chain(TWO.iter()) {
            if s.starts_with(text) {
                return Ok((Token::Op(*op), text.len()));
            }
        }

        let token = match s.as_bytes()[0] {
            b'+' => Token::Op(BinaryOp::Add),
            b'-' => Token::Op(BinaryOp::Sub),
            b'*' => Token::Op(BinaryOp::Mul),
            b'/' => Token::Op(BinaryOp::Div),
            b'%' => Token::Op(BinaryOp::Rem),
            b'<' => Token::Op(BinaryOp::Lt),
            b'>' => Token::Op(BinaryOp::Gt),
            b'!' => Token::Bang,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'[' => Token::LBracket,
            b']' => Token::RBracket,
            _ => {
                let c = s.chars().next().unwrap_or_default();
                return Err(SeekError::parse(offset, format!("unexpected character `{}`", c)));
            }
        };
        Ok((token, 1))
    }
}

fn starts_with_digit(s: &str) -> bool {
    s.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

/// Length of the numeric literal at the start of `s`: digits, one optional
/// fraction and one optional exponent.
fn number_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}
