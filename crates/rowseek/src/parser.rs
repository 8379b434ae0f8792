//! Recursive-descent parser for translated expressions.
//!
//! Binary operators are parsed by precedence climbing over
//! [`BinaryOp::precedence`]; all of them associate to the left.
//!
//! Nesting is bounded by [`MAX_DEPTH`], both while parsing and in the
//! height of the resulting tree, so evaluation never recurses deeper than
//! that.

use crate::error::{Result, SeekError};
use crate::expr::Expr;
use crate::lexer::{Lexer, Spanned, Token};
use crate::op::{BinaryOp, UnaryOp};

/// Deepest nesting of parentheses, operators and `abs(..)` a query may use.
pub const MAX_DEPTH: usize = 256;

/// Parses a translated expression into an [`Expr`] tree.
///
/// # Errors
///
/// Returns [`SeekError::Parse`] with the byte offset of the offending token,
/// including for expressions nested deeper than [`MAX_DEPTH`].
///
/// # Example
///
/// ```
/// use rowseek::parse;
///
/// let expr = parse("abs(vals[1] - vals[2]) < 1").unwrap();
/// assert_eq!(expr.max_column(), Some(2));
/// assert!(parse("vals[1] >").is_err());
/// ```
pub fn parse(input: &str) -> Result<Expr> {
    let tokens = Lexer::new(input).tokenize()?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        end: input.len(),
        depth: 0,
    };

    let (expr, _) = parser.expression(1)?;
    if let Some(extra) = parser.peek() {
        return Err(SeekError::parse(
            extra.offset,
            format!("unexpected {}", describe(&extra.token)),
        ));
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: Vec<Spanned<'a>>,
    pos: usize,
    end: usize,
    depth: usize,
}

fn too_deep(offset: usize) -> SeekError {
    SeekError::parse(offset, "expression nested too deeply")
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Spanned<'a>> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<Spanned<'a>> {
        let spanned = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| SeekError::parse(self.end, "unexpected end of expression"))?;
        self.pos += 1;
        Ok(spanned)
    }

    fn expect(&mut self, expected: Token<'a>) -> Result<()> {
        let spanned = self.next()?;
        if spanned.token == expected {
            Ok(())
        } else {
            Err(SeekError::parse(
                spanned.offset,
                format!(
                    "expected {}, found {}",
                    describe(&expected),
                    describe(&spanned.token)
                ),
            ))
        }
    }

    fn offset(&self) -> usize {
        self.peek().map_or(self.end, |s| s.offset)
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(too_deep(self.offset()));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn peek_binary(&self) -> Option<BinaryOp> {
        match self.peek()?.token {
            Token::Op(op) => Some(op),
            _ => None,
        }
    }

    // Each parse method returns the node together with its tree height.
    fn expression(&mut self, min_precedence: u8) -> Result<(Expr, usize)> {
        self.enter()?;
        let (mut lhs, mut height) = self.unary()?;
        while let Some(op) = self.peek_binary() {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            let offset = self.offset();
            self.pos += 1;
            let (rhs, rhs_height) = self.expression(precedence + 1)?;
            height = height.max(rhs_height) + 1;
            if height > MAX_DEPTH {
                return Err(too_deep(offset));
            }
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        self.leave();
        Ok((lhs, height))
    }

    fn unary(&mut self) -> Result<(Expr, usize)> {
        let op = match self.peek().map(|s| &s.token) {
            Some(Token::Op(BinaryOp::Sub)) => Some(UnaryOp::Neg),
            Some(Token::Op(BinaryOp::Add)) => Some(UnaryOp::Plus),
            Some(Token::Bang) => Some(UnaryOp::Not),
            _ => None,
        };
        match op {
            Some(op) => {
                self.enter()?;
                self.pos += 1;
                let (operand, height) = self.unary()?;
                self.leave();
                Ok((Expr::Unary(op, Box::new(operand)), height + 1))
            }
            None => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<(Expr, usize)> {
        let Spanned { token, offset } = self.next()?;
        match token {
            Token::Number(n) => Ok((Expr::Number(n), 1)),
            Token::Ident("true") => Ok((Expr::Bool(true), 1)),
            Token::Ident("false") => Ok((Expr::Bool(false), 1)),
            Token::Ident("vals") => Ok((self.column()?, 1)),
            Token::Ident("abs") => {
                self.expect(Token::LParen)?;
                let (inner, height) = self.expression(1)?;
                self.expect(Token::RParen)?;
                if height + 1 > MAX_DEPTH {
                    return Err(too_deep(offset));
                }
                Ok((Expr::Abs(Box::new(inner)), height + 1))
            }
            Token::LParen => {
                let (inner, height) = self.expression(1)?;
                self.expect(Token::RParen)?;
                Ok((inner, height))
            }
            Token::Ident(name) => Err(SeekError::parse(
                offset,
                format!("unknown name `{}`", name),
            )),
            other => Err(SeekError::parse(
                offset,
                format!("unexpected {}", describe(&other)),
            )),
        }
    }

    fn column(&mut self) -> Result<Expr> {
        self.expect(Token::LBracket)?;
        let Spanned { token, offset } = self.next()?;
        let column = match token {
            Token::Number(n) if n.fract() == 0.0 && n >= 0.0 => n as usize,
            other => {
                return Err(SeekError::parse(
                    offset,
                    format!("expected a column number, found {}", describe(&other)),
                ))
            }
        };
        if column == 0 {
            return Err(SeekError::parse(offset, "columns are numbered from $1"));
        }
        self.expect(Token::RBracket)?;
        Ok(Expr::Column(column))
    }
}

fn describe(token: &Token<'_>) -> String {
    match token {
        Token::Number(n) => format!("number `{}`", n),
        Token::Ident(name) => format!("`{}`", name),
        Token::Op(op) => format!("`{}`", op),
        Token::Bang => "`!`".to_string(),
        Token::LParen => "`(`".to_string(),
        Token::RParen => "`)`".to_string(),
        Token::LBracket => "`[`".to_string(),
        Token::RBracket => "`]`".to_string(),
    }
}
