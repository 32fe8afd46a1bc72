//! Recursive-descent parser producing the statement list of a script.

use super::lexer::{Token, TokenKind};
use crate::error::ScriptError;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign { name: String, value: Expr, line: usize },
    Expr { expr: Expr, line: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Number(f64),
    Str(String),
    Name(String),
    List(Vec<Expr>),
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: String,
        args: Vec<Arg>,
    },
}

/// A call argument, optionally passed by keyword.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub keyword: Option<String>,
    pub value: Expr,
}

/// Maximum height of an expression tree: prefix operators, brackets and
/// chained binary operators each add one level.
pub const MAX_NESTING: usize = 256;

/// Parses a token stream produced by [`super::lexer::tokenize`].
pub fn parse(tokens: &[Token]) -> Result<Vec<Stmt>, ScriptError> {
    Parser {
        tokens,
        pos: 0,
        depth: 0,
    }
    .program()
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    fn program(&mut self) -> Result<Vec<Stmt>, ScriptError> {
        let mut statements = Vec::new();
        loop {
            while self.check(&TokenKind::Newline) {
                self.advance();
            }
            if self.check(&TokenKind::Eof) {
                break;
            }
            statements.push(self.statement()?);
            if !self.check(&TokenKind::Newline) {
                return Err(self.error("expected end of statement"));
            }
        }
        Ok(statements)
    }

    fn statement(&mut self) -> Result<Stmt, ScriptError> {
        let line = self.peek().line;
        let assigned = match &self.peek().kind {
            TokenKind::Ident(name)
                if self.peek_at(1).is_some_and(|t| t.kind == TokenKind::Assign) =>
            {
                Some(name.clone())
            }
            _ => None,
        };
        if let Some(name) = assigned {
            self.advance();
            self.advance();
            let value = self.expression()?;
            return Ok(Stmt::Assign { name, value, line });
        }
        let expr = self.expression()?;
        Ok(Stmt::Expr { expr, line })
    }

    fn expression(&mut self) -> Result<Expr, ScriptError> {
        self.nested(Self::sum)
    }

    fn sum(&mut self) -> Result<Expr, ScriptError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.descend()?;
            let line = self.advance().line;
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs, line);
        }
    }

    fn term(&mut self) -> Result<Expr, ScriptError> {
        self.nested(Self::product)
    }

    fn product(&mut self) -> Result<Expr, ScriptError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            self.descend()?;
            let line = self.advance().line;
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs, line);
        }
    }

    fn unary(&mut self) -> Result<Expr, ScriptError> {
        self.nested(|parser| {
            parser.descend()?;
            parser.prefix()
        })
    }

    fn prefix(&mut self) -> Result<Expr, ScriptError> {
        match self.peek().kind {
            TokenKind::Minus => {
                let line = self.advance().line;
                let operand = self.unary()?;
                Ok(Expr {
                    kind: ExprKind::Neg(Box::new(operand)),
                    line,
                })
            }
            TokenKind::Plus => {
                self.advance();
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expr, ScriptError> {
        let token = self.advance().clone();
        let line = token.line;
        let kind = match token.kind {
            TokenKind::Number(n) => ExprKind::Number(n),
            TokenKind::Str(s) => ExprKind::Str(s),
            TokenKind::Ident(name) => {
                if self.check(&TokenKind::LParen) {
                    self.advance();
                    let args = self.arguments()?;
                    ExprKind::Call {
                        function: name,
                        args,
                    }
                } else {
                    ExprKind::Name(name)
                }
            }
            TokenKind::LParen => {
                let inner = self.expression()?;
                self.expect(&TokenKind::RParen, "expected ')'")?;
                return Ok(inner);
            }
            TokenKind::LBracket => {
                let mut items = Vec::new();
                while !self.check(&TokenKind::RBracket) {
                    items.push(self.expression()?);
                    if !self.check(&TokenKind::Comma) {
                        break;
                    }
                    self.advance();
                }
                self.expect(&TokenKind::RBracket, "expected ']'")?;
                ExprKind::List(items)
            }
            _ => {
                self.pos -= 1;
                return Err(self.error("expected an expression"));
            }
        };
        Ok(Expr { kind, line })
    }

    /// Parses `arg, arg, key=value, ...)` after the opening parenthesis.
    fn arguments(&mut self) -> Result<Vec<Arg>, ScriptError> {
        let mut args = Vec::new();
        while !self.check(&TokenKind::RParen) {
            let keyword = match &self.peek().kind {
                TokenKind::Ident(name)
                    if self.peek_at(1).is_some_and(|t| t.kind == TokenKind::Assign) =>
                {
                    Some(name.clone())
                }
                _ => None,
            };
            if keyword.is_some() {
                self.advance();
                self.advance();
            }
            if keyword.is_none() && args.iter().any(|a: &Arg| a.keyword.is_some()) {
                return Err(self.error("positional argument follows keyword argument"));
            }
            let value = self.expression()?;
            args.push(Arg { keyword, value });
            if !self.check(&TokenKind::Comma) {
                break;
            }
            self.advance();
        }
        self.expect(&TokenKind::RParen, "expected ')'")?;
        Ok(args)
    }

    /// Runs `parse` and restores the nesting depth it started at.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ScriptError>,
    ) -> Result<T, ScriptError> {
        let depth = self.depth;
        let result = parse(self);
        self.depth = depth;
        result
    }

    fn descend(&mut self) -> Result<(), ScriptError> {
        self.depth += 1;
        if self.depth > MAX_NESTING {
            return Err(self.error("expression nested too deeply"));
        }
        Ok(())
    }

    fn peek(&self) -> &Token {
        // the token stream always ends with Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        let index = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[index]
    }

    fn expect(&mut self, kind: &TokenKind, message: &str) -> Result<(), ScriptError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    fn error(&self, message: &str) -> ScriptError {
        let token = self.peek();
        ScriptError::Syntax {
            line: token.line,
            column: token.column,
            message: message.to_string(),
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr, line: usize) -> Expr {
    Expr {
        kind: ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        line,
    }
}
