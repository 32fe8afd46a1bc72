//! Tokenizer for diagram scripts.

use crate::error::ScriptError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Str(String),
    Ident(String),
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    /// End of a statement: a newline or `;` outside any brackets.
    Newline,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

/// Splits `source` into tokens.
///
/// Newlines inside `(...)` or `[...]` are insignificant, so long argument
/// lists may span several lines. `#` starts a comment running to end of line.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ScriptError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
    depth: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
            depth: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, ScriptError> {
        while let Some(&ch) = self.chars.peek() {
            let (line, column) = (self.line, self.column);
            match ch {
                '\n' | ';' => {
                    self.bump();
                    if ch == ';' || self.depth == 0 {
                        self.push(TokenKind::Newline, line, column);
                    }
                }
                c if c.is_whitespace() => {
                    self.bump();
                }
                '#' => {
                    while self.chars.peek().is_some_and(|&c| c != '\n') {
                        self.bump();
                    }
                }
                '0'..='9' | '.' => {
                    let number = self.number(line, column)?;
                    self.push(TokenKind::Number(number), line, column);
                }
                '"' | '\'' => {
                    let text = self.string(ch, line, column)?;
                    self.push(TokenKind::Str(text), line, column);
                }
                c if c.is_alphabetic() || c == '_' => {
                    let mut ident = String::new();
                    while let Some(&c) = self.chars.peek() {
                        if c.is_alphanumeric() || c == '_' {
                            ident.push(c);
                            self.bump();
                        } else {
                            break;
                        }
                    }
                    self.push(TokenKind::Ident(ident), line, column);
                }
                _ => {
                    self.bump();
                    let kind = match ch {
                        '=' => TokenKind::Assign,
                        '+' => TokenKind::Plus,
                        '-' => TokenKind::Minus,
                        '*' => TokenKind::Star,
                        '/' => TokenKind::Slash,
                        ',' => TokenKind::Comma,
                        '(' | '[' => {
                            self.depth += 1;
                            if ch == '(' {
                                TokenKind::LParen
                            } else {
                                TokenKind::LBracket
                            }
                        }
                        ')' | ']' => {
                            self.depth = self.depth.saturating_sub(1);
                            if ch == ')' {
                                TokenKind::RParen
                            } else {
                                TokenKind::RBracket
                            }
                        }
                        other => {
                            return Err(syntax(line, column, format!("unexpected character '{other}'")));
                        }
                    };
                    self.push(kind, line, column);
                }
            }
        }

        let (line, column) = (self.line, self.column);
        self.push(TokenKind::Newline, line, column);
        self.push(TokenKind::Eof, line, column);
        Ok(self.tokens)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn push(&mut self, kind: TokenKind, line: usize, column: usize) {
        self.tokens.push(Token { kind, line, column });
    }

    fn number(&mut self, line: usize, column: usize) -> Result<f64, ScriptError> {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            let exponent_sign = (c == '-' || c == '+') && text.ends_with(|e| e == 'e' || e == 'E');
            if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || exponent_sign {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        text.parse::<f64>()
            .map_err(|_| syntax(line, column, format!("invalid number '{text}'")))
    }

    fn string(&mut self, quote: char, line: usize, column: usize) -> Result<String, ScriptError> {
        self.bump();
        let mut text = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => {
                    return Err(syntax(line, column, "unterminated string literal"));
                }
                Some(c) if c == quote => return Ok(text),
                Some('\\') => match self.bump() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some(c @ ('\\' | '"' | '\'')) => text.push(c),
                    Some(c) => {
                        text.push('\\');
                        text.push(c);
                    }
                    None => return Err(syntax(line, column, "unterminated string literal")),
                },
                Some(c) => text.push(c),
            }
        }
    }
}

fn syntax(line: usize, column: usize, message: impl Into<String>) -> ScriptError {
    ScriptError::Syntax {
        line,
        column,
        message: message.into(),
    }
}
