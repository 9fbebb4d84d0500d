//! Tokenizer for deploy step snippets

use crate::error::{ConfigResult, ConfigurationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident(String),
    Str(String),
    Int(i64),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Colon,
    Comma,
    Equals,
    /// Newline or `;`
    Separator,
    Eof,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("'{}'", name),
            TokenKind::Str(_) => "a string".to_string(),
            TokenKind::Int(_) => "a number".to_string(),
            TokenKind::LParen => "'('".to_string(),
            TokenKind::RParen => "')'".to_string(),
            TokenKind::LBracket => "'['".to_string(),
            TokenKind::RBracket => "']'".to_string(),
            TokenKind::Colon => "':'".to_string(),
            TokenKind::Comma => "','".to_string(),
            TokenKind::Equals => "'='".to_string(),
            TokenKind::Separator => "end of statement".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

pub(crate) fn syntax_error(line: usize, column: usize, message: impl Into<String>) -> ConfigurationError {
    ConfigurationError::Syntax {
        line,
        column,
        message: message.into(),
    }
}

struct Cursor<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl Cursor<'_> {
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }
}

pub(crate) fn tokenize(input: &str) -> ConfigResult<Vec<Token>> {
    let mut cursor = Cursor {
        chars: input.chars().peekable(),
        line: 1,
        column: 1,
    };
    let mut tokens = Vec::new();

    while let Some(c) = cursor.peek() {
        let (line, column) = (cursor.line, cursor.column);
        let push = |tokens: &mut Vec<Token>, kind| tokens.push(Token { kind, line, column });

        match c {
            ' ' | '\t' | '\r' => {
                cursor.bump();
            }
            '\n' | ';' => {
                cursor.bump();
                push(&mut tokens, TokenKind::Separator);
            }
            '/' => {
                cursor.bump();
                if cursor.peek() != Some('/') {
                    return Err(syntax_error(line, column, "unexpected '/'"));
                }
                while cursor.peek().is_some_and(|c| c != '\n') {
                    cursor.bump();
                }
            }
            '(' | ')' | '[' | ']' | ':' | ',' | '=' => {
                cursor.bump();
                let kind = match c {
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    '[' => TokenKind::LBracket,
                    ']' => TokenKind::RBracket,
                    ':' => TokenKind::Colon,
                    ',' => TokenKind::Comma,
                    _ => TokenKind::Equals,
                };
                push(&mut tokens, kind);
            }
            '\'' | '"' => {
                let text = read_string(&mut cursor, c)
                    .ok_or_else(|| syntax_error(line, column, "unterminated string"))?;
                push(&mut tokens, TokenKind::Str(text));
            }
            c if c.is_ascii_digit() || c == '-' => {
                let mut digits = String::new();
                digits.extend(cursor.bump());
                while cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
                    digits.extend(cursor.bump());
                }
                let value = digits
                    .parse::<i64>()
                    .map_err(|_| syntax_error(line, column, format!("invalid number '{}'", digits)))?;
                push(&mut tokens, TokenKind::Int(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = String::new();
                while cursor.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
                    name.extend(cursor.bump());
                }
                push(&mut tokens, TokenKind::Ident(name));
            }
            other => {
                return Err(syntax_error(line, column, format!("unexpected character '{}'", other)));
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        line: cursor.line,
        column: cursor.column,
    });
    Ok(tokens)
}

/// Reads a quoted string whose opening quote is at the cursor.
/// Returns `None` when the input ends before the closing quote.
fn read_string(cursor: &mut Cursor<'_>, quote: char) -> Option<String> {
    cursor.bump();
    let mut text = String::new();
    loop {
        match cursor.bump()? {
            c if c == quote => return Some(text),
            '\\' => match cursor.bump()? {
                'n' => text.push('\n'),
                't' => text.push('\t'),
                'r' => text.push('\r'),
                other => text.push(other),
            },
            '\n' => return None,
            c => text.push(c),
        }
    }
}
