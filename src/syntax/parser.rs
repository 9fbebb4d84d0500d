//! Parser for deploy step snippets
//!
//! Accepts the subset of the pipeline DSL the snippet generator emits, plus
//! adapter variables declared ahead of the step:
//!
//! ```text
//! def tc = tomcat8(url: 'http://ci:8080', credentialsId: 'tomcat')
//! deploy(adapters: [tc, workflowAdapter()], war: 'target/app.war')
//! ```
//!
//! The step itself may be written with or without parentheses.

use crate::error::ConfigResult;

use super::lexer::{syntax_error, tokenize, Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Call(Call),
    /// Reference to a `def` variable
    Var(Name),
}

/// An identifier with the position it was written at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    pub text: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub name: Name,
    pub args: Vec<(Name, Value)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// `def name = call(...)` statements, in source order
    pub bindings: Vec<(Name, Call)>,
    pub step: Call,
}

pub fn parse_script(input: &str) -> ConfigResult<Script> {
    let tokens = tokenize(input)?;
    Parser { tokens, pos: 0 }.script()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn next(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn unexpected<T>(&self, expected: &str) -> ConfigResult<T> {
        let token = self.peek();
        Err(syntax_error(
            token.line,
            token.column,
            format!("expected {}, found {}", expected, token.kind.describe()),
        ))
    }

    fn expect(&mut self, kind: TokenKind) -> ConfigResult<Token> {
        if self.peek().kind == kind {
            Ok(self.next())
        } else {
            self.unexpected(&kind.describe())
        }
    }

    fn name(&mut self) -> ConfigResult<Name> {
        match &self.peek().kind {
            TokenKind::Ident(text) => {
                let text = text.clone();
                let token = self.next();
                Ok(Name {
                    text,
                    line: token.line,
                    column: token.column,
                })
            }
            _ => self.unexpected("a name"),
        }
    }

    fn skip_separators(&mut self) {
        while self.peek().kind == TokenKind::Separator {
            self.next();
        }
    }

    fn script(mut self) -> ConfigResult<Script> {
        let mut bindings = Vec::new();
        let mut step = None;

        self.skip_separators();
        while self.peek().kind != TokenKind::Eof {
            let head = self.name()?;
            if head.text == "def" {
                let name = self.name()?;
                self.expect(TokenKind::Equals)?;
                let call_name = self.name()?;
                let call = self.paren_call(call_name)?;
                bindings.push((name, call));
            } else if step.is_some() {
                return Err(syntax_error(head.line, head.column, "only one step is allowed"));
            } else {
                step = Some(self.step(head)?);
            }

            match self.peek().kind {
                TokenKind::Separator => self.skip_separators(),
                TokenKind::Eof => {}
                _ => return self.unexpected("end of statement"),
            }
        }

        match step {
            Some(step) => Ok(Script { bindings, step }),
            None => {
                let end = self.peek();
                Err(syntax_error(end.line, end.column, "no step found"))
            }
        }
    }

    /// `name(args)` or the command form `name key: value, ...`
    fn step(&mut self, name: Name) -> ConfigResult<Call> {
        match self.peek().kind {
            TokenKind::LParen => self.paren_call(name),
            TokenKind::Separator | TokenKind::Eof => Ok(Call { name, args: Vec::new() }),
            _ => {
                let args = self.args(false)?;
                Ok(Call { name, args })
            }
        }
    }

    fn paren_call(&mut self, name: Name) -> ConfigResult<Call> {
        self.expect(TokenKind::LParen)?;
        self.skip_separators();
        let args = if self.peek().kind == TokenKind::RParen {
            Vec::new()
        } else {
            self.args(true)?
        };
        self.skip_separators();
        self.expect(TokenKind::RParen)?;
        Ok(Call { name, args })
    }

    /// Named arguments. Line breaks are only allowed inside parentheses.
    fn args(&mut self, nested: bool) -> ConfigResult<Vec<(Name, Value)>> {
        let mut args = Vec::new();
        loop {
            let key = self.name()?;
            self.expect(TokenKind::Colon)?;
            let value = self.value()?;
            args.push((key, value));

            if nested {
                self.skip_separators();
            }
            if self.peek().kind != TokenKind::Comma {
                return Ok(args);
            }
            self.next();
            if nested {
                self.skip_separators();
            }
        }
    }

    fn value(&mut self) -> ConfigResult<Value> {
        match self.peek().kind.clone() {
            TokenKind::Str(text) => {
                self.next();
                Ok(Value::Str(text))
            }
            TokenKind::Int(value) => {
                self.next();
                Ok(Value::Int(value))
            }
            TokenKind::LBracket => self.list(),
            TokenKind::Ident(text) if text == "true" || text == "false" => {
                self.next();
                Ok(Value::Bool(text == "true"))
            }
            TokenKind::Ident(_) => {
                let name = self.name()?;
                if self.peek().kind == TokenKind::LParen {
                    Ok(Value::Call(self.paren_call(name)?))
                } else {
                    Ok(Value::Var(name))
                }
            }
            _ => self.unexpected("a value"),
        }
    }

    fn list(&mut self) -> ConfigResult<Value> {
        self.expect(TokenKind::LBracket)?;
        let mut items = Vec::new();
        self.skip_separators();
        while self.peek().kind != TokenKind::RBracket {
            items.push(self.value()?);
            self.skip_separators();
            if self.peek().kind == TokenKind::Comma {
                self.next();
                self.skip_separators();
            } else if self.peek().kind != TokenKind::RBracket {
                return self.unexpected("',' or ']'");
            }
        }
        self.next();
        Ok(Value::List(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigurationError;

    fn names(args: &[(Name, Value)]) -> Vec<&str> {
        args.iter().map(|(n, _)| n.text.as_str()).collect()
    }

    #[test]
    fn command_form() {
        let script = parse_script("deploy adapters: [], war: 'app.war'").unwrap();
        assert_eq!(script.step.name.text, "deploy");
        assert_eq!(names(&script.step.args), vec!["adapters", "war"]);
        assert_eq!(script.step.args[0].1, Value::List(Vec::new()));
    }

    #[test]
    fn parenthesised_form_across_lines() {
        let script = parse_script(
            "deploy(\n  adapters: [workflowAdapter()],\n  war: \"target/app.war\",\n  onFailure: true\n)\n",
        )
        .unwrap();
        assert_eq!(names(&script.step.args), vec!["adapters", "war", "onFailure"]);
        assert_eq!(script.step.args[2].1, Value::Bool(true));
        match &script.step.args[0].1 {
            Value::List(items) => assert!(matches!(&items[0], Value::Call(c) if c.args.is_empty())),
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn def_bindings_are_collected() {
        let script = parse_script(
            "def gf = glassfish3(home: 'FAKE', adminPort: '1234')\ndeploy(adapters: [gf], war: 'a.war')",
        )
        .unwrap();
        assert_eq!(script.bindings.len(), 1);
        assert_eq!(script.bindings[0].0.text, "gf");
        assert_eq!(names(&script.bindings[0].1.args), vec!["home", "adminPort"]);
        match &script.step.args[0].1 {
            Value::List(items) => assert!(matches!(&items[0], Value::Var(n) if n.text == "gf")),
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn trailing_comma_in_list_is_accepted() {
        let script = parse_script("deploy adapters: [legacyAdapter(),], war: 'a.war'").unwrap();
        assert!(matches!(&script.step.args[0].1, Value::List(items) if items.len() == 1));
    }

    #[test]
    fn missing_colon_reports_position() {
        let err = parse_script("deploy war 'a.war'").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::Syntax {
                line: 1,
                column: 12,
                message: "expected ':', found a string".to_string(),
            }
        );
    }

    #[test]
    fn two_steps_are_rejected() {
        let err = parse_script("deploy war: 'a.war'\ndeploy war: 'b.war'").unwrap_err();
        assert!(matches!(err, ConfigurationError::Syntax { line: 2, column: 1, .. }));
    }

    #[test]
    fn empty_input_has_no_step() {
        let err = parse_script("\n\n").unwrap_err();
        assert!(matches!(err, ConfigurationError::Syntax { ref message, .. } if message == "no step found"));
    }
}
