//! Command grammar over the Tcl token stream.
//!
//! ```text
//! script  := (command? SEP)* command?
//! command := arg arg*
//! arg     := WORD | GROUP
//! ```
//!
//! Brace groups stay unparsed text. Callers re-enter the grammar on a group's
//! contents when it holds nested structure (the `advanced_shot` phase list).

use crate::error::ConvertError;
use crate::lexer::Lexer;
use crate::token::{Span, Tok, TokKind};

/// One argument of a command.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Word(String),
    Group(String),
}

impl Arg {
    pub fn text(&self) -> &str {
        match self {
            Arg::Word(s) | Arg::Group(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub name: String,
    pub args: Vec<Arg>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    pub commands: Vec<Command>,
}

impl Script {
    /// First argument of the first command called `key`.
    pub fn get(&self, key: &str) -> Option<&Arg> {
        self.commands
            .iter()
            .find(|c| c.name == key && !c.args.is_empty())
            .map(|c| &c.args[0])
    }
}

pub fn parse_script(src: &str) -> Result<Script, ConvertError> {
    let mut p = Parser::new(src);
    p.parse_script()
}

/// Flatten `src` into consecutive `key value` pairs, ignoring separators.
///
/// Braces are dropped from both halves of a pair, so `{exit_if} {1}` reads
/// the same as `exit_if 1`. A trailing key with no value is discarded.
pub fn parse_pairs(src: &str) -> Result<Vec<(String, String)>, ConvertError> {
    let mut p = Parser::new(src);
    let mut args = Vec::new();
    while let Some(arg) = p.next_arg()? {
        args.push(strip_braces(arg.text()));
    }
    let mut pairs = Vec::with_capacity(args.len() / 2);
    let mut it = args.into_iter();
    while let (Some(k), Some(v)) = (it.next(), it.next()) {
        pairs.push((k, v));
    }
    Ok(pairs)
}

/// Contents of every top-level brace group in `src`, in order.
pub fn parse_groups(src: &str) -> Result<Vec<String>, ConvertError> {
    let mut p = Parser::new(src);
    let mut groups = Vec::new();
    while let Some(arg) = p.next_arg()? {
        match arg {
            Arg::Group(s) => groups.push(s),
            Arg::Word(w) => tracing::debug!(word = %w, "ignoring bare word between groups"),
        }
    }
    Ok(groups)
}

fn strip_braces(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '{' | '}')).collect()
}

struct Parser<'a> {
    lex: Lexer<'a>,
    cur: Tok,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        let mut lex = Lexer::new(src);
        let cur = lex.next_tok();
        Self { lex, cur }
    }

    fn bump(&mut self) {
        self.cur = self.lex.next_tok();
    }

    fn error(&self, message: &str) -> ConvertError {
        ConvertError::Syntax {
            message: message.to_string(),
            offset: self.cur.span.start as usize,
        }
    }

    /// Next word or group, skipping separators. `None` at end of input.
    fn next_arg(&mut self) -> Result<Option<Arg>, ConvertError> {
        loop {
            let arg = match &self.cur.kind {
                TokKind::Eof => return Ok(None),
                TokKind::Error(msg) => return Err(self.error(msg)),
                TokKind::Newline => None,
                TokKind::Word(s) => Some(Arg::Word(s.clone())),
                TokKind::Group(s) => Some(Arg::Group(s.clone())),
            };
            self.bump();
            if arg.is_some() {
                return Ok(arg);
            }
        }
    }

    fn parse_script(&mut self) -> Result<Script, ConvertError> {
        let mut commands = Vec::new();
        loop {
            match &self.cur.kind {
                TokKind::Eof => break,
                TokKind::Newline => self.bump(),
                _ => commands.push(self.parse_command()?),
            }
        }
        Ok(Script { commands })
    }

    fn parse_command(&mut self) -> Result<Command, ConvertError> {
        let start = self.cur.span.start;
        let mut end = self.cur.span.end;
        let mut words = Vec::new();
        loop {
            let arg = match &self.cur.kind {
                TokKind::Eof | TokKind::Newline => break,
                TokKind::Error(msg) => return Err(self.error(msg)),
                TokKind::Word(s) => Arg::Word(s.clone()),
                TokKind::Group(s) => Arg::Group(s.clone()),
            };
            end = self.cur.span.end;
            words.push(arg);
            self.bump();
        }
        let mut words = words.into_iter();
        let name = words
            .next()
            .map(|a| a.text().to_string())
            .ok_or_else(|| self.error("expected a command name"))?;
        Ok(Command {
            name,
            args: words.collect(),
            span: Span { start, end },
        })
    }
}
