use crate::token::{Span, Tok, TokKind};

/// Tokenizer for the Tcl settings dialect.
///
/// Only the subset that profile files use: words, double-quoted strings,
/// brace groups (kept verbatim, nesting tracked), `;`/newline separators and
/// `#` comments at the start of a command. No substitution is performed.
pub struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    at_command_start: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            at_command_start: true,
        }
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek2(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    fn span(&self, start: usize) -> Span {
        Span {
            start: start as u32,
            end: self.pos as u32,
        }
    }

    fn tok(&self, kind: TokKind, start: usize) -> Tok {
        Tok {
            kind,
            span: self.span(start),
        }
    }

    fn skip_blanks_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r') => {
                    self.bump();
                }
                // line continuation
                Some(b'\\') if matches!(self.peek2(), Some(b'\n')) => {
                    self.bump();
                    self.bump();
                }
                Some(b'#') if self.at_command_start => {
                    while let Some(b) = self.peek() {
                        if b == b'\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    pub fn next_tok(&mut self) -> Tok {
        self.skip_blanks_and_comments();
        let start = self.pos;
        let Some(b) = self.bump() else {
            return self.tok(TokKind::Eof, start);
        };

        let kind = match b {
            b'\n' | b';' => {
                self.at_command_start = true;
                return self.tok(TokKind::Newline, start);
            }
            b'{' => self.lex_group(start),
            b'}' => TokKind::Error(format!("unexpected '}}' at byte {}", start)),
            b'"' => self.lex_quoted(start),
            _ => {
                while let Some(p) = self.peek() {
                    if matches!(p, b' ' | b'\t' | b'\r' | b'\n' | b';') {
                        break;
                    }
                    self.bump();
                }
                TokKind::Word(self.src[start..self.pos].to_string())
            }
        };
        self.at_command_start = false;
        self.tok(kind, start)
    }

    fn lex_group(&mut self, start: usize) -> TokKind {
        let mut depth = 1usize;
        while let Some(b) = self.bump() {
            match b {
                b'\\' => {
                    self.bump();
                }
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return TokKind::Group(self.src[start + 1..self.pos - 1].to_string());
                    }
                }
                _ => {}
            }
        }
        TokKind::Error(format!("unterminated '{{' opened at byte {}", start))
    }

    fn lex_quoted(&mut self, start: usize) -> TokKind {
        let mut s = Vec::new();
        while let Some(b) = self.bump() {
            match b {
                b'"' => return TokKind::Word(String::from_utf8_lossy(&s).into_owned()),
                b'\\' => {
                    let Some(esc) = self.bump() else {
                        break;
                    };
                    s.push(match esc {
                        b'n' => b'\n',
                        b't' => b'\t',
                        other => other,
                    });
                }
                other => s.push(other),
            }
        }
        TokKind::Error(format!("unterminated '\"' opened at byte {}", start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokKind> {
        let mut lex = Lexer::new(src);
        let mut out = Vec::new();
        loop {
            let t = lex.next_tok();
            if t.kind == TokKind::Eof {
                return out;
            }
            out.push(t.kind);
        }
    }

    fn word(s: &str) -> TokKind {
        TokKind::Word(s.to_string())
    }

    #[test]
    fn words_and_separators() {
        assert_eq!(
            kinds("espresso_pressure 9.0\npreinfusion_time 5; x y"),
            vec![
                word("espresso_pressure"),
                word("9.0"),
                TokKind::Newline,
                word("preinfusion_time"),
                word("5"),
                TokKind::Newline,
                word("x"),
                word("y"),
            ]
        );
    }

    #[test]
    fn nested_groups_are_kept_verbatim() {
        assert_eq!(
            kinds("advanced_shot {{name a} {name {b c}}}"),
            vec![
                word("advanced_shot"),
                TokKind::Group("{name a} {name {b c}}".to_string()),
            ]
        );
    }

    #[test]
    fn groups_span_lines() {
        assert_eq!(
            kinds("profile_notes {line one\n  line two}"),
            vec![
                word("profile_notes"),
                TokKind::Group("line one\n  line two".to_string()),
            ]
        );
    }

    #[test]
    fn quoted_strings_resolve_escapes() {
        assert_eq!(kinds(r#"author "Jo \"J\" Doe""#), vec![word("author"), word("Jo \"J\" Doe")]);
    }

    #[test]
    fn comments_only_at_command_start() {
        assert_eq!(
            kinds("# header\nkey #notacomment"),
            vec![TokKind::Newline, word("key"), word("#notacomment")]
        );
    }

    #[test]
    fn unbalanced_braces_are_errors() {
        assert!(matches!(kinds("a {b c")[1], TokKind::Error(ref m) if m.contains("unterminated")));
        assert!(matches!(kinds("}")[0], TokKind::Error(ref m) if m.contains("unexpected")));
    }

    #[test]
    fn non_ascii_text_survives() {
        assert_eq!(
            kinds("profile_title {Café crème}"),
            vec![word("profile_title"), TokKind::Group("Café crème".to_string())]
        );
    }

    #[test]
    fn escaped_brace_does_not_close_group() {
        assert_eq!(kinds(r"{a \} b}"), vec![TokKind::Group(r"a \} b".to_string())]);
    }
}
