/// Byte range into the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokKind {
    Eof,
    /// Lexing failed (unbalanced braces, open quote)
    Error(String),
    /// Command separator: newline or `;`
    Newline,
    /// Bare or double-quoted word, quotes and escapes resolved
    Word(String),
    /// Contents of a balanced `{...}` group, outer braces removed, verbatim
    Group(String),
}

#[derive(Debug, Clone)]
pub struct Tok {
    pub kind: TokKind,
    pub span: Span,
}
