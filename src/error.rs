use std::fmt::{Error, Formatter};
use std::sync::Arc;

use thiserror::Error as ThisError;

use crate::lexing::error::LexingError;
use crate::parsing::error::ParsingError;

/// Any failure produced by `compile`: either the source failed to lex or
/// the token stream failed to parse.
#[derive(Debug, ThisError)]
pub enum CompileError {
    #[error(transparent)]
    Lexing(#[from] LexingError),

    #[error(transparent)]
    Parsing(#[from] ParsingError),
}

pub type SourceInfoPtr = Arc<SourceInfo>;

#[derive(Debug)]
pub struct SourceInfo {
    pub filename: Option<String>,
    pub source: String,
    pub lines: Vec<String>,
}

impl SourceInfo {
    pub fn new(source: &str, filename: Option<&str>) -> SourceInfoPtr {
        let filename = filename.map(str::to_owned);
        let source = source.to_owned();
        let lines = source.lines().map(str::to_owned).collect();

        Arc::new(SourceInfo {
            filename,
            source,
            lines,
        })
    }

    pub fn filename(&self) -> &str {
        self.filename
            .as_ref()
            .map(AsRef::as_ref)
            .unwrap_or("<stdin>")
    }
}

#[derive(Debug, Clone)]
pub struct SourceLoc {
    pub line: usize,
    pub col: usize,
    pub width: usize,
    pub info: SourceInfoPtr,
}

impl SourceLoc {
    pub fn cause_line(&self) -> &str {
        self.info
            .lines
            .get(self.line - 1)
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl PartialEq for SourceLoc {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line && self.col == other.col && Arc::ptr_eq(&self.info, &other.info)
    }
}

impl Eq for SourceLoc {}

pub fn fmt_error(
    f: &mut Formatter,
    message: &str,
    filename: &str,
    context: &str,
    line: usize,
    col: usize,
    width: usize,
) -> Result<(), Error> {
    use ansi_term::Color;

    let red = Color::Fixed(9).bold();
    let blue = Color::Fixed(12).bold();
    let white = Color::Fixed(15).bold();

    let line_prefix = format!("{} |    ", line);
    let underline = format!(
        "{: >indent$}{}",
        "",
        "^".repeat(width.max(1)),
        indent = col + line_prefix.len() - 1
    );

    writeln!(
        f,
        "{}: {}\n   {}: {}:{}:{}\n\n{}{}\n{}",
        red.paint("error"),
        white.paint(message),
        blue.paint("in"),
        filename,
        line,
        col,
        blue.paint(line_prefix),
        context,
        red.paint(underline)
    )
}
