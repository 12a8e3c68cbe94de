pub mod error;
pub mod instruments;
pub mod lexing;
pub mod parsing;
pub mod theory;

pub use crate::error::CompileError;
pub use crate::parsing::data::{Bar, Chord, Note, Playable, Project, Signature, Track};

/// Compiles a source text into its score tree. The optional filename is
/// only used to label diagnostics.
pub fn compile(source: &str, filename: Option<&str>) -> Result<Project, CompileError> {
    let tokens = lexing::lex(source, filename)?;
    let project = parsing::parse(&tokens)?;

    Ok(project)
}
