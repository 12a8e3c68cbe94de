use std::fmt::{Display, Error, Formatter};

use crate::error::{self, SourceLoc};
use crate::lexing::data::MetaToken;
use crate::theory::TheoryError;

#[derive(Debug, PartialEq)]
pub struct ParsingError {
    pub loc: SourceLoc,
    pub error: ErrorType,
}

#[derive(Debug, PartialEq)]
pub enum ErrorType {
    UnexpectedToken {
        token: String,
        context: &'static str,
        expected: String,
    },

    UnexpectedEof {
        context: &'static str,
        expected: String,
    },

    NoSuchBeat {
        beat: String,
    },

    NoTimeSignature,

    InvalidTimeSignature {
        beats: String,
        subdivision: String,
    },

    InvalidDuration {
        value: String,
    },

    InvalidVelocity {
        value: String,
    },

    UnknownInstrument {
        name: String,
    },

    UnresolvablePitch {
        error: TheoryError,
    },
}

impl Display for ParsingError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        use self::ErrorType::*;

        let error_message = match self.error {
            UnexpectedToken {
                ref token,
                context,
                ref expected,
            } => format!(
                "Unexpected token `{}` {}. Expected {}.",
                token, context, expected
            ),

            UnexpectedEof {
                context,
                ref expected,
            } => format!("Unexpected end of input {}. Expected {}.", context, expected),

            NoSuchBeat { ref beat } => format!("No such beat: `{}`.", beat),

            NoTimeSignature => "No time signature is in effect here.".to_owned(),

            InvalidTimeSignature {
                ref beats,
                ref subdivision,
            } => format!(
                "`{} {}` is not a valid time signature. The subdivision unit must be a power of two no greater than 128.",
                beats, subdivision
            ),

            InvalidDuration { ref value } => format!(
                "`{}` is not a valid note length. Expected 8, 16, 32, 64, 128 or 256.",
                value
            ),

            InvalidVelocity { ref value } => format!(
                "Velocity `{}` is out of range. Velocities must be between 0 and 255.",
                value
            ),

            UnknownInstrument { ref name } => format!("Unknown instrument `{}`.", name),

            UnresolvablePitch { ref error } => format!("{}", error),
        };

        error::fmt_error(
            f,
            &error_message,
            self.loc.info.filename(),
            self.loc.cause_line(),
            self.loc.line,
            self.loc.col,
            self.loc.width,
        )
    }
}

impl std::error::Error for ParsingError {}

impl ParsingError {
    /// A syntax error at `meta`: reports the offending literal (or the
    /// token's readable type when the literal is blank) against what the
    /// grammar expected there. End of input gets its own wording.
    pub fn unexpected(meta: &MetaToken, context: &'static str, expected: String) -> ParsingError {
        use crate::lexing::data::Token;

        if meta.token == Token::Eof {
            return ParsingError {
                loc: meta.loc.clone(),
                error: ErrorType::UnexpectedEof { context, expected },
            };
        }

        let text = meta.span.1.to_owned();
        let text = if text.trim().is_empty() {
            meta.token.readable_type().into()
        } else {
            text
        };

        ParsingError {
            loc: meta.loc.clone(),
            error: ErrorType::UnexpectedToken {
                token: text,
                context,
                expected,
            },
        }
    }

    pub fn rejected(meta: &MetaToken, error: ErrorType) -> ParsingError {
        ParsingError {
            loc: meta.loc.clone(),
            error,
        }
    }
}
