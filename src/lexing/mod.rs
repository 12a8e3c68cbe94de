pub mod data;
pub mod error;

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{SourceInfo, SourceLoc};

use self::data::*;
use self::error::{ErrorType, LexingError};

fn line_col_at(source: &str, position: usize) -> (usize, usize) {
    let mut bytes = 0;
    for (line_no, line) in source.lines().enumerate() {
        if position >= bytes && position < bytes + line.len() + 1 {
            return (line_no + 1, position - bytes + 1);
        }
        bytes += line.len() + 1;
    }
    (source.lines().count() + 1, 1)
}

pub fn lex<'a>(source: &'a str, filename: Option<&str>) -> Result<Vec<MetaToken<'a>>, LexingError> {
    let info = SourceInfo::new(source, filename);

    let mut tokens = Vec::new();

    const CAPTURE_PRIORITIES: &[&str] = &[
        "string",
        "float",
        "number",
        "word",
        "delim",
        "comment",
        "whitespace",
        "error",
    ];

    for capture in LEXER_REGEX.captures_iter(source) {
        let mut group = None;

        for group_name in CAPTURE_PRIORITIES {
            if let Some(m) = capture.name(group_name) {
                group = group.or(Some((group_name, m)));
            }
        }

        let (group_name, m) = match group {
            Some((name, m)) => (*name, m),
            None => unreachable!("lexer regex produced an empty capture"),
        };

        let text = m.as_str();
        let (line, col) = line_col_at(source, m.start());
        let loc = SourceLoc {
            line,
            col,
            width: text.len(),
            info: info.clone(),
        };
        let span = Span(m.start(), text);

        let token = match group_name {
            "string" => Token::Str(&text[1..(text.len() - 1)]),
            "float" => Token::Float(text),
            "number" => Token::Num(text),
            "word" => classify_word(text),
            "delim" => match text {
                "{" => Token::LeftBrace,
                "}" => Token::RightBrace,
                ";" => Token::Semicolon,
                _ => unreachable!(),
            },
            "comment" => Token::Comment,
            "whitespace" => Token::Whitespace,
            "error" => {
                return Err(LexingError {
                    loc,
                    error: ErrorType::UnexpectedCharacter {
                        text: text.to_owned(),
                    },
                })
            }
            _ => unreachable!(),
        };

        tokens.push(MetaToken { token, span, loc });
    }

    let (line, col) = line_col_at(source, source.len());
    tokens.push(MetaToken {
        token: Token::Eof,
        span: Span(source.len(), ""),
        loc: SourceLoc {
            line,
            col,
            width: 0,
            info,
        },
    });

    Ok(tokens)
}

// Keywords are case-insensitive. A non-keyword word is a note name if it
// carries a register, a chord name if it starts on a scale letter, and a
// plain identifier otherwise.
fn classify_word(text: &str) -> Token {
    match text.to_ascii_lowercase().as_str() {
        "project" => Token::Project,
        "track" => Token::Track,
        "bar" => Token::Bar,
        "bpm" => Token::Bpm,
        "time" => Token::Time,
        "instrument" => Token::Instrument,
        "copyright" => Token::Copyright,
        "text" => Token::Text,
        "on" => Token::On,
        "beat" => Token::Beat,
        "play" => Token::Play,
        "velocity" => Token::Velocity,
        "whole" => Token::Whole,
        "half" => Token::Half,
        "quarter" => Token::Quarter,
        "th" => Token::Th,
        "nd" => Token::Nd,
        "cymbal" => Token::Cymbal,
        "snare" => Token::Snare,
        "open_hi_hat" => Token::OpenHiHat,
        _ if NOTE_PATTERN.is_match(text) => Token::NoteName(text),
        _ if CHORD_PATTERN.is_match(text) => Token::ChordName(text),
        _ => Token::Ident(text),
    }
}

lazy_static! {
    static ref LEXER_REGEX: Regex = Regex::new(
        "\
        (?P<string>\"((\\\\\")|[^\"])*\")|\
        (?P<float>\\d+\\.\\d+)|\
        (?P<number>\\d+)|\
        (?P<word>[A-Za-z_][A-Za-z0-9_#]*)|\
        (?P<delim>[{};])|\
        (?P<comment>//[^\n]*)|\
        (?P<whitespace>\\s+)|\
        (?P<error>.)\
        "
    )
    .expect("invalid lexer regex");
    static ref NOTE_PATTERN: Regex =
        Regex::new("^[A-Ga-g][#b]?\\d{1,2}$").expect("invalid note pattern");
    static ref CHORD_PATTERN: Regex =
        Regex::new("^[A-Ga-g][#b]?[A-Za-z0-9]*$").expect("invalid chord pattern");
}
