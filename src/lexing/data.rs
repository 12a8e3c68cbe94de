use crate::error::SourceLoc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaToken<'a> {
    pub token: Token<'a>,
    pub span: Span<'a>,
    pub loc: SourceLoc,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Span<'a>(pub usize, pub &'a str);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Project,
    Track,
    Bar,
    Bpm,
    Time,
    Instrument,
    Copyright,
    Text,
    On,
    Beat,
    Play,
    Velocity,
    Whole,
    Half,
    Quarter,
    Th,
    Nd,
    Cymbal,
    Snare,
    OpenHiHat,
    LeftBrace,
    RightBrace,
    Semicolon,
    Num(&'a str),
    Float(&'a str),
    NoteName(&'a str),
    ChordName(&'a str),
    Ident(&'a str),
    Str(&'a str),
    Whitespace,
    Comment,
    Eof,
}

impl<'a> Token<'a> {
    pub fn readable_type(&self) -> &'static str {
        use self::Token::*;

        match *self {
            Project => "`project`",
            Track => "`track`",
            Bar => "`bar`",
            Bpm => "`bpm`",
            Time => "`time`",
            Instrument => "`instrument`",
            Copyright => "`copyright`",
            Text => "`text`",
            On => "`on`",
            Beat => "`beat`",
            Play => "`play`",
            Velocity => "`velocity`",
            Whole => "`whole`",
            Half => "`half`",
            Quarter => "`quarter`",
            Th => "`th`",
            Nd => "`nd`",
            Cymbal => "`cymbal`",
            Snare => "`snare`",
            OpenHiHat => "`open_hi_hat`",
            LeftBrace => "`{`",
            RightBrace => "`}`",
            Semicolon => "`;`",
            Num(_) => "<number>",
            Float(_) => "<number>",
            NoteName(_) => "<note>",
            ChordName(_) => "<chord>",
            Ident(_) => "<identifier>",
            Str(_) => "<string>",
            Whitespace => "<whitespace>",
            Comment => "<comment>",
            Eof => "end of input",
        }
    }
}
