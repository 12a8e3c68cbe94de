pub mod data;
pub mod error;

use std::slice::Iter;

use crate::instruments;
use crate::lexing::data::{MetaToken, Token};
use crate::theory;

use self::data::*;
use self::error::{ErrorType, ParsingError};

/// Parses a complete token stream into a `Project`. The stream must end
/// with an EOF token; anything left over after the closing brace of the
/// project block is an error.
pub fn parse(tokens: &[MetaToken]) -> Result<Project, ParsingError> {
    assert_eq!(
        tokens.last().map(|meta| meta.token),
        Some(Token::Eof),
        "missing EOF from token stream",
    );

    let mut scanner = Scanner::new(tokens);
    parse_project(&mut scanner)
}

// One token of lookahead over the lexed stream: `scan` yields the next
// non-trivia token, `unscan` pushes a single token back so the next
// `scan` re-presents it.
struct Scanner<'t> {
    iter: Iter<'t, MetaToken<'t>>,
    buffer: Option<&'t MetaToken<'t>>,
    eof: &'t MetaToken<'t>,
}

impl<'t> Scanner<'t> {
    fn new(tokens: &'t [MetaToken<'t>]) -> Scanner<'t> {
        let eof = match tokens.last() {
            Some(meta) => meta,
            None => unreachable!("token streams always contain at least an EOF"),
        };

        Scanner {
            iter: tokens.iter(),
            buffer: None,
            eof,
        }
    }

    fn scan(&mut self) -> &'t MetaToken<'t> {
        if let Some(meta) = self.buffer.take() {
            return meta;
        }

        loop {
            match self.iter.next() {
                Some(meta) if matches!(meta.token, Token::Whitespace | Token::Comment) => continue,
                Some(meta) => return meta,
                None => return self.eof,
            }
        }
    }

    fn unscan(&mut self, meta: &'t MetaToken<'t>) {
        debug_assert!(self.buffer.is_none(), "only one token of pushback");
        self.buffer = Some(meta);
    }
}

fn expect_token(
    scanner: &mut Scanner,
    token: Token,
    context: &'static str,
) -> Result<(), ParsingError> {
    let meta = scanner.scan();
    if meta.token == token {
        Ok(())
    } else {
        Err(ParsingError::unexpected(
            meta,
            context,
            token.readable_type().to_owned(),
        ))
    }
}

fn parse_name(scanner: &mut Scanner, context: &'static str) -> Result<String, ParsingError> {
    let meta = scanner.scan();
    match meta.token {
        Token::Ident(name)
        | Token::Str(name)
        | Token::NoteName(name)
        | Token::ChordName(name) => Ok(name.to_owned()),
        _ => Err(ParsingError::unexpected(meta, context, "a name".to_owned())),
    }
}

fn parse_project(scanner: &mut Scanner) -> Result<Project, ParsingError> {
    expect_token(scanner, Token::Project, "at top level")?;
    let name = parse_name(scanner, "after `project`")?;
    expect_token(scanner, Token::LeftBrace, "at `project`")?;

    let mut project = Project {
        name,
        ..Default::default()
    };

    // The statement loop consumes the project's closing brace itself.
    loop {
        let meta = scanner.scan();
        match meta.token {
            Token::RightBrace => break,
            Token::Bpm => project.bpm = Some(parse_bpm(scanner)?),
            Token::Time => project.signature = Some(parse_time_signature(scanner)?),
            Token::Track => {
                let track = parse_track(scanner, &project)?;
                project.tracks.push(track);
            }
            Token::Copyright => {
                let text = parse_string_stmt(scanner, "after `copyright`")?;
                project.copyrights.push(text);
            }
            Token::Text => {
                let text = parse_string_stmt(scanner, "after `text`")?;
                project.texts.push(text);
            }
            _ => {
                return Err(ParsingError::unexpected(
                    meta,
                    "in `project`",
                    "`bpm`, `time`, `track`, `copyright`, `text` or `}`".to_owned(),
                ))
            }
        }
    }

    let meta = scanner.scan();
    match meta.token {
        Token::Eof => Ok(project),
        _ => Err(ParsingError::unexpected(
            meta,
            "after `project`",
            "end of input".to_owned(),
        )),
    }
}

fn parse_track(scanner: &mut Scanner, project: &Project) -> Result<Track, ParsingError> {
    let name = parse_name(scanner, "after `track`")?;

    let mut track = Track {
        name,
        bpm: project.bpm,
        signature: project.signature,
        ..Default::default()
    };

    expect_token(scanner, Token::LeftBrace, "at `track`")?;

    loop {
        let meta = scanner.scan();
        match meta.token {
            Token::RightBrace => break,
            // Syntax-checked only; the track keeps the bpm and signature
            // it inherited from the project at creation.
            Token::Bpm => {
                parse_bpm(scanner)?;
            }
            Token::Time => {
                parse_time_signature(scanner)?;
            }
            Token::Bar => {
                let bar = parse_bar(scanner, &track)?;
                track.bars.push(bar);
            }
            Token::Instrument => track.instrument = Some(parse_instrument(scanner)?),
            Token::Copyright => {
                let text = parse_string_stmt(scanner, "after `copyright`")?;
                track.copyrights.push(text);
            }
            Token::Text => {
                let text = parse_string_stmt(scanner, "after `text`")?;
                track.texts.push(text);
            }
            _ => {
                return Err(ParsingError::unexpected(
                    meta,
                    "in `track`",
                    "`bpm`, `time`, `bar`, `copyright`, `instrument`, `text` or `}`".to_owned(),
                ))
            }
        }
    }

    Ok(track)
}

fn parse_bar(scanner: &mut Scanner, track: &Track) -> Result<Bar, ParsingError> {
    let mut bar = Bar {
        offset: track.bars.len() as u32,
        bpm: track.bpm,
        signature: track.signature,
        ..Default::default()
    };

    expect_token(scanner, Token::LeftBrace, "at `bar`")?;

    loop {
        let meta = scanner.scan();
        match meta.token {
            Token::RightBrace => break,
            // As with tracks: parsed, then discarded.
            Token::Bpm => {
                parse_bpm(scanner)?;
            }
            Token::Time => {
                parse_time_signature(scanner)?;
            }
            Token::Text => {
                let text = parse_string_stmt(scanner, "after `text`")?;
                bar.texts.push(text);
            }
            Token::On => parse_on(scanner, &mut bar, meta)?,
            _ => {
                return Err(ParsingError::unexpected(
                    meta,
                    "in `bar`",
                    "`bpm`, `time`, `text`, `on` or `}`".to_owned(),
                ))
            }
        }
    }

    Ok(bar)
}

fn parse_bpm(scanner: &mut Scanner) -> Result<f64, ParsingError> {
    let meta = scanner.scan();
    let bpm = match meta.token {
        Token::Num(literal) | Token::Float(literal) => literal
            .parse::<f64>()
            .map_err(|_| ParsingError::unexpected(meta, "after `bpm`", "a number".to_owned()))?,
        _ => {
            return Err(ParsingError::unexpected(
                meta,
                "after `bpm`",
                "a number".to_owned(),
            ))
        }
    };

    expect_token(scanner, Token::Semicolon, "after `bpm`")?;

    Ok(bpm)
}

fn parse_time_signature(scanner: &mut Scanner) -> Result<Signature, ParsingError> {
    let beats_meta = scanner.scan();
    let beats_literal = match beats_meta.token {
        Token::Num(literal) => literal,
        _ => {
            return Err(ParsingError::unexpected(
                beats_meta,
                "after `time`",
                "a number".to_owned(),
            ))
        }
    };

    let unit_meta = scanner.scan();
    let unit_literal = match unit_meta.token {
        Token::Num(literal) => literal,
        _ => {
            return Err(ParsingError::unexpected(
                unit_meta,
                "after `time`",
                "a number".to_owned(),
            ))
        }
    };

    expect_token(scanner, Token::Semicolon, "after `time`")?;

    let beats = beats_literal.parse::<u8>().ok();
    let unit = unit_literal.parse::<u8>().ok();

    beats
        .zip(unit)
        .and_then(|(beats, unit)| Signature::new(beats, unit))
        .ok_or_else(|| {
            ParsingError::rejected(
                beats_meta,
                ErrorType::InvalidTimeSignature {
                    beats: beats_literal.to_owned(),
                    subdivision: unit_literal.to_owned(),
                },
            )
        })
}

fn parse_string_stmt(scanner: &mut Scanner, context: &'static str) -> Result<String, ParsingError> {
    let text = parse_name(scanner, context)?;
    expect_token(scanner, Token::Semicolon, context)?;
    Ok(text)
}

fn parse_instrument(scanner: &mut Scanner) -> Result<String, ParsingError> {
    let meta = scanner.scan();
    let name = match meta.token {
        Token::Ident(name)
        | Token::Str(name)
        | Token::NoteName(name)
        | Token::ChordName(name) => name.to_owned(),
        _ => {
            return Err(ParsingError::unexpected(
                meta,
                "after `instrument`",
                "an instrument name".to_owned(),
            ))
        }
    };

    expect_token(scanner, Token::Semicolon, "after `instrument`")?;

    instruments::lookup_program(&name)
        .map_err(|_| ParsingError::rejected(meta, ErrorType::UnknownInstrument { name: name.clone() }))?;

    Ok(name)
}

fn parse_on(scanner: &mut Scanner, bar: &mut Bar, on_meta: &MetaToken) -> Result<(), ParsingError> {
    let signature = bar
        .signature
        .ok_or_else(|| ParsingError::rejected(on_meta, ErrorType::NoTimeSignature))?;

    let meta = scanner.scan();
    let (beat, delta) = match meta.token {
        Token::Num(literal) => {
            let beat = literal
                .parse::<u64>()
                .ok()
                .filter(|&beat| beat != 0 && beat <= u64::from(signature.beats_per_bar))
                .ok_or_else(|| no_such_beat(meta, literal))?;
            (beat as u8, 0.0)
        }
        Token::Float(literal) => {
            let value = literal
                .parse::<f64>()
                .map_err(|_| no_such_beat(meta, literal))?;
            let beat = value.trunc();
            if beat < 1.0 || beat > f64::from(signature.beats_per_bar) {
                return Err(no_such_beat(meta, literal));
            }
            (beat as u8, value.fract())
        }
        _ => {
            return Err(ParsingError::unexpected(
                meta,
                "after `on`",
                "a beat number".to_owned(),
            ))
        }
    };

    expect_token(scanner, Token::Play, "after the beat number")?;

    let duration = parse_duration(scanner)?;

    parse_events(scanner, bar, signature, duration, beat, delta)
}

fn no_such_beat(meta: &MetaToken, literal: &str) -> ParsingError {
    ParsingError::rejected(
        meta,
        ErrorType::NoSuchBeat {
            beat: literal.to_owned(),
        },
    )
}

// whole/half/quarter are keywords; the finer codes are a number plus an
// ordinal suffix, and 32 takes `nd` where every other code takes `th`.
fn parse_duration(scanner: &mut Scanner) -> Result<u16, ParsingError> {
    let meta = scanner.scan();
    match meta.token {
        Token::Whole => Ok(1),
        Token::Half => Ok(2),
        Token::Quarter => Ok(4),
        Token::Num(literal) => {
            let value = literal
                .parse::<u16>()
                .ok()
                .filter(|&value| matches!(value, 8 | 16 | 32 | 64 | 128 | 256))
                .ok_or_else(|| {
                    ParsingError::rejected(
                        meta,
                        ErrorType::InvalidDuration {
                            value: literal.to_owned(),
                        },
                    )
                })?;

            let suffix = scanner.scan();
            let expected = if value == 32 { Token::Nd } else { Token::Th };
            if suffix.token != expected {
                return Err(ParsingError::unexpected(
                    suffix,
                    "after a note length",
                    expected.readable_type().to_owned(),
                ));
            }

            Ok(value)
        }
        _ => Err(ParsingError::unexpected(
            meta,
            "after `play`",
            "a note length".to_owned(),
        )),
    }
}

// Every pitch word before the closing `;` becomes its own playable at
// the same tick and duration; a `velocity n` modifier binds to the event
// it follows. Anything the modifier loop does not own is pushed back for
// the outer loop to judge.
fn parse_events(
    scanner: &mut Scanner,
    bar: &mut Bar,
    signature: Signature,
    duration: u16,
    beat: u8,
    delta: f64,
) -> Result<(), ParsingError> {
    let tick = signature.tick_at(bar.offset, beat, delta);

    loop {
        let meta = scanner.scan();
        let mut playable = match meta.token {
            Token::Semicolon => break,
            Token::NoteName(name) => {
                let pitch = resolve_note(meta, name)?;
                Playable::Note(Note {
                    pitch,
                    tick,
                    duration,
                    velocity: DEFAULT_VELOCITY,
                })
            }
            Token::ChordName(name) => {
                let pitches = theory::resolve_chord(name)
                    .map_err(|error| ParsingError::rejected(meta, ErrorType::UnresolvablePitch { error }))?;
                Playable::Chord(Chord {
                    pitches,
                    tick,
                    duration,
                    velocity: DEFAULT_VELOCITY,
                })
            }
            // Ride cymbal 1.
            Token::Cymbal => percussion(meta, "D#4", tick, duration)?,
            // Acoustic snare.
            Token::Snare => percussion(meta, "D3", tick, duration)?,
            // Open hi-hat.
            Token::OpenHiHat => percussion(meta, "A#3", tick, duration)?,
            _ => {
                return Err(ParsingError::unexpected(
                    meta,
                    "in `play`",
                    "a note, a chord, or `;`".to_owned(),
                ))
            }
        };

        loop {
            let meta = scanner.scan();
            match meta.token {
                Token::Velocity => {
                    let value_meta = scanner.scan();
                    match value_meta.token {
                        Token::Num(literal) => {
                            let velocity = literal.parse::<u8>().map_err(|_| {
                                ParsingError::rejected(
                                    value_meta,
                                    ErrorType::InvalidVelocity {
                                        value: literal.to_owned(),
                                    },
                                )
                            })?;
                            playable.set_velocity(velocity);
                        }
                        _ => {
                            return Err(ParsingError::unexpected(
                                value_meta,
                                "after `velocity`",
                                "a number".to_owned(),
                            ))
                        }
                    }
                }
                _ => {
                    scanner.unscan(meta);
                    break;
                }
            }
        }

        bar.playables.push(playable);
    }

    Ok(())
}

fn resolve_note(meta: &MetaToken, name: &str) -> Result<theory::Pitch, ParsingError> {
    theory::resolve_note(name)
        .map_err(|error| ParsingError::rejected(meta, ErrorType::UnresolvablePitch { error }))
}

fn percussion(
    meta: &MetaToken,
    name: &'static str,
    tick: u32,
    duration: u16,
) -> Result<Playable, ParsingError> {
    let pitch = resolve_note(meta, name)?;
    Ok(Playable::Note(Note {
        pitch,
        tick,
        duration,
        velocity: DEFAULT_VELOCITY,
    }))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::lexing;
    use crate::theory::{Accidental, Step};

    fn parse_source(source: &str) -> Result<Project, ParsingError> {
        let tokens = lexing::lex(source, None).expect("lexing failed");
        parse(&tokens)
    }

    fn project_of(source: &str) -> Project {
        parse_source(source).unwrap()
    }

    fn error_of(source: &str) -> ErrorType {
        parse_source(source).unwrap_err().error
    }

    fn single_playable(project: &Project) -> &Playable {
        &project.tracks[0].bars[0].playables[0]
    }

    #[test]
    fn round_trip_demo() {
        let project = project_of(
            r#"PROJECT "demo" { BPM 120; TIME 4 4; TRACK "lead" { BAR { ON 1 PLAY QUARTER A4; } } }"#,
        );

        assert_eq!(project.name, "demo");
        assert_eq!(project.bpm, Some(120.0));
        assert_eq!(project.signature, Signature::new(4, 4));
        assert_eq!(project.tracks.len(), 1);

        let track = &project.tracks[0];
        assert_eq!(track.name, "lead");
        assert_eq!(track.bpm, Some(120.0));
        assert_eq!(track.signature, Signature::new(4, 4));
        assert_eq!(track.bars.len(), 1);

        let bar = &track.bars[0];
        assert_eq!(bar.offset, 0);
        assert_eq!(bar.playables.len(), 1);

        match &bar.playables[0] {
            Playable::Note(note) => {
                assert_eq!(note.tick, 0);
                assert_eq!(note.duration, 4);
                assert_eq!(note.velocity, DEFAULT_VELOCITY);
                assert_eq!(note.pitch.step, Step::A);
                assert_eq!(note.pitch.accidental, Accidental::Natural);
                assert_eq!(note.pitch.register, 4);
            }
            other => panic!("expected a note, got {:?}", other),
        }
    }

    #[test]
    fn fractional_beats_scale_the_subdivision() {
        let project = project_of(
            "project p { time 4 8; track t { bar { on 3.5 play 8th B4 velocity 100; } } }",
        );

        let playable = single_playable(&project);
        assert_eq!(playable.tick(), 1980);
        assert_eq!(playable.duration(), 8);
        assert_eq!(playable.velocity(), 100);
    }

    #[test]
    fn fractional_beats_in_common_time() {
        let project =
            project_of("project p { time 4 4; track t { bar { on 3.5 play 8th B4; } } }");

        assert_eq!(single_playable(&project).tick(), 2040);
    }

    #[test]
    fn later_bars_shift_by_whole_bars_of_ticks() {
        let project = project_of(
            "project p { time 4 4; track t { bar { on 1 play quarter A4; } bar { on 2 play quarter A4; } } }",
        );

        let bars = &project.tracks[0].bars;
        assert_eq!(bars[0].offset, 0);
        assert_eq!(bars[1].offset, 1);
        assert_eq!(bars[0].playables[0].tick(), 0);
        assert_eq!(bars[1].playables[0].tick(), 3840 + 960);
    }

    #[test]
    fn several_events_share_one_instant() {
        let project =
            project_of("project p { time 4 4; track t { bar { on 1 play quarter A4 C4; } } }");

        let playables = &project.tracks[0].bars[0].playables;
        assert_eq!(playables.len(), 2);
        assert_eq!(playables[0].tick(), playables[1].tick());
        assert_eq!(playables[0].duration(), playables[1].duration());
    }

    #[test]
    fn velocity_binds_to_the_event_it_follows() {
        let project = project_of(
            "project p { time 4 4; track t { bar { on 1 play quarter A4 velocity 100 C4; } } }",
        );

        let playables = &project.tracks[0].bars[0].playables;
        assert_eq!(playables[0].velocity(), 100);
        assert_eq!(playables[1].velocity(), DEFAULT_VELOCITY);
    }

    #[test]
    fn chords_resolve_to_pitch_sets() {
        let project =
            project_of("project p { time 4 4; track t { bar { on 2 play half Cmaj7; } } }");

        match single_playable(&project) {
            Playable::Chord(chord) => {
                assert_eq!(chord.tick, 960);
                assert_eq!(chord.duration, 2);
                let midis = chord.pitches.iter().map(|pitch| pitch.midi()).collect::<Vec<_>>();
                assert_eq!(midis, vec![48, 52, 55, 59]);
            }
            other => panic!("expected a chord, got {:?}", other),
        }
    }

    #[test]
    fn percussion_shorthands_are_plain_notes() {
        let project = project_of(
            "project p { time 4 4; track t { bar { on 1 play 8th cymbal snare open_hi_hat; } } }",
        );

        let playables = &project.tracks[0].bars[0].playables;
        let midis = playables
            .iter()
            .map(|playable| match playable {
                Playable::Note(note) => note.pitch.midi(),
                other => panic!("expected a note, got {:?}", other),
            })
            .collect::<Vec<_>>();
        assert_eq!(midis, vec![51, 38, 46]);
    }

    #[test]
    fn beat_zero_does_not_exist() {
        assert_eq!(
            error_of("project p { time 4 4; track t { bar { on 0 play quarter A4; } } }"),
            ErrorType::NoSuchBeat {
                beat: "0".to_owned(),
            },
        );
    }

    #[test]
    fn beats_past_the_bar_do_not_exist() {
        assert_eq!(
            error_of("project p { time 4 4; track t { bar { on 5 play quarter A4; } } }"),
            ErrorType::NoSuchBeat {
                beat: "5".to_owned(),
            },
        );
    }

    #[test]
    fn fractional_beats_are_range_checked_on_their_integer_part() {
        assert_eq!(
            error_of("project p { time 4 4; track t { bar { on 0.5 play quarter A4; } } }"),
            ErrorType::NoSuchBeat {
                beat: "0.5".to_owned(),
            },
        );

        // 4.5 is still inside the fourth beat.
        let project =
            project_of("project p { time 4 4; track t { bar { on 4.5 play quarter A4; } } }");
        assert_eq!(single_playable(&project).tick(), 3 * 960 + 120);
    }

    #[test]
    fn keyword_durations() {
        for (word, code) in [("whole", 1u16), ("half", 2), ("quarter", 4)] {
            let source = format!(
                "project p {{ time 4 4; track t {{ bar {{ on 1 play {} A4; }} }} }}",
                word
            );
            assert_eq!(project_of(&source).tracks[0].bars[0].playables[0].duration(), code);
        }
    }

    #[test]
    fn suffixed_durations() {
        for (word, code) in [
            ("8th", 8u16),
            ("16th", 16),
            ("32nd", 32),
            ("64th", 64),
            ("128th", 128),
            ("256th", 256),
        ] {
            let source = format!(
                "project p {{ time 4 4; track t {{ bar {{ on 1 play {} A4; }} }} }}",
                word
            );
            assert_eq!(project_of(&source).tracks[0].bars[0].playables[0].duration(), code);
        }
    }

    #[test]
    fn thirty_second_notes_refuse_the_th_suffix() {
        assert!(matches!(
            error_of("project p { time 4 4; track t { bar { on 1 play 32th A4; } } }"),
            ErrorType::UnexpectedToken { .. },
        ));
    }

    #[test]
    fn eighth_notes_refuse_the_nd_suffix() {
        assert!(matches!(
            error_of("project p { time 4 4; track t { bar { on 1 play 8nd A4; } } }"),
            ErrorType::UnexpectedToken { .. },
        ));
    }

    #[test]
    fn unsupported_duration_codes_are_rejected() {
        assert_eq!(
            error_of("project p { time 4 4; track t { bar { on 1 play 12th A4; } } }"),
            ErrorType::InvalidDuration {
                value: "12".to_owned(),
            },
        );
    }

    #[test]
    fn in_track_tempo_and_time_are_parsed_then_discarded() {
        let project = project_of(
            "project p { bpm 120; time 4 4; track t { bpm 200; time 3 8; bar { on 4 play quarter A4; } } }",
        );

        let track = &project.tracks[0];
        assert_eq!(track.bpm, Some(120.0));
        assert_eq!(track.signature, Signature::new(4, 4));

        // The bar inherits from the track, so beat 4 is still valid and
        // still 960 ticks wide.
        let bar = &track.bars[0];
        assert_eq!(bar.bpm, Some(120.0));
        assert_eq!(bar.signature, Signature::new(4, 4));
        assert_eq!(bar.playables[0].tick(), 3 * 960);
    }

    #[test]
    fn in_bar_tempo_and_time_are_parsed_then_discarded() {
        let project = project_of(
            "project p { bpm 120; time 4 4; track t { bar { bpm 90; time 3 8; on 4 play quarter A4; } } }",
        );

        let bar = &project.tracks[0].bars[0];
        assert_eq!(bar.bpm, Some(120.0));
        assert_eq!(bar.signature, Signature::new(4, 4));
    }

    #[test]
    fn discarded_time_statements_are_still_syntax_checked() {
        assert!(matches!(
            error_of("project p { time 4 4; track t { time 4; bar { } } }"),
            ErrorType::UnexpectedToken { .. },
        ));
    }

    #[test]
    fn known_instruments_are_recorded() {
        let project = project_of("project p { track t { instrument overdriven_guitar; } }");
        assert_eq!(
            project.tracks[0].instrument.as_deref(),
            Some("overdriven_guitar"),
        );
    }

    #[test]
    fn unknown_instruments_are_a_hard_error() {
        assert_eq!(
            error_of(r#"project p { track t { instrument "not-a-real-instrument"; } }"#),
            ErrorType::UnknownInstrument {
                name: "not-a-real-instrument".to_owned(),
            },
        );
    }

    #[test]
    fn events_need_a_time_signature_in_scope() {
        assert_eq!(
            error_of("project p { track t { bar { on 1 play quarter A4; } } }"),
            ErrorType::NoTimeSignature,
        );
    }

    #[test]
    fn unrepresentable_subdivisions_are_rejected() {
        assert_eq!(
            error_of("project p { time 4 256; track t { } }"),
            ErrorType::InvalidTimeSignature {
                beats: "4".to_owned(),
                subdivision: "256".to_owned(),
            },
        );

        assert!(matches!(
            error_of("project p { time 4 6; track t { } }"),
            ErrorType::InvalidTimeSignature { .. },
        ));
    }

    #[test]
    fn velocities_wider_than_a_byte_are_rejected() {
        assert_eq!(
            error_of("project p { time 4 4; track t { bar { on 1 play quarter A4 velocity 300; } } }"),
            ErrorType::InvalidVelocity {
                value: "300".to_owned(),
            },
        );
    }

    #[test]
    fn unresolvable_pitches_carry_the_theory_error() {
        assert!(matches!(
            error_of("project p { time 4 4; track t { bar { on 1 play quarter Cxyz; } } }"),
            ErrorType::UnresolvablePitch { .. },
        ));
    }

    #[test]
    fn copyrights_and_texts_collect_in_order() {
        let project = project_of(
            r#"project p {
                copyright "2022 a";
                copyright "2022 b";
                text "alpha";
                track t { text "beta"; bar { text "gamma"; } }
            }"#,
        );

        assert_eq!(project.copyrights, vec!["2022 a", "2022 b"]);
        assert_eq!(project.texts, vec!["alpha"]);
        assert_eq!(project.tracks[0].texts, vec!["beta"]);
        assert_eq!(project.tracks[0].bars[0].texts, vec!["gamma"]);
    }

    #[test]
    fn trailing_tokens_after_the_project_fail() {
        assert!(matches!(
            error_of("project p { } }"),
            ErrorType::UnexpectedToken { .. },
        ));
    }

    #[test]
    fn truncated_input_reports_end_of_input() {
        assert!(matches!(
            error_of("project p { track t {"),
            ErrorType::UnexpectedEof { .. },
        ));
    }

    #[test]
    fn statements_opening_with_the_wrong_keyword_fail() {
        assert!(matches!(
            error_of("track t { }"),
            ErrorType::UnexpectedToken { .. },
        ));
    }

    #[test]
    fn comments_are_transparent_to_the_grammar() {
        let project = project_of(
            "project p { // header\n time 4 4; track t { bar { on 1 play quarter A4; } } }",
        );
        assert_eq!(project.tracks[0].bars[0].playables.len(), 1);
    }
}
