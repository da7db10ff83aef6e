use std::collections::HashMap;

use log::debug;

use crate::{
    error::Result,
    io::config::SessionFile,
    schedule::{curve::sort_by_time, Breakpoint},
};

/*
Sbagen Sequences
================

A legacy sequence file has two sections. Tone-sets come first and name a
sound; the time-sequence then says when each tone-set starts.

  ## comments start with '#'
  alpha: pink/40 300+10/10         <- tone-set
  theta: pink/30 150+6/15
  off: -

  NOW alpha                        <- time-sequence
  00:10 theta ->
  +00:05 off

Tone-set entries
----------------

  -                     everything off
  pink/<amp>            pink noise at amp/100
  <carrier>+<beat>/<amp>
  <carrier>-<beat>/<amp>
                        binaural tone; the sign is dropped and amp/100 is
                        added to the tone volume of the set; carrier
                        and amp are digits[.digits], the beat may be .5
  mix/ bell spin: wave  not representable, skipped

Times
-----

  NOW            0 s
  hh:mm[:ss]     absolute
  +hh:mm[:ss]    offset from the most recent absolute time

A trailing `->` (slide into the next entry) is accepted and dropped, since
every parameter except noise is interpolated anyway.
*/

/// Why a sequence file could not be converted. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SbagenError {
    #[error("line {line}: invalid tone specification '{spec}'")]
    InvalidTone { line: usize, spec: String },

    #[error("line {line}: invalid pink noise amplitude '{amplitude}'")]
    InvalidPink { line: usize, amplitude: String },

    #[error("line {line}: invalid time '{time}'")]
    InvalidTime { line: usize, time: String },

    #[error("line {line}: invalid time-sequence line '{text}'")]
    InvalidSequenceLine { line: usize, text: String },

    #[error("line {line}: tone-set '{name}' is not defined")]
    UndefinedToneSet { line: usize, name: String },

    #[error("no tone-set definitions found")]
    NoToneSets,

    #[error("no time-sequence definitions found")]
    NoSequence,
}

type ParseResult<T> = std::result::Result<T, SbagenError>;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ToneSet {
    frequency: f64,
    beat_frequency: f64,
    noise_volume: f64,
    tone_volume: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TimeSpec {
    Now,
    Absolute(f64),
    Relative(f64),
}

#[derive(Debug)]
struct SequenceEntry<'a> {
    line: usize,
    time: TimeSpec,
    name: &'a str,
}

/// Convert sbagen sequence text into breakpoints sorted by time.
pub fn convert(text: &str) -> Result<Vec<Breakpoint>> {
    let (tone_sets, sequence) = parse(text)?;

    let mut last_absolute = 0.0;
    let mut breakpoints = Vec::with_capacity(sequence.len());

    for entry in sequence {
        let time = match entry.time {
            TimeSpec::Now => {
                last_absolute = 0.0;
                0.0
            }
            TimeSpec::Absolute(seconds) => {
                last_absolute = seconds;
                seconds
            }
            TimeSpec::Relative(offset) => last_absolute + offset,
        };

        let set = tone_sets
            .get(entry.name)
            .ok_or_else(|| SbagenError::UndefinedToneSet {
                line: entry.line,
                name: entry.name.to_string(),
            })?;

        breakpoints.push(Breakpoint {
            time,
            frequency: set.frequency,
            beat_frequency: set.beat_frequency,
            noise_on: set.noise_volume > 0.0,
            noise_volume: set.noise_volume,
            tone_volume: set.tone_volume,
        });
    }

    sort_by_time(&mut breakpoints);
    debug!(
        "converted {} tone-sets into {} breakpoints",
        tone_sets.len(),
        breakpoints.len()
    );
    Ok(breakpoints)
}

/// Convert sbagen sequence text into a session file.
pub fn convert_to_session(text: &str) -> Result<SessionFile> {
    SessionFile::new(convert(text)?)
}

fn parse(text: &str) -> ParseResult<(HashMap<&str, ToneSet>, Vec<SequenceEntry<'_>>)> {
    let mut tone_sets = HashMap::new();
    let mut sequence = Vec::new();
    let mut in_tone_sets = true;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if in_tone_sets {
            if let Some((name, specs)) = split_tone_set(trimmed) {
                tone_sets.insert(name, parse_tone_set(line, specs)?);
                continue;
            }
            in_tone_sets = false;
        }

        sequence.push(parse_sequence_line(line, trimmed)?);
    }

    if tone_sets.is_empty() {
        return Err(SbagenError::NoToneSets);
    }
    if sequence.is_empty() {
        return Err(SbagenError::NoSequence);
    }

    Ok((tone_sets, sequence))
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// `name: specs`, where the name starts with a letter.
fn split_tone_set(line: &str) -> Option<(&str, &str)> {
    let (name, specs) = line.split_once(':')?;
    let first = name.chars().next()?;
    if !first.is_ascii_alphabetic() || !name.chars().all(is_name_char) {
        return None;
    }
    Some((name, specs.trim()))
}

fn parse_tone_set(line: usize, specs: &str) -> ParseResult<ToneSet> {
    let mut set = ToneSet::default();
    if specs == "-" {
        return Ok(set);
    }

    for part in specs.split_whitespace() {
        if let Some(amplitude) = part.strip_prefix("pink/") {
            let amp: f64 = amplitude.parse().map_err(|_| SbagenError::InvalidPink {
                line,
                amplitude: amplitude.to_string(),
            })?;
            set.noise_volume = amp / 100.0;
        } else if part.starts_with("mix/")
            || part.starts_with("bell")
            || part.starts_with("spin:")
            || part.starts_with("wave")
        {
            continue;
        } else {
            let (carrier, beat, amp) = parse_tone(part).ok_or_else(|| SbagenError::InvalidTone {
                line,
                spec: part.to_string(),
            })?;
            set.frequency = carrier;
            set.beat_frequency = beat;
            set.tone_volume += amp / 100.0;
        }
    }

    Ok(set)
}

/// `<carrier>[+|-<beat>][/<amp>]` → (carrier, beat, amp). Missing parts are 0.
fn parse_tone(spec: &str) -> Option<(f64, f64, f64)> {
    let (head, amp) = match spec.split_once('/') {
        Some((head, amp)) => (head, parse_number(amp)?),
        None => (spec, 0.0),
    };

    let (carrier, beat) = match head.find(['+', '-']) {
        Some(at) => {
            let beat = &head[at + 1..];
            let beat = if beat.is_empty() {
                0.0
            } else {
                parse_decimal(beat)?
            };
            (&head[..at], beat)
        }
        None => (head, 0.0),
    };

    Some((parse_number(carrier)?, beat, amp))
}

/// `digits[.digits]`, as carriers and amplitudes are written.
fn parse_number(text: &str) -> Option<f64> {
    if !text.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    parse_decimal(text)
}

/// `[digits].digits` or `digits`. Beats may drop the integer part.
fn parse_decimal(text: &str) -> Option<f64> {
    let digits = |part: &str| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit());
    let valid = match text.split_once('.') {
        Some((whole, fraction)) => (whole.is_empty() || digits(whole)) && digits(fraction),
        None => digits(text),
    };
    if !valid {
        return None;
    }
    text.parse().ok()
}

/// `<time> <name> [->]`
fn parse_sequence_line(line: usize, text: &str) -> ParseResult<SequenceEntry<'_>> {
    let invalid = || SbagenError::InvalidSequenceLine {
        line,
        text: text.to_string(),
    };

    let mut tokens = text.split_whitespace();
    let time = tokens.next().ok_or_else(invalid)?;
    let mut name = tokens.next().ok_or_else(invalid)?;

    match tokens.next() {
        Some("->") => {}
        Some(_) => return Err(invalid()),
        None => name = name.strip_suffix("->").unwrap_or(name),
    }
    if tokens.next().is_some() || name.is_empty() || !name.chars().all(is_name_char) {
        return Err(invalid());
    }

    Ok(SequenceEntry {
        line,
        time: parse_time_spec(line, time)?,
        name,
    })
}

fn parse_time_spec(line: usize, text: &str) -> ParseResult<TimeSpec> {
    if text == "NOW" {
        return Ok(TimeSpec::Now);
    }

    let invalid = || SbagenError::InvalidTime {
        line,
        time: text.to_string(),
    };

    let spec = match text.strip_prefix('+') {
        Some(offset) => clock_seconds(offset).map(TimeSpec::Relative),
        None => clock_seconds(text).map(TimeSpec::Absolute),
    };
    spec.ok_or_else(invalid)
}

/// `hh:mm` or `hh:mm:ss` in whole units.
fn clock_seconds(text: &str) -> Option<f64> {
    let parts: Vec<&str> = text.split(':').collect();
    if !(2..=3).contains(&parts.len()) {
        return None;
    }

    let mut fields = [0u64; 3];
    for (field, part) in fields.iter_mut().zip(&parts) {
        *field = part.parse().ok()?;
    }
    let [hours, minutes, seconds] = fields;

    let total = hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)?;
    Some(total as f64)
}
