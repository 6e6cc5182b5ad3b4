//! Line classification for engraving programs
//!
//! Each program line maps to at most one [`Instruction`]. Only the laser
//! on/off and rapid/linear move families matter to the preview; everything
//! else (homing, unit and positioning mode declarations, program end,
//! comments) classifies as [`Instruction::Other`].

use regex::Regex;
use std::sync::OnceLock;

/// XY target of a motion instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub x: f64,
    pub y: f64,
}

/// A single recognised program instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    /// `M3 S<power>`: laser on, opens a layer
    LaserOn { power: u32 },
    /// `G0`: rapid move with the laser off. `None` when X or Y is unusable.
    Rapid(Option<Target>),
    /// `G1`: drawing move. `None` when X or Y is unusable.
    Linear(Option<Target>),
    /// `M5`: laser off, closes the open layer
    LaserOff,
    /// Blank, comment, or an instruction the preview does not interpret
    Other,
}

impl Instruction {
    /// True for `G0`/`G1` lines whose coordinates could not be read
    pub fn is_malformed_motion(&self) -> bool {
        matches!(self, Instruction::Rapid(None) | Instruction::Linear(None))
    }
}

/// Classify one program line.
///
/// The line is trimmed and stripped of `;` and `(` comments first. The
/// mnemonic may be followed directly by its words (`G1X1Y2`), but never by
/// another digit, so `G10` or `M30` never pass for `G1` or `M3`.
pub fn classify_line(line: &str) -> Instruction {
    let code = strip_comment(line.trim());

    if let Some(rest) = strip_mnemonic(code, "M3") {
        return match rest.trim_start().strip_prefix('S') {
            Some(value) => Instruction::LaserOn {
                power: parse_power(value),
            },
            None => Instruction::Other,
        };
    }
    if strip_mnemonic(code, "M5").is_some() {
        return Instruction::LaserOff;
    }
    if let Some(rest) = strip_mnemonic(code, "G0") {
        return Instruction::Rapid(parse_target(rest));
    }
    if let Some(rest) = strip_mnemonic(code, "G1") {
        return Instruction::Linear(parse_target(rest));
    }
    Instruction::Other
}

fn strip_comment(line: &str) -> &str {
    match line.find([';', '(']) {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Remainder of `code` after `mnemonic`, if the mnemonic is complete
fn strip_mnemonic<'a>(code: &'a str, mnemonic: &str) -> Option<&'a str> {
    let rest = code.strip_prefix(mnemonic)?;
    match rest.chars().next() {
        Some(c) if c.is_ascii_digit() || c == '.' => None,
        _ => Some(rest),
    }
}

/// Leading digit run of an `S` word. Missing or overflowing values give 0.
fn parse_power(value: &str) -> u32 {
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    value[..end].parse::<u32>().unwrap_or(0)
}

/// First `X` and first `Y` word of the words following the mnemonic. If
/// either is absent or not a plain decimal number the whole target is
/// discarded.
fn parse_target(words: &str) -> Option<Target> {
    Some(Target {
        x: axis_value(words, 'X')?,
        y: axis_value(words, 'Y')?,
    })
}

/// Value of the first `axis` word. The number must end at whitespace, the
/// end of the line, or the next word's address letter.
fn axis_value(words: &str, axis: char) -> Option<f64> {
    let start = words.find(axis)? + axis.len_utf8();
    let (value, rest) = leading_decimal(&words[start..])?;
    match rest.chars().next() {
        Some(c) if !(c.is_whitespace() || c.is_ascii_uppercase()) => None,
        _ => Some(value),
    }
}

/// Split a leading `[+-]?(digits[.digits]|.digits)` off `text`
fn leading_decimal(text: &str) -> Option<(f64, &str)> {
    static DECIMAL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = DECIMAL_REGEX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)").expect("invalid regex pattern")
    });

    let found = regex.find(text)?;
    let value = found.as_str().parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some((value, &text[found.end()..]))
}

/// Parse `[+-]?(digits[.digits]|.digits)`. Exponents, `inf` and `NaN` are
/// rejected, as are values too large to be finite.
pub fn parse_decimal(token: &str) -> Option<f64> {
    match leading_decimal(token)? {
        (value, "") => Some(value),
        _ => None,
    }
}
