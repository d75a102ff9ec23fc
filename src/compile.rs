//! Pattern compilation into a token sequence.

use core::mem;

use crate::format::{TimeFormatter, ZoneNameStyle};
use crate::parse::TimeParser;
use crate::parsed::Parsed;
use crate::scan::Scanner;
use crate::token::{Conversion, Directive, Flags, Padding, Token};
use crate::{FormatError, ParseError, Time};

/// A compiled pattern.
///
/// Compilation never fails: any `%` sequence that is not a recognized
/// directive is kept as literal text, matching Ruby's behavior of passing
/// unknown directives through to the output. A `Format` is immutable and can
/// be shared freely between threads and reused for any number of
/// [`parse`](Format::parse) and [`format`](Format::format) runs.
#[derive(Debug, Clone)]
pub struct Format {
    /// Ordered token sequence.
    pub(crate) tokens: Vec<Token>,
    /// Length of the source pattern, used to bound the formatted size.
    pattern_len: usize,
}

impl Format {
    /// Compile a pattern into a token sequence.
    #[must_use]
    pub fn compile(pattern: &str) -> Self {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;

        while !rest.is_empty() {
            let at = match rest.find('%') {
                Some(at) => at,
                None => {
                    literal.push_str(rest);
                    break;
                }
            };
            literal.push_str(&rest[..at]);
            rest = &rest[at..];

            let mut scanner = Scanner::new(rest.as_bytes());
            scanner.bump();

            let scanned = Self::scan_directive(&mut scanner);
            let mut consumed = scanner.consumed();
            match scanned {
                Some((conversion, width, padding, flags, posix_ext)) => {
                    flush_literal(&mut literal, &mut tokens);
                    tokens.push(Token::Directive(Directive {
                        conversion,
                        width,
                        padding,
                        flags,
                        posix_ext,
                        lexeme: rest[..consumed].to_owned(),
                    }));
                }
                None => {
                    // No valid directive; keep the consumed text as a literal.
                    // A rejected byte may sit inside a multi-byte character.
                    while !rest.is_char_boundary(consumed) {
                        consumed += 1;
                    }
                    literal.push_str(&rest[..consumed]);
                }
            }
            rest = &rest[consumed..];
        }

        flush_literal(&mut literal, &mut tokens);

        Self {
            tokens,
            pattern_len: pattern.len(),
        }
    }

    /// Parse an input string against this pattern, producing a [`Parsed`]
    /// field bag.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] carrying the input and the byte index of the
    /// failure when the input does not match the pattern.
    pub fn parse(&self, input: &str) -> Result<Parsed, ParseError> {
        TimeParser::new(input).parse(&self.tokens)
    }

    /// Format a time implementation with this pattern.
    ///
    /// `%Z` uses the default zone name style: `"UTC"` for a zero offset and
    /// the empty string otherwise.
    ///
    /// # Errors
    ///
    /// Can produce a [`FormatError`] when the formatting fails.
    pub fn format(&self, time: &impl Time) -> Result<String, FormatError> {
        self.format_with(time, ZoneNameStyle::None)
    }

    /// Format a time implementation with this pattern and the provided `%Z`
    /// zone name style.
    ///
    /// # Errors
    ///
    /// Can produce a [`FormatError`] when the formatting fails.
    pub fn format_with(
        &self,
        time: &impl Time,
        zone_style: ZoneNameStyle,
    ) -> Result<String, FormatError> {
        let mut buf = Vec::new();
        TimeFormatter::new(time, &self.tokens, self.size_limit(), zone_style).fmt(&mut buf)?;
        Ok(String::from_utf8(buf).expect("formatted string should be valid UTF-8"))
    }

    /// Maximum size of the formatted string.
    pub(crate) fn size_limit(&self) -> usize {
        self.pattern_len.saturating_mul(512 * 1024)
    }

    /// Scan one directive after the `%` sign.
    ///
    /// Returns `None` when the consumed bytes do not form a directive; the
    /// caller keeps them as literal text.
    fn scan_directive(
        scanner: &mut Scanner<'_>,
    ) -> Option<(Conversion, Option<usize>, Padding, Flags, bool)> {
        // Option prefix. Flags may come in any order; the last padding flag
        // wins, and '-' clears an earlier padding choice in addition to
        // requesting left alignment.
        let mut padding = Padding::Default;
        let mut flags = Flags::empty();
        loop {
            match scanner.peek() {
                Some(b'-') => {
                    flags.insert(Flags::LEFT_ALIGN);
                    padding = Padding::Default;
                }
                Some(b'_') => padding = Padding::Space,
                Some(b'0') => padding = Padding::Zero,
                Some(b'^') => flags.insert(Flags::UPPER),
                Some(b'#') => flags.insert(Flags::SWAP_CASE),
                _ => break,
            }
            scanner.bump();
        }

        // Width. Anything past the `c_int` range makes the whole sequence a
        // literal. Leading zeros were eaten as padding flags above, so the
        // run starts with a significant digit.
        let mut width: Option<usize> = None;
        while let Some(digit @ b'0'..=b'9') = scanner.peek() {
            scanner.bump();
            let extended = width
                .unwrap_or(0)
                .checked_mul(10)?
                .checked_add(usize::from(digit - b'0'))?;
            if i32::try_from(extended).is_err() {
                return None;
            }
            width = Some(extended);
        }

        // An E/O locale modifier passes through when the character after it
        // is one the modifier is defined for.
        let mut posix_ext = false;
        if let (Some(modifier), Some(target)) = (scanner.peek(), scanner.peek_at(1)) {
            let targets: &[u8] = match modifier {
                b'E' => b"CXYcxy",
                b'O' => b"HIMSUVWdeklmuwy",
                _ => b"",
            };
            if targets.contains(&target) {
                scanner.bump();
                posix_ext = true;
            }
        }

        // Colon runs are only meaningful directly before 'z'; one to three
        // of them select the extended offset shapes.
        let mut colons = 0;
        while scanner.peek() == Some(b':') {
            scanner.bump();
            colons += 1;
        }

        let conversion = if colons == 0 {
            Conversion::of(scanner.bump()?)?
        } else {
            if scanner.bump() != Some(b'z') {
                return None;
            }
            match colons {
                1 => Conversion::OffsetExtended,
                2 => Conversion::OffsetExtendedSeconds,
                3 => Conversion::OffsetShortest,
                _ => return None,
            }
        };

        Some((conversion, width, padding, flags, posix_ext))
    }
}

/// Move the pending literal buffer into the token sequence.
fn flush_literal(literal: &mut String, tokens: &mut Vec<Token>) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(mem::take(literal)));
    }
}
