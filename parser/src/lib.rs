//! Strict parser for Semantic Version numbers, as accepted by the pub package registry.
#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    no_mangle_generic_items,
    non_shorthand_field_patterns,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused_allocation,
    unused_comparisons,
    unused_extern_crates,
    unused_import_braces,
    unused_parens,
    unused_qualifications,
    unused_results,
    unused,
    while_true
)]

use std::{fmt::Display, iter::Peekable, ops::Range};

pub use pub_semver_version_builder::VersionBuilder;

/// Parse a string slice into a Version.
///
/// The accepted grammar is `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`:
///
/// - Major, minor, and patch are required and must be ASCII digits.
///   Leading zeroes are accepted and dropped (e.g. "01.02.03" parses as "1.2.3").
/// - Pre-release and build are dot-separated lists of non-empty identifiers
///   made of ASCII letters (of any case), digits, and hyphens.
/// - Identifiers consisting only of digits are numeric, all others are alpha-numeric.
/// - The whole input must match, surrounding whitespace is rejected.
/// - Numbers that do not fit into an `u64` are rejected.
///
/// ## Examples
///
/// ```rust
/// use semver::Version;
///
/// let version = pub_semver_parser::parse::<Version>("1.2.3");
/// assert_eq!(version, Ok(Version::new(1, 2, 3)));
///
/// assert_eq!(
///     pub_semver_parser::parse::<Version>("01.02.03-beta.011").unwrap(),
///     Version::parse("1.2.3-beta.11").unwrap()
/// );
///
/// assert!(pub_semver_parser::parse::<Version>("1.2").is_err());
/// assert!(pub_semver_parser::parse::<Version>("v1.2.3").is_err());
/// assert!(pub_semver_parser::parse::<Version>(" 1.2.3").is_err());
/// ```
pub fn parse<'input, V>(input: &'input str) -> Result<V::Out, Error<'input>>
where
    V: VersionBuilder<'input>,
{
    parse_version::<_, V>(input, lex(input)).map_err(|ErrorSpan { error, span }| Error {
        input,
        span,
        error,
    })
}

/// Returns true if the input is a valid version.
///
/// ## Examples
///
/// ```rust
/// assert!(pub_semver_parser::is_valid("1.0.0-rc.1+build.5"));
/// assert!(!pub_semver_parser::is_valid("1.3-pre"));
/// ```
pub fn is_valid(input: &str) -> bool {
    parse::<Validate>(input).is_ok()
}

struct Validate;

impl VersionBuilder<'_> for Validate {
    type Out = ();

    fn new() -> Self {
        Validate
    }

    fn build(self) -> Self::Out {}
}

/// Possible errors that happen during parsing
/// and the location of the token where the error occurred.
///
/// # Example
///
/// ```rust
/// use semver::Version;
///
/// let error = pub_semver_parser::parse::<Version>("1.2.3+").unwrap_err();
/// assert_eq!(error.to_string(), r#""1.2.3+" is not a valid semantic version: Could not parse the build identifier: No input"#);
///
/// let error = pub_semver_parser::parse::<Version>("1.2.3!").unwrap_err();
/// assert_eq!(error.to_string(), r#""1.2.3!" is not a valid semantic version: Unexpected `!`"#);
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct Error<'input> {
    input: &'input str,
    span: Span,
    error: ErrorType,
}

impl<'input> Error<'input> {
    /// Creates a new [`OwnedError`] out of this [`Error`].
    ///
    /// This is specialized version of [`Clone`] which returns a different type.
    #[inline]
    pub fn owned(&self) -> OwnedError {
        OwnedError {
            input: self.input.into(),
            span: self.span,
            error: self.error,
        }
    }

    /// Returns the original input line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let error = pub_semver_parser::parse::<semver::Version>("1.2.3+").unwrap_err();
    /// assert_eq!(error.input(), "1.2.3+");
    /// ```
    #[inline]
    pub fn input(&self) -> &'input str {
        self.input
    }

    /// Returns range into the input string that points to the erroneous input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let error = pub_semver_parser::parse::<semver::Version>("1.2.3+").unwrap_err();
    /// assert_eq!(error.error_span(), 5..6);
    /// ```
    #[inline]
    pub fn error_span(&self) -> Range<usize> {
        self.span.into()
    }

    /// Returns the kind of error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pub_semver_parser::{parse, ErrorKind};
    /// use semver::Version;
    ///
    /// assert_eq!(parse::<Version>("").unwrap_err().error_kind(), ErrorKind::MissingMajorNumber);
    /// assert_eq!(parse::<Version>("1").unwrap_err().error_kind(), ErrorKind::MissingMinorNumber);
    /// assert_eq!(parse::<Version>("1.2").unwrap_err().error_kind(), ErrorKind::MissingPatchNumber);
    /// assert_eq!(parse::<Version>("1.2.3-").unwrap_err().error_kind(), ErrorKind::MissingPreRelease);
    /// assert_eq!(parse::<Version>("1.2.3+").unwrap_err().error_kind(), ErrorKind::MissingBuild);
    /// assert_eq!(parse::<Version>("a.b.c").unwrap_err().error_kind(), ErrorKind::NotANumber);
    /// assert_eq!(
    ///     parse::<Version>("1.2.98765432109876543210").unwrap_err().error_kind(),
    ///     ErrorKind::NumberTooLarge
    /// );
    /// assert_eq!(parse::<Version>("1.2.3!").unwrap_err().error_kind(), ErrorKind::UnexpectedInput);
    /// ```
    #[inline]
    pub fn error_kind(&self) -> ErrorKind {
        match self.error {
            ErrorType::Missing(segment) => match segment {
                Segment::Part(part) => match part {
                    Part::Major => ErrorKind::MissingMajorNumber,
                    Part::Minor => ErrorKind::MissingMinorNumber,
                    Part::Patch => ErrorKind::MissingPatchNumber,
                },
                Segment::PreRelease => ErrorKind::MissingPreRelease,
                Segment::Build => ErrorKind::MissingBuild,
            },
            ErrorType::NotNumeric(_) => ErrorKind::NotANumber,
            ErrorType::TooLarge(_) => ErrorKind::NumberTooLarge,
            ErrorType::Unexpected => ErrorKind::UnexpectedInput,
        }
    }

    /// Returns a slice from the original input line that triggered the error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let error = pub_semver_parser::parse::<semver::Version>("1.3+bu?!3ild").unwrap_err();
    /// assert_eq!(error.erroneous_input(), "+");
    /// ```
    #[inline]
    pub fn erroneous_input(&self) -> &'input str {
        &self.input[self.error_span()]
    }

    /// Returns a text representation of the error, without the offending input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let error = pub_semver_parser::parse::<semver::Version>("1.").unwrap_err();
    /// assert_eq!(error.error_line(), String::from("Could not parse the minor identifier: No input"));
    /// ```
    pub fn error_line(&self) -> String {
        match &self.error {
            ErrorType::Missing(segment) => {
                format!("Could not parse the {} identifier: No input", segment)
            }
            ErrorType::NotNumeric(segment) => format!(
                "Could not parse the {} identifier: `{}` is not a number",
                segment,
                self.erroneous_input()
            ),
            ErrorType::TooLarge(segment) => format!(
                "Could not parse the {} identifier: `{}` is too large",
                segment,
                self.erroneous_input()
            ),
            ErrorType::Unexpected => format!("Unexpected `{}`", self.erroneous_input()),
        }
    }

    /// Returns a caret line indication the erroneous input if it was written under the original input line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let error = pub_semver_parser::parse::<semver::Version>("foo").unwrap_err();
    /// assert_eq!(error.indicate_erroneous_input(), "^^^");
    ///
    /// let error = pub_semver_parser::parse::<semver::Version>("1.2.3 bar").unwrap_err();
    /// assert_eq!(error.indicate_erroneous_input(), "~~~~~^");
    /// ```
    pub fn indicate_erroneous_input(&self) -> String {
        let start = self.input[..self.span.start].chars().count();
        let width = self.erroneous_input().chars().count();
        format!("{0:~<start$}{0:^<width$}", "", start = start, width = width)
    }
}

/// Owned version of [`Error`] which clones the input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedError {
    input: String,
    span: Span,
    error: ErrorType,
}

impl OwnedError {
    /// Return a borrowed version of this error.
    pub fn borrowed(&self) -> Error<'_> {
        Error {
            input: &self.input,
            span: self.span,
            error: self.error,
        }
    }

    /// See [`Error::input`].
    #[inline]
    pub fn input(&self) -> &str {
        self.borrowed().input()
    }

    /// See [`Error::error_span`].
    #[inline]
    pub fn error_span(&self) -> Range<usize> {
        self.borrowed().error_span()
    }

    /// See [`Error::error_kind`].
    #[inline]
    pub fn error_kind(&self) -> ErrorKind {
        self.borrowed().error_kind()
    }

    /// See [`Error::erroneous_input`].
    #[inline]
    pub fn erroneous_input(&self) -> &str {
        self.borrowed().erroneous_input()
    }

    /// See [`Error::error_line`].
    #[inline]
    pub fn error_line(&self) -> String {
        self.borrowed().error_line()
    }

    /// See [`Error::indicate_erroneous_input`].
    #[inline]
    pub fn indicate_erroneous_input(&self) -> String {
        self.borrowed().indicate_erroneous_input()
    }
}

/// Possible errors that can happen.
/// These don't include an information as those are covered by various
/// error methods like [`Error::erroneous_input`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Expected to parse the major number part, but nothing was found
    MissingMajorNumber,
    /// Expected to parse the minor number part, but nothing was found
    MissingMinorNumber,
    /// Expected to parse the patch number part, but nothing was found
    MissingPatchNumber,
    /// Expected to parse the pre-release identifier part, but nothing was found
    MissingPreRelease,
    /// Expected to parse the build identifier part, but nothing was found
    MissingBuild,
    /// Trying to parse a major, minor, or patch number, but the input was not a number
    NotANumber,
    /// A number does not fit into an `u64`
    NumberTooLarge,
    /// Found an unexpected input
    UnexpectedInput,
}

impl Display for Error<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line = format!(
            "\"{}\" is not a valid semantic version: {}",
            self.input,
            self.error_line()
        );
        f.pad(&line)?;
        if f.alternate() {
            writeln!(f)?;
            writeln!(f, "|    {}", self.input)?;
            writeln!(f, "|    {}", self.indicate_erroneous_input())?;
        }
        Ok(())
    }
}

impl Display for OwnedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.borrowed().fmt(f)
    }
}

impl std::error::Error for Error<'_> {}

impl std::error::Error for OwnedError {}

impl<'input> From<Error<'input>> for OwnedError {
    fn from(error: Error<'input>) -> Self {
        error.owned()
    }
}

#[derive(Debug, PartialEq, Eq)]
struct ErrorSpan {
    error: ErrorType,
    span: Span,
}

impl ErrorSpan {
    #[cfg(test)]
    fn new(error: ErrorType, span: Span) -> Self {
        Self { error, span }
    }

    fn missing(segment: Segment, span: Span) -> Self {
        Self {
            error: ErrorType::Missing(segment),
            span,
        }
    }

    fn not_numeric(segment: Segment, span: Span) -> Self {
        Self {
            error: ErrorType::NotNumeric(segment),
            span,
        }
    }

    fn too_large(segment: Segment, span: Span) -> Self {
        Self {
            error: ErrorType::TooLarge(segment),
            span,
        }
    }

    fn unexpected(span: Span) -> Self {
        Self {
            error: ErrorType::Unexpected,
            span,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ErrorType {
    Missing(Segment),
    NotNumeric(Segment),
    TooLarge(Segment),
    Unexpected,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Part {
    Major,
    Minor,
    Patch,
}

impl Display for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Part::Major => f.pad("major"),
            Part::Minor => f.pad("minor"),
            Part::Patch => f.pad("patch"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Segment {
    Part(Part),
    PreRelease,
    Build,
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Part(part) => part.fmt(f),
            Segment::PreRelease => f.pad("pre-release"),
            Segment::Build => f.pad("build"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum State {
    Part(Part),
    PreRelease,
    Build,
}

fn parse_version<'input, I, V>(input: &'input str, tokens: I) -> Result<V::Out, ErrorSpan>
where
    I: IntoIterator<Item = TokenSpan>,
    V: VersionBuilder<'input>,
{
    let mut tokens = tokens.into_iter().peekable();
    let mut version = V::new();
    let mut state = State::Part(Part::Major);
    // span of the last consumed token, used to locate `Missing` errors
    let mut last = Span::default();

    loop {
        match state {
            State::Part(part) => {
                let token_span = match tokens.next() {
                    Some(token_span) => token_span,
                    None => return Err(ErrorSpan::missing(Segment::Part(part), last)),
                };
                let num = parse_number(token_span, input, part)?;
                match part {
                    Part::Major => version.set_major(num),
                    Part::Minor => version.set_minor(num),
                    Part::Patch => version.set_patch(num),
                }
                last = token_span.span;

                let token_span = match tokens.next() {
                    Some(token_span) => token_span,
                    None => {
                        return match part {
                            Part::Major => Err(ErrorSpan::missing(Segment::Part(Part::Minor), last)),
                            Part::Minor => Err(ErrorSpan::missing(Segment::Part(Part::Patch), last)),
                            Part::Patch => finish(version),
                        }
                    }
                };
                state = match (part, token_span.token) {
                    (Part::Major, Token::Dot) => State::Part(Part::Minor),
                    (Part::Minor, Token::Dot) => State::Part(Part::Patch),
                    (Part::Patch, Token::Hyphen) => State::PreRelease,
                    (Part::Patch, Token::Plus) => State::Build,
                    _ => return Err(ErrorSpan::unexpected(token_span.span)),
                };
                last = token_span.span;
            }
            State::PreRelease | State::Build => {
                let segment = if state == State::PreRelease {
                    Segment::PreRelease
                } else {
                    Segment::Build
                };
                let identifier = take_identifier(&mut tokens, segment, last)?;
                let value = identifier.span.at(input);
                match (segment, identifier.numeric) {
                    (Segment::PreRelease, true) => {
                        version.add_pre_release_num(parse_identifier_number(identifier, input, segment)?)
                    }
                    (Segment::PreRelease, false) => version.add_pre_release_str(value),
                    (_, true) => version.add_build_num(parse_identifier_number(identifier, input, segment)?),
                    (_, false) => version.add_build_str(value),
                }

                let token_span = match tokens.next() {
                    Some(token_span) => token_span,
                    None => return finish(version),
                };
                state = match (state, token_span.token) {
                    (State::PreRelease, Token::Dot) => State::PreRelease,
                    (State::PreRelease, Token::Plus) => State::Build,
                    (State::Build, Token::Dot) => State::Build,
                    _ => return Err(ErrorSpan::unexpected(token_span.span)),
                };
                last = token_span.span;
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct IdentifierSpan {
    span: Span,
    numeric: bool,
}

/// Collects the longest run of identifier tokens into a single identifier.
/// A hyphen inside a pre-release or build identifier is part of the identifier.
fn take_identifier<I>(
    tokens: &mut Peekable<I>,
    segment: Segment,
    last: Span,
) -> Result<IdentifierSpan, ErrorSpan>
where
    I: Iterator<Item = TokenSpan>,
{
    let mut identifier: Option<IdentifierSpan> = None;
    while let Some(&token_span) = tokens.peek() {
        let numeric = match token_span.token {
            Token::Numeric => true,
            Token::Alpha | Token::Hyphen => false,
            _ => break,
        };
        identifier = Some(match identifier {
            None => IdentifierSpan {
                span: token_span.span,
                numeric,
            },
            Some(identifier) => IdentifierSpan {
                span: identifier.span.join(token_span.span),
                numeric: identifier.numeric && numeric,
            },
        });
        let _ = tokens.next();
    }

    match identifier {
        Some(identifier) => Ok(identifier),
        None => Err(match tokens.peek() {
            Some(token_span) => ErrorSpan::unexpected(token_span.span),
            None => ErrorSpan::missing(segment, last),
        }),
    }
}

#[inline]
fn parse_number(token: TokenSpan, input: &str, part: Part) -> Result<u64, ErrorSpan> {
    let segment = Segment::Part(part);
    match token.token {
        Token::Numeric => token
            .span
            .at(input)
            .parse::<u64>()
            .map_err(|_| ErrorSpan::too_large(segment, token.span)),
        Token::Alpha => Err(ErrorSpan::not_numeric(segment, token.span)),
        _ => Err(ErrorSpan::unexpected(token.span)),
    }
}

#[inline]
fn parse_identifier_number(
    identifier: IdentifierSpan,
    input: &str,
    segment: Segment,
) -> Result<u64, ErrorSpan> {
    identifier
        .span
        .at(input)
        .parse::<u64>()
        .map_err(|_| ErrorSpan::too_large(segment, identifier.span))
}

#[inline]
fn finish<'input, V>(value: V) -> Result<V::Out, ErrorSpan>
where
    V: VersionBuilder<'input>,
{
    Ok(value.build())
}

fn lex(input: &str) -> Lexer<'_> {
    Lexer::new(input)
}

#[derive(Debug)]
struct Lexer<'input> {
    end: usize,
    chars: std::str::CharIndices<'input>,
    peeked: Option<(usize, char)>,
}

impl<'input> Lexer<'input> {
    fn new(input: &'input str) -> Lexer<'input> {
        let mut chars = input.char_indices();
        let peeked = chars.next();
        Lexer {
            end: input.len(),
            chars,
            peeked,
        }
    }

    /// Consumes characters while `accept` holds and returns the end offset.
    /// The first rejected character is left in `peeked`.
    fn skip_while(&mut self, accept: impl Fn(char) -> bool) -> usize {
        match self.chars.find(|&(_, c)| !accept(c)) {
            Some((j, c)) => {
                self.peeked = Some((j, c));
                j
            }
            None => self.end,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Token {
    /// Any unicode whitespace
    Whitespace,
    /// ASCII digits only
    Numeric,
    /// ASCII letters and digits, with at least one letter
    Alpha,
    /// `.`
    Dot,
    /// `+`
    Plus,
    /// `-`
    Hyphen,
    /// Error cases
    UnexpectedChar,
}

impl<'input> Iterator for Lexer<'input> {
    type Item = TokenSpan;

    fn next(&mut self) -> Option<Self::Item> {
        let (start, c) = self.peeked.take()?;

        let (end, token) = match c {
            c if c.is_whitespace() => (self.skip_while(char::is_whitespace), Token::Whitespace),
            '0'..='9' => {
                let end = self.skip_while(|c| c.is_ascii_digit());
                match self.peeked {
                    Some((_, c)) if c.is_ascii_alphabetic() => {
                        self.peeked = None;
                        (
                            self.skip_while(|c| c.is_ascii_alphanumeric()),
                            Token::Alpha,
                        )
                    }
                    _ => (end, Token::Numeric),
                }
            }
            'A'..='Z' | 'a'..='z' => (
                self.skip_while(|c| c.is_ascii_alphanumeric()),
                Token::Alpha,
            ),
            '.' => (start + 1, Token::Dot),
            '-' => (start + 1, Token::Hyphen),
            '+' => (start + 1, Token::Plus),
            c => (start + c.len_utf8(), Token::UnexpectedChar),
        };

        if self.peeked.is_none() {
            self.peeked = self.chars.next();
        }
        Some(TokenSpan::new(token, start, end))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct TokenSpan {
    token: Token,
    span: Span,
}

impl TokenSpan {
    fn new(token: Token, start: usize, end: usize) -> Self {
        Self {
            token,
            span: Span::new(start, end),
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
}

impl Span {
    fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    fn join(self, other: Span) -> Self {
        Self::new(self.start, other.end)
    }

    fn at<'input>(&self, input: &'input str) -> &'input str {
        &input[self.start..self.end]
    }
}

impl From<Span> for Range<usize> {
    fn from(s: Span) -> Self {
        s.start..s.end
    }
}
