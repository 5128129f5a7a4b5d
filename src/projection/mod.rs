//! Typed views over raw gateway fields.
//!
//! Each result type declares a static table of [`FieldRule`]s: which protocol
//! key feeds which struct field, how the text is coerced, and whether the
//! gateway only returns the key for high-verbosity requests. [`project`]
//! walks that table; it never fails.
//!
//! Coercion rules:
//! - text: first value, or empty
//! - integer: first value parsed as `i32`, or `0` when absent or unparseable
//! - character: first character of the first value, or `None`

mod nvp;
mod payflow;

use std::fmt;

use tracing::warn;

use crate::nvp::FieldMultimap;

pub use nvp::NvpValues;
pub use payflow::PayflowValues;

/// Response detail level a field depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Returned for every request.
    #[default]
    Standard,
    /// Returned only when the request asked for `VERBOSITY=HIGH`.
    High,
}

impl Verbosity {
    /// Returns the wire value of the `VERBOSITY` request field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "LOW",
            Self::High => "HIGH",
        }
    }
}

/// Destination of a projected value inside `T`.
pub enum Target<T> {
    /// String field.
    Text(fn(&mut T, String)),
    /// Leniently parsed integer field.
    Integer(fn(&mut T, i32)),
    /// Single character field.
    Character(fn(&mut T, Option<char>)),
}

impl<T> fmt::Debug for Target<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text(_) => "Text",
            Self::Integer(_) => "Integer",
            Self::Character(_) => "Character",
        })
    }
}

/// One row of a projection table.
pub struct FieldRule<T> {
    /// Protocol key read from the response.
    pub key: &'static str,
    /// Where the value goes and how it is coerced.
    pub target: Target<T>,
    /// Detail level the key depends on.
    pub verbosity: Verbosity,
}

impl<T> fmt::Debug for FieldRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("key", &self.key)
            .field("target", &self.target)
            .field("verbosity", &self.verbosity)
            .finish()
    }
}

impl<T> FieldRule<T> {
    /// Text rule.
    pub const fn text(key: &'static str, set: fn(&mut T, String)) -> Self {
        Self { key, target: Target::Text(set), verbosity: Verbosity::Standard }
    }

    /// Integer rule.
    pub const fn integer(key: &'static str, set: fn(&mut T, i32)) -> Self {
        Self { key, target: Target::Integer(set), verbosity: Verbosity::Standard }
    }

    /// Character rule.
    pub const fn character(key: &'static str, set: fn(&mut T, Option<char>)) -> Self {
        Self { key, target: Target::Character(set), verbosity: Verbosity::Standard }
    }

    /// Marks the rule as present only in high-verbosity responses.
    #[must_use]
    pub const fn high(mut self) -> Self {
        self.verbosity = Verbosity::High;
        self
    }
}

/// A result type filled from a static rule table.
pub trait Projection: Default + 'static {
    /// Rules applied in order by [`project`].
    fn rules() -> &'static [FieldRule<Self>];
}

/// Projects raw fields into `T`.
///
/// Absent keys leave the zero value in place. Verbosity-dependent keys are
/// read like any other; when the request did not ask for them they are simply
/// absent.
///
/// # Examples
///
/// ```
/// use nvp_gateway::{
///     nvp::FieldMultimap,
///     projection::{PayflowValues, project},
/// };
///
/// let fields = FieldMultimap::parse(b"AMT=3.50&CVV2MATCH=Y").unwrap();
/// let values: PayflowValues = project(&fields);
///
/// assert_eq!(values.amount, "3.50");
/// assert_eq!(values.cvv2_match, Some('Y'));
/// assert_eq!(values.result, 0);
/// ```
#[must_use]
pub fn project<T: Projection>(fields: &FieldMultimap) -> T {
    let mut out = T::default();

    for rule in T::rules() {
        let Some(raw) = fields.get(rule.key) else {
            continue;
        };

        match rule.target {
            Target::Text(set) => set(&mut out, raw.to_owned()),
            Target::Integer(set) => set(&mut out, parse_integer(rule.key, raw)),
            Target::Character(set) => set(&mut out, raw.chars().next()),
        }
    }

    out
}

/// Parses an integer field, falling back to zero.
///
/// Present but malformed values are logged since they become
/// indistinguishable from absent ones.
fn parse_integer(key: &str, raw: &str) -> i32 {
    if raw.is_empty() {
        return 0;
    }
    raw.parse().unwrap_or_else(|_| {
        warn!(key, value = raw, "unparseable integer field, using 0");
        0
    })
}
