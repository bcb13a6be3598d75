//! Compilation units handed to the ahead-of-time compiler.
//!
//! A [`UnitName`] is a fully qualified namespace symbol such as
//! `idrovora.cli`. Names are interpolated into the compiler's evaluation form,
//! so they are validated up front to keep that form well formed.

use crate::error::{PackagerError, Result};
use std::fmt;

/// Namespace providing the application's command-line entry point.
pub const ENTRY_POINT_UNIT: &str = "idrovora.cli";

/// Logging implementation namespace that must be compiled ahead of time so
/// the archive does not compile it on first load.
pub const LOGGING_IMPL_UNIT: &str = "clojure.tools.logging.impl";

/// Units compiled by a default packaging run, in compilation order.
pub const DEFAULT_UNITS: &[&str] = &[ENTRY_POINT_UNIT, LOGGING_IMPL_UNIT];

const FORBIDDEN_CHARS: &str = "()[]{}\"'`~@^;\\,";

/// A validated, fully qualified compilation unit name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitName(String);

impl UnitName {
    /// Create a unit name, rejecting anything that is not a plain symbol.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::InvalidUnitName`] when the name is empty,
    /// starts with a digit, or contains whitespace or reader macro characters.
    ///
    /// # Examples
    ///
    /// ```
    /// use idrovora_packager::units::UnitName;
    ///
    /// assert!(UnitName::new("idrovora.cli").is_ok());
    /// assert!(UnitName::new("idrovora cli").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        match rejection_reason(&name) {
            Some(reason) => Err(PackagerError::InvalidUnitName { name, reason }),
            None => Ok(Self(name)),
        }
    }

    /// Wrap one of the built-in names without validation.
    pub(crate) fn builtin(name: &'static str) -> Self {
        Self(name.to_owned())
    }

    /// Get the unit name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UnitName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn rejection_reason(name: &str) -> Option<&'static str> {
    let Some(first) = name.chars().next() else {
        return Some("is empty");
    };
    if first.is_ascii_digit() {
        return Some("must not start with a digit");
    }
    if name.chars().any(char::is_whitespace) {
        return Some("contains whitespace");
    }
    if name.chars().any(|c| FORBIDDEN_CHARS.contains(c)) {
        return Some("contains a reserved character");
    }
    if name.starts_with('.') || name.ends_with('.') || name.contains("..") {
        return Some("has an empty namespace segment");
    }
    None
}

/// Ordered, non-empty list of units to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnitList(Vec<UnitName>);

impl CompilationUnitList {
    /// Build a unit list, rejecting an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`PackagerError::EmptyUnitList`] when `units` is empty.
    pub fn new(units: Vec<UnitName>) -> Result<Self> {
        if units.is_empty() {
            return Err(PackagerError::EmptyUnitList);
        }
        Ok(Self(units))
    }

    /// Parse and validate a list of raw names.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or any name is invalid.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let units = names
            .iter()
            .map(|name| UnitName::new(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(units)
    }

    /// The units compiled by a default packaging run.
    #[must_use]
    pub fn idrovora() -> Self {
        Self(
            DEFAULT_UNITS
                .iter()
                .map(|&name| UnitName::builtin(name))
                .collect(),
        )
    }

    /// Iterate over the units in compilation order.
    pub fn iter(&self) -> std::slice::Iter<'_, UnitName> {
        self.0.iter()
    }

    /// Number of units in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty. Never true for a constructed list.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the expression that compiles every unit in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use idrovora_packager::units::CompilationUnitList;
    ///
    /// let form = CompilationUnitList::idrovora().compile_form();
    /// assert_eq!(
    ///     form,
    ///     "(doseq [p ['idrovora.cli 'clojure.tools.logging.impl]] (compile p))"
    /// );
    /// ```
    #[must_use]
    pub fn compile_form(&self) -> String {
        let quoted = self
            .0
            .iter()
            .map(|unit| format!("'{unit}"))
            .collect::<Vec<_>>()
            .join(" ");
        format!("(doseq [p [{quoted}]] (compile p))")
    }
}

impl<'a> IntoIterator for &'a CompilationUnitList {
    type Item = &'a UnitName;
    type IntoIter = std::slice::Iter<'a, UnitName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for CompilationUnitList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = self.0.iter().map(UnitName::as_str).collect::<Vec<_>>();
        f.write_str(&names.join(", "))
    }
}
