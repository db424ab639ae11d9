//! Rule-based validation of body sections.
//!
//! The builder accepts any title and hierarchy level. Validation is a separate,
//! opt-in step that reports every broken rule at once.

use std::fmt;

use crate::error::{Error, Result};
use crate::model::{BodyContent, BodySection, Walk};

/// Lowest allowed hierarchy level.
pub const MIN_HIERARCHY_LEVEL: i32 = 1;

/// Highest allowed hierarchy level.
pub const MAX_HIERARCHY_LEVEL: i32 = 10;

/// One broken rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Name of the offending field, optionally prefixed with a tree path
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl ValidationFailure {
    /// Create a failure for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn at_path(mut self, path: &[usize]) -> Self {
        let prefix = path
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(".");
        self.field = format!("{}.{}", prefix, self.field);
        self
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// All broken rules, in rule order
    pub failures: Vec<ValidationFailure>,
}

impl ValidationResult {
    /// Check if no rule was broken.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures reported for `field`.
    pub fn failures_for<'a>(
        &'a self,
        field: &'a str,
    ) -> impl Iterator<Item = &'a ValidationFailure> + 'a {
        self.failures.iter().filter(move |f| f.field == field)
    }

    /// Convert into a `Result`, failing with [`Error::Validation`] when invalid.
    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::Validation(self.failures))
        }
    }

    fn extend(&mut self, other: ValidationResult) {
        self.failures.extend(other.failures);
    }
}

type Check<T> = Box<dyn Fn(&T) -> bool>;

/// A single check on one field of `T`.
pub struct Rule<T> {
    field: String,
    message: String,
    check: Check<T>,
}

impl<T> Rule<T> {
    /// Create a rule from a predicate that returns `true` when `T` is valid.
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        check: impl Fn(&T) -> bool + 'static,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            check: Box::new(check),
        }
    }

    /// Require the integer read by `get` to lie in `min..=max`.
    pub fn inclusive_between(
        field: impl Into<String>,
        get: impl Fn(&T) -> i32 + 'static,
        min: i32,
        max: i32,
    ) -> Self {
        let field = field.into();
        let message = format!("'{}' must be between {} and {}.", field, min, max);
        Self::new(field, message, move |value| (min..=max).contains(&get(value)))
    }

    /// Require the string read by `get` to contain a non-whitespace character.
    pub fn not_blank(field: impl Into<String>, get: impl Fn(&T) -> &str + 'static) -> Self {
        let field = field.into();
        let message = format!("'{}' must not be empty.", field);
        Self::new(field, message, move |value| !get(value).trim().is_empty())
    }

    /// Replace the failure message and return self.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Field this rule checks.
    pub fn field(&self) -> &str {
        &self.field
    }

    fn apply(&self, value: &T) -> Option<ValidationFailure> {
        if (self.check)(value) {
            None
        } else {
            Some(ValidationFailure::new(&self.field, &self.message))
        }
    }
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("field", &self.field)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// An ordered set of rules over `T`.
#[derive(Debug)]
pub struct Validator<T> {
    rules: Vec<Rule<T>>,
}

impl<T> Validator<T> {
    /// Create a validator without rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule and return self.
    pub fn rule(mut self, rule: Rule<T>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Number of rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Run every rule against `value` and collect the failures.
    pub fn validate(&self, value: &T) -> ValidationResult {
        ValidationResult {
            failures: self.rules.iter().filter_map(|r| r.apply(value)).collect(),
        }
    }
}

impl<T> Default for Validator<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for [`BodySection`] fields.
///
/// Checks that `hierarchy_level` is within 1..=10 and that `title` is not blank.
#[derive(Debug)]
pub struct SectionValidator {
    inner: Validator<BodySection>,
}

impl SectionValidator {
    /// Create the validator with the standard body section rules.
    pub fn new() -> Self {
        let inner = Validator::new()
            .rule(
                Rule::inclusive_between(
                    "hierarchy_level",
                    |s: &BodySection| s.hierarchy_level,
                    MIN_HIERARCHY_LEVEL,
                    MAX_HIERARCHY_LEVEL,
                )
                .with_message(format!(
                    "Hierarchy level must be between {} and {}.",
                    MIN_HIERARCHY_LEVEL, MAX_HIERARCHY_LEVEL
                )),
            )
            .rule(
                Rule::not_blank("title", |s: &BodySection| s.title.as_str())
                    .with_message("Title cannot be empty."),
            );
        Self { inner }
    }

    /// Validate a single section, ignoring its sub-sections.
    pub fn validate(&self, section: &BodySection) -> ValidationResult {
        let result = self.inner.validate(section);
        if !result.is_valid() {
            log::debug!(
                "Section '{}' failed {} rule(s)",
                section.title,
                result.failures.len()
            );
        }
        result
    }

    /// Validate `section` and all of its descendants.
    ///
    /// Field names are prefixed with the section's dotted path, so a title
    /// failure on the second child of the root reads `1.2.title`.
    pub fn validate_tree(&self, section: &BodySection) -> ValidationResult {
        self.validate_walk(Walk::with_root_index(section, 1))
    }

    /// Validate every section of `body`. Top-level sections are numbered from 1.
    pub fn validate_all(&self, body: &BodyContent) -> ValidationResult {
        let mut result = ValidationResult::default();
        for (i, section) in body.sections.borrow().iter().enumerate() {
            result.extend(self.validate_walk(Walk::with_root_index(section, i + 1)));
        }
        result
    }

    fn validate_walk(&self, walk: Walk<'_>) -> ValidationResult {
        let failures = walk
            .flat_map(|item| {
                self.inner
                    .validate(item.section)
                    .failures
                    .into_iter()
                    .map(move |f| f.at_path(&item.path))
            })
            .collect::<Vec<_>>();
        if !failures.is_empty() {
            log::debug!("Section tree has {} validation failure(s)", failures.len());
        }
        ValidationResult { failures }
    }
}

impl Default for SectionValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FontSettings;

    fn section(title: &str, level: i32) -> BodySection {
        BodySection::new(title, "", FontSettings::default()).level(level)
    }

    #[test]
    fn test_valid_section() {
        let result = SectionValidator::new().validate(&section("Intro", 1));
        assert!(result.is_valid());
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_level_out_of_range() {
        let validator = SectionValidator::new();
        for level in [0, 11, -3] {
            let result = validator.validate(&section("Intro", level));
            assert!(!result.is_valid());
            assert_eq!(result.failures.len(), 1);
            assert_eq!(result.failures[0].field, "hierarchy_level");
        }
        assert!(validator.validate(&section("Intro", 10)).is_valid());
    }

    #[test]
    fn test_blank_title() {
        let validator = SectionValidator::new();
        for title in ["", "   ", "\t\n"] {
            let result = validator.validate(&section(title, 1));
            assert_eq!(result.failures_for("title").count(), 1);
            assert_eq!(result.failures[0].message, "Title cannot be empty.");
        }
    }

    #[test]
    fn test_all_failures_collected() {
        let result = SectionValidator::new().validate(&section(" ", 42));
        let fields: Vec<_> = result.failures.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["hierarchy_level", "title"]);

        let err = result.into_result().unwrap_err();
        assert!(matches!(err, Error::Validation(ref f) if f.len() == 2));
    }

    #[test]
    fn test_validate_ignores_children() {
        let tree = section("Root", 1).with_sub_section(section("", 2));
        assert!(SectionValidator::new().validate(&tree).is_valid());
    }

    #[test]
    fn test_validate_tree_prefixes_paths() {
        let tree = section("Root", 1)
            .with_sub_section(section("Child", 2))
            .with_sub_section(section("", 11));

        let result = SectionValidator::new().validate_tree(&tree);
        let fields: Vec<_> = result.failures.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["1.2.hierarchy_level", "1.2.title"]);
    }

    #[test]
    fn test_validate_all_numbers_top_level() {
        let body = BodyContent::default();
        body.add_section(section("One", 1));
        body.add_section(section("", 1));

        let result = SectionValidator::new().validate_all(&body);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].to_string(), "2.title: Title cannot be empty.");
    }

    #[test]
    fn test_custom_validator() {
        let validator = Validator::new()
            .rule(Rule::inclusive_between("value", |v: &i32| *v, 0, 5))
            .rule(Rule::new("value", "must be even", |v: &i32| v % 2 == 0));

        assert_eq!(validator.rule_count(), 2);
        assert!(validator.validate(&4).is_valid());

        let result = validator.validate(&7);
        assert_eq!(result.failures.len(), 2);
        assert_eq!(result.failures[0].message, "'value' must be between 0 and 5.");
    }
}
