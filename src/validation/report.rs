//! Validation report types for structured error reporting.

use std::fmt;

use serde::Serialize;

/// The result of validating a tile set.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    /// All issues found during validation.
    pub issues: Vec<TileIssue>,
}

impl ValidationReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Adds an issue to the report.
    pub fn add(&mut self, issue: TileIssue) {
        self.issues.push(issue);
    }

    /// Returns the number of errors in the report.
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Returns the number of warnings in the report.
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }

    /// Returns true if there are no issues at all.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return writeln!(f, "Validation passed: no issues found");
        }

        writeln!(
            f,
            "Validation completed with {} error(s) and {} warning(s):",
            self.error_count(),
            self.warning_count()
        )?;
        writeln!(f)?;

        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }

        Ok(())
    }
}

/// A single validation issue (error or warning).
#[derive(Clone, Debug, Serialize)]
pub struct TileIssue {
    /// The severity of the issue.
    pub severity: Severity,

    /// A stable code for the issue type.
    pub code: IssueCode,

    /// A human-readable description of the issue.
    pub message: String,

    /// Index of the offending tile in the input sequence.
    pub index: usize,

    /// Identity URL of the offending tile, when it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl TileIssue {
    /// Creates a new error.
    pub fn error(code: IssueCode, message: impl Into<String>, index: usize) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            index,
            image_url: None,
        }
    }

    /// Creates a new warning.
    pub fn warning(code: IssueCode, message: impl Into<String>, index: usize) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            index,
            image_url: None,
        }
    }

    /// Attaches the tile's identity URL.
    pub fn with_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

impl fmt::Display for TileIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN ",
        };
        write!(
            f,
            "[{}] {:?} in tile {}: {}",
            severity, self.code, self.index, self.message
        )
    }
}

/// The severity of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// A warning that doesn't block selection but may indicate problems.
    Warning,
    /// An error that indicates invalid or corrupt tile data.
    Error,
}

/// A stable code identifying the type of validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IssueCode {
    // Bounds issues
    /// A bound is NaN.
    BoundsNotFinite,
    /// An axis has `from > to`.
    InvertedBounds,
    /// Zero extent on an axis; such a tile can never pair.
    DegenerateBounds,

    // Identity issues
    /// The tile has no full-resolution mipmap entry.
    MissingImageUrl,
    /// The tile's identity URL is an empty string.
    EmptyImageUrl,
    /// Two tiles share the same identity URL.
    DuplicateImageUrl,
}
