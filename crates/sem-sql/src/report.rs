//! The shared `{ok, issues[]}` shape both the syntax and semantic scans
//! report through (§4.5).

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// A short, stable identifier for the rule that fired.
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The outcome of a validation scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub ok: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn ok() -> Self {
        Self { ok: true, issues: Vec::new() }
    }

    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let ok = issues.is_empty();
        Self { ok, issues }
    }

    /// Merge another report's issues into this one; `ok` becomes the AND
    /// of both.
    pub fn merge(mut self, other: ValidationReport) -> Self {
        self.ok = self.ok && other.ok;
        self.issues.extend(other.issues);
        self
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
