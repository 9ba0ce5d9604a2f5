use std::fmt;

/// The form control an issue refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    InputText,
    InputUnit,
    OutputUnit,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormField::InputText => "input_text",
            FormField::InputUnit => "input_unit",
            FormField::OutputUnit => "output_unit",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// One input the form had to replace with a default
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub field: FormField,
    pub message: String,
}

/// Issues found in the current form state, in the order the fields were checked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: IssueSeverity, field: FormField, message: String) {
        self.issues.push(ValidationIssue {
            severity,
            field,
            message,
        });
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
    }

    /// Issues reported for one field
    pub fn for_field(&self, field: FormField) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(move |i| i.field == field)
    }

    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.severity {
            IssueSeverity::Error => "error",
            IssueSeverity::Warning => "warning",
        };
        write!(f, "{} [{}] {}", kind, self.field, self.message)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationResult {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_is_valid() {
        let result = ValidationResult::new();
        assert!(result.is_valid());
        assert!(!result.has_issues());
        assert_eq!(result.to_string(), "");
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let mut result = ValidationResult::new();
        result.push(
            IssueSeverity::Warning,
            FormField::InputUnit,
            "odd".to_string(),
        );
        assert!(result.is_valid());
        assert!(result.has_issues());
        assert_eq!(result.warnings().count(), 1);
    }

    #[test]
    fn test_issues_keep_field_order() {
        let mut result = ValidationResult::new();
        result.push(
            IssueSeverity::Error,
            FormField::InputText,
            "bad number".to_string(),
        );
        result.push(
            IssueSeverity::Warning,
            FormField::OutputUnit,
            "fell back".to_string(),
        );
        assert!(!result.is_valid());
        assert_eq!(result.errors().count(), 1);
        assert_eq!(result.for_field(FormField::OutputUnit).count(), 1);
        assert_eq!(
            result.to_string(),
            "  error [input_text] bad number\n  warning [output_unit] fell back\n"
        );
    }
}
