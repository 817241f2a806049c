use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The submission form fields accompanying a file upload, exactly as the
/// user typed them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionForm {
    pub client_name: String,
    pub client_project: String,
    pub collection_date: String,
}

/// Form fields after checking: names trimmed and non-empty, date parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedSubmission {
    pub client_name: String,
    pub client_project: String,
    pub collection_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    MissingIdentity,
    BadDate,
}

impl FormError {
    pub fn message(&self) -> &'static str {
        match self {
            FormError::MissingIdentity => "Please provide Client Name and Client Project.",
            FormError::BadDate => "Collection Date is invalid. Please use the date picker.",
        }
    }
}

impl SubmissionForm {
    /// Check the form fields ahead of submission. Like the CSV gate, the
    /// outcome is a value with a user-facing message, never a fault.
    pub fn check(&self) -> Result<CheckedSubmission, FormError> {
        let client_name = self.client_name.trim();
        let client_project = self.client_project.trim();
        if client_name.is_empty() || client_project.is_empty() {
            return Err(FormError::MissingIdentity);
        }

        let collection_date = NaiveDate::parse_from_str(self.collection_date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::BadDate)?;

        Ok(CheckedSubmission {
            client_name: client_name.to_string(),
            client_project: client_project.to_string(),
            collection_date,
        })
    }
}
