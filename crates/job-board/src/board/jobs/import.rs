use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::board::identity::Email;

use super::domain::JobDraft;

#[derive(Debug)]
pub enum JobImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for JobImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobImportError::Io(err) => write!(f, "failed to read job export: {err}"),
            JobImportError::Csv(err) => write!(f, "invalid job CSV data: {err}"),
        }
    }
}

impl std::error::Error for JobImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JobImportError::Io(err) => Some(err),
            JobImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for JobImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for JobImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads bulk postings from a CSV export with
/// `Title,Company,Location,Type,Salary,Description` headers.
pub struct JobCsvImporter;

impl JobCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        posted_by: &Email,
    ) -> Result<Vec<JobDraft>, JobImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, posted_by)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        posted_by: &Email,
    ) -> Result<Vec<JobDraft>, JobImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut drafts = Vec::new();
        for row in csv_reader.deserialize::<JobRow>() {
            drafts.push(row?.into_draft(posted_by));
        }
        Ok(drafts)
    }
}

#[derive(Debug, Deserialize)]
struct JobRow {
    #[serde(rename = "Title", default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    #[serde(rename = "Company", default, deserialize_with = "empty_string_as_none")]
    company: Option<String>,
    #[serde(rename = "Location", default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(rename = "Type", default, deserialize_with = "empty_string_as_none")]
    job_type: Option<String>,
    #[serde(rename = "Salary", default, deserialize_with = "empty_string_as_none")]
    salary: Option<String>,
    #[serde(
        rename = "Description",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    description: Option<String>,
}

impl JobRow {
    fn into_draft(self, posted_by: &Email) -> JobDraft {
        JobDraft {
            title: self.title,
            company: self.company,
            location: self.location,
            job_type: self.job_type,
            salary: self.salary,
            description: self.description,
            posted_by: Some(posted_by.as_str().to_string()),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
