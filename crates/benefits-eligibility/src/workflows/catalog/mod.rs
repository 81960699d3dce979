//! Program catalog loaded once from the county spreadsheet export.

pub(crate) mod normalizer;
mod parser;
mod tags;

pub use tags::{CriteriaTag, CriteriaTags};

use chrono::NaiveDate;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use parser::ProgramRow;

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingNameColumn,
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "failed to read program catalog: {}", err),
            CatalogError::Csv(err) => write!(f, "invalid program catalog data: {}", err),
            CatalogError::MissingNameColumn => {
                f.write_str("program catalog has no 'Program Name' column")
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::Csv(err) => Some(err),
            CatalogError::MissingNameColumn => None,
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// A benefits program exactly as published, plus the tags derived from its criteria.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub name: String,
    pub agency: String,
    pub description: String,
    pub application_link: String,
    pub last_updated: String,
    pub eligibility_criteria: String,
    pub update_sources: String,
    pub tags: CriteriaTags,
}

impl Program {
    /// Builds a program with only a name and criteria text; tags are derived.
    pub fn new(name: impl Into<String>, eligibility_criteria: impl Into<String>) -> Self {
        let eligibility_criteria = eligibility_criteria.into();
        let tags = CriteriaTags::derive(&normalizer::normalize_text(&eligibility_criteria));
        Self {
            name: name.into(),
            agency: String::new(),
            description: String::new(),
            application_link: String::new(),
            last_updated: String::new(),
            eligibility_criteria,
            update_sources: String::new(),
            tags,
        }
    }

    pub fn with_tags(mut self, tags: CriteriaTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn application_url(&self) -> Option<&str> {
        let link = self.application_link.trim();
        (!link.is_empty()).then_some(link)
    }

    /// `Last Updated` as a date when the sheet holds an ISO or US-style date.
    pub fn last_updated_on(&self) -> Option<NaiveDate> {
        let raw = self.last_updated.trim();
        ["%Y-%m-%d", "%m/%d/%Y"]
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
    }

    fn from_row(row: ProgramRow) -> Self {
        let explicit = row
            .tags
            .as_deref()
            .map(CriteriaTags::parse_list)
            .filter(|tags| !tags.is_empty());
        let tags = match explicit {
            Some(tags) => tags,
            None => {
                if row.tags.is_some() {
                    debug!(
                        program = %row.name,
                        "no usable Eligibility Tags; deriving from criteria"
                    );
                }
                CriteriaTags::derive(&normalizer::normalize_text(&row.eligibility_criteria))
            }
        };

        Self {
            name: row.name,
            agency: row.agency,
            description: row.description,
            application_link: row.application_link,
            last_updated: row.last_updated,
            eligibility_criteria: row.eligibility_criteria,
            update_sources: row.update_sources,
            tags,
        }
    }
}

/// Read-only, ordered program list shared by every evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProgramCatalog {
    programs: Vec<Program>,
}

impl ProgramCatalog {
    pub fn new(programs: Vec<Program>) -> Self {
        Self { programs }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;
        info!(path = %path.display(), programs = catalog.len(), "program catalog loaded");
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut programs = Vec::new();

        for (index, row) in parser::parse_rows(reader)?.into_iter().enumerate() {
            if row.name.trim().is_empty() {
                debug!(row = index + 1, "skipping catalog row without a program name");
                continue;
            }
            programs.push(Program::from_row(row));
        }

        Ok(Self { programs })
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}
