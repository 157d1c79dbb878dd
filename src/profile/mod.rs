//! Profile loading and session cache
//!
//! The profile document is read once, validated against the schema, and
//! held in an explicit process-scoped store for the rest of the session.

mod prompt;
mod schema;

pub use prompt::{build_system_instruction, stringify_profile};
pub use schema::{
    About, Certification, Education, Experience, ProfileData, Project, SectionsConfig,
    SectionToggles, Social,
};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::{FolioError, Result};

/// Default questions offered when the profile does not override them
pub const DEFAULT_EXAMPLE_QUESTIONS: [&str; 3] = [
    "What are your main backend skills?",
    "Tell me about your most recent project.",
    "How many years of experience do you have?",
];

/// Owns the loaded profile for the lifetime of the session.
///
/// Replaces the implicit module-global cache of the original design with
/// explicit initialization-once state passed to consumers.
#[derive(Debug)]
pub struct ProfileStore {
    data: ProfileData,
    source: PathBuf,
}

impl ProfileStore {
    /// Load and validate the profile document at `path`.
    ///
    /// JSON and TOML are both accepted; the extension decides the parser.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| FolioError::ProfileLoadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let data: ProfileData = if path.extension().is_some_and(|e| e == "toml") {
            toml::from_str(&content).map_err(|e| FolioError::ProfileLoadError {
                path: path.to_path_buf(),
                message: format!("invalid TOML: {e}"),
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| FolioError::ProfileLoadError {
                path: path.to_path_buf(),
                message: format!("invalid JSON: {e}"),
            })?
        };

        data.validate()?;

        info!(
            "Profile loaded for {} ({} projects, {} experience entries)",
            data.full_name(),
            data.projects.len(),
            data.experiences.len()
        );

        Ok(Self {
            data,
            source: path.to_path_buf(),
        })
    }

    pub fn data(&self) -> &ProfileData {
        &self.data
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Example questions for the chat: profile override (capped at 6) or
    /// the built-in defaults
    pub fn example_questions(&self) -> Vec<String> {
        match &self.data.example_questions {
            Some(questions) if !questions.is_empty() => {
                questions.iter().take(6).cloned().collect()
            }
            _ => DEFAULT_EXAMPLE_QUESTIONS
                .iter()
                .map(|q| (*q).to_string())
                .collect(),
        }
    }

    /// Filter tags for the projects section: "all" plus the profile's
    /// override list, or tags derived from project skills, capped at 12
    pub fn project_filter_tags(&self) -> Vec<String> {
        let mut tags = vec!["all".to_string()];

        let source: Vec<String> = match &self.data.project_filters {
            Some(filters) if !filters.is_empty() => filters.clone(),
            _ => {
                let mut derived = Vec::new();
                for project in &self.data.projects {
                    for skill in &project.skills {
                        let lower = skill.to_lowercase();
                        if !derived.contains(&lower) {
                            derived.push(lower);
                        }
                    }
                }
                derived
            }
        };

        tags.extend(source.into_iter().take(12));
        debug!("Project filter tags: {:?}", tags);
        tags
    }
}

/// Filter projects by a selected tag.
///
/// "all" returns every project; any other tag keeps the projects whose
/// skill set contains it as a case-insensitive substring, in the
/// original order.
pub fn filter_projects<'a>(projects: &'a [Project], tag: &str) -> Vec<&'a Project> {
    if tag == "all" {
        return projects.iter().collect();
    }
    let needle = tag.to_lowercase();
    projects
        .iter()
        .filter(|p| p.skills.iter().any(|s| s.to_lowercase().contains(&needle)))
        .collect()
}

#[cfg(test)]
pub(crate) use schema::sample_profile;
