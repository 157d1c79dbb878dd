//! Profile document schema and validation
//!
//! The profile is a structured document (JSON or TOML) describing the
//! portfolio owner. Field names follow the document convention
//! (camelCase) so existing profile files keep working.

use serde::{Deserialize, Serialize};

use crate::errors::{FolioError, Result};

/// One entry in the experience timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub role: String,
    pub company: String,
    pub period: String,
    pub location: String,
    pub description: Vec<String>,
    pub skills: Vec<String>,
}

/// A portfolio project with its skill-tag set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub period: Option<String>,
    pub description: Vec<String>,
    pub skills: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub icon: String,
    #[serde(default)]
    pub stars: Option<String>,
    #[serde(default)]
    pub forks: Option<String>,
    pub link_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub period: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub introduction: String,
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Social {
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

/// Per-section render toggles as stored in the document.
///
/// Every field is optional so a profile can override just one section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionToggles {
    #[serde(default)]
    pub show_about: Option<bool>,
    #[serde(default)]
    pub show_experience: Option<bool>,
    #[serde(default)]
    pub show_projects: Option<bool>,
    #[serde(default)]
    pub show_ai_chat: Option<bool>,
    #[serde(default)]
    pub show_three_d: Option<bool>,
    #[serde(default)]
    pub show_contact: Option<bool>,
}

/// Resolved section configuration, defaults applied (everything on)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionsConfig {
    pub show_about: bool,
    pub show_experience: bool,
    pub show_projects: bool,
    pub show_ai_chat: bool,
    pub show_three_d: bool,
    pub show_contact: bool,
}

impl Default for SectionsConfig {
    fn default() -> Self {
        Self {
            show_about: true,
            show_experience: true,
            show_projects: true,
            show_ai_chat: true,
            show_three_d: true,
            show_contact: true,
        }
    }
}

/// The validated profile document, immutable for the session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub summary: String,
    pub about: About,
    pub experiences: Vec<Experience>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub skills: Vec<String>,
    #[serde(default)]
    pub project_filters: Option<Vec<String>>,
    #[serde(default)]
    pub example_questions: Option<Vec<String>>,
    #[serde(default)]
    pub social: Social,
    #[serde(default)]
    pub sections: Option<SectionToggles>,
}

impl ProfileData {
    /// Full display name, skipping empty components
    pub fn full_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Resolve the section toggles, defaulting every section to visible
    pub fn sections_config(&self) -> SectionsConfig {
        let t = self.sections.clone().unwrap_or_default();
        let d = SectionsConfig::default();
        SectionsConfig {
            show_about: t.show_about.unwrap_or(d.show_about),
            show_experience: t.show_experience.unwrap_or(d.show_experience),
            show_projects: t.show_projects.unwrap_or(d.show_projects),
            show_ai_chat: t.show_ai_chat.unwrap_or(d.show_ai_chat),
            show_three_d: t.show_three_d.unwrap_or(d.show_three_d),
            show_contact: t.show_contact.unwrap_or(d.show_contact),
        }
    }

    /// Validate fields serde cannot express: required strings must be
    /// non-empty and URLs must carry a scheme
    pub fn validate(&self) -> Result<()> {
        let mut issues = Vec::new();

        if self.first_name.trim().is_empty() {
            issues.push("firstName: must not be empty".to_string());
        }
        if self.title.trim().is_empty() {
            issues.push("title: must not be empty".to_string());
        }
        if self.summary.trim().is_empty() {
            issues.push("summary: must not be empty".to_string());
        }

        let check_url = |field: &str, value: &Option<String>, issues: &mut Vec<String>| {
            if let Some(url) = value {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    issues.push(format!("{field}: invalid url"));
                }
            }
        };

        check_url("imageUrl", &self.image_url, &mut issues);
        check_url("social.github", &self.social.github, &mut issues);
        check_url("social.linkedin", &self.social.linkedin, &mut issues);

        for (i, project) in self.projects.iter().enumerate() {
            if project.name.trim().is_empty() {
                issues.push(format!("projects.{i}.name: must not be empty"));
            }
            check_url(&format!("projects.{i}.link"), &project.link, &mut issues);
            check_url(&format!("projects.{i}.repo"), &project.repo, &mut issues);
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(FolioError::ProfileValidationError(issues.join("; ")))
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_profile() -> ProfileData {
    ProfileData {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        title: "Software Engineer".to_string(),
        subtitle: Some("Building things".to_string()),
        image_url: None,
        summary: "Engineer with a taste for analytical engines.".to_string(),
        about: About {
            introduction: "I enjoy computation.".to_string(),
            paragraphs: vec!["First paragraph.".to_string()],
        },
        experiences: vec![Experience {
            role: "Analyst".to_string(),
            company: "Babbage & Co".to_string(),
            period: "1842 - 1843".to_string(),
            location: "London".to_string(),
            description: vec!["Wrote the first program.".to_string()],
            skills: vec!["Mathematics".to_string()],
        }],
        projects: vec![
            Project {
                name: "Notes".to_string(),
                period: None,
                description: vec!["Annotated translation.".to_string()],
                skills: vec!["React".to_string(), "TypeScript".to_string()],
                link: None,
                repo: Some("https://example.com/notes".to_string()),
                image_url: None,
                icon: "N".to_string(),
                stars: None,
                forks: None,
                link_text: "View".to_string(),
            },
            Project {
                name: "Engine".to_string(),
                period: None,
                description: vec!["Difference engine docs.".to_string()],
                skills: vec!["Rust".to_string()],
                link: None,
                repo: None,
                image_url: None,
                icon: "E".to_string(),
                stars: None,
                forks: None,
                link_text: "View".to_string(),
            },
        ],
        education: vec![Education {
            institution: "Home tutoring".to_string(),
            degree: "Mathematics".to_string(),
            period: "1830s".to_string(),
        }],
        certifications: vec![],
        skills: vec!["Mathematics".to_string(), "Rust".to_string()],
        project_filters: None,
        example_questions: None,
        social: Social::default(),
        sections: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_skips_empty_parts() {
        let mut profile = sample_profile();
        assert_eq!(profile.full_name(), "Ada Lovelace");

        profile.last_name = String::new();
        assert_eq!(profile.full_name(), "Ada");
    }

    #[test]
    fn test_sections_default_to_visible() {
        let profile = sample_profile();
        let sections = profile.sections_config();
        assert!(sections.show_about);
        assert!(sections.show_ai_chat);
    }

    #[test]
    fn test_sections_partial_override() {
        let mut profile = sample_profile();
        profile.sections = Some(SectionToggles {
            show_three_d: Some(false),
            ..Default::default()
        });

        let sections = profile.sections_config();
        assert!(!sections.show_three_d);
        assert!(sections.show_projects);
    }

    #[test]
    fn test_validate_rejects_empty_identity() {
        let mut profile = sample_profile();
        profile.first_name = "  ".to_string();

        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("firstName"));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut profile = sample_profile();
        profile.social.github = Some("not-a-url".to_string());

        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_camel_case_round_trip() {
        let profile = sample_profile();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"firstName\""));

        let back: ProfileData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.first_name, "Ada");
    }
}
