//! System instruction assembly for the chat assistant
//!
//! The loaded profile is serialized into a plain-text block and embedded
//! in the system instruction sent with every conversation.

use std::fmt::Write;

use super::ProfileData;

/// Serialize the profile into the plain-text layout the assistant reads
pub fn stringify_profile(profile: &ProfileData) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Name: {}", profile.full_name());
    let _ = writeln!(out, "Title: {}", profile.title);
    let _ = writeln!(out, "Summary: {}\n", profile.summary);

    let _ = writeln!(out, "About:\n{}\n", profile.about.introduction);
    for paragraph in &profile.about.paragraphs {
        let _ = writeln!(out, "{paragraph}");
    }
    out.push('\n');

    let _ = writeln!(out, "Experience:");
    for exp in &profile.experiences {
        let _ = writeln!(
            out,
            "- Role: {} at {} ({})\n  Description: {}\n  Skills: {}",
            exp.role,
            exp.company,
            exp.period,
            exp.description.join(" "),
            exp.skills.join(", ")
        );
    }
    out.push('\n');

    let _ = writeln!(out, "Projects:");
    for proj in &profile.projects {
        let period = proj
            .period
            .as_ref()
            .map(|p| format!(" ({p})"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "- Name: {}{}\n  Description: {}\n  Skills: {}",
            proj.name,
            period,
            proj.description.join(" "),
            proj.skills.join(", ")
        );
    }
    out.push('\n');

    let _ = writeln!(out, "Education:");
    for edu in &profile.education {
        let _ = writeln!(
            out,
            "- Institution: {}, Degree: {} ({})",
            edu.institution, edu.degree, edu.period
        );
    }
    out.push('\n');

    let _ = writeln!(out, "Skills:\n{}", profile.skills.join(", "));

    out
}

/// Build the full system instruction wrapping the serialized profile
pub fn build_system_instruction(profile: &ProfileData) -> String {
    format!(
        "You are a professional and helpful AI assistant for this portfolio. \
Your purpose is to answer questions about the professional background, skills, \
and experience. Your knowledge is strictly limited to the information provided \
below. Do not invent any information. If a question is outside of this context \
or about personal details not listed, politely state that you can only answer \
questions related to the professional profile.\n\n\
Here is the profile information:\n---\n{}\n---\n",
        stringify_profile(profile)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::sample_profile;

    #[test]
    fn test_stringify_contains_all_sections() {
        let text = stringify_profile(&sample_profile());

        assert!(text.contains("Name: Ada Lovelace"));
        assert!(text.contains("Experience:"));
        assert!(text.contains("- Role: Analyst at Babbage & Co (1842 - 1843)"));
        assert!(text.contains("Projects:"));
        assert!(text.contains("Education:"));
        assert!(text.contains("Skills:\nMathematics, Rust"));
    }

    #[test]
    fn test_system_instruction_embeds_profile() {
        let instruction = build_system_instruction(&sample_profile());

        assert!(instruction.contains("strictly limited"));
        assert!(instruction.contains("Name: Ada Lovelace"));
        assert!(instruction.starts_with("You are a professional"));
    }
}
