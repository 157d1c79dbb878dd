//! Page sections and scroll tracking
//!
//! The portfolio renders as one continuous scrolled column of sections.
//! The active section (highlighted in the nav bar) is whichever one
//! contains the viewport midpoint, so the highlight flips roughly when a
//! section crosses the center of the screen.

use crate::profile::SectionsConfig;

/// Canonical section order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    About,
    Experience,
    Projects,
    AiChat,
    ThreeD,
    Contact,
}

impl Section {
    /// Nav bar label
    pub fn title(&self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::About => "About",
            Section::Experience => "Experience",
            Section::Projects => "Projects",
            Section::AiChat => "AI Chat",
            Section::ThreeD => "3D Room",
            Section::Contact => "Contact",
        }
    }
}

/// Sections enabled by the profile, in canonical order.
///
/// Home is unconditional; the rest follow their toggles.
pub fn visible_sections(config: &SectionsConfig) -> Vec<Section> {
    let mut sections = vec![Section::Home];
    if config.show_about {
        sections.push(Section::About);
    }
    if config.show_experience {
        sections.push(Section::Experience);
    }
    if config.show_projects {
        sections.push(Section::Projects);
    }
    if config.show_ai_chat {
        sections.push(Section::AiChat);
    }
    if config.show_three_d {
        sections.push(Section::ThreeD);
    }
    if config.show_contact {
        sections.push(Section::Contact);
    }
    sections
}

/// Resolve the active section from the scroll position.
///
/// `heights` pairs each visible section with its rendered height in
/// lines. The section containing `scroll + viewport / 2` wins; a scroll
/// near the very top always resolves to the first section.
pub fn active_section(
    heights: &[(Section, usize)],
    scroll: usize,
    viewport_height: usize,
) -> Option<Section> {
    let first = heights.first().map(|(s, _)| *s)?;

    if scroll < viewport_height / 2 {
        return Some(first);
    }

    let midpoint = scroll + viewport_height / 2;
    let mut cursor = 0;
    for (section, height) in heights {
        cursor += height;
        if midpoint < cursor {
            return Some(*section);
        }
    }

    // Past the end: the last section stays active
    heights.last().map(|(s, _)| *s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SectionToggles;

    #[test]
    fn test_default_config_shows_everything() {
        let sections = visible_sections(&SectionsConfig::default());
        assert_eq!(sections.len(), 7);
        assert_eq!(sections[0], Section::Home);
        assert_eq!(sections[6], Section::Contact);
    }

    #[test]
    fn test_disabled_sections_are_skipped_in_order() {
        let profile = crate::profile::sample_profile();
        let mut profile = profile;
        profile.sections = Some(SectionToggles {
            show_experience: Some(false),
            show_three_d: Some(false),
            ..Default::default()
        });

        let sections = visible_sections(&profile.sections_config());
        assert!(!sections.contains(&Section::Experience));
        assert!(!sections.contains(&Section::ThreeD));
        // Order of the remainder is preserved
        assert_eq!(
            sections,
            vec![
                Section::Home,
                Section::About,
                Section::Projects,
                Section::AiChat,
                Section::Contact,
            ]
        );
    }

    #[test]
    fn test_top_of_page_is_home() {
        let heights = vec![(Section::Home, 30), (Section::About, 40)];
        assert_eq!(active_section(&heights, 0, 20), Some(Section::Home));
        assert_eq!(active_section(&heights, 5, 20), Some(Section::Home));
    }

    #[test]
    fn test_midpoint_selects_section() {
        let heights = vec![
            (Section::Home, 30),
            (Section::About, 40),
            (Section::Contact, 10),
        ];

        // Midpoint at 35 lands inside About (30..70)
        assert_eq!(active_section(&heights, 25, 20), Some(Section::About));
        // Midpoint at 75 lands inside Contact (70..80)
        assert_eq!(active_section(&heights, 65, 20), Some(Section::Contact));
    }

    #[test]
    fn test_overscroll_keeps_last_section() {
        let heights = vec![(Section::Home, 30), (Section::Contact, 10)];
        assert_eq!(active_section(&heights, 500, 20), Some(Section::Contact));
    }

    #[test]
    fn test_empty_heights() {
        assert_eq!(active_section(&[], 0, 20), None);
    }
}
