//! Frame rendering
//!
//! Builds the section column from the current state and paints it with
//! the nav bar and footer. The landing and room sections embed canvas
//! lines from the effects; everything else is wrapped widget text.

use std::time::Instant;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color as TuiColor, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::app::{App, AppMode, FOOTER_HEIGHT, HEADER_HEIGHT};
use super::sections::{active_section, Section};
use crate::chat::{Sender, TurnState, MAX_USER_MESSAGES};
use crate::profile::{filter_projects, ProfileData, Project};
use crate::render::{canvas_to_lines, Canvas, Color};

/// Backdrop tint behind the effects
const BG_COLOR: Color = Color {
    r: 8.0 / 255.0,
    g: 12.0 / 255.0,
    b: 24.0 / 255.0,
    a: 1.0,
};

const ACCENT: TuiColor = TuiColor::Rgb(59, 130, 246);
const DIM: TuiColor = TuiColor::DarkGray;

/// Rows given to the room scene inside the column
const SCENE_HEIGHT: u16 = 16;

/// Render one frame
pub fn render(frame: &mut Frame, app: &mut App) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(frame.area());

    app.set_body_size(body.width, body.height);

    let column = build_column(app, body.width, body.height);
    app.section_heights = column
        .iter()
        .map(|(section, lines)| (*section, lines.len()))
        .collect();

    let total: usize = app.section_heights.iter().map(|(_, h)| h).sum();
    app.scroll = app.scroll.min(total.saturating_sub(body.height as usize));

    let active = active_section(&app.section_heights, app.scroll, body.height as usize);
    render_nav(frame, header, app, active);

    let visible: Vec<TextLine<'static>> = column
        .into_iter()
        .flat_map(|(_, lines)| lines)
        .skip(app.scroll)
        .take(body.height as usize)
        .collect();
    frame.render_widget(Paragraph::new(visible), body);

    render_footer(frame, footer, app);
}

/// Build every visible section's lines in order
fn build_column(app: &App, width: u16, height: u16) -> Vec<(Section, Vec<TextLine<'static>>)> {
    let Some(ref store) = app.profile else {
        // Degraded page: landing plus the chat, nothing profile-driven
        return vec![
            (Section::Home, home_lines(app, width, height, None)),
            (Section::AiChat, chat_lines(app, width)),
        ];
    };
    let profile = store.data();

    app.sections()
        .into_iter()
        .map(|section| {
            let lines = match section {
                Section::Home => home_lines(app, width, height, Some(profile)),
                Section::About => about_lines(profile, width),
                Section::Experience => experience_lines(profile, width),
                Section::Projects => project_lines(app, profile, width),
                Section::AiChat => chat_lines(app, width),
                Section::ThreeD => scene_lines(app, width),
                Section::Contact => contact_lines(profile),
            };
            (section, lines)
        })
        .collect()
}

/// Landing section: the particle backdrop with the identity overlay
fn home_lines(
    app: &App,
    width: u16,
    height: u16,
    profile: Option<&ProfileData>,
) -> Vec<TextLine<'static>> {
    let height = height.max(6);
    let mut canvas = Canvas::new(u32::from(width), u32::from(height) * 2, BG_COLOR);
    app.particles.draw(&mut canvas);
    app.trail.draw(&mut canvas, Instant::now());

    let mut lines = canvas_to_lines(&canvas, width, height);

    let center = usize::from(height) / 2;
    let name_style = Style::default()
        .fg(TuiColor::White)
        .add_modifier(Modifier::BOLD);

    match profile {
        Some(profile) => {
            overlay_centered(&mut lines, center - 1, &profile.full_name(), name_style, width);
            overlay_centered(
                &mut lines,
                center,
                &profile.title,
                Style::default().fg(ACCENT),
                width,
            );
            if let Some(ref subtitle) = profile.subtitle {
                overlay_centered(
                    &mut lines,
                    center + 1,
                    subtitle,
                    Style::default().fg(DIM),
                    width,
                );
            }
        }
        None => {
            overlay_centered(&mut lines, center - 1, "Portfolio", name_style, width);
            if let Some(ref err) = app.profile_error {
                overlay_centered(
                    &mut lines,
                    center + 1,
                    err,
                    Style::default().fg(TuiColor::Red),
                    width,
                );
            }
        }
    }

    overlay_centered(
        &mut lines,
        usize::from(height) - 1,
        "j/k scroll · tab next section",
        Style::default().fg(DIM),
        width,
    );

    lines
}

fn about_lines(profile: &ProfileData, width: u16) -> Vec<TextLine<'static>> {
    let mut lines = vec![heading("About")];
    push_wrapped(&mut lines, &profile.about.introduction, width, Style::default());
    for paragraph in &profile.about.paragraphs {
        lines.push(TextLine::default());
        push_wrapped(&mut lines, paragraph, width, Style::default());
    }
    lines.push(TextLine::default());
    lines
}

fn experience_lines(profile: &ProfileData, width: u16) -> Vec<TextLine<'static>> {
    let mut lines = vec![heading("Experience")];
    for entry in &profile.experiences {
        lines.push(TextLine::from(vec![
            Span::styled(
                entry.role.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" · {} · {}", entry.company, entry.period)),
        ]));
        lines.push(TextLine::from(Span::styled(
            entry.location.clone(),
            Style::default().fg(DIM),
        )));
        for item in &entry.description {
            push_wrapped(&mut lines, &format!("• {item}"), width, Style::default());
        }
        if !entry.skills.is_empty() {
            lines.push(TextLine::from(Span::styled(
                format!("Skills: {}", entry.skills.join(", ")),
                Style::default().fg(ACCENT),
            )));
        }
        lines.push(TextLine::default());
    }
    lines
}

fn project_lines(app: &App, profile: &ProfileData, width: u16) -> Vec<TextLine<'static>> {
    let mut lines = vec![heading("Projects")];

    // Filter tag bar with the selected tag highlighted
    let mut spans = vec![Span::styled("Filter: ", Style::default().fg(DIM))];
    for tag in &app.filter_tags {
        let style = if tag == app.current_filter() {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DIM)
        };
        spans.push(Span::styled(format!("[{tag}] "), style));
    }
    lines.push(TextLine::from(spans));
    lines.push(TextLine::default());

    let filtered = filter_projects(&profile.projects, app.current_filter());
    if filtered.is_empty() {
        lines.push(TextLine::from(Span::styled(
            "No projects match this filter.",
            Style::default().fg(DIM),
        )));
    }

    for project in filtered {
        lines.push(project_title_line(project));

        for item in &project.description {
            push_wrapped(&mut lines, item, width, Style::default());
        }
        lines.push(TextLine::from(Span::styled(
            format!("Skills: {}", project.skills.join(", ")),
            Style::default().fg(ACCENT),
        )));
        if let Some(link) = project.link.as_ref().or(project.repo.as_ref()) {
            lines.push(TextLine::from(Span::styled(
                format!("{}: {}", project.link_text, link),
                Style::default().fg(DIM),
            )));
        }
        lines.push(TextLine::default());
    }
    lines
}

/// Project heading with the period and the repo star/fork counts
fn project_title_line(project: &Project) -> TextLine<'static> {
    let mut title = vec![Span::styled(
        format!("{} {}", project.icon, project.name),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(ref period) = project.period {
        title.push(Span::styled(
            format!(" ({period})"),
            Style::default().fg(DIM),
        ));
    }
    if let Some(ref stars) = project.stars {
        title.push(Span::styled(
            format!("  ★ {stars}"),
            Style::default().fg(TuiColor::Yellow),
        ));
    }
    if let Some(ref forks) = project.forks {
        title.push(Span::styled(
            format!("  ⑂ {forks}"),
            Style::default().fg(DIM),
        ));
    }
    TextLine::from(title)
}

fn chat_lines(app: &App, width: u16) -> Vec<TextLine<'static>> {
    let mut lines = vec![heading("AI Chat")];

    for message in app.chat.messages() {
        let (prefix, style) = match message.sender {
            Sender::User => ("you ❯ ", Style::default().fg(TuiColor::White)),
            Sender::Assistant => (" ai ❯ ", Style::default().fg(ACCENT)),
        };

        if message.text.is_empty() && app.chat.state() == TurnState::Sending {
            lines.push(TextLine::from(vec![
                Span::styled(prefix.to_string(), style),
                Span::styled("thinking…", Style::default().fg(DIM)),
            ]));
            continue;
        }

        // Prefix width in columns, not bytes (the marker is multi-byte)
        let prefix_cols = prefix.chars().count();
        let wrap_width = usize::from(width).saturating_sub(prefix_cols + 1).max(20);
        for (i, wrapped) in textwrap::wrap(&message.text, wrap_width).iter().enumerate() {
            let lead = if i == 0 {
                Span::styled(prefix.to_string(), style)
            } else {
                Span::raw(" ".repeat(prefix_cols))
            };
            lines.push(TextLine::from(vec![
                lead,
                Span::raw(wrapped.to_string()),
            ]));
        }
    }

    if let Some(error) = app.chat.error() {
        lines.push(TextLine::from(Span::styled(
            format!("Error: {error}"),
            Style::default().fg(TuiColor::Red),
        )));
    }

    // Offer the example questions until the conversation gets going
    if app.chat.messages().len() <= 1 && !app.example_questions.is_empty() {
        lines.push(TextLine::default());
        for (i, question) in app.example_questions.iter().enumerate() {
            lines.push(TextLine::from(Span::styled(
                format!("  {}. {question}", i + 1),
                Style::default().fg(DIM),
            )));
        }
    }

    lines.push(TextLine::default());
    if app.chat.is_banned() {
        lines.push(TextLine::from(Span::styled(
            "Message limit reached for this session.",
            Style::default().fg(TuiColor::Yellow),
        )));
    } else {
        lines.push(TextLine::from(Span::styled(
            format!(
                "Messages left: {} of {}",
                app.chat.remaining_messages(),
                MAX_USER_MESSAGES
            ),
            Style::default().fg(DIM),
        )));
    }

    match app.mode {
        AppMode::ChatInput => {
            let (before, after) = app.input.split_at(app.cursor.min(app.input.len()));
            lines.push(TextLine::from(vec![
                Span::styled("> ", Style::default().fg(ACCENT)),
                Span::raw(before.to_string()),
                Span::styled("█", Style::default().fg(ACCENT)),
                Span::raw(after.to_string()),
            ]));
        }
        AppMode::Browse => {
            lines.push(TextLine::from(Span::styled(
                "press i to type a message",
                Style::default().fg(DIM),
            )));
        }
    }

    lines.push(TextLine::default());
    lines
}

/// Room section: the wireframe scene with its caption
fn scene_lines(app: &App, width: u16) -> Vec<TextLine<'static>> {
    let mut canvas = Canvas::new(u32::from(width), u32::from(SCENE_HEIGHT) * 2, BG_COLOR);
    app.room.draw(&mut canvas);

    let mut lines = vec![heading("3D Room")];
    let mut scene = canvas_to_lines(&canvas, width, SCENE_HEIGHT);
    overlay_centered(
        &mut scene,
        usize::from(SCENE_HEIGHT) - 1,
        "a quiet corner, always turning",
        Style::default().fg(DIM),
        width,
    );
    lines.append(&mut scene);
    lines.push(TextLine::default());
    lines
}

fn contact_lines(profile: &ProfileData) -> Vec<TextLine<'static>> {
    let mut lines = vec![heading("Contact")];

    if let Some(ref github) = profile.social.github {
        lines.push(TextLine::from(format!("GitHub    {github}")));
    }
    if let Some(ref linkedin) = profile.social.linkedin {
        lines.push(TextLine::from(format!("LinkedIn  {linkedin}")));
    }
    if profile.social.github.is_none() && profile.social.linkedin.is_none() {
        lines.push(TextLine::from(Span::styled(
            "No contact links in this profile.",
            Style::default().fg(DIM),
        )));
    }

    lines.push(TextLine::default());
    lines.push(TextLine::from(Span::styled(
        "press e to export the resume as PDF",
        Style::default().fg(DIM),
    )));
    lines.push(TextLine::default());
    lines
}

fn render_nav(frame: &mut Frame, area: Rect, app: &App, active: Option<Section>) {
    let mut spans = Vec::new();
    for section in app.sections() {
        let style = if Some(section) == active {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DIM)
        };
        spans.push(Span::styled(format!(" {} ", section.title()), style));
        spans.push(Span::styled("·", Style::default().fg(DIM)));
    }
    spans.pop();

    frame.render_widget(Paragraph::new(TextLine::from(spans)), area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let text = match &app.status {
        Some(status) => status.clone(),
        None => match app.mode {
            AppMode::Browse => {
                "q quit · j/k scroll · tab section · f filter · i chat · e export".to_string()
            }
            AppMode::ChatInput => "enter send · esc back · 1-9 example question".to_string(),
        },
    };

    frame.render_widget(
        Paragraph::new(TextLine::from(Span::styled(
            text,
            Style::default().fg(DIM),
        ))),
        area,
    );
}

fn heading(title: &str) -> TextLine<'static> {
    TextLine::from(Span::styled(
        format!("▍ {title}"),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))
}

/// Wrap text to the body width and append the lines
fn push_wrapped(lines: &mut Vec<TextLine<'static>>, text: &str, width: u16, style: Style) {
    let wrap_width = usize::from(width).saturating_sub(2).max(20);
    for wrapped in textwrap::wrap(text, wrap_width) {
        lines.push(TextLine::from(Span::styled(wrapped.to_string(), style)));
    }
}

/// Replace the cells under `text` at `row`, keeping the backdrop around
/// it. Canvas lines hold one single-width span per cell, so splicing by
/// index lines up with columns.
fn overlay_centered(
    lines: &mut [TextLine<'static>],
    row: usize,
    text: &str,
    style: Style,
    width: u16,
) {
    let Some(line) = lines.get_mut(row) else {
        return;
    };

    let cols = usize::from(width);
    let text_width = text.chars().count().min(cols);
    let start = (cols - text_width) / 2;

    let mut spans = std::mem::take(&mut line.spans);
    let tail_start = (start + text_width).min(spans.len());
    let tail = spans.split_off(tail_start);
    spans.truncate(start);
    spans.push(Span::styled(
        text.chars().take(text_width).collect::<String>(),
        style,
    ));
    spans.extend(tail);
    line.spans = spans;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_replaces_center_cells() {
        let canvas = Canvas::new(10, 4, Color::BLACK);
        let mut lines = canvas_to_lines(&canvas, 10, 2);

        overlay_centered(&mut lines, 0, "hi", Style::default(), 10);

        // 4 cells + the text span + 4 cells
        assert_eq!(lines[0].spans.len(), 9);
        assert_eq!(lines[0].spans[4].content.as_ref(), "hi");
    }

    #[test]
    fn test_overlay_truncates_long_text() {
        let canvas = Canvas::new(6, 4, Color::BLACK);
        let mut lines = canvas_to_lines(&canvas, 6, 2);

        overlay_centered(&mut lines, 0, "longer than six", Style::default(), 6);
        let joined: String = lines[0]
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(joined.chars().count(), 6);
    }

    #[test]
    fn test_overlay_out_of_range_row_is_noop() {
        let canvas = Canvas::new(6, 4, Color::BLACK);
        let mut lines = canvas_to_lines(&canvas, 6, 2);
        overlay_centered(&mut lines, 10, "x", Style::default(), 6);
    }

    #[test]
    fn test_chat_wrap_indent_matches_prefix_columns() {
        let dir = tempfile::tempdir().unwrap();
        let mut chat = crate::chat::ChatController::new(
            crate::chat::QuotaStore::at(dir.path().join("q.json")),
            "fp",
        );
        assert!(chat.begin_send(&"word ".repeat(30)));
        chat.finish_stream();
        let app = App::new(
            Err(crate::errors::FolioError::ProfileValidationError(
                "x".to_string(),
            )),
            None,
            chat,
        );

        let lines = chat_lines(&app, 30);
        let continuation = lines
            .iter()
            .find(|l| {
                l.spans.len() == 2
                    && !l.spans[0].content.is_empty()
                    && l.spans[0].content.chars().all(|c| c == ' ')
            })
            .expect("a wrapped continuation line");
        // "you ❯ " is 6 columns even though the marker is multi-byte
        assert_eq!(continuation.spans[0].content.chars().count(), 6);
    }

    #[test]
    fn test_project_title_shows_stars_and_forks() {
        let mut project = crate::profile::sample_profile().projects[0].clone();
        project.stars = Some("412".to_string());
        project.forks = Some("57".to_string());

        let line = project_title_line(&project);
        let joined: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(joined.contains("★ 412"));
        assert!(joined.contains("⑂ 57"));
    }

    #[test]
    fn test_heading_carries_title() {
        let line = heading("About");
        assert!(line.spans[0].content.contains("About"));
    }
}
