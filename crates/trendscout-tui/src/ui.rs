// UI rendering logic
use crate::app::{App, ViewState};
use crate::browse::BrowseView;
use crate::fetch::FetchView;
use crate::item::{AiStatus, ListItem};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem as ListRow, ListState, Paragraph, Wrap},
    Frame,
};
use trendscout_core::models::format_count;
use trendscout_core::Language;

const PROGRESS_BAR_WIDTH: usize = 71;
const RAMP_START: (u8, u8, u8) = (0xB1, 0x4F, 0xFF);
const RAMP_END: (u8, u8, u8) = (0x00, 0xFF, 0xA3);

const ACCENT: Color = Color::Rgb(0xfe, 0x80, 0x19);
const SUBTLE: Color = Color::Rgb(0x92, 0x83, 0x74);
const CHECKED: Color = Color::Indexed(212);
const TICKS: Color = Color::Indexed(79);

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    match app.view() {
        ViewState::Fetching(fetch) => render_fetch(frame, fetch, area),
        ViewState::Browsing(browse) => render_browse(frame, browse, area),
    }
}

fn render_fetch(frame: &mut Frame, fetch: &FetchView, area: Rect) {
    let lines = if fetch.quitting() {
        vec![Line::from(""), Line::from("  See you later!")]
    } else if fetch.chosen() {
        chosen_lines(fetch)
    } else {
        choice_lines(fetch)
    };

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" trendscout "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn choice_lines(fetch: &FetchView) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(""),
        Line::from("  Which language do you want to pick up?"),
        Line::from(""),
    ];

    for (i, language) in Language::ALL.iter().enumerate() {
        lines.push(checkbox(*language, i == fetch.choice()));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  Program quits in "),
        Span::styled(fetch.ticks().to_string(), Style::default().fg(TICKS)),
        Span::raw(" seconds"),
    ]));
    lines.push(Line::from(""));
    lines.push(help_line(&[
        "j/k, up/down: select",
        "enter: choose",
        "q, esc: quit",
    ]));
    lines
}

fn checkbox(language: Language, checked: bool) -> Line<'static> {
    if checked {
        Line::from(Span::styled(
            format!("  [*] {}", language),
            Style::default().fg(CHECKED),
        ))
    } else {
        Line::from(format!("  [ ] {}", language))
    }
}

fn chosen_lines(fetch: &FetchView) -> Vec<Line<'static>> {
    let language = fetch.language();
    let mut lines = vec![Line::from(""), Line::from("")];

    if let Some(error) = fetch.error() {
        lines.push(Line::from(Span::styled(
            format!("  Error: {}.", error),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(vec![
            Span::raw("  Exiting in "),
            Span::styled(fetch.ticks().to_string(), Style::default().fg(TICKS)),
            Span::raw(" seconds..."),
        ]));
    } else if fetch.loaded() {
        lines.push(Line::from(format!(
            "  Prefetched {} {} projects, opening the list...",
            fetch.result_count(),
            language
        )));
    } else {
        lines.push(Line::from(format!(
            "  🐊 Crawling today's most exciting {} projects on GitHub",
            language
        )));
    }

    lines.push(progress_bar(fetch.progress()));
    lines
}

/// Gradient bar followed by the percentage
pub fn progress_bar(percent: f64) -> Line<'static> {
    let percent = percent.clamp(0.0, 1.0);
    let full = (PROGRESS_BAR_WIDTH as f64 * percent).round() as usize;

    let mut spans = vec![Span::raw("  ")];
    spans.extend(
        (0..full).map(|i| Span::styled("█", Style::default().fg(ramp(i, PROGRESS_BAR_WIDTH)))),
    );
    spans.push(Span::styled(
        "░".repeat(PROGRESS_BAR_WIDTH - full),
        Style::default().fg(SUBTLE),
    ));
    spans.push(Span::raw(format!(" {:3.0}%", (percent * 100.0).round())));

    Line::from(spans)
}

/// Linear blend between the two ramp ends
fn ramp(step: usize, steps: usize) -> Color {
    let t = step as f64 / steps.max(1) as f64;
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;

    Color::Rgb(
        mix(RAMP_START.0, RAMP_END.0),
        mix(RAMP_START.1, RAMP_END.1),
        mix(RAMP_START.2, RAMP_END.2),
    )
}

fn help_line(entries: &[&str]) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(SUBTLE)));
        }
        spans.push(Span::styled(entry.to_string(), Style::default().fg(SUBTLE)));
    }
    Line::from(spans)
}

fn render_browse(frame: &mut Frame, browse: &BrowseView, area: Rect) {
    let layout = browse.layout();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(layout.pane_height().min(area.height.saturating_sub(2))),
            Constraint::Length(1), // Filter input
            Constraint::Length(1), // Help
        ])
        .split(area);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(layout.list_width()),
            Constraint::Min(10),
        ])
        .split(rows[0]);

    render_repo_list(frame, browse, panes[0]);

    let detail = Paragraph::new(browse.detail())
        .block(Block::default().borders(Borders::ALL).title(" Details "))
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, panes[1]);

    render_filter_line(frame, browse, rows[1]);

    frame.render_widget(
        Paragraph::new(help_line(&[
            "j/k, up/down: select",
            "enter: ask AI",
            "/: filter",
            "q, esc: back",
        ])),
        rows[2],
    );
}

fn render_repo_list(frame: &mut Frame, browse: &BrowseView, area: Rect) {
    let list = browse.list();
    // Leave room for borders and the highlight symbol
    let text_width = area.width.saturating_sub(5) as usize;

    let rows: Vec<ListRow> = list
        .visible_items()
        .map(|item| ListRow::new(repo_lines(item, text_width)))
        .collect();

    let title = format!(
        " 🔥 Trending · {}/{} · fetched {} ",
        list.visible_len(),
        list.len(),
        browse.fetched_at().format("%Y-%m-%d %H:%M")
    );

    let widget = List::new(rows)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(SUBTLE)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if list.visible_len() > 0 {
        state.select(Some(list.cursor()));
    }
    frame.render_stateful_widget(widget, area, &mut state);
}

fn repo_lines(item: &ListItem, width: usize) -> Vec<Line<'static>> {
    let record = &item.record;

    let badge = match item.ai_status {
        AiStatus::Ready => "",
        AiStatus::InProgress => " ⏳",
        AiStatus::Failed => " 😫",
        AiStatus::Success => " ✨",
    };

    let title = Line::from(vec![
        Span::styled(
            format!("🔶 {}", record.name),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw(badge),
    ]);

    let stats = Line::from(vec![
        Span::styled(
            format!("  {}💻", record.language),
            Style::default().fg(Color::Rgb(147, 112, 219)),
        ),
        Span::styled(
            format!("  {}🔥", format_count(record.stars_today)),
            Style::default().fg(Color::Rgb(255, 99, 71)),
        ),
        Span::styled(
            format!("  {}🔧", format_count(record.forks)),
            Style::default().fg(Color::Rgb(100, 149, 237)),
        ),
        Span::styled(
            format!("  {}⭐", format_count(record.stars)),
            Style::default().fg(Color::Rgb(255, 215, 0)),
        ),
    ]);

    let description = Line::from(Span::styled(
        format!("  {}", truncate(&record.description, width.saturating_sub(2))),
        Style::default().fg(Color::Rgb(105, 105, 105)),
    ));

    vec![title, stats, description]
}

fn render_filter_line(frame: &mut Frame, browse: &BrowseView, area: Rect) {
    let line = if browse.filtering() {
        Line::from(vec![
            Span::styled(" / ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            Span::raw(browse.filter_input().to_string()),
            Span::styled("▏", Style::default().fg(ACCENT)),
        ])
    } else if !browse.list().filter().is_empty() {
        Line::from(Span::styled(
            format!(" filter: {} (/ to edit, esc in edit to clear)", browse.list().filter()),
            Style::default().fg(SUBTLE),
        ))
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Cut to `max` characters, ending in "..." when something was dropped
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{key, Message};
    use crate::item::record;
    use crate::layout::PaneLayout;
    use crate::tasks::mocks::{self, MockAnalyst, MockTrending};
    use crossterm::event::KeyCode;
    use ratatui::{backend::TestBackend, Terminal};
    use trendscout_core::config::UiConfig;

    fn screen(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app() -> App {
        App::new(
            mocks::runner(MockTrending::new(), MockAnalyst::new()),
            UiConfig::default(),
            PaneLayout::new(120, 40),
        )
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer description", 10), "a longe...");
        assert_eq!(truncate("ünïcödé text", 5), "ün...");
        assert_eq!(truncate("abc", 2), "ab");
    }

    #[test]
    fn test_progress_bar() {
        let empty = progress_bar(0.0);
        // padding, the empty run, the percentage
        assert_eq!(empty.spans.len(), 3);
        assert!(empty.spans[2].content.contains("0%"));

        let full = progress_bar(1.0);
        assert_eq!(full.spans.len(), PROGRESS_BAR_WIDTH + 3);
        assert_eq!(full.spans[PROGRESS_BAR_WIDTH + 1].content, "");
        assert!(full.spans[PROGRESS_BAR_WIDTH + 2].content.contains("100%"));
    }

    #[test]
    fn test_ramp_ends() {
        assert_eq!(ramp(0, 71), Color::Rgb(0xB1, 0x4F, 0xFF));
        assert_eq!(ramp(71, 71), Color::Rgb(0x00, 0xFF, 0xA3));
    }

    #[tokio::test]
    async fn test_picker_screen() {
        let app = app();
        let text = screen(&app, 80, 24);

        assert!(text.contains("[*] all"));
        assert!(text.contains("[ ] go"));
        assert!(text.contains("Program quits in 30 seconds"));
    }

    #[tokio::test]
    async fn test_browse_screen() {
        let mut app = app();
        app.update(Message::CrawlDone(vec![record("a/one"), record("b/two")]));
        app.update(key(KeyCode::Char('j')));

        let text = screen(&app, 120, 40);
        assert!(text.contains("a/one"));
        assert!(text.contains("b/two"));
        assert!(text.contains("Repository Inspiration"));
        assert!(text.contains("2/2"));
    }
}
