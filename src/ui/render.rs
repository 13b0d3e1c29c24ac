use crate::ui::app::{App, Display, FormField, Mode, NoticeLevel};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    // Main layout: Header + Body + Footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, main_chunks[0]);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_chunks[1]);

    render_categories(frame, app, body_chunks[0]);
    render_quote(frame, app, body_chunks[1]);
    render_footer(frame, app, main_chunks[2]);

    match app.mode {
        Mode::Browse => {}
        Mode::AddQuote => render_add_form(frame, app),
        Mode::Import => render_path_prompt(frame, app, "📂 Import quotes from"),
        Mode::Export => render_path_prompt(frame, app, "💾 Export quotes to"),
    }

    if app.show_help {
        render_help(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "  QUOTEBOX  ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} quotes · {}", app.store.len(), theme.name),
            Style::default().fg(theme.fg_dim),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent)),
    )
    .style(Style::default().bg(theme.bg));

    frame.render_widget(header, area);
}

fn render_categories(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let items: Vec<ListItem> = app
        .options
        .iter()
        .map(|option| {
            let count = app.store.filtered(option).len();
            ListItem::new(format!("{} ({})", option.label(), count))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("🏷️  Categories")
                .border_style(Style::default().fg(theme.accent)),
        )
        .style(Style::default().fg(theme.fg).bg(theme.bg))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .bg(theme.highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default().with_selected(Some(app.selected_option));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_quote(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let text = match &app.display {
        Display::Quote(quote) => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("\"{}\"", quote.text),
                Style::default()
                    .fg(theme.quote)
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("Category: {}", quote.category),
                Style::default().fg(theme.fg_dim),
            )),
        ],
        Display::NoMatch(filter) => vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("No quotes found in the category: "),
                Span::styled(
                    filter.as_str().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("."),
            ]),
        ],
        Display::NoQuotes => vec![Line::from(""), Line::from("No quotes available. Add one!")],
        Display::Blank => vec![],
    };

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("💬 Quote")
                .border_style(Style::default().fg(theme.fg_dim)),
        )
        .style(Style::default().fg(theme.fg).bg(theme.bg))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let footer = if let Some(notice) = &app.notice {
        let color = match notice.level {
            NoticeLevel::Info => theme.fg,
            NoticeLevel::Success => theme.success,
            NoticeLevel::Error => theme.error,
        };
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("[{}] ", notice.at.format("%H:%M:%S")),
                Style::default().fg(theme.fg_dim),
            ),
            Span::styled(notice.message.clone(), Style::default().fg(color)),
        ]))
    } else {
        let help_text = match app.mode {
            Mode::Browse => {
                "[n] New Quote  [↑↓/jk] Category  [a] Add  [o] Import  [e] Export  [t] Theme  [?] Help  [q] Quit"
            }
            Mode::AddQuote => "[Tab] Switch Field  [Enter] Add Quote  [Esc] Cancel",
            Mode::Import | Mode::Export => "[Enter] Confirm  [Esc] Cancel",
        };
        Paragraph::new(help_text).style(Style::default().fg(theme.fg_dim))
    };

    frame.render_widget(footer, area);
}

fn render_add_form(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(60, 9, frame.area());

    let field = |label: &str, value: &str, focused: bool| {
        let label_style = if focused {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg_dim)
        };
        let cursor = if focused { "▏" } else { "" };
        Line::from(vec![
            Span::styled(format!("{:<10}", label), label_style),
            Span::styled(format!("{}{}", value, cursor), Style::default().fg(theme.fg)),
        ])
    };

    let text = vec![
        Line::from(""),
        field(
            "Quote:",
            &app.form.text,
            app.form.focus == FormField::Text,
        ),
        Line::from(""),
        field(
            "Category:",
            &app.form.category,
            app.form.focus == FormField::Category,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Tab to switch, Enter to add, Esc to cancel",
            Style::default().fg(theme.fg_dim),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("✏️  Add Quote")
                .border_style(Style::default().fg(theme.accent)),
        )
        .style(Style::default().bg(theme.bg))
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn render_path_prompt(frame: &mut Frame, app: &App, title: &str) {
    let theme = &app.theme;
    let area = centered_rect(60, 5, frame.area());

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Path: ", Style::default().fg(theme.fg_dim)),
            Span::styled(
                format!("{}▏", app.path_input),
                Style::default().fg(theme.fg),
            ),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .border_style(Style::default().fg(theme.accent)),
        )
        .style(Style::default().bg(theme.bg));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = centered_rect(50, 14, frame.area());

    let key = |k: &str, desc: &str| {
        Line::from(vec![
            Span::styled(
                format!("  {:<10}", k),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc.to_string(), Style::default().fg(theme.fg)),
        ])
    };

    let text = vec![
        Line::from(""),
        key("n / Space", "Show a new random quote"),
        key("j / k", "Change the category filter"),
        key("a", "Add a quote"),
        key("o", "Import quotes from a JSON file"),
        key("e", "Export all quotes to a JSON file"),
        key("t", "Next color theme"),
        key("Esc", "Dismiss message"),
        key("?", "Toggle this help"),
        key("q", "Quit"),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("❓ Help")
                .border_style(Style::default().fg(theme.accent)),
        )
        .style(Style::default().bg(theme.bg));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

/// A rect `percent_x` wide and `height` rows tall, centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
