use crate::format_count;
use crate::github::Repo;
use crate::tui::app::{App, View};
use crate::tui::colors;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use unicode_width::UnicodeWidthStr;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // The detail view replaces the whole screen
    if let View::Detail(repo) = &app.view {
        draw_detail(frame, repo, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Length(1), // Filter line
            Constraint::Min(5),    // Results
            Constraint::Length(1), // Pagination
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_search_bar(frame, app, chunks[0]);
    draw_filter_line(frame, app, chunks[1]);
    draw_results(frame, app, chunks[2]);
    draw_pagination(frame, app, chunks[3]);
    draw_status_bar(frame, app, chunks[4]);

    if app.show_history && !app.controller.history.is_empty() {
        draw_history_dropdown(frame, app, chunks[0], area);
    }

    // Show cursor in the search bar unless a history row is highlighted
    if app.input.focused && app.history_selected.is_none() {
        // Border (1) + search icon " \u{1F50D} " (approx 4 display cols)
        let prefix = app.input.text[..app.input.cursor].width() as u16;
        let cursor_x = (chunks[0].x + 1 + 4 + prefix).min(chunks[0].right().saturating_sub(2));
        frame.set_cursor_position(Position::new(cursor_x, chunks[0].y + 1));
    }
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.input.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Search GitHub repositories ");

    let text = format!(" \u{1F50D} {}", app.input.text);
    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn language_label(language: Option<&str>) -> &str {
    match language {
        None => "All",
        Some("r") => "R",
        Some("c") => "C",
        Some("python") => "Python",
        Some("javascript") => "Javascript",
        Some(other) => other,
    }
}

fn draw_filter_line(frame: &mut Frame, app: &App, area: Rect) {
    let controller = &app.controller;

    let dim = if controller.loading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let accent = if controller.loading {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let stars = if controller.sort_by_stars { "ON" } else { "OFF" };
    // Like the web original, the order label names the direction a toggle
    // would switch to.
    let order_target = controller.order.toggled();
    let order_arrow = match controller.order {
        crate::github::SortOrder::Descending => "\u{2191}",
        crate::github::SortOrder::Ascending => "\u{2193}",
    };

    let spans = vec![
        Span::styled(" Sort by stars: ", dim),
        Span::styled(stars, accent),
        Span::styled(" [s]", Style::default().fg(Color::DarkGray)),
        Span::styled("  \u{2502}  Order: ", dim),
        Span::styled(format!("{} {}", order_target.label(), order_arrow), accent),
        Span::styled(" [o]", Style::default().fg(Color::DarkGray)),
        Span::styled("  \u{2502}  Language: ", dim),
        Span::styled(language_label(controller.language.as_deref()), accent),
        Span::styled(" [l]", Style::default().fg(Color::DarkGray)),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_results(frame: &mut Frame, app: &mut App, area: Rect) {
    let border_style = if app.input.focused {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Results ");

    if app.controller.items.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        draw_results_placeholder(frame, app, inner);
        return;
    }

    // Area height minus borders and header
    let table_inner_height = area.height.saturating_sub(3) as usize;
    app.table.visible_rows = table_inner_height;

    let header = Row::new(
        ["Name", "Language", "\u{2B50} Stars", "Forks", "Owner", "Description"]
            .iter()
            .map(|name| {
                Cell::from(*name).style(
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Rgb(0, 95, 135))
                        .add_modifier(Modifier::BOLD),
                )
            }),
    )
    .height(1);

    let start = app.table.scroll_offset;
    let end = (start + table_inner_height).min(app.controller.items.len());

    let rows: Vec<Row> = app.controller.items[start..end]
        .iter()
        .enumerate()
        .map(|(offset, repo)| {
            let index = start + offset;
            let language = repo.language.as_deref().unwrap_or("");
            let owner = repo.owner.as_ref().map(|o| o.login.as_str()).unwrap_or("");

            let row = Row::new(vec![
                Cell::from(repo.name.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(language.to_string())
                    .style(Style::default().fg(colors::color_for_language(language))),
                Cell::from(format_count(repo.stargazers_count))
                    .style(Style::default().fg(colors::star_color(repo.stargazers_count))),
                Cell::from(format_count(repo.forks)),
                Cell::from(owner.to_string()).style(Style::default().fg(Color::Gray)),
                Cell::from(repo.description.clone().unwrap_or_default())
                    .style(Style::default().fg(Color::Gray)),
            ]);

            if app.table.selected == Some(index) {
                row.style(
                    Style::default()
                        .bg(Color::Rgb(40, 40, 50))
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                row
            }
        })
        .collect();

    let widths = [
        Constraint::Length(28),
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Length(7),
        Constraint::Length(16),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn draw_results_placeholder(frame: &mut Frame, app: &App, area: Rect) {
    let controller = &app.controller;

    let lines: Vec<Line> = if controller.loading {
        vec![Line::from(Span::styled(
            "Searching...",
            Style::default().fg(Color::Cyan),
        ))]
    } else if !controller.has_result {
        vec![
            Line::from(""),
            Line::from("Search GitHub repositories by topic."),
            Line::from(""),
            Line::from(Span::styled(
                "Type a topic above and press Enter.",
                Style::default().fg(Color::Gray),
            )),
        ]
    } else if let Some(message) = &controller.error_message {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            )),
        ]
    } else {
        vec![
            Line::from(""),
            Line::from(vec![
                Span::raw("Your search - "),
                Span::styled(
                    controller.topic.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(" - did not match any documents."),
            ]),
            Line::from(""),
            Line::from("Suggestions:"),
            Line::from("  \u{2022} Make sure that all words are spelled correctly"),
            Line::from("  \u{2022} Try different keywords."),
            Line::from("  \u{2022} Try more general keywords."),
        ]
    };

    let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn draw_pagination(frame: &mut Frame, app: &App, area: Rect) {
    let controller = &app.controller;
    if !controller.show_pagination() {
        return;
    }

    let at_first = controller.page <= 1;
    let at_last = controller.page >= controller.page_count();

    let edge_style = Style::default().fg(Color::DarkGray);
    let active_style = Style::default().fg(Color::Cyan);

    let spans = vec![
        Span::styled(
            " \u{2190} [p] prev ",
            if at_first { edge_style } else { active_style },
        ),
        Span::styled(
            format!(" Page {} of {} ", controller.page, controller.page_count()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            " [n] next \u{2192} ",
            if at_last { edge_style } else { active_style },
        ),
    ];

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = "Tab search \u{2502} s stars \u{2502} o order \u{2502} l lang \u{2502} Enter details \u{2502} Esc quit ";

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(hints.width() as u16)])
        .split(area);

    let status = if app.controller.loading {
        Span::styled(
            " Searching...",
            Style::default().fg(Color::Cyan),
        )
    } else {
        Span::styled(
            format!(" {}", app.status_message),
            Style::default().fg(Color::White),
        )
    };

    frame.render_widget(Paragraph::new(Line::from(status)), chunks[0]);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        ))),
        chunks[1],
    );
}

fn draw_history_dropdown(frame: &mut Frame, app: &App, search_area: Rect, area: Rect) {
    let history = &app.controller.history;

    let width = search_area.width.min(44);
    let height = (history.len() as u16 + 2).min(area.height.saturating_sub(search_area.bottom()));
    if width < 10 || height < 3 {
        return;
    }

    let popup_area = Rect::new(search_area.x, search_area.bottom(), width, height);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Recent searches (Del removes) ");

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    for (i, topic) in history.iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }

        let is_selected = app.history_selected == Some(i);
        let style = if is_selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let row_area = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
        let text = format!(" \u{1F552} {}", topic);
        frame.render_widget(Paragraph::new(text).style(style), row_area);
    }
}

fn draw_detail(frame: &mut Frame, repo: &Repo, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", repo.name));

    let mut badge_spans = Vec::new();
    if let Some(language) = &repo.language {
        badge_spans.push(Span::styled(
            format!(" {} ", language),
            Style::default()
                .fg(Color::Black)
                .bg(colors::color_for_language(language)),
        ));
        badge_spans.push(Span::raw("  "));
    }
    badge_spans.push(Span::styled(
        format!(
            "\u{2022} {} forks  \u{2022} {} stars",
            format_count(repo.forks),
            format_count(repo.stargazers_count)
        ),
        Style::default().fg(Color::Gray),
    ));

    let owner = repo
        .owner
        .as_ref()
        .map(|o| o.login.as_str())
        .unwrap_or("unknown");

    let mut lines = vec![
        Line::from(""),
        Line::from(badge_spans),
        Line::from(""),
        Line::from(Span::styled(
            format!("By {}", owner),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    if let Some(description) = &repo.description {
        lines.push(Line::from(description.clone()));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        repo.html_url.clone(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::UNDERLINED),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[o] open in browser   [y] copy url   [Esc] go back",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
