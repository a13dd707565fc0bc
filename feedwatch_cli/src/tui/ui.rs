//! TUI rendering functions

use super::app::{DashboardApp, View};
use feedwatch_core::{Direction, DirectionFilter, EventRow, LogKind, LogRow, LogStatus};
use ratatui::{
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the dashboard
pub fn draw(frame: &mut Frame, app: &DashboardApp) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(1), // Stats row
            Constraint::Length(1), // Filter row
            Constraint::Min(3),    // Feed list
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_title(frame, app, chunks[0]);
    draw_stats(frame, app, chunks[1]);
    draw_filters(frame, app, chunks[2]);
    match app.view {
        View::Events => draw_event_list(frame, app, chunks[3]),
        View::Logs => draw_log_list(frame, app, chunks[3]),
    }
    draw_footer(frame, app, chunks[4]);
}

fn draw_title(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let refreshed = match app.view {
        View::Events => app.events_refreshed_at,
        View::Logs => app.logs_refreshed_at,
    };
    let refreshed = refreshed
        .map(|t| format!("refreshed {}", t.format("%H:%M:%S")))
        .unwrap_or_else(|| "waiting for first poll".to_string());

    let line = Line::from(vec![
        Span::styled(
            " FEEDWATCH ",
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", app.view.as_str()), Style::default().fg(Color::White)),
        Span::styled(format!("· {}", refreshed), Style::default().fg(Color::DarkGray)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn draw_stats(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let line = match app.view {
        View::Events => {
            let stats = app.events.stats();
            Line::from(vec![
                Span::styled("Total ", Style::default().fg(Color::DarkGray)),
                Span::styled(stats.total.to_string(), Style::default().fg(Color::White)),
                Span::styled(" │ Incoming ", Style::default().fg(Color::DarkGray)),
                Span::styled(stats.incoming.to_string(), Style::default().fg(Color::Green)),
                Span::styled(" │ Outgoing ", Style::default().fg(Color::DarkGray)),
                Span::styled(stats.outgoing.to_string(), Style::default().fg(Color::Blue)),
                Span::styled(" │ Errors ", Style::default().fg(Color::DarkGray)),
                Span::styled(stats.error.to_string(), Style::default().fg(Color::Red)),
            ])
        }
        View::Logs => {
            let stats = app.logs.stats();
            Line::from(vec![
                Span::styled("Requests ", Style::default().fg(Color::DarkGray)),
                Span::styled(stats.requests.to_string(), Style::default().fg(Color::Yellow)),
                Span::styled(" │ Success ", Style::default().fg(Color::DarkGray)),
                Span::styled(stats.successes.to_string(), Style::default().fg(Color::Green)),
                Span::styled(" │ Errors ", Style::default().fg(Color::DarkGray)),
                Span::styled(stats.errors.to_string(), Style::default().fg(Color::Red)),
            ])
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn draw_filters(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let line = match app.view {
        View::Events => {
            let mut spans = vec![Span::styled("Filter ", Style::default().fg(Color::DarkGray))];
            for filter in [
                DirectionFilter::All,
                DirectionFilter::Incoming,
                DirectionFilter::Outgoing,
                DirectionFilter::Error,
            ] {
                let style = if filter == app.events.filter() {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::White)
                };
                spans.push(Span::styled(format!(" {} ", filter.as_str()), style));
                spans.push(Span::raw(" "));
            }
            Line::from(spans)
        }
        View::Logs => {
            let toggle = |label: &str, on: bool| {
                let style = if on {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Span::styled(format!(" {} ", label), style)
            };
            Line::from(vec![
                Span::styled("Show ", Style::default().fg(Color::DarkGray)),
                toggle("requests", app.logs.filters.show_requests),
                Span::raw(" "),
                toggle("responses", app.logs.filters.show_responses),
                Span::raw(" "),
                toggle("errors", app.logs.filters.show_errors),
            ])
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn draw_event_list(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0;
    let mut entry_index = 0;

    for row in app.events.rows() {
        match row {
            EventRow::Entry {
                direction,
                kind,
                timestamp,
                expanded,
            } => {
                let is_selected = entry_index == app.selected;
                if is_selected {
                    selected_line = lines.len();
                }
                let row_style = if is_selected {
                    Style::default().bg(Color::Rgb(40, 40, 60))
                } else {
                    Style::default()
                };

                lines.push(
                    Line::from(vec![
                        Span::styled(format!("{:<9}", direction.as_str()), direction_style(direction)),
                        Span::styled(kind, Style::default().fg(Color::White)),
                        Span::raw("  "),
                        Span::styled(timestamp, Style::default().fg(Color::DarkGray)),
                    ])
                    .style(row_style),
                );

                if let Some(payload) = expanded {
                    for text in payload.lines() {
                        lines.push(Line::from(Span::styled(
                            format!("    {}", text),
                            Style::default().fg(Color::Gray),
                        )));
                    }
                }
                entry_index += 1;
            }
            EventRow::Empty => {
                lines.push(Line::from(Span::styled(
                    "No events to display",
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                )));
            }
            EventRow::Error(message) => {
                lines.push(Line::from(Span::styled(
                    message,
                    Style::default().fg(Color::Red),
                )));
            }
        }
    }

    let block = Block::default()
        .title(format!(" Events ({}) ", app.events.visible_len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = selected_line.saturating_sub(inner_height.saturating_sub(1));

    let paragraph = Paragraph::new(lines).block(block).scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

fn draw_log_list(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let rows = app.logs.visible_rows();
    let mut lines: Vec<Line> = Vec::new();

    for row in &rows {
        lines.push(Line::from(vec![
            Span::styled(format!("#{} ", row.id), Style::default().fg(Color::Cyan)),
            Span::styled(&row.timestamp, Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            badge(row),
        ]));
        lines.push(Line::from(Span::styled(
            row.summary.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));

        for section in &row.sections {
            lines.push(Line::from(Span::styled(
                format!("  {}", section.label),
                Style::default().fg(Color::DarkGray),
            )));
            for text in section.body.lines() {
                lines.push(Line::from(Span::styled(
                    format!("    {}", text),
                    Style::default().fg(Color::Gray),
                )));
            }
        }
        lines.push(Line::from(""));
    }

    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "No logs to display",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let inner_height = area.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(inner_height);
    let scroll = app.log_scroll.min(max_scroll);

    let block = Block::default()
        .title(format!(" Logs ({}) ", rows.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(lines).block(block).scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let hint = |key: &str, action: &str| {
        vec![
            Span::styled(key.to_string(), Style::default().fg(Color::Cyan)),
            Span::styled(format!(" {}  ", action), Style::default().fg(Color::DarkGray)),
        ]
    };

    let mut spans = Vec::new();
    match app.view {
        View::Events => {
            spans.extend(hint("Tab", "Logs"));
            spans.extend(hint("a/i/o/e", "Filter"));
            spans.extend(hint("↑/↓", "Select"));
            spans.extend(hint("Enter", "Expand"));
        }
        View::Logs => {
            spans.extend(hint("Tab", "Events"));
            spans.extend(hint("r/s/x", "Toggle"));
            spans.extend(hint("↑/↓", "Scroll"));
        }
    }
    spans.extend(hint("Ctrl+C", "Quit"));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Get style for an event direction
fn direction_style(direction: Direction) -> Style {
    match direction {
        Direction::Incoming => Style::default().fg(Color::Green),
        Direction::Outgoing => Style::default().fg(Color::Blue),
        Direction::Error => Style::default().fg(Color::Red),
        Direction::Unknown => Style::default().fg(Color::DarkGray),
    }
}

/// Category badge for a log row
fn badge(row: &LogRow) -> Span<'static> {
    match (row.kind, row.status) {
        (LogKind::Request, _) => Span::styled("Request", Style::default().fg(Color::Yellow)),
        (LogKind::Response, LogStatus::Error) => {
            Span::styled("Error", Style::default().fg(Color::Red))
        }
        (LogKind::Response, _) => Span::styled("Response", Style::default().fg(Color::Green)),
    }
}
