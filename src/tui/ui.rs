use crate::search::FilterField;
use crate::tui::app::{App, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Query input
            Constraint::Length(3), // Filter row
            Constraint::Min(5),    // Results
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_query_input(f, app, chunks[0]);
    draw_filter_row(f, app, chunks[1]);
    draw_results_list(f, app, chunks[2]);
    draw_status_bar(f, app, chunks[3]);
}

fn draw_query_input(f: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Query;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let input = Paragraph::new(app.query_input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Search recipes (Tab: filters, Enter: search now, Esc: clear/quit) "),
        );

    f.render_widget(input, area);

    if focused {
        f.set_cursor_position((
            area.x + app.query_input.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}

fn draw_filter_row(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area);

    for (field, rect) in FilterField::ALL.iter().zip(chunks.iter()) {
        draw_filter_box(f, app, *field, *rect);
    }
}

fn draw_filter_box(f: &mut Frame, app: &App, field: FilterField, area: Rect) {
    let focused = app.focus == Focus::Filter(field);
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    // Cuisine and diet are preset pickers; the other two are text inputs
    let is_picker = matches!(field, FilterField::Cuisine | FilterField::Diet);
    let value = app.filter_value(field);

    let (text, style) = if is_picker {
        let shown = if value.is_empty() { "any" } else { value.as_str() };
        let style = if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        (format!("< {shown} >"), style)
    } else {
        (value.clone(), Style::default())
    };

    let widget = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", field.label())),
    );
    f.render_widget(widget, area);

    if focused && !is_picker {
        f.set_cursor_position((area.x + value.chars().count() as u16 + 1, area.y + 1));
    }
}

fn draw_results_list(f: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .snapshot
        .recipes
        .iter()
        .enumerate()
        .map(|(i, recipe)| {
            let style = if i == app.selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let ready = recipe
                .ready_in_minutes
                .map(|minutes| format!("{minutes} min"))
                .unwrap_or_default();

            let line = Line::from(vec![
                Span::styled(format!("{:>3}  ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(recipe.title.clone(), Style::default().fg(Color::White)),
                Span::raw("  "),
                Span::styled(ready, Style::default().fg(Color::Cyan)),
            ]);

            ListItem::new(line).style(style)
        })
        .collect();

    let title = match app.snapshot.total_results {
        Some(total) => format!(" Recipes ({} of {}) ", app.snapshot.recipes.len(), total),
        None => format!(" Recipes ({}) ", app.snapshot.recipes.len()),
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray));

    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let style = if app.snapshot.error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let status = Paragraph::new(app.status_line()).style(style);
    f.render_widget(status, area);
}
