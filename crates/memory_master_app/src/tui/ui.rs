//! Stateless rendering of the memory grid.

use super::app::{App, GRID_COLUMNS};
use crate::Scoreboard;
use memory_master::{CardView, GameMode, GameSnapshot, GameStatus, format_time};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

const CELL_WIDTH: u16 = 10;
const CELL_HEIGHT: u16 = 3;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let game = &app.view().game;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(CELL_HEIGHT * 4 + 2), // Grid
            Constraint::Length(3), // Scores
            Constraint::Length(3), // Controls
        ])
        .split(area);

    draw_header(frame, chunks[0], game);
    draw_grid(frame, chunks[1], game, app.cursor());
    draw_scores(frame, chunks[2], &app.view().scoreboard);
    draw_controls(frame, chunks[3]);

    if let Some(summary) = game.win_summary() {
        draw_popup(frame, area, &summary.to_string());
    }
}

fn draw_header(frame: &mut Frame, area: Rect, game: &GameSnapshot) {
    let status_style = match game.status {
        GameStatus::Preview => Style::default().fg(Color::Magenta),
        GameStatus::Won => Style::default().fg(Color::Green),
        GameStatus::Idle | GameStatus::Playing => Style::default().fg(Color::Yellow),
    };
    let line = Line::from(vec![
        Span::styled(
            "Memory Master",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  [{}]  ", game.mode)),
        Span::styled(game.status_line(), status_style),
        Span::raw(format!(
            "  Moves: {}  Time: {}",
            game.moves,
            game.formatted_time()
        )),
    ]);
    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_grid(frame: &mut Frame, area: Rect, game: &GameSnapshot, cursor: usize) {
    if game.cards.is_empty() {
        let idle = Paragraph::new("Press c or m to deal").alignment(Alignment::Center);
        frame.render_widget(idle, center_rect(area, 30, 1));
        return;
    }

    let columns = GRID_COLUMNS as u16;
    let rows = game.cards.len().div_ceil(GRID_COLUMNS) as u16;
    let grid_area = center_rect(area, CELL_WIDTH * columns, CELL_HEIGHT * rows);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CELL_HEIGHT); rows as usize])
        .split(grid_area);

    for (row_area, cards) in row_areas.iter().zip(game.cards.chunks(GRID_COLUMNS)) {
        let cell_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(CELL_WIDTH); GRID_COLUMNS])
            .split(*row_area);
        for (cell_area, card) in cell_areas.iter().zip(cards) {
            draw_card(frame, *cell_area, card, card.id.index() == cursor);
        }
    }
}

fn draw_card(frame: &mut Frame, area: Rect, card: &CardView, selected: bool) {
    let (face, style) = if card.is_matched {
        (card.content.glyph(), Style::default().fg(Color::Green))
    } else if card.is_flipped {
        (
            card.content.glyph(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )
    } else {
        ("?", Style::default().fg(Color::DarkGray))
    };

    let border = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let cell = Paragraph::new(Span::styled(face, style))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(border));
    frame.render_widget(cell, area);
}

fn draw_scores(frame: &mut Frame, area: Rect, scoreboard: &Scoreboard) {
    let entry = |mode: GameMode| match scoreboard.get(mode) {
        Some(record) => format!(
            "{}: {} won, best {} / {} moves",
            mode,
            record.games_won(),
            format_time(*record.best_time()),
            record.fewest_moves()
        ),
        None => format!("{}: -", mode),
    };
    let scores = Paragraph::new(format!(
        "{}    {}",
        entry(GameMode::Classic),
        entry(GameMode::Remember)
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Best"));
    frame.render_widget(scores, area);
}

fn draw_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new(
        "Arrows: move | Enter/Space: flip | c: classic | m: remember | n: new game | q: quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(controls, area);
}

fn draw_popup(frame: &mut Frame, area: Rect, message: &str) {
    let popup = center_rect(area, 40, 5);
    let text = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("n: play again | q: quit"),
    ];
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Congratulations!")),
        popup,
    );
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
