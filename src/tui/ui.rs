//! Stateless UI rendering for connect-k.

use connect_k::{Cell, Column, Game, Mark, Projection};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Characters per board cell.
const CELL_WIDTH: usize = 4;

/// Renders the board, cursor and status.
pub fn draw(frame: &mut Frame, game: &Game, projection: &Projection, cursor: Column, status: &str) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(4),    // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Keys
        ])
        .split(area);

    // Title
    let k = game.config().map_or(0, |config| *config.k());
    let title = Paragraph::new(format!("CONNECT-K={}", k))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .centered();
    frame.render_widget(title, chunks[0]);

    // Board
    draw_board(frame, chunks[1], game, projection, cursor);

    // Status
    let status_text = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .centered()
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_text, chunks[2]);

    let keys = Paragraph::new("←/→ move  Enter play  u undo  h hint  r restart  q quit")
        .style(Style::default().fg(Color::DarkGray))
        .centered();
    frame.render_widget(keys, chunks[3]);
}

fn draw_board(frame: &mut Frame, area: Rect, game: &Game, projection: &Projection, cursor: Column) {
    let last_move = game.engine().last_move();
    let open = !game.is_over();
    let bottom = projection.height().saturating_sub(1);

    let mut lines: Vec<Line> = projection
        .rows
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            let mut spans = vec![row_label(projection.depth_of_row(row))];
            spans.extend(projection.columns().zip(cells).map(|(column, cell)| {
                let highlight = open && row == bottom && column == cursor;
                cell_span(*cell, highlight)
            }));
            Line::from(spans)
        })
        .collect();

    let mut labels = vec![Span::raw(" ".repeat(CELL_WIDTH))];
    labels.extend(projection.columns().map(|column| {
        let mut style = Style::default().fg(Color::Gray);
        if column == cursor {
            style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
        }
        if Some(column) == last_move {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Span::styled(format!("{:^width$}", column, width = CELL_WIDTH), style)
    }));
    lines.push(Line::from(labels));

    let width = (CELL_WIDTH * (projection.columns().count() + 1) + 2) as u16;
    let height = (lines.len() + 2) as u16;
    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    frame.render_widget(board, center_rect(area, width, height));
}

fn row_label(depth: usize) -> Span<'static> {
    Span::styled(
        format!("{:>width$} ", depth, width = CELL_WIDTH - 1),
        Style::default().fg(Color::DarkGray),
    )
}

fn cell_span(cell: Cell, highlight: bool) -> Span<'static> {
    let (symbol, style) = match cell {
        Cell::Empty => (" · ".to_string(), Style::default().fg(Color::DarkGray)),
        Cell::Occupied(mark) => (format!(" {} ", mark.symbol()), mark_style(mark)),
    };
    let style = if highlight {
        style.bg(Color::White).fg(Color::Black)
    } else {
        style
    };
    Span::styled(format!("{} ", symbol), style)
}

fn mark_style(mark: Mark) -> Style {
    let color = match mark {
        Mark::Red => Color::Red,
        Mark::Blue => Color::Blue,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
