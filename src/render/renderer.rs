use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameState, Position, format_score};

const LOGO: [&str; 5] = [
    " ___  _  _   _   _  _ ___ ",
    "/ __|| \\| | /_\\ | |/ / __|",
    "\\__ \\| .` |/ _ \\| ' <| _| ",
    "|___/|_|\\_/_/ \\_\\_|\\_\\___|",
    "",
];

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame. Never mutates the game state.
    pub fn render(&self, frame: &mut Frame, state: &GameState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Scores
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_scores(state), chunks[0]);

        if state.running {
            let (width, height) = board_size(state.grid_size);
            let game_area = chunks[1];
            if game_area.width < width || game_area.height < height {
                frame.render_widget(self.render_too_small(width, height), game_area);
            } else {
                frame.render_widget(self.render_grid(state), centered(game_area, width, height));
            }
        } else {
            frame.render_widget(self.render_start_screen(), chunks[1]);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let size = state.grid_size as i32;
        let head = state.snake.head();
        let mut lines = Vec::with_capacity(state.grid_size);

        for y in 1..=size {
            let mut spans = Vec::with_capacity(state.grid_size);

            for x in 1..=size {
                let pos = Position::new(x, y);

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if state.running && pos == state.food {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_scores(&self, state: &GameState) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format_score(state.score()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ];

        // Hidden until the first game has ended
        if state.scoreboard.high_score_visible() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled("High score: ", Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(
                format_score(state.scoreboard.high_score),
                Style::default().fg(Color::White),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_too_small(&self, width: u16, height: u16) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "Terminal too small",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("the board needs {width}x{height}")),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_start_screen(&self) -> Paragraph<'_> {
        let mut text: Vec<Line> = LOGO
            .iter()
            .map(|row| Line::from(Span::styled(*row, Style::default().fg(Color::Green))))
            .collect();

        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "spacebar",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to start the game", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::raw(" to start | "),
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

/// Columns and rows the bordered board takes: two columns per cell plus
/// one border cell on every side.
pub fn board_size(grid_size: usize) -> (u16, u16) {
    let cells = u16::try_from(grid_size).unwrap_or(u16::MAX / 2);
    (cells.saturating_mul(2).saturating_add(2), cells.saturating_add(2))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
