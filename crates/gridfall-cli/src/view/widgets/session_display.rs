use gridfall_engine::GameSession;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block as BlockWidget, Paragraph},
};

use crate::view::widgets::{BoardDisplay, PieceDisplay, style};

/// Full-screen view of one game session: board, next-piece preview, stats,
/// and the per-state help line.
#[derive(Debug)]
pub(crate) struct SessionDisplay<'a> {
    session: &'a GameSession,
}

impl<'a> SessionDisplay<'a> {
    pub(crate) fn new(session: &'a GameSession) -> Self {
        Self { session }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        let border_style = if self.session.state().is_game_over() {
            style::GAME_OVER_BORDER
        } else {
            style::PLAYING_BORDER
        };

        let board = BoardDisplay::new(self.session.field())
            .falling_piece(self.session.falling_piece())
            .ghost(self.session.ghost_piece())
            .block(
                BlockWidget::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let next_panel = PieceDisplay::new().kind(self.session.next_kind()).block(
            BlockWidget::bordered()
                .title(Line::from("NEXT").centered())
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let stats = self.stats_paragraph(border_style);

        let help_text = if self.session.state().is_game_over() {
            "Controls: R (Restart) | Q (Quit)"
        } else {
            "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ Z (Rotate) | Space (Hard Drop) | Q (Quit)"
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(board.height()), Constraint::Length(1)])
                .areas(frame.area());

        let [board_area, side_area] = Layout::horizontal([
            Constraint::Length(board.width()),
            Constraint::Length(next_panel.width().max(14)),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);

        let [next_area, stats_area] = Layout::vertical([
            Constraint::Length(next_panel.height()),
            Constraint::Length(6),
        ])
        .spacing(1)
        .areas(side_area);

        frame.render_widget(board, board_area);
        frame.render_widget(next_panel, next_area);
        frame.render_widget(stats, stats_area);
        frame.render_widget(help_text, help_area);
    }

    fn stats_paragraph(&self, border_style: Style) -> Paragraph<'_> {
        let elapsed = self.session.duration().as_secs();
        let mut lines = vec![
            Line::from(format!("Score {:>7}", self.session.score())),
            Line::from(format!("Time  {:>4}:{:02}", elapsed / 60, elapsed % 60)),
            Line::from(format!(
                "Fall  {:>5}ms",
                self.session.gravity_interval().as_millis()
            )),
        ];
        if self.session.state().is_game_over() {
            lines.push(Line::from("GAME OVER").style(style::GAME_OVER_BORDER));
        }
        Paragraph::new(lines).style(style::DEFAULT).block(
            BlockWidget::bordered()
                .title(Line::from("STATS").centered())
                .border_style(border_style)
                .style(style::DEFAULT),
        )
    }
}
