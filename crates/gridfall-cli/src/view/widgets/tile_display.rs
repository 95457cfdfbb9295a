use gridfall_engine::{Cell, PieceKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use crate::view::widgets::style;

/// One rendered grid square: a settled or falling block, the ghost outline,
/// or empty space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tile {
    Empty,
    Ghost,
    Piece(PieceKind),
}

impl From<Cell> for Tile {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Tile::Empty,
            Cell::Piece(kind) => Tile::Piece(kind),
        }
    }
}

#[derive(Debug)]
pub(crate) struct TileDisplay {
    style: Style,
    symbol: &'static str,
}

impl TileDisplay {
    pub(crate) const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub(crate) fn width() -> u16 {
        2
    }

    pub(crate) fn height() -> u16 {
        1
    }

    pub(crate) fn from_tile(tile: Tile, show_dots: bool) -> Self {
        match tile {
            Tile::Empty => {
                if show_dots {
                    Self::new(style::EMPTY_DOT, ".")
                } else {
                    Self::new(style::DEFAULT, "")
                }
            }
            Tile::Ghost => Self::new(style::GHOST, "[]"),
            Tile::Piece(kind) => {
                let style = match kind {
                    PieceKind::T => style::T_BLOCK,
                    PieceKind::O => style::O_BLOCK,
                    PieceKind::S => style::S_BLOCK,
                    PieceKind::Z => style::Z_BLOCK,
                    PieceKind::L => style::L_BLOCK,
                    PieceKind::J => style::J_BLOCK,
                    PieceKind::I => style::I_BLOCK,
                };
                Self::new(style, "")
            }
        }
    }
}

impl Widget for TileDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &TileDisplay {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        // A Paragraph fills the whole area, not just the symbol cells.
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
