use gridfall_engine::{PieceKind, SHAPE_MAX, Shape};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::widgets::{Tile, TileDisplay};

/// Preview panel for an upcoming piece, drawn in its spawn orientation.
#[derive(Debug)]
pub(crate) struct PieceDisplay<'a> {
    kind: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub(crate) fn new() -> Self {
        Self {
            kind: None,
            block: None,
        }
    }

    pub(crate) fn kind(self, kind: PieceKind) -> Self {
        Self {
            kind: Some(kind),
            ..self
        }
    }

    pub(crate) fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn width(&self) -> u16 {
        SHAPE_MAX as u16 * TileDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn height(&self) -> u16 {
        SHAPE_MAX as u16 * TileDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(kind) = self.kind else {
            return;
        };
        let shape = Shape::of(kind);

        let tile_width = TileDisplay::width();
        let tile_height = TileDisplay::height();
        for row in 0..shape.size() {
            for col in 0..shape.size() {
                let tile = Tile::from(shape.cell(row, col));
                let cell_area = Rect::new(
                    area.x + col as u16 * tile_width,
                    area.y + row as u16 * tile_height,
                    tile_width,
                    tile_height,
                )
                .intersection(area);
                if !cell_area.is_empty() {
                    TileDisplay::from_tile(tile, false).render(cell_area, buf);
                }
            }
        }
    }
}
