use gridfall_engine::{ATTIC_ROWS, FIELD_COLS, FIELD_ROWS, FallingPiece, Field};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use crate::view::widgets::{Tile, TileDisplay};

/// Rows shown on screen; the attic rows above stay hidden.
const VISIBLE_ROWS: usize = FIELD_ROWS - ATTIC_ROWS;

#[derive(Debug)]
pub(crate) struct BoardDisplay<'a> {
    field: &'a Field,
    falling_piece: Option<&'a FallingPiece>,
    ghost: Option<FallingPiece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub(crate) fn new(field: &'a Field) -> Self {
        Self {
            field,
            falling_piece: None,
            ghost: None,
            block: None,
        }
    }

    pub(crate) fn falling_piece(self, piece: &'a FallingPiece) -> Self {
        Self {
            falling_piece: Some(piece),
            ..self
        }
    }

    pub(crate) fn ghost(self, piece: FallingPiece) -> Self {
        Self {
            ghost: Some(piece),
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
        FIELD_COLS as u16 * TileDisplay::width()
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn height(&self) -> u16 {
        VISIBLE_ROWS as u16 * TileDisplay::height()
            + super::block_vertical_margin(self.block.as_ref())
    }
}

fn overlay(tiles: &mut [[Tile; FIELD_COLS]; FIELD_ROWS], piece: &FallingPiece, as_ghost: bool) {
    if !piece.is_visible() {
        return;
    }
    for (x, y, kind) in piece.occupied_cells() {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            continue;
        };
        if y < FIELD_ROWS && x < FIELD_COLS {
            tiles[y][x] = if as_ghost { Tile::Ghost } else { Tile::Piece(kind) };
        }
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    #[expect(clippy::cast_possible_truncation)]
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let mut tiles = [[Tile::Empty; FIELD_COLS]; FIELD_ROWS];
        for (y, row) in self.field.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                tiles[y][x] = Tile::from(*cell);
            }
        }
        if let Some(ghost) = self.ghost {
            overlay(&mut tiles, &ghost, true);
        }
        if let Some(piece) = self.falling_piece {
            overlay(&mut tiles, piece, false);
        }

        let tile_width = TileDisplay::width();
        let tile_height = TileDisplay::height();
        for (screen_y, row) in tiles[ATTIC_ROWS..].iter().enumerate() {
            for (screen_x, tile) in row.iter().enumerate() {
                let cell_area = Rect::new(
                    area.x + screen_x as u16 * tile_width,
                    area.y + screen_y as u16 * tile_height,
                    tile_width,
                    tile_height,
                )
                .intersection(area);
                if !cell_area.is_empty() {
                    TileDisplay::from_tile(*tile, true).render(cell_area, buf);
                }
            }
        }
    }
}
