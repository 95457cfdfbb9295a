use serde::{Deserialize, Serialize};

/// Identity of one of the 7 tetromino kinds.
///
/// The discriminant is the numeric cell code stored in the field when the
/// piece freezes. Downstream it doubles as the color key; it carries no other
/// semantic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    /// T-piece.
    T = 1,
    /// O-piece (2x2 square).
    O = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// L-piece.
    L = 5,
    /// J-piece.
    J = 6,
    /// I-piece.
    I = 7,
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    /// All piece kinds, in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        Self::T,
        Self::O,
        Self::S,
        Self::Z,
        Self::L,
        Self::J,
        Self::I,
    ];

    /// Numeric cell code of this kind (1-7).
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the single character representation of this piece kind.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::T => 'T',
            Self::O => 'O',
            Self::S => 'S',
            Self::Z => 'Z',
            Self::L => 'L',
            Self::J => 'J',
            Self::I => 'I',
        }
    }

    /// Parses a piece kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'T' => Some(Self::T),
            'O' => Some(Self::O),
            'S' => Some(Self::S),
            'Z' => Some(Self::Z),
            'L' => Some(Self::L),
            'J' => Some(Self::J),
            'I' => Some(Self::I),
            _ => None,
        }
    }
}

/// A single cell of the field or of a piece shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by (a fragment of) the given piece kind.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    /// Numeric cell code: `0` for empty, the piece identity otherwise.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Piece(kind) => kind.code(),
        }
    }
}

/// Largest shape grid side length (the I-piece).
pub const SHAPE_MAX: usize = 4;

/// A square working grid of cells describing a piece's footprint.
///
/// Shapes are sized 2, 3, or 4 depending on the piece and are stored in a
/// fixed 4x4 array with an effective `size`. The square representation
/// (unused corners included) keeps 90-degree rotation a plain transpose-style
/// index swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    size: usize,
    cells: [[Cell; SHAPE_MAX]; SHAPE_MAX],
}

impl Shape {
    const fn new(size: usize, cells: [[Cell; SHAPE_MAX]; SHAPE_MAX]) -> Self {
        assert!(2 <= size && size <= SHAPE_MAX);
        Self { size, cells }
    }

    /// Returns the spawn-orientation shape of the given piece kind.
    ///
    /// Pure and total over the 7 kinds; the literal grids never mutate.
    #[must_use]
    pub fn of(kind: PieceKind) -> Self {
        SPAWN_SHAPES[kind.code() as usize - 1]
    }

    /// Effective side length of this shape's grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Cell at `(row, col)` within the shape grid.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// This shape rotated 90 degrees clockwise.
    ///
    /// `new[r][c] = old[size - 1 - c][r]`; applying it four times yields the
    /// original shape.
    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        let mut cells = [[Cell::Empty; SHAPE_MAX]; SHAPE_MAX];
        for (r, row) in cells[..self.size].iter_mut().enumerate() {
            for (c, cell) in row[..self.size].iter_mut().enumerate() {
                *cell = self.cells[self.size - 1 - c][r];
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Iterates over the occupied cells as `(dx, dy, kind)` offsets within
    /// the shape grid. Empty cells are skipped and never participate in
    /// collision or freezing.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i16, i16, PieceKind)> + '_ {
        self.cells[..self.size]
            .iter()
            .enumerate()
            .flat_map(move |(dy, row)| {
                row[..self.size]
                    .iter()
                    .enumerate()
                    .filter_map(move |(dx, cell)| match cell {
                        Cell::Piece(kind) => Some((dx as i16, dy as i16, *kind)),
                        Cell::Empty => None,
                    })
            })
    }
}

const SPAWN_SHAPES: [Shape; PieceKind::LEN] = {
    use Cell::Empty as E;
    const T: Cell = Cell::Piece(PieceKind::T);
    const O: Cell = Cell::Piece(PieceKind::O);
    const S: Cell = Cell::Piece(PieceKind::S);
    const Z: Cell = Cell::Piece(PieceKind::Z);
    const L: Cell = Cell::Piece(PieceKind::L);
    const J: Cell = Cell::Piece(PieceKind::J);
    const I: Cell = Cell::Piece(PieceKind::I);
    const EEEE: [Cell; 4] = [E; 4];
    [
        // T-piece
        Shape::new(3, [[E, T, E, E], [T, T, T, E], EEEE, EEEE]),
        // O-piece
        Shape::new(2, [[O, O, E, E], [O, O, E, E], EEEE, EEEE]),
        // S-piece
        Shape::new(3, [[E, S, S, E], [S, S, E, E], EEEE, EEEE]),
        // Z-piece
        Shape::new(3, [[Z, Z, E, E], [E, Z, Z, E], EEEE, EEEE]),
        // L-piece
        Shape::new(3, [[L, L, L, E], [E, E, L, E], EEEE, EEEE]),
        // J-piece
        Shape::new(3, [[E, E, J, E], [J, J, J, E], EEEE, EEEE]),
        // I-piece
        Shape::new(4, [EEEE, [I, I, I, I], EEEE, EEEE]),
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(Shape::of(PieceKind::O).size(), 2);
        assert_eq!(Shape::of(PieceKind::I).size(), 4);
        for kind in [
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::L,
            PieceKind::J,
        ] {
            assert_eq!(Shape::of(kind).size(), 3);
        }
    }

    #[test]
    fn test_catalog_cells_carry_own_code() {
        for kind in PieceKind::ALL {
            let shape = Shape::of(kind);
            let mut occupied = 0;
            for (_, _, cell_kind) in shape.occupied_cells() {
                assert_eq!(cell_kind, kind);
                occupied += 1;
            }
            // Every tetromino covers exactly 4 cells.
            assert_eq!(occupied, 4, "{kind:?}");
        }
    }

    #[test]
    fn test_cell_codes() {
        assert_eq!(Cell::Empty.code(), 0);
        assert_eq!(Cell::Piece(PieceKind::T).code(), 1);
        assert_eq!(Cell::Piece(PieceKind::I).code(), 7);
    }

    #[test]
    fn test_rotation_is_a_4_cycle() {
        for kind in PieceKind::ALL {
            let shape = Shape::of(kind);
            let rotated = shape
                .rotated_cw()
                .rotated_cw()
                .rotated_cw()
                .rotated_cw();
            assert_eq!(rotated, shape, "{kind:?}");
        }
    }

    #[test]
    fn test_rotated_i_is_vertical() {
        let rotated = Shape::of(PieceKind::I).rotated_cw();
        // Horizontal row 1 becomes vertical column 2.
        let occupied: Vec<_> = rotated.occupied_cells().map(|(dx, dy, _)| (dx, dy)).collect();
        assert_eq!(occupied, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    }

    #[test]
    fn test_char_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('X'), None);
    }

    #[test]
    fn test_piece_kind_serialization() {
        let json = serde_json::to_string(&PieceKind::S).unwrap();
        assert_eq!(json, "\"S\"");
        let kind: PieceKind = serde_json::from_str(&json).unwrap();
        assert_eq!(kind, PieceKind::S);
    }
}
