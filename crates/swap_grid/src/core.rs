use bevy::prelude::*;

pub const NUMBER_OF_ROWS: usize = 5;
pub const NUMBER_OF_COLUMNS: usize = 5;

pub const CELL_SIZE: f32 = 60.;
pub const CELL_OFFSET: f32 = 64.;
pub const CENTER_OFFSET: f32 = -CELL_OFFSET * 2.;

/// Screen-space offset between the pointer and the ghost tile.
pub const GHOST_POINTER_OFFSET: f32 = 50.;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Init,
    Active,
}

/// Row/column coordinate of a board slot, row-major from the top-left.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<GridPos> for Vec3 {
    fn from(pos: GridPos) -> Self {
        Self::new(
            (pos.col as f32).mul_add(CELL_OFFSET, CENTER_OFFSET),
            -(pos.row as f32).mul_add(CELL_OFFSET, CENTER_OFFSET),
            0.,
        )
    }
}

impl From<GridPos> for Transform {
    fn from(pos: GridPos) -> Self {
        Self::from_translation(pos.into())
    }
}

/// The most recently pressed cell. Survives a cancelled drag.
#[derive(Resource, Default, Clone, Copy)]
pub struct Selection(pub Option<GridPos>);

/// True from a cell press until a swap commits or the pointer is released.
#[derive(Resource, Default, Clone, Copy)]
pub struct DragActive(pub bool);

#[derive(Component)]
pub struct MainCamera;

/// A board tile. The id is the cell's creation index and never changes.
#[derive(Component)]
pub struct CellVisual {
    pub id: usize,
}

/// The floating tile that follows the pointer during a drag.
#[derive(Component)]
pub struct GhostTile;

/// Overlay marking the selected cell.
#[derive(Component)]
pub struct SelectionHighlight;
