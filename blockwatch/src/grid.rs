//! Block map model: one cell per storage slot, laid out row-major at a
//! column count fixed when the grid is built.

/// Terminal columns a single cell occupies.
pub const CELL_SIZE: u16 = 2;
/// Columns reserved around the grid (panel borders).
pub const GRID_MARGIN: u16 = 2;
/// Largest block map the client will lay out; `maxfilesint` is server-supplied.
pub const MAX_CELLS: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Unused,
    Used,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub state: CellState,
}

#[derive(Debug, Clone, Default)]
pub struct BlockGrid {
    cells: Vec<Cell>,
    columns: usize,
}

pub fn cell_id(index: usize) -> String {
    format!("Block{index}")
}

fn index_of(id: &str) -> Option<usize> {
    id.strip_prefix("Block")?.parse().ok()
}

impl BlockGrid {
    /// Lays out `cell_count` empty cells for a container `container_width`
    /// columns wide. Any previous cells are discarded.
    pub fn build(&mut self, cell_count: usize, container_width: u16) {
        let adjusted = container_width.saturating_sub(GRID_MARGIN);
        self.columns = ((adjusted / CELL_SIZE) as usize).max(1);
        self.cells = (0..cell_count)
            .map(|i| Cell {
                row: i / self.columns,
                col: i % self.columns,
                state: CellState::Empty,
            })
            .collect();
    }

    /// Marks cell `i` used when `bitmap[i] != '0'`, unused otherwise, for
    /// `i < map_size`. Cells that do not exist and positions the bitmap does
    /// not cover are left alone.
    pub fn apply_bitmap(&mut self, bitmap: &str, map_size: usize) {
        for (index, ch) in bitmap.chars().take(map_size).enumerate() {
            if let Some(cell) = self.cell_mut(&cell_id(index)) {
                cell.state = if ch == '0' {
                    CellState::Unused
                } else {
                    CellState::Used
                };
            }
        }
    }

    pub fn cell(&self, id: &str) -> Option<&Cell> {
        index_of(id).and_then(|i| self.cells.get(i))
    }

    fn cell_mut(&mut self, id: &str) -> Option<&mut Cell> {
        index_of(id).and_then(move |i| self.cells.get_mut(i))
    }

    pub fn state(&self, index: usize) -> Option<CellState> {
        self.cells.get(index).map(|c| c.state)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, Cell> {
        self.cells.chunks(self.columns.max(1))
    }

    pub fn used_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.state == CellState::Used)
            .count()
    }
}
