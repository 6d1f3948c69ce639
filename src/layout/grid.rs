//! Discrete cell grid, stored as a flat arena addressed by index.

use super::graph::RoomId;

/// A rectangle of grid cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl CellRect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// One past the last column
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    /// One past the last row
    pub fn top(&self) -> u32 {
        self.y + self.h
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.top()
    }

    /// Every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.top()).flat_map(move |y| (self.x..self.right()).map(move |x| (x, y)))
    }
}

/// `size x size` cells, each free or owned by one room
#[derive(Clone, Debug)]
pub struct Grid {
    size: u32,
    cells: Vec<Option<RoomId>>,
}

impl Grid {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            cells: vec![None; (size as usize) * (size as usize)],
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size as usize + x as usize
    }

    /// Owner of a cell; None for free or out-of-range cells
    pub fn get(&self, x: u32, y: u32) -> Option<RoomId> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.cells[self.index(x, y)]
    }

    /// Rectangle lies inside the grid and every cell is free
    pub fn is_free(&self, rect: &CellRect) -> bool {
        rect.right() <= self.size
            && rect.top() <= self.size
            && rect.cells().all(|(x, y)| self.get(x, y).is_none())
    }

    /// Claim every cell of `rect` for `room`. Callers check `is_free` first.
    pub fn occupy(&mut self, rect: &CellRect, room: RoomId) {
        for (x, y) in rect.cells() {
            let i = self.index(x, y);
            debug_assert!(self.cells[i].is_none(), "cell ({}, {}) already owned", x, y);
            self.cells[i] = Some(room);
        }
    }

    /// In-range 4-neighbours of a cell
    pub fn neighbors(&self, x: u32, y: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
        let candidates = [
            x.checked_sub(1).map(|nx| (nx, y)),
            Some((x + 1, y)),
            y.checked_sub(1).map(|ny| (x, ny)),
            Some((x, y + 1)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(move |&(nx, ny)| nx < self.size && ny < self.size)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
