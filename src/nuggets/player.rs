use std::net::SocketAddr;

use crate::nuggets::prelude::*;

/// A row-major boolean grid sized to the map, used for the visible
/// and discovered sets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoolGrid {
    width: usize,
    cells: Vec<bool>,
}

impl BoolGrid {
    pub fn new(height: usize, width: usize, fill: bool) -> BoolGrid {
        BoolGrid { width, cells: vec![fill; height * width] }
    }

    pub fn get(&self, at: Coord) -> bool {
        self.cells[at.row * self.width + at.col]
    }

    pub fn set(&mut self, at: Coord, value: bool) {
        self.cells[at.row * self.width + at.col] = value;
    }

    /// Resets every cell to false.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }
}

/// One connected participant: a lettered player, or the spectator.
///
/// Spectators carry no letter and no meaningful position; their
/// visible and discovered sets are identically true and never touched
/// by the visibility engine.
#[derive(Clone, Debug)]
pub struct Player {
    pub letter: char,
    pub name: String,
    pub addr: SocketAddr,
    pub pos: Coord,
    pub purse: u32,
    pub visible: BoolGrid,
    pub discovered: BoolGrid,
    pub is_spectator: bool,
}

impl Player {
    /// Creates a lettered player at the given spawn cell, blind until
    /// the first visibility pass.
    pub fn new(name: String, letter: char, pos: Coord, addr: SocketAddr, height: usize, width: usize) -> Player {
        Player {
            letter,
            name,
            addr,
            pos,
            purse: 0,
            visible: BoolGrid::new(height, width, false),
            discovered: BoolGrid::new(height, width, false),
            is_spectator: false,
        }
    }

    /// Creates the spectator, who sees everything and sits nowhere.
    pub fn spectator(addr: SocketAddr, height: usize, width: usize) -> Player {
        Player {
            letter: '\0',
            name: String::new(),
            addr,
            pos: Coord::new(0, 0),
            purse: 0,
            visible: BoolGrid::new(height, width, true),
            discovered: BoolGrid::new(height, width, true),
            is_spectator: true,
        }
    }
}
