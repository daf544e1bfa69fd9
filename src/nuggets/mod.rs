/*
 *  The authoritative Nuggets game engine: terrain, gold, players,
 *  line-of-sight, and the movement resolver.
 */

pub mod consts;
pub mod coords;
pub mod dice;
pub mod game;
pub mod gold;
pub mod grid;
pub mod player;
pub mod username;
pub mod visibility;

pub mod prelude {
    pub(crate) use crate::utils::prelude::*;

    pub use super::{
        consts::*,
        coords::{self, *},
        dice::{Dice, SeededDice},
        game::{Game, JoinRefused, Joined, Step},
        gold::GoldPiles,
        grid::Grid,
        player::{BoolGrid, Player},
        username, visibility,
    };
}
