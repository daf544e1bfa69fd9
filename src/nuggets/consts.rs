/// Nuggets dropped into every game.
pub const GOLD_TOTAL: u32 = 300;

/// Fewest piles the distributor may deal.
pub const GOLD_MIN_PILES: usize = 10;

/// Cap on the pile count (exclusive).
pub const GOLD_MAX_PILES: usize = 30;

/// One letter of the alphabet per player.
pub const MAX_PLAYERS: usize = 26;

/// Longest name the server keeps for a player.
pub const MAX_NAME_LENGTH: usize = 10;
