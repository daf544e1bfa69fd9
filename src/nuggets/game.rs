use std::net::SocketAddr;

use itertools::Itertools;

use crate::nuggets::prelude::*;

/// The singleton world state: immutable base terrain, the live
/// overlay of gold and players, the pile sequence, and every
/// connected participant. Owned exclusively by the server's event
/// loop; nothing here is shared or locked.
pub struct Game {
    base: Grid,
    live: Grid,
    piles: GoldPiles,
    players: BTreeMap<char, Player>,
    spectator: Option<Player>,
}

/// The outcome of one attempted step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The target cell cannot be entered; sprints stop here.
    Blocked,
    /// The player advanced; `claimed` holds a pickup amount when the
    /// destination held a gold pile.
    Moved { claimed: Option<u32> },
}

/// A join the game turned away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinRefused {
    EmptyName,
    GameFull,
}

impl JoinRefused {
    /// The reason the client is told, verbatim.
    pub fn reason(&self) -> &'static str {
        match self {
            JoinRefused::EmptyName => "Sorry - you must provide player's name.",
            JoinRefused::GameFull => "Game is full: no more players can join.",
        }
    }
}

/// A join the game accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Joined {
    pub letter: char,
    /// Set when the spawn cell held a gold pile, claimed on arrival.
    pub claimed: Option<u32>,
}

impl Game {
    /// Builds a game on the given terrain: deals the gold and
    /// scatters the pile markers across the floor.
    pub fn new(base: Grid, dice: &mut dyn Dice) -> Game {
        let piles = GoldPiles::distribute(dice);
        Game::with_piles(base, piles, dice)
    }

    /// Builds a game with an explicit pile sequence; the distribution
    /// is injectable alongside the dice.
    pub fn with_piles(base: Grid, piles: GoldPiles, dice: &mut dyn Dice) -> Game {
        let mut live = base.clone();
        for _ in 0..piles.count() {
            loop {
                let col = dice.roll(base.width() as u32) as usize;
                let row = dice.roll(base.height() as u32) as usize;
                let at = Coord::new(row, col);
                if live.get(at) == '.' {
                    live.set(at, '*');
                    break;
                }
            }
        }

        log::info!("dropped {} piles holding {} nuggets", piles.count(), piles.remaining());
        Game { base, live, piles, players: BTreeMap::new(), spectator: None }
    }

    // accessors

    pub fn height(&self) -> usize {
        self.base.height()
    }

    pub fn width(&self) -> usize {
        self.base.width()
    }

    pub fn gold_remaining(&self) -> u32 {
        self.piles.remaining()
    }

    /// The game ends the moment the last nugget is claimed.
    pub fn is_over(&self) -> bool {
        self.piles.remaining() == 0
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Every lettered player, in join (= letter) order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn player(&self, letter: char) -> Option<&Player> {
        self.players.get(&letter)
    }

    pub fn spectator(&self) -> Option<&Player> {
        self.spectator.as_ref()
    }

    /// Whether a datagram source is the current spectator.
    pub fn is_spectator(&self, addr: SocketAddr) -> bool {
        self.spectator.as_ref().is_some_and(|s| s.addr == addr)
    }

    /// Resolves a datagram source to a player letter.
    pub fn player_letter(&self, addr: SocketAddr) -> Option<char> {
        self.players.values().find(|p| p.addr == addr).map(|p| p.letter)
    }

    // joining

    /// Admits a named player: normalizes the name, assigns the next
    /// letter in join order, and spawns them on a free floor cell,
    /// claiming any pile already sitting there.
    pub fn join(
        &mut self,
        name: &str,
        addr: SocketAddr,
        dice: &mut dyn Dice,
    ) -> std::result::Result<Joined, JoinRefused> {
        if username::is_blank(name) {
            return Err(JoinRefused::EmptyName);
        }
        if self.players.len() == MAX_PLAYERS {
            return Err(JoinRefused::GameFull);
        }

        let letter = (b'A' + self.players.len() as u8) as char;
        let name = username::normalize(name);
        let pos = self.spawn_position(dice);

        let claimed = match self.live.get(pos) {
            '*' => Some(self.piles.claim_next()),
            _ => None,
        };
        self.live.set(pos, letter);

        let mut player = Player::new(name, letter, pos, addr, self.base.height(), self.base.width());
        if let Some(claimed) = claimed {
            player.purse += claimed;
        }
        visibility::recompute(&self.base, &mut player);

        log::info!("player {letter} ({}) joined at ({}, {})", player.name, pos.row, pos.col);
        self.players.insert(letter, player);
        Ok(Joined { letter, claimed })
    }

    /// Rolls row/column pairs until one lands on a floor cell not
    /// already occupied by a player.
    fn spawn_position(&self, dice: &mut dyn Dice) -> Coord {
        loop {
            let row = dice.roll(self.base.height() as u32) as usize;
            let col = dice.roll(self.base.width() as u32) as usize;
            let at = Coord::new(row, col);
            if self.base.get(at) == '.' && !self.live.get(at).is_ascii_uppercase() {
                return at;
            }
        }
    }

    /// Installs a spectator, returning the endpoint of any spectator
    /// being replaced.
    pub fn spectate(&mut self, addr: SocketAddr) -> Option<SocketAddr> {
        let previous = self.spectator.take().map(|s| s.addr);
        self.spectator = Some(Player::spectator(addr, self.base.height(), self.base.width()));
        previous
    }

    // movement

    /// Attempts one step for a lettered player. Walls and void block;
    /// floor and passages admit; a gold marker additionally claims the
    /// next pile; another player is swapped into the vacated cell.
    pub fn step(&mut self, letter: char, direction: Direction) -> Step {
        let Some(player) = self.players.get(&letter) else {
            log::warn!("step for unknown player {letter}");
            return Step::Blocked;
        };
        let from = player.pos;
        let Some(to) = from.step(direction, self.base.height(), self.base.width()) else {
            return Step::Blocked;
        };

        match self.live.get(to) {
            '.' | '#' => {
                self.relocate(letter, from, to);
                Step::Moved { claimed: None }
            }
            '*' => {
                let claimed = self.piles.claim_next();
                self.relocate(letter, from, to);
                if let Some(player) = self.players.get_mut(&letter) {
                    player.purse += claimed;
                }
                log::info!("player {letter} picked up {claimed} nuggets");
                Step::Moved { claimed: Some(claimed) }
            }
            other if other.is_ascii_uppercase() => {
                self.live.set(to, letter);
                self.live.set(from, other);
                if let Some(player) = self.players.get_mut(&letter) {
                    player.pos = to;
                    visibility::recompute(&self.base, player);
                }
                if let Some(player) = self.players.get_mut(&other) {
                    player.pos = from;
                    visibility::recompute(&self.base, player);
                }
                Step::Moved { claimed: None }
            }
            _ => Step::Blocked,
        }
    }

    /// Moves a letter between cells, restoring the base terrain
    /// behind it, and refreshes the player's line of sight.
    fn relocate(&mut self, letter: char, from: Coord, to: Coord) {
        self.live.set(to, letter);
        self.live.set(from, self.base.get(from));
        if let Some(player) = self.players.get_mut(&letter) {
            player.pos = to;
            visibility::recompute(&self.base, player);
        }
    }

    // rendering

    /// Composites the view one participant receives: their own cell
    /// as `@`, live contents where visible, remembered terrain where
    /// merely discovered, blanks elsewhere. Spectators get the raw
    /// live map.
    pub fn render(&self, viewer: &Player) -> String {
        let mut out = String::with_capacity((self.base.width() + 1) * self.base.height());
        for row in 0..self.base.height() {
            for col in 0..self.base.width() {
                let at = Coord::new(row, col);
                let live = self.live.get(at);
                out.push(if !viewer.is_spectator && live == viewer.letter {
                    '@'
                } else if viewer.visible.get(at) {
                    live
                } else if viewer.discovered.get(at) {
                    self.base.get(at)
                } else {
                    ' '
                });
            }
            out.push('\n');
        }
        out
    }

    /// Formats the final standings, one line per player in join order.
    pub fn leaderboard(&self) -> String {
        self.players
            .values()
            .map(|p| format!("{}{:>10} {}", p.letter, p.purse, p.name))
            .join("\n")
            + "\n"
    }
}
