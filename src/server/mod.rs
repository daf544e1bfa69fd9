mod options;

use std::net::{SocketAddr, UdpSocket};

pub use options::ServerOptions;

use crate::prelude::*;

/// The datagram rim around the authoritative game: receives one
/// request at a time, mutates the game, and fans the updated views
/// back out. Single-threaded by design; the only blocking point is
/// the receive call.
pub struct GameServer {
    socket: UdpSocket,
    game: Game,
    dice: SeededDice,
    #[allow(dead_code)]
    config: ServerOptions,
}

impl GameServer {
    /// Loads the map, deals the gold, and binds an ephemeral socket.
    pub fn new(options: ServerOptions) -> Result<GameServer> {
        let text = std::fs::read_to_string(&options.map)
            .with_context(|| format!("could not read map file {}", options.map.display()))?;
        let base = text.parse::<Grid>()?;
        log::info!("loaded {}x{} map from {}", base.height(), base.width(), options.map.display());

        let mut dice = SeededDice::new(options.seed);
        let game = Game::new(base, &mut dice);
        let socket = UdpSocket::bind(("0.0.0.0", 0)).context("could not bind a datagram socket")?;

        Ok(GameServer { socket, game, dice, config: options })
    }

    /// Runs the event loop until the last nugget is claimed.
    pub fn run(&mut self) -> Result<()> {
        let port = self.socket.local_addr()?.port();
        println!("Waiting on port {port} for contact...");

        let mut buffer = [0u8; 1024];
        loop {
            let (length, from) = match self.socket.recv_from(&mut buffer) {
                Ok(received) => received,
                Err(err) => {
                    log::warn!("receive failed: {err}");
                    continue;
                }
            };

            let text = String::from_utf8_lossy(&buffer[..length]).into_owned();
            log::debug!("{from} -> {text}");
            if self.dispatch(from, &text) {
                log::info!("game over; all gold claimed");
                return Ok(());
            }
        }
    }

    /// Routes one datagram; true means the game has ended.
    fn dispatch(&mut self, from: SocketAddr, text: &str) -> bool {
        match text.parse::<Request>() {
            Ok(Request::Play(name)) => self.handle_play(from, &name),
            Ok(Request::Spectate) => self.handle_spectate(from),
            Ok(Request::Key(key)) => return self.handle_key(from, key),
            Err(err) => {
                log::warn!("unparseable datagram from {from}: {err}");
                self.send(from, &Response::Error("Unknown command.".into()));
            }
        }
        false
    }

    /// Admits a player and sends the join sequence: a gold fan-out
    /// when the spawn cell held a pile, then OK, GRID, GOLD, and a
    /// display broadcast so everyone sees the newcomer.
    fn handle_play(&mut self, from: SocketAddr, name: &str) {
        // a spawn-pile refresh goes to the pre-join roster only; the
        // newcomer gets their personal pickup message instead
        let roster: Vec<(SocketAddr, u32)> = self.game.players().map(|p| (p.addr, p.purse)).collect();

        match self.game.join(name, from, &mut self.dice) {
            Ok(Joined { letter, claimed }) => {
                let purse = self.game.player(letter).map_or(0, |p| p.purse);
                let remaining = self.game.gold_remaining();

                if let Some(collected) = claimed {
                    for &(addr, other_purse) in &roster {
                        self.send(addr, &Response::Gold { collected: 0, purse: other_purse, remaining });
                    }
                    self.send(from, &Response::Gold { collected, purse, remaining });
                }
                self.send(from, &Response::Ok(letter));
                self.send(from, &Response::Grid { rows: self.game.height(), cols: self.game.width() });
                self.send(from, &Response::Gold { collected: 0, purse, remaining });
                self.broadcast_displays();
            }
            Err(refused) => {
                log::info!("refusing join from {from}: {}", refused.reason());
                self.send(from, &Response::Quit(refused.reason().into()));
            }
        }
    }

    /// Installs the spectator, displacing any previous one.
    fn handle_spectate(&mut self, from: SocketAddr) {
        if let Some(previous) = self.game.spectate(from) {
            self.send(previous, &Response::Quit("You have been replaced by a new spectator.".into()));
        }
        self.send(from, &Response::Grid { rows: self.game.height(), cols: self.game.width() });
        self.send(from, &Response::Gold { collected: 0, purse: 0, remaining: self.game.gold_remaining() });
        if let Some(spectator) = self.game.spectator() {
            self.send(from, &Response::Display(self.game.render(spectator)));
        }
    }

    /// Applies one keystroke; true means the game has ended.
    fn handle_key(&mut self, from: SocketAddr, key: char) -> bool {
        if self.game.is_spectator(from) {
            match key {
                'Q' => self.send(from, &Response::Quit("Thanks for watching!".into())),
                _ => self.send(from, &Response::Error("Unknown keystroke.".into())),
            }
            return self.check_over();
        }

        let Some(letter) = self.game.player_letter(from) else {
            log::warn!("KEY from unknown address {from}");
            return false;
        };

        if key == 'Q' {
            // the player keeps their place in the game and on the
            // final leaderboard
            self.send(from, &Response::Quit("Thanks for playing!".into()));
            return self.check_over();
        }

        match Direction::from_key(key) {
            Some(direction) => {
                let sprint = key.is_ascii_uppercase();
                loop {
                    match self.game.step(letter, direction) {
                        Step::Blocked => break,
                        Step::Moved { claimed } => {
                            if let Some(collected) = claimed {
                                self.broadcast_gold();
                                let purse = self.game.player(letter).map_or(0, |p| p.purse);
                                let remaining = self.game.gold_remaining();
                                self.send(from, &Response::Gold { collected, purse, remaining });
                            }
                            self.broadcast_displays();
                            if !sprint {
                                break;
                            }
                        }
                    }
                }
            }
            None => self.send(from, &Response::Error("Unknown keystroke.".into())),
        }

        self.check_over()
    }

    /// Once the last nugget is claimed, every participant receives
    /// the final standings; the caller then stops the loop.
    fn check_over(&mut self) -> bool {
        if !self.game.is_over() {
            return false;
        }

        let board = format!("GAME OVER:\n{}", self.game.leaderboard());
        for player in self.game.players() {
            self.send(player.addr, &Response::Quit(board.clone()));
        }
        if let Some(spectator) = self.game.spectator() {
            self.send(spectator.addr, &Response::Quit(board));
        }
        true
    }

    /// Sends everyone a freshly composited view.
    fn broadcast_displays(&self) {
        for player in self.game.players() {
            self.send(player.addr, &Response::Display(self.game.render(player)));
        }
        if let Some(spectator) = self.game.spectator() {
            self.send(spectator.addr, &Response::Display(self.game.render(spectator)));
        }
    }

    /// Refreshes every player's gold status line.
    fn broadcast_gold(&self) {
        for player in self.game.players() {
            self.send(
                player.addr,
                &Response::Gold { collected: 0, purse: player.purse, remaining: self.game.gold_remaining() },
            );
        }
    }

    /// Fires one datagram, tolerating a dead endpoint.
    fn send(&self, to: SocketAddr, message: &Response) {
        if let Err(err) = self.socket.send_to(message.to_string().as_bytes(), to) {
            log::debug!("send to {to} failed: {err}");
        }
    }
}
