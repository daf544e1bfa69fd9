mod options;

use std::io::{Write, stdout};
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

pub use options::ClientOptions;

use crate::prelude::*;

/// The keystrokes worth forwarding to the server; anything else is
/// complained about locally instead of wasting a datagram.
const ACCEPTED_KEYS: [char; 17] = [
    'Q', 'h', 'j', 'k', 'l', 'y', 'u', 'b', 'n', 'H', 'J', 'K', 'L', 'Y', 'U', 'B', 'N',
];

/// A thin terminal rim around the wire protocol: forwards keystrokes,
/// paints DISPLAY frames, and keeps a status line on row 0.
pub struct GameClient {
    socket: UdpSocket,
    server: SocketAddr,
    config: ClientOptions,
    letter: Option<char>,
    grid_rows: usize,
    grid_cols: usize,
    status_column: u16,
    in_terminal: bool,
}

impl GameClient {
    /// Resolves the server endpoint and binds a local socket.
    pub fn new(options: ClientOptions) -> Result<GameClient> {
        let server = (options.hostname.as_str(), options.port)
            .to_socket_addrs()
            .with_context(|| format!("could not resolve {} {}", options.hostname, options.port))?
            .next()
            .ok_or_else(|| anyhow!("no address found for {} {}", options.hostname, options.port))?;

        let socket = UdpSocket::bind(("0.0.0.0", 0)).context("could not bind a datagram socket")?;
        socket.set_nonblocking(true)?;
        log::info!("client socket on port {}", socket.local_addr()?.port());

        Ok(GameClient {
            socket,
            server,
            config: options,
            letter: None,
            grid_rows: 0,
            grid_cols: 0,
            status_column: 0,
            in_terminal: false,
        })
    }

    /// Joins the game and runs the event loop until the server says
    /// QUIT; the terminal is restored on every exit path.
    pub fn run(&mut self) -> Result<()> {
        let outcome = self.session();
        self.leave_terminal().ok();
        outcome
    }

    fn session(&mut self) -> Result<()> {
        match self.config.player_name.clone() {
            Some(name) => self.send(&Request::Play(name)),
            None => self.send(&Request::Spectate),
        }

        let mut buffer = [0u8; 65536];
        loop {
            // drain the socket first, then take a short keyboard poll
            match self.socket.recv_from(&mut buffer) {
                Ok((length, from)) if from == self.server => {
                    let text = String::from_utf8_lossy(&buffer[..length]).into_owned();
                    if self.handle_event(&text)? {
                        return Ok(());
                    }
                }
                Ok((_, from)) => log::warn!("dropping datagram from stranger {from}"),
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {}
                Err(err) => return Err(err).context("receive failed"),
            }

            if event::poll(Duration::from_millis(20))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_keystroke(key)?;
                }
            }
        }
    }

    /// Applies one server message; true means the session is over.
    fn handle_event(&mut self, text: &str) -> Result<bool> {
        match text.parse::<Response>()? {
            Response::Ok(letter) => {
                log::info!("joined as player {letter}");
                self.letter = Some(letter);
            }
            Response::Grid { rows, cols } => {
                self.grid_rows = rows;
                self.grid_cols = cols;
                self.enter_terminal()?;
            }
            Response::Gold { collected, purse, remaining } => {
                self.show_gold(collected, purse, remaining)?;
            }
            Response::Display(rows) => self.draw_grid(&rows)?,
            Response::Error(text) => self.show_status(&text)?,
            Response::Quit(text) => {
                self.leave_terminal()?;
                println!("{text}");
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Forwards an accepted keystroke, or complains locally.
    fn handle_keystroke(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            // raw mode swallows the interrupt; ask the server to let
            // us go instead
            self.send(&Request::Key('Q'));
            return Ok(());
        }
        let KeyCode::Char(key) = key.code else {
            return Ok(());
        };

        self.clear_status()?;
        let accepted = match self.config.player_name {
            Some(_) => ACCEPTED_KEYS.contains(&key),
            None => key == 'Q',
        };
        if accepted {
            self.send(&Request::Key(key));
        } else {
            self.show_status("usage: unknown keystroke")?;
        }
        Ok(())
    }

    /// Puts the terminal into raw mode the first time the grid size
    /// arrives, then waits until the window can fit it.
    fn enter_terminal(&mut self) -> Result<()> {
        if self.in_terminal {
            return Ok(());
        }
        terminal::enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;
        self.in_terminal = true;
        self.await_fit()
    }

    /// Blocks until the window is at least (rows + 1) x cols, leaving
    /// room for the status line.
    fn await_fit(&mut self) -> Result<()> {
        loop {
            let (cols, rows) = terminal::size()?;
            if rows as usize >= self.grid_rows + 1 && cols as usize >= self.grid_cols {
                execute!(stdout(), Clear(ClearType::All))?;
                return Ok(());
            }
            execute!(
                stdout(),
                Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                Print(format!(
                    "Window is {rows} rows x {cols} cols; the game needs {} x {}. Resize to continue.",
                    self.grid_rows + 1,
                    self.grid_cols
                ))
            )?;
            match event::read()? {
                Event::Resize(..) => {}
                Event::Key(key) if key.code == KeyCode::Enter => {}
                _ => {}
            }
        }
    }

    /// Restores the terminal; safe to call twice.
    fn leave_terminal(&mut self) -> Result<()> {
        if !self.in_terminal {
            return Ok(());
        }
        execute!(stdout(), cursor::Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        self.in_terminal = false;
        Ok(())
    }

    /// Paints one DISPLAY frame below the status line.
    fn draw_grid(&mut self, rows: &str) -> Result<()> {
        let mut out = stdout();
        for (index, row) in rows.lines().enumerate() {
            queue!(out, cursor::MoveTo(0, index as u16 + 1), Print(row))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Rewrites the gold status on row 0; transient notes land after
    /// it.
    fn show_gold(&mut self, collected: u32, purse: u32, remaining: u32) -> Result<()> {
        let status = if self.config.player_name.is_some() {
            let letter = self.letter.unwrap_or('?');
            format!("Player {letter} has {purse} nuggets ({remaining} nuggets unclaimed).  ")
        } else {
            format!("Spectator: {remaining} nuggets unclaimed.  ")
        };
        self.status_column = status.chars().count() as u16;
        queue!(stdout(), cursor::MoveTo(0, 0), Clear(ClearType::CurrentLine), Print(&status))?;
        stdout().flush()?;

        if self.config.player_name.is_none() {
            self.show_status(&format!("Play at {} {}", self.config.hostname, self.config.port))?;
        }
        if collected > 0 {
            self.show_status(&format!("GOLD received: {collected}"))?;
        }
        Ok(())
    }

    /// Writes a transient note after the gold status.
    fn show_status(&mut self, text: &str) -> Result<()> {
        if !self.in_terminal {
            log::info!("{text}");
            return Ok(());
        }
        execute!(
            stdout(),
            cursor::MoveTo(self.status_column, 0),
            Clear(ClearType::UntilNewLine),
            Print(text)
        )?;
        Ok(())
    }

    /// Erases any transient note.
    fn clear_status(&mut self) -> Result<()> {
        if !self.in_terminal {
            return Ok(());
        }
        execute!(stdout(), cursor::MoveTo(self.status_column, 0), Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    /// Fires one datagram at the server.
    fn send(&self, message: &Request) {
        if let Err(err) = self.socket.send_to(message.to_string().as_bytes(), self.server) {
            log::debug!("send failed: {err}");
        }
    }
}
