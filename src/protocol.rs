/*
 *  The Nuggets wire grammar: UTF-8 text datagrams shared by the
 *  server and client binaries. The type token and body are separated
 *  by a single space, except DISPLAY, whose multiline body follows a
 *  newline.
 */

use regex::Regex;

use crate::prelude::*;

/// A client-to-server request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    /// Join the game under a (not yet normalized) name.
    Play(String),
    /// Observe the whole map without participating.
    Spectate,
    /// One forwarded keystroke.
    Key(char),
}

impl std::str::FromStr for Request {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix("PLAY ") {
            return Ok(Request::Play(name.to_owned()));
        }
        if s == "SPECTATE" {
            return Ok(Request::Spectate);
        }
        if let Some(key) = s.strip_prefix("KEY ") {
            let Some(key) = key.chars().next() else {
                return Err(anyhow!("KEY without a keystroke"));
            };
            return Ok(Request::Key(key));
        }
        Err(anyhow!("unrecognized request {s}"))
    }
}

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Request::Play(name) => write!(f, "PLAY {name}"),
            Request::Spectate => write!(f, "SPECTATE"),
            Request::Key(key) => write!(f, "KEY {key}"),
        }
    }
}

/// A server-to-client response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// The join was accepted under the given letter.
    Ok(char),
    /// Grid dimensions, rows then columns.
    Grid { rows: usize, cols: usize },
    /// Gold just collected, the purse, and nuggets still unclaimed.
    Gold { collected: u32, purse: u32, remaining: u32 },
    /// A freshly composited view of the map.
    Display(String),
    /// A non-fatal complaint.
    Error(String),
    /// Session terminator carrying a farewell or the final standings.
    Quit(String),
}

impl std::str::FromStr for Response {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if let Some(rows) = s.strip_prefix("DISPLAY\n") {
            return Ok(Response::Display(rows.to_owned()));
        }
        if let Some(letter) = s.strip_prefix("OK ") {
            let Some(letter) = letter.chars().next() else {
                return Err(anyhow!("OK without a letter"));
            };
            return Ok(Response::Ok(letter));
        }
        if s.starts_with("GRID ") {
            let pattern = Regex::new("^GRID (?<rows>[0-9]+) (?<cols>[0-9]+)$")?;
            let Some(caps) = pattern.captures(s) else {
                return Err(anyhow!("could not parse grid message {s}"));
            };
            return Ok(Response::Grid { rows: caps["rows"].parse()?, cols: caps["cols"].parse()? });
        }
        if s.starts_with("GOLD ") {
            let pattern = Regex::new("^GOLD (?<n>[0-9]+) (?<p>[0-9]+) (?<r>[0-9]+)$")?;
            let Some(caps) = pattern.captures(s) else {
                return Err(anyhow!("could not parse gold message {s}"));
            };
            return Ok(Response::Gold {
                collected: caps["n"].parse()?,
                purse: caps["p"].parse()?,
                remaining: caps["r"].parse()?,
            });
        }
        if let Some(text) = s.strip_prefix("ERROR ") {
            return Ok(Response::Error(text.to_owned()));
        }
        if let Some(text) = s.strip_prefix("QUIT ") {
            return Ok(Response::Quit(text.to_owned()));
        }
        Err(anyhow!("unrecognized message {s}"))
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Response::Ok(letter) => write!(f, "OK {letter}"),
            Response::Grid { rows, cols } => write!(f, "GRID {rows} {cols}"),
            Response::Gold { collected, purse, remaining } => {
                write!(f, "GOLD {collected} {purse} {remaining}")
            }
            Response::Display(rows) => write!(f, "DISPLAY\n{rows}"),
            Response::Error(text) => write!(f, "ERROR {text}"),
            Response::Quit(text) => write!(f, "QUIT {text}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_round_trip() {
        for message in ["PLAY Alice de Wonder", "SPECTATE", "KEY L"] {
            let parsed = message.parse::<Request>().unwrap();
            assert_eq!(parsed.to_string(), message);
        }
    }

    #[test]
    fn play_keeps_the_raw_name() {
        assert_eq!("PLAY   spacey  ".parse::<Request>().unwrap(), Request::Play("  spacey  ".into()));
    }

    #[test]
    fn malformed_requests_are_rejected() {
        assert!("".parse::<Request>().is_err());
        assert!("PLAY".parse::<Request>().is_err());
        assert!("KEY ".parse::<Request>().is_err());
        assert!("SPECTATE now".parse::<Request>().is_err());
        assert!("DANCE".parse::<Request>().is_err());
    }

    #[test]
    fn responses_round_trip() {
        let messages: [Response; 6] = [
            Response::Ok('A'),
            Response::Grid { rows: 21, cols: 79 },
            Response::Gold { collected: 25, purse: 120, remaining: 155 },
            Response::Display("+---+\n|..@|\n+---+\n".into()),
            Response::Error("Unknown keystroke.".into()),
            Response::Quit("GAME OVER:\nA       300 Alice\n".into()),
        ];
        for message in messages {
            assert_eq!(message.to_string().parse::<Response>().unwrap(), message);
        }
    }

    #[test]
    fn display_body_follows_a_newline() {
        let rendered = Response::Display("row\n".into()).to_string();
        assert_eq!(rendered, "DISPLAY\nrow\n");
    }

    #[test]
    fn malformed_responses_are_rejected() {
        assert!("GOLD 1 2".parse::<Response>().is_err());
        assert!("GRID x y".parse::<Response>().is_err());
        assert!("HELLO".parse::<Response>().is_err());
        assert!("DISPLAY".parse::<Response>().is_err());
    }
}
