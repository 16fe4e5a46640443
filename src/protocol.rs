//! Line protocol for driving a shelf from text commands.
//!
//! The shelf itself is a library-level data structure; this module is the
//! external collaborator that speaks the line protocol driving it:
//!
//! ```text
//! <capacity> <op-count>          header, once at startup
//! ADD <id> <popularity>          upsert, no output
//! ACCESS <id>                    prints popularity on a hit, -1 on a miss
//! ```
//!
//! A miss is rendered as the literal text `-1` at this boundary only; the
//! library boundary keeps misses as `None`, so a stored popularity of -1
//! never masquerades as one.
//!
//! ## Example Usage
//!
//! ```
//! use shelfkit::policy::lru::ShelfCore;
//! use shelfkit::protocol::{apply, Command};
//!
//! let mut shelf = ShelfCore::try_new(2).unwrap();
//!
//! let add: Command = "ADD 1 10".parse().unwrap();
//! assert_eq!(apply(&mut shelf, add), None);
//!
//! let hit: Command = "ACCESS 1".parse().unwrap();
//! assert_eq!(apply(&mut shelf, hit).unwrap().to_string(), "10");
//!
//! let miss: Command = "ACCESS 9".parse().unwrap();
//! assert_eq!(apply(&mut shelf, miss).unwrap().to_string(), "-1");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::CommandError;
use crate::traits::{BookId, BookShelf, Popularity};

/// Startup header: shelf capacity and the number of command lines that
/// follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub capacity: usize,
    pub op_count: usize,
}

impl FromStr for Header {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.split_whitespace();
        let capacity = parse_field::<usize>(fields.next(), "capacity")?;
        let op_count = parse_field::<usize>(fields.next(), "operation count")?;
        if fields.next().is_some() {
            return Err(CommandError::new(format!(
                "trailing input after header: {:?}",
                line
            )));
        }
        Ok(Header { capacity, op_count })
    }
}

/// One parsed protocol operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `ADD <id> <popularity>`: upsert with eviction.
    Add {
        id: BookId,
        popularity: Popularity,
    },
    /// `ACCESS <id>`: read with touch.
    Access { id: BookId },
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = line.split_whitespace();
        let op = fields
            .next()
            .ok_or_else(|| CommandError::new("empty command line"))?;

        let command = match op {
            "ADD" => {
                let id = parse_field::<BookId>(fields.next(), "id")?;
                let popularity = parse_field::<Popularity>(fields.next(), "popularity")?;
                Command::Add { id, popularity }
            },
            "ACCESS" => {
                let id = parse_field::<BookId>(fields.next(), "id")?;
                Command::Access { id }
            },
            other => {
                return Err(CommandError::new(format!("unknown operation {:?}", other)));
            },
        };

        if fields.next().is_some() {
            return Err(CommandError::new(format!(
                "trailing input after command: {:?}",
                line
            )));
        }
        Ok(command)
    }
}

fn parse_field<T: FromStr>(field: Option<&str>, what: &str) -> Result<T, CommandError> {
    let raw = field.ok_or_else(|| CommandError::new(format!("missing {}", what)))?;
    raw.parse::<T>()
        .map_err(|_| CommandError::new(format!("malformed {}: {:?}", what, raw)))
}

/// Outcome of an `ACCESS` command.
///
/// `Display` renders the output contract: the popularity on a hit, the
/// literal `-1` on a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessReply {
    Hit(Popularity),
    Miss,
}

impl fmt::Display for AccessReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessReply::Hit(popularity) => write!(f, "{}", popularity),
            AccessReply::Miss => f.write_str("-1"),
        }
    }
}

/// Dispatches one command against a shelf.
///
/// `ADD` produces no output; `ACCESS` produces a reply the caller is
/// expected to print.
pub fn apply<S: BookShelf>(shelf: &mut S, command: Command) -> Option<AccessReply> {
    match command {
        Command::Add { id, popularity } => {
            shelf.add(id, popularity);
            None
        },
        Command::Access { id } => Some(match shelf.access(id) {
            Some(popularity) => AccessReply::Hit(popularity),
            None => AccessReply::Miss,
        }),
    }
}
