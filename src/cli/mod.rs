//! # CLI Module
//!
//! The interactive console surface: reads one command per line, runs it to
//! completion through a [`Session`] and prints the [`Reply`].
//!
//! ## Commands
//!
//! - `auth` - log in through the browser and obtain a bearer token
//! - `new` - new album releases
//! - `featured` - featured playlists
//! - `categories` - browse categories
//! - `playlists <name>` - playlists of the named category
//! - `next` / `prev` - page through the collection shown last
//! - `exit` - leave the console
//!
//! Content commands are refused until `auth` has succeeded. Errors raised by
//! a command are printed and the loop goes on; only a redirect listener that
//! cannot be started ends the loop with an error.

mod command;
mod display;
mod session;

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{Res, config::Settings};

pub use command::Command;
pub use display::render;
pub use session::{Reply, Session};

/// Runs the interactive loop until `exit` or end of input.
pub async fn run(settings: Settings) -> Res<()> {
    let mut session = Session::new(settings);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let reply = session.dispatch(Command::from(line.as_str())).await?;
        render(&reply, session.page_size());
        if reply == Reply::Exit {
            break;
        }
    }

    Ok(())
}
