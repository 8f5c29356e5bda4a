/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `new` - new album releases
    New,
    /// `featured` - featured playlists
    Featured,
    /// `categories` - browse categories
    Categories,
    /// `playlists <name>` - playlists of a category, the name may contain spaces
    Playlists(String),
    Prev,
    Next,
    Auth,
    Exit,
    /// Anything else, kept verbatim for the message.
    Unsupported(String),
}

impl From<&str> for Command {
    fn from(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match (word, rest.is_empty()) {
            ("new", true) => Command::New,
            ("featured", true) => Command::Featured,
            ("categories", true) => Command::Categories,
            ("playlists", _) => Command::Playlists(rest.to_string()),
            ("prev", true) => Command::Prev,
            ("next", true) => Command::Next,
            ("auth", true) => Command::Auth,
            ("exit", true) => Command::Exit,
            _ => Command::Unsupported(line.to_string()),
        }
    }
}
