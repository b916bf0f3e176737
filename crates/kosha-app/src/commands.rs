use kosha_core::SourceRegistry;

/// What a line of user input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    ListSources,
    Lookup {
        word: String,
        /// Canonical name of the requested source
        preference: Option<String>,
    },
    /// Every source's answer, rendered as a list of picks
    Inline { query: String },
    MissingWord,
    Unknown(String),
    Empty,
}

impl Command {
    /// `/help`, `/kosha`, `/arth <word>`, `/<code> <word>`, `@ <word>` or a bare word
    pub fn parse(line: &str, registry: &SourceRegistry) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }

        if let Some(query) = line.strip_prefix('@') {
            let query = query.trim();
            if query.is_empty() {
                return Command::Empty;
            }
            return Command::Inline {
                query: query.to_string(),
            };
        }

        let Some(rest) = line.strip_prefix('/') else {
            return Command::Lookup {
                word: line.to_string(),
                preference: None,
            };
        };

        let (head, args) = match rest.split_once(char::is_whitespace) {
            Some((head, args)) => (head, args.trim()),
            None => (rest, ""),
        };
        // `/sh@somebot` addresses a bot by name in group chats
        let command = head.split('@').next().unwrap_or_default().to_lowercase();

        let preference = match command.as_str() {
            "start" | "help" => return Command::Help,
            "kosha" => return Command::ListSources,
            c if c.starts_with("arth") => None,
            c => match registry.resolve_by_code(c) {
                Some(source) => Some(source.name.to_string()),
                None => return Command::Unknown(c.to_string()),
            },
        };

        if args.is_empty() {
            return Command::MissingWord;
        }

        Command::Lookup {
            word: args.to_string(),
            preference,
        }
    }
}
