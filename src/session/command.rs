/// Commands understood by the text driver. Arguments are kept as text: they
/// are validated when the command is executed so that the errors can be
/// reported back.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    SetPosition {
        fen: Option<String>,
        moves: Vec<String>,
    },
    Moves {
        square: Option<String>,
    },
    Play {
        next_move: String,
    },
    Undo,
    History,
    Display,
    Perft {
        depth: String,
    },
    Quit,
    Unknown(String),
}

fn parse_setposition(parts: &[&str]) -> Command {
    let moves_index = parts.iter().position(|&x| x == "moves");
    let end = moves_index.unwrap_or(parts.len());
    let fen = match parts.get(1) {
        Some(&"startpos") if end == 2 => None,
        Some(&"fen") if end > 2 => Some(parts[2..end].join(" ")),
        _ => return Command::Unknown(parts.join(" ")),
    };
    let moves = moves_index.map_or_else(Vec::new, |index| {
        parts[index + 1..].iter().map(|s| (*s).to_string()).collect()
    });
    Command::SetPosition { fen, moves }
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split_whitespace().collect();

        match parts.as_slice() {
            ["position", ..] => parse_setposition(&parts),
            ["moves"] => Self::Moves { square: None },
            ["moves", square] => Self::Moves {
                square: Some((*square).to_string()),
            },
            ["play", next_move] => Self::Play {
                next_move: (*next_move).to_string(),
            },
            ["undo"] => Self::Undo,
            ["history"] => Self::History,
            ["d"] => Self::Display,
            ["perft", depth] => Self::Perft {
                depth: (*depth).to_string(),
            },
            ["quit"] => Self::Quit,
            _ => Self::Unknown(input.trim().to_string()),
        }
    }
}
