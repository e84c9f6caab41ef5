//! Provides fully-specified [Chess Position] implementation: stores the board
//! together with the game history and the state needed by the special moves
//! (castling rights and the en passant target).
//!
//! [`GameState`] is the entry point to the rules: it produces the candidate
//! and legal moves for a square, tells whether a move is legal and applies
//! moves to produce the next state.
//!
//! [Chess Position]: https://www.chessprogramming.org/Chess_Position

use std::fmt;

use anyhow::{bail, Context};

use crate::chess::attacks::{self, Targets};
use crate::chess::board::Board;
use crate::chess::core::{
    king_origin,
    CastleSide,
    CastlingRights,
    Color,
    Piece,
    PieceKind,
    Rank,
    Square,
};
use crate::chess::moves::{Move, MoveFlags, MoveRecord};
use crate::chess::special;

/// State of the chess game: board, move history, castling rights, en passant
/// target and the side to move. Apart from the history it has 1:1
/// relationship with [Forsyth-Edwards Notation] (FEN).
///
/// [`GameState::try_from()`] provides a convenient interface for creating a
/// [`GameState`]. It will clean up the input (trim newlines and whitespace)
/// and attempt to parse in either FEN or a version of [Extended Position
/// Description] (EPD) that only has the first four FEN fields.
///
/// Game states are values: [`GameState::apply_move`] returns a new state and
/// leaves the original intact.
///
/// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
/// [Extended Position Description]: https://www.chessprogramming.org/Extended_Position_Description
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    history: Vec<MoveRecord>,
    castling: CastlingRights,
    en_passant: Option<Square>,
    turn: Color,
    /// [Halfmove Clock][^ply] keeps track of the number of (half-)moves
    /// since the last capture or pawn move.
    ///
    /// [Halfmove Clock]: https://www.chessprogramming.org/Halfmove_Clock
    /// [^ply]: "Half-move" or ["ply"](https://www.chessprogramming.org/Ply) means a move of only
    ///     one side.
    halfmove_clock: u16,
    fullmove_number: u16,
}

impl GameState {
    /// Creates the starting position of the standard chess variant.
    ///
    /// ```
    /// use castle::chess::state::GameState;
    ///
    /// let starting_position = GameState::starting();
    /// assert_eq!(
    ///     &starting_position.to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        Self {
            board: Board::starting(),
            history: Vec::new(),
            castling: CastlingRights::INTACT,
            en_passant: None,
            turn: Color::White,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Parses board from Forsyth-Edwards Notation or its trimmed EPD version
    /// (without the move counters, which are then set to `0 1`).
    ///
    /// When the position has an en passant target, the double pawn push that
    /// created it is recorded as the only entry of the history: en passant
    /// captures are only allowed right after such a move.
    ///
    /// # Errors
    ///
    /// The input is not a valid FEN or the position can not be reached in a
    /// game without promotions: each side should have exactly one king, pawns
    /// can not stand on their own back rank and the side that has just moved
    /// can not be in check. A pawn that has reached the opposite back rank is
    /// accepted: it stays there without any moves.
    pub fn from_fen(input: &str) -> anyhow::Result<Self> {
        let mut parts = input.split_ascii_whitespace();
        let board: Board = match parts.next() {
            Some(placement) => placement.try_into()?,
            None => bail!("incorrect FEN: missing pieces placement"),
        };
        let turn: Color = match parts.next() {
            Some(value) => value.try_into()?,
            None => bail!("incorrect FEN: missing side to move"),
        };
        let castling: CastlingRights = match parts.next() {
            Some(value) => value.try_into()?,
            None => bail!("incorrect FEN: missing castling rights"),
        };
        let en_passant = match parts.next() {
            Some("-") => None,
            Some(value) => Some(
                Square::try_from(value)
                    .with_context(|| format!("incorrect FEN: en passant square '{value}'"))?,
            ),
            None => bail!("incorrect FEN: missing en passant square"),
        };
        let (halfmove_clock, fullmove_number) = match (parts.next(), parts.next()) {
            (None, _) => (0, 1),
            (Some(halfmove), Some(fullmove)) => (
                halfmove
                    .parse::<u16>()
                    .with_context(|| format!("incorrect FEN: halfmove clock '{halfmove}'"))?,
                fullmove
                    .parse::<u16>()
                    .with_context(|| format!("incorrect FEN: fullmove counter '{fullmove}'"))?,
            ),
            (Some(_), None) => bail!("incorrect FEN: missing fullmove counter"),
        };
        if parts.next().is_some() {
            bail!("trailing symbols are not allowed in FEN");
        }
        if fullmove_number == 0 {
            bail!("incorrect FEN: fullmove counter starts at 1");
        }
        let mut state = Self {
            board,
            history: Vec::new(),
            castling,
            en_passant,
            turn,
            halfmove_clock,
            fullmove_number,
        };
        if let Some(target) = en_passant {
            state.history.push(implied_double_push(&state.board, target, turn)?);
        }
        state.validate()?;
        log::debug!("parsed position {state}");
        Ok(state)
    }

    fn validate(&self) -> anyhow::Result<()> {
        for color in [Color::White, Color::Black] {
            let kings = self
                .board
                .pieces(color)
                .filter(|(_, piece)| piece.kind == PieceKind::King)
                .count();
            if kings != 1 {
                bail!("expected exactly one {color:?} king, got {kings}");
            }
        }
        for color in [Color::White, Color::Black] {
            if let Some(square) = Square::iter().find(|square| {
                square.rank() == Rank::backrank(color)
                    && self.board.at(*square) == Some(Piece::new(color, PieceKind::Pawn))
            }) {
                bail!("{color:?} pawns can not be placed on their backrank, found {square}");
            }
        }
        if king_attacked(&self.board, self.turn.opponent()) {
            bail!("the side that is not to move is in check");
        }
        Ok(())
    }

    /// The pieces.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Moves applied so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// The square skipped by a pawn that has just advanced by two squares.
    #[must_use]
    pub const fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// The side to move.
    #[must_use]
    pub const fn turn(&self) -> Color {
        self.turn
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Returns all squares the piece on `from` could move to without
    /// considering the safety of its own king: pseudo-legal moves plus en
    /// passant captures and castling destinations that are currently
    /// available. An empty square or a piece of the side that is not to move
    /// has no candidates.
    #[must_use]
    pub fn candidate_moves(&self, from: Square) -> Targets {
        let Some(piece) = self.board.at(from) else {
            return Targets::new();
        };
        if piece.owner != self.turn {
            return Targets::new();
        }
        let mut targets = attacks::pseudo_legal_moves(&self.board, from);
        match piece.kind {
            PieceKind::Pawn => {
                for file_delta in [-1, 1] {
                    if let Some(target) = from.offset(file_delta, piece.owner.pawn_direction()) {
                        if special::can_en_passant(from, target, self, piece.owner) {
                            targets.push(target);
                        }
                    }
                }
            },
            PieceKind::King if from == king_origin(piece.owner) => {
                for side in CastleSide::BOTH {
                    if special::can_castle(side, piece.owner, self) {
                        targets.push(side.king_destination(piece.owner));
                    }
                }
            },
            _ => (),
        }
        targets
    }

    /// Returns candidate destinations of the piece on `from` that do not leave
    /// its king under attack.
    #[must_use]
    pub fn legal_destinations(&self, from: Square) -> Targets {
        let Some(piece) = self.board.at(from) else {
            return Targets::new();
        };
        self.candidate_moves(from)
            .into_iter()
            .filter(|to| self.keeps_king_safe(from, *to, piece))
            .collect()
    }

    /// Returns all legal moves of the side to move.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board
            .pieces(self.turn)
            .flat_map(|(from, _)| {
                self.legal_destinations(from)
                    .into_iter()
                    .map(move |to| Move::new(from, to))
            })
            .collect()
    }

    /// Returns true if the side to move can move the piece on `from` to `to`:
    /// the destination is one of the [candidates](Self::candidate_moves) and
    /// the king of the moving side is not attacked after the move is played.
    ///
    /// The move is simulated on a copy of the board, so pins, discovered
    /// checks and checks revealed by en passant need no special treatment.
    #[must_use]
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        let Some(piece) = self.board.at(from) else {
            return false;
        };
        piece.owner == self.turn
            && self.candidate_moves(from).contains(&to)
            && self.keeps_king_safe(from, to, piece)
    }

    /// Returns true if the king of the side to move is attacked.
    #[must_use]
    pub fn in_check(&self) -> bool {
        king_attacked(&self.board, self.turn)
    }

    fn keeps_king_safe(&self, from: Square, to: Square, piece: Piece) -> bool {
        let (board, _) = self.play(from, to, piece);
        !king_attacked(&board, piece.owner)
    }

    /// Plays the move on a copy of the board and describes what happened.
    fn play(&self, from: Square, to: Square, piece: Piece) -> (Board, MoveRecord) {
        let color = piece.owner;
        let mut board = self.board;
        let mut flags = MoveFlags::empty();
        let mut captured = board.relocate(from, to);
        match piece.kind {
            PieceKind::King => {
                if let Some(side) = self.castle_side(from, to, color) {
                    board.relocate_castling_rook(color, side);
                    flags |= MoveFlags::CASTLING;
                }
            },
            PieceKind::Pawn => {
                if captured.is_none() && from.file() != to.file() && self.en_passant == Some(to) {
                    captured = board.take(Square::new(to.file(), from.rank()));
                    flags |= MoveFlags::EN_PASSANT;
                } else if from.offset(0, 2 * color.pawn_direction()) == Some(to) {
                    flags |= MoveFlags::DOUBLE_PAWN_PUSH;
                }
            },
            _ => (),
        }
        if captured.is_some() {
            flags |= MoveFlags::CAPTURE;
        }
        (board, MoveRecord {
            from,
            to,
            piece,
            captured,
            flags,
        })
    }

    /// Returns the castling side if a king move from `from` to `to` is a
    /// castling move: the king jumps two squares from its original square and
    /// the rook is there to follow.
    fn castle_side(&self, from: Square, to: Square, color: Color) -> Option<CastleSide> {
        if from != king_origin(color) {
            return None;
        }
        CastleSide::BOTH.into_iter().find(|side| {
            side.king_destination(color) == to
                && self.board.at(side.rook_origin(color)) == Some(Piece::new(color, PieceKind::Rook))
        })
    }

    /// Applies a move that has been validated by [`GameState::is_legal`] and
    /// returns the next state.
    ///
    /// Castling relocates the rook together with the king, en passant removes
    /// the captured pawn from the square next to `from`. Pieces leaving (or
    /// captured on) their castling origin squares lose the right to castle
    /// forever.
    ///
    /// The move is not validated. If `from` is empty or holds a piece of the
    /// side that is not to move, the state is returned unchanged; use
    /// [`GameState::make_move`] for untrusted input.
    #[must_use]
    pub fn apply_move(&self, from: Square, to: Square) -> Self {
        let Some(piece) = self.board.at(from) else {
            log::warn!("no piece to move on {from}, ignoring {from}{to}");
            return self.clone();
        };
        if piece.owner != self.turn {
            log::warn!(
                "{:?} piece on {from} can not move on {:?}'s turn, ignoring {from}{to}",
                piece.owner,
                self.turn
            );
            return self.clone();
        }
        let (board, record) = self.play(from, to, piece);
        let color = piece.owner;

        let mut castling = self.castling;
        castling.mark_moved(from);
        castling.mark_moved(to);
        if record.is_castling() {
            if let Some(side) = CastleSide::BOTH
                .into_iter()
                .find(|side| side.king_destination(color) == to)
            {
                castling.mark_moved(side.rook_origin(color));
            }
        }

        let en_passant = if record.is_double_pawn_push() {
            from.offset(0, color.pawn_direction())
        } else {
            None
        };

        let halfmove_clock = if piece.kind == PieceKind::Pawn || record.is_capture() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        let fullmove_number = match color {
            Color::White => self.fullmove_number,
            Color::Black => self.fullmove_number.saturating_add(1),
        };

        let mut history = self.history.clone();
        history.push(record);
        log::trace!("{color:?} plays {record}");

        Self {
            board,
            history,
            castling,
            en_passant,
            turn: self.turn.opponent(),
            halfmove_clock,
            fullmove_number,
        }
    }

    /// Checked version of [`GameState::apply_move`].
    ///
    /// # Errors
    ///
    /// If the move is not legal for the side to move.
    pub fn make_move(&self, from: Square, to: Square) -> anyhow::Result<Self> {
        let Some(piece) = self.board.at(from) else {
            bail!("illegal move {from}{to}: no piece on {from}");
        };
        if piece.owner != self.turn {
            bail!(
                "illegal move {from}{to}: {piece} belongs to {}, but {} is to move",
                piece.owner,
                self.turn
            );
        }
        if !self.is_legal(from, to) {
            bail!("illegal move {from}{to}");
        }
        Ok(self.apply_move(from, to))
    }
}

fn king_attacked(board: &Board, color: Color) -> bool {
    board
        .king(color)
        .is_some_and(|king| attacks::is_attacked(board, king, color.opponent()))
}

/// Reconstructs the double pawn push that has just created the en passant
/// `target` when `turn` is to move.
fn implied_double_push(board: &Board, target: Square, turn: Color) -> anyhow::Result<MoveRecord> {
    if target.rank() != Rank::en_passant_target(turn) {
        bail!("en passant square {target} is not on the rank {}", Rank::en_passant_target(turn));
    }
    let pusher = turn.opponent();
    let direction = pusher.pawn_direction();
    let pawn = Piece::new(pusher, PieceKind::Pawn);
    let (Some(from), Some(to)) = (target.offset(0, -direction), target.offset(0, direction)) else {
        bail!("en passant square {target} can not be skipped by a pawn");
    };
    if board.at(to) != Some(pawn) {
        bail!("en passant square {target} requires a pawn of the opponent on {to}");
    }
    if !board.is_empty(target) || !board.is_empty(from) {
        bail!("en passant square {target} requires {target} and {from} to be empty");
    }
    Ok(MoveRecord {
        from,
        to,
        piece: pawn,
        captured: None,
        flags: MoveFlags::DOUBLE_PAWN_PUSH,
    })
}

impl TryFrom<&str> for GameState {
    type Error = anyhow::Error;

    fn try_from(input: &str) -> anyhow::Result<Self> {
        let input = input.trim();
        for prefix in ["fen ", "epd "] {
            if let Some(stripped) = input.strip_prefix(prefix) {
                return Self::from_fen(stripped);
            }
        }
        Self::from_fen(input)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::starting()
    }
}

impl fmt::Display for GameState {
    /// Prints the position in Forsyth-Edwards Notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", &self.board)?;
        write!(f, "{} ", &self.turn)?;
        write!(f, "{} ", &self.castling)?;
        match self.en_passant {
            Some(square) => write!(f, "{square} "),
            None => write!(f, "- "),
        }?;
        write!(f, "{} ", &self.halfmove_clock)?;
        write!(f, "{}", &self.fullmove_number)?;
        Ok(())
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", &self.board)?;
        writeln!(f, "Player to move: {:?}", &self.turn)?;
        writeln!(f, "Fullmove counter: {:?}", &self.fullmove_number)?;
        writeln!(f, "En Passant: {:?}", &self.en_passant)?;
        // bitflags' default fmt::Debug implementation is not very convenient:
        // dump FEN instead.
        writeln!(f, "Castling rights: {}", &self.castling)?;
        writeln!(f, "FEN: {self}")?;
        Ok(())
    }
}

/// [Perft] (performance test, move path enumeration): counts the leaf nodes of
/// the legal move tree of given depth. The counts are well known for many
/// positions, which makes perft the standard way to verify move generators.
///
/// [Perft]: https://www.chessprogramming.org/Perft
#[must_use]
pub fn perft(state: &GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = state.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|next| perft(&state.apply_move(next.from, next.to), depth - 1))
        .sum()
}
