//! A [mailbox] is a square-centric representation of a chess board: an 8x8 grid
//! where each cell may contain a chess piece or be empty.
//!
//! [mailbox]: https://www.chessprogramming.org/Mailbox

use std::fmt::{self, Write};
use std::ops::Index;

use anyhow::bail;

use crate::chess::core::{
    CastleSide,
    Color,
    File,
    Piece,
    PieceKind,
    Rank,
    Square,
    BOARD_WIDTH,
};

/// Returns true if `(file, rank)` coordinates are located on the board, i.e.
/// both of them are within `0..BOARD_WIDTH`. This is a pure bounds check: the
/// contents of the board do not matter.
///
/// ```
/// use castle::chess::board::square_on_board;
///
/// assert!(square_on_board(0, 0));
/// assert!(square_on_board(7, 7));
/// assert!(!square_on_board(8, 0));
/// assert!(!square_on_board(3, -1));
/// ```
#[must_use]
pub const fn square_on_board(file: i8, rank: i8) -> bool {
    file >= 0 && file < BOARD_WIDTH as i8 && rank >= 0 && rank < BOARD_WIDTH as i8
}

/// Classic 8x8 board indexed by `[rank][file]` where rank 0 is White's back
/// rank (rank 1 in chess notation) and file 0 is the a-file.
///
/// The board is a plain `Copy` value: the engine only ever reads boards it is
/// given and builds new ones instead of modifying the caller's.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
}

impl Board {
    /// Creates a board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [[None; BOARD_WIDTH as usize]; BOARD_WIDTH as usize],
        }
    }

    /// Creates a board with pieces arranged in the starting position of the
    /// standard chess.
    #[must_use]
    pub fn starting() -> Self {
        const BACKRANK: [PieceKind; BOARD_WIDTH as usize] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for (file, kind) in File::iter().zip(BACKRANK) {
                board.set(
                    Square::new(file, Rank::backrank(color)),
                    Some(Piece::new(color, kind)),
                );
                board.set(
                    Square::new(file, Rank::pawns_starting(color)),
                    Some(Piece::new(color, PieceKind::Pawn)),
                );
            }
        }
        board
    }

    /// Returns the piece standing on `square`, if any.
    #[must_use]
    pub const fn at(&self, square: Square) -> Option<Piece> {
        self.squares[square.rank() as usize][square.file() as usize]
    }

    /// Places `piece` on `square` (or clears it if `piece` is `None`).
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.rank() as usize][square.file() as usize] = piece;
    }

    /// Removes the piece from `square` and returns it.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.rank() as usize][square.file() as usize].take()
    }

    /// Returns true if `square` is empty.
    #[must_use]
    pub const fn is_empty(&self, square: Square) -> bool {
        self.at(square).is_none()
    }

    /// The universal "can land here" predicate for everything except pawn
    /// moves and castling: the square is either empty or holds a piece of the
    /// opponent of `mover`.
    #[must_use]
    pub fn can_land_on(&self, square: Square, mover: Color) -> bool {
        match self.at(square) {
            None => true,
            Some(piece) => piece.owner != mover,
        }
    }

    /// Iterates over all pieces of `color` together with their squares.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(move |square| match self.at(square) {
            Some(piece) if piece.owner == color => Some((square, piece)),
            _ => None,
        })
    }

    /// Locates the king of `color`. Returns `None` if there is no such king on
    /// the board.
    #[must_use]
    pub fn king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Moves the piece from `from` to `to`, replacing whatever was on `to`.
    /// Returns the replaced piece.
    pub(super) fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.take(from);
        let captured = self.take(to);
        self.set(to, piece);
        captured
    }

    /// Moves the castling rook of `color` next to the king.
    pub(super) fn relocate_castling_rook(&mut self, color: Color, side: CastleSide) {
        let _ = self.relocate(side.rook_origin(color), side.rook_destination(color));
    }
}

impl Default for Board {
    /// Default value is that of a standard starting chess position.
    fn default() -> Self {
        Self::starting()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, square: Square) -> &Self::Output {
        &self.squares[square.rank() as usize][square.file() as usize]
    }
}

impl TryFrom<&str> for Board {
    type Error = anyhow::Error;

    /// Parses the Piece Placement part of [Forsyth-Edwards Notation]: ranks
    /// from 8 to 1 separated by '/', digits standing for runs of empty
    /// squares.
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    fn try_from(placement: &str) -> anyhow::Result<Self> {
        let mut board = Self::empty();
        let mut ranks = Rank::iter().rev();
        for rank_fen in placement.split('/') {
            let Some(rank) = ranks.next() else {
                bail!("incorrect FEN: expected 8 ranks, got {placement}");
            };
            let mut file: u8 = 0;
            for symbol in rank_fen.chars() {
                if file >= BOARD_WIDTH {
                    bail!("incorrect FEN: rank {rank_fen} exceeds {BOARD_WIDTH} files");
                }
                match symbol {
                    '0' => bail!("increment can not be 0"),
                    '1'..='8' => {
                        file += symbol as u8 - b'0';
                        continue;
                    },
                    _ => (),
                }
                let piece = Piece::try_from(symbol)?;
                board.set(Square::new(File::try_from(file)?, rank), Some(piece));
                file += 1;
            }
            if file != BOARD_WIDTH {
                bail!(
                    "incorrect FEN: rank size should be exactly {BOARD_WIDTH}, got {rank_fen} of length {file}"
                );
            }
        }
        if ranks.next().is_some() {
            bail!("incorrect FEN: there should be 8 ranks, got {placement}");
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    /// Prints board representation in FEN format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            let mut empty_squares = 0i32;
            for file in File::iter() {
                if let Some(piece) = self.at(Square::new(file, rank)) {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if rank != Rank::One {
                const RANK_SEPARATOR: char = '/';
                f.write_char(RANK_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece) a-la Stockfish "debug" command in UCI mode.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                match self.at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if file != File::H {
                    write!(f, "{SQUARE_SEPARATOR}")?;
                }
            }
            if rank != Rank::One {
                write!(f, "{LINE_SEPARATOR}")?;
            }
        }
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    #[test]
    fn starting_board() {
        let board = Board::starting();
        assert_eq!(board.to_string(), STARTING_PLACEMENT);
        assert_eq!(Board::try_from(STARTING_PLACEMENT).unwrap(), board);
        assert_eq!(
            format!("{board:?}"),
            "r n b q k b n r\n\
             p p p p p p p p\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             . . . . . . . .\n\
             P P P P P P P P\n\
             R N B Q K B N R"
        );
        assert_eq!(board.king(Color::White), Some(Square::E1));
        assert_eq!(board.king(Color::Black), Some(Square::E8));
        assert_eq!(board.pieces(Color::White).count(), 16);
        assert_eq!(board.pieces(Color::Black).count(), 16);
    }

    #[test]
    fn indexing() {
        let board = Board::starting();
        assert_eq!(
            board.at(Square::D1),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        assert_eq!(board[Square::G8], Some(Piece::new(Color::Black, PieceKind::Knight)));
        assert_eq!(board.at(Square::E4), None);
        assert!(board.is_empty(Square::A3));
        assert!(!board.is_empty(Square::A2));
    }

    #[test]
    fn landing() {
        let board = Board::starting();
        // Empty squares are always fine.
        assert!(board.can_land_on(Square::E4, Color::White));
        assert!(board.can_land_on(Square::E4, Color::Black));
        // Opponent pieces can be captured.
        assert!(board.can_land_on(Square::E7, Color::White));
        assert!(board.can_land_on(Square::E2, Color::Black));
        // Own pieces block.
        assert!(!board.can_land_on(Square::E2, Color::White));
        assert!(!board.can_land_on(Square::E7, Color::Black));
    }

    #[test]
    fn bounds() {
        for file in -2..10 {
            for rank in -2..10 {
                assert_eq!(
                    square_on_board(file, rank),
                    (0..8).contains(&file) && (0..8).contains(&rank),
                    "({file}, {rank})"
                );
            }
        }
    }

    #[test]
    fn relocation() {
        let mut board = Board::starting();
        assert_eq!(board.relocate(Square::E2, Square::E4), None);
        assert_eq!(board.to_string(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
        assert_eq!(
            board.relocate(Square::D1, Square::D7),
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
        assert_eq!(board.take(Square::D7), Some(Piece::new(Color::White, PieceKind::Queen)));
        assert_eq!(board.take(Square::D7), None);

        let mut board = Board::try_from("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        board.relocate_castling_rook(Color::White, CastleSide::Kingside);
        board.relocate_castling_rook(Color::Black, CastleSide::Queenside);
        assert_eq!(board.to_string(), "3rk2r/8/8/8/8/8/8/R3KR2");
    }

    #[test]
    fn incorrect_placement() {
        assert!(Board::try_from("").is_err());
        assert!(Board::try_from("8/8/8/8/8/8/8").is_err());
        assert!(Board::try_from("8/8/8/8/8/8/8/8/8").is_err());
        assert!(Board::try_from("9/8/8/8/8/8/8/8").is_err());
        assert!(Board::try_from("7/8/8/8/8/8/8/8").is_err());
        assert!(Board::try_from("ppppppppp/8/8/8/8/8/8/8").is_err());
        assert!(Board::try_from("0p7/8/8/8/8/8/8/8").is_err());
        assert!(Board::try_from("x7/8/8/8/8/8/8/8").is_err());
        assert!(Board::try_from("8/8/8/8/8/8/8/8").is_ok());
    }
}
