//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};

use anyhow::bail;
use itertools::Itertools;

use crate::chess::board::square_on_board;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// Board squares: from left to right, from bottom to the top:
///
/// ```
/// use castle::chess::core::Square;
///
/// assert_eq!(Square::A1 as u8, 0);
/// assert_eq!(Square::E1 as u8, 4);
/// assert_eq!(Square::H1 as u8, 7);
/// assert_eq!(Square::A4 as u8, 8 * 3);
/// assert_eq!(Square::H8 as u8, 63);
/// ```
///
/// Square is a compact representation using only one byte and it is always
/// located on the board: off-board coordinates can only be expressed as raw
/// `(file, rank)` pairs that fail [`square_on_board`].
///
/// ```
/// use castle::chess::core::Square;
///
/// assert_eq!(std::mem::size_of::<Square>(), 1);
/// ```
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[rustfmt::skip]
#[allow(missing_docs)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// All squares in the order of their indices (A1, B1, ..., H8).
    #[rustfmt::skip]
    pub const ALL: [Self; BOARD_SIZE as usize] = [
        Self::A1, Self::B1, Self::C1, Self::D1, Self::E1, Self::F1, Self::G1, Self::H1,
        Self::A2, Self::B2, Self::C2, Self::D2, Self::E2, Self::F2, Self::G2, Self::H2,
        Self::A3, Self::B3, Self::C3, Self::D3, Self::E3, Self::F3, Self::G3, Self::H3,
        Self::A4, Self::B4, Self::C4, Self::D4, Self::E4, Self::F4, Self::G4, Self::H4,
        Self::A5, Self::B5, Self::C5, Self::D5, Self::E5, Self::F5, Self::G5, Self::H5,
        Self::A6, Self::B6, Self::C6, Self::D6, Self::E6, Self::F6, Self::G6, Self::H6,
        Self::A7, Self::B7, Self::C7, Self::D7, Self::E7, Self::F7, Self::G7, Self::H7,
        Self::A8, Self::B8, Self::C8, Self::D8, Self::E8, Self::F8, Self::G8, Self::H8,
    ];

    /// Connects file (column) and rank (row) to form a full square.
    #[must_use]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self::ALL[file as usize + (rank as usize) * BOARD_WIDTH as usize]
    }

    /// Returns file (column) on which the square is located.
    #[must_use]
    pub const fn file(self) -> File {
        File::ALL[(self as u8 % BOARD_WIDTH) as usize]
    }

    /// Returns rank (row) on which the square is located.
    #[must_use]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self as u8 / BOARD_WIDTH) as usize]
    }

    /// Returns the square `file_delta` files to the right and `rank_delta`
    /// ranks up (from White's point of view) or `None` if that would leave the
    /// board.
    ///
    /// ```
    /// use castle::chess::core::Square;
    ///
    /// assert_eq!(Square::E2.offset(0, 2), Some(Square::E4));
    /// assert_eq!(Square::G1.offset(1, 2), Some(Square::H3));
    /// assert_eq!(Square::H1.offset(1, 0), None);
    /// ```
    #[must_use]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if !square_on_board(file, rank) {
            return None;
        }
        Some(Self::new(File::ALL[file as usize], Rank::ALL[rank as usize]))
    }

    /// Iterates over all squares of the board.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }
}

impl TryFrom<u8> for Square {
    type Error = anyhow::Error;

    /// Creates a square given its position on the board.
    ///
    /// # Errors
    ///
    /// If given square index is outside 0..[`BOARD_SIZE`] range.
    fn try_from(square_index: u8) -> anyhow::Result<Self> {
        match Self::ALL.get(square_index as usize) {
            Some(square) => Ok(*square),
            None => bail!("square index should be in 0..BOARD_SIZE, got {square_index}"),
        }
    }
}

impl TryFrom<&str> for Square {
    type Error = anyhow::Error;

    fn try_from(square: &str) -> anyhow::Result<Self> {
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            ),
        };
        Ok(Self::new(file.try_into()?, rank.try_into()?))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Represents a column (vertical row) of the chessboard. In chess notation, it
/// is normally represented with a lowercase letter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    #[allow(missing_docs)]
    pub const ALL: [Self; BOARD_WIDTH as usize] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];

    #[allow(missing_docs)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + *self as u8) as char)
    }
}

impl TryFrom<char> for File {
    type Error = anyhow::Error;

    fn try_from(file: char) -> anyhow::Result<Self> {
        match file {
            'a'..='h' => Ok(Self::ALL[(file as u8 - b'a') as usize]),
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        }
    }
}

impl TryFrom<u8> for File {
    type Error = anyhow::Error;

    fn try_from(column: u8) -> anyhow::Result<Self> {
        match Self::ALL.get(column as usize) {
            Some(file) => Ok(*file),
            None => bail!("file should be within 0..BOARD_WIDTH, got {column}"),
        }
    }
}

/// Represents a horizontal row of the chessboard. In chess notation, it is
/// represented with a number. The implementation assumes zero-based values
/// (i.e. rank 1 would be 0).
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
    Five = 4,
    Six = 5,
    Seven = 6,
    Eight = 7,
}

impl Rank {
    #[allow(missing_docs)]
    pub const ALL: [Self; BOARD_WIDTH as usize] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
    ];

    #[allow(missing_docs)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        Self::ALL.into_iter()
    }

    /// The rank king and rooks start on.
    #[must_use]
    pub const fn backrank(color: Color) -> Self {
        match color {
            Color::White => Self::One,
            Color::Black => Self::Eight,
        }
    }

    /// The rank pawns start on: double pushes are only possible from here.
    #[must_use]
    pub const fn pawns_starting(color: Color) -> Self {
        match color {
            Color::White => Self::Two,
            Color::Black => Self::Seven,
        }
    }

    /// The rank of the en passant target square when `color` is to move (i.e.
    /// the opponent has just pushed a pawn by two squares).
    #[must_use]
    pub const fn en_passant_target(color: Color) -> Self {
        match color {
            Color::White => Self::Six,
            Color::Black => Self::Three,
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = anyhow::Error;

    fn try_from(rank: char) -> anyhow::Result<Self> {
        match rank {
            '1'..='8' => Ok(Self::ALL[(rank as u8 - b'1') as usize]),
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = anyhow::Error;

    fn try_from(row: u8) -> anyhow::Result<Self> {
        match Self::ALL.get(row as usize) {
            Some(rank) => Ok(*rank),
            None => bail!("rank should be within 0..BOARD_WIDTH, got {row}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8 + 1)
    }
}

/// A standard game of chess is played between two sides: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Rank delta of a single pawn push: White pawns walk towards rank 8
    /// (increasing rank index), Black pawns towards rank 1.
    #[must_use]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }
}

impl TryFrom<&str> for Color {
    type Error = anyhow::Error;

    fn try_from(color: &str) -> anyhow::Result<Self> {
        match color {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("color should be 'w' or 'b', got '{color}'"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// Represents a specific piece owned by a player. Pieces are plain values:
/// moving or capturing replaces them on the board instead of mutating them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Color,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(owner: Color, kind: PieceKind) -> Self {
        Self { owner, kind }
    }

    /// Returns true if this is a piece of `owner` and `kind`.
    #[must_use]
    pub fn is(self, owner: Color, kind: PieceKind) -> bool {
        self.owner == owner && self.kind == kind
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    /// Parses the FEN symbol of a piece: uppercase for White, lowercase for
    /// Black.
    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let kind = match symbol.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        };
        let owner = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Self::new(owner, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self.kind {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        f.write_char(match self.owner {
            Color::White => symbol.to_ascii_uppercase(),
            Color::Black => symbol,
        })
    }
}

/// The direction of [castling]: towards the h-file (kingside, short, O-O) or
/// towards the a-file (queenside, long, O-O-O).
///
/// [castling]: https://www.chessprogramming.org/Castling
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    #[allow(missing_docs)]
    pub const BOTH: [Self; 2] = [Self::Kingside, Self::Queenside];

    /// Original square of the rook castling on this side.
    #[must_use]
    pub const fn rook_origin(self, color: Color) -> Square {
        Square::new(
            match self {
                Self::Kingside => File::H,
                Self::Queenside => File::A,
            },
            Rank::backrank(color),
        )
    }

    /// The square the king lands on after castling.
    #[must_use]
    pub const fn king_destination(self, color: Color) -> Square {
        Square::new(
            match self {
                Self::Kingside => File::G,
                Self::Queenside => File::C,
            },
            Rank::backrank(color),
        )
    }

    /// The square the rook lands on after castling: the one the king walks
    /// over.
    #[must_use]
    pub const fn rook_destination(self, color: Color) -> Square {
        Square::new(
            match self {
                Self::Kingside => File::F,
                Self::Queenside => File::D,
            },
            Rank::backrank(color),
        )
    }
}

/// Original square of the king in the standard chess.
#[must_use]
pub const fn king_origin(color: Color) -> Square {
    Square::new(File::E, Rank::backrank(color))
}

bitflags::bitflags! {
    /// Tracks whether the pieces that take part in [castling] have ever left
    /// their original squares (e1, a1, h1 for White and e8, a8, h8 for
    /// Black). A set flag means "this piece has moved" and it is never cleared
    /// again: returning to the original square does not restore the right to
    /// castle.
    ///
    /// The full rules are:
    ///
    /// - The king and the castling rook must not have previously moved.
    /// - No square from the king's initial square to its final square may be under
    ///   attack by an enemy piece.
    /// - All the squares between the king and the castling rook must be
    ///   vacant.
    ///
    /// Only the first rule is tracked here, the rest depend on the board and
    /// are checked by [`crate::chess::special::can_castle`].
    ///
    /// [castling]: https://www.chessprogramming.org/Castling
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CastlingRights: u8 {
        #[allow(missing_docs)]
        const WHITE_KING_MOVED = 0b0000_0001;
        #[allow(missing_docs)]
        const WHITE_KINGSIDE_ROOK_MOVED = 0b0000_0010;
        #[allow(missing_docs)]
        const WHITE_QUEENSIDE_ROOK_MOVED = 0b0000_0100;
        #[allow(missing_docs)]
        const BLACK_KING_MOVED = 0b0000_1000;
        #[allow(missing_docs)]
        const BLACK_KINGSIDE_ROOK_MOVED = 0b0001_0000;
        #[allow(missing_docs)]
        const BLACK_QUEENSIDE_ROOK_MOVED = 0b0010_0000;
    }
}

impl CastlingRights {
    /// Nothing has moved yet: both sides can castle both ways.
    pub const INTACT: Self = Self::empty();

    /// Returns the flag tracking the piece originally placed on `square` or
    /// `None` if the square is not relevant for castling.
    #[must_use]
    pub const fn origin(square: Square) -> Option<Self> {
        match square {
            Square::E1 => Some(Self::WHITE_KING_MOVED),
            Square::H1 => Some(Self::WHITE_KINGSIDE_ROOK_MOVED),
            Square::A1 => Some(Self::WHITE_QUEENSIDE_ROOK_MOVED),
            Square::E8 => Some(Self::BLACK_KING_MOVED),
            Square::H8 => Some(Self::BLACK_KINGSIDE_ROOK_MOVED),
            Square::A8 => Some(Self::BLACK_QUEENSIDE_ROOK_MOVED),
            _ => None,
        }
    }

    /// Returns true if the piece that started on `square` has moved (or was
    /// captured there). Squares that are not king or rook origins are never
    /// "moved".
    #[must_use]
    pub fn has_moved(self, square: Square) -> bool {
        Self::origin(square).is_some_and(|flag| self.contains(flag))
    }

    /// Records that the piece that started on `square` has left it. No-op for
    /// squares that are not tracked.
    pub fn mark_moved(&mut self, square: Square) {
        if let Some(flag) = Self::origin(square) {
            self.insert(flag);
        }
    }

    /// Returns true if neither the king nor the rook of `side` has moved.
    #[must_use]
    pub fn unmoved(self, color: Color, side: CastleSide) -> bool {
        !self.has_moved(king_origin(color)) && !self.has_moved(side.rook_origin(color))
    }
}

impl TryFrom<&str> for CastlingRights {
    type Error = anyhow::Error;

    /// Parses [`CastlingRights`] for both players from the FEN format. The user
    /// is responsible for providing valid input cleaned up from the actual FEN
    /// chunk.
    ///
    /// A missing letter marks the corresponding rook as moved; when both
    /// letters of a color are missing, its king is marked as moved as well.
    ///
    /// # Errors
    ///
    /// Returns [`anyhow::Error`] if given pattern does not match
    ///
    /// [`CastlingRights`] := (K)? (Q)? (k)? (q)?
    ///
    /// Note that both letters have to be either uppercase or lowercase.
    fn try_from(input: &str) -> anyhow::Result<Self> {
        if input.is_empty() || input.len() > 4 {
            bail!("castling rights should be 1..=4 symbols, got '{input}'");
        }
        if input == "-" {
            return Ok(Self::all());
        }
        let mut available = (false, false, false, false);
        let mut previous = 0;
        for symbol in input.chars() {
            let (order, flag) = match symbol {
                'K' => (1, &mut available.0),
                'Q' => (2, &mut available.1),
                'k' => (3, &mut available.2),
                'q' => (4, &mut available.3),
                _ => bail!("unexpected castling rights symbol '{symbol}' in '{input}'"),
            };
            if order <= previous {
                bail!("castling rights should be in \"KQkq\" order, got '{input}'");
            }
            previous = order;
            *flag = true;
        }
        let mut rights = Self::INTACT;
        let (white_short, white_long, black_short, black_long) = available;
        for (color, short, long) in [
            (Color::White, white_short, white_long),
            (Color::Black, black_short, black_long),
        ] {
            if !short {
                rights.mark_moved(CastleSide::Kingside.rook_origin(color));
            }
            if !long {
                rights.mark_moved(CastleSide::Queenside.rook_origin(color));
            }
            if !short && !long {
                rights.mark_moved(king_origin(color));
            }
        }
        Ok(rights)
    }
}

impl fmt::Display for CastlingRights {
    /// Prints castling rights in FEN format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut any = false;
        for (color, side, symbol) in [
            (Color::White, CastleSide::Kingside, 'K'),
            (Color::White, CastleSide::Queenside, 'Q'),
            (Color::Black, CastleSide::Kingside, 'k'),
            (Color::Black, CastleSide::Queenside, 'q'),
        ] {
            if self.unmoved(color, side) {
                f.write_char(symbol)?;
                any = true;
            }
        }
        if !any {
            f.write_char('-')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rank() {
        assert_eq!(
            ('1'..='9')
                .filter_map(|ch| Rank::try_from(ch).ok())
                .collect::<Vec<Rank>>(),
            Rank::ALL.to_vec()
        );
        assert!(Rank::try_from('0').is_err());
        assert!(Rank::try_from(8u8).is_err());
    }

    #[test]
    fn file() {
        assert_eq!(
            ('a'..='i')
                .filter_map(|ch| File::try_from(ch).ok())
                .collect::<Vec<File>>(),
            File::ALL.to_vec()
        );
        assert!(File::try_from('A').is_err());
        assert!(File::try_from(8u8).is_err());
    }

    #[test]
    fn square() {
        let squares: Vec<_> = [0u8, 63, 1, 8, 11, 57]
            .iter()
            .map(|square| Square::try_from(*square).unwrap())
            .collect();
        assert_eq!(
            squares,
            vec![
                Square::A1,
                Square::H8,
                Square::B1,
                Square::A2,
                Square::D2,
                Square::B8
            ]
        );
        for square in Square::iter() {
            assert_eq!(Square::new(square.file(), square.rank()), square);
            assert_eq!(Square::try_from(square.to_string().as_str()).unwrap(), square);
        }
        assert!(Square::try_from(64u8).is_err());
        assert!(Square::try_from("e").is_err());
        assert!(Square::try_from("e9").is_err());
        assert!(Square::try_from("i1").is_err());
        assert!(Square::try_from("e22").is_err());
    }

    #[test]
    fn offsets() {
        assert_eq!(Square::E4.offset(1, 1), Some(Square::F5));
        assert_eq!(Square::E4.offset(-4, -3), Some(Square::A1));
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::A1.offset(0, -1), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::B7.offset(-1, 2), None);
    }

    #[test]
    fn pieces() {
        for symbol in "KQRBNPkqrbnp".chars() {
            assert_eq!(Piece::try_from(symbol).unwrap().to_string(), symbol.to_string());
        }
        assert_eq!(
            Piece::try_from('n').unwrap(),
            Piece::new(Color::Black, PieceKind::Knight)
        );
        assert!(Piece::try_from('x').is_err());
        assert!(Piece::try_from('1').is_err());
    }

    #[test]
    fn castling_rights() {
        for fen in ["KQkq", "KQ", "kq", "Kq", "Qk", "K", "q", "-"] {
            assert_eq!(CastlingRights::try_from(fen).unwrap().to_string(), fen);
        }
        assert_eq!(CastlingRights::try_from("KQkq").unwrap(), CastlingRights::INTACT);
        assert_eq!(CastlingRights::try_from("-").unwrap(), CastlingRights::all());
        assert!(CastlingRights::try_from("").is_err());
        assert!(CastlingRights::try_from("qk").is_err());
        assert!(CastlingRights::try_from("KK").is_err());
        assert!(CastlingRights::try_from("KQkqK").is_err());
        assert!(CastlingRights::try_from("X").is_err());
    }

    #[test]
    fn moved_flags_are_sticky() {
        let mut rights = CastlingRights::INTACT;
        assert!(rights.unmoved(Color::White, CastleSide::Kingside));
        rights.mark_moved(Square::H1);
        assert!(rights.has_moved(Square::H1));
        assert!(!rights.unmoved(Color::White, CastleSide::Kingside));
        assert!(rights.unmoved(Color::White, CastleSide::Queenside));
        // Marking again or marking untracked squares changes nothing.
        rights.mark_moved(Square::H1);
        rights.mark_moved(Square::D4);
        assert_eq!(rights, CastlingRights::WHITE_KINGSIDE_ROOK_MOVED);
        assert!(!rights.has_moved(Square::D4));
        rights.mark_moved(Square::E8);
        assert!(!rights.unmoved(Color::Black, CastleSide::Kingside));
        assert!(!rights.unmoved(Color::Black, CastleSide::Queenside));
        assert_eq!(rights.to_string(), "Q");
    }
}
