//! Representation of moves: the `(from, to)` pair callers propose and the
//! [`MoveRecord`] history entry produced once a move is applied.

use std::fmt;

use anyhow::{bail, Context};

use crate::chess::core::{Piece, Square};

/// A move proposed by the caller: the piece on `from` goes to `to`. Castling is
/// expressed as the king's two-square move (e.g. `e1g1`), en passant as the
/// pawn's diagonal step onto the skipped square.
///
/// The text representation has one-to-one correspondence with the [UCI move
/// format] (without promotions, which the engine does not support).
///
/// [UCI move format]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    #[allow(missing_docs)]
    pub from: Square,
    #[allow(missing_docs)]
    pub to: Square,
}

impl Move {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Parses a move in pure coordinate notation, e.g. "e2e4".
    ///
    /// # Errors
    ///
    /// If the input is not exactly two square names.
    pub fn from_uci(input: &str) -> anyhow::Result<Self> {
        if input.len() != 4 || !input.is_ascii() {
            bail!("move should be two squares (e.g. e2e4), got '{input}'");
        }
        let (from, to) = input.split_at(2);
        Ok(Self::new(
            Square::try_from(from).with_context(|| format!("source square of '{input}'"))?,
            Square::try_from(to).with_context(|| format!("target square of '{input}'"))?,
        ))
    }
}

impl TryFrom<&str> for Move {
    type Error = anyhow::Error;

    fn try_from(input: &str) -> anyhow::Result<Self> {
        Self::from_uci(input.trim())
    }
}

impl fmt::Display for Move {
    /// Serializes a move in UCI format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

bitflags::bitflags! {
    /// More information about a [`MoveRecord`] that makes it possible to
    /// replay the move and dump it in human-readable format.
    ///
    /// Apart from the "regular" or "quiet" moves (simply moving a piece from
    /// one square to the other), there are few important rules:
    ///
    /// - [En passant] is a capture of opponent's pawn "in passing" (when it
    ///   advances two squares from its original position).
    /// - The [Castle] move that will involve a king and a rook "jumping" over
    ///   each other. Technically, castling is a king move, so `from` and `to`
    ///   move squares will correspond to the king.
    ///
    /// [Castle]: https://en.wikipedia.org/wiki/Castling
    /// [En passant]: https://en.wikipedia.org/wiki/En_passant
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MoveFlags: u8 {
        /// Moves that change the material balance (including en passant).
        const CAPTURE = 0b0001;
        /// Pawn advancement by 2 squares from the original rank (second for
        /// white and seventh for black).
        const DOUBLE_PAWN_PUSH = 0b0010;
        /// King and rook move together.
        const CASTLING = 0b0100;
        /// The captured pawn is not on the target square.
        const EN_PASSANT = 0b1000;
    }
}

/// An entry of the game history: everything needed to tell what happened
/// during a single ply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    #[allow(missing_docs)]
    pub from: Square,
    #[allow(missing_docs)]
    pub to: Square,
    /// The piece that moved (the king for castling).
    pub piece: Piece,
    /// The captured piece. For en passant it is the pawn removed from the
    /// square next to `from`, not from `to`.
    pub captured: Option<Piece>,
    #[allow(missing_docs)]
    pub flags: MoveFlags,
}

impl MoveRecord {
    #[allow(missing_docs)]
    #[must_use]
    pub fn is_castling(&self) -> bool {
        self.flags.contains(MoveFlags::CASTLING)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_en_passant(&self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_double_pawn_push(&self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PAWN_PUSH)
    }

    /// Drops the details and returns the plain `(from, to)` move.
    #[must_use]
    pub const fn as_move(&self) -> Move {
        Move::new(self.from, self.to)
    }
}

impl fmt::Display for MoveRecord {
    /// Prints the move in UCI format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_move())
    }
}
