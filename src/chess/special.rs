//! Rules for the two moves that depend on more than the piece placement:
//! [castling] needs to know whether the king and rook have moved and [en
//! passant] needs to know what the previous move was.
//!
//! Both resolvers only answer whether the move is available in principle. The
//! king safety after the move is still checked by the legality filter
//! ([`crate::chess::state::GameState::is_legal`]).
//!
//! [castling]: https://www.chessprogramming.org/Castling
//! [en passant]: https://www.chessprogramming.org/En_passant

use crate::chess::attacks;
use crate::chess::core::{king_origin, CastleSide, Color, Piece, PieceKind, Square};
use crate::chess::state::GameState;

/// Returns true if `color` can castle towards `side`:
///
/// - Neither the king nor the rook have ever left their original squares and
///   both of them are still there.
/// - All squares strictly between them are empty.
/// - The king does not start, pass through or land on an attacked square.
#[must_use]
pub fn can_castle(side: CastleSide, color: Color, state: &GameState) -> bool {
    let board = state.board();
    let king = king_origin(color);
    let rook = side.rook_origin(color);
    if !state.castling().unmoved(color, side)
        || board.at(king) != Some(Piece::new(color, PieceKind::King))
        || board.at(rook) != Some(Piece::new(color, PieceKind::Rook))
    {
        return false;
    }
    let step: i8 = match side {
        CastleSide::Kingside => 1,
        CastleSide::Queenside => -1,
    };
    let mut between = king.offset(step, 0);
    while let Some(square) = between {
        if square == rook {
            break;
        }
        if !board.is_empty(square) {
            return false;
        }
        between = square.offset(step, 0);
    }
    let opponent = color.opponent();
    [king, side.rook_destination(color), side.king_destination(color)]
        .into_iter()
        .all(|square| !attacks::is_attacked(board, square, opponent))
}

/// Returns true if the `color` pawn on `pawn` can capture en passant by moving
/// to `target`. The target has to be the square the opponent's pawn has just
/// skipped with a double push: the right is lost after any other move.
#[must_use]
pub fn can_en_passant(pawn: Square, target: Square, state: &GameState, color: Color) -> bool {
    if state.en_passant() != Some(target)
        || state.board().at(pawn) != Some(Piece::new(color, PieceKind::Pawn))
    {
        return false;
    }
    let direction = color.pawn_direction();
    if pawn.offset(-1, direction) != Some(target) && pawn.offset(1, direction) != Some(target) {
        return false;
    }
    let Some(last) = state.history().last() else {
        return false;
    };
    last.is_double_pawn_push()
        && last.piece == Piece::new(color.opponent(), PieceKind::Pawn)
        && last.to == Square::new(target.file(), pawn.rank())
}
