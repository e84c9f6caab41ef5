//! Pseudo-legal move generation for each kind of piece and the "is this square
//! attacked" predicate built on top of it.
//!
//! Pseudo-legal moves obey the movement shape and occupancy rules of the piece
//! but ignore whether the move exposes the mover's king: that is checked
//! separately by simulating the move (see
//! [`crate::chess::state::GameState::is_legal`]).
//!
//! Special moves (castling and en passant) depend on the game history rather
//! than on the board alone and are added by [`crate::chess::special`].

use arrayvec::ArrayVec;

use crate::chess::board::Board;
use crate::chess::core::{Color, PieceKind, Rank, Square};

/// The maximum number of squares a single piece can reach: a queen in the
/// center of an empty board.
pub const MAX_TARGETS: usize = 27;

/// Destination squares of a single piece.
pub type Targets = ArrayVec<Square, MAX_TARGETS>;

/// `(file, rank)` deltas of a single step.
type Delta = (i8, i8);

const ROOK_DIRECTIONS: [Delta; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [Delta; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_JUMPS: [Delta; 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
const KING_STEPS: [Delta; 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Walks each direction one square at a time and stops on leaving the board
/// or hitting a piece. The blocker is only included if it can be captured.
fn slide(board: &Board, from: Square, mover: Color, directions: &[Delta], targets: &mut Targets) {
    for &(file_delta, rank_delta) in directions {
        let mut current = from;
        while let Some(next) = current.offset(file_delta, rank_delta) {
            match board.at(next) {
                None => targets.push(next),
                Some(blocker) => {
                    if blocker.owner != mover {
                        targets.push(next);
                    }
                    break;
                },
            }
            current = next;
        }
    }
}

/// Single-step moves with a fixed set of offsets (knight and king).
fn leap(board: &Board, from: Square, mover: Color, offsets: &[Delta], targets: &mut Targets) {
    targets.extend(
        offsets
            .iter()
            .filter_map(|&(file_delta, rank_delta)| from.offset(file_delta, rank_delta))
            .filter(|&to| board.can_land_on(to, mover)),
    );
}

/// Pawn pushes (single and double from the starting rank) and diagonal
/// captures. En passant is not included.
#[must_use]
pub fn pawn_moves(board: &Board, from: Square, mover: Color) -> Targets {
    let mut targets = Targets::new();
    let direction = mover.pawn_direction();
    if let Some(single) = from.offset(0, direction) {
        if board.is_empty(single) {
            targets.push(single);
            if from.rank() == Rank::pawns_starting(mover) {
                if let Some(double) = from.offset(0, 2 * direction) {
                    if board.is_empty(double) {
                        targets.push(double);
                    }
                }
            }
        }
    }
    for capture in pawn_attacks(from, mover) {
        if board.at(capture).is_some_and(|piece| piece.owner != mover) {
            targets.push(capture);
        }
    }
    targets
}

#[allow(missing_docs)]
#[must_use]
pub fn knight_moves(board: &Board, from: Square, mover: Color) -> Targets {
    let mut targets = Targets::new();
    leap(board, from, mover, &KNIGHT_JUMPS, &mut targets);
    targets
}

#[allow(missing_docs)]
#[must_use]
pub fn bishop_moves(board: &Board, from: Square, mover: Color) -> Targets {
    let mut targets = Targets::new();
    slide(board, from, mover, &BISHOP_DIRECTIONS, &mut targets);
    targets
}

#[allow(missing_docs)]
#[must_use]
pub fn rook_moves(board: &Board, from: Square, mover: Color) -> Targets {
    let mut targets = Targets::new();
    slide(board, from, mover, &ROOK_DIRECTIONS, &mut targets);
    targets
}

/// Queen moves are the union of rook and bishop moves.
#[must_use]
pub fn queen_moves(board: &Board, from: Square, mover: Color) -> Targets {
    let mut targets = Targets::new();
    slide(board, from, mover, &ROOK_DIRECTIONS, &mut targets);
    slide(board, from, mover, &BISHOP_DIRECTIONS, &mut targets);
    targets
}

/// Basic king steps. Castling is not included.
#[must_use]
pub fn king_moves(board: &Board, from: Square, mover: Color) -> Targets {
    let mut targets = Targets::new();
    leap(board, from, mover, &KING_STEPS, &mut targets);
    targets
}

/// Pseudo-legal destinations of whatever piece stands on `from`. Returns no
/// targets for an empty square.
#[must_use]
pub fn pseudo_legal_moves(board: &Board, from: Square) -> Targets {
    let Some(piece) = board.at(from) else {
        return Targets::new();
    };
    let generate = match piece.kind {
        PieceKind::Pawn => pawn_moves,
        PieceKind::Knight => knight_moves,
        PieceKind::Bishop => bishop_moves,
        PieceKind::Rook => rook_moves,
        PieceKind::Queen => queen_moves,
        PieceKind::King => king_moves,
    };
    generate(board, from, piece.owner)
}

/// Squares a pawn of `color` standing on `from` attacks: one step diagonally
/// forward. This is different from the squares it can move to: pawns never
/// capture straight ahead and pushes do not attack anything.
pub fn pawn_attacks(from: Square, color: Color) -> impl Iterator<Item = Square> {
    let direction = color.pawn_direction();
    [-1, 1]
        .into_iter()
        .filter_map(move |file_delta| from.offset(file_delta, direction))
}

/// Returns true if any piece of `attacker` could move to `square` according to
/// pseudo-legal rules (with pawns attacking only diagonally).
#[must_use]
pub fn is_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    board.pieces(attacker).any(|(from, piece)| match piece.kind {
        PieceKind::Pawn => pawn_attacks(from, attacker).any(|target| target == square),
        _ => pseudo_legal_moves(board, from).contains(&square),
    })
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::chess::core::Piece;

    fn board(placement: &str) -> Board {
        Board::try_from(placement).unwrap()
    }

    fn sorted(targets: &Targets) -> Vec<String> {
        targets.iter().map(Square::to_string).sorted().collect()
    }

    fn squares(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).sorted().collect()
    }

    #[test]
    fn pawn_pushes() {
        let start = Board::starting();
        assert_eq!(
            sorted(&pseudo_legal_moves(&start, Square::E2)),
            squares(&["e3", "e4"])
        );
        assert_eq!(
            sorted(&pseudo_legal_moves(&start, Square::D7)),
            squares(&["d6", "d5"])
        );
        // Blocked right in front: neither push is possible.
        let blocked = board("8/8/8/8/8/4n3/4P3/8");
        assert!(pseudo_legal_moves(&blocked, Square::E2).is_empty());
        // Blocked two squares ahead: only the single push.
        let blocked = board("8/8/8/8/4n3/8/4P3/8");
        assert_eq!(sorted(&pseudo_legal_moves(&blocked, Square::E2)), squares(&["e3"]));
        // Not on the starting rank: single push only.
        let advanced = board("8/8/8/8/8/4P3/8/8");
        assert_eq!(sorted(&pseudo_legal_moves(&advanced, Square::E3)), squares(&["e4"]));
    }

    #[test]
    fn pawn_captures() {
        // Captures only onto opponent pieces, never straight ahead.
        let position = board("8/8/8/3pNp2/4P3/8/8/8");
        assert_eq!(
            sorted(&pseudo_legal_moves(&position, Square::E4)),
            squares(&["d5", "f5"])
        );
        let position = board("8/8/8/3P1n2/4p3/3Q1n2/8/8");
        assert_eq!(
            sorted(&pseudo_legal_moves(&position, Square::E4)),
            squares(&["d3", "e3"])
        );
        // Pawns on the edge have a single capture square.
        assert_eq!(pawn_attacks(Square::A2, Color::White).collect_vec(), vec![Square::B3]);
        assert_eq!(pawn_attacks(Square::H7, Color::Black).collect_vec(), vec![Square::G6]);
        // A pawn on the last rank has nowhere to go.
        let position = board("4P3/8/8/8/8/8/8/8");
        assert!(pseudo_legal_moves(&position, Square::E8).is_empty());
    }

    #[test]
    fn knights() {
        let position = board("8/8/8/8/8/8/8/N7");
        assert_eq!(
            sorted(&pseudo_legal_moves(&position, Square::A1)),
            squares(&["b3", "c2"])
        );
        let start = Board::starting();
        assert_eq!(
            sorted(&pseudo_legal_moves(&start, Square::G1)),
            squares(&["f3", "h3"])
        );
        let position = board("8/8/8/4N3/8/8/8/8");
        assert_eq!(pseudo_legal_moves(&position, Square::E5).len(), 8);
    }

    #[test]
    fn sliders() {
        let position = board("8/8/8/8/8/8/8/R7");
        assert_eq!(pseudo_legal_moves(&position, Square::A1).len(), 14);
        let position = board("8/8/8/3Q4/8/8/8/8");
        assert_eq!(pseudo_legal_moves(&position, Square::D5).len(), MAX_TARGETS);
        // Own pieces block, opponent pieces are captured.
        let position = board("8/8/3p4/8/1P1R2n1/8/8/8");
        assert_eq!(
            sorted(&pseudo_legal_moves(&position, Square::D4)),
            squares(&["c4", "e4", "f4", "g4", "d5", "d6", "d3", "d2", "d1"])
        );
        let position = board("8/8/5p2/8/3B4/2P5/8/8");
        assert_eq!(
            sorted(&pseudo_legal_moves(&position, Square::D4)),
            squares(&["e5", "f6", "c5", "b6", "a7", "e3", "f2", "g1"])
        );
        // The starting position locks all sliders in.
        let start = Board::starting();
        for square in [Square::A1, Square::C1, Square::D1, Square::F8, Square::H8] {
            assert!(pseudo_legal_moves(&start, square).is_empty(), "{square}");
        }
    }

    #[test]
    fn kings() {
        let position = board("8/8/8/8/8/8/8/4K3");
        assert_eq!(
            sorted(&pseudo_legal_moves(&position, Square::E1)),
            squares(&["d1", "f1", "d2", "e2", "f2"])
        );
        let position = board("8/8/8/8/8/8/3pP3/4K3");
        assert_eq!(
            sorted(&pseudo_legal_moves(&position, Square::E1)),
            squares(&["d1", "f1", "d2", "f2"])
        );
    }

    #[test]
    fn empty_square_has_no_moves() {
        assert!(pseudo_legal_moves(&Board::starting(), Square::E4).is_empty());
    }

    #[test]
    fn generated_moves_land_on_board_and_never_on_own_pieces() {
        for placement in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
            "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1",
        ] {
            let position = board(placement);
            for color in [Color::White, Color::Black] {
                for (from, piece) in position.pieces(color) {
                    for to in pseudo_legal_moves(&position, from) {
                        assert_ne!(from, to);
                        assert!(position.can_land_on(to, piece.owner), "{from}{to}");
                    }
                }
            }
        }
    }

    #[test]
    fn attacked_squares() {
        let start = Board::starting();
        // Pawns and knights cover the third rank.
        for square in ["a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3"] {
            let square = Square::try_from(square).unwrap();
            assert!(is_attacked(&start, square, Color::White), "{square}");
            assert!(!is_attacked(&start, square, Color::Black), "{square}");
        }
        // Nothing reaches the middle of the board yet.
        assert!(!is_attacked(&start, Square::E4, Color::White));
        assert!(!is_attacked(&start, Square::E5, Color::Black));
        // Pieces defend each other but own pieces are not "landable".
        assert!(!is_attacked(&start, Square::E2, Color::White));
    }

    #[test]
    fn pawns_attack_diagonally_only() {
        let position = board("8/8/8/8/4p3/8/8/8");
        // The square in front of the pawn is a push target but not attacked.
        assert!(!is_attacked(&position, Square::E3, Color::Black));
        assert!(is_attacked(&position, Square::D3, Color::Black));
        assert!(is_attacked(&position, Square::F3, Color::Black));
        // Diagonals are attacked even when empty (no capture possible yet).
        assert!(is_attacked(&position, Square::D3, Color::Black));
        assert!(!is_attacked(&position, Square::D5, Color::Black));
    }

    #[test]
    fn sliding_attacks_are_blocked() {
        let mut position = board("4r3/8/8/8/8/8/8/4K3");
        assert!(is_attacked(&position, Square::E1, Color::Black));
        position.set(Square::E4, Some(Piece::new(Color::White, PieceKind::Knight)));
        assert!(!is_attacked(&position, Square::E1, Color::Black));
        assert!(is_attacked(&position, Square::E4, Color::Black));
    }
}
