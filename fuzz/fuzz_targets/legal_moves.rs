#![no_main]
use castle::chess::core::{PieceKind, Rank};
use castle::chess::state::GameState;
use itertools::Itertools;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;
use shakmaty::{CastlingMode, Chess, Position};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(state) = GameState::from_fen(input) else {
        return;
    };
    // Promotions are not generated: skip positions where they are possible.
    let promotion_rank = Rank::pawns_starting(state.turn().opponent());
    if state
        .board()
        .pieces(state.turn())
        .any(|(square, piece)| piece.kind == PieceKind::Pawn && square.rank() == promotion_rank)
    {
        return;
    }
    let Ok(setup) = input.parse::<shakmaty::fen::Fen>() else {
        return;
    };
    let Ok(reference) = setup.into_position::<Chess>(CastlingMode::Standard) else {
        return;
    };
    assert_eq!(
        state
            .legal_moves()
            .iter()
            .map(ToString::to_string)
            .sorted()
            .collect::<Vec<_>>(),
        reference
            .legal_moves()
            .iter()
            .map(|m| m.to_uci(CastlingMode::Standard).to_string())
            .sorted()
            .collect::<Vec<_>>()
    );
});
