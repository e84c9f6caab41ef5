#![no_main]
use castle::chess::state::GameState;
use libfuzzer_sys::fuzz_target;
use pretty_assertions::assert_eq;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(state) = GameState::try_from(s) {
            let fen = state.to_string();
            let reparsed = GameState::from_fen(&fen).expect("printed FEN should be parsed back");
            assert_eq!(reparsed.to_string(), fen);
        }
    }
});
