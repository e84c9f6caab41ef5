//! Legal move generation for standard chess: given a position, tell which
//! moves are legal and produce the position after a move is played. For more
//! information, see `README.md` next to `Cargo.toml`.
//!
//! The rules are implemented as pure functions over plain values: a
//! [`chess::board::Board`] is a `Copy` grid of pieces, a
//! [`chess::state::GameState`] adds everything else the rules depend on and
//! every transition produces a new state.
//!
//! ```
//! use castle::chess::core::Square;
//! use castle::chess::state::GameState;
//!
//! let state = GameState::starting();
//! assert!(state.is_legal(Square::E2, Square::E4));
//! let state = state.apply_move(Square::E2, Square::E4);
//! assert_eq!(state.en_passant(), Some(Square::E3));
//! ```

pub mod chess;
pub mod session;

use shadow_rs::shadow;

shadow!(build);

/// Build profile. Produced by `build.rs`.
const PROFILE: &str = include_str!(concat!(env!("OUT_DIR"), "/profile"));

/// Returns the full version that can be used to identify how the binary was
/// built in the first place.
#[must_use]
pub fn engine_version() -> String {
    format!(
        "{} (commit {}, branch {})",
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BRANCH
    )
}

/// Prints information about the version, build profile and whether the build
/// is clean on startup.
///
/// # Errors
///
/// If writing to `output` fails.
pub fn print_engine_info(output: &mut impl std::io::Write) -> std::io::Result<()> {
    writeln!(output, "castle {}", engine_version())?;
    writeln!(output, "Build profile: {PROFILE}")?;
    if !shadow_rs::git_clean() {
        writeln!(output, "Warning: built with uncommitted changes")?;
    }
    Ok(())
}
