// Rubik's Cube simulation: two interchangeable state representations driven by
// the same move notation and the same generated cycle tables.

pub mod commutator;
pub mod cycles;
pub mod ensemble;
pub mod group;
pub mod moves;
pub mod notation;
pub mod permutation;
pub mod scramble;
pub mod sticker;

use core::str::FromStr;
use std::fmt;

use log::trace;
use rand_pcg::Pcg64;
use thiserror::Error;

use self::group::{GroupCube, GroupState};
use self::moves::Move;
use self::sticker::{StickerCube, Stickers};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CubeError {
    #[error("could not expand bracket notation: {0}")]
    Parse(String),
    #[error("unknown move `{0}`")]
    UnknownMove(String),
    #[error("the solved state of the {0} representation was already overridden")]
    InvalidOverride(CubeKind),
    #[error("invalid cycle notation `{notation}`: {reason}")]
    CycleNotation { notation: String, reason: String },
    #[error("invalid cube state: {0}")]
    InvalidState(String),
}

/// The two available representations of a cube.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CubeKind {
    Sticker,
    Group,
}

impl fmt::Display for CubeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CubeKind::Sticker => write!(f, "sticker"),
            CubeKind::Group => write!(f, "group"),
        }
    }
}

impl FromStr for CubeKind {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<CubeKind, CubeError> {
        match s {
            "string" | "sticker" => Ok(CubeKind::Sticker),
            "group" => Ok(CubeKind::Group),
            _ => Err(CubeError::InvalidState(format!("unknown cube representation `{}`", s))),
        }
    }
}

/// Representation-specific copy of a cube's state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Snapshot {
    Stickers(Stickers),
    Group(GroupState),
}

impl Snapshot {
    pub fn kind(&self) -> CubeKind {
        match self {
            Snapshot::Stickers(_) => CubeKind::Sticker,
            Snapshot::Group(_) => CubeKind::Group,
        }
    }
}

/// Capability shared by every cube representation.
///
/// Implementors only provide primitive turns, reset, solved detection and a
/// snapshot; parsing and alias expansion live in the provided methods, so all
/// representations accept exactly the same notation.
pub trait Cube {
    fn kind(&self) -> CubeKind;

    /// Applies a single primitive turn.
    fn turn(&mut self, m: Move);

    /// Returns to the solved state and clears the history.
    fn reset(&mut self);

    fn is_solved(&self) -> bool;

    fn snapshot(&self) -> Snapshot;

    /// Tokens applied so far, as they were parsed (aliases are not expanded).
    fn history(&self) -> &[String];

    fn extend_history(&mut self, tokens: &[String]);

    /// Parses a human-entered move string and applies it.
    ///
    /// The input is fully parsed and expanded before the first turn, so on
    /// error neither the state nor the history changes.
    fn apply(&mut self, moves: &str) -> Result<(), CubeError> {
        let tokens = notation::parse(moves)?;
        self.apply_tokens(&tokens)
    }

    /// Applies a list of primitive or alias tokens. Unlike `apply`, unknown
    /// tokens are an error rather than being dropped.
    fn apply_tokens(&mut self, tokens: &[String]) -> Result<(), CubeError> {
        let moves = notation::expand_all(tokens)?;
        trace!("{} cube: {} tokens -> {} turns", self.kind(), tokens.len(), moves.len());
        self.extend_history(tokens);
        for m in moves {
            self.turn(m);
        }
        Ok(())
    }

    /// Applies already expanded primitive turns, recording them in the history.
    fn apply_moves(&mut self, moves: &[Move]) {
        let tokens: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
        self.extend_history(&tokens);
        for m in moves {
            self.turn(*m);
        }
    }
}

/// Creates a solved cube of the given representation.
///
/// When `new_solved_state` is given it first replaces that representation's
/// solved state for the whole process; this is allowed once per representation.
pub fn cube_factory(kind: CubeKind, new_solved_state: Option<Snapshot>) -> Result<Box<dyn Cube>, CubeError> {
    if let Some(state) = new_solved_state {
        match state {
            Snapshot::Stickers(stickers) if kind == CubeKind::Sticker => {
                StickerCube::override_solved_state(stickers)?
            }
            Snapshot::Group(group) if kind == CubeKind::Group => {
                GroupCube::override_solved_state(group)?
            }
            other => {
                return Err(CubeError::InvalidState(format!(
                    "a {} snapshot cannot be the solved state of a {} cube",
                    other.kind(),
                    kind
                )))
            }
        }
    }

    Ok(match kind {
        CubeKind::Sticker => Box::new(StickerCube::new()),
        CubeKind::Group => Box::new(GroupCube::new()),
    })
}

pub fn new_rng(seed: u64) -> Pcg64 {
    Pcg64::new(0xcafef00dd15ea5e5 + u128::from(seed),
               0xa02bdbf7bb3c0a7ac28fa16a64abf96)
}

#[cfg(test)]
mod test {
    use super::{cube_factory, Cube, CubeError, CubeKind, Snapshot};
    use super::group::GroupState;
    use std::str::FromStr;

    #[test]
    fn test_kind_parser() {
        assert_eq!(CubeKind::from_str("string").unwrap(), CubeKind::Sticker);
        assert_eq!(CubeKind::from_str("group").unwrap(), CubeKind::Group);
        assert!(CubeKind::from_str("hologram").is_err());
    }

    #[test]
    fn test_factory() {
        for kind in [CubeKind::Sticker, CubeKind::Group] {
            let mut c = cube_factory(kind, None).unwrap();
            assert_eq!(c.kind(), kind);
            assert!(c.is_solved());
            c.apply("R U R' U'").unwrap();
            assert!(!c.is_solved());
            assert_eq!(c.history().len(), 4);
            assert_eq!(c.snapshot().kind(), kind);
        }
    }

    #[test]
    fn test_factory_rejects_mismatched_snapshot() {
        let r = cube_factory(CubeKind::Sticker, Some(Snapshot::Group(GroupState::solved())));
        assert!(matches!(r, Err(CubeError::InvalidState(_))));
    }

    #[test]
    fn test_apply_is_transactional() {
        let mut c = cube_factory(CubeKind::Group, None).unwrap();
        let before = c.snapshot();
        assert!(matches!(c.apply("R U [R, U"), Err(CubeError::Parse(_))));
        assert_eq!(c.snapshot(), before);
        assert!(c.history().is_empty());

        let tokens = vec!["R".to_string(), "Q".to_string()];
        assert_eq!(c.apply_tokens(&tokens), Err(CubeError::UnknownMove("Q".to_string())));
        assert_eq!(c.snapshot(), before);
    }
}
