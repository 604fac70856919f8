// Sticker-array representation of the cube.

use core::str::FromStr;
use std::fmt;
use std::sync::OnceLock;

use log::{debug, info};

use super::cycles::{CycleTables, N_STICKERS};
use super::moves::{orientations, Move};
use super::permutation::permute;
use super::{Cube, CubeError, CubeKind, Snapshot};

const N_FACES: usize = 6;

/// One color code per facelet, faces in U, B, R, F, L, D order.
pub type Stickers = [char; N_STICKERS];

/// Colors of the U, B, R, F, L and D faces in the standard solved state.
pub const DEFAULT_COLORS: [char; N_FACES] = ['w', 'b', 'r', 'g', 'o', 'y'];

pub fn default_stickers() -> Stickers {
    let mut stickers = [' '; N_STICKERS];
    for (i, s) in stickers.iter_mut().enumerate() {
        *s = DEFAULT_COLORS[i / 9];
    }
    stickers
}

static SOLVED_OVERRIDE: OnceLock<Stickers> = OnceLock::new();

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StickerCube {
    stickers: Stickers,
    history: Vec<String>,
}

impl StickerCube {
    pub fn new() -> StickerCube {
        StickerCube { stickers: StickerCube::solved_state(), history: Vec::new() }
    }

    pub fn solved_state() -> Stickers {
        SOLVED_OVERRIDE.get().copied().unwrap_or_else(default_stickers)
    }

    /// Replaces the solved state for every sticker cube in the process, e.g.
    /// with some stickers blanked out. Can only be done once.
    pub fn override_solved_state(stickers: Stickers) -> Result<(), CubeError> {
        SOLVED_OVERRIDE.set(stickers).map_err(|_| CubeError::InvalidOverride(CubeKind::Sticker))?;
        info!("sticker cube solved state overridden");
        Ok(())
    }

    pub fn stickers(&self) -> &Stickers {
        &self.stickers
    }

    /// The nine stickers of face `i` (in U, B, R, F, L, D order).
    pub fn face(&self, i: usize) -> &[char] {
        &self.stickers[i * 9..(i + 1) * 9]
    }

    // Every face shows a single color.
    fn is_uniform(&self) -> bool {
        (0..N_FACES).all(|i| {
            let face = self.face(i);
            face.iter().all(|&c| c == face[0])
        })
    }

    // Compares against the solved state held in each of the 24 orientations.
    fn matches_any_orientation(&self) -> bool {
        let solved = StickerCube::solved_state();
        let tables = CycleTables::get();

        orientations().iter().any(|moves| {
            let mut reference = solved;
            for &m in moves {
                permute(&mut reference, tables.sticker_cycles(m));
            }
            reference == self.stickers
        })
    }
}

impl Default for StickerCube {
    fn default() -> StickerCube {
        StickerCube::new()
    }
}

impl Cube for StickerCube {
    fn kind(&self) -> CubeKind {
        CubeKind::Sticker
    }

    fn turn(&mut self, m: Move) {
        permute(&mut self.stickers, CycleTables::get().sticker_cycles(m));
    }

    fn reset(&mut self) {
        self.stickers = StickerCube::solved_state();
        self.history.clear();
    }

    fn is_solved(&self) -> bool {
        if SOLVED_OVERRIDE.get().map_or(true, |s| *s == default_stickers()) {
            self.is_uniform()
        } else {
            debug!("custom solved state, checking all orientations");
            self.matches_any_orientation()
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Stickers(self.stickers)
    }

    fn history(&self) -> &[String] {
        &self.history
    }

    fn extend_history(&mut self, tokens: &[String]) {
        self.history.extend_from_slice(tokens);
    }
}

impl FromStr for StickerCube {
    type Err = CubeError;

    /// Reads 54 color codes, one per sticker, in the same order `Display`
    /// prints them. Whitespace between faces is skipped; use `_` for a blank.
    fn from_str(s: &str) -> Result<StickerCube, CubeError> {
        let codes: Vec<char> = s.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| if c == '_' { ' ' } else { c })
            .collect();

        if codes.len() != N_STICKERS {
            return Err(CubeError::InvalidState(
                format!("expected {} stickers, found {}", N_STICKERS, codes.len())));
        }

        let mut stickers = [' '; N_STICKERS];
        stickers.copy_from_slice(&codes);
        Ok(StickerCube { stickers, history: Vec::new() })
    }
}

impl fmt::Display for StickerCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = (0..N_FACES)
            .map(|i| self.face(i).iter().map(|&c| if c == ' ' { '_' } else { c }).collect())
            .collect();
        write!(f, "{}", faces.join(" "))
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::{default_stickers, StickerCube, N_STICKERS};
    use crate::cube::moves::Move;
    use crate::cube::{Cube, CubeError};

    #[test]
    fn test_new_is_solved() {
        let c = StickerCube::new();
        assert!(c.is_solved());
        assert_eq!(c.stickers(), &default_stickers());
        assert_eq!(c.face(2), &['r'; 9]);
    }

    #[test]
    fn test_every_move_has_order_dividing_four() {
        for m in Move::all() {
            let mut c = StickerCube::new();
            c.turn(m);
            assert!(!c.is_solved(), "{}", m);
            for _ in 0..3 {
                c.turn(m);
            }
            assert_eq!(c.stickers(), &default_stickers(), "{}", m);
        }
    }

    #[test]
    fn test_u_turn() {
        let mut c = StickerCube::new();
        c.apply("U").unwrap();
        // The top row of F takes the colors of R.
        assert_eq!(&c.face(3)[0..3], &['r'; 3]);
        assert_eq!(&c.face(3)[3..9], &['g'; 6]);
        assert_eq!(c.face(0), &['w'; 9]);
    }

    #[test]
    fn test_sexy_move_order() {
        let mut c = StickerCube::new();
        for i in 1..=6 {
            c.apply("R U R' U'").unwrap();
            assert_eq!(c.is_solved(), i == 6);
        }
    }

    #[test]
    fn test_color_counts_preserved() {
        let mut c = StickerCube::new();
        c.apply("R U2 F' [M, E] S2 x y' Dw L").unwrap();
        for color in ['w', 'b', 'r', 'g', 'o', 'y'] {
            assert_eq!(c.stickers().iter().filter(|&&s| s == color).count(), 9);
        }
        // Centers only ever trade places with other centers.
        let mut centers: Vec<char> = (0..6).map(|i| c.face(i)[4]).collect();
        centers.sort();
        assert_eq!(centers, vec!['b', 'g', 'o', 'r', 'w', 'y']);
    }

    #[test]
    fn test_rotations_are_solved() {
        for rotation in ["x", "y2", "z'", "x y", "x2 z"] {
            let mut c = StickerCube::new();
            c.apply(rotation).unwrap();
            assert!(c.is_solved(), "{}", rotation);
        }
    }

    #[test]
    fn test_parse_and_display() {
        let mut c = StickerCube::new();
        c.apply("R F").unwrap();
        let text = c.to_string();
        assert_eq!(text.split(' ').count(), 6);
        let parsed = StickerCube::from_str(&text).unwrap();
        assert_eq!(parsed.stickers(), c.stickers());

        let masked = format!("{}{}", "_".repeat(9), "b".repeat(N_STICKERS - 9));
        assert_eq!(StickerCube::from_str(&masked).unwrap().face(0), &[' '; 9]);

        assert!(matches!(StickerCube::from_str("wwww"), Err(CubeError::InvalidState(_))));
    }

    #[test]
    fn test_history_and_reset() {
        let mut c = StickerCube::new();
        c.apply("R U [R, U]").unwrap();
        assert_eq!(c.history(), &["R", "U", "R", "U", "R'", "U'"]);
        c.reset();
        assert!(c.is_solved());
        assert!(c.history().is_empty());
    }
}
