// Primitive moves: nine layers times three turn amounts.

use core::str::FromStr;
use std::fmt;

use super::CubeError;

pub const N_MOVES: usize = 27; // 9 layers x {quarter, inverse quarter, half}.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    U, D, L, R, F, B,
    M, E, S,
}

impl Face {
    pub const ALL: [Face; 9] = [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B,
                                Face::M, Face::E, Face::S];

    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::L => 'L',
            Face::R => 'R',
            Face::F => 'F',
            Face::B => 'B',
            Face::M => 'M',
            Face::E => 'E',
            Face::S => 'S',
        }
    }

    pub fn from_letter(c: char) -> Option<Face> {
        Face::ALL.iter().copied().find(|f| f.letter() == c)
    }

    /// Middle layers carry centers with them.
    pub fn is_slice(self) -> bool {
        matches!(self, Face::M | Face::E | Face::S)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Turn {
    Clockwise,
    CounterClockwise,
    Half,
}

impl Turn {
    pub const ALL: [Turn; 3] = [Turn::Clockwise, Turn::CounterClockwise, Turn::Half];

    pub fn suffix(self) -> &'static str {
        match self {
            Turn::Clockwise => "",
            Turn::CounterClockwise => "'",
            Turn::Half => "2",
        }
    }

    pub fn inverse(self) -> Turn {
        match self {
            Turn::Clockwise => Turn::CounterClockwise,
            Turn::CounterClockwise => Turn::Clockwise,
            Turn::Half => Turn::Half,
        }
    }

    pub fn is_quarter(self) -> bool {
        self != Turn::Half
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub face: Face,
    pub turn: Turn,
}

impl Move {
    pub const fn new(face: Face, turn: Turn) -> Move {
        Move { face, turn }
    }

    pub fn all() -> impl Iterator<Item = Move> {
        Face::ALL.iter().flat_map(|&face| Turn::ALL.iter().map(move |&turn| Move::new(face, turn)))
    }

    pub fn from_index(i: usize) -> Move {
        Move::new(Face::ALL[i / 3], Turn::ALL[i % 3])
    }

    /// Dense index in `0..N_MOVES`; variants are declared in `ALL` order.
    pub fn index(self) -> usize {
        self.face as usize * Turn::ALL.len() + self.turn as usize
    }

    pub fn inverse(self) -> Move {
        Move::new(self.face, self.turn.inverse())
    }
}

impl FromStr for Move {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Move, CubeError> {
        let mut chars = s.chars();
        let face = chars.next().and_then(Face::from_letter);
        let turn = match chars.as_str() {
            "" => Some(Turn::Clockwise),
            "'" => Some(Turn::CounterClockwise),
            "2" => Some(Turn::Half),
            _ => None,
        };

        match (face, turn) {
            (Some(face), Some(turn)) => Ok(Move::new(face, turn)),
            _ => Err(CubeError::UnknownMove(s.to_string())),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.letter(), self.turn.suffix())
    }
}

/// Axes of the whole-cube rotations x, y and z.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Primitive turns making up a whole-cube rotation.
///
/// x follows R, y follows U and z follows F; the opposite outer layer and the
/// middle layer are turned to match.
pub fn rotation(axis: Axis, turn: Turn) -> [Move; 3] {
    let inv = turn.inverse();
    match axis {
        Axis::X => [Move::new(Face::R, turn), Move::new(Face::M, inv), Move::new(Face::L, inv)],
        Axis::Y => [Move::new(Face::U, turn), Move::new(Face::E, inv), Move::new(Face::D, inv)],
        Axis::Z => [Move::new(Face::F, turn), Move::new(Face::S, turn), Move::new(Face::B, inv)],
    }
}

// Rotations bringing each face to U, then the four turns about the vertical axis.
const FIRST_ROTATIONS: [Option<(Axis, Turn)>; 6] = [
    None,
    Some((Axis::X, Turn::Clockwise)),
    Some((Axis::X, Turn::Half)),
    Some((Axis::X, Turn::CounterClockwise)),
    Some((Axis::Z, Turn::Clockwise)),
    Some((Axis::Z, Turn::CounterClockwise)),
];

const SECOND_ROTATIONS: [Option<(Axis, Turn)>; 4] = [
    None,
    Some((Axis::Y, Turn::Clockwise)),
    Some((Axis::Y, Turn::CounterClockwise)),
    Some((Axis::Y, Turn::Half)),
];

/// The 24 global orientations of the cube, each as a sequence of primitive turns
/// starting from the canonical orientation. The first entry is the identity.
pub fn orientations() -> Vec<Vec<Move>> {
    let mut result = Vec::with_capacity(24);

    for first in FIRST_ROTATIONS.iter() {
        for second in SECOND_ROTATIONS.iter() {
            let mut moves = Vec::new();
            for &(axis, turn) in first.iter().chain(second.iter()) {
                moves.extend_from_slice(&rotation(axis, turn));
            }
            result.push(moves);
        }
    }

    result
}
