// Group representation of the cube.
//
// Positions are fixed in space; each position -> occupant table records which
// cubie sits where. Orientations are indexed by cubie, not by position, so a
// twist travels with the piece.

use std::fmt;
use std::sync::OnceLock;

use log::info;

use super::cycles::{CycleTables, N_CENTERS, N_CORNERS, N_EDGES};
use super::moves::{rotation, Axis, Face, Move, Turn};
use super::permutation::{is_odd, is_permutation, permute};
use super::{Cube, CubeError, CubeKind, Snapshot};

// Twist added to the corner that lands on each position after a quarter turn.
// Half turns and U/D turns leave corner orientation alone.
const CORNER_TWISTS: [(Face, [(usize, u8); 4]); 4] = [
    (Face::R, [(1, 1), (5, 2), (6, 1), (2, 2)]),
    (Face::L, [(0, 2), (3, 1), (7, 2), (4, 1)]),
    (Face::F, [(2, 1), (6, 2), (7, 1), (3, 2)]),
    (Face::B, [(0, 1), (1, 2), (4, 2), (5, 1)]),
];

// Faces whose quarter turns flip the edges they move.
const FLIPPING_FACES: [Face; 5] = [Face::F, Face::B, Face::M, Face::S, Face::E];

// Centers used to realign a solved reference: U first, then F.
const PRIMARY: usize = 0;
const SECONDARY: usize = 3;

/// Rotation bringing the center at `position` onto U.
fn primary_rotation(position: usize) -> Option<[Move; 3]> {
    match position {
        1 => Some(rotation(Axis::X, Turn::CounterClockwise)),
        2 => Some(rotation(Axis::Z, Turn::CounterClockwise)),
        3 => Some(rotation(Axis::X, Turn::Clockwise)),
        4 => Some(rotation(Axis::Z, Turn::Clockwise)),
        5 => Some(rotation(Axis::X, Turn::Half)),
        _ => None,
    }
}

/// Rotation about U bringing the center at `position` onto F.
fn secondary_rotation(position: usize) -> Option<[Move; 3]> {
    match position {
        1 => Some(rotation(Axis::Y, Turn::Half)),
        2 => Some(rotation(Axis::Y, Turn::Clockwise)),
        4 => Some(rotation(Axis::Y, Turn::CounterClockwise)),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupState {
    pub corner_permutation: [u8; N_CORNERS],
    pub edge_permutation: [u8; N_EDGES],
    pub corner_orientation: [u8; N_CORNERS],
    pub edge_orientation: [u8; N_EDGES],
    pub centers: [u8; N_CENTERS],
}

impl GroupState {
    pub fn solved() -> GroupState {
        GroupState {
            corner_permutation: [0, 1, 2, 3, 4, 5, 6, 7],
            edge_permutation: [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            corner_orientation: [0; N_CORNERS],
            edge_orientation: [0; N_EDGES],
            centers: [0, 1, 2, 3, 4, 5],
        }
    }

    /// Checks that every mapping is a bijection and orientations are in range.
    pub fn validate(&self) -> Result<(), CubeError> {
        if !is_permutation(&self.corner_permutation) {
            return Err(CubeError::InvalidState("corner permutation is not a bijection".to_string()));
        }
        if !is_permutation(&self.edge_permutation) {
            return Err(CubeError::InvalidState("edge permutation is not a bijection".to_string()));
        }
        if !is_permutation(&self.centers) {
            return Err(CubeError::InvalidState("center mapping is not a bijection".to_string()));
        }
        if self.corner_orientation.iter().any(|&o| o > 2) {
            return Err(CubeError::InvalidState("corner orientation out of range".to_string()));
        }
        if self.edge_orientation.iter().any(|&o| o > 1) {
            return Err(CubeError::InvalidState("edge orientation out of range".to_string()));
        }
        Ok(())
    }

    /// Corner orientations, corner permutation, edge orientations, edge
    /// permutation, as one flat vector of 40 entries.
    pub fn state_vector(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 * N_CORNERS + 2 * N_EDGES);
        out.extend_from_slice(&self.corner_orientation);
        out.extend_from_slice(&self.corner_permutation);
        out.extend_from_slice(&self.edge_orientation);
        out.extend_from_slice(&self.edge_permutation);
        out
    }

    /// Holds for every state reachable by legal moves: the corner, edge and
    /// center permutation parities cancel out, and the orientations sum to zero.
    pub fn is_reachable(&self) -> bool {
        let corner_twist: u32 = self.corner_orientation.iter().map(|&o| o as u32).sum();
        let edge_flip: u32 = self.edge_orientation.iter().map(|&o| o as u32).sum();

        corner_twist % 3 == 0
            && edge_flip % 2 == 0
            && is_odd(&self.corner_permutation) ^ is_odd(&self.edge_permutation) == is_odd(&self.centers)
    }
}

impl Default for GroupState {
    fn default() -> GroupState {
        GroupState::solved()
    }
}

static SOLVED_OVERRIDE: OnceLock<GroupState> = OnceLock::new();

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupCube {
    state: GroupState,
    history: Vec<String>,
}

impl GroupCube {
    pub fn new() -> GroupCube {
        GroupCube { state: GroupCube::solved_state(), history: Vec::new() }
    }

    /// The solved state in effect for this process.
    pub fn solved_state() -> GroupState {
        SOLVED_OVERRIDE.get().cloned().unwrap_or_default()
    }

    /// Replaces the solved state for every group cube in the process. Can only
    /// be done once.
    pub fn override_solved_state(state: GroupState) -> Result<(), CubeError> {
        state.validate()?;
        SOLVED_OVERRIDE.set(state).map_err(|_| CubeError::InvalidOverride(CubeKind::Group))?;
        info!("group cube solved state overridden");
        Ok(())
    }

    pub fn state(&self) -> &GroupState {
        &self.state
    }

    pub fn state_vector(&self) -> Vec<u8> {
        self.state.state_vector()
    }

    fn center_position(&self, occupant: u8) -> Option<usize> {
        self.state.centers.iter().position(|&c| c == occupant)
    }

    fn turn_all(&mut self, moves: &[Move]) {
        for &m in moves {
            self.turn(m);
        }
    }
}

impl Default for GroupCube {
    fn default() -> GroupCube {
        GroupCube::new()
    }
}

impl Cube for GroupCube {
    fn kind(&self) -> CubeKind {
        CubeKind::Group
    }

    // Order matters: orientation deltas look up the cubie that has just
    // arrived at each position.
    fn turn(&mut self, m: Move) {
        let tables = CycleTables::get();
        let s = &mut self.state;

        permute(&mut s.corner_permutation, tables.corner_cycles(m));

        if m.turn.is_quarter() {
            if let Some((_, twists)) = CORNER_TWISTS.iter().find(|(f, _)| *f == m.face) {
                for &(position, twist) in twists.iter() {
                    let cubie = s.corner_permutation[position] as usize;
                    s.corner_orientation[cubie] = (s.corner_orientation[cubie] + twist) % 3;
                }
            }
        }

        let edge_cycles = tables.edge_cycles(m);
        permute(&mut s.edge_permutation, edge_cycles);

        if m.turn.is_quarter() && FLIPPING_FACES.contains(&m.face) {
            for &position in edge_cycles.iter().flatten() {
                let cubie = s.edge_permutation[position] as usize;
                s.edge_orientation[cubie] ^= 1;
            }
        }

        permute(&mut s.centers, tables.center_cycles(m));
    }

    fn reset(&mut self) {
        self.state = GroupCube::solved_state();
        self.history.clear();
    }

    /// Reorients a fresh solved cube so its centers line up with this one,
    /// then compares all mappings. Centers are found by position in the
    /// reference, so a goal with rotated centers works too.
    fn is_solved(&self) -> bool {
        let mut reference = GroupCube::new();

        if let Some(moves) = reference.center_position(self.state.centers[PRIMARY]).and_then(primary_rotation) {
            reference.turn_all(&moves);
        }

        if let Some(moves) = reference.center_position(self.state.centers[SECONDARY]).and_then(secondary_rotation) {
            reference.turn_all(&moves);
        }

        reference.state == self.state
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::Group(self.state.clone())
    }

    fn history(&self) -> &[String] {
        &self.history
    }

    fn extend_history(&mut self, tokens: &[String]) {
        self.history.extend_from_slice(tokens);
    }
}

impl fmt::Display for GroupCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Moves so far: {}", self.history.join(" "))?;
        writeln!(f, "Corners: {:?}", self.state.corner_permutation)?;
        writeln!(f, "Corner orientation: {:?}", self.state.corner_orientation)?;
        writeln!(f, "Edges: {:?}", self.state.edge_permutation)?;
        writeln!(f, "Edge orientation: {:?}", self.state.edge_orientation)?;
        write!(f, "Centers: {:?}", self.state.centers)
    }
}
