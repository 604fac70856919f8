// Cycle tables.
//
// Quarter turns are written the way cubers describe cubie motion, as named
// 4-cycles of locations ("URB -> BDR -> DRF -> FUR"). Inverse and half turns are
// derived from those descriptions, and everything is compiled once into index
// cycles over the 54-sticker array and over the corner/edge/center positions
// of the group representation.

use std::collections::HashMap;
use std::sync::OnceLock;

use log::debug;
use pest::Parser;

use super::moves::{Face, Move, Turn, N_MOVES};
use super::permutation::Cycle;
use super::CubeError;

pub const N_STICKERS: usize = 9 * 6;
pub const N_CORNERS: usize = 8;
pub const N_EDGES: usize = 12;
pub const N_CENTERS: usize = 6;

/// Order of the faces in the sticker array. Sticker `face * 9 + i` is the i-th
/// facelet of that face, row-major.
pub const FACE_ORDER: [Face; 6] = [Face::U, Face::B, Face::R, Face::F, Face::L, Face::D];

/// Corner positions of the group representation, by canonical name.
pub const CORNER_NAMES: [&str; N_CORNERS] = ["ULB", "URB", "URF", "ULF", "DLB", "DRB", "DRF", "DLF"];

/// Edge positions of the group representation, by canonical name.
pub const EDGE_NAMES: [&str; N_EDGES] = ["UB", "UR", "UF", "UL", "LB", "RB", "RF", "LF",
                                         "DB", "DR", "DF", "DL"];

// Sticker indices of every cubie, starting with the sticker on the U/D face
// (R/L face for middle-layer edges) and going around the cubie.
const CUBIE_STICKERS: [(&str, &[usize]); 20] = [
    ("ULF", &[6, 44, 27]), ("ULB", &[0, 15, 38]),
    ("URF", &[8, 29, 24]), ("URB", &[2, 18, 17]),
    ("DLF", &[45, 33, 42]), ("DLB", &[51, 36, 9]),
    ("DRF", &[47, 26, 35]), ("DRB", &[53, 11, 20]),
    ("UR", &[5, 21]), ("UL", &[3, 41]),
    ("DR", &[50, 23]), ("DL", &[48, 39]),
    ("UF", &[7, 28]), ("UB", &[1, 16]),
    ("DF", &[46, 34]), ("DB", &[52, 10]),
    ("RF", &[25, 32]), ("RB", &[19, 14]),
    ("LF", &[43, 30]), ("LB", &[37, 12]),
];

// Corners whose sticker lists run the other way around the cubie; a twist
// read off their names has to be mirrored.
const MIRRORED_CORNERS: [&str; 4] = ["URB", "ULF", "DLB", "DRF"];

const CORNER_NOTATION: [(Face, &str); 6] = [
    (Face::R, "URB -> BDR -> DRF -> FUR"),
    (Face::U, "URB -> URF -> ULF -> ULB"),
    (Face::L, "ULB -> FUL -> DLF -> BDL"),
    (Face::D, "DRB -> DLB -> DLF -> DRF"),
    (Face::F, "URF -> RDF -> DLF -> LUF"),
    (Face::B, "URB -> LUB -> DLB -> RDB"),
];

const EDGE_NOTATION: [(Face, &str); 9] = [
    (Face::R, "UR -> BR -> DR -> FR"),
    (Face::U, "UR -> UF -> UL -> UB"),
    (Face::L, "UL -> FL -> DL -> BL"),
    (Face::D, "DR -> DB -> DL -> DF"),
    (Face::F, "UF -> RF -> DF -> LF"),
    (Face::B, "UB -> LB -> DB -> RB"),
    (Face::M, "UF -> FD -> DB -> BU"),
    (Face::E, "RB -> BL -> LF -> FR"),
    (Face::S, "UR -> RD -> DL -> LU"),
];

// Slice moves carry the centers of the four faces they pass through.
const CENTER_NOTATION: [(Face, [Face; 4]); 3] = [
    (Face::M, [Face::U, Face::F, Face::D, Face::B]),
    (Face::E, [Face::B, Face::L, Face::F, Face::R]),
    (Face::S, [Face::U, Face::R, Face::D, Face::L]),
];

#[derive(Parser)]
#[grammar = "cube/grammars/cycles.pest"]
struct CycleNotationParser;

/// Priority of a face letter in a canonical cubie name: U/D, then R/L, then F/B.
fn face_priority(c: char) -> Option<u8> {
    match c {
        'U' | 'D' => Some(0),
        'R' | 'L' => Some(1),
        'F' | 'B' => Some(2),
        _ => None,
    }
}

/// Canonical name of a location written in any order ("BUR" -> "URB").
pub fn canonical_name(name: &str) -> Result<String, CubeError> {
    let mut letters = Vec::with_capacity(name.len());
    for c in name.chars() {
        match face_priority(c) {
            Some(p) => letters.push((p, c)),
            None => return Err(notation_error(name, format!("`{}` is not a face", c))),
        }
    }
    letters.sort_by_key(|&(p, _)| p);
    Ok(letters.into_iter().map(|(_, c)| c).collect())
}

/// Index of a face's sticker block in the sticker array.
pub fn face_index(face: Face) -> Option<usize> {
    FACE_ORDER.iter().position(|&f| f == face)
}

fn notation_error(notation: &str, reason: String) -> CubeError {
    CubeError::CycleNotation { notation: notation.to_string(), reason }
}

/// Sticker indices of one corner or edge, in canonical order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cubie {
    stickers: Vec<usize>,
}

impl Cubie {
    /// A corner has three stickers and an edge two.
    pub fn new(stickers: &[usize]) -> Result<Cubie, CubeError> {
        match stickers.len() {
            2 | 3 => Ok(Cubie { stickers: stickers.to_vec() }),
            n => Err(CubeError::InvalidState(format!("a cubie has 2 or 3 stickers, not {}", n))),
        }
    }

    pub fn is_corner(&self) -> bool {
        self.stickers.len() == 3
    }

    pub fn stickers(&self) -> &[usize] {
        &self.stickers
    }

    /// Sticker indices as seen after a twist: `rotation` clockwise steps for a
    /// corner (negative is counterclockwise), a flip for an edge when odd.
    pub fn rotated(&self, rotation: i32) -> Vec<usize> {
        let s = &self.stickers;
        if self.is_corner() {
            match rotation.rem_euclid(3) {
                0 => s.clone(),
                1 => vec![s[2], s[0], s[1]],
                _ => vec![s[1], s[2], s[0]],
            }
        } else if rotation.rem_euclid(2) == 1 {
            vec![s[1], s[0]]
        } else {
            s.clone()
        }
    }
}

// Cycles of every primitive turn, indexed by `Move::index`.
type MoveTable = [Vec<Cycle>; N_MOVES];

fn empty_table() -> MoveTable {
    std::array::from_fn(|_| Vec::new())
}

/// All index cycles needed to turn a cube, generated once per process.
pub struct CycleTables {
    cubies: HashMap<String, Cubie>,
    stickers: MoveTable,
    corners: MoveTable,
    edges: MoveTable,
    centers: MoveTable,
}

static TABLES: OnceLock<CycleTables> = OnceLock::new();

impl CycleTables {
    /// Process-wide tables, compiled on first use.
    pub fn get() -> &'static CycleTables {
        TABLES.get_or_init(|| CycleTables::generate().expect("built-in cycle notation must compile"))
    }

    pub fn generate() -> Result<CycleTables, CubeError> {
        let mut tables = CycleTables {
            cubies: CUBIE_STICKERS.iter()
                .map(|(name, s)| Ok::<_, CubeError>((name.to_string(), Cubie::new(s)?)))
                .collect::<Result<_, CubeError>>()?,
            stickers: empty_table(),
            corners: empty_table(),
            edges: empty_table(),
            centers: empty_table(),
        };

        for &(face, notation) in EDGE_NOTATION.iter() {
            for (turn, locations) in turn_variants(notation)? {
                let m = Move::new(face, turn);
                let stickers = tables.compile_locations(notation, &locations)?;
                let edges = compile_positions(notation, &locations, &EDGE_NAMES)?;
                tables.stickers[m.index()].extend(stickers);
                tables.edges[m.index()] = edges;
            }
        }

        for &(face, notation) in CORNER_NOTATION.iter() {
            for (turn, locations) in turn_variants(notation)? {
                let m = Move::new(face, turn);
                let stickers = tables.compile_locations(notation, &locations)?;
                let corners = compile_positions(notation, &locations, &CORNER_NAMES)?;
                tables.stickers[m.index()].extend(stickers);
                tables.corners[m.index()] = corners;
            }
        }

        for &(face, ring) in CENTER_NOTATION.iter() {
            let mut positions = [0; 4];
            for (p, &f) in positions.iter_mut().zip(ring.iter()) {
                *p = face_index(f).ok_or_else(|| notation_error("centers", format!("{:?} has no center", f)))?;
            }
            for (turn, cycles) in four_cycle_variants(&positions) {
                let m = Move::new(face, turn);
                let stickers = cycles.iter().map(|c| c.iter().map(|&f| f * 9 + 4).collect());
                tables.stickers[m.index()].extend(stickers);
                tables.centers[m.index()] = cycles;
            }
        }

        debug!("compiled cycle tables: {} sticker moves, {} corner moves, {} edge moves, {} center moves",
               moves_in(&tables.stickers), moves_in(&tables.corners),
               moves_in(&tables.edges), moves_in(&tables.centers));

        Ok(tables)
    }

    /// Cubie at a canonical location name.
    pub fn cubie(&self, canonical: &str) -> Option<&Cubie> {
        self.cubies.get(canonical)
    }

    /// Sticker indices of a location written in any orientation. The indices
    /// are reordered to follow the written face order, so "RUB" names the same
    /// cubie as "URB" but starting from its R sticker.
    pub fn locate(&self, name: &str) -> Result<Vec<usize>, CubeError> {
        let canonical = canonical_name(name)?;
        let cubie = self.cubie(&canonical)
            .ok_or_else(|| notation_error(name, "no such cubie".to_string()))?;

        let first = name.chars().next().unwrap_or('U');
        let mut rotation = canonical.find(first).unwrap_or(0) as i32;
        if MIRRORED_CORNERS.contains(&canonical.as_str()) {
            rotation = -rotation;
        }

        Ok(cubie.rotated(rotation))
    }

    /// Compiles cycle notation such as "URB -> DLF -> RBD" (several cycles may be
    /// joined with `&`) into sticker cycles.
    pub fn compile(&self, notation: &str) -> Result<Vec<Cycle>, CubeError> {
        self.compile_locations(notation, &parse_notation(notation)?)
    }

    fn compile_locations(&self, notation: &str, cycles: &[Vec<String>]) -> Result<Vec<Cycle>, CubeError> {
        let mut result = Vec::new();

        for locations in cycles {
            let resolved = locations.iter()
                .map(|l| self.locate(l))
                .collect::<Result<Vec<Vec<usize>>, CubeError>>()?;

            let width = resolved[0].len();
            if resolved.iter().any(|r| r.len() != width) {
                return Err(notation_error(notation, "corners and edges cannot share a cycle".to_string()));
            }

            // One cycle per sticker slot of the moving cubies.
            for slot in 0..width {
                result.push(resolved.iter().map(|r| r[slot]).collect());
            }
        }

        Ok(result)
    }

    pub fn sticker_cycles(&self, m: Move) -> &[Cycle] {
        &self.stickers[m.index()]
    }

    pub fn corner_cycles(&self, m: Move) -> &[Cycle] {
        &self.corners[m.index()]
    }

    pub fn edge_cycles(&self, m: Move) -> &[Cycle] {
        &self.edges[m.index()]
    }

    pub fn center_cycles(&self, m: Move) -> &[Cycle] {
        &self.centers[m.index()]
    }
}

fn moves_in(table: &MoveTable) -> usize {
    table.iter().filter(|cycles| !cycles.is_empty()).count()
}

/// Compiles cycle notation into sticker cycles using the process-wide tables.
pub fn compile_cycle_notation(notation: &str) -> Result<Vec<Cycle>, CubeError> {
    CycleTables::get().compile(notation)
}

/// Splits notation into cycles of location names.
fn parse_notation(notation: &str) -> Result<Vec<Vec<String>>, CubeError> {
    let root = CycleNotationParser::parse(Rule::notation, notation)
        .map_err(|e| notation_error(notation, e.to_string()))?
        .next()
        .ok_or_else(|| notation_error(notation, "empty notation".to_string()))?;

    Ok(root.into_inner()
        .filter(|p| p.as_rule() == Rule::cycle)
        .map(|cycle| cycle.into_inner().map(|l| l.as_str().to_string()).collect())
        .collect())
}

/// Quarter, inverse and half turn derived from a quarter turn's 4-cycle.
/// The inverse swaps entries 1 and 3; the half turn pairs {0, 2} and {1, 3}.
fn turn_variants(notation: &str) -> Result<Vec<(Turn, Vec<Vec<String>>)>, CubeError> {
    let cycles = parse_notation(notation)?;
    let base = match cycles.as_slice() {
        [base] if base.len() == 4 => base,
        _ => return Err(notation_error(notation, "a quarter turn must be a single 4-cycle".to_string())),
    };

    let (a, b, c, d) = (&base[0], &base[1], &base[2], &base[3]);
    Ok(vec![
        (Turn::Clockwise, vec![base.clone()]),
        (Turn::CounterClockwise, vec![vec![a.clone(), d.clone(), c.clone(), b.clone()]]),
        (Turn::Half, vec![vec![a.clone(), c.clone()], vec![b.clone(), d.clone()]]),
    ])
}

fn four_cycle_variants(p: &[usize; 4]) -> Vec<(Turn, Vec<Cycle>)> {
    vec![
        (Turn::Clockwise, vec![vec![p[0], p[1], p[2], p[3]]]),
        (Turn::CounterClockwise, vec![vec![p[0], p[3], p[2], p[1]]]),
        (Turn::Half, vec![vec![p[0], p[2]], vec![p[1], p[3]]]),
    ]
}

/// Compiles location cycles into cycles over group positions.
fn compile_positions(notation: &str, cycles: &[Vec<String>], names: &[&str]) -> Result<Vec<Cycle>, CubeError> {
    cycles.iter()
        .map(|locations| {
            locations.iter()
                .map(|l| {
                    let canonical = canonical_name(l)?;
                    names.iter().position(|&n| n == canonical)
                        .ok_or_else(|| notation_error(notation, format!("`{}` is not a position here", l)))
                })
                .collect()
        })
        .collect()
}
