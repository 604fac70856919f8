// Move notation parser.
//
// Turns arbitrary human-entered move strings into tokens: punctuation is
// spaced out, missing spaces between moves are repaired, anything that is not
// a legal token is dropped, and bracket notation is expanded. Aliases (wide
// turns, rotations, garbled suffixes) survive parsing and are reduced to
// primitive turns by `expand`.

use core::str::FromStr;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use log::debug;

use super::commutator::parse_comm;
use super::moves::Move;
use super::CubeError;

/// Aliases and what they stand for. Entries may refer to other aliases; the
/// table has no cycles, so expansion always ends in primitive turns.
pub const REMAP: [(&str, &[&str]); 117] = [
    // Whole-cube rotations.
    ("x", &["R", "M'", "L'"]), ("x'", &["R'", "M", "L"]), ("x2", &["R2", "M2", "L2"]),
    ("y", &["U", "E'", "D'"]), ("y'", &["U'", "E", "D"]), ("y2", &["U2", "E2", "D2"]),
    ("z", &["F", "S", "B'"]), ("z'", &["F'", "S'", "B"]), ("z2", &["F2", "S2", "B2"]),
    // Wide turns: an outer layer together with the middle layer.
    ("r", &["R", "M'"]), ("r'", &["R'", "M"]), ("r2", &["R2", "M2"]),
    ("l", &["L", "M"]), ("l'", &["L'", "M'"]), ("l2", &["L2", "M2"]),
    ("f", &["F", "S"]), ("f'", &["F'", "S'"]), ("f2", &["F2", "S2"]),
    ("b", &["B", "S'"]), ("b'", &["B'", "S"]), ("b2", &["B2", "S2"]),
    ("u", &["U", "E'"]), ("u'", &["U'", "E"]), ("u2", &["U2", "E2"]),
    ("d", &["D", "E"]), ("d'", &["D'", "E'"]), ("d2", &["D2", "E2"]),
    // Rw-style spelling of wide turns.
    ("Rw", &["r"]), ("Rw'", &["r'"]), ("Rw2", &["r2"]),
    ("Lw", &["l"]), ("Lw'", &["l'"]), ("Lw2", &["l2"]),
    ("Fw", &["f"]), ("Fw'", &["f'"]), ("Fw2", &["f2"]),
    ("Bw", &["b"]), ("Bw'", &["b'"]), ("Bw2", &["b2"]),
    ("Uw", &["u"]), ("Uw'", &["u'"]), ("Uw2", &["u2"]),
    ("Dw", &["d"]), ("Dw'", &["d'"]), ("Dw2", &["d2"]),
    // Garbled suffixes: a triple turn is an inverse turn, and so on.
    ("U3", &["U'"]), ("U3'", &["U"]), ("U2'", &["U2"]),
    ("D3", &["D'"]), ("D3'", &["D"]), ("D2'", &["D2"]),
    ("L3", &["L'"]), ("L3'", &["L"]), ("L2'", &["L2"]),
    ("R3", &["R'"]), ("R3'", &["R"]), ("R2'", &["R2"]),
    ("F3", &["F'"]), ("F3'", &["F"]), ("F2'", &["F2"]),
    ("B3", &["B'"]), ("B3'", &["B"]), ("B2'", &["B2"]),
    ("M3", &["M'"]), ("M3'", &["M"]), ("M2'", &["M2"]),
    ("E3", &["E'"]), ("E3'", &["E"]), ("E2'", &["E2"]),
    ("S3", &["S'"]), ("S3'", &["S"]), ("S2'", &["S2"]),
    ("x3", &["x'"]), ("x3'", &["x"]), ("x2'", &["x2"]),
    ("y3", &["y'"]), ("y3'", &["y"]), ("y2'", &["y2"]),
    ("z3", &["z'"]), ("z3'", &["z"]), ("z2'", &["z2"]),
    ("r3", &["r'"]), ("r3'", &["r"]), ("r2'", &["r2"]),
    ("l3", &["l'"]), ("l3'", &["l"]), ("l2'", &["l2"]),
    ("f3", &["f'"]), ("f3'", &["f"]), ("f2'", &["f2"]),
    ("b3", &["b'"]), ("b3'", &["b"]), ("b2'", &["b2"]),
    ("u3", &["u'"]), ("u3'", &["u"]), ("u2'", &["u2"]),
    ("d3", &["d'"]), ("d3'", &["d"]), ("d2'", &["d2"]),
    ("Rw3", &["Rw'"]), ("Rw3'", &["Rw"]), ("Rw2'", &["Rw2"]),
    ("Lw3", &["Lw'"]), ("Lw3'", &["Lw"]), ("Lw2'", &["Lw2"]),
    ("Fw3", &["Fw'"]), ("Fw3'", &["Fw"]), ("Fw2'", &["Fw2"]),
    ("Bw3", &["Bw'"]), ("Bw3'", &["Bw"]), ("Bw2'", &["Bw2"]),
    ("Uw3", &["Uw'"]), ("Uw3'", &["Uw"]), ("Uw2'", &["Uw2"]),
    ("Dw3", &["Dw'"]), ("Dw3'", &["Dw"]), ("Dw2'", &["Dw2"]),
];

const PUNCTUATION: [&str; 4] = [",", ":", "[", "]"];

// Structural characters are padded or blanked so they split into their own tokens.
const REPLACEMENTS: [(char, &str); 9] = [
    ('\n', " "), ('(', " "), (')', " "), ('/', " "), ('\\', " "),
    ('[', " [ "), (']', " ] "), (',', " , "), (':', " : "),
];

fn remap_table() -> &'static HashMap<&'static str, &'static [&'static str]> {
    static TABLE: OnceLock<HashMap<&'static str, &'static [&'static str]>> = OnceLock::new();
    TABLE.get_or_init(|| REMAP.iter().copied().collect())
}

/// What an alias stands for, if `token` is one.
pub fn remap(token: &str) -> Option<&'static [&'static str]> {
    remap_table().get(token).copied()
}

/// Every token that denotes a move: the primitives and all aliases.
pub fn move_tokens() -> Vec<String> {
    Move::all().map(|m| m.to_string())
        .chain(REMAP.iter().map(|(alias, _)| alias.to_string()))
        .collect()
}

fn legal_tokens() -> &'static HashSet<String> {
    static LEGAL: OnceLock<HashSet<String>> = OnceLock::new();
    LEGAL.get_or_init(|| {
        move_tokens().into_iter()
            .chain(PUNCTUATION.iter().map(|p| p.to_string()))
            .collect()
    })
}

pub fn is_legal(token: &str) -> bool {
    legal_tokens().contains(token)
}

/// Maps two move tokens written without a space ("RU") to the spaced pair ("R U").
pub fn common_mistakes() -> &'static HashMap<String, String> {
    static MISTAKES: OnceLock<HashMap<String, String>> = OnceLock::new();
    MISTAKES.get_or_init(|| {
        let tokens = move_tokens();
        let mut mistakes = HashMap::with_capacity(tokens.len() * tokens.len());
        for a in tokens.iter() {
            for b in tokens.iter() {
                mistakes.entry(format!("{}{}", a, b)).or_insert_with(|| format!("{} {}", a, b));
            }
        }
        debug!("built {} common notation mistakes", mistakes.len());
        mistakes
    })
}

/// Parses a move string into primitive and alias tokens.
///
/// Unrecognised tokens are silently dropped, so comments and stray symbols do
/// not cause errors. The only failure is malformed bracket notation.
pub fn parse(input: &str) -> Result<Vec<String>, CubeError> {
    let mut spaced = String::with_capacity(input.len() * 2);
    for c in input.chars() {
        match REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => spaced.push_str(to),
            None => spaced.push(c),
        }
    }

    let mistakes = common_mistakes();
    let corrected = spaced.split_whitespace()
        .map(|t| mistakes.get(t).map(String::as_str).unwrap_or(t))
        .collect::<Vec<&str>>()
        .join(" ");

    let legal = corrected.split_whitespace()
        .filter(|t| is_legal(t))
        .collect::<Vec<&str>>()
        .join(" ");

    let expanded = parse_comm(&legal)?;
    Ok(expanded.split_whitespace().map(|t| t.to_string()).collect())
}

/// Reduces one token to primitive turns.
///
/// Uses an explicit stack instead of recursion; since the remap table is
/// acyclic the loop ends after a bounded number of steps.
pub fn expand(token: &str) -> Result<Vec<Move>, CubeError> {
    let mut moves = Vec::new();
    let mut pending = vec![token];

    while let Some(t) = pending.pop() {
        if let Ok(m) = Move::from_str(t) {
            moves.push(m);
        } else if let Some(parts) = remap(t) {
            pending.extend(parts.iter().rev());
        } else {
            return Err(CubeError::UnknownMove(t.to_string()));
        }
    }

    Ok(moves)
}

pub fn expand_all<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Move>, CubeError> {
    let mut moves = Vec::with_capacity(tokens.len());
    for t in tokens {
        moves.extend(expand(t.as_ref())?);
    }
    Ok(moves)
}

/// Parses and fully expands a move string.
pub fn parse_moves(input: &str) -> Result<Vec<Move>, CubeError> {
    expand_all(&parse(input)?)
}
