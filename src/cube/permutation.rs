// Permutation engine: applies disjoint cycles to a fixed-size indexed mapping.

/// Positions `(p0, p1, ..., pk-1)`: the occupant of `pi` moves to `p(i+1 mod k)`.
pub type Cycle = Vec<usize>;

/// Rotates the occupants of `slots` along a single cycle.
///
/// The occupant formerly at `p(i-1)` ends up at `pi`. Slots are written from the
/// end of the cycle backwards, so nothing is read after being overwritten.
pub fn permute_cycle<T: Copy>(slots: &mut [T], cycle: &[usize]) {
    let k = cycle.len();
    if k < 2 {
        return;
    }

    let last = slots[cycle[k - 1]];
    for i in (1..k).rev() {
        slots[cycle[i]] = slots[cycle[i - 1]];
    }
    slots[cycle[0]] = last;
}

/// Applies a list of cycles. They must be disjoint (not checked).
pub fn permute<T: Copy>(slots: &mut [T], cycles: &[Cycle]) {
    for cycle in cycles {
        permute_cycle(slots, cycle);
    }
}

/// Whether `values` is a bijection of `0..values.len()`.
pub fn is_permutation(values: &[u8]) -> bool {
    let mut seen = vec![false; values.len()];
    for &v in values {
        let v = v as usize;
        if v >= seen.len() || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

/// Parity of a permutation given as a position -> occupant table: true if odd.
pub fn is_odd(values: &[u8]) -> bool {
    let mut seen = vec![false; values.len()];
    let mut transpositions = 0;

    for start in 0..values.len() {
        let mut length = 0;
        let mut i = start;
        while !seen[i] {
            seen[i] = true;
            i = values[i] as usize;
            length += 1;
        }
        if length > 0 {
            transpositions += length - 1;
        }
    }

    transpositions % 2 == 1
}
