use cubecore::cube::moves::Move;
use cubecore::cube::notation;
use cubecore::cube::scramble;
use cubecore::{Cube, Ensemble, GroupCube, StickerCube};

fn both(moves: &str) -> (StickerCube, GroupCube) {
    let mut s = StickerCube::new();
    let mut g = GroupCube::new();
    s.apply(moves).unwrap();
    g.apply(moves).unwrap();
    (s, g)
}

#[test_log::test]
fn test_fresh_cubes_are_solved() {
    let (s, g) = both("");
    assert!(s.is_solved());
    assert!(g.is_solved());
}

#[test_log::test]
fn test_representations_agree_step_by_step() {
    for seed in 0..40 {
        let mut s = StickerCube::new();
        let mut g = GroupCube::new();
        for m in scramble::generate(seed, 30) {
            s.turn(m);
            g.turn(m);
            assert_eq!(s.is_solved(), g.is_solved(), "seed {} after {}", seed, m);
        }
    }
}

#[test_log::test]
fn test_representations_agree_on_rotations() {
    let rotations = ["x", "x'", "x2", "y", "y'", "y2", "z", "z'", "z2"];
    for a in rotations.iter() {
        for b in rotations.iter() {
            let (s, g) = both(&format!("{} {}", a, b));
            assert!(s.is_solved(), "{} {}", a, b);
            assert!(g.is_solved(), "{} {}", a, b);
        }
    }

    // A rotation followed by a turn and its inverse written in the new frame.
    let (s, g) = both("x U x' F'");
    assert!(s.is_solved());
    assert!(g.is_solved());
}

#[test_log::test]
fn test_single_turn_and_inverse() {
    for m in Move::all() {
        let mut s = StickerCube::new();
        let mut g = GroupCube::new();
        s.apply(&m.to_string()).unwrap();
        g.apply(&m.to_string()).unwrap();
        assert!(!s.is_solved() && !g.is_solved(), "{}", m);
        s.apply(&m.inverse().to_string()).unwrap();
        g.apply(&m.inverse().to_string()).unwrap();
        assert!(s.is_solved() && g.is_solved(), "{}", m);
    }
}

#[test_log::test]
fn test_brackets_match_written_out_moves() {
    let cases = [
        ("[R, U]", "R U R' U'"),
        ("[R: U]", "R U R'"),
        ("[R U R', D]", "R U R' D R U' R' D'"),
        ("[F: [R, U]]", "F R U R' U' F'"),
    ];
    for (bracketed, plain) in cases.iter() {
        let (s1, g1) = both(bracketed);
        let (s2, g2) = both(plain);
        assert_eq!(s1.stickers(), s2.stickers(), "{}", bracketed);
        assert_eq!(g1.state(), g2.state(), "{}", bracketed);
    }
}

#[test_log::test]
fn test_garbled_input_matches_clean_input() {
    let cases = [
        ("RU R' U'", "R U R' U'"),
        ("R2' U3 (F)", "R2 U' F"),
        ("Rw r' Uw2 d3", "r r' u2 d'"),
        ("R U // comment R'", "R U R'"),
        ("R\nU\\F", "R U F"),
    ];
    for (garbled, clean) in cases.iter() {
        let (s1, g1) = both(garbled);
        let (s2, g2) = both(clean);
        assert_eq!(s1.stickers(), s2.stickers(), "{}", garbled);
        assert_eq!(g1.state(), g2.state(), "{}", garbled);
    }
}

#[test_log::test]
fn test_list_input() {
    let mut g = GroupCube::new();
    let tokens: Vec<String> = ["R", "U", "R'", "U'"].iter().map(|t| t.to_string()).collect();
    g.apply_tokens(&tokens).unwrap();
    assert_eq!(g.state(), both("R U R' U'").1.state());
    assert_eq!(g.history(), &tokens[..]);
}

#[test_log::test]
fn test_expansion_is_primitive_only() {
    let tokens = notation::parse("x y' Rw2 [r, U] Dw3'").unwrap();
    let moves = notation::expand_all(&tokens).unwrap();
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|m| m.to_string().parse::<Move>().is_ok()));
}

#[test_log::test]
fn test_superflip_edges() {
    let superflip = "U R2 F B R B2 R U2 L B2 R U' D' R2 F R' L B2 U2 F2";
    let (s, g) = both(superflip);
    assert!(!s.is_solved());
    assert_eq!(g.state().edge_orientation, [1; 12]);
    assert_eq!(g.state().corner_orientation, [0; 8]);
    assert_eq!(g.state().corner_permutation, [0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(g.state().edge_permutation, [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11]);
}

#[test_log::test]
fn test_ensemble_tracks_a_single_cube() {
    let mut e: Ensemble = Ensemble::new();
    let mut g = GroupCube::new();
    for m in scramble::generate(3, 20) {
        e.turn(m);
        g.turn(m);
        assert_eq!(e.is_solved(), g.is_solved());
        assert!(e.members_agree());
    }
}
