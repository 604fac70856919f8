// Overrides are process-wide and can only be set once, so everything touching
// them lives in this test binary, one test per representation.

use std::str::FromStr;

use cubecore::cube::sticker::default_stickers;
use cubecore::{cube_factory, Cube, CubeError, CubeKind, GroupCube, GroupState, Snapshot, StickerCube};

#[test_log::test]
fn test_masked_sticker_goal() {
    // Only the middle layer and the bottom of the side faces matter.
    let masked = format!("{}{}{}{}{}{}", "_".repeat(9), "b".repeat(9), "r".repeat(9),
                         "g".repeat(9), "o".repeat(9), "_".repeat(9));
    let goal = *StickerCube::from_str(&masked).unwrap().stickers();

    let mut c = cube_factory(CubeKind::Sticker, Some(Snapshot::Stickers(goal))).unwrap();
    assert_eq!(c.snapshot(), Snapshot::Stickers(goal));
    assert!(c.is_solved());

    // Swaps two U-layer edges with two D-layer edges, invisible under the mask.
    c.apply("F2 M2 F2 M2").unwrap();
    assert!(c.is_solved());

    // Any global orientation of the goal still counts.
    c.apply("y").unwrap();
    assert!(c.is_solved());
    c.apply("x2").unwrap();
    assert!(c.is_solved());

    c.reset();
    c.apply("R U R' U'").unwrap();
    assert!(!c.is_solved());

    c.reset();
    c.apply("y x U").unwrap();
    assert!(!c.is_solved());

    // The fully colored cube no longer matches the goal.
    let colored = StickerCube::from_str(&default_stickers().iter().collect::<String>()).unwrap();
    assert!(!colored.is_solved());

    assert_eq!(StickerCube::override_solved_state(default_stickers()),
               Err(CubeError::InvalidOverride(CubeKind::Sticker)));
    assert!(matches!(cube_factory(CubeKind::Sticker, Some(Snapshot::Stickers(goal))),
                     Err(CubeError::InvalidOverride(CubeKind::Sticker))));
}

#[test_log::test]
fn test_group_goal() {
    let mut broken = GroupState::solved();
    broken.corner_permutation[0] = 1;
    assert!(matches!(GroupCube::override_solved_state(broken), Err(CubeError::InvalidState(_))));

    // The goal is an R turn made after rotating the whole cube, so its
    // centers are no longer in their home positions.
    let mut turned = GroupCube::new();
    turned.apply("x R").unwrap();
    let goal = turned.state().clone();
    assert_ne!(goal.centers, GroupState::solved().centers);

    let mut c = cube_factory(CubeKind::Group, Some(Snapshot::Group(goal.clone()))).unwrap();
    assert!(c.is_solved());
    assert_eq!(GroupCube::solved_state(), goal);
    assert!(GroupCube::new().is_solved());

    c.apply("R'").unwrap();
    assert!(!c.is_solved());
    c.apply("R").unwrap();
    assert!(c.is_solved());

    c.apply("y'").unwrap();
    assert!(c.is_solved());
    c.apply("x2 z").unwrap();
    assert!(c.is_solved());

    // Undoing the goal lands on the usual solved state, which no longer counts.
    c.reset();
    c.apply("R' x'").unwrap();
    assert_eq!(c.snapshot(), Snapshot::Group(GroupState::solved()));
    assert!(!c.is_solved());

    assert!(matches!(GroupCube::override_solved_state(GroupState::solved()),
                     Err(CubeError::InvalidOverride(CubeKind::Group))));
}
