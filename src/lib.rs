pub mod cube;

#[cfg(feature = "python")]
mod python;

pub use crate::cube::ensemble::Ensemble;
pub use crate::cube::group::{GroupCube, GroupState};
pub use crate::cube::moves::{Face, Move, Turn};
pub use crate::cube::sticker::{StickerCube, Stickers};
pub use crate::cube::{cube_factory, Cube, CubeError, CubeKind, Snapshot};

extern crate pest;
#[macro_use]
extern crate pest_derive;
