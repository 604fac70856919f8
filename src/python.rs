// Python bindings.

use core::str::FromStr;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::cube::{self, notation, Cube as _, CubeError};

impl From<CubeError> for PyErr {
    fn from(e: CubeError) -> PyErr {
        PyValueError::new_err(e.to_string())
    }
}

// Accepts either a move string or a list of tokens.
fn apply_any<C: cube::Cube>(target: &mut C, moves: &PyAny) -> PyResult<()> {
    if let Ok(s) = moves.extract::<String>() {
        target.apply(&s)?;
    } else {
        let tokens: Vec<String> = moves.extract()?;
        target.apply_tokens(&tokens)?;
    }
    Ok(())
}

#[pyclass]
struct StickerCube {
    inner: cube::sticker::StickerCube,
}

#[pymethods]
impl StickerCube {
    #[new]
    fn new() -> Self {
        StickerCube { inner: cube::sticker::StickerCube::new() }
    }

    fn apply(&mut self, moves: &PyAny) -> PyResult<()> {
        apply_any(&mut self.inner, moves)
    }

    fn is_solved(&self) -> bool {
        self.inner.is_solved()
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    /// The 54 stickers as a string, faces in U, B, R, F, L, D order.
    fn state(&self) -> String {
        self.inner.stickers().iter().collect()
    }

    fn history(&self) -> Vec<String> {
        self.inner.history().to_vec()
    }
}

#[pyclass]
struct GroupCube {
    inner: cube::group::GroupCube,
}

#[pymethods]
impl GroupCube {
    #[new]
    fn new() -> Self {
        GroupCube { inner: cube::group::GroupCube::new() }
    }

    fn apply(&mut self, moves: &PyAny) -> PyResult<()> {
        apply_any(&mut self.inner, moves)
    }

    fn is_solved(&self) -> bool {
        self.inner.is_solved()
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    /// Corner orientations and permutation, then edge orientations and
    /// permutation.
    fn state(&self) -> Vec<u8> {
        self.inner.state_vector()
    }

    fn history(&self) -> Vec<String> {
        self.inner.history().to_vec()
    }
}

#[pyclass]
struct Ensemble {
    inner: cube::ensemble::Ensemble,
}

#[pymethods]
impl Ensemble {
    #[new]
    fn new() -> Self {
        Ensemble { inner: cube::ensemble::Ensemble::new() }
    }

    fn apply(&mut self, moves: &PyAny) -> PyResult<()> {
        if let Ok(s) = moves.extract::<String>() {
            self.inner.apply(&s)?;
        } else {
            let tokens: Vec<String> = moves.extract()?;
            self.inner.apply_tokens(&tokens)?;
        }
        Ok(())
    }

    fn is_solved(&self) -> bool {
        self.inner.is_solved()
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn state(&self) -> Vec<String> {
        self.inner.members().iter().map(|c| c.stickers().iter().collect()).collect()
    }

    fn history(&self) -> Vec<String> {
        self.inner.history().to_vec()
    }
}

/// Normalizes a move string into primitive and alias tokens.
#[pyfunction]
fn parse(moves: &str) -> PyResult<Vec<String>> {
    Ok(notation::parse(moves)?)
}

/// Replaces the solved sticker state for the rest of the process.
#[pyfunction]
fn override_sticker_solved_state(stickers: &str) -> PyResult<()> {
    let target = cube::sticker::StickerCube::from_str(stickers)?;
    cube::sticker::StickerCube::override_solved_state(*target.stickers())?;
    Ok(())
}

#[pymodule]
fn cubecore(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<StickerCube>()?;
    m.add_class::<GroupCube>()?;
    m.add_class::<Ensemble>()?;
    m.add_function(wrap_pyfunction!(parse, m)?)?;
    m.add_function(wrap_pyfunction!(override_sticker_solved_state, m)?)?;

    Ok(())
}
