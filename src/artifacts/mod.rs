// src/artifacts/mod.rs

//! Writes derived circuits to disk as text and PNG artifacts.

use crate::circuits::{compose_side_by_side, compose_text_side_by_side};
use crate::derivation::DerivationResult;
use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Serialized quantum sequence.
pub const QUANTUM_SEQUENCE_FILE: &str = "source_quantum.txt";
/// Serialized classical-shadow sequence.
pub const CLASSICAL_SEQUENCE_FILE: &str = "source_classical.txt";
/// Rendered quantum diagram.
pub const QUANTUM_DIAGRAM_FILE: &str = "quantum.txt";
/// Rendered classical-shadow diagram.
pub const CLASSICAL_DIAGRAM_FILE: &str = "classical.txt";
/// Both diagrams side by side.
pub const ASSEMBLY_FILE: &str = "assembly.txt";
/// Rasterized quantum circuit.
pub const QUANTUM_IMAGE_FILE: &str = "quantum.png";
/// Rasterized classical-shadow circuit.
pub const CLASSICAL_IMAGE_FILE: &str = "classical.png";
/// Both images composited on the dark background.
pub const ASSEMBLY_IMAGE_FILE: &str = "assembly.png";

/// Failure while writing artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("I/O error writing {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to encode {path}: {source}")]
    Encode { path: PathBuf, source: image::ImageError },
}

/// Writes the artifacts of a derivation into `dir`, creating it if needed.
///
/// Sequence files hold one serialized line followed by a newline; diagram
/// files hold the `Display` rendering of each circuit; the assemblies hold
/// the quantum rendering with the classical one composed to its right.
///
/// # Returns
/// The written paths: the five text files first, then the three PNGs, in
/// the order the constants above are listed.
pub fn write_artifacts(result: &DerivationResult, dir: &Path) -> Result<Vec<PathBuf>, ArtifactError> {
    fs::create_dir_all(dir).map_err(|source| ArtifactError::Io { path: dir.to_path_buf(), source })?;

    let quantum_diagram = result.quantum().to_string();
    let classical_diagram = result.classical().to_string();
    let texts = [
        (QUANTUM_SEQUENCE_FILE, format!("{}\n", result.quantum().to_sequence_line())),
        (CLASSICAL_SEQUENCE_FILE, format!("{}\n", result.classical().to_sequence_line())),
        (QUANTUM_DIAGRAM_FILE, quantum_diagram.clone()),
        (CLASSICAL_DIAGRAM_FILE, classical_diagram.clone()),
        (ASSEMBLY_FILE, compose_text_side_by_side(&quantum_diagram, &classical_diagram)),
    ];

    let mut written = Vec::with_capacity(texts.len() + 3);
    for (name, body) in texts {
        let path = dir.join(name);
        fs::write(&path, body).map_err(|source| ArtifactError::Io { path: path.clone(), source })?;
        info!(path = %path.display(), "wrote artifact");
        written.push(path);
    }

    let quantum_image = result.quantum().to_image();
    let classical_image = result.classical().to_image();
    let assembly_image = compose_side_by_side(&quantum_image, &classical_image);
    for (name, img) in [
        (QUANTUM_IMAGE_FILE, &quantum_image),
        (CLASSICAL_IMAGE_FILE, &classical_image),
        (ASSEMBLY_IMAGE_FILE, &assembly_image),
    ] {
        written.push(save_png(img, &dir.join(name))?);
    }
    Ok(written)
}

fn save_png(img: &RgbaImage, path: &Path) -> Result<PathBuf, ArtifactError> {
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|source| ArtifactError::Encode { path: path.to_path_buf(), source })?;
    info!(path = %path.display(), width = img.width(), height = img.height(), "wrote image");
    Ok(path.to_path_buf())
}
