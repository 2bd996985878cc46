use std::fs;
use std::path::Path;

use halfhop_core::errors::HalfHopError;
use halfhop_graph::{graph_from_bytes, graph_from_json, graph_to_bytes, graph_to_json, Graph};

/// Paths ending in `.bin` use bincode; everything else is JSON.
fn is_binary(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "bin")
}

/// Reads an `f32` graph from disk.
pub fn read_graph(path: &Path) -> Result<Graph<f32>, HalfHopError> {
    let io_err = |err: std::io::Error| HalfHopError::io(path.display().to_string(), &err);
    if is_binary(path) {
        let bytes = fs::read(path).map_err(io_err)?;
        graph_from_bytes(&bytes)
    } else {
        let text = fs::read_to_string(path).map_err(io_err)?;
        graph_from_json(&text)
    }
}

/// Writes an `f32` graph to disk, creating parent directories.
pub fn write_graph(path: &Path, graph: &Graph<f32>) -> Result<(), HalfHopError> {
    let io_err = |err: std::io::Error| HalfHopError::io(path.display().to_string(), &err);
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    if is_binary(path) {
        fs::write(path, graph_to_bytes(graph)?).map_err(io_err)
    } else {
        fs::write(path, graph_to_json(graph)?).map_err(io_err)
    }
}
