/*
 * Trivial to understand utility functions that need not clutter other namespaces.
 */
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Row-major element access into a flat slice.
pub trait Elem<T> {
    fn elem(&self, cols: usize, row: usize, col: usize) -> &T;
    fn elem_mut(&mut self, cols: usize, row: usize, col: usize) -> &mut T;
}

impl<T> Elem<T> for [T] {
    fn elem(&self, cols: usize, row: usize, col: usize) -> &T {
        &self[row * cols + col]
    }
    fn elem_mut(&mut self, cols: usize, row: usize, col: usize) -> &mut T {
        &mut self[row * cols + col]
    }
}

/// Writes `contents` into `filename`, creating the parent directory if needed.
pub fn write_file<P: AsRef<Path>>(filename: P, contents: &str) -> Result<()> {
    let filename = filename.as_ref();
    if let Some(parent) = filename.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(filename, contents)?;
    trace!("Wrote {} bytes to {}.", contents.len(), filename.display());
    Ok(())
}

/// Reads a file of whitespace-delimited integers.
///
/// Lines starting with `T` are simulator timestamps (`T 1024 ns`, `TLAST`) and are skipped.
pub fn read_file_as_ints<P: AsRef<Path>>(filename: P) -> Result<Vec<i64>> {
    let filename = filename.as_ref();
    let contents = fs::read_to_string(filename)?;

    let mut ints = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        if line.trim_start().starts_with('T') {
            continue;
        }
        for token in line.split_whitespace() {
            let v = token.parse::<i64>().map_err(|_| Error::Parse {
                file: filename.display().to_string(),
                line: idx + 1,
                token: token.to_owned(),
            })?;
            ints.push(v);
        }
    }
    Ok(ints)
}
