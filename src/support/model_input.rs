//! Reading scalar and gridded inputs from files.
//!
//! Auxiliary model inputs are declared as one of four [`InputKind`]s:
//!
//! - [`InputKind::Scalar`]: a constant from configuration; no file is opened.
//! - [`InputKind::TimeSeries`]: a text file with one value per non-blank
//!   line; each read yields the next value.
//! - [`InputKind::Grid`]: a binary file holding one float32 grid; the first
//!   read yields it and later reads yield nothing.
//! - [`InputKind::GridSequence`]: concatenated float32 grids; each read
//!   yields the next grid.
//!
//! Grids are stored row-major with dimensions and byte order taken from
//! [`GridInfo`]. An exhausted source yields `Ok(None)` so the caller keeps
//! its previous value.
//!
//! Components depend on the [`InputReader`] trait, with
//! [`FileInputReader`] as the filesystem implementation.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::{Path, PathBuf},
};

use log::debug;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::support::field::Field;

/// How an auxiliary input is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Fixed value from configuration.
    #[default]
    Scalar,
    /// One scalar per time step from a text file.
    TimeSeries,
    /// One fixed grid from a binary file.
    Grid,
    /// One grid per time step from a binary file.
    GridSequence,
}

/// Byte order of binary grid files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    #[default]
    Little,
    Big,
}

/// Spatial layout of the model grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridInfo {
    /// Number of columns (x direction).
    pub ncols: usize,

    /// Number of rows (y direction).
    pub nrows: usize,

    /// Area of one grid cell [m²].
    pub cell_area: f64,

    /// Byte order of binary grid files.
    #[serde(default)]
    pub byte_order: ByteOrder,
}

impl GridInfo {
    /// Total number of grid cells.
    #[must_use]
    pub fn n_cells(&self) -> usize {
        self.ncols * self.nrows
    }
}

/// Errors raised while opening or reading input files.
#[derive(Debug, Error)]
pub enum InputError {
    /// The file could not be opened or read.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A time series line is not a number.
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A grid file ended partway through a grid.
    #[error("{}: truncated grid, expected {expected} bytes, found {found}", path.display())]
    TruncatedGrid {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// A scalar input was treated as a file.
    #[error("scalar inputs have no file to open: {}", path.display())]
    NotAFile { path: PathBuf },
}

/// File access used by components to advance auxiliary inputs.
pub trait InputReader {
    /// An open source for one input.
    type Source;

    /// Opens the file at `path` for reading values of `kind`.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the file cannot be opened or `kind` is
    /// [`InputKind::Scalar`].
    fn open(&mut self, kind: InputKind, path: &Path) -> Result<Self::Source, InputError>;

    /// Reads the next value from `source`, or `None` when it has nothing new.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the data is malformed.
    fn read_next(
        &mut self,
        source: &mut Self::Source,
        grid: &GridInfo,
    ) -> Result<Option<Field>, InputError>;

    /// Releases `source`.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if releasing the source fails.
    fn close(&mut self, source: Self::Source) -> Result<(), InputError>;
}

/// An open input file.
#[derive(Debug)]
pub struct FileSource {
    kind: InputKind,
    path: PathBuf,
    reader: BufReader<File>,
    line: usize,
    exhausted: bool,
}

impl FileSource {
    fn io_error(&self, source: io::Error) -> InputError {
        InputError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn next_scalar(&mut self) -> Result<Option<Field>, InputError> {
        let mut buf = String::new();
        loop {
            buf.clear();
            let n = self
                .reader
                .read_line(&mut buf)
                .map_err(|err| self.io_error(err))?;
            if n == 0 {
                return Ok(None);
            }
            self.line += 1;

            let text = buf.trim();
            if text.is_empty() {
                continue;
            }
            let value = text.parse::<f64>().map_err(|err| InputError::Parse {
                path: self.path.clone(),
                line: self.line,
                message: err.to_string(),
            })?;
            return Ok(Some(Field::Scalar(value)));
        }
    }

    fn next_grid(&mut self, grid: &GridInfo) -> Result<Option<Field>, InputError> {
        let expected = grid.n_cells() * size_of::<f32>();
        let mut bytes = Vec::with_capacity(expected);
        let read = (&mut self.reader)
            .take(expected as u64)
            .read_to_end(&mut bytes);
        read.map_err(|err| self.io_error(err))?;

        if bytes.is_empty() {
            return Ok(None);
        }
        if bytes.len() < expected {
            let found = bytes.len();
            // Rewind so the partial grid is reported again on the next read.
            self.reader
                .seek_relative(-(found as i64))
                .map_err(|err| self.io_error(err))?;
            return Err(InputError::TruncatedGrid {
                path: self.path.clone(),
                expected,
                found,
            });
        }

        let values: Vec<f64> = bytes
            .chunks_exact(size_of::<f32>())
            .map(|chunk| {
                let raw = [chunk[0], chunk[1], chunk[2], chunk[3]];
                let value = match grid.byte_order {
                    ByteOrder::Little => f32::from_le_bytes(raw),
                    ByteOrder::Big => f32::from_be_bytes(raw),
                };
                f64::from(value)
            })
            .collect();

        // Row-major, as written by the grid tools.
        let array = Array2::from_shape_fn((grid.nrows, grid.ncols), |(row, col)| {
            values[row * grid.ncols + col]
        });
        Ok(Some(Field::Grid(array)))
    }
}

/// Reads inputs from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileInputReader;

impl InputReader for FileInputReader {
    type Source = FileSource;

    fn open(&mut self, kind: InputKind, path: &Path) -> Result<FileSource, InputError> {
        if kind == InputKind::Scalar {
            return Err(InputError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("opened {kind:?} input {}", path.display());

        Ok(FileSource {
            kind,
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            line: 0,
            exhausted: false,
        })
    }

    fn read_next(
        &mut self,
        source: &mut FileSource,
        grid: &GridInfo,
    ) -> Result<Option<Field>, InputError> {
        if source.exhausted {
            return Ok(None);
        }

        let value = match source.kind {
            InputKind::Scalar => None,
            InputKind::TimeSeries => source.next_scalar()?,
            InputKind::Grid => {
                let value = source.next_grid(grid)?;
                source.exhausted = true;
                value
            }
            InputKind::GridSequence => source.next_grid(grid)?,
        };

        if value.is_none() {
            debug!("input {} has no further values", source.path.display());
            source.exhausted = true;
        }
        Ok(value)
    }

    fn close(&mut self, source: FileSource) -> Result<(), InputError> {
        debug!("closed input {}", source.path.display());
        Ok(())
    }
}
