//! Random test data for a GemV kernel run.
//!
//! A matrix `M` (DX x DY) and `time_steps` input vectors `X` (time_steps x DX) are drawn
//! uniformly from `[0, max_value)`. The expected output `X * M` is computed exactly. The inputs
//! and the expected output are written as text for the PLIO ports, and the matrix is embedded
//! into `matrix.h` split into Q interleaved row blocks.

mod compare;

pub use self::compare::*;

use crate::dtype::DType;
use crate::error::{require, Error, Result};
use crate::math::mtx_mul;
use crate::util::*;
use itertools::Itertools;
use ndarray::{s, Array2};
use rand::Rng;
use std::path::Path;

pub const X_FILE: &str = "data/x.txt";
pub const Y_EXP_FILE: &str = "data/y_exp.txt";
pub const Y_SIM_FILE: &str = "data/y_sim.txt";
pub const MATRIX_HEADER_FILE: &str = "matrix.h";

/// Dimensions and value range of the generated data
#[derive(Clone, Debug, PartialEq)]
pub struct DataParams {
    pub dtype: DType,
    pub time_steps: usize,
    /// Number of inputs
    pub dx: usize,
    /// Number of outputs
    pub dy: usize,
    /// Number of lanes
    pub dv: usize,
    /// Number of splits along DX
    pub q: usize,
    /// Values are drawn from [0, max_value)
    pub max_value: i64,
    /// Width of the PLIO port the text files feed
    pub plio_bits: usize,
}

impl Default for DataParams {
    fn default() -> DataParams {
        DataParams {
            dtype: DType::Int32,
            time_steps: 20,
            dx: 16,
            dy: 16,
            dv: 8,
            q: 2,
            max_value: 10,
            plio_bits: 128,
        }
    }
}

impl DataParams {
    /// The number of values on one line of a PLIO text file.
    pub fn values_per_line(&self) -> usize {
        self.plio_bits / self.dtype.bits()
    }

    pub fn validate(&self) -> Result<()> {
        require(
            self.time_steps > 0 && self.dx > 0 && self.dy > 0,
            "time steps, DX and DY must be nonzero",
        )?;
        require(
            self.q > 0 && self.dx % self.q == 0,
            &format!("DX ({}) must be a multiple of Q ({})", self.dx, self.q),
        )?;
        require(
            self.max_value > 0 && self.max_value - 1 <= self.dtype.max_value(),
            &format!(
                "max value ({}) must be in 1..={} for {}",
                self.max_value,
                self.dtype.max_value() + 1,
                self.dtype
            ),
        )?;
        require(
            self.plio_bits > 0 && self.plio_bits % self.dtype.bits() == 0,
            &format!(
                "PLIO width ({}) must be a multiple of {} bits",
                self.plio_bits,
                self.dtype.bits()
            ),
        )?;
        let largest = self.max_value - 1;
        require(
            largest
                .checked_mul(largest)
                .and_then(|p| p.checked_mul(self.dx as i64))
                .is_some(),
            &format!(
                "DX ({}) products of values below {} overflow the expected output",
                self.dx, self.max_value
            ),
        )?;
        let per_line = self.values_per_line();
        require(
            self.dx % per_line == 0 && self.dy % per_line == 0,
            &format!(
                "DX ({}) and DY ({}) must be multiples of the {} values per PLIO line",
                self.dx, self.dy, per_line
            ),
        )
    }
}

/// A generated matrix with its inputs and expected outputs.
#[derive(Clone, Debug)]
pub struct GemvData {
    params: DataParams,
    matrix: Array2<i64>,
    x: Array2<i64>,
    y_exp: Array2<i64>,
}

impl GemvData {
    /// Draws a matrix and inputs from `rng` and computes the expected output.
    pub fn generate<R: Rng>(params: DataParams, rng: &mut R) -> Result<GemvData> {
        params.validate()?;
        let max_value = params.max_value;

        let matrix = Array2::from_shape_fn((params.dx, params.dy), |_| rng.gen_range(0..max_value));
        let x = Array2::from_shape_fn((params.time_steps, params.dx), |_| {
            rng.gen_range(0..max_value)
        });
        debug!(
            "Generated a {}x{} matrix and {} input vectors.",
            params.dx, params.dy, params.time_steps
        );
        GemvData::from_parts(params, matrix, x)
    }

    /// Computes the expected output for a given matrix and inputs.
    pub fn from_parts(params: DataParams, matrix: Array2<i64>, x: Array2<i64>) -> Result<GemvData> {
        params.validate()?;
        require(
            matrix.dim() == (params.dx, params.dy) && x.dim() == (params.time_steps, params.dx),
            "matrix and inputs do not match the data dimensions",
        )?;

        let lhs = x.iter().cloned().collect::<Vec<i64>>();
        let rhs = matrix.iter().cloned().collect::<Vec<i64>>();
        let y = mtx_mul(&lhs, &rhs, params.time_steps, params.dx, params.dy);
        let y_exp = Array2::from_shape_vec((params.time_steps, params.dy), y)
            .map_err(|e| Error::Geometry(e.to_string()))?;

        Ok(GemvData {
            params,
            matrix,
            x,
            y_exp,
        })
    }

    pub fn params(&self) -> &DataParams {
        &self.params
    }
    pub fn matrix(&self) -> &Array2<i64> {
        &self.matrix
    }
    pub fn x(&self) -> &Array2<i64> {
        &self.x
    }
    pub fn y_exp(&self) -> &Array2<i64> {
        &self.y_exp
    }

    /// The inputs regrouped to one PLIO word per line.
    pub fn x_text(&self) -> Result<String> {
        self.port_text(&self.x)
    }
    /// The expected outputs regrouped to one PLIO word per line.
    pub fn y_exp_text(&self) -> Result<String> {
        self.port_text(&self.y_exp)
    }

    fn port_text(&self, values: &Array2<i64>) -> Result<String> {
        let per_line = self.params.values_per_line();
        let reshaped = values
            .view()
            .into_shape((values.len() / per_line, per_line))
            .map_err(|e| Error::Geometry(e.to_string()))?;
        Ok(reshaped
            .outer_iter()
            .map(|row| format!("{}\n", row.iter().join(" ")))
            .collect())
    }

    /// Renders the C header embedding the matrix as `matrix[Q][DX/Q][DY]`, where block `q`
    /// holds the rows `q, q+Q, q+2Q, ...`.
    pub fn matrix_header(&self) -> String {
        let p = &self.params;
        let rows_per_mat = p.dx / p.q;
        let mat_concat = (0..p.q).map(|i| format!("m[{}]", i)).join(",");

        let blocks = (0..p.q)
            .map(|q| {
                let sub_mat = self.matrix.slice(s![q..;p.q, ..]);
                let rows = sub_mat
                    .outer_iter()
                    .map(|row| format!("        {{{}}}", row.iter().join(", ")))
                    .join(",\n");
                format!("    {{ // matrix block {}\n{}\n    }}", q, rows)
            })
            .join(",\n");

        format!(
            "
#ifndef MATRIX_H
#define MATRIX_H
#define DTYPE {dtype}
#define DX {dx}
#define DY {dy}
#define DV {dv}
#define Q {q}
#define MQS {mqs}

alignas(32) const DTYPE matrix[{q}][{rows}][{dy}] = {{
{blocks}
}};

#endif // MATRIX_H
",
            dtype = p.dtype,
            dx = p.dx,
            dy = p.dy,
            dv = p.dv,
            q = p.q,
            mqs = mat_concat,
            rows = rows_per_mat,
            blocks = blocks,
        )
    }

    /// Writes `data/x.txt`, `data/y_exp.txt` and `matrix.h` under `out_dir`.
    pub fn write_all<P: AsRef<Path>>(&self, out_dir: P) -> Result<()> {
        let out_dir = out_dir.as_ref();
        write_file(out_dir.join(X_FILE), &self.x_text()?)?;
        write_file(out_dir.join(Y_EXP_FILE), &self.y_exp_text()?)?;
        write_file(out_dir.join(MATRIX_HEADER_FILE), &self.matrix_header())?;
        info!(
            "Wrote {}, {} and {} to {}",
            X_FILE,
            Y_EXP_FILE,
            MATRIX_HEADER_FILE,
            out_dir.display()
        );
        Ok(())
    }
}
