//! Renders the kernel and graph sources of a resolved GemV variant.
//!
//! The kernel body is produced by the strategy of the variant from its merged template
//! parameters, and is preceded by the common preamble. The graph wires the kernel between two
//! file-backed PLIO ports.

mod graph;
mod int16;
mod int32;
mod int8;
pub mod standalone;
#[cfg(test)]
mod test;

pub use self::graph::{render_graph_cpp, render_kernels_h};

use crate::config::{GemvKernel, KernelConfig};
use crate::dtype::Intrinsic;
use crate::error::{Error, Result};
use crate::params::Params;
use std::fs;
use std::path::Path;

pub const KERNELS_CC: &str = "kernels.cc";
pub const KERNELS_H: &str = "kernels.h";
pub const GRAPH_CPP: &str = "graph.cpp";

const PREAMBLE: &str = "#include <adf.h>
#include \"adf/window/window.h\"
#include \"aie_api/aie.hpp\"
#include \"aie_api/aie_adf.hpp\"
#include \"matrix.h\"

";

/// The instruction sequence a variant is rendered with
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// 16b x 16b mac16/mac8 over concatenated matrix blocks
    Int16Scheme,
    /// 32b lmac8 halves or lmac4 quarters
    Int32Lmac,
    /// 8b mac16 over 128-element tiles
    Int8Mac16,
    /// 8b mac8 in two masked halves
    Int8Mac8,
}

impl Strategy {
    /// Renders the kernel function body.
    pub fn render(self, kernel: &GemvKernel, params: &Params) -> Result<String> {
        match self {
            Strategy::Int16Scheme => int16::render_scheme(kernel, params),
            Strategy::Int32Lmac => int32::render_lmac(kernel, params),
            Strategy::Int8Mac16 => int8::render_mac16(kernel, params),
            Strategy::Int8Mac8 => int8::render_mac8(kernel, params),
        }
    }
}

/// Renders the complete `kernels.cc`.
pub fn render_kernels_cc(kernel: &GemvKernel) -> Result<String> {
    let params = kernel.params();
    let body = kernel.variant.strategy.render(kernel, &params)?;
    Ok(format!("{}{}", PREAMBLE, body))
}

/// Resolves `cfg` and renders the kernel and graph sources.
pub fn render(cfg: KernelConfig) -> Result<(String, String)> {
    let kernel = cfg.finalize()?;
    Ok((render_kernels_cc(&kernel)?, render_graph_cpp(&kernel)))
}

/// Renders every source of `kernel` into `out_dir`, creating the directory if needed.
pub fn write_all<P: AsRef<Path>>(kernel: &GemvKernel, out_dir: P) -> Result<()> {
    let out_dir = out_dir.as_ref();
    // Render everything before touching the disk
    let kernels_cc = render_kernels_cc(kernel)?;
    let kernels_h = render_kernels_h(kernel);
    let graph_cpp = render_graph_cpp(kernel);

    fs::create_dir_all(out_dir)?;
    fs::write(out_dir.join(KERNELS_CC), kernels_cc)?;
    fs::write(out_dir.join(KERNELS_H), kernels_h)?;
    fs::write(out_dir.join(GRAPH_CPP), graph_cpp)?;
    info!(
        "Wrote {}, {} and {} of {} to {}",
        KERNELS_CC,
        KERNELS_H,
        GRAPH_CPP,
        kernel.kernel_name,
        out_dir.display()
    );
    Ok(())
}

/// Fails unless the kernel was configured with one of the intrinsics a strategy implements.
fn expect_intrinsic(
    kernel: &GemvKernel,
    accepted: &[Intrinsic],
    strategy: &'static str,
    supported: &'static str,
) -> Result<()> {
    if accepted.contains(&kernel.intrinsic) {
        Ok(())
    } else {
        Err(Error::UnsupportedIntrinsic {
            strategy,
            supported,
        })
    }
}
