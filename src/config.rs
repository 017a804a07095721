use crate::dtype::{DType, Intrinsic};
use crate::error::Result;
use crate::params::{ParamValue, Params};
use crate::registry::{self, Variant};

pub const DEFAULT_K: usize = 16;
pub const DEFAULT_N: usize = 16;
pub const DEFAULT_GRAPH_NAME: &str = "simpleGraph";
/// The number of graph iterations, one per generated input time step
pub const DEFAULT_ITERATIONS: usize = 20;

/// A request for a GemV kernel, possibly with unresolved defaults.
#[derive(Clone, Debug)]
pub struct KernelConfig {
    pub x_dtype: DType,
    pub z_dtype: DType,
    pub intrinsic: Intrinsic,
    /// Number of inputs
    pub k: usize,
    /// Number of outputs
    pub n: usize,
    pub y_dtype: Option<DType>,
    pub kernel_name: Option<String>,
    pub graph_name: String,
    pub iterations: usize,
    pub overrides: Params,
}

impl KernelConfig {
    pub fn new(x_dtype: DType, z_dtype: DType, intrinsic: Intrinsic) -> KernelConfig {
        KernelConfig {
            x_dtype,
            z_dtype,
            intrinsic,
            k: DEFAULT_K,
            n: DEFAULT_N,
            y_dtype: None,
            kernel_name: None,
            graph_name: DEFAULT_GRAPH_NAME.to_owned(),
            iterations: DEFAULT_ITERATIONS,
            overrides: Params::new(),
        }
    }
    pub fn with_geometry(mut self, k: usize, n: usize) -> KernelConfig {
        self.k = k;
        self.n = n;
        self
    }
    pub fn with_override(mut self, key: &str, value: ParamValue) -> KernelConfig {
        self.overrides.insert(key, value);
        self
    }

    /// Resolves the variant, validates K/N against it and fills in the output dtype and kernel
    /// name where they were left out.
    pub fn finalize(self) -> Result<GemvKernel> {
        let variant = registry::lookup(self.x_dtype, self.z_dtype, self.intrinsic)?;
        variant.validate(self.k, self.n)?;

        let y_dtype = self.y_dtype.unwrap_or(variant.y_dtype);
        let kernel_name = match self.kernel_name {
            Some(name) => name,
            None => format!(
                "GemV_{}_{}_{}",
                self.x_dtype,
                self.z_dtype,
                self.intrinsic.title()
            ),
        };
        debug!(
            "Resolved kernel {} with K: {}, N: {}, output: {}.",
            kernel_name, self.k, self.n, y_dtype
        );

        Ok(GemvKernel {
            x_dtype: self.x_dtype,
            z_dtype: self.z_dtype,
            intrinsic: self.intrinsic,
            k: self.k,
            n: self.n,
            y_dtype,
            kernel_name,
            graph_name: self.graph_name,
            iterations: self.iterations,
            overrides: self.overrides,
            variant,
        })
    }
}

/// A validated kernel configuration with every default resolved.
pub struct GemvKernel {
    pub x_dtype: DType,
    pub z_dtype: DType,
    pub intrinsic: Intrinsic,
    pub k: usize,
    pub n: usize,
    pub y_dtype: DType,
    pub kernel_name: String,
    pub graph_name: String,
    pub iterations: usize,
    pub overrides: Params,
    pub variant: &'static Variant,
}

impl GemvKernel {
    /// The variant defaults with the overrides applied on top.
    pub fn params(&self) -> Params {
        self.variant.params.merged(&self.overrides)
    }
}
