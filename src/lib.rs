//! Generators for AI-engine GemV kernels: lane index schemes, test data and kernel/graph sources
//! rendered from a registry of int8/int16/int32 MAC variants.
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod config;
pub mod data;
pub mod dtype;
pub mod error;
pub mod geometry;
pub mod math;
pub mod params;
pub mod registry;
pub mod render;
pub mod scheme;
pub mod util;

pub use crate::config::{GemvKernel, KernelConfig};
pub use crate::dtype::{DType, Intrinsic};
pub use crate::error::{Error, Result};
pub use crate::params::{ParamValue, Params};
