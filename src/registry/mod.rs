//! The variants of the GemV kernel that can be generated.
//!
//! A variant is looked up by (input dtype, coefficient dtype, intrinsic). It carries the K/N
//! constraints of the instruction sequence, the strategy that renders the kernel body, the
//! default template parameters and the dtype of the kernel output.


use crate::dtype::{DType, Intrinsic};
use crate::error::{require, Error, Result};
use crate::params::Params;
use crate::render::Strategy;
use std::collections::BTreeMap;

pub type VariantKey = (DType, DType, Intrinsic);

/// A registered kernel variant
pub struct Variant {
    /// The dtype of the kernel output
    pub y_dtype: DType,
    /// Checks K and N against the instruction sequence of the variant
    pub validate: fn(usize, usize) -> Result<()>,
    pub strategy: Strategy,
    /// Template parameters used unless overridden
    pub params: Params,
}

impl Variant {
    pub fn validate(&self, k: usize, n: usize) -> Result<()> {
        (self.validate)(k, n)
    }
}

lazy_static! {
    static ref VARIANTS: BTreeMap<VariantKey, Variant> = build_variants();
}

/// Returns the variant registered for the key, or a configuration error.
pub fn lookup(x_dtype: DType, z_dtype: DType, intrinsic: Intrinsic) -> Result<&'static Variant> {
    VARIANTS
        .get(&(x_dtype, z_dtype, intrinsic))
        .ok_or(Error::NoVariant(x_dtype, z_dtype, intrinsic))
}

/// All registered keys in order.
pub fn keys() -> impl Iterator<Item = &'static VariantKey> {
    VARIANTS.keys()
}

fn build_variants() -> BTreeMap<VariantKey, Variant> {
    use self::DType::*;
    use self::Intrinsic::*;

    let mut variants = BTreeMap::new();

    // int16 x int16
    variants.insert(
        (Int16, Int16, Mac16),
        Variant {
            y_dtype: Int16,
            validate: |k, n| {
                require(k == 16, "mac16 int16 needs K=16")?;
                require(n == 16, "N=16")
            },
            strategy: Strategy::Int16Scheme,
            params: Params::new()
                .int("xstart", 0)
                .int("xoffsets_lo", 0x7372_7170)
                .int("xoffsets_hi", 0x7776_7574)
                .int("xsquare", 0x3120)
                .int("zoffsets_lo", 0x0)
                .int("zoffsets_hi", 0x0)
                .int("zstep", 1),
        },
    );
    variants.insert(
        (Int16, Int16, Mac8),
        Variant {
            y_dtype: Int16,
            validate: |k, n| {
                require(k == 16, "mac8 int16 needs K=16")?;
                require(n == 16, "N=16")
            },
            strategy: Strategy::Int16Scheme,
            params: Params::new()
                .int("xstart", 0)
                .int("xoffsets_lo", 0x3332_3130)
                .int("xstep", 16)
                .int("xsquare", 0x3120)
                .int("zoffsets_lo", 0x0)
                .int("zstep", 1),
        },
    );

    // int32 x int32
    variants.insert(
        (Int32, Int32, Lmac8),
        Variant {
            y_dtype: Int32,
            validate: |k, n| {
                require(n == 16, "N=16 for lmac8")?;
                require(k == n, "Use K==N")
            },
            strategy: Strategy::Int32Lmac,
            params: Params::new()
                .int("V", 8)
                .int("parts", 2)
                .int("xoffsets", 0x7654_3210)
                .text("acc_tag", "acc80"),
        },
    );
    variants.insert(
        (Int32, Int32, Lmac4),
        Variant {
            y_dtype: Int32,
            validate: |k, n| {
                require(n == 16, "N=16 for lmac4")?;
                require(k == n, "Use K==N")
            },
            strategy: Strategy::Int32Lmac,
            params: Params::new()
                .int("V", 4)
                .int("parts", 4)
                .int("xoffsets", 0x0000_3210)
                .text("acc_tag", "acc80"),
        },
    );

    // int8 x int8
    variants.insert(
        (Int8, Int8, Mac16),
        Variant {
            y_dtype: Int8,
            validate: |k, n| {
                require(
                    k == 32,
                    "mac16 int8 needs K=32 because z buffer requires 32 elements",
                )?;
                require(n == 16, "N=16")
            },
            strategy: Strategy::Int8Mac16,
            params: Params::new()
                .int("xoffsets_lo", 0x3332_3130)
                .int("xoffs_hi_or_xstep", 32)
                .int("xsquare", 0x3120)
                .int("zstep", 2)
                .text("Q_symbol", "Q")
                .int("xstart_stride", 128)
                .text("mload_expr", "(DTYPE*)&matrix[q][0][0]"),
        },
    );
    variants.insert(
        (Int8, Int8, Mac8),
        Variant {
            // Accumulated halves are written out at 16 bits
            y_dtype: Int16,
            validate: |k, n| {
                require(k == 16, "mac8 int8 needs K=16")?;
                require(n == 16, "N=16")
            },
            strategy: Strategy::Int8Mac8,
            params: Params::new()
                .int("xoffsets", 0x3130)
                .int("xstep", 32)
                .int("xsquare", 0x3120)
                .int("zoffsets", 0x0000)
                .int("zstep", 2)
                .int("zsquare", 0x3210)
                .text("first_block_off", "0")
                .text("second_block_off", "DX*4")
                .int("mask32", 0xFFFF_FF00),
        },
    );

    trace!("Registered {} kernel variants.", variants.len());
    variants
}
