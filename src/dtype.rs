use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// An integer element type supported by the vector processor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DType {
    Int8,
    Int16,
    Int32,
}

impl DType {
    pub const ALL: [DType; 3] = [DType::Int8, DType::Int16, DType::Int32];

    /// The name as used by the aie API, eg. `int16`.
    pub fn name(self) -> &'static str {
        match self {
            DType::Int8 => "int8",
            DType::Int16 => "int16",
            DType::Int32 => "int32",
        }
    }
    /// Size of a single element in bytes.
    pub fn size_of(self) -> usize {
        match self {
            DType::Int8 => 1,
            DType::Int16 => 2,
            DType::Int32 => 4,
        }
    }
    pub fn bits(self) -> usize {
        self.size_of() * 8
    }
    /// The largest value an element can hold.
    pub fn max_value(self) -> i64 {
        match self {
            DType::Int8 => i8::max_value() as i64,
            DType::Int16 => i16::max_value() as i64,
            DType::Int32 => i32::max_value() as i64,
        }
    }
    /// The intrinsics that the interactive prompt offers for this type.
    pub fn prompt_intrinsics(self) -> &'static [Intrinsic] {
        match self {
            DType::Int8 | DType::Int16 => &[Intrinsic::Mac8, Intrinsic::Mac16],
            DType::Int32 => &[Intrinsic::Lmac4, Intrinsic::Lmac8],
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DType::ALL
            .iter()
            .cloned()
            .find(|dt| dt.name() == s)
            .ok_or_else(|| Error::UnsupportedDType(s.to_owned()))
    }
}

/// A fused multiply-accumulate intrinsic with its own lane-selection pattern.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Intrinsic {
    Mac8,
    Mac16,
    Lmac4,
    Lmac8,
}

impl Intrinsic {
    pub const ALL: [Intrinsic; 4] = [
        Intrinsic::Mac8,
        Intrinsic::Mac16,
        Intrinsic::Lmac4,
        Intrinsic::Lmac8,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Intrinsic::Mac8 => "mac8",
            Intrinsic::Mac16 => "mac16",
            Intrinsic::Lmac4 => "lmac4",
            Intrinsic::Lmac8 => "lmac8",
        }
    }
    /// Capitalized form used in generated kernel names, eg. `Mac16`.
    pub fn title(self) -> &'static str {
        match self {
            Intrinsic::Mac8 => "Mac8",
            Intrinsic::Mac16 => "Mac16",
            Intrinsic::Lmac4 => "Lmac4",
            Intrinsic::Lmac8 => "Lmac8",
        }
    }
}

impl fmt::Display for Intrinsic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Intrinsic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intrinsic::ALL
            .iter()
            .cloned()
            .find(|i| i.name() == s)
            .ok_or_else(|| Error::UnknownIntrinsic(s.to_owned()))
    }
}
