use crate::error::Result;
use crate::util::read_file_as_ints;
use std::fmt;
use std::path::Path;

/// The number of mismatches reported individually
const MAX_REPORTED: usize = 10;

/// A mismatching element: (position, expected, simulated)
pub type Mismatch = (usize, i64, i64);

/// The outcome of an exact element-wise comparison of expected and simulated outputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Comparison {
    pub expected_len: usize,
    pub simulated_len: usize,
    pub num_mismatches: usize,
    /// The first few mismatches
    pub mismatches: Vec<Mismatch>,
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        self.expected_len == self.simulated_len && self.num_mismatches == 0
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_match() {
            return write!(f, "PASS: all {} values match", self.expected_len);
        }
        if self.expected_len != self.simulated_len {
            writeln!(
                f,
                "length mismatch: expected {} values, simulated {}",
                self.expected_len, self.simulated_len
            )?;
        }
        write!(f, "FAIL: {} mismatching values", self.num_mismatches)?;
        for &(idx, expected, simulated) in self.mismatches.iter() {
            write!(
                f,
                "\n  [{}] expected {}, got {}",
                idx, expected, simulated
            )?;
        }
        Ok(())
    }
}

/// Compares the overlapping prefix of `expected` and `simulated` exactly.
pub fn compare(expected: &[i64], simulated: &[i64]) -> Comparison {
    let mismatching = expected
        .iter()
        .zip(simulated.iter())
        .enumerate()
        .filter(|&(_, (e, s))| e != s)
        .map(|(idx, (&e, &s))| (idx, e, s));

    let mut num_mismatches = 0;
    let mut mismatches = Vec::new();
    for m in mismatching {
        if mismatches.len() < MAX_REPORTED {
            mismatches.push(m);
        }
        num_mismatches += 1;
    }

    Comparison {
        expected_len: expected.len(),
        simulated_len: simulated.len(),
        num_mismatches,
        mismatches,
    }
}

/// Reads both text files and compares them.
pub fn compare_files<P, Q>(expected: P, simulated: Q) -> Result<Comparison>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let expected = read_file_as_ints(expected)?;
    let simulated = read_file_as_ints(simulated)?;
    let comparison = compare(&expected, &simulated);
    debug!(
        "Compared {} expected to {} simulated values, {} mismatches.",
        comparison.expected_len, comparison.simulated_len, comparison.num_mismatches
    );
    Ok(comparison)
}
