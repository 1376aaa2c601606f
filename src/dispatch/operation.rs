use super::DispatchError;
use std::fmt;
use std::str::FromStr;

/// Remote transformations offered by the ML service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    RegularizationCsv,
    RegularizationPng,
    SymmetryLines,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::RegularizationCsv,
        Operation::RegularizationPng,
        Operation::SymmetryLines,
    ];

    /// Text shown on the selector while nothing is chosen.
    pub const UNSET_LABEL: &'static str = "Choose an Option";

    pub fn label(&self) -> &'static str {
        match self {
            Operation::RegularizationCsv => "Get Regularization from CSV",
            Operation::RegularizationPng => "Get Regularization from PNG",
            Operation::SymmetryLines => "Get Symmetry Lines",
        }
    }

    pub fn endpoint_suffix(&self) -> &'static str {
        match self {
            Operation::RegularizationCsv => "regularization_csv",
            Operation::RegularizationPng => "regularization_png",
            Operation::SymmetryLines => "detect_symmetry_png",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Operation {
    type Err = DispatchError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.label() == label)
            .ok_or_else(|| DispatchError::InvalidOption(label.to_string()))
    }
}
