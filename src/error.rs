#[derive(Debug, Clone, PartialEq)]
pub enum AliasError {
    /// No weights were supplied.
    Empty,
    /// A weight is negative, `NaN` or infinite.
    InvalidWeight { index: usize, value: f64 },
    /// The weights sum to zero or overflow to a non-finite total.
    InvalidTotal { total: f64 },
    /// Table columns handed back to [`AliasTable::from_parts`](crate::AliasTable::from_parts)
    /// do not form a valid table.
    Malformed { reason: &'static str },
}

impl std::fmt::Display for AliasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AliasError::Empty => write!(f, "no weights provided"),
            AliasError::InvalidWeight { index, value } => {
                write!(
                    f,
                    "weight at index {index} must be finite and non-negative, got {value}"
                )
            }
            AliasError::InvalidTotal { total } => {
                write!(f, "sum of weights must be finite and positive, got {total}")
            }
            AliasError::Malformed { reason } => write!(f, "malformed alias table: {reason}"),
        }
    }
}

impl std::error::Error for AliasError {}
