//! Error type of the crate.

/// Error of all fallible operations in the crate. Wrong answers are not
/// errors: validation returns plain booleans, errors are reserved for
/// malformed input and inapplicable operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid note name: '{0}'")]
    InvalidNote(String),
    #[error("invalid interval: '{0}'")]
    InvalidInterval(String),
    #[error("unsupported scale type: '{0}'")]
    UnsupportedScaleType(String),
    #[error("invalid chord symbol: '{0}'")]
    InvalidChord(String),
    #[error("invalid progression step: '{0}'")]
    InvalidStep(String),
    #[error("inversion '{code}' needs {required} chord tones, got {tones}")]
    InvalidInversion {
        code: &'static str,
        required: usize,
        tones: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

// --------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            Error::InvalidNote("X9".to_string()).to_string(),
            "invalid note name: 'X9'"
        );
        assert_eq!(
            Error::InvalidInversion {
                code: "64",
                required: 3,
                tones: 2
            }
            .to_string(),
            "inversion '64' needs 3 chord tones, got 2"
        );
    }
}
