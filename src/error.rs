pub type BoothResult<T> = Result<T, BoothError>;

#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    #[error("decode error: photo {index} failed to decode: {reason}")]
    Decode { index: usize, reason: String },

    #[error("empty input: no photos supplied")]
    EmptyInput,

    #[error("photo count mismatch: layout expects {expected} photos, got {actual}")]
    PhotoCountMismatch { expected: usize, actual: usize },

    #[error("unsupported layout: unknown grid type '{0}'")]
    UnsupportedLayout(String),

    #[error(
        "dimension mismatch: photo {index} is {actual_w}x{actual_h}, expected {expected_w}x{expected_h}"
    )]
    DimensionMismatch {
        index: usize,
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("export error: {0}")]
    Export(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    pub fn decode(index: usize, reason: impl Into<String>) -> Self {
        Self::Decode {
            index,
            reason: reason.into(),
        }
    }

    pub fn unsupported_layout(grid: impl Into<String>) -> Self {
        Self::UnsupportedLayout(grid.into())
    }

    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColor(msg.into())
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            BoothError::decode(2, "bad header")
                .to_string()
                .contains("photo 2")
        );
        assert!(
            BoothError::unsupported_layout("hex-grid")
                .to_string()
                .contains("unsupported layout:")
        );
        assert!(
            BoothError::invalid_color("#ZZZ")
                .to_string()
                .contains("invalid color:")
        );
        assert!(
            BoothError::export("disk full")
                .to_string()
                .contains("export error:")
        );
    }

    #[test]
    fn count_mismatch_reports_both_sides() {
        let msg = BoothError::PhotoCountMismatch {
            expected: 6,
            actual: 4,
        }
        .to_string();
        assert!(msg.contains('6') && msg.contains('4'));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = BoothError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
