pub type RevelaResult<T> = Result<T, RevelaError>;

#[derive(thiserror::Error, Debug)]
pub enum RevelaError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("animation error: {0}")]
    Animation(String),

    #[error("content error: {0}")]
    Content(String),

    #[error("unknown variant '{name}'")]
    UnknownVariant { name: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RevelaError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    pub fn content(msg: impl Into<String>) -> Self {
        Self::Content(msg.into())
    }

    pub fn unknown_variant(name: impl Into<String>) -> Self {
        Self::UnknownVariant { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            RevelaError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            RevelaError::animation("x")
                .to_string()
                .contains("animation error:")
        );
        assert!(
            RevelaError::content("x")
                .to_string()
                .contains("content error:")
        );
        assert_eq!(
            RevelaError::unknown_variant("ghost").to_string(),
            "unknown variant 'ghost'"
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = RevelaError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
