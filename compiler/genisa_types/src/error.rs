//! Type token errors.

/// Error produced when a type token is not part of the vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum TypeParseError {
    /// The token is not a concrete type, family keyword, `family:default`
    /// form, or back-reference index.
    #[error("unknown type `{0}`")]
    UnknownType(String),
}

impl TypeParseError {
    pub(crate) fn unknown(token: &str) -> Self {
        TypeParseError::UnknownType(token.to_owned())
    }
}
