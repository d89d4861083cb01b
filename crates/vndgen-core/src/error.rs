//! Errors raised while reading API descriptions.

/// Malformed input in an API description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Declaration text that does not split into `TYPE NAME`.
    #[error("can't parse declaration `{0}`")]
    Declaration(String),

    /// The registry document is not well-formed XML.
    #[error("{origin}: malformed registry XML: {message}")]
    Xml { origin: String, message: String },

    /// A `<command>` element has no `<proto>` child.
    #[error("{origin}: <command> element without <proto>")]
    MissingProto { origin: String },

    /// A declaration inside a specific registry source failed to parse.
    #[error("{origin}: {inner}")]
    InSource {
        origin: String,
        inner: Box<ParseError>,
    },
}
