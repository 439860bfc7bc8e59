/// Errors produced by the content-store client.
#[derive(Debug, thiserror::Error)]
pub enum SanityError {
    /// Transport-level failure (connection, TLS, body decoding).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("Content store error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A write was attempted without a configured token.
    #[error("Missing write token (SANITY_WRITE_TOKEN)")]
    MissingToken,

    /// A mutation succeeded but the response carried no document id.
    #[error("Mutation response contained no document id")]
    MissingDocumentId,

    /// An image asset reference did not match `image-<id>-<WxH>-<ext>`.
    #[error("Malformed image asset reference: {0}")]
    MalformedImageRef(String),
}
