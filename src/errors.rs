//! Error-related types.
//!
//! Problems found *in* a package document are never errors in this sense;
//! they are reported as [`Diagnostic`](crate::Diagnostic)s.
//! The types here cover failures of the surrounding machinery.

/// Alias for `Result<T, OpfError>`.
pub type OpfResult<T> = Result<T, OpfError>;

/// Unified error type.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum OpfError {
    /// The package document is not well-formed XML and could not be streamed.
    #[error("Unparsable package document at byte {position}: {source}")]
    Xml {
        /// Byte offset at which the reader gave up.
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    /// A collaborator rejected an argument.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}

/// Rejection of an argument passed to a
/// [`ReferenceGraph`](crate::xref::ReferenceGraph).
#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    /// A resource with the same path has already been registered.
    #[error("duplicate resource: {0}")]
    DuplicateResource(String),

    /// A reference or anchor targets a resource that was never registered.
    #[error("unregistered resource: {0}")]
    UnregisteredResource(String),
}
