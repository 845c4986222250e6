use thiserror::Error;

use crate::document::NodeId;

/// Errors returned by document operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("node {0} is not in the document")]
    NodeNotFound(NodeId),
    #[error("node {0} cannot receive focus")]
    NotFocusable(NodeId),
    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("the document root cannot be removed")]
    RemoveRoot,
}

/// Errors produced while parsing a key combo such as `"ctrl+n"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key combo")]
    Empty,
    #[error("unknown key '{0}'")]
    UnknownKey(String),
    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),
}
