//! Town error type.

use thiserror::Error;

use et_core::NodeId;

/// Errors produced by `et-town`.
#[derive(Debug, Error)]
pub enum TownError {
    #[error("node {0} not found in town")]
    NodeNotFound(NodeId),

    #[error("invalid edge {from} -> {to}: {reason}")]
    InvalidEdge { from: NodeId, to: NodeId, reason: &'static str },
}

pub type TownResult<T> = Result<T, TownError>;
