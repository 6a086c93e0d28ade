use thiserror::Error;

use crate::model::entity::{GroupId, Index};

/// Why an assignment could not be scored or an evaluator could not be built.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EvaluationError {
    #[error("group id {group_id} of user {user} on round {round} is outside 0..{n_groups}")]
    InvalidGroupId { round: Index, user: Index, group_id: GroupId, n_groups: usize },
    #[error("sample of {count} value(s) is too small for a sample standard deviation")]
    InsufficientSampleSize { count: usize },
    #[error("configuration mismatch: {0}")]
    ConfigurationMismatch(#[from] ConfigMismatch),
    #[error("assignment is {rows}x{columns}, expected {expected_rows}x{expected_columns}")]
    ShapeMismatch { expected_rows: usize, expected_columns: usize, rows: usize, columns: usize },
    #[error("{len} cell(s) cannot form a {rows}x{columns} matrix")]
    MalformedMatrix { rows: usize, columns: usize, len: usize },
    #[error("a {rows}x{columns} matrix does not fit in memory")]
    MatrixTooLarge { rows: usize, columns: usize },
}

/// Inconsistency in an [`EvaluatorConfig`](crate::model::condition::EvaluatorConfig).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigMismatch {
    #[error("at least one group is required")]
    NoGroups,
    #[error("at least one user is required")]
    NoUsers,
    #[error("{actual} foreigner flag(s) given for {expected} user(s)")]
    ForeignerCount { expected: usize, actual: usize },
    #[error("foreigner flag of user {user} is {value}, expected 0 or 1")]
    ForeignerFlag { user: Index, value: u8 },
    #[error("{actual} weight(s) given, {expected} error term(s) configured")]
    WeightCount { expected: usize, actual: usize },
}
