//! Fitness of recurring group assignments.
//!
//! Over as many rounds as there are groups, every user is placed in one group
//! per round. [`Evaluator`] turns such an assignment into a single cost for an
//! external optimizer to minimize, combining three error terms:
//!
//! - **group sizes**: every group should hold about `n_users / n_groups` users
//! - **meetings**: users should share a group with many others, evenly
//! - **foreigners** (optional): each group-round should mix both classes
//!
//! ```
//! use group_fitness::{Assignment, Evaluator, EvaluatorConfig};
//!
//! let config = EvaluatorConfig::new(2, 4).with_foreigners(vec![0, 1, 0, 1]);
//! let evaluator = Evaluator::new(config).unwrap();
//! // rounds [0, 0, 1, 1] and [0, 1, 0, 1]
//! let assignment = Assignment::new(2, 4, vec![0, 0, 1, 1, 0, 1, 0, 1]).unwrap();
//! let terms = evaluator.error_terms(&assignment).unwrap();
//! assert_eq!(terms.group_sizes, 0.0);
//! assert_eq!(terms.meetings, 0.25);
//! assert!(terms.foreigners.is_some());
//! assert!(evaluator.error_total(&assignment).unwrap() > 0.0);
//! ```

pub mod balance;
pub mod error;
pub mod evaluate;
pub mod meeting;
pub mod model;
pub mod stats;

pub use error::{ConfigMismatch, EvaluationError};
pub use evaluate::{ErrorTerms, Evaluator};
pub use model::assignment::Assignment;
pub use model::condition::{EvaluatorConfig, Weights};
pub use model::entity::{GroupId, Index, Score};
