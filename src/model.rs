pub mod entity {
    pub type Index = usize;
    pub type GroupId = usize;

    pub type Score = f64;
}


pub mod assignment {
    use super::entity::{GroupId, Index};
    use crate::error::EvaluationError;

    /// Rounds × users grid of group ids, stored row-major.
    ///
    /// Row `r` is the partition of all users on round `r`; column `u` follows
    /// user `u` across rounds.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct Assignment {
        rows: usize,
        columns: usize,
        data: Vec<GroupId>,
    }

    impl Assignment {
        pub fn new(rows: usize, columns: usize, data: Vec<GroupId>) -> Result<Assignment, EvaluationError> {
            if rows.checked_mul(columns) != Some(data.len()) {
                return Err(EvaluationError::MalformedMatrix { rows, columns, len: data.len() });
            }
            Ok(Assignment { rows, columns, data })
        }

        pub fn from_rows<R: AsRef<[GroupId]>>(rows: &[R]) -> Result<Assignment, EvaluationError> {
            let columns = rows.first().map_or(0, |row| row.as_ref().len());
            let data: Vec<GroupId> = rows.iter().flat_map(|row| row.as_ref().iter().copied()).collect();
            Assignment::new(rows.len(), columns, data)
        }

        pub fn filled(rows: usize, columns: usize, group: GroupId) -> Result<Assignment, EvaluationError> {
            let len = rows.checked_mul(columns).ok_or(EvaluationError::MatrixTooLarge { rows, columns })?;
            Ok(Assignment { rows, columns, data: vec![group; len] })
        }

        pub fn rows(&self) -> usize {
            self.rows
        }

        pub fn columns(&self) -> usize {
            self.columns
        }

        /// Group ids of every user on round `row`, or `None` past the last round.
        pub fn row(&self, row: Index) -> Option<&[GroupId]> {
            if row >= self.rows {
                return None;
            }
            let start = row * self.columns;
            self.data.get(start..start + self.columns)
        }

        pub fn iter_rows(&self) -> impl Iterator<Item = &[GroupId]> + '_ {
            (0..self.rows).map(move |row| &self.data[row * self.columns..(row + 1) * self.columns])
        }

        pub fn get(&self, row: Index, column: Index) -> Option<GroupId> {
            self.row(row)?.get(column).copied()
        }

        /// Overwrites one cell and returns the previous group id.
        pub fn set(&mut self, row: Index, column: Index, group: GroupId) -> Option<GroupId> {
            if row >= self.rows || column >= self.columns {
                return None;
            }
            let cell = &mut self.data[row * self.columns + column];
            Some(std::mem::replace(cell, group))
        }
    }
}

pub mod condition {
    use serde::{Deserialize, Serialize};

    /// Per-term weights, ordered `[group sizes, meetings, foreigners?]`.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Weights(pub Vec<f64>);

    impl Weights {
        pub fn uniform(n_terms: usize) -> Weights {
            Weights(vec![1.0 / n_terms as f64; n_terms])
        }

        pub fn as_slice(&self) -> &[f64] {
            &self.0
        }

        pub fn len(&self) -> usize {
            self.0.len()
        }

        pub fn is_empty(&self) -> bool {
            self.0.is_empty()
        }
    }

    /// Construction-time settings of an [`Evaluator`](crate::evaluate::Evaluator).
    ///
    /// Loadable from JSON or any other serde format. `foreigners` holds one
    /// `0`/`1` flag per user; `alphas` falls back to uniform weights.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct EvaluatorConfig {
        pub n_groups: usize,
        pub n_users: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub foreigners: Option<Vec<u8>>,
        #[serde(default, alias = "weights", skip_serializing_if = "Option::is_none")]
        pub alphas: Option<Vec<f64>>,
    }

    impl EvaluatorConfig {
        pub fn new(n_groups: usize, n_users: usize) -> EvaluatorConfig {
            EvaluatorConfig { n_groups, n_users, foreigners: None, alphas: None }
        }

        pub fn with_foreigners(mut self, foreigners: Vec<u8>) -> EvaluatorConfig {
            self.foreigners = Some(foreigners);
            self
        }

        pub fn with_alphas(mut self, alphas: Vec<f64>) -> EvaluatorConfig {
            self.alphas = Some(alphas);
            self
        }

        /// Number of error terms the aggregate will combine.
        pub fn n_terms(&self) -> usize {
            if self.foreigners.is_some() { 3 } else { 2 }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::assignment::Assignment;
    use super::condition::{EvaluatorConfig, Weights};
    use crate::error::EvaluationError;

    #[test]
    fn rows_are_row_major_views() {
        let assignment = Assignment::new(2, 3, vec![0, 1, 1, 2, 2, 0]).unwrap();
        assert_eq!(assignment.row(0), Some(&[0, 1, 1][..]));
        assert_eq!(assignment.row(1), Some(&[2, 2, 0][..]));
        assert_eq!(assignment.row(2), None);
        assert_eq!(assignment.get(1, 2), Some(0));
        assert_eq!(assignment.get(0, 3), None);
        assert_eq!(assignment.iter_rows().count(), 2);
    }

    #[test]
    fn malformed_data_is_rejected() {
        assert_eq!(
            Assignment::new(2, 3, vec![0; 5]),
            Err(EvaluationError::MalformedMatrix { rows: 2, columns: 3, len: 5 })
        );
        assert_eq!(
            Assignment::from_rows(&[vec![0usize, 1], vec![1]]),
            Err(EvaluationError::MalformedMatrix { rows: 2, columns: 2, len: 3 })
        );
    }

    #[test]
    fn set_returns_previous_group() {
        let mut assignment = Assignment::filled(2, 2, 0).unwrap();
        assert_eq!(assignment.set(1, 1, 1), Some(0));
        assert_eq!(assignment.get(1, 1), Some(1));
        assert_eq!(assignment.set(2, 0, 1), None);
    }

    #[test]
    fn zero_width_rows_are_empty() {
        let assignment = Assignment::filled(3, 0, 0).unwrap();
        assert!(assignment.iter_rows().all(|row| row.is_empty()));
        assert_eq!(assignment.row(2), Some(&[][..]));
    }

    #[test]
    fn oversized_fill_is_rejected() {
        assert_eq!(
            Assignment::filled(usize::MAX, 2, 0),
            Err(EvaluationError::MatrixTooLarge { rows: usize::MAX, columns: 2 })
        );
    }

    #[test]
    fn uniform_weights_sum_to_one() {
        let weights = Weights::uniform(3);
        assert_eq!(weights.len(), 3);
        assert!(!weights.is_empty());
        assert!(Weights(vec![]).is_empty());
        assert!((weights.as_slice().iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(EvaluatorConfig::new(2, 4).n_terms(), 2);
        assert_eq!(EvaluatorConfig::new(2, 4).with_foreigners(vec![0, 1, 0, 1]).n_terms(), 3);
    }
}
