use itertools::Itertools;
use tracing::{debug, trace};

use crate::balance::ClassCount;
use crate::error::{ConfigMismatch, EvaluationError};
use crate::meeting::MeetingSets;
use crate::model::assignment::Assignment;
use crate::model::condition::{EvaluatorConfig, Weights};
use crate::model::entity::Score;
use crate::stats::{mean_abs_deviation, Spread};

/// The individual error terms of one assignment, before weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorTerms {
    pub group_sizes: Score,
    pub meetings: Score,
    /// `None` unless foreigner flags are configured.
    pub foreigners: Option<Score>,
}

impl ErrorTerms {
    /// Terms in weight order: group sizes, meetings, then foreigners if present.
    pub fn values(&self) -> impl Iterator<Item = Score> {
        [Some(self.group_sizes), Some(self.meetings), self.foreigners].into_iter().flatten()
    }

    /// Weighted sum of the terms.
    ///
    /// Fails when there are fewer weights than active terms; extra weights
    /// are ignored.
    pub fn weighted(&self, weights: &Weights) -> Result<Score, EvaluationError> {
        let n_terms = self.values().count();
        if weights.len() < n_terms {
            return Err(ConfigMismatch::WeightCount { expected: n_terms, actual: weights.len() }.into());
        }
        Ok(self
            .values()
            .zip(weights.as_slice())
            .map(|(error, weight)| error * weight)
            .sum())
    }
}

/// Scores group assignments; configured once and reused for every candidate.
///
/// An assignment has one row per round and one column per user. There are as
/// many rounds as groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluator {
    n_groups: usize,
    n_users: usize,
    foreigners: Option<Vec<bool>>,
    weights: Weights,
}

impl Evaluator {
    pub fn new(config: EvaluatorConfig) -> Result<Evaluator, EvaluationError> {
        if config.n_groups == 0 {
            return Err(ConfigMismatch::NoGroups.into());
        }
        if config.n_users == 0 {
            return Err(ConfigMismatch::NoUsers.into());
        }
        let n_terms = config.n_terms();

        let foreigners = config
            .foreigners
            .map(|flags| {
                if flags.len() != config.n_users {
                    return Err(ConfigMismatch::ForeignerCount { expected: config.n_users, actual: flags.len() });
                }
                flags
                    .iter()
                    .enumerate()
                    .map(|(user, &value)| match value {
                        0 => Ok(false),
                        1 => Ok(true),
                        _ => Err(ConfigMismatch::ForeignerFlag { user, value }),
                    })
                    .collect::<Result<Vec<bool>, _>>()
            })
            .transpose()?;

        let weights = match config.alphas {
            Some(alphas) if alphas.len() == n_terms => Weights(alphas),
            Some(alphas) => {
                return Err(ConfigMismatch::WeightCount { expected: n_terms, actual: alphas.len() }.into())
            }
            None => Weights::uniform(n_terms),
        };

        debug!(
            n_groups = config.n_groups,
            n_users = config.n_users,
            foreigners = foreigners.is_some(),
            weights = ?weights.as_slice(),
            "configured evaluator"
        );

        Ok(Evaluator { n_groups: config.n_groups, n_users: config.n_users, foreigners, weights })
    }

    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    /// One round per group.
    pub fn n_rounds(&self) -> usize {
        self.n_groups
    }

    pub fn n_users(&self) -> usize {
        self.n_users
    }

    pub fn foreigners(&self) -> Option<&[bool]> {
        self.foreigners.as_deref()
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Effective configuration, defaulted weights included.
    pub fn config(&self) -> EvaluatorConfig {
        EvaluatorConfig {
            n_groups: self.n_groups,
            n_users: self.n_users,
            foreigners: self.foreigners.as_ref().map(|flags| flags.iter().map(|&f| u8::from(f)).collect()),
            alphas: Some(self.weights.0.clone()),
        }
    }

    /// Checks the assignment is `n_rounds × n_users` with every id in `0..n_groups`.
    pub fn check(&self, assignment: &Assignment) -> Result<(), EvaluationError> {
        if assignment.rows() != self.n_rounds() || assignment.columns() != self.n_users {
            return Err(EvaluationError::ShapeMismatch {
                expected_rows: self.n_rounds(),
                expected_columns: self.n_users,
                rows: assignment.rows(),
                columns: assignment.columns(),
            });
        }
        for (round, day) in assignment.iter_rows().enumerate() {
            if let Some((user, &group_id)) = day.iter().find_position(|&&group| group >= self.n_groups) {
                return Err(EvaluationError::InvalidGroupId { round, user, group_id, n_groups: self.n_groups });
            }
        }
        Ok(())
    }

    /// Mean absolute deviation of the normalized group occupancies from 1,
    /// plus their sample standard deviation.
    pub fn error_group_sizes(&self, assignment: &Assignment) -> Result<Score, EvaluationError> {
        self.check(assignment)?;
        self.group_sizes(assignment)
    }

    /// `1 - mean + std` of the per-user meeting fractions.
    pub fn error_meetings(&self, assignment: &Assignment) -> Result<Score, EvaluationError> {
        self.check(assignment)?;
        self.meetings(assignment)
    }

    /// `mean + std` of the per group-round class imbalance, or `None` when no
    /// foreigner flags are configured.
    pub fn error_foreigners(&self, assignment: &Assignment) -> Result<Option<Score>, EvaluationError> {
        self.check(assignment)?;
        self.foreigner_balance(assignment)
    }

    pub fn meeting_fractions(&self, assignment: &Assignment) -> Result<Vec<f64>, EvaluationError> {
        self.check(assignment)?;
        Ok(MeetingSets::new(assignment).fractions())
    }

    pub fn error_terms(&self, assignment: &Assignment) -> Result<ErrorTerms, EvaluationError> {
        self.check(assignment)?;
        let terms = ErrorTerms {
            group_sizes: self.group_sizes(assignment)?,
            meetings: self.meetings(assignment)?,
            foreigners: self.foreigner_balance(assignment)?,
        };
        trace!(
            group_sizes = terms.group_sizes,
            meetings = terms.meetings,
            foreigners = ?terms.foreigners,
            "scored assignment"
        );
        Ok(terms)
    }

    /// Weighted sum of all active error terms. Lower is better.
    pub fn error_total(&self, assignment: &Assignment) -> Result<Score, EvaluationError> {
        let total = self.error_terms(assignment)?.weighted(&self.weights)?;
        trace!(total, "weighted error");
        Ok(total)
    }

    fn group_sizes(&self, assignment: &Assignment) -> Result<Score, EvaluationError> {
        let ideal = self.n_users as f64 / self.n_groups as f64;
        let mut normalized = Vec::with_capacity(assignment.rows() * self.n_groups);
        let mut counts = vec![0usize; self.n_groups];
        for day in assignment.iter_rows() {
            counts.fill(0);
            day.iter().for_each(|&group| counts[group] += 1);
            normalized.extend(counts.iter().map(|&count| count as f64 / ideal));
        }
        let spread = Spread::sample(&normalized)?;
        Ok(mean_abs_deviation(&normalized, 1.0) + spread.std_dev)
    }

    fn meetings(&self, assignment: &Assignment) -> Result<Score, EvaluationError> {
        let fractions = MeetingSets::new(assignment).fractions();
        let spread = Spread::sample(&fractions)?;
        Ok(1.0 - spread.mean + spread.std_dev)
    }

    fn foreigner_balance(&self, assignment: &Assignment) -> Result<Option<Score>, EvaluationError> {
        let Some(flags) = &self.foreigners else {
            return Ok(None);
        };
        let mut imbalances = Vec::with_capacity(assignment.rows() * self.n_groups);
        let mut cells = vec![ClassCount::default(); self.n_groups];
        for day in assignment.iter_rows() {
            cells.fill(ClassCount::default());
            day.iter().zip_eq(flags).for_each(|(&group, &foreign)| cells[group].record(foreign));
            imbalances.extend(cells.iter().map(ClassCount::imbalance));
        }
        let spread = Spread::sample(&imbalances)?;
        Ok(Some(spread.mean + spread.std_dev))
    }
}

impl TryFrom<EvaluatorConfig> for Evaluator {
    type Error = EvaluationError;

    fn try_from(config: EvaluatorConfig) -> Result<Self, Self::Error> {
        Evaluator::new(config)
    }
}
