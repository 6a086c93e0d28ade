//! Who-met-whom over all rounds of an assignment.
//!
//! Two users have met when they share a group on at least one round. Every
//! user has met itself.

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::model::assignment::Assignment;
use crate::model::entity::Index;

const WORD_BITS: usize = u64::BITS as usize;

/// One fixed-width bitset per user, packed into a single arena.
///
/// Bit `v` of user `u`'s set is on iff `u` and `v` shared a group on some round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingSets {
    n_users: usize,
    words: usize,
    bits: Vec<u64>,
}

impl MeetingSets {
    /// Buckets users by group id on every round and unions each bucket into
    /// the sets of its members.
    pub fn new(assignment: &Assignment) -> MeetingSets {
        let n_users = assignment.columns();
        let words = n_users.div_ceil(WORD_BITS);
        let mut bits = vec![0u64; n_users * words];
        let mut mask = vec![0u64; words];

        for day in assignment.iter_rows() {
            let buckets = day.iter().enumerate().into_group_map_by(|&(_, &group)| group);
            for members in buckets.values() {
                mask.fill(0);
                for &(user, _) in members {
                    mask[user / WORD_BITS] |= 1 << (user % WORD_BITS);
                }
                for &(user, _) in members {
                    let set = &mut bits[user * words..(user + 1) * words];
                    set.iter_mut().zip(&mask).for_each(|(word, m)| *word |= m);
                }
            }
        }

        MeetingSets { n_users, words, bits }
    }

    pub fn n_users(&self) -> usize {
        self.n_users
    }

    /// Bitset of `user`; empty for users outside the assignment.
    fn set(&self, user: Index) -> &[u64] {
        if user >= self.n_users {
            return &[];
        }
        &self.bits[user * self.words..(user + 1) * self.words]
    }

    pub fn met(&self, user: Index, other: Index) -> bool {
        self.set(user)
            .get(other / WORD_BITS)
            .is_some_and(|word| word >> (other % WORD_BITS) & 1 == 1)
    }

    /// Size of `user`'s meeting set, itself included.
    pub fn count(&self, user: Index) -> usize {
        self.set(user).iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Users `user` has met, in ascending order.
    pub fn members(&self, user: Index) -> impl Iterator<Item = Index> + '_ {
        self.set(user).iter().enumerate().flat_map(|(w, &word)| {
            (0..WORD_BITS)
                .filter(move |bit| word >> bit & 1 == 1)
                .map(move |bit| w * WORD_BITS + bit)
        })
    }

    /// Meeting set size over population size, per user.
    pub fn fractions(&self) -> Vec<f64> {
        (0..self.n_users)
            .map(|user| self.count(user) as f64 / self.n_users as f64)
            .collect()
    }
}

/// Reference algorithm: rescans every round for every user, O(rounds × users²).
///
/// Produces the same sets as [`MeetingSets::new`]; kept for cross-checking.
pub fn direct_meetings(assignment: &Assignment) -> Vec<BTreeSet<Index>> {
    (0..assignment.columns())
        .map(|current| {
            assignment
                .iter_rows()
                .flat_map(|day| day.iter().positions(move |group| *group == day[current]))
                .collect()
        })
        .collect()
}
