//! Composable query predicates.
//!
//! A [`Predicate`] is a conjunction of record-specific conditions. Stores
//! either evaluate it directly ([`Predicate::matches`]) or translate its
//! flattened [`conditions`](Predicate::conditions) into their own query
//! language.

/// Evaluates one condition against a record.
pub trait Condition<T> {
    /// True when `record` satisfies the condition.
    fn matches(&self, record: &T) -> bool;
}

/// Logical AND over conditions of type `C`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Predicate<C> {
    /// Matches every record.
    #[default]
    Always,
    /// A single condition.
    Condition(C),
    /// All inner predicates must match. An empty conjunction matches everything.
    And(Vec<Predicate<C>>),
}

impl<C> Predicate<C> {
    /// Combine two predicates with AND, dropping unconstrained sides.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Always, other) => other,
            (this, Self::Always) => this,
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), other) => {
                left.push(other);
                Self::And(left)
            }
            (this, other) => Self::And(vec![this, other]),
        }
    }

    /// AND `condition` in when it is present; an absent filter adds no constraint.
    #[must_use]
    pub fn and_maybe(self, condition: Option<C>) -> Self {
        match condition {
            Some(condition) => self.and(Self::Condition(condition)),
            None => self,
        }
    }

    /// True when the predicate places no constraint at all.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.conditions().is_empty()
    }

    /// Every condition of the conjunction, in insertion order.
    #[must_use]
    pub fn conditions(&self) -> Vec<&C> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into<'a>(&'a self, out: &mut Vec<&'a C>) {
        match self {
            Self::Always => {}
            Self::Condition(condition) => out.push(condition),
            Self::And(inner) => inner.iter().for_each(|p| p.collect_into(out)),
        }
    }

    /// Evaluate against a record.
    pub fn matches<T>(&self, record: &T) -> bool
    where
        C: Condition<T>,
    {
        match self {
            Self::Always => true,
            Self::Condition(condition) => condition.matches(record),
            Self::And(inner) => inner.iter().all(|p| p.matches(record)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct AtLeast(i32);

    impl Condition<i32> for AtLeast {
        fn matches(&self, record: &i32) -> bool {
            *record >= self.0
        }
    }

    #[test]
    fn always_is_identity_for_and() {
        let p = Predicate::Always.and(Predicate::Condition(AtLeast(3)));
        assert_eq!(p, Predicate::Condition(AtLeast(3)));
    }

    #[test]
    fn and_flattens_conjunctions() {
        let p = Predicate::Always
            .and_maybe(Some(AtLeast(1)))
            .and_maybe(None)
            .and_maybe(Some(AtLeast(2)))
            .and_maybe(Some(AtLeast(3)));
        assert_eq!(p.conditions(), vec![&AtLeast(1), &AtLeast(2), &AtLeast(3)]);
    }

    #[test]
    fn unconstrained_predicate_matches_everything() {
        let p: Predicate<AtLeast> = Predicate::Always.and_maybe(None);
        assert!(p.is_unconstrained());
        assert!(p.matches(&i32::MIN));
        assert!(Predicate::<AtLeast>::And(vec![]).matches(&0));
    }

    #[test]
    fn conjunction_requires_every_condition() {
        let p = Predicate::Condition(AtLeast(2)).and(Predicate::Condition(AtLeast(5)));
        assert!(!p.matches(&3));
        assert!(p.matches(&5));
    }
}
