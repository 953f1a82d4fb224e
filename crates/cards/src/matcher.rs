use super::strength::Strength;
use std::cmp::Ordering;

/// Comparison contract between two evaluated hands.
pub trait Matcher: Send + Sync {
    fn compare(&self, a: &Strength, b: &Strength) -> Ordering;
}

/// Orders by `(ranking, weight)` lexicographically.
#[derive(Debug, Default, Clone, Copy)]
pub struct HandMatcher;

impl Matcher for HandMatcher {
    fn compare(&self, a: &Strength, b: &Strength) -> Ordering {
        a.ranking()
            .cmp(&b.ranking())
            .then_with(|| a.weight().cmp(&b.weight()))
    }
}

/// Groups entries that compare equal and orders the groups best first.
/// Entries within a group keep their input order.
pub fn standings<T, M>(matcher: &M, entries: Vec<(T, Strength)>) -> Vec<Vec<T>>
where
    M: Matcher + ?Sized,
{
    let mut groups: Vec<(Strength, Vec<T>)> = Vec::new();
    for (item, strength) in entries {
        match groups
            .iter_mut()
            .find(|(s, _)| matcher.compare(s, &strength) == Ordering::Equal)
        {
            Some((_, group)) => group.push(item),
            None => groups.push((strength, vec![item])),
        }
    }
    groups.sort_by(|(a, _), (b, _)| matcher.compare(b, a));
    groups.into_iter().map(|(_, group)| group).collect()
}
