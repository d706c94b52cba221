use std::{collections::BTreeSet, hash::Hash};

use itertools::Itertools;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;
/// Type alias for sets whose iteration order is the order of the elements.
pub type OrderedSet<S> = BTreeSet<S>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A partition is a different view on an equivalence relation, by grouping elements of
/// type `I` into their respective classes under the relation.
#[derive(Debug, Clone)]
pub struct Partition<I: Hash + Eq>(Vec<BTreeSet<I>>);

impl<I: Hash + Eq> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Hash + Eq> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Hash + Eq> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Hash + Eq> Eq for Partition<I> {}

impl<I: Hash + Eq + Ord + Copy> Partition<I> {
    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators which yield elements of type `I`.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .collect(),
        )
    }

    /// Computes the partition of `elements` into the connected components of the undirected
    /// graph given by `related`. The classes appear in the order of their first element in
    /// `elements`, which makes the result deterministic.
    pub fn connected_components<F>(elements: &[I], related: F) -> Self
    where
        F: Fn(I, I) -> bool,
    {
        let mut assigned = Set::default();
        let mut classes = Vec::new();

        for &element in elements {
            if !assigned.insert(element) {
                continue;
            }
            let mut class = BTreeSet::from_iter([element]);
            let mut queue = std::collections::VecDeque::from([element]);
            while let Some(current) = queue.pop_front() {
                for &other in elements {
                    if !assigned.contains(&other) && related(current, other) {
                        assigned.insert(other);
                        class.insert(other);
                        queue.push_back(other);
                    }
                }
            }
            classes.push(class);
        }

        Self(classes)
    }

    /// Returns the index of the class containing `element`, if any.
    pub fn class_of(&self, element: I) -> Option<usize> {
        self.0.iter().position(|class| class.contains(&element))
    }
}

impl<I: Hash + Eq + Ord> From<Vec<BTreeSet<I>>> for Partition<I> {
    fn from(value: Vec<BTreeSet<I>>) -> Self {
        Self(value)
    }
}

/// Joins state ids into the id of a state representing all of them: the ids are sorted
/// lexicographically and concatenated without a separator.
pub fn join_ids<'a, I: IntoIterator<Item = &'a str>>(ids: I) -> String {
    ids.into_iter().sorted().join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connected_components_of_relation() {
        let elements = [0usize, 1, 2, 3, 4];
        // 0 ~ 2, 2 ~ 4, 1 ~ 3
        let pairs = [(0, 2), (2, 4), (1, 3)];
        let related = |p: usize, q: usize| {
            pairs
                .iter()
                .any(|&(a, b)| (a, b) == (p, q) || (b, a) == (p, q))
        };
        let partition = Partition::connected_components(&elements, related);

        assert_eq!(partition.size(), 2);
        assert_eq!(partition, Partition::new([vec![1, 3], vec![0, 2, 4]]));
        assert_eq!(partition.class_of(4), Some(0));
        assert_eq!(partition.class_of(3), Some(1));
        assert_eq!(partition.class_of(7), None);
    }

    #[test]
    fn joined_ids_are_sorted() {
        assert_eq!(join_ids(["2", "10", "1"]), "1102");
        assert_eq!(join_ids(["b", "a"]), "ab");
        assert_eq!(join_ids(std::iter::empty()), "");
    }
}
