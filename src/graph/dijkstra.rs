use crate::primitives::NodeId;

use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::{FxHashSet, FxHasher};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::BuildHasherDefault;

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

type Cost = f64;

#[derive(Debug)]
struct SmallestHolder {
    cost: Cost,
    index: usize,
}

impl PartialEq for SmallestHolder {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cost.total_cmp(&other.cost) == Ordering::Equal
    }
}

impl Eq for SmallestHolder {}

impl PartialOrd for SmallestHolder {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestHolder {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost)
    }
}

pub struct Dijkstra;

impl Dijkstra {
    /// Finds the cheapest path between `start` and `target`, stopping as
    /// soon as the target is settled.
    ///
    /// The `successors` function receives the current node, and returns
    /// an iterator of successors associated with their (non-negative)
    /// move cost. Returns the total cost and the nodes visited, both ends
    /// included, or `None` when the target cannot be reached.
    pub fn shortest_path<FN, IN>(
        &self,
        start: NodeId,
        target: NodeId,
        mut successors: FN,
    ) -> Option<(Cost, Vec<NodeId>)>
    where
        FN: FnMut(&NodeId) -> IN,
        IN: IntoIterator<Item = (NodeId, Cost)>,
    {
        let mut to_see: BinaryHeap<SmallestHolder> = BinaryHeap::with_capacity(256);
        to_see.push(SmallestHolder {
            cost: 0.0,
            index: 0,
        });

        let mut parents: FxIndexMap<NodeId, (usize, Cost)> =
            FxIndexMap::with_capacity_and_hasher(64, BuildHasherDefault::<FxHasher>::default());
        parents.insert(start, (usize::MAX, 0.0));

        let mut seen = FxHashSet::default();

        while let Some(SmallestHolder { cost, index }) = to_see.pop() {
            if !seen.insert(index) {
                continue;
            }

            let node = match parents.get_index(index) {
                Some((node, _)) => *node,
                None => continue,
            };

            if node == target {
                return Some((cost, Self::backtrack(&parents, index)));
            }

            for (successor, move_cost) in successors(&node) {
                let new_cost = cost + move_cost;

                let index = match parents.entry(successor) {
                    Entry::Vacant(e) => {
                        let n = e.index();
                        e.insert((index, new_cost));
                        n
                    }
                    Entry::Occupied(mut e) => {
                        if e.get().1 > new_cost {
                            e.insert((index, new_cost));
                            e.index()
                        } else {
                            continue;
                        }
                    }
                };

                to_see.push(SmallestHolder {
                    cost: new_cost,
                    index,
                });
            }
        }

        None
    }

    fn backtrack(parents: &FxIndexMap<NodeId, (usize, Cost)>, mut index: usize) -> Vec<NodeId> {
        let mut path = vec![];

        while let Some((node, (parent, _))) = parents.get_index(index) {
            path.push(*node);
            index = *parent;
        }

        path.reverse();
        path
    }
}
