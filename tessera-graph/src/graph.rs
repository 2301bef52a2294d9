//! Indexed in-memory triple store
//!
//! Triples live in an insertion-ordered slot vector. Removal leaves a
//! tombstone so slot numbers stay stable; once tombstones outnumber live
//! triples the graph compacts itself, preserving insertion order.
//!
//! Every index maps a key built from [`TermId`]s to the ordered set of slots
//! holding matching triples:
//!
//! | Index    | Key                |
//! |----------|--------------------|
//! | `by_s`   | subject            |
//! | `by_p`   | predicate          |
//! | `by_o`   | object             |
//! | `by_g`   | context            |
//! | `by_sp`  | subject, predicate |
//! | `by_po`  | predicate, object  |
//! | `by_so`  | subject, object    |
//! | `by_spo` | all three          |
//!
//! [`Graph::select`] picks the smallest bucket among the indexes applicable to
//! the bound fields and filters it against the full pattern, so its cost is
//! proportional to that bucket rather than to the graph. Because buckets are
//! keyed by identifier only, the final filter also guards against identifier
//! collisions.

use crate::term::{Term, TermId};
use crate::triple::Triple;
use hashbrown::HashMap;
use parking_lot::RwLock;
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;
use std::ops::Range;
use std::sync::Arc;

/// A graph shared between threads: validation runs hold the read lock,
/// loaders take the write lock.
pub type SharedGraph = Arc<RwLock<Graph>>;

/// Wrap a graph for shared access
pub fn shared(graph: Graph) -> SharedGraph {
    Arc::new(RwLock::new(graph))
}

type Bucket = BTreeSet<usize>;

/// Insertion-ordered, duplicate-free collection of triples with pattern indexes
#[derive(Clone, Default)]
pub struct Graph {
    slots: Vec<Option<Triple>>,
    live: usize,
    by_s: HashMap<TermId, Bucket>,
    by_p: HashMap<TermId, Bucket>,
    by_o: HashMap<TermId, Bucket>,
    by_g: HashMap<TermId, Bucket>,
    by_sp: HashMap<(TermId, TermId), Bucket>,
    by_po: HashMap<(TermId, TermId), Bucket>,
    by_so: HashMap<(TermId, TermId), Bucket>,
    by_spo: HashMap<(TermId, TermId, TermId), Bucket>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from an initial triple set (duplicates collapse)
    pub fn from_triples(triples: impl IntoIterator<Item = Triple>) -> Self {
        let mut graph = Self::new();
        graph.extend(triples);
        graph
    }

    /// Number of triples (TriplesCount)
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Add a triple, returns true if it was new
    ///
    /// Adding a triple that is already present (same subject, predicate,
    /// object and context) is a no-op.
    pub fn add(&mut self, triple: Triple) -> bool {
        if self.slot_of(&triple).is_some() {
            return false;
        }

        let slot = self.slots.len();
        let (s, p, o) = ids(&triple);

        self.by_s.entry(s).or_default().insert(slot);
        self.by_p.entry(p).or_default().insert(slot);
        self.by_o.entry(o).or_default().insert(slot);
        if let Some(g) = triple.context() {
            self.by_g.entry(g.id()).or_default().insert(slot);
        }
        self.by_sp.entry((s, p)).or_default().insert(slot);
        self.by_po.entry((p, o)).or_default().insert(slot);
        self.by_so.entry((s, o)).or_default().insert(slot);
        self.by_spo.entry((s, p, o)).or_default().insert(slot);

        self.slots.push(Some(triple));
        self.live += 1;
        true
    }

    /// Remove a triple, returns true if it was present
    pub fn remove(&mut self, triple: &Triple) -> bool {
        match self.slot_of(triple) {
            Some(slot) => {
                self.remove_slot(slot);
                self.maybe_compact();
                true
            }
            None => false,
        }
    }

    /// Remove every triple matching the pattern, returns the count removed
    ///
    /// `None` fields are wildcards; an all-`None` pattern clears the graph.
    pub fn remove_matching(
        &mut self,
        s: Option<&Term>,
        p: Option<&Term>,
        o: Option<&Term>,
        g: Option<&Term>,
    ) -> usize {
        let doomed: Vec<usize> = self.select_slots(s, p, o, g).collect();
        for &slot in &doomed {
            self.remove_slot(slot);
        }
        if !doomed.is_empty() {
            self.maybe_compact();
        }
        doomed.len()
    }

    /// Whether the exact triple (including context) is present
    pub fn contains(&self, triple: &Triple) -> bool {
        self.slot_of(triple).is_some()
    }

    /// All triples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> + Clone + '_ {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// Lazy, restartable pattern query
    ///
    /// Any subset of the four fields may be unbound. Results come back in
    /// insertion order. A bound context only matches named-graph triples.
    pub fn select<'g, 'p>(
        &'g self,
        s: Option<&'p Term>,
        p: Option<&'p Term>,
        o: Option<&'p Term>,
        g: Option<&'p Term>,
    ) -> Select<'g, 'p> {
        Select {
            graph: self,
            candidates: self.candidates(s, p, o, g),
            s,
            p,
            o,
            g,
        }
    }

    /// Objects of `s p ?o` across all contexts, in insertion order
    pub fn objects<'g, 'p>(
        &'g self,
        s: &'p Term,
        p: &'p Term,
    ) -> impl Iterator<Item = &'g Term> + Clone + 'p
    where
        'g: 'p,
    {
        self.select(Some(s), Some(p), None, None)
            .map(Triple::object)
    }

    /// Subjects of `?s p o` across all contexts, in insertion order
    pub fn subjects<'g, 'p>(
        &'g self,
        p: &'p Term,
        o: &'p Term,
    ) -> impl Iterator<Item = &'g Term> + Clone + 'p
    where
        'g: 'p,
    {
        self.select(None, Some(p), Some(o), None)
            .map(Triple::subject)
    }

    fn slot_of(&self, triple: &Triple) -> Option<usize> {
        self.by_spo
            .get(&ids(triple))?
            .iter()
            .copied()
            .find(|&slot| self.slots[slot].as_ref() == Some(triple))
    }

    fn select_slots<'a>(
        &'a self,
        s: Option<&'a Term>,
        p: Option<&'a Term>,
        o: Option<&'a Term>,
        g: Option<&'a Term>,
    ) -> impl Iterator<Item = usize> + 'a {
        let candidates = self.candidates(s, p, o, g);
        candidates.filter(move |&slot| {
            self.slots[slot]
                .as_ref()
                .is_some_and(|t| t.matches(s, p, o, g))
        })
    }

    /// Pick the smallest bucket among the applicable indexes
    fn candidates(
        &self,
        s: Option<&Term>,
        p: Option<&Term>,
        o: Option<&Term>,
        g: Option<&Term>,
    ) -> Candidates<'_> {
        let (s, p, o, g) = (
            s.map(Term::id),
            p.map(Term::id),
            o.map(Term::id),
            g.map(Term::id),
        );

        let mut lookups: Vec<(&'static str, Option<&Bucket>)> = Vec::with_capacity(8);
        if let (Some(s), Some(p), Some(o)) = (s, p, o) {
            lookups.push(("spo", self.by_spo.get(&(s, p, o))));
        }
        if let (Some(s), Some(p)) = (s, p) {
            lookups.push(("sp", self.by_sp.get(&(s, p))));
        }
        if let (Some(p), Some(o)) = (p, o) {
            lookups.push(("po", self.by_po.get(&(p, o))));
        }
        if let (Some(s), Some(o)) = (s, o) {
            lookups.push(("so", self.by_so.get(&(s, o))));
        }
        if let Some(s) = s {
            lookups.push(("s", self.by_s.get(&s)));
        }
        if let Some(p) = p {
            lookups.push(("p", self.by_p.get(&p)));
        }
        if let Some(o) = o {
            lookups.push(("o", self.by_o.get(&o)));
        }
        if let Some(g) = g {
            lookups.push(("g", self.by_g.get(&g)));
        }

        if lookups.is_empty() {
            return Candidates::All(0..self.slots.len());
        }
        // A missing key in any applicable index means nothing can match
        if lookups.iter().any(|(_, bucket)| bucket.is_none()) {
            return Candidates::Empty;
        }
        let Some((index, bucket)) = lookups
            .into_iter()
            .filter_map(|(name, bucket)| bucket.map(|b| (name, b)))
            .min_by_key(|(_, b)| b.len())
        else {
            return Candidates::Empty;
        };
        tracing::trace!(index, candidates = bucket.len(), "graph select");
        Candidates::Bucket(bucket.iter())
    }

    fn remove_slot(&mut self, slot: usize) {
        let Some(triple) = self.slots[slot].take() else {
            return;
        };
        let (s, p, o) = ids(&triple);

        unindex(&mut self.by_s, s, slot);
        unindex(&mut self.by_p, p, slot);
        unindex(&mut self.by_o, o, slot);
        if let Some(g) = triple.context() {
            unindex(&mut self.by_g, g.id(), slot);
        }
        unindex(&mut self.by_sp, (s, p), slot);
        unindex(&mut self.by_po, (p, o), slot);
        unindex(&mut self.by_so, (s, o), slot);
        unindex(&mut self.by_spo, (s, p, o), slot);

        self.live -= 1;
    }

    /// Rebuild without tombstones once they outnumber live triples
    fn maybe_compact(&mut self) {
        let tombstones = self.slots.len() - self.live;
        if tombstones <= self.live {
            return;
        }
        tracing::trace!(live = self.live, tombstones, "compacting graph");
        let slots = std::mem::take(&mut self.slots);
        *self = Self::new();
        self.extend(slots.into_iter().flatten());
    }
}

fn ids(triple: &Triple) -> (TermId, TermId, TermId) {
    (
        triple.subject().id(),
        triple.predicate().id(),
        triple.object().id(),
    )
}

fn unindex<K: Hash + Eq>(index: &mut HashMap<K, Bucket>, key: K, slot: usize) {
    if let Some(bucket) = index.get_mut(&key) {
        bucket.remove(&slot);
        if bucket.is_empty() {
            index.remove(&key);
        }
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.add(triple);
        }
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        Self::from_triples(iter)
    }
}

impl PartialEq for Graph {
    /// Set equality: same triples regardless of insertion order
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|t| other.contains(t))
    }
}

impl Eq for Graph {}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

#[derive(Clone)]
enum Candidates<'a> {
    All(Range<usize>),
    Bucket(btree_set::Iter<'a, usize>),
    Empty,
}

impl Iterator for Candidates<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            Candidates::All(range) => range.next(),
            Candidates::Bucket(iter) => iter.next().copied(),
            Candidates::Empty => None,
        }
    }
}

/// Iterator returned by [`Graph::select`]
///
/// Clone before consuming to walk the same matches again.
#[derive(Clone)]
pub struct Select<'g, 'p> {
    graph: &'g Graph,
    candidates: Candidates<'g>,
    s: Option<&'p Term>,
    p: Option<&'p Term>,
    o: Option<&'p Term>,
    g: Option<&'p Term>,
}

impl<'g> Iterator for Select<'g, '_> {
    type Item = &'g Triple;

    fn next(&mut self) -> Option<&'g Triple> {
        for slot in self.candidates.by_ref() {
            if let Some(triple) = &self.graph.slots[slot] {
                if triple.matches(self.s, self.p, self.o, self.g) {
                    return Some(triple);
                }
            }
        }
        None
    }
}
