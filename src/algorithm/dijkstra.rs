use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

use log::{debug, trace};

use crate::algorithm::ShortestPathAlgorithm;
use crate::data_structures::PriorityFrontier;
use crate::graph::{Edge, Graph, Weight};
use crate::{Error, Result};

/// Shortest known distance to a discovered node and the previous node on
/// the path achieving it (`None` for the source).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRecord<N, W> {
    pub distance: W,
    pub predecessor: Option<N>,
}

/// Where a node stands in a search. Transitions only ever move forward:
/// `Undiscovered -> Frontier -> Settled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Undiscovered,
    Frontier,
    Settled,
}

/// Outcome of a single [`DijkstraSearch::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStep<N> {
    /// A node other than the destination was extracted and its edges relaxed
    Settled(N),
    /// The destination was extracted; carries the source-to-destination path
    Found(Vec<N>),
    /// The frontier ran dry without reaching the destination
    Exhausted,
}

/// Counters collected while a search runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_settled: usize,
    pub edges_relaxed: usize,
    pub decrease_keys: usize,
    pub frontier_peak: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Searching,
    Found,
    Exhausted,
}

/// A single point-to-point label-setting search, advanced one extraction at a time.
///
/// Owns its distance table and frontier, so independent searches over the
/// same read-only graph never share state. The graph must not change while
/// a search borrows it.
///
/// Invariants after every step, given non-negative weights:
/// - a settled node's recorded distance is its true shortest distance;
/// - a frontier node's recorded distance is the shortest over paths whose
///   interior nodes are all settled;
/// - every edge leaving the settled set ends in the frontier.
///
/// Together these make the frontier minimum safe to settle next.
///
/// An edge whose candidate distance does not fit in `W` is skipped, since
/// that distance exceeds every representable one. If the frontier then runs
/// dry, the search fails with [`Error::DistanceOverflow`] rather than
/// reporting the destination unreachable.
#[derive(Debug)]
pub struct DijkstraSearch<'g, W, G>
where
    W: Weight,
    G: Graph<W>,
{
    graph: &'g G,
    source: G::Node,
    destination: G::Node,
    frontier: PriorityFrontier<G::Node, W>,
    table: HashMap<G::Node, DistanceRecord<G::Node, W>>,
    stats: SearchStats,
    phase: Phase,
    /// First edge skipped because its candidate distance overflowed
    overflow: Option<(G::Node, G::Node)>,
}

impl<'g, W, G> DijkstraSearch<'g, W, G>
where
    W: Weight,
    G: Graph<W>,
{
    /// Starts a search with `source` in the frontier at distance zero
    pub fn new(graph: &'g G, source: G::Node, destination: G::Node) -> Self {
        let mut table = HashMap::new();

        table.insert(
            source,
            DistanceRecord {
                distance: W::zero(),
                predecessor: None,
            },
        );

        DijkstraSearch {
            graph,
            source,
            destination,
            frontier: PriorityFrontier::singleton(source, W::zero()),
            table,
            stats: SearchStats {
                frontier_peak: 1,
                ..SearchStats::default()
            },
            phase: Phase::Searching,
            overflow: None,
        }
    }

    pub fn source(&self) -> G::Node {
        self.source
    }

    pub fn destination(&self) -> G::Node {
        self.destination
    }

    /// Extracts the closest unsettled node and relaxes its edges.
    ///
    /// Once the search has finished, further calls repeat the final outcome.
    pub fn step(&mut self) -> Result<SearchStep<G::Node>> {
        match self.phase {
            Phase::Found => return Ok(SearchStep::Found(self.path_to_destination())),
            Phase::Exhausted => return self.exhausted(),
            Phase::Searching => {}
        }

        if self.frontier.is_empty() {
            self.phase = Phase::Exhausted;
            return self.exhausted();
        }

        let (settled, distance) = self.frontier.extract_min();
        self.stats.nodes_settled += 1;
        trace!("settled {:?} at distance {:?}", settled, distance);

        if settled == self.destination {
            self.phase = Phase::Found;
            return Ok(SearchStep::Found(self.path_to_destination()));
        }

        self.relax(settled, distance)?;
        Ok(SearchStep::Settled(settled))
    }

    /// Drives the search to completion and returns the path (empty if unreachable)
    pub fn run(mut self) -> Result<Vec<G::Node>> {
        loop {
            match self.step()? {
                SearchStep::Found(path) => return Ok(path),
                SearchStep::Exhausted => return Ok(Vec::new()),
                SearchStep::Settled(_) => {}
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase != Phase::Searching
    }

    /// Returns the distance record of a discovered node
    pub fn record(&self, node: G::Node) -> Option<&DistanceRecord<G::Node, W>> {
        self.table.get(&node)
    }

    /// Returns the shortest distance known so far to `node`
    pub fn distance(&self, node: G::Node) -> Option<W> {
        self.table.get(&node).map(|record| record.distance)
    }

    pub fn state(&self, node: G::Node) -> NodeState {
        if !self.table.contains_key(&node) {
            NodeState::Undiscovered
        } else if self.frontier.contains(&node) {
            NodeState::Frontier
        } else {
            NodeState::Settled
        }
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn relax(&mut self, from: G::Node, distance: W) -> Result<()> {
        let graph = self.graph;
        for edge in graph.incident_edges(from) {
            let Some(to) = edge.other(from) else {
                continue;
            };
            self.stats.edges_relaxed += 1;
            let Some(candidate) = distance.checked_add(edge.weight()) else {
                self.overflow.get_or_insert((from, to));
                continue;
            };

            match self.table.get_mut(&to) {
                None => {
                    self.table.insert(
                        to,
                        DistanceRecord {
                            distance: candidate,
                            predecessor: Some(from),
                        },
                    );
                    self.frontier.insert(to, candidate)?;
                }
                Some(record) if candidate < record.distance => {
                    record.distance = candidate;
                    record.predecessor = Some(from);
                    if self.frontier.decrease_priority(to, candidate) {
                        self.stats.decrease_keys += 1;
                    }
                }
                Some(_) => {}
            }
        }

        self.stats.frontier_peak = self.stats.frontier_peak.max(self.frontier.len());
        Ok(())
    }

    fn exhausted(&self) -> Result<SearchStep<G::Node>> {
        match self.overflow {
            Some((from, to)) => Err(Error::DistanceOverflow(
                format!("{:?}", from),
                format!("{:?}", to),
            )),
            None => Ok(SearchStep::Exhausted),
        }
    }

    fn path_to_destination(&self) -> Vec<G::Node> {
        reconstruct_path(&self.table, self.destination)
    }
}

/// Walks predecessor links back from `end` and returns the path source-first.
///
/// Returns an empty path if `end` has no record in `table`.
pub fn reconstruct_path<N, W>(table: &HashMap<N, DistanceRecord<N, W>>, end: N) -> Vec<N>
where
    N: Copy + Eq + Hash,
{
    if !table.contains_key(&end) {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut current = Some(end);
    while let Some(node) = current {
        path.push(node);
        current = table.get(&node).and_then(|record| record.predecessor);
    }
    path.reverse();
    path
}

/// Classic Dijkstra's algorithm implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }

    /// Starts a steppable search without running it
    pub fn search<'g, W, G>(
        &self,
        graph: &'g G,
        source: G::Node,
        destination: G::Node,
    ) -> DijkstraSearch<'g, W, G>
    where
        W: Weight,
        G: Graph<W>,
    {
        DijkstraSearch::new(graph, source, destination)
    }

    /// Like [`ShortestPathAlgorithm::shortest_path`], also returning search counters
    pub fn shortest_path_with_stats<W, G>(
        &self,
        graph: &G,
        source: G::Node,
        destination: G::Node,
    ) -> Result<(Vec<G::Node>, SearchStats)>
    where
        W: Weight,
        G: Graph<W>,
    {
        if !graph.has_node(source) {
            return Err(Error::SourceNotFound);
        }
        if !graph.has_node(destination) {
            return Err(Error::DestinationNotFound);
        }

        let start = Instant::now();
        let mut search = DijkstraSearch::new(graph, source, destination);
        let path = loop {
            match search.step()? {
                SearchStep::Found(path) => break path,
                SearchStep::Exhausted => break Vec::new(),
                SearchStep::Settled(_) => {}
            }
        };
        let stats = search.stats();

        if path.is_empty() {
            debug!(
                "No path {:?} -> {:?}: {:?}/{} nodes settled",
                source,
                destination,
                start.elapsed(),
                stats.nodes_settled
            );
        } else {
            debug!(
                "Path {:?} -> {:?} with {} nodes: {:?}/{} nodes settled",
                source,
                destination,
                path.len(),
                start.elapsed(),
                stats.nodes_settled
            );
        }

        Ok((path, stats))
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Weight,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn shortest_path(
        &self,
        graph: &G,
        source: G::Node,
        destination: G::Node,
    ) -> Result<Vec<G::Node>> {
        self.shortest_path_with_stats(graph, source, destination)
            .map(|(path, _)| path)
    }
}
