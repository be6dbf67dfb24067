//! The search only needs a node's incident edges and each edge's endpoints and
//! weight, so any graph representation can be plugged in.

use std::collections::HashMap;
use std::sync::RwLock;

use frontier_path::algorithm::dijkstra::{DijkstraSearch, NodeState, SearchStep};
use frontier_path::graph::{Edge, Graph};
use frontier_path::{path_sum, path_sum_shared, Dijkstra, ShortestPathAlgorithm};

#[derive(Debug, Clone, Copy)]
struct Road {
    from: &'static str,
    to: &'static str,
    km: u64,
}

impl Edge<&'static str, u64> for Road {
    fn endpoints(&self) -> (&'static str, &'static str) {
        (self.from, self.to)
    }

    fn weight(&self) -> u64 {
        self.km
    }
}

#[derive(Debug, Default)]
struct RoadMap {
    roads: HashMap<&'static str, Vec<Road>>,
    road_count: usize,
}

impl RoadMap {
    fn with_roads(roads: &[(&'static str, &'static str, u64)]) -> Self {
        let mut map = RoadMap::default();
        for &(from, to, km) in roads {
            let road = Road { from, to, km };
            map.roads.entry(from).or_default().push(road);
            map.roads.entry(to).or_default().push(road);
            map.road_count += 1;
        }
        map
    }

    fn add_town(&mut self, town: &'static str) {
        self.roads.entry(town).or_default();
    }
}

impl Graph<u64> for RoadMap {
    type Node = &'static str;
    type Edge = Road;

    fn node_count(&self) -> usize {
        self.roads.len()
    }

    fn edge_count(&self) -> usize {
        self.road_count
    }

    fn has_node(&self, node: &'static str) -> bool {
        self.roads.contains_key(node)
    }

    fn incident_edges(&self, node: &'static str) -> Box<dyn Iterator<Item = Road> + '_> {
        match self.roads.get(node) {
            Some(roads) => Box::new(roads.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }
}

fn sample_map() -> RoadMap {
    RoadMap::with_roads(&[("A", "B", 1), ("B", "D", 5), ("A", "C", 2), ("C", "D", 2)])
}

#[test]
fn finds_path_over_named_towns() {
    let map = sample_map();
    let dijkstra = Dijkstra::new();

    let path = dijkstra.shortest_path(&map, "A", "D").unwrap();
    assert_eq!(path, vec!["A", "C", "D"]);
    assert_eq!(dijkstra.path_sum(&map, &path).unwrap(), 4);
    assert_ne!(path_sum(&map, &["A", "B", "D"]).unwrap(), 4);
}

#[test]
fn unreachable_town_gives_empty_path() {
    let mut map = sample_map();
    map.add_town("E");

    assert!(Dijkstra::new().shortest_path(&map, "A", "E").unwrap().is_empty());
}

#[test]
fn search_can_be_stepped_and_abandoned() {
    let map = sample_map();
    let mut search = DijkstraSearch::new(&map, "A", "D");

    assert_eq!(search.step().unwrap(), SearchStep::Settled("A"));
    assert_eq!(search.state("B"), NodeState::Frontier);
    assert_eq!(search.state("D"), NodeState::Undiscovered);

    assert_eq!(search.step().unwrap(), SearchStep::Settled("B"));
    assert_eq!(search.state("B"), NodeState::Settled);
    assert_eq!(search.distance("D"), Some(6));
    assert_eq!(search.frontier_len(), 2);

    // A caller polling between extractions may simply stop here.
    assert!(!search.is_finished());
    drop(search);
}

#[test]
fn shared_path_sum_over_named_towns() {
    let map = sample_map();
    let path = RwLock::new(Dijkstra::new().shortest_path(&map, "D", "A").unwrap());

    assert_eq!(path_sum_shared(&map, &path).unwrap(), 4);
    assert_eq!(*path.read().unwrap(), vec!["D", "C", "A"]);
}
