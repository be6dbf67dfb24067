use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::path::path_sum;
use crate::graph::{MutableGraph, UndirectedGraph};
use ordered_float::OrderedFloat;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn to_py_err(err: crate::Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

#[pyclass]
pub struct PyGraph {
    graph: UndirectedGraph<OrderedFloat<f64>>,
}

#[pymethods]
impl PyGraph {
    #[new]
    fn new() -> Self {
        PyGraph {
            graph: UndirectedGraph::new(),
        }
    }

    fn add_vertex(&mut self) -> usize {
        self.graph.add_node()
    }

    fn add_edge(&mut self, a: usize, b: usize, weight: f64) -> PyResult<()> {
        self.graph
            .add_finite_edge(a, b, weight)
            .map_err(to_py_err)
    }

    /// Returns the node list from source to destination, empty if unreachable
    fn shortest_path(&self, source: usize, destination: usize) -> PyResult<Vec<usize>> {
        Dijkstra::new()
            .shortest_path_with_stats::<OrderedFloat<f64>, _>(&self.graph, source, destination)
            .map(|(path, _)| path)
            .map_err(to_py_err)
    }

    fn path_sum(&self, path: Vec<usize>) -> PyResult<f64> {
        path_sum::<OrderedFloat<f64>, _>(&self.graph, &path)
            .map(OrderedFloat::into_inner)
            .map_err(to_py_err)
    }
}

#[pymodule]
fn frontier_path_py(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyGraph>()?;
    Ok(())
}
