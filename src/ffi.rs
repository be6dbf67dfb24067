use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::path::path_sum;
use crate::graph::{MutableGraph, UndirectedGraph};
use libc::{c_double, size_t};
use ordered_float::OrderedFloat;

type FloatGraph = UndirectedGraph<OrderedFloat<f64>>;

#[repr(C)]
pub struct FfiGraph {
    graph: FloatGraph,
}

#[no_mangle]
pub extern "C" fn fpath_graph_new() -> *mut FfiGraph {
    Box::into_raw(Box::new(FfiGraph {
        graph: UndirectedGraph::new(),
    }))
}

#[no_mangle]
pub extern "C" fn fpath_graph_add_vertex(g: *mut FfiGraph) -> size_t {
    unsafe { &mut *g }.graph.add_node()
}

/// Returns false for unknown endpoints or a negative or non-finite weight.
#[no_mangle]
pub extern "C" fn fpath_graph_add_edge(
    g: *mut FfiGraph,
    a: size_t,
    b: size_t,
    weight: c_double,
) -> bool {
    unsafe { &mut *g }.graph.add_finite_edge(a, b, weight).is_ok()
}

#[no_mangle]
pub extern "C" fn fpath_graph_free(g: *mut FfiGraph) {
    if !g.is_null() {
        unsafe {
            drop(Box::from_raw(g));
        }
    }
}

/// A path owned by Rust; release with `fpath_path_free`.
///
/// `len == 0` means the destination is unreachable.
#[repr(C)]
pub struct FfiPath {
    nodes: *mut size_t,
    len: size_t,
    total_weight: c_double,
}

#[no_mangle]
pub extern "C" fn fpath_path_free(path: *mut FfiPath) {
    if !path.is_null() {
        unsafe {
            if !(*path).nodes.is_null() {
                drop(Vec::from_raw_parts((*path).nodes, (*path).len, (*path).len));
            }
            drop(Box::from_raw(path));
        }
    }
}

/// Returns null if either endpoint is not in the graph.
#[no_mangle]
pub extern "C" fn fpath_shortest_path(
    g: *const FfiGraph,
    source: size_t,
    destination: size_t,
) -> *mut FfiPath {
    if g.is_null() {
        return std::ptr::null_mut();
    }
    let graph = unsafe { &(*g).graph };

    let path = match Dijkstra::new().shortest_path_with_stats::<OrderedFloat<f64>, _>(
        graph,
        source,
        destination,
    ) {
        Ok((path, _)) => path,
        Err(_) => return std::ptr::null_mut(),
    };

    let total_weight = if path.is_empty() {
        f64::INFINITY
    } else {
        match path_sum::<OrderedFloat<f64>, _>(graph, &path) {
            Ok(sum) => sum.into_inner(),
            Err(_) => return std::ptr::null_mut(),
        }
    };

    let mut nodes = path.into_boxed_slice();
    let len = nodes.len();
    let ptr = if len == 0 {
        std::ptr::null_mut()
    } else {
        nodes.as_mut_ptr()
    };
    std::mem::forget(nodes);

    Box::into_raw(Box::new(FfiPath {
        nodes: ptr,
        len,
        total_weight,
    }))
}
