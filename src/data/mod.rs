//! Graph and point ingestion collaborators
//!
//! Parsing lives outside the MST core: these functions only promise that the
//! graphs they hand back satisfy the container contract.

pub mod edge_list;
pub mod points;

pub use edge_list::read_edge_list;
pub use points::{complete_graph_from_points, read_points};
