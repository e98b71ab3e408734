//! Turn the output of `du` into a single HTML page for exploring the
//! directory tree.
//!
//! [`tree`] parses `<size>\t<path>` lines into a [`DuTree`]. [`exporters`]
//! projects that tree to JSON and renders the page around it; only the top
//! level is rendered up front, deeper levels are built in the browser from
//! the embedded JSON.

pub mod error;
pub mod exporters;
pub mod tree;

pub use error::{Error, Result};
pub use exporters::html::{PageOptions, Renderer};
pub use tree::{build_tree, read_du_file, DuTree, ParseStats, TreeBuilder, TreeNode};
