//! kimages - list the distinct container images running in a cluster
//!
//! kimages walks every pod visible through a kubeconfig (or a saved pod
//! list), collects the image reference of each container and prints the
//! de-duplicated set. Three collection strategies trade memory for latency:
//! one big fetch, a paginated stream, or a worker pool over the full list.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, output)
//! - `config`: Configuration file loading and kubeconfig resolution
//! - `core`: Collection engine (records, scope, strategies, image parsing)
//! - `source`: Record sources (kubectl, pod list files, in-memory pages)

pub mod cli;
pub mod config;
pub mod core;
pub mod source;
