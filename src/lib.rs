pub mod graph;
pub mod io;
pub mod results;
pub mod rpc;
pub mod server;
pub mod types;
