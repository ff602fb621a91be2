use std::env;
use std::process;

use traffic_flow::server;

fn main() {
    let listen_at = env::args()
        .nth(1)
        .unwrap_or_else(|| server::DEFAULT_LISTEN_AT.to_string());
    let threads = match env::args().nth(2).map(|t| t.parse::<u64>()) {
        None => server::DEFAULT_THREADS,
        Some(Ok(threads)) if threads > 0 => threads,
        Some(_) => {
            println!("Usage: server [<listen_at>] [<threads>]");
            process::exit(1);
        }
    };
    if let Err(e) = server::start_server(&listen_at, server::DEFAULT_QUEUE_SIZE, threads) {
        println!("Could not start server on {listen_at}: {e}");
        process::exit(1);
    }
}
