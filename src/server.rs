use crate::results::ResultDB;
use crate::rpc::rpc_handler::handle_connection;
use std::io;
use std::net::TcpListener;
use std::ops::Deref;
use std::sync::{mpsc, Arc, Mutex, RwLock};
use std::thread;

pub const DEFAULT_LISTEN_AT: &str = "127.0.0.1:8080";
pub const DEFAULT_QUEUE_SIZE: usize = 10;
pub const DEFAULT_THREADS: u64 = 4;

pub fn start_server(listen_at: &str, queue_size: usize, threads: u64) -> Result<(), io::Error> {
    let listener = TcpListener::bind(listen_at)?;
    println!("Listening on {listen_at}");
    serve(listener, queue_size, threads);
    Ok(())
}

/// Accepts connections on `listener` forever, handing each one to a pool of
/// `threads` workers. Connections arriving while `queue_size` others are
/// waiting are dropped.
pub fn serve(listener: TcpListener, queue_size: usize, threads: u64) {
    let results: Arc<RwLock<ResultDB>> = Arc::new(RwLock::new(ResultDB::new()));

    let (sender, receiver) = mpsc::sync_channel(queue_size);
    let protected_receiver = Arc::new(Mutex::new(receiver));
    for _ in 0..threads {
        let rec = protected_receiver.clone();
        let r = results.clone();
        thread::spawn(move || loop {
            let socket = match rec.lock() {
                Ok(receiver) => match receiver.recv() {
                    Ok(socket) => socket,
                    Err(_) => return,
                },
                Err(_) => return,
            };
            if let Err(e) = handle_connection(r.deref(), socket) {
                println!("Error handling connection: {e}");
            }
        });
    }
    loop {
        match listener.accept() {
            Ok((socket, _)) => match sender.try_send(socket) {
                Ok(()) => {}
                Err(e) => println!("Queue full: {e}"),
            },
            Err(e) => println!("Error accepting connection: {e}"),
        }
    }
}
