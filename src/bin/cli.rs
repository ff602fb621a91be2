use std::env;
use std::error::Error;
use std::process;

use traffic_flow::graph::{self, Strategy};
use traffic_flow::io;
use traffic_flow::rpc::call_context::CallContext;
use traffic_flow::types::{Edge, NodeId};

fn usage() {
    println!("Usage: cli [--csv] <network-file> [<source> <sink>]");
    println!("Usage: cli --generate <min_capacity> <max_capacity> [<out-file>]");
    println!("Network files are JSON arrays of {{\"from\", \"to\", \"capacity\"}} objects.");
    println!("Option --csv reads from,to,capacity lines instead.");
}

fn main() {
    let args = env::args().skip(1).collect::<Vec<_>>();
    let outcome = match args.first().map(String::as_str) {
        Some("--generate") => generate(&args[1..]),
        Some("--csv") => solve(&args[1..], true),
        Some(_) => solve(&args, false),
        None => {
            usage();
            return;
        }
    };
    if let Err(e) = outcome {
        println!("{e}");
        process::exit(1);
    }
}

fn generate(args: &[String]) -> Result<(), Box<dyn Error>> {
    if args.len() < 2 || args.len() > 3 {
        usage();
        return Ok(());
    }
    let min_capacity = args[0].parse::<u64>()?;
    let max_capacity = args[1].parse::<u64>()?;
    let network = graph::generate_network(min_capacity, max_capacity, &mut rand::thread_rng())?;
    match args.get(2) {
        Some(out_file) => {
            io::write_edges_json(&network, out_file)?;
            println!("Wrote network with {} edges to {out_file}.", network.len());
        }
        None => {
            for Edge { from, to, capacity } in &network {
                println!("{from} -> {to}: {capacity}");
            }
        }
    }
    report(&network, &graph::SOURCE.into(), &graph::SINK.into());
    Ok(())
}

fn solve(args: &[String], csv: bool) -> Result<(), Box<dyn Error>> {
    let (file, source, sink) = match args {
        [file] => (file, NodeId::from(graph::SOURCE), NodeId::from(graph::SINK)),
        [file, source, sink] => (file, NodeId::from(source.as_str()), NodeId::from(sink.as_str())),
        _ => {
            usage();
            return Ok(());
        }
    };
    let network = if csv {
        io::read_edges_csv(file)
    } else {
        io::read_edges_json(file)
    }
    .map_err(|e| format!("Error loading network from file \"{file}\": {e}"))?;
    println!("Read {} edges", network.len());
    report(&network, &source, &sink);
    Ok(())
}

fn report(network: &[Edge], source: &NodeId, sink: &NodeId) {
    println!("Computing flow {source} -> {sink}");
    let comparison = graph::compare_strategies(network, source, sink, &CallContext::default());
    let result = json::object! {
        source: source.as_str(),
        sink: sink.as_str(),
        maxFlow: graph::flow_to_json(comparison.max_flow),
        agree: comparison.agree(),
        timings: Strategy::ALL.iter().map(|s| {
            let r = match s {
                Strategy::FordFulkerson => comparison.ford_fulkerson,
                Strategy::EdmondsKarp => comparison.edmonds_karp,
            };
            json::object! {
                algorithm: s.to_string(),
                maxFlow: graph::flow_to_json(r.max_flow),
                executionTimeMs: r.execution_time_ms,
            }
        }).collect::<Vec<_>>(),
    };
    println!("{result}");
}
