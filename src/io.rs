use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use crate::types::{Edge, NodeId};

/// Reads a network in `from,to,capacity` lines. Edge order is preserved,
/// it determines the order in which the depth-first search visits neighbours.
pub fn read_edges_csv(path: &str) -> Result<Vec<Edge>, io::Error> {
    parse_edges_csv(BufReader::new(File::open(path)?))
}

pub fn parse_edges_csv<R: BufRead>(reader: R) -> Result<Vec<Edge>, io::Error> {
    let mut edges = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match &line.split(',').map(str::trim).collect::<Vec<_>>()[..] {
            [from, to, capacity] => {
                let capacity = unescape(capacity).parse::<u64>().map_err(|e| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("Invalid capacity in {line}: {e}"),
                    )
                })?;
                edges.push(Edge {
                    from: NodeId::from(unescape(from)),
                    to: NodeId::from(unescape(to)),
                    capacity,
                });
            }
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("Expected from,to,capacity, but got {line}"),
                ))
            }
        }
    }
    Ok(edges)
}

pub fn write_edges_csv(edges: &[Edge], path: &str) -> Result<(), io::Error> {
    let mut file = BufWriter::new(File::create(path)?);
    for Edge { from, to, capacity } in edges {
        writeln!(file, "{from},{to},{capacity}")?;
    }
    file.flush()
}

/// Reads a network stored as a JSON array of `{"from", "to", "capacity"}` objects.
pub fn read_edges_json(path: &str) -> Result<Vec<Edge>, io::Error> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(io::Error::from)
}

pub fn write_edges_json(edges: &[Edge], path: &str) -> Result<(), io::Error> {
    let mut file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut file, edges)?;
    file.flush()
}

fn unescape(input: &str) -> &str {
    match input.chars().next() {
        Some(quote @ ('"' | '\'')) if input.len() >= 2 && input.ends_with(quote) => {
            &input[1..input.len() - 1]
        }
        _ => input,
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("traffic_flow_{}_{name}", std::process::id()))
    }

    fn network() -> Vec<Edge> {
        vec![
            Edge::new("A", "C", 4),
            Edge::new("A", "B", 10),
            Edge::new("B", "T", 7),
        ]
    }

    #[test]
    fn csv_keeps_edge_order() {
        let path = temp_file("order.csv");
        let path = path.to_str().unwrap();
        write_edges_csv(&network(), path).unwrap();
        assert_eq!(read_edges_csv(path).unwrap(), network());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn csv_quotes_and_blank_lines() {
        let input = "\"A\",'B',10\n\n B , T , \"7\"\n";
        assert_eq!(
            parse_edges_csv(input.as_bytes()).unwrap(),
            vec![Edge::new("A", "B", 10), Edge::new("B", "T", 7)]
        );
    }

    #[test]
    fn csv_rejects_malformed_lines() {
        assert!(parse_edges_csv("A,B\n".as_bytes()).is_err());
        assert!(parse_edges_csv("A,B,-3\n".as_bytes()).is_err());
        assert!(parse_edges_csv("A,B,2.5\n".as_bytes()).is_err());
    }

    #[test]
    fn json_files() {
        let path = temp_file("network.json");
        let path = path.to_str().unwrap();
        write_edges_json(&network(), path).unwrap();
        assert_eq!(read_edges_json(path).unwrap(), network());
        std::fs::write(path, r#"[{"from": "A", "to": "B", "capacity": -1}]"#).unwrap();
        assert!(read_edges_json(path).is_err());
        std::fs::remove_file(path).unwrap();
    }
}
