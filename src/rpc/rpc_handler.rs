use crate::results::ResultDB;
use crate::rpc::call_context::CallContext;
use crate::rpc::rpc_functions::{
    all_results, calculate_max_flow, generate_network, leaderboard, player_history,
    submit_answer, InputValidationError, JsonRpcRequest,
};
use json::JsonValue;
use std::error::Error;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;
use std::sync::RwLock;

pub const INVALID_PARAMS: i64 = -32602;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const SERVER_ERROR: i64 = -32000;

pub fn handle_connection(
    results: &RwLock<ResultDB>,
    mut socket: TcpStream,
) -> Result<(), Box<dyn Error>> {
    let request = read_request(&mut socket)?;
    let client_ip = socket.peer_addr()?.to_string();

    let call_context = CallContext::new(&client_ip, &request.id, &request.method);

    let outcome = match request.method.as_str() {
        "generate_network" => Some(generate_network(&request, &call_context)),
        "calculate_max_flow" => Some(calculate_max_flow(&request, &call_context)),
        "submit_answer" => Some(submit_answer(&request, results, &call_context)),
        "player_history" => Some(player_history(&request, results, &call_context)),
        "leaderboard" => Some(leaderboard(results, &call_context)),
        "results" => Some(all_results(results, &call_context)),
        _ => None,
    };

    let (result, error) = match outcome {
        Some(Ok(result)) => (Some(result), None),
        Some(Err(e)) => {
            let message = format!("Error in {}: {}", request.method, e);
            (None, Some((error_code(e.as_ref()), message)))
        }
        None => (None, Some((METHOD_NOT_FOUND, "Method not found".to_string()))),
    };
    respond(&mut socket, request.id, result, error, &call_context)
}

fn error_code(e: &(dyn Error + 'static)) -> i64 {
    if e.downcast_ref::<InputValidationError>().is_some() {
        INVALID_PARAMS
    } else {
        SERVER_ERROR
    }
}

fn respond(
    socket: &mut TcpStream,
    id: JsonValue,
    result: Option<JsonValue>,
    error: Option<(i64, String)>,
    call_context: &CallContext,
) -> Result<(), Box<dyn Error>> {
    if let Some((code, message)) = error.as_ref() {
        call_context.log_message(&format!("Error (code: {}): {}", code, message));
    }
    let response_json = jsonrpc_serialize_response(
        id,
        result,
        error.as_ref().map(|(c, m)| (*c, m.as_str())),
    )?;
    socket.write_all(jsonrpc_response(response_json).as_bytes())?;
    Ok(())
}

fn read_payload(socket: &mut TcpStream) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut reader = BufReader::new(socket);
    let mut length = 0;
    for result in reader.by_ref().lines() {
        let l = result?;
        if l.is_empty() {
            break;
        }

        let header = "content-length: ";
        if l.to_lowercase().starts_with(header) {
            length = l[header.len()..].trim().parse::<usize>()?;
        }
    }
    let mut payload = vec![0u8; length];

    reader.read_exact(payload.as_mut_slice())?;
    Ok(payload)
}

fn read_request(socket: &mut TcpStream) -> Result<JsonRpcRequest, Box<dyn Error>> {
    let payload = read_payload(socket)?;
    let mut request = json::parse(&String::from_utf8(payload)?)?;
    let id = request["id"].take();
    let params = request["params"].take();
    match request["method"].as_str() {
        Some(method) => Ok(JsonRpcRequest {
            id,
            method: method.to_string(),
            params,
        }),
        _ => Err(From::from(format!("Invalid JSON-RPC request: {}", request))),
    }
}

fn jsonrpc_serialize_response(
    id: JsonValue,
    result: Option<JsonValue>,
    error: Option<(i64, &str)>,
) -> Result<String, Box<dyn Error>> {
    let mut response = json::object! {
        jsonrpc: "2.0",
        id: id,
    };
    if let Some((code, message)) = error {
        response.insert("error", json::object! {
            code: code,
            message: message,
        })?;
    } else {
        response.insert("result", result.unwrap_or(JsonValue::Null))?;
    }
    Ok(response.dump())
}

fn jsonrpc_response(json_payload: String) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
        json_payload.len(),
        json_payload
    )
}
