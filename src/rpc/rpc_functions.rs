use crate::graph::{
    self, CapacityRangeError, DEFAULT_MAX_CAPACITY, DEFAULT_MIN_CAPACITY, SINK, SOURCE,
};
use crate::results::{NewGameResult, ResultDB};
use crate::rpc::call_context::CallContext;
use crate::types::{Edge, NodeId};
use json::JsonValue;
use regex::Regex;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::sync::{OnceLock, RwLock};

pub const MIN_CAPACITY_BOUND: u64 = 1;
pub const MAX_CAPACITY_BOUND: u64 = 100;

/// Largest capacity accepted on a submitted edge, keeps every flow a JSON integer.
pub const MAX_EDGE_CAPACITY: u64 = u32::MAX as u64;

fn node_label() -> &'static Regex {
    static NODE_LABEL: OnceLock<Regex> = OnceLock::new();
    NODE_LABEL.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{1,32}$").unwrap())
}

pub struct JsonRpcRequest {
    pub id: JsonValue,
    pub method: String,
    pub params: JsonValue,
}

pub struct InputValidationError(pub String);

impl Error for InputValidationError {}

impl Debug for InputValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.0)
    }
}

impl Display for InputValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.0)
    }
}

impl From<CapacityRangeError> for InputValidationError {
    fn from(e: CapacityRangeError) -> Self {
        InputValidationError(e.to_string())
    }
}

pub fn generate_network(
    request: &JsonRpcRequest,
    call_context: &CallContext,
) -> Result<JsonValue, Box<dyn Error>> {
    let min_capacity = optional_integer(&request.params["minCapacity"], "minCapacity")?
        .unwrap_or(DEFAULT_MIN_CAPACITY);
    let max_capacity = optional_integer(&request.params["maxCapacity"], "maxCapacity")?
        .unwrap_or(DEFAULT_MAX_CAPACITY);
    if min_capacity < MIN_CAPACITY_BOUND
        || max_capacity > MAX_CAPACITY_BOUND
        || min_capacity >= max_capacity
    {
        return Err(Box::new(InputValidationError(format!(
            "Invalid capacity range {min_capacity}..{max_capacity}. \
             Min should be less than max and within {MIN_CAPACITY_BOUND}-{MAX_CAPACITY_BOUND}."
        ))));
    }

    let network = graph::generate_network(min_capacity, max_capacity, &mut rand::thread_rng())
        .map_err(InputValidationError::from)?;
    call_context.log_message(&format!(
        "Generated network with {} edges, capacities {min_capacity}..={max_capacity}",
        network.len()
    ));
    Ok(JsonValue::from(
        network.iter().map(Edge::to_json).collect::<Vec<_>>(),
    ))
}

pub fn calculate_max_flow(
    request: &JsonRpcRequest,
    call_context: &CallContext,
) -> Result<JsonValue, Box<dyn Error>> {
    let network = validate_and_parse_network(&request.params["network"])?;
    let (source, sink) = parse_terminals(&request.params)?;
    call_context.log_message(&format!(
        "Computing max flow {source} -> {sink} over {} edges",
        network.len()
    ));
    let comparison = graph::compare_strategies(&network, &source, &sink, call_context);
    Ok(comparison.to_json())
}

pub fn submit_answer(
    request: &JsonRpcRequest,
    results: &RwLock<ResultDB>,
    call_context: &CallContext,
) -> Result<JsonValue, Box<dyn Error>> {
    let params = &request.params;
    let player_id = required_integer(&params["playerId"], "playerId")?;
    let player_name = validate_player_name(&params["playerName"])?;
    let network = validate_and_parse_network(&params["network"])?;
    let player_answer = required_integer(&params["playerAnswer"], "playerAnswer")?;
    let time_taken = optional_integer(&params["timeTaken"], "timeTaken")?.unwrap_or_default();
    let (source, sink) = parse_terminals(params)?;

    let check = graph::check_answer(&network, &source, &sink, player_answer, call_context);
    call_context.log_message(&format!(
        "Player {player_id} answered {player_answer}, correct is {}",
        check.correct_answer
    ));

    let game_result = if check.is_correct {
        let mut results = results
            .write()
            .map_err(|_| "Result store lock is poisoned")?;
        let saved = results.record(NewGameResult {
            player_id,
            player_name,
            network,
            player_answer,
            correct_answer: check.correct_answer,
            is_correct: check.is_correct,
            ford_fulkerson_time_ms: check.ford_fulkerson_time_ms,
            edmonds_karp_time_ms: check.edmonds_karp_time_ms,
            time_taken,
        });
        call_context.log_message(&format!("Saved game result {}", saved.id));
        saved.to_json()
    } else {
        JsonValue::Null
    };

    Ok(json::object! {
        isCorrect: check.is_correct,
        playerAnswer: check.player_answer,
        correctAnswer: graph::flow_to_json(check.correct_answer),
        fordFulkersonTime: check.ford_fulkerson_time_ms,
        edmondsKarpTime: check.edmonds_karp_time_ms,
        saved: check.is_correct,
        gameResult: game_result,
    })
}

pub fn player_history(
    request: &JsonRpcRequest,
    results: &RwLock<ResultDB>,
    call_context: &CallContext,
) -> Result<JsonValue, Box<dyn Error>> {
    let player_id = required_integer(&request.params["playerId"], "playerId")?;
    let results = results.read().map_err(|_| "Result store lock is poisoned")?;
    let history = results.player_history(player_id);
    call_context.log_message(&format!(
        "{} results for player {player_id}",
        history.len()
    ));
    Ok(JsonValue::from(
        history.into_iter().map(|r| r.to_json()).collect::<Vec<_>>(),
    ))
}

pub fn leaderboard(
    results: &RwLock<ResultDB>,
    call_context: &CallContext,
) -> Result<JsonValue, Box<dyn Error>> {
    let results = results.read().map_err(|_| "Result store lock is poisoned")?;
    let entries = results.leaderboard();
    call_context.log_message(&format!("Leaderboard with {} players", entries.len()));
    Ok(JsonValue::from(
        entries.iter().map(|e| e.to_json()).collect::<Vec<_>>(),
    ))
}

pub fn all_results(
    results: &RwLock<ResultDB>,
    call_context: &CallContext,
) -> Result<JsonValue, Box<dyn Error>> {
    let results = results.read().map_err(|_| "Result store lock is poisoned")?;
    let all = results.all_results();
    call_context.log_message(&format!("Returning {} results", all.len()));
    Ok(JsonValue::from(
        all.into_iter().map(|r| r.to_json()).collect::<Vec<_>>(),
    ))
}

pub fn validate_and_parse_network(value: &JsonValue) -> Result<Vec<Edge>, InputValidationError> {
    if !value.is_array() || value.is_empty() {
        return Err(InputValidationError(
            "Invalid network format: expected a non-empty array of edges".to_string(),
        ));
    }
    value
        .members()
        .map(|edge| -> Result<Edge, InputValidationError> {
            Ok(Edge {
                from: validate_and_parse_node(&edge["from"], "from")?,
                to: validate_and_parse_node(&edge["to"], "to")?,
                capacity: validate_and_parse_capacity(&edge["capacity"])?,
            })
        })
        .collect()
}

fn validate_and_parse_capacity(value: &JsonValue) -> Result<u64, InputValidationError> {
    let capacity = required_integer(value, "capacity")?;
    if capacity > MAX_EDGE_CAPACITY {
        return Err(InputValidationError(format!(
            "Capacity {capacity} is too large. Maximum value is {MAX_EDGE_CAPACITY}."
        )));
    }
    Ok(capacity)
}

fn validate_and_parse_node(value: &JsonValue, name: &str) -> Result<NodeId, InputValidationError> {
    match value.as_str() {
        Some(s) if node_label().is_match(s) => Ok(NodeId::from(s)),
        _ => Err(InputValidationError(format!(
            "Invalid node label for {name}: {value}"
        ))),
    }
}

fn validate_player_name(value: &JsonValue) -> Result<String, InputValidationError> {
    match value.as_str() {
        Some(name) if (3..=100).contains(&name.chars().count()) => Ok(name.to_string()),
        _ => Err(InputValidationError(format!(
            "Invalid playerName: {value}. Expected 3 to 100 characters."
        ))),
    }
}

fn parse_terminals(params: &JsonValue) -> Result<(NodeId, NodeId), InputValidationError> {
    let terminal = |name: &str, default: &str| match &params[name] {
        JsonValue::Null => Ok(NodeId::from(default)),
        value => value
            .as_str()
            .map(NodeId::from)
            .ok_or_else(|| InputValidationError(format!("Invalid {name}: {value}"))),
    };
    Ok((terminal("source", SOURCE)?, terminal("sink", SINK)?))
}

fn optional_integer(value: &JsonValue, name: &str) -> Result<Option<u64>, InputValidationError> {
    if value.is_null() {
        Ok(None)
    } else {
        required_integer(value, name).map(Some)
    }
}

/// Accepts only exact non-negative integers: `2.0` passes, `2.5` and `-1` do not.
fn required_integer(value: &JsonValue, name: &str) -> Result<u64, InputValidationError> {
    let invalid =
        || InputValidationError(format!("{name} must be a non-negative integer, got {value}"));
    let (positive, mantissa, exponent) = value.as_number().ok_or_else(invalid)?.as_parts();
    if mantissa == 0 {
        return Ok(0);
    }
    if !positive {
        return Err(invalid());
    }
    if exponent >= 0 {
        10u64
            .checked_pow(exponent as u32)
            .and_then(|p| mantissa.checked_mul(p))
            .ok_or_else(invalid)
    } else {
        let divisor = 10u64
            .checked_pow(exponent.unsigned_abs() as u32)
            .ok_or_else(invalid)?;
        if mantissa % divisor == 0 {
            Ok(mantissa / divisor)
        } else {
            Err(invalid())
        }
    }
}
