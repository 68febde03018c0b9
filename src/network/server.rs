//! HTTP Server
//!
//! JSON front end for the bridge: `POST /modula` with body
//! `{"comando": "<raw command>"}`, answered with
//! `{"comando", "status", "risposta", "info", "errori"}`.
//!
//! Every response carries permissive CORS headers, and each request runs
//! on its own pool worker, so a slow CALL poll never stalls unrelated
//! commands.

use std::sync::Arc;

use rouille::{Request, Response};
use serde::{Deserialize, Serialize};

use crate::bridge::Bridge;
use crate::config::Config;
use crate::error::{BridgeError, Result};
use crate::translate::Outcome;

/// Inbound command payload
#[derive(Debug, Deserialize)]
struct CommandRequest {
    comando: String,
}

/// Reply payload for `POST /modula`
///
/// Field names are part of the wire contract with existing callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandReply {
    pub comando: String,
    pub status: String,
    pub risposta: String,
    pub info: Vec<String>,
    pub errori: Vec<String>,
}

impl CommandReply {
    fn new(comando: impl Into<String>) -> Self {
        Self {
            comando: comando.into(),
            status: String::new(),
            risposta: String::new(),
            info: Vec::new(),
            errori: Vec::new(),
        }
    }

    /// Build the reply for a translated outcome
    fn from_outcome(comando: &str, outcome: &Outcome) -> Self {
        let mut reply = Self::new(comando);
        match outcome {
            Outcome::Accepted { message } => {
                reply.status = "OK".to_string();
                reply.risposta = message.clone();
            }
            other => reply.errori.push(other.message().to_string()),
        }
        reply
    }

    /// Reply for a request without a usable `comando` key
    ///
    /// The error string is wire-compatible with the original agent.
    fn missing_command() -> Self {
        let mut reply = Self::new("");
        reply.errori.push("comando non presente nel JSON".to_string());
        reply
    }
}

/// HTTP server for the bridge
pub struct Server {
    listen_addr: String,
    pool_size: usize,
    bridge: Arc<Bridge>,
}

impl Server {
    /// Create a new server for the given bridge
    pub fn new(config: &Config, bridge: Arc<Bridge>) -> Self {
        Self {
            listen_addr: config.listen_addr.clone(),
            pool_size: config.max_connections,
            bridge,
        }
    }

    /// Start the server (blocking)
    pub fn run(self) -> Result<()> {
        let bridge = self.bridge;
        let server = rouille::Server::new(&self.listen_addr, move |request| {
            handle_request(request, &bridge)
        })
        .map_err(|e| BridgeError::Server(format!("cannot bind {}: {}", self.listen_addr, e)))?;

        tracing::info!(addr = %self.listen_addr, "HTTP server listening");
        server.pool_size(self.pool_size).run();
        Ok(())
    }
}

/// Route an HTTP request
///
/// Public so tests can drive it with fabricated requests.
pub fn handle_request(request: &Request, bridge: &Bridge) -> Response {
    tracing::debug!(method = request.method(), url = %request.url(), "HTTP request");

    // CORS preflight
    if request.method() == "OPTIONS" {
        return with_cors(Response::text(""));
    }

    let response = match (request.method(), request.url().as_str()) {
        ("POST", "/modula") => handle_modula(request, bridge),
        _ => Response::empty_404(),
    };

    with_cors(response)
}

/// Handle `POST /modula`
fn handle_modula(request: &Request, bridge: &Bridge) -> Response {
    let payload: Option<CommandRequest> = request
        .data()
        .and_then(|body| serde_json::from_reader(body).ok());

    let Some(CommandRequest { comando }) = payload else {
        tracing::error!("comando key missing from request JSON");
        return Response::json(&CommandReply::missing_command());
    };

    let outcome = bridge.execute(&comando);
    tracing::info!(command = %comando, %outcome, "command finished");

    Response::json(&CommandReply::from_outcome(&comando, &outcome))
}

/// Attach the permissive CORS headers expected by existing callers
fn with_cors(response: Response) -> Response {
    response
        .with_additional_header("Access-Control-Allow-Origin", "*")
        .with_additional_header("Access-Control-Allow-Headers", "Content-Type,Authorization")
        .with_additional_header("Access-Control-Allow-Methods", "GET,PUT,POST,DELETE,OPTIONS")
}
