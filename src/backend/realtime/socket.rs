//! WebSocket endpoint and authenticate handshake.
//!
//! A client connects to `GET /ws` and immediately receives broadcast events
//! (the feed is public). To become addressable for targeted events it must
//! send an authenticate frame over the channel:
//!
//! ```json
//! {"type": "authenticate", "token": "<jwt>"}
//! ```
//!
//! An invalid token severs the connection immediately. A valid token
//! registers this socket as the user's live connection (last wins). When a
//! `banned` event arrives on the targeted queue, it is delivered as a final
//! warning and the server closes the socket.

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::Response,
};
use serde::Deserialize;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

use crate::backend::auth::sessions::verify_token;
use crate::backend::server::state::AppState;
use crate::shared::{EventType, RealtimeEvent};

/// Frames a client may send over the live channel
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientMessage {
    Authenticate { token: String },
}

/// Upgrade handler for `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let connection_id = Uuid::new_v4();
    let mut broadcast_rx = state.realtime_broadcast.subscribe();
    let (direct_tx, mut direct_rx) = mpsc::unbounded_channel::<RealtimeEvent>();
    let mut authenticated: Option<Uuid> = None;

    tracing::debug!("Live connection {} opened", connection_id);

    loop {
        tokio::select! {
            // Feed-visible events go to every connected socket.
            result = broadcast_rx.recv() => {
                match result {
                    Ok(event) => {
                        if !send_event(&mut socket, &event).await {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(
                            "Live connection {} lagged, skipped {} events",
                            connection_id,
                            skipped
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            // Targeted events for the authenticated user of this socket.
            event = direct_rx.recv() => {
                let Some(event) = event else { break };
                let sever = event.event_type == EventType::Banned;
                if !send_event(&mut socket, &event).await {
                    break;
                }
                if sever {
                    tracing::info!("Severing banned user's live connection {}", connection_id);
                    let _ = socket.send(Message::Close(None)).await;
                    break;
                }
            }
            // Frames from the client; only the handshake is meaningful.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ClientMessage>(text.as_str()) {
                            Ok(ClientMessage::Authenticate { token }) => {
                                match authenticate(&state, connection_id, &token, &direct_tx) {
                                    Some(user_id) => {
                                        tracing::info!(
                                            "Live connection {} authenticated as {}",
                                            connection_id,
                                            user_id
                                        );
                                        authenticated = Some(user_id);
                                    }
                                    None => {
                                        // Invalid token severs the connection.
                                        let _ = socket.send(Message::Close(None)).await;
                                        break;
                                    }
                                }
                            }
                            Err(_) => {
                                tracing::debug!(
                                    "Ignoring unknown frame on connection {}",
                                    connection_id
                                );
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = socket.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
        }
    }

    if let Some(user_id) = authenticated {
        state.connections.unregister(user_id, connection_id);
    }
    tracing::debug!("Live connection {} closed", connection_id);
}

/// Verify the handshake token and register this socket for targeted events.
///
/// Returns the authenticated user id, or `None` if the token is invalid.
fn authenticate(
    state: &AppState,
    connection_id: Uuid,
    token: &str,
    direct_tx: &mpsc::UnboundedSender<RealtimeEvent>,
) -> Option<Uuid> {
    let claims = match verify_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Live handshake rejected: {:?}", e);
            return None;
        }
    };

    let user_id = Uuid::parse_str(&claims.sub).ok()?;
    state
        .connections
        .register(user_id, connection_id, direct_tx.clone());

    Some(user_id)
}

/// Serialize and send one event; returns `false` when the peer is gone
async fn send_event(socket: &mut WebSocket, event: &RealtimeEvent) -> bool {
    match serde_json::to_string(event) {
        Ok(json) => socket.send(Message::Text(json.into())).await.is_ok(),
        Err(e) => {
            tracing::error!("Failed to serialize event: {:?}", e);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_frame_parses() {
        let frame = r#"{"type": "authenticate", "token": "abc.def.ghi"}"#;
        let message: ClientMessage = serde_json::from_str(frame).unwrap();
        let ClientMessage::Authenticate { token } = message;
        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn test_unknown_frame_rejected() {
        let frame = r#"{"type": "subscribe", "channel": "feed"}"#;
        assert!(serde_json::from_str::<ClientMessage>(frame).is_err());
    }
}
