//! Server-Sent Events feed: one `snapshot` event on connect, then one per
//! refresh tick.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use super::state::DashboardState;
use crate::market::MarketSnapshot;

fn snapshot_event(snapshot: &MarketSnapshot) -> Result<Event, Infallible> {
    let event = match Event::default().event("snapshot").json_data(snapshot) {
        | Ok(event) => event,
        | Err(e) => {
            warn!("Failed to serialize SSE snapshot: {}", e);
            Event::default().event("error").data(e.to_string())
        }
    };
    Ok(event)
}

pub async fn events_handler(
    State(state): State<DashboardState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // subscribe before reading so no tick falls between the two
    let rx = state.store.subscribe();
    let initial = state.store.get().await;

    let updates = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                | Ok(snapshot) => return Some((snapshot_event(&snapshot), rx)),
                | Err(RecvError::Lagged(n)) => {
                    warn!("SSE client lagged by {} snapshots", n);
                }
                | Err(RecvError::Closed) => {
                    debug!("snapshot channel closed");
                    return None;
                }
            }
        }
    });

    let events = stream::once(async move { snapshot_event(&initial) }).chain(updates);
    Sse::new(events).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)).text("keep-alive"))
}
