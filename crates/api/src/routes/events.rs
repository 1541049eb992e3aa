use std::convert::Infallible;

use advisory_site_core::events::SiteEvent;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::get;
use axum::Router;
use futures::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::auth::AdminUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/admin/events", get(listen))
}

fn to_sse(event: &SiteEvent) -> Event {
    let event_name = event.name();
    Event::default().event(event_name).json_data(event).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "failed to encode event");
        Event::default().event(event_name).comment("encoding error")
    })
}

/// Document-change stream for the admin UI. Starts with a welcome event;
/// a listener that falls behind skips what it missed.
async fn listen(State(state): State<AppState>, _admin: AdminUser) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receiver = state.event_bus().subscribe();
    tracing::info!(subscribers = state.event_bus().subscriber_count(), "event listener connected");

    let updates = stream::unfold(receiver, |mut receiver| async move {
        loop {
            match receiver.recv().await {
                Ok(event) => return Some((event, receiver)),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event listener lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    let events = stream::once(async { SiteEvent::Welcome })
        .chain(updates)
        .map(|event| Ok(to_sse(&event)));

    Sse::new(events).keep_alive(KeepAlive::default())
}
