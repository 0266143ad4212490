//! POST /api/council
//!
//! Opens a server-sent-event stream and runs one council session behind it.
//! The use case pushes typed events into a channel; this handler only
//! bridges that channel to the SSE framing. Preconditions that fail surface
//! as a terminal `error` event on the stream, matching the protocol the
//! client already speaks.

use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use calcouncil_application::{CouncilInput, RunCouncilUseCase};
use calcouncil_domain::{CouncilEvent, DisputeRecord, SupervisorReview};
use futures::stream::Stream;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use std::convert::Infallible;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing::error;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouncilRequest {
    #[serde(default)]
    pub expression: String,
    #[serde(default)]
    pub initial_result: String,
    #[serde(default)]
    pub disputes: Vec<DisputeRecord>,
    #[serde(default)]
    pub supervisor_reviews: Vec<SupervisorReviewEntry>,
}

/// A supervisor review as the client stores it: the flattened shape the
/// supervisor endpoint responded with, not the domain entity's own names
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupervisorReviewEntry {
    #[serde(default)]
    pub supervisor_level: u8,
    #[serde(default)]
    pub supervisor_title: String,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub final_answer: String,
    #[serde(default)]
    pub recommendation: String,
    #[serde(default)]
    pub confidence: Option<u8>,
    #[serde(default)]
    pub closing_statement: Option<String>,
    #[serde(default)]
    pub is_final: bool,
}

impl From<SupervisorReviewEntry> for SupervisorReview {
    fn from(entry: SupervisorReviewEntry) -> Self {
        Self {
            level: entry.supervisor_level,
            title: entry.supervisor_title,
            agent_name: entry.agent_name,
            explanation: entry.explanation,
            final_answer: entry.final_answer,
            recommendation: entry.recommendation,
            confidence: entry.confidence,
            closing_statement: entry.closing_statement,
            is_final: entry.is_final,
        }
    }
}

impl From<CouncilRequest> for CouncilInput {
    fn from(request: CouncilRequest) -> Self {
        Self {
            expression: request.expression,
            initial_result: request.initial_result,
            disputes: request.disputes,
            supervisor_reviews: request
                .supervisor_reviews
                .into_iter()
                .map(SupervisorReview::from)
                .collect(),
        }
    }
}

pub async fn council(
    State(state): State<AppState>,
    Json(request): Json<CouncilRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel::<CouncilEvent>(64);
    let use_case = RunCouncilUseCase::new(state.gateway.clone(), state.pacing);

    tokio::spawn(async move {
        let mut rng = StdRng::from_os_rng();
        if let Err(e) = use_case.run(request.into(), &mut rng, &tx).await {
            error!(%e, "Council session rejected");
            let _ = tx
                .send(CouncilEvent::Error {
                    message: e.to_string(),
                })
                .await;
        }
    });

    let stream = ReceiverStream::new(rx).map(|event| Ok(sse_event(&event)));
    Sse::new(stream).keep_alive(KeepAlive::new())
}

fn sse_event(event: &CouncilEvent) -> Event {
    // CouncilEvent serialization cannot fail; the fallback satisfies the
    // signature without panicking in a handler
    Event::default().json_data(event).unwrap_or_else(|_| {
        Event::default().data(r#"{"type":"error","message":"event serialization failed"}"#)
    })
}
