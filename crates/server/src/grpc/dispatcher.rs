//! Predict request dispatcher
//!
//! The single handler behind `PredictionService/Predict`. Each call computes its
//! remaining budget from the client deadline, runs the engine on the blocking
//! pool and turns a failed outcome into a bounded gRPC status.

use crate::deadline::{deadline_from_metadata, remaining_budget, RunOptions};
use crate::engine::ExecutionEngine;
use modelserver_common::{translate, EngineStatus, StatusCode, METRICS};
use modelserver_proto::{PredictRequest, PredictResponse, PredictionService};
use std::sync::Arc;
use std::time::Instant;
use tonic::{Request, Response, Status};
use tracing::debug;
use uuid::Uuid;

/// Dispatches predict calls to a shared execution engine
#[derive(Clone)]
pub struct RequestDispatcher {
    engine: Arc<dyn ExecutionEngine>,
}

impl RequestDispatcher {
    /// Create a dispatcher over an initialized engine
    pub fn new(engine: Arc<dyn ExecutionEngine>) -> Self {
        Self { engine }
    }

    /// Run one predict call that must finish by `deadline`.
    ///
    /// Engine failures come back as translated statuses; they never escape as
    /// anything else. A call still running when its budget runs out fails
    /// with `DEADLINE_EXCEEDED`.
    pub async fn predict_until(
        &self,
        request: PredictRequest,
        deadline: Option<Instant>,
    ) -> Result<PredictResponse, Status> {
        let started = Instant::now();
        let request_id = Uuid::new_v4();
        let options = RunOptions::with_budget(remaining_budget(deadline, started));
        let model = request
            .model_spec
            .as_ref()
            .map(|spec| spec.name.clone())
            .unwrap_or_default();

        let in_flight = InFlightCall::start(started, request_id, &model);

        let engine = Arc::clone(&self.engine);
        let task = tokio::task::spawn_blocking(move || engine.predict(&options, &request));
        let outcome = match options.timeout {
            Some(budget) => match tokio::time::timeout(budget, task).await {
                Ok(joined) => joined_outcome(joined),
                Err(_) => Err(EngineStatus::deadline_exceeded(format!(
                    "Deadline of {} ms exceeded while executing the request",
                    budget.as_millis()
                ))),
            },
            None => joined_outcome(task.await),
        };
        in_flight.finish();

        match outcome {
            Ok(response) => Ok(response),
            Err(status) => {
                METRICS
                    .predict
                    .failures_total
                    .with_label_values(&[status.code.as_str()])
                    .inc();
                debug!(
                    %request_id,
                    model = %model,
                    timeout_ms = ?options.timeout_millis(),
                    "Predict failed: {}",
                    status
                );
                Err(translate(&status))
            }
        }
    }
}

fn joined_outcome(
    joined: Result<Result<PredictResponse, EngineStatus>, tokio::task::JoinError>,
) -> Result<PredictResponse, EngineStatus> {
    joined.unwrap_or_else(|e| Err(EngineStatus::internal(format!("Predict task failed: {}", e))))
}

/// Keeps one call in the in-flight gauge until it is dropped.
///
/// Dropped without `finish` means the handler future was cancelled, e.g. by
/// the transport when the client deadline passed or the client went away.
struct InFlightCall {
    started: Instant,
    request_id: Uuid,
    model: String,
    finished: bool,
}

impl InFlightCall {
    fn start(started: Instant, request_id: Uuid, model: &str) -> Self {
        METRICS.predict.requests_total.inc();
        METRICS.predict.in_flight.inc();
        Self {
            started,
            request_id,
            model: model.to_string(),
            finished: false,
        }
    }

    fn finish(mut self) {
        self.finished = true;
    }
}

impl Drop for InFlightCall {
    fn drop(&mut self) {
        METRICS.predict.in_flight.dec();
        METRICS
            .predict
            .duration
            .observe(self.started.elapsed().as_secs_f64());

        if !self.finished {
            METRICS
                .predict
                .failures_total
                .with_label_values(&[StatusCode::Cancelled.as_str()])
                .inc();
            debug!(
                request_id = %self.request_id,
                model = %self.model,
                "Predict cancelled before the engine returned"
            );
        }
    }
}

#[tonic::async_trait]
impl PredictionService for RequestDispatcher {
    async fn predict(
        &self,
        request: Request<PredictRequest>,
    ) -> Result<Response<PredictResponse>, Status> {
        let received = Instant::now();
        let deadline = deadline_from_metadata(request.metadata(), received);

        self.predict_until(request.into_inner(), deadline)
            .await
            .map(Response::new)
    }
}
