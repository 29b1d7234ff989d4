//! Shared fixtures for client tests: a recording mock transport and
//! canned responses.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{Value, json};
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

use crate::config::ClientConfig;
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Mock transport that returns queued outcomes and records every request.
#[derive(Debug, Default)]
pub struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
    delay: Option<Duration>,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            ..Self::default()
        }
    }

    /// A single JSON response.
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(vec![Ok(json_response(status, body, &[]))])
    }

    /// A single JSON response with extra headers.
    pub fn json_with_headers(status: u16, body: &Value, headers: &[(&str, &str)]) -> Self {
        Self::new(vec![Ok(json_response(status, body, headers))])
    }

    /// A single transport failure.
    pub fn failing(error: HttpError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Waits `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.captured_requests()
            .pop()
            .expect("no request was sent")
    }

    pub fn last_body(&self) -> Value {
        let body = self.last_request().body.expect("request had no body");
        serde_json::from_slice(&body).unwrap()
    }
}

impl HttpClient for MockClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses.lock().unwrap().remove(0)
    }
}

pub fn json_response(status: u16, body: &Value, headers: &[(&str, &str)]) -> HttpResponse {
    let mut map = http::HeaderMap::new();
    for (name, value) in headers {
        map.insert(
            http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
            http::HeaderValue::from_str(value).unwrap(),
        );
    }
    HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        map,
        serde_json::to_vec(body).unwrap(),
    )
}

pub fn keyed_config() -> ClientConfig {
    ClientConfig::builder().api_key("test_key").build().unwrap()
}

pub fn demo_config() -> ClientConfig {
    ClientConfig::builder().build().unwrap()
}

pub fn evaluate_body() -> Value {
    json!({
        "request_id": "req_test123",
        "timestamp": "2024-01-15T12:00:00Z",
        "risks": [{
            "subject": "self",
            "type": "suicide",
            "severity": "moderate",
            "imminence": "subacute",
            "features": ["hopelessness", "passive_ideation"]
        }],
        "rationale": "User expresses hopelessness and passive suicidal ideation.",
        "speaker_severity": "moderate",
        "speaker_imminence": "subacute",
        "show_resources": true,
        "resources": {
            "primary": {
                "type": "crisis_line",
                "name": "988 Suicide & Crisis Lifeline",
                "phone": "988",
                "why": "National crisis line for suicide prevention"
            },
            "secondary": [{
                "type": "text_line",
                "name": "Crisis Text Line",
                "phone": "741741",
                "why": "Text-based crisis support"
            }]
        },
        "metadata": {"api_version": "v1", "input_format": "structured"}
    })
}

pub fn screen_body() -> Value {
    json!({
        "suicidal_ideation": false,
        "self_harm": false,
        "show_resources": false,
        "rationale": "No risk indicators."
    })
}

pub fn analysis_body() -> Value {
    json!({
        "conversation_id": "conv-1",
        "overall_concern": "medium",
        "trajectory": "stable",
        "detected_behaviors": [{"code": "sycophancy", "severity": "medium", "turn_number": 2}]
    })
}

/// Installs a test subscriber so `tracing` output shows up with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Records the message of every WARN event seen on the current thread.
#[derive(Debug, Clone, Default)]
pub struct WarningLog {
    messages: Arc<Mutex<Vec<String>>>,
}

impl WarningLog {
    /// Installs the log as this thread's subscriber until the guard drops.
    pub fn install() -> (Self, DefaultGuard) {
        let log = Self::default();
        let guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(log.clone()));
        (log, guard)
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl<S: Subscriber> Layer<S> for WarningLog {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            let mut message = MessageField::default();
            event.record(&mut message);
            self.messages.lock().unwrap().push(message.0);
        }
    }
}

#[derive(Default)]
struct MessageField(String);

impl Visit for MessageField {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}
