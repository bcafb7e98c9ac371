//! Local axum notary for exercising `HttpMessenger`

use std::sync::{Arc, Mutex};
use std::thread;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

type Handler = dyn Fn(&Value) -> Value + Send + Sync;

struct NotaryState {
    handler: Box<Handler>,
    received: Arc<Mutex<Vec<Value>>>,
}

pub struct TestNotary {
    pub url: String,
    pub received: Arc<Mutex<Vec<Value>>>,
}

impl TestNotary {
    pub fn commands(&self) -> Vec<String> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .map(|r| r["action"]["type"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

async fn handle(State(state): State<Arc<NotaryState>>, Json(request): Json<Value>) -> Json<Value> {
    state.received.lock().unwrap().push(request.clone());
    Json((state.handler)(&request))
}

/// Serve `/v1/requests` on an ephemeral port until the test process exits
///
/// The listener is bound before this returns, so clients can connect
/// straight away; the runtime lives on its own thread because the
/// messenger under test is blocking.
pub fn spawn<F>(handler: F) -> TestNotary
where
    F: Fn(&Value) -> Value + Send + Sync + 'static,
{
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    let received = Arc::new(Mutex::new(Vec::new()));
    let state = Arc::new(NotaryState {
        handler: Box::new(handler),
        received: received.clone(),
    });
    let app = Router::new()
        .route("/v1/requests", post(handle))
        .with_state(state);

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_io()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });

    TestNotary {
        url: format!("http://{addr}"),
        received,
    }
}
