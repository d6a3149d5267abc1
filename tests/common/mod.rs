#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{Router, extract::State, http::header, response::IntoResponse, routing::post};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use mesos_agent_watch::common::endpoint::Endpoint;

#[derive(Clone, Default)]
struct MasterState {
    body: Arc<Mutex<String>>,
    hits: Arc<AtomicUsize>,
    request_bodies: Arc<Mutex<Vec<String>>>,
}

/// A cluster member serving `POST /state` on an ephemeral port.
pub struct FakeMaster {
    pub addr: SocketAddr,
    state: MasterState,
    handle: JoinHandle<()>,
}

impl FakeMaster {
    pub async fn start() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = MasterState::default();

        let app = Router::new()
            .route("/state", post(serve_state))
            .with_state(state.clone());
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state, handle })
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.addr.ip().to_string(), self.addr.port(), "/state")
    }

    pub fn pid(&self) -> String {
        format!("master@{}", self.addr)
    }

    pub fn set_body(&self, body: impl Into<String>) {
        *self.state.body.lock().unwrap() = body.into();
    }

    /// Answer as the elected leader with the given agents registered.
    pub fn serve_as_leader(&self, agent_ips: &[&str]) {
        let slaves: Vec<_> = agent_ips
            .iter()
            .map(|ip| {
                json!({
                    "id": format!("S-{ip}"),
                    "active": true,
                    "pid": format!("slave(1)@{ip}:5051"),
                    "registered_time": 1458344100.25,
                    "attributes": {
                        "host": format!("ip-{}", ip.replace('.', "-")),
                        "instance_type": "m4.large",
                        "publicip": "52.0.0.1",
                        "rack": "us-east-1a",
                        "privateip": ip,
                    }
                })
            })
            .collect();
        let body = json!({
            "version": "0.28.0",
            "elected_time": 1458344004.38701,
            "leader": self.pid(),
            "pid": self.pid(),
            "slaves": slaves,
        });
        self.set_body(body.to_string());
    }

    /// Answer as a follower pointing at `leader`.
    pub fn serve_as_follower(&self, leader: &str) {
        let body = json!({
            "version": "0.28.0",
            "leader": leader,
            "pid": self.pid(),
        });
        self.set_body(body.to_string());
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn request_bodies(&self) -> Vec<String> {
        self.state.request_bodies.lock().unwrap().clone()
    }
}

impl Drop for FakeMaster {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_state(State(st): State<MasterState>, request_body: String) -> impl IntoResponse {
    st.hits.fetch_add(1, Ordering::SeqCst);
    st.request_bodies.lock().unwrap().push(request_body);
    let body = st.body.lock().unwrap().clone();
    ([(header::CONTENT_TYPE, "application/json")], body)
}
