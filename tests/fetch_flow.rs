//! End-to-end fetch flow through the actors with a scripted transport

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tokio::sync::{mpsc, oneshot};

use oura_explorer::{
    AppActor, AppState, DisplayPanel, EndpointCatalog, NetworkActor, NetworkCommand,
    NetworkResponse, QueryParams, RenderState, RequestState, Settings, StalePolicy, Transport,
    TransportError, UiEvent,
};

type Reply = Result<Value, TransportError>;

/// Transport whose answers are released by the test, one gate per path.
/// Paths without a gate answer immediately with `{"path": ..}`.
#[derive(Clone, Default)]
struct ScriptedTransport {
    gates: Arc<Mutex<HashMap<String, oneshot::Receiver<Reply>>>>,
    calls: Arc<Mutex<Vec<(String, QueryParams)>>>,
}

impl ScriptedTransport {
    fn gate(&self, path: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(path.to_string(), rx);
        tx
    }

    fn calls(&self) -> Vec<(String, QueryParams)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, path: &str, params: &QueryParams) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push((path.to_string(), params.clone()));
        let gate = self.gates.lock().unwrap().remove(path);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(TransportError::Request(String::from("gate dropped")))),
            None => Ok(json!({ "path": path })),
        }
    }
}

fn state_with(policy: StalePolicy) -> AppState {
    let settings = Settings {
        stale_responses: policy,
        ..Settings::default()
    };
    AppState::new(EndpointCatalog::builtin(), &settings)
}

fn select(state: &mut AppState, label: &str) {
    let (index, _) = state.catalog.find(label).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
    state.select_endpoint(index, now).unwrap();
}

fn spawn_network(
    transport: ScriptedTransport,
) -> (
    mpsc::UnboundedSender<NetworkCommand>,
    mpsc::UnboundedReceiver<NetworkResponse>,
) {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (resp_tx, resp_rx) = mpsc::unbounded_channel();
    tokio::spawn(NetworkActor::new(transport, resp_tx).run(cmd_rx));
    (cmd_tx, resp_rx)
}

/// Fetch A then B, let B answer before A, and return the final state
async fn out_of_order(policy: StalePolicy) -> (AppState, Vec<bool>) {
    let transport = ScriptedTransport::default();
    let gate_a = transport.gate("/daily_sleep");
    let gate_b = transport.gate("/daily_readiness");
    let (cmd_tx, mut resp_rx) = spawn_network(transport.clone());

    let mut state = state_with(policy);
    select(&mut state, "Daily Sleep");
    cmd_tx.send(state.trigger_fetch().unwrap()).unwrap();
    select(&mut state, "Daily Readiness");
    cmd_tx.send(state.trigger_fetch().unwrap()).unwrap();

    let mut applied = Vec::new();

    gate_b.send(Ok(json!({ "data": ["B"] }))).unwrap();
    let first = resp_rx.recv().await.unwrap();
    assert_eq!(first.label(), "Daily Readiness");
    applied.push(state.handle_response(first));

    gate_a.send(Ok(json!({ "data": ["A"] }))).unwrap();
    let second = resp_rx.recv().await.unwrap();
    assert_eq!(second.label(), "Daily Sleep");
    applied.push(state.handle_response(second));

    let _ = cmd_tx.send(NetworkCommand::Shutdown);
    (state, applied)
}

#[tokio::test]
async fn test_latest_policy_discards_superseded_response() {
    let (state, applied) = out_of_order(StalePolicy::Latest).await;

    assert_eq!(applied, vec![true, false]);
    assert_eq!(
        state.request,
        RequestState::Success {
            label: String::from("Daily Readiness"),
            payload: json!({ "data": ["B"] }),
        }
    );
}

#[tokio::test]
async fn test_last_response_wins_policy_applies_everything() {
    let (state, applied) = out_of_order(StalePolicy::LastResponseWins).await;

    assert_eq!(applied, vec![true, true]);
    assert_eq!(
        state.request,
        RequestState::Success {
            label: String::from("Daily Sleep"),
            payload: json!({ "data": ["A"] }),
        }
    );
}

#[tokio::test]
async fn test_date_range_fetch_sends_resolved_params() {
    let transport = ScriptedTransport::default();
    let (cmd_tx, mut resp_rx) = spawn_network(transport.clone());

    let mut state = state_with(StalePolicy::Latest);
    select(&mut state, "Daily Activity");
    cmd_tx.send(state.trigger_fetch().unwrap()).unwrap();

    let response = resp_rx.recv().await.unwrap();
    assert!(state.handle_response(response));
    assert!(matches!(state.request, RequestState::Success { .. }));

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "/daily_activity");
    assert_eq!(calls[0].1.get("start_date").map(String::as_str), Some("2024-06-03"));
    assert_eq!(calls[0].1.get("end_date").map(String::as_str), Some("2024-06-10"));

    let _ = cmd_tx.send(NetworkCommand::Shutdown);
}

#[tokio::test]
async fn test_transport_error_lands_in_error_state() {
    let transport = ScriptedTransport::default();
    let gate = transport.gate("/daily_sleep");
    let (cmd_tx, mut resp_rx) = spawn_network(transport);

    let mut state = state_with(StalePolicy::Latest);
    select(&mut state, "Daily Sleep");
    cmd_tx.send(state.trigger_fetch().unwrap()).unwrap();
    assert!(state.is_loading());

    gate.send(Err(TransportError::Status {
        status: 401,
        message: String::from("invalid token"),
    }))
    .unwrap();
    let response = resp_rx.recv().await.unwrap();
    assert!(state.handle_response(response));

    match &state.request {
        RequestState::Error { label, message } => {
            assert_eq!(label, "Daily Sleep");
            assert!(message.contains("invalid token"));
        }
        other => panic!("expected error state, got {:?}", other),
    }

    let _ = cmd_tx.send(NetworkCommand::Shutdown);
}

#[tokio::test]
async fn test_app_actor_fetches_default_endpoint() {
    let transport = ScriptedTransport::default();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
    let (ui_tx, ui_rx) = mpsc::unbounded_channel();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    tokio::spawn(NetworkActor::new(transport.clone(), net_resp_tx).run(net_cmd_rx));
    let app = AppActor::new(state_with(StalePolicy::Latest), net_cmd_tx, render_tx);
    let app_handle = tokio::spawn(app.run(ui_rx, net_resp_rx));

    let initial = render_rx.recv().await.unwrap();
    assert_eq!(initial.selected_endpoint, Some(0));
    assert_eq!(initial.params_summary, "Current");
    assert!(initial.fields.is_empty());

    ui_tx.send(UiEvent::Fetch).unwrap();

    let mut saw_loading = false;
    loop {
        let render = render_rx.recv().await.unwrap();
        match render.display {
            DisplayPanel::Loading { .. } => saw_loading = true,
            DisplayPanel::Data { label, body } => {
                assert_eq!(label, "Personal Info");
                assert!(body.contains("/personal_info"));
                assert!(!render.is_loading);
                break;
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }
    assert!(saw_loading);

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "/personal_info");
    assert!(calls[0].1.is_empty());

    ui_tx.send(UiEvent::Quit).unwrap();
    app_handle.await.unwrap();
}
