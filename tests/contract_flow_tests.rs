//! Fluxos de contrato, parcelas e cronograma de ponta a ponta,
//! contra o armazenamento em memória.

use std::{path::PathBuf, sync::Arc};

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use studio_backend::{
    config::StorageBackend,
    create_router,
    db::{MemoryStore, RemoteStore},
    services::receipt_service::ReceiptSettings,
    AppConfig, AppState,
};

struct TestApp {
    server: TestServer,
    state: AppState,
    store: Arc<MemoryStore>,
}

fn test_config() -> AppConfig {
    AppConfig {
        storage_backend: StorageBackend::Memory,
        database_url: None,
        bind_addr: "127.0.0.1:0".to_string(),
        db_max_connections: 1,
        receipts: ReceiptSettings {
            fonts_dir: PathBuf::from("./fonts-que-nao-existem"),
            studio_name: "Estúdio Teste".to_string(),
            studio_document: None,
        },
    }
}

async fn spawn_app_with(store: Arc<MemoryStore>) -> TestApp {
    let state = AppState::with_store(store.clone(), test_config()).await;
    let server = TestServer::new(create_router(state.clone())).unwrap();
    TestApp { server, state, store }
}

async fn spawn_app() -> TestApp {
    spawn_app_with(Arc::new(MemoryStore::new())).await
}

/// 1000 de entrada + 3x 500 a partir de 01/02/2024.
fn contract_payload() -> Value {
    json!({
        "clientName": "Maria Souza",
        "projectName": "Apartamento Jardins",
        "totalValue": 2500,
        "date": "2024-01-01",
        "downPayment": 1000,
        "downPaymentDate": "2024-01-10",
        "installments": 3,
        "installmentValue": 500,
        "firstInstallmentDate": "2024-02-01",
        "projectAddress": "Rua das Flores, 10"
    })
}

async fn create_contract(app: &TestApp, payload: &Value) -> Value {
    let response = app.server.post("/api/contracts").json(payload).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

async fn installments_of(app: &TestApp, contract_id: &str) -> Vec<Value> {
    app.server
        .get(&format!("/api/contracts/{}/installments", contract_id))
        .await
        .json::<Vec<Value>>()
}

fn labels(rows: &[Value]) -> Vec<String> {
    rows.iter()
        .map(|r| r["installment"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_check_answers_ok() {
    let app = spawn_app().await;
    let response = app.server.get("/api/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = spawn_app().await;
    let body: Value = app.server.get("/api/docs/openapi.json").await.json();
    assert!(body["paths"]["/api/contracts"].is_object());
}

#[tokio::test]
async fn creating_a_contract_derives_installments_schedule_and_client() {
    let app = spawn_app().await;
    let contract = create_contract(&app, &contract_payload()).await;
    let id = contract["id"].as_str().unwrap();

    let rows = installments_of(&app, id).await;
    assert_eq!(labels(&rows), vec!["Entrada", "1/3", "2/3", "3/3"]);
    assert_eq!(rows[0]["value"].as_f64(), Some(1000.0));
    assert_eq!(rows[0]["dueDate"], "2024-01-10");
    assert_eq!(rows[3]["dueDate"], "2024-04-01");
    assert!(rows.iter().all(|r| r["status"] == "Pendente"));

    let schedule: Value = app.server.get(&format!("/api/schedules/{}", id)).await.json();
    let stages = schedule["stages"].as_array().unwrap();
    assert_eq!(stages.len(), 12);
    assert_eq!(stages[0]["name"], "Reunião de Briefing");
    assert_eq!(stages[0]["startDate"], "2024-01-01");
    assert_eq!(stages[0]["deadline"], "2024-01-01");
    assert_eq!(stages[1]["startDate"], "2024-01-02");

    let clients: Vec<Value> = app.server.get("/api/clients").await.json();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["name"], "Maria Souza");

    // Segundo contrato do mesmo cliente não duplica o cadastro
    create_contract(&app, &contract_payload()).await;
    let clients: Vec<Value> = app.server.get("/api/clients").await.json();
    assert_eq!(clients.len(), 1);

    app.state.dashboard.flush().await.unwrap();
    let stored = app.store.load_all().await.unwrap();
    assert_eq!(stored.contracts.len(), 2);
    assert_eq!(stored.installments.len(), 8);
    assert_eq!(stored.clients.len(), 1);
    assert!(stored.contracts.iter().all(|(_, schedule)| schedule.is_some()));
}

#[tokio::test]
async fn invalid_contract_payload_is_rejected() {
    let app = spawn_app().await;

    let mut payload = contract_payload();
    payload["firstInstallmentDate"] = Value::Null;
    let response = app.server.post("/api/contracts").json(&payload).await;
    response.assert_status_bad_request();

    let mut payload = contract_payload();
    payload["clientName"] = json!("");
    let response = app.server.post("/api/contracts").json(&payload).await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(body["details"]["client_name"].is_array());

    let contracts: Vec<Value> = app.server.get("/api/contracts").await.json();
    assert!(contracts.is_empty());
}

#[tokio::test]
async fn blank_names_are_rejected_without_registering_a_client() {
    let app = spawn_app().await;

    let mut payload = contract_payload();
    payload["clientName"] = json!("   ");
    let response = app.server.post("/api/contracts").json(&payload).await;
    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["details"]["client_name"], json!(["required"]));

    let mut payload = contract_payload();
    payload["projectName"] = json!("\t ");
    app.server
        .post("/api/contracts")
        .json(&payload)
        .await
        .assert_status_bad_request();

    let clients: Vec<Value> = app.server.get("/api/clients").await.json();
    assert!(clients.is_empty());
    let contracts: Vec<Value> = app.server.get("/api/contracts").await.json();
    assert!(contracts.is_empty());
}

#[tokio::test]
async fn editing_a_contract_keeps_paid_installments() {
    let app = spawn_app().await;
    let contract = create_contract(&app, &contract_payload()).await;
    let id = contract["id"].as_str().unwrap().to_string();

    let rows = installments_of(&app, &id).await;
    let first = rows[1]["id"].as_str().unwrap().to_string();
    app.server
        .put(&format!("/api/installments/{}/payment", first))
        .json(&json!({ "status": "Pago", "paymentDate": "2024-02-03" }))
        .await
        .assert_status_ok();

    let mut payload = contract_payload();
    payload["installments"] = json!(4);
    app.server
        .put(&format!("/api/contracts/{}", id))
        .json(&payload)
        .await
        .assert_status_ok();

    let rows = installments_of(&app, &id).await;
    assert_eq!(labels(&rows), vec!["Entrada", "1/4", "2/4", "3/4", "4/4"]);
    assert_eq!(rows[1]["id"], first.as_str());
    assert_eq!(rows[1]["status"], "Pago");
    assert_eq!(rows[1]["paymentDate"], "2024-02-03");
    assert_eq!(rows[2]["status"], "Pendente");

    app.state.dashboard.flush().await.unwrap();
    let stored = app.store.load_all().await.unwrap();
    assert_eq!(stored.installments.len(), 5);
    let paid: Vec<_> = stored.installments.iter().filter(|i| i.status.is_paid()).collect();
    assert_eq!(paid.len(), 1);
    assert_eq!(paid[0].installment, "1/4");
}

#[tokio::test]
async fn shrinking_the_plan_drops_obsolete_installments() {
    let app = spawn_app().await;
    let contract = create_contract(&app, &contract_payload()).await;
    let id = contract["id"].as_str().unwrap().to_string();

    let mut payload = contract_payload();
    payload["installments"] = json!(1);
    payload["downPayment"] = json!(0);
    app.server
        .put(&format!("/api/contracts/{}", id))
        .json(&payload)
        .await
        .assert_status_ok();

    assert_eq!(labels(&installments_of(&app, &id).await), vec!["1/1"]);

    app.state.dashboard.flush().await.unwrap();
    assert_eq!(app.store.load_all().await.unwrap().installments.len(), 1);
}

#[tokio::test]
async fn editing_the_date_moves_the_schedule() {
    let app = spawn_app().await;
    let contract = create_contract(&app, &contract_payload()).await;
    let id = contract["id"].as_str().unwrap().to_string();

    let mut payload = contract_payload();
    // Sábado: o projeto começa na segunda seguinte
    payload["date"] = json!("2024-03-02");
    app.server
        .put(&format!("/api/contracts/{}", id))
        .json(&payload)
        .await
        .assert_status_ok();

    let schedule: Value = app.server.get(&format!("/api/schedules/{}", id)).await.json();
    assert_eq!(schedule["startDate"], "2024-03-02");
    assert_eq!(schedule["stages"][0]["startDate"], "2024-03-04");
}

#[tokio::test]
async fn unknown_contract_is_not_found() {
    let app = spawn_app().await;
    let missing = "00000000-0000-4000-8000-000000000000";

    app.server.get(&format!("/api/contracts/{}", missing)).await.assert_status_not_found();
    app.server
        .put(&format!("/api/contracts/{}", missing))
        .json(&contract_payload())
        .await
        .assert_status_not_found();
    app.server.delete(&format!("/api/contracts/{}", missing)).await.assert_status_not_found();
}

#[tokio::test]
async fn payments_need_a_date_and_pending_clears_it() {
    let app = spawn_app().await;
    let contract = create_contract(&app, &contract_payload()).await;
    let rows = installments_of(&app, contract["id"].as_str().unwrap()).await;
    let path = format!("/api/installments/{}/payment", rows[0]["id"].as_str().unwrap());

    app.server
        .put(&path)
        .json(&json!({ "status": "Pago em Atraso" }))
        .await
        .assert_status_bad_request();

    let paid: Value = app
        .server
        .put(&path)
        .json(&json!({ "status": "Pago em Atraso", "paymentDate": "2024-01-20" }))
        .await
        .json();
    assert_eq!(paid["status"], "Pago em Atraso");

    let reverted: Value = app
        .server
        .put(&path)
        .json(&json!({ "status": "Pendente", "paymentDate": "2024-01-20" }))
        .await
        .json();
    assert_eq!(reverted["status"], "Pendente");
    assert_eq!(reverted["paymentDate"], Value::Null);
}

#[tokio::test]
async fn deleting_a_contract_removes_its_dependents() {
    let app = spawn_app().await;
    let contract = create_contract(&app, &contract_payload()).await;
    let id = contract["id"].as_str().unwrap().to_string();

    app.server
        .post("/api/notes")
        .json(&json!({ "contractId": id, "title": "Ligar para marceneiro" }))
        .await
        .assert_status(StatusCode::CREATED);
    app.server
        .post("/api/notes")
        .json(&json!({ "title": "Nota solta" }))
        .await
        .assert_status(StatusCode::CREATED);
    app.server
        .post("/api/visit-logs")
        .json(&json!({ "contractId": id, "date": "2024-02-10", "notes": "Medição conferida" }))
        .await
        .assert_status(StatusCode::CREATED);
    app.server
        .put(&format!("/api/checklists/{}", id))
        .json(&json!({ "completedItemIds": ["demolicao"] }))
        .await
        .assert_status_ok();

    app.server
        .delete(&format!("/api/contracts/{}", id))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server.get(&format!("/api/contracts/{}", id)).await.assert_status_not_found();
    let installments: Vec<Value> = app.server.get("/api/installments").await.json();
    assert!(installments.is_empty());
    let notes: Vec<Value> = app.server.get("/api/notes").await.json();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["title"], "Nota solta");
    let logs: Vec<Value> = app.server.get("/api/visit-logs").await.json();
    assert!(logs.is_empty());
    let progress: Vec<Value> = app.server.get("/api/progress").await.json();
    assert!(progress.is_empty());

    app.state.dashboard.flush().await.unwrap();
    let stored = app.store.load_all().await.unwrap();
    assert!(stored.contracts.is_empty());
    assert!(stored.installments.is_empty());
    assert!(stored.checklists.is_empty());
    assert!(stored.visit_logs.is_empty());
    assert_eq!(stored.notes.len(), 1);
}

#[tokio::test]
async fn completing_stages_recalculates_and_rolls_up() {
    let app = spawn_app().await;
    let contract = create_contract(&app, &contract_payload()).await;
    let id = contract["id"].as_str().unwrap().to_string();

    // Medição (2 dias) terminou num sábado: a próxima etapa começa na segunda
    app.server
        .put(&format!("/api/schedules/{}/stages/1/completion", id))
        .json(&json!({ "completionDate": "2024-01-01" }))
        .await
        .assert_status_ok();
    let schedule: Value = app
        .server
        .put(&format!("/api/schedules/{}/stages/2/completion", id))
        .json(&json!({ "completionDate": "2024-01-06" }))
        .await
        .json();
    assert_eq!(schedule["stages"][2]["startDate"], "2024-01-08");

    let progress: Vec<Value> = app.server.get("/api/progress").await.json();
    assert_eq!(progress.len(), 1);
    let buckets: Vec<_> = progress[0]["stages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| (s["name"].as_str().unwrap(), s["status"].as_str().unwrap()))
        .collect();
    assert_eq!(buckets[0], ("Briefing", "completed"));
    // Contrato de 2024: o layout já começou
    assert_eq!(buckets[1], ("Layout", "in_progress"));

    let schedule: Value = app
        .server
        .delete(&format!("/api/schedules/{}/stages/2/completion", id))
        .await
        .json();
    assert_eq!(schedule["stages"][1]["completionDate"], Value::Null);
    assert_eq!(schedule["stages"][2]["startDate"], "2024-01-04");

    app.state.dashboard.flush().await.unwrap();
    let stored = app.store.load_all().await.unwrap();
    let stored_schedule = stored.contracts[0].1.as_ref().unwrap();
    assert_eq!(stored_schedule.stages[1].completion_date, None);
    assert!(stored_schedule.stages[0].completion_date.is_some());
}

#[tokio::test]
async fn stage_errors_map_to_http_statuses() {
    let app = spawn_app().await;
    let contract = create_contract(&app, &contract_payload()).await;
    let id = contract["id"].as_str().unwrap().to_string();

    app.server
        .put(&format!("/api/schedules/{}/stages/99/completion", id))
        .json(&json!({ "completionDate": "2024-01-01" }))
        .await
        .assert_status_not_found();

    app.server
        .put(&format!("/api/schedules/{}/stages", id))
        .json(&json!({ "stages": [
            { "id": 1, "name": "Briefing", "durationWorkDays": 2 },
            { "id": 1, "name": "Layout", "durationWorkDays": 5 }
        ]}))
        .await
        .assert_status(StatusCode::CONFLICT);

    app.server
        .put(&format!("/api/schedules/{}/stages", id))
        .json(&json!({ "stages": [] }))
        .await
        .assert_status_bad_request();

    app.server
        .put(&format!("/api/schedules/{}/stages", id))
        .json(&json!({ "stages": [
            { "id": 1, "name": "Briefing", "durationWorkDays": 4294967295u32 }
        ]}))
        .await
        .assert_status_bad_request();

    app.server
        .put(&format!("/api/schedules/{}/stages", id))
        .json(&json!({ "stages": [{ "id": 1, "name": "  ", "durationWorkDays": 2 }] }))
        .await
        .assert_status_bad_request();

    // Nada disso mexeu no cronograma
    let schedule: Value = app.server.get(&format!("/api/schedules/{}", id)).await.json();
    assert_eq!(schedule["stages"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn replacing_stages_rebuilds_the_dates() {
    let app = spawn_app().await;
    let contract = create_contract(&app, &contract_payload()).await;
    let id = contract["id"].as_str().unwrap().to_string();

    let schedule: Value = app
        .server
        .put(&format!("/api/schedules/{}/stages", id))
        .json(&json!({ "stages": [
            { "id": 1, "name": "Reunião de Briefing", "durationWorkDays": 5 },
            { "id": 2, "name": "Executivo", "durationWorkDays": 3 }
        ]}))
        .await
        .json();

    let stages = schedule["stages"].as_array().unwrap();
    assert_eq!(stages.len(), 2);
    assert_eq!(stages[0]["deadline"], "2024-01-05");
    assert_eq!(stages[1]["startDate"], "2024-01-08");
    assert_eq!(stages[1]["deadline"], "2024-01-10");
}

#[tokio::test]
async fn finance_views_follow_payments() {
    let app = spawn_app().await;
    let contract = create_contract(&app, &contract_payload()).await;
    let rows = installments_of(&app, contract["id"].as_str().unwrap()).await;

    app.server
        .put(&format!("/api/installments/{}/payment", rows[1]["id"].as_str().unwrap()))
        .json(&json!({ "status": "Pago", "paymentDate": "2024-02-03" }))
        .await
        .assert_status_ok();

    let revenue: Vec<Value> = app.server.get("/api/dashboard/monthly-revenue?year=2024").await.json();
    assert_eq!(revenue.len(), 12);
    assert_eq!(revenue[1]["name"], "fev");
    assert_eq!(revenue[1]["value"].as_f64(), Some(500.0));
    assert_eq!(revenue[0]["value"].as_f64(), Some(0.0));

    let projections: Vec<Value> = app.server.get("/api/dashboard/projections?year=2024").await.json();
    assert_eq!(projections[2]["expected"].as_f64(), Some(500.0));
    assert_eq!(projections[1]["received"].as_f64(), Some(500.0));

    // Tudo que venceu em 2024 e não foi pago está atrasado
    let late: Vec<Value> = app.server.get("/api/dashboard/late-payments").await.json();
    assert_eq!(late.len(), 3);
    assert!(late.iter().all(|l| l["daysOverdue"].as_i64().unwrap() > 0));

    let summary: Value = app.server.get("/api/dashboard/summary").await.json();
    assert_eq!(summary["activeContracts"], 1);
    assert_eq!(summary["totalReceived"].as_f64(), Some(500.0));
    assert_eq!(summary["totalReceivable"].as_f64(), Some(2000.0));
    assert_eq!(summary["totalOverdue"].as_f64(), Some(2000.0));
}

#[tokio::test]
async fn receipts_only_for_paid_installments() {
    let app = spawn_app().await;
    let contract = create_contract(&app, &contract_payload()).await;
    let rows = installments_of(&app, contract["id"].as_str().unwrap()).await;

    app.server
        .get(&format!("/api/installments/{}/receipt", rows[0]["id"].as_str().unwrap()))
        .await
        .assert_status(StatusCode::CONFLICT);
    app.server
        .get("/api/installments/00000000-0000-4000-8000-000000000000/receipt")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn initial_load_rebuilds_state_from_the_store() {
    let first = spawn_app().await;
    let contract = create_contract(&first, &contract_payload()).await;
    first.state.dashboard.flush().await.unwrap();

    // Nova instância lendo o mesmo armazenamento
    let stored = first.store.load_all().await.unwrap();
    let second = spawn_app_with(Arc::new(MemoryStore::with_data(stored))).await;

    let contracts: Vec<Value> = second.server.get("/api/contracts").await.json();
    assert_eq!(contracts.len(), 1);
    assert_eq!(contracts[0]["id"], contract["id"]);

    let schedule: Value = second
        .server
        .get(&format!("/api/schedules/{}", contract["id"].as_str().unwrap()))
        .await
        .json();
    assert_eq!(schedule["stages"].as_array().unwrap().len(), 12);

    let progress: Vec<Value> = second.server.get("/api/progress").await.json();
    assert_eq!(progress.len(), 1);
    assert_eq!(installments_of(&second, contract["id"].as_str().unwrap()).await.len(), 4);
}

#[tokio::test]
async fn failed_remote_writes_keep_the_local_state() {
    let app = spawn_app().await;
    app.store.set_fail_writes(true);

    let contract = create_contract(&app, &contract_payload()).await;
    app.state.dashboard.flush().await.unwrap();

    app.server
        .get(&format!("/api/contracts/{}", contract["id"].as_str().unwrap()))
        .await
        .assert_status_ok();
    assert!(app.store.load_all().await.unwrap().contracts.is_empty());
}
