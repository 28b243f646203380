// src/routes.rs

use axum::{
    routing::{get, put},
    Json, Router,
};
use utoipa::OpenApi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn create_router(app_state: AppState) -> Router {
    let contract_routes = Router::new()
        .route(
            "/",
            get(handlers::contracts::list_contracts).post(handlers::contracts::create_contract),
        )
        .route(
            "/{id}",
            get(handlers::contracts::get_contract)
                .put(handlers::contracts::update_contract)
                .delete(handlers::contracts::delete_contract),
        )
        .route("/{id}/installments", get(handlers::contracts::list_contract_installments))
        .route("/{id}/visit-logs", get(handlers::contracts::list_contract_visit_logs));

    let installment_routes = Router::new()
        .route("/", get(handlers::installments::list_installments))
        .route("/{id}/payment", put(handlers::installments::record_payment))
        .route("/{id}/receipt", get(handlers::installments::download_receipt));

    let schedule_routes = Router::new()
        .route("/", get(handlers::schedules::list_schedules))
        .route("/{contract_id}", get(handlers::schedules::get_schedule))
        .route("/{contract_id}/stages", put(handlers::schedules::replace_stages))
        .route(
            "/{contract_id}/stages/{stage_id}/completion",
            put(handlers::schedules::complete_stage).delete(handlers::schedules::reopen_stage),
        );

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/monthly-revenue", get(handlers::dashboard::get_monthly_revenue))
        .route("/late-payments", get(handlers::dashboard::get_late_payments))
        .route("/projections", get(handlers::dashboard::get_projections));

    let partner_routes = Router::new()
        .route(
            "/",
            get(handlers::partners::list_partners).post(handlers::partners::create_partner),
        )
        .route(
            "/{id}",
            put(handlers::partners::update_partner).delete(handlers::partners::delete_partner),
        );

    let note_routes = Router::new()
        .route("/", get(handlers::notes::list_notes).post(handlers::notes::create_note))
        .route("/alerts", get(handlers::notes::list_due_alerts))
        .route(
            "/{id}",
            put(handlers::notes::update_note).delete(handlers::notes::delete_note),
        );

    let visit_log_routes = Router::new()
        .route(
            "/",
            get(handlers::visit_logs::list_visit_logs).post(handlers::visit_logs::create_visit_log),
        )
        .route(
            "/{id}",
            put(handlers::visit_logs::update_visit_log).delete(handlers::visit_logs::delete_visit_log),
        );

    let checklist_routes = Router::new()
        .route("/", get(handlers::checklists::list_checklists))
        .route(
            "/{contract_id}",
            get(handlers::checklists::get_checklist).put(handlers::checklists::save_checklist),
        );

    let other_payment_routes = Router::new()
        .route(
            "/",
            get(handlers::other_payments::list_other_payments)
                .post(handlers::other_payments::create_other_payment),
        )
        .route(
            "/{id}",
            put(handlers::other_payments::update_other_payment)
                .delete(handlers::other_payments::delete_other_payment),
        );

    let settings_routes = Router::new()
        .route(
            "/stage-template",
            get(handlers::settings::get_stage_template).put(handlers::settings::update_stage_template),
        )
        .route(
            "/pricing",
            get(handlers::settings::get_pricing).put(handlers::settings::update_pricing),
        )
        .route("/pricing/quote", get(handlers::settings::get_pricing_quote));

    let database_routes = Router::new()
        .route("/", axum::routing::delete(handlers::database::reset_database))
        .route("/snapshot", get(handlers::database::export_snapshot));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/api/clients", get(handlers::contracts::list_clients))
        .route("/api/progress", get(handlers::schedules::list_progress))
        .nest("/api/contracts", contract_routes)
        .nest("/api/installments", installment_routes)
        .nest("/api/schedules", schedule_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/partners", partner_routes)
        .nest("/api/notes", note_routes)
        .nest("/api/visit-logs", visit_log_routes)
        .nest("/api/checklists", checklist_routes)
        .nest("/api/other-payments", other_payment_routes)
        .nest("/api/settings", settings_routes)
        .nest("/api/database", database_routes)
        .with_state(app_state)
}
