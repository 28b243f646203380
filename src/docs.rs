// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::state;

#[derive(OpenApi)]
#[openapi(
    info(title = "Studio Backend", description = "Contratos, parcelas e cronogramas do estúdio"),
    paths(
        // --- Contracts ---
        handlers::contracts::list_contracts,
        handlers::contracts::get_contract,
        handlers::contracts::create_contract,
        handlers::contracts::update_contract,
        handlers::contracts::delete_contract,
        handlers::contracts::list_contract_installments,
        handlers::contracts::list_contract_visit_logs,
        handlers::contracts::list_clients,

        // --- Installments ---
        handlers::installments::list_installments,
        handlers::installments::record_payment,
        handlers::installments::download_receipt,

        // --- Schedules ---
        handlers::schedules::list_schedules,
        handlers::schedules::get_schedule,
        handlers::schedules::complete_stage,
        handlers::schedules::reopen_stage,
        handlers::schedules::replace_stages,
        handlers::schedules::list_progress,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_monthly_revenue,
        handlers::dashboard::get_late_payments,
        handlers::dashboard::get_projections,

        // --- Partners / Notes / Visits / Checklists ---
        handlers::partners::list_partners,
        handlers::partners::create_partner,
        handlers::partners::update_partner,
        handlers::partners::delete_partner,
        handlers::notes::list_notes,
        handlers::notes::list_due_alerts,
        handlers::notes::create_note,
        handlers::notes::update_note,
        handlers::notes::delete_note,
        handlers::visit_logs::list_visit_logs,
        handlers::visit_logs::create_visit_log,
        handlers::visit_logs::update_visit_log,
        handlers::visit_logs::delete_visit_log,
        handlers::checklists::list_checklists,
        handlers::checklists::get_checklist,
        handlers::checklists::save_checklist,
        handlers::other_payments::list_other_payments,
        handlers::other_payments::create_other_payment,
        handlers::other_payments::update_other_payment,
        handlers::other_payments::delete_other_payment,

        // --- Settings / Database ---
        handlers::settings::get_stage_template,
        handlers::settings::update_stage_template,
        handlers::settings::get_pricing,
        handlers::settings::update_pricing,
        handlers::settings::get_pricing_quote,
        handlers::database::export_snapshot,
        handlers::database::reset_database,
    ),
    components(
        schemas(
            // --- Contracts ---
            models::client::Client,
            models::contract::Contract,
            models::contract::ContractTerms,
            models::contract::ContractStatus,
            models::contract::DiscountType,
            models::contract::ContractServiceItem,
            models::contract::Attachment,
            models::contract::ContractFormPayload,

            // --- Installments ---
            models::installment::PaymentInstallment,
            models::installment::InstallmentStatus,
            models::installment::RecordPaymentPayload,

            // --- Schedules ---
            models::schedule::ProjectStageTemplateItem,
            models::schedule::ProjectStage,
            models::schedule::ProjectSchedule,
            models::schedule::StageCompletionPayload,
            models::schedule::ReplaceStagesPayload,
            models::schedule::StageDefinition,
            models::schedule::StageTemplatePayload,
            models::progress::ProjectProgress,
            models::progress::StageProgress,
            models::progress::StageStatus,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::MonthlyRevenueEntry,
            models::dashboard::ProjectionEntry,
            models::dashboard::LatePaymentEntry,

            // --- Others ---
            models::partner::Partner,
            models::partner::PartnerDetails,
            models::partner::PartnerPayload,
            models::note::Note,
            models::note::NotePayload,
            models::visit_log::VisitLog,
            models::visit_log::VisitLogPayload,
            models::checklist::ProjectChecklist,
            models::checklist::ChecklistPayload,
            models::other_payment::OtherPayment,
            models::other_payment::OtherPaymentPayload,
            models::pricing::ServicePrice,
            models::pricing::HourlyRate,
            models::pricing::PriceTier,
            models::pricing::PricingTables,
            models::pricing::PricingQuote,
            state::DatabaseSnapshot,
        )
    ),
    tags(
        (name = "Contracts", description = "Contratos e clientes"),
        (name = "Installments", description = "Parcelas, pagamentos e recibos"),
        (name = "Schedules", description = "Cronogramas e progresso dos projetos"),
        (name = "Dashboard", description = "Indicadores financeiros"),
        (name = "Partners", description = "Parceiros e fornecedores"),
        (name = "Notes", description = "Notas e alertas"),
        (name = "Visit Logs", description = "Visitas técnicas à obra"),
        (name = "Checklists", description = "Checklists de obra"),
        (name = "Other Payments", description = "Recebimentos fora do plano de parcelas"),
        (name = "Settings", description = "Modelo de etapas e tabelas de preço"),
        (name = "Database", description = "Exportação e zona de perigo")
    )
)]
pub struct ApiDoc;
