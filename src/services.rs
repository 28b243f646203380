pub mod billing;
pub mod calendar;
pub mod progress;
pub mod scheduling;

pub mod checklist_service;
pub mod contract_service;
pub mod database_service;
pub mod finance_service;
pub mod note_service;
pub mod other_payment_service;
pub mod partner_service;
pub mod pricing_service;
pub mod project_service;
pub mod receipt_service;
pub mod visit_log_service;
