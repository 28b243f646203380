pub mod checklists;
pub mod contracts;
pub mod dashboard;
pub mod database;
pub mod installments;
pub mod notes;
pub mod other_payments;
pub mod partners;
pub mod schedules;
pub mod settings;
pub mod visit_logs;
