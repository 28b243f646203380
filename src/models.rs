pub mod checklist;
pub mod client;
pub mod contract;
pub mod dashboard;
pub mod installment;
pub mod note;
pub mod other_payment;
pub mod partner;
pub mod pricing;
pub mod progress;
pub mod schedule;
pub mod validation;
pub mod visit_log;
