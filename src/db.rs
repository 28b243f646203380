pub mod persistence;
pub use persistence::{RemoteStore, StoredData, WriteOp};
pub mod write_behind;
pub use write_behind::WriteBehind;
pub mod memory_store;
pub use memory_store::MemoryStore;
pub mod pg_store;
pub use pg_store::PgStore;

pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod contract_repo;
pub use contract_repo::ContractRepository;
pub mod installment_repo;
pub use installment_repo::InstallmentRepository;
pub mod checklist_repo;
pub use checklist_repo::ChecklistRepository;
pub mod partner_repo;
pub use partner_repo::PartnerRepository;
pub mod note_repo;
pub use note_repo::NoteRepository;
pub mod other_payment_repo;
pub use other_payment_repo::OtherPaymentRepository;
pub mod visit_log_repo;
pub use visit_log_repo::VisitLogRepository;
