// src/db/write_behind.rs

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::{
    common::error::AppError,
    db::persistence::{RemoteStore, WriteOp},
};

enum Command {
    Apply(WriteOp),
    Flush(oneshot::Sender<()>),
}

/// Fila de gravações para o banco, consumida por uma única task.
///
/// Quem enfileira não espera: a gravação acontece em segundo plano, na ordem
/// em que foi enviada. Falhas só são logadas, sem retry e sem desfazer o
/// estado local.
#[derive(Clone)]
pub struct WriteBehind {
    tx: mpsc::UnboundedSender<Command>,
}

impl WriteBehind {
    pub fn spawn(store: Arc<dyn RemoteStore>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Command>();

        tokio::spawn(async move {
            while let Some(command) = rx.recv().await {
                match command {
                    Command::Apply(op) => {
                        if let Err(e) = store.apply(&op).await {
                            tracing::error!(
                                operation = op.name(),
                                "🔥 Falha ao gravar no banco, estado local divergiu: {:?}",
                                e
                            );
                        } else {
                            tracing::debug!(operation = op.name(), "gravação aplicada");
                        }
                    }
                    Command::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
            tracing::info!("Fila de gravação encerrada");
        });

        Self { tx }
    }

    pub fn submit(&self, op: WriteOp) {
        let name = op.name();
        if self.tx.send(Command::Apply(op)).is_err() {
            tracing::error!(operation = name, "🔥 Fila de gravação fechada; operação descartada");
        }
    }

    /// Retorna quando tudo que foi enviado antes desta chamada já foi
    /// aplicado (ou falhou e foi logado).
    pub async fn flush(&self) -> Result<(), AppError> {
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .send(Command::Flush(done_tx))
            .map_err(|_| AppError::WriteQueueClosed)?;
        done_rx.await.map_err(|_| AppError::WriteQueueClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::MemoryStore, models::partner::Partner};
    use uuid::Uuid;

    fn partner(name: &str) -> Partner {
        Partner {
            id: Uuid::new_v4(),
            name: name.into(),
            partner_type: "Marcenaria".into(),
            details: Default::default(),
        }
    }

    #[tokio::test]
    async fn writes_are_applied_in_submission_order() {
        let store = Arc::new(MemoryStore::new());
        let writer = WriteBehind::spawn(store.clone());

        let p = partner("Marcenaria Silva");
        writer.submit(WriteOp::UpsertPartner(p.clone()));
        writer.submit(WriteOp::DeletePartner(p.id));
        writer.submit(WriteOp::UpsertPartner(partner("Vidraçaria Sol")));
        writer.flush().await.unwrap();

        let stored = store.load_all().await.unwrap();
        assert_eq!(stored.partners.len(), 1);
        assert_eq!(stored.partners[0].name, "Vidraçaria Sol");
    }

    #[tokio::test]
    async fn failed_write_does_not_stop_the_queue() {
        let store = Arc::new(MemoryStore::new());
        let writer = WriteBehind::spawn(store.clone());

        store.set_fail_writes(true);
        writer.submit(WriteOp::UpsertPartner(partner("Perdido")));
        writer.flush().await.unwrap();

        store.set_fail_writes(false);
        writer.submit(WriteOp::UpsertPartner(partner("Gravado")));
        writer.flush().await.unwrap();

        let stored = store.load_all().await.unwrap();
        assert_eq!(stored.partners.len(), 1);
        assert_eq!(stored.partners[0].name, "Gravado");
    }
}
