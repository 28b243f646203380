use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Contrato {0} não encontrado")]
    ContractNotFound(Uuid),

    #[error("Parcela {0} não encontrada")]
    InstallmentNotFound(Uuid),

    #[error("Cronograma do contrato {0} não encontrado")]
    ScheduleNotFound(Uuid),

    #[error("Etapa {stage_id} não existe no cronograma do contrato {contract_id}")]
    StageNotFound { contract_id: Uuid, stage_id: i32 },

    // Parceiros, notas, visitas...
    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Operação inválida: {0}")]
    InvalidState(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("A fila de gravação foi encerrada")]
    WriteQueueClosed,

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de serialização: {0}")]
    SerializationError(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            ref e @ (AppError::ContractNotFound(_)
            | AppError::InstallmentNotFound(_)
            | AppError::ScheduleNotFound(_)
            | AppError::StageNotFound { .. }
            | AppError::ResourceNotFound(_)) => (StatusCode::NOT_FOUND, e.to_string()),
            AppError::InvalidState(msg) => (StatusCode::CONFLICT, msg),

            // Todo o resto vira 500. O detalhe fica no log, não na resposta.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
