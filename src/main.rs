//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use studio_backend::{create_router, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    let addr = app_state.config.bind_addr.clone();
    let dashboard = app_state.dashboard.clone();
    let app = create_router(app_state);

    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Encerrando...");
        })
        .await
        .expect("Erro no servidor Axum");

    // Gravações pendentes vão para o banco antes de sair
    if let Err(e) = dashboard.flush().await {
        tracing::error!("🔥 Falha ao esvaziar a fila de gravação: {:?}", e);
    }
}
