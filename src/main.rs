//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod notifications;
mod services;

// Importações principais
use crate::config::AppState;
use crate::middleware::company::company_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Lida com o Result retornado por AppState::new()
    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de empresa (sem guard: é aqui que o tenant nasce)
    let company_routes = Router::new()
        .route(
            "/",
            post(handlers::companies::create_company),
        )
        .route(
            "/{id}",
            get(handlers::companies::get_company)
                .patch(handlers::companies::update_company),
        );

    // Todo o resto exige o cabeçalho x-company-id validado pelo guard
    let professional_routes = Router::new()
        .route(
            "/",
            post(handlers::professionals::create_professional)
                .get(handlers::professionals::list_professionals),
        )
        .route(
            "/{id}",
            get(handlers::professionals::get_professional)
                .patch(handlers::professionals::update_professional),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            company_guard,
        ));

    let customer_routes = Router::new()
        .route(
            "/",
            post(handlers::customers::create_customer)
                .get(handlers::customers::list_customers),
        )
        .route(
            "/{id}",
            get(handlers::customers::get_customer)
                .patch(handlers::customers::update_customer),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            company_guard,
        ));

    let service_routes = Router::new()
        .route(
            "/",
            post(handlers::catalog::create_service)
                .get(handlers::catalog::list_services),
        )
        .route(
            "/{id}",
            get(handlers::catalog::get_service)
                .patch(handlers::catalog::update_service),
        )
        .route(
            "/{id}/professionals",
            post(handlers::catalog::link_professional),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            company_guard,
        ));

    let appointment_routes = Router::new()
        .route(
            "/",
            post(handlers::appointments::create_appointment)
                .get(handlers::appointments::list_appointments),
        )
        .route(
            "/detailed",
            get(handlers::appointments::list_appointments_detailed),
        )
        .route(
            "/{id}",
            get(handlers::appointments::get_appointment)
                .patch(handlers::appointments::update_appointment),
        )
        .route(
            "/{id}/cancel",
            post(handlers::appointments::cancel_appointment),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            company_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(
            SwaggerUi::new("/docs")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .nest("/api/companies", company_routes)
        .nest("/api/professionals", professional_routes)
        .nest("/api/customers", customer_routes)
        .nest("/api/services", service_routes)
        .nest("/api/appointments", appointment_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
