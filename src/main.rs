use std::sync::Arc;
use std::time::Duration;

use procure_workspace_rust::{create_pool, router, AppConfig, PgDocumentStore, WorkspaceService};
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config.server);
    info!("Workspace settings: {:?}", config.workspace);

    // 创建数据库连接池
    let pool = create_pool(&config.database).await?;
    info!("Database pool created (max_connections={})", config.database.max_connections);

    let store = Arc::new(PgDocumentStore::new(
        pool,
        Duration::from_secs(config.database.query_timeout_secs),
    ));
    let service = Arc::new(WorkspaceService::new(store, config.workspace.clone()));

    let app = router(service).layer(ServiceBuilder::new());

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET /api/workspace/po       - PO workspace (+ /facets, /export, /:id)");
    info!("  GET /api/workspace/invoice  - Invoice workspace (+ /facets, /export, /:id)");
    info!("  GET /api/workspace/grn      - GRN workspace (+ /facets, /export, /:id)");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
