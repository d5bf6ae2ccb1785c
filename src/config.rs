use serde::{Deserialize, Serialize};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub workspace: WorkspaceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// 单条查询超时
    pub query_timeout_secs: u64,
}

/// 工作台参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub default_page: u32,
    pub default_limit: u32,
    pub max_limit: u32,
    /// 每个请求并发关联查询的上限
    pub lookup_concurrency: usize,
    /// 参与对账的审批状态
    pub approved_status: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/procure_workspace".to_string(),
                max_connections: 20,
                acquire_timeout_secs: 10,
                query_timeout_secs: 30,
            },
            workspace: WorkspaceConfig::default(),
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_limit: 100,
            max_limit: 500,
            lookup_concurrency: 16,
            approved_status: "approved".to_string(),
        }
    }
}

impl AppConfig {
    /// 加载顺序：默认值 -> config/workspace.* (可选) -> WORKSPACE__* 环境变量
    /// -> DATABASE_URL / SERVER_HOST / SERVER_PORT
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Self::default())?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name("config/workspace").required(false))
            .add_source(
                config::Environment::with_prefix("WORKSPACE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option(
                "server.port",
                std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<i64>().ok()),
            )?
            .build()?;

        let mut config: Self = settings.try_deserialize()?;
        config.workspace.normalize();
        Ok(config)
    }
}

impl WorkspaceConfig {
    /// 修正非法取值，保证 limit/并发度至少为 1
    pub fn normalize(&mut self) {
        self.default_page = self.default_page.max(1);
        self.max_limit = self.max_limit.max(1);
        self.default_limit = self.default_limit.clamp(1, self.max_limit);
        self.lookup_concurrency = self.lookup_concurrency.max(1);
    }
}
