//! Floor Router - 餐厅桌台 / 服务员分配引擎
//!
//! Given the floor (tables with classifier-observed states, waiters with
//! scores and workloads) and a waiting party, produce ranked
//! (table, waiter) options and durably commit the one the host picks.
//!
//! # 模块结构
//!
//! ```text
//! floor-router/src/
//! ├── core/          # 配置
//! ├── floor/         # 路由引擎、存储、管理器
//! └── utils/         # 日志、输入校验
//! ```

pub mod core;
pub mod floor;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, RoutingConfig};
pub use floor::{FloorManager, FloorStorage, ManagerError, ManagerResult, MergeReport, SizeBracket};
pub use shared::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, read the configuration, prepare the work directory and
/// start logging.
pub fn setup_environment() -> anyhow::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    if let Some(parent) = config.db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;
    Ok(config)
}
