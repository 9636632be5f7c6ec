use crate::floor::SizeBracket;
use std::path::PathBuf;
use std::str::FromStr;

/// 路由器配置 - 进程级配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./work_dir | 工作目录 |
/// | FLOOR_DB_PATH | {WORK_DIR}/floor.redb | 楼面数据库 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 日志 |
/// | LOG_DIR | (none) | 日志目录 (按天滚动) |
///
/// Routing weights are read by [`RoutingConfig::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// redb 文件路径
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
    pub routing: RoutingConfig,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into());
        let db_path = std::env::var("FLOOR_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(&work_dir).join("floor.redb"));
        Self {
            work_dir,
            db_path,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: env_or("LOG_JSON", false),
            log_dir: std::env::var("LOG_DIR").ok(),
            routing: RoutingConfig::from_env(),
        }
    }
}

/// Scoring weights and limits for table / waiter routing
///
/// | 环境变量 | 默认值 |
/// |----------|--------|
/// | FLOOR_EFFICIENCY_WEIGHT | 1.0 |
/// | FLOOR_WORKLOAD_PENALTY | 3.0 |
/// | FLOOR_TIP_PENALTY | 2.0 |
/// | FLOOR_TIP_REFERENCE | 200.0 |
/// | FLOOR_MAX_TABLES_PER_WAITER | 5 |
/// | FLOOR_TOP_N | 3 |
/// | FLOOR_CAPACITY_SLACK | 2 (`none` disables the band) |
/// | FLOOR_FIT_WEIGHT | 4.0 |
/// | FLOOR_PREFERENCE_BONUS | 2.0 |
/// | FLOOR_SIZE_BRACKETS | `Small:1-2,Medium:3-4,Large:5-8` |
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingConfig {
    /// Multiplier on the waiter's performance score
    pub efficiency_weight: f64,
    /// Subtracted per live table
    pub workload_penalty: f64,
    /// Multiplier on the normalized tip total
    pub tip_penalty: f64,
    /// Tip total that normalizes to 0.5 (per-shift soft cap)
    pub tip_reference: f64,
    /// A waiter at this many live tables takes no new party
    pub max_tables_per_waiter: u32,
    /// Options returned for a party of known size
    pub top_n: usize,
    /// Preferred band is `party_size..=party_size + slack`; `None` disables it
    pub capacity_slack: Option<u32>,
    /// Fit score of a table with zero wasted seats
    pub fit_weight: f64,
    /// Added when the table type matches the party's preference
    pub preference_bonus: f64,
    /// Brackets evaluated when the party size is unknown
    pub size_brackets: Vec<SizeBracket>,
}

impl RoutingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let capacity_slack = match std::env::var("FLOOR_CAPACITY_SLACK") {
            Ok(v) if v.eq_ignore_ascii_case("none") => None,
            Ok(v) => v.parse().ok().or(defaults.capacity_slack),
            Err(_) => defaults.capacity_slack,
        };
        let size_brackets = match std::env::var("FLOOR_SIZE_BRACKETS") {
            Ok(list) => SizeBracket::parse_list(&list).unwrap_or_else(|e| {
                tracing::warn!(value = %list, error = %e, "Invalid FLOOR_SIZE_BRACKETS, using defaults");
                SizeBracket::defaults()
            }),
            Err(_) => defaults.size_brackets,
        };
        Self {
            efficiency_weight: env_or("FLOOR_EFFICIENCY_WEIGHT", defaults.efficiency_weight),
            workload_penalty: env_or("FLOOR_WORKLOAD_PENALTY", defaults.workload_penalty),
            tip_penalty: env_or("FLOOR_TIP_PENALTY", defaults.tip_penalty),
            tip_reference: env_or("FLOOR_TIP_REFERENCE", defaults.tip_reference),
            max_tables_per_waiter: env_or(
                "FLOOR_MAX_TABLES_PER_WAITER",
                defaults.max_tables_per_waiter,
            ),
            top_n: env_or("FLOOR_TOP_N", defaults.top_n),
            capacity_slack,
            fit_weight: env_or("FLOOR_FIT_WEIGHT", defaults.fit_weight),
            preference_bonus: env_or("FLOOR_PREFERENCE_BONUS", defaults.preference_bonus),
            size_brackets,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            efficiency_weight: 1.0,
            workload_penalty: 3.0,
            tip_penalty: 2.0,
            tip_reference: 200.0,
            max_tables_per_waiter: 5,
            top_n: 3,
            capacity_slack: Some(2),
            fit_weight: 4.0,
            preference_bonus: 2.0,
            size_brackets: SizeBracket::defaults(),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
