/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 评估服务 API 基础地址
    pub api_base_url: String,
    /// 评估服务访问凭证（不透明字符串，原样透传）
    pub api_key: String,
    /// 调用评估服务时使用的用户标识
    pub user_id: String,
    /// 待评估文档存放目录（批量模式）
    pub docs_folder: String,
    /// 同时评估的文档数量上限（批量模式）
    pub max_concurrent_files: usize,
    /// 是否显示详细日志（逐条判定理由）
    pub verbose_logging: bool,
    /// 网关请求超时（秒），超时控制完全由 HTTP 客户端承担
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.dify.ai/v1".to_string(),
            api_key: String::new(),
            user_id: "doc-compliance-check".to_string(),
            docs_folder: "documents".to_string(),
            max_concurrent_files: 4,
            verbose_logging: false,
            request_timeout_secs: 300,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("EVAL_API_BASE_URL").unwrap_or(default.api_base_url),
            api_key: std::env::var("EVAL_API_KEY").unwrap_or(default.api_key),
            user_id: std::env::var("EVAL_USER_ID").unwrap_or(default.user_id),
            docs_folder: std::env::var("DOCS_FOLDER").unwrap_or(default.docs_folder),
            max_concurrent_files: std::env::var("MAX_CONCURRENT_FILES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_files),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
        }
    }
}
