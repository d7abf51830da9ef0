use std::path::PathBuf;

/// 程序配置
///
/// 启动时构建一次，之后以只读方式注入到各层（API 密钥不再是全局变量）
#[derive(Clone, Debug)]
pub struct Config {
    /// 监听地址
    pub bind_address: String,
    /// 章节文本目录
    pub chapters_dir: PathBuf,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- OpenAI 配置 ---
    pub openai_api_key: Option<String>,
    pub openai_api_base_url: String,
    pub openai_model_name: String,
    // --- Anthropic 配置 ---
    pub anthropic_api_key: Option<String>,
    pub anthropic_api_base_url: String,
    pub anthropic_model_name: String,
    pub anthropic_version: String,
    // --- 通用 LLM 请求参数 ---
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    pub max_tokens: u32,
    /// 仅 OpenAI 使用
    pub temperature: f32,
    // --- 出题数量 ---
    /// 未指定数量（或为 0）时使用的默认值
    pub default_question_count: usize,
    /// 单次请求允许的最大题目数，未设置时不限制
    pub max_question_count: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8001".to_string(),
            chapters_dir: PathBuf::from("chapters"),
            verbose_logging: false,
            openai_api_key: None,
            openai_api_base_url: "https://api.openai.com/v1".to_string(),
            openai_model_name: "gpt-4o-mini".to_string(),
            anthropic_api_key: None,
            anthropic_api_base_url: "https://api.anthropic.com/v1".to_string(),
            anthropic_model_name: "claude-3-haiku-20240307".to_string(),
            anthropic_version: "2023-06-01".to_string(),
            request_timeout_secs: 60,
            max_tokens: 1500,
            temperature: 0.2,
            default_question_count: 5,
            max_question_count: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            bind_address: std::env::var("BIND_ADDRESS").unwrap_or(default.bind_address),
            chapters_dir: std::env::var("CHAPTERS_DIR").map(PathBuf::from).unwrap_or(default.chapters_dir),
            verbose_logging: parsed_var("VERBOSE_LOGGING").unwrap_or(default.verbose_logging),
            openai_api_key: non_empty_var("OPENAI_API_KEY"),
            openai_api_base_url: std::env::var("OPENAI_API_BASE_URL").unwrap_or(default.openai_api_base_url),
            openai_model_name: std::env::var("OPENAI_MODEL").unwrap_or(default.openai_model_name),
            anthropic_api_key: non_empty_var("ANTHROPIC_API_KEY"),
            anthropic_api_base_url: std::env::var("ANTHROPIC_API_BASE_URL").unwrap_or(default.anthropic_api_base_url),
            anthropic_model_name: std::env::var("ANTHROPIC_MODEL").unwrap_or(default.anthropic_model_name),
            anthropic_version: std::env::var("ANTHROPIC_VERSION").unwrap_or(default.anthropic_version),
            request_timeout_secs: parsed_var("LLM_TIMEOUT_SECS").unwrap_or(default.request_timeout_secs),
            max_tokens: parsed_var("LLM_MAX_TOKENS").unwrap_or(default.max_tokens),
            temperature: parsed_var("LLM_TEMPERATURE").unwrap_or(default.temperature),
            default_question_count: parsed_var("DEFAULT_QUESTIONS")
                .filter(|n: &usize| *n > 0)
                .unwrap_or(default.default_question_count),
            max_question_count: parsed_var("MAX_QUESTIONS")
                .filter(|n: &usize| *n > 0)
                .or(default.max_question_count),
        }
    }

    /// 是否配置了 OpenAI 密钥
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.is_some()
    }

    /// 是否配置了 Anthropic 密钥
    pub fn has_anthropic(&self) -> bool {
        self.anthropic_api_key.is_some()
    }
}

/// 读取环境变量，空字符串（含纯空白）视为未设置
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
