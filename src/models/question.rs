use serde::{Deserialize, Serialize};

/// 每道题固定的选项数量
pub const OPTION_COUNT: usize = 4;

/// 选择题
///
/// 无论来自远程模型还是兜底生成，都必须满足：恰好 4 个选项，`correct` 在 `[0, 4)` 内
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    /// 正确选项下标（从 0 开始）
    pub correct: usize,
    pub explanation: String,
}

impl Question {
    /// 校验题目结构，返回不合法的原因
    pub fn validate(&self) -> Result<(), String> {
        if self.options.len() != OPTION_COUNT {
            return Err(format!(
                "expected {} options, got {}",
                OPTION_COUNT,
                self.options.len()
            ));
        }
        if self.correct >= OPTION_COUNT {
            return Err(format!(
                "correct index {} out of range [0, {}]",
                self.correct,
                OPTION_COUNT - 1
            ));
        }
        Ok(())
    }
}
