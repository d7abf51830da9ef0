//! 离线兜底出题
//!
//! 不调用任何外部服务，结果只取决于章节文本和题目数量

use crate::models::Question;

const PLACEHOLDER_FACT: &str = "This is a placeholder fact about the chapter.";
const QUESTION_STEM: &str = "Which statement best reflects the chapter content?";
const EXPLANATION: &str = "This option directly restates the accurate fact from the chapter.";
const DISTRACTORS: [&str; 3] = [
    "An unrelated statement.",
    "A partially correct but misleading statement.",
    "A contradictory statement.",
];
/// 一行至少包含这么多个词才算"事实"
const MIN_FACT_WORDS: usize = 4;
/// 换行符集合，`\r\n` 切出的空段会被空行过滤掉
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// 从章节文本生成 `num_questions` 道占位选择题
///
/// 事实不够时循环使用，正确答案固定为第 0 个选项
pub fn sample_questions_from_text(text: &str, num_questions: usize) -> Vec<Question> {
    let facts = extract_facts(text);

    (0..num_questions)
        .map(|i| {
            let fact = facts[i % facts.len()];
            let mut options = Vec::with_capacity(1 + DISTRACTORS.len());
            options.push(fact.to_string());
            options.extend(DISTRACTORS.iter().map(|d| d.to_string()));

            Question {
                question: format!("Q{}: {}", i + 1, QUESTION_STEM),
                options,
                correct: 0,
                explanation: EXPLANATION.to_string(),
            }
        })
        .collect()
}

/// 提取事实行；一条都没有时返回占位事实，保证结果非空
fn extract_facts(text: &str) -> Vec<&str> {
    let facts: Vec<&str> = text
        .split(LINE_BREAKS)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.trim_matches(|c: char| c == '-' || c == '•' || c == ' ').trim())
        .filter(|line| line.split_whitespace().count() >= MIN_FACT_WORDS)
        .collect();

    if facts.is_empty() {
        vec![PLACEHOLDER_FACT]
    } else {
        facts
    }
}
