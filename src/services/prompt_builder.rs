//! 提示词构建
//!
//! 章节原文不做截断、不做转义，直接嵌入三引号块中

use crate::clients::ProviderKind;

/// 为指定服务商构建出题提示词
pub fn build_prompt(kind: ProviderKind, chapter_text: &str, num_questions: usize) -> String {
    match kind {
        ProviderKind::OpenAi => build_openai_prompt(chapter_text, num_questions),
        ProviderKind::Anthropic => build_anthropic_prompt(chapter_text, num_questions),
    }
}

fn build_openai_prompt(chapter_text: &str, num_questions: usize) -> String {
    format!(
        r#"You are an assessment writer.
Create {num_questions} multiple-choice questions (4 options each) based ONLY on the chapter text below.
Return JSON array only. Object schema:
{{"question": str, "options": [str,str,str,str], "correct": int, "explanation": str}}

Chapter:
"""{chapter_text}""""#
    )
}

fn build_anthropic_prompt(chapter_text: &str, num_questions: usize) -> String {
    format!(
        r#"Create {num_questions} multiple-choice questions (4 options each) based ONLY on the chapter text below.
Return ONLY a JSON array of objects: question, options[4], correct (index), explanation.

Chapter:
"""{chapter_text}""""#
    )
}
