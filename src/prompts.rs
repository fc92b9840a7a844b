//! Prompt templates for code generation, chat context and preset tasks.

use clap::ValueEnum;

/// Target language used by the `translate` preset when none is given.
pub const DEFAULT_TARGET_LANG: &str = "TypeScript";

/// System instruction for code generation in `language`.
pub fn code_system_prompt(language: &str) -> String {
    format!(
        "You are an expert {language} programmer. \n\
         Output only code, no explanations unless asked.\n\
         Follow best practices and include error handling."
    )
}

/// User prompt for code generation, with the context fenced ahead of the task.
/// Empty context is left out.
pub fn code_prompt(task: &str, context: Option<&str>) -> String {
    match context.filter(|context| !context.is_empty()) {
        Some(context) => format!("Context:\n```\n{context}\n```\n\nTask: {task}"),
        None => task.to_string(),
    }
}

/// User prompt for the `chat` subcommand.
pub fn chat_prompt(message: &str, context: Option<&str>) -> String {
    match context.filter(|context| !context.is_empty()) {
        Some(context) => format!("Context:\n{context}\n\n{message}"),
        None => message.to_string(),
    }
}

/// Canned code-processing tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Refactor,
    Test,
    Docs,
    Types,
    Translate,
    Explain,
}

impl Preset {
    /// Instruction line placed above the code block.
    pub fn instruction(self, target_lang: Option<&str>) -> String {
        match self {
            Preset::Refactor => {
                "Refactor this code to be cleaner and more maintainable:".to_string()
            }
            Preset::Test => "Write comprehensive pytest tests for this code:".to_string(),
            Preset::Docs => "Write docstrings and comments for this code:".to_string(),
            Preset::Types => "Add type hints to this Python code:".to_string(),
            Preset::Translate => format!(
                "Translate this code to {}:",
                target_lang.unwrap_or(DEFAULT_TARGET_LANG)
            ),
            Preset::Explain => "Explain what this code does step by step:".to_string(),
        }
    }
}

/// Full prompt for a preset applied to `context`.
pub fn preset_prompt(preset: Preset, context: &str, target_lang: Option<&str>) -> String {
    format!(
        "{}\n\n```\n{}\n```",
        preset.instruction(target_lang),
        context
    )
}
