use antigravity_bridge_types::protocol::{ChatRole, ChatTurn, SystemInstruction};

/// Configured default instruction followed by the text of every system turn,
/// separated by blank lines. Falls back to `fallback` when all are empty.
pub fn build_system_instruction(
    default_instruction: &str,
    fallback: &str,
    turns: &[ChatTurn],
) -> SystemInstruction {
    let system_texts: Vec<String> = turns
        .iter()
        .filter(|turn| turn.role == ChatRole::System)
        .map(ChatTurn::text)
        .filter(|text| !text.trim().is_empty())
        .collect();

    SystemInstruction::text(merge_instruction(default_instruction, fallback, &system_texts))
}

pub fn merge_instruction(default_instruction: &str, fallback: &str, extra: &[String]) -> String {
    let mut sections: Vec<&str> = Vec::with_capacity(extra.len() + 1);
    if !default_instruction.trim().is_empty() {
        sections.push(default_instruction);
    }
    sections.extend(extra.iter().map(String::as_str));

    if sections.is_empty() {
        fallback.to_string()
    } else {
        sections.join("\n\n")
    }
}
