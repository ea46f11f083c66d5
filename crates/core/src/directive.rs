use crate::request::GenerationRequest;

/// Build the instruction sent to the generation capability.
///
/// Embeds the category, its extension and the user's prompt, followed by the
/// output-format rules. The comment rule only applies to code categories.
pub fn build_directive(request: &GenerationRequest) -> String {
    let category = request.category;

    let mut rules = vec![
        "Return ONLY the content of the file.".to_string(),
        "Do NOT wrap the content in markdown code blocks (no ``` fences).".to_string(),
        "Do NOT include any conversational text, introductions, or conclusions.".to_string(),
    ];
    if category.is_code() {
        rules.push("Include inline comments where they help clarity.".to_string());
    } else {
        rules.push("Do NOT add explanatory comments; output the document itself.".to_string());
    }
    rules.push(format!(
        "Ensure the content is production-ready and valid {}.",
        category.label()
    ));

    let numbered: Vec<String> = rules
        .iter()
        .enumerate()
        .map(|(i, rule)| format!("{}. {}", i + 1, rule))
        .collect();

    format!(
        "You are an expert code and content generator.\n\
         Your task is to generate the CONTENT of a file based on the user's description.\n\
         \n\
         Target File Type: {}\n\
         Target Extension: {}\n\
         \n\
         User Request: {}\n\
         \n\
         IMPORTANT RULES:\n{}",
        category.label(),
        category.extension(),
        request.prompt.trim(),
        numbered.join("\n")
    )
}
