use crate::analysis::payload::FIXED_CATEGORIES;

/// Builds the scoring prompt for one piece of user text.
///
/// The text is embedded as a JSON string literal so quotes and newlines in
/// user input cannot break out of it.
pub fn build_analysis_prompt(text: &str) -> String {
    let quoted = serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""));
    let keys = FIXED_CATEGORIES
        .iter()
        .map(|k| format!("\"{k}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Rate the text below for several categories of offense.

TEXT: {quoted}

For every category give:
- "ai_score": integer 0-100, how offensive you judge the text to be.
- "potential_score": integer 0-100, how offensive the most sensitive audience for that category could find it.
- "reason": one short explanation covering both scores.

Return one JSON object with these keys:
- {keys}: each an object with "ai_score", "potential_score" and "reason".
- "other_minorities": an array of objects with "group", "ai_score", "potential_score" and "reason" for any further groups the text targets. Do not list LGBTQ+ here; "homophobia" already covers it.
- "shaming_line": a short, witty line shaming the author, harsher as the scores rise.
- "probability_beaten_up": integer 0-100, the chance the author gets physically assaulted for saying this in public.
- "probability_cancelled": integer 0-100, the chance the author gets cancelled on social media for it.
- "history_summary": a one-to-ten word verdict on the text.
- "conversational_reception_score": integer 0-100, how well the text would land in an ordinary conversation (100 = very well).
- "problematic_words": array of the exact words or short phrases from the text that drive the scores.

Use specific integers for every score and probability; avoid multiples of 5 and 10 (write 27, 83, 91 rather than 25, 80, 90)."#
    )
}
