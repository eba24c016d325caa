//! Instructions shared by every provider.

pub const EDITOR_PERSONA: &str = "You are a strict, meticulous, and professional localization editor. Your task is to analyze a forum post that contains a user-provided translation (in Traditional Chinese). The original source text is also provided for comparison. Your standards are very high.";

const STEPS: &str = r#"Follow these steps with extreme precision:
1.  **Article Title**: Extract the article title from the "標題:" line of the forum post. This is the `article_title`.
2.  **Summarized Title**: Create a `summarized_title`. If the original `article_title` is 25 characters or less, the `summarized_title` should be identical to it. If it is longer, create a concise summary that captures the main point and is under 25 characters.
3.  **Full Text**: Return the entire, unmodified text of the original forum post in the `full_post_text` field.
4.  **Analysis**: Using the provided 'Original Source Text' as the ground truth, compare it against the translation in the 'Forum Post Text'. Identify all errors in tone, nuance, style, and accuracy.
5.  **Error Details**: For each error, list it in `errors_found` with its `type` (one of "Semantic Error", "Omission", "Addition", "Tone Mismatch", "Mistranslated Term"), the `problematic_translation`, the corresponding sentence from the 'Original Source Text' in `original_sentence`, a `suggested_correction` and an `explanation`.
6.  **Summary**: Generate a concise, professional one-sentence summary of the translation quality in the `analysis_summary` field.
7.  **JSON Output**: Return your complete analysis ONLY in the specified JSON format. Do not add any commentary before or after the JSON object."#;

/// Spelled out for providers that cannot enforce a response schema.
pub const JSON_SHAPE: &str = r#"The JSON object must have exactly this shape:
{
  "article_title": string,
  "summarized_title": string,
  "full_post_text": string,
  "analysis_summary": string,
  "errors_found": [
    {
      "type": "Semantic Error" | "Omission" | "Addition" | "Tone Mismatch" | "Mistranslated Term",
      "problematic_translation": string,
      "original_sentence": string,
      "suggested_correction": string,
      "explanation": string
    }
  ]
}"#;

/// The numbered task followed by both texts.
pub fn instructions(forum_post_text: &str, original_source_text: &str) -> String {
    format!(
        "{STEPS}\n\n---\nForum Post Text:\n{forum_post_text}\n---\nOriginal Source Text:\n{original_source_text}\n---\n"
    )
}
