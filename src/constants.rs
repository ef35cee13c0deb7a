//! Fixed prompt templates and lookup tables for the production pipeline.
//!
//! These are design parameters, not user input: two calls with the same
//! script must produce the same default prompt.

/// How many characters of the source script are folded into a default
/// Sora prompt.
pub const SCRIPT_EXCERPT_CHARS: usize = 1200;

/// How many characters of the canonical script the B-roll analysis sees.
pub const BROLL_EXCERPT_CHARS: usize = 2000;

/// Default HeyGen voice when neither the request nor the config names one.
pub const DEFAULT_HEYGEN_VOICE: &str = "wayne";

/// Default HeyGen background color (noir black).
pub const DEFAULT_HEYGEN_BACKGROUND: &str = "#000000";

fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Deterministic default prompt for a Sora render: fixed style directive
/// around a truncated prefix of the script.
pub fn default_sora_prompt(script: &str) -> String {
    format!(
        "Create a cinematic film noir video inspired by this script.\n\n{}\n\n\
         Style: high-contrast noir lighting, moody urban environments, dramatic shadows, \
         stylish camera moves. Keep it abstract and atmospheric.",
        excerpt(script, SCRIPT_EXCERPT_CHARS)
    )
}

/// Prompt for the long-form script generation stage.
pub fn script_prompt(series: &str, title: &str, premise: &str) -> String {
    format!(
        "Generate a video script for a YouTube video about Sales Performance Management (SPM).\n\n\
         Series: {series}\n\
         Title: {title}\n\
         Premise: {premise}\n\n\
         Structure the script with these sections:\n\
         1. **Hook** (15 seconds) - Grab attention immediately\n\
         2. **Intro** (30 seconds) - Set context and preview\n\
         3. **Body** (3-5 main points, 6-8 minutes total)\n\
         4. **Summary** (1 minute) - Recap key takeaways\n\
         5. **CTA** (15 seconds) - What to do next\n\n\
         Tone: Direct, authoritative, no-nonsense. Like a film noir detective explaining how things really work.\n\n\
         Write ONLY the script content. No meta-commentary. Use clear section headers."
    )
}

/// Prompt for adapting the canonical script to one platform format.
pub fn cut_prompt(format_name: &str, duration_secs: i32, specs: &str, script: &str) -> String {
    format!(
        "Adapt this video script for {format_name}.\n\n\
         Original Script:\n{script}\n\n\
         Platform Requirements:\n\
         - Duration: {duration_secs} seconds ({specs})\n\
         - Keep the core message and narrator voice\n\
         - Optimize for {format_name} audience and format\n\n\
         Output ONLY the adapted script. No meta-commentary."
    )
}

/// Prompt asking for a JSON array of B-roll shot descriptions.
pub fn broll_prompt(script: &str) -> String {
    format!(
        "Analyze this video script and generate 5-8 B-roll video prompts for a film noir aesthetic.\n\n\
         Script:\n{}\n\n\
         For each B-roll clip, create a cinematic prompt suitable for AI video generation.\n\n\
         Requirements:\n\
         - Film noir style: moody lighting, high contrast, urban settings\n\
         - Relevant to the topic being discussed\n\
         - Each 3-6 seconds long\n\
         - Visual metaphors for abstract concepts\n\n\
         Return a JSON array of objects with:\n\
         - scene: Brief description\n\
         - prompt: Detailed AI generation prompt\n\
         - duration: Seconds (3-6)\n\
         - timing: When in script\n\n\
         Return ONLY the JSON array.",
        excerpt(script, BROLL_EXCERPT_CHARS)
    )
}

/// Prompt asking for a single JSON thumbnail concept object.
pub fn thumbnail_prompt(title: &str, premise: &str) -> String {
    format!(
        "Create a compelling thumbnail concept for this video:\n\n\
         Title: {title}\n\
         Premise: {premise}\n\n\
         Generate a thumbnail description that:\n\
         - Film noir aesthetic (dark, moody, high contrast)\n\
         - Text overlay concept (punchy, readable)\n\
         - Emotional hook (curiosity, concern, insight)\n\n\
         Return a single JSON object:\n\
         {{\n\
           \"concept\": \"Brief concept description\",\n\
           \"image_prompt\": \"Detailed AI image generation prompt\",\n\
           \"text_overlay\": \"Main text to overlay\",\n\
           \"color_scheme\": \"Dominant colors\"\n\
         }}\n\n\
         Return ONLY the JSON object."
    )
}

/// Strips markdown code fences that chat models like to wrap JSON in.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sora_prompt_is_deterministic() {
        let script = "INT. OFFICE - NIGHT. The quota board glows.";
        assert_eq!(default_sora_prompt(script), default_sora_prompt(script));
        assert!(default_sora_prompt(script).contains(script));
    }

    #[test]
    fn sora_prompt_truncates_long_scripts() {
        let script = "x".repeat(5000);
        let prompt = default_sora_prompt(&script);
        assert!(prompt.contains(&"x".repeat(SCRIPT_EXCERPT_CHARS)));
        assert!(!prompt.contains(&"x".repeat(SCRIPT_EXCERPT_CHARS + 1)));
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        let script = "日本語のテキスト".repeat(400);
        // Must not panic on multi-byte boundaries.
        let _ = default_sora_prompt(&script);
    }

    #[test]
    fn code_fence_stripping() {
        let fenced = "```json\n[{\"a\":1}]\n```";
        assert_eq!(strip_code_fences(fenced), "[{\"a\":1}]");
    }
}
