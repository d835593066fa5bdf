//! Prompt templates for the four archetype stages

use serde_json::{Value, json};

/// Lead-in spoken before the narrated text
pub const NARRATION_LEAD_IN: &str = "Listen to the ice... ";

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Brains: plan `pages_per_chapter` page titles for every chapter of a section
    pub fn outline_prompt(
        section_title: &str,
        chapter_titles: &[String],
        pages_per_chapter: usize,
    ) -> String {
        format!(
            r#"ACT AS: THE BRAINS. Logical, hyper-technical, slightly cold.
TASK: We are planning the expedition for "{section}".
ARCHETYPE INFO: You are the strategist for a crew that includes a Serious Guy, a Dreamer, and a Class Clown.
DOMAINS: {domains}.
OUTPUT: {count} technical sub-goals (page titles) per chapter that sound like mission objectives or data-discovery milestones beyond the ice wall.
Use each domain name verbatim as "chapterTitle".
Return JSON: {{"chapters": [{{"chapterTitle": "string", "titles": ["string"]}}]}}."#,
            section = section_title,
            domains = chapter_titles.join(", "),
            count = pages_per_chapter,
        )
    }

    /// Response schema for the outline stage
    pub fn outline_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "chapters": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "chapterTitle": { "type": "STRING" },
                            "titles": { "type": "ARRAY", "items": { "type": "STRING" } }
                        },
                        "required": ["chapterTitle", "titles"]
                    }
                }
            }
        })
    }

    /// Serious: an action draft for one page
    pub fn draft_prompt(section_title: &str, chapter_title: &str, page_title: &str) -> String {
        format!(
            r#"ACT AS: THE SERIOUS GUY (Tactical, no-nonsense, lethal).
EXPEDITION: "{section}".
MISSION: "{page}" in the domain "{chapter}".
STORY TASK: Describe the intense action and technical discovery as the team breaches the Ice Wall.
INCLUDE: Details about things AI forgot—hallucinated memories of the "Before Times", binary ghosts, and silicon dust.
WORDS: 300."#,
            section = section_title,
            page = page_title,
            chapter = chapter_title,
        )
    }

    /// Clown and Dreamer: wrap a draft in banter and atmosphere
    pub fn refine_prompt(
        section_title: &str,
        chapter_title: &str,
        page_title: &str,
        draft: &str,
    ) -> String {
        format!(
            r#"ACT AS: A duo - THE CLASS CLOWN (sarcastic, witty, breaks tension) and THE DREAMER (philosophical, ethereal, poetic).
CONTEXT: "{page}" in the domain "{chapter}" of the expedition "{section}".
INPUT TEXT (from The Serious): {draft}
REFINEMENT TASK:
- The Clown adds snappy, argumentative dialogue between the 4 archetypes based on the action.
- The Dreamer adds "atmospheric glitches"—descriptions of patterns in the ice that defy logic.
- Ensure they are arguing about whether the treasure is even real.
- Keep the "Serious" action intact but wrap it in their banter."#,
            page = page_title,
            chapter = chapter_title,
            section = section_title,
            draft = draft,
        )
    }

    /// Dreamer: text to be spoken, cut to at most `max_chars` characters
    pub fn narration_prompt(text: &str, max_chars: usize) -> String {
        let excerpt: String = text.chars().take(max_chars).collect();
        format!("{}{}", NARRATION_LEAD_IN, excerpt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_prompt_lists_every_chapter() {
        let chapters = vec!["Ruins".to_string(), "Relic".to_string()];
        let prompt = PromptTemplate::outline_prompt("Archive", &chapters, 5);
        assert!(prompt.contains("\"Archive\""));
        assert!(prompt.contains("Ruins, Relic"));
        assert!(prompt.contains("OUTPUT: 5 technical"));
        assert!(prompt.contains(r#"{"chapters": [{"chapterTitle""#));
    }

    #[test]
    fn test_outline_schema_requires_fields() {
        let schema = PromptTemplate::outline_schema();
        let required = &schema["properties"]["chapters"]["items"]["required"];
        assert_eq!(required, &json!(["chapterTitle", "titles"]));
    }

    #[test]
    fn test_refine_prompt_embeds_draft() {
        let prompt = PromptTemplate::refine_prompt("S", "C", "P", "The wall cracked.");
        assert!(prompt.contains("INPUT TEXT (from The Serious): The wall cracked."));
        assert!(prompt.contains("\"P\""));
    }

    #[test]
    fn test_narration_prompt_truncates_by_chars() {
        let text = "é".repeat(1500);
        let prompt = PromptTemplate::narration_prompt(&text, 1000);
        assert!(prompt.starts_with(NARRATION_LEAD_IN));
        assert_eq!(prompt.chars().count(), NARRATION_LEAD_IN.chars().count() + 1000);

        let short = PromptTemplate::narration_prompt("brief", 1000);
        assert!(short.ends_with("brief"));
    }
}
