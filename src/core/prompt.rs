use crate::domain::model::{orientation_label, ReadingPrompt, ReadingRequest};

pub const ESSENCE_MARKER: &str = "The Card's Essence";
pub const READING_MARKER: &str = "Your Reading";
pub const DEFAULT_QUESTION: &str = "about my general life path";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_K: u32 = 40;

pub const SYSTEM_INSTRUCTION: &str = "You are 'Mystic Visions AI', a wise and insightful digital tarot reader. Your interpretations are profound, empathetic, and offer clear guidance. You avoid generic fortunes and focus on introspection and empowerment. Never break character.";

/// Sampling parameters, fixed for the lifetime of a proxy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub top_k: u32,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_k: DEFAULT_TOP_K,
        }
    }
}

pub fn build_user_prompt(request: &ReadingRequest) -> String {
    let question = if request.question.trim().is_empty() {
        DEFAULT_QUESTION
    } else {
        request.question.as_str()
    };

    format!(
        "I have a question in mind: \"{question}\". I have drawn the tarot card: **{card}**. \
         It appeared in the **{orientation}** position. Please provide a detailed reading for me. \
         Structure the reading into two sections using these exact titles: \
         First, a paragraph on \"{essence}\", explaining its core meaning in this orientation. \
         Second, a paragraph on \"{reading}\", connecting this essence directly to my question \
         and offering advice for my path forward. The entire response must be text only, \
         without any markdown formatting like bolding or asterisks.",
        question = question,
        card = request.card_name,
        orientation = orientation_label(request.is_reversed),
        essence = ESSENCE_MARKER,
        reading = READING_MARKER,
    )
}

pub fn build_prompt(request: &ReadingRequest, sampling: Sampling) -> ReadingPrompt {
    ReadingPrompt {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        user_prompt: build_user_prompt(request),
        temperature: sampling.temperature,
        top_k: sampling.top_k,
    }
}
