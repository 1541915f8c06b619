use crate::core::session::{Session, SessionState};
use crate::domain::model::{DrawnCard, ReadingSection};

pub const TITLE: &str = "✨ Mystic Visions Tarot ✨";
pub const TAGLINE: &str = "Gaze into the digital ether and find your truth.";
pub const QUESTION_PROMPT: &str = "Focus your mind. Ask your question.";
pub const QUESTION_HINT: &str = "(or press Enter to simply seek general guidance)";
pub const LOADING_TEXT: &str = "🔮 Shuffling the cosmos...";

pub fn render_header() -> String {
    format!("{}\n{}\n", TITLE, TAGLINE)
}

pub fn render_idle(session: &Session) -> String {
    let mut out = format!("{}\n{}\n", QUESTION_PROMPT, QUESTION_HINT);
    if let Some(error) = session.error() {
        out.push_str(&format!("❌ {}\n", error));
    }
    out
}

pub fn render_loading() -> String {
    format!("{}\n", LOADING_TEXT)
}

pub fn render_card(card: &DrawnCard) -> String {
    format!(
        "🃏 {} - {}\n   Card art: {}\n",
        card.card.name,
        card.orientation_label(),
        card.card.image_url()
    )
}

pub fn render_sections(sections: &[ReadingSection]) -> String {
    sections
        .iter()
        .map(|section| match &section.title {
            Some(title) => format!("── {} ──\n{}\n", title, section.content),
            None => format!("{}\n", section.content),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_result(session: &Session) -> String {
    match session.state() {
        SessionState::Result { card, .. } => {
            let mut out = render_card(card);
            out.push('\n');
            out.push_str(&render_sections(&session.sections()));
            out
        }
        _ => String::new(),
    }
}

/// Text for whatever state the session is in.
pub fn render(session: &Session) -> String {
    match session.state() {
        SessionState::Idle { .. } => render_idle(session),
        SessionState::Loading { .. } => render_loading(),
        SessionState::Result { .. } => render_result(session),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::CONNECTION_LOST;
    use crate::utils::error::TarotError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_idle_screen_shows_error() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = Session::new();
        assert!(!render(&session).contains('❌'));

        let pending = session.begin_draw(&mut rng).unwrap();
        assert_eq!(render(&session), render_loading());

        session.complete(pending.ticket, Err(TarotError::EmptyResponse));
        assert!(render(&session).contains(CONNECTION_LOST));
    }

    #[test]
    fn test_result_screen() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = Session::new();
        let pending = session.begin_draw(&mut rng).unwrap();
        let card = session.drawn_card().cloned().unwrap();

        session.complete(
            pending.ticket,
            Ok("The Card's Essence\nRenewal.\nYour Reading\nBegin again.".to_string()),
        );

        let screen = render(&session);
        assert!(screen.contains(&format!(
            "{} - {}",
            card.card.name,
            card.orientation_label()
        )));
        assert!(screen.contains("── The Card's Essence ──\nRenewal.\n"));
        assert!(screen.contains("── Your Reading ──\nBegin again.\n"));
    }

    #[test]
    fn test_untitled_sections_render_plain() {
        let sections = vec![ReadingSection {
            title: None,
            content: "Plain words.".to_string(),
        }];
        assert_eq!(render_sections(&sections), "Plain words.\n");
    }
}
