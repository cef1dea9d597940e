use vocabecho_lib::flashcards::answer::LetterMark;
use vocabecho_lib::flashcards::{CardInstance, Direction};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in a color when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub fn bold(text: &str, use_color: bool) -> String {
    paint(text, Color::BOLD, use_color)
}

pub fn dim(text: &str, use_color: bool) -> String {
    paint(text, Color::GRAY, use_color)
}

/// Typed answer with right letters green and wrong ones red. Without colors
/// wrong letters are underlined with `^` on a second line.
pub fn render_letter_diff(diff: &[(char, LetterMark)], use_color: bool) -> String {
    if use_color {
        return diff
            .iter()
            .map(|(ch, mark)| match mark {
                LetterMark::Match => format!("{}{}{}", Color::GREEN, ch, Color::RESET),
                LetterMark::Mismatch => format!("{}{}{}", Color::RED, ch, Color::RESET),
                LetterMark::Space => ch.to_string(),
            })
            .collect();
    }

    let typed: String = diff.iter().map(|(ch, _)| *ch).collect();
    let marks: String = diff
        .iter()
        .map(|(_, mark)| if *mark == LetterMark::Mismatch { '^' } else { ' ' })
        .collect();
    if marks.trim().is_empty() {
        typed
    } else {
        format!("{}\n{}", typed, marks.trim_end())
    }
}

/// Short tag shown next to a card instance, e.g. `typed` or `reversed ←`
pub fn instance_tag(card: &CardInstance) -> String {
    let arrow = match card.direction {
        Some(Direction::Forward) => " →",
        Some(Direction::Reverse) => " ←",
        None => "",
    };
    format!("{}{}", card.card_type.label(), arrow)
}

/// One-line listing entry for a card instance
pub fn render_instance_line(card: &CardInstance, use_color: bool) -> String {
    format!(
        "  {}  {} {} {}  {}",
        dim(&card.instance_id, use_color),
        card.question,
        dim("→", use_color),
        card.answer,
        dim(&format!("[{}]", instance_tag(card)), use_color)
    )
}
