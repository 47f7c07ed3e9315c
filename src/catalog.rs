//! The fixed question catalog. Immutable process-wide; every id is unique.

use std::sync::LazyLock;

use crate::types::{Category, InputType, Question, Tier};

static CATALOG: LazyLock<Vec<Question>> = LazyLock::new(|| {
    vec![
        // Small (pocket change): light nudge, impulse, it adds up
        q(
            "s1",
            "Do you really need this right now, or is it just an impulse?",
            Category::Impulse,
            Tier::Small,
            InputType::Buttons,
        ),
        q(
            "s2",
            "If you bought this 10 times, would you notice the missing money?",
            Category::Money,
            Tier::Small,
            InputType::Buttons,
        ),
        q(
            "s3",
            "Is this purchase a 'want' masquerading as a 'need'?",
            Category::Need,
            Tier::Small,
            InputType::Buttons,
        ),
        // Medium: slow down, regret, alternatives
        q(
            "m0",
            "This item costs {price}, over the $6.70 mark. Is it truly essential right now?",
            Category::Money,
            Tier::Medium,
            InputType::Buttons,
        ),
        with_unit(
            q(
                "m1",
                "How many hours did you have to work to pay for this?",
                Category::Money,
                Tier::Medium,
                InputType::Number,
            ),
            "hours",
        ),
        q(
            "m2",
            "Do you already own something that serves the same purpose?",
            Category::Need,
            Tier::Medium,
            InputType::Buttons,
        ),
        q(
            "m3",
            "Will you still be using this in a month?",
            Category::Future,
            Tier::Medium,
            InputType::Buttons,
        ),
        with_placeholder(
            q(
                "m4",
                "Is there a cheaper alternative that works just as well?",
                Category::Money,
                Tier::Medium,
                InputType::Text,
            ),
            "Name an alternative or type 'None'",
        ),
        q(
            "m5",
            "Are you buying this to feel better about something else?",
            Category::Emotion,
            Tier::Medium,
            InputType::Buttons,
        ),
        // Big: prevent regret, goals, future you
        q(
            "b0",
            "This item costs {price}, over the $67 mark. Have you checked your monthly allowance?",
            Category::Money,
            Tier::Big,
            InputType::Buttons,
        ),
        q(
            "b1",
            "Does this purchase align with your long-term financial goals?",
            Category::Future,
            Tier::Big,
            InputType::Buttons,
        ),
        with_scale_label(
            q(
                "b2",
                "If you wait 24 hours, will you still want it as much?",
                Category::Impulse,
                Tier::Big,
                InputType::Scale,
            ),
            "Desire stability (1=will fade, 10=will persist)",
        ),
        with_placeholder(
            q(
                "b3",
                "What else could you do with this money that would make you happier?",
                Category::Money,
                Tier::Big,
                InputType::Text,
            ),
            "List 1-2 other things...",
        ),
        q(
            "b4",
            "Imagine you've bought it. It's next week. Do you regret it?",
            Category::Emotion,
            Tier::Big,
            InputType::Buttons,
        ),
        q(
            "b5",
            "Is this purchase replacing a high-quality item you already own?",
            Category::Need,
            Tier::Big,
            InputType::Buttons,
        ),
    ]
});

fn q(id: &str, text: &str, category: Category, tier: Tier, input_type: InputType) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        category,
        tier,
        input_type,
        unit: None,
        placeholder: None,
        scale_label: None,
    }
}

fn with_unit(mut question: Question, unit: &str) -> Question {
    question.unit = Some(unit.to_string());
    question
}

fn with_placeholder(mut question: Question, placeholder: &str) -> Question {
    question.placeholder = Some(placeholder.to_string());
    question
}

fn with_scale_label(mut question: Question, label: &str) -> Question {
    question.scale_label = Some(label.to_string());
    question
}

pub fn catalog() -> &'static [Question] {
    &CATALOG
}

pub fn find(id: &str) -> Option<&'static Question> {
    CATALOG.iter().find(|q| q.id == id)
}
