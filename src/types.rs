use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Impulse,
    Money,
    Need,
    Future,
    Emotion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Small,
    Medium,
    Big,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    Buttons,
    Number,
    Text,
    Scale,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub category: Category,
    pub tier: Tier,
    #[serde(default)]
    pub input_type: InputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale_label: Option<String>,
}

impl Question {
    /// Substitute the `{price}` placeholder in the question text.
    pub fn render(&self, price: f64, currency: &str) -> String {
        self.text
            .replace("{price}", &format!("{currency}{price:.2}"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Buy,
    Wait,
    Skip,
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Buy => "BUY",
            Decision::Wait => "WAIT",
            Decision::Skip => "SKIP",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Decision::Buy => "You have thought this through. Proceed.",
            Decision::Wait => "You should probably wait 24 hours.",
            Decision::Skip => "This seems like an impulse buy. Save your money!",
        }
    }
}

/// Persistent aggregate, one per installation. Field names match the
/// persisted record (`totalPoints`, `lastSaveDate`, ...).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Stats {
    pub current_streak: u32,
    pub total_points: u64,
    pub items_saved: u64,
    pub last_save_date: Option<String>,
    pub achievements: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub monthly_allowance: f64,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            monthly_allowance: 200.0,
            currency: "$".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub title: String,
    pub price: f64,
    pub url: String,
    #[serde(default)]
    pub date: String,
}
