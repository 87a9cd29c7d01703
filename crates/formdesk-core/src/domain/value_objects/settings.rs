//! Form presentation settings

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub primary: String,
    pub background: String,
    pub text: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#3b82f6".into(),
            background: "#ffffff".into(),
            text: "#111827".into(),
        }
    }
}

/// Settings stored alongside the field list of a form
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    pub theme: ThemeColors,
    pub submit_button_text: String,
    pub thank_you_message: String,
    pub show_progress_bar: bool,
    pub allow_multiple_submissions: bool,
    pub collect_email: bool,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            theme: ThemeColors::default(),
            submit_button_text: "Submit".into(),
            thank_you_message: "Thank you for your submission!".into(),
            show_progress_bar: false,
            allow_multiple_submissions: true,
            collect_email: false,
        }
    }
}
