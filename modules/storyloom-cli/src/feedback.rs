//! Feedback menu shown after each story.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

pub enum FeedbackChoice {
    Keep,
    Modify(String),
    NewStory,
}

const OPTIONS: &[&str] = &[
    "I love it! (keep as is)",
    "Make it longer",
    "Make it shorter",
    "Make it more exciting",
    "Make it calmer/gentler",
    "Add more characters",
    "Change the setting",
    "Custom feedback (describe what you'd like changed)",
    "Generate a completely new story",
];

pub fn prompt() -> Result<FeedbackChoice> {
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("How do you like your story?")
        .items(OPTIONS)
        .default(0)
        .interact()?;

    let feedback = match choice {
        0 => return Ok(FeedbackChoice::Keep),
        1 => "Please make this story longer with more details and description.",
        2 => "Please make this story shorter and more concise.",
        3 => "Please make this story more exciting with more adventure and action.",
        4 => "Please make this story calmer and more gentle for bedtime.",
        5 => "Please add more characters to make the story more interesting.",
        6 => "Please change the setting to somewhere different and interesting.",
        7 => {
            let custom: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("What would you like me to change about the story?")
                .interact_text()?;
            return Ok(FeedbackChoice::Modify(custom));
        }
        _ => return Ok(FeedbackChoice::NewStory),
    };
    Ok(FeedbackChoice::Modify(feedback.to_string()))
}
