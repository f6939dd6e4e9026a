//! Configuration module for vidbrief.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{FollowupPrompts, Prompts};
pub use settings::{
    ApiKeys, GeneralSettings, KindoSettings, ServerSettings, Settings, TwelveLabsSettings,
    KINDO_API_KEY_ENV, TWELVELABS_API_KEY_ENV,
};
