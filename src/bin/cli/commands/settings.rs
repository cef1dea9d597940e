use anyhow::{Context, Result};

use vocabecho_lib::flashcards::algorithm::{format_interval, preview_intervals};
use vocabecho_lib::flashcards::session::{SettingsEvent, SettingsFormState, SettingsMessage};
use vocabecho_lib::flashcards::Grade;
use vocabecho_lib::settings::ParentSettings;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run_show(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    print_settings(&app.parent_settings(), format, use_color)
}

pub fn run_set(
    app: &App,
    again: &str,
    hard: &str,
    easy: &str,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let mut form = SettingsFormState::new(&app.parent_settings());
    form.apply(SettingsEvent::AgainChanged(again.to_string()));
    form.apply(SettingsEvent::HardChanged(hard.to_string()));
    form.apply(SettingsEvent::EasyChanged(easy.to_string()));

    let Some(settings) = form.apply(SettingsEvent::Save) else {
        match form.message {
            Some(SettingsMessage::Invalid(msg)) => anyhow::bail!(msg),
            _ => anyhow::bail!("Invalid settings"),
        }
    };

    app.settings
        .update(settings)
        .context("Failed to save parent settings")?;
    form.apply(SettingsEvent::Saved);
    if matches!(format, OutputFormat::Plain) {
        println!("Saved.");
    }
    print_settings(&app.parent_settings(), format, use_color)
}

fn print_settings(settings: &ParentSettings, format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
        OutputFormat::Plain => {
            for (grade, days) in Grade::ALL.iter().zip(preview_intervals(settings)) {
                println!(
                    "  {:<6} {:>3} days  {}",
                    grade.as_str(),
                    days,
                    terminal::dim(&format!("({})", format_interval(days)), use_color)
                );
            }
        }
    }
    Ok(())
}
