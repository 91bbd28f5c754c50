//! Plan-phase prompts. Nothing here touches the system; answers come back
//! as plain data.

use crate::core::CliError;
use devstrap::domain::entities::catalog::{Category, JDK_OPTIONS};
use devstrap::domain::entities::plan::Mirror;
use std::path::PathBuf;

type PromptResult<T> = Result<T, CliError>;

pub fn mirror() -> PromptResult<Mirror> {
    let mut select = cliclack::select("Where should Homebrew download from?")
        .initial_value(Mirror::Official);
    for m in Mirror::ALL {
        select = select.item(m, m.to_string(), m.description());
    }
    Ok(select.interact()?)
}

/// Multi-select over one catalog category; picking nothing is fine.
pub fn catalog(category: &Category) -> PromptResult<Vec<&'static str>> {
    let mut select = cliclack::multiselect(format!("{} ({}s)", category.label, category.kind))
        .required(false);
    for entry in category.entries {
        select = select.item(entry.name, entry.name, entry.description);
    }
    Ok(select.interact()?)
}

/// `None` means "keep whatever JDK the system already has".
pub fn jdk() -> PromptResult<Option<String>> {
    let mut select = cliclack::select("Which JDK?");
    for entry in JDK_OPTIONS {
        select = select.item(Some(entry.name), entry.name, entry.description);
    }
    select = select.item(None, "skip", "Use the system JDK");
    Ok(select.interact()?.map(str::to_string))
}

/// Free-form names, split on commas and whitespace.
pub fn names(prompt: &str) -> PromptResult<Vec<String>> {
    let raw: String = cliclack::input(prompt)
        .placeholder("e.g. httpie, lazygit (leave empty to skip)")
        .required(false)
        .interact()?;
    Ok(split_names(&raw))
}

pub fn android_sdk_path() -> PromptResult<Option<PathBuf>> {
    let raw: String = cliclack::input("Custom Android SDK location?")
        .placeholder("leave empty for the default")
        .required(false)
        .interact()?;
    let raw = raw.trim();
    Ok((!raw.is_empty()).then(|| PathBuf::from(raw)))
}

/// Yes/no question that `--yes` answers up front.
pub fn confirm(prompt: &str, assume_yes: bool) -> PromptResult<bool> {
    if assume_yes {
        return Ok(true);
    }
    Ok(cliclack::confirm(prompt).initial_value(true).interact()?)
}

fn split_names(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
