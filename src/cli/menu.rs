//! Page selection using dialoguer

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};

/// The views of the interactive session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Exploration,
    Modeling,
    Quit,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Exploration, Page::Modeling, Page::Quit];

    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Exploration => "EDA and Visualization",
            Page::Modeling => "ML Modeling",
            Page::Quit => "Quit",
        }
    }
}

/// Prompt for the next page, starting on `current`
pub fn select_page(current: Page) -> Result<Page> {
    let titles: Vec<&str> = Page::ALL.iter().map(|p| p.title()).collect();
    let default = Page::ALL.iter().position(|p| *p == current).unwrap_or(0);

    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a Page")
        .items(&titles)
        .default(default)
        .interact_opt()?;

    Ok(index.map(|i| Page::ALL[i]).unwrap_or(Page::Quit))
}
