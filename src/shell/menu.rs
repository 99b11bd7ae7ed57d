//! Menu
//! Menu text and parsing of the user's selection.

use crate::stats::StatisticKind;
use std::str::FromStr;
use thiserror::Error;

pub const MENU_TEXT: &str = "\nMenu:\n\
1. Display CSV columns\n\
2. Calculate Mean of a Column\n\
3. Calculate Median of a Column\n\
4. Calculate Mode of a Column\n\
5. Exit\n\
Enter your choice: ";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("Invalid choice. Please try again.")]
    InvalidChoice(String),
}

/// Actions selectable from the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    DisplayColumns,
    Statistic(StatisticKind),
    Exit,
}

impl FromStr for MenuChoice {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u32>() {
            Ok(1) => Ok(MenuChoice::DisplayColumns),
            Ok(2) => Ok(MenuChoice::Statistic(StatisticKind::Mean)),
            Ok(3) => Ok(MenuChoice::Statistic(StatisticKind::Median)),
            Ok(4) => Ok(MenuChoice::Statistic(StatisticKind::Mode)),
            Ok(5) => Ok(MenuChoice::Exit),
            _ => Err(MenuError::InvalidChoice(s.trim().to_string())),
        }
    }
}
