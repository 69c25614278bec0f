//! Choice list
//!
//! The user-editable list behind the wheel. Every choice can be switched
//! off without deleting it; only active choices become segments.

use alloc::string::ToString;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::layout::Label;

/// Choices shown when nothing has been saved yet
pub const EXAMPLE_CHOICES: [&str; 24] = [
    "Spider-Man",
    "Iron Man",
    "Captain America",
    "Black Widow",
    "Hulk",
    "Scarlet Witch",
    "Doctor Strange",
    "Black Panther",
    "Captain Marvel",
    "Ant-Man",
    "Hawkeye",
    "Falcon",
    "Shuri",
    "Winter Soldier",
    "Vision",
    "Gamora",
    "Groot",
    "Rocket",
    "Drax",
    "Loki",
    "Nick Fury",
    "Agent Carter",
    "Phoenix",
    "Storm",
];

/// One entry of the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Choice {
    /// Trimmed, non-blank text
    pub value: Label,
    /// Whether the choice is on the wheel
    pub active: bool,
}

impl Choice {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            active: true,
        }
    }
}

/// Ordered list of choices
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChoiceList {
    choices: Vec<Choice>,
}

impl ChoiceList {
    pub const fn new() -> Self {
        Self {
            choices: Vec::new(),
        }
    }

    /// Parse newline-separated text
    ///
    /// Lines are trimmed and blank lines dropped. Both `\n` and `\r\n`
    /// endings are accepted.
    pub fn parse(text: &str) -> Self {
        Self::from_labels(text.lines())
    }

    /// Build a list from labels, all active
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let choices = labels
            .into_iter()
            .filter_map(|label| {
                let label = label.as_ref().trim();
                (!label.is_empty()).then(|| Choice::new(label))
            })
            .collect();
        Self { choices }
    }

    /// The built-in example list
    pub fn examples() -> Self {
        Self::from_labels(EXAMPLE_CHOICES)
    }

    /// Flip a choice on or off
    ///
    /// Returns `false` if `index` is out of range.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.choices.get_mut(index) {
            Some(choice) => {
                choice.active = !choice.active;
                true
            }
            None => false,
        }
    }

    /// Values of the active choices, in order
    pub fn active_labels(&self) -> impl Iterator<Item = &str> {
        self.choices
            .iter()
            .filter(|c| c.active)
            .map(|c| c.value.as_str())
    }

    /// List position of the first active choice with this value
    pub fn position_of_winner(&self, label: &str) -> Option<usize> {
        self.choices
            .iter()
            .position(|c| c.active && c.value.as_str() == label)
    }

    pub fn clear(&mut self) {
        self.choices.clear();
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Choice> {
        self.choices.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Choice> {
        self.choices.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_drops_blanks() {
        let list = ChoiceList::parse("  pizza \r\n\r\nsushi\n   \n tacos");

        let labels: Vec<&str> = list.active_labels().collect();
        assert_eq!(labels, ["pizza", "sushi", "tacos"]);
        assert!(list.iter().all(|c| c.active));
    }

    #[test]
    fn test_parse_empty() {
        assert!(ChoiceList::parse("").is_empty());
        assert!(ChoiceList::parse("\n \n\t\n").is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut list = ChoiceList::parse("a\nb\nc");

        assert!(list.toggle(1));
        let labels: Vec<&str> = list.active_labels().collect();
        assert_eq!(labels, ["a", "c"]);

        assert!(list.toggle(1));
        assert_eq!(list.active_labels().count(), 3);

        assert!(!list.toggle(3));
    }

    #[test]
    fn test_position_of_winner_skips_inactive() {
        let mut list = ChoiceList::parse("x\ny\nx");
        assert_eq!(list.position_of_winner("x"), Some(0));

        list.toggle(0);
        assert_eq!(list.position_of_winner("x"), Some(2));
        assert_eq!(list.position_of_winner("z"), None);
    }

    #[test]
    fn test_examples() {
        let list = ChoiceList::examples();
        assert_eq!(list.len(), 24);
        assert_eq!(list.get(0).unwrap().value.as_str(), "Spider-Man");
        assert_eq!(list.get(23).unwrap().value.as_str(), "Storm");
    }

    #[test]
    fn test_clear() {
        let mut list = ChoiceList::examples();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.active_labels().count(), 0);
    }

    #[test]
    fn test_long_list_kept_whole() {
        let text: Vec<std::string::String> =
            (0..300).map(|i| std::format!("choice number {}", i)).collect();
        let list = ChoiceList::parse(&text.join("\n"));

        assert_eq!(list.len(), 300);
        assert_eq!(list.active_labels().last(), Some("choice number 299"));
        assert_eq!(list.position_of_winner("choice number 299"), Some(299));
    }
}
