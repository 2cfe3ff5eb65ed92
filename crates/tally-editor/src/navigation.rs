//! # Keyboard Navigation
//!
//! Focus targets and the tab order between them.
//!
//! ## Tab Order
//! ```text
//!  line 1: Item → Quantity → Rate → Discount
//!  line 2: Item → Quantity → Rate → Discount
//!  ...
//!  AddLine → GlobalDiscount → GlobalTax → Save → Clear
//! ```
//!
//! Tab and BackTab stop at either end; they never wrap.

use tally_core::LineField;

/// A focusable control in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    Line { index: usize, field: LineField },
    AddLine,
    GlobalDiscount,
    GlobalTax,
    Save,
    Clear,
}

impl FocusTarget {
    /// The first control: line 1's item field, or `AddLine` with no lines.
    pub fn first(line_count: usize) -> Self {
        if line_count == 0 {
            FocusTarget::AddLine
        } else {
            FocusTarget::Line {
                index: 0,
                field: LineField::Item,
            }
        }
    }

    /// One step forward in tab order.
    pub fn next(self, line_count: usize) -> Self {
        match self.clamp(line_count) {
            FocusTarget::Line { index, field } => match field.next() {
                Some(field) => FocusTarget::Line { index, field },
                None if index + 1 < line_count => FocusTarget::Line {
                    index: index + 1,
                    field: LineField::Item,
                },
                None => FocusTarget::AddLine,
            },
            FocusTarget::AddLine => FocusTarget::GlobalDiscount,
            FocusTarget::GlobalDiscount => FocusTarget::GlobalTax,
            FocusTarget::GlobalTax => FocusTarget::Save,
            FocusTarget::Save | FocusTarget::Clear => FocusTarget::Clear,
        }
    }

    /// One step back in tab order.
    pub fn prev(self, line_count: usize) -> Self {
        match self.clamp(line_count) {
            FocusTarget::Line { index, field } => match field.prev() {
                Some(field) => FocusTarget::Line { index, field },
                None if index > 0 => FocusTarget::Line {
                    index: index - 1,
                    field: LineField::Discount,
                },
                None => FocusTarget::Line { index, field },
            },
            FocusTarget::AddLine if line_count > 0 => FocusTarget::Line {
                index: line_count - 1,
                field: LineField::Discount,
            },
            FocusTarget::AddLine => FocusTarget::AddLine,
            FocusTarget::GlobalDiscount => FocusTarget::AddLine,
            FocusTarget::GlobalTax => FocusTarget::GlobalDiscount,
            FocusTarget::Save => FocusTarget::GlobalTax,
            FocusTarget::Clear => FocusTarget::Save,
        }
    }

    /// Where Enter moves focus when it does not trigger an action.
    ///
    /// Within a line Enter steps to the next field; from the last field it
    /// goes to `AddLine`.
    pub fn enter_target(self) -> Self {
        match self {
            FocusTarget::Line { index, field } => match field.next() {
                Some(field) => FocusTarget::Line { index, field },
                None => FocusTarget::AddLine,
            },
            FocusTarget::GlobalDiscount => FocusTarget::GlobalTax,
            FocusTarget::GlobalTax => FocusTarget::Save,
            other => other,
        }
    }

    /// Keeps a line target pointing at an existing line after removals.
    pub fn clamp(self, line_count: usize) -> Self {
        match self {
            FocusTarget::Line { index, field } if index >= line_count => {
                if line_count == 0 {
                    FocusTarget::AddLine
                } else {
                    FocusTarget::Line {
                        index: line_count - 1,
                        field,
                    }
                }
            }
            other => other,
        }
    }

    /// The line this target belongs to, if any.
    pub fn line_index(&self) -> Option<usize> {
        match self {
            FocusTarget::Line { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl std::fmt::Display for FocusTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FocusTarget::Line { index, field } => write!(f, "line {} {}", index + 1, field),
            FocusTarget::AddLine => write!(f, "add line"),
            FocusTarget::GlobalDiscount => write!(f, "global discount"),
            FocusTarget::GlobalTax => write!(f, "global tax"),
            FocusTarget::Save => write!(f, "save"),
            FocusTarget::Clear => write!(f, "clear"),
        }
    }
}

// =============================================================================
// Keys
// =============================================================================

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
}

impl std::str::FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enter" | "return" => Ok(Key::Enter),
            "tab" => Ok(Key::Tab),
            "backtab" | "shift-tab" => Ok(Key::BackTab),
            "esc" | "escape" => Ok(Key::Escape),
            "up" => Ok(Key::Up),
            "down" => Ok(Key::Down),
            _ => Err(format!("Unknown key: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(index: usize, field: LineField) -> FocusTarget {
        FocusTarget::Line { index, field }
    }

    #[test]
    fn test_tab_walks_all_fields_in_order() {
        let mut focus = FocusTarget::first(2);
        let mut visited = vec![focus];
        for _ in 0..12 {
            focus = focus.next(2);
            visited.push(focus);
        }

        assert_eq!(
            visited,
            vec![
                line(0, LineField::Item),
                line(0, LineField::Quantity),
                line(0, LineField::Rate),
                line(0, LineField::Discount),
                line(1, LineField::Item),
                line(1, LineField::Quantity),
                line(1, LineField::Rate),
                line(1, LineField::Discount),
                FocusTarget::AddLine,
                FocusTarget::GlobalDiscount,
                FocusTarget::GlobalTax,
                FocusTarget::Save,
                FocusTarget::Clear,
            ]
        );
    }

    #[test]
    fn test_tab_does_not_wrap() {
        assert_eq!(FocusTarget::Clear.next(3), FocusTarget::Clear);
        assert_eq!(line(0, LineField::Item).prev(3), line(0, LineField::Item));
        assert_eq!(FocusTarget::AddLine.prev(0), FocusTarget::AddLine);
    }

    #[test]
    fn test_backtab_crosses_lines() {
        assert_eq!(line(1, LineField::Item).prev(2), line(0, LineField::Discount));
        assert_eq!(FocusTarget::AddLine.prev(2), line(1, LineField::Discount));
        assert_eq!(FocusTarget::GlobalDiscount.prev(2), FocusTarget::AddLine);
    }

    #[test]
    fn test_enter_from_last_field_goes_to_add_line() {
        assert_eq!(line(0, LineField::Rate).enter_target(), line(0, LineField::Discount));
        assert_eq!(line(0, LineField::Discount).enter_target(), FocusTarget::AddLine);
        assert_eq!(line(3, LineField::Discount).enter_target(), FocusTarget::AddLine);
        assert_eq!(FocusTarget::GlobalDiscount.enter_target(), FocusTarget::GlobalTax);
        assert_eq!(FocusTarget::GlobalTax.enter_target(), FocusTarget::Save);
    }

    #[test]
    fn test_clamp_after_removal() {
        assert_eq!(line(4, LineField::Rate).clamp(2), line(1, LineField::Rate));
        assert_eq!(line(0, LineField::Rate).clamp(0), FocusTarget::AddLine);
        assert_eq!(FocusTarget::Save.clamp(0), FocusTarget::Save);
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!("Enter".parse::<Key>().unwrap(), Key::Enter);
        assert_eq!("esc".parse::<Key>().unwrap(), Key::Escape);
        assert_eq!("shift-tab".parse::<Key>().unwrap(), Key::BackTab);
        assert!("space".parse::<Key>().is_err());
    }
}
