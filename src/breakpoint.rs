use std::cell::Cell;

use serde::{Deserialize, Serialize};

/// Breakpoint fields as delivered by the debug protocol layer. Absent
/// fields mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointInfo {
    pub condition: Option<String>,
    pub hit_condition: Option<String>,
    pub log_message: Option<String>,
}

/// One breakpoint at a (source, line).
#[derive(Debug)]
pub struct Breakpoint {
    /// Pause only if this evaluates to boolean true in the frame.
    pub condition: Option<String>,
    /// User-written tail of a hit count check, e.g. `>= 3`. The current
    /// count is prepended at evaluation time.
    pub hit_condition: Option<String>,
    /// Log template including its trailing line break. Non-empty means
    /// this is a logpoint: it emits output and never pauses.
    pub log_message: Option<String>,
    pub hit: Cell<u32>,
}

impl Breakpoint {
    pub fn new(info: BreakpointInfo) -> Self {
        Self::with_hits(info, 0)
    }

    /// Build a replacement descriptor carrying over the hit count of the
    /// breakpoint it supersedes.
    pub fn with_hits(info: BreakpointInfo, hits: u32) -> Self {
        Self {
            condition: info.condition.filter(|cond| !cond.is_empty()),
            hit_condition: info.hit_condition.filter(|cond| !cond.is_empty()),
            // the line break is part of the template, even for an
            // explicitly empty message
            log_message: info.log_message.map(|log| log + "\n"),
            hit: Cell::new(hits),
        }
    }

    pub(crate) fn bump_hits(&self) -> u32 {
        let hits = self.hit.get() + 1;
        self.hit.set(hits);
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_strings_mean_not_set() {
        let breakpoint = Breakpoint::new(BreakpointInfo {
            condition: Some(String::new()),
            hit_condition: Some(String::new()),
            log_message: None,
        });

        assert_eq!(breakpoint.condition, None);
        assert_eq!(breakpoint.hit_condition, None);
        assert_eq!(breakpoint.log_message, None);
        assert_eq!(breakpoint.hit.get(), 0);
    }

    #[test]
    fn test_log_message_gets_line_break() {
        let breakpoint = Breakpoint::new(BreakpointInfo {
            log_message: Some("value is {x}".to_string()),
            ..Default::default()
        });
        assert_eq!(breakpoint.log_message.as_deref(), Some("value is {x}\n"));

        // an explicitly empty message is still a logpoint
        let breakpoint = Breakpoint::new(BreakpointInfo {
            log_message: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(breakpoint.log_message.as_deref(), Some("\n"));
    }

    #[test]
    fn test_hit_carryover() {
        let breakpoint = Breakpoint::new(BreakpointInfo {
            condition: Some("x > 5".to_string()),
            ..Default::default()
        });
        breakpoint.bump_hits();
        breakpoint.bump_hits();

        let replacement = Breakpoint::with_hits(
            BreakpointInfo {
                condition: Some("x > 10".to_string()),
                ..Default::default()
            },
            breakpoint.hit.get(),
        );

        assert_eq!(replacement.condition.as_deref(), Some("x > 10"));
        assert_eq!(replacement.hit.get(), 2);
    }

    #[test]
    fn test_wire_field_names() {
        let info: BreakpointInfo =
            serde_json::from_str(r#"{"condition":"x > 5","hitCondition":">= 3","logMessage":"hi"}"#).unwrap();

        assert_eq!(info.condition.as_deref(), Some("x > 5"));
        assert_eq!(info.hit_condition.as_deref(), Some(">= 3"));
        assert_eq!(info.log_message.as_deref(), Some("hi"));

        let info: BreakpointInfo = serde_json::from_str("{}").unwrap();
        assert_eq!(info, BreakpointInfo::default());
    }
}
