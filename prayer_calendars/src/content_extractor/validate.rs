use crate::content_extractor::time::{self, MINUTES_PER_DAY};
use crate::day_record::{FieldRole, PRAYER_SEQUENCE};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required prayer field {0:?} is missing or empty")]
    MissingField(FieldRole),
    #[error("{role:?} holds an unreadable time {token:?}")]
    UnparseableTime { role: FieldRole, token: String },
    #[error("{later:?} does not come after {earlier:?}")]
    OutOfOrder { earlier: FieldRole, later: FieldRole },
}

/// Checks that the six required prayers hold strictly increasing clock
/// times within the day. Fails closed on a missing or unreadable field.
pub fn validate(fields: &HashMap<FieldRole, String>) -> Result<(), ValidationError> {
    let mut previous: Option<(FieldRole, u32)> = None;
    for role in PRAYER_SEQUENCE {
        let minutes = required_minutes(fields, role)?;
        if let Some((earlier, earlier_minutes)) = previous {
            if minutes <= earlier_minutes {
                return Err(ValidationError::OutOfOrder {
                    earlier,
                    later: role,
                });
            }
        }
        previous = Some((role, minutes));
    }
    Ok(())
}

/// Pulls ties and small inversions apart: one walk in prayer order, bumping
/// any time not strictly after its predecessor to predecessor plus one
/// minute. A single pass, never iterated. Returns `None` when a bump would
/// run past the end of the day, since times never wrap into the next date.
pub fn repair(fields: &HashMap<FieldRole, String>) -> Option<HashMap<FieldRole, String>> {
    let mut repaired = fields.clone();
    let mut previous = required_minutes(&repaired, PRAYER_SEQUENCE[0]).ok()?;
    for role in &PRAYER_SEQUENCE[1..] {
        let mut minutes = required_minutes(&repaired, *role).ok()?;
        if minutes <= previous {
            minutes = previous + 1;
            if minutes >= MINUTES_PER_DAY {
                return None;
            }
            repaired.insert(*role, time::render_minutes(minutes));
        }
        previous = minutes;
    }
    Some(repaired)
}

fn required_minutes(
    fields: &HashMap<FieldRole, String>,
    role: FieldRole,
) -> Result<u32, ValidationError> {
    let token = fields
        .get(&role)
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
        .ok_or(ValidationError::MissingField(role))?;
    time::minutes_since_midnight(token).map_err(|_| ValidationError::UnparseableTime {
        role,
        token: token.to_owned(),
    })
}
