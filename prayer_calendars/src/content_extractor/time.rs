use thiserror::Error;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimeFormatError {
    #[error("time token {0:?} is not in H:MM form")]
    MalformedToken(String),
}

/// Promotes an implicit-PM reading to 24-hour form.
///
/// The source calendars print the midday and evening columns as 12-hour
/// readings with the PM left implicit: a maghrib of "5:40" means 17:40.
/// Promotion adds 12 to any non-zero hour below 12 and leaves hour 0 alone,
/// so "00:07" stays midnight and "12:30" is already past noon. The dawn
/// columns (imsak, fajr, shuruq) are printed in 24-hour form and must never
/// be passed through this function; each layout declares exactly which of
/// its columns get promoted.
pub fn normalize_to_24h(token: &str) -> Result<String, TimeFormatError> {
    let (hour, minute) = split_token(token)?;
    let hour = if hour != 0 && hour < 12 { hour + 12 } else { hour };
    Ok(format!("{hour:02}:{minute:02}"))
}

pub fn minutes_since_midnight(token: &str) -> Result<u32, TimeFormatError> {
    let (hour, minute) = split_token(token)?;
    Ok(hour * 60 + minute)
}

pub fn render_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

fn split_token(token: &str) -> Result<(u32, u32), TimeFormatError> {
    let (hour, minute) = token
        .trim()
        .split_once(':')
        .ok_or_else(|| TimeFormatError::MalformedToken(token.to_owned()))?;
    let hour = hour
        .trim()
        .parse()
        .map_err(|_| TimeFormatError::MalformedToken(token.to_owned()))?;
    let minute = minute
        .trim()
        .parse()
        .map_err(|_| TimeFormatError::MalformedToken(token.to_owned()))?;
    Ok((hour, minute))
}
