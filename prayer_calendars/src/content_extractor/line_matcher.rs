use crate::content_extractor::layout::{LayoutRegistry, LayoutSpec};
use crate::content_extractor::time;
use crate::day_record::{FieldRole, DOCUMENT_TIME_ORDER};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;
use tracing::debug;

lazy_static! {
    static ref TIME_TOKEN: Regex =
        Regex::new(r"\d{1,2}:\d{2}").expect("time token pattern to compile");
    static ref DATE_TOKEN: Regex =
        Regex::new(r"\d{1,2}/\d{1,2}/\d{4}").expect("date token pattern to compile");
    static ref ARABIC_RUN: Regex =
        Regex::new(r"[\x{0600}-\x{06FF}]+").expect("arabic run pattern to compile");
}

/// A line recognised as one day's row, with its captures mapped to roles.
#[derive(Debug)]
pub struct MatchedLine {
    pub layout: &'static str,
    pub fields: HashMap<FieldRole, String>,
}

/// Tries the registered layouts in priority order, then the permissive
/// fallback. Pure with respect to the line and the registry.
pub fn match_line(line: &str, layouts: &LayoutRegistry) -> Option<MatchedLine> {
    for spec in layouts.iter() {
        if let Some(captures) = spec.captures(line) {
            // The pattern identified the layout; a bad time token inside it
            // makes the row unusable, not a candidate for other layouts.
            return apply_layout(spec, &captures);
        }
    }
    fallback(line)
}

fn apply_layout(spec: &LayoutSpec, captures: &Captures) -> Option<MatchedLine> {
    let mut fields = HashMap::new();
    for (position, role) in spec.roles().iter().enumerate() {
        let Some(capture) = captures.get(position + 1) else {
            continue;
        };
        let raw = capture.as_str().trim();
        let value = if spec.promotes(*role) {
            match time::normalize_to_24h(raw) {
                Ok(promoted) => promoted,
                Err(error) => {
                    debug!(layout = spec.name(), %error, "dropping a row with a bad time token");
                    return None;
                }
            }
        } else {
            raw.to_owned()
        };
        fields.insert(*role, value);
    }
    Some(MatchedLine {
        layout: spec.name(),
        fields,
    })
}

/// Last-resort scan for rows no layout recognises: at least seven time
/// tokens and exactly one date on the line. Times are assigned in the
/// documents' column order, a missing trailing column becomes "00:00", and
/// the day name is the longest Arabic run on the line.
fn fallback(line: &str) -> Option<MatchedLine> {
    let times = TIME_TOKEN
        .find_iter(line)
        .map(|token| token.as_str())
        .collect::<Vec<_>>();
    let dates = DATE_TOKEN
        .find_iter(line)
        .map(|token| token.as_str())
        .collect::<Vec<_>>();
    if times.len() < 7 || dates.len() != 1 {
        return None;
    }

    let mut fields = HashMap::new();
    for (position, role) in DOCUMENT_TIME_ORDER.iter().enumerate() {
        let token = times.get(position).copied().unwrap_or("00:00");
        fields.insert(*role, token.to_owned());
    }
    fields.insert(FieldRole::Date, dates[0].to_owned());
    if let Some(day_name) = ARABIC_RUN
        .find_iter(line)
        .max_by_key(|run| run.as_str().chars().count())
    {
        fields.insert(FieldRole::DayName, day_name.as_str().to_owned());
    }

    Some(MatchedLine {
        layout: "fallback",
        fields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content_extractor::layout::CALENDAR_LAYOUTS;
    use crate::day_record::FieldRole::*;

    #[test]
    fn date_first_rows_keep_the_morning_block_untouched() {
        let line = "12/1/2026 الخميس 04:45 05:05 06:20 11:55 15:10 17:40 19:00 20:10";
        let matched = match_line(line, &CALENDAR_LAYOUTS).unwrap();

        assert_eq!(matched.layout, "date-first");
        assert_eq!(matched.fields[&Date], "12/1/2026");
        assert_eq!(matched.fields[&DayName], "الخميس");
        assert_eq!(matched.fields[&Imsak], "04:45");
        assert_eq!(matched.fields[&Fajr], "05:05");
        assert_eq!(matched.fields[&Shuruq], "06:20");
        assert_eq!(matched.fields[&Dhuhr], "11:55");
        assert_eq!(matched.fields[&Asr], "15:10");
        assert_eq!(matched.fields[&Maghrib], "17:40");
        assert_eq!(matched.fields[&Isha], "19:00");
        assert_eq!(matched.fields[&Midnight], "20:10");
    }

    #[test]
    fn times_first_rows_carry_day_numbers() {
        let line = "00:47 19:10 17:40 15:10 11:55 06:20 05:05 04:45 12/1/2026 الخميس 12";
        let matched = match_line(line, &CALENDAR_LAYOUTS).unwrap();

        assert_eq!(matched.layout, "times-first");
        assert_eq!(matched.fields[&Midnight], "00:47");
        assert_eq!(matched.fields[&Isha], "19:10");
        assert_eq!(matched.fields[&Imsak], "04:45");
        assert_eq!(matched.fields[&DayNumber], "12");
        assert!(!matched.fields.contains_key(&HijriDate));
    }

    #[test]
    fn hijri_rows_capture_the_lunar_date() {
        let line = "00:47 19:10 17:40 15:10 11:55 06:20 05:05 04:45 12/1/2026 23 رجب 1447 الخميس 12";
        let matched = match_line(line, &CALENDAR_LAYOUTS).unwrap();

        assert_eq!(matched.layout, "times-first-hijri");
        assert_eq!(matched.fields[&HijriDate], "23 رجب 1447");
        assert_eq!(matched.fields[&DayName], "الخميس");
        assert_eq!(matched.fields[&DayNumber], "12");
    }

    #[test]
    fn twelve_hour_rows_are_promoted() {
        let line = "11:47 7:10 5:40 3:10 11:55 6:20 5:05 4:45 15/1/2026 الاحد";
        let matched = match_line(line, &CALENDAR_LAYOUTS).unwrap();

        assert_eq!(matched.layout, "times-first-12h");
        assert_eq!(matched.fields[&Midnight], "23:47");
        assert_eq!(matched.fields[&Isha], "19:10");
        assert_eq!(matched.fields[&Maghrib], "17:40");
        assert_eq!(matched.fields[&Asr], "15:10");
        // dhuhr stays as printed; no standard layout promotes it
        assert_eq!(matched.fields[&Dhuhr], "11:55");
        // unpromoted columns pass through exactly as written
        assert_eq!(matched.fields[&Shuruq], "6:20");
        assert!(!matched.fields.contains_key(&DayNumber));
    }

    #[test]
    fn unrecognised_rows_fall_back_to_a_bare_token_scan() {
        // a row with separators the layouts do not expect, and the trailing
        // column lost
        let line = "صفحة 00:47 | 19:10 | 17:40 | 15:10 | 11:55 | 06:20 | 05:05 | 12/1/2026 الخميس";
        let matched = match_line(line, &CALENDAR_LAYOUTS).unwrap();

        assert_eq!(matched.layout, "fallback");
        assert_eq!(matched.fields[&Midnight], "00:47");
        assert_eq!(matched.fields[&Fajr], "05:05");
        assert_eq!(matched.fields[&Imsak], "00:00");
        assert_eq!(matched.fields[&Date], "12/1/2026");
        assert_eq!(matched.fields[&DayName], "الخميس");
    }

    #[test]
    fn rows_without_a_date_and_enough_times_do_not_match() {
        assert!(match_line("جدول مواقيت الصلاة", &CALENDAR_LAYOUTS).is_none());
        assert!(match_line("12:30 ملاحظة 14:00", &CALENDAR_LAYOUTS).is_none());
        assert!(match_line("", &CALENDAR_LAYOUTS).is_none());
    }
}
