pub(crate) mod layout;
pub(crate) mod line_matcher;
pub(crate) mod time;
pub(crate) mod validate;

use crate::day_record::DayRecord;
use layout::CALENDAR_LAYOUTS;
use tracing::debug;
use validate::ValidationError;

/// Turns the text of one calendar document into day rows, kept in document
/// order. Rows no layout recognises, and rows whose prayer sequence cannot
/// be brought back into order, are dropped with a diagnostic rather than
/// failing the whole document.
pub fn extract(text: &str) -> Vec<DayRecord> {
    text.lines().filter_map(extract_line).collect()
}

fn extract_line(line: &str) -> Option<DayRecord> {
    let line = line.trim();
    let matched = match line_matcher::match_line(line, &CALENDAR_LAYOUTS) {
        Some(matched) => matched,
        None => {
            if !line.is_empty() {
                debug!(line, "no calendar layout recognised the row");
            }
            return None;
        }
    };

    match validate::validate(&matched.fields) {
        Ok(()) => Some(DayRecord::from_fields(&matched.fields)),
        Err(ValidationError::OutOfOrder { .. }) => {
            let repaired = validate::repair(&matched.fields)
                .filter(|fields| validate::validate(fields).is_ok());
            if repaired.is_none() {
                debug!(
                    line,
                    layout = matched.layout,
                    "dropping a row whose prayer times cannot be reordered"
                );
            }
            repaired.map(|fields| DayRecord::from_fields(&fields))
        }
        Err(error) => {
            debug!(line, layout = matched.layout, %error, "dropping an invalid row");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_readable_rows_and_drops_the_rest() {
        let text = "
جدول مواقيت الصلاة والإمساك
12/1/2026 الخميس 04:45 05:05 06:20 11:55 15:10 17:40 19:00 20:10
13/1/2026 الجمعة 04:46 05:05 05:05 11:56 15:11 17:41 19:01 20:11
14/1/2026 السبت 04:47 05:06 06:21 11:57 15:12 23:59 19:01 20:12
00:48 19:11 17:42 15:12 11:56 06:21 05:06 04:47 15/1/2026 الاحد 15
الصفحة 2 من 2
";
        let records = extract(text);

        // the header, the footer and the row stuck past the end of the day
        // are dropped; document order survives
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].date, "12/1/2026");
        assert_eq!(records[1].date, "13/1/2026");
        assert_eq!(records[2].date, "15/1/2026");
    }

    #[test]
    fn a_shuruq_tie_is_repaired_in_place() {
        let text = "13/1/2026 الجمعة 04:46 05:05 05:05 11:56 15:11 17:41 19:01 20:11";
        let records = extract(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fajr, "05:05");
        assert_eq!(records[0].shuruq, "05:06");
        assert_eq!(records[0].dhuhr, "11:56");
    }

    #[test]
    fn rows_from_different_layouts_keep_their_extras() {
        let text = "
12/1/2026 الخميس 04:45 05:05 06:20 11:55 15:10 17:40 19:00 20:10
00:48 19:11 17:42 15:12 11:56 06:21 05:06 04:47 15/1/2026 الاحد 15
";
        let records = extract(text);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].day_number, None);
        assert_eq!(records[0].day_name, "الخميس");
        assert_eq!(records[1].day_number, Some("15".to_owned()));
        assert_eq!(records[1].midnight, "00:48");
    }

    #[test]
    fn an_empty_document_yields_no_rows() {
        assert!(extract("").is_empty());
        assert!(extract("\n\n   \n").is_empty());
    }
}
