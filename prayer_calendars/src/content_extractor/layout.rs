use crate::day_record::FieldRole;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

// Pattern fragments the row layouts are assembled from. The Arabic block
// covers the day names and Hijri month words the source prints.
const TIME_2DIGIT: &str = r"\d{2}:\d{2}";
const TIME: &str = r"\d{1,2}:\d{2}";
const DATE: &str = r"\d{1,2}/\d{1,2}/\d{4}";
const ARABIC_WORDS: &str = r"[\x{0600}-\x{06FF}]+(?:\s+[\x{0600}-\x{06FF}]+)*";
const HIJRI_DATE: &str = r"\d{1,2}\s+[\x{0600}-\x{06FF}]+(?:\s+[\x{0600}-\x{06FF}]+)*\s+\d{4}";
const DAY_NUMBER: &str = r"\d{1,2}";

/// One known textual layout of a day's row: an ordered list of capture
/// fragments, the role each capture maps to, and the subset of roles whose
/// times are written as implicit-PM readings and need promotion to 24-hour
/// form.
pub struct LayoutSpec {
    name: &'static str,
    source: String,
    pattern: Regex,
    roles: Vec<FieldRole>,
    promoted: Vec<FieldRole>,
}

impl LayoutSpec {
    pub(crate) fn new(
        name: &'static str,
        segments: &[(&str, FieldRole)],
        promoted: &[FieldRole],
    ) -> Self {
        let source = segments
            .iter()
            .map(|(fragment, _)| format!("({fragment})"))
            .join(r"\s+");
        let roles = segments.iter().map(|(_, role)| *role).collect_vec();
        LayoutSpec {
            name,
            pattern: compile(&source),
            source,
            roles,
            promoted: promoted.to_vec(),
        }
    }

    /// Appends a capture that may be missing from the end of a row.
    pub(crate) fn with_optional_tail(mut self, fragment: &str, role: FieldRole) -> Self {
        self.source = format!(r"{}(?:\s+({fragment}))?", self.source);
        self.pattern = compile(&self.source);
        self.roles.push(role);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn roles(&self) -> &[FieldRole] {
        &self.roles
    }

    pub fn promotes(&self, role: FieldRole) -> bool {
        self.promoted.contains(&role)
    }

    pub fn captures<'t>(&self, line: &'t str) -> Option<regex::Captures<'t>> {
        self.pattern.captures(line)
    }
}

fn compile(source: &str) -> Regex {
    Regex::new(source).expect("layout pattern to compile")
}

/// The known row formats in match priority order. The source exports change
/// shape across months; the more specific layouts come first so the
/// permissive ones cannot shadow them.
pub struct LayoutRegistry {
    specs: Vec<LayoutSpec>,
}

impl LayoutRegistry {
    pub fn standard() -> Self {
        use FieldRole::*;

        let times_first_hijri = LayoutSpec::new(
            "times-first-hijri",
            &[
                (TIME_2DIGIT, Midnight),
                (TIME_2DIGIT, Isha),
                (TIME_2DIGIT, Maghrib),
                (TIME_2DIGIT, Asr),
                (TIME_2DIGIT, Dhuhr),
                (TIME, Shuruq),
                (TIME, Fajr),
                (TIME, Imsak),
                (DATE, Date),
                (HIJRI_DATE, HijriDate),
                (ARABIC_WORDS, DayName),
                (DAY_NUMBER, DayNumber),
            ],
            &[],
        );

        let times_first = LayoutSpec::new(
            "times-first",
            &[
                (TIME_2DIGIT, Midnight),
                (TIME_2DIGIT, Isha),
                (TIME_2DIGIT, Maghrib),
                (TIME_2DIGIT, Asr),
                (TIME_2DIGIT, Dhuhr),
                (TIME, Shuruq),
                (TIME, Fajr),
                (TIME, Imsak),
                (DATE, Date),
                (ARABIC_WORDS, DayName),
                (DAY_NUMBER, DayNumber),
            ],
            &[],
        );

        let date_first = LayoutSpec::new(
            "date-first",
            &[
                (DATE, Date),
                (ARABIC_WORDS, DayName),
                (TIME, Imsak),
                (TIME, Fajr),
                (TIME, Shuruq),
                (TIME, Dhuhr),
                (TIME, Asr),
                (TIME, Maghrib),
                (TIME, Isha),
                (TIME, Midnight),
            ],
            &[Asr, Maghrib, Isha, Midnight],
        );

        let times_first_12h = LayoutSpec::new(
            "times-first-12h",
            &[
                (TIME, Midnight),
                (TIME, Isha),
                (TIME, Maghrib),
                (TIME, Asr),
                (TIME, Dhuhr),
                (TIME, Shuruq),
                (TIME, Fajr),
                (TIME, Imsak),
                (DATE, Date),
                (ARABIC_WORDS, DayName),
            ],
            &[Midnight, Isha, Maghrib, Asr],
        )
        .with_optional_tail(DAY_NUMBER, DayNumber);

        LayoutRegistry {
            specs: vec![times_first_hijri, times_first, date_first, times_first_12h],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayoutSpec> {
        self.specs.iter()
    }
}

lazy_static! {
    /// Built once at startup; matching never mutates it.
    pub static ref CALENDAR_LAYOUTS: LayoutRegistry = LayoutRegistry::standard();
}
