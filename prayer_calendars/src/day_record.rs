use serde::{Deserialize, Serialize};
use shared_kernel::string_key;
use std::collections::{BTreeMap, HashMap};

string_key!(LocationId);

/// Sentinel for rows where the source omits the Hijri column; the consuming
/// app reads the field unconditionally.
pub const UNKNOWN_HIJRI: &str = "Unknown";

/// Semantic slot a captured row field maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Imsak,
    Fajr,
    Shuruq,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
    Midnight,
    Date,
    DayName,
    HijriDate,
    DayNumber,
}

/// The six prayers whose times must be strictly increasing within a day.
pub const PRAYER_SEQUENCE: [FieldRole; 6] = [
    FieldRole::Fajr,
    FieldRole::Shuruq,
    FieldRole::Dhuhr,
    FieldRole::Asr,
    FieldRole::Maghrib,
    FieldRole::Isha,
];

/// Column order of the time fields in the source documents, midnight first.
pub const DOCUMENT_TIME_ORDER: [FieldRole; 8] = [
    FieldRole::Midnight,
    FieldRole::Isha,
    FieldRole::Maghrib,
    FieldRole::Asr,
    FieldRole::Dhuhr,
    FieldRole::Shuruq,
    FieldRole::Fajr,
    FieldRole::Imsak,
];

/// One calendar day's prayer schedule for one location. Field order is the
/// order the consuming app expects in the JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub midnight: String,
    pub isha: String,
    pub maghrib: String,
    pub asr: String,
    pub dhuhr: String,
    pub shuruq: String,
    pub fajr: String,
    pub imsak: String,
    pub date: String,
    pub day_name: String,
    pub hijri_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_number: Option<String>,
}

impl DayRecord {
    pub fn from_fields(fields: &HashMap<FieldRole, String>) -> Self {
        let time = |role: FieldRole| {
            fields
                .get(&role)
                .cloned()
                .unwrap_or_else(|| "00:00".to_owned())
        };
        let text = |role: FieldRole| fields.get(&role).cloned().unwrap_or_default();
        DayRecord {
            midnight: time(FieldRole::Midnight),
            isha: time(FieldRole::Isha),
            maghrib: time(FieldRole::Maghrib),
            asr: time(FieldRole::Asr),
            dhuhr: time(FieldRole::Dhuhr),
            shuruq: time(FieldRole::Shuruq),
            fajr: time(FieldRole::Fajr),
            imsak: time(FieldRole::Imsak),
            date: text(FieldRole::Date),
            day_name: text(FieldRole::DayName),
            hijri_date: fields
                .get(&FieldRole::HijriDate)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_HIJRI.to_owned()),
            day_number: fields.get(&FieldRole::DayNumber).cloned(),
        }
    }
}

/// Ordered day records per location, keyed by the identifiers the app uses.
#[derive(Debug, Default, Serialize)]
pub struct LocationBatch(BTreeMap<LocationId, Vec<DayRecord>>);

impl LocationBatch {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, location: LocationId, records: Vec<DayRecord>) {
        self.0.insert(location, records);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LocationId, &Vec<DayRecord>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row() -> HashMap<FieldRole, String> {
        [
            (FieldRole::Midnight, "20:10"),
            (FieldRole::Isha, "19:00"),
            (FieldRole::Maghrib, "17:40"),
            (FieldRole::Asr, "15:10"),
            (FieldRole::Dhuhr, "11:55"),
            (FieldRole::Shuruq, "06:20"),
            (FieldRole::Fajr, "05:05"),
            (FieldRole::Imsak, "04:45"),
            (FieldRole::Date, "12/1/2026"),
            (FieldRole::DayName, "الخميس"),
        ]
        .into_iter()
        .map(|(role, value)| (role, value.to_owned()))
        .collect()
    }

    #[test]
    fn missing_hijri_and_day_number_get_their_defaults() {
        let record = DayRecord::from_fields(&full_row());
        assert_eq!(record.hijri_date, UNKNOWN_HIJRI);
        assert_eq!(record.day_number, None);
        assert_eq!(record.day_name, "الخميس");
    }

    #[test]
    fn json_keeps_the_column_order_the_app_reads() {
        let record = DayRecord::from_fields(&full_row());
        let json = serde_json::to_string_pretty(&record).unwrap();

        let position = |key: &str| json.find(key).unwrap();
        assert!(position("\"midnight\"") < position("\"isha\""));
        assert!(position("\"isha\"") < position("\"imsak\""));
        assert!(position("\"imsak\"") < position("\"date\""));
        // absent ordinals are left out instead of carrying a sentinel
        assert!(!json.contains("day_number"));
    }

    #[test]
    fn location_batches_keep_record_order() {
        let mut batch = LocationBatch::new();
        let first = DayRecord::from_fields(&full_row());
        let mut second_fields = full_row();
        second_fields.insert(FieldRole::Date, "13/1/2026".to_owned());
        let second = DayRecord::from_fields(&second_fields);

        batch.insert(LocationId::from("beirut"), vec![first, second.clone()]);

        let (_, records) = batch.iter().next().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], second);
    }
}
