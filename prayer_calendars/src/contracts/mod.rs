pub mod import_calendars;
