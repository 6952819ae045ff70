use jiff::civil::Date;

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Parse the date part of an API timestamp.
///
/// Accepts `2024-03-05`, `2024-03-05 10:00:00`, `2024-03-05T10:00:00.000000Z`
/// and similar; only the leading `YYYY-MM-DD` is used.
pub fn parse_date(value: &str) -> Option<Date> {
    let head = value.trim().get(..10)?;
    head.parse::<Date>().ok()
}

/// Long Indonesian date, e.g. "5 Maret 2024". Unparseable input is returned as-is,
/// missing input as "-".
pub fn format_date(value: Option<&str>) -> String {
    match value {
        None => "-".to_string(),
        Some(raw) => match parse_date(raw) {
            Some(date) => format!(
                "{} {} {}",
                date.day(),
                MONTHS[(date.month() - 1) as usize],
                date.year()
            ),
            None => raw.to_string(),
        },
    }
}

/// Year of an API date, used by the gallery year tabs.
pub fn year_of(value: Option<&str>) -> Option<i16> {
    value.and_then(parse_date).map(|d| d.year())
}

/// Whether an event date lies before `today`.
pub fn is_past(value: Option<&str>, today: Date) -> bool {
    value.and_then(parse_date).is_some_and(|d| d < today)
}

/// Today's date in the local time zone.
pub fn today() -> Date {
    jiff::Zoned::now().date()
}

/// Reading time in minutes at 200 words per minute, at least 1.
pub fn reading_minutes(text: &str) -> usize {
    let words = text.split_whitespace().count();
    words.div_ceil(200).max(1)
}
