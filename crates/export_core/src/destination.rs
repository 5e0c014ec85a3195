use chrono::NaiveDate;

pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Returns the trailing `/` segment of a table ARN, or `None` when the
/// identifier has no separator or ends with one.
pub fn table_short_name(table_arn: &str) -> Option<&str> {
    table_arn
        .rsplit_once('/')
        .map(|(_, name)| name)
        .filter(|name| !name.is_empty())
}

pub fn export_prefix(short_name: &str, date: NaiveDate) -> String {
    format!("{short_name}/{}", date.format(EXPORT_DATE_FORMAT))
}
