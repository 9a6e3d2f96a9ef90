use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use media_sync_models::{ImdbItem, ItemRating};
use std::collections::HashMap;
use tracing::debug;
use crate::error::DecodeError;

pub const HEADER_CONTENT_DISPOSITION: &str = "Content-Disposition";

const RATING_DATE_FORMAT: &str = "%Y-%m-%d";

/// Column layout of the list export (`/list/{id}/export`).
///
/// Position,Const,Created,Modified,Description,Title,URL,Title Type,...
struct ListExportRow<'r> {
    record: &'r StringRecord,
    row: usize,
}

impl<'r> ListExportRow<'r> {
    const ID: usize = 1;
    const TITLE_TYPE: usize = 7;

    fn id(&self) -> Result<&'r str, DecodeError> {
        column(self.record, self.row, Self::ID)
    }

    fn title_type(&self) -> Result<&'r str, DecodeError> {
        column(self.record, self.row, Self::TITLE_TYPE)
    }
}

/// Column layout of the ratings export (`/user/{id}/ratings/export`).
///
/// Const,Your Rating,Date Rated,Title,URL,Title Type,...
struct RatingsExportRow<'r> {
    record: &'r StringRecord,
    row: usize,
}

impl<'r> RatingsExportRow<'r> {
    const ID: usize = 0;
    const RATING: usize = 1;
    const DATE_RATED: usize = 2;
    const TITLE_TYPE: usize = 5;

    fn id(&self) -> Result<&'r str, DecodeError> {
        column(self.record, self.row, Self::ID)
    }

    fn title_type(&self) -> Result<&'r str, DecodeError> {
        column(self.record, self.row, Self::TITLE_TYPE)
    }

    fn rating(&self) -> Result<ItemRating, DecodeError> {
        let value_str = column(self.record, self.row, Self::RATING)?;
        let invalid_rating = || DecodeError::Rating {
            value: value_str.to_string(),
        };
        let value = value_str.parse::<u8>().map_err(|_| invalid_rating())?;

        let date_str = column(self.record, self.row, Self::DATE_RATED)?;
        let date = NaiveDate::parse_from_str(date_str, RATING_DATE_FORMAT).map_err(|source| {
            DecodeError::RatingDate {
                value: date_str.to_string(),
                source,
            }
        })?;

        ItemRating::new(value, date).ok_or_else(invalid_rating)
    }
}

fn column(record: &StringRecord, row: usize, column: usize) -> Result<&str, DecodeError> {
    record.get(column).ok_or(DecodeError::MissingColumn { row, column })
}

/// Reader over an export body: header row skipped, ragged rows allowed.
fn export_reader(body: &[u8]) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .double_quote(true)
        .from_reader(body)
}

/// Decode a list export into items (no rating data in this feed).
///
/// Every data row becomes an item; cells are taken verbatim.
pub fn decode_list_items(body: &[u8]) -> Result<Vec<ImdbItem>, DecodeError> {
    let mut reader = export_reader(body);
    let mut items = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = ListExportRow { record: &record, row: i + 1 };
        items.push(ImdbItem::new(row.id()?, row.title_type()?));
    }

    debug!(count = items.len(), "Decoded list export");
    Ok(items)
}

/// Decode the ratings export. Any malformed row fails the whole decode.
pub fn decode_ratings(body: &[u8]) -> Result<Vec<ImdbItem>, DecodeError> {
    let mut reader = export_reader(body);
    let mut ratings = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = RatingsExportRow { record: &record, row: i + 1 };
        ratings.push(ImdbItem::rated(row.id()?, row.title_type()?, row.rating()?));
    }

    Ok(ratings)
}

/// Display name of an exported list, taken from its download filename.
///
/// `attachment; filename="My Watchlist.csv"` gives `My Watchlist`: everything
/// before the first `.` of the filename.
pub fn list_name_from_content_disposition(header: Option<&str>) -> Result<String, DecodeError> {
    let header = header
        .filter(|h| !h.trim().is_empty())
        .ok_or(DecodeError::MissingHeader(HEADER_CONTENT_DISPOSITION))?;

    let params = disposition_params(header)?;
    let filename = params
        .get("filename")
        .filter(|f| !f.is_empty())
        .ok_or_else(|| invalid_header("no filename parameter"))?;

    Ok(filename.split('.').next().unwrap_or_default().to_string())
}

fn invalid_header(reason: impl Into<String>) -> DecodeError {
    DecodeError::InvalidHeader {
        header: HEADER_CONTENT_DISPOSITION,
        reason: reason.into(),
    }
}

/// Parameters of a `Content-Disposition` value, keyed by lowercase name.
///
/// The RFC 2231 form `filename*=UTF-8''...` is decoded and stored under
/// `filename`, taking precedence over a plain `filename`.
fn disposition_params(value: &str) -> Result<HashMap<String, String>, DecodeError> {
    let mut segments = split_unquoted(value, ';').into_iter();

    let disposition = segments.next().unwrap_or_default();
    let disposition = disposition.trim();
    if disposition.is_empty() || disposition.contains('=') {
        return Err(invalid_header(format!("missing disposition type in '{}'", value)));
    }

    let mut params = HashMap::new();
    let mut extended = HashMap::new();
    for segment in segments {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (key, raw) = segment
            .split_once('=')
            .ok_or_else(|| invalid_header(format!("malformed parameter '{}'", segment)))?;
        let key = key.trim().to_ascii_lowercase();

        if let Some(base) = key.strip_suffix('*') {
            extended.insert(base.to_string(), decode_extended_value(raw.trim())?);
        } else if params.insert(key.clone(), unquote(raw.trim())).is_some() {
            return Err(invalid_header(format!("duplicate parameter '{}'", key)));
        }
    }

    params.extend(extended);
    if params.is_empty() {
        return Err(invalid_header("no parameters"));
    }
    Ok(params)
}

/// Split on `sep`, ignoring separators inside double quotes.
fn split_unquoted(value: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for c in value.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => {
                current.push(c);
                escaped = true;
            }
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            c if c == sep && !in_quotes => parts.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }
    parts.push(current);
    parts
}

fn unquote(value: &str) -> String {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
    else {
        return value.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Decode an RFC 2231 extended value: `charset'language'percent-encoded`.
fn decode_extended_value(raw: &str) -> Result<String, DecodeError> {
    let mut parts = raw.splitn(3, '\'');
    let (Some(charset), Some(_language), Some(encoded)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid_header(format!("malformed extended parameter '{}'", raw)));
    };

    if !charset.eq_ignore_ascii_case("utf-8") && !charset.eq_ignore_ascii_case("us-ascii") {
        return Err(invalid_header(format!("unsupported charset '{}'", charset)));
    }

    urlencoding::decode(encoded)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| invalid_header(format!("invalid percent-encoding: {}", e)))
}
