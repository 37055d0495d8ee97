//! Row parsers for the poem list and generic point-of-interest files.

use std::collections::BTreeMap;
use std::io::Read;

use super::{parse_component, parse_coordinate, ImportError, ImportResult, ImportWarning};
use crate::world::geo::Coordinate;
use crate::world::landmarks::{MarkerIcon, MarkerRecord, MarkerStyle, QuestLink};

/// Columns consumed by the generic parser; everything else lands in `extra`.
const GENERIC_COLUMNS: &[&str] = &[
    "latitude",
    "longitude",
    "image",
    "image2",
    "image3",
    "title",
    "text",
    "panorama",
    "author",
    "year",
    "language",
    "rating",
    "questStart",
    "questEnd",
    "newQuestLatitude",
    "newQuestLongitude",
];

/// Placeholder the poem list uses for a missing Dutch title.
const EMPTY_TITLE: &str = "EMPTY";

/// Header-indexed view of one CSV row.
struct Row<'a> {
    headers: &'a csv::StringRecord,
    record: &'a csv::StringRecord,
}

impl<'a> Row<'a> {
    /// Trimmed, non-empty cell for `column`
    fn get(&self, column: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .position(|h| h.trim() == column)
            .and_then(|idx| self.record.get(idx))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    fn owned(&self, column: &str) -> Option<String> {
        self.get(column).map(str::to_string)
    }
}

fn reader<R: Read>(input: R, delimiter: u8) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(input)
}

/// Parse every row with `build`, collecting warnings.
fn parse_rows<R, F>(input: R, delimiter: u8, mut build: F) -> Result<ImportResult, ImportError>
where
    R: Read,
    F: FnMut(&Row<'_>) -> (MarkerRecord, bool),
{
    let mut reader = reader(input, delimiter);
    let headers = reader.headers()?.clone();
    let mut result = ImportResult::default();

    for (idx, record) in reader.records().enumerate() {
        let row_number = idx + 1;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Skipping row {}: {}", row_number, e);
                result.warnings.push(ImportWarning::SkippedRow {
                    row: row_number,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let row = Row {
            headers: &headers,
            record: &record,
        };
        let (marker, degraded) = build(&row);
        if degraded {
            tracing::warn!(
                "Row {} ('{}') has no usable coordinates, placed at sentinel",
                row_number,
                marker.title
            );
            result
                .warnings
                .push(ImportWarning::InvalidCoordinates { row: row_number });
        }
        result.records.push(marker);
    }

    Ok(result)
}

/// Parse the geocoded poem list.
///
/// Expected columns: `id, original_title, dutch_title, author,
/// placement_year, language, latitude, longitude`.
pub fn parse_poems<R: Read>(input: R, delimiter: u8) -> Result<ImportResult, ImportError> {
    parse_rows(input, delimiter, |row| {
        let (coords, degraded) = parse_coordinate(row.get("latitude"), row.get("longitude"));

        let mut title = row.owned("original_title").unwrap_or_default();
        if let Some(dutch) = row.get("dutch_title").filter(|t| *t != EMPTY_TITLE) {
            title.push(' ');
            title.push_str(dutch);
        }

        let mut marker = MarkerRecord::new(coords, title, MarkerIcon::Poem);
        if let Some(id) = row.get("id") {
            marker.images.push(format!("static/poem_images/{id}.jpg"));
        }
        marker.metadata.author = row.owned("author");
        marker.metadata.year = row.owned("placement_year");
        marker.metadata.language = row.owned("language");
        (marker, degraded)
    })
}

/// Parse a generic point-of-interest list (restaurants, landmarks).
///
/// Image columns `image`, `image2`, `image3` are resolved under
/// `static/images/`. Quest columns are `questStart`, `questEnd`,
/// `newQuestLatitude`, `newQuestLongitude`.
pub fn parse_generic<R: Read>(
    input: R,
    delimiter: u8,
    icon: MarkerIcon,
    style: MarkerStyle,
) -> Result<ImportResult, ImportError> {
    parse_rows(input, delimiter, |row| {
        let (coords, degraded) = parse_coordinate(row.get("latitude"), row.get("longitude"));

        let relocation = match (
            parse_component(row.get("newQuestLatitude")),
            parse_component(row.get("newQuestLongitude")),
        ) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        };

        let images = ["image", "image2", "image3"]
            .iter()
            .filter_map(|col| row.get(col))
            .map(|file| format!("static/images/{file}"))
            .collect();

        let extra: BTreeMap<String, String> = row
            .headers
            .iter()
            .map(str::trim)
            .filter(|h| !GENERIC_COLUMNS.contains(h))
            .filter_map(|h| row.get(h).map(|v| (h.to_string(), v.to_string())))
            .collect();

        let mut marker = MarkerRecord::new(coords, row.owned("title").unwrap_or_default(), icon.clone());
        marker.text = row.owned("text").unwrap_or_default();
        marker.images = images;
        marker.panorama = row.owned("panorama");
        marker.style = style;
        marker.quest = QuestLink {
            start: row.owned("questStart"),
            end: row.owned("questEnd"),
            relocation,
        };
        marker.metadata.author = row.owned("author");
        marker.metadata.year = row.owned("year");
        marker.metadata.language = row.owned("language");
        marker.metadata.rating = row.owned("rating");
        marker.extra = extra;
        (marker, degraded)
    })
}
