use serde::Serialize;
use serde_json::Value;

use super::{Column, ExportError};

/// UTF-8 byte order mark, so spreadsheet tools pick the right encoding for Arabic text.
pub const BOM: &str = "\u{feff}";

const ARRAY_SEPARATOR: &str = "; ";

/// Render `rows` as CSV: BOM, a header of column labels, then one line per row.
///
/// Every field is quoted and embedded quotes are doubled. Lines end with `\n`.
pub fn render<T: Serialize>(rows: &[T], columns: &[Column]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(BOM.as_bytes().to_vec());

    writer.write_record(columns.iter().map(|column| column.label.as_str()))?;
    for row in rows {
        let value = serde_json::to_value(row)?;
        writer.write_record(columns.iter().map(|column| cell(&value, &column.path)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Follow a dot path (`title.en`, `location.lat`, `amenities.0.en`) into `value`.
///
/// A non-numeric segment applied to an array is applied to each element, so
/// `amenities.en` yields every amenity's English name.
pub fn resolve(value: &Value, path: &str) -> Option<Value> {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    lookup(value, &segments)
}

fn lookup(value: &Value, segments: &[&str]) -> Option<Value> {
    let Some((head, rest)) = segments.split_first() else {
        return Some(value.clone());
    };
    match value {
        Value::Object(map) => map.get(*head).and_then(|next| lookup(next, rest)),
        Value::Array(items) => match head.parse::<usize>() {
            Ok(index) => items.get(index).and_then(|next| lookup(next, rest)),
            Err(_) => Some(Value::Array(
                items.iter().filter_map(|item| lookup(item, segments)).collect(),
            )),
        },
        _ => None,
    }
}

fn cell(row: &Value, path: &str) -> String {
    resolve(row, path).as_ref().map(flatten).unwrap_or_default()
}

fn flatten(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) => items
            .iter()
            .map(flatten)
            .collect::<Vec<_>>()
            .join(ARRAY_SEPARATOR),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Row {
        name: &'static str,
        note: &'static str,
        tags: Vec<&'static str>,
        location: Value,
    }

    fn columns() -> Vec<Column> {
        vec![
            Column::new("Name", "name"),
            Column::new("Note", "note"),
            Column::new("Tags", "tags"),
            Column::new("Latitude", "location.lat"),
        ]
    }

    #[test]
    fn output_has_header_plus_one_line_per_row() {
        let rows = vec![
            Row {
                name: "Ali",
                note: "said \"hello\", then left",
                tags: vec!["vip", "kitchen"],
                location: json!({ "lat": 30.04, "lng": 31.23 }),
            },
            Row {
                name: "Mona",
                note: "",
                tags: Vec::new(),
                location: Value::Null,
            },
        ];

        let output = render(&rows, &columns()).expect("renders");
        let body = output.strip_prefix(BOM).expect("starts with BOM");
        let lines: Vec<_> = body.lines().collect();

        assert_eq!(lines.len(), rows.len() + 1);
        assert_eq!(lines[0], r#""Name","Note","Tags","Latitude""#);
        assert_eq!(
            lines[1],
            r#""Ali","said ""hello"", then left","vip; kitchen","30.04""#
        );
        assert_eq!(lines[2], r#""Mona","","","""#);
        assert!(body.ends_with('\n'));
        assert!(!body.contains('\r'));
    }

    #[test]
    fn every_line_has_one_field_per_column() {
        let rows = vec![Row {
            name: "Sara, Ltd",
            note: "a,b,c",
            tags: vec!["x,y"],
            location: json!({ "lat": 1 }),
        }];

        let output = render(&rows, &columns()).expect("renders");
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(output.trim_start_matches(BOM).as_bytes());
        for record in reader.records() {
            assert_eq!(record.expect("valid record").len(), 4);
        }
    }

    #[test]
    fn empty_rows_still_write_the_header() {
        let output = render::<Row>(&[], &columns()).expect("renders");
        assert_eq!(output.trim_start_matches(BOM).lines().count(), 1);
    }

    #[test]
    fn resolve_walks_objects_and_arrays() {
        let value = json!({
            "amenities": [{ "en": "Pool" }, { "en": "Gym" }],
            "title": { "ar": "شقة" }
        });
        assert_eq!(resolve(&value, "amenities.0.en"), Some(json!("Pool")));
        assert_eq!(resolve(&value, "amenities.en"), Some(json!(["Pool", "Gym"])));
        assert_eq!(resolve(&value, "title.ar"), Some(json!("شقة")));
        assert_eq!(resolve(&value, "title.fr"), None);
        assert_eq!(resolve(&value, "title.ar.more"), None);
        assert_eq!(cell(&value, "amenities.en"), "Pool; Gym");
    }
}
