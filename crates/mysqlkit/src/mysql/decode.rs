//! `MySqlRow` -> [`Row`] conversion.

use crate::error::{DbError, DbResult};
use crate::row::Row;
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::mysql::MySqlRow;
use sqlx::mysql::types::MySqlTime;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// Wire format the rows arrived in.
///
/// Statements sent without values go over the text protocol, where temporal columns
/// carry the server's own rendering. Bound statements use the binary protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Protocol {
    Text,
    Binary,
}

/// How a column is decoded, chosen from the driver's type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    /// `TINYINT(1)`, reported by the driver as `BOOLEAN`. Holds any tinyint value.
    Flag,
    Unsigned,
    Signed,
    Year,
    Float,
    Double,
    Decimal,
    Date,
    DateTime,
    Time,
    Json,
    Bytes,
    Text,
}

impl ColumnKind {
    fn of(type_name: &str) -> Self {
        match type_name {
            "BOOLEAN" => Self::Flag,
            name if name.ends_with("UNSIGNED") => Self::Unsigned,
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => Self::Signed,
            "YEAR" => Self::Year,
            "FLOAT" => Self::Float,
            "DOUBLE" => Self::Double,
            "DECIMAL" => Self::Decimal,
            "DATE" => Self::Date,
            "DATETIME" | "TIMESTAMP" => Self::DateTime,
            "TIME" => Self::Time,
            "JSON" => Self::Json,
            "BLOB" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BINARY" | "VARBINARY" | "BIT"
            | "GEOMETRY" => Self::Bytes,
            _ => Self::Text,
        }
    }

    fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::DateTime | Self::Time)
    }
}

/// Decode every column of `row`, in result-set order.
pub(crate) fn decode_row(row: &MySqlRow, date_strings: bool, protocol: Protocol) -> DbResult<Row> {
    let mut out = Row::new();
    for column in row.columns() {
        let kind = ColumnKind::of(column.type_info().name());
        let value = decode_column(row, column.ordinal(), kind, date_strings, protocol)
            .map_err(|e| DbError::decode(column.name(), e.to_string()))?;
        out.push(column.name(), value);
    }
    Ok(out)
}

fn decode_column(
    row: &MySqlRow,
    idx: usize,
    kind: ColumnKind,
    date_strings: bool,
    protocol: Protocol,
) -> Result<Value, sqlx::Error> {
    if row.try_get_raw(idx)?.is_null() {
        return Ok(Value::Null);
    }

    // The server's text is returned untouched: zero dates and the column's
    // fractional precision survive.
    if kind.is_temporal() && protocol == Protocol::Text {
        let decoded = if date_strings {
            None
        } else {
            decode_temporal(row, idx, kind).ok()
        };
        return match decoded {
            Some(value) => Ok(value),
            None => row.try_get_unchecked::<String, _>(idx).map(Value::Text),
        };
    }

    let value = match kind {
        // Unsigned columns are only compatible with u64, signed ones only with i64.
        ColumnKind::Flag => row
            .try_get::<u64, _>(idx)
            .map(Value::UInt)
            .or_else(|_| row.try_get::<i64, _>(idx).map(Value::Int))?,
        ColumnKind::Unsigned => Value::UInt(row.try_get::<u64, _>(idx)?),
        ColumnKind::Signed => Value::Int(row.try_get::<i64, _>(idx)?),
        ColumnKind::Year => row
            .try_get::<u16, _>(idx)
            .map(|y| Value::Int(i64::from(y)))
            .or_else(|_| row.try_get::<i64, _>(idx).map(Value::Int))
            .or_else(|_| row.try_get_unchecked::<String, _>(idx).map(Value::Text))?,
        ColumnKind::Float => Value::Float(f64::from(row.try_get::<f32, _>(idx)?)),
        ColumnKind::Double => Value::Float(row.try_get::<f64, _>(idx)?),
        ColumnKind::Decimal => Value::Text(row.try_get::<Decimal, _>(idx)?.to_string()),
        ColumnKind::Date | ColumnKind::DateTime | ColumnKind::Time => {
            let value = decode_temporal(row, idx, kind)?;
            if date_strings {
                render_temporal(value)
            } else {
                value
            }
        }
        ColumnKind::Json => Value::Json(row.try_get::<serde_json::Value, _>(idx)?),
        ColumnKind::Bytes => Value::Bytes(row.try_get_unchecked::<Vec<u8>, _>(idx)?),
        ColumnKind::Text => match row.try_get::<String, _>(idx) {
            Ok(text) => Value::Text(text),
            Err(_) => Value::Bytes(row.try_get_unchecked::<Vec<u8>, _>(idx)?),
        },
    };
    Ok(value)
}

fn decode_temporal(row: &MySqlRow, idx: usize, kind: ColumnKind) -> Result<Value, sqlx::Error> {
    Ok(match kind {
        ColumnKind::Date => Value::Date(row.try_get::<NaiveDate, _>(idx)?),
        ColumnKind::DateTime => Value::DateTime(
            row.try_get::<NaiveDateTime, _>(idx)
                .or_else(|_| row.try_get::<DateTime<Utc>, _>(idx).map(|dt| dt.naive_utc()))?,
        ),
        // TIME may be negative or exceed 24h; those keep the server's notation.
        _ => match row.try_get::<NaiveTime, _>(idx) {
            Ok(time) => Value::Time(time),
            Err(_) => Value::Text(row.try_get::<MySqlTime, _>(idx)?.to_string()),
        },
    })
}

fn render_temporal(value: Value) -> Value {
    match value {
        Value::Date(date) => Value::Text(date.format(DATE_FORMAT).to_string()),
        Value::DateTime(datetime) => Value::Text(datetime.format(DATETIME_FORMAT).to_string()),
        Value::Time(time) => Value::Text(time.format(TIME_FORMAT).to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_formats_match_server_text() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 0)
            .unwrap();
        assert_eq!(dt.format(DATETIME_FORMAT).to_string(), "2024-03-09 07:05:00");
        assert_eq!(dt.date().format(DATE_FORMAT).to_string(), "2024-03-09");

        let with_micros = dt + chrono::Duration::microseconds(120);
        assert_eq!(
            with_micros.format(DATETIME_FORMAT).to_string(),
            "2024-03-09 07:05:00.000120"
        );
    }

    #[test]
    fn tinyint_one_is_decoded_as_an_integer() {
        assert_eq!(ColumnKind::of("BOOLEAN"), ColumnKind::Flag);
        assert!(!ColumnKind::Flag.is_temporal());
        assert_eq!(ColumnKind::of("TINYINT"), ColumnKind::Signed);
        assert_eq!(ColumnKind::of("TINYINT UNSIGNED"), ColumnKind::Unsigned);
        assert_eq!(ColumnKind::of("BIGINT UNSIGNED"), ColumnKind::Unsigned);
    }

    #[test]
    fn temporal_kinds() {
        for name in ["DATE", "DATETIME", "TIMESTAMP", "TIME"] {
            assert!(ColumnKind::of(name).is_temporal(), "{name}");
        }
        assert!(!ColumnKind::of("YEAR").is_temporal());
        assert_eq!(ColumnKind::of("DECIMAL"), ColumnKind::Decimal);
        assert_eq!(ColumnKind::of("VARCHAR"), ColumnKind::Text);
        assert_eq!(ColumnKind::of("VARBINARY"), ColumnKind::Bytes);
    }

    #[test]
    fn render_temporal_uses_server_layout() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert_eq!(render_temporal(Value::Date(date)), Value::Text("2024-01-02".into()));
        let time = NaiveTime::from_hms_opt(23, 4, 5).unwrap();
        assert_eq!(render_temporal(Value::Time(time)), Value::Text("23:04:05".into()));
        assert_eq!(
            render_temporal(Value::Text("-01:00:00".into())),
            Value::Text("-01:00:00".into())
        );
    }
}
