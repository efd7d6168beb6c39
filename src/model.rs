use base64::{engine::general_purpose, Engine};
use serde_json::{Map, Number, Value};
use sqlx::{sqlite::SqliteRow, Column, Row, TypeInfo, ValueRef};

/// A row of the `todos` table, keyed by column name.
///
/// The column set is whatever the table schema defines. Keys keep the
/// order in which the columns appear in the result set.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct TodoRow(Map<String, Value>);

impl TodoRow {
    // Build a row-as-mapping from a result row, keeping SQLite's native value types
    pub fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let mut fields = Map::with_capacity(row.columns().len());
        for column in row.columns() {
            let value = column_value(row, column.ordinal())?;
            fields.insert(column.name().to_owned(), value);
        }
        Ok(TodoRow(fields))
    }
}

// The storage class reported here is the one of the stored value, not the declared column type
fn column_value(row: &SqliteRow, index: usize) -> Result<Value, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(Value::Null);
    }

    let type_info = raw.type_info();
    let value = match type_info.name() {
        "INTEGER" => Value::from(row.try_get::<i64, _>(index)?),
        // JSON has no representation for infinities
        "REAL" => Number::from_f64(row.try_get::<f64, _>(index)?)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "BLOB" => {
            let bytes = row.try_get::<Vec<u8>, _>(index)?;
            Value::String(general_purpose::STANDARD.encode(bytes))
        }
        _ => Value::String(row.try_get::<String, _>(index)?),
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sqlx::query;

    use super::TodoRow;
    use crate::db::memory_pool;

    impl TodoRow {
        fn get(&self, column: &str) -> Option<&serde_json::Value> {
            self.0.get(column)
        }

        fn columns(&self) -> impl Iterator<Item = &str> {
            self.0.keys().map(String::as_str)
        }
    }

    async fn single_row(sql: &str) -> TodoRow {
        let pool = memory_pool().await;
        let row = query(sql).fetch_one(&pool).await.unwrap();
        TodoRow::from_row(&row).unwrap()
    }

    #[tokio::test]
    async fn maps_each_storage_class_to_json() {
        let row = single_row(
            "SELECT 1 AS id, 'Buy milk' AS title, 0 AS done, 2.5 AS score, NULL AS note, x'CAFE' AS raw",
        )
        .await;

        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({
                "id": 1,
                "title": "Buy milk",
                "done": 0,
                "score": 2.5,
                "note": null,
                "raw": "yv4="
            })
        );
    }

    #[tokio::test]
    async fn keeps_result_set_column_order() {
        let row = single_row("SELECT 3 AS z, 1 AS a, 2 AS m").await;

        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"z":3,"a":1,"m":2}"#
        );
    }

    #[tokio::test]
    async fn infinite_reals_become_null() {
        let row = single_row("SELECT 9e999 AS big").await;

        assert_eq!(row.get("big"), Some(&json!(null)));
    }

    #[tokio::test]
    async fn later_duplicate_column_wins() {
        let row = single_row("SELECT 1 AS a, 2 AS a").await;

        assert_eq!(row.columns().count(), 1);
        assert_eq!(row.get("a"), Some(&json!(2)));
    }
}
