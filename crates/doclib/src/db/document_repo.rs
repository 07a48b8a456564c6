//! Document repository: operations on the `pdf_documents` table.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Row};

use super::{Database, DatabaseError};
use crate::model::StoredDocument;

/// A raw document row from the database.
#[derive(Debug, Clone)]
pub struct DocumentRow {
    pub id: String,
    pub title: String,
    pub file_name: String,
    pub created_at: String,
    pub size: Option<i64>,
    pub path: Option<String>,
}

impl DocumentRow {
    fn from_row(row: &Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            file_name: row.get("file_name")?,
            created_at: row.get("created_at")?,
            size: row.get("size")?,
            path: row.get("path")?,
        })
    }

    pub fn from_document(doc: &StoredDocument) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.title.clone(),
            file_name: doc.file_name.clone(),
            created_at: format_timestamp(doc.uploaded_at),
            size: doc.size.map(|s| s as i64),
            path: doc.path.clone(),
        }
    }

    pub fn into_document(self) -> Result<StoredDocument, DatabaseError> {
        let uploaded_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| DatabaseError::InvalidTimestamp {
                id: self.id.clone(),
                value: self.created_at.clone(),
            })?;

        Ok(StoredDocument {
            id: self.id,
            title: self.title,
            file_name: self.file_name,
            uploaded_at,
            size: self.size.and_then(|s| u64::try_from(s).ok()),
            path: self.path,
        })
    }
}

/// Fixed-width UTC timestamps so lexical order equals time order.
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Inserts a new document row.
pub fn insert(db: &Database, doc: &DocumentRow) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO pdf_documents (id, title, file_name, created_at, size, path)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                doc.id,
                doc.title,
                doc.file_name,
                doc.created_at,
                doc.size,
                doc.path,
            ],
        )?;
        Ok(())
    })
}

/// Finds a document by its ID.
pub fn find_by_id(db: &Database, id: &str) -> Result<Option<DocumentRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT * FROM pdf_documents WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![id], DocumentRow::from_row)?;
        match rows.next() {
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(e)) => Err(DatabaseError::Sqlite(e)),
            None => Ok(None),
        }
    })
}

/// All documents, newest first. Equal timestamps fall back to insertion order.
pub fn list_newest_first(db: &Database) -> Result<Vec<DocumentRow>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt =
            conn.prepare("SELECT * FROM pdf_documents ORDER BY created_at DESC, rowid DESC")?;
        let rows = stmt
            .query_map([], DocumentRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    })
}

/// Deletes a document. Returns whether a row was removed.
pub fn delete(db: &Database, id: &str) -> Result<bool, DatabaseError> {
    db.with_conn(|conn| {
        let affected = conn.execute("DELETE FROM pdf_documents WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::open_in_memory().expect("Failed to create test database")
    }

    fn sample_doc(id: &str, created_at: &str) -> DocumentRow {
        DocumentRow {
            id: id.to_string(),
            title: format!("Title {}", id),
            file_name: "test.pdf".to_string(),
            created_at: created_at.to_string(),
            size: Some(1024),
            path: Some(format!("{}_test.pdf", id)),
        }
    }

    #[test]
    fn test_insert_and_find() {
        let db = test_db();
        insert(&db, &sample_doc("doc-1", "2026-01-01T00:00:00.000000Z")).unwrap();

        let found = find_by_id(&db, "doc-1").unwrap().unwrap();
        assert_eq!(found.title, "Title doc-1");
        assert_eq!(found.size, Some(1024));
        assert_eq!(found.path.as_deref(), Some("doc-1_test.pdf"));
    }

    #[test]
    fn test_find_nonexistent() {
        let db = test_db();
        assert!(find_by_id(&db, "nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_list_newest_first() {
        let db = test_db();
        insert(&db, &sample_doc("old", "2026-01-01T00:00:00.000000Z")).unwrap();
        insert(&db, &sample_doc("new", "2026-03-01T00:00:00.000000Z")).unwrap();
        insert(&db, &sample_doc("mid", "2026-02-01T00:00:00.000000Z")).unwrap();

        let ids: Vec<String> = list_newest_first(&db)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_list_ties_break_by_insertion() {
        let db = test_db();
        let ts = "2026-01-01T00:00:00.000000Z";
        insert(&db, &sample_doc("first", ts)).unwrap();
        insert(&db, &sample_doc("second", ts)).unwrap();

        let ids: Vec<String> = list_newest_first(&db)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["second", "first"]);
    }

    #[test]
    fn test_delete() {
        let db = test_db();
        insert(&db, &sample_doc("d1", "2026-01-01T00:00:00.000000Z")).unwrap();
        insert(&db, &sample_doc("d2", "2026-01-02T00:00:00.000000Z")).unwrap();

        assert!(delete(&db, "d1").unwrap());
        assert!(!delete(&db, "d1").unwrap());
        assert_eq!(list_newest_first(&db).unwrap().len(), 1);
        assert!(find_by_id(&db, "d2").unwrap().is_some());
    }

    #[test]
    fn test_row_document_conversion() {
        let row = sample_doc("c1", "2026-01-01T12:30:00.123456Z");
        let doc = row.clone().into_document().unwrap();
        assert_eq!(doc.size, Some(1024));
        assert_eq!(DocumentRow::from_document(&doc).created_at, row.created_at);
    }

    #[test]
    fn test_invalid_timestamp() {
        let row = sample_doc("bad", "yesterday");
        match row.into_document() {
            Err(DatabaseError::InvalidTimestamp { id, value }) => {
                assert_eq!(id, "bad");
                assert_eq!(value, "yesterday");
            }
            other => panic!("Expected InvalidTimestamp, got {:?}", other.map(|d| d.id)),
        }
    }
}
