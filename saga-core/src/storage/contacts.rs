// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Contact storage operations.

use rusqlite::{params, Row};

use super::{now_secs, Storage, StorageError};
use crate::contact::ContactInfo;

const CONTACT_COLUMNS: &str = "id, user_id, user_name, nick_name, visible_saga";

fn row_to_contact(row: &Row<'_>) -> rusqlite::Result<ContactInfo> {
    Ok(ContactInfo {
        id: row.get(0)?,
        user_id: row.get(1)?,
        user_name: row.get(2)?,
        nick_name: row.get(3)?,
        visible_saga: row.get::<_, i32>(4)? != 0,
    })
}

impl Storage {
    // === Contact Operations ===

    /// Inserts a new contact and returns its store-assigned ID.
    ///
    /// Any `id` already set on `contact` is ignored.
    pub fn create_contact(&self, contact: &ContactInfo) -> Result<String, StorageError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = now_secs();

        let result = self.conn.execute(
            "INSERT INTO contacts
             (id, user_id, user_name, nick_name, visible_saga, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                id,
                contact.user_id,
                contact.user_name,
                contact.nick_name,
                contact.visible_saga as i32,
                now,
                now,
            ],
        );

        match result {
            Ok(_) => Ok(id),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::AlreadyExists(contact.user_id.clone()))
            }
            Err(e) => Err(StorageError::Database(e)),
        }
    }

    /// Updates an existing contact, matched by its store ID.
    pub fn update_contact(&self, contact: &ContactInfo) -> Result<(), StorageError> {
        let rows = self.conn.execute(
            "UPDATE contacts
             SET user_id = ?2, user_name = ?3, nick_name = ?4, visible_saga = ?5, updated_at = ?6
             WHERE id = ?1",
            params![
                contact.id,
                contact.user_id,
                contact.user_name,
                contact.nick_name,
                contact.visible_saga as i32,
                now_secs(),
            ],
        )?;

        if rows == 0 {
            return Err(StorageError::NotFound(format!("contact id {}", contact.id)));
        }
        Ok(())
    }

    /// Loads a contact by directory user ID.
    pub fn query_user_by_id(&self, user_id: &str) -> Result<ContactInfo, StorageError> {
        let sql = format!("SELECT {} FROM contacts WHERE user_id = ?1", CONTACT_COLUMNS);
        match self.conn.query_row(&sql, params![user_id], row_to_contact) {
            Ok(contact) => Ok(contact),
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                Err(StorageError::NotFound(format!("user {}", user_id)))
            }
            Err(e) => Err(StorageError::Database(e)),
        }
    }

    /// Loads a contact by user name.
    ///
    /// User names are not unique in the directory; the oldest record wins.
    pub fn query_user_by_name(&self, user_name: &str) -> Result<Option<ContactInfo>, StorageError> {
        let sql = format!(
            "SELECT {} FROM contacts WHERE user_name = ?1 ORDER BY created_at, user_id LIMIT 1",
            CONTACT_COLUMNS
        );
        match self.conn.query_row(&sql, params![user_name], row_to_contact) {
            Ok(contact) => Ok(Some(contact)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::Database(e)),
        }
    }

    /// Lists all contacts, ordered by user name.
    pub fn list_contacts(&self) -> Result<Vec<ContactInfo>, StorageError> {
        let sql = format!(
            "SELECT {} FROM contacts ORDER BY user_name, user_id",
            CONTACT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_contact)?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(StorageError::Database)
    }

    /// Deletes a contact by directory user ID.
    ///
    /// Returns false if there was nothing to delete.
    pub fn delete_contact(&self, user_id: &str) -> Result<bool, StorageError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM contacts WHERE user_id = ?1", params![user_id])?;
        Ok(rows_affected > 0)
    }

    /// Returns the number of stored contacts.
    pub fn contact_count(&self) -> Result<usize, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
