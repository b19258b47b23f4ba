use crate::error::{Result, StoreError};
use crate::Store;
use dialtone_core::{
    LabelParts, PhoneRecordSource, PhoneValue, CONTACT_KIND, MOBILE_FIELD, PHONE_FIELD,
};
use rusqlite::OptionalExtension;

impl PhoneRecordSource for Store {
    type Error = StoreError;

    fn phone_candidates(
        &self,
        kind: &str,
        fields: &[String],
        suffix: &str,
    ) -> Result<Vec<PhoneValue>> {
        ensure_contact_kind(kind)?;
        let digits: String = suffix.chars().filter(|ch| ch.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Ok(Vec::new());
        }
        let pattern = format!("{}*", digits.chars().rev().collect::<String>());

        let mut out = Vec::new();
        for field in fields {
            let (value_column, match_column) = match field.as_str() {
                PHONE_FIELD => ("phone", "phone_match"),
                MOBILE_FIELD => ("mobile", "mobile_match"),
                _ => {
                    return Err(StoreError::UnknownPhoneField {
                        kind: kind.to_string(),
                        field: field.clone(),
                    })
                }
            };
            let mut stmt = self.connection().prepare(&format!(
                "SELECT id, {value_column} FROM contacts
                 WHERE {match_column} GLOB ?1
                 ORDER BY id ASC;"
            ))?;
            let mut rows = stmt.query([&pattern])?;
            while let Some(row) = rows.next()? {
                out.push(PhoneValue {
                    id: row.get(0)?,
                    field: field.clone(),
                    value: row.get(1)?,
                });
            }
        }
        Ok(out)
    }

    fn label_parts(&self, kind: &str, id: &str) -> Result<Option<LabelParts>> {
        ensure_contact_kind(kind)?;
        let parts = self
            .connection()
            .query_row(
                "SELECT c.display_name, p.display_name
                 FROM contacts c
                 LEFT JOIN contacts p ON p.id = c.parent_id
                 WHERE c.id = ?1;",
                [id],
                |row| {
                    Ok(LabelParts {
                        display_name: row.get(0)?,
                        parent_display_name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(parts)
    }
}

fn ensure_contact_kind(kind: &str) -> Result<()> {
    if kind != CONTACT_KIND {
        return Err(StoreError::UnsupportedKind(kind.to_string()));
    }
    Ok(())
}
