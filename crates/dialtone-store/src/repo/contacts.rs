use crate::error::{Result, StoreError};
use dialtone_core::hook::on_phone_field_write;
use dialtone_core::phone::digits_only;
use dialtone_core::settings::resolve_country;
use dialtone_core::{CompanySettings, Contact, ContactId, MOBILE_FIELD, PHONE_FIELD};
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;

const CONTACT_COLUMNS: &str =
    "id, display_name, is_company, parent_id, country, phone, mobile, created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub struct ContactNew {
    pub display_name: String,
    pub is_company: bool,
    pub parent_id: Option<ContactId>,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    pub display_name: Option<String>,
    pub is_company: Option<bool>,
    pub parent_id: Option<Option<ContactId>>,
    pub country: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub mobile: Option<Option<String>>,
}

impl ContactUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.is_company.is_none()
            && self.parent_id.is_none()
            && self.country.is_none()
            && self.phone.is_none()
            && self.mobile.is_none()
    }
}

pub struct ContactsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ContactsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts a contact after normalizing its phone fields. A contact without
    /// a country takes its parent's.
    pub fn create(
        &self,
        now_utc: i64,
        settings: &CompanySettings,
        input: ContactNew,
    ) -> Result<Contact> {
        if self.conn.is_autocommit() {
            let tx = self.conn.unchecked_transaction()?;
            let contact = create_inner(&tx, now_utc, settings, input)?;
            tx.commit()?;
            Ok(contact)
        } else {
            create_inner(self.conn, now_utc, settings, input)
        }
    }

    pub fn get(&self, id: ContactId) -> Result<Option<Contact>> {
        get_inner(self.conn, id)
    }

    /// Applies a patch. Only phone fields present in the patch go through
    /// normalization, using the patched country.
    pub fn update(
        &self,
        now_utc: i64,
        settings: &CompanySettings,
        id: ContactId,
        update: ContactUpdate,
    ) -> Result<Contact> {
        if self.conn.is_autocommit() {
            let tx = self.conn.unchecked_transaction()?;
            let contact = update_inner(&tx, now_utc, settings, id, update)?;
            tx.commit()?;
            Ok(contact)
        } else {
            update_inner(self.conn, now_utc, settings, id, update)
        }
    }

    /// Removes a contact; its children keep existing without a parent.
    pub fn delete(&self, id: ContactId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn list_all(&self) -> Result<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts
             ORDER BY display_name COLLATE NOCASE ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(contact_from_row(row)?);
        }
        Ok(contacts)
    }

    pub fn list_children(&self, parent_id: ContactId) -> Result<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CONTACT_COLUMNS} FROM contacts
             WHERE parent_id = ?1
             ORDER BY display_name COLLATE NOCASE ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([parent_id.to_string()])?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(contact_from_row(row)?);
        }
        Ok(contacts)
    }
}

fn create_inner(
    conn: &Connection,
    now_utc: i64,
    settings: &CompanySettings,
    input: ContactNew,
) -> Result<Contact> {
    let parent = match input.parent_id {
        Some(parent_id) => Some(
            get_inner(conn, parent_id)?
                .ok_or_else(|| StoreError::InvalidParent(parent_id.to_string()))?,
        ),
        None => None,
    };

    let country = match normalize_country(input.country)? {
        Some(code) => Some(code),
        None => parent.and_then(|parent| parent.country),
    };

    let mut contact = Contact {
        id: ContactId::new(),
        display_name: input.display_name.trim().to_string(),
        is_company: input.is_company,
        parent_id: input.parent_id,
        country,
        phone: input.phone,
        mobile: input.mobile,
        created_at: now_utc,
        updated_at: now_utc,
    };

    contact.validate()?;
    on_phone_field_write(&mut contact, PHONE_FIELD, settings)?;
    on_phone_field_write(&mut contact, MOBILE_FIELD, settings)?;

    conn.execute(
        "INSERT INTO contacts (id, display_name, is_company, parent_id, country, phone, mobile, phone_match, mobile_match, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
        params![
            contact.id.to_string(),
            contact.display_name,
            contact.is_company,
            contact.parent_id.map(|id| id.to_string()),
            contact.country,
            contact.phone,
            contact.mobile,
            match_key(contact.phone.as_deref()),
            match_key(contact.mobile.as_deref()),
            contact.created_at,
            contact.updated_at,
        ],
    )?;

    Ok(contact)
}

fn update_inner(
    conn: &Connection,
    now_utc: i64,
    settings: &CompanySettings,
    id: ContactId,
    update: ContactUpdate,
) -> Result<Contact> {
    let mut contact = get_inner(conn, id)?.ok_or_else(|| StoreError::NotFound(id.to_string()))?;

    if let Some(name) = update.display_name {
        contact.display_name = name.trim().to_string();
    }
    if let Some(is_company) = update.is_company {
        contact.is_company = is_company;
    }
    if let Some(parent_id) = update.parent_id {
        if let Some(parent_id) = parent_id {
            ensure_valid_parent(conn, id, parent_id)?;
        }
        contact.parent_id = parent_id;
    }
    let country_written = update.country.is_some();
    if let Some(country) = update.country {
        contact.country = normalize_country(country)?;
    }
    if contact.country.is_none() && !country_written {
        contact.country = inherited_country(conn, contact.parent_id)?;
    }

    contact.validate()?;

    if let Some(phone) = update.phone {
        contact.phone = phone;
        on_phone_field_write(&mut contact, PHONE_FIELD, settings)?;
    }
    if let Some(mobile) = update.mobile {
        contact.mobile = mobile;
        on_phone_field_write(&mut contact, MOBILE_FIELD, settings)?;
    }

    contact.updated_at = now_utc;

    conn.execute(
        "UPDATE contacts SET display_name = ?2, is_company = ?3, parent_id = ?4, country = ?5, phone = ?6, mobile = ?7, phone_match = ?8, mobile_match = ?9, updated_at = ?10
         WHERE id = ?1;",
        params![
            contact.id.to_string(),
            contact.display_name,
            contact.is_company,
            contact.parent_id.map(|id| id.to_string()),
            contact.country,
            contact.phone,
            contact.mobile,
            match_key(contact.phone.as_deref()),
            match_key(contact.mobile.as_deref()),
            contact.updated_at,
        ],
    )?;

    Ok(contact)
}

pub(crate) fn get_inner(conn: &Connection, id: ContactId) -> Result<Option<Contact>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1;"
    ))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        Ok(Some(contact_from_row(row)?))
    } else {
        Ok(None)
    }
}

// Walks up from the new parent; reaching `id` would close a cycle.
fn ensure_valid_parent(conn: &Connection, id: ContactId, parent_id: ContactId) -> Result<()> {
    let mut current = Some(parent_id);
    while let Some(ancestor) = current {
        if ancestor == id {
            return Err(StoreError::InvalidParent(format!(
                "{} would become its own ancestor",
                id
            )));
        }
        let next: Option<Option<String>> = conn
            .query_row(
                "SELECT parent_id FROM contacts WHERE id = ?1;",
                [ancestor.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        current = match next {
            None => return Err(StoreError::InvalidParent(ancestor.to_string())),
            Some(None) => None,
            Some(Some(raw)) => Some(parse_id(&raw)?),
        };
    }
    Ok(())
}

/// Country of the parent, if any; a contact without its own country uses it.
fn inherited_country(conn: &Connection, parent_id: Option<ContactId>) -> Result<Option<String>> {
    let Some(parent_id) = parent_id else {
        return Ok(None);
    };
    Ok(get_inner(conn, parent_id)?.and_then(|parent| parent.country))
}

fn normalize_country(country: Option<String>) -> Result<Option<String>> {
    match country {
        Some(code) if !code.trim().is_empty() => Ok(Some(resolve_country(&code)?.code.to_string())),
        _ => Ok(None),
    }
}

/// Reversed digits of a stored phone value, see the `*_match` columns.
pub(crate) fn match_key(value: Option<&str>) -> Option<String> {
    let digits = digits_only(value?);
    if digits.is_empty() {
        return None;
    }
    Some(digits.chars().rev().collect())
}

fn parse_id(raw: &str) -> Result<ContactId> {
    ContactId::from_str(raw).map_err(|_| StoreError::InvalidId(raw.to_string()))
}

fn contact_from_row(row: &rusqlite::Row<'_>) -> Result<Contact> {
    let id: String = row.get(0)?;
    let parent_id: Option<String> = row.get(3)?;
    Ok(Contact {
        id: parse_id(&id)?,
        display_name: row.get(1)?,
        is_company: row.get(2)?,
        parent_id: parent_id.as_deref().map(parse_id).transpose()?,
        country: row.get(4)?,
        phone: row.get(5)?,
        mobile: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::match_key;

    #[test]
    fn match_key_reverses_digits() {
        assert_eq!(
            match_key(Some("+33 4 78 32 32 32")).as_deref(),
            Some("23232387433")
        );
        assert_eq!(match_key(None), None);
        assert_eq!(match_key(Some("")), None);
    }
}
