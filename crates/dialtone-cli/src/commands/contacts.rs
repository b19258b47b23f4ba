use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{format_timestamp_datetime, normalize_optional_value, now_utc, parse_contact_id};
use anyhow::Result;
use clap::{ArgAction, Args};
use dialtone_core::dto::{ContactDetailDto, ContactListItemDto, ParentDto};
use dialtone_core::{callerid_display_name, LabelParts};
use dialtone_store::repo::{ContactNew, ContactUpdate};

#[derive(Debug, Args)]
pub struct AddContactArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub mobile: Option<String>,
    /// ISO 3166 alpha-2 code; defaults to the parent's country
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long, value_name = "ID")]
    pub parent: Option<String>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub company: bool,
}

/// Empty values clear the corresponding field.
#[derive(Debug, Args)]
pub struct EditContactArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub mobile: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long, value_name = "ID")]
    pub parent: Option<String>,
    #[arg(long)]
    pub company: Option<bool>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only list the children of this contact
    #[arg(long, value_name = "ID")]
    pub parent: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: String,
}

pub fn add_contact(ctx: &Context<'_>, args: AddContactArgs) -> Result<()> {
    let parent_id = match args.parent.as_deref() {
        Some(raw) => Some(parse_contact_id(raw)?),
        None => None,
    };

    let contact = ctx.store.contacts().create(
        now_utc(),
        &ctx.config.company,
        ContactNew {
            display_name: args.name,
            is_company: args.company,
            parent_id,
            country: args.country.and_then(normalize_optional_value),
            phone: args.phone.and_then(normalize_optional_value),
            mobile: args.mobile.and_then(normalize_optional_value),
        },
    )?;

    if ctx.json {
        print_json(&contact)?;
    } else {
        println!("created {} {}", contact.id, contact.display_name);
    }
    Ok(())
}

pub fn edit_contact(ctx: &Context<'_>, args: EditContactArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;

    let mut update = ContactUpdate {
        display_name: args.name,
        is_company: args.company,
        ..ContactUpdate::default()
    };
    if let Some(parent) = args.parent {
        update.parent_id = Some(match normalize_optional_value(parent) {
            Some(raw) => Some(parse_contact_id(&raw)?),
            None => None,
        });
    }
    if let Some(country) = args.country {
        update.country = Some(normalize_optional_value(country));
    }
    if let Some(phone) = args.phone {
        update.phone = Some(normalize_optional_value(phone));
    }
    if let Some(mobile) = args.mobile {
        update.mobile = Some(normalize_optional_value(mobile));
    }

    if update.is_empty() {
        return Err(invalid_input("no updates provided"));
    }

    let contact = ctx
        .store
        .contacts()
        .update(now_utc(), &ctx.config.company, id, update)?;
    if ctx.json {
        print_json(&contact)?;
    } else {
        println!("updated {} {}", contact.id, contact.display_name);
    }
    Ok(())
}

pub fn show_contact(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    let contacts = ctx.store.contacts();
    let contact = contacts
        .get(id)?
        .ok_or_else(|| not_found("contact not found"))?;

    let parent = match contact.parent_id {
        Some(parent_id) => contacts.get(parent_id)?.map(|parent| ParentDto {
            id: parent.id,
            display_name: parent.display_name,
        }),
        None => None,
    };
    let callerid_label = callerid_display_name(&LabelParts {
        display_name: contact.display_name.clone(),
        parent_display_name: parent.as_ref().map(|parent| parent.display_name.clone()),
    });

    let detail = ContactDetailDto {
        id: contact.id,
        display_name: contact.display_name,
        callerid_label,
        is_company: contact.is_company,
        parent,
        country: contact.country,
        phone: contact.phone,
        mobile: contact.mobile,
        created_at: contact.created_at,
        updated_at: contact.updated_at,
    };

    if ctx.json {
        print_json(&detail)?;
        return Ok(());
    }

    println!("id: {}", detail.id);
    println!("name: {}", detail.display_name);
    println!("caller id: {}", detail.callerid_label);
    if detail.is_company {
        println!("company: yes");
    }
    if let Some(parent) = detail.parent.as_ref() {
        println!("parent: {} {}", parent.id, parent.display_name);
    }
    if let Some(country) = detail.country.as_deref() {
        println!("country: {}", country);
    }
    if let Some(phone) = detail.phone.as_deref() {
        println!("phone: {}", phone);
    }
    if let Some(mobile) = detail.mobile.as_deref() {
        println!("mobile: {}", mobile);
    }
    println!(
        "created_at: {}",
        format_timestamp_datetime(detail.created_at)
    );
    println!(
        "updated_at: {}",
        format_timestamp_datetime(detail.updated_at)
    );

    Ok(())
}

pub fn list_contacts(ctx: &Context<'_>, args: ListArgs) -> Result<()> {
    let contacts = match args.parent.as_deref() {
        Some(raw) => ctx.store.contacts().list_children(parse_contact_id(raw)?)?,
        None => ctx.store.contacts().list_all()?,
    };

    let items: Vec<ContactListItemDto> = contacts
        .into_iter()
        .map(|contact| ContactListItemDto {
            id: contact.id,
            display_name: contact.display_name,
            is_company: contact.is_company,
            country: contact.country,
            phone: contact.phone,
            mobile: contact.mobile,
        })
        .collect();

    if ctx.json {
        print_json(&items)?;
        return Ok(());
    }

    if items.is_empty() {
        println!("no contacts");
        return Ok(());
    }

    for item in items {
        let phones = [item.phone.as_deref(), item.mobile.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        let phones = if phones.is_empty() {
            "-".to_string()
        } else {
            phones.join(" / ")
        };
        println!(
            "{}  {}  [{}]  {}",
            item.id,
            item.display_name,
            item.country.as_deref().unwrap_or("-"),
            phones
        );
    }

    Ok(())
}

pub fn delete_contact(ctx: &Context<'_>, args: DeleteArgs) -> Result<()> {
    let id = parse_contact_id(&args.id)?;
    ctx.store.contacts().delete(id)?;
    if ctx.json {
        print_json(&serde_json::json!({ "id": id }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}
