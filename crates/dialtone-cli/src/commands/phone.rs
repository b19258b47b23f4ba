use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use anyhow::Result;
use clap::{ArgAction, Args};
use dialtone_config::AppConfig;
use dialtone_core::dto::PhoneModelDto;
use dialtone_core::phone::{parse_phone, to_dial_number_with};
use dialtone_core::settings::resolve_country;
use dialtone_core::{CallerIdResolver, PhoneModelRegistry};
use serde::Serialize;

#[derive(Debug, Args)]
pub struct FormatArgs {
    pub number: String,
    /// Country of the number when it carries no international prefix
    #[arg(long)]
    pub country: Option<String>,
}

#[derive(Debug, Args)]
pub struct DialArgs {
    pub number: String,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Number as presented by the telephony system
    pub number: String,
    /// Print only the caller label
    #[arg(long, action = ArgAction::SetTrue)]
    pub name_only: bool,
}

#[derive(Debug, Serialize)]
struct FormattedDto {
    input: String,
    formatted: String,
    country: String,
}

#[derive(Debug, Serialize)]
struct DialDto {
    input: String,
    dial: String,
}

pub fn format(config: &AppConfig, json: bool, args: FormatArgs) -> Result<()> {
    let declared = match args.country.as_deref() {
        Some(code) => Some(resolve_country(code)?),
        None => None,
    };
    let parsed = parse_phone(&args.number, declared, config.company.country)?;
    let formatted = parsed.canonical();
    if json {
        return print_json(&FormattedDto {
            input: args.number,
            formatted,
            country: parsed.country.code.to_string(),
        });
    }
    println!("{}", formatted);
    Ok(())
}

pub fn dial(config: &AppConfig, json: bool, args: DialArgs) -> Result<()> {
    let Some(local) = config.company.country else {
        return Err(invalid_input(
            "company_country must be configured to compute dial strings",
        ));
    };
    let dial = to_dial_number_with(&args.number, local, &config.company.dial)?;
    if json {
        return print_json(&DialDto {
            input: args.number,
            dial,
        });
    }
    println!("{}", dial);
    Ok(())
}

pub fn lookup(ctx: &Context<'_>, args: LookupArgs) -> Result<()> {
    let resolver = CallerIdResolver::new(ctx.registry, &ctx.config.company);
    let found = resolver.get_record_from_phone_number(ctx.store, &args.number)?;

    if ctx.json {
        return print_json(&found);
    }
    match found {
        Some(found) if args.name_only => println!("{}", found.label),
        Some(found) => println!("{}  {}  {}", found.kind, found.id, found.label),
        None => println!("unknown caller"),
    }
    Ok(())
}

pub fn list_models(registry: &PhoneModelRegistry, json: bool) -> Result<()> {
    let models: Vec<PhoneModelDto> = registry.models().iter().map(PhoneModelDto::from).collect();
    if json {
        return print_json(&models);
    }
    for model in models {
        println!("{}  {}", model.kind, model.fields.join(", "));
    }
    Ok(())
}

