use crate::phone::{find_candidates, normalize_inbound, suffix_key};
use crate::registry::{LabelParts, PhoneModel, PhoneModelRegistry};
use crate::settings::CompanySettings;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One stored phone value of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneValue {
    pub id: String,
    pub field: String,
    pub value: String,
}

/// Read side of the record store, as needed by caller-ID lookups.
pub trait PhoneRecordSource {
    type Error;

    /// Phone values of `kind` stored in `fields`. May pre-filter on the digits
    /// ending with `suffix`; every returned value is checked again.
    fn phone_candidates(
        &self,
        kind: &str,
        fields: &[String],
        suffix: &str,
    ) -> Result<Vec<PhoneValue>, Self::Error>;

    fn label_parts(&self, kind: &str, id: &str) -> Result<Option<LabelParts>, Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerMatch {
    pub kind: String,
    pub id: String,
    pub label: String,
}

pub struct CallerIdResolver<'a> {
    registry: &'a PhoneModelRegistry,
    settings: &'a CompanySettings,
}

impl<'a> CallerIdResolver<'a> {
    pub fn new(registry: &'a PhoneModelRegistry, settings: &'a CompanySettings) -> Self {
        Self { registry, settings }
    }

    /// Best record for an inbound caller number, `None` for an unknown caller.
    ///
    /// Kinds are scanned in registry order; within a kind the lowest record id
    /// wins.
    pub fn get_record_from_phone_number<S>(
        &self,
        source: &S,
        inbound: &str,
    ) -> Result<Option<CallerMatch>, S::Error>
    where
        S: PhoneRecordSource + ?Sized,
    {
        let Some(digits) = normalize_inbound(inbound, self.settings.country) else {
            debug!(inbound, "inbound number has no digits");
            return Ok(None);
        };
        let n = self.settings.digits_to_match_from_end;
        let key = suffix_key(&digits, n);

        let mut candidates: Vec<(&PhoneModel, String)> = Vec::new();
        for model in self.registry.models() {
            let pool = source.phone_candidates(&model.kind, &model.fields, key)?;
            let found = find_candidates(
                &digits,
                n,
                pool.into_iter().map(|value| (value.id, value.value)),
            );
            candidates.extend(found.into_iter().map(|id| (model, id)));
        }

        if candidates.is_empty() {
            debug!(inbound, key, "no record matches inbound number");
            return Ok(None);
        }
        let total = candidates.len();

        // A candidate may vanish between the two reads; fall through to the next.
        for (model, id) in candidates {
            let Some(parts) = source.label_parts(&model.kind, &id)? else {
                debug!(kind = %model.kind, id = %id, "matched record has no label");
                continue;
            };
            if total > 1 {
                warn!(
                    inbound,
                    candidates = total,
                    kind = %model.kind,
                    id = %id,
                    "several records match inbound number, using the first"
                );
            }
            return Ok(Some(CallerMatch {
                kind: model.kind.clone(),
                label: (model.display_name)(&parts),
                id,
            }));
        }
        Ok(None)
    }

    pub fn get_name_from_phone_number<S>(
        &self,
        source: &S,
        inbound: &str,
    ) -> Result<Option<String>, S::Error>
    where
        S: PhoneRecordSource + ?Sized,
    {
        Ok(self
            .get_record_from_phone_number(source, inbound)?
            .map(|found| found.label))
    }
}

#[cfg(test)]
mod tests {
    use super::{CallerIdResolver, PhoneRecordSource, PhoneValue};
    use crate::registry::{LabelParts, PhoneModel, PhoneModelRegistry, CONTACT_KIND};
    use crate::settings::CompanySettings;
    use std::convert::Infallible;

    struct Row {
        kind: &'static str,
        id: &'static str,
        name: &'static str,
        parent: Option<&'static str>,
        phone: Option<&'static str>,
        mobile: Option<&'static str>,
    }

    struct MemorySource {
        rows: Vec<Row>,
    }

    impl PhoneRecordSource for MemorySource {
        type Error = Infallible;

        fn phone_candidates(
            &self,
            kind: &str,
            fields: &[String],
            _suffix: &str,
        ) -> Result<Vec<PhoneValue>, Infallible> {
            let mut out = Vec::new();
            // Reverse insertion order so ordering comes from the resolver.
            for row in self.rows.iter().rev().filter(|row| row.kind == kind) {
                for field in fields {
                    let value = match field.as_str() {
                        "phone" => row.phone,
                        "mobile" => row.mobile,
                        _ => None,
                    };
                    if let Some(value) = value {
                        out.push(PhoneValue {
                            id: row.id.to_string(),
                            field: field.clone(),
                            value: value.to_string(),
                        });
                    }
                }
            }
            Ok(out)
        }

        fn label_parts(&self, kind: &str, id: &str) -> Result<Option<LabelParts>, Infallible> {
            Ok(self
                .rows
                .iter()
                .find(|row| row.kind == kind && row.id == id)
                .map(|row| LabelParts {
                    display_name: row.name.to_string(),
                    parent_display_name: row.parent.map(str::to_string),
                }))
        }
    }

    fn row(
        kind: &'static str,
        id: &'static str,
        name: &'static str,
        phone: Option<&'static str>,
        mobile: Option<&'static str>,
    ) -> Row {
        Row {
            kind,
            id,
            name,
            parent: None,
            phone,
            mobile,
        }
    }

    fn source() -> MemorySource {
        let mut child = row(
            CONTACT_KIND,
            "c3",
            "Joël Grand-Guillaume",
            Some("+41 21 619 10 10"),
            Some("+41 79 606 42 42"),
        );
        child.parent = Some("C2C");
        MemorySource {
            rows: vec![
                row(
                    CONTACT_KIND,
                    "c1",
                    "Akretion France",
                    Some("+33 4 78 32 32 32"),
                    None,
                ),
                row(
                    CONTACT_KIND,
                    "c2",
                    "Pierre Paillet",
                    Some("+33 4 72 08 87 32"),
                    Some("+33 6 42 77 42 66"),
                ),
                child,
            ],
        }
    }

    fn settings() -> CompanySettings {
        CompanySettings::for_country("FR")
            .expect("settings")
            .with_digits_to_match(10)
    }

    #[test]
    fn resolves_with_and_without_trunk_prefix() {
        let registry = PhoneModelRegistry::with_defaults();
        let settings = settings();
        let resolver = CallerIdResolver::new(&registry, &settings);
        let source = source();

        for inbound in ["0478323232", "478323232"] {
            let found = resolver
                .get_record_from_phone_number(&source, inbound)
                .unwrap()
                .expect("match");
            assert_eq!(found.kind, "contact");
            assert_eq!(found.id, "c1");
            assert_eq!(found.label, "Akretion France");
        }
    }

    #[test]
    fn unknown_caller_is_none() {
        let registry = PhoneModelRegistry::with_defaults();
        let settings = settings();
        let resolver = CallerIdResolver::new(&registry, &settings);
        let found = resolver
            .get_record_from_phone_number(&source(), "0499889988")
            .unwrap();
        assert!(found.is_none());
        let found = resolver
            .get_record_from_phone_number(&source(), "anonymous")
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn label_includes_parent_for_mobile_and_phone() {
        let registry = PhoneModelRegistry::with_defaults();
        let settings = settings();
        let resolver = CallerIdResolver::new(&registry, &settings);
        for inbound in ["0041216191010", "216191010", "+41 79 606 42 42"] {
            let name = resolver
                .get_name_from_phone_number(&source(), inbound)
                .unwrap();
            assert_eq!(name.as_deref(), Some("C2C, Joël Grand-Guillaume"), "{inbound}");
        }
    }

    #[test]
    fn mobile_field_is_searched() {
        let registry = PhoneModelRegistry::with_defaults();
        let settings = settings();
        let resolver = CallerIdResolver::new(&registry, &settings);
        for inbound in ["0642774266", "642774266"] {
            let name = resolver
                .get_name_from_phone_number(&source(), inbound)
                .unwrap();
            assert_eq!(name.as_deref(), Some("Pierre Paillet"));
        }
    }

    #[test]
    fn ties_break_by_registry_order_then_id() {
        let mut registry = PhoneModelRegistry::with_defaults();
        registry
            .register(PhoneModel::new("lead", &["phone"]))
            .expect("register");
        let settings = settings();
        let resolver = CallerIdResolver::new(&registry, &settings);

        let source = MemorySource {
            rows: vec![
                row("lead", "a0", "Lead", Some("+33 5 55 55 55 55"), None),
                row(CONTACT_KIND, "b2", "Second", Some("+33 5 55 55 55 55"), None),
                row(CONTACT_KIND, "b1", "First", None, Some("+33 5 55 55 55 55")),
            ],
        };
        let found = resolver
            .get_record_from_phone_number(&source, "0555555555")
            .unwrap()
            .expect("match");
        assert_eq!(found.id, "b1");
        assert_eq!(found.label, "First");
    }

    #[test]
    fn candidate_without_label_falls_through_to_next() {
        struct Vanishing(MemorySource);

        impl PhoneRecordSource for Vanishing {
            type Error = Infallible;

            fn phone_candidates(
                &self,
                kind: &str,
                fields: &[String],
                suffix: &str,
            ) -> Result<Vec<PhoneValue>, Infallible> {
                let mut out = self.0.phone_candidates(kind, fields, suffix)?;
                out.push(PhoneValue {
                    id: "a0".to_string(),
                    field: "phone".to_string(),
                    value: "+33 5 55 55 55 55".to_string(),
                });
                Ok(out)
            }

            fn label_parts(&self, kind: &str, id: &str) -> Result<Option<LabelParts>, Infallible> {
                self.0.label_parts(kind, id)
            }
        }

        let registry = PhoneModelRegistry::with_defaults();
        let settings = settings();
        let resolver = CallerIdResolver::new(&registry, &settings);
        let source = Vanishing(MemorySource {
            rows: vec![row(CONTACT_KIND, "b1", "Still here", Some("+33 5 55 55 55 55"), None)],
        });
        let found = resolver
            .get_record_from_phone_number(&source, "0555555555")
            .unwrap()
            .expect("match");
        assert_eq!(found.id, "b1");
        assert_eq!(found.label, "Still here");
    }

    #[test]
    fn later_kinds_are_used_when_earlier_ones_miss() {
        let mut registry = PhoneModelRegistry::with_defaults();
        registry
            .register(
                PhoneModel::new("lead", &["phone"]).with_display_name(|parts| {
                    format!("Lead: {}", parts.display_name)
                }),
            )
            .expect("register");
        let settings = settings();
        let resolver = CallerIdResolver::new(&registry, &settings);
        let source = MemorySource {
            rows: vec![row("lead", "l1", "Prospect", Some("+32 455 78 99 88"), None)],
        };
        let found = resolver
            .get_record_from_phone_number(&source, "0032455789988")
            .unwrap()
            .expect("match");
        assert_eq!(found.kind, "lead");
        assert_eq!(found.label, "Lead: Prospect");
    }
}
