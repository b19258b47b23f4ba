use dialtone_core::{
    CallerIdResolver, CompanySettings, ContactId, PhoneModel, PhoneModelRegistry,
    PhoneRecordSource, CONTACT_KIND,
};
use dialtone_store::error::StoreError;
use dialtone_store::repo::ContactNew;
use dialtone_store::Store;

struct Fixture {
    store: Store,
    settings: CompanySettings,
    akretion: ContactId,
    pierre: ContactId,
    joel: ContactId,
}

fn fixture() -> Fixture {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");
    let settings = CompanySettings::for_country("FR")
        .expect("settings")
        .with_digits_to_match(10);
    let now = 1_700_000_000;

    let akretion = store
        .contacts()
        .create(
            now,
            &settings,
            ContactNew {
                display_name: "Akretion France".to_string(),
                is_company: true,
                country: Some("FR".to_string()),
                phone: Some("+33 4 78 32 32 32".to_string()),
                ..Default::default()
            },
        )
        .expect("create akretion");
    let pierre = store
        .contacts()
        .create(
            now,
            &settings,
            ContactNew {
                display_name: "Pierre Paillet".to_string(),
                country: Some("FR".to_string()),
                phone: Some("04-72-08-87-32".to_string()),
                mobile: Some("06.42.77.42.66".to_string()),
                ..Default::default()
            },
        )
        .expect("create pierre");
    let c2c = store
        .contacts()
        .create(
            now,
            &settings,
            ContactNew {
                display_name: "C2C".to_string(),
                is_company: true,
                country: Some("CH".to_string()),
                ..Default::default()
            },
        )
        .expect("create c2c");
    let joel = store
        .contacts()
        .create(
            now,
            &settings,
            ContactNew {
                display_name: "Joël Grand-Guillaume".to_string(),
                parent_id: Some(c2c.id),
                phone: Some("(0) 21 619 10 10".to_string()),
                mobile: Some("(0) 79 606 42 42".to_string()),
                ..Default::default()
            },
        )
        .expect("create joel");

    Fixture {
        store,
        settings,
        akretion: akretion.id,
        pierre: pierre.id,
        joel: joel.id,
    }
}

#[test]
fn registry_lists_contact_phone_fields() {
    let registry = PhoneModelRegistry::with_defaults();
    assert!(registry.models().iter().any(|m| m.kind == CONTACT_KIND));
    for model in registry.models() {
        assert!(!model.fields.is_empty());
    }
}

#[test]
fn lookup_with_and_without_trunk_prefix() {
    let fx = fixture();
    let registry = PhoneModelRegistry::with_defaults();
    let resolver = CallerIdResolver::new(&registry, &fx.settings);

    for inbound in ["0478323232", "478323232"] {
        let found = resolver
            .get_record_from_phone_number(&fx.store, inbound)
            .expect("lookup")
            .expect("match");
        assert_eq!(found.kind, "contact");
        assert_eq!(found.id, fx.akretion.to_string());
        assert_eq!(found.label, "Akretion France");
    }

    let missing = resolver
        .get_record_from_phone_number(&fx.store, "0499889988")
        .expect("lookup");
    assert!(missing.is_none());
}

#[test]
fn lookup_by_mobile_returns_name() {
    let fx = fixture();
    let registry = PhoneModelRegistry::with_defaults();
    let resolver = CallerIdResolver::new(&registry, &fx.settings);

    for inbound in ["0642774266", "642774266"] {
        let name = resolver
            .get_name_from_phone_number(&fx.store, inbound)
            .expect("lookup");
        assert_eq!(name.as_deref(), Some("Pierre Paillet"));
    }
    let found = resolver
        .get_record_from_phone_number(&fx.store, "04 72 08 87 32")
        .expect("lookup")
        .expect("match");
    assert_eq!(found.id, fx.pierre.to_string());
}

#[test]
fn lookup_of_foreign_number_uses_parent_label() {
    let fx = fixture();
    let registry = PhoneModelRegistry::with_defaults();
    let resolver = CallerIdResolver::new(&registry, &fx.settings);

    for inbound in ["0041216191010", "216191010", "+41796064242"] {
        let found = resolver
            .get_record_from_phone_number(&fx.store, inbound)
            .expect("lookup")
            .expect("match");
        assert_eq!(found.id, fx.joel.to_string(), "{inbound}");
        assert_eq!(found.label, "C2C, Joël Grand-Guillaume");
    }
}

#[test]
fn duplicate_numbers_resolve_to_lowest_id() {
    let fx = fixture();
    let second = fx
        .store
        .contacts()
        .create(
            1_700_000_100,
            &fx.settings,
            ContactNew {
                display_name: "Akretion Lyon".to_string(),
                phone: Some("04 78 32 32 32".to_string()),
                ..Default::default()
            },
        )
        .expect("create duplicate");
    let registry = PhoneModelRegistry::with_defaults();
    let resolver = CallerIdResolver::new(&registry, &fx.settings);

    let expected = std::cmp::min(fx.akretion, second.id).to_string();
    for _ in 0..3 {
        let found = resolver
            .get_record_from_phone_number(&fx.store, "0478323232")
            .expect("lookup")
            .expect("match");
        assert_eq!(found.id, expected);
    }
}

#[test]
fn store_rejects_kinds_it_does_not_hold() {
    let fx = fixture();
    let mut registry = PhoneModelRegistry::with_defaults();
    registry
        .register(PhoneModel::new("lead", &["phone"]))
        .expect("register");
    let resolver = CallerIdResolver::new(&registry, &fx.settings);

    let err = resolver
        .get_record_from_phone_number(&fx.store, "0478323232")
        .unwrap_err();
    assert!(matches!(err, StoreError::UnsupportedKind(kind) if kind == "lead"));

    let err = fx
        .store
        .phone_candidates(CONTACT_KIND, &["fax".to_string()], "3232")
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownPhoneField { .. }));
}

#[test]
fn phone_candidates_prefilter_on_suffix() {
    let fx = fixture();
    let fields = vec!["phone".to_string(), "mobile".to_string()];
    let values = fx
        .store
        .phone_candidates(CONTACT_KIND, &fields, "8323232")
        .expect("candidates");
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value, "+33 4 78 32 32 32");
    assert_eq!(values[0].field, "phone");
}
