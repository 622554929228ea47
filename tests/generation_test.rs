use std::io::Write;
use tyche::error::TycheError;
use tyche::faker::{generate_instances, FakeProvider};
use tyche::schema::loader;
use tyche::schema::SchemaHandle;

const USER_DOCUMENT: &str = r#"
enums:
  Role: [admin, editor, viewer]

schemas:
  User:
    fields:
      - name: id
        type: int
      - name: name
        type: str
      - name: email
        type: str
      - name: is_active
        type: bool
      - name: role
        type: Role
      - name: rating
        type: float | none
        ge: 1
        le: 5
      - name: tags
        type: list[str]
        min_length: 2
      - name: home_address
        type: Address

  Address:
    fields:
      - name: city
        type: str
      - name: zip_code
        type: str
"#;

fn resolve_user() -> (tempfile::NamedTempFile, SchemaHandle) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(USER_DOCUMENT.as_bytes()).unwrap();
    let reference = format!("{}:User", file.path().display());
    let handle = loader::resolve(&reference).unwrap();
    (file, handle)
}

#[test]
fn test_determinism_across_independent_runs() {
    let (_file, handle) = resolve_user();

    let mut first = FakeProvider::new(None, Some(1234)).unwrap();
    let mut second = FakeProvider::new(None, Some(1234)).unwrap();

    let batch_a = generate_instances(&handle, 20, &mut first).unwrap();
    let batch_b = generate_instances(&handle, 20, &mut second).unwrap();

    assert_eq!(
        serde_json::to_string(&batch_a).unwrap(),
        serde_json::to_string(&batch_b).unwrap()
    );
}

#[test]
fn test_seed_sensitivity() {
    let (_file, handle) = resolve_user();

    let mut first = FakeProvider::new(None, Some(1)).unwrap();
    let mut second = FakeProvider::new(None, Some(2)).unwrap();

    let batch_a = generate_instances(&handle, 5, &mut first).unwrap();
    let batch_b = generate_instances(&handle, 5, &mut second).unwrap();

    assert_ne!(batch_a, batch_b);
}

#[test]
fn test_field_completeness() {
    let (_file, handle) = resolve_user();
    let mut provider = FakeProvider::new(None, Some(7)).unwrap();

    let declared: Vec<&str> = handle.fields().iter().map(|f| f.name.as_str()).collect();
    for instance in generate_instances(&handle, 50, &mut provider).unwrap() {
        let keys: Vec<&str> = instance
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, declared);
    }
}

#[test]
fn test_constraints_hold_over_many_samples() {
    let (_file, handle) = resolve_user();
    let mut provider = FakeProvider::new(None, Some(99)).unwrap();

    let mut saw_null_rating = false;
    let mut saw_real_rating = false;

    for instance in generate_instances(&handle, 1000, &mut provider).unwrap() {
        let rating = &instance["rating"];
        if rating.is_null() {
            saw_null_rating = true;
        } else {
            let value = rating.as_f64().unwrap();
            assert!((1.0..=5.0).contains(&value), "rating {value} outside [1, 5]");
            saw_real_rating = true;
        }

        let tags = instance["tags"].as_array().unwrap();
        assert!(tags.len() >= 2, "tags below the declared minimum");
    }

    assert!(saw_null_rating && saw_real_rating);
}

#[test]
fn test_enum_coverage() {
    let (_file, handle) = resolve_user();
    let mut provider = FakeProvider::new(None, Some(31)).unwrap();

    let mut seen = std::collections::HashSet::new();
    for instance in generate_instances(&handle, 40, &mut provider).unwrap() {
        seen.insert(instance["role"].as_str().unwrap().to_string());
    }
    assert_eq!(seen.len(), 3, "every role should appear: {seen:?}");
}

#[test]
fn test_semantic_names_inside_nested_schema() {
    let (_file, handle) = resolve_user();
    let mut provider = FakeProvider::new(None, Some(8)).unwrap();

    let instances = generate_instances(&handle, 10, &mut provider).unwrap();
    for instance in &instances {
        let email = instance["email"].as_str().unwrap();
        assert!(email.contains('@'), "expected an email, got {email}");
        assert!(instance["home_address"]["zip_code"].is_string());
    }
}

#[test]
fn test_loader_error_kinds() {
    assert!(matches!(
        loader::resolve("missing-separator"),
        Err(TycheError::InvalidReference(_))
    ));
    assert!(matches!(
        loader::resolve("no/such/file.yaml:User"),
        Err(TycheError::DocumentNotFound { .. })
    ));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(USER_DOCUMENT.as_bytes()).unwrap();
    let reference = format!("{}:Ghost", file.path().display());
    assert!(matches!(
        loader::resolve(&reference),
        Err(TycheError::SchemaNotFound { .. })
    ));
}

#[test]
fn test_unknown_locale_fails_before_generation() {
    assert!(matches!(
        FakeProvider::new(Some("tlh_KLI"), Some(1)),
        Err(TycheError::UnknownLocale(_))
    ));
}
