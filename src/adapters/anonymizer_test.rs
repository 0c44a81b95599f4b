use super::anonymizer::DataAnonymizer;
use serde_json::json;

#[test]
fn test_structure_preserved() {
    let data = json!({
        "user": {
            "email": "real.person@corp-internal.com",
            "age": 42,
            "active": true,
            "score": null
        },
        "orders": [{"total": 10.5}]
    });

    let mut anonymizer = DataAnonymizer::new();
    let result = anonymizer.anonymize(&data);

    let user = result["user"].as_object().unwrap();
    assert_eq!(user.len(), 4);
    assert_eq!(result["user"]["age"], json!(42));
    assert_eq!(result["user"]["active"], json!(true));
    assert_eq!(result["user"]["score"], json!(null));
    assert_eq!(result["orders"][0]["total"], json!(10.5));
}

#[test]
fn test_sensitive_strings_replaced() {
    let data = json!({
        "email": "real.person@corp-internal.com",
        "first_name": "Xq1-NotAName",
        "phone": "+00 000 000 000"
    });

    let mut anonymizer = DataAnonymizer::new();
    let result = anonymizer.anonymize(&data);

    assert_ne!(result["email"], data["email"]);
    assert_ne!(result["first_name"], data["first_name"]);
    assert_ne!(result["phone"], data["phone"]);
    assert!(result["email"].as_str().unwrap().contains('@'));
}

#[test]
fn test_blank_strings_pass_through() {
    let data = json!({"email": "   ", "comment": ""});

    let mut anonymizer = DataAnonymizer::new();
    let result = anonymizer.anonymize(&data);

    assert_eq!(result, data);
}

#[test]
fn test_unclassified_strings_get_generic_filler() {
    let data = json!({"shoppingcart": "abc"});

    let mut anonymizer = DataAnonymizer::new();
    let result = anonymizer.anonymize(&data);

    // replaced with filler, still a non-empty string
    let value = result["shoppingcart"].as_str().unwrap();
    assert!(!value.is_empty());
}

#[test]
fn test_repeated_values_stay_in_pool() {
    // pools are finite, so many draws for one kind repeat values
    let entries: Vec<_> = (0..300)
        .map(|i| json!({"email": format!("person{}@corp-internal.com", i)}))
        .collect();
    let data = json!(entries);

    let mut anonymizer = DataAnonymizer::new();
    let result = anonymizer.anonymize(&data);

    let mut distinct: Vec<String> = result
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["email"].as_str().unwrap().to_string())
        .collect();
    distinct.sort();
    distinct.dedup();
    assert!(distinct.len() <= 100);
}

#[test]
fn test_sensitive_fields_reports_paths() {
    let data = json!({
        "user": {
            "email": "a@b.c",
            "age": 30,
            "address": {"city": "Paris"}
        },
        "entries": [{"phone": "0123"}]
    });

    let anonymizer = DataAnonymizer::new();
    let fields = anonymizer.sensitive_fields(&data);

    assert!(fields.contains(&"user.email".to_string()));
    assert!(fields.contains(&"user.address.city".to_string()));
    assert!(fields.contains(&"entries[0].phone".to_string()));
    assert!(!fields.iter().any(|f| f.ends_with("age")));
}

#[test]
fn test_sensitive_fields_ignores_non_string_values() {
    let data = json!({"email": 5, "phone": null});

    let anonymizer = DataAnonymizer::new();
    let fields = anonymizer.sensitive_fields(&data);

    assert!(fields.is_empty());
}

#[test]
fn test_sensitive_fields_empty_document() {
    let anonymizer = DataAnonymizer::new();
    assert!(anonymizer.sensitive_fields(&json!({})).is_empty());
}
