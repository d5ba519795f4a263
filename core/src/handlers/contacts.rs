use std::path::Path;

use anyhow::{anyhow, Context};
use serde_json::Value;

use crate::util::write_atomic_str;

fn name_field<'a>(contact: &'a Value, idx: usize, field: &str) -> anyhow::Result<&'a str> {
    contact
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("contact #{idx} has no string field `{field}`"))
}

/// Stable sort by (last_name, first_name). Every record is validated first so
/// a malformed entry fails the whole sort.
pub fn sort_contact_records(mut contacts: Vec<Value>) -> anyhow::Result<Vec<Value>> {
    for (idx, contact) in contacts.iter().enumerate() {
        name_field(contact, idx, "last_name")?;
        name_field(contact, idx, "first_name")?;
    }

    let key = |c: &Value| {
        (
            c["last_name"].as_str().unwrap_or_default().to_owned(),
            c["first_name"].as_str().unwrap_or_default().to_owned(),
        )
    };
    contacts.sort_by_cached_key(key);
    Ok(contacts)
}

pub fn sort_contacts(input: &Path, output: &Path) -> anyhow::Result<usize> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let contacts: Vec<Value> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse contacts in {}", input.display()))?;

    let sorted = sort_contact_records(contacts)?;
    let count = sorted.len();
    write_atomic_str(output, &serde_json::to_string(&sorted)?)?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn names(contacts: &[Value]) -> Vec<String> {
        contacts
            .iter()
            .map(|c| {
                format!(
                    "{} {}",
                    c["first_name"].as_str().unwrap(),
                    c["last_name"].as_str().unwrap()
                )
            })
            .collect()
    }

    #[test]
    fn sorts_by_last_then_first_name() {
        let contacts = vec![
            json!({"first_name": "Zoe", "last_name": "Adams"}),
            json!({"first_name": "Bob", "last_name": "Young"}),
            json!({"first_name": "Amy", "last_name": "Adams"}),
        ];
        let sorted = sort_contact_records(contacts).unwrap();
        assert_eq!(names(&sorted), vec!["Amy Adams", "Zoe Adams", "Bob Young"]);
    }

    #[test]
    fn sort_is_stable_and_idempotent() {
        let contacts = vec![
            json!({"first_name": "Amy", "last_name": "Adams", "email": "one@x.com"}),
            json!({"first_name": "Amy", "last_name": "Adams", "email": "two@x.com"}),
            json!({"first_name": "Al", "last_name": "Baker", "email": "three@x.com"}),
        ];
        let once = sort_contact_records(contacts.clone()).unwrap();
        assert_eq!(once[0]["email"], "one@x.com");
        assert_eq!(once[1]["email"], "two@x.com");

        let twice = sort_contact_records(once.clone()).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once, contacts);
    }

    #[test]
    fn malformed_record_fails() {
        let contacts = vec![
            json!({"first_name": "Amy", "last_name": "Adams"}),
            json!({"first_name": "NoLast"}),
        ];
        let err = sort_contact_records(contacts).unwrap_err();
        assert!(err.to_string().contains("contact #1"));
        assert!(err.to_string().contains("last_name"));
    }

    #[test]
    fn round_trips_through_files_and_keeps_extra_fields() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("contacts.json");
        let output = dir.path().join("contacts-sorted.json");
        std::fs::write(
            &input,
            r#"[{"first_name":"B","last_name":"Z","email":"b@z.com"},{"first_name":"A","last_name":"Y","email":"a@y.com"}]"#,
        )
        .unwrap();

        assert_eq!(sort_contacts(&input, &output).unwrap(), 2);
        let written: Vec<Value> =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written[0]["email"], "a@y.com");
        assert_eq!(written[1]["email"], "b@z.com");
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("contacts.json");
        std::fs::write(&input, "{not json").unwrap();
        let err = sort_contacts(&input, &dir.path().join("out.json")).unwrap_err();
        assert!(err.to_string().contains("failed to parse contacts"));
    }
}
