//! Inventory CSV rendering (RFC 4180: CRLF line endings, fields quoted only
//! when they contain a comma, quote, CR, or LF; embedded quotes doubled).

use airt_registry::SystemRecord;

/// Inventory columns, in order.
pub const INVENTORY_COLUMNS: [&str; 11] = [
    "system_id",
    "name",
    "domain",
    "ai_type",
    "owner_role",
    "decision_criticality",
    "automation_level",
    "data_sensitivity",
    "deployment_mode",
    "external_dependencies",
    "updated_at",
];

/// Separator for the dependency list inside one cell.
pub const DEPENDENCY_SEPARATOR: &str = "|";

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

fn push_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str("\r\n");
}

/// Render systems as CSV, header first, rows in input order.
pub fn render_inventory(systems: &[SystemRecord]) -> String {
    let mut out = String::new();
    push_row(&mut out, INVENTORY_COLUMNS);
    for sys in systems {
        let id = sys.system_id.to_string();
        let deps = sys.external_dependencies.join(DEPENDENCY_SEPARATOR);
        let updated = sys.updated_at.to_string();
        push_row(
            &mut out,
            [
                id.as_str(),
                sys.name.as_str(),
                sys.domain.as_str(),
                sys.ai_type.as_str(),
                sys.owner_role.as_str(),
                sys.decision_criticality.as_str(),
                sys.automation_level.as_str(),
                sys.data_sensitivity.as_str(),
                sys.deployment_mode.as_str(),
                deps.as_str(),
                updated.as_str(),
            ],
        );
    }
    out
}

/// Number of records after the header in a rendered inventory. Line breaks
/// inside quoted fields do not end a record. `None` when the text is not
/// CRLF-terminated or a quote is left open.
pub fn count_data_rows(csv: &str) -> Option<u64> {
    let mut records = 0u64;
    let mut quoted = false;
    let mut chars = csv.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => quoted = !quoted,
            '\r' if !quoted && chars.peek() == Some(&'\n') => {
                chars.next();
                records += 1;
            }
            _ => {}
        }
    }
    if quoted || !csv.ends_with("\r\n") {
        return None;
    }
    records.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use airt_core::{SystemId, Timestamp};

    fn system(name: &str, deps: &[&str]) -> SystemRecord {
        SystemRecord {
            system_id: fixed_id("3f0c9a52-7d1e-4c1b-9a51-2f4c8d1e0b77"),
            name: name.into(),
            description: String::new(),
            domain: "Marketing".into(),
            ai_type: "LLM".into(),
            owner_role: "Marketing Team".into(),
            deployment_mode: "HUMAN_IN_LOOP".into(),
            decision_criticality: "MEDIUM".into(),
            automation_level: "HUMAN_APPROVAL".into(),
            data_sensitivity: "INTERNAL".into(),
            external_dependencies: deps.iter().map(|d| d.to_string()).collect(),
            updated_at: Timestamp::parse("2026-01-10T08:00:00Z").unwrap(),
        }
    }

    fn fixed_id(s: &str) -> SystemId {
        serde_json::from_value(serde_json::Value::String(s.into())).unwrap()
    }

    #[test]
    fn header_only_for_empty_inventory() {
        assert_eq!(
            render_inventory(&[]),
            "system_id,name,domain,ai_type,owner_role,decision_criticality,automation_level,data_sensitivity,deployment_mode,external_dependencies,updated_at\r\n"
        );
    }

    #[test]
    fn row_layout_and_dependency_join() {
        let csv = render_inventory(&[system("Copy Generator", &["OpenAI API (vendor)", "CMS"])]);
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "3f0c9a52-7d1e-4c1b-9a51-2f4c8d1e0b77,Copy Generator,Marketing,LLM,Marketing Team,MEDIUM,HUMAN_APPROVAL,INTERNAL,HUMAN_IN_LOOP,OpenAI API (vendor)|CMS,2026-01-10T08:00:00Z"
        );
    }

    #[test]
    fn special_characters_are_quoted() {
        let csv = render_inventory(&[system("Assist, \"v2\"\nbeta", &[])]);
        assert!(csv.contains(",\"Assist, \"\"v2\"\"\nbeta\","));
    }

    #[test]
    fn data_rows_ignore_quoted_line_breaks() {
        let systems = vec![
            system("Assist, \"v2\"\r\nbeta", &[]),
            system("Copy Generator", &["OpenAI API (vendor)"]),
        ];
        assert_eq!(count_data_rows(&render_inventory(&systems)), Some(2));
        assert_eq!(count_data_rows(&render_inventory(&[])), Some(0));
    }

    #[test]
    fn data_rows_reject_malformed_text() {
        assert_eq!(count_data_rows(""), None);
        assert_eq!(count_data_rows("system_id\r\nabc"), None);
        assert_eq!(count_data_rows("system_id\r\n\"open\r\n"), None);
    }
}
