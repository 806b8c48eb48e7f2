use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::app::domain::form::{DOCUMENT_SECTIONS, FieldId, FormField, SIGNER_SECTION};

/// JSON body posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(rename = "formattedContract")]
    pub formatted_contract: String,
}

fn value_of(fields: &[FormField], id: FieldId) -> &str {
    fields
        .iter()
        .find(|f| f.id == id)
        .map(|f| f.value.as_str())
        .unwrap_or("")
}

/// Build the labelled plain-text summary. Values are taken as typed,
/// untrimmed, so the recipient sees exactly what was entered.
pub fn build_summary(fields: &[FormField], generated_at: DateTime<Utc>) -> String {
    let mut blocks = Vec::with_capacity(DOCUMENT_SECTIONS.len() + 1);
    for (i, (heading, ids)) in DOCUMENT_SECTIONS
        .iter()
        .chain(std::iter::once(&SIGNER_SECTION))
        .enumerate()
    {
        let mut lines = Vec::with_capacity(ids.len() + 1);
        // The project block opens the summary without a heading
        if i > 0 {
            lines.push(heading.to_uppercase());
        }
        for &id in ids.iter() {
            lines.push(format!("{}: {}", id.summary_label(), value_of(fields, id)));
        }
        blocks.push(lines.join("\n"));
    }

    let mut summary = blocks.join("\n\n");
    summary.push_str(&format!(
        "\nTimestamp: {}",
        generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));
    summary
}

pub fn build_payload(fields: &[FormField], generated_at: DateTime<Utc>) -> SubmissionPayload {
    SubmissionPayload {
        formatted_contract: build_summary(fields, generated_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn filled_fields() -> Vec<FormField> {
        FieldId::ALL
            .iter()
            .map(|&id| {
                let mut f = FormField::new(id);
                f.value = format!("<{}>", id.label());
                f
            })
            .collect()
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 10, 15, 30).unwrap()
    }

    #[test]
    fn test_summary_layout() {
        let summary = build_summary(&filled_fields(), at());
        let expected = "\
Project Title: <Project Title>
Project Address: <Project Address>
Quotation Reference: <Quotation Reference>
Quotation Date: <Quotation Date>

SCOPE OF WORKS
Scope of Works: <Scope of Works>
Materials Responsibility: <Materials Responsibility>
Drawings/Specifications: <Drawings/Specifications>

PROGRAMME
Anticipated Start Date: <Anticipated Start Date>
Anticipated Completion Date: <Anticipated Completion Date>
Estimated Duration: <Estimated Duration>
Programme Notes / Milestones: <Programme Notes / Milestones>

COMMERCIAL TERMS
Contract Price (ex. VAT): <Contract Price>
Pricing Basis: <Pricing Basis>
Payment Terms: <Payment Terms>
Retention: <Retention>

SPECIAL REQUIREMENTS
Special Requirements: <Special Requirements>

CLIENT SIGNATURE
Client Name: <Client Name>
Client Position: <Client Position>
Client Date: <Client Date>
Timestamp: 2024-06-03T10:15:30.000Z";
        assert_eq!(summary, expected);
    }

    #[test]
    fn test_summary_covers_every_field_once() {
        let summary = build_summary(&filled_fields(), at());
        for id in FieldId::ALL {
            let line = format!("{}: <{}>", id.summary_label(), id.label());
            assert_eq!(summary.matches(&line).count(), 1, "{line}");
        }
    }

    #[test]
    fn test_values_are_not_trimmed() {
        let mut fields = filled_fields();
        fields[0].value = "  Loft conversion ".to_string();
        let summary = build_summary(&fields, at());
        assert!(summary.starts_with("Project Title:   Loft conversion \n"));
    }

    #[test]
    fn test_empty_form_is_fully_labelled() {
        let fields: Vec<FormField> = FieldId::ALL.iter().map(|&id| FormField::new(id)).collect();
        let summary = build_summary(&fields, at());
        assert!(summary.contains("\nClient Name: \n"));
        assert_eq!(summary.lines().count(), 30);
    }

    #[test]
    fn test_payload_json_shape() {
        let payload = build_payload(&filled_fields(), at());
        let json = serde_json::to_value(&payload).unwrap();
        let text = json["formattedContract"].as_str().unwrap();
        assert!(text.ends_with("Timestamp: 2024-06-03T10:15:30.000Z"));
        assert_eq!(json.as_object().unwrap().len(), 1);
    }
}
