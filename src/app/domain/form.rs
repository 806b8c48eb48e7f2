/// Placeholder shown in the frozen document for an empty optional field.
pub const NOT_PROVIDED: &str = "[Not provided]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    ProjectTitle,
    ProjectAddress,
    QuotationReference,
    QuotationDate,
    ScopeOfWorks,
    MaterialsResponsibility,
    DrawingsReference,
    StartDate,
    CompletionDate,
    EstimatedDuration,
    ProgrammeNotes,
    ContractPrice,
    PricingBasis,
    PaymentTerms,
    RetentionTerms,
    SpecialRequirements,
    ClientName,
    ClientPosition,
    ClientDate,
}

/// Whether a field takes part in validation, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Checked in declaration order before the signer fields.
    Required,
    /// Client name/position: checked after the required block, with a
    /// confirmation checkbox.
    Signer,
    Optional,
}

impl FieldId {
    /// Every editable field, in document order.
    pub const ALL: [FieldId; 19] = [
        FieldId::ProjectTitle,
        FieldId::ProjectAddress,
        FieldId::QuotationReference,
        FieldId::QuotationDate,
        FieldId::ScopeOfWorks,
        FieldId::MaterialsResponsibility,
        FieldId::DrawingsReference,
        FieldId::StartDate,
        FieldId::CompletionDate,
        FieldId::EstimatedDuration,
        FieldId::ProgrammeNotes,
        FieldId::ContractPrice,
        FieldId::PricingBasis,
        FieldId::PaymentTerms,
        FieldId::RetentionTerms,
        FieldId::SpecialRequirements,
        FieldId::ClientName,
        FieldId::ClientPosition,
        FieldId::ClientDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FieldId::ProjectTitle => "Project Title",
            FieldId::ProjectAddress => "Project Address",
            FieldId::QuotationReference => "Quotation Reference",
            FieldId::QuotationDate => "Quotation Date",
            FieldId::ScopeOfWorks => "Scope of Works",
            FieldId::MaterialsResponsibility => "Materials Responsibility",
            FieldId::DrawingsReference => "Drawings/Specifications",
            FieldId::StartDate => "Anticipated Start Date",
            FieldId::CompletionDate => "Anticipated Completion Date",
            FieldId::EstimatedDuration => "Estimated Duration",
            FieldId::ProgrammeNotes => "Programme Notes / Milestones",
            FieldId::ContractPrice => "Contract Price",
            FieldId::PricingBasis => "Pricing Basis",
            FieldId::PaymentTerms => "Payment Terms",
            FieldId::RetentionTerms => "Retention",
            FieldId::SpecialRequirements => "Special Requirements",
            FieldId::ClientName => "Client Name",
            FieldId::ClientPosition => "Client Position",
            FieldId::ClientDate => "Client Date",
        }
    }

    /// Label used in the outbound text summary. Differs from [`label`]
    /// only where the summary spells out extra detail.
    ///
    /// [`label`]: FieldId::label
    pub fn summary_label(self) -> &'static str {
        match self {
            FieldId::ContractPrice => "Contract Price (ex. VAT)",
            other => other.label(),
        }
    }

    pub fn requirement(self) -> Requirement {
        match self {
            FieldId::ClientName | FieldId::ClientPosition => Requirement::Signer,
            FieldId::ClientDate => Requirement::Optional,
            _ => Requirement::Required,
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(
            self,
            FieldId::ProjectAddress
                | FieldId::ScopeOfWorks
                | FieldId::MaterialsResponsibility
                | FieldId::ProgrammeNotes
                | FieldId::PaymentTerms
                | FieldId::SpecialRequirements
        )
    }

    /// Label reported when the field is filled but its confirmation
    /// checkbox is not ticked.
    pub fn confirmation_label(self) -> Option<&'static str> {
        match self {
            FieldId::ClientName => Some("Name Confirmation (checkbox)"),
            FieldId::ClientPosition => Some("Position Confirmation (checkbox)"),
            _ => None,
        }
    }
}

/// Headed groups of contract fields, in document order. The signer
/// fields are laid out separately with the signature pad.
pub const DOCUMENT_SECTIONS: [(&str, &[FieldId]); 5] = [
    (
        "Project",
        &[
            FieldId::ProjectTitle,
            FieldId::ProjectAddress,
            FieldId::QuotationReference,
            FieldId::QuotationDate,
        ],
    ),
    (
        "Scope of Works",
        &[
            FieldId::ScopeOfWorks,
            FieldId::MaterialsResponsibility,
            FieldId::DrawingsReference,
        ],
    ),
    (
        "Programme",
        &[
            FieldId::StartDate,
            FieldId::CompletionDate,
            FieldId::EstimatedDuration,
            FieldId::ProgrammeNotes,
        ],
    ),
    (
        "Commercial Terms",
        &[
            FieldId::ContractPrice,
            FieldId::PricingBasis,
            FieldId::PaymentTerms,
            FieldId::RetentionTerms,
        ],
    ),
    ("Special Requirements", &[FieldId::SpecialRequirements]),
];

/// The signer block that follows the contract sections.
pub const SIGNER_SECTION: (&str, &[FieldId]) = (
    "Client Signature",
    &[FieldId::ClientName, FieldId::ClientPosition, FieldId::ClientDate],
);

#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub id: FieldId,
    pub value: String,
    read_only: bool,
    confirmed: bool,
}

impl FormField {
    pub fn new(id: FieldId) -> Self {
        Self {
            id,
            value: String::new(),
            read_only: false,
            confirmed: false,
        }
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Record the confirmation checkbox state. A blank field cannot be
    /// confirmed, so a tick on it is refused. Confirmed and locked always
    /// go together.
    pub fn set_confirmed(&mut self, checked: bool) {
        self.confirmed = checked && !self.is_blank();
        self.read_only = self.confirmed;
    }

    /// Value shown once the form is frozen.
    pub fn display_value(&self) -> &str {
        if self.is_blank() { NOT_PROVIDED } else { self.trimmed() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_in_declaration_order() {
        let required: Vec<&str> = FieldId::ALL
            .iter()
            .filter(|f| f.requirement() == Requirement::Required)
            .map(|f| f.label())
            .collect();
        assert_eq!(required.len(), 16);
        assert_eq!(required.first(), Some(&"Project Title"));
        assert_eq!(required.last(), Some(&"Special Requirements"));
    }

    #[test]
    fn test_document_sections_cover_required_fields() {
        let grouped: Vec<FieldId> = DOCUMENT_SECTIONS.iter().flat_map(|(_, ids)| ids.iter().copied()).collect();
        let required: Vec<FieldId> = FieldId::ALL
            .iter()
            .copied()
            .filter(|f| f.requirement() == Requirement::Required)
            .collect();
        assert_eq!(grouped, required);
    }

    #[test]
    fn test_summary_label_override() {
        assert_eq!(FieldId::ContractPrice.summary_label(), "Contract Price (ex. VAT)");
        assert_eq!(FieldId::RetentionTerms.summary_label(), "Retention");
    }

    #[test]
    fn test_read_only_needs_value_and_checkbox() {
        let mut field = FormField::new(FieldId::ClientName);
        field.set_confirmed(true);
        assert!(!field.is_confirmed());
        assert!(!field.is_read_only());

        field.value = "  Jane Smith ".to_string();
        field.set_confirmed(true);
        assert!(field.is_read_only());

        field.set_confirmed(false);
        assert!(!field.is_confirmed());
        assert!(!field.is_read_only());
    }

    #[test]
    fn test_field_id_discriminant_matches_declaration_order() {
        for (i, id) in FieldId::ALL.iter().enumerate() {
            assert_eq!(*id as usize, i);
        }
    }

    #[test]
    fn test_display_value() {
        let mut field = FormField::new(FieldId::ClientDate);
        assert_eq!(field.display_value(), NOT_PROVIDED);
        field.value = "   ".to_string();
        assert_eq!(field.display_value(), NOT_PROVIDED);
        field.value = " 2024-06-03\n".to_string();
        assert_eq!(field.display_value(), "2024-06-03");
    }
}
