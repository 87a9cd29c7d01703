//! Starter form templates

use serde::Serialize;

use crate::domain::value_objects::{Field, FieldKind, FieldList};

#[derive(Debug, Serialize)]
pub struct TemplateField {
    pub kind: FieldKind,
    pub label: &'static str,
    pub required: bool,
    pub options: &'static [&'static str],
}

#[derive(Debug, Serialize)]
pub struct FormTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub fields: &'static [TemplateField],
}

const fn field(kind: FieldKind, label: &'static str, required: bool) -> TemplateField {
    TemplateField { kind, label, required, options: &[] }
}

const fn choice(
    kind: FieldKind,
    label: &'static str,
    required: bool,
    options: &'static [&'static str],
) -> TemplateField {
    TemplateField { kind, label, required, options }
}

static CATALOG: [FormTemplate; 4] = [
    FormTemplate {
        id: "contact",
        name: "Contact Form",
        description: "Collect names, email addresses and messages from visitors.",
        category: "General",
        fields: &[
            field(FieldKind::Text, "Full Name", true),
            field(FieldKind::Email, "Email Address", true),
            field(FieldKind::Phone, "Phone Number", false),
            field(FieldKind::Textarea, "Message", true),
        ],
    },
    FormTemplate {
        id: "feedback",
        name: "Customer Feedback",
        description: "Measure satisfaction and gather improvement ideas.",
        category: "Surveys",
        fields: &[
            field(FieldKind::Rating, "How satisfied are you?", true),
            choice(FieldKind::Radio, "Would you recommend us?", true, &["Yes", "Maybe", "No"]),
            field(FieldKind::Textarea, "What could we improve?", false),
            field(FieldKind::Email, "Email (optional)", false),
        ],
    },
    FormTemplate {
        id: "event-registration",
        name: "Event Registration",
        description: "Register attendees and their session preferences.",
        category: "Events",
        fields: &[
            field(FieldKind::Text, "Full Name", true),
            field(FieldKind::Email, "Email Address", true),
            field(FieldKind::Date, "Attendance Date", true),
            choice(FieldKind::Checkbox, "Sessions", false, &["Keynote", "Workshops", "Networking"]),
            choice(FieldKind::Select, "Dietary Requirements", false, &["None", "Vegetarian", "Vegan", "Gluten-free"]),
        ],
    },
    FormTemplate {
        id: "job-application",
        name: "Job Application",
        description: "Accept applications with a résumé upload and portfolio link.",
        category: "HR",
        fields: &[
            field(FieldKind::Text, "Full Name", true),
            field(FieldKind::Email, "Email Address", true),
            field(FieldKind::Phone, "Phone Number", true),
            field(FieldKind::Url, "Portfolio / LinkedIn", false),
            field(FieldKind::Number, "Years of Experience", false),
            field(FieldKind::File, "Résumé", true),
            field(FieldKind::Textarea, "Cover Letter", false),
        ],
    },
];

impl FormTemplate {
    pub fn catalog() -> &'static [FormTemplate] {
        &CATALOG
    }

    pub fn find(id: &str) -> Option<&'static FormTemplate> {
        CATALOG.iter().find(|t| t.id == id)
    }

    /// Materialize the template's fields with fresh ids
    pub fn build_fields(&self) -> FieldList {
        let mut fields = FieldList::new();
        for entry in self.fields {
            let mut field = Field::new(entry.kind).with_label(entry.label);
            field.required = entry.required;
            if !entry.options.is_empty() {
                field = field.with_options(entry.options.iter().copied());
            }
            fields.push(field);
        }
        fields
    }
}
