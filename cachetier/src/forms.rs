//! A small declarative form facility.
//!
//! Forms are a declared field list with per-field validators. Submitted
//! values arrive as a flat string map (the urlencoded body); validation
//! returns per-field translated messages so the page can re-render with
//! the errors attached to the originating field and the operator's input
//! preserved.
//!
//! Two forms share one route, discriminated by a hidden `action` field;
//! [`Form::is_submitted`] checks the discriminator.

use std::collections::BTreeMap;

use cachetier_core::Locale;

use crate::translate::Translator;

/// Submitted form values: a flat field-name to string map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    /// Create an empty value set.
    pub fn new() -> Self {
        FormValues::default()
    }

    /// Collect values from decoded urlencoded pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        FormValues(pairs.into_iter().collect())
    }

    /// Set a field value.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }

    /// Raw value of a field, if submitted.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Value of a field, treating whitespace-only input as absent.
    pub fn present(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Whether a checkbox-style field was ticked.
    pub fn is_checked(&self, name: &str) -> bool {
        matches!(self.present(name), Some("1" | "on" | "true"))
    }
}

/// A field-level validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    /// The field must carry a non-empty value.
    Required,
    /// A numeric field must be at least `minimum`.
    MinMax {
        /// Inclusive lower bound.
        minimum: i64,
    },
}

impl Validator {
    fn check(&self, value: Option<&str>, translator: &Translator, locale: &Locale) -> Option<String> {
        match self {
            Validator::Required => value
                .is_none()
                .then(|| translator.translate(locale, "error.validation.required")),
            Validator::MinMax { minimum } => {
                let raw = value?;
                match raw.parse::<i64>() {
                    Ok(number) if number >= *minimum => None,
                    Ok(_) => Some(translator.translate_with(
                        locale,
                        "error.validation.minimum",
                        &[("minimum", &minimum.to_string())],
                    )),
                    Err(_) => Some(translator.translate(locale, "error.validation.numeric")),
                }
            }
        }
    }
}

/// How a field is rendered and submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A select constrained to a declared option list.
    Select,
    /// A single confirmation checkbox.
    Checkbox,
}

/// One choice of a select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOption {
    /// Wire value of the option.
    pub value: String,
    /// Translation key of the option label.
    pub label_key: String,
}

/// A declared form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    kind: FieldKind,
    label_key: String,
    description_key: Option<String>,
    validators: Vec<Validator>,
    options: Vec<FieldOption>,
}

impl Field {
    /// Declare a select field with a curated option list.
    pub fn select(name: &str, label_key: &str, options: Vec<FieldOption>) -> Self {
        Field {
            name: name.to_string(),
            kind: FieldKind::Select,
            label_key: label_key.to_string(),
            description_key: None,
            validators: Vec::new(),
            options,
        }
    }

    /// Declare a confirmation checkbox.
    pub fn checkbox(name: &str, label_key: &str) -> Self {
        Field {
            name: name.to_string(),
            kind: FieldKind::Checkbox,
            label_key: label_key.to_string(),
            description_key: None,
            validators: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Attach a description translation key.
    pub fn description(mut self, key: &str) -> Self {
        self.description_key = Some(key.to_string());
        self
    }

    /// Attach a validator.
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Shorthand for [`Validator::Required`].
    pub fn required(self) -> Self {
        self.validator(Validator::Required)
    }

    /// The field name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Create an empty error set.
    pub fn new() -> Self {
        ValidationErrors::default()
    }

    /// Attach a message to a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages attached to a field.
    pub fn field(&self, name: &str) -> &[String] {
        self.errors.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any field carries an error.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over `(field, messages)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.errors
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

/// A declared form: an action discriminator plus a field list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    action: String,
    fields: Vec<Field>,
}

impl Form {
    /// Start declaring a form posting back with the given `action`.
    pub fn builder(action: &str) -> FormBuilder {
        FormBuilder {
            action: action.to_string(),
            fields: Vec::new(),
        }
    }

    /// The action discriminator.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// The declared fields.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Whether this submission targets this form.
    pub fn is_submitted(&self, values: &FormValues) -> bool {
        values.get("action") == Some(self.action.as_str())
    }

    /// Run the declared validators against a submission.
    pub fn validate(
        &self,
        values: &FormValues,
        translator: &Translator,
        locale: &Locale,
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for field in &self.fields {
            let value = values.present(&field.name);
            for validator in &field.validators {
                if let Some(message) = validator.check(value, translator, locale) {
                    errors.add(&field.name, message);
                }
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Render the form into a displayable view, preserving submitted
    /// input and attaching per-field errors.
    pub fn view(
        &self,
        values: &FormValues,
        errors: &ValidationErrors,
        translator: &Translator,
        locale: &Locale,
    ) -> FormView {
        let fields = self
            .fields
            .iter()
            .map(|field| {
                let value = values.get(&field.name).unwrap_or("").to_string();
                FieldView {
                    name: field.name.clone(),
                    kind: field.kind,
                    label: translator.translate(locale, &field.label_key),
                    description: field
                        .description_key
                        .as_deref()
                        .map(|key| translator.translate(locale, key)),
                    options: field
                        .options
                        .iter()
                        .map(|option| OptionView {
                            selected: option.value == value,
                            value: option.value.clone(),
                            label: translator.translate(locale, &option.label_key),
                        })
                        .collect(),
                    checked: field.kind == FieldKind::Checkbox && values.is_checked(&field.name),
                    value,
                    errors: errors.field(&field.name).to_vec(),
                }
            })
            .collect();
        FormView {
            action: self.action.clone(),
            fields,
        }
    }
}

/// Builder for [`Form`].
pub struct FormBuilder {
    action: String,
    fields: Vec<Field>,
}

impl FormBuilder {
    /// Add a field.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Finish the declaration.
    pub fn build(self) -> Form {
        Form {
            action: self.action,
            fields: self.fields,
        }
    }
}

/// A rendered form, ready for templating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    /// The action discriminator, emitted as a hidden field.
    pub action: String,
    /// The rendered fields, in declaration order.
    pub fields: Vec<FieldView>,
}

/// A rendered field with translated labels and attached errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Field name.
    pub name: String,
    /// Rendering kind.
    pub kind: FieldKind,
    /// Translated label.
    pub label: String,
    /// Translated description, if declared.
    pub description: Option<String>,
    /// Preserved submitted value.
    pub value: String,
    /// Whether a checkbox field is ticked.
    pub checked: bool,
    /// Select options with the submitted one marked.
    pub options: Vec<OptionView>,
    /// Validation messages for this field.
    pub errors: Vec<String>,
}

/// A rendered select option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    /// Wire value.
    pub value: String,
    /// Translated label.
    pub label: String,
    /// Whether the submitted value matches.
    pub selected: bool,
}
