use crate::domain::model::{DeveloperDraft, FormField, NewDeveloper};
use std::collections::BTreeMap;

pub const NAME_MIN_CHARS: usize = 2;

/// Per-field error messages produced by [`validate_draft`]. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<FormField, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn remove(&mut self, field: FormField) -> Option<String> {
        self.errors.remove(&field)
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

/// 檢查所有欄位，每條規則獨立執行，可同時回報多個錯誤
pub fn validate_draft(draft: &DeveloperDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let name = draft.name.trim();
    if name.is_empty() {
        errors.insert(FormField::Name, "Name is required");
    } else if name.chars().count() < NAME_MIN_CHARS {
        errors.insert(
            FormField::Name,
            format!("Name must be at least {} characters", NAME_MIN_CHARS),
        );
    }

    if draft.tech_stack.trim().is_empty() {
        errors.insert(FormField::TechStack, "Tech stack is required");
    } else if split_tech_stack(&draft.tech_stack).is_empty() {
        errors.insert(
            FormField::TechStack,
            "Tech stack must list at least one technology",
        );
    }

    let experience = draft.experience.trim();
    if experience.is_empty() {
        errors.insert(FormField::Experience, "Experience is required");
    } else if parse_experience(experience).is_none() {
        errors.insert(
            FormField::Experience,
            "Experience must be a non-negative number",
        );
    }

    errors
}

/// Converts a raw draft into a typed developer, or returns every field error.
pub fn parse_draft(draft: &DeveloperDraft) -> Result<NewDeveloper, FieldErrors> {
    let errors = validate_draft(draft);
    if !errors.is_empty() {
        return Err(errors);
    }

    // validate_draft 已保證可解析
    let experience = parse_experience(draft.experience.trim()).unwrap_or_default();

    Ok(NewDeveloper {
        name: draft.name.trim().to_string(),
        role: draft.role,
        tech_stack: split_tech_stack(&draft.tech_stack),
        experience,
    })
}

/// Splits comma separated text into trimmed, non-empty tokens.
pub fn split_tech_stack(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_experience(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|years| years.is_finite() && *years >= 0.0)
}
