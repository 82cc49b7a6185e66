use crate::core::controller::{FetchState, Notification, NotificationLevel};
use crate::core::validator::FieldErrors;
use crate::domain::model::{DeveloperDraft, DeveloperRecord, FilterState, FormField, RoleFilter};
use std::fmt::Write;

pub fn format_experience(years: f64) -> String {
    let unit = if years == 1.0 { "year" } else { "years" };
    format!("{} {}", years, unit)
}

pub fn render_developer(dev: &DeveloperRecord) -> String {
    format!(
        "{} [{}]\n    Experience: {}\n    Tech Stack: {}\n",
        dev.name,
        dev.role,
        format_experience(dev.experience),
        dev.tech_stack.join(", ")
    )
}

/// Renders the list panel: header with the visible count, then either the
/// loading indicator, the empty state, or one block per developer.
pub fn render_list(
    visible: &[DeveloperRecord],
    filter: &FilterState,
    fetch_state: &FetchState,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Developers ({})", visible.len());
    if !filter.search_term.trim().is_empty() || filter.role_filter != RoleFilter::All {
        let _ = writeln!(
            out,
            "Filter: role={} search=\"{}\"",
            filter.role_filter,
            filter.search_term
        );
    }

    match fetch_state {
        FetchState::Loading => {
            out.push_str("Loading developers...\n");
            return out;
        }
        FetchState::Error(reason) => {
            let _ = writeln!(out, "⚠ {}; showing last loaded developers", reason);
        }
        FetchState::Idle => {}
    }

    if visible.is_empty() {
        out.push_str("No developers found\nTry adjusting your search or filters\n");
        return out;
    }

    for dev in visible {
        out.push_str("  ");
        out.push_str(&render_developer(dev));
    }
    out
}

pub fn render_form(draft: &DeveloperDraft, errors: &FieldErrors) -> String {
    let mut out = String::from("Add Developer\n");
    let fields = [
        (FormField::Name, "Name", draft.name.clone()),
        (FormField::Role, "Role", draft.role.to_string()),
        (FormField::TechStack, "Tech Stack", draft.tech_stack.clone()),
        (FormField::Experience, "Experience (years)", draft.experience.clone()),
    ];
    for (field, label, value) in fields {
        let _ = writeln!(out, "  {}: {}", label, value);
        if let Some(message) = errors.get(field) {
            let _ = writeln!(out, "    ! {}", message);
        }
    }
    out
}

pub fn render_notification(notification: &Notification) -> String {
    match notification.level {
        NotificationLevel::Success => format!("✅ {}", notification.message),
        NotificationLevel::Error => format!("❌ {}", notification.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{RecordId, Role};

    fn ada(experience: f64) -> DeveloperRecord {
        DeveloperRecord {
            id: RecordId::new("1"),
            name: "Ada".to_string(),
            role: Role::FullStack,
            tech_stack: vec!["Go".to_string(), "React".to_string()],
            experience,
        }
    }

    #[test]
    fn test_format_experience() {
        assert_eq!(format_experience(1.0), "1 year");
        assert_eq!(format_experience(0.0), "0 years");
        assert_eq!(format_experience(3.5), "3.5 years");
        assert_eq!(format_experience(2.0), "2 years");
    }

    #[test]
    fn test_render_list_with_developers() {
        let out = render_list(&[ada(1.0)], &FilterState::default(), &FetchState::Idle);
        assert!(out.starts_with("Developers (1)\n"));
        assert!(out.contains("Ada [Full-Stack]"));
        assert!(out.contains("Experience: 1 year\n"));
        assert!(out.contains("Tech Stack: Go, React"));
        assert!(!out.contains("Filter:"));
    }

    #[test]
    fn test_render_empty_state_and_filter_line() {
        let filter = FilterState {
            search_term: " rust ".to_string(),
            role_filter: RoleFilter::Only(Role::Backend),
        };
        let out = render_list(&[], &filter, &FetchState::Idle);
        assert!(out.contains("Developers (0)"));
        assert!(out.contains("Filter: role=Backend search=\" rust \""));
        assert!(out.contains("No developers found"));
    }

    #[test]
    fn test_render_loading() {
        let out = render_list(&[ada(2.0)], &FilterState::default(), &FetchState::Loading);
        assert!(out.contains("Loading developers..."));
        assert!(!out.contains("Ada"));
    }

    #[test]
    fn test_render_stale_list_after_failed_refresh() {
        let state = FetchState::Error("Could not reach the directory service".to_string());
        let out = render_list(&[ada(2.0)], &FilterState::default(), &state);
        assert!(out.contains("showing last loaded developers"));
        assert!(out.contains("Ada [Full-Stack]"));
    }

    #[test]
    fn test_render_form_shows_errors_under_fields() {
        let mut errors = FieldErrors::new();
        errors.insert(FormField::Name, "Name is required");
        let out = render_form(&DeveloperDraft::default(), &errors);
        assert!(out.contains("  Name: \n    ! Name is required\n"));
        assert!(out.contains("  Role: Frontend\n"));
    }
}
