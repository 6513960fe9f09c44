//! /model command - list and switch models

use super::CommandResult;
use lexi_ai::Model;

pub struct ModelCommand;

impl ModelCommand {
    /// Lists models with no args, otherwise switches to the first match
    pub fn execute(args: &str, current_model: &Model, available_models: &[Model]) -> CommandResult {
        if args.is_empty() {
            return CommandResult::Message(list_models(current_model, available_models));
        }

        match find_model(args, available_models) {
            Some(model) => CommandResult::ChangeModel(model),
            None => CommandResult::Message(format!(
                "No model found matching '{}'\nUse /model to list available models",
                args
            )),
        }
    }
}

fn list_models(current: &Model, models: &[Model]) -> String {
    if models.is_empty() {
        return "No models available".to_string();
    }

    let mut output = String::from("Available models:\n\n");
    for model in models {
        let marker = if model.id == current.id { " *" } else { "" };
        output.push_str(&format!("  {:<24} {}{}\n", model.id, model.name, marker));
    }

    output.push_str("\nSwitch with: /model <name>");
    output
}

fn find_model(query: &str, models: &[Model]) -> Option<Model> {
    let query_lower = query.to_lowercase();

    // Exact match first
    if let Some(model) = models.iter().find(|m| m.id.to_lowercase() == query_lower) {
        return Some(model.clone());
    }

    // Partial match
    if let Some(model) = models
        .iter()
        .find(|m| m.id.to_lowercase().contains(&query_lower))
    {
        return Some(model.clone());
    }

    // Match by name
    models
        .iter()
        .find(|m| m.name.to_lowercase().contains(&query_lower))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexi_ai::models;

    #[test]
    fn test_exact_match_beats_partial() {
        let all = models::get_all_models();
        assert_eq!(find_model("gemini-2.5-flash", &all).unwrap().id, "gemini-2.5-flash");
    }

    #[test]
    fn test_match_by_name() {
        let all = models::get_all_models();
        assert_eq!(find_model("2.5 pro", &all).unwrap().id, "gemini-2.5-pro");
    }

    #[test]
    fn test_list_marks_current() {
        let all = models::get_all_models();
        let current = models::resolve_model("gemini-2.0-flash");
        let listing = list_models(&current, &all);
        let line = listing
            .lines()
            .find(|l| l.contains("gemini-2.0-flash"))
            .unwrap();
        assert!(line.ends_with(" *"));
        assert_eq!(listing.matches(" *").count(), 1);
    }

    #[test]
    fn test_no_match() {
        let all = models::get_all_models();
        let current = models::resolve_model(models::DEFAULT_MODEL_ID);
        assert!(matches!(
            ModelCommand::execute("claude", &current, &all),
            CommandResult::Message(m) if m.starts_with("No model found")
        ));
    }
}
