//! `destination` command implementation.

use anyhow::Result;

use crate::cli::DestinationCommand;

/// Destination types the config accepts, with a short description
pub const DESTINATION_TYPES: &[(&str, &str)] = &[
    ("desktop", "desktop notification through the system notification daemon"),
    (
        "webhook",
        "HTTP request to a URL (discord, google_chat, plain_text or custom format)",
    ),
];

/// Execute the `destination` command
pub fn run_destination(command: DestinationCommand) -> Result<()> {
    match command {
        DestinationCommand::List => {
            print!("{}", render_list());
            Ok(())
        }
    }
}

fn render_list() -> String {
    DESTINATION_TYPES
        .iter()
        .map(|(name, description)| format!("{name:<10}{description}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_names_every_destination_type() {
        let output = render_list();
        let names: Vec<_> = output
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .collect();
        assert_eq!(names, ["desktop", "webhook"]);
    }
}
