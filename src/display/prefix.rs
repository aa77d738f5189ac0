//! Prefix and user display formatting

use crate::models::{User, YearPrefix};

/// Format the year-prefix assignments as a table
pub fn format_prefix_list(prefixes: &[YearPrefix]) -> String {
    if prefixes.is_empty() {
        return "No prefixes configured.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<6}  {}\n", "Year", "Code"));
    output.push_str(&format!("{:-<6}  {:-<6}\n", "", ""));
    for prefix in prefixes {
        output.push_str(&format!("{:<6}  {}\n", prefix.year, prefix.code));
    }
    output
}

/// Format the user accounts as a table
pub fn format_user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let id_width = users.iter().map(|u| u.id.len()).max().unwrap_or(2).max(2);

    let mut output = String::new();
    output.push_str(&format!("{:<id_width$}  {:<10}  {}\n", "Id", "Role", "Name"));
    output.push_str(&format!(
        "{:-<id_width$}  {:-<10}  {:-<20}\n",
        "", "", ""
    ));
    for user in users {
        output.push_str(&format!(
            "{:<id_width$}  {:<10}  {}\n",
            user.id,
            user.role.to_string(),
            user.name,
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_format_prefix_list() {
        let prefixes = vec![YearPrefix::new(2023, "ZX"), YearPrefix::new(2024, "AB")];
        let output = format_prefix_list(&prefixes);
        assert!(output.contains("2023"));
        assert!(output.contains("AB"));
    }

    #[test]
    fn test_format_empty_prefix_list() {
        assert!(format_prefix_list(&[]).contains("No prefixes configured"));
    }

    #[test]
    fn test_format_user_list() {
        let users = vec![User {
            id: "rvance".into(),
            name: "R. Vance".into(),
            role: Role::Signatory,
        }];
        let output = format_user_list(&users);
        assert!(output.contains("rvance"));
        assert!(output.contains("Signatory"));
    }
}
