//! Argument parsing shared by the subcommands

use warden_types::Identifier;

/// Parse an identifier argument.
///
/// Accepts a hyphenated UUID, `none`, or `@label` for the identifier derived
/// from `label`.
pub fn parse_identifier(s: &str) -> Result<Identifier, String> {
    if let Some(label) = s.strip_prefix('@') {
        if label.is_empty() {
            return Err("empty label after '@'".to_string());
        }
        return Ok(Identifier::derive(label));
    }
    s.parse::<Identifier>()
        .map_err(|e| format!("invalid identifier '{s}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_identifiers() {
        assert_eq!(parse_identifier("@alice").unwrap(), Identifier::derive("alice"));
        assert!(parse_identifier("@").is_err());
    }

    #[test]
    fn test_uuid_and_none() {
        let id = Identifier::generate();
        assert_eq!(parse_identifier(&id.to_string()).unwrap(), id);
        assert_eq!(parse_identifier("none").unwrap(), Identifier::NONE);
        assert!(parse_identifier("not-an-id").is_err());
    }
}
