use regex::RegexBuilder;

use super::super::types::PatchDescriptor;

/// Whether `descriptor` targets the game whose primary assembly is at
/// `game_assembly`.
///
/// `*` matches every game. Otherwise the pattern matches as a
/// case-insensitive substring, or as a case-insensitive regex. An empty
/// pattern matches nothing.
pub fn applies_to(descriptor: &PatchDescriptor, game_assembly: &str) -> bool {
    let pattern = descriptor.target_pattern.trim();
    if pattern.is_empty() {
        return false;
    }
    if pattern == "*" {
        return true;
    }
    if game_assembly
        .to_lowercase()
        .contains(&pattern.to_lowercase())
    {
        return true;
    }
    match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => re.is_match(game_assembly),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(pattern: &str) -> PatchDescriptor {
        PatchDescriptor {
            id: "p".to_string(),
            display_name: "p".to_string(),
            description: String::new(),
            version: "1.0.0".to_string(),
            author: "Unknown".to_string(),
            dll_file_name: "P.dll".to_string(),
            target_pattern: pattern.to_string(),
            entry_type: None,
            entry_method: None,
            priority: 0,
            enabled: true,
        }
    }

    const GAME: &str = "/games/Terraria/tModLoader.dll";

    #[test]
    fn test_wildcard() {
        assert!(applies_to(&descriptor("*"), GAME));
    }

    #[test]
    fn test_substring_ignores_case() {
        assert!(applies_to(&descriptor("tmodloader"), GAME));
        assert!(!applies_to(&descriptor("Stardew"), GAME));
    }

    #[test]
    fn test_regex_pattern() {
        assert!(applies_to(&descriptor(r"terraria/.*\.dll$"), GAME));
        assert!(!applies_to(&descriptor(r"^celeste"), GAME));
    }

    #[test]
    fn test_empty_or_invalid_pattern() {
        assert!(!applies_to(&descriptor(""), GAME));
        assert!(!applies_to(&descriptor("(unclosed"), GAME));
    }
}
