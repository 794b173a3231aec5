//! Keyboard shortcut registry and documentation.

use vectorpad_core::Command;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, command: Command, description: &'static str) -> Self {
        Self {
            key,
            command,
            description,
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("Escape", Command::Cancel, "Cancel current action"),
            Shortcut::new("L", Command::Line, "Draw a line"),
            Shortcut::new("Q", Command::Polygon, "Draw a polygon"),
            Shortcut::new("R", Command::Rect, "Draw a rectangle"),
            Shortcut::new("Delete", Command::Delete, "Delete selected items"),
            Shortcut::new("Backspace", Command::Delete, "Delete selected items"),
        ]
    }

    /// Resolve a key name, ignoring case. `esc` is accepted for `Escape`.
    pub fn lookup(key: &str) -> Option<Command> {
        let key = if key.eq_ignore_ascii_case("esc") {
            "Escape"
        } else {
            key
        };
        Self::all()
            .into_iter()
            .find(|s| s.key.eq_ignore_ascii_case(key))
            .map(|s| s.command)
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("  {:20} {}", shortcut.key, shortcut.description);
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(ShortcutRegistry::lookup("esc"), Some(Command::Cancel));
        assert_eq!(ShortcutRegistry::lookup("Escape"), Some(Command::Cancel));
        assert_eq!(ShortcutRegistry::lookup("l"), Some(Command::Line));
        assert_eq!(ShortcutRegistry::lookup("q"), Some(Command::Polygon));
        assert_eq!(ShortcutRegistry::lookup("R"), Some(Command::Rect));
        assert_eq!(ShortcutRegistry::lookup("backspace"), Some(Command::Delete));
        assert_eq!(ShortcutRegistry::lookup("x"), None);
    }

    #[test]
    fn test_keys_unique() {
        let all = ShortcutRegistry::all();
        for (i, a) in all.iter().enumerate() {
            assert!(all[i + 1..].iter().all(|b| !a.key.eq_ignore_ascii_case(b.key)));
        }
    }
}
