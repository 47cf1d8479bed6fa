//! Subject lookup tables
//!
//! Both tables are total: any subject resolves, unmapped ones to the default.

use super::types::Icon;

const ICONS: &[(&str, Icon)] = &[
    ("いちご", Icon::Strawberry),
    ("こども", Icon::Child),
    ("りんご", Icon::Apple),
    ("みかん", Icon::Orange),
    ("バナナ", Icon::Banana),
    ("ボール", Icon::Ball),
    ("いぬ", Icon::Dog),
    ("ねこ", Icon::Cat),
    ("くるま", Icon::Car),
];

const COUNTERS: &[(&str, &str)] = &[
    ("こども", "にん"),
    ("いちご", "こ"),
    ("りんご", "こ"),
    ("みかん", "こ"),
    ("バナナ", "ほん"),
    ("ボール", "こ"),
    ("いぬ", "ひき"),
    ("ねこ", "ひき"),
    ("くるま", "だい"),
];

pub const DEFAULT_ICON: Icon = Icon::Circle;
pub const DEFAULT_COUNTER: &str = "こ";

/// Icon drawn for a subject
pub fn icon_for(subject: &str) -> Icon {
    lookup(ICONS, subject).unwrap_or(DEFAULT_ICON)
}

/// Counting suffix (助数詞) spoken after a quantity of `subject`
pub fn counter_for(subject: &str) -> &'static str {
    lookup(COUNTERS, subject).unwrap_or(DEFAULT_COUNTER)
}

fn lookup<T: Copy>(table: &[(&str, T)], subject: &str) -> Option<T> {
    let subject = subject.trim();
    table
        .iter()
        .find(|(key, _)| *key == subject)
        .map(|(_, value)| *value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_subjects() {
        assert_eq!(icon_for("いちご"), Icon::Strawberry);
        assert_eq!(icon_for("こども"), Icon::Child);
        assert_eq!(counter_for("こども"), "にん");
        assert_eq!(counter_for("バナナ"), "ほん");
        assert_eq!(icon_for(" りんご "), Icon::Apple);
    }

    #[test]
    fn test_unmapped_subjects_fall_back() {
        for subject in ["x", "", "ぞう", "apple"] {
            assert_eq!(icon_for(subject), DEFAULT_ICON);
            assert_eq!(counter_for(subject), DEFAULT_COUNTER);
        }
    }

    #[test]
    fn test_every_icon_subject_has_a_counter() {
        for (subject, _) in ICONS {
            assert!(COUNTERS.iter().any(|(key, _)| key == subject), "{subject}");
        }
    }
}
