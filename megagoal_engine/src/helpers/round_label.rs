use regex::Regex;

/// Extracts the round number from a numbered regular-season label.
///
/// Only labels matching the whole-string pattern `Regular Season - <N>` qualify; anything else (including labels
/// that merely contain the phrase) returns `None` and is treated as a knockout/group-stage round.
pub fn regular_season_number(label: &str) -> Option<u32> {
    capture(r"^Regular Season - (\d+)$", label).and_then(|n| n.parse().ok())
}

/// Rewrites a round label for display.
///
/// The match is anchored on the whole label so that partial matches never corrupt unrelated labels:
/// * `Regular Season - N` becomes `Round - N`
/// * `League Stage - N` becomes `League R. - N`
/// * `Group Stage - N` becomes `Group R. - N`
/// * everything else passes through verbatim.
pub fn display_round_name(label: &str) -> String {
    if let Some(n) = capture(r"^Regular Season - (\d+)$", label) {
        return format!("Round - {n}");
    }
    if let Some(n) = capture(r"^League Stage - (\d+)$", label) {
        return format!("League R. - {n}");
    }
    if let Some(n) = capture(r"^Group Stage - (\d+)$", label) {
        return format!("Group R. - {n}");
    }
    label.to_string()
}

fn capture(pattern: &str, label: &str) -> Option<String> {
    let re = Regex::new(pattern).unwrap();
    re.captures(label).and_then(|c| c.get(1).map(|m| m.as_str().to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn extracts_regular_season_numbers() {
        assert_eq!(regular_season_number("Regular Season - 1"), Some(1));
        assert_eq!(regular_season_number("Regular Season - 38"), Some(38));
        assert_eq!(regular_season_number("Final"), None);
        assert_eq!(regular_season_number("Group Stage - 2"), None);
        // Anchored: prefixes and suffixes disqualify the label
        assert_eq!(regular_season_number("Pre Regular Season - 3"), None);
        assert_eq!(regular_season_number("Regular Season - 3 (replay)"), None);
        assert_eq!(regular_season_number("Regular Season"), None);
    }

    #[test]
    fn rewrites_known_label_families() {
        assert_eq!(display_round_name("Regular Season - 12"), "Round - 12");
        assert_eq!(display_round_name("League Stage - 4"), "League R. - 4");
        assert_eq!(display_round_name("Group Stage - 2"), "Group R. - 2");
    }

    #[test]
    fn unknown_labels_pass_through() {
        assert_eq!(display_round_name("Final"), "Final");
        assert_eq!(display_round_name("Quarter-finals"), "Quarter-finals");
        // Partial matches must not be rewritten
        assert_eq!(display_round_name("Regular Season - 12 (abandoned)"), "Regular Season - 12 (abandoned)");
        assert_eq!(display_round_name("My Group Stage - 2"), "My Group Stage - 2");
    }
}
