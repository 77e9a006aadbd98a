use crate::domain::model::{Bean, Color, Combination, ScoredCombination};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses `#RRGGBB`. The leading character is not checked, only skipped.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 7 || !hex.is_ascii() || !hex.as_bytes()[1..].iter().all(u8::is_ascii_hexdigit)
        {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self {
            r: channel(1..3)?,
            g: channel(3..5)?,
            b: channel(5..7)?,
        })
    }

    pub fn is_orangish(&self) -> bool {
        self.r > 200
            && (100..=180).contains(&self.g)
            && self.b < 100
            && self.r > self.g
            && self.g > self.b
    }
}

/// Malformed input is never orangish.
pub fn is_orangish(hex: &str) -> bool {
    Rgb::from_hex(hex).is_some_and(|rgb| rgb.is_orangish())
}

/// Ids of colors whose swatches are all orangish. Unlike a vacuous "every"
/// check, a color without swatches does not qualify.
pub fn preferred_color_ids(colors: &[Color]) -> HashSet<String> {
    colors
        .iter()
        .filter(|color| !color.hex.is_empty() && color.hex.iter().all(|h| is_orangish(h)))
        .map(|color| color.color_id.clone())
        .collect()
}

pub fn preferred_beans(beans: &[Bean], color_ids: &HashSet<String>) -> Vec<Bean> {
    beans
        .iter()
        .filter(|bean| color_ids.contains(&bean.color_group))
        .cloned()
        .collect()
}

/// Ranks combinations by the share of preferred flavors they contain.
///
/// Combinations sharing no flavor with `preferred` are dropped, so an empty
/// preferred set yields an empty ranking. Ties keep input order.
pub fn score_combinations(
    combinations: &[Combination],
    preferred: &[Bean],
) -> Vec<ScoredCombination> {
    if preferred.is_empty() {
        return Vec::new();
    }

    let flavors: HashSet<&str> = preferred.iter().map(|b| b.flavor_name.as_str()).collect();

    let mut scored: Vec<ScoredCombination> = combinations
        .iter()
        .filter_map(|combo| {
            let matched: HashSet<&str> = combo
                .tags
                .iter()
                .map(String::as_str)
                .filter(|tag| flavors.contains(tag))
                .collect();
            if matched.is_empty() {
                return None;
            }
            Some(ScoredCombination {
                combination: combo.clone(),
                match_fraction: matched.len() as f64 / preferred.len() as f64,
            })
        })
        .collect();

    scored.sort_by(|a, b| b.match_fraction.total_cmp(&a.match_fraction));
    scored
}

/// Uniform pick by index; `None` when there is nothing to draw from.
pub fn pick_random<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

/// Colour band shown next to a match percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchLevel {
    Low,
    Medium,
    High,
}

impl MatchLevel {
    /// Bands used in the ranked combination list.
    pub fn for_listing(fraction: f64) -> Self {
        if fraction <= 0.1 {
            MatchLevel::Low
        } else if fraction < 0.3 {
            MatchLevel::Medium
        } else {
            MatchLevel::High
        }
    }

    /// Stricter bands used for the lottery result.
    pub fn for_lottery(fraction: f64) -> Self {
        if fraction <= 0.3 {
            MatchLevel::Low
        } else if fraction < 0.75 {
            MatchLevel::Medium
        } else {
            MatchLevel::High
        }
    }

    pub fn ansi_color(&self) -> &'static str {
        match self {
            MatchLevel::Low => "\x1b[31m",
            MatchLevel::Medium => "\x1b[33m",
            MatchLevel::High => "\x1b[32m",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bean(id: i64, flavor: &str, color: &str) -> Bean {
        Bean {
            bean_id: id,
            flavor_name: flavor.to_string(),
            description: String::new(),
            ingredients: Vec::new(),
            color_group: color.to_string(),
            image_url: String::new(),
            gluten_free: false,
            sugar_free: false,
            seasonal: false,
            kosher: false,
        }
    }

    fn color(id: &str, hex: &[&str]) -> Color {
        Color {
            color_id: id.to_string(),
            color_description: String::new(),
            hex: hex.iter().map(|h| h.to_string()).collect(),
        }
    }

    fn combo(id: i64, tags: &str) -> Combination {
        Combination {
            combination_id: id,
            name: format!("Combo {}", id),
            tags: tags.split(',').map(str::to_string).collect(),
        }
    }

    #[test]
    fn test_is_orangish_examples() {
        assert_eq!(
            Rgb::from_hex("#D4A017"),
            Some(Rgb {
                r: 212,
                g: 160,
                b: 23
            })
        );
        assert!(is_orangish("#D4A017"));
        assert!(!is_orangish("#FF0000"));
        assert!(is_orangish("#ff9933"));
    }

    #[test]
    fn test_is_orangish_boundaries() {
        // green bounds are inclusive
        assert!(is_orangish("#C96400"));
        assert!(is_orangish("#C9B400"));
        assert!(!is_orangish("#C9B500"));
        // red must exceed 200
        assert!(!is_orangish("#C8A000"));
        // blue must stay below 100
        assert!(!is_orangish("#FFA064"));
    }

    #[test]
    fn test_is_orangish_malformed_input() {
        assert!(!is_orangish(""));
        assert!(!is_orangish("#D4A0"));
        assert!(!is_orangish("#D4A0170"));
        assert!(!is_orangish("#ZZA017"));
        assert!(!is_orangish("#D4A0é"));
        // sign characters are not hex digits
        assert!(!is_orangish("#D4A0+1"));
        assert_eq!(Rgb::from_hex("#D4A0+1"), None);
        assert_eq!(Rgb::from_hex("#+4A017"), None);
        // only the first character is skipped, whatever it is
        assert!(is_orangish("xD4A017"));
    }

    #[test]
    fn test_preferred_colors_require_every_swatch() {
        let colors = vec![
            color("amber", &["#D4A017"]),
            color("mixed", &["#D4A017", "#FF0000"]),
            color("red", &["#FF0000"]),
            color("empty", &[]),
        ];
        let ids = preferred_color_ids(&colors);
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("amber"));
    }

    #[test]
    fn test_preferred_beans_keep_order() {
        let beans = vec![
            bean(3, "Mango", "amber"),
            bean(1, "Cherry", "red"),
            bean(2, "Peach", "amber"),
        ];
        let ids: HashSet<String> = ["amber".to_string()].into_iter().collect();
        let preferred = preferred_beans(&beans, &ids);
        let flavors: Vec<&str> = preferred.iter().map(|b| b.flavor_name.as_str()).collect();
        assert_eq!(flavors, vec!["Mango", "Peach"]);
    }

    #[test]
    fn test_score_half_match_and_exclusion() {
        let preferred = vec![bean(1, "A", "o"), bean(2, "B", "o")];
        let scored = score_combinations(&[combo(1, "A,C"), combo(2, "X,Y")], &preferred);

        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].combination.combination_id, 1);
        assert_eq!(scored[0].match_fraction, 0.5);
        assert_eq!(scored[0].match_percent(), 50);
    }

    #[test]
    fn test_score_sorted_descending() {
        let preferred: Vec<Bean> = (0..10)
            .map(|i| bean(i, &format!("F{}", i), "o"))
            .collect();
        let combos = vec![
            combo(1, "F0,F1"),
            combo(2, "F0,F1,F2,F3,F4,F5,F6,F7"),
            combo(3, "F0,F1,F2,F3,F4"),
        ];
        let scored = score_combinations(&combos, &preferred);
        let fractions: Vec<f64> = scored.iter().map(|s| s.match_fraction).collect();
        assert_eq!(fractions, vec![0.8, 0.5, 0.2]);
    }

    #[test]
    fn test_score_ties_keep_input_order() {
        let preferred = vec![bean(1, "A", "o"), bean(2, "B", "o")];
        let combos = vec![combo(1, "A"), combo(2, "A,B"), combo(3, "B")];
        let ids: Vec<i64> = score_combinations(&combos, &preferred)
            .iter()
            .map(|s| s.combination.combination_id)
            .collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_score_repeated_tag_counts_once() {
        let preferred = vec![bean(1, "A", "o"), bean(2, "B", "o")];
        let scored = score_combinations(&[combo(1, "A,A,A")], &preferred);
        assert_eq!(scored[0].match_fraction, 0.5);
    }

    #[test]
    fn test_score_empty_preferred_yields_nothing() {
        let scored = score_combinations(&[combo(1, "A,B")], &[]);
        assert!(scored.is_empty());
    }

    #[test]
    fn test_pick_random() {
        let mut rng = StdRng::seed_from_u64(7);
        let empty: Vec<i32> = Vec::new();
        assert!(pick_random(&empty, &mut rng).is_none());

        let items = vec![1, 2, 3];
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(*pick_random(&items, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_match_levels() {
        assert_eq!(MatchLevel::for_listing(0.1), MatchLevel::Low);
        assert_eq!(MatchLevel::for_listing(0.2), MatchLevel::Medium);
        assert_eq!(MatchLevel::for_listing(0.3), MatchLevel::High);
        assert_eq!(MatchLevel::for_lottery(0.3), MatchLevel::Low);
        assert_eq!(MatchLevel::for_lottery(0.5), MatchLevel::Medium);
        assert_eq!(MatchLevel::for_lottery(0.75), MatchLevel::High);
    }
}
