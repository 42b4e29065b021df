use crate::analyze::Language;
use crate::model::Repository;
use indexmap::IndexMap;
use itertools::Itertools;

pub const TOP_LANGUAGES_LIMIT: usize = 3;
pub const DEFAULT_LANGUAGE_COLOR: &str = "#000000";

struct LanguageCount<'a> {
    count: u64,
    color: Option<&'a str>,
}

/// The most used primary languages across non-forked repositories.
///
/// Percentages are relative to the non-forked repositories that have a primary
/// language, not to every repository.
pub fn calculate_top_languages(repositories: &[Repository]) -> Vec<Language> {
    let mut languages: IndexMap<&str, LanguageCount> = IndexMap::new();
    for language in repositories
        .iter()
        .filter(|repo| !repo.is_fork)
        .filter_map(|repo| repo.primary_language.as_ref())
    {
        languages
            .entry(language.name.as_str())
            .or_insert(LanguageCount {
                count: 0,
                color: language.color.as_deref(),
            })
            .count += 1;
    }

    let total: u64 = languages.values().map(|language| language.count).sum();
    languages
        .into_iter()
        .map(|(name, language)| Language {
            name: name.to_string(),
            color: language
                .color
                .filter(|color| !color.is_empty())
                .unwrap_or(DEFAULT_LANGUAGE_COLOR)
                .to_string(),
            percentage: rounded_percentage(language.count, total),
        })
        .sorted_by(|a, b| b.percentage.cmp(&a.percentage))
        .take(TOP_LANGUAGES_LIMIT)
        .collect()
}

/// `part / total * 100` rounded to the nearest integer, halves up. Zero when `total` is zero.
pub(crate) fn rounded_percentage(part: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::counting::tests::repo;
    use crate::model::PrimaryLanguage;

    #[test]
    fn forks_are_excluded_entirely() {
        let repositories = vec![repo(true, 0, Some("Go")), repo(false, 0, Some("TypeScript"))];
        let languages = calculate_top_languages(&repositories);
        assert_eq!(languages.len(), 1);
        assert_eq!(languages[0].name, "TypeScript");
        assert_eq!(languages[0].percentage, 100);
    }

    #[test]
    fn at_most_three_sorted_descending() {
        let repositories = [
            "Rust", "Rust", "Rust", "Go", "Go", "Python", "C", "C", "C", "C", "Zig",
        ]
        .into_iter()
        .map(|name| repo(false, 0, Some(name)))
        .collect::<Vec<_>>();

        let languages = calculate_top_languages(&repositories);
        let names = languages.iter().map(|l| l.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["C", "Rust", "Go"]);
        assert_eq!(
            languages.iter().map(|l| l.percentage).collect::<Vec<_>>(),
            vec![36, 27, 18]
        );
    }

    #[test]
    fn percentages_sum_to_about_hundred() {
        let repositories = ["A", "B", "C"]
            .into_iter()
            .map(|name| repo(false, 0, Some(name)))
            .collect::<Vec<_>>();
        let languages = calculate_top_languages(&repositories);
        let sum: u32 = languages.iter().map(|l| l.percentage).sum();
        assert_eq!(sum, 99);
        // ties keep first-seen order
        assert_eq!(languages[0].name, "A");
    }

    #[test]
    fn repositories_without_language_are_not_counted() {
        let repositories = vec![repo(false, 0, None), repo(false, 0, Some("Rust"))];
        let languages = calculate_top_languages(&repositories);
        assert_eq!(languages[0].percentage, 100);
    }

    #[test]
    fn first_seen_color_wins_and_missing_color_defaults() {
        let mut first = repo(false, 0, Some("Rust"));
        first.primary_language = Some(PrimaryLanguage {
            name: "Rust".to_string(),
            color: Some("#dea584".to_string()),
        });
        let mut second = repo(false, 0, Some("Rust"));
        second.primary_language = Some(PrimaryLanguage {
            name: "Rust".to_string(),
            color: Some("#ffffff".to_string()),
        });
        let mut blank = repo(false, 0, Some("Nix"));
        blank.primary_language = Some(PrimaryLanguage {
            name: "Nix".to_string(),
            color: Some(String::new()),
        });

        let languages = calculate_top_languages(&[first, second, blank]);
        assert_eq!(languages[0].color, "#dea584");
        assert_eq!(languages[1].color, DEFAULT_LANGUAGE_COLOR);
    }

    #[test]
    fn no_languages() {
        assert!(calculate_top_languages(&[]).is_empty());
        assert!(calculate_top_languages(&[repo(true, 3, Some("Go"))]).is_empty());
    }

    #[test]
    fn rounding_halves_up() {
        assert_eq!(rounded_percentage(1, 8), 13);
        assert_eq!(rounded_percentage(1, 3), 33);
        assert_eq!(rounded_percentage(2, 3), 67);
        assert_eq!(rounded_percentage(5, 0), 0);
    }
}
