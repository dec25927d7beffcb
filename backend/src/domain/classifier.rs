//! Keyword classifier assigning a coarse [`Category`] to a landmark title.

use super::Category;

const HISTORICAL_KEYWORDS: [&str; 6] = [
    "museum",
    "castle",
    "monument",
    "memorial",
    "church",
    "cathedral",
];

const NATURAL_KEYWORDS: [&str; 5] = ["park", "mountain", "lake", "river", "forest"];

/// Classify a title by case-insensitive substring match.
///
/// Historical keywords win over natural ones; anything unmatched is cultural.
///
/// # Examples
/// ```
/// use local_landmarks::domain::{Category, classify};
///
/// assert_eq!(classify("City Museum of Art"), Category::Historical);
/// assert_eq!(classify("Central Park"), Category::Natural);
/// assert_eq!(classify("Main Street Plaza"), Category::Cultural);
/// ```
#[must_use]
pub fn classify(title: &str) -> Category {
    let title = title.to_lowercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|word| title.contains(word));

    if contains_any(&HISTORICAL_KEYWORDS) {
        Category::Historical
    } else if contains_any(&NATURAL_KEYWORDS) {
        Category::Natural
    } else {
        Category::Cultural
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("City Museum of Art", Category::Historical)]
    #[case("Edinburgh Castle", Category::Historical)]
    #[case("War Memorial", Category::Historical)]
    #[case("ST GILES' CATHEDRAL", Category::Historical)]
    #[case("Central Park", Category::Natural)]
    #[case("Ben Nevis mountain range", Category::Natural)]
    #[case("River Thames", Category::Natural)]
    #[case("Main Street Plaza", Category::Cultural)]
    #[case("", Category::Cultural)]
    fn classifies_by_keyword(#[case] title: &str, #[case] expected: Category) {
        assert_eq!(classify(title), expected);
    }

    #[rstest]
    #[case("Lakeside Church")]
    #[case("Forest Park Memorial")]
    fn historical_wins_when_both_lists_match(#[case] title: &str) {
        assert_eq!(classify(title), Category::Historical);
    }

    #[rstest]
    fn matches_substrings_inside_words() {
        // "parkway" contains "park".
        assert_eq!(classify("Riverside Parkway"), Category::Natural);
    }
}
