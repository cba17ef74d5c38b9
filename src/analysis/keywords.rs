use crate::models::Category;

/// Static mapping from category to lowercase trigger keywords. Built once
/// at startup and passed around by reference; never mutated afterwards.
///
/// Entry order is the tie-break order when two categories score equally.
pub(crate) struct KeywordTable {
    entries: Vec<(Category, Vec<&'static str>)>,
}

impl KeywordTable {
    pub(crate) fn builtin() -> Self {
        let entries = vec![
            (
                Category::Food,
                vec![
                    "restaurant",
                    "food",
                    "lunch",
                    "dinner",
                    "breakfast",
                    "snack",
                    "coffee",
                    "pizza",
                    "burger",
                    "sandwich",
                    "takeout",
                    "delivery",
                    "grocery",
                    "supermarket",
                    "cafe",
                    "mcdonalds",
                    "starbucks",
                    "subway",
                    "kfc",
                    "dominos",
                    "uber eats",
                    "doordash",
                ],
            ),
            (
                Category::Transportation,
                vec![
                    "gas",
                    "fuel",
                    "uber",
                    "taxi",
                    "bus",
                    "train",
                    "metro",
                    "parking",
                    "toll",
                    "car",
                    "vehicle",
                    "maintenance",
                    "repair",
                    "lyft",
                    "transport",
                ],
            ),
            (
                Category::Shopping,
                vec![
                    "amazon",
                    "store",
                    "shop",
                    "retail",
                    "clothes",
                    "clothing",
                    "shoes",
                    "electronics",
                    "gadget",
                    "online",
                    "purchase",
                    "buy",
                    "walmart",
                    "target",
                ],
            ),
            (
                Category::Entertainment,
                vec![
                    "movie",
                    "cinema",
                    "theater",
                    "concert",
                    "game",
                    "sport",
                    "gym",
                    "netflix",
                    "spotify",
                    "entertainment",
                    "subscription",
                    "hobby",
                ],
            ),
            (
                Category::Bills,
                vec![
                    "electric",
                    "water",
                    "internet",
                    "phone",
                    "rent",
                    "mortgage",
                    "insurance",
                    "utility",
                    "bill",
                    "payment",
                    "subscription",
                    "service",
                ],
            ),
            (
                Category::Healthcare,
                vec![
                    "doctor",
                    "hospital",
                    "medicine",
                    "pharmacy",
                    "medical",
                    "health",
                    "dentist",
                    "clinic",
                    "prescription",
                    "treatment",
                ],
            ),
            (
                Category::Education,
                vec![
                    "school",
                    "college",
                    "university",
                    "course",
                    "book",
                    "education",
                    "learning",
                    "tuition",
                    "fees",
                    "class",
                ],
            ),
            (
                Category::Travel,
                vec![
                    "hotel",
                    "flight",
                    "vacation",
                    "trip",
                    "travel",
                    "booking",
                    "airbnb",
                    "resort",
                    "cruise",
                    "tour",
                ],
            ),
        ];

        Self { entries }
    }

    pub(crate) fn entries(&self) -> &[(Category, Vec<&'static str>)] {
        &self.entries
    }

    /// Categories in table order. `Other` carries no keywords and never
    /// appears here; it is the absence of a match.
    pub(crate) fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.iter().map(|(category, _)| *category)
    }
}

pub(crate) struct Categorizer<'a> {
    table: &'a KeywordTable,
}

impl<'a> Categorizer<'a> {
    pub(crate) fn new(table: &'a KeywordTable) -> Self {
        Self { table }
    }

    /// Best-fit category for a free-text description. Blank input and
    /// descriptions matching no keyword both map to `Other`.
    ///
    /// Longer keywords outweigh shorter ones when both match, so specific
    /// merchant names beat generic words.
    pub(crate) fn categorize(&self, description: &str) -> Category {
        if description.trim().is_empty() {
            return Category::Other;
        }

        let desc_lower = description.to_lowercase();
        let mut best = Category::Other;
        let mut best_score = 0;

        for (category, keywords) in self.table.entries() {
            let score = score_keywords(&desc_lower, keywords);
            // Strictly greater, so earlier table entries win ties.
            if score > best_score {
                best = *category;
                best_score = score;
            }
        }

        best
    }

    /// Keyword score a description earns for one category. Zero for
    /// categories without a keyword list (`Other`).
    pub(crate) fn score(&self, description: &str, category: Category) -> usize {
        let desc_lower = description.to_lowercase();
        self.table
            .entries()
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, keywords)| score_keywords(&desc_lower, keywords))
            .unwrap_or(0)
    }
}

/// Each keyword contributes its character length at most once, however many
/// times it occurs in the description.
fn score_keywords(desc_lower: &str, keywords: &[&'static str]) -> usize {
    let mut score = 0;
    for keyword in keywords {
        if desc_lower.contains(keyword) {
            score += keyword.len();
        }
    }
    score
}

#[cfg(test)]
#[path = "keywords_tests.rs"]
mod tests;
