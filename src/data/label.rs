use super::model::{Categories, Level};

// ---------------------------------------------------------------------------
// Hover labels
// ---------------------------------------------------------------------------

/// A label rule: when `applies` holds, the label is `fields` joined by ", ".
struct LabelRule {
    applies: fn(&Categories) -> bool,
    fields: &'static [Level],
}

/// Rules in precedence order; the first one that applies wins. The last rule
/// always applies.
static RULES: [LabelRule; 4] = [
    LabelRule {
        applies: |c| c.subkategorie_1 == c.subkategorie_2,
        fields: &[
            Level::Hauptkategorie,
            Level::Subkategorie1,
            Level::Produktgruppe,
            Level::Subprodukt,
        ],
    },
    LabelRule {
        applies: |c| c.hauptkategorie == c.subkategorie_1,
        fields: &[
            Level::Subkategorie1,
            Level::Subkategorie2,
            Level::Produktgruppe,
            Level::Subprodukt,
        ],
    },
    LabelRule {
        applies: |c| c.produktgruppe == c.subprodukt,
        fields: &[
            Level::Hauptkategorie,
            Level::Subkategorie1,
            Level::Subkategorie2,
            Level::Produktgruppe,
        ],
    },
    LabelRule {
        applies: |_| true,
        fields: &[
            Level::Hauptkategorie,
            Level::Subkategorie1,
            Level::Subkategorie2,
            Level::Produktgruppe,
            Level::Subprodukt,
        ],
    },
];

/// Display label for a row: collapses the one pair of repeated category names
/// a legend would otherwise show twice.
pub fn hover_label(categories: &Categories) -> String {
    let rule = RULES
        .iter()
        .find(|rule| (rule.applies)(categories))
        .unwrap_or(&RULES[RULES.len() - 1]);

    rule.fields
        .iter()
        .map(|&level| categories.get(level))
        .collect::<Vec<_>>()
        .join(", ")
}
