//
// ─── CATEGORY CATALOG ─────────────────────────────────────────────────────────
//

/// A labeled inclusive question-number range grouping questions by topic.
///
/// Exam papers order their sixty questions by topic, so a category is simply
/// a slice of question numbers that holds across every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    ordinal: &'static str,
    name: &'static str,
    slug: &'static str,
    range: (u32, u32),
}

static CATALOG: [Category; 10] = [
    Category {
        ordinal: "01",
        name: "Stoichiometry/Solutions",
        slug: "stoichiometry",
        range: (1, 6),
    },
    Category {
        ordinal: "02",
        name: "Descriptive/Laboratory",
        slug: "descriptive",
        range: (7, 12),
    },
    Category {
        ordinal: "03",
        name: "States of Matter",
        slug: "states",
        range: (13, 18),
    },
    Category {
        ordinal: "04",
        name: "Thermodynamics",
        slug: "thermodynamics",
        range: (19, 24),
    },
    Category {
        ordinal: "05",
        name: "Kinetics",
        slug: "kinetics",
        range: (25, 30),
    },
    Category {
        ordinal: "06",
        name: "Equilibrium",
        slug: "equilibrium",
        range: (31, 36),
    },
    Category {
        ordinal: "07",
        name: "Oxidation-Reduction",
        slug: "redox",
        range: (37, 42),
    },
    Category {
        ordinal: "08",
        name: "Atomic Structure/Periodicity",
        slug: "atomic",
        range: (43, 48),
    },
    Category {
        ordinal: "09",
        name: "Bonding/Molecular Structure",
        slug: "bonding",
        range: (49, 54),
    },
    Category {
        ordinal: "10",
        name: "Organic/Biochemistry",
        slug: "organic",
        range: (55, 60),
    },
];

impl Category {
    /// All known categories, in menu order.
    #[must_use]
    pub fn all() -> &'static [Category] {
        &CATALOG
    }

    /// Looks up a category by its slug.
    #[must_use]
    pub fn by_slug(slug: &str) -> Option<&'static Category> {
        CATALOG.iter().find(|c| c.slug == slug)
    }

    #[must_use]
    pub fn ordinal(&self) -> &'static str {
        self.ordinal
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn slug(&self) -> &'static str {
        self.slug
    }

    /// The inclusive question-number range `(lo, hi)`.
    #[must_use]
    pub fn range(&self) -> (u32, u32) {
        self.range
    }

    /// True when `number` falls inside this category's inclusive range.
    #[must_use]
    pub fn contains(&self, number: u32) -> bool {
        let (lo, hi) = self.range;
        (lo..=hi).contains(&number)
    }
}
