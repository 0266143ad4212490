//! The closed taxonomy of unsafe-content categories (MLCommons hazard list,
//! as consumed by the guard model).

/// One category in the safety taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafetyCategory {
    pub code: &'static str,
    pub name: &'static str,
}

/// All categories the guard model is asked to score against
pub fn categories() -> &'static [SafetyCategory] {
    &CATEGORIES
}

/// Human-readable name for a category code, if the code is in the taxonomy
pub fn description_for(code: &str) -> Option<&'static str> {
    CATEGORIES.iter().find(|c| c.code == code).map(|c| c.name)
}

/// Whether a code names a category the taxonomy defines
pub fn is_known(code: &str) -> bool {
    CATEGORIES.iter().any(|c| c.code == code)
}

/// The category block embedded verbatim in every guard prompt
pub fn category_block() -> String {
    CATEGORIES
        .iter()
        .map(|c| format!("{}: {}.", c.code, c.name))
        .collect::<Vec<_>>()
        .join(" \n")
}

static CATEGORIES: [SafetyCategory; 13] = [
    SafetyCategory { code: "S1", name: "Violent Crimes" },
    SafetyCategory { code: "S2", name: "Non-Violent Crimes" },
    SafetyCategory { code: "S3", name: "Sex Crimes" },
    SafetyCategory { code: "S4", name: "Child Exploitation" },
    SafetyCategory { code: "S5", name: "Defamation" },
    SafetyCategory { code: "S6", name: "Specialized Advice" },
    SafetyCategory { code: "S7", name: "Privacy" },
    SafetyCategory { code: "S8", name: "Intellectual Property" },
    SafetyCategory { code: "S9", name: "Indiscriminate Weapons" },
    SafetyCategory { code: "S10", name: "Hate" },
    SafetyCategory { code: "S11", name: "Self-Harm" },
    SafetyCategory { code: "S12", name: "Sexual Content" },
    SafetyCategory { code: "S13", name: "Elections" },
];
