use crate::error::{BotError, BotResult};

/// Canonical category tags understood by the question source. The wire form
/// is the upper-case string (`as_str`), which is what the API expects in its
/// `categories` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryTag {
    Astronomy,
    Biology,
    Chemistry,
    EarthAndSpace,
    EarthScience,
    Energy,
    Math,
    Physics,
}

impl CategoryTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryTag::Astronomy => "ASTRONOMY",
            CategoryTag::Biology => "BIOLOGY",
            CategoryTag::Chemistry => "CHEMISTRY",
            CategoryTag::EarthAndSpace => "EARTH AND SPACE",
            CategoryTag::EarthScience => "EARTH SCIENCE",
            CategoryTag::Energy => "ENERGY",
            CategoryTag::Math => "MATH",
            CategoryTag::Physics => "PHYSICS",
        }
    }
}

/// The set used when no subject filter is given.
pub const DEFAULT_CATEGORIES: [CategoryTag; 6] = [
    CategoryTag::Biology,
    CategoryTag::Physics,
    CategoryTag::Chemistry,
    CategoryTag::EarthAndSpace,
    CategoryTag::Astronomy,
    CategoryTag::Math,
];

/// Maps a free-text subject alias to its category set. `None` selects the
/// full default set; an alias outside the table is rejected without any
/// question fetch happening.
pub fn resolve(subject: Option<&str>) -> BotResult<Vec<CategoryTag>> {
    let Some(subject) = subject else {
        return Ok(DEFAULT_CATEGORIES.to_vec());
    };

    let tag = match subject.trim().to_lowercase().as_str() {
        "astro" | "astronomy" => CategoryTag::Astronomy,
        "bio" | "biology" => CategoryTag::Biology,
        "ess" | "earth science" | "es" => CategoryTag::EarthScience,
        "chem" | "chemistry" => CategoryTag::Chemistry,
        "phys" | "physics" => CategoryTag::Physics,
        "math" => CategoryTag::Math,
        "energy" => CategoryTag::Energy,
        _ => return Err(BotError::UnknownSubject(subject.to_string())),
    };

    Ok(vec![tag])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subject_selects_all_six_defaults() {
        let categories = resolve(None).unwrap();
        assert_eq!(categories.len(), 6);
        assert!(categories.contains(&CategoryTag::Biology));
        assert!(categories.contains(&CategoryTag::EarthAndSpace));
        assert!(!categories.contains(&CategoryTag::Energy));
    }

    #[test]
    fn aliases_map_to_exactly_one_tag() {
        for (alias, expected) in [
            ("astro", CategoryTag::Astronomy),
            ("astronomy", CategoryTag::Astronomy),
            ("bio", CategoryTag::Biology),
            ("biology", CategoryTag::Biology),
            ("ess", CategoryTag::EarthScience),
            ("earth science", CategoryTag::EarthScience),
            ("es", CategoryTag::EarthScience),
            ("chem", CategoryTag::Chemistry),
            ("chemistry", CategoryTag::Chemistry),
            ("phys", CategoryTag::Physics),
            ("physics", CategoryTag::Physics),
            ("math", CategoryTag::Math),
            ("energy", CategoryTag::Energy),
        ] {
            let categories = resolve(Some(alias)).unwrap();
            assert_eq!(categories, vec![expected], "alias {:?}", alias);
        }
    }

    #[test]
    fn resolution_is_case_insensitive() {
        assert_eq!(
            resolve(Some("BIO")).unwrap(),
            resolve(Some("bio")).unwrap()
        );
        assert_eq!(
            resolve(Some("Earth Science")).unwrap(),
            vec![CategoryTag::EarthScience]
        );
    }

    #[test]
    fn unknown_subjects_are_rejected_not_defaulted() {
        let err = resolve(Some("geology")).unwrap_err();
        assert!(matches!(err, BotError::UnknownSubject(_)));
        // A prefix of a known alias is still unknown
        assert!(resolve(Some("bi")).is_err());
    }
}
