//! Selection of classes for the report.
//!
//! Three independent substring categories: the class's own name, the classes it
//! references, and the names of the methods it references. A class is selected
//! when at least one *present* category matches. Categories that were never
//! requested contribute nothing.

use std::collections::BTreeSet;

use crate::model::ClassDescriptor;

/// What happens when no category is present at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnfilteredPolicy {
    /// Nothing can match, so nothing is selected.
    #[default]
    SelectNone,
    /// Treat the absence of filters as "report everything".
    SelectAll,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassFilter {
    pub targets: Option<BTreeSet<String>>,
    pub classes: Option<BTreeSet<String>>,
    pub methods: Option<BTreeSet<String>>,
    pub unfiltered: UnfilteredPolicy,
}

impl ClassFilter {
    pub fn is_unfiltered(&self) -> bool {
        self.targets.is_none() && self.classes.is_none() && self.methods.is_none()
    }

    pub fn matches(&self, class: &ClassDescriptor) -> bool {
        if self.is_unfiltered() {
            return self.unfiltered == UnfilteredPolicy::SelectAll;
        }

        self.matches_target(class) || self.matches_classes(class) || self.matches_methods(class)
    }

    fn matches_target(&self, class: &ClassDescriptor) -> bool {
        any_contained(self.targets.as_ref(), std::iter::once(class.class_name()))
    }

    fn matches_classes(&self, class: &ClassDescriptor) -> bool {
        any_contained(
            self.classes.as_ref(),
            class.referenced_class_names().iter().map(String::as_str),
        )
    }

    fn matches_methods(&self, class: &ClassDescriptor) -> bool {
        any_contained(
            self.methods.as_ref(),
            class.method_references().iter().map(|m| m.method_name.as_str()),
        )
    }
}

fn any_contained<'a>(
    needles: Option<&BTreeSet<String>>,
    haystacks: impl Iterator<Item = &'a str> + Clone,
) -> bool {
    let Some(needles) = needles else {
        return false;
    };
    needles
        .iter()
        .any(|needle| haystacks.clone().any(|hay| hay.contains(needle.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class_file::parse_class;
    use crate::test_support;

    fn set(items: &[&str]) -> Option<BTreeSet<String>> {
        Some(items.iter().map(|s| s.to_string()).collect())
    }

    fn implementer() -> ClassDescriptor {
        parse_class(&test_support::interface_implementer(), "InterfaceImplementer.class").unwrap()
    }

    #[test]
    fn class_filter_matches_referenced_interface() {
        let filter = ClassFilter {
            classes: set(&["Closeable"]),
            ..Default::default()
        };
        let class = implementer();
        assert!(!class.class_name().contains("Closeable"));
        assert!(filter.matches(&class));
    }

    #[test]
    fn non_matching_target_alone_rejects() {
        let filter = ClassFilter {
            targets: set(&["Nope"]),
            ..Default::default()
        };
        assert!(!filter.matches(&implementer()));
    }

    #[test]
    fn categories_are_ored() {
        let filter = ClassFilter {
            targets: set(&["Nope"]),
            classes: set(&["AlsoNope"]),
            methods: set(&["<init>"]),
            ..Default::default()
        };
        assert!(filter.matches(&implementer()));
    }

    #[test]
    fn any_substring_in_a_category_is_enough() {
        let filter = ClassFilter {
            targets: set(&["Zzz", "Implementer"]),
            ..Default::default()
        };
        assert!(filter.matches(&implementer()));
    }

    #[test]
    fn method_filter_matches_method_name_only() {
        let class =
            parse_class(&test_support::interface_method_caller(), "Caller.class").unwrap();

        let by_name = ClassFilter {
            methods: set(&["clo"]),
            ..Default::default()
        };
        assert!(by_name.matches(&class));

        let by_owner = ClassFilter {
            methods: set(&["Closeable"]),
            ..Default::default()
        };
        assert!(!by_owner.matches(&class));
    }

    #[test]
    fn no_filters_selects_nothing_by_default() {
        let filter = ClassFilter::default();
        assert!(filter.is_unfiltered());
        assert!(!filter.matches(&implementer()));
    }

    #[test]
    fn no_filters_with_select_all_policy_selects_everything() {
        let filter = ClassFilter {
            unfiltered: UnfilteredPolicy::SelectAll,
            ..Default::default()
        };
        assert!(filter.matches(&implementer()));
    }

    #[test]
    fn present_but_empty_category_never_matches() {
        let filter = ClassFilter {
            targets: Some(BTreeSet::new()),
            unfiltered: UnfilteredPolicy::SelectAll,
            ..Default::default()
        };
        assert!(!filter.is_unfiltered());
        assert!(!filter.matches(&implementer()));
    }
}
