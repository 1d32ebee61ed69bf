//! Client-side search over already-fetched items. Never touches the network.

/// Item that can be matched by the search box
pub trait Searchable {
    /// Displayed text fields the query is matched against
    fn search_fields(&self) -> Vec<&str>;
}

/// Case-insensitive substring match on any field; an empty query matches everything
pub fn matches<T: Searchable + ?Sized>(item: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    item.search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Items matching `query`, in their original order
pub fn filter<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    items.iter().filter(|item| matches(*item, query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Employee, RecordId};

    fn employee(id: i64, name: &str, designation: Option<&str>, department: Option<&str>) -> Employee {
        Employee {
            id: RecordId::Int(id),
            employee_id: None,
            name: name.to_string(),
            designation: designation.map(str::to_string),
            department: department.map(str::to_string),
            profile_image: None,
        }
    }

    fn directory() -> Vec<Employee> {
        vec![
            employee(1, "Asha Rao", Some("Engineer"), Some("Platform")),
            employee(2, "Bilal Khan", Some("Recruiter"), Some("People")),
            employee(3, "Chen Wei", None, Some("Finance")),
        ]
    }

    #[test]
    fn test_case_insensitive_any_field() {
        let items = directory();
        let names: Vec<_> = filter(&items, "PEOPLE").iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bilal Khan"]);

        let names: Vec<_> = filter(&items, "an").iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Bilal Khan", "Chen Wei"]);
    }

    #[test]
    fn test_filter_is_idempotent_and_pure() {
        let items = directory();
        let before = items.clone();

        let first = filter(&items, "eng");
        let second = filter(&items, "eng");
        assert_eq!(first, second);

        // Clearing the query restores the full collection
        let all = filter(&items, "");
        assert_eq!(all.len(), items.len());
        assert_eq!(items, before);
    }

    #[test]
    fn test_missing_fields_never_match() {
        let items = directory();
        assert!(filter(&items, "Recruiter Finance").is_empty());
    }
}
