use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLinks {
    pub pdf: String,
    pub youtube: String,
    pub drive: String,
}

/// A subject with its study material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Academic {
    pub title: String,
    pub faculty: String,
    pub description: String,
    pub branch: String,
    pub color: String,
    pub links: ResourceLinks,
    pub keywords: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyMember {
    pub name: String,
    pub title: String,
    pub subjects: String,
    pub email: String,
    pub linkedin: String,
    pub img: String,
    pub keywords: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub date: String,
    pub description: String,
}

/// Events grouped the way the portal shows them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCatalog {
    pub tech: Vec<Event>,
    pub cultural: Vec<Event>,
    pub fest: Vec<Event>,
}

impl EventCatalog {
    pub fn iter(&self) -> impl Iterator<Item = &Event> + '_ {
        self.tech.iter().chain(&self.cultural).chain(&self.fest)
    }

    pub fn find(&self, name: &str) -> Option<&Event> {
        let name = name.trim();
        self.iter().find(|e| e.name.eq_ignore_ascii_case(name))
    }
}

/// Read-only portal content.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub academics: Vec<Academic>,
    pub faculty: Vec<FacultyMember>,
    pub events: EventCatalog,
}

/// Every whitespace-separated term of `query` must appear in `haystack`.
fn keyword_match(haystack: &str, query: &str) -> bool {
    let haystack = haystack.to_lowercase();
    query
        .to_lowercase()
        .split_whitespace()
        .all(|term| haystack.contains(term))
}

impl Catalog {
    pub fn academics(&self, query: Option<&str>) -> Vec<&Academic> {
        self.academics
            .iter()
            .filter(|a| {
                query.is_none_or(|q| keyword_match(&format!("{} {}", a.keywords, a.title), q))
            })
            .collect()
    }

    pub fn faculty(&self, query: Option<&str>) -> Vec<&FacultyMember> {
        self.faculty
            .iter()
            .filter(|f| {
                query.is_none_or(|q| keyword_match(&format!("{} {}", f.keywords, f.name), q))
            })
            .collect()
    }
}
