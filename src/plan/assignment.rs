use serde::{Deserialize, Serialize};

/// Split a constituency name into its distinct hyphen-separated parts, in
/// order of first appearance. A name without hyphens is a single part.
pub fn name_parts(name: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    for part in name.split('-').map(str::trim) {
        if !parts.contains(&part) { parts.push(part) }
    }
    parts
}

/// A group of polling districts electing `member_size` seats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constituency {
    #[serde(rename = "constituency_name")]
    pub name: String,
    pub member_size: u32,
    pub polling_districts: Vec<String>,
}

impl Constituency {
    pub fn new(name: impl Into<String>, member_size: u32, polling_districts: Vec<String>) -> Self {
        Self { name: name.into(), member_size, polling_districts }
    }

    /// Distinct hyphen-separated parts of the name.
    #[inline] pub fn name_parts(&self) -> Vec<&str> { name_parts(&self.name) }

    /// Check whether a district belongs to this constituency.
    #[inline] pub fn contains(&self, district: &str) -> bool { self.polling_districts.iter().any(|d| d == district) }
}

/// An ordered set of constituencies covering the district universe, plus a
/// human-readable label.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(rename = "assignment_name", default)]
    pub label: String,
    #[serde(rename = "assignment")]
    pub constituencies: Vec<Constituency>,
}

impl Assignment {
    pub fn new(label: impl Into<String>, constituencies: Vec<Constituency>) -> Self {
        Self { label: label.into(), constituencies }
    }

    /// Get the number of constituencies.
    #[inline] pub fn len(&self) -> usize { self.constituencies.len() }

    /// Check if there are no constituencies.
    #[inline] pub fn is_empty(&self) -> bool { self.constituencies.is_empty() }

    /// Total number of seats across all constituencies.
    pub fn total_member_size(&self) -> u32 { self.constituencies.iter().map(|c| c.member_size).sum() }

    /// Find the constituency holding a district.
    pub fn constituency_of(&self, district: &str) -> Option<usize> {
        self.constituencies.iter().position(|c| c.contains(district))
    }

    /// Remove `district` from constituency `from` (if present) and append it to `to`.
    pub fn move_district(&mut self, district: &str, from: usize, to: usize) {
        assert!(from < self.len() && to < self.len(), "constituency index out of range [0, {})", self.len());

        let source = &mut self.constituencies[from].polling_districts;
        if let Some(pos) = source.iter().position(|d| d == district) {
            source.remove(pos);
        }
        self.constituencies[to].polling_districts.push(district.to_string());
    }

    /// Exchange district `a` of constituency `i` with district `b` of constituency `j`.
    pub fn swap_districts(&mut self, a: &str, i: usize, b: &str, j: usize) {
        self.move_district(a, i, j);
        self.move_district(b, j, i);
    }
}
