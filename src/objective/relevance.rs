use crate::{map::{DistrictMap, UnknownDistrict}, plan::name_parts};

impl DistrictMap {
    /// Elector-weighted share of districts whose nearby stations match the
    /// constituency name.
    ///
    /// A district matching every name part counts fully. A district matching
    /// only some parts of a multi-part name counts toward each part it matches,
    /// scaled down by `sqrt(parts)`. Zero when the districts hold no electors.
    pub(crate) fn relevance_of(&self, name: &str, nodes: &[usize]) -> f64 {
        let parts = name_parts(name);
        let mut all_match = 0.0;
        let mut partial = vec![0.0; parts.len()];
        let mut total = 0.0;

        for &node in nodes {
            let electors = self.electors_at(node) as f64;
            total += electors;

            let stations = self.stations_at(node);
            let matched = parts.iter()
                .map(|part| stations.iter().any(|station| self.aliases().matches(station, part)))
                .collect::<Vec<_>>();

            if matched.iter().all(|&m| m) {
                all_match += electors;
            } else {
                for (acc, _) in partial.iter_mut().zip(&matched).filter(|(_, m)| **m) {
                    *acc += electors;
                }
            }
        }

        if total == 0.0 { return 0.0 }

        let scale = (parts.len() as f64).sqrt();
        (all_match + partial.iter().map(|p| p / scale).sum::<f64>()) / total
    }

    /// Name relevance of a set of districts for a constituency name.
    pub fn relevance<S: AsRef<str>>(&self, name: &str, ids: &[S]) -> Result<f64, UnknownDistrict> {
        Ok(self.relevance_of(name, &self.resolve(ids)?))
    }

    /// Nonenclavity of a set of districts given the full assignment of
    /// districts to constituencies (`owners[i]` names the constituency of
    /// `ids()[i]`).
    pub fn nonenclavity<S: AsRef<str>>(&self, ids: &[S], owners: &[Option<u32>]) -> Result<f64, UnknownDistrict> {
        assert_eq!(owners.len(), self.len(), "owners must cover every district in the map");
        Ok(self.graph().nonenclavity(&self.resolve(ids)?, owners))
    }
}
