use geo::MultiPolygon;

/// One row of the per-district feature table.
#[derive(Clone, Debug, PartialEq)]
pub struct District {
    pub id: String,
    pub elector_size: u64,
    /// Nearby station names, most relevant first.
    pub nearest_stations: Vec<String>,
    /// Outline in lon/lat degrees.
    pub shape: MultiPolygon<f64>,
}

impl District {
    pub fn new(id: impl Into<String>, elector_size: u64, nearest_stations: Vec<String>, shape: MultiPolygon<f64>) -> Self {
        Self { id: id.into(), elector_size, nearest_stations, shape }
    }
}
