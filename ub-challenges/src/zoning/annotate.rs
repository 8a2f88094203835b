use super::{Grid, Zone};

pub const APARTMENT: &str = "Apartment";
pub const INDEPENDENT_HOUSE: &str = "Independent House";
pub const MALL: &str = "Mall";
pub const LOCAL_SHOP: &str = "Local Shop";
pub const PARK: &str = "Park";
pub const HOSPITAL: &str = "Hospital";
pub const ROAD: &str = "Road";

pub fn assign_subtype(zone: Zone, _x: usize, y: usize, grid_size: usize) -> &'static str {
    match zone {
        Zone::Residential if y < grid_size / 2 => APARTMENT,
        Zone::Residential => INDEPENDENT_HOUSE,
        Zone::Commercial if y < grid_size / 3 => MALL,
        Zone::Commercial => LOCAL_SHOP,
        Zone::Green => PARK,
        Zone::Road | Zone::Unassigned => ROAD,
    }
}

pub fn assign_reason(zone: Zone, _x: usize, y: usize, grid_size: usize) -> &'static str {
    match zone {
        Zone::Commercial if y < grid_size / 3 => "Near road → good for business",
        Zone::Commercial => "Mid-block → ideal for shops",
        Zone::Residential => "Inner area → peaceful housing",
        Zone::Green => "Scattered for public access",
        Zone::Road | Zone::Unassigned => "Traffic management",
    }
}

impl Grid {
    /// Fills subtype and reason for every zoned cell. Road and unassigned
    /// cells are left untouched.
    pub fn annotate(&mut self) {
        let grid_size = self.grid_size;
        for cell in self
            .cells
            .iter_mut()
            .filter(|c| !matches!(c.zone, Zone::Road | Zone::Unassigned))
        {
            cell.subtype = assign_subtype(cell.zone, cell.x, cell.y, grid_size).to_string();
            cell.reason = assign_reason(cell.zone, cell.x, cell.y, grid_size).to_string();
        }
    }
}
