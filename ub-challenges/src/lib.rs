pub mod zoning;
