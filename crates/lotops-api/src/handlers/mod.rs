pub mod dealers;
pub mod imports;
pub mod inventory;
pub mod preferences;
pub mod shifts;
pub mod vin;
