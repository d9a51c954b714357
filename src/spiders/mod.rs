pub mod civil_service;
pub mod metro_housing;
pub mod solid_waste;

pub use civil_service::CivilServiceSpider;
pub use metro_housing::MetroHousingSpider;
pub use solid_waste::SolidWasteSpider;
