//! Assets module - instrument models, classification, and store traits.

mod assets_model;
mod assets_traits;
mod categories;
mod logos;
mod names;

pub use assets_model::{
    Currency, Instrument, InstrumentType, InstrumentUpdate, NewInstrument,
};
pub use assets_traits::InstrumentRepositoryTrait;
pub use categories::{AssetCategory, CategoryDefaults};
pub use logos::logo_url;
pub use names::clean_asset_name;
