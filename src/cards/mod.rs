//! Card system: definitions, instances, the definition registry, and deck lists.
//!
//! ## Key Types
//!
//! - `CardId`: printed card identifier (`"OGN_005"`)
//! - `CardData`: static card definition, decoded from JSON
//! - `CardInstance`: one physical copy in a match
//! - `CardDataProvider` / `CardRegistry`: read-only definition lookup
//! - `DeckLayout`: a saved deck list split into its starting zones

pub mod definition;
pub mod instance;
pub mod registry;
pub mod deck;

pub use definition::{CardData, CardId, CardType, Keyword, RuneType};
pub use instance::CardInstance;
pub use registry::{CardDataProvider, CardRegistry, LoadReport};
pub use deck::DeckLayout;
