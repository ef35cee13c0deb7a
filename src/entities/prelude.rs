pub use super::asset::Entity as Asset;
pub use super::avatar::Entity as Avatar;
pub use super::cut::Entity as Cut;
pub use super::episode::Entity as Episode;
pub use super::script::Entity as Script;
