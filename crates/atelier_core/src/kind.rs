//! Content entity kinds managed by the console.

use serde::{Deserialize, Serialize};

/// The managed entity types that may own image attachments.
///
/// The codec and cache never look at this; it only selects endpoint
/// configuration for upload call sites.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContentKind {
    /// Homepage banner
    #[display("banner")]
    Banner,
    /// Brand with logo
    #[display("brand")]
    Brand,
    /// Catalogue product with a gallery
    #[display("product")]
    Product,
    /// Customer reference
    #[display("reference")]
    Reference,
    /// Portfolio project with a gallery
    #[display("project")]
    Project,
    /// Product category
    #[display("category")]
    Category,
    /// Partner logo
    #[display("partner")]
    Partner,
    /// News article
    #[display("news")]
    News,
}

impl ContentKind {
    /// Convert to the string used in configuration keys.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}
