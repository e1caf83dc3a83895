pub mod account;
pub mod locale;
pub mod selector;
pub mod render;

pub use account::{Account, FieldKey};
pub use locale::{FieldLabels, LocaleOverride, LocaleTable};
pub use selector::{AccountDetails, AccountSelector, Bucket, DetailField, Selection};
pub use render::{PaymentDetailsRenderer, RenderContext};
