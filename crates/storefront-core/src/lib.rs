pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod pricing;
pub mod products;
pub mod session;
pub mod timer;
pub mod view;

pub use app_config::{AppConfig, Environment};
pub use cart::{CartLine, CartState, CartStore, SubscriptionId};
pub use catalog::{load_catalog, parse_catalog, Catalog, CatalogQuery};
pub use checkout::{
    CheckoutField, CheckoutForm, CheckoutPage, CheckoutPhase, CheckoutScreen, Confirmation,
    SubmitOutcome,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{CatalogError, ConfigError};
pub use pricing::{format_price, OrderSummary};
pub use products::{Category, CategoryFilter, Product};
pub use session::{AddOutcome, CatalogPage, DetailPage, Page, Session, SessionSettings};
pub use timer::{TimerCommand, TimerDriver, TimerId, TimerKind};
pub use view::{AddButton, DetailView, ProductCard, RelatedCard};
