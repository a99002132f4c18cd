// Engine module - core pipeline logic (pricing, ordering, selection, layout)
// This layer sits between the raw catalog (types/providers) and CLI presentation

pub mod counts;
pub mod filter;
pub mod layout;
pub mod ordering;
pub mod pricing;
pub mod selection;

pub use counts::{count_view, ViewCounts};
pub use filter::{filter, FilterSet};
pub use layout::{layout, Block, FooterSummary, LayoutEntry, LayoutMetrics, Page};
pub use ordering::order;
pub use pricing::{resolve, resolve_one, PricedItem};
pub use selection::{
    clear_all_visible, clear_everything, reconcile, select_all_visible, selected_subset,
    VisibleState,
};
