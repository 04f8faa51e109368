// Chart adapter and the seams it renders through
pub mod adapter;
pub mod options;
pub mod surface;

// Re-export commonly used types
pub use adapter::{ChartAdapter, ChartHandle, RenderOutcome, RenderTicket};
pub use options::{ChartOptions, SeriesStyle};
pub use surface::{
    CandleSeries, ChartSurface, ChartWidget, ContainerView, ErrorPanel, ListenerId, MarketInputs,
    ViewError,
};
