// Browser binding: DOM surface, form controls and the exported entry points
mod controls;
mod lightweight;
mod logging;
mod surface;

pub mod entry;

pub use controls::DomControls;
pub use entry::WebDashboard;
pub use surface::DomSurface;
