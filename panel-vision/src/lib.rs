mod check;
pub mod colors;
mod preprocess;

pub use check::geometry::{within_tolerance, BlockRect, Tolerance};
pub use check::regions::{extract_regions, largest_region};
pub use check::spec::{ColorSpec, FrameSize, HsvRange, PanelLayout, SpecError};
pub use check::{check_panel, collect_layout, verify_color};
pub use preprocess::{cut_background, resize_to_frame};
