pub mod dimension;
pub mod font;
pub mod paragraph;
pub mod registry;
pub mod text;

pub use dimension::{inches, Margins, PageLayout, PageSize, INCH};
pub use font::FontWeight;
pub use paragraph::ParagraphStyle;
pub use registry::StyleRegistry;
pub use text::{TextAlign, VerticalAlign};
