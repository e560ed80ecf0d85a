//! PDF renderer for report content blocks using lopdf.
//!
//! The renderer takes the flat [`Block`](assessor_idf::Block) sequence produced
//! by the report assembler, flows it into page frames, then paints every page
//! and hands each one to the registered page decorators (header, footer,
//! page numbers). Because all pages are laid out before any is painted,
//! decorators always know the final page count.

mod canvas;
mod error;
mod fonts;
mod measure;
mod paginate;
mod renderer;
mod text;
mod writer;

pub use canvas::Canvas;
pub use error::RenderError;
pub use fonts::{FontFace, FontMetrics, FontRegistry, HELVETICA, HELVETICA_BOLD};
pub use renderer::{
    DocumentInfo, DocumentRenderer, PageCallbacks, PageDecorator, PageInfo, PageTemplate,
    PdfRenderer,
};
pub use text::{to_win_ansi, wrap_lines};
pub use writer::StreamingPdfWriter;
