use crate::canvas::{Canvas, ImageSet, LinkArea};
use crate::error::RenderError;
use crate::fonts::FontRegistry;
use crate::measure::LayoutContext;
use crate::paginate::Paginator;
use crate::writer::StreamingPdfWriter;
use assessor_idf::Block;
use assessor_style::PageLayout;
use assessor_types::Rect;
use lopdf::{dictionary, Dictionary, Object, ObjectId, StringFormat};
use std::io::{Cursor, Seek, Write};
use std::sync::Arc;

/// Page geometry: the page layout plus bands reserved for page furniture.
///
/// The content frame is what is left of the page inside the margins once the
/// header band (below the top margin) and footer band (above the bottom
/// margin) are taken out.
#[derive(Debug, Clone, PartialEq)]
pub struct PageTemplate {
    pub layout: PageLayout,
    pub header_band: f32,
    pub footer_band: f32,
}

impl PageTemplate {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            header_band: 0.0,
            footer_band: 0.0,
        }
    }

    pub fn with_bands(mut self, header_band: f32, footer_band: f32) -> Self {
        self.header_band = header_band;
        self.footer_band = footer_band;
        self
    }

    pub fn page_size(&self) -> (f32, f32) {
        self.layout.size.dimensions_pt()
    }

    pub fn frame(&self) -> Result<Rect, RenderError> {
        let (width, height) = self.page_size();
        let margins = &self.layout.margins;
        let frame = Rect::new(
            margins.left,
            margins.top + self.header_band,
            width - margins.horizontal(),
            height - margins.vertical() - self.header_band - self.footer_band,
        );
        if frame.width <= 0.0 || frame.height <= 0.0 {
            return Err(RenderError::Geometry(format!(
                "content frame is {:.1}x{:.1}pt",
                frame.width, frame.height
            )));
        }
        Ok(frame)
    }
}

/// What a page decorator knows about the page it draws on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageInfo {
    /// 1-based page number.
    pub number: usize,
    /// Final page count of the document.
    pub total: usize,
    pub width: f32,
    pub height: f32,
    pub frame: Rect,
}

/// Draws page furniture such as headers, footers and page numbers.
pub trait PageDecorator {
    fn decorate(&self, canvas: &mut Canvas<'_>, page: &PageInfo) -> Result<(), RenderError>;
}

impl<F> PageDecorator for F
where
    F: Fn(&mut Canvas<'_>, &PageInfo) -> Result<(), RenderError>,
{
    fn decorate(&self, canvas: &mut Canvas<'_>, page: &PageInfo) -> Result<(), RenderError> {
        self(canvas, page)
    }
}

/// Decorators run on the first page and on every later page.
#[derive(Clone, Default)]
pub struct PageCallbacks {
    pub first_page: Vec<Arc<dyn PageDecorator>>,
    pub later_pages: Vec<Arc<dyn PageDecorator>>,
}

impl PageCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `decorator` to both lists.
    pub fn every_page(mut self, decorator: Arc<dyn PageDecorator>) -> Self {
        self.first_page.push(decorator.clone());
        self.later_pages.push(decorator);
        self
    }

    pub fn for_page(&self, number: usize) -> &[Arc<dyn PageDecorator>] {
        if number == 1 {
            &self.first_page
        } else {
            &self.later_pages
        }
    }
}

/// Document metadata written to the trailer's `/Info` dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: String,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            creator: None,
            producer: format!("assessor-render {}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl DocumentInfo {
    fn to_dictionary(&self) -> Dictionary {
        let mut info = Dictionary::new();
        let entries = [
            ("Title", self.title.as_deref()),
            ("Author", self.author.as_deref()),
            ("Subject", self.subject.as_deref()),
            ("Creator", self.creator.as_deref()),
            ("Producer", Some(self.producer.as_str())),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                info.set(key, Object::String(crate::to_win_ansi(value), StringFormat::Literal));
            }
        }
        info
    }
}

/// Turns a block sequence into a finished document.
pub trait DocumentRenderer {
    fn render(&self, blocks: &[Block], callbacks: &PageCallbacks) -> Result<Vec<u8>, RenderError>;
}

/// Lays blocks out on A4-style pages and writes a PDF.
///
/// Rendering is two-pass: all pages are laid out first, so decorators see the
/// final page count, then every page is painted and written.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    template: PageTemplate,
    fonts: FontRegistry,
    info: DocumentInfo,
}

impl PdfRenderer {
    pub fn new(template: PageTemplate) -> Self {
        Self {
            template,
            fonts: FontRegistry::with_standard_fonts(),
            info: DocumentInfo::default(),
        }
    }

    pub fn with_fonts(mut self, fonts: FontRegistry) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_info(mut self, info: DocumentInfo) -> Self {
        self.info = info;
        self
    }

    pub fn template(&self) -> &PageTemplate {
        &self.template
    }

    pub fn fonts(&self) -> &FontRegistry {
        &self.fonts
    }

    fn write_page<W: Write + Seek>(
        &self,
        writer: &mut StreamingPdfWriter<W>,
        content: lopdf::content::Content,
        links: Vec<LinkArea>,
    ) -> Result<ObjectId, RenderError> {
        let (width, height) = self.template.page_size();
        let content_id = writer.buffer_content_stream(content)?;

        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => writer.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => writer.resources_id,
        };

        if !links.is_empty() {
            let annotations: Vec<Object> = links
                .into_iter()
                .map(|link| {
                    let annotation = dictionary! {
                        "Type" => "Annot",
                        "Subtype" => "Link",
                        "Rect" => link.rect.iter().map(|v| Object::Real(*v)).collect::<Vec<_>>(),
                        "Border" => vec![0.into(), 0.into(), 0.into()],
                        "A" => dictionary! {
                            "S" => "URI",
                            "URI" => Object::String(link.uri.into_bytes(), StringFormat::Literal),
                        },
                    };
                    Object::Reference(writer.buffer_object(annotation.into()))
                })
                .collect();
            page.set("Annots", annotations);
        }

        Ok(writer.buffer_object(page.into()))
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, blocks: &[Block], callbacks: &PageCallbacks) -> Result<Vec<u8>, RenderError> {
        let frame = self.template.frame()?;
        let (width, height) = self.template.page_size();
        let ctx = LayoutContext::new(&self.fonts);

        let pages = Paginator::new(ctx, frame).paginate(blocks)?;
        let total = pages.len();

        let mut writer = StreamingPdfWriter::new(Cursor::new(Vec::new()), "1.7")?;
        let mut images = ImageSet::default();
        let mut page_ids = Vec::with_capacity(total);

        for (index, fragments) in pages.iter().enumerate() {
            let info = PageInfo {
                number: index + 1,
                total,
                width,
                height,
                frame,
            };
            let mut canvas = Canvas::new(ctx, &mut images, width, height);
            for decorator in callbacks.for_page(info.number) {
                decorator.decorate(&mut canvas, &info)?;
            }
            for fragment in fragments {
                fragment.paint(&mut canvas)?;
            }
            let (content, links) = canvas.finish();
            page_ids.push(self.write_page(&mut writer, content, links)?);
        }

        let fonts = self.fonts.write_resources(&mut writer)?;
        let xobjects = images.write_resources(&mut writer)?;
        let mut resources = dictionary! { "Font" => fonts };
        if !images.is_empty() {
            resources.set("XObject", xobjects);
        }
        writer.set_resources(resources);
        writer.set_info(self.info.to_dictionary());
        writer.set_page_ids(page_ids);

        log::debug!("Rendered {} page(s), {} image(s)", total, images.len());
        Ok(writer.finish()?.into_inner())
    }
}
