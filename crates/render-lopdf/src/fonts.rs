//! Font faces available to the renderer.
//!
//! The two standard Type1 faces are always present and need no embedding; their
//! glyph widths come from the Adobe AFM files. A TrueType face can be added at
//! runtime, in which case its program is embedded and its widths are read from
//! the font itself. All faces use WinAnsiEncoding.

use crate::error::RenderError;
use crate::text::{win_ansi_byte, win_ansi_char};
use crate::writer::StreamingPdfWriter;
use assessor_style::FontWeight;
use lopdf::{dictionary, Dictionary, Object};
use once_cell::sync::Lazy;
use std::io::{Seek, Write};
use std::sync::Arc;

/// Advance widths for codes 0x20..=0x7E of Helvetica, in 1/1000 em.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

pub static HELVETICA: Lazy<FontMetrics> =
    Lazy::new(|| FontMetrics::standard(&HELVETICA_ASCII, [222, 222, 333, 333]));

pub static HELVETICA_BOLD: Lazy<FontMetrics> =
    Lazy::new(|| FontMetrics::standard(&HELVETICA_BOLD_ASCII, [278, 278, 500, 500]));

/// Glyph advance widths indexed by WinAnsi code, plus vertical metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    pub widths: [u16; 256],
    pub ascent: f32,
    pub descent: f32,
}

impl FontMetrics {
    fn standard(ascii: &[u16; 95], curly_quotes: [u16; 4]) -> Self {
        let mut widths = [0u16; 256];
        widths[0x20..=0x7E].copy_from_slice(ascii);
        // Latin-1 letters borrow the width of their base letter.
        for byte in 0xA0..=0xFFu8 {
            let width = latin1_base(byte)
                .map(|base| widths[base as usize])
                .unwrap_or(556);
            widths[byte as usize] = width;
        }
        widths[0xA0] = widths[0x20];
        widths[0x80] = 556;
        widths[0x85] = 1000;
        widths[0x91..=0x94].copy_from_slice(&curly_quotes);
        widths[0x95] = 350;
        widths[0x96] = 556;
        widths[0x97] = 1000;
        widths[0x99] = 1000;
        Self {
            widths,
            ascent: 718.0,
            descent: -207.0,
        }
    }

    pub fn char_width(&self, ch: char, font_size: f32) -> f32 {
        self.widths[win_ansi_byte(ch) as usize] as f32 * font_size / 1000.0
    }

    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|ch| self.widths[win_ansi_byte(ch) as usize] as u32)
            .sum();
        units as f32 * font_size / 1000.0
    }

    /// Distance from the top of the em box to the baseline.
    pub fn ascent_at(&self, font_size: f32) -> f32 {
        self.ascent * font_size / 1000.0
    }
}

fn latin1_base(byte: u8) -> Option<u8> {
    let base = match byte {
        0xC0..=0xC5 => b'A',
        0xC7 => b'C',
        0xC8..=0xCB => b'E',
        0xCC..=0xCF => b'I',
        0xD1 => b'N',
        0xD2..=0xD6 | 0xD8 => b'O',
        0xD9..=0xDC => b'U',
        0xDD => b'Y',
        0xE0..=0xE5 => b'a',
        0xE7 => b'c',
        0xE8..=0xEB => b'e',
        0xEC..=0xEF => b'i',
        0xF1 => b'n',
        0xF2..=0xF6 | 0xF8 => b'o',
        0xF9..=0xFC => b'u',
        0xFD | 0xFF => b'y',
        _ => return None,
    };
    Some(base)
}

/// A face registered under a PDF resource name such as `F1`.
#[derive(Debug, Clone)]
pub struct FontFace {
    pub resource_name: String,
    pub base_font: String,
    pub family: String,
    pub weight: FontWeight,
    pub metrics: Arc<FontMetrics>,
    program: Option<Arc<Vec<u8>>>,
}

impl FontFace {
    pub fn is_embedded(&self) -> bool {
        self.program.is_some()
    }
}

/// The set of faces a document may use.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    faces: Vec<FontFace>,
    text_family: String,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::with_standard_fonts()
    }
}

impl FontRegistry {
    pub fn with_standard_fonts() -> Self {
        let faces = vec![
            FontFace {
                resource_name: "F1".to_string(),
                base_font: "Helvetica".to_string(),
                family: "Helvetica".to_string(),
                weight: FontWeight::Regular,
                metrics: Arc::new((*HELVETICA).clone()),
                program: None,
            },
            FontFace {
                resource_name: "F2".to_string(),
                base_font: "Helvetica-Bold".to_string(),
                family: "Helvetica".to_string(),
                weight: FontWeight::Bold,
                metrics: Arc::new((*HELVETICA_BOLD).clone()),
                program: None,
            },
        ];
        Self {
            faces,
            text_family: "Helvetica".to_string(),
        }
    }

    /// Parses and registers a TrueType program under `family`.
    pub fn register_truetype(
        &mut self,
        family: &str,
        weight: FontWeight,
        program: Arc<Vec<u8>>,
    ) -> Result<&FontFace, RenderError> {
        let face = ttf_parser::Face::parse(&program, 0)
            .map_err(|e| RenderError::Font(format!("cannot parse '{}': {}", family, e)))?;

        let scale = 1000.0 / face.units_per_em() as f32;
        let mut widths = [0u16; 256];
        for byte in 0x20..=0xFFu8 {
            let advance = win_ansi_char(byte)
                .and_then(|ch| face.glyph_index(ch))
                .and_then(|glyph| face.glyph_hor_advance(glyph))
                .unwrap_or(0);
            widths[byte as usize] = (advance as f32 * scale).round() as u16;
        }

        let base_font = face
            .names()
            .into_iter()
            .find(|name| name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
            .and_then(|name| name.to_string())
            .unwrap_or_else(|| family.replace(' ', ""));

        let metrics = FontMetrics {
            widths,
            ascent: face.ascender() as f32 * scale,
            descent: face.descender() as f32 * scale,
        };
        log::debug!("Registered TrueType font '{}' as {}", family, base_font);

        let resource_name = format!("F{}", self.faces.len() + 1);
        self.faces.push(FontFace {
            resource_name,
            base_font,
            family: family.to_string(),
            weight,
            metrics: Arc::new(metrics),
            program: Some(program),
        });
        Ok(&self.faces[self.faces.len() - 1])
    }

    /// Makes `family` the face used for table cell text.
    pub fn set_text_family(&mut self, family: impl Into<String>) {
        self.text_family = family.into();
    }

    pub fn text_family(&self) -> &str {
        &self.text_family
    }

    /// Finds the face for `family` and `weight`, falling back to Helvetica in
    /// the requested weight.
    pub fn resolve(&self, family: &str, weight: FontWeight) -> &FontFace {
        self.faces
            .iter()
            .find(|f| f.family.eq_ignore_ascii_case(family) && f.weight == weight)
            .or_else(|| {
                self.faces
                    .iter()
                    .find(|f| f.family == "Helvetica" && f.weight == weight)
            })
            .unwrap_or(&self.faces[0])
    }

    pub fn faces(&self) -> &[FontFace] {
        &self.faces
    }

    /// Buffers every font object and returns the `/Font` resource dictionary.
    pub(crate) fn write_resources<W: Write + Seek>(
        &self,
        writer: &mut StreamingPdfWriter<W>,
    ) -> Result<Dictionary, RenderError> {
        let mut fonts = Dictionary::new();
        for face in &self.faces {
            let font_id = match &face.program {
                None => writer.buffer_object(
                    dictionary! {
                        "Type" => "Font",
                        "Subtype" => "Type1",
                        "BaseFont" => face.base_font.as_str(),
                        "Encoding" => "WinAnsiEncoding",
                    }
                    .into(),
                ),
                Some(program) => write_truetype(writer, face, program)?,
            };
            fonts.set(face.resource_name.as_str(), font_id);
        }
        Ok(fonts)
    }
}

fn write_truetype<W: Write + Seek>(
    writer: &mut StreamingPdfWriter<W>,
    face: &FontFace,
    program: &[u8],
) -> Result<lopdf::ObjectId, RenderError> {
    let parsed = ttf_parser::Face::parse(program, 0)
        .map_err(|e| RenderError::Font(format!("cannot parse '{}': {}", face.family, e)))?;
    let scale = 1000.0 / parsed.units_per_em() as f32;
    let bbox = parsed.global_bounding_box();
    let cap_height = parsed
        .capital_height()
        .map(|h| h as f32 * scale)
        .unwrap_or(face.metrics.ascent);

    let file_id = writer.buffer_compressed_stream(
        dictionary! { "Length1" => program.len() as i64 },
        program,
    )?;

    let descriptor_id = writer.buffer_object(
        dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => face.base_font.as_str(),
            "Flags" => 32,
            "FontBBox" => vec![
                Object::Real(bbox.x_min as f32 * scale),
                Object::Real(bbox.y_min as f32 * scale),
                Object::Real(bbox.x_max as f32 * scale),
                Object::Real(bbox.y_max as f32 * scale),
            ],
            "ItalicAngle" => 0,
            "Ascent" => Object::Real(face.metrics.ascent),
            "Descent" => Object::Real(face.metrics.descent),
            "CapHeight" => Object::Real(cap_height),
            "StemV" => if face.weight.is_bold() { 120 } else { 80 },
            "FontFile2" => file_id,
        }
        .into(),
    );

    let widths: Vec<Object> = face.metrics.widths[0x20..=0xFF]
        .iter()
        .map(|w| Object::Integer(*w as i64))
        .collect();

    Ok(writer.buffer_object(
        dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => face.base_font.as_str(),
            "FirstChar" => 0x20,
            "LastChar" => 0xFF,
            "Widths" => widths,
            "Encoding" => "WinAnsiEncoding",
            "FontDescriptor" => descriptor_id,
        }
        .into(),
    ))
}
