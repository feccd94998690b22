//! Paginated PDF table.
//!
//! Layout is computed in millimetres on a US letter page. Every page repeats
//! the header row (bold, on a grey band), shades the body beige, centers
//! each cell's text and draws a full cell grid.
use std::{fs::File, io::BufWriter, path::Path};

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb,
};

use crate::{ExportError, Record, export::table_rows};

const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 15.0;
const ROW_HEIGHT: f32 = 7.0;
const CELL_PADDING: f32 = 1.5;
const FONT_SIZE: f32 = 9.0;
/// Average Helvetica glyph width at [`FONT_SIZE`], used to clip and center cell text.
const CHAR_WIDTH: f32 = 1.75;
/// Column widths in mm; they add up to the printable width.
const COLUMN_WIDTHS: [f32; 5] = [38.0, 20.0, 30.0, 22.0, 75.9];

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

pub(super) fn write(records: &[Record], path: &Path) -> Result<(), ExportError> {
    let rows = table_rows(records);
    let (header, body) = rows.split_at(1);

    let (doc, first_page, first_layer) = PdfDocument::new(
        "Finance records",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Table",
    );
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
    };

    let per_page = rows_per_page();
    let mut chunks = body.chunks(per_page);
    let first_chunk = chunks.next().unwrap_or(&[]);

    let layer = doc.get_page(first_page).get_layer(first_layer);
    draw_page(&layer, &fonts, &header[0], first_chunk);
    for chunk in chunks {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Table");
        let layer = doc.get_page(page).get_layer(layer);
        draw_page(&layer, &fonts, &header[0], chunk);
    }

    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    doc.save(&mut BufWriter::new(file))?;
    Ok(())
}

/// Data rows that fit under the header on one page.
fn rows_per_page() -> usize {
    let usable = PAGE_HEIGHT - 2.0 * MARGIN;
    ((usable / ROW_HEIGHT) as usize).saturating_sub(1).max(1)
}

fn draw_page(layer: &PdfLayerReference, fonts: &Fonts, header: &[String; 5], rows: &[[String; 5]]) {
    let top = PAGE_HEIGHT - MARGIN;
    let table_width: f32 = COLUMN_WIDTHS.iter().sum();
    let line_count = rows.len() + 1;
    let bottom = top - ROW_HEIGHT * line_count as f32;

    // header band
    layer.set_fill_color(grey(0.5));
    layer.add_rect(Rect::new(
        Mm(MARGIN),
        Mm(top - ROW_HEIGHT),
        Mm(MARGIN + table_width),
        Mm(top),
    ));
    layer.set_fill_color(grey(0.96));
    draw_row(layer, &fonts.bold, header, top);

    if !rows.is_empty() {
        layer.set_fill_color(beige());
        layer.add_rect(Rect::new(
            Mm(MARGIN),
            Mm(bottom),
            Mm(MARGIN + table_width),
            Mm(top - ROW_HEIGHT),
        ));
    }

    layer.set_fill_color(grey(0.0));
    for (index, row) in rows.iter().enumerate() {
        draw_row(layer, &fonts.regular, row, top - ROW_HEIGHT * (index + 1) as f32);
    }

    layer.set_outline_color(grey(0.0));
    layer.set_outline_thickness(0.5);
    for line in 0..=line_count {
        let y = top - ROW_HEIGHT * line as f32;
        layer.add_line(segment((MARGIN, y), (MARGIN + table_width, y)));
    }
    let mut x = MARGIN;
    layer.add_line(segment((x, top), (x, bottom)));
    for width in COLUMN_WIDTHS {
        x += width;
        layer.add_line(segment((x, top), (x, bottom)));
    }
}

/// Writes one row of text whose cells' top edge is at `top`.
fn draw_row(layer: &PdfLayerReference, font: &IndirectFontRef, cells: &[String; 5], top: f32) {
    let baseline = top - ROW_HEIGHT + 2.2;
    let mut x = MARGIN;
    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
        let text = clip(cell, width);
        if !text.is_empty() {
            let left = text_x(x, width, &text);
            layer.use_text(text, FONT_SIZE, Mm(left), Mm(baseline), font);
        }
        x += width;
    }
}

/// Left edge that centers `text` in the cell starting at `cell_left`.
fn text_x(cell_left: f32, width: f32, text: &str) -> f32 {
    let text_width = text.chars().count() as f32 * CHAR_WIDTH;
    cell_left + ((width - text_width) / 2.0).max(CELL_PADDING)
}

/// Shortens `text` so it fits a column `width` mm wide.
fn clip(text: &str, width: f32) -> String {
    let max_chars = ((width - 2.0 * CELL_PADDING) / CHAR_WIDTH) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn segment(from: (f32, f32), to: (f32, f32)) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(from.0), Mm(from.1)), false),
            (Point::new(Mm(to.0), Mm(to.1)), false),
        ],
        is_closed: false,
    }
}

fn grey(level: f32) -> Color {
    Color::Rgb(Rgb::new(level, level, level, None))
}

fn beige() -> Color {
    Color::Rgb(Rgb::new(245.0 / 255.0, 245.0 / 255.0, 220.0 / 255.0, None))
}
